use log::{debug, info};

#[cfg(test)]
pub use draw::Rigged;
pub use draw::{DrawSource, RngDraw};
pub use name::{NameBuffer, NameInput};
pub use player::Player;

mod draw;
mod name;
mod player;

/// Every number a player can guess and the draw can land on
pub const NUMBERS: [u8; 5] = [1, 2, 3, 4, 5];

/// Both players start every game with this many points
pub const STARTING_SCORE: i32 = 3;

/// The longest name a player can enter
pub const MAX_NAME_LEN: usize = 15;

/// One of the two players.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Seat {
    One,
    Two,
}

impl Seat {
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
        }
    }

    /// The player number as shown on screen
    #[inline]
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }
}

/// Represents the current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the player in `seat` to type their name
    NameEntry { seat: Seat },

    /// Rounds are being played
    Playing,

    /// Somebody ran out of points
    GameOver,
}

/// How a round went.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The round has not been drawn yet
    Unset,

    /// Both guessed the drawn number
    TieCorrect,

    Player1Correct,

    Player2Correct,

    NeitherCorrect,
}

impl Outcome {
    /// Compare both guesses to the drawn number.
    pub fn resolve(guesses: [u8; 2], drawn: u8) -> Self {
        match (guesses[0] == drawn, guesses[1] == drawn) {
            (true, true) => Self::TieCorrect,
            (true, false) => Self::Player1Correct,
            (false, true) => Self::Player2Correct,
            (false, false) => Self::NeitherCorrect,
        }
    }

    /// Points gained by each seat. A point won is always a point lost by the other player.
    pub fn score_delta(self) -> [i32; 2] {
        match self {
            Self::Player1Correct => [1, -1],
            Self::Player2Correct => [-1, 1],
            Self::Unset | Self::TieCorrect | Self::NeitherCorrect => [0, 0],
        }
    }
}

/// A single cycle of two guesses and one draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Round {
    /// Whose guess is being collected
    pub chooser: Seat,

    /// Indexed by [Seat::index]
    pub guesses: [Option<u8>; 2],

    /// Set once both players guessed
    pub drawn: Option<u8>,

    pub outcome: Outcome,
}

impl Round {
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.outcome != Outcome::Unset
    }

    #[inline]
    pub fn guess(&self, seat: Seat) -> Option<u8> {
        self.guesses[seat.index()]
    }
}

impl Default for Round {
    fn default() -> Self {
        Self {
            chooser: Seat::One,
            guesses: [None, None],
            drawn: None,
            outcome: Outcome::Unset,
        }
    }
}

/// The whole match between two players.
///
/// Every operation silently ignores input that does not fit the current state, so the
/// presentation layer only has to avoid offering what makes no sense.
#[derive(Debug)]
pub struct Duel<S = RngDraw<rand::rngs::ThreadRng>> {
    players: [Player; 2],

    phase: Phase,

    /// The name currently being typed
    pending: NameBuffer,

    round: Round,

    source: S,
}

impl Duel {
    pub fn new() -> Self {
        Self::with_source(RngDraw::thread())
    }
}

impl Default for Duel {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: DrawSource> Duel<S> {
    /// Start a match whose draws come from `source`.
    pub fn with_source(source: S) -> Self {
        Self {
            players: [Player::new(), Player::new()],
            phase: Phase::NameEntry { seat: Seat::One },
            pending: NameBuffer::default(),
            round: Round::default(),
            source,
        }
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn round(&self) -> &Round {
        &self.round
    }

    #[inline]
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }

    #[inline]
    pub fn pending_name(&self) -> &str {
        self.pending.as_str()
    }

    /// Whether either player is out of points
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.players.iter().any(|player| player.score() <= 0)
    }

    /// Feed one edit into the name being typed.
    pub fn submit_name(&mut self, input: NameInput) {
        let Phase::NameEntry { seat } = self.phase else {
            debug!("ignoring {input:?} outside of name entry");
            return;
        };

        match input {
            NameInput::Char(c) => {
                if !self.pending.push(c) {
                    debug!("rejected name character {c:?}");
                }
            }
            NameInput::Erase => {
                self.pending.pop();
            }
            NameInput::Confirm => {
                let Some(name) = self.pending.take() else {
                    debug!("ignoring blank name");
                    return;
                };

                self.players[seat.index()].christen(&name);
                info!("player {} is {name}", seat.number());

                self.phase = match seat {
                    Seat::One => Phase::NameEntry { seat: Seat::Two },
                    Seat::Two => {
                        self.round = Round::default();
                        Phase::Playing
                    }
                };
            }
        }
    }

    /// Record the current chooser's guess. The second guess of a round draws the number.
    pub fn submit_guess(&mut self, number: u8) {
        if self.phase != Phase::Playing || self.round.is_complete() || !NUMBERS.contains(&number) {
            debug!("ignoring guess {number} during {:?}", self.phase);
            return;
        }

        let seat = self.round.chooser;
        self.round.guesses[seat.index()] = Some(number);

        match seat {
            Seat::One => self.round.chooser = Seat::Two,
            Seat::Two => self.evaluate_round(),
        }
    }

    fn evaluate_round(&mut self) {
        let [Some(first), Some(second)] = self.round.guesses else {
            return;
        };

        let drawn = self.source.draw(&NUMBERS);
        let outcome = Outcome::resolve([first, second], drawn);

        for (player, delta) in self.players.iter_mut().zip(outcome.score_delta()) {
            player.add_points(delta);
        }

        self.round.drawn = Some(drawn);
        self.round.outcome = outcome;

        info!(
            "drew {drawn} against {first} and {second}: {outcome:?}, score {}:{}",
            self.players[0].score(),
            self.players[1].score()
        );

        if self.is_game_over() {
            self.phase = Phase::GameOver;
            if let Some(champion) = self.champion() {
                info!("{} wins the game", champion.name());
            }
        }
    }

    /// Clear the finished round so both players can guess again.
    pub fn start_next_round(&mut self) {
        if self.phase != Phase::Playing || !self.round.is_complete() || self.is_game_over() {
            debug!("ignoring next round during {:?}", self.phase);
            return;
        }

        self.round = Round::default();
    }

    /// Restore both scores after a game over. Names are kept.
    pub fn start_new_game(&mut self) {
        if self.phase != Phase::GameOver || !self.is_game_over() {
            debug!("ignoring new game during {:?}", self.phase);
            return;
        }

        for player in self.players.iter_mut() {
            player.reset_score();
        }
        self.round = Round::default();
        self.phase = Phase::Playing;

        info!("new game");
    }

    /// The status line shown above the buttons
    pub fn message(&self) -> String {
        if let Phase::NameEntry { seat } = self.phase {
            return format!("Player {}, enter your username:", seat.number());
        }

        match self.round.drawn {
            Some(drawn) if self.round.is_complete() => {
                format!("Random number: {drawn} | Winner: {}", self.winner_label())
            }
            _ => format!(
                "{}: Choose your number (1-5)",
                self.player(self.round.chooser).name()
            ),
        }
    }

    fn winner_label(&self) -> &str {
        match self.round.outcome {
            Outcome::TieCorrect => "Both guessed right!",
            Outcome::Player1Correct => self.players[0].name(),
            Outcome::Player2Correct => self.players[1].name(),
            Outcome::Unset | Outcome::NeitherCorrect => "Nobody",
        }
    }

    /// The player left standing once the game is over
    pub fn champion(&self) -> Option<&Player> {
        if self.phase != Phase::GameOver {
            return None;
        }
        self.players.iter().find(|player| player.score() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn type_name<S: DrawSource>(duel: &mut Duel<S>, name: &str) {
        for c in name.chars() {
            duel.submit_name(NameInput::Char(c));
        }
        duel.submit_name(NameInput::Confirm);
    }

    /// Ann and Bo, ready to guess
    fn named(draws: &[u8]) -> Duel<Rigged> {
        let mut duel = Duel::with_source(Rigged::new(draws));
        type_name(&mut duel, "Ann");
        type_name(&mut duel, "Bo");
        duel
    }

    fn play<S: DrawSource>(duel: &mut Duel<S>, first: u8, second: u8) {
        duel.submit_guess(first);
        duel.submit_guess(second);
    }

    fn scores<S: DrawSource>(duel: &Duel<S>) -> (i32, i32) {
        (duel.player(Seat::One).score(), duel.player(Seat::Two).score())
    }

    #[test]
    fn name_entry_walks_both_seats() {
        let mut duel = Duel::with_source(Rigged::new(&[1]));
        assert_eq!(duel.phase(), Phase::NameEntry { seat: Seat::One });

        type_name(&mut duel, "Ann");
        assert_eq!(duel.phase(), Phase::NameEntry { seat: Seat::Two });
        assert_eq!(duel.player(Seat::One).name(), "Ann");
        assert_eq!(duel.pending_name(), "");

        type_name(&mut duel, "Bo");
        assert_eq!(duel.phase(), Phase::Playing);
        assert_eq!(duel.player(Seat::Two).name(), "Bo");
        assert_eq!(duel.round().chooser, Seat::One);
    }

    #[test]
    fn blank_name_does_not_advance() {
        let mut duel = Duel::with_source(Rigged::new(&[1]));

        duel.submit_name(NameInput::Confirm);
        assert_eq!(duel.phase(), Phase::NameEntry { seat: Seat::One });

        type_name(&mut duel, "   ");
        assert_eq!(duel.phase(), Phase::NameEntry { seat: Seat::One });
        assert!(duel.player(Seat::One).name().is_empty());
    }

    #[test]
    fn erase_removes_last_character() {
        let mut duel = Duel::with_source(Rigged::new(&[1]));
        duel.submit_name(NameInput::Erase);
        assert_eq!(duel.pending_name(), "");

        for c in "Annx".chars() {
            duel.submit_name(NameInput::Char(c));
        }
        duel.submit_name(NameInput::Erase);
        duel.submit_name(NameInput::Confirm);

        assert_eq!(duel.player(Seat::One).name(), "Ann");
    }

    #[test]
    fn confirmed_name_is_trimmed() {
        let mut duel = Duel::with_source(Rigged::new(&[1]));
        type_name(&mut duel, " Ann ");
        assert_eq!(duel.player(Seat::One).name(), "Ann");
    }

    #[test]
    fn names_are_ignored_once_playing() {
        let mut duel = named(&[1]);
        duel.submit_name(NameInput::Char('x'));
        duel.submit_name(NameInput::Confirm);

        assert_eq!(duel.pending_name(), "");
        assert_eq!(duel.player(Seat::One).name(), "Ann");
        assert_eq!(duel.phase(), Phase::Playing);
    }

    #[test]
    fn guess_during_name_entry_is_ignored() {
        let mut duel = Duel::with_source(Rigged::new(&[1]));
        duel.submit_guess(3);

        assert_eq!(duel.round(), &Round::default());
        assert_eq!(duel.phase(), Phase::NameEntry { seat: Seat::One });
    }

    #[test]
    fn out_of_range_guess_is_ignored() {
        let mut duel = named(&[1]);
        duel.submit_guess(0);
        duel.submit_guess(6);

        assert_eq!(duel.round(), &Round::default());
    }

    #[test]
    fn first_guess_hands_over_to_second_player() {
        let mut duel = named(&[1]);
        duel.submit_guess(4);

        assert_eq!(duel.round().guess(Seat::One), Some(4));
        assert_eq!(duel.round().guess(Seat::Two), None);
        assert_eq!(duel.round().chooser, Seat::Two);
        assert!(!duel.round().is_complete());
        assert_eq!(duel.message(), "Bo: Choose your number (1-5)");
    }

    #[test]
    fn guesses_after_the_draw_are_ignored() {
        let mut duel = named(&[1]);
        play(&mut duel, 2, 3);
        let round = duel.round().clone();

        duel.submit_guess(1);
        assert_eq!(duel.round(), &round);
    }

    #[test]
    fn both_right_is_a_tie() {
        let mut duel = named(&[3]);
        play(&mut duel, 3, 3);

        assert_eq!(duel.round().outcome, Outcome::TieCorrect);
        assert_eq!(duel.round().drawn, Some(3));
        assert_eq!(scores(&duel), (3, 3));
        assert_eq!(duel.message(), "Random number: 3 | Winner: Both guessed right!");
    }

    #[test]
    fn first_player_right_takes_a_point() {
        let mut duel = named(&[2]);
        play(&mut duel, 2, 5);

        assert_eq!(duel.round().outcome, Outcome::Player1Correct);
        assert_eq!(scores(&duel), (4, 2));
        assert_eq!(duel.message(), "Random number: 2 | Winner: Ann");
    }

    #[test]
    fn second_player_right_takes_a_point() {
        let mut duel = named(&[5]);
        play(&mut duel, 2, 5);

        assert_eq!(duel.round().outcome, Outcome::Player2Correct);
        assert_eq!(scores(&duel), (2, 4));
        assert_eq!(duel.message(), "Random number: 5 | Winner: Bo");
    }

    #[test]
    fn nobody_right_changes_nothing() {
        let mut duel = named(&[1]);
        play(&mut duel, 2, 5);

        assert_eq!(duel.round().outcome, Outcome::NeitherCorrect);
        assert_eq!(scores(&duel), (3, 3));
        assert_eq!(duel.message(), "Random number: 1 | Winner: Nobody");
    }

    #[test]
    fn outcome_table_covers_every_combination() {
        for first in NUMBERS {
            for second in NUMBERS {
                for drawn in NUMBERS {
                    let outcome = Outcome::resolve([first, second], drawn);
                    let expected = match (first == drawn, second == drawn) {
                        (true, true) => (Outcome::TieCorrect, [0, 0]),
                        (true, false) => (Outcome::Player1Correct, [1, -1]),
                        (false, true) => (Outcome::Player2Correct, [-1, 1]),
                        (false, false) => (Outcome::NeitherCorrect, [0, 0]),
                    };
                    assert_eq!((outcome, outcome.score_delta()), expected);
                }
            }
        }
    }

    #[test]
    fn next_round_needs_a_finished_round() {
        let mut duel = named(&[1]);

        duel.start_next_round();
        assert_eq!(duel.round(), &Round::default());

        duel.submit_guess(2);
        duel.start_next_round();
        assert_eq!(duel.round().guess(Seat::One), Some(2));
        assert_eq!(duel.round().chooser, Seat::Two);

        duel.submit_guess(3);
        duel.start_next_round();
        assert_eq!(duel.round(), &Round::default());
        assert_eq!(duel.message(), "Ann: Choose your number (1-5)");
    }

    #[test]
    fn new_game_is_ignored_while_both_have_points() {
        let mut duel = named(&[2]);
        play(&mut duel, 2, 5);

        duel.start_new_game();
        assert_eq!(scores(&duel), (4, 2));
        assert!(duel.round().is_complete());
        assert_eq!(duel.phase(), Phase::Playing);
    }

    #[test]
    fn running_out_of_points_ends_the_game() {
        let mut duel = named(&[2]);

        for expected in [(4, 2), (5, 1), (6, 0)] {
            play(&mut duel, 2, 5);
            assert_eq!(scores(&duel), expected);
            duel.start_next_round();
        }

        assert_eq!(duel.phase(), Phase::GameOver);
        assert_eq!(duel.champion().map(Player::name), Some("Ann"));

        let round = duel.round().clone();
        duel.start_next_round();
        assert_eq!(duel.round(), &round);

        duel.submit_guess(1);
        assert_eq!(duel.round(), &round);

        duel.start_new_game();
        assert_eq!(scores(&duel), (3, 3));
        assert_eq!(duel.round(), &Round::default());
        assert_eq!(duel.phase(), Phase::Playing);
        assert_eq!(duel.player(Seat::Two).name(), "Bo");
        assert_eq!(duel.champion(), None);
    }

    #[test]
    fn champion_is_only_known_after_game_over() {
        let duel = named(&[1]);
        assert_eq!(duel.champion(), None);
    }

    #[test]
    fn name_entry_message_names_the_seat() {
        let mut duel = Duel::with_source(Rigged::new(&[1]));
        assert_eq!(duel.message(), "Player 1, enter your username:");

        type_name(&mut duel, "Ann");
        assert_eq!(duel.message(), "Player 2, enter your username:");
    }

    proptest! {
        #[test]
        fn scores_always_sum_to_six(
            rounds in prop::collection::vec((1u8..=5, 1u8..=5, 1u8..=5), 1..60)
        ) {
            let draws: Vec<u8> = rounds.iter().map(|round| round.2).collect();
            let mut duel = named(&draws);

            for (first, second, drawn) in rounds {
                if duel.phase() == Phase::GameOver {
                    duel.start_new_game();
                }

                let before = scores(&duel);
                play(&mut duel, first, second);
                let after = scores(&duel);

                let delta = Outcome::resolve([first, second], drawn).score_delta();
                prop_assert_eq!(after, (before.0 + delta[0], before.1 + delta[1]));
                prop_assert_eq!(after.0 + after.1, 6);
                prop_assert_eq!(duel.phase() == Phase::GameOver, after.0 == 0 || after.1 == 0);

                duel.start_next_round();
            }
        }

        #[test]
        fn pending_name_never_exceeds_limit(text in ".{0,40}") {
            let mut duel = Duel::with_source(Rigged::new(&[1]));
            for c in text.chars() {
                duel.submit_name(NameInput::Char(c));
                prop_assert!(duel.pending_name().chars().count() <= MAX_NAME_LEN);
            }

            duel.submit_name(NameInput::Confirm);
            let advanced = duel.phase() == Phase::NameEntry { seat: Seat::Two };
            prop_assert_eq!(advanced, !duel.player(Seat::One).name().is_empty());
        }
    }
}
