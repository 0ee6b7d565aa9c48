use super::STARTING_SCORE;
use log::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    score: i32,
    name: String,
}

impl Player {
    pub fn new() -> Self {
        Self {
            score: STARTING_SCORE,
            name: String::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Names can only be given once, later ones are dropped.
    pub(super) fn christen(&mut self, name: &str) {
        if !self.name.is_empty() {
            debug!("{} already has a name, ignoring {name}", self.name);
            return;
        }
        self.name = name.to_string();
    }

    pub(super) fn add_points(&mut self, delta: i32) {
        self.score += delta;
    }

    pub(super) fn reset_score(&mut self) {
        self.score = STARTING_SCORE;
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_unnamed_with_three_points() {
        let player = Player::new();
        assert_eq!(player.score(), 3);
        assert!(player.name().is_empty());
    }

    #[test]
    fn name_is_fixed_once_given() {
        let mut player = Player::new();
        player.christen("Ann");
        player.christen("Bo");
        assert_eq!(player.name(), "Ann");
    }

    #[test]
    fn points_move_and_reset() {
        let mut player = Player::new();
        player.add_points(-1);
        player.add_points(-1);
        assert_eq!(player.score(), 1);

        player.reset_score();
        assert_eq!(player.score(), STARTING_SCORE);
    }
}
