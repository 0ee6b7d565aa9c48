use crate::backdrop::{Backdrop, BackdropError, BACKDROP_DIR};
use crate::duel::{DrawSource, Duel, NameInput, Phase, RngDraw};
use crate::menu::{self, Board, ButtonKind};
use crate::DESIRED_FPS;
use ggez::event;
use ggez::graphics::{self, Color};
use ggez::input::keyboard::{KeyCode, KeyInput};
use ggez::input::mouse::MouseButton;
use ggez::{Context, GameResult};
use log::info;
use std::time::{Duration, Instant};

/// The duel plus what is drawn on top of it. Turns clicks and keys into duel operations.
#[derive(Debug)]
pub struct Table<S = RngDraw<rand::rngs::ThreadRng>> {
    duel: Duel<S>,

    board: Board,
}

impl<S: DrawSource> Table<S> {
    pub fn new(duel: Duel<S>) -> Self {
        Self {
            duel,
            board: Board::default(),
        }
    }

    pub fn press(&mut self, kind: ButtonKind, now: Instant) {
        let was_open = !self.duel.round().is_complete();

        self.board.press(kind, now);

        match kind {
            ButtonKind::Number(n) => self.duel.submit_guess(n),
            ButtonKind::NextRound => self.duel.start_next_round(),
            ButtonKind::NewGame => self.duel.start_new_game(),
        }

        if was_open && self.duel.round().is_complete() {
            self.board.reveal(now);
        }
    }

    /// Keyboard presses go through the same buttons the mouse can click
    pub fn press_if_offered(&mut self, kind: ButtonKind, now: Instant) {
        if menu::offered(&self.duel).iter().any(|button| button.kind == kind) {
            self.press(kind, now);
        }
    }

    pub fn click(&mut self, x: f32, y: f32, now: Instant) {
        if let Some(kind) = menu::hit(&self.duel, x, y) {
            self.press(kind, now);
        }
    }

    /// Return: confirms a name, or presses whichever of next round and new game is shown
    pub fn confirm(&mut self, now: Instant) {
        match self.duel.phase() {
            Phase::NameEntry { .. } => self.duel.submit_name(NameInput::Confirm),
            Phase::Playing => self.press_if_offered(ButtonKind::NextRound, now),
            Phase::GameOver => self.press_if_offered(ButtonKind::NewGame, now),
        }
    }

    /// A typed character is part of a name, or a guess once names are in
    pub fn type_char(&mut self, character: char, now: Instant) {
        match self.duel.phase() {
            Phase::NameEntry { .. } => self.duel.submit_name(NameInput::Char(character)),
            Phase::Playing | Phase::GameOver => {
                if let Some(digit) = character.to_digit(10) {
                    self.press_if_offered(ButtonKind::Number(digit as u8), now);
                }
            }
        }
    }

    pub fn erase(&mut self) {
        if matches!(self.duel.phase(), Phase::NameEntry { .. }) {
            self.duel.submit_name(NameInput::Erase);
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.board.tick(now);
    }

    pub fn draw(&self, ctx: &mut Context, canvas: &mut graphics::Canvas) -> GameResult {
        self.board.draw(ctx, canvas, &self.duel)
    }
}

/// Everything the window needs, created once at startup and dropped on exit.
pub struct Game {
    table: Table,

    backdrop: Backdrop,
}

impl Game {
    pub fn new(ctx: &mut Context) -> Result<Self, BackdropError> {
        Ok(Self {
            table: Table::new(Duel::new()),
            backdrop: Backdrop::open(ctx, BACKDROP_DIR)?,
        })
    }
}

impl event::EventHandler for Game {
    fn update(&mut self, ctx: &mut Context) -> GameResult {
        let step = Duration::from_secs(1) / DESIRED_FPS;
        while ctx.time.check_update_time(DESIRED_FPS) {
            self.backdrop.update(step);
        }

        self.table.tick(Instant::now());

        Ok(())
    }

    fn draw(&mut self, ctx: &mut Context) -> GameResult {
        let mut canvas = graphics::Canvas::from_frame(ctx, Some(Color::BLACK));

        self.backdrop.draw(&mut canvas);
        self.table.draw(ctx, &mut canvas)?;

        canvas.finish(ctx)?;

        Ok(())
    }

    fn mouse_button_down_event(
        &mut self,
        _ctx: &mut Context,
        button: MouseButton,
        x: f32,
        y: f32,
    ) -> GameResult {
        if button == MouseButton::Left {
            self.table.click(x, y, Instant::now());
        }

        Ok(())
    }

    fn text_input_event(&mut self, _ctx: &mut Context, character: char) -> GameResult {
        self.table.type_char(character, Instant::now());
        Ok(())
    }

    fn key_down_event(
        &mut self,
        ctx: &mut Context,
        input: KeyInput,
        _repeated: bool,
    ) -> GameResult {
        match input.keycode {
            Some(KeyCode::Escape) => ctx.request_quit(),
            Some(KeyCode::Return | KeyCode::NumpadEnter) => self.table.confirm(Instant::now()),
            Some(KeyCode::Back) => self.table.erase(),
            _ => {}
        }

        Ok(())
    }

    fn quit_event(&mut self, _ctx: &mut Context) -> GameResult<bool> {
        info!("shutting down");
        Ok(false)
    }
}
