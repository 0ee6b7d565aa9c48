use crate::duel::{DrawSource, Duel, Phase, Seat, NUMBERS};
use crate::SCREEN_WIDTH;
use ggez::graphics::{Canvas, Color, DrawMode, DrawParam, Drawable, Mesh, PxScale, Rect, Text};
use ggez::mint::Point2;
use ggez::{Context, GameResult};
use std::time::{Duration, Instant};

pub const BLUE: Color = Color {
    r: 0.,
    g: 0.39,
    b: 0.78,
    a: 1.,
};

pub const RED: Color = Color {
    r: 0.78,
    g: 0.,
    b: 0.,
    a: 1.,
};

pub const GREEN: Color = Color {
    r: 0.,
    g: 0.59,
    b: 0.,
    a: 1.,
};

pub const YELLOW: Color = Color {
    r: 1.,
    g: 0.98,
    b: 0.,
    a: 1.,
};

pub const PURPLE: Color = Color {
    r: 0.93,
    g: 0.,
    b: 1.,
    a: 1.,
};

const GREY: Color = Color {
    r: 0.39,
    g: 0.39,
    b: 0.39,
    a: 1.,
};

/// Drawn over a button while its press is highlighted
const PRESS_GLOW: Color = Color {
    r: 1.,
    g: 1.,
    b: 1.,
    a: 0.35,
};

const TEXT_SIZE: f32 = 26.;

const TITLE_SIZE: f32 = 36.;

/// How long a press or a reveal stays highlighted
pub const FLASH_DURATION: Duration = Duration::from_millis(180);

/// Top left corner of the first number button
const NUMBER_ORIGIN: (f32, f32) = (150., 300.);

/// Horizontal distance between number buttons
const NUMBER_STRIDE: f32 = 100.;

const NUMBER_SIZE: (f32, f32) = (80., 60.);

/// Shared by "Next Round" and "New Game", they are never offered together
const WIDE_BUTTON: (f32, f32, f32, f32) = (300., 500., 200., 50.);

const NAME_FIELD: (f32, f32, f32, f32) = (250., 300., 300., 40.);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    Number(u8),
    NextRound,
    NewGame,
}

#[derive(Debug, Clone, Copy)]
pub struct Button {
    pub kind: ButtonKind,
    pub rect: Rect,
    pub color: Color,
}

impl Button {
    pub fn label(&self) -> String {
        match self.kind {
            ButtonKind::Number(n) => n.to_string(),
            ButtonKind::NextRound => "Next Round".to_string(),
            ButtonKind::NewGame => "New Game".to_string(),
        }
    }
}

/// The buttons the duel currently accepts presses on.
pub fn offered<S: DrawSource>(duel: &Duel<S>) -> Vec<Button> {
    let (x, y, w, h) = WIDE_BUTTON;

    match duel.phase() {
        Phase::NameEntry { .. } => vec![],
        Phase::GameOver => vec![Button {
            kind: ButtonKind::NewGame,
            rect: Rect::new(x, y, w, h),
            color: PURPLE,
        }],
        Phase::Playing if duel.round().is_complete() => vec![Button {
            kind: ButtonKind::NextRound,
            rect: Rect::new(x, y, w, h),
            color: GREEN,
        }],
        Phase::Playing => {
            let color = seat_color(duel.round().chooser);
            NUMBERS
                .iter()
                .enumerate()
                .map(|(i, n)| Button {
                    kind: ButtonKind::Number(*n),
                    rect: Rect::new(
                        NUMBER_ORIGIN.0 + i as f32 * NUMBER_STRIDE,
                        NUMBER_ORIGIN.1,
                        NUMBER_SIZE.0,
                        NUMBER_SIZE.1,
                    ),
                    color,
                })
                .collect()
        }
    }
}

/// Find the offered button under the pointer
pub fn hit<S: DrawSource>(duel: &Duel<S>, x: f32, y: f32) -> Option<ButtonKind> {
    offered(duel)
        .into_iter()
        .find(|button| button.rect.contains(Point2 { x, y }))
        .map(|button| button.kind)
}

#[inline]
fn seat_color(seat: Seat) -> Color {
    match seat {
        Seat::One => BLUE,
        Seat::Two => RED,
    }
}

/// A short lived highlight. Active while less than [FLASH_DURATION] passed since it was triggered.
#[derive(Debug, Default, Clone, Copy)]
pub struct Flash {
    started: Option<Instant>,
}

impl Flash {
    pub fn trigger(&mut self, now: Instant) {
        self.started = Some(now);
    }

    pub fn is_active(&self, now: Instant) -> bool {
        self.started
            .is_some_and(|started| now.saturating_duration_since(started) < FLASH_DURATION)
    }

    /// Forget the highlight once it ran out
    pub fn expire(&mut self, now: Instant) {
        if !self.is_active(now) {
            self.started = None;
        }
    }
}

/// Everything on screen that is not the backdrop.
#[derive(Debug, Default)]
pub struct Board {
    /// The last pressed button, highlighted while `press_flash` is active
    pressed: Option<ButtonKind>,

    press_flash: Flash,

    /// Highlights the status line once a number is drawn
    reveal_flash: Flash,
}

impl Board {
    pub fn press(&mut self, kind: ButtonKind, now: Instant) {
        self.pressed = Some(kind);
        self.press_flash.trigger(now);
    }

    pub fn reveal(&mut self, now: Instant) {
        self.reveal_flash.trigger(now);
    }

    /// Drop highlights that ran out
    pub fn tick(&mut self, now: Instant) {
        self.press_flash.expire(now);
        self.reveal_flash.expire(now);
        if !self.press_flash.is_active(now) {
            self.pressed = None;
        }
    }

    /// Whether the status line is still lit up from the last draw
    pub fn revealing(&self, now: Instant) -> bool {
        self.reveal_flash.is_active(now)
    }

    pub fn highlighted(&self, now: Instant) -> Option<ButtonKind> {
        self.pressed.filter(|_| self.press_flash.is_active(now))
    }
}

/// Drawing logic impls
impl Board {
    pub fn draw<S: DrawSource>(
        &self,
        ctx: &mut Context,
        canvas: &mut Canvas,
        duel: &Duel<S>,
    ) -> GameResult {
        match duel.phase() {
            Phase::NameEntry { seat } => self.draw_name_entry(ctx, canvas, duel, seat),
            Phase::Playing | Phase::GameOver => self.draw_play(ctx, canvas, duel),
        }
    }

    fn draw_name_entry<S: DrawSource>(
        &self,
        ctx: &mut Context,
        canvas: &mut Canvas,
        duel: &Duel<S>,
        seat: Seat,
    ) -> GameResult {
        draw_centered(ctx, canvas, "Enter Player Names", TITLE_SIZE, 150., PURPLE);

        if seat == Seat::Two {
            let first = format!("Player 1: {}", duel.player(Seat::One).name());
            draw_centered(ctx, canvas, &first, TEXT_SIZE, 200., BLUE);
        }

        draw_centered(ctx, canvas, &duel.message(), TEXT_SIZE, 250., seat_color(seat));

        let (x, y, w, h) = NAME_FIELD;
        let rect = Rect::new(x, y, w, h);

        let field = Mesh::new_rectangle(ctx, DrawMode::fill(), rect, Color::WHITE)?;
        let border = Mesh::new_rectangle(ctx, DrawMode::stroke(3.), rect, BLUE)?;
        canvas.draw(&field, DrawParam::default());
        canvas.draw(&border, DrawParam::default());

        let mut pending = Text::new(duel.pending_name());
        pending.set_scale(PxScale::from(TEXT_SIZE));
        canvas.draw(
            &pending,
            DrawParam::default()
                .dest(Point2 {
                    x: x + 10.,
                    y: y + 8.,
                })
                .color(Color::BLACK),
        );

        draw_centered(ctx, canvas, "Press ENTER to confirm", TEXT_SIZE, 370., GREY);

        Ok(())
    }

    fn draw_play<S: DrawSource>(
        &self,
        ctx: &mut Context,
        canvas: &mut Canvas,
        duel: &Duel<S>,
    ) -> GameResult {
        let now = Instant::now();

        draw_centered(ctx, canvas, "v0id's RNG", TITLE_SIZE, 50., PURPLE);

        for (seat, x) in [(Seat::One, 200.), (Seat::Two, 500.)] {
            let player = duel.player(seat);
            let score = format!("{}: {}", player.name(), player.score());
            draw_text(canvas, &score, Point2 { x, y: 120. }, seat_color(seat));
        }

        for (seat, x) in [(Seat::One, 150.), (Seat::Two, 450.)] {
            if let Some(guess) = duel.round().guess(seat) {
                let guess = format!("{} guess: {guess}", duel.player(seat).name());
                draw_text(canvas, &guess, Point2 { x, y: 180. }, seat_color(seat));
            }
        }

        let message_color = if self.revealing(now) {
            YELLOW
        } else {
            PURPLE
        };
        draw_centered(ctx, canvas, &duel.message(), TEXT_SIZE, 220., message_color);

        if let Some(champion) = duel.champion() {
            let banner = format!("{} Wins!", champion.name());
            draw_centered(ctx, canvas, &banner, TITLE_SIZE, 400., YELLOW);
        }

        let highlighted = self.highlighted(now);
        for button in offered(duel) {
            draw_button(ctx, canvas, &button, highlighted == Some(button.kind))?;
        }

        Ok(())
    }
}

fn draw_button(ctx: &mut Context, canvas: &mut Canvas, button: &Button, glow: bool) -> GameResult {
    let fill = Mesh::new_rectangle(ctx, DrawMode::fill(), button.rect, button.color)?;
    let border = Mesh::new_rectangle(ctx, DrawMode::stroke(2.), button.rect, Color::BLACK)?;

    canvas.draw(&fill, DrawParam::default());
    if glow {
        let glow = Mesh::new_rectangle(ctx, DrawMode::fill(), button.rect, PRESS_GLOW)?;
        canvas.draw(&glow, DrawParam::default());
    }
    canvas.draw(&border, DrawParam::default());

    let mut label = Text::new(button.label());
    label.set_scale(PxScale::from(TEXT_SIZE));
    let (w, h) = text_size(ctx, &label);

    canvas.draw(
        &label,
        DrawParam::default()
            .dest(Point2 {
                x: button.rect.x + button.rect.w * 0.5 - w * 0.5,
                y: button.rect.y + button.rect.h * 0.5 - h * 0.5,
            })
            .color(Color::WHITE),
    );

    Ok(())
}

fn draw_text(canvas: &mut Canvas, text: &str, dest: Point2<f32>, color: Color) {
    let mut text = Text::new(text);
    text.set_scale(PxScale::from(TEXT_SIZE));
    canvas.draw(&text, DrawParam::default().dest(dest).color(color));
}

/// Draw a line of text centered horizontally on the window
fn draw_centered(
    ctx: &mut Context,
    canvas: &mut Canvas,
    text: &str,
    size: f32,
    y: f32,
    color: Color,
) {
    let mut text = Text::new(text);
    text.set_scale(PxScale::from(size));
    let (w, _) = text_size(ctx, &text);

    canvas.draw(
        &text,
        DrawParam::default()
            .dest(Point2 {
                x: SCREEN_WIDTH * 0.5 - w * 0.5,
                y,
            })
            .color(color),
    );
}

#[inline]
fn text_size(ctx: &mut Context, text: &Text) -> (f32, f32) {
    text.dimensions(ctx)
        .map(|rect| (rect.w, rect.h))
        .unwrap_or_default()
}
