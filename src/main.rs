use context::Game;
use ggez::conf::{WindowMode, WindowSetup};
use ggez::{event, GameResult};
use log::error;

mod backdrop;
mod context;
mod duel;
mod menu;

const SCREEN_WIDTH: f32 = 800.;
const SCREEN_HEIGHT: f32 = 600.;

/// Logic updates per second
const DESIRED_FPS: u32 = 60;

/// Our crate logs at info, ggez and wgpu only when something goes wrong
fn init_logging() {
    let env = env_logger::Env::default().default_filter_or("warn,void_rng=info");
    env_logger::Builder::from_env(env).init();
}

pub fn main() -> GameResult {
    init_logging();

    let cb = ggez::ContextBuilder::new("void_rng", "v0id")
        .window_setup(WindowSetup::default().title("v0id's RNG").vsync(true))
        .window_mode(
            WindowMode::default()
                .dimensions(SCREEN_WIDTH, SCREEN_HEIGHT)
                .resizable(false),
        );
    let (mut ctx, event_loop) = cb.build()?;

    let game = match Game::new(&mut ctx) {
        Ok(game) => game,
        Err(err) => {
            error!("{err}");
            drop(ctx);
            return Err(err.into());
        }
    };

    event::run(ctx, event_loop, game)
}
