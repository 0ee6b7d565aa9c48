use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};
use derive_more::{Display, Error, From};
use ggez::graphics::{Canvas, DrawParam, Image};
use ggez::{glam, Context, GameError};
use log::{info, trace};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Where the backdrop frames live inside the resource directory
pub const BACKDROP_DIR: &str = "/backdrop";

/// Playback speed of the backdrop
pub const BACKDROP_FPS: u32 = 30;

const FRAME_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Why the backdrop could not be opened. Fatal at startup.
#[derive(Debug, Display, Error, From)]
pub enum BackdropError {
    #[display("backdrop directory {} does not exist", path.display())]
    Missing { path: PathBuf },

    #[display("backdrop directory {} holds no frames", path.display())]
    Empty { path: PathBuf },

    #[display("could not load backdrop frames: {source}")]
    #[from]
    Load { source: GameError },
}

impl From<BackdropError> for GameError {
    fn from(err: BackdropError) -> Self {
        GameError::ResourceLoadError(err.to_string())
    }
}

/// Playback position of a looping frame sequence.
#[derive(Debug, Clone)]
pub struct Reel {
    len: usize,

    /// How long each frame stays on screen
    frame_time: Duration,

    cursor: usize,

    /// Time accumulated towards the next frame
    carry: Duration,
}

impl Reel {
    pub fn new(len: usize, fps: u32) -> Self {
        Self {
            len: len.max(1),
            frame_time: Duration::from_secs(1) / fps.max(1),
            cursor: 0,
            carry: Duration::ZERO,
        }
    }

    #[inline]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Move the reel forward by `delta` and return the frame to show.
    /// Running past the last frame starts over from the first one.
    pub fn advance(&mut self, delta: Duration) -> usize {
        self.carry += delta;

        while self.carry >= self.frame_time {
            self.carry -= self.frame_time;
            self.cursor += 1;

            if self.cursor == self.len {
                trace!("backdrop reached its last frame, rewinding");
                self.cursor = 0;
            }
        }

        self.cursor
    }
}

/// The looping image sequence behind the board.
pub struct Backdrop {
    frames: Vec<Image>,
    reel: Reel,
}

impl Backdrop {
    /// Decode every frame under `dir` up front, in file name order.
    pub fn open(ctx: &mut Context, dir: impl AsRef<Path>) -> Result<Self, BackdropError> {
        let dir = dir.as_ref();

        if !ctx.fs.is_dir(dir) {
            return Err(BackdropError::Missing {
                path: dir.to_path_buf(),
            });
        }

        let mut paths: Vec<PathBuf> = ctx.fs.read_dir(dir)?.filter(|p| is_frame(p)).collect();
        paths.sort();

        if paths.is_empty() {
            return Err(BackdropError::Empty {
                path: dir.to_path_buf(),
            });
        }

        let frames = paths
            .iter()
            .map(|path| Image::from_path(ctx, path))
            .collect::<Result<Vec<_>, _>>()?;

        info!("loaded {} backdrop frames from {}", frames.len(), dir.display());

        Ok(Self {
            reel: Reel::new(frames.len(), BACKDROP_FPS),
            frames,
        })
    }

    pub fn update(&mut self, delta: Duration) {
        self.reel.advance(delta);
    }

    /// Stretch the current frame over the whole window
    pub fn draw(&self, canvas: &mut Canvas) {
        let Some(frame) = self.frames.get(self.reel.cursor()) else {
            return;
        };

        let scale = glam::Vec2::new(
            SCREEN_WIDTH / frame.width() as f32,
            SCREEN_HEIGHT / frame.height() as f32,
        );

        canvas.draw(frame, DrawParam::default().scale(scale));
    }
}

#[inline]
fn is_frame(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| FRAME_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
}
