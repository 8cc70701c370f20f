use crate::error::Result;
use crate::host::{PresentationHost, TextStyle};
use std::path::PathBuf;

/// The role a stimulus plays inside one masked-priming presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseKind {
    ForwardMask,
    Prime,
    BackwardMask,
    Neutral,
}

/// What a phase or prompt puts on screen.
#[derive(Debug, Clone, PartialEq)]
pub enum Visual {
    Image(PathBuf),
    Text { content: String, height: f32 },
}

impl Visual {
    pub fn draw(&self, host: &mut dyn PresentationHost) -> Result<()> {
        match self {
            Visual::Image(path) => host.draw_image(path),
            Visual::Text { content, height } => {
                host.draw_text(content, TextStyle::centered(*height))
            }
        }
    }
}

/// One step of a trial's presentation script: a visual shown for exactly
/// `frames` host flips. An interruptible phase ends the moment the
/// designated key is observed; all others ignore input entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseSpec {
    pub kind: PhaseKind,
    pub visual: Visual,
    pub frames: u32,
    pub interruptible: bool,
}

impl PhaseSpec {
    pub fn timed(kind: PhaseKind, visual: Visual, frames: u32) -> Self {
        Self {
            kind,
            visual,
            frames,
            interruptible: false,
        }
    }

    pub fn interruptible(kind: PhaseKind, visual: Visual, frames: u32) -> Self {
        Self {
            kind,
            visual,
            frames,
            interruptible: true,
        }
    }
}
