use crate::error::Result;
use std::path::{Path, PathBuf};

/// Keys the experiment cares about. The host maps its own keyboard events
/// onto these before the core ever sees them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    Return,
    Escape,
    Digit(u8),
    Left,
    Right,
}

/// Placement and size for drawn text, in normalized window coordinates
/// (x and y in -1..1, y up, origin at the window center). `height` is a
/// fraction of the window height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextStyle {
    pub pos: (f32, f32),
    pub height: f32,
}

impl TextStyle {
    pub fn centered(height: f32) -> Self {
        Self {
            pos: (0.0, 0.0),
            height,
        }
    }

    pub fn at(pos: (f32, f32), height: f32) -> Self {
        Self { pos, height }
    }
}

/// The rendering and input surface the core runs against. One `flip` call
/// blocks until the next frame boundary; it is the only suspension point
/// in the whole system.
pub trait PresentationHost {
    fn draw_image(&mut self, asset: &Path) -> Result<()>;
    fn draw_text(&mut self, content: &str, style: TextStyle) -> Result<()>;
    fn flip(&mut self) -> Result<()>;
    /// Non-blocking; reports which of `keys` were pressed since the last
    /// poll. Key events do not persist across frames.
    fn poll_keys(&mut self, keys: &[Key]) -> Vec<Key>;
    /// Discards all pending input events.
    fn clear_events(&mut self);
}

/// Existence checks for stimulus files, separated out so trial validation
/// can run without touching the display.
pub trait AssetStore {
    fn exists(&self, path: &Path) -> bool;
}

/// Filesystem-backed asset store rooted at the directory of the condition
/// table the assets were referenced from.
#[derive(Debug, Clone)]
pub struct FsAssets {
    base: PathBuf,
}

impl FsAssets {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn resolve(&self, rel: &str) -> PathBuf {
        self.base.join(rel)
    }
}

impl AssetStore for FsAssets {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}
