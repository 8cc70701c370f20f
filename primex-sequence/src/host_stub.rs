use primex_core::{Key, PresentationHost, Result, TextStyle};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Image(PathBuf),
    Text(String),
}

/// Scripted in-memory host: records every draw, flip, poll and clear, and
/// reports keys at the flip indices the test scheduled them for.
#[derive(Debug, Default)]
pub struct StubHost {
    pub draws: Vec<DrawCall>,
    pub flips: u64,
    pub polls: u64,
    pub clears: u32,
    pub draws_before_first_flip: usize,
    scripted: HashMap<u64, Vec<Key>>,
    /// Keys reported on every poll, regardless of flip index.
    pub always_pressed: Vec<Key>,
}

impl StubHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `key` to be observed by the poll that follows flip
    /// number `flip` (1-based).
    pub fn press_at_flip(&mut self, flip: u64, key: Key) {
        self.scripted.entry(flip).or_default().push(key);
    }
}

impl PresentationHost for StubHost {
    fn draw_image(&mut self, asset: &Path) -> Result<()> {
        if self.flips == 0 {
            self.draws_before_first_flip += 1;
        }
        self.draws.push(DrawCall::Image(asset.to_path_buf()));
        Ok(())
    }

    fn draw_text(&mut self, content: &str, _style: TextStyle) -> Result<()> {
        if self.flips == 0 {
            self.draws_before_first_flip += 1;
        }
        self.draws.push(DrawCall::Text(content.to_string()));
        Ok(())
    }

    fn flip(&mut self) -> Result<()> {
        self.flips += 1;
        Ok(())
    }

    fn poll_keys(&mut self, keys: &[Key]) -> Vec<Key> {
        self.polls += 1;
        let mut pressed: Vec<Key> = self
            .scripted
            .get(&self.flips)
            .map(|scheduled| {
                scheduled
                    .iter()
                    .copied()
                    .filter(|key| keys.contains(key))
                    .collect()
            })
            .unwrap_or_default();
        pressed.extend(
            self.always_pressed
                .iter()
                .copied()
                .filter(|key| keys.contains(key)),
        );
        pressed
    }

    fn clear_events(&mut self) {
        self.clears += 1;
        self.scripted.clear();
    }
}
