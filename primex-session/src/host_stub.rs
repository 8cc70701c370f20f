use primex_core::{Key, PresentationHost, Result, TextStyle};
use std::path::{Path, PathBuf};

/// In-memory host for session tests: counts flips and draws, and answers
/// every rating prompt instantly with a fixed digit plus the accept key.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    pub flips: u64,
    pub images: Vec<PathBuf>,
    pub texts: Vec<String>,
    pub clears: u32,
    answer: Option<u8>,
}

impl ScriptedHost {
    pub fn answering(digit: u8) -> Self {
        Self {
            answer: Some(digit),
            ..Self::default()
        }
    }
}

impl PresentationHost for ScriptedHost {
    fn draw_image(&mut self, asset: &Path) -> Result<()> {
        self.images.push(asset.to_path_buf());
        Ok(())
    }

    fn draw_text(&mut self, content: &str, _style: TextStyle) -> Result<()> {
        self.texts.push(content.to_string());
        Ok(())
    }

    fn flip(&mut self) -> Result<()> {
        self.flips += 1;
        Ok(())
    }

    fn poll_keys(&mut self, keys: &[Key]) -> Vec<Key> {
        let mut pressed = Vec::new();
        if let Some(digit) = self.answer {
            if keys.contains(&Key::Digit(digit)) {
                pressed.push(Key::Digit(digit));
            }
        }
        if keys.contains(&Key::Space) {
            pressed.push(Key::Space);
        }
        pressed
    }

    fn clear_events(&mut self) {
        self.clears += 1;
    }
}
