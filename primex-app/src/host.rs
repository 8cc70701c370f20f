use ab_glyph::{point, Font, FontVec, Glyph, PxScale, ScaleFont};
use anyhow::{anyhow, Context, Result};
use pixels::{Pixels, SurfaceTexture};
use primex_core::{Error as CoreError, Key, PresentationHost, Result as CoreResult, TextStyle};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tiny_skia::{Color, IntSize, Pixmap, PixmapPaint, Transform};
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::EventLoopExtPumpEvents;
use winit::window::{Fullscreen, Window, WindowId};

/// Fullscreen winit + pixels presentation host. Draw calls paint into a
/// CPU-side pixmap; `flip` pushes the pixmap to the GPU surface and
/// blocks on the swapchain, which is what makes one flip one frame.
pub struct WinitHost {
    event_loop: EventLoop<()>,
    surface: Surface,
    canvas: Pixmap,
    font: FontVec,
    images: HashMap<PathBuf, Pixmap>,
    clock: FrameClock,
}

impl WinitHost {
    pub fn new(font_path: &Path) -> Result<Self> {
        let font_data = std::fs::read(font_path)
            .with_context(|| format!("cannot read font {}", font_path.display()))?;
        let font = FontVec::try_from_vec(font_data)
            .map_err(|_| anyhow!("invalid font file {}", font_path.display()))?;

        let mut event_loop = EventLoop::new()?;
        let mut surface = Surface::default();

        // The first pumps deliver `resumed`, which creates the window and
        // the pixel buffer.
        for _ in 0..100 {
            event_loop.pump_app_events(Some(Duration::from_millis(10)), &mut surface);
            if surface.pixels.is_some() {
                break;
            }
        }
        if surface.pixels.is_none() {
            return Err(anyhow!("window surface did not come up"));
        }

        let (width, height) = surface.size;
        let canvas =
            Pixmap::new(width, height).ok_or_else(|| anyhow!("cannot allocate canvas"))?;

        Ok(Self {
            event_loop,
            surface,
            canvas,
            font,
            images: HashMap::new(),
            clock: FrameClock::new(),
        })
    }

    pub fn report_frame_stats(&self) {
        if let Some(stats) = self.clock.stats() {
            println!(
                "Frame timing: {:.3} ms/frame, {:.1} Hz, jitter {:.3} ms",
                stats.average_frame_ms, stats.effective_fps, stats.jitter_ms,
            );
        }
    }

    fn pump(&mut self, timeout: Duration) {
        let _ = self
            .event_loop
            .pump_app_events(Some(timeout), &mut self.surface);
    }

    fn cached_image(&mut self, asset: &Path) -> CoreResult<&Pixmap> {
        if !self.images.contains_key(asset) {
            let pixmap = load_pixmap(asset)?;
            self.images.insert(asset.to_path_buf(), pixmap);
        }
        Ok(self.images.get(asset).expect("inserted above"))
    }

    fn rasterize_line(&mut self, line: &str, px: f32, center_x: f32, baseline: f32) {
        let font = &self.font;
        let scale = PxScale::from(px);
        let scaled = font.as_scaled(scale);

        let mut glyphs: Vec<Glyph> = Vec::new();
        let mut pen = 0.0f32;
        let mut previous = None;
        for ch in line.chars() {
            let id = font.glyph_id(ch);
            if let Some(prev) = previous {
                pen += scaled.kern(prev, id);
            }
            glyphs.push(Glyph {
                id,
                scale,
                position: point(pen, 0.0),
            });
            pen += scaled.h_advance(id);
            previous = Some(id);
        }

        let origin_x = center_x - pen / 2.0;
        let width = self.canvas.width() as i32;
        let height = self.canvas.height() as i32;
        let data = self.canvas.data_mut();

        for glyph in glyphs {
            let positioned = Glyph {
                id: glyph.id,
                scale,
                position: point(origin_x + glyph.position.x, baseline),
            };
            if let Some(outline) = font.outline_glyph(positioned) {
                let bounds = outline.px_bounds();
                outline.draw(|gx, gy, coverage| {
                    let x = bounds.min.x as i32 + gx as i32;
                    let y = bounds.min.y as i32 + gy as i32;
                    if x < 0 || y < 0 || x >= width || y >= height {
                        return;
                    }
                    let idx = ((y * width + x) * 4) as usize;
                    let c = (coverage * 255.0) as u16;
                    for channel in 0..3 {
                        let dst = u16::from(data[idx + channel]);
                        data[idx + channel] = (dst + (255 - dst) * c / 255).min(255) as u8;
                    }
                    data[idx + 3] = 255;
                });
            }
        }
    }
}

impl PresentationHost for WinitHost {
    fn draw_image(&mut self, asset: &Path) -> CoreResult<()> {
        self.cached_image(asset)?;
        let pixmap = self.images.get(asset).expect("cached above");
        let x = (self.surface.size.0 as i32 - pixmap.width() as i32) / 2;
        let y = (self.surface.size.1 as i32 - pixmap.height() as i32) / 2;
        self.canvas.draw_pixmap(
            x,
            y,
            pixmap.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(())
    }

    fn draw_text(&mut self, content: &str, style: TextStyle) -> CoreResult<()> {
        let (width, height) = self.surface.size;
        let px = style.height * height as f32 / 2.0;
        let center_x = (1.0 + style.pos.0) * width as f32 / 2.0;
        let center_y = (1.0 - style.pos.1) * height as f32 / 2.0;

        let lines: Vec<&str> = content.split('\n').collect();
        let line_gap = px * 1.4;
        let block = line_gap * lines.len() as f32;
        for (i, line) in lines.iter().enumerate() {
            let baseline = center_y - block / 2.0 + line_gap * (i as f32 + 0.8);
            self.rasterize_line(line, px, center_x, baseline);
        }
        Ok(())
    }

    fn flip(&mut self) -> CoreResult<()> {
        self.pump(Duration::ZERO);
        if self.surface.escape {
            return Err(CoreError::Host("aborted by operator".to_string()));
        }
        if self.surface.take_resized() {
            let (width, height) = self.surface.size;
            self.canvas = Pixmap::new(width, height)
                .ok_or_else(|| CoreError::Host("cannot reallocate canvas".to_string()))?;
        }

        let pixels = self
            .surface
            .pixels
            .as_mut()
            .ok_or_else(|| CoreError::Host("no surface".to_string()))?;
        pixels.frame_mut().copy_from_slice(self.canvas.data());
        pixels
            .render()
            .map_err(|e| CoreError::Host(e.to_string()))?;

        self.canvas.fill(Color::BLACK);
        self.clock.record();
        Ok(())
    }

    fn poll_keys(&mut self, keys: &[Key]) -> Vec<Key> {
        self.pump(Duration::ZERO);
        // Unpolled keys are dropped: events do not persist across frames.
        let pressed = std::mem::take(&mut self.surface.pressed);
        pressed.into_iter().filter(|key| keys.contains(key)).collect()
    }

    fn clear_events(&mut self) {
        self.pump(Duration::ZERO);
        self.surface.pressed.clear();
    }
}

/// The winit side: window, pixel buffer, and the keys pressed since the
/// last poll.
#[derive(Default)]
struct Surface {
    window: Option<Arc<Window>>,
    pixels: Option<Pixels<'static>>,
    size: (u32, u32),
    pressed: Vec<Key>,
    escape: bool,
    resized: bool,
}

impl Surface {
    fn create_surface(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next())
            .ok_or_else(|| anyhow!("no monitor available"))?;

        let attributes = Window::default_attributes()
            .with_title("Priming Meets Dilemma")
            .with_fullscreen(Some(Fullscreen::Borderless(Some(monitor))))
            .with_resizable(false);
        let window = Arc::new(event_loop.create_window(attributes)?);

        let size = window.inner_size();
        println!("Display: {}x{}", size.width, size.height);

        let texture = SurfaceTexture::new(size.width, size.height, window.clone());
        self.pixels = Some(Pixels::new(size.width, size.height, texture)?);
        self.size = (size.width, size.height);

        window.set_cursor_visible(false);
        self.window = Some(window);
        Ok(())
    }

    fn take_resized(&mut self) -> bool {
        std::mem::take(&mut self.resized)
    }
}

impl ApplicationHandler for Surface {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.create_surface(event_loop) {
            eprintln!("Failed to create window and surface: {e}");
            event_loop.exit();
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => self.escape = true,
            // Auto-repeat is dropped: a held digit must not spill into the
            // next prompt.
            WindowEvent::KeyboardInput { event, .. }
                if event.state.is_pressed() && !event.repeat =>
            {
                if let PhysicalKey::Code(code) = event.physical_key {
                    if code == KeyCode::Escape {
                        self.escape = true;
                    }
                    if let Some(key) = map_key(code) {
                        self.pressed.push(key);
                    }
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(pixels) = &mut self.pixels {
                    if let Err(e) = pixels.resize_surface(new_size.width, new_size.height) {
                        eprintln!("Failed to resize surface: {e}");
                    }
                    if let Err(e) = pixels.resize_buffer(new_size.width, new_size.height) {
                        eprintln!("Failed to resize buffer: {e}");
                    }
                }
                self.size = (new_size.width, new_size.height);
                self.resized = true;
            }
            _ => {}
        }
    }
}

fn map_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::Space => Key::Space,
        KeyCode::Enter => Key::Return,
        KeyCode::Escape => Key::Escape,
        KeyCode::ArrowLeft => Key::Left,
        KeyCode::ArrowRight => Key::Right,
        KeyCode::Digit0 => Key::Digit(0),
        KeyCode::Digit1 => Key::Digit(1),
        KeyCode::Digit2 => Key::Digit(2),
        KeyCode::Digit3 => Key::Digit(3),
        KeyCode::Digit4 => Key::Digit(4),
        KeyCode::Digit5 => Key::Digit(5),
        KeyCode::Digit6 => Key::Digit(6),
        KeyCode::Digit7 => Key::Digit(7),
        KeyCode::Digit8 => Key::Digit(8),
        KeyCode::Digit9 => Key::Digit(9),
        _ => return None,
    })
}

fn load_pixmap(path: &Path) -> CoreResult<Pixmap> {
    let image = image::open(path)
        .map_err(|e| CoreError::Host(format!("cannot load {}: {e}", path.display())))?
        .into_rgba8();
    let (width, height) = image.dimensions();
    let mut data = image.into_raw();

    // tiny-skia pixmaps are premultiplied.
    for pixel in data.chunks_exact_mut(4) {
        let alpha = u16::from(pixel[3]);
        for channel in 0..3 {
            pixel[channel] = (u16::from(pixel[channel]) * alpha / 255) as u8;
        }
    }

    let size = IntSize::from_wh(width, height)
        .ok_or_else(|| CoreError::Host(format!("bad image size {}", path.display())))?;
    Pixmap::from_vec(data, size)
        .ok_or_else(|| CoreError::Host(format!("cannot build pixmap for {}", path.display())))
}

/// Rolling per-flip frame statistics, reported once at session end.
pub struct FrameClock {
    last: Option<Instant>,
    frame_times: Vec<Duration>,
    max_samples: usize,
}

#[derive(Debug, Clone)]
pub struct FrameStats {
    pub average_frame_ms: f64,
    pub jitter_ms: f64,
    pub effective_fps: f64,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last: None,
            frame_times: Vec::with_capacity(1000),
            max_samples: 1000,
        }
    }

    pub fn record(&mut self) {
        let now = Instant::now();
        if let Some(last) = self.last {
            self.push(now - last);
        }
        self.last = Some(now);
    }

    fn push(&mut self, duration: Duration) {
        if self.frame_times.len() >= self.max_samples {
            self.frame_times.remove(0);
        }
        self.frame_times.push(duration);
    }

    pub fn stats(&self) -> Option<FrameStats> {
        if self.frame_times.is_empty() {
            return None;
        }
        let times: Vec<f64> = self
            .frame_times
            .iter()
            .map(|d| d.as_secs_f64() * 1e3)
            .collect();
        let avg = times.iter().sum::<f64>() / times.len() as f64;
        let var = times.iter().map(|t| (t - avg).powi(2)).sum::<f64>() / times.len() as f64;
        Some(FrameStats {
            average_frame_ms: avg,
            jitter_ms: var.sqrt(),
            effective_fps: if avg > 0.0 { 1e3 / avg } else { 0.0 },
        })
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}
