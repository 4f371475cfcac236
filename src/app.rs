//! Windowing-free application core
//!
//! Owns the canvas and translates input events into tool changes and drawing
//! calls. The window layer only feeds events in and presents the frame
//! returned by [`App::render`].

use log::{error, info};

use crate::config::Config;
use crate::math::Vec2;
use crate::particles::ParticleSystem;
use crate::raster::{Color, Image};
use crate::tool::{Style, Tool, ToolState};
use crate::toolbar::{ButtonAction, Toolbar};
use crate::util::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Digit(u8),
    Fill,
    Plus,
    Minus,
    Clear,
    Save,
    Load,
    Escape,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButtonKind {
    Left,
    Right,
    Middle,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyDown(Key),
    MouseMove {
        x: i32,
        y: i32,
    },
    MouseDown {
        x: i32,
        y: i32,
        button: MouseButtonKind,
    },
    MouseUp {
        x: i32,
        y: i32,
        button: MouseButtonKind,
    },
    Wheel {
        dy: f32,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub struct App {
    config: Config,
    canvas: Image,
    frame: Image,
    toolbar: Toolbar,
    tools: ToolState,
    particles: ParticleSystem,
    rng: Rng,
}

impl App {
    pub fn new(config: Config, toolbar: Toolbar, rng: Rng) -> Self {
        let canvas = Image::new(config.width, config.height);
        let frame = canvas.clone();
        let tools = ToolState::new(Style::new(config.initial_color, config.border_width));
        let particles = ParticleSystem::new(config.particle_count);
        Self {
            config,
            canvas,
            frame,
            toolbar,
            tools,
            particles,
            rng,
        }
    }

    pub fn canvas(&self) -> &Image {
        &self.canvas
    }

    pub fn tools(&self) -> &ToolState {
        &self.tools
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn handle_event(&mut self, event: &InputEvent) -> Control {
        match *event {
            InputEvent::Quit | InputEvent::KeyDown(Key::Escape) => return Control::Quit,
            InputEvent::KeyDown(key) => self.on_key(key),
            InputEvent::MouseDown {
                x,
                y,
                button: MouseButtonKind::Left,
            } => self.on_left_click(Vec2::new(x as f32, y as f32)),
            InputEvent::MouseDown {
                button: MouseButtonKind::Right,
                ..
            } => {
                // Cancel the drag in progress, keep the tool
                let tool = self.tools.tool();
                self.tools.select(tool);
            },
            InputEvent::MouseMove { x, y } => {
                let pos = Vec2::new(x as f32, y as f32);
                self.tools
                    .drag_to(pos, &mut self.canvas, self.config.erase_radius);
            },
            InputEvent::MouseUp {
                x,
                y,
                button: MouseButtonKind::Left,
            } => self.tools.release(Vec2::new(x as f32, y as f32), &mut self.canvas),
            InputEvent::Wheel { dy } => {
                if dy > 0.0 {
                    self.tools.style_mut().grow_border();
                } else if dy < 0.0 {
                    self.tools.style_mut().shrink_border();
                }
            },
            _ => {},
        }
        Control::Continue
    }

    fn on_key(&mut self, key: Key) {
        match key {
            Key::Digit(d) => {
                if let Some(tool) = Tool::from_digit(d) {
                    self.select_tool(tool);
                }
            },
            Key::Fill => self.tools.style_mut().toggle_fill(),
            Key::Plus => self.tools.style_mut().grow_border(),
            Key::Minus => self.tools.style_mut().shrink_border(),
            Key::Clear => self.clear(),
            Key::Save => self.save(),
            Key::Load => self.load_image(),
            Key::Escape => {},
        }
    }

    fn on_left_click(&mut self, pos: Vec2) {
        let Some(action) = self.toolbar.hit(pos) else {
            self.tools
                .press(pos, &mut self.canvas, self.config.erase_radius);
            return;
        };

        match action {
            ButtonAction::Select(tool) => self.select_tool(tool),
            ButtonAction::SetColor(color) => self.tools.style_mut().color = color,
            ButtonAction::ToggleFill => self.tools.style_mut().toggle_fill(),
            ButtonAction::Clear => self.clear(),
            ButtonAction::Save => self.save(),
            ButtonAction::LoadImage => self.load_image(),
        }
    }

    fn select_tool(&mut self, tool: Tool) {
        self.tools.select(tool);
        if tool == Tool::ParticleDemo {
            self.particles
                .init(self.canvas.width(), self.canvas.height(), &mut self.rng);
        }
        info!("Tool: {}", tool.name());
    }

    fn clear(&mut self) {
        self.canvas.fill(Color::BLACK);
    }

    fn save(&self) {
        match self.canvas.save_tga(&self.config.output_path) {
            Ok(()) => info!("Image saved successfully!"),
            Err(e) => error!("Failed to save {}: {}", self.config.output_path.display(), e),
        }
    }

    fn load_image(&mut self) {
        match Image::load_png(&self.config.image_path, false) {
            Ok(img) => {
                self.canvas.draw_image(&img, 0, 0, false);
                info!("Image loaded and drawn: {}", self.config.image_path.display());
            },
            Err(e) => error!(
                "Error loading the image {}: {}",
                self.config.image_path.display(),
                e
            ),
        }
    }

    /// Advance time-dependent state by `dt` seconds
    pub fn update(&mut self, dt: f32) {
        if self.tools.tool() == Tool::ParticleDemo {
            self.particles.update(dt);
        }
    }

    /// Compose canvas, drag preview, particles and toolbar into the frame
    pub fn render(&mut self) -> &Image {
        self.frame.copy_from(&self.canvas);
        self.tools.preview(&mut self.frame);
        if self.tools.tool() == Tool::ParticleDemo {
            self.particles.render(&mut self.frame);
        }
        self.toolbar.render(&mut self.frame, self.tools.tool());
        &self.frame
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;
    use crate::toolbar::Button;

    fn app_in(dir: &Path) -> App {
        let config = Config {
            width: 120,
            height: 80,
            output_path: dir.join("out.tga"),
            image_path: dir.join("picture.png"),
            icon_dir: dir.to_path_buf(),
            particle_count: 50,
            ..Config::default()
        };
        let toolbar = Toolbar::new(vec![
            Button::new(Image::new(8, 8), 0, 0, ButtonAction::SetColor(Color::GREEN)),
            Button::new(Image::new(8, 8), 10, 0, ButtonAction::Select(Tool::DrawingCircle)),
        ]);
        App::new(config, toolbar, Rng::new(77))
    }

    fn click(app: &mut App, x: i32, y: i32) {
        app.handle_event(&InputEvent::MouseDown {
            x,
            y,
            button: MouseButtonKind::Left,
        });
        app.handle_event(&InputEvent::MouseUp {
            x,
            y,
            button: MouseButtonKind::Left,
        });
    }

    fn drag(app: &mut App, from: (i32, i32), to: (i32, i32)) {
        app.handle_event(&InputEvent::MouseDown {
            x: from.0,
            y: from.1,
            button: MouseButtonKind::Left,
        });
        app.handle_event(&InputEvent::MouseMove { x: to.0, y: to.1 });
        app.handle_event(&InputEvent::MouseUp {
            x: to.0,
            y: to.1,
            button: MouseButtonKind::Left,
        });
    }

    #[test]
    fn test_quit_events() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        assert_eq!(app.handle_event(&InputEvent::Quit), Control::Quit);
        assert_eq!(app.handle_event(&InputEvent::KeyDown(Key::Escape)), Control::Quit);
        assert_eq!(app.handle_event(&InputEvent::KeyDown(Key::Fill)), Control::Continue);
    }

    #[test]
    fn test_line_drag_draws_on_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.handle_event(&InputEvent::KeyDown(Key::Digit(1)));
        assert_eq!(app.tools().tool(), Tool::DrawingLine);

        drag(&mut app, (20, 40), (60, 40));
        assert_eq!(app.canvas().get_pixel(40, 40), Color::RED);
    }

    #[test]
    fn test_toolbar_click_sets_color_without_drawing() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.handle_event(&InputEvent::KeyDown(Key::Digit(1)));
        click(&mut app, 4, 4);
        assert_eq!(app.tools().style().color, Color::GREEN);
        assert!(app.canvas().pixels().iter().all(|c| *c == Color::BLACK));

        click(&mut app, 12, 4);
        assert_eq!(app.tools().tool(), Tool::DrawingCircle);
    }

    #[test]
    fn test_style_keys_and_wheel() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        assert_eq!(app.tools().style().border_width, 2);
        app.handle_event(&InputEvent::KeyDown(Key::Plus));
        app.handle_event(&InputEvent::Wheel { dy: 1.0 });
        assert_eq!(app.tools().style().border_width, 4);
        app.handle_event(&InputEvent::Wheel { dy: -2.5 });
        app.handle_event(&InputEvent::KeyDown(Key::Minus));
        assert_eq!(app.tools().style().border_width, 2);

        app.handle_event(&InputEvent::KeyDown(Key::Fill));
        assert!(app.tools().style().filled);
    }

    #[test]
    fn test_save_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.handle_event(&InputEvent::KeyDown(Key::Digit(2)));
        app.handle_event(&InputEvent::KeyDown(Key::Fill));
        drag(&mut app, (30, 30), (50, 45));
        assert_eq!(app.canvas().get_pixel(40, 40), Color::RED);

        app.handle_event(&InputEvent::KeyDown(Key::Save));
        let saved = Image::load_tga(dir.path().join("out.tga"), false).unwrap();
        assert_eq!(&saved, app.canvas());

        app.handle_event(&InputEvent::KeyDown(Key::Clear));
        assert!(app.canvas().pixels().iter().all(|c| *c == Color::BLACK));
    }

    #[test]
    fn test_load_image_draws_at_origin() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbImage::from_pixel(4, 3, image::Rgb([0, 0, 255]))
            .save(dir.path().join("picture.png"))
            .unwrap();
        let mut app = app_in(dir.path());
        app.handle_event(&InputEvent::KeyDown(Key::Load));
        assert_eq!(app.canvas().get_pixel(3, 2), Color::BLUE);
        assert_eq!(app.canvas().get_pixel(4, 2), Color::BLACK);
    }

    #[test]
    fn test_missing_image_leaves_canvas() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.handle_event(&InputEvent::KeyDown(Key::Load));
        assert!(app.canvas().pixels().iter().all(|c| *c == Color::BLACK));
    }

    #[test]
    fn test_particle_demo_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.handle_event(&InputEvent::KeyDown(Key::Digit(6)));
        assert_eq!(app.particles().active_count(), 50);

        let frame = app.render();
        assert!(frame.pixels().iter().any(|c| *c == Color::WHITE));
        assert!(app.canvas().pixels().iter().all(|c| *c == Color::BLACK));

        app.update(7.0);
        assert_eq!(app.particles().active_count(), 0);
    }

    #[test]
    fn test_render_shows_preview_and_toolbar() {
        let dir = tempfile::tempdir().unwrap();
        let mut app = app_in(dir.path());
        app.handle_event(&InputEvent::KeyDown(Key::Digit(1)));
        app.handle_event(&InputEvent::MouseDown {
            x: 20,
            y: 50,
            button: MouseButtonKind::Left,
        });
        app.handle_event(&InputEvent::MouseMove { x: 80, y: 50 });

        let frame = app.render().clone();
        assert_eq!(frame.get_pixel(50, 50), Color::RED);
        assert_eq!(app.canvas().get_pixel(50, 50), Color::BLACK);

        // Right click abandons the drag
        app.handle_event(&InputEvent::MouseDown {
            x: 0,
            y: 0,
            button: MouseButtonKind::Right,
        });
        app.handle_event(&InputEvent::MouseUp {
            x: 80,
            y: 50,
            button: MouseButtonKind::Left,
        });
        assert_eq!(app.canvas().get_pixel(50, 50), Color::BLACK);
    }
}
