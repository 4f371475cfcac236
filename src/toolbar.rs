//! Toolbar buttons: icon images with a screen position and a click action

use std::path::Path;

use log::warn;

use crate::math::Vec2;
use crate::raster::{Color, Image};
use crate::tool::Tool;

/// Side of the placeholder drawn when an icon file can't be loaded
const PLACEHOLDER_SIZE: u32 = 32;
const TOOLBAR_Y: i32 = 10;
const HIGHLIGHT: Color = Color::WHITE;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Select(Tool),
    SetColor(Color),
    ToggleFill,
    Clear,
    Save,
    LoadImage,
}

pub struct Button {
    icon: Image,
    x: i32,
    y: i32,
    action: ButtonAction,
}

impl Button {
    pub fn new(icon: Image, x: i32, y: i32, action: ButtonAction) -> Self {
        Self { icon, x, y, action }
    }

    /// Load the icon from a PNG, falling back to a solid placeholder
    pub fn load(path: &Path, x: i32, y: i32, action: ButtonAction) -> Self {
        let icon = Image::load_png(path, false).unwrap_or_else(|e| {
            warn!("Error loading button image {}: {}", path.display(), e);
            placeholder_icon(action)
        });
        Self::new(icon, x, y, action)
    }

    #[inline]
    pub fn action(&self) -> ButtonAction {
        self.action
    }

    /// Inclusive hit test in canvas coordinates
    pub fn contains(&self, pos: Vec2) -> bool {
        let (x, y) = (self.x as f32, self.y as f32);
        pos.x >= x
            && pos.x <= x + self.icon.width() as f32
            && pos.y >= y
            && pos.y <= y + self.icon.height() as f32
    }
}

fn placeholder_icon(action: ButtonAction) -> Image {
    let mut icon = Image::new(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE);
    icon.fill(match action {
        ButtonAction::SetColor(c) => c,
        _ => Color::new(96, 96, 96),
    });
    icon.draw_rect(0, 0, PLACEHOLDER_SIZE as i32, PLACEHOLDER_SIZE as i32, Color::BLACK);
    icon
}

/// Button file stem, x position and action, in on-screen order
const LAYOUT: [(&str, i32, ButtonAction); 14] = [
    ("clear", 10, ButtonAction::Clear),
    ("save", 50, ButtonAction::Save),
    ("red", 100, ButtonAction::SetColor(Color::RED)),
    ("green", 150, ButtonAction::SetColor(Color::GREEN)),
    ("blue", 200, ButtonAction::SetColor(Color::BLUE)),
    ("cyan", 250, ButtonAction::SetColor(Color::CYAN)),
    ("pink", 300, ButtonAction::SetColor(Color::PURPLE)),
    ("eraser", 350, ButtonAction::Select(Tool::Erasing)),
    ("load", 400, ButtonAction::LoadImage),
    ("fill", 450, ButtonAction::ToggleFill),
    ("line", 500, ButtonAction::Select(Tool::DrawingLine)),
    ("circle", 550, ButtonAction::Select(Tool::DrawingCircle)),
    ("rectangle", 600, ButtonAction::Select(Tool::DrawingRect)),
    ("triangle", 650, ButtonAction::Select(Tool::DrawingTriangle)),
];

pub struct Toolbar {
    buttons: Vec<Button>,
}

impl Toolbar {
    pub fn new(buttons: Vec<Button>) -> Self {
        Self { buttons }
    }

    /// Standard layout with icons from `<icon_dir>/<name>.png`
    pub fn load(icon_dir: impl AsRef<Path>) -> Self {
        let dir = icon_dir.as_ref();
        let buttons = LAYOUT
            .iter()
            .map(|&(name, x, action)| {
                Button::load(&dir.join(format!("{name}.png")), x, TOOLBAR_Y, action)
            })
            .collect();
        Self::new(buttons)
    }

    pub fn buttons(&self) -> &[Button] {
        &self.buttons
    }

    /// Action of the first button under `pos`
    pub fn hit(&self, pos: Vec2) -> Option<ButtonAction> {
        self.buttons.iter().find(|b| b.contains(pos)).map(Button::action)
    }

    /// Blit every icon and outline the button of the active tool
    pub fn render(&self, frame: &mut Image, active: Tool) {
        for button in &self.buttons {
            frame.draw_image(&button.icon, button.x, button.y, false);
            if button.action == ButtonAction::Select(active) {
                frame.draw_rect(
                    button.x - 2,
                    button.y - 2,
                    button.icon.width() as i32 + 4,
                    button.icon.height() as i32 + 4,
                    HIGHLIGHT,
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_test_inclusive_edges() {
        let button = Button::new(Image::new(10, 8), 20, 30, ButtonAction::Clear);
        assert!(button.contains(Vec2::new(20.0, 30.0)));
        assert!(button.contains(Vec2::new(30.0, 38.0)));
        assert!(!button.contains(Vec2::new(19.9, 30.0)));
        assert!(!button.contains(Vec2::new(25.0, 38.5)));
    }

    #[test]
    fn test_missing_icons_use_placeholders() {
        let dir = tempfile::tempdir().unwrap();
        let toolbar = Toolbar::load(dir.path());
        assert_eq!(toolbar.buttons().len(), LAYOUT.len());
        assert_eq!(
            toolbar.hit(Vec2::new(105.0, 15.0)),
            Some(ButtonAction::SetColor(Color::RED))
        );
        assert_eq!(
            toolbar.hit(Vec2::new(660.0, 20.0)),
            Some(ButtonAction::Select(Tool::DrawingTriangle))
        );
        assert_eq!(toolbar.hit(Vec2::new(400.0, 300.0)), None);
    }

    #[test]
    fn test_loads_icon_png() {
        let dir = tempfile::tempdir().unwrap();
        image::RgbImage::from_pixel(12, 12, image::Rgb([1, 2, 3]))
            .save(dir.path().join("save.png"))
            .unwrap();
        let toolbar = Toolbar::load(dir.path());
        let save = &toolbar.buttons()[1];
        assert_eq!(save.action(), ButtonAction::Save);
        assert_eq!(save.icon.width(), 12);
        assert!(save.contains(Vec2::new(62.0, 22.0)));
        assert!(!save.contains(Vec2::new(63.0, 22.0)));
    }

    #[test]
    fn test_render_highlights_active_tool() {
        let toolbar = Toolbar::new(vec![Button::new(
            Image::new(4, 4),
            10,
            10,
            ButtonAction::Select(Tool::DrawingLine),
        )]);
        let mut frame = Image::new(30, 30);
        toolbar.render(&mut frame, Tool::DrawingLine);
        assert_eq!(frame.get_pixel(8, 8), HIGHLIGHT);

        let mut frame = Image::new(30, 30);
        toolbar.render(&mut frame, Tool::DrawingRect);
        assert_eq!(frame.get_pixel(8, 8), Color::BLACK);
    }
}
