mod button;
mod dropdown;

pub use button::Button;
pub use dropdown::Dropdown;

// UI constants - functions for responsive layout
use macroquad::prelude::{screen_height, screen_width};

pub const PANEL_WIDTH: f32 = 220.0;
pub const BUTTON_HEIGHT: f32 = 40.0;

/// Get the X position where the panel starts (right side)
pub fn panel_x() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the width of the 3D viewport area
pub fn viewport_width() -> f32 {
    screen_width() - PANEL_WIDTH
}

/// Get the height of the 3D viewport area
pub fn viewport_height() -> f32 {
    screen_height()
}

/// Create the panel buttons. The generate button is disabled while a
/// generation is already in flight.
pub fn create_buttons(generating: bool) -> Vec<Button> {
    let px = panel_x() + 10.0;
    let width = PANEL_WIDTH - 20.0;
    vec![
        Button::new(px, 80.0, width, BUTTON_HEIGHT, if generating { "Generating..." } else { "Generate" })
            .enabled(!generating),
        Button::new(px, 130.0, width, BUTTON_HEIGHT, "Randomize Genes"),
    ]
}

/// Button indices as dispatched by the input layer
pub const BUTTON_GENERATE: usize = 0;
pub const BUTTON_RANDOMIZE: usize = 1;
