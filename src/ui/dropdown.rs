use macroquad::prelude::*;

const ITEM_HEIGHT: f32 = 30.0;
const FONT_SIZE: f32 = 16.0;

/// Dropdown selector UI component
#[derive(Clone)]
pub struct Dropdown {
    x: f32,
    y: f32,
    width: f32,
    items: Vec<String>,
    selected: usize,
    is_open: bool,
    label: String,
}

impl Dropdown {
    pub fn new(x: f32, y: f32, width: f32, label: impl Into<String>, items: Vec<String>) -> Self {
        Self {
            x,
            y,
            width,
            items,
            selected: 0,
            is_open: false,
            label: label.into(),
        }
    }

    /// Get currently selected index
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Set selected index
    pub fn set_selected(&mut self, index: usize) {
        if index < self.items.len() {
            self.selected = index;
        }
    }

    /// Check if dropdown is open
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Close the dropdown
    pub fn close(&mut self) {
        self.is_open = false;
    }

    /// Update position for responsive layout
    pub fn set_position(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    /// Truncate text with an ellipsis so it fits in `max_width`
    fn fit_text(text: &str, max_width: f32) -> String {
        if measure_text(text, None, FONT_SIZE as u16, 1.0).width <= max_width {
            return text.to_string();
        }
        let mut truncated = text.to_string();
        while !truncated.is_empty()
            && measure_text(&format!("{truncated}..."), None, FONT_SIZE as u16, 1.0).width > max_width
        {
            truncated.pop();
        }
        format!("{truncated}...")
    }

    /// Draw dropdown without handling interaction (for rendering only)
    pub fn draw(&self, mouse_pos: (f32, f32)) {
        draw_text(&self.label, self.x, self.y - 5.0, 14.0, GRAY);

        let button_color = if self.is_hovered_main(mouse_pos) {
            Color::from_rgba(100, 149, 237, 255)
        } else {
            Color::from_rgba(70, 130, 180, 255)
        };
        draw_rectangle(self.x, self.y, self.width, ITEM_HEIGHT, button_color);
        draw_rectangle_lines(self.x, self.y, self.width, ITEM_HEIGHT, 2.0, WHITE);

        let display = Self::fit_text(&self.items[self.selected], self.width - 30.0);
        draw_text(&display, self.x + 5.0, self.y + 21.0, FONT_SIZE, WHITE);
        draw_text("v", self.x + self.width - 16.0, self.y + 21.0, 14.0, WHITE);

        if self.is_open {
            let menu_height = self.items.len() as f32 * ITEM_HEIGHT;
            draw_rectangle(
                self.x,
                self.y + ITEM_HEIGHT,
                self.width,
                menu_height,
                Color::from_rgba(30, 30, 30, 255),
            );

            for (i, item) in self.items.iter().enumerate() {
                let item_y = self.y + ITEM_HEIGHT + (i as f32 * ITEM_HEIGHT);
                let item_color = if self.is_hovered_item(mouse_pos, i) {
                    Color::from_rgba(100, 149, 237, 255)
                } else if i == self.selected {
                    Color::from_rgba(50, 100, 150, 255)
                } else {
                    Color::from_rgba(45, 45, 45, 255)
                };
                draw_rectangle(self.x, item_y, self.width, ITEM_HEIGHT, item_color);
                draw_rectangle_lines(
                    self.x,
                    item_y,
                    self.width,
                    ITEM_HEIGHT,
                    1.0,
                    Color::from_rgba(80, 80, 80, 255),
                );

                let display = Self::fit_text(item, self.width - 10.0);
                draw_text(&display, self.x + 5.0, item_y + 21.0, FONT_SIZE, WHITE);
            }

            draw_rectangle_lines(self.x, self.y + ITEM_HEIGHT, self.width, menu_height, 2.0, WHITE);
        }
    }

    /// Handle interaction and return true if selection changed
    pub fn update(&mut self, mouse_pos: (f32, f32)) -> bool {
        if self.is_hovered_main(mouse_pos) && is_mouse_button_pressed(MouseButton::Left) {
            self.is_open = !self.is_open;
            return false;
        }

        if self.is_open {
            for i in 0..self.items.len() {
                if self.is_hovered_item(mouse_pos, i) && is_mouse_button_pressed(MouseButton::Left) {
                    let changed = self.selected != i;
                    self.selected = i;
                    self.is_open = false;
                    return changed;
                }
            }
            if is_mouse_button_pressed(MouseButton::Left) && !self.is_hovered_any(mouse_pos) {
                self.is_open = false;
            }
        }

        false
    }

    fn is_hovered_main(&self, mouse_pos: (f32, f32)) -> bool {
        mouse_pos.0 >= self.x
            && mouse_pos.0 <= self.x + self.width
            && mouse_pos.1 >= self.y
            && mouse_pos.1 <= self.y + ITEM_HEIGHT
    }

    fn is_hovered_item(&self, mouse_pos: (f32, f32), index: usize) -> bool {
        let item_y = self.y + ITEM_HEIGHT + (index as f32 * ITEM_HEIGHT);
        mouse_pos.0 >= self.x
            && mouse_pos.0 <= self.x + self.width
            && mouse_pos.1 >= item_y
            && mouse_pos.1 <= item_y + ITEM_HEIGHT
    }

    fn is_hovered_any(&self, mouse_pos: (f32, f32)) -> bool {
        self.is_hovered_main(mouse_pos)
            || (0..self.items.len()).any(|i| self.is_hovered_item(mouse_pos, i))
    }
}
