use macroquad::prelude::*;

use crate::application::{AppState, OrbitCamera};
use crate::ui::{BUTTON_GENERATE, BUTTON_RANDOMIZE, Button, viewport_width};

/// Handle zoom with the mouse wheel
pub fn handle_zoom(camera: &mut OrbitCamera) {
    let wheel = mouse_wheel().1;
    if wheel > 0.0 {
        camera.zoom_in(1.1);
    } else if wheel < 0.0 {
        camera.zoom_out(1.1);
    }
}

/// Handle orbiting with left-button drag over the viewport.
/// Drags starting on the panel are ignored so UI clicks never spin the
/// camera.
pub fn handle_orbit(camera: &mut OrbitCamera, mouse_pos: (f32, f32)) {
    let over_viewport = mouse_pos.0 < viewport_width();

    if is_mouse_button_pressed(MouseButton::Left) {
        if over_viewport {
            camera.drag_to(mouse_pos);
        }
    } else if is_mouse_button_down(MouseButton::Left) {
        if camera.is_dragging() {
            let (dx, dy) = camera.drag_to(mouse_pos);
            camera.orbit(dx, dy);
        }
    } else {
        camera.end_drag();
    }
}

/// Process keyboard shortcuts
pub fn process_keyboard_input(state: &mut AppState, camera: &mut OrbitCamera) {
    if is_key_pressed(KeyCode::G) && !state.is_generating() {
        state.regenerate();
    }
    if is_key_pressed(KeyCode::R) {
        state.randomize_genes();
    }
    if is_key_pressed(KeyCode::H) {
        camera.reset();
    }
}

/// Process button clicks
pub fn process_button_clicks(state: &mut AppState, buttons: &[Button], mouse_pos: (f32, f32)) {
    for (idx, btn) in buttons.iter().enumerate() {
        if !btn.is_clicked(mouse_pos) {
            continue;
        }
        match idx {
            BUTTON_GENERATE => state.regenerate(),
            BUTTON_RANDOMIZE => state.randomize_genes(),
            _ => {}
        }
    }
}
