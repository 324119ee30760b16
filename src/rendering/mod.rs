use macroquad::prelude::*;
use rayon::prelude::*;

use crate::application::{AppState, OrbitCamera};
use crate::domain::{MAX_PRIMITIVES, Primitive, SceneBuffer, blend_color, estimate_normal, sphere_trace};
use crate::ui::{Button, Dropdown, PANEL_WIDTH, panel_x, viewport_height, viewport_width};

/// Offscreen raymarch resolution; the result is upscaled to the viewport.
pub const RENDER_WIDTH: u16 = 320;
pub const RENDER_HEIGHT: u16 = 240;

const LIGHT_DIR: Vec3 = Vec3::new(0.5, 0.8, 0.5);
const AMBIENT: f32 = 0.2;
const INV_GAMMA: f32 = 1.0 / 2.2;
/// Background for missed rays (and the clear color behind the panel).
const BACKGROUND: [u8; 4] = [34, 34, 34, 255];

/// CPU raymarcher. Holds the offscreen image and its screen texture;
/// every frame the image is re-traced against the published scene
/// snapshot and blitted to the viewport.
pub struct CreatureRenderer {
    image: Image,
    texture: Texture2D,
}

impl CreatureRenderer {
    pub fn new() -> Self {
        let image = Image::gen_image_color(
            RENDER_WIDTH,
            RENDER_HEIGHT,
            Color::from_rgba(BACKGROUND[0], BACKGROUND[1], BACKGROUND[2], 255),
        );
        let texture = Texture2D::from_image(&image);
        texture.set_filter(FilterMode::Linear);
        Self { image, texture }
    }

    /// Trace the whole image. Rows are independent given the read-only
    /// primitive slice, so they go wide over the rayon pool.
    pub fn render(&mut self, scene: &SceneBuffer, camera: &OrbitCamera) {
        let width = RENDER_WIDTH as usize;
        let height = RENDER_HEIGHT as usize;
        let primitives = scene.primitives.as_slice();
        let light = LIGHT_DIR.normalize();

        self.image
            .get_image_data_mut()
            .par_chunks_mut(width)
            .enumerate()
            .for_each(|(y, row)| {
                for (x, pixel) in row.iter_mut().enumerate() {
                    *pixel = shade_pixel(x, y, width, height, primitives, camera, light);
                }
            });

        self.texture.update(&self.image);
    }

    /// Blit the traced image across the viewport area.
    pub fn draw(&self) {
        draw_texture_ex(
            &self.texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(viewport_width(), viewport_height())),
                ..Default::default()
            },
        );
    }
}

impl Default for CreatureRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Shade one pixel: camera ray, sphere trace, then normal + color blend
/// on a hit. Missed rays get the flat background color.
pub fn shade_pixel(
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    primitives: &[Primitive],
    camera: &OrbitCamera,
    light: Vec3,
) -> [u8; 4] {
    let ray = camera.ray(x as f32 + 0.5, y as f32 + 0.5, width as f32, height as f32);

    let Some(hit) = sphere_trace(&ray, primitives) else {
        return BACKGROUND;
    };

    let normal = estimate_normal(hit.point, primitives);
    let diffuse = normal.dot(light).max(0.0);
    let albedo = blend_color(hit.point, primitives);

    let lit = (albedo * (diffuse + AMBIENT)).powf(INV_GAMMA);
    let c = lit.clamp(Vec3::ZERO, Vec3::ONE) * 255.0;
    [c.x as u8, c.y as u8, c.z as u8, 255]
}

/// Draw the control panel with dropdowns, buttons, genes and stats
pub fn draw_controls(
    state: &AppState,
    camera: &OrbitCamera,
    buttons: &[Button],
    dropdowns: &[Dropdown],
    mouse_pos: (f32, f32),
) {
    let px = panel_x();
    draw_rectangle(px, 0.0, PANEL_WIDTH, screen_height(), Color::from_rgba(30, 30, 30, 255));
    let px = px + 10.0;

    buttons.iter().for_each(|btn| btn.draw(mouse_pos));

    // Active gene list
    draw_text("Genes:", px, 195.0, 16.0, WHITE);
    let mut y = 212.0;
    if state.genes.is_empty() {
        draw_text("(none - base biped)", px, y, 12.0, GRAY);
        y += 14.0;
    }
    for gene in &state.genes {
        draw_text(gene, px, y, 12.0, Color::from_rgba(150, 200, 170, 255));
        y += 14.0;
    }

    // Scene info
    y = y.max(480.0);
    draw_text(
        &format!("Primitives: {}/{}", state.scene.len(), MAX_PRIMITIVES),
        px,
        y,
        13.0,
        Color::from_rgba(150, 150, 150, 255),
    );
    y += 18.0;

    // Performance metrics, color coded
    let gen_ms = state.last_generation_time_ms;
    let render_ms = state.last_render_time_ms;
    let render_color = if render_ms < 16.0 {
        Color::from_rgba(0, 255, 0, 255)
    } else if render_ms < 50.0 {
        Color::from_rgba(255, 255, 0, 255)
    } else {
        Color::from_rgba(255, 100, 0, 255)
    };
    draw_text(&format!("Generate: {gen_ms:.1}ms"), px, y, 13.0, GRAY);
    y += 16.0;
    draw_text(&format!("Render: {render_ms:.1}ms"), px, y, 13.0, render_color);
    y += 16.0;
    draw_text(&format!("FPS: {}", get_fps()), px, y, 13.0, GRAY);
    y += 24.0;

    // Status
    let (status, status_color) = if state.is_generating() {
        ("Generating...", Color::from_rgba(255, 165, 0, 255))
    } else {
        ("Idle", Color::from_rgba(0, 255, 150, 255))
    };
    draw_text(&format!("Creature #{}", state.generation), px, y, 14.0, WHITE);
    y += 16.0;
    draw_text(status, px, y, 14.0, status_color);
    y += 24.0;

    draw_text(&format!("Zoom: {:.1}", camera.distance), px, y, 12.0, GRAY);
    y += 20.0;

    // Controls help
    let controls = [
        "Controls:",
        "LMB-drag: Orbit",
        "Wheel: Zoom",
        "G: Generate",
        "R: Random genes",
        "H: Reset camera",
    ];
    for (i, line) in controls.iter().enumerate() {
        let size = if i == 0 { 14.0 } else { 12.0 };
        let color = if i == 0 { WHITE } else { GRAY };
        draw_text(line, px, y, size, color);
        y += 14.0;
    }

    // Dropdowns last so an open menu overlays everything else
    let mut open_dropdown: Option<&Dropdown> = None;
    for dropdown in dropdowns {
        if dropdown.is_open() {
            open_dropdown = Some(dropdown);
        } else {
            dropdown.draw(mouse_pos);
        }
    }
    if let Some(dd) = open_dropdown {
        dd.draw(mouse_pos);
    }
}
