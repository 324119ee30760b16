use std::sync::Arc;

use macroquad::prelude::*;

use biograph::{
    AppState, MockProducer, OrbitCamera,
    domain::GENE_PRESETS,
    input, rendering,
    rendering::CreatureRenderer,
    ui::{self, Dropdown, PANEL_WIDTH},
};

fn window_conf() -> Conf {
    Conf {
        window_title: "BioGraph - Procedural Creature Synthesizer".to_owned(),
        window_width: 1000,
        window_height: 800,
        window_resizable: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let mut state = AppState::new(Arc::new(MockProducer));
    let mut camera = OrbitCamera::new();
    let mut renderer = CreatureRenderer::new();

    // Start with a random creature on screen
    state.randomize_genes();
    state.regenerate();

    let preset_items: Vec<String> = GENE_PRESETS.iter().map(|(name, _)| name.to_string()).collect();
    let mut preset_dropdown = Dropdown::new(
        ui::panel_x() + 10.0,
        25.0,
        PANEL_WIDTH - 20.0,
        "Preset",
        preset_items,
    );

    loop {
        let mouse_pos = mouse_position();

        // Update UI positions for responsiveness
        preset_dropdown.set_position(ui::panel_x() + 10.0, 25.0);
        let buttons = ui::create_buttons(state.is_generating());

        if preset_dropdown.update(mouse_pos) {
            let (_, genes) = GENE_PRESETS[preset_dropdown.selected()];
            state.set_genes(genes.iter().map(|s| s.to_string()).collect());
            state.regenerate();
        }

        input::process_button_clicks(&mut state, &buttons, mouse_pos);
        if !preset_dropdown.is_open() {
            input::handle_orbit(&mut camera, mouse_pos);
        }
        input::handle_zoom(&mut camera);
        input::process_keyboard_input(&mut state, &mut camera);

        // Publish a finished generation, if any
        state.poll();

        // Render (with timing)
        let render_start = std::time::Instant::now();
        clear_background(BLACK);

        let scene = Arc::clone(&state.scene);
        renderer.render(&scene, &camera);
        renderer.draw();

        rendering::draw_controls(
            &state,
            &camera,
            &buttons,
            std::slice::from_ref(&preset_dropdown),
            mouse_pos,
        );
        state.last_render_time_ms = render_start.elapsed().as_secs_f32() * 1000.0;

        next_frame().await;
    }
}
