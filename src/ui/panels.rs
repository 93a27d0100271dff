use egui::{Context, RichText};

use gasket_core::{ControlEvent, Limits, RunProgress, TextureId};

use crate::ui::state::UiState;

/// Read-only facts the panel displays
pub struct PanelInfo {
    /// Controls accept input (no run active)
    pub enabled: bool,
    pub limits: Limits,
    pub progress: Option<RunProgress>,
    pub triangle_count: usize,
    pub show_status: bool,
}

fn texture_label(texture: TextureId) -> &'static str {
    match texture {
        TextureId::First => "Texture 1 (checkerboard)",
        TextureId::Second => "Texture 2 (stripes)",
        TextureId::Third => "Texture 3 (rings)",
    }
}

/// Draw the control panel and return the edits the user made this frame
pub fn draw_side_panel(ctx: &Context, state: &mut UiState, info: &PanelInfo) -> Vec<ControlEvent> {
    let before = *state;
    let mut start = false;

    egui::SidePanel::right("control_panel")
        .min_width(220.0)
        .default_width(260.0)
        .show(ctx, |ui| {
            ui.heading("Sierpinski Gasket");
            ui.add_space(8.0);

            ui.add_enabled_ui(info.enabled, |ui| {
                ui.label(RichText::new("SUBDIVISIONS").strong());
                ui.add(egui::Slider::new(&mut state.depth, 0..=info.limits.max_depth));
                ui.add_space(8.0);

                ui.label(RichText::new("CYCLES").strong());
                ui.add(egui::Slider::new(&mut state.cycles, 0..=info.limits.max_cycles));
                ui.add_space(8.0);

                ui.label(RichText::new("TEXTURE").strong());
                for texture in TextureId::ALL {
                    ui.radio_value(&mut state.texture, texture, texture_label(texture));
                }
                ui.add_space(12.0);

                let button = egui::Button::new("Start").min_size(egui::vec2(ui.available_width(), 32.0));
                start = ui.add(button).clicked();
            });

            if info.show_status {
                ui.add_space(12.0);
                ui.separator();
                ui.label(format!("Triangles: {}", info.triangle_count));
                match &info.progress {
                    Some(p) if p.running => {
                        ui.label(format!(
                            "Cycle {} of {}",
                            (p.state.completed_cycles + 1).min(p.total_cycles),
                            p.total_cycles
                        ));
                        ui.label(format!("Phase: {}", p.state.phase.label()));
                    }
                    Some(p) => {
                        ui.label(format!("Last run: {} cycle(s)", p.state.completed_cycles));
                    }
                    None => {
                        ui.label("Idle");
                    }
                }
            }
        });

    let mut events = state.changes_since(&before);
    if start {
        events.push(ControlEvent::Start);
    }
    events
}
