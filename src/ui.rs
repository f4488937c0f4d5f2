use crate::animation::pose::{POSE_ANGLE_MAX, POSE_ANGLE_MIN};
use crate::scene::loader::SceneAssets;
use crate::settings::Settings;

/// What the overlay asked the app to do this frame.
#[derive(Default)]
pub struct UiActions {
    pub reset_camera: bool,
    pub reset_walk: bool,
    pub colors_changed: bool,
}

pub struct Ui {
    walking: bool,
}

impl Ui {
    pub fn new() -> Self {
        Self { walking: true }
    }

    /// Whether the pose driver should advance this frame.
    pub fn walking(&self) -> bool {
        self.walking
    }

    pub fn show(
        &mut self,
        ctx: &egui::Context,
        assets: &SceneAssets,
        settings: &mut Settings,
        fps: f32,
    ) -> UiActions {
        let mut actions = UiActions::default();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut ui_changed = false;
                ui_changed |= ui
                    .toggle_value(&mut settings.ui.show_animation, "Walk")
                    .changed();
                ui_changed |= ui
                    .toggle_value(&mut settings.ui.show_display_settings, "Display")
                    .changed();
                ui_changed |= ui
                    .toggle_value(&mut settings.ui.show_colors, "Colors")
                    .changed();
                ui_changed |= ui
                    .toggle_value(&mut settings.ui.show_scene_info, "Scene")
                    .changed();
                if ui_changed {
                    settings.ui.save();
                }

                ui.separator();
                if ui.button("Reset Camera").clicked() {
                    actions.reset_camera = true;
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(format!("{fps:.0} fps"));
                });
            });
        });

        if settings.ui.show_animation {
            let mut open = true;
            egui::Window::new("Walk Cycle")
                .open(&mut open)
                .resizable(false)
                .show(ctx, |ui| {
                    ui.checkbox(&mut self.walking, "Walking");

                    match &assets.bug {
                        Some(bug) => {
                            ui.label(format!(
                                "Pose angle: {:.1}° ({})",
                                bug.pose_angle.to_degrees(),
                                if bug.shrinking { "folding" } else { "extending" },
                            ));
                            ui.label(format!(
                                "Range: {:.0}°..{:.0}°",
                                POSE_ANGLE_MIN.to_degrees(),
                                POSE_ANGLE_MAX.to_degrees(),
                            ));
                            ui.label(format!("Travelled: {:.2}", bug.position_offset.xz().norm()));
                            if ui.button("Reset Walk").clicked() {
                                actions.reset_walk = true;
                            }
                        }
                        None => {
                            ui.label("Character not loaded");
                        }
                    }
                });
            if !open {
                settings.ui.show_animation = false;
                settings.ui.save();
            }
        }

        if settings.ui.show_display_settings {
            let mut open = true;
            egui::Window::new("Display")
                .open(&mut open)
                .resizable(false)
                .show(ctx, |ui| {
                    let mut changed = false;
                    changed |= ui
                        .checkbox(&mut settings.display.show_grid, "Grid")
                        .changed();
                    changed |= ui
                        .checkbox(&mut settings.display.wireframe_mode, "Wireframe")
                        .changed();
                    changed |= ui
                        .checkbox(&mut settings.display.show_shadows, "Shadows")
                        .changed();
                    changed |= ui
                        .add(
                            egui::Slider::new(&mut settings.display.far_plane, 100.0..=2000.0)
                                .text("Far plane"),
                        )
                        .changed();
                    if changed {
                        settings.display.save();
                    }
                });
            if !open {
                settings.ui.show_display_settings = false;
                settings.ui.save();
            }
        }

        if settings.ui.show_colors {
            let mut open = true;
            egui::Window::new("Colors")
                .open(&mut open)
                .resizable(false)
                .show(ctx, |ui| {
                    let mut changed = false;
                    egui::Grid::new("color_grid").show(ui, |ui| {
                        changed |= ui
                            .color_edit_button_rgb(&mut settings.colors.background_color)
                            .changed();
                        ui.label("Background");
                        ui.end_row();
                        changed |= ui
                            .color_edit_button_rgb(&mut settings.colors.fog_color)
                            .changed();
                        ui.label("Fog");
                        ui.end_row();
                        changed |= ui
                            .color_edit_button_rgb(&mut settings.colors.hemi_sky_color)
                            .changed();
                        ui.label("Sky light");
                        ui.end_row();
                        changed |= ui
                            .color_edit_button_rgb(&mut settings.colors.hemi_ground_color)
                            .changed();
                        ui.label("Ground light");
                        ui.end_row();
                        changed |= ui
                            .color_edit_button_rgb(&mut settings.colors.sun_color)
                            .changed();
                        ui.label("Sun");
                        ui.end_row();
                    });
                    if changed {
                        settings.colors.save();
                        actions.colors_changed = true;
                    }
                });
            if !open {
                settings.ui.show_colors = false;
                settings.ui.save();
            }
        }

        if settings.ui.show_scene_info {
            let mut open = true;
            egui::Window::new("Scene")
                .open(&mut open)
                .resizable(false)
                .show(ctx, |ui| {
                    match &assets.bug {
                        Some(bug) => ui.label(format!(
                            "Bug: {} nodes, {} meshes",
                            bug.scene.nodes.len(),
                            bug.scene.meshes.len()
                        )),
                        None => ui.label("Bug: not loaded"),
                    };
                    match &assets.map {
                        Some(map) => ui.label(format!(
                            "Map: {} nodes, {} meshes",
                            map.scene.nodes.len(),
                            map.scene.meshes.len()
                        )),
                        None => ui.label("Map: not loaded"),
                    };
                });
            if !open {
                settings.ui.show_scene_info = false;
                settings.ui.save();
            }
        }

        actions
    }
}

impl Default for Ui {
    fn default() -> Self {
        Self::new()
    }
}
