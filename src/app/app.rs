use crate::animation::pose::{advance_pose, apply_pose};
use crate::app::updatable::{FpsCounter, Updatable};
use crate::error::BugError;
use crate::renderer::Renderer;
use crate::renderer::camera::{CameraController, CameraState};
use crate::scene::loader::{AssetKind, LoadResult, SceneAssets, spawn_scene_loads};
use crate::settings::Settings;
use crate::ui::Ui;
use egui_wgpu::ScreenDescriptor;
use egui_winit::State;
use nalgebra_glm as glm;
use std::cell::RefCell;
use std::f32::consts::FRAC_PI_4;
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, channel};
use std::time::Instant;

pub struct EventResponse {
    pub repaint: bool,
    pub exit: bool,
}

pub struct App {
    pub window: Arc<winit::window::Window>,
    ui: Ui,
    renderer: Renderer,
    camera_controller: Rc<RefCell<CameraController>>,
    fps: Rc<RefCell<FpsCounter>>,
    // Per-frame helpers, polled once per frame like the camera and FPS
    // counter they alias
    plugins: Vec<Rc<RefCell<dyn Updatable>>>,
    assets: SceneAssets,
    load_receiver: Receiver<LoadResult>,
    egui_state: State,
    egui_wants_pointer: bool,
    settings: Settings,
    last_frame: Instant,
}

impl App {
    pub async fn new(
        window: Arc<winit::window::Window>,
        runtime: tokio::runtime::Handle,
        asset_dir: PathBuf,
    ) -> Result<Self, BugError> {
        let ui = Ui::new();

        let renderer = Renderer::new(window.clone()).await?;

        let egui_ctx = renderer.egui_context();
        egui_ctx.options_mut(|options| {
            options.max_passes = std::num::NonZero::new(2).unwrap();
        });

        let egui_state = State::new(
            egui_ctx.clone(),
            egui::viewport::ViewportId::ROOT,
            &window,
            None,
            None,
            None,
        );

        let settings = Settings::load();

        let camera_controller = Rc::new(RefCell::new(CameraController::new(CameraState::default())));
        let fps = Rc::new(RefCell::new(FpsCounter::new()));
        let plugins: Vec<Rc<RefCell<dyn Updatable>>> =
            vec![fps.clone(), camera_controller.clone()];

        let (load_sender, load_receiver) = channel();
        spawn_scene_loads(&runtime, &asset_dir, load_sender);

        let mut app = Self {
            window,
            ui,
            renderer,
            camera_controller,
            fps,
            plugins,
            assets: SceneAssets::default(),
            load_receiver,
            egui_state,
            egui_wants_pointer: false,
            settings,
            last_frame: Instant::now(),
        };

        app.renderer.update_colors(&app.settings);

        Ok(app)
    }

    pub fn handle_event(&mut self, event: &winit::event::WindowEvent) -> EventResponse {
        // Let egui handle the event first
        let egui_response = self.egui_state.on_window_event(&self.window, event);
        let egui_wants_input = egui_response.consumed;

        match event {
            winit::event::WindowEvent::CloseRequested => {
                return EventResponse {
                    repaint: false,
                    exit: true,
                };
            }
            winit::event::WindowEvent::KeyboardInput { event, .. } => {
                if egui_wants_input {
                    return EventResponse {
                        repaint: egui_response.repaint,
                        exit: false,
                    };
                }
                if event.logical_key
                    == winit::keyboard::Key::Named(winit::keyboard::NamedKey::Escape)
                {
                    return EventResponse {
                        repaint: false,
                        exit: true,
                    };
                }
            }
            winit::event::WindowEvent::Resized(size) => {
                self.renderer.resize(*size);
            }
            winit::event::WindowEvent::MouseInput { state, button, .. } => {
                if self.egui_wants_pointer {
                    return EventResponse {
                        repaint: egui_response.repaint,
                        exit: false,
                    };
                }
                let is_pressed = *state == winit::event::ElementState::Pressed;
                self.camera_controller
                    .borrow_mut()
                    .on_mouse_button(*button, is_pressed);
            }
            winit::event::WindowEvent::ModifiersChanged(modifiers) => {
                let shift = modifiers.state().shift_key();
                let alt = modifiers.state().alt_key();
                let control = modifiers.state().control_key();
                self.camera_controller
                    .borrow_mut()
                    .on_modifiers(shift, alt, control);
            }
            winit::event::WindowEvent::CursorMoved { position, .. } => {
                if self.egui_wants_pointer {
                    return EventResponse {
                        repaint: egui_response.repaint,
                        exit: false,
                    };
                }
                self.camera_controller
                    .borrow_mut()
                    .on_mouse_move((position.x, position.y));
            }
            winit::event::WindowEvent::MouseWheel { delta, .. } => {
                if self.egui_wants_pointer {
                    return EventResponse {
                        repaint: egui_response.repaint,
                        exit: false,
                    };
                }
                match delta {
                    winit::event::MouseScrollDelta::LineDelta(_, y) => {
                        self.camera_controller.borrow_mut().zoom(*y);
                    }
                    winit::event::MouseScrollDelta::PixelDelta(pos) => {
                        self.camera_controller.borrow_mut().zoom(pos.y as f32 * 0.05);
                    }
                }
            }
            _ => {}
        }

        EventResponse {
            repaint: false,
            exit: false,
        }
    }

    /// One frame: drain finished loads, run the per-frame helpers, advance
    /// and apply the walk pose, then draw the scene and the overlay.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        while let Ok(result) = self.load_receiver.try_recv() {
            let arrived = match &result {
                LoadResult::Bug(_) => Some(AssetKind::Bug),
                LoadResult::Map(_) => Some(AssetKind::Map),
                LoadResult::Failed { .. } => None,
            };
            self.assets.apply(result);
            match arrived {
                Some(AssetKind::Bug) => {
                    if let Some(bug) = &self.assets.bug {
                        self.renderer.upload_bug(&bug.scene);
                    }
                    self.update_camera_target();
                }
                Some(AssetKind::Map) => {
                    if let Some(map) = &self.assets.map {
                        self.renderer.upload_map(&map.scene);
                    }
                }
                None => {}
            }
        }

        for plugin in &self.plugins {
            plugin.borrow_mut().update(dt);
        }

        // Walk cycle: a no-op until the character finishes loading
        if let Some(bug) = &mut self.assets.bug {
            if self.ui.walking() {
                advance_pose(bug);
            }
            apply_pose(bug);
            self.renderer.refresh_bug(&bug.scene);
        }

        let raw_input = self.egui_state.take_egui_input(&self.window);
        let egui_ctx = self.renderer.egui_context();

        let mut actions = crate::ui::UiActions::default();
        let full_output = egui_ctx.run(raw_input, |ctx| {
            actions = self
                .ui
                .show(ctx, &self.assets, &mut self.settings, self.fps.borrow().fps());
        });

        // Update egui pointer state for next frame
        self.egui_wants_pointer = egui_ctx.wants_pointer_input();

        if actions.reset_camera {
            self.camera_controller.borrow_mut().reset();
        }
        if actions.reset_walk {
            self.reset_walk();
        }
        if actions.colors_changed {
            self.renderer.update_colors(&self.settings);
        }

        self.egui_state
            .handle_platform_output(&self.window, full_output.platform_output);

        let paint_jobs = egui_ctx.tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [
                self.window.inner_size().width,
                self.window.inner_size().height,
            ],
            pixels_per_point: self.window.scale_factor() as f32,
        };

        self.renderer.camera = self.camera_controller.borrow().state().clone();

        self.renderer.render(
            self.settings.display.show_grid,
            self.settings.display.wireframe_mode,
            self.settings.display.show_shadows,
            self.settings.display.far_plane,
            paint_jobs,
            full_output.textures_delta,
            screen_descriptor,
        )
    }

    /// Aim the camera just behind the character, the way it frames up when
    /// the model first arrives.
    fn update_camera_target(&mut self) {
        if let Some(bug) = &self.assets.bug {
            let look = bug.scene.nodes[bug.root].translation - bug.rest_direction;
            self.camera_controller
                .borrow_mut()
                .set_target([look.x, look.y, look.z]);
        }
    }

    /// Put the walk cycle back at its initial phase and bring the body home.
    fn reset_walk(&mut self) {
        if let Some(bug) = &mut self.assets.bug {
            bug.pose_angle = FRAC_PI_4;
            bug.shrinking = false;
            bug.position_offset = glm::Vec3::zeros();
        }
        self.update_camera_target();
    }
}
