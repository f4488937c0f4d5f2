use crate::app::app::App;
use crate::error::BugError;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Runtime;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowId};

pub struct AppHandler {
    pub app: Option<App>,
    pub asset_dir: PathBuf,
    pub runtime: Runtime,
}

impl AppHandler {
    pub fn new(asset_dir: PathBuf) -> Result<Self, BugError> {
        Ok(Self {
            app: None,
            asset_dir,
            runtime: Runtime::new()?,
        })
    }
}

impl ApplicationHandler for AppHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.app.is_none() {
            let window_attrs = Window::default_attributes()
                .with_title("BugWalk-RS - Walking Bug Scene")
                .with_inner_size(winit::dpi::LogicalSize::new(1200.0, 800.0));

            let window = event_loop.create_window(window_attrs).unwrap();
            let runtime_handle = self.runtime.handle().clone();
            let app = self
                .runtime
                .block_on(App::new(
                    Arc::new(window),
                    runtime_handle,
                    self.asset_dir.clone(),
                ))
                .unwrap();

            self.app = Some(app);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        if let Some(app) = &mut self.app {
            let response = app.handle_event(&event);
            if response.repaint {
                app.window.request_redraw();
            }
            if response.exit {
                event_loop.exit();
            }
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(app) = &mut self.app {
            if let Err(e) = app.render() {
                log::error!("render error: {e:?}");
            }
            app.window.request_redraw();
        }
    }
}
