pub mod animation;
pub mod app;
pub mod error;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod ui;

/// Application name used for persisted settings.
pub const CONFY_APP_NAME: &str = "bugwalk-rs";
