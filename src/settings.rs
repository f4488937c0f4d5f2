use crate::CONFY_APP_NAME;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub show_grid: bool,
    pub wireframe_mode: bool,
    pub show_shadows: bool,
    pub far_plane: f32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            show_grid: true,
            wireframe_mode: false,
            show_shadows: true,
            far_plane: 1000.0,
        }
    }
}

impl DisplaySettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "display").unwrap_or_default()
    }

    pub fn save(&self) {
        let _ = confy::store(CONFY_APP_NAME, "display", self);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorSettings {
    pub background_color: [f32; 3],
    pub fog_color: [f32; 3],
    pub hemi_sky_color: [f32; 3],
    pub hemi_ground_color: [f32; 3],
    pub sun_color: [f32; 3],
}

impl Default for ColorSettings {
    fn default() -> Self {
        Self {
            // 0xa0a0a0 background with matching fog, white sky over 0x444444 ground
            background_color: [0.627, 0.627, 0.627],
            fog_color: [0.627, 0.627, 0.627],
            hemi_sky_color: [1.0, 1.0, 1.0],
            hemi_ground_color: [0.267, 0.267, 0.267],
            sun_color: [1.0, 1.0, 1.0],
        }
    }
}

impl ColorSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "colors").unwrap_or_default()
    }

    pub fn save(&self) {
        let _ = confy::store(CONFY_APP_NAME, "colors", self);
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    pub show_animation: bool,
    pub show_display_settings: bool,
    pub show_colors: bool,
    pub show_scene_info: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            show_animation: true,
            show_display_settings: false,
            show_colors: false,
            show_scene_info: false,
        }
    }
}

impl UiSettings {
    pub fn load() -> Self {
        confy::load(CONFY_APP_NAME, "ui").unwrap_or_default()
    }

    pub fn save(&self) {
        let _ = confy::store(CONFY_APP_NAME, "ui", self);
    }
}

// Aggregate struct for convenience
pub struct Settings {
    pub display: DisplaySettings,
    pub colors: ColorSettings,
    pub ui: UiSettings,
}

impl Settings {
    pub fn load() -> Self {
        Self {
            display: DisplaySettings::load(),
            colors: ColorSettings::load(),
            ui: UiSettings::load(),
        }
    }
}
