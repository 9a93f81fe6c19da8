use serde::{Deserialize, Serialize};
use std::fs;

/// Client-relative rectangle normalized to the client size (x, y, w, h in 0..1).
pub type NormRect = (f32, f32, f32, f32);

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppSettings {
    #[serde(default)]
    pub overlay: OverlaySettings,

    #[serde(default)]
    pub target_seeker: TargetSeekerSettings,

    #[serde(default)]
    pub color_seeker: ColorSeekerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlaySettings {
    pub message_color: String,
    pub highlight_color: String,
    pub message_duration_ms: u64,
    pub highlight_duration_ms: u64,
}

impl Default for OverlaySettings {
    fn default() -> Self {
        Self {
            message_color: "#FFFFFF".to_string(),
            highlight_color: "#FFFFFF".to_string(),
            message_duration_ms: 1500,
            highlight_duration_ms: 3000,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSeekerSettings {
    pub image_path: String,
    pub interval_ms: u64,
    pub min_confidence: f32, // Minimum match confidence (0.0-1.0)
    pub search_region: Option<NormRect>,
    #[serde(default)]
    pub click_method: ClickMethod,
    #[serde(default)]
    pub button: MouseButton,
}

impl Default for TargetSeekerSettings {
    fn default() -> Self {
        Self {
            image_path: "target.png".to_string(),
            interval_ms: 1000,
            min_confidence: 0.85,
            search_region: None,
            click_method: ClickMethod::default(),
            button: MouseButton::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorSeekerSettings {
    pub hex_color: String,
    pub step: i32,     // Sample every N pixels when scanning
    pub threshold: u8, // Per-channel closeness for a color match
    pub interval_ms: u64,
    #[serde(default = "default_true")]
    pub eased_move: bool,
}

impl Default for ColorSeekerSettings {
    fn default() -> Self {
        Self {
            hex_color: "#FF0000".to_string(),
            step: 10,
            threshold: 30,
            interval_ms: 500,
            eased_move: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Copy)]
pub enum ClickMethod {
    SendMessage,   // Direct click delivered to the client window
    MouseMovement, // Physical mouse movement
}

impl Default for ClickMethod {
    fn default() -> Self {
        ClickMethod::SendMessage
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Copy)]
pub enum MouseButton {
    Left,
    Right,
}

impl Default for MouseButton {
    fn default() -> Self {
        MouseButton::Left
    }
}

fn default_true() -> bool {
    true
}

impl AppSettings {
    const SETTINGS_FILE: &'static str = "lunahelper_settings.json";

    /// Load settings from file, or create default if doesn't exist
    pub fn load() -> Self {
        match fs::read_to_string(Self::SETTINGS_FILE) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    /// Save settings to file
    pub fn save(&self) -> Result<(), String> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| format!("Failed to serialize settings: {}", e))?;

        fs::write(Self::SETTINGS_FILE, json)
            .map_err(|e| format!("Failed to write settings file: {}", e))?;

        Ok(())
    }

    /// Auto-save (ignores errors)
    pub fn auto_save(&self) {
        if let Err(e) = self.save() {
            log::warn!("{}", e);
        }
    }
}
