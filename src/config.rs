//! Window manager tuning knobs.
//!
//! Defaults are expressed in pixels for a browser-sized canvas. Hosts that
//! measure in other units (the terminal demo counts cells) start from
//! [`WmConfig::terminal`] or load overrides from JSON.

use std::path::Path;
use std::{fs, io};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{
    BASE_Z, BUTTON_WIDTH, CASCADE_STEP, DOCK_BAR_HEIGHT, DOCK_BAR_WIDTH, DOCK_GAP, DOCK_MARGIN,
    HEADER_HEIGHT, WINDOW_HEIGHT, WINDOW_WIDTH,
};
use crate::layout::Size;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{field} must be a positive, finite size")]
    InvalidSize { field: &'static str },
    #[error("{field} must be a finite, non-negative number")]
    InvalidSpacing { field: &'static str },
    #[error("header_height must fit inside the window height")]
    HeaderTooTall,
    #[error("two header buttons must fit inside the window width")]
    ButtonsTooWide,
    #[error("base_z must be at least 2, got {0}")]
    BaseZTooLow(i32),
    #[error("failed to read config file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse config file: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WmConfig {
    /// Footprint used to center a window on first reveal.
    pub window_size: Size,
    pub dock_bar_size: Size,
    pub dock_gap: f64,
    pub dock_margin: f64,
    pub cascade_step: f64,
    pub header_height: f64,
    pub button_width: f64,
    pub base_z: i32,
}

impl Default for WmConfig {
    fn default() -> Self {
        Self {
            window_size: Size::new(WINDOW_WIDTH, WINDOW_HEIGHT),
            dock_bar_size: Size::new(DOCK_BAR_WIDTH, DOCK_BAR_HEIGHT),
            dock_gap: DOCK_GAP,
            dock_margin: DOCK_MARGIN,
            cascade_step: CASCADE_STEP,
            header_height: HEADER_HEIGHT,
            button_width: BUTTON_WIDTH,
            base_z: BASE_Z,
        }
    }
}

impl WmConfig {
    /// Cell-sized defaults for hosting the manager in a terminal.
    pub fn terminal() -> Self {
        Self {
            window_size: Size::new(44.0, 14.0),
            dock_bar_size: Size::new(18.0, 1.0),
            dock_gap: 2.0,
            dock_margin: 1.0,
            cascade_step: 2.0,
            header_height: 1.0,
            button_width: 3.0,
            base_z: BASE_Z,
        }
    }

    /// Read a JSON object of overrides; missing fields keep `base`'s values.
    pub fn load_overrides(base: Self, path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path)?;
        let mut value = serde_json::to_value(base)?;
        let overrides: serde_json::Value = serde_json::from_str(&raw)?;
        merge_json(&mut value, overrides);
        let config: Self = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.window_size.is_positive() {
            return Err(ConfigError::InvalidSize {
                field: "window_size",
            });
        }
        if !self.dock_bar_size.is_positive() {
            return Err(ConfigError::InvalidSize {
                field: "dock_bar_size",
            });
        }
        for (field, value) in [
            ("dock_gap", self.dock_gap),
            ("dock_margin", self.dock_margin),
            ("cascade_step", self.cascade_step),
            ("header_height", self.header_height),
            ("button_width", self.button_width),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidSpacing { field });
            }
        }
        if self.header_height > self.window_size.height {
            return Err(ConfigError::HeaderTooTall);
        }
        if self.button_width * 2.0 > self.window_size.width {
            return Err(ConfigError::ButtonsTooWide);
        }
        if self.base_z < 2 {
            return Err(ConfigError::BaseZTooLow(self.base_z));
        }
        Ok(())
    }
}

fn merge_json(base: &mut serde_json::Value, overrides: serde_json::Value) {
    match (base, overrides) {
        (serde_json::Value::Object(base), serde_json::Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => merge_json(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (slot, value) => *slot = value,
    }
}
