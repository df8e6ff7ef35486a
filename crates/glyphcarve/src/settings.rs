use crate::justification::{Justification, JustificationReference};
use crate::types::{ShapeStringParams, StickyFontHeuristic, DEFAULT_FLATTEN_TOLERANCE};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Persisted defaults for new shape strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStringSettings {
    pub size: f64,
    pub tracking: f64,
    pub justification: Justification,
    pub justification_reference: JustificationReference,
    pub keep_left_margin: bool,
    pub scale_to_size: bool,
    pub oblique_angle: f64,
    pub make_face: bool,
    pub fuse: bool,
    pub sticky_font: StickyFontHeuristic,
    pub flatten_tolerance: f64,
}

impl Default for ShapeStringSettings {
    fn default() -> Self {
        Self {
            size: 10.0,
            tracking: 0.0,
            justification: Justification::default(),
            justification_reference: JustificationReference::default(),
            keep_left_margin: false,
            scale_to_size: true,
            oblique_angle: 0.0,
            make_face: true,
            fuse: false,
            sticky_font: StickyFontHeuristic::default(),
            flatten_tolerance: DEFAULT_FLATTEN_TOLERANCE,
        }
    }
}

impl ShapeStringSettings {
    /// Load settings from the provided path. Missing files yield the defaults.
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let data = fs::read(path).with_context(|| format!("read settings {}", path.display()))?;
        let settings: ShapeStringSettings =
            serde_json::from_slice(&data).context("deserialize settings")?;
        Ok(settings)
    }

    /// Persist the settings to the provided path, ensuring the directory exists.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create settings directory {}", parent.display()))?;
        }

        let data = serde_json::to_vec_pretty(self).context("serialize settings to JSON bytes")?;
        fs::write(path, data).with_context(|| format!("write settings {}", path.display()))
    }

    /// Resolve the default settings path (`~/.glyphcarve/settings.json`).
    pub fn default_settings_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| anyhow!("could not determine home directory"))?;
        Ok(home.join(".glyphcarve").join("settings.json"))
    }

    /// Parameters for `text` with these defaults applied.
    pub fn params_for(&self, text: impl Into<String>) -> ShapeStringParams {
        ShapeStringParams {
            text: text.into(),
            size: self.size,
            tracking: self.tracking,
            justification: self.justification,
            justification_reference: self.justification_reference,
            keep_left_margin: self.keep_left_margin,
            scale_to_size: self.scale_to_size,
            oblique_angle: self.oblique_angle,
            make_face: self.make_face,
            fuse: self.fuse,
            sticky_font: self.sticky_font,
            flatten_tolerance: self.flatten_tolerance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::justification::{HorizontalAnchor, VerticalAnchor};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("glyphcarve-settings-{}-{}", name, std::process::id()))
            .join("settings.json")
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let settings = ShapeStringSettings::load_from_path(temp_path("missing")).unwrap();
        assert_eq!(settings, ShapeStringSettings::default());
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_path("save");
        let settings = ShapeStringSettings {
            size: 3.5,
            justification: Justification::new(VerticalAnchor::Middle, HorizontalAnchor::Center),
            sticky_font: StickyFontHeuristic {
                min_area: 0.01,
                relative_tolerance: 1e-5,
            },
            ..ShapeStringSettings::default()
        };
        settings.save_to_path(&path).unwrap();
        let loaded = ShapeStringSettings::load_from_path(&path).unwrap();
        assert_eq!(loaded, settings);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let path = temp_path("partial");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, r#"{ "size": 7.0, "fuse": true }"#).unwrap();
        let loaded = ShapeStringSettings::load_from_path(&path).unwrap();
        assert_eq!(loaded.size, 7.0);
        assert!(loaded.fuse);
        assert!(loaded.make_face);
        let _ = fs::remove_dir_all(path.parent().unwrap());
    }

    #[test]
    fn test_params_for_copies_defaults() {
        let settings = ShapeStringSettings {
            oblique_angle: 12.0,
            ..ShapeStringSettings::default()
        };
        let params = settings.params_for("Abc");
        assert_eq!(params.text, "Abc");
        assert_eq!(params.oblique_angle, 12.0);
        assert_eq!(params.size, 10.0);
    }
}
