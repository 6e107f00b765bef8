//! Persisted launcher settings
//!
//! Stored as JSON, one flat object. Keys mirror the fields below so that a
//! settings file can be edited by hand.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::{info, warn};

use crate::color::HexColor;
use crate::constants::{config, defaults, grid, validation};
use crate::types::{MonitorRect, WindowGeometry};

/// One grid button: its label and the video it launches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonSlot {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub video: String,
}

impl ButtonSlot {
    fn default_for(index: usize) -> Self {
        let title = if index == grid::STOP_SLOT {
            defaults::STOP_BUTTON_TITLE.to_string()
        } else {
            format!("Button {}", index + 1)
        };
        Self {
            title,
            video: String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub background_color: String,
    pub button_border_color: String,
    pub button_text_color: String,
    pub font_family: String,
    pub font_size: u8,
    pub fullscreen: bool,
    pub window_geometry: WindowGeometry,
    pub mpv_path: String,
    /// Monitor the window last covered in borderless fullscreen
    pub fullscreen_monitor: Option<MonitorRect>,
    pub buttons: Vec<ButtonSlot>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            background_color: defaults::BACKGROUND_COLOR.to_string(),
            button_border_color: defaults::BUTTON_BORDER_COLOR.to_string(),
            button_text_color: defaults::BUTTON_TEXT_COLOR.to_string(),
            font_family: defaults::FONT_FAMILY.to_string(),
            font_size: defaults::FONT_SIZE,
            fullscreen: false,
            window_geometry: WindowGeometry::default(),
            mpv_path: String::new(),
            fullscreen_monitor: None,
            buttons: (0..grid::BUTTON_COUNT).map(ButtonSlot::default_for).collect(),
        }
    }
}

impl Settings {
    /// `<config dir>/video-launcher/settings.json`, or `./settings.json`
    /// when the platform has no config dir
    pub fn default_path() -> PathBuf {
        match dirs::config_dir() {
            Some(mut path) => {
                path.push(config::APP_DIR);
                path.push(config::FILENAME);
                path
            }
            None => PathBuf::from(config::FILENAME),
        }
    }

    /// Load settings, using defaults when the file does not exist yet
    /// A file that exists but cannot be parsed is an error
    pub fn load(path: &Path) -> Result<Self> {
        let mut settings = if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read settings from {}", path.display()))?;
            let settings: Settings = serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse settings from {}", path.display()))?;
            info!(path = %path.display(), "Loaded settings");
            settings
        } else {
            info!(path = %path.display(), "No settings file found, using defaults");
            Settings::default()
        };

        settings.apply_env_overrides();
        settings.validate_and_clamp();
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {}", parent.display()))?;
        }
        let contents = serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
        fs::write(path, contents)
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;
        Ok(())
    }

    /// Remove the settings file and hand back defaults
    pub fn reset(path: &Path) -> Result<Self> {
        if path.exists() {
            fs::remove_file(path)
                .with_context(|| format!("Failed to remove settings file {}", path.display()))?;
            info!(path = %path.display(), "Removed settings file");
        }
        Ok(Settings::default())
    }

    /// Assign a video to a launch slot. The stop slot never carries a video
    pub fn assign_video(&mut self, index: usize, video: &Path) -> bool {
        if index >= grid::STOP_SLOT {
            warn!(index, "Ignoring video assignment to non-launch slot");
            return false;
        }
        let normalized = normalize_path(video);
        info!(index, video = %normalized.display(), "Assigned video to button");
        self.buttons[index].video = normalized.to_string_lossy().into_owned();
        true
    }

    /// Rename a slot; blank titles are ignored
    pub fn set_title(&mut self, index: usize, title: &str) -> bool {
        let title = title.trim();
        if title.is_empty() || index >= self.buttons.len() {
            return false;
        }
        self.buttons[index].title = title.to_string();
        true
    }

    pub fn set_mpv_path(&mut self, path: &Path) {
        self.mpv_path = normalize_path(path).to_string_lossy().into_owned();
    }

    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|name| env::var(name).ok());
    }

    /// Apply overrides from `lookup`, which maps a variable name to its value
    fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(mpv) = lookup(config::ENV_MPV_PATH)
            && !mpv.trim().is_empty()
        {
            info!(mpv_path = %mpv, "mpv path overridden from environment");
            self.mpv_path = mpv.trim().to_string();
        }
        if let Some(value) = lookup(config::ENV_FULLSCREEN) {
            match value.trim().parse::<bool>() {
                Ok(fullscreen) => self.fullscreen = fullscreen,
                Err(e) => warn!(var = config::ENV_FULLSCREEN, value = %value, error = %e, "Ignoring invalid env override"),
            }
        }
    }

    /// Validate and clamp values to something the UI can render
    pub fn validate_and_clamp(&mut self) {
        use validation::*;

        if self.buttons.len() != grid::BUTTON_COUNT {
            warn!(found = self.buttons.len(), expected = grid::BUTTON_COUNT, "Wrong number of buttons, normalizing");
            self.buttons.truncate(grid::BUTTON_COUNT);
            while self.buttons.len() < grid::BUTTON_COUNT {
                self.buttons.push(ButtonSlot::default_for(self.buttons.len()));
            }
        }

        if self.font_size < MIN_FONT_SIZE || self.font_size > MAX_FONT_SIZE {
            let clamped = self.font_size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE);
            warn!(font_size = self.font_size, clamped, "font_size out of range, clamping");
            self.font_size = clamped;
        }

        if self.font_family.trim().is_empty() {
            warn!("font_family empty, using default");
            self.font_family = defaults::FONT_FAMILY.to_string();
        }

        for (name, value, fallback) in [
            ("background_color", &mut self.background_color, defaults::BACKGROUND_COLOR),
            ("button_border_color", &mut self.button_border_color, defaults::BUTTON_BORDER_COLOR),
            ("button_text_color", &mut self.button_text_color, defaults::BUTTON_TEXT_COLOR),
        ] {
            if HexColor::parse(value.as_str()).is_none() {
                warn!(field = name, value = %value, fallback, "Invalid color, using default");
                *value = fallback.to_string();
            }
        }

        let geometry = &mut self.window_geometry;
        if geometry.width < MIN_WINDOW_DIMENSION || geometry.height < MIN_WINDOW_DIMENSION {
            warn!(geometry = %geometry, "window_geometry too small, using default size");
            let default = WindowGeometry::default();
            geometry.width = default.width;
            geometry.height = default.height;
        }

        let stop = &mut self.buttons[grid::STOP_SLOT];
        if !stop.video.is_empty() {
            warn!(video = %stop.video, "Stop button cannot launch a video, clearing");
            stop.video.clear();
        }
    }
}

/// Lexical cleanup: drops `.` components and redundant separators
/// Symlinks are not resolved and `..` is kept as-is
pub fn normalize_path(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn settings_path(dir: &TempDir) -> PathBuf {
        dir.path().join("nested").join("settings.json")
    }

    #[test]
    fn test_default_has_nine_buttons_with_stop_slot() {
        let settings = Settings::default();
        assert_eq!(settings.buttons.len(), 9);
        assert_eq!(settings.buttons[0].title, "Button 1");
        assert_eq!(settings.buttons[7].title, "Button 8");
        assert_eq!(settings.buttons[8].title, "VR Experience");
        assert!(settings.buttons.iter().all(|b| b.video.is_empty()));
        assert_eq!(settings.window_geometry.to_string(), "600x600+100+100");
        assert_eq!(settings.fullscreen_monitor, None);
    }

    #[test]
    fn test_load_missing_file_gives_defaults_without_writing() {
        let dir = TempDir::new().unwrap();
        let path = settings_path(&dir);
        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.buttons.len(), 9);
        assert!(!path.exists());
    }

    #[test]
    fn test_save_then_load_preserves_edits() {
        let dir = TempDir::new().unwrap();
        let path = settings_path(&dir);

        let mut settings = Settings::default();
        settings.background_color = "#102030".to_string();
        settings.fullscreen_monitor = Some(MonitorRect::new(1920, 0, 2560, 1440));
        settings.set_title(2, "Lobby loop");
        settings.save(&path).unwrap();

        let loaded = Settings::load(&path).unwrap();
        assert_eq!(loaded.background_color, "#102030");
        assert_eq!(loaded.fullscreen_monitor, Some(MonitorRect::new(1920, 0, 2560, 1440)));
        assert_eq!(loaded.buttons[2].title, "Lobby loop");
    }

    #[test]
    fn test_load_reads_original_key_layout() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        let json = r##"{
            "background_color": "#222222",
            "font_size": 20,
            "fullscreen": true,
            "window_geometry": "800x600+-1600+0",
            "fullscreen_monitor": {"x": -1920, "y": 0, "width": 1920, "height": 1080},
            "buttons": [{"title": "Intro", "video": "/srv/intro.mp4"}]
        }"##;
        fs::write(&path, json).unwrap();

        let settings = Settings::load(&path).unwrap();
        assert_eq!(settings.font_size, 20);
        assert!(settings.fullscreen);
        assert_eq!(settings.window_geometry, WindowGeometry::new(800, 600, -1600, 0));
        assert_eq!(settings.fullscreen_monitor.unwrap().x, -1920);
        // Missing slots are padded back to a full grid
        assert_eq!(settings.buttons.len(), 9);
        assert_eq!(settings.buttons[0].video, "/srv/intro.mp4");
        assert_eq!(settings.buttons[8].title, "VR Experience");
        // Keys absent from the file take defaults
        assert_eq!(settings.button_text_color, "#FFFFFF");
    }

    #[test]
    fn test_load_invalid_json_is_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").unwrap();
        let err = Settings::load(&path).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse settings"));
    }

    #[test]
    fn test_reset_removes_file() {
        let dir = TempDir::new().unwrap();
        let path = settings_path(&dir);
        let mut settings = Settings::default();
        settings.font_size = 40;
        settings.save(&path).unwrap();

        let reset = Settings::reset(&path).unwrap();
        assert!(!path.exists());
        assert_eq!(reset, Settings::default());
    }

    #[test]
    fn test_validate_clamps_font_and_colors() {
        let mut settings = Settings {
            font_size: 200,
            background_color: "black".to_string(),
            font_family: "  ".to_string(),
            ..Settings::default()
        };
        settings.validate_and_clamp();
        assert_eq!(settings.font_size, 72);
        assert_eq!(settings.background_color, "#000000");
        assert_eq!(settings.font_family, "Arial");

        settings.font_size = 1;
        settings.validate_and_clamp();
        assert_eq!(settings.font_size, 8);
    }

    #[test]
    fn test_validate_truncates_extra_buttons() {
        let mut settings = Settings::default();
        settings.buttons.push(ButtonSlot::default_for(9));
        settings.validate_and_clamp();
        assert_eq!(settings.buttons.len(), 9);
    }

    #[test]
    fn test_validate_clears_stop_slot_video() {
        let mut settings = Settings::default();
        settings.buttons[grid::STOP_SLOT].video = "/videos/vr.mp4".to_string();
        settings.buttons[0].video = "/videos/lobby.mp4".to_string();
        settings.validate_and_clamp();
        assert!(settings.buttons[grid::STOP_SLOT].video.is_empty());
        assert_eq!(settings.buttons[0].video, "/videos/lobby.mp4");
    }

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name: &str| pairs.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
    }

    #[test]
    fn test_env_overrides_mpv_path_and_fullscreen() {
        let mut settings = Settings::default();
        settings.apply_overrides(vars(&[
            (config::ENV_MPV_PATH, "  /opt/mpv/bin/mpv "),
            (config::ENV_FULLSCREEN, "true"),
        ]));
        assert_eq!(settings.mpv_path, "/opt/mpv/bin/mpv");
        assert!(settings.fullscreen);
    }

    #[test]
    fn test_env_overrides_ignore_blank_and_invalid_values() {
        let mut settings = Settings {
            mpv_path: "/usr/bin/mpv".to_string(),
            fullscreen: true,
            ..Settings::default()
        };
        settings.apply_overrides(vars(&[(config::ENV_MPV_PATH, "   "), (config::ENV_FULLSCREEN, "yes please")]));
        assert_eq!(settings.mpv_path, "/usr/bin/mpv");
        assert!(settings.fullscreen);

        settings.apply_overrides(vars(&[]));
        assert_eq!(settings.mpv_path, "/usr/bin/mpv");
        assert!(settings.fullscreen);
    }

    #[test]
    fn test_assign_video_normalizes_and_skips_stop_slot() {
        let mut settings = Settings::default();
        assert!(settings.assign_video(0, Path::new("/videos/./lobby//loop.mp4")));
        assert_eq!(settings.buttons[0].video, "/videos/lobby/loop.mp4");

        assert!(!settings.assign_video(8, Path::new("/videos/vr.mp4")));
        assert!(settings.buttons[8].video.is_empty());
    }

    #[test]
    fn test_set_title_ignores_blank() {
        let mut settings = Settings::default();
        assert!(!settings.set_title(1, "   "));
        assert_eq!(settings.buttons[1].title, "Button 2");
        assert!(settings.set_title(1, " Welcome "));
        assert_eq!(settings.buttons[1].title, "Welcome");
    }
}
