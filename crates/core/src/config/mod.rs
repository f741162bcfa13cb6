use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{input::Key, Result};

/// Number of virtual gamepad buttons the keymap drives.
pub const KEYMAP_COUNT: usize = 8;

/// Upper bound of parallel data banks an editor can target.
pub const MAX_EDITOR_BANKS: usize = 8;

/// Top-level configuration structure for the studio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StudioConfig {
    /// Length of a video capture in seconds.
    pub gif_length: u32,
    /// Integer upscale applied when encoding captures.
    pub gif_scale: u32,
    pub no_sound: bool,
    pub fullscreen: bool,
    pub ui_scale: u32,
    /// Number of banks the editors can switch between; 1 disables bank editing.
    pub editor_banks: usize,
    pub keymap: Keymap,
}

impl Default for StudioConfig {
    fn default() -> Self {
        Self {
            gif_length: 20,
            gif_scale: 2,
            no_sound: false,
            fullscreen: false,
            ui_scale: 4,
            editor_banks: MAX_EDITOR_BANKS,
            keymap: Keymap::default(),
        }
    }
}

impl StudioConfig {
    /// Loads the configuration from a JSON file. A missing file yields the
    /// defaults, a malformed one is reported.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(?path, "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config.normalized())
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    fn normalized(mut self) -> Self {
        self.editor_banks = self.editor_banks.clamp(1, MAX_EDITOR_BANKS);
        self.gif_scale = self.gif_scale.max(1);
        self
    }
}

/// Keyboard keys driving the eight virtual gamepad buttons
/// (up, down, left, right, a, b, x, y).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keymap(pub [Option<Key>; KEYMAP_COUNT]);

impl Default for Keymap {
    fn default() -> Self {
        Self([
            Some(Key::Up),
            Some(Key::Down),
            Some(Key::Left),
            Some(Key::Right),
            Some(Key::Z),
            Some(Key::X),
            Some(Key::A),
            Some(Key::S),
        ])
    }
}

impl Keymap {
    /// Returns the gamepad bitmask for the keys currently held.
    pub fn gamepad_mask(&self, held: impl Fn(Key) -> bool) -> u8 {
        self.0
            .iter()
            .enumerate()
            .filter(|(_, key)| key.is_some_and(|key| held(key)))
            .fold(0, |mask, (index, _)| mask | 1 << index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StudioConfig::load(&dir.path().join("config.json")).unwrap();
        assert_eq!(config, StudioConfig::default());
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{ "gif_length": 5, "editor_banks": 42 }"#).unwrap();

        let config = StudioConfig::load(&path).unwrap();
        assert_eq!(config.gif_length, 5);
        assert_eq!(config.editor_banks, MAX_EDITOR_BANKS);
        assert_eq!(config.keymap, Keymap::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = StudioConfig::load(&path).unwrap_err();
        assert!(format!("{err}").contains("invalid configuration"));
    }

    #[test]
    fn saved_config_loads_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        let config = StudioConfig {
            no_sound: true,
            editor_banks: 1,
            ..Default::default()
        };

        config.save(&path).unwrap();
        assert_eq!(StudioConfig::load(&path).unwrap(), config);
    }

    #[test]
    fn keymap_sets_bits_for_held_keys() {
        let keymap = Keymap::default();
        let mask = keymap.gamepad_mask(|key| matches!(key, Key::Left | Key::X));
        assert_eq!(mask, 0b0010_0100);
    }
}
