// Run configuration, loaded from JSON.
//
// Everything a run needs besides the piece name and seed: where to write the
// composition, whether and where to export MIDI, which player to launch, and
// the parameters of every piece. All fields have defaults and the struct is
// `#[serde(default)]`, so a config file only lists what it changes:
//
//     { "player": { "program": "timidity", "args": [] },
//       "pieces": { "tone_row": { "phrases": 200 } } }
//
// Command-line flags override whatever the file says.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::EtudeError;
use crate::output::DEFAULT_OUTPUT;
use crate::pieces::PieceParams;
use crate::player::PlayerConfig;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EtudeConfig {
    /// JSON composition handed to the player.
    pub output_path: PathBuf,
    /// Also write a Standard MIDI File here.
    pub midi_path: Option<PathBuf>,
    /// Launch the player after writing.
    pub play: bool,
    /// Seed used when none is given on the command line.
    pub seed: Option<u64>,
    pub player: PlayerConfig,
    pub pieces: PieceParams,
}

impl Default for EtudeConfig {
    fn default() -> Self {
        EtudeConfig {
            output_path: PathBuf::from(DEFAULT_OUTPUT),
            midi_path: None,
            play: true,
            seed: None,
            player: PlayerConfig::default(),
            pieces: PieceParams::default(),
        }
    }
}

impl EtudeConfig {
    pub fn load(path: &Path) -> Result<Self, EtudeError> {
        let text = std::fs::read_to_string(path).map_err(|e| EtudeError::io(path, e))?;
        let config = serde_json::from_str(&text).map_err(|source| EtudeError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mode::Mode;

    #[test]
    fn empty_object_gives_defaults() {
        let config: EtudeConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, EtudeConfig::default());
        assert_eq!(config.output_path, PathBuf::from("notes.json"));
        assert!(config.play);
    }

    #[test]
    fn partial_config_overrides_only_named_fields() {
        let json = r#"{
            "play": false,
            "seed": 9,
            "player": { "program": "timidity" },
            "pieces": {
                "tone_row": { "phrases": 200 },
                "reharmonization": { "pattern": ["Dorian", null, "Aeolian"] }
            }
        }"#;
        let config: EtudeConfig = serde_json::from_str(json).unwrap();
        assert!(!config.play);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.player.program, "timidity");
        assert_eq!(config.player.args, vec!["playmidi.js".to_string()]);
        assert_eq!(config.pieces.tone_row.phrases, 200);
        assert_eq!(config.pieces.tone_row.row_low, 48);
        assert_eq!(
            config.pieces.reharmonization.pattern,
            vec![Some(Mode::Dorian), None, Some(Mode::Aeolian)]
        );
        assert_eq!(config.pieces.reharmonization.progression.len(), 8);
    }

    #[test]
    fn default_roundtrips_through_json() {
        let config = EtudeConfig::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: EtudeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn load_reports_bad_json_with_path() {
        let path = std::env::temp_dir().join(format!("etude-config-{}.json", std::process::id()));
        std::fs::write(&path, "{ \"play\": ").unwrap();
        let err = EtudeConfig::load(&path).unwrap_err();
        assert!(matches!(err, EtudeError::Json { .. }));
        assert!(err.to_string().contains("etude-config-"), "{err}");

        std::fs::write(&path, "{ \"play\": false }").unwrap();
        assert!(!EtudeConfig::load(&path).unwrap().play);
        std::fs::remove_file(&path).unwrap();
    }
}
