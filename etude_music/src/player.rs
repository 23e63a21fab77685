// Handing a finished composition to the external player.
//
// The player is an opaque program that takes the JSON file path as its last
// argument and plays it; we only launch it and wait for it to exit. By
// default that is `node playmidi.js <file>`.

use std::path::Path;
use std::process::Command;

use serde::{Deserialize, Serialize};

use crate::error::EtudeError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub program: String,
    /// Arguments placed before the composition path.
    pub args: Vec<String>,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        PlayerConfig {
            program: "node".to_string(),
            args: vec!["playmidi.js".to_string()],
        }
    }
}

impl PlayerConfig {
    pub fn command(&self, path: &Path) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args).arg(path);
        cmd
    }
}

/// Launch the player on `path` and block until it finishes.
pub fn play(config: &PlayerConfig, path: &Path) -> Result<(), EtudeError> {
    log::info!(
        "Launching player: {} {} {}",
        config.program,
        config.args.join(" "),
        path.display()
    );
    let status = config
        .command(path)
        .status()
        .map_err(|source| EtudeError::PlayerSpawn {
            program: config.program.clone(),
            source,
        })?;
    if !status.success() {
        return Err(EtudeError::PlayerFailed {
            program: config.program.clone(),
            status,
        });
    }
    log::info!("Music over.");
    Ok(())
}
