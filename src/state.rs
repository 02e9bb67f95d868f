use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Per-project session state persisted in `.lintree/state.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    #[serde(default)]
    pub onboarding_shown: bool,
}

pub struct StateManager {
    state_file: PathBuf,
}

impl StateManager {
    pub fn new(state_file: PathBuf) -> Self {
        Self { state_file }
    }

    /// Load state; a missing file is the default state.
    pub fn load(&self) -> Result<SessionState> {
        if !self.state_file.exists() {
            return Ok(SessionState::default());
        }
        let content = std::fs::read_to_string(&self.state_file).with_context(|| {
            format!("Failed to read state file: {}", self.state_file.display())
        })?;
        serde_json::from_str(&content).context("Failed to parse state file")
    }

    pub fn save(&self, state: &SessionState) -> Result<()> {
        if let Some(parent) = self.state_file.parent() {
            std::fs::create_dir_all(parent).context("Failed to create state directory")?;
        }
        let content =
            serde_json::to_string_pretty(state).context("Failed to serialize state to JSON")?;
        std::fs::write(&self.state_file, content).with_context(|| {
            format!("Failed to write state file: {}", self.state_file.display())
        })?;
        Ok(())
    }

    /// Returns true exactly once per project: the first time it is called
    /// the onboarding flag is set and persisted.
    pub fn take_onboarding(&self) -> Result<bool> {
        let mut state = self.load()?;
        if state.onboarding_shown {
            return Ok(false);
        }
        state.onboarding_shown = true;
        self.save(&state)?;
        Ok(true)
    }

    pub fn path(&self) -> &Path {
        &self.state_file
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempdir().unwrap();
        let manager = StateManager::new(dir.path().join("state.json"));
        assert_eq!(manager.load().unwrap(), SessionState::default());
    }

    #[test]
    fn test_onboarding_is_taken_once() {
        let dir = tempdir().unwrap();
        let manager = StateManager::new(dir.path().join(".lintree/state.json"));
        assert!(manager.take_onboarding().unwrap());
        assert!(!manager.take_onboarding().unwrap());
        assert!(manager.path().exists());

        let reopened = StateManager::new(dir.path().join(".lintree/state.json"));
        assert!(reopened.load().unwrap().onboarding_shown);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, r#"{"onboarding_shown": true, "later": 1}"#).unwrap();
        assert!(StateManager::new(path).load().unwrap().onboarding_shown);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(StateManager::new(path).load().is_err());
    }
}
