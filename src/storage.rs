use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::models::PersistedConnection;

const CONNECTION_FILE: &str = "connection.yaml";

/// Persists wallet connection status between runs
pub struct ConnectionStore {
    state_dir: PathBuf,
}

impl ConnectionStore {
    pub fn new(state_dir: impl Into<PathBuf>) -> Self {
        ConnectionStore {
            state_dir: state_dir.into(),
        }
    }

    fn path(&self) -> PathBuf {
        self.state_dir.join(CONNECTION_FILE)
    }

    /// Load the last saved state. A missing or unreadable file means disconnected.
    pub fn load(&self) -> PersistedConnection {
        let path = self.path();
        if !path.exists() {
            return PersistedConnection::default();
        }

        match fs::read_to_string(&path)
            .map_err(anyhow::Error::from)
            .and_then(|content| Ok(serde_yaml::from_str::<PersistedConnection>(&content)?))
        {
            Ok(state) => state,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Ignoring unreadable connection state");
                PersistedConnection::default()
            }
        }
    }

    pub fn save(&self, state: &PersistedConnection) -> Result<()> {
        if !self.state_dir.exists() {
            fs::create_dir_all(&self.state_dir)?;
        }
        let content = serde_yaml::to_string(state)?;
        fs::write(self.path(), content)?;
        Ok(())
    }
}
