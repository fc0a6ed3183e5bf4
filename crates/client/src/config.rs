//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

use tower_core::FloorId;

/// Settings needed to bootstrap a session.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub data_dir: PathBuf,
    pub start_floor: FloorId,
    /// Area every loaded floor is registered under.
    pub area: String,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
    pub message_capacity: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(tower_content::SAMPLE_DATA_DIR),
            start_floor: FloorId::from("MT1"),
            area: "main".to_owned(),
            session_id: None,
            log_dir: None,
            message_capacity: 64,
        }
    }
}

impl ClientConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `TOWER_DATA_DIR` - Content directory (default: bundled sample data)
    /// - `TOWER_START_FLOOR` - Floor id to start on (default: `MT1`)
    /// - `TOWER_SESSION_ID` - Session identifier for log files (default: timestamp)
    /// - `TOWER_LOG_DIR` - Log root directory (default: platform cache dir)
    /// - `TOWER_MESSAGE_CAPACITY` - Message log capacity (default: 64)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("TOWER_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(floor) = env::var("TOWER_START_FLOOR") {
            config.start_floor = FloorId::new(floor);
        }
        config.session_id = env::var("TOWER_SESSION_ID").ok();
        config.log_dir = env::var("TOWER_LOG_DIR").ok().map(PathBuf::from);

        if let Some(capacity) = read_env::<usize>("TOWER_MESSAGE_CAPACITY") {
            config.message_capacity = capacity.max(1);
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
