use serde::{Deserialize, Serialize};

/// Which search endpoint answers chat queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchModeConfig {
    #[default]
    Local,
    Global,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatConfig {
    pub mode: SearchModeConfig,
    /// Send the session token with chat queries when signed in.
    pub attach_token: bool,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            mode: SearchModeConfig::Local,
            attach_token: true,
        }
    }
}
