use serde::{Deserialize, Serialize};

/// Plugin configuration, read from `plugins > webshare` in `tauri.conf.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// URL schemes a shared `url` may use.
    pub url_schemes: Vec<String>,
    /// Reject requests that carry neither `url` nor `text`.
    pub require_content: bool,
    /// Reject requests from a window that is known to be unfocused.
    pub require_focus: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url_schemes: vec!["http".to_string(), "https".to_string()],
            require_content: true,
            require_focus: true,
        }
    }
}

impl Config {
    pub fn allows_scheme(&self, scheme: &str) -> bool {
        self.url_schemes
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(scheme))
    }
}
