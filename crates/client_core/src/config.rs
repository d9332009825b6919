use std::{collections::HashMap, fs};

/// Runtime configuration for the client. Only one knob exists: the API
/// root the backend is reachable under.
#[derive(Debug, Clone)]
pub struct Settings {
    pub api_root: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_root: "http://127.0.0.1:5000/api".into(),
        }
    }
}

/// Resolution order: built-in default, then `feedback.toml` in the working
/// directory, then environment variables. No rebuild required to repoint
/// the client.
pub fn load_settings() -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string("feedback.toml") {
        if let Ok(file_cfg) = toml::from_str::<HashMap<String, String>>(&raw) {
            if let Some(v) = file_cfg.get("api_root") {
                settings.api_root = v.clone();
            }
        }
    }

    if let Ok(v) = std::env::var("FEEDBACK_API_ROOT") {
        settings.api_root = v;
    }
    if let Ok(v) = std::env::var("APP__API_ROOT") {
        settings.api_root = v;
    }

    settings.api_root = normalize_api_root(&settings.api_root);
    settings
}

pub fn normalize_api_root(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Settings::default().api_root;
    }
    trimmed.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_slashes_from_api_root() {
        assert_eq!(
            normalize_api_root("http://10.0.0.2:5000/api/"),
            "http://10.0.0.2:5000/api"
        );
    }

    #[test]
    fn blank_api_root_falls_back_to_default() {
        assert_eq!(normalize_api_root("   "), Settings::default().api_root);
    }

    #[test]
    fn keeps_well_formed_api_root_unchanged() {
        assert_eq!(
            normalize_api_root("https://feedback.example.com/api"),
            "https://feedback.example.com/api"
        );
    }
}
