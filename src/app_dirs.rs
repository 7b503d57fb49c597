use directories::ProjectDirs;
use std::path::PathBuf;

/// Centralized application directory resolution
pub struct AppDirs;

impl AppDirs {
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "wordtier")
            .map(|proj_dirs| proj_dirs.config_dir().join("config.json"))
            .unwrap_or_else(|| PathBuf::from("wordtier_config.json"))
    }

    pub fn frequency_cache_path() -> PathBuf {
        if let Ok(home) = std::env::var("HOME") {
            PathBuf::from(home)
                .join(".local")
                .join("share")
                .join("wordtier")
                .join("freqs.json")
        } else {
            ProjectDirs::from("", "", "wordtier")
                .map(|proj_dirs| proj_dirs.data_local_dir().join("freqs.json"))
                .unwrap_or_else(|| PathBuf::from("freqs.json"))
        }
    }
}
