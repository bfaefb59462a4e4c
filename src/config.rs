use std::path::PathBuf;

use anyhow::Context;

const DEFAULT_API_URL: &str = "https://pe-prn232-be.onrender.com";

#[derive(Clone, Debug, PartialEq)]
pub struct CloudinaryConfig {
    pub cloud_name: String,
    pub upload_preset: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    /// Base URL of the movie service including the `/api` prefix.
    pub api_base_url: String,
    pub cloudinary: Option<CloudinaryConfig>,
    pub http_timeout_secs: u64,
    pub log_dir: PathBuf,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_url = non_empty("WATCHLIST_API_URL").unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_base_url = format!("{}/api", api_url.trim_end_matches('/'));

        let cloudinary = match (non_empty("CLOUDINARY_CLOUD_NAME"), non_empty("CLOUDINARY_UPLOAD_PRESET")) {
            (Some(cloud_name), Some(upload_preset)) => Some(CloudinaryConfig { cloud_name, upload_preset }),
            _ => None,
        };

        let http_timeout_secs: u64 = match non_empty("HTTP_TIMEOUT_SECS") {
            Some(raw) => raw.parse().context("HTTP_TIMEOUT_SECS")?,
            None => 30,
        };

        let log_dir = non_empty("WATCHLIST_LOG_DIR")
            .map(PathBuf::from)
            .or_else(|| dirs::data_local_dir().map(|dir| dir.join("watchlist_tui")))
            .unwrap_or_else(|| PathBuf::from("."));

        Ok(Self { api_base_url, cloudinary, http_timeout_secs, log_dir })
    }
}
