use anyhow::{bail, Context, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Export reports itself as unavailable.
    None,
    Markdown,
}

impl std::str::FromStr for ExportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "none" => Ok(ExportFormat::None),
            "markdown" | "md" => Ok(ExportFormat::Markdown),
            other => bail!("Unknown export format '{other}' (expected 'none' or 'markdown')"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub max_form_sessions: usize,
    /// Seconds a form may sit untouched before its slot is reclaimed.
    pub form_session_ttl_secs: u64,
    pub export_format: ExportFormat,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            max_form_sessions: std::env::var("MAX_FORM_SESSIONS")
                .unwrap_or_else(|_| "1024".to_string())
                .parse::<usize>()
                .context("MAX_FORM_SESSIONS must be a non-negative integer")?,
            form_session_ttl_secs: std::env::var("FORM_SESSION_TTL_SECS")
                .unwrap_or_else(|_| "86400".to_string())
                .parse::<u64>()
                .context("FORM_SESSION_TTL_SECS must be a non-negative integer")?,
            export_format: std::env::var("EXPORT_FORMAT")
                .unwrap_or_default()
                .parse::<ExportFormat>()
                .context("EXPORT_FORMAT is invalid")?,
        })
    }
}

impl Config {
    pub fn form_session_ttl(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.form_session_ttl_secs)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            max_form_sessions: 1024,
            form_session_ttl_secs: 86_400,
            export_format: ExportFormat::None,
        }
    }
}
