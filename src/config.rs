use std::env;
use anyhow::{Context, Result};

const DEFAULT_MAX_UPLOAD_BYTES: usize = 5 * 1024 * 1024;

/// Runtime configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub supabase_url: String,
    pub service_role_key: String,
    pub anon_key: Option<String>,
    pub storage_bucket: String,
    /// Upload ceiling in bytes, overridable via MAX_UPLOAD_BYTES.
    pub max_upload_bytes: usize,
    pub port: u16,
    pub allowed_origins: String,
}

pub fn from_env() -> Result<AppConfig> {
    let supabase_url = env::var("SUPABASE_URL")
        .context("SUPABASE_URL not set")?
        .trim()
        .trim_end_matches('/')
        .to_string();

    let service_role_key = env::var("SUPABASE_SERVICE_ROLE_KEY")
        .context("SUPABASE_SERVICE_ROLE_KEY not set")?
        .trim()
        .to_string();

    let anon_key = env::var("SUPABASE_ANON_KEY")
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());

    let storage_bucket = env::var("STORAGE_BUCKET").unwrap_or_else(|_| "memes".into());

    let max_upload_bytes = match env::var("MAX_UPLOAD_BYTES") {
        Ok(raw) => raw
            .parse::<usize>()
            .context("MAX_UPLOAD_BYTES must be an integer")?,
        Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
    };

    // Railway-style platforms inject PORT
    let port = env::var("PORT")
        .unwrap_or_else(|_| "8080".to_string())
        .parse::<u16>()
        .context("PORT must be a valid port number")?;

    let allowed_origins = env::var("ALLOWED_ORIGINS")
        .unwrap_or_else(|_| "http://localhost:3000,http://127.0.0.1:3000".into());

    Ok(AppConfig {
        supabase_url,
        service_role_key,
        anon_key,
        storage_bucket,
        max_upload_bytes,
        port,
        allowed_origins,
    })
}
