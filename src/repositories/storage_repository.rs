// src/repositories/storage_repository.rs
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use urlencoding::encode;

use crate::config::AppConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("storage error: {0}")]
    Storage(String),
}

/// Object-store contract. Keys are derived by the caller; `delete`
/// exists only to undo an upload whose record insert failed.
#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError>;
    /// Public URL for an uploaded key. Resolution after a successful
    /// upload is assumed; this never performs I/O.
    fn public_url(&self, path: &str) -> String;
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}

/// Bucket objects via the Supabase Storage REST API.
#[derive(Clone)]
pub struct StorageSupabaseRepo {
    client: Client,
    base_url: String,
    bucket: String,
    service_role_key: String,
}

impl StorageSupabaseRepo {
    pub fn new(client: Client, cfg: &AppConfig) -> Self {
        Self {
            client,
            base_url: cfg.supabase_url.trim_end_matches('/').to_string(),
            bucket: cfg.storage_bucket.clone(),
            service_role_key: cfg.service_role_key.clone(),
        }
    }

    /// Percent-encode each segment while keeping the path structure.
    fn encode_path(path: &str) -> String {
        path.split('/')
            .map(|seg| encode(seg).into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn object_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/{}/{}",
            self.base_url,
            self.bucket,
            Self::encode_path(path)
        )
    }
}

#[async_trait]
impl MediaStore for StorageSupabaseRepo {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        let resp = self
            .client
            .post(self.object_url(path))
            .header("apikey", &self.service_role_key)
            .header("Authorization", format!("Bearer {}", self.service_role_key))
            .header("Content-Type", content_type.to_string())
            .body(bytes)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(StorageError::Storage(format!(
                "upload failed: {} -> {}",
                status.as_u16(),
                text
            )));
        }

        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{}",
            self.base_url,
            self.bucket,
            Self::encode_path(path)
        )
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let resp = self
            .client
            .delete(self.object_url(path))
            .header("apikey", &self.service_role_key)
            .header("Authorization", format!("Bearer {}", self.service_role_key))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(StorageError::Storage(format!(
                "delete failed: {} -> {}",
                status.as_u16(),
                text
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;

    fn cfg() -> AppConfig {
        AppConfig {
            supabase_url: "https://xyz.supabase.co".into(),
            service_role_key: "service-key".into(),
            anon_key: None,
            storage_bucket: "memes".into(),
            max_upload_bytes: 5 * 1024 * 1024,
            port: 8080,
            allowed_origins: String::new(),
        }
    }

    #[test]
    fn public_url_keeps_path_structure() {
        let repo = StorageSupabaseRepo::new(Client::new(), &cfg());
        assert_eq!(
            repo.public_url("public/abc123.jpg"),
            "https://xyz.supabase.co/storage/v1/object/public/memes/public/abc123.jpg"
        );
    }

    #[test]
    fn object_url_encodes_odd_segments() {
        let repo = StorageSupabaseRepo::new(Client::new(), &cfg());
        assert_eq!(
            repo.object_url("public/funny cat.png"),
            "https://xyz.supabase.co/storage/v1/object/memes/public/funny%20cat.png"
        );
    }
}
