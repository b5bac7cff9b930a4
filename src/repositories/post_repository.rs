// src/repositories/post_repository.rs
use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;

use crate::config::AppConfig;
use crate::models::post::{NewPost, Post};

#[derive(Debug, Error)]
pub enum RepoError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("supabase error: {0}")]
    Supabase(String),
    #[error("other: {0}")]
    Other(String),
}

/// Record-store contract for the `posts` table. Posts are insert-only;
/// there is no update or delete.
#[async_trait]
pub trait PostRepo: Send + Sync {
    /// Minimal select used purely as a connectivity check.
    async fn probe(&self) -> Result<(), RepoError>;
    /// Every post, newest first.
    async fn list_posts(&self) -> Result<Vec<Post>, RepoError>;
    /// Insert one post and return the row as the store persisted it.
    async fn insert_post(&self, post: NewPost) -> Result<Post, RepoError>;
}

/// `posts` table via Supabase (PostgREST).
#[derive(Clone)]
pub struct PostSupabaseRepo {
    client: Client,
    base_rest_url: String,
    service_role_key: String,
    anon_key: Option<String>,
}

impl PostSupabaseRepo {
    pub fn new(client: Client, cfg: &AppConfig) -> Self {
        Self {
            client,
            base_rest_url: format!("{}/rest/v1", cfg.supabase_url.trim_end_matches('/')),
            service_role_key: cfg.service_role_key.clone(),
            anon_key: cfg.anon_key.clone(),
        }
    }

    fn posts_url(&self) -> String {
        format!("{}/posts", self.base_rest_url)
    }

    fn apikey(&self) -> &str {
        // anon key when configured, service role key otherwise
        self.anon_key.as_deref().unwrap_or(&self.service_role_key)
    }
}

#[async_trait]
impl PostRepo for PostSupabaseRepo {
    async fn probe(&self) -> Result<(), RepoError> {
        let url = format!("{}?select=id&limit=1", self.posts_url());

        let resp = self
            .client
            .get(&url)
            .header("apikey", self.apikey())
            .header("Authorization", format!("Bearer {}", self.service_role_key))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(RepoError::Supabase(format!(
                "probe failed: {} -> {}",
                status.as_u16(),
                text
            )));
        }

        Ok(())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, RepoError> {
        let url = format!("{}?select=*&order=created_at.desc", self.posts_url());

        let resp = self
            .client
            .get(&url)
            .header("apikey", self.apikey())
            .header("Authorization", format!("Bearer {}", self.service_role_key))
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(RepoError::Supabase(format!(
                "list failed: {} -> {}",
                status.as_u16(),
                text
            )));
        }

        let posts: Vec<Post> = serde_json::from_str(&text)
            .map_err(|e| RepoError::Supabase(format!("invalid posts response: {} - Body: {}", e, text)))?;
        Ok(posts)
    }

    async fn insert_post(&self, post: NewPost) -> Result<Post, RepoError> {
        let resp = self
            .client
            .post(self.posts_url())
            .header("apikey", self.apikey())
            .header("Authorization", format!("Bearer {}", self.service_role_key))
            .header("Content-Type", "application/json")
            .header("Prefer", "return=representation")
            .json(&post)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(RepoError::Supabase(format!(
                "insert failed: {} -> {}",
                status.as_u16(),
                text
            )));
        }

        // PostgREST returns the representation as a one-element array
        let rows: Vec<Post> = serde_json::from_str(&text)
            .map_err(|e| RepoError::Supabase(format!("invalid insert response: {} - Body: {}", e, text)))?;
        rows.into_iter()
            .next()
            .ok_or_else(|| RepoError::Other("empty response from insert".to_string()))
    }
}
