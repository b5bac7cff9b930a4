use std::sync::Arc;

use base64::{Engine as _, engine::general_purpose};
use log::{error, info};
use thiserror::Error;
use uuid::Uuid;

use crate::dtos::post_dtos::CreatePostRequest;
use crate::models::post::{NewPost, Post};
use crate::repositories::post_repository::{PostRepo, RepoError};
use crate::repositories::storage_repository::{MediaStore, StorageError};
use crate::services::feed::FeedStore;

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("Please attach an image")]
    MissingFile,
    #[error("Image is too large ({size} bytes, limit is {limit})")]
    FileTooLarge { size: usize, limit: usize },
    #[error("Please provide a caption")]
    EmptyTitle,
    #[error("Invalid base64 image data")]
    InvalidEncoding,
    #[error("Unsupported image type: {0}")]
    UnsupportedType(String),
    #[error("upload failed: {0}")]
    Upload(#[source] StorageError),
    #[error("could not save post: {0}")]
    Insert(#[source] RepoError),
}

impl SubmitError {
    /// Validation failures happen before any store call.
    pub fn is_validation(&self) -> bool {
        !matches!(self, SubmitError::Upload(_) | SubmitError::Insert(_))
    }
}

fn allowed_image_type(content_type: &str) -> bool {
    match content_type.parse::<mime::Mime>() {
        Ok(m) => {
            m.type_() == mime::IMAGE
                && matches!(m.subtype().as_str(), "jpeg" | "jpg" | "png" | "gif" | "webp")
        }
        Err(_) => false,
    }
}

fn fallback_extension(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        "image/gif" => "gif",
        "image/webp" => "webp",
        _ => "jpg",
    }
}

/// Randomized object key under `public/`, keeping the original file
/// extension. Collisions are accepted as negligible; no uniqueness
/// check is made.
fn storage_key(file_name: &str, content_type: &str) -> String {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, e)| e)
        .filter(|e| !e.is_empty() && e.len() <= 5 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| fallback_extension(content_type).to_string());
    format!("public/{}.{}", Uuid::new_v4().simple(), ext)
}

fn decode_image(data: &str) -> Result<Vec<u8>, SubmitError> {
    // strip the data-URL prefix if the client sent one
    let b64 = match data.split_once(',') {
        Some((_, rest)) => rest,
        None => data,
    };
    general_purpose::STANDARD
        .decode(b64.trim())
        .map_err(|_| SubmitError::InvalidEncoding)
}

/// Create-post flow: validate, upload, resolve the public URL, insert
/// the record, splice the stored row into the feed. Upload and insert
/// are two independent store calls with no transaction between them, so
/// an insert failure triggers a compensating delete of the upload.
pub struct PostService {
    records: Arc<dyn PostRepo>,
    media: Arc<dyn MediaStore>,
    feed: Arc<FeedStore>,
    max_upload_bytes: usize,
}

impl PostService {
    pub fn new(
        records: Arc<dyn PostRepo>,
        media: Arc<dyn MediaStore>,
        feed: Arc<FeedStore>,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            records,
            media,
            feed,
            max_upload_bytes,
        }
    }

    pub async fn submit(&self, req: CreatePostRequest) -> Result<Post, SubmitError> {
        if req.image_data.trim().is_empty() {
            return Err(SubmitError::MissingFile);
        }
        let bytes = decode_image(&req.image_data)?;
        if bytes.is_empty() {
            return Err(SubmitError::MissingFile);
        }
        if bytes.len() > self.max_upload_bytes {
            return Err(SubmitError::FileTooLarge {
                size: bytes.len(),
                limit: self.max_upload_bytes,
            });
        }
        let title = req.title.trim();
        if title.is_empty() {
            return Err(SubmitError::EmptyTitle);
        }
        if !allowed_image_type(&req.content_type) {
            return Err(SubmitError::UnsupportedType(req.content_type.clone()));
        }

        let path = storage_key(&req.file_name, &req.content_type);

        self.media
            .upload(&path, bytes, &req.content_type)
            .await
            .map_err(SubmitError::Upload)?;
        let image_url = self.media.public_url(&path);

        let created = match self
            .records
            .insert_post(NewPost {
                title: title.to_string(),
                image_url,
                storage_path: path.clone(),
            })
            .await
        {
            Ok(post) => post,
            Err(e) => {
                // undo the upload so the object does not outlive the
                // record that never happened
                if let Err(del) = self.media.delete(&path).await {
                    error!("orphaned object {}: cleanup failed: {}", path, del);
                }
                return Err(SubmitError::Insert(e));
            }
        };

        info!("post {} created ({})", created.id, created.storage_path);
        self.feed.prepend(created.clone()).await;
        Ok(created)
    }

    /// On-demand connectivity check for the health endpoint.
    pub async fn check_store(&self) -> Result<(), RepoError> {
        self.records.probe().await
    }
}
