use serde::{Deserialize, Serialize};

/// What the frontend sends to create a post. The image travels as
/// base64, optionally with a `data:image/...;base64,` prefix.
#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub image_data: String,
    pub file_name: String,
    pub content_type: String,
}

/// One feed card as rendered by the client.
#[derive(Debug, Serialize)]
pub struct FeedCardOut {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    /// ISO 8601
    pub posted_at: String,
}
