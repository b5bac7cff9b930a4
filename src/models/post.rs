use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A row of the `posts` table. Rows are created once and never updated
/// or deleted by this application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub title: String,
    pub image_url: String,
    /// Object-store key behind `image_url`. Rows written by older
    /// clients may lack it, hence the default.
    #[serde(default)]
    pub storage_path: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, Serialize)]
pub struct NewPost {
    pub title: String,
    pub image_url: String,
    pub storage_path: String,
}
