//! In-memory stand-ins for the store ports, shared by unit tests.
//! Every call is recorded so tests can assert what was (not) reached.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;

use crate::models::post::{NewPost, Post};
use crate::repositories::post_repository::{PostRepo, RepoError};
use crate::repositories::storage_repository::{MediaStore, StorageError};

pub fn sample_post(id: i64, title: &str) -> Post {
    Post {
        id,
        title: title.to_string(),
        image_url: format!("https://cdn.test/public/{id}.jpg"),
        storage_path: format!("public/{id}.jpg"),
        created_at: Utc::now(),
    }
}

#[derive(Default)]
pub struct FakePostRepo {
    pub probe_fails: bool,
    pub list_fails: bool,
    pub insert_fails: bool,
    pub posts: Vec<Post>,
    pub list_calls: AtomicUsize,
    pub insert_calls: Mutex<Vec<NewPost>>,
}

#[async_trait]
impl PostRepo for FakePostRepo {
    async fn probe(&self) -> Result<(), RepoError> {
        if self.probe_fails {
            return Err(RepoError::Supabase("probe refused".to_string()));
        }
        Ok(())
    }

    async fn list_posts(&self) -> Result<Vec<Post>, RepoError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.list_fails {
            return Err(RepoError::Supabase("list refused".to_string()));
        }
        Ok(self.posts.clone())
    }

    async fn insert_post(&self, post: NewPost) -> Result<Post, RepoError> {
        let mut calls = self.insert_calls.lock().unwrap();
        calls.push(post.clone());
        if self.insert_fails {
            return Err(RepoError::Supabase("insert refused".to_string()));
        }
        Ok(Post {
            id: 100 + calls.len() as i64,
            title: post.title,
            image_url: post.image_url,
            storage_path: post.storage_path,
            created_at: Utc::now(),
        })
    }
}

#[derive(Default)]
pub struct FakeMediaStore {
    pub upload_fails: bool,
    pub delete_fails: bool,
    /// (path, byte length, content type)
    pub uploads: Mutex<Vec<(String, usize, String)>>,
    pub deletes: Mutex<Vec<String>>,
}

#[async_trait]
impl MediaStore for FakeMediaStore {
    async fn upload(&self, path: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        self.uploads
            .lock()
            .unwrap()
            .push((path.to_string(), bytes.len(), content_type.to_string()));
        if self.upload_fails {
            return Err(StorageError::Storage("upload refused".to_string()));
        }
        Ok(())
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://cdn.test/{path}")
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        self.deletes.lock().unwrap().push(path.to_string());
        if self.delete_fails {
            return Err(StorageError::Storage("delete refused".to_string()));
        }
        Ok(())
    }
}
