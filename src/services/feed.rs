use log::{error, info, warn};
use tokio::sync::RwLock;

use crate::models::post::Post;
use crate::repositories::post_repository::PostRepo;

/// What the client sees when the feed never loaded. The state is
/// terminal until the process restarts.
pub const FEED_UNAVAILABLE: &str = "The feed could not be loaded. Please try again later.";

#[derive(Debug, Clone)]
pub enum FeedState {
    Ready(Vec<Post>),
    Unavailable(String),
}

/// The one shared feed list. All mutation goes through `replace_all`,
/// `prepend` and `set_unavailable`; concurrent writers serialize on the
/// lock and the last write wins.
pub struct FeedStore {
    state: RwLock<FeedState>,
}

impl FeedStore {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(FeedState::Ready(Vec::new())),
        }
    }

    pub async fn snapshot(&self) -> FeedState {
        self.state.read().await.clone()
    }

    pub async fn replace_all(&self, posts: Vec<Post>) {
        *self.state.write().await = FeedState::Ready(posts);
    }

    pub async fn prepend(&self, post: Post) {
        let mut state = self.state.write().await;
        match &mut *state {
            FeedState::Ready(posts) => posts.insert(0, post),
            FeedState::Unavailable(_) => {
                warn!("feed never loaded, not listing post {}", post.id);
            }
        }
    }

    pub async fn set_unavailable(&self, reason: &str) {
        *self.state.write().await = FeedState::Unavailable(reason.to_string());
    }
}

impl Default for FeedStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Startup feed load: probe first, then one full ordered select. Either
/// failure leaves the feed unavailable for the life of the process; the
/// select is never attempted after a failed probe.
pub async fn load_feed(repo: &dyn PostRepo, feed: &FeedStore) {
    if let Err(e) = repo.probe().await {
        error!("post store unreachable: {}", e);
        feed.set_unavailable(FEED_UNAVAILABLE).await;
        return;
    }

    match repo.list_posts().await {
        Ok(posts) => {
            info!("feed loaded with {} posts", posts.len());
            feed.replace_all(posts).await;
        }
        Err(e) => {
            error!("feed load failed: {}", e);
            feed.set_unavailable(FEED_UNAVAILABLE).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;

    use super::*;
    use crate::repositories::fakes::{FakePostRepo, sample_post};

    #[tokio::test]
    async fn prepend_puts_new_post_at_the_head() {
        let feed = FeedStore::new();
        feed.replace_all(vec![sample_post(2, "older"), sample_post(1, "oldest")])
            .await;
        feed.prepend(sample_post(3, "newest")).await;

        match feed.snapshot().await {
            FeedState::Ready(posts) => {
                assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![3, 2, 1]);
            }
            FeedState::Unavailable(_) => panic!("feed should be ready"),
        }
    }

    #[tokio::test]
    async fn prepend_is_dropped_while_unavailable() {
        let feed = FeedStore::new();
        feed.set_unavailable(FEED_UNAVAILABLE).await;
        feed.prepend(sample_post(1, "lost")).await;

        assert!(matches!(feed.snapshot().await, FeedState::Unavailable(_)));
    }

    #[tokio::test]
    async fn load_replaces_state_wholesale() {
        let repo = FakePostRepo {
            posts: vec![sample_post(9, "latest"), sample_post(8, "earlier")],
            ..Default::default()
        };
        let feed = FeedStore::new();
        feed.replace_all(vec![sample_post(1, "stale")]).await;

        load_feed(&repo, &feed).await;

        match feed.snapshot().await {
            FeedState::Ready(posts) => {
                assert_eq!(posts.iter().map(|p| p.id).collect::<Vec<_>>(), vec![9, 8]);
            }
            FeedState::Unavailable(_) => panic!("feed should be ready"),
        }
    }

    #[tokio::test]
    async fn failed_probe_skips_the_select() {
        let repo = FakePostRepo {
            probe_fails: true,
            ..Default::default()
        };
        let feed = FeedStore::new();

        load_feed(&repo, &feed).await;

        assert_eq!(repo.list_calls.load(Ordering::SeqCst), 0);
        assert!(matches!(feed.snapshot().await, FeedState::Unavailable(_)));
    }

    #[tokio::test]
    async fn failed_select_marks_feed_unavailable() {
        let repo = FakePostRepo {
            list_fails: true,
            ..Default::default()
        };
        let feed = FeedStore::new();

        load_feed(&repo, &feed).await;

        assert_eq!(repo.list_calls.load(Ordering::SeqCst), 1);
        assert!(matches!(feed.snapshot().await, FeedState::Unavailable(_)));
    }
}
