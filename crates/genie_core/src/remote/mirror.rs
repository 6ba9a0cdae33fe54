//! Fire-and-forget mirroring of task writes to the placeholder API.
//!
//! # Responsibility
//! - Expose the remote calls the core depends on, with every failure turned
//!   into a logged `None`.
//! - Run mirror calls on background threads so callers never wait on them.
//!
//! # Invariants
//! - Remote results are never merged into domain state.
//! - No retry, no cancellation.

use super::client::{Post, PostPayload, PostsClient};
use super::error::ApiError;
use super::transport::{HttpTransport, UreqTransport};
use log::{debug, error, info, warn};
use std::sync::Arc;

/// Background sink for task writes and the home-screen prefetch.
///
/// Every method returns immediately; outcomes are only logged.
pub trait RemoteMirror: Send + Sync {
    fn mirror_create(&self, payload: PostPayload);
    fn mirror_update(&self, id: String, payload: PostPayload);
    fn mirror_delete(&self, id: String);
    fn prefetch_posts(&self);
}

/// Mirror that drops every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopMirror;

impl RemoteMirror for NoopMirror {
    fn mirror_create(&self, _payload: PostPayload) {}
    fn mirror_update(&self, _id: String, _payload: PostPayload) {}
    fn mirror_delete(&self, _id: String) {}
    fn prefetch_posts(&self) {}
}

/// Placeholder posts API bound to one transport.
pub struct PlaceholderApi<T> {
    client: PostsClient,
    transport: Arc<T>,
}

impl<T> Clone for PlaceholderApi<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            transport: Arc::clone(&self.transport),
        }
    }
}

impl PlaceholderApi<UreqTransport> {
    /// API client over the default `ureq` transport.
    pub fn with_base_url(base_url: &str) -> Self {
        Self::new(PostsClient::new(base_url), UreqTransport::new())
    }
}

impl<T: HttpTransport> PlaceholderApi<T> {
    pub fn new(client: PostsClient, transport: T) -> Self {
        Self {
            client,
            transport: Arc::new(transport),
        }
    }

    /// Creates a post and returns its remote id, or `None` on any failure.
    pub fn create_remote_record(&self, payload: &PostPayload) -> Option<u64> {
        let result = self
            .client
            .build_create_post(payload)
            .and_then(|request| self.transport.execute(request))
            .and_then(|response| self.client.parse_create_post(response));
        let remote_id = log_outcome("remote_create", result)?;
        debug!("event=remote_create module=remote status=ok remote_id={remote_id}");
        Some(remote_id)
    }

    /// Replaces post `id`; returns `None` on any failure.
    pub fn update_remote_record(&self, id: &str, payload: &PostPayload) -> Option<()> {
        let result = self
            .client
            .build_update_post(id, payload)
            .and_then(|request| self.transport.execute(request))
            .and_then(|response| self.client.parse_update_post(response));
        log_outcome("remote_update", result)
    }

    /// Deletes post `id`; returns `None` on any failure.
    pub fn delete_remote_record(&self, id: &str) -> Option<()> {
        let result = self
            .transport
            .execute(self.client.build_delete_post(id))
            .and_then(|response| self.client.parse_delete_post(response));
        log_outcome("remote_delete", result)
    }

    /// Fetches the fixed post list; returns `None` on any failure.
    pub fn fetch_posts(&self) -> Option<Vec<Post>> {
        let result = self
            .transport
            .execute(self.client.build_list_posts())
            .and_then(|response| self.client.parse_list_posts(response));
        let posts = log_outcome("remote_fetch_posts", result)?;
        info!(
            "event=remote_fetch_posts module=remote status=ok post_count={}",
            posts.len()
        );
        Some(posts)
    }
}

impl<T: HttpTransport + 'static> RemoteMirror for PlaceholderApi<T> {
    fn mirror_create(&self, payload: PostPayload) {
        let api = self.clone();
        spawn_detached("remote_create", move || {
            api.create_remote_record(&payload);
        });
    }

    fn mirror_update(&self, id: String, payload: PostPayload) {
        let api = self.clone();
        spawn_detached("remote_update", move || {
            api.update_remote_record(id.as_str(), &payload);
        });
    }

    fn mirror_delete(&self, id: String) {
        let api = self.clone();
        spawn_detached("remote_delete", move || {
            api.delete_remote_record(id.as_str());
        });
    }

    fn prefetch_posts(&self) {
        let api = self.clone();
        spawn_detached("remote_fetch_posts", move || {
            api.fetch_posts();
        });
    }
}

fn log_outcome<V>(event: &str, result: Result<V, ApiError>) -> Option<V> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            warn!("event={event} module=remote status=error error={err}");
            None
        }
    }
}

fn spawn_detached(event: &'static str, job: impl FnOnce() + Send + 'static) {
    let spawned = std::thread::Builder::new()
        .name(format!("genie-{event}"))
        .spawn(job);
    if let Err(err) = spawned {
        error!("event={event} module=remote status=error error_code=spawn_failed error={err}");
    }
}
