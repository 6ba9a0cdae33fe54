//! Mock REST client for the public placeholder posts API.
//!
//! # Overview
//! Task writes are mirrored to `/posts` in the background and the home screen
//! prefetches the post list. None of it feeds back into domain state.
//!
//! # Design
//! - `PostsClient` builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network.
//! - `HttpTransport` performs the round-trip (`UreqTransport` by default).
//! - `PlaceholderApi` turns every failure into a logged `None` and implements
//!   `RemoteMirror` by running calls on detached threads.

pub mod client;
pub mod error;
pub mod http;
pub mod mirror;
pub mod transport;

pub use client::{Post, PostPayload, PostsClient, DEFAULT_BASE_URL};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use mirror::{NoopMirror, PlaceholderApi, RemoteMirror};
pub use transport::{HttpTransport, UreqTransport};
