//! Request builder and response parser for the placeholder posts API.
//!
//! # Responsibility
//! - Build `GET/POST/PUT/DELETE /posts` requests with JSON `{title, body}`.
//! - Map response statuses and bodies to typed results.
//!
//! # Invariants
//! - `PostsClient` holds only its base URL and never performs I/O.

use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::http::{HttpMethod, HttpRequest, HttpResponse};

/// Public placeholder service the app mirrors task writes to.
pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// JSON body sent on create/update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostPayload {
    pub title: String,
    pub body: String,
}

impl PostPayload {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Post record returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
}

/// Stateless client for the posts endpoints.
#[derive(Debug, Clone)]
pub struct PostsClient {
    base_url: String,
}

impl Default for PostsClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl PostsClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    pub fn build_list_posts(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}/posts", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_post(&self, payload: &PostPayload) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}/posts", self.base_url),
            headers: json_headers(),
            body: Some(encode(payload)?),
        })
    }

    pub fn build_update_post(&self, id: &str, payload: &PostPayload) -> Result<HttpRequest, ApiError> {
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: format!("{}/posts/{id}", self.base_url),
            headers: json_headers(),
            body: Some(encode(payload)?),
        })
    }

    pub fn build_delete_post(&self, id: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: format!("{}/posts/{id}", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        check_status(&response, &[200])?;
        decode(&response)
    }

    /// Returns the server-assigned id of the created post.
    pub fn parse_create_post(&self, response: HttpResponse) -> Result<u64, ApiError> {
        check_status(&response, &[200, 201])?;
        decode::<Post>(&response).map(|post| post.id)
    }

    pub fn parse_update_post(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[200])?;
        Ok(())
    }

    pub fn parse_delete_post(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, &[200, 204])?;
        Ok(())
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn encode(payload: &PostPayload) -> Result<String, ApiError> {
    serde_json::to_string(payload).map_err(|err| ApiError::SerializationError(err.to_string()))
}

fn decode<T: serde::de::DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(response.body.as_str())
        .map_err(|err| ApiError::DeserializationError(err.to_string()))
}

fn check_status(response: &HttpResponse, accepted: &[u16]) -> Result<(), ApiError> {
    if accepted.contains(&response.status) {
        return Ok(());
    }
    if response.status == 404 {
        return Err(ApiError::NotFound);
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> PostsClient {
        PostsClient::new("http://localhost:3000/")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            body: body.to_string(),
        }
    }

    #[test]
    fn trailing_slash_is_stripped() {
        assert_eq!(client().build_list_posts().url, "http://localhost:3000/posts");
    }

    #[test]
    fn create_request_carries_json_body() {
        let req = client()
            .build_create_post(&PostPayload::new("Buy milk", "2 litres"))
            .unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/posts");
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "Buy milk");
        assert_eq!(body["body"], "2 litres");
    }

    #[test]
    fn update_and_delete_target_post_path() {
        let update = client()
            .build_update_post("1700000000000", &PostPayload::new("t", "b"))
            .unwrap();
        assert_eq!(update.method, HttpMethod::Put);
        assert_eq!(update.url, "http://localhost:3000/posts/1700000000000");

        let delete = client().build_delete_post("7");
        assert_eq!(delete.method, HttpMethod::Delete);
        assert!(delete.body.is_none());
    }

    #[test]
    fn parse_create_returns_assigned_id() {
        let id = client()
            .parse_create_post(response(201, r#"{"id":101,"title":"t","body":"b"}"#))
            .unwrap();
        assert_eq!(id, 101);
    }

    #[test]
    fn parse_update_maps_not_found_and_server_errors() {
        let err = client().parse_update_post(response(404, "")).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));

        let err = client().parse_update_post(response(500, "boom")).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_list_rejects_bad_json() {
        let err = client().parse_list_posts(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_list_reads_user_id() {
        let posts = client()
            .parse_list_posts(response(200, r#"[{"userId":1,"id":1,"title":"a","body":"b"}]"#))
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].user_id, Some(1));
    }
}
