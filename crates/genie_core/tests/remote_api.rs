//! Placeholder posts API against a live mock server and through the task
//! service mirror.

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, put};
use axum::{Json, Router};
use genie_core::remote::{
    ApiError, HttpMethod, HttpRequest, HttpResponse, HttpTransport, Post, PostsClient,
    UreqTransport,
};
use genie_core::{
    KvRepository, MemoryKvStore, PlaceholderApi, PostPayload, RemoteMirror, TaskDraft,
    TaskService,
};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

const NEXT_REMOTE_ID: u64 = 101;

fn mock_app() -> Router {
    Router::new()
        .route("/posts", get(list_posts).post(create_post))
        .route("/posts/{id}", put(update_post).delete(delete_post))
        .route("/headers", get(echo_headers).post(echo_headers))
}

// Echoes request headers back so tests can see what reached the wire.
async fn echo_headers(headers: HeaderMap) -> String {
    let client = headers
        .get("x-genie-client")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");
    let content_type = headers
        .get("content-type")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("-");
    format!("{client}|{content_type}")
}

async fn list_posts() -> Json<Vec<Post>> {
    Json(vec![
        Post {
            id: 1,
            title: "first".to_string(),
            body: "hello".to_string(),
            user_id: Some(1),
        },
        Post {
            id: 2,
            title: "second".to_string(),
            body: "world".to_string(),
            user_id: Some(1),
        },
    ])
}

async fn create_post(Json(input): Json<PostPayload>) -> (StatusCode, Json<Post>) {
    let post = Post {
        id: NEXT_REMOTE_ID,
        title: input.title,
        body: input.body,
        user_id: None,
    };
    (StatusCode::CREATED, Json(post))
}

// Mirrors the public service: only ids 1..=100 exist.
async fn update_post(Path(id): Path<u64>, Json(input): Json<PostPayload>) -> Result<Json<Post>, StatusCode> {
    if !(1..=100).contains(&id) {
        return Err(StatusCode::INTERNAL_SERVER_ERROR);
    }
    Ok(Json(Post {
        id,
        title: input.title,
        body: input.body,
        user_id: Some(1),
    }))
}

async fn delete_post(Path(_id): Path<u64>) -> StatusCode {
    StatusCode::OK
}

fn start_mock_server() -> String {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            axum::serve(listener, mock_app()).await
        })
        .unwrap();
    });

    format!("http://{addr}")
}

#[test]
fn posts_lifecycle_against_mock_server() {
    let base_url = start_mock_server();
    let api = PlaceholderApi::with_base_url(&base_url);
    let payload = PostPayload::new("Buy milk", "2 liters");

    let posts = api.fetch_posts().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].user_id, Some(1));

    assert_eq!(api.create_remote_record(&payload), Some(NEXT_REMOTE_ID));
    assert_eq!(api.update_remote_record("1", &payload), Some(()));
    assert_eq!(api.delete_remote_record("1"), Some(()));
}

#[test]
fn remote_failures_become_none() {
    let base_url = start_mock_server();
    let api = PlaceholderApi::with_base_url(&base_url);
    let payload = PostPayload::new("Buy milk", "");

    // Local ids are timestamps, which the placeholder service does not know.
    assert_eq!(api.update_remote_record("1700000000000", &payload), None);
    assert_eq!(api.update_remote_record("not-a-number", &payload), None);

    let unreachable = PlaceholderApi::with_base_url("http://127.0.0.1:1");
    assert_eq!(unreachable.fetch_posts(), None);
    assert_eq!(unreachable.create_remote_record(&payload), None);
}

#[test]
fn client_maps_statuses_from_live_responses() {
    let base_url = start_mock_server();
    let client = PostsClient::new(&base_url);
    let transport = UreqTransport::new();

    let response = transport
        .execute(client.build_update_post("500", &PostPayload::new("t", "b")).unwrap())
        .unwrap();
    let err = client.parse_update_post(response).unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 500, .. }));

    let response = transport
        .execute(HttpRequest {
            method: HttpMethod::Get,
            url: format!("{base_url}/missing"),
            headers: Vec::new(),
            body: None,
        })
        .unwrap();
    assert!(matches!(
        client.parse_list_posts(response),
        Err(ApiError::NotFound)
    ));
}

/// Transport that reports each request on a channel and answers `status`.
struct ChannelTransport {
    sender: Mutex<Sender<HttpRequest>>,
    status: u16,
}

impl ChannelTransport {
    fn new(status: u16) -> (Self, Receiver<HttpRequest>) {
        let (sender, receiver) = mpsc::channel();
        let transport = Self {
            sender: Mutex::new(sender),
            status,
        };
        (transport, receiver)
    }
}

impl HttpTransport for ChannelTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let _ = self.sender.lock().unwrap().send(request);
        Ok(HttpResponse {
            status: self.status,
            body: r#"{"id":101}"#.to_string(),
        })
    }
}

#[test]
fn task_writes_are_mirrored_in_the_background() {
    let (transport, requests) = ChannelTransport::new(201);
    let mirror: Arc<dyn RemoteMirror> = Arc::new(PlaceholderApi::new(
        PostsClient::new("http://mock.local"),
        transport,
    ));
    let repo = KvRepository::new(MemoryKvStore::new());
    let service = TaskService::with_mirror(&repo, mirror);

    let created = service
        .save_task(&TaskDraft::new("Buy milk"), false)
        .unwrap();
    let request = requests.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(request.method, HttpMethod::Post);
    assert_eq!(request.url, "http://mock.local/posts");
    assert_eq!(
        request.body.as_deref(),
        Some(r#"{"title":"Buy milk","body":""}"#)
    );

    let mut draft = TaskDraft::from_task(&created);
    draft.description = "2 liters".to_string();
    service.save_task(&draft, true).unwrap();
    let request = requests.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(request.method, HttpMethod::Put);
    assert_eq!(request.url, format!("http://mock.local/posts/{}", created.id));

    assert!(service.delete_task(created.id.as_str()));
    let request = requests.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(request.method, HttpMethod::Delete);
}

#[derive(Default)]
struct RecordingMirror {
    calls: Mutex<Vec<String>>,
}

impl RecordingMirror {
    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl RemoteMirror for RecordingMirror {
    fn mirror_create(&self, payload: PostPayload) {
        self.calls
            .lock()
            .unwrap()
            .push(format!("create:{}", payload.title));
    }

    fn mirror_update(&self, id: String, _payload: PostPayload) {
        self.calls.lock().unwrap().push(format!("update:{id}"));
    }

    fn mirror_delete(&self, id: String) {
        self.calls.lock().unwrap().push(format!("delete:{id}"));
    }

    fn prefetch_posts(&self) {
        self.calls.lock().unwrap().push("prefetch".to_string());
    }
}

#[test]
fn only_successful_local_writes_reach_the_mirror() {
    let mirror = Arc::new(RecordingMirror::default());
    let repo = KvRepository::new(MemoryKvStore::new());
    let service = TaskService::with_mirror(&repo, mirror.clone());

    assert!(service.save_task(&TaskDraft::new("  "), false).is_err());
    let mut ghost = TaskDraft::new("Ghost");
    ghost.id = Some("404".to_string());
    assert!(service.save_task(&ghost, true).is_err());
    assert!(!service.delete_task("404"));
    assert!(mirror.calls().is_empty());

    let created = service
        .save_task(&TaskDraft::new("Buy milk"), false)
        .unwrap();
    assert!(service.delete_task(created.id.as_str()));
    assert_eq!(
        mirror.calls(),
        vec![
            "create:Buy milk".to_string(),
            format!("delete:{}", created.id)
        ]
    );
}

#[test]
fn transport_sends_request_headers() {
    let base_url = start_mock_server();
    let transport = UreqTransport::new();

    let response = transport
        .execute(HttpRequest {
            method: HttpMethod::Get,
            url: format!("{base_url}/headers"),
            headers: vec![("x-genie-client".to_string(), "mobile".to_string())],
            body: None,
        })
        .unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "mobile|-");

    let response = transport
        .execute(HttpRequest {
            method: HttpMethod::Post,
            url: format!("{base_url}/headers"),
            headers: vec![
                ("x-genie-client".to_string(), "cli".to_string()),
                (
                    "content-type".to_string(),
                    "application/json; charset=UTF-8".to_string(),
                ),
            ],
            body: Some("{}".to_string()),
        })
        .unwrap();
    assert_eq!(response.body, "cli|application/json; charset=UTF-8");
}
