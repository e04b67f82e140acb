use super::*;
use axum::{http::StatusCode, routing::get, Json, Router};
use serde_json::json;
use tokio::net::TcpListener;

async fn spawn_posts_server(app: Router) -> anyhow::Result<String> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok(format!("http://{addr}"))
}

fn source_for(base: &str) -> HttpPostSource {
    let url = Url::parse(&format!("{base}/posts.json")).expect("url");
    HttpPostSource::new(url, Duration::from_secs(5)).expect("client")
}

#[tokio::test]
async fn fetches_posts_in_response_order() {
    let app = Router::new().route(
        "/posts.json",
        get(|| async {
            Json(json!([
                {"url": "/p1", "title": "Post One"},
                {"url": "/p2", "title": "Post Two"}
            ]))
        }),
    );
    let base = spawn_posts_server(app).await.expect("spawn server");

    let posts = source_for(&base).fetch_posts().await.expect("posts");

    assert_eq!(
        posts,
        vec![
            Post {
                url: "/p1".into(),
                title: "Post One".into()
            },
            Post {
                url: "/p2".into(),
                title: "Post Two".into()
            },
        ]
    );
}

#[tokio::test]
async fn error_status_is_fetch_failure() {
    let app = Router::new().route(
        "/posts.json",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
    );
    let base = spawn_posts_server(app).await.expect("spawn server");

    let err = source_for(&base).fetch_posts().await.expect_err("500");

    match err {
        PageError::FetchFailed { url, reason } => {
            assert!(url.ends_with("/posts.json"));
            assert!(reason.contains("500"), "reason: {reason}");
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[tokio::test]
async fn non_array_body_is_decode_failure() {
    let app = Router::new().route(
        "/posts.json",
        get(|| async { Json(json!({"p1": {"url": "/p1", "title": "Post One"}})) }),
    );
    let base = spawn_posts_server(app).await.expect("spawn server");

    let err = source_for(&base).fetch_posts().await.expect_err("object body");

    assert!(matches!(err, PageError::DecodeFailed { .. }));
}

#[tokio::test]
async fn unreachable_endpoint_is_fetch_failure() {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let err = source_for(&format!("http://{addr}"))
        .fetch_posts()
        .await
        .expect_err("refused");

    assert!(matches!(err, PageError::FetchFailed { .. }));
}

#[tokio::test]
async fn missing_source_always_fails() {
    let err = MissingPostSource.fetch_posts().await.expect_err("missing");
    assert_eq!(err.code(), shared::error::ErrorCode::FetchFailed);
}

#[test]
fn decodes_post_array_and_rejects_missing_fields() {
    let posts = decode_posts(br#"[{"url":"/p1","title":"Post One"}]"#).expect("decode");
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "Post One");

    assert!(decode_posts(br#"[{"url":"/p1"}]"#).is_err());
    assert!(decode_posts(b"not json").is_err());
}
