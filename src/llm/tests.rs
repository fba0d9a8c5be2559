use super::*;
use crate::config::Config;
use crate::error::InterpretError;
use mockito::Matcher;
use serde_json::json;
use std::time::{Duration, Instant};
use tokio::net::TcpListener;

#[test]
fn request_body_carries_fixed_fields() {
    let body = serde_json::to_value(ChatMessageRequest::blocking("prompt", "geometry_user")).unwrap();
    assert_eq!(
        body,
        json!({
            "query": "prompt",
            "response_mode": "blocking",
            "user": "geometry_user",
            "inputs": {},
            "auto_generate_name": false
        })
    );
}

#[tokio::test]
async fn posts_prompt_with_bearer_token() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/chat-messages")
        .match_header("authorization", "Bearer app-test-key")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({
            "query": "描述一个球体",
            "response_mode": "blocking",
            "user": "geometry_user",
            "inputs": {},
            "auto_generate_name": false
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"event": "message", "answer": "{\"geometryType\": \"球体\"}"}"#)
        .create_async()
        .await;

    let config = Config::new(format!("{}/v1/", server.url()), "app-test-key");
    let client = ChatMessagesClient::new(&config).unwrap();
    let answer = client.complete("描述一个球体").await.unwrap();

    assert_eq!(answer, r#"{"geometryType": "球体"}"#);
    mock.assert_async().await;
}

#[tokio::test]
async fn error_status_surfaces_remote_message() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat-messages")
        .with_status(400)
        .with_header("content-type", "application/json")
        .with_body(r#"{"code": "invalid_param", "message": "query is required", "status": 400}"#)
        .create_async()
        .await;

    let client = ChatMessagesClient::new(&Config::new(server.url(), "key")).unwrap();
    let err = client.complete("q").await.unwrap_err();

    match err {
        InterpretError::Remote { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "query is required");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn success_without_answer_is_a_shape_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", "/chat-messages")
        .with_status(200)
        .with_body(r#"{"conversation_id": "abc"}"#)
        .create_async()
        .await;

    let client = ChatMessagesClient::new(&Config::new(server.url(), "key")).unwrap();
    let err = client.complete("q").await.unwrap_err();
    assert!(matches!(err, InterpretError::ResponseShape { .. }));
}

#[tokio::test]
async fn slow_server_is_reported_as_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        // accept and hold the connection without ever answering
        if let Ok((socket, _)) = listener.accept().await {
            tokio::time::sleep(Duration::from_secs(5)).await;
            drop(socket);
        }
    });

    let config =
        Config::new(format!("http://{}", addr), "key").with_timeout(Duration::from_millis(200));
    let client = ChatMessagesClient::new(&config).unwrap();

    let start = Instant::now();
    let err = client.complete("q").await.unwrap_err();

    assert!(err.is_timeout(), "expected timeout, got {:?}", err);
    assert!(start.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn refused_connection_is_not_a_timeout() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ChatMessagesClient::new(&Config::new(format!("http://{}", addr), "key")).unwrap();
    let err = client.complete("q").await.unwrap_err();

    assert!(
        matches!(err, InterpretError::Transport { timeout: false, .. }),
        "expected connection failure, got {:?}",
        err
    );
}
