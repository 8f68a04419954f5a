//! Realtime Integration Tests
//!
//! Exercise the chat and notification sockets against a server spawned in
//! process, with REST calls triggering the fan-out.
//!
//! Requires PostgreSQL and DATABASE_URL, JWT_SECRET.
//!
//! Run with: cargo test -p integration-tests --test realtime_tests

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use integration_tests::{
    assert_json, assert_silent, check_test_env, fixtures::*, next_json, test_config, TestServer,
};
use matcha_common::AppConfig;
use reqwest::StatusCode;
use serde_json::json;
use tokio_tungstenite::tungstenite::Message;

async fn create_user(server: &TestServer, name: &str) -> i64 {
    let response = server
        .post("/api/v1/users", &CreateUserRequest::unique(name))
        .await
        .unwrap();
    let created: CreatedUserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    created.user_id
}

async fn chat_between(server: &TestServer, a: i64, b: i64) -> i64 {
    server
        .post("/api/v1/swipes", &SwipeRequest::like(a, b))
        .await
        .unwrap();
    server
        .post("/api/v1/swipes", &SwipeRequest::like(b, a))
        .await
        .unwrap();
    let response = server.get(&format!("/api/v1/chats/{a}")).await.unwrap();
    let chats: Vec<ChatResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    chats[0].chat_id
}

#[tokio::test]
async fn test_like_is_pushed_to_connected_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let a = create_user(&server, "uma").await;
    let b = create_user(&server, "victor").await;
    let mut socket = server
        .connect_ws(&format!("/ws/notifications/{a}"))
        .await
        .unwrap();

    server
        .post("/api/v1/swipes", &SwipeRequest::like(b, a))
        .await
        .unwrap();

    let frame = next_json(&mut socket).await.unwrap();
    assert_eq!(frame["type"], "like");
    assert_eq!(frame["user_id"], a);
    assert_eq!(frame["related_user_id"], b);
}

#[tokio::test]
async fn test_every_connection_of_a_user_receives_the_push() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let a = create_user(&server, "wade").await;
    let b = create_user(&server, "xena").await;
    let path = format!("/ws/notifications/{a}");
    let mut phone = server.connect_ws(&path).await.unwrap();
    let mut laptop = server.connect_ws(&path).await.unwrap();

    server
        .post("/api/v1/swipes", &SwipeRequest::like(b, a))
        .await
        .unwrap();

    assert_eq!(next_json(&mut phone).await.unwrap()["type"], "like");
    assert_eq!(next_json(&mut laptop).await.unwrap()["type"], "like");
}

#[tokio::test]
async fn test_chat_frame_is_persisted_and_broadcast() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let a = create_user(&server, "yara").await;
    let b = create_user(&server, "zane").await;
    let chat_id = chat_between(&server, a, b).await;

    let path = format!("/ws/chat/{chat_id}");
    let mut sender = server.connect_ws(&path).await.unwrap();
    let mut receiver = server.connect_ws(&path).await.unwrap();

    sender
        .send(Message::Text(
            json!({"sender_id": a, "content": "hello over the wire"}).to_string(),
        ))
        .await
        .unwrap();

    for socket in [&mut sender, &mut receiver] {
        let frame = next_json(socket).await.unwrap();
        assert_eq!(frame["chat_id"], chat_id);
        assert_eq!(frame["sender_id"], a);
        assert_eq!(frame["content"], "hello over the wire");
    }

    let response = server
        .get(&format!("/api/v1/messages/{chat_id}/count"))
        .await
        .unwrap();
    let count: CountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.count, 1);
}

#[tokio::test]
async fn test_malformed_chat_frame_errors_only_to_sender() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let a = create_user(&server, "abel").await;
    let b = create_user(&server, "beth").await;
    let chat_id = chat_between(&server, a, b).await;

    let path = format!("/ws/chat/{chat_id}");
    let mut sender = server.connect_ws(&path).await.unwrap();
    let mut bystander = server.connect_ws(&path).await.unwrap();

    sender
        .send(Message::Text("not json".to_string()))
        .await
        .unwrap();
    assert_eq!(next_json(&mut sender).await.unwrap()["error"], "Invalid JSON");

    sender
        .send(Message::Text(json!({"content": "who am I"}).to_string()))
        .await
        .unwrap();
    assert_eq!(
        next_json(&mut sender).await.unwrap()["error"],
        "Invalid payload. Expected {sender_id, content}"
    );

    assert_silent(&mut bystander).await.unwrap();
}

#[tokio::test]
async fn test_outsider_frame_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let a = create_user(&server, "cora").await;
    let b = create_user(&server, "dion").await;
    let outsider = create_user(&server, "eve").await;
    let chat_id = chat_between(&server, a, b).await;

    let mut socket = server
        .connect_ws(&format!("/ws/chat/{chat_id}"))
        .await
        .unwrap();
    socket
        .send(Message::Text(
            json!({"sender_id": outsider, "content": "hi"}).to_string(),
        ))
        .await
        .unwrap();

    let frame = next_json(&mut socket).await.unwrap();
    assert_eq!(frame["error"], "Chat not found or user not authorized");

    let response = server
        .get(&format!("/api/v1/messages/{chat_id}/count"))
        .await
        .unwrap();
    let count: CountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.count, 0);
}

#[tokio::test]
async fn test_notification_frame_is_stored_and_pushed() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let a = create_user(&server, "fern").await;
    let mut socket = server
        .connect_ws(&format!("/ws/notifications/{a}"))
        .await
        .unwrap();

    socket
        .send(Message::Text(
            json!({"type": "system", "content": "Welcome aboard"}).to_string(),
        ))
        .await
        .unwrap();

    let frame = next_json(&mut socket).await.unwrap();
    assert_eq!(frame["type"], "system");
    assert_eq!(frame["content"], "Welcome aboard");

    let response = server
        .get(&format!("/api/v1/notifications/{a}"))
        .await
        .unwrap();
    let stored: Vec<NotificationResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(stored.iter().any(|n| n.content == "Welcome aboard"));
}

#[tokio::test]
async fn test_blank_notification_frame_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let a = create_user(&server, "gale").await;
    let mut socket = server
        .connect_ws(&format!("/ws/notifications/{a}"))
        .await
        .unwrap();

    socket
        .send(Message::Text(
            json!({"type": "system", "content": ""}).to_string(),
        ))
        .await
        .unwrap();

    let frame = next_json(&mut socket).await.unwrap();
    assert_eq!(frame["error"], "Invalid payload. Expected {type, content}");

    let response = server
        .get(&format!("/api/v1/notifications/{a}/count"))
        .await
        .unwrap();
    let counts: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(counts["total"], 0);
}

fn short_idle_config() -> AppConfig {
    let mut config = test_config().unwrap();
    config.realtime.idle_timeout_secs = 1;
    config
}

#[tokio::test]
async fn test_listener_receiving_pushes_outlives_idle_timeout() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start_with_config(short_idle_config())
        .await
        .expect("Failed to start server");
    let a = create_user(&server, "hugo").await;
    let b = create_user(&server, "iris").await;
    let mut socket = server
        .connect_ws(&format!("/ws/notifications/{a}"))
        .await
        .unwrap();

    // Pushes keep arriving for well past the one-second idle timeout
    for round in 0..12 {
        let swipe = if round % 2 == 0 {
            SwipeRequest::like(b, a)
        } else {
            SwipeRequest::dislike(b, a)
        };
        server.post("/api/v1/swipes", &swipe).await.unwrap();

        let frame = next_json(&mut socket).await.unwrap();
        assert_eq!(frame["user_id"], a);
        tokio::time::sleep(Duration::from_millis(250)).await;
    }
}

#[tokio::test]
async fn test_silent_listener_is_closed_after_idle_timeout() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start_with_config(short_idle_config())
        .await
        .expect("Failed to start server");
    let a = create_user(&server, "jude").await;
    let mut socket = server
        .connect_ws(&format!("/ws/notifications/{a}"))
        .await
        .unwrap();

    let closed = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match socket.next().await {
                None | Some(Ok(Message::Close(_)) | Err(_)) => break,
                Some(Ok(_)) => continue,
            }
        }
    })
    .await;
    assert!(closed.is_ok(), "idle socket was not closed");
}
