//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{assert_json, assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;
use serde_json::json;

async fn create_user(server: &TestServer, name: &str) -> (i64, CreateUserRequest) {
    let request = CreateUserRequest::unique(name);
    let response = server.post("/api/v1/users", &request).await.unwrap();
    let created: CreatedUserResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    (created.user_id, request)
}

/// Two users who liked each other: (a, b, match_id, chat_id)
async fn matched_pair(server: &TestServer) -> (i64, i64, i64, i64) {
    let (a, _) = create_user(server, "alice").await;
    let (b, _) = create_user(server, "bob").await;

    server
        .post("/api/v1/swipes", &SwipeRequest::like(a, b))
        .await
        .unwrap();
    let response = server
        .post("/api/v1/swipes", &SwipeRequest::like(b, a))
        .await
        .unwrap();
    let swipe: SwipeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let match_id = swipe.match_id.expect("reciprocal like should match");

    let response = server.get(&format!("/api/v1/chats/{a}")).await.unwrap();
    let chats: Vec<ChatResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    let chat = chats
        .iter()
        .find(|c| c.match_id == match_id)
        .expect("match should own a chat");

    (a, b, match_id, chat.chat_id)
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// User & Auth Tests
// ============================================================================

#[tokio::test]
async fn test_create_user_and_duplicate_email() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (user_id, request) = create_user(&server, "carol").await;
    assert!(user_id > 0);

    let duplicate = CreateUserRequest {
        username: None,
        ..request
    };
    let response = server.post("/api/v1/users", &duplicate).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.message, "Email already exists");
}

#[tokio::test]
async fn test_weak_password_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = CreateUserRequest {
        password: "password".to_string(),
        ..CreateUserRequest::unique("dave")
    };
    let response = server.post("/api/v1/users", &request).await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_login_me_logout() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (user_id, request) = create_user(&server, "erin").await;

    let response = server
        .post("/api/v1/auth/login", &LoginRequest::from_user(&request))
        .await
        .unwrap();
    let login: LoginResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(login.token_type, "bearer");
    assert_eq!(login.user_id, user_id);

    let response = server
        .get_auth("/api/v1/auth/me", &login.access_token)
        .await
        .unwrap();
    let me: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.user_id, user_id);
    assert_eq!(me.email, request.email);

    let response = server
        .post_auth("/api/v1/auth/logout", &login.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    // The revoked token no longer authenticates
    let response = server
        .get_auth("/api/v1/auth/me", &login.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_login_invalid_credentials() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, request) = create_user(&server, "frank").await;
    let login = LoginRequest {
        email: request.email,
        password: "Wr0ng!Password".to_string(),
    };

    let response = server.post("/api/v1/auth/login", &login).await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

// ============================================================================
// Match Engine Tests
// ============================================================================

#[tokio::test]
async fn test_single_like_registers_without_match() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (a, _) = create_user(&server, "gina").await;
    let (b, _) = create_user(&server, "hugo").await;

    let response = server
        .post("/api/v1/swipes", &SwipeRequest::like(a, b))
        .await
        .unwrap();
    let swipe: SwipeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(swipe.message, "Swipe registered");
    assert!(swipe.match_id.is_none());

    let response = server.get(&format!("/api/v1/matches/{a}")).await.unwrap();
    let matches: Vec<MatchResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(matches.is_empty());
}

#[tokio::test]
async fn test_reciprocal_like_creates_one_match_and_chat() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (a, b, match_id, _) = matched_pair(&server).await;

    // Liking again never produces a second match
    let response = server
        .post("/api/v1/swipes", &SwipeRequest::like(a, b))
        .await
        .unwrap();
    let again: SwipeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(again.match_id.is_none());

    for user in [a, b] {
        let response = server.get(&format!("/api/v1/matches/{user}")).await.unwrap();
        let matches: Vec<MatchResponse> = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].match_id, match_id);
        assert!(matches[0].user1_id < matches[0].user2_id);

        let response = server.get(&format!("/api/v1/chats/{user}")).await.unwrap();
        let chats: Vec<ChatResponse> = assert_json(response, StatusCode::OK).await.unwrap();
        assert_eq!(chats.len(), 1);
        assert_eq!(chats[0].other_user_id, if user == a { b } else { a });
    }
}

#[tokio::test]
async fn test_match_notifies_both_users() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (a, b, _, _) = matched_pair(&server).await;

    for (user, other) in [(a, b), (b, a)] {
        let response = server
            .get(&format!("/api/v1/notifications/{user}"))
            .await
            .unwrap();
        let notifications: Vec<NotificationResponse> =
            assert_json(response, StatusCode::OK).await.unwrap();
        let matched = notifications
            .iter()
            .find(|n| n.kind == "match")
            .expect("match notification");
        assert_eq!(matched.related_user_id, Some(other));
        assert!(!matched.is_read);
    }
}

#[tokio::test]
async fn test_self_swipe_is_rejected() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (a, _) = create_user(&server, "ivy").await;

    let response = server
        .post("/api/v1/swipes", &SwipeRequest::like(a, a))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_swipe_on_unknown_user_is_not_found() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (a, _) = create_user(&server, "jack").await;

    let response = server
        .post("/api/v1/swipes", &SwipeRequest::dislike(a, i64::from(i32::MAX)))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_unmatch_removes_match_and_chat() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (a, b, match_id, chat_id) = matched_pair(&server).await;

    let response = server
        .delete(&format!("/api/v1/matches/{match_id}"))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get(&format!("/api/v1/matches/{a}")).await.unwrap();
    let matches: Vec<MatchResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(matches.is_empty());

    let response = server
        .get(&format!("/api/v1/chats/{chat_id}/info"))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    // Both likes were retracted, so a new reciprocal like matches again
    server
        .post("/api/v1/swipes", &SwipeRequest::like(a, b))
        .await
        .unwrap();
    let response = server
        .post("/api/v1/swipes", &SwipeRequest::like(b, a))
        .await
        .unwrap();
    let swipe: SwipeResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(swipe.match_id.is_some());
}

// ============================================================================
// Message Tests
// ============================================================================

#[tokio::test]
async fn test_send_and_list_messages() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (a, b, _, chat_id) = matched_pair(&server).await;

    let request = SendMessageRequest {
        chat_id,
        sender_id: a,
        content: "Hi there".to_string(),
    };
    let response = server.post("/api/v1/messages", &request).await.unwrap();
    let sent: ChatMessageResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(sent.content, "Hi there");
    assert!(!sent.is_read);

    let response = server
        .get(&format!("/api/v1/messages/{chat_id}?limit=10"))
        .await
        .unwrap();
    let messages: Vec<ChatMessageResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0].sender_id, a);

    let response = server
        .get(&format!("/api/v1/messages/{chat_id}/count"))
        .await
        .unwrap();
    let count: CountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.count, 1);

    // The other participant got a message notification
    let response = server
        .get(&format!("/api/v1/notifications/{b}/unread"))
        .await
        .unwrap();
    let unread: Vec<NotificationResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(unread
        .iter()
        .any(|n| n.kind == "message" && n.related_user_id == Some(a)));

    let response = server
        .put_empty(&format!("/api/v1/messages/chat/{chat_id}/read-all?user_id={b}"))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_outsider_cannot_post_to_chat() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, _, _, chat_id) = matched_pair(&server).await;
    let (outsider, _) = create_user(&server, "mallory").await;

    let request = SendMessageRequest {
        chat_id,
        sender_id: outsider,
        content: "let me in".to_string(),
    };
    let response = server.post("/api/v1/messages", &request).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::NOT_FOUND).await.unwrap();
    assert_eq!(error.error.message, "Chat not found or user not authorized");
}

// ============================================================================
// Profile & Discovery Tests
// ============================================================================

#[tokio::test]
async fn test_profile_roundtrip_and_discovery() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (seeker, _) = create_user(&server, "nina").await;
    let (near, _) = create_user(&server, "oscar").await;
    let (far, _) = create_user(&server, "olga").await;
    let (lat, lon) = unique_spot();

    for (user, age, gender, lat, lon) in [
        (seeker, 30, "female", lat, lon),
        (near, 31, "male", lat + 0.002, lon),
        (far, 32, "male", lat + 0.5, lon),
    ] {
        let response = server
            .put(
                &format!("/api/v1/profiles/{user}"),
                &ProfileRequest::located(age, gender, lat, lon),
            )
            .await
            .unwrap();
        assert_status(response, StatusCode::OK).await.unwrap();
    }

    let response = server
        .put(
            &format!("/api/v1/preferences/{seeker}"),
            &json!({
                "preferred_gender": "both",
                "age_min": 18,
                "age_max": 60,
                "max_distance_km": 5
            }),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get(&format!("/api/v1/profiles/discover/{seeker}?limit=50"))
        .await
        .unwrap();
    let candidates: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(candidates.iter().any(|c| c["user_id"] == near));
    assert!(candidates.iter().all(|c| c["user_id"] != seeker));
    assert!(candidates.iter().all(|c| c["user_id"] != far));

    // Once swiped, a candidate is no longer offered
    server
        .post("/api/v1/swipes", &SwipeRequest::dislike(seeker, near))
        .await
        .unwrap();
    let response = server
        .get(&format!("/api/v1/profiles/discover/{seeker}?limit=50"))
        .await
        .unwrap();
    let candidates: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(candidates.iter().all(|c| c["user_id"] != near));
}

#[tokio::test]
async fn test_discovery_requires_location() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (user, _) = create_user(&server, "paul").await;

    let response = server
        .get(&format!("/api/v1/profiles/discover/{user}"))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.message, "User location not set");
}

// ============================================================================
// Safety Tests
// ============================================================================

#[tokio::test]
async fn test_block_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (a, _) = create_user(&server, "quinn").await;
    let (b, _) = create_user(&server, "rita").await;

    let response = server
        .post("/api/v1/blocks", &json!({"blocker_id": a, "blocked_id": a}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let block = json!({"blocker_id": a, "blocked_id": b});
    let response = server.post("/api/v1/blocks", &block).await.unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server.post("/api/v1/blocks", &block).await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::CONFLICT).await.unwrap();
    assert_eq!(error.error.message, "User already blocked");

    // Blocking is checked in either direction
    let response = server
        .get(&format!("/api/v1/blocks/check/{b}/{a}"))
        .await
        .unwrap();
    let check: BlockCheckResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(check.blocked);

    let response = server
        .delete(&format!("/api/v1/blocks/user/{a}/{b}"))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get(&format!("/api/v1/blocks/check/{a}/{b}"))
        .await
        .unwrap();
    let check: BlockCheckResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(!check.blocked);
}

#[tokio::test]
async fn test_profile_view_notifies_viewed_user() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (viewer, _) = create_user(&server, "sam").await;
    let (viewed, _) = create_user(&server, "tess").await;

    let response = server
        .post("/api/v1/views", &json!({"viewer_id": viewer, "viewed_id": viewer}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .post("/api/v1/views", &json!({"viewer_id": viewer, "viewed_id": viewed}))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();

    let response = server
        .get(&format!("/api/v1/views/{viewed}/count"))
        .await
        .unwrap();
    let count: CountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(count.count, 1);

    let response = server
        .get(&format!("/api/v1/notifications/{viewed}"))
        .await
        .unwrap();
    let notifications: Vec<NotificationResponse> =
        assert_json(response, StatusCode::OK).await.unwrap();
    assert!(notifications
        .iter()
        .any(|n| n.kind == "view" && n.related_user_id == Some(viewer)));
}

// ============================================================================
// Tag Tests
// ============================================================================

async fn create_tag(server: &TestServer, name: &str) -> TagResponse {
    let response = server
        .post("/api/v1/tags", &json!({ "name": name }))
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

async fn assign_tag(server: &TestServer, user_id: i64, tag_id: i64) {
    let response = server
        .post(
            "/api/v1/tags/assign",
            &json!({"user_id": user_id, "tag_id": tag_id}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

async fn place(server: &TestServer, user: i64, age: i32, lat: f64, lon: f64) {
    let response = server
        .put(
            &format!("/api/v1/profiles/{user}"),
            &ProfileRequest::located(age, "male", lat, lon),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_tag_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (user, _) = create_user(&server, "uma").await;
    let suffix = unique_suffix();

    let tag = create_tag(&server, &format!("#Hike{suffix}")).await;
    assert_eq!(tag.name, format!("hike{suffix}"));

    let response = server
        .post("/api/v1/tags", &json!({ "name": format!("hike{suffix}") }))
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server
        .get(&format!("/api/v1/tags/{}", tag.tag_id))
        .await
        .unwrap();
    let fetched: TagResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(fetched.name, tag.name);

    assign_tag(&server, user, tag.tag_id).await;
    let assignment = json!({"user_id": user, "tag_id": tag.tag_id});
    let response = server.post("/api/v1/tags/assign", &assignment).await.unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server
        .get(&format!("/api/v1/tags/user/{user}"))
        .await
        .unwrap();
    let owned: UserTagsResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(owned.user_id, user);
    assert!(owned.tags.iter().any(|t| t.tag_id == tag.tag_id));

    let response = server
        .get(&format!("/api/v1/tags/search/{suffix}"))
        .await
        .unwrap();
    let found: Vec<TagResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].tag_id, tag.tag_id);

    let response = server.get("/api/v1/tags/popular?limit=100").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .delete_json("/api/v1/tags/unassign", &assignment)
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    let response = server
        .delete_json("/api/v1/tags/unassign", &assignment)
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .delete(&format!("/api/v1/tags/{}", tag.tag_id))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    let response = server
        .get(&format!("/api/v1/tags/{}", tag.tag_id))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .post(
            "/api/v1/tags/assign",
            &json!({"user_id": user, "tag_id": tag.tag_id}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_discovery_and_search_narrow_by_tag() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (seeker, _) = create_user(&server, "vera").await;
    let (tagged, _) = create_user(&server, "walt").await;
    let (plain, _) = create_user(&server, "will").await;
    let (lat, lon) = unique_spot();
    place(&server, seeker, 30, lat, lon).await;
    place(&server, tagged, 34, lat + 0.002, lon).await;
    place(&server, plain, 26, lat, lon + 0.002).await;

    let tag = create_tag(&server, &format!("climb{}", unique_suffix())).await;
    assign_tag(&server, seeker, tag.tag_id).await;
    assign_tag(&server, tagged, tag.tag_id).await;

    let response = server
        .get(&format!(
            "/api/v1/profiles/discover/{seeker}?limit=50&tags={}",
            tag.name
        ))
        .await
        .unwrap();
    let candidates: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0]["user_id"], tagged);
    assert_eq!(candidates[0]["common_tags"], json!([tag.name]));

    // Without a tag both neighbours come back, youngest first
    let response = server
        .get(&format!(
            "/api/v1/users/search?current_user_id={seeker}&max_distance_km=5&sort_by=age"
        ))
        .await
        .unwrap();
    let found: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    let ids: Vec<_> = found
        .iter()
        .map(|c| c["user_id"].clone())
        .filter(|id| *id == plain || *id == tagged)
        .collect();
    assert_eq!(ids, vec![json!(plain), json!(tagged)]);

    let response = server
        .get(&format!(
            "/api/v1/users/search?current_user_id={seeker}&max_distance_km=5&tags={}&tags=none",
            tag.name
        ))
        .await
        .unwrap();
    let found: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(found[0]["user_id"], tagged);

    let response = server
        .get(&format!(
            "/api/v1/users/search?current_user_id={seeker}&age_min=40&age_max=20"
        ))
        .await
        .unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(
        error.error.message,
        "Minimum age cannot be greater than maximum age"
    );

    let response = server.get("/api/v1/users/search?age_min=20").await.unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

#[tokio::test]
async fn test_top_fame_lists_nearby_users() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (seeker, _) = create_user(&server, "xena").await;
    let (near, _) = create_user(&server, "yuri").await;
    let (lat, lon) = unique_spot();
    place(&server, seeker, 29, lat, lon).await;
    place(&server, near, 31, lat + 0.001, lon).await;

    let response = server
        .get(&format!("/api/v1/users/top-fame/{seeker}"))
        .await
        .unwrap();
    let ranked: Vec<serde_json::Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(ranked.iter().any(|c| c["user_id"] == near));
    assert!(ranked.iter().all(|c| c["user_id"] != seeker));
}

// ============================================================================
// User Update & Status Tests
// ============================================================================

#[tokio::test]
async fn test_user_update() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (user, request) = create_user(&server, "zack").await;
    let (_, other) = create_user(&server, "zoe").await;

    let response = server
        .put(&format!("/api/v1/users/{user}"), &json!({"name": "Zachary"}))
        .await
        .unwrap();
    let updated: UserResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.name, "Zachary");
    assert_eq!(updated.email, request.email);

    let response = server
        .put(&format!("/api/v1/users/{user}"), &json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();

    let response = server
        .put(&format!("/api/v1/users/{user}"), &json!({"email": other.email}))
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server
        .put("/api/v1/users/999999999", &json!({"name": "Nobody"}))
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_online_status() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (user, request) = create_user(&server, "adam").await;
    let (other, _) = create_user(&server, "beth").await;

    let response = server
        .put("/api/v1/status/online", &json!({"is_online": true}))
        .await
        .unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();

    let response = server
        .post("/api/v1/auth/login", &LoginRequest::from_user(&request))
        .await
        .unwrap();
    let login: LoginResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let response = server
        .put_auth(
            "/api/v1/status/online",
            &login.access_token,
            &json!({"is_online": true}),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get(&format!("/api/v1/status/{user}"))
        .await
        .unwrap();
    let status: UserStatusResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(status.is_online);

    let response = server
        .get(&format!("/api/v1/status/batch?user_ids={user},{other}"))
        .await
        .unwrap();
    let batch: Vec<UserStatusResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(batch.len(), 2);
    assert!(batch.iter().any(|s| s.user_id == other && !s.is_online));

    let response = server.get("/api/v1/status/batch?user_ids=1,x").await.unwrap();
    let error: ErrorResponse = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(error.error.message, "Invalid user IDs format");

    let response = server.get("/api/v1/status/online/users").await.unwrap();
    let online: Vec<UserStatusResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(online.iter().any(|s| s.user_id == user));

    let response = server.get("/api/v1/status/999999999").await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}
