use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use forumhub::{
    AppState, create_app,
    config::Config,
    models::Category,
    seed::{Seed, SeedPost},
};
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use tower::ServiceExt;

fn category(id: &str, name: &str) -> Category {
    Category {
        id: id.to_string(),
        name: name.to_string(),
        description: String::new(),
        icon: String::new(),
        color: String::new(),
    }
}

fn app_with(seed: Seed) -> Router {
    create_app(AppState::new(Config::default(), seed))
}

fn app() -> Router {
    app_with(Seed::with_categories(vec![
        category("1", "General"),
        category("2", "Tech"),
    ]))
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => request
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn open_session(app: &Router) -> String {
    let (status, body) = send(app, "POST", "/api/sessions", None, None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().unwrap().to_string()
}

async fn login(app: &Router, token: &str) {
    let (status, _) = send(
        app,
        "POST",
        "/api/auth/login",
        Some(token),
        Some(json!({"username": "testuser", "password": "pass123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn routes_require_a_session_token() {
    let app = app();

    let (status, body) = send(&app, "GET", "/api/categories", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], 401);

    let (status, _) = send(&app, "GET", "/api/categories", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn login_create_vote_and_trend() {
    let app = app();
    let token = open_session(&app).await;
    login(&app, &token).await;

    let (status, post) = send(
        &app,
        "POST",
        "/api/posts",
        Some(&token),
        Some(json!({"category_id": "2", "title": "Hello", "content": "World"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(post["upvotes"], 0);
    assert_eq!(post["downvotes"], 0);
    assert_eq!(post["comments"], json!([]));
    assert_eq!(post["author"], "testuser");

    let post_id = post["id"].as_str().unwrap().to_string();
    let vote_uri = format!("/api/posts/{}/vote", post_id);
    let mut last = Value::Null;
    for _ in 0..3 {
        let (status, body) =
            send(&app, "POST", &vote_uri, Some(&token), Some(json!({"direction": "up"}))).await;
        assert_eq!(status, StatusCode::OK);
        last = body;
    }
    assert_eq!(last, json!({"upvotes": 3, "downvotes": 0, "score": 3}));

    let (_, listing) = send(&app, "GET", "/api/posts?sort=trending", Some(&token), None).await;
    assert_eq!(listing["posts"][0]["id"], post_id.as_str());

    let (_, me) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(me["thread_count"], 1);
}

#[tokio::test]
async fn wrong_password_then_create_requires_login() {
    let app = app();
    let token = open_session(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(&token),
        Some(json!({"username": "testuser", "password": "wrong"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");

    let (_, me) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(me, Value::Null);

    let (status, _) = send(
        &app,
        "POST",
        "/api/posts",
        Some(&token),
        Some(json!({"category_id": "1", "title": "Hi", "content": "There"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn empty_username_is_invalid_credentials() {
    let app = app();
    let token = open_session(&app).await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(&token),
        Some(json!({"username": "", "password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid credentials");
}

#[tokio::test]
async fn hashed_credentials_log_in_through_the_api() {
    let config = Config {
        demo_password_hash: Some(bcrypt::hash("s3cret", 4).unwrap()),
        ..Config::default()
    };
    let app = create_app(AppState::new(
        config,
        Seed::with_categories(vec![category("1", "General")]),
    ));
    let token = open_session(&app).await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(&token),
        Some(json!({"username": "testuser", "password": "pass123"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = send(
        &app,
        "POST",
        "/api/auth/login",
        Some(&token),
        Some(json!({"username": "testuser", "password": "s3cret"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["username"], "testuser");

    let (_, me) = send(&app, "GET", "/api/auth/me", Some(&token), None).await;
    assert_eq!(me["username"], "testuser");
}

#[tokio::test]
async fn sessions_do_not_share_state() {
    let app = app();
    let first = open_session(&app).await;
    let second = open_session(&app).await;
    login(&app, &first).await;

    send(
        &app,
        "POST",
        "/api/posts",
        Some(&first),
        Some(json!({"category_id": "1", "title": "Mine", "content": "only"})),
    )
    .await;

    let (_, theirs) = send(&app, "GET", "/api/posts", Some(&second), None).await;
    assert_eq!(theirs["total"], 0);
    let (_, me) = send(&app, "GET", "/api/auth/me", Some(&second), None).await;
    assert_eq!(me, Value::Null);

    let (status, _) = send(&app, "DELETE", "/api/sessions", Some(&first), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, "GET", "/api/posts", Some(&first), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn comments_and_errors_map_to_statuses() {
    let app = app();
    let token = open_session(&app).await;
    login(&app, &token).await;

    let (_, post) = send(
        &app,
        "POST",
        "/api/posts",
        Some(&token),
        Some(json!({"category_id": "1", "title": "Thread", "content": "Body"})),
    )
    .await;
    let post_id = post["id"].as_str().unwrap().to_string();

    let (status, post) = send(
        &app,
        "POST",
        &format!("/api/posts/{}/comments", post_id),
        Some(&token),
        Some(json!({"content": "First!"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(post["comments"][0]["content"], "First!");
    let comment_id = post["comments"][0]["id"].as_str().unwrap().to_string();

    let (status, votes) = send(
        &app,
        "POST",
        &format!("/api/posts/{}/comments/{}/vote", post_id, comment_id),
        Some(&token),
        Some(json!({"direction": "down"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(votes["score"], -1);

    let missing = "00000000-0000-0000-0000-000000000000";
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/posts/{}/comments", missing),
        Some(&token),
        Some(json!({"content": "lost"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/posts/{}/vote", post_id),
        Some(&token),
        Some(json!({"direction": "sideways"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/posts",
        Some(&token),
        Some(json!({"category_id": "1", "title": "  ", "content": "Body"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn replies_thread_under_their_comment() {
    let app = app();
    let token = open_session(&app).await;
    login(&app, &token).await;

    let (_, post) = send(
        &app,
        "POST",
        "/api/posts",
        Some(&token),
        Some(json!({"category_id": "1", "title": "Thread", "content": "Body"})),
    )
    .await;
    let post_id = post["id"].as_str().unwrap().to_string();

    let (_, post) = send(
        &app,
        "POST",
        &format!("/api/posts/{}/comments", post_id),
        Some(&token),
        Some(json!({"content": "Top"})),
    )
    .await;
    let parent_id = post["comments"][0]["id"].as_str().unwrap().to_string();
    assert_eq!(post["comments"][0]["parent_id"], Value::Null);

    let (status, post) = send(
        &app,
        "POST",
        &format!("/api/posts/{}/comments/{}/replies", post_id, parent_id),
        Some(&token),
        Some(json!({"content": "Agreed"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(post["comments"][1]["content"], "Agreed");
    assert_eq!(post["comments"][1]["parent_id"], parent_id.as_str());

    let missing = "00000000-0000-0000-0000-000000000000";
    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/posts/{}/comments/{}/replies", post_id, missing),
        Some(&token),
        Some(json!({"content": "lost"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Comment not found");

    send(&app, "POST", "/api/auth/logout", Some(&token), None).await;
    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/posts/{}/comments/{}/replies", post_id, parent_id),
        Some(&token),
        Some(json!({"content": "anon"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (_, post) = send(&app, "GET", &format!("/api/posts/{}", post_id), Some(&token), None).await;
    assert_eq!(post["comments"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn categories_filter_and_feed() {
    let mut seed = Seed::with_categories(vec![category("1", "General"), category("2", "Tech")]);
    seed.posts.push(SeedPost {
        category_id: "2".to_string(),
        title: "Compilers".to_string(),
        content: "Parsing is fun".to_string(),
        author: "admin".to_string(),
        upvotes: 4,
        downvotes: 0,
        tags: vec!["Rust".to_string()],
        created_at: None,
        comments: Vec::new(),
    });
    seed.posts.push(SeedPost {
        category_id: "1".to_string(),
        title: "Hello".to_string(),
        content: "Say hi".to_string(),
        author: "admin".to_string(),
        upvotes: 0,
        downvotes: 0,
        tags: Vec::new(),
        created_at: None,
        comments: Vec::new(),
    });
    let app = app_with(seed);
    let token = open_session(&app).await;

    let (_, categories) = send(&app, "GET", "/api/categories", Some(&token), None).await;
    assert_eq!(categories[0]["name"], "General");
    assert_eq!(categories[0]["post_count"], 1);
    assert_eq!(categories[1]["post_count"], 1);

    let (status, _) = send(&app, "GET", "/api/categories/9/posts", Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, feed) = send(&app, "GET", "/api/feed", Some(&token), None).await;
    assert_eq!(feed["kind"], "trending");
    assert_eq!(feed["posts"][0]["title"], "Compilers");

    let (status, _) = send(
        &app,
        "PUT",
        "/api/categories/selected",
        Some(&token),
        Some(json!({"category_id": "1"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, feed) = send(&app, "GET", "/api/feed?q=%20", Some(&token), None).await;
    assert_eq!(feed["kind"], "category");
    assert_eq!(feed["posts"][0]["title"], "Hello");

    let (_, feed) = send(&app, "GET", "/api/feed?q=PARSING", Some(&token), None).await;
    assert_eq!(feed["kind"], "search");
    assert_eq!(feed["posts"][0]["title"], "Compilers");

    let (_, results) = send(&app, "GET", "/api/search?q=hi", Some(&token), None).await;
    assert_eq!(results["count"], 1);

    let (_, tagged) = send(&app, "GET", "/api/tags/rust/posts", Some(&token), None).await;
    assert_eq!(tagged[0]["title"], "Compilers");
}
