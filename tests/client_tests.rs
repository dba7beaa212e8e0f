use serde_json::{json, Value};
use wiremock::{
    matchers::{body_json, header, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

use postame::models::{Config, PostDraft, SocialClient};
use postame::{OrderMode, PostameError};
use postame::controllers::post_controller;

fn config_for(server: &MockServer) -> Config {
    Config {
        api_base: server.uri(),
        api_key: Some("test-key".to_string()),
        timeout_secs: 5,
    }
}

fn post_json(id: u64, title: &str, created: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "body": format!("body of {}", title),
        "tags": [],
        "media": null,
        "created": created,
        "updated": created,
        "author": { "name": "ola", "email": "ola@stud.noroff.no" },
        "_count": { "comments": 0, "reactions": 0 }
    })
}

fn page(data: Vec<Value>) -> Value {
    json!({
        "data": data,
        "meta": { "isFirstPage": true, "isLastPage": true, "currentPage": 1,
                  "previousPage": null, "nextPage": null, "pageCount": 1, "totalCount": 0 }
    })
}

#[tokio::test]
async fn login_returns_session_with_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .and(body_json(json!({ "email": "ola@stud.noroff.no", "password": "hunter22" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "name": "ola",
                "email": "ola@stud.noroff.no",
                "bio": null,
                "avatar": { "url": "https://img.example/a.jpg", "alt": "" },
                "banner": { "url": "https://img.example/b.jpg", "alt": "" },
                "accessToken": "jwt-token"
            },
            "meta": {}
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = SocialClient::new(&config_for(&server)).unwrap();
    let session = client.login("ola@stud.noroff.no", "hunter22").await.unwrap();

    assert_eq!(session.access_token, "jwt-token");
    assert_eq!(session.profile.name, "ola");
}

#[tokio::test]
async fn login_failures_are_classified() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = SocialClient::new(&config_for(&server)).unwrap();
    let err = client.login("a@b.no", "wrong").await.unwrap_err();

    match err {
        PostameError::Api { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(
                message,
                "Invalid username or password or you do not have an account yet!"
            );
        }
        other => panic!("unexpected error {:?}", other),
    }
}

#[tokio::test]
async fn register_validation_message_comes_from_server() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [{ "message": "Profile already exists" }],
            "status": "Bad Request",
            "statusCode": 400
        })))
        .mount(&server)
        .await;

    let client = SocialClient::new(&config_for(&server)).unwrap();
    let err = client
        .register("ola", "ola@stud.noroff.no", "hunter22")
        .await
        .unwrap_err();

    assert_eq!(err.user_message(), "Profile already exists");
}

#[tokio::test]
async fn bad_request_without_errors_is_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(400).set_body_string("oops"))
        .mount(&server)
        .await;

    let client = SocialClient::new(&config_for(&server)).unwrap();
    let err = client.register("a", "b", "c").await.unwrap_err();

    assert_eq!(err.user_message(), "Unknown error! Please retry later.");
}

#[tokio::test]
async fn authenticated_requests_send_token_and_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/social/posts"))
        .and(query_param("_author", "true"))
        .and(header("Authorization", "Bearer jwt-token"))
        .and(header("X-Noroff-API-Key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![
            post_json(1, "Travel Tips", "2023-01-01T00:00:00.000Z"),
            post_json(2, "Cooking", "2024-06-01T00:00:00.000Z"),
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let client = SocialClient::new(&config_for(&server))
        .unwrap()
        .with_token("jwt-token");
    let posts = client.list_posts().await.unwrap();

    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0].title.as_deref(), Some("Travel Tips"));
}

#[tokio::test]
async fn feed_is_filtered_and_sorted() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/social/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![
            post_json(1, "Travel Tips", "2023-01-01T00:00:00.000Z"),
            post_json(2, "Cooking", "2024-06-01T00:00:00.000Z"),
            post_json(3, "travel again", "2025-02-01T00:00:00.000Z"),
        ])))
        .mount(&server)
        .await;

    let client = SocialClient::new(&config_for(&server)).unwrap();
    let posts = post_controller::fetch_feed(&client, "TRAVEL", OrderMode::Newest)
        .await
        .unwrap();

    let ids: Vec<u64> = posts.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![3, 1]);
}

#[tokio::test]
async fn search_encodes_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/social/posts/search"))
        .and(query_param("q", "travel & tips"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![post_json(
            9,
            "Travel & tips",
            "2023-01-01T00:00:00.000Z",
        )])))
        .expect(1)
        .mount(&server)
        .await;

    let client = SocialClient::new(&config_for(&server)).unwrap();
    let posts = client.search_posts("travel & tips").await.unwrap();
    assert_eq!(posts[0].id, 9);
}

#[tokio::test]
async fn missing_post_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/social/posts/404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "errors": [{ "message": "No post with this id" }]
        })))
        .mount(&server)
        .await;

    let client = SocialClient::new(&config_for(&server)).unwrap();
    let err = client.get_post(404).await.unwrap_err();
    assert_eq!(err.user_message(), "The requested resource was not found!");
}

#[tokio::test]
async fn create_update_and_delete() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/social/posts"))
        .and(body_json(json!({
            "title": "Hello",
            "body": "First post",
            "tags": [],
            "media": { "url": "https://img.example/1.jpg", "alt": "" }
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": post_json(10, "Hello", "2024-06-01T00:00:00.000Z"),
            "meta": {}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("PUT"))
        .and(path("/social/posts/10"))
        .and(body_json(json!({ "title": "Hello again", "tags": [] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": post_json(10, "Hello again", "2024-06-01T00:00:00.000Z"),
            "meta": {}
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/social/posts/10"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let client = SocialClient::new(&config_for(&server))
        .unwrap()
        .with_token("jwt-token");

    let draft = PostDraft::new(
        "Hello",
        Some("First post".to_string()),
        Some("https://img.example/1.jpg".to_string()),
    );
    let created = client.create_post(&draft).await.unwrap();
    assert_eq!(created.id, 10);

    let updated = client
        .update_post(10, &PostDraft::new("Hello again", None, None))
        .await
        .unwrap();
    assert_eq!(updated.title.as_deref(), Some("Hello again"));

    client.delete_post(10).await.unwrap();
}

#[tokio::test]
async fn invalid_draft_is_rejected_before_sending() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/social/posts"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = SocialClient::new(&config_for(&server)).unwrap();
    let err = client
        .create_post(&PostDraft::new("", None, None))
        .await
        .unwrap_err();
    assert!(matches!(err, PostameError::Validation(_)));
}

#[tokio::test]
async fn server_errors_are_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/social/posts/5"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = SocialClient::new(&config_for(&server)).unwrap();
    let err = client.delete_post(5).await.unwrap_err();
    assert!(matches!(err, PostameError::Api { status: 500, .. }));
    assert_eq!(err.user_message(), "Unknown error! Please retry later.");
}

#[tokio::test]
async fn profile_and_profile_posts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/social/profiles/kari"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": {
                "name": "kari",
                "email": "kari@stud.noroff.no",
                "bio": "Hiker",
                "_count": { "posts": 2, "followers": 5, "following": 3 }
            },
            "meta": {}
        })))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/social/profiles/kari/posts"))
        .and(query_param("_comments", "true"))
        .and(query_param("_reactions", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(vec![
            post_json(1, "banana", "2023-01-01T00:00:00.000Z"),
            post_json(2, "Cherry", "2023-01-02T00:00:00.000Z"),
            post_json(3, "Apple", "2023-01-03T00:00:00.000Z"),
        ])))
        .mount(&server)
        .await;

    let client = SocialClient::new(&config_for(&server)).unwrap();
    let profile = client.profile("kari").await.unwrap();
    assert_eq!(profile.count.unwrap().followers, 5);

    let posts = post_controller::fetch_profile_posts(&client, "kari", "", OrderMode::Title)
        .await
        .unwrap();
    let titles: Vec<&str> = posts.iter().map(|p| p.title_or_empty()).collect();
    assert_eq!(titles, vec!["Apple", "banana", "Cherry"]);
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let config = Config {
        api_base: "http://127.0.0.1:9".to_string(),
        api_key: None,
        timeout_secs: 2,
    };
    let client = SocialClient::new(&config).unwrap();
    let err = client.login("a@b.no", "pw").await.unwrap_err();
    assert!(matches!(err, PostameError::Network { .. }));
    assert_eq!(err.user_message(), "Could not login! Please retry later.");
}

#[tokio::test]
async fn undecodable_success_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/social/posts"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/social/posts/7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": { "title": "no id" },
            "meta": {}
        })))
        .mount(&server)
        .await;

    let client = SocialClient::new(&config_for(&server)).unwrap();

    let err = client.list_posts().await.unwrap_err();
    assert!(matches!(err, PostameError::Decode { .. }), "{:?}", err);
    assert_eq!(err.user_message(), "Could not show the posts!");

    let err = client.get_post(7).await.unwrap_err();
    assert!(matches!(err, PostameError::Decode { .. }), "{:?}", err);
    assert_eq!(err.user_message(), "Could not show the post! Please retry later.");
}

#[tokio::test]
async fn bad_request_reads_only_the_first_entry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/auth/register"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "errors": [{ "message": "Name is required" }, { "path": ["email"] }],
            "status": 400
        })))
        .mount(&server)
        .await;

    let client = SocialClient::new(&config_for(&server)).unwrap();
    let err = client.register("", "b", "c").await.unwrap_err();
    assert_eq!(err.user_message(), "Name is required");
}
