use super::*;
use crate::fixtures::{api, bookmark_json, url};
use crate::request::{HttpMethod, MockHttpClient};
use serde_json::json;

fn board(client: &MockHttpClient) -> BookmarkBoard<MockHttpClient> {
    BookmarkBoard::new(api(client).with_token("tok"))
}

fn seeded(client: &MockHttpClient) {
    client.mock_response(
        HttpMethod::Get,
        &url("/api/bookmarks"),
        200,
        json!([
            bookmark_json("b1", "Prothom Alo", "https://prothomalo.com", "news"),
            bookmark_json("b2", "Gmail", "https://mail.google.com", "email"),
            bookmark_json("b3", "BBC Bangla", "https://bbc.com/bengali", "news"),
        ]),
    );
}

fn titles(list: &[Bookmark]) -> Vec<&str> {
    list.iter().map(|b| b.title.as_str()).collect()
}

#[tokio::test]
async fn load_fills_bookmarks_and_engines() {
    let client = MockHttpClient::new();
    seeded(&client);
    client.mock_response(
        HttpMethod::Get,
        &url("/api/search-engines"),
        200,
        json!({"google": {"name": "Google", "url": "https://www.google.com/search?q="}}),
    );
    let board = board(&client);
    assert!(board.state().loading);

    board.load().await.unwrap();

    let state = board.state();
    assert!(!state.loading);
    assert_eq!(state.bookmarks.len(), 3);
    assert!(state.engines.contains_key("google"));
    assert!(state.error.is_none());
}

#[tokio::test]
async fn engine_failure_is_not_surfaced() {
    let client = MockHttpClient::new();
    seeded(&client);
    client.mock_network_failure(HttpMethod::Get, &url("/api/search-engines"));
    let board = board(&client);

    assert!(board.load().await.is_ok());
    assert!(board.state().error.is_none());
    assert!(board.state().engines.is_empty());
}

#[tokio::test]
async fn fetch_failure_keeps_previous_list() {
    let client = MockHttpClient::new();
    seeded(&client);
    let board = board(&client);
    board.fetch_bookmarks().await.unwrap();

    client.mock_response(HttpMethod::Get, &url("/api/bookmarks"), 500, json!({"detail": "db down"}));
    let err = board.fetch_bookmarks().await.unwrap_err();

    assert_eq!(err.status_code(), 500);
    let state = board.state();
    assert_eq!(state.bookmarks.len(), 3);
    assert_eq!(state.error.as_deref(), Some(FETCH_FAILED));
    assert!(!state.loading);
}

#[tokio::test]
async fn category_filter_preserves_order() {
    let client = MockHttpClient::new();
    seeded(&client);
    let board = board(&client);
    board.fetch_bookmarks().await.unwrap();

    let keys: Vec<String> = board.categories().iter().map(|c| c.key().to_string()).collect();
    assert_eq!(keys, vec!["all", "news", "email"]);

    board.select_category(CategoryFilter::from_key("news"));
    assert_eq!(titles(&board.visible()), vec!["Prothom Alo", "BBC Bangla"]);

    board.select_category(CategoryFilter::All);
    assert_eq!(board.visible().len(), 3);
}

#[tokio::test]
async fn add_appends_server_record_and_sends_url_as_typed() {
    let client = MockHttpClient::new();
    seeded(&client);
    client.mock_response(
        HttpMethod::Post,
        &url("/api/bookmarks"),
        200,
        bookmark_json("b4", "Example", "example.com", "general"),
    );
    let board = board(&client);
    board.fetch_bookmarks().await.unwrap();

    let mut form = AddBookmarkForm::new();
    form.set_title("Example");
    form.set_url("example.com");
    let created = form.submit(&board).await.unwrap();

    assert_eq!(created.id, "b4");
    assert_eq!(board.state().bookmarks.len(), 4);
    assert_eq!(board.state().bookmarks.last().unwrap().id, "b4");

    // 请求体里是未加前缀的 URL，草稿里是规范化后的 URL
    let body = client.requests_to(HttpMethod::Post, &url("/api/bookmarks"))[0].json_body();
    assert_eq!(body["url"], "example.com");
    assert_eq!(body["icon"], "🔗");
    assert_eq!(body["category"], "general");
    assert_eq!(form.draft().url, "https://example.com");
    assert!(!form.is_submitting());
}

#[tokio::test]
async fn add_failure_leaves_list_unchanged() {
    let client = MockHttpClient::new();
    seeded(&client);
    client.mock_response(HttpMethod::Post, &url("/api/bookmarks"), 422, json!({"detail": "bad"}));
    let board = board(&client);
    board.fetch_bookmarks().await.unwrap();

    let mut form = AddBookmarkForm::new();
    form.set_title("Bad");
    form.set_url("https://bad.example");
    assert!(form.submit(&board).await.is_err());

    assert_eq!(form.error(), Some(ADD_FAILED));
    assert_eq!(board.state().bookmarks.len(), 3);
    assert_eq!(board.state().error.as_deref(), Some(ADD_FAILED));
}

#[tokio::test]
async fn form_requires_title_and_url() {
    let client = MockHttpClient::new();
    let board = board(&client);
    let mut form = AddBookmarkForm::new();
    form.set_url("example.com");

    let err = form.submit(&board).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(form.error(), Some("Title is required"));
    assert_eq!(client.request_count(), 0);
}

#[test]
fn begin_submit_blocks_double_submit() {
    let mut form = AddBookmarkForm::new();
    form.set_title("Docs");

    let pending = form.begin_submit().unwrap();
    assert!(form.is_submitting());
    assert_eq!(pending.draft().title, "Docs");
    assert!(!pending.is_submitting());
    assert!(form.begin_submit().is_none());
}

#[tokio::test]
async fn delete_removes_only_after_success() {
    let client = MockHttpClient::new();
    seeded(&client);
    client.mock_response(
        HttpMethod::Delete,
        &url("/api/bookmarks/b1"),
        200,
        json!({"message": "Bookmark deleted successfully"}),
    );
    let board = board(&client);
    board.fetch_bookmarks().await.unwrap();

    board.delete_bookmark("b1").await.unwrap();
    assert_eq!(titles(&board.state().bookmarks), vec!["Gmail", "BBC Bangla"]);
}

#[tokio::test]
async fn delete_failure_keeps_item_and_reports() {
    let client = MockHttpClient::new();
    seeded(&client);
    client.mock_response(HttpMethod::Delete, &url("/api/bookmarks/b2"), 404, json!({"detail": "Bookmark not found"}));
    let board = board(&client);
    board.fetch_bookmarks().await.unwrap();

    assert!(board.delete_bookmark("b2").await.is_err());
    let state = board.state();
    assert_eq!(state.bookmarks.len(), 3);
    assert_eq!(state.error.as_deref(), Some(DELETE_FAILED));

    board.dismiss_error();
    assert!(board.state().error.is_none());
}

#[tokio::test]
async fn stale_dismiss_keeps_newer_error() {
    let client = MockHttpClient::new();
    seeded(&client);
    client.mock_response(HttpMethod::Delete, &url("/api/bookmarks/b2"), 500, json!({"detail": "boom"}));
    client.mock_response(HttpMethod::Post, &url("/api/bookmarks"), 422, json!({"detail": "bad"}));
    let board = board(&client);
    board.fetch_bookmarks().await.unwrap();

    assert!(board.delete_bookmark("b2").await.is_err());
    let draft = NewBookmark {
        title: "Docs".into(),
        url: "https://docs.rs".into(),
        ..Default::default()
    };
    assert!(board.add_bookmark(draft).await.is_err());

    // 第一个错误的延迟关闭不影响第二个错误
    assert!(!board.dismiss_error_if(DELETE_FAILED));
    assert_eq!(board.state().error.as_deref(), Some(ADD_FAILED));

    assert!(board.dismiss_error_if(ADD_FAILED));
    assert!(board.state().error.is_none());
}

#[tokio::test]
async fn second_add_while_pending_is_busy() {
    let client = MockHttpClient::new();
    client.mock_response(
        HttpMethod::Post,
        &url("/api/bookmarks"),
        200,
        bookmark_json("b9", "Slow", "https://slow.example", "general"),
    );
    let release = client.hold(HttpMethod::Post, &url("/api/bookmarks"));
    let board = board(&client);

    let draft = NewBookmark {
        title: "Slow".into(),
        url: "https://slow.example".into(),
        ..Default::default()
    };

    let first = board.add_bookmark(draft.clone());
    let second = async {
        let result = board.add_bookmark(draft.clone()).await;
        let _ = release.send(());
        result
    };
    let (first, second) = futures::join!(first, second);

    assert!(first.is_ok());
    assert_eq!(second.unwrap_err().kind(), ErrorKind::Busy);
    assert_eq!(client.requests_to(HttpMethod::Post, &url("/api/bookmarks")).len(), 1);

    // 完成后可以再次添加
    assert!(board.add_bookmark(draft).await.is_ok());
    assert_eq!(board.state().bookmarks.len(), 2);
}

#[tokio::test]
async fn duplicate_delete_while_pending_is_busy() {
    let client = MockHttpClient::new();
    seeded(&client);
    client.mock_response(HttpMethod::Delete, &url("/api/bookmarks/b3"), 200, json!({"message": "ok"}));
    let board = board(&client);
    board.fetch_bookmarks().await.unwrap();
    let release = client.hold(HttpMethod::Delete, &url("/api/bookmarks/b3"));

    let first = board.delete_bookmark("b3");
    let second = async {
        let result = board.delete_bookmark("b3").await;
        let _ = release.send(());
        result
    };
    let (first, second) = futures::join!(first, second);

    assert!(first.is_ok());
    assert_eq!(second.unwrap_err().kind(), ErrorKind::Busy);
    assert_eq!(board.state().bookmarks.len(), 2);
}

#[test]
fn normalize_url_adds_missing_scheme() {
    assert_eq!(normalize_url("example.com"), "https://example.com");
    assert_eq!(normalize_url("http://example.com"), "http://example.com");
    assert_eq!(normalize_url("https://example.com"), "https://example.com");
}
