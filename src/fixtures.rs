//! 测试用的公共数据与构造函数

use crate::api::HomepageApi;
use crate::request::MockHttpClient;
use crate::session::SessionStore;
use crate::storage::MemoryTokenStore;
use serde_json::{Value, json};

pub const BASE: &str = "https://home.test";
pub const TOKEN_KEY: &str = "tabhome_token";

pub fn url(path: &str) -> String {
    format!("{BASE}{path}")
}

pub fn user_json() -> Value {
    json!({
        "id": "u1",
        "name": "rahim",
        "email": "rahim@example.com",
        "created_at": "2024-03-01T10:00:00",
        "preferences": {
            "theme": "dark",
            "default_search_engine": "google",
            "clock_format": "12h",
            "language": "bn"
        }
    })
}

pub fn bookmark_json(id: &str, title: &str, url: &str, category: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "url": url,
        "icon": "🔗",
        "category": category,
        "order": 0,
        "created_at": "2024-03-01T10:00:00"
    })
}

pub fn api(client: &MockHttpClient) -> HomepageApi<MockHttpClient> {
    HomepageApi::new(client.clone(), BASE)
}

pub fn session(
    client: &MockHttpClient,
    tokens: &MemoryTokenStore,
) -> SessionStore<MockHttpClient, MemoryTokenStore> {
    SessionStore::new(api(client), tokens.clone(), TOKEN_KEY)
}

/// 已登录的会话：令牌 `tok`，用户来自 `user_json`
pub async fn signed_in(client: &MockHttpClient) -> SessionStore<MockHttpClient, MemoryTokenStore> {
    use crate::request::HttpMethod;

    client.mock_response(HttpMethod::Get, &url("/api/user"), 200, user_json());
    let store = session(client, &MemoryTokenStore::with_item(TOKEN_KEY, "tok"));
    store.rehydrate().await;
    assert!(store.is_authenticated());
    store
}
