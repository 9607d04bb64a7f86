//! tabhome 客户端核心
//!
//! 新标签页主页的浏览器端逻辑：会话、路由守卫、书签面板、偏好设置与搜索 / 时钟辅助函数。
//! 不依赖任何 UI 框架，HTTP 与令牌存储都通过 trait 注入，前端与测试各自提供实现。

pub mod api;
pub mod auth_form;
pub mod bookmarks;
pub mod clock;
pub mod config;
pub mod error;
pub mod preferences;
pub mod request;
pub mod route;
pub mod search;
pub mod session;
pub mod storage;
pub mod watch;

#[cfg(test)]
mod fixtures;

pub use api::HomepageApi;
pub use auth_form::{AuthForm, AuthMode};
pub use bookmarks::{AddBookmarkForm, BoardState, BookmarkBoard, CategoryFilter};
pub use config::ClientConfig;
pub use error::{ErrorKind, HomeError, HomeResult};
pub use preferences::{PreferenceEditor, SaveOutcome};
pub use request::{HttpClient, HttpError, HttpRequest, HttpResponse};
pub use route::{AppRoute, GuardState, RouteDecision, RouteGuard};
pub use session::{AuthOutcome, SessionState, SessionStore};
pub use storage::{MemoryTokenStore, TokenStore};

#[cfg(not(target_arch = "wasm32"))]
pub use request::ReqwestHttpClient;

// =========================================================
// 单元测试 (Unit Tests)
// =========================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{TOKEN_KEY, api, bookmark_json, session, url, user_json};
    use crate::request::{HttpMethod, MockHttpClient};
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// 守卫跟随会话状态：订阅回调里推进状态机
    fn guarded(store: &SessionStore<MockHttpClient, MemoryTokenStore>) -> Rc<RefCell<RouteGuard>> {
        let guard = Rc::new(RefCell::new(RouteGuard::new()));
        let g = guard.clone();
        store.subscribe(move |s| {
            g.borrow_mut().observe(s);
        });
        guard
    }

    #[tokio::test]
    async fn fresh_visit_is_sent_to_login() {
        let client = MockHttpClient::new();
        let store = session(&client, &MemoryTokenStore::new());
        let guard = guarded(&store);

        assert_eq!(guard.borrow().decide(AppRoute::Home), RouteDecision::Pending);
        store.rehydrate().await;
        assert_eq!(
            guard.borrow().decide(AppRoute::Home),
            RouteDecision::Redirect(AppRoute::Login)
        );
    }

    #[tokio::test]
    async fn login_then_expired_token_round_trip() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Post,
            &url("/api/login"),
            200,
            json!({"access_token": "tok", "token_type": "bearer"}),
        );
        client.mock_response(HttpMethod::Get, &url("/api/user"), 200, user_json());
        client.mock_response(
            HttpMethod::Get,
            &url("/api/bookmarks"),
            200,
            json!([bookmark_json("b1", "Gmail", "https://mail.google.com", "email")]),
        );
        let tokens = MemoryTokenStore::new();
        let store = session(&client, &tokens);
        let guard = guarded(&store);
        store.rehydrate().await;

        let mut form = AuthForm::for_route(AppRoute::Login).unwrap();
        form.set_email("rahim@example.com");
        form.set_password("secret1");
        assert!(form.submit(&store).await);
        assert_eq!(
            guard.borrow().decide(AppRoute::Home),
            RouteDecision::Render(AppRoute::Home)
        );

        let board = BookmarkBoard::new(store.api());
        board.load().await.unwrap();
        assert_eq!(board.visible().len(), 1);

        // 服务端吊销令牌后，下一次请求把会话结束，守卫回到登录页
        client.mock_response(HttpMethod::Get, &url("/api/bookmarks"), 401, json!({"detail": "expired"}));
        let err = board.fetch_bookmarks().await.unwrap_err();
        assert!(store.handle_error(&err));
        assert_eq!(tokens.get(TOKEN_KEY), None);
        assert_eq!(
            guard.borrow().decide(AppRoute::Home),
            RouteDecision::Redirect(AppRoute::Login)
        );
    }

    #[tokio::test]
    async fn public_catalog_needs_no_session() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Get,
            &url("/api/search-engines"),
            200,
            json!({"bing": {"name": "Bing", "url": "https://www.bing.com/search?q="}}),
        );

        let catalog = api(&client).search_engines().await.unwrap();
        let target = search::build_search_url(&catalog, "bing", "rust").unwrap();
        assert_eq!(target, "https://www.bing.com/search?q=rust");
    }
}
