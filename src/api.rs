use crate::error::{HomeError, HomeResult};
use crate::request::{HttpClient, HttpRequest, HttpResponse};
use tabhome_shared::protocol::{
    ApiRequest, CurrentUserRequest, DeleteBookmarkRequest, ListBookmarksRequest,
    ListSearchEnginesRequest,
};
use tabhome_shared::{
    AuthResponse, BEARER_PREFIX, Bookmark, ErrorBody, HEADER_AUTHORIZATION, LoginRequest,
    MessageResponse, NewBookmark, Preferences, RegisterRequest, SearchEngineCatalog, User,
};

// =========================================================
// 认证客户端 (Authenticated Client)
// =========================================================

/// 后端 REST API 客户端
///
/// 持有可选的 bearer token，需要认证的端点会自动附带 `Authorization` 头。
/// 接受任何实现了 HttpClient 的客户端，从而解耦具体的 HTTP 实现。
#[derive(Clone, Debug, PartialEq)]
pub struct HomepageApi<C> {
    client: C,
    base_url: String,
    token: Option<String>,
}

impl<C: HttpClient> HomepageApi<C> {
    pub fn new(client: C, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn with_token(&self, token: impl Into<String>) -> Self
    where
        C: Clone,
    {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: Some(token.into()),
        }
    }

    pub fn without_token(&self) -> Self
    where
        C: Clone,
    {
        Self {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
            token: None,
        }
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 发送强类型请求并获取解析后的响应
    pub async fn send<R: ApiRequest>(&self, req: &R) -> HomeResult<R::Response> {
        let path = req.path();
        let mut http = HttpRequest::new(&self.url(&path), R::METHOD)
            .with_header("Accept", "application/json");

        if R::AUTHENTICATED {
            // 没有令牌时不发请求，直接视为会话过期
            let token = self
                .token
                .as_deref()
                .ok_or_else(|| HomeError::session_expired().in_op_with("api.send", &path))?;
            http = http.with_header(HEADER_AUTHORIZATION, &format!("{}{}", BEARER_PREFIX, token));
        }

        if R::METHOD.has_body() {
            let body = serde_json::to_string(req)
                .map_err(|e| HomeError::from(e).in_op_with("api.serialize", &path))?;
            http = http
                .with_header("Content-Type", "application/json")
                .with_body(body);
        }

        log::debug!("[api] {} {}", R::METHOD.as_str(), path);

        let resp = self
            .client
            .send(http)
            .await
            .map_err(|e| HomeError::from(e).in_op_with("api.send", &path))?;

        if !resp.is_success() {
            return Err(Self::error_from_response(&resp, R::AUTHENTICATED).in_op_with("api.send", &path));
        }

        resp.json::<R::Response>()
            .map_err(|e| HomeError::from(e).in_op_with("api.decode", &path))
    }

    /// 把非 2xx 响应转换为领域错误
    ///
    /// 401 在已认证请求上表示会话过期，在登录 / 注册上表示凭据无效。
    fn error_from_response(resp: &HttpResponse, authenticated: bool) -> HomeError {
        let detail = resp
            .json::<ErrorBody>()
            .ok()
            .and_then(|b| b.text().map(str::to_string));

        match resp.status {
            401 if authenticated => HomeError::session_expired().with_status(401),
            401 => HomeError::unauthorized(detail.unwrap_or_else(|| "Invalid credentials".into()))
                .with_status(401),
            status => HomeError::server(
                status,
                detail.unwrap_or_else(|| format!("Request failed with status {}", status)),
            ),
        }
    }

    // --- Endpoints ---

    pub async fn login(&self, email: &str, password: &str) -> HomeResult<AuthResponse> {
        self.send(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
    }

    pub async fn register(&self, email: &str, password: &str, name: &str) -> HomeResult<AuthResponse> {
        self.send(&RegisterRequest {
            email: email.to_string(),
            password: password.to_string(),
            name: name.to_string(),
        })
        .await
    }

    pub async fn current_user(&self) -> HomeResult<User> {
        self.send(&CurrentUserRequest).await
    }

    pub async fn list_bookmarks(&self) -> HomeResult<Vec<Bookmark>> {
        self.send(&ListBookmarksRequest).await
    }

    pub async fn create_bookmark(&self, bookmark: &NewBookmark) -> HomeResult<Bookmark> {
        self.send(bookmark).await
    }

    pub async fn delete_bookmark(&self, id: &str) -> HomeResult<MessageResponse> {
        self.send(&DeleteBookmarkRequest { id: id.to_string() }).await
    }

    pub async fn update_preferences(&self, preferences: &Preferences) -> HomeResult<MessageResponse> {
        self.send(preferences).await
    }

    pub async fn search_engines(&self) -> HomeResult<SearchEngineCatalog> {
        self.send(&ListSearchEnginesRequest).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::request::{HttpMethod, MockHttpClient};
    use serde_json::json;

    const BASE: &str = "https://home.test";

    fn api(client: &MockHttpClient) -> HomepageApi<MockHttpClient> {
        HomepageApi::new(client.clone(), "https://home.test/")
    }

    #[tokio::test]
    async fn attaches_bearer_token_to_protected_calls() {
        let client = MockHttpClient::new();
        client.mock_response(HttpMethod::Get, &format!("{BASE}/api/bookmarks"), 200, json!([]));

        let list = api(&client).with_token("tok-1").list_bookmarks().await.unwrap();
        assert!(list.is_empty());

        let req = client.last_request().unwrap();
        assert_eq!(req.headers.get("Authorization").unwrap(), "Bearer tok-1");
        assert!(req.body.is_none());
    }

    #[tokio::test]
    async fn public_calls_carry_no_token() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Get,
            &format!("{BASE}/api/search-engines"),
            200,
            json!({"google": {"name": "Google", "url": "https://www.google.com/search?q="}}),
        );

        let catalog = api(&client).with_token("tok").search_engines().await.unwrap();
        assert_eq!(catalog["google"].name, "Google");
        assert!(client.last_request().unwrap().headers.get("Authorization").is_none());
    }

    #[tokio::test]
    async fn protected_call_without_token_never_hits_network() {
        let client = MockHttpClient::new();
        let err = api(&client).list_bookmarks().await.unwrap_err();

        assert_eq!(err.kind(), ErrorKind::SessionExpired);
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn maps_401_to_session_expired_when_authenticated() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Get,
            &format!("{BASE}/api/user"),
            401,
            json!({"detail": "Could not validate credentials"}),
        );

        let err = api(&client).with_token("stale").current_user().await.unwrap_err();
        assert!(err.is_session_expired());
        assert_eq!(err.status_code(), 401);
    }

    #[tokio::test]
    async fn maps_401_on_login_to_unauthorized_with_detail() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Post,
            &format!("{BASE}/api/login"),
            401,
            json!({"detail": "Incorrect email or password"}),
        );

        let err = api(&client).login("a@b.c", "nope").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Unauthorized);
        assert_eq!(err.message(), "Incorrect email or password");

        let body = client.last_request().unwrap().json_body();
        assert_eq!(body, json!({"email": "a@b.c", "password": "nope"}));
    }

    #[tokio::test]
    async fn delete_puts_id_in_path() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Delete,
            &format!("{BASE}/api/bookmarks/b7"),
            200,
            json!({"message": "Bookmark deleted successfully"}),
        );

        let ack = api(&client).with_token("t").delete_bookmark("b7").await.unwrap();
        assert_eq!(ack.message, "Bookmark deleted successfully");
        assert!(client.last_request().unwrap().body.is_none());
    }

    #[tokio::test]
    async fn server_errors_keep_status_and_detail() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Put,
            &format!("{BASE}/api/user/preferences"),
            422,
            json!({"detail": "bad theme"}),
        );

        let err = api(&client)
            .with_token("t")
            .update_preferences(&Preferences::default())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Server);
        assert_eq!(err.status_code(), 422);
        assert_eq!(err.message(), "bad theme");
    }

    #[tokio::test]
    async fn undecodable_body_is_serialization_error() {
        let client = MockHttpClient::new();
        client.mock_response(HttpMethod::Get, &format!("{BASE}/api/bookmarks"), 200, json!({"oops": true}));

        let err = api(&client).with_token("t").list_bookmarks().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }

    #[tokio::test]
    async fn transport_failure_is_network_error() {
        let client = MockHttpClient::new();
        client.mock_network_failure(HttpMethod::Get, &format!("{BASE}/api/search-engines"));

        let err = api(&client).search_engines().await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Network);
    }
}
