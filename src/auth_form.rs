//! 登录 / 注册表单
//!
//! 模式由当前路由决定。错误只保存在表单本地，不写入会话。

use crate::error::{HomeError, HomeResult};
use crate::request::HttpClient;
use crate::route::AppRoute;
use crate::session::{AuthOutcome, SessionStore};
use crate::storage::TokenStore;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Login,
    Register,
}

impl AuthMode {
    /// 只有 `/login` 与 `/register` 有对应的表单模式
    pub fn from_route(route: AppRoute) -> Option<Self> {
        match route {
            AppRoute::Login => Some(Self::Login),
            AppRoute::Register => Some(Self::Register),
            _ => None,
        }
    }

    pub fn route(&self) -> AppRoute {
        match self {
            Self::Login => AppRoute::Login,
            Self::Register => AppRoute::Register,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::Login => Self::Register,
            Self::Register => Self::Login,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthDraft {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthForm {
    mode: AuthMode,
    draft: AuthDraft,
    submitting: bool,
    error: Option<String>,
}

impl AuthForm {
    pub fn new(mode: AuthMode) -> Self {
        Self {
            mode,
            draft: AuthDraft::default(),
            submitting: false,
            error: None,
        }
    }

    pub fn for_route(route: AppRoute) -> Option<Self> {
        AuthMode::from_route(route).map(Self::new)
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn draft(&self) -> &AuthDraft {
        &self.draft
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    // --- 字段编辑：任何修改都会清除本地错误 ---

    pub fn set_email(&mut self, value: impl Into<String>) {
        self.draft.email = value.into();
        self.error = None;
    }

    pub fn set_password(&mut self, value: impl Into<String>) {
        self.draft.password = value.into();
        self.error = None;
    }

    pub fn set_name(&mut self, value: impl Into<String>) {
        self.draft.name = value.into();
        self.error = None;
    }

    /// 提交前的最小校验
    pub fn validate(&self) -> HomeResult<()> {
        let email = self.draft.email.trim();
        if email.is_empty() {
            return Err(HomeError::validation("Email is required"));
        }
        if !email.contains('@') {
            return Err(HomeError::validation("Please enter a valid email address"));
        }
        if self.draft.password.is_empty() {
            return Err(HomeError::validation("Password is required"));
        }

        if self.mode == AuthMode::Register {
            if self.draft.name.trim().is_empty() {
                return Err(HomeError::validation("Name is required"));
            }
            if self.draft.password.chars().count() < MIN_PASSWORD_LEN {
                return Err(HomeError::validation(format!(
                    "Password must be at least {} characters",
                    MIN_PASSWORD_LEN
                )));
            }
        }
        Ok(())
    }

    /// 标记为提交中并返回要在后台提交的副本；已在提交中时返回 None
    pub fn begin_submit(&mut self) -> Option<Self> {
        if self.submitting {
            return None;
        }
        let pending = self.clone();
        self.submitting = true;
        self.error = None;
        Some(pending)
    }

    /// 校验并提交，返回会话是否已建立（调用方随后跳转到主页）
    pub async fn submit<C, S>(&mut self, session: &SessionStore<C, S>) -> bool
    where
        C: HttpClient + Clone + 'static,
        S: TokenStore + 'static,
    {
        if self.submitting {
            return false;
        }
        self.error = None;

        if let Err(e) = self.validate() {
            self.error = Some(e.message().to_string());
            return false;
        }

        self.submitting = true;
        let email = self.draft.email.trim().to_string();
        let outcome = match self.mode {
            AuthMode::Login => session.login(&email, &self.draft.password).await,
            AuthMode::Register => {
                session
                    .register(&email, &self.draft.password, &self.draft.name)
                    .await
            }
        };
        self.submitting = false;

        match outcome {
            AuthOutcome::Success => true,
            AuthOutcome::Failure { message } => {
                self.error = Some(message);
                false
            }
        }
    }

    /// 切换登录 / 注册，清空草稿与错误，返回要跳转的路由
    pub fn toggle_mode(&mut self) -> AppRoute {
        self.mode = self.mode.toggled();
        self.draft = AuthDraft::default();
        self.error = None;
        self.mode.route()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{session, url, user_json};
    use crate::request::{HttpMethod, MockHttpClient};
    use crate::storage::MemoryTokenStore;
    use serde_json::json;

    fn filled(mode: AuthMode, email: &str, password: &str, name: &str) -> AuthForm {
        let mut form = AuthForm::new(mode);
        form.set_email(email);
        form.set_password(password);
        form.set_name(name);
        form
    }

    #[test]
    fn mode_follows_route() {
        assert_eq!(AuthForm::for_route(AppRoute::Login).unwrap().mode(), AuthMode::Login);
        assert_eq!(AuthForm::for_route(AppRoute::Register).unwrap().mode(), AuthMode::Register);
        assert!(AuthForm::for_route(AppRoute::Home).is_none());
    }

    #[test]
    fn validation_rules() {
        let msg = |form: AuthForm| form.validate().unwrap_err().message().to_string();

        assert_eq!(msg(filled(AuthMode::Login, "", "x", "")), "Email is required");
        assert_eq!(
            msg(filled(AuthMode::Login, "rahim", "x", "")),
            "Please enter a valid email address"
        );
        assert_eq!(msg(filled(AuthMode::Login, "a@b.c", "", "")), "Password is required");
        assert!(filled(AuthMode::Login, "a@b.c", "x", "").validate().is_ok());

        assert_eq!(msg(filled(AuthMode::Register, "a@b.c", "secret1", " ")), "Name is required");
        assert_eq!(
            msg(filled(AuthMode::Register, "a@b.c", "short", "Rahim")),
            "Password must be at least 6 characters"
        );
        assert!(filled(AuthMode::Register, "a@b.c", "secret", "Rahim").validate().is_ok());
    }

    #[test]
    fn editing_clears_error_and_toggle_resets() {
        let mut form = filled(AuthMode::Login, "a@b.c", "pw", "");
        form.error = Some("boom".into());

        form.set_password("pw2");
        assert!(form.error().is_none());

        form.error = Some("boom".into());
        assert_eq!(form.toggle_mode(), AppRoute::Register);
        assert_eq!(form.mode(), AuthMode::Register);
        assert_eq!(form.draft(), &AuthDraft::default());
        assert!(form.error().is_none());
    }

    #[tokio::test]
    async fn invalid_draft_never_reaches_session() {
        let client = MockHttpClient::new();
        let store = session(&client, &MemoryTokenStore::new());
        let mut form = filled(AuthMode::Register, "a@b.c", "secret1", "");

        assert!(!form.submit(&store).await);
        assert_eq!(form.error(), Some("Name is required"));
        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn successful_login_authenticates_session() {
        let client = MockHttpClient::new();
        client.mock_response(HttpMethod::Post, &url("/api/login"), 200, json!({"access_token": "t"}));
        client.mock_response(HttpMethod::Get, &url("/api/user"), 200, user_json());
        let store = session(&client, &MemoryTokenStore::new());
        let mut form = filled(AuthMode::Login, " rahim@example.com ", "secret1", "");

        assert!(form.submit(&store).await);
        assert!(!form.is_submitting());
        assert!(store.is_authenticated());
        let body = client.requests_to(HttpMethod::Post, &url("/api/login"))[0].json_body();
        assert_eq!(body["email"], "rahim@example.com");
    }

    #[tokio::test]
    async fn rejected_login_shows_inline_error() {
        let client = MockHttpClient::new();
        client.mock_response(
            HttpMethod::Post,
            &url("/api/login"),
            401,
            json!({"detail": "Incorrect email or password"}),
        );
        let store = session(&client, &MemoryTokenStore::new());
        let mut form = filled(AuthMode::Login, "a@b.c", "nope", "");

        assert!(!form.submit(&store).await);
        assert_eq!(form.error(), Some("Incorrect email or password"));
        assert!(!form.is_submitting());
    }

    #[test]
    fn begin_submit_hands_out_one_pending_copy() {
        let mut form = filled(AuthMode::Login, "a@b.c", "secret1", "");

        let pending = form.begin_submit().unwrap();
        assert!(form.is_submitting());
        assert!(!pending.is_submitting());
        assert_eq!(pending.draft().email, "a@b.c");
        assert!(form.begin_submit().is_none());
    }
}
