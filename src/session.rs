//! 会话模块
//!
//! 管理当前用户与 bearer token 的生命周期：
//! 启动时从持久化存储恢复（rehydrate），登录 / 注册时建立，注销时销毁。
//! 以显式的上下文对象传递给需要它的组件，而不是全局可变状态。

use crate::api::HomepageApi;
use crate::error::{ErrorKind, HomeError, HomeResult};
use crate::request::HttpClient;
use crate::storage::TokenStore;
use crate::watch::Observable;
use std::rc::Rc;
use tabhome_shared::{AuthResponse, Preferences, User};

/// 会话状态
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub user: Option<User>,
    pub token: Option<String>,
    /// 仅在启动恢复期间为 true；登录 / 注册使用各自表单的加载标志
    pub loading: bool,
}

impl SessionState {
    fn resolving() -> Self {
        Self {
            user: None,
            token: None,
            loading: true,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some() && self.token.is_some()
    }
}

/// 登录 / 注册的结果
///
/// 失败以结果对象返回而不是错误，调用方的表单可以直接显示消息。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthOutcome {
    Success,
    Failure { message: String },
}

impl AuthOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success)
    }

    pub fn message(&self) -> Option<&str> {
        match self {
            AuthOutcome::Success => None,
            AuthOutcome::Failure { message } => Some(message),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        AuthOutcome::Failure {
            message: message.into(),
        }
    }
}

/// 会话存储
///
/// 克隆得到的是同一会话的句柄。
pub struct SessionStore<C, S> {
    api: HomepageApi<C>,
    tokens: Rc<S>,
    token_key: String,
    state: Observable<SessionState>,
}

impl<C: Clone, S> Clone for SessionStore<C, S> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            tokens: self.tokens.clone(),
            token_key: self.token_key.clone(),
            state: self.state.clone(),
        }
    }
}

impl<C, S> SessionStore<C, S>
where
    C: HttpClient + Clone + 'static,
    S: TokenStore + 'static,
{
    /// 创建会话存储，初始状态为“恢复中”
    pub fn new(api: HomepageApi<C>, tokens: S, token_key: &str) -> Self {
        Self {
            api: api.without_token(),
            tokens: Rc::new(tokens),
            token_key: token_key.to_string(),
            state: Observable::new(SessionState::resolving()),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state.get()
    }

    pub fn user(&self) -> Option<User> {
        self.state.with(|s| s.user.clone())
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.with(SessionState::is_authenticated)
    }

    pub fn is_loading(&self) -> bool {
        self.state.with(|s| s.loading)
    }

    /// 订阅会话状态变化（注册时立即回调一次）
    pub fn subscribe(&self, listener: impl Fn(&SessionState) + 'static) {
        self.state.subscribe(listener);
    }

    /// 当前令牌对应的 API 客户端；未登录时只能访问公开端点
    pub fn api(&self) -> HomepageApi<C> {
        match self.state.with(|s| s.token.clone()) {
            Some(token) => self.api.with_token(token),
            None => self.api.without_token(),
        }
    }

    /// 启动时恢复会话
    ///
    /// 只在恢复阶段生效，之后再调用直接返回。
    pub async fn rehydrate(&self) {
        if !self.is_loading() {
            return;
        }

        let Some(token) = self.tokens.get(&self.token_key) else {
            log::info!("[session] no persisted token, starting unauthenticated");
            self.state.update(|s| s.loading = false);
            return;
        };

        let result = self.api.with_token(token.clone()).current_user().await;

        // 恢复期间可能已经登录了新的会话，此时旧令牌的结果作废
        let superseded = self.state.with(|s| s.token.is_some())
            || self.tokens.get(&self.token_key).as_deref() != Some(token.as_str());
        if superseded {
            log::info!("[session] rehydrate superseded by a newer session");
            self.state.update(|s| s.loading = false);
            return;
        }

        match result {
            Ok(user) => {
                log::info!("[session] restored session for {}", user.email);
                self.state.update(|s| {
                    s.user = Some(user);
                    s.token = Some(token);
                    s.loading = false;
                });
            }
            Err(e) => {
                // 令牌被拒绝才清除；网络问题保留令牌，下次启动再试
                if matches!(e.kind(), ErrorKind::SessionExpired | ErrorKind::Unauthorized) {
                    self.tokens.delete(&self.token_key);
                }
                log::warn!("[session] rehydrate failed: {}", e);
                self.state.update(|s| {
                    s.user = None;
                    s.token = None;
                    s.loading = false;
                });
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> AuthOutcome {
        let response = self.api.login(email, password).await;
        self.finish("login", email, response).await
    }

    pub async fn register(&self, email: &str, password: &str, name: &str) -> AuthOutcome {
        if name.trim().is_empty() {
            return AuthOutcome::failure("Name is required");
        }
        let response = self.api.register(email, password, name.trim()).await;
        self.finish("register", email, response).await
    }

    /// 清除令牌与用户，可重复调用
    pub fn logout(&self) {
        self.tokens.delete(&self.token_key);
        let was_authenticated = self.state.update(|s| {
            let was = s.is_authenticated();
            s.user = None;
            s.token = None;
            was
        });
        if was_authenticated {
            log::info!("[session] logged out");
        }
    }

    /// 偏好保存成功后同步缓存中的用户
    pub fn apply_preferences(&self, preferences: Preferences) {
        self.state.update(|s| {
            if let Some(user) = s.user.as_mut() {
                user.preferences = preferences;
            }
        });
    }

    /// 处理已认证请求的错误：会话过期时注销，返回是否已注销
    pub fn handle_error(&self, error: &HomeError) -> bool {
        if error.is_session_expired() && self.is_authenticated() {
            log::warn!("[session] token rejected, ending session");
            self.logout();
            return true;
        }
        false
    }

    async fn finish(&self, op: &str, email: &str, response: HomeResult<AuthResponse>) -> AuthOutcome {
        match self.establish(response).await {
            Ok(user) => {
                log::info!("[session] {} succeeded for {}", op, user.email);
                AuthOutcome::Success
            }
            Err(e) => {
                log::warn!("[session] {} failed for {}: {}", op, email, e);
                AuthOutcome::failure(failure_message(&e))
            }
        }
    }

    /// 用认证响应建立会话；响应里没有用户时再请求一次 `/api/user`
    async fn establish(&self, response: HomeResult<AuthResponse>) -> HomeResult<User> {
        let response = response?;
        let token = response.access_token;
        let user = match response.user {
            Some(user) => user,
            None => self
                .api
                .with_token(token.clone())
                .current_user()
                .await
                .map_err(|e| e.in_op("session.establish"))?,
        };

        if !self.tokens.set(&self.token_key, &token) {
            log::warn!("[session] could not persist token, session will not survive reload");
        }
        self.state.update(|s| {
            s.user = Some(user.clone());
            s.token = Some(token);
        });
        Ok(user)
    }
}

fn failure_message(error: &HomeError) -> String {
    match error.kind() {
        ErrorKind::Network => "Unable to reach the server".to_string(),
        ErrorKind::Serialization => "Unexpected response from the server".to_string(),
        _ => error.message().to_string(),
    }
}
