//! 路由定义与路由守卫
//!
//! 纯粹的业务逻辑层，不依赖于 DOM。
//! 守卫只根据会话状态做出决定，真正的导航由 UI 层执行。

use std::fmt::Display;

use crate::session::SessionState;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    #[default]
    Login,
    Register,
    /// 主页（需要认证）
    Home,
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    pub fn from_path(path: &str) -> Self {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        match path.trim_end_matches('/') {
            "" => Self::Home,
            "/login" => Self::Login,
            "/register" => Self::Register,
            _ => Self::NotFound,
        }
    }

    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Register => "/register",
            Self::Home => "/",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Home)
    }

    /// 登录 / 注册页，已认证用户会被送回主页
    pub fn is_auth_page(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    pub fn auth_success_redirect() -> Self {
        Self::Home
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

// =========================================================
// 路由守卫 (Route Guard)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuardState {
    /// 等待会话恢复
    #[default]
    Resolving,
    Authenticated,
    Unauthenticated,
}

/// 守卫对某个路由的决定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteDecision {
    /// 显示加载指示，不渲染受保护内容
    Pending,
    Render(AppRoute),
    /// 以 replace 方式跳转，不留历史记录
    Redirect(AppRoute),
}

/// 受保护路由的守卫状态机
///
/// `Resolving` 只会离开一次；之后只在两个已决状态之间切换。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RouteGuard {
    state: GuardState,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> GuardState {
        self.state
    }

    /// 根据会话快照推进状态，返回状态是否改变
    pub fn observe(&mut self, session: &SessionState) -> bool {
        let next = match self.state {
            GuardState::Resolving if session.loading => GuardState::Resolving,
            _ if session.is_authenticated() => GuardState::Authenticated,
            _ => GuardState::Unauthenticated,
        };

        let changed = next != self.state;
        if changed {
            log::debug!("[guard] {:?} -> {:?}", self.state, next);
            self.state = next;
        }
        changed
    }

    pub fn decide(&self, route: AppRoute) -> RouteDecision {
        match (self.state, route) {
            (GuardState::Resolving, r) if r.requires_auth() => RouteDecision::Pending,
            (GuardState::Unauthenticated, r) if r.requires_auth() => {
                RouteDecision::Redirect(AppRoute::auth_failure_redirect())
            }
            (GuardState::Authenticated, r) if r.is_auth_page() => {
                RouteDecision::Redirect(AppRoute::auth_success_redirect())
            }
            (_, r) => RouteDecision::Render(r),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabhome_shared::User;

    fn user() -> User {
        User {
            id: "u1".into(),
            name: "Rahim".into(),
            email: "rahim@example.com".into(),
            created_at: None,
            preferences: Default::default(),
        }
    }

    fn state(loading: bool, signed_in: bool) -> SessionState {
        SessionState {
            user: signed_in.then(user),
            token: signed_in.then(|| "tok".to_string()),
            loading,
        }
    }

    #[test]
    fn parses_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Home);
        assert_eq!(AppRoute::from_path(""), AppRoute::Home);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/register/"), AppRoute::Register);
        assert_eq!(AppRoute::from_path("/login?next=/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/dashboard"), AppRoute::NotFound);
        assert_eq!(AppRoute::Register.to_string(), "/register");
    }

    #[test]
    fn protected_route_waits_while_resolving() {
        let mut guard = RouteGuard::new();
        assert!(!guard.observe(&state(true, false)));

        assert_eq!(guard.decide(AppRoute::Home), RouteDecision::Pending);
        assert_eq!(guard.decide(AppRoute::Login), RouteDecision::Render(AppRoute::Login));
    }

    #[test]
    fn redirects_to_login_without_session() {
        let mut guard = RouteGuard::new();
        assert!(guard.observe(&state(false, false)));

        assert_eq!(guard.state(), GuardState::Unauthenticated);
        assert_eq!(guard.decide(AppRoute::Home), RouteDecision::Redirect(AppRoute::Login));
    }

    #[test]
    fn renders_home_once_user_is_known() {
        let mut guard = RouteGuard::new();
        guard.observe(&state(false, true));

        assert_eq!(guard.decide(AppRoute::Home), RouteDecision::Render(AppRoute::Home));
        assert_eq!(guard.decide(AppRoute::Register), RouteDecision::Redirect(AppRoute::Home));
        assert_eq!(guard.decide(AppRoute::NotFound), RouteDecision::Render(AppRoute::NotFound));
    }

    #[test]
    fn never_returns_to_resolving() {
        let mut guard = RouteGuard::new();
        guard.observe(&state(false, false));
        guard.observe(&state(false, true));
        assert_eq!(guard.state(), GuardState::Authenticated);

        // 恢复阶段之后的 loading 标志不再影响守卫
        guard.observe(&state(true, false));
        assert_eq!(guard.state(), GuardState::Unauthenticated);
    }
}
