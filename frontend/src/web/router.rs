//! 路由服务模块 - 核心引擎
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 守卫逻辑由核心层的 `RouteGuard` 决定，这里只负责执行导航。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use tabhome::{AppRoute, RouteDecision, RouteGuard, SessionState};

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// `current_route` 是用户请求的路由，`guard` 跟随会话状态推进。
/// 两者共同决定渲染什么。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: ReadSignal<AppRoute>,
    set_route: WriteSignal<AppRoute>,
    guard: Memo<RouteGuard>,
}

impl RouterService {
    fn new(session: Signal<SessionState>) -> Self {
        let initial_route = AppRoute::from_path(&current_path());
        let (current_route, set_route) = signal(initial_route);

        let guard = Memo::new(move |prev: Option<&RouteGuard>| {
            let mut guard = prev.copied().unwrap_or_default();
            session.with(|s| guard.observe(s));
            guard
        });

        Self {
            current_route,
            set_route,
            guard,
        }
    }

    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// 当前路由的守卫决定
    pub fn decision(&self) -> RouteDecision {
        self.guard.get().decide(self.current_route.get())
    }

    /// 导航到指定路由（pushState），守卫在 Effect 中检查
    pub fn navigate(&self, route: AppRoute) {
        if self.current_route.get_untracked() != route {
            push_history_state(route.to_path());
            self.set_route.set(route);
        }
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;

        let closure = Closure::<dyn Fn()>::new(move || {
            set_route.set(AppRoute::from_path(&current_path()));
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 守卫要求重定向时以 replaceState 跳转
    ///
    /// 会话变化（登录、注销、令牌过期）与导航都会触发这里。
    fn setup_guard_redirect(&self) {
        let router = *self;

        Effect::new(move |_| {
            if let RouteDecision::Redirect(target) = router.decision() {
                log::info!(
                    "[Router] {} -> {} ({:?})",
                    router.current_route.get_untracked(),
                    target,
                    router.guard.get_untracked().state()
                );
                replace_history_state(target.to_path());
                router.set_route.set(target);
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(session: Signal<SessionState>) -> RouterService {
    let router = RouterService::new(session);

    router.init_popstate_listener();
    router.setup_guard_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
#[component]
pub fn Router(
    /// 会话状态信号
    session: Signal<SessionState>,
    children: Children,
) -> impl IntoView {
    provide_router(session);

    children()
}

/// 路由出口组件
///
/// 会话恢复期间（以及重定向生效前）显示加载指示。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
    /// 加载视图
    pending: fn() -> AnyView,
) -> impl IntoView {
    let router = use_router();
    // 决定不变时不重建视图
    let decision = Memo::new(move |_| router.decision());

    move || match decision.get() {
        RouteDecision::Render(route) => matcher(route),
        RouteDecision::Pending | RouteDecision::Redirect(_) => pending(),
    }
}
