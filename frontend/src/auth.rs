//! 认证模块
//!
//! 把核心层的 `SessionStore` 接入 Leptos 的响应式系统：
//! 会话状态通过订阅同步到信号，组件只读信号、只通过存储句柄发起操作。
//! 路由服务通过注入的会话信号做守卫，与这里解耦。

use crate::web::{BrowserTokenStore, GlooHttpClient};
use leptos::prelude::*;
use leptos::task::spawn_local;
use tabhome::{ClientConfig, HomeError, HomepageApi, SessionState, SessionStore};

pub type Session = SessionStore<GlooHttpClient, BrowserTokenStore>;

/// 认证上下文
///
/// 会话句柄不是 `Send` 的，用 `StoredValue::new_local` 保存。
#[derive(Clone, Copy)]
pub struct AuthContext {
    pub state: RwSignal<SessionState>,
    session: StoredValue<Session, LocalStorage>,
}

impl AuthContext {
    pub fn new(config: &ClientConfig) -> Self {
        let api = HomepageApi::new(GlooHttpClient, &config.api_base_url);
        let session = SessionStore::new(api, BrowserTokenStore, &config.token_storage_key);

        let state = RwSignal::new(session.state());
        session.subscribe(move |s| state.set(s.clone()));

        Self {
            state,
            session: StoredValue::new_local(session),
        }
    }

    pub fn session(&self) -> Session {
        self.session.get_value()
    }

    /// 会话状态信号（用于路由服务注入）
    pub fn state_signal(&self) -> Signal<SessionState> {
        self.state.into()
    }

    /// 已认证请求失败后的统一处理：令牌失效时结束会话，路由随后跳转登录页
    pub fn handle_error(&self, error: &HomeError) {
        self.session().handle_error(error);
    }

    pub fn logout(&self) {
        self.session().logout();
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 启动时恢复会话（只执行一次）
pub fn init_auth(ctx: &AuthContext) {
    let session = ctx.session();
    spawn_local(async move {
        session.rehydrate().await;
    });
}
