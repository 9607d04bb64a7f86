//! tabhome 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::router`: 路由服务（导航与 History）
//! - `auth`: 会话状态接入
//! - `components`: UI 组件层
//!
//! 业务状态与规则都在 `tabhome` 核心库中，这里只做渲染与事件绑定。

mod auth;
mod components {
    pub mod add_bookmark_dialog;
    pub mod auth_page;
    pub mod bookmark_grid;
    pub mod clock;
    pub mod dashboard;
    pub mod icons;
    pub mod search_box;
    pub mod settings_dialog;
    pub mod user_menu;
}

use crate::auth::{AuthContext, init_auth};
use crate::components::auth_page::AuthPage;
use crate::components::dashboard::DashboardPage;

use leptos::prelude::*;
use tabhome::{AppRoute, ClientConfig};

// 浏览器 API 封装
pub(crate) mod web {
    mod http;
    pub mod router;
    mod storage;

    pub use http::GlooHttpClient;
    pub use storage::BrowserTokenStore;
}

use web::router::{Router, RouterOutlet};

/// 编译期配置，例如 `TABHOME_API_URL=https://api.example.com trunk build`
fn client_config() -> ClientConfig {
    ClientConfig::from_lookup(|key| match key {
        tabhome::config::API_URL_VAR => option_env!("TABHOME_API_URL").map(str::to_string),
        tabhome::config::TOKEN_KEY_VAR => option_env!("TABHOME_TOKEN_KEY").map(str::to_string),
        _ => None,
    })
}

/// 路由匹配函数
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login | AppRoute::Register => view! { <AuthPage route=route /> }.into_any(),
        AppRoute::Home => view! { <DashboardPage /> }.into_any(),
        AppRoute::NotFound => view! {
            <div class="min-h-screen flex items-center justify-center">
                <div class="glass p-8 rounded-2xl text-center text-white">
                    <h1 class="text-6xl font-bold">"404"</h1>
                    <p class="text-xl mt-4 text-white/70">"পৃষ্ঠাটি পাওয়া যায়নি"</p>
                    <a href="/" class="inline-block mt-6 underline">"হোমপেজে ফিরে যান"</a>
                </div>
            </div>
        }
        .into_any(),
    }
}

pub(crate) fn loading_view() -> AnyView {
    view! {
        <div class="min-h-screen flex items-center justify-center">
            <div class="glass p-8 rounded-2xl">
                <div class="animate-spin rounded-full h-12 w-12 border-b-2 border-white mx-auto"></div>
                <p class="text-white mt-4 text-center">"Loading..."</p>
            </div>
        </div>
    }
    .into_any()
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let config = client_config();
    log::info!("[App] api base url: {:?}", config.api_base_url);
    let auth_ctx = AuthContext::new(&config);
    provide_context(auth_ctx);

    // 2. 从 LocalStorage 恢复会话
    init_auth(&auth_ctx);

    // 3. 会话信号注入路由服务
    let session = auth_ctx.state_signal();

    // 主题来自用户偏好，未登录时使用默认主题
    let theme_class = move || {
        let theme = session.with(|s| {
            s.user
                .as_ref()
                .map(|u| u.preferences.theme)
                .unwrap_or_default()
        });
        format!("App min-h-screen theme-{}", theme)
    };

    view! {
        <div class=theme_class>
            <Router session=session>
                <RouterOutlet matcher=route_matcher pending=loading_view />
            </Router>
        </div>
    }
}
