use crate::auth::use_auth;
use crate::components::add_bookmark_dialog::AddBookmarkDialog;
use crate::components::bookmark_grid::{BookmarkGrid, CategoryTabs};
use crate::components::clock::Clock;
use crate::components::icons::Plus;
use crate::components::search_box::SearchBox;
use crate::components::settings_dialog::SettingsDialog;
use crate::components::user_menu::UserMenu;
use crate::web::GlooHttpClient;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tabhome::search::default_engine;
use tabhome::{BoardState, BookmarkBoard, CategoryFilter, HomeError};

pub type Board = BookmarkBoard<GlooHttpClient>;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();

    // 面板句柄不是 Send 的，状态通过订阅同步到信号
    let board = Board::new(auth.session().api());
    let state = RwSignal::new(board.state());
    board.subscribe(move |s| {
        let _ = state.try_set(s.clone());
    });
    let board = StoredValue::new_local(board);

    let (show_add, set_show_add) = signal(false);
    let (show_settings, set_show_settings) = signal(false);

    // 已认证请求失败：令牌过期时结束会话，路由守卫随后跳转登录页
    let on_error = Callback::new(move |e: HomeError| {
        log::warn!("[Dashboard] {}", e);
        auth.handle_error(&e);
    });

    // 初始加载
    spawn_local(async move {
        let board = board.get_value();
        if let Err(e) = board.load().await {
            on_error.run(e);
        }
    });

    // 3秒后清除错误提示；新错误出现时取消上一个计时器
    let error_text = Memo::new(move |_| state.with(|s| s.error.clone()));
    let dismiss_timer = StoredValue::new(None::<TimeoutHandle>);
    Effect::new(move |_| {
        if let Some(handle) = dismiss_timer.get_value() {
            handle.clear();
        }
        let handle = error_text.get().and_then(|message| {
            set_timeout_with_handle(
                move || {
                    let _ = board.try_with_value(|b| b.dismiss_error_if(&message));
                },
                std::time::Duration::from_secs(3),
            )
            .ok()
        });
        dismiss_timer.set_value(handle);
    });
    on_cleanup(move || {
        if let Some(handle) = dismiss_timer.try_get_value().flatten() {
            handle.clear();
        }
    });

    let handle_delete = Callback::new(move |id: String| {
        let board = board.get_value();
        spawn_local(async move {
            if let Err(e) = board.delete_bookmark(&id).await {
                on_error.run(e);
            }
        });
    });

    let handle_select = Callback::new(move |filter: CategoryFilter| {
        board.with_value(|b| b.select_category(filter));
    });

    // --- 派生信号 ---
    let user = Signal::derive(move || auth.state.with(|s| s.user.clone()));
    let preferences = move || user.with(|u| u.as_ref().map(|u| u.preferences).unwrap_or_default());
    let categories = Signal::derive(move || state.with(BoardState::categories));
    let visible = Signal::derive(move || state.with(BoardState::visible));
    let selected = Signal::derive(move || state.with(|s| s.selected.clone()));
    let engines = Signal::derive(move || state.with(|s| s.engines.clone()));

    let greeting = move || user.with(|u| u.as_ref().map(|u| u.name.clone()).unwrap_or_default());

    view! {
        <Show
            when=move || !state.with(|s| s.loading)
            fallback=crate::loading_view
        >
            <div class="min-h-screen p-4 relative">
                <div class="flex justify-between items-center mb-8">
                    <div class="text-white">
                        <h1 class="text-2xl font-bold">"আসসালামু আলাইকুম, " {greeting} "!"</h1>
                        <p class="text-white/70">"আপনার ব্যক্তিগত হোমপেজে স্বাগতম"</p>
                    </div>
                    <UserMenu
                        user=user
                        on_add_bookmark=move |_| set_show_add.set(true)
                        on_settings=move |_| set_show_settings.set(true)
                        on_logout=move |_| auth.logout()
                    />
                </div>

                <Show when=move || error_text.with(Option::is_some)>
                    <div role="alert" class="error-message mb-4">
                        {move || error_text.get().unwrap_or_default()}
                    </div>
                </Show>

                <div class="max-w-4xl mx-auto space-y-8">
                    <Clock
                        format=Signal::derive(move || preferences().clock_format)
                        language=Signal::derive(move || preferences().language)
                    />

                    <SearchBox
                        engines=engines
                        initial_engine=default_engine(user.get_untracked().as_ref())
                    />

                    <CategoryTabs categories=categories selected=selected on_select=handle_select />

                    <BookmarkGrid bookmarks=visible on_delete=handle_delete />

                    <div class="text-center">
                        <button
                            class="glass px-6 py-3 rounded-xl text-white hover:bg-white/20 transition-all btn-hover inline-flex items-center"
                            on:click=move |_| set_show_add.set(true)
                        >
                            <Plus attr:class="w-4 h-4 mr-2" />
                            "নতুন বুকমার্ক যোগ করুন"
                        </button>
                    </div>
                </div>

                <Show when=move || show_add.get()>
                    <AddBookmarkDialog
                        board=board
                        on_close=move |_| set_show_add.set(false)
                        on_error=on_error
                    />
                </Show>

                <Show when=move || show_settings.get()>
                    <SettingsDialog
                        on_close=move |_| set_show_settings.set(false)
                        on_error=on_error
                    />
                </Show>
            </div>
        </Show>
    }
}
