use crate::components::dashboard::Board;
use crate::components::icons::Close;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tabhome::{AddBookmarkForm, HomeError};
use tabhome_shared::{BOOKMARK_CATEGORIES, COMMON_ICONS};

#[component]
pub fn AddBookmarkDialog(
    board: StoredValue<Board, LocalStorage>,
    #[prop(into)] on_close: Callback<()>,
    /// 请求失败时交给上层（会话过期处理）
    #[prop(into)] on_error: Callback<HomeError>,
) -> impl IntoView {
    let form = RwSignal::new(AddBookmarkForm::new());
    let submitting = move || form.with(AddBookmarkForm::is_submitting);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(mut pending) = form.try_update(AddBookmarkForm::begin_submit).flatten() else {
            return;
        };

        // 在副本上提交，完成后写回（包含规范化后的 URL 与错误）
        let board = board.get_value();
        spawn_local(async move {
            let result = pending.submit(&board).await;
            let _ = form.try_set(pending);
            match result {
                Ok(_) => on_close.run(()),
                Err(e) => on_error.run(e),
            }
        });
    };

    view! {
        <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-50 p-4">
            <div class="glass p-6 rounded-2xl max-w-md w-full add-bookmark-form">
                <div class="flex justify-between items-center mb-6">
                    <h2 class="text-xl font-semibold text-white">"নতুন বুকমার্ক যোগ করুন"</h2>
                    <button
                        type="button"
                        class="text-white/70 hover:text-white transition-colors"
                        on:click=move |_| on_close.run(())
                    >
                        <Close attr:class="w-6 h-6" />
                    </button>
                </div>

                <Show when=move || form.with(|f| f.error().is_some())>
                    <div class="error-message mb-4">
                        {move || form.with(|f| f.error().unwrap_or_default().to_string())}
                    </div>
                </Show>

                <form on:submit=on_submit class="space-y-4">
                    <div>
                        <label class="block text-white/80 text-sm font-medium mb-2">"নাম *"</label>
                        <input
                            type="text"
                            placeholder="বুকমার্কের নাম"
                            prop:value=move || form.with(|f| f.draft().title.clone())
                            on:input=move |ev| form.update(|f| f.set_title(event_target_value(&ev)))
                            class="w-full px-4 py-3 rounded-xl glass border border-white/20 text-white placeholder-white/60 input-focus"
                            required
                        />
                    </div>

                    <div>
                        <label class="block text-white/80 text-sm font-medium mb-2">"URL *"</label>
                        // 不使用 type="url"，允许输入不带 scheme 的地址
                        <input
                            type="text"
                            placeholder="https://example.com"
                            prop:value=move || form.with(|f| f.draft().url.clone())
                            on:input=move |ev| form.update(|f| f.set_url(event_target_value(&ev)))
                            class="w-full px-4 py-3 rounded-xl glass border border-white/20 text-white placeholder-white/60 input-focus"
                            required
                        />
                    </div>

                    <div>
                        <label class="block text-white/80 text-sm font-medium mb-2">"আইকন"</label>
                        <div class="flex items-center space-x-2 mb-2">
                            <input
                                type="text"
                                maxlength="2"
                                prop:value=move || form.with(|f| f.draft().icon.clone())
                                on:input=move |ev| form.update(|f| f.set_icon(event_target_value(&ev)))
                                class="w-16 px-3 py-2 rounded-lg glass border border-white/20 text-white text-center"
                            />
                            <span class="text-white/70 text-sm">"বা নিচে থেকে বেছে নিন"</span>
                        </div>
                        <div class="grid grid-cols-10 gap-2">
                            {COMMON_ICONS
                                .iter()
                                .map(|&icon| {
                                    let is_current = move || form.with(|f| f.draft().icon == icon);
                                    view! {
                                        <button
                                            type="button"
                                            class=move || if is_current() {
                                                "p-2 rounded-lg bg-white/20"
                                            } else {
                                                "p-2 rounded-lg bg-white/10 hover:bg-white/20"
                                            }
                                            on:click=move |_| form.update(|f| f.set_icon(icon))
                                        >
                                            {icon}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    </div>

                    <div>
                        <label class="block text-white/80 text-sm font-medium mb-2">"ক্যাটাগরি"</label>
                        <select
                            prop:value=move || form.with(|f| f.draft().category.clone())
                            on:change=move |ev| form.update(|f| f.set_category(event_target_value(&ev)))
                            class="w-full px-4 py-3 rounded-xl glass border border-white/20 text-white"
                        >
                            {BOOKMARK_CATEGORIES
                                .iter()
                                .map(|&category| view! {
                                    <option value=category class="bg-gray-800 text-white">{category}</option>
                                })
                                .collect_view()}
                        </select>
                    </div>

                    <div class="flex space-x-3 pt-4">
                        <button
                            type="button"
                            class="flex-1 glass border border-white/20 text-white py-3 px-4 rounded-xl hover:bg-white/10"
                            on:click=move |_| on_close.run(())
                        >
                            "বাতিল"
                        </button>
                        <button
                            type="submit"
                            class="flex-1 bg-gradient-to-r from-indigo-500 to-purple-600 text-white py-3 px-4 rounded-xl disabled:opacity-50 disabled:cursor-not-allowed"
                            disabled=submitting
                        >
                            {move || if submitting() {
                                "যোগ করা হচ্ছে..."
                            } else {
                                "যোগ করুন"
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
