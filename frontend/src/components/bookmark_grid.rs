use leptos::prelude::*;
use tabhome::CategoryFilter;
use tabhome_shared::Bookmark;

#[component]
pub fn CategoryTabs(
    #[prop(into)] categories: Signal<Vec<CategoryFilter>>,
    #[prop(into)] selected: Signal<CategoryFilter>,
    #[prop(into)] on_select: Callback<CategoryFilter>,
) -> impl IntoView {
    view! {
        <div class="category-tabs">
            <For
                each=move || categories.get()
                key=|c| c.key().to_string()
                children=move |category| {
                    let label = match &category {
                        CategoryFilter::All => "সব".to_string(),
                        CategoryFilter::Named(name) => name.clone(),
                    };
                    let is_active = {
                        let category = category.clone();
                        move || selected.get() == category
                    };
                    view! {
                        <button
                            class=move || if is_active() { "category-tab active" } else { "category-tab" }
                            on:click=move |_| on_select.run(category.clone())
                        >
                            {label}
                        </button>
                    }
                }
            />
        </div>
    }
}

/// 书签网格，删除前先确认
#[component]
pub fn BookmarkGrid(
    #[prop(into)] bookmarks: Signal<Vec<Bookmark>>,
    #[prop(into)] on_delete: Callback<String>,
) -> impl IntoView {
    let (confirm_id, set_confirm_id) = signal(Option::<String>::None);

    let open_bookmark = |url: &str| {
        if let Some(window) = web_sys::window() {
            let _ = window.open_with_url_and_target(url, "_blank");
        }
    };

    let confirm_delete = move |_| {
        if let Some(id) = confirm_id.get_untracked() {
            on_delete.run(id);
        }
        set_confirm_id.set(None);
    };

    view! {
        <Show
            when=move || bookmarks.with(|b| !b.is_empty())
            fallback=|| view! {
                <div class="text-center py-12">
                    <div class="glass p-8 rounded-2xl inline-block">
                        <div class="text-6xl mb-4">"📚"</div>
                        <p class="text-white/70 text-lg">"কোন বুকমার্ক নেই"</p>
                        <p class="text-white/50 text-sm mt-2">"নতুন বুকমার্ক যোগ করুন"</p>
                    </div>
                </div>
            }
        >
            <div class="bookmark-grid">
                <For
                    each=move || bookmarks.get().into_iter().enumerate()
                    key=|(_, b)| b.id.clone()
                    children=move |(index, bookmark)| {
                        let url = bookmark.url.clone();
                        let id = bookmark.id.clone();
                        view! {
                            <div
                                class=format!(
                                    "bookmark-card glass p-4 rounded-xl text-white text-center cursor-pointer relative group animate-slide-up animate-delay-{}",
                                    (index % 3) * 100,
                                )
                                on:click=move |_| open_bookmark(&url)
                            >
                                <div class="text-3xl mb-2">{bookmark.icon}</div>
                                <div class="font-medium text-sm truncate">{bookmark.title}</div>
                                <button
                                    class="absolute top-2 right-2 opacity-0 group-hover:opacity-100 bg-red-500 hover:bg-red-600 text-white rounded-full w-6 h-6 flex items-center justify-center text-xs"
                                    on:click=move |ev| {
                                        ev.stop_propagation();
                                        set_confirm_id.set(Some(id.clone()));
                                    }
                                >
                                    "×"
                                </button>
                            </div>
                        }
                    }
                />
            </div>
        </Show>

        <Show when=move || confirm_id.get().is_some()>
            <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-50 p-4">
                <div class="glass p-6 rounded-2xl max-w-sm w-full">
                    <h3 class="text-white text-lg font-semibold mb-4">"নিশ্চিত করুন"</h3>
                    <p class="text-white/70 mb-6">"আপনি কি এই বুকমার্কটি মুছে ফেলতে চান?"</p>
                    <div class="flex gap-3">
                        <button
                            class="flex-1 bg-red-500 hover:bg-red-600 text-white py-2 px-4 rounded-xl"
                            on:click=confirm_delete
                        >
                            "হ্যাঁ, মুছুন"
                        </button>
                        <button
                            class="flex-1 glass border border-white/20 text-white py-2 px-4 rounded-xl"
                            on:click=move |_| set_confirm_id.set(None)
                        >
                            "বাতিল"
                        </button>
                    </div>
                </div>
            </div>
        </Show>
    }
}
