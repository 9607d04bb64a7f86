use crate::components::icons::Search;
use leptos::prelude::*;
use tabhome::search::build_search_url;
use tabhome_shared::{SearchEngineCatalog, SearchEngineKey};

fn open_in_new_tab(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.open_with_url_and_target(url, "_blank") {
            log::warn!("[search] window.open failed: {:?}", e);
        }
    }
}

#[component]
pub fn SearchBox(
    #[prop(into)] engines: Signal<SearchEngineCatalog>,
    /// 初始选中的引擎（用户偏好）
    initial_engine: SearchEngineKey,
) -> impl IntoView {
    let (query, set_query) = signal(String::new());
    let (engine, set_engine) = signal(initial_engine.as_str().to_string());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let url = engines.with(|catalog| {
            engine.with(|key| query.with(|q| build_search_url(catalog, key, q)))
        });
        // 查询为空或引擎未知时什么都不做
        if let Some(url) = url {
            open_in_new_tab(&url);
            set_query.set(String::new());
        }
    };

    view! {
        <div class="search-form">
            <form on:submit=on_submit class="space-y-4">
                <select
                    on:change=move |ev| set_engine.set(event_target_value(&ev))
                    prop:value=engine
                    class="w-full px-4 py-3 rounded-xl glass border border-white/20 text-white input-focus"
                >
                    <For
                        each=move || engines.get().into_iter()
                        key=|(key, _)| key.clone()
                        children=move |(key, info)| {
                            let selected = key == engine.get_untracked();
                            view! {
                                <option value=key selected=selected class="bg-gray-800 text-white">
                                    {info.name}
                                </option>
                            }
                        }
                    />
                </select>

                <div class="relative">
                    <input
                        type="text"
                        placeholder="এখানে লিখুন..."
                        on:input=move |ev| set_query.set(event_target_value(&ev))
                        prop:value=query
                        class="w-full px-6 py-4 text-lg rounded-2xl glass border border-white/20 text-white placeholder-white/60 input-focus pr-16"
                    />
                    <button
                        type="submit"
                        class="absolute right-2 top-1/2 -translate-y-1/2 p-3 rounded-xl text-white hover:bg-white/20"
                    >
                        <Search attr:class="w-6 h-6" />
                    </button>
                </div>
            </form>
        </div>
    }
}
