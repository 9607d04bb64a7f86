use crate::components::icons::ChevronDown;
use leptos::prelude::*;
use tabhome_shared::User;

#[component]
pub fn UserMenu(
    #[prop(into)] user: Signal<Option<User>>,
    #[prop(into)] on_add_bookmark: Callback<()>,
    #[prop(into)] on_settings: Callback<()>,
    #[prop(into)] on_logout: Callback<()>,
) -> impl IntoView {
    let (open, set_open) = signal(false);

    // 选择菜单项后关闭菜单
    let pick = move |action: Callback<()>| {
        move |_: leptos::web_sys::MouseEvent| {
            set_open.set(false);
            action.run(());
        }
    };

    let name = move || user.with(|u| u.as_ref().map(|u| u.name.clone()).unwrap_or_default());
    let email = move || user.with(|u| u.as_ref().map(|u| u.email.clone()).unwrap_or_default());
    let initial = move || user.with(|u| u.as_ref().map(User::initial).unwrap_or_default());

    view! {
        <div class="relative">
            <button
                class="glass p-3 rounded-xl text-white hover:bg-white/20 transition-all btn-hover flex items-center space-x-2"
                on:click=move |_| set_open.update(|o| *o = !*o)
            >
                <div class="w-8 h-8 bg-gradient-to-r from-indigo-500 to-purple-600 rounded-full flex items-center justify-center font-semibold">
                    {initial}
                </div>
                <span class="hidden sm:inline">{name}</span>
                <ChevronDown attr:class="w-4 h-4" />
            </button>

            <Show when=move || open.get()>
                <div class="absolute right-0 mt-2 w-48 glass rounded-xl shadow-lg border border-white/20 user-menu z-50">
                    <div class="py-2">
                        <div class="px-4 py-2 text-white/70 text-sm border-b border-white/10">
                            {email}
                        </div>
                        <button
                            class="w-full px-4 py-2 text-left text-white hover:bg-white/10 flex items-center space-x-2"
                            on:click=pick(on_add_bookmark)
                        >
                            <span>"+"</span>
                            <span>"বুকমার্ক যোগ করুন"</span>
                        </button>
                        <button
                            class="w-full px-4 py-2 text-left text-white hover:bg-white/10 flex items-center space-x-2"
                            on:click=pick(on_settings)
                        >
                            <span>"⚙️"</span>
                            <span>"সেটিংস"</span>
                        </button>
                        <hr class="border-white/10 my-2" />
                        <button
                            class="w-full px-4 py-2 text-left text-red-400 hover:bg-white/10 flex items-center space-x-2"
                            on:click=pick(on_logout)
                        >
                            <span>"🚪"</span>
                            <span>"লগআউট"</span>
                        </button>
                    </div>
                </div>
                // 点击空白处关闭
                <div class="fixed inset-0 z-40" on:click=move |_| set_open.set(false)></div>
            </Show>
        </div>
    }
}
