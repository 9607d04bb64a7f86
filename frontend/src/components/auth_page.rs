use crate::auth::use_auth;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;
use tabhome::auth_form::AuthDraft;
use tabhome::{AppRoute, AuthForm, AuthMode};

#[component]
pub fn AuthPage(route: AppRoute) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let mode = AuthMode::from_route(route).unwrap_or(AuthMode::Login);
    let is_login = mode == AuthMode::Login;

    // 表单状态（草稿、提交中、错误）全部由 AuthForm 维护
    let form = RwSignal::new(AuthForm::new(mode));
    let is_submitting = move || form.with(AuthForm::is_submitting);
    let error_msg = move || form.with(|f| f.error().map(str::to_string));

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(mut pending) = form.try_update(AuthForm::begin_submit).flatten() else {
            return;
        };

        let session = auth.session();
        spawn_local(async move {
            let ok = pending.submit(&session).await;
            let _ = form.try_set(pending);
            if ok {
                router.navigate(AppRoute::auth_success_redirect());
            }
        });
    };

    let toggle_mode = move |_| {
        if let Some(next) = form.try_update(AuthForm::toggle_mode) {
            router.navigate(next);
        }
    };

    // 编辑任何字段都会清除错误（由 AuthForm 的 setter 负责）
    let edit = move |apply: fn(&mut AuthForm, String)| {
        move |ev: leptos::web_sys::Event| {
            let value = event_target_value(&ev);
            form.update(|f| apply(f, value));
        }
    };
    let field = move |read: fn(&AuthDraft) -> &String| move || form.with(|f| read(f.draft()).clone());

    view! {
        <div class="min-h-screen flex items-center justify-center p-4">
            <div class="w-full max-w-md">
                <div class="glass p-8 rounded-2xl auth-form">
                    <div class="text-center mb-8">
                        <h1 class="text-3xl font-bold text-white mb-2">
                            {if is_login { "স্বাগতম!" } else { "নতুন অ্যাকাউন্ট" }}
                        </h1>
                        <p class="text-white/70">
                            {if is_login {
                                "আপনার হোমপেজে প্রবেশ করুন"
                            } else {
                                "একটি নতুন অ্যাকাউন্ট তৈরি করুন"
                            }}
                        </p>
                    </div>

                    <Show when=move || error_msg().is_some()>
                        <div role="alert" class="error-message mb-4">
                            {move || error_msg().unwrap_or_default()}
                        </div>
                    </Show>

                    <form class="space-y-6" on:submit=on_submit>
                        <Show when=move || !is_login>
                            <div>
                                <label for="name" class="block text-white/80 text-sm font-medium mb-2">
                                    "নাম"
                                </label>
                                <input
                                    id="name"
                                    type="text"
                                    placeholder="আপনার নাম লিখুন"
                                    on:input=edit(|f, v| f.set_name(v))
                                    prop:value=field(|d| &d.name)
                                    class="w-full px-4 py-3 rounded-xl glass border border-white/20 text-white placeholder-white/60 input-focus"
                                />
                            </div>
                        </Show>

                        <div>
                            <label for="email" class="block text-white/80 text-sm font-medium mb-2">
                                "ইমেইল"
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="আপনার ইমেইল লিখুন"
                                on:input=edit(|f, v| f.set_email(v))
                                prop:value=field(|d| &d.email)
                                class="w-full px-4 py-3 rounded-xl glass border border-white/20 text-white placeholder-white/60 input-focus"
                                required
                            />
                        </div>

                        <div>
                            <label for="password" class="block text-white/80 text-sm font-medium mb-2">
                                "পাসওয়ার্ড"
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="আপনার পাসওয়ার্ড লিখুন"
                                on:input=edit(|f, v| f.set_password(v))
                                prop:value=field(|d| &d.password)
                                class="w-full px-4 py-3 rounded-xl glass border border-white/20 text-white placeholder-white/60 input-focus"
                                required
                            />
                        </div>

                        <button
                            type="submit"
                            class="w-full bg-gradient-to-r from-indigo-500 to-purple-600 text-white py-3 px-6 rounded-xl font-semibold text-lg disabled:opacity-50 disabled:cursor-not-allowed"
                            disabled=is_submitting
                        >
                            {move || if is_submitting() {
                                view! { <span class="loading-spinner mr-2"></span> "অপেক্ষা করুন..." }.into_any()
                            } else if is_login {
                                "লগইন করুন".into_any()
                            } else {
                                "নিবন্ধন করুন".into_any()
                            }}
                        </button>
                    </form>

                    <div class="mt-8 text-center">
                        <p class="text-white/70">
                            {if is_login { "নতুন ব্যবহারকারী?" } else { "ইতিমধ্যে অ্যাকাউন্ট আছে?" }}
                        </p>
                        <button
                            type="button"
                            on:click=toggle_mode
                            class="text-white font-semibold hover:text-white/80 transition-colors mt-1"
                        >
                            {if is_login { "এখানে নিবন্ধন করুন" } else { "এখানে লগইন করুন" }}
                        </button>
                    </div>
                </div>
            </div>
        </div>
    }
}
