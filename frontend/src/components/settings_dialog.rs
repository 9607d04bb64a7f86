use crate::auth::use_auth;
use crate::components::icons::Close;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::str::FromStr;
use tabhome::clock::format_date;
use tabhome::{HomeError, PreferenceEditor, SaveOutcome};
use tabhome_shared::{ClockFormat, Language, SearchEngineKey, Theme};

fn theme_label(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "গাঢ়",
        Theme::Light => "হালকা",
    }
}

fn clock_label(format: ClockFormat) -> &'static str {
    match format {
        ClockFormat::TwelveHour => "12 ঘণ্টা",
        ClockFormat::TwentyFourHour => "24 ঘণ্টা",
    }
}

fn language_label(language: Language) -> &'static str {
    match language {
        Language::Bn => "বাংলা",
        Language::En => "English",
    }
}

/// 下拉框：选项来自枚举的 `ALL`，取值是线上字符串
#[component]
fn EnumSelect<T>(
    label: &'static str,
    options: &'static [T],
    option_label: fn(T) -> &'static str,
    #[prop(into)] value: Signal<T>,
    #[prop(into)] on_change: Callback<T>,
) -> impl IntoView
where
    T: Copy + PartialEq + FromStr + std::fmt::Display + Send + Sync + 'static,
{
    view! {
        <div>
            <label class="block text-white/80 text-sm font-medium mb-2">{label}</label>
            <select
                prop:value=move || value.get().to_string()
                on:change=move |ev| {
                    if let Ok(v) = T::from_str(&event_target_value(&ev)) {
                        on_change.run(v);
                    }
                }
                class="w-full px-4 py-3 rounded-xl glass border border-white/20 text-white"
            >
                {options
                    .iter()
                    .map(|&opt| view! {
                        <option
                            value=opt.to_string()
                            selected=move || value.get() == opt
                            class="bg-gray-800 text-white"
                        >
                            {option_label(opt)}
                        </option>
                    })
                    .collect_view()}
            </select>
        </div>
    }
}

#[component]
pub fn SettingsDialog(
    #[prop(into)] on_close: Callback<()>,
    #[prop(into)] on_error: Callback<HomeError>,
) -> impl IntoView {
    let auth = use_auth();
    let user = move || auth.state.with(|s| s.user.clone());

    let editor = RwSignal::new(PreferenceEditor::new(user().as_ref()));
    let draft = move || editor.with(PreferenceEditor::draft);
    let saving = move || editor.with(PreferenceEditor::is_saving);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(mut pending) = editor.try_update(PreferenceEditor::begin_save).flatten() else {
            return;
        };

        let session = auth.session();
        spawn_local(async move {
            let outcome = pending.save(&session).await;
            // 副本带回保存状态与错误提示；对话框可能已被关闭
            let _ = editor.try_set(pending);
            match outcome {
                SaveOutcome::Saved => on_close.run(()),
                // 保持打开，错误显示在表单内，允许重试
                SaveOutcome::Failed { error, .. } => on_error.run(error),
            }
        });
    };

    let member_since = move || {
        auth.state.with(|s| {
            let user = s.user.as_ref()?;
            let created = user.created_at.as_ref()?;
            Some(format_date(created.date_naive(), user.preferences.language))
        })
        .unwrap_or_else(|| "N/A".to_string())
    };

    view! {
        <div class="fixed inset-0 bg-black/50 flex items-center justify-center z-50 p-4">
            <div class="glass p-6 rounded-2xl max-w-md w-full settings-modal">
                <div class="flex justify-between items-center mb-6">
                    <h2 class="text-xl font-semibold text-white">"সেটিংস"</h2>
                    <button
                        type="button"
                        class="text-white/70 hover:text-white transition-colors"
                        on:click=move |_| on_close.run(())
                    >
                        <Close attr:class="w-6 h-6" />
                    </button>
                </div>

                <Show when=move || editor.with(|e| e.error().is_some())>
                    <div role="alert" class="error-message mb-4">
                        {move || editor.with(|e| e.error().unwrap_or_default().to_string())}
                    </div>
                </Show>

                <form on:submit=on_submit class="space-y-4">
                    <EnumSelect
                        label="থিম"
                        options=Theme::ALL
                        option_label=theme_label
                        value=Signal::derive(move || draft().theme)
                        on_change=move |v: Theme| editor.update(|e| e.set_theme(v))
                    />
                    <EnumSelect
                        label="ডিফল্ট সার্চ ইঞ্জিন"
                        options=SearchEngineKey::ALL
                        option_label=|k: SearchEngineKey| k.label()
                        value=Signal::derive(move || draft().default_search_engine)
                        on_change=move |v: SearchEngineKey| editor.update(|e| e.set_search_engine(v))
                    />
                    <EnumSelect
                        label="ঘড়ির ফরম্যাট"
                        options=ClockFormat::ALL
                        option_label=clock_label
                        value=Signal::derive(move || draft().clock_format)
                        on_change=move |v: ClockFormat| editor.update(|e| e.set_clock_format(v))
                    />
                    <EnumSelect
                        label="ভাষা"
                        options=Language::ALL
                        option_label=language_label
                        value=Signal::derive(move || draft().language)
                        on_change=move |v: Language| editor.update(|e| e.set_language(v))
                    />

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
                            disabled=saving
                        >
                            {move || if saving() { "সেভ করা হচ্ছে..." } else { "সেভ করুন" }}
                        </button>
                    </div>
                </form>

                <div class="mt-6 pt-4 border-t border-white/10">
                    <h3 class="text-white/80 text-sm font-medium mb-2">"অ্যাকাউন্ট তথ্য"</h3>
                    <div class="space-y-2 text-sm">
                        <div class="flex justify-between">
                            <span class="text-white/60">"নাম:"</span>
                            <span class="text-white">{move || user().map(|u| u.name).unwrap_or_default()}</span>
                        </div>
                        <div class="flex justify-between">
                            <span class="text-white/60">"ইমেইল:"</span>
                            <span class="text-white">{move || user().map(|u| u.email).unwrap_or_default()}</span>
                        </div>
                        <div class="flex justify-between">
                            <span class="text-white/60">"সদস্য হয়েছেন:"</span>
                            <span class="text-white">{member_since}</span>
                        </div>
                    </div>
                </div>
            </div>
        </div>
    }
}
