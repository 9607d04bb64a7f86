use leptos::prelude::*;
use std::time::Duration;
use tabhome::clock::{format_date, format_time};
use tabhome_shared::{ClockFormat, Language};

/// 每秒刷新的时钟
#[component]
pub fn Clock(
    #[prop(into)] format: Signal<ClockFormat>,
    #[prop(into)] language: Signal<Language>,
) -> impl IntoView {
    let (now, set_now) = signal(chrono::Local::now().naive_local());

    if let Ok(handle) = set_interval_with_handle(
        move || set_now.set(chrono::Local::now().naive_local()),
        Duration::from_secs(1),
    ) {
        on_cleanup(move || handle.clear());
    }

    view! {
        <div class="text-center animate-fade-in">
            <div class="glass p-6 rounded-3xl inline-block animate-pulse-glow">
                <div class="text-white text-4xl md:text-5xl font-semibold tracking-widest clock mb-2">
                    {move || format_time(&now.get(), format.get())}
                </div>
                <div class="text-white/70 text-lg">
                    {move || format_date(now.get().date(), language.get())}
                </div>
            </div>
        </div>
    }
}
