use crate::state::theme::{use_theme, Theme};
use leptos::*;

#[component]
pub fn ThemeToggle() -> impl IntoView {
    let theme_state = use_theme();
    let current_theme = theme_state.current();

    let on_click = move |_| {
        theme_state.toggle();
    };

    view! {
        <button
            type="button"
            class="relative inline-flex h-6 w-11 items-center rounded-full bg-gray-200 dark:bg-gray-700 transition-colors focus:outline-none focus:ring-2 focus:ring-primary-500 focus:ring-offset-2"
            on:click=on_click
            aria-label="Toggle theme"
        >
            <span class="sr-only">"Toggle theme"</span>
            <span class=move || knob_class(current_theme.get())/>
        </button>
    }
}

fn knob_class(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => "inline-block h-4 w-4 transform rounded-full transition-transform translate-x-6 bg-primary-600",
        Theme::Light => "inline-block h-4 w-4 transform rounded-full transition-transform translate-x-1 bg-white",
    }
}
