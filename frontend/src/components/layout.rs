use crate::{
    components::theme::ThemeToggle,
    state::auth::use_auth,
    utils::navigation,
};
use leptos::*;

const NAV_LINKS: &[(&str, &str)] = &[("/dashboard", "Dashboard")];

#[component]
pub fn Header(menu_open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let session = auth.session;
    let machine = store_value(auth.machine.clone());
    let display_name = move || {
        session
            .get()
            .user
            .map(|user| user.display_name())
            .unwrap_or_default()
    };
    let on_logout = move |_| {
        menu_open.set(false);
        machine.with_value(|m| m.logout());
        navigation::redirect("/login");
    };
    let toggle_menu = move |_| menu_open.update(|open| *open = !*open);

    view! {
        <header class="bg-surface-elevated shadow-sm border-b border-border">
            <div class="px-4 sm:px-6 lg:px-8">
                <div class="flex justify-between items-center h-16">
                    <div class="flex items-center gap-3">
                        <button
                            type="button"
                            class="lg:hidden inline-flex items-center justify-center p-2 rounded-md text-fg-muted hover:text-fg hover:bg-action-ghost-bg-hover"
                            on:click=toggle_menu
                            aria-expanded=move || menu_open.get().to_string()
                            aria-controls="sidebar-nav"
                        >
                            <span class="sr-only">
                                {move || if menu_open.get() { "Close menu" } else { "Open menu" }}
                            </span>
                            <svg
                                class="h-6 w-6"
                                xmlns="http://www.w3.org/2000/svg"
                                fill="none"
                                viewBox="0 0 24 24"
                                stroke="currentColor"
                            >
                                <path
                                    stroke-linecap="round"
                                    stroke-linejoin="round"
                                    stroke-width="2"
                                    d="M4 6h16M4 12h16M4 18h16"
                                />
                            </svg>
                        </button>
                        <h1 class="text-xl font-semibold text-fg">"authdeck"</h1>
                    </div>
                    <div class="flex items-center gap-4">
                        <span class="hidden sm:inline text-sm text-fg-muted">{display_name}</span>
                        <ThemeToggle/>
                        <button
                            on:click=on_logout
                            class="text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                        >
                            "Logout"
                        </button>
                    </div>
                </div>
            </div>
        </header>
    }
}

#[component]
pub fn Sidebar(menu_open: RwSignal<bool>) -> impl IntoView {
    view! {
        <aside
            id="sidebar-nav"
            class=move || sidebar_class(menu_open.get())
        >
            <nav class="px-4 py-6 space-y-2">
                {NAV_LINKS
                    .iter()
                    .map(|(href, label)| {
                        view! {
                            <a
                                href=*href
                                class="block text-fg-muted hover:text-fg px-3 py-2 rounded-md text-sm font-medium hover:bg-action-ghost-bg-hover"
                                on:click=move |_| menu_open.set(false)
                            >
                                {*label}
                            </a>
                        }
                    })
                    .collect_view()}
            </nav>
        </aside>
    }
}

fn sidebar_class(open: bool) -> &'static str {
    if open {
        "block w-full lg:w-64 border-b lg:border-b-0 lg:border-r border-border bg-surface-elevated"
    } else {
        "hidden lg:block lg:w-64 lg:border-r border-border bg-surface-elevated"
    }
}

#[component]
pub fn Layout(children: Children) -> impl IntoView {
    let menu_open = create_rw_signal(false);
    view! {
        <div class="min-h-screen bg-surface">
            <Header menu_open=menu_open/>
            <div class="lg:flex">
                <Sidebar menu_open=menu_open/>
                <main class="flex-1 py-6 px-4 sm:px-6 lg:px-8">{children()}</main>
            </div>
        </div>
    }
}

#[component]
pub fn LoadingSpinner() -> impl IntoView {
    view! {
        <div class="flex justify-center items-center p-8">
            <div class="animate-spin rounded-full h-8 w-8 border-b-2 border-action-primary-bg"></div>
        </div>
    }
}
