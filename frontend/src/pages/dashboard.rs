use crate::state::auth::use_auth;
use leptos::*;

#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = use_auth().session;
    let greeting = move || {
        session
            .get()
            .user
            .map(|user| format!("Signed in as {}", user.display_name()))
    };

    view! {
        <div class="space-y-4">
            <h1 class="text-3xl font-bold text-fg">"Welcome to Dashboard"</h1>
            <p class="text-fg-muted">"You are logged in!"</p>
            {move || greeting().map(|text| view! { <p class="text-sm text-fg-muted">{text}</p> })}
        </div>
    }
}
