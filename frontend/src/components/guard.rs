use crate::{components::layout::LoadingSpinner, state::auth::use_auth, utils::navigation};
use leptos::*;

#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();
    let session = auth.session;
    let is_authenticated = create_memo(move |_| session.get().is_authenticated);
    let is_hydrated = create_memo(move |_| session.get().hydrated);
    create_effect(move |_| {
        if is_hydrated.get() && !is_authenticated.get() {
            navigation::redirect("/login");
        }
    });
    view! {
        <Show
            when=move || should_render_children(is_authenticated.get(), is_hydrated.get())
            fallback=move || {
                if is_hydrated.get() {
                    ().into_view()
                } else {
                    view! { <LoadingSpinner /> }.into_view()
                }
            }
        >
            {children()}
        </Show>
    }
}

fn should_render_children(is_authenticated: bool, is_hydrated: bool) -> bool {
    is_authenticated && is_hydrated
}
