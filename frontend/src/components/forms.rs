use leptos::*;

#[component]
pub fn AuthCard(title: &'static str, children: Children) -> impl IntoView {
    view! {
        <div class="flex items-center justify-center min-h-screen bg-surface px-4">
            <div class="w-full max-w-md p-6 bg-surface-elevated rounded-xl shadow-lg space-y-4">
                <h2 class="text-3xl font-bold text-center text-fg">{title}</h2>
                {children()}
            </div>
        </div>
    }
}

#[component]
pub fn TextField(
    id: &'static str,
    label: &'static str,
    value: RwSignal<String>,
    #[prop(default = "text")] input_type: &'static str,
    #[prop(default = "off")] autocomplete: &'static str,
) -> impl IntoView {
    view! {
        <div>
            <label for=id class="block text-sm font-medium text-fg mb-1">{label}</label>
            <input
                id=id
                name=id
                type=input_type
                autocomplete=autocomplete
                required
                class="w-full px-3 py-2 rounded-lg border border-form-control-border bg-form-control-bg text-form-control-text focus:outline-none focus:ring-2 focus:ring-action-primary-focus"
                prop:value=move || value.get()
                on:input=move |ev| value.set(event_target_value(&ev))
            />
        </div>
    }
}

#[component]
pub fn SubmitButton(
    #[prop(into)] pending: Signal<bool>,
    label: &'static str,
    pending_label: &'static str,
) -> impl IntoView {
    view! {
        <button
            type="submit"
            disabled=move || pending.get()
            class="w-full py-2 rounded-lg bg-action-primary-bg hover:bg-action-primary-bg_hover text-action-primary-text font-semibold transition-colors disabled:opacity-50"
        >
            {move || if pending.get() { pending_label } else { label }}
        </button>
    }
}
