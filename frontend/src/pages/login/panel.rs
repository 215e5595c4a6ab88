use super::view_model::use_login_view_model;
use crate::{
    components::{
        forms::{AuthCard, SubmitButton, TextField},
        layout::LoadingSpinner,
        messages::StatusMessages,
    },
    state::session::LoginStep,
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn LoginPanel() -> impl IntoView {
    let vm = use_login_view_model();
    let pending = vm.pending();

    view! {
        <AuthCard title="Welcome Back">
            <StatusMessages error=vm.error() success=vm.success()/>
            {move || match vm.step.get() {
                LoginStep::Login => view! {
                    <form
                        class="space-y-4"
                        on:submit=move |ev: SubmitEvent| {
                            ev.prevent_default();
                            vm.submit_credentials();
                        }
                    >
                        <TextField id="email" label="Email" input_type="email" autocomplete="email" value=vm.email/>
                        <TextField
                            id="password"
                            label="Password"
                            input_type="password"
                            autocomplete="current-password"
                            value=vm.password
                        />
                        <SubmitButton pending=pending label="Login" pending_label="Sending code..."/>
                        <div class="flex justify-between text-sm">
                            <a href="/forgot-password" class="text-link hover:text-link-hover">"Forgot password?"</a>
                            <a href="/register" class="text-link hover:text-link-hover">"Create an account"</a>
                        </div>
                    </form>
                }
                .into_view(),
                LoginStep::Otp => view! {
                    <form
                        class="space-y-4"
                        on:submit=move |ev: SubmitEvent| {
                            ev.prevent_default();
                            vm.submit_otp();
                        }
                    >
                        <p class="text-sm text-fg-muted">
                            "Enter the code we sent to " {move || vm.email.get()}
                        </p>
                        <TextField id="otp" label="Verification code" autocomplete="one-time-code" value=vm.otp/>
                        <SubmitButton pending=pending label="Verify" pending_label="Verifying..."/>
                        <button
                            type="button"
                            class="w-full text-sm text-link hover:text-link-hover"
                            on:click=move |_| vm.start_over()
                        >
                            "Use a different account"
                        </button>
                    </form>
                }
                .into_view(),
                LoginStep::Authenticated => view! { <LoadingSpinner/> }.into_view(),
            }}
        </AuthCard>
    }
}
