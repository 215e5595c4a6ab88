use super::view_model::{use_forgot_password_view_model, ResetStage};
use crate::components::{
    forms::{AuthCard, SubmitButton, TextField},
    messages::StatusMessages,
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn ForgotPasswordPanel() -> impl IntoView {
    let vm = use_forgot_password_view_model();
    let pending = vm.pending();

    view! {
        <AuthCard title="Reset Password">
            <StatusMessages error=vm.error() success=vm.success()/>
            {move || match vm.stage.get() {
                ResetStage::Email => view! {
                    <form
                        class="space-y-4"
                        on:submit=move |ev: SubmitEvent| {
                            ev.prevent_default();
                            vm.submit_email();
                        }
                    >
                        <p class="text-sm text-fg-muted">
                            "Enter your email address and we'll send you a verification code."
                        </p>
                        <TextField id="email" label="Email" input_type="email" autocomplete="email" value=vm.email/>
                        <SubmitButton pending=pending label="Send code" pending_label="Sending..."/>
                    </form>
                }
                .into_view(),
                ResetStage::Otp => view! {
                    <form
                        class="space-y-4"
                        on:submit=move |ev: SubmitEvent| {
                            ev.prevent_default();
                            vm.submit_otp();
                        }
                    >
                        <TextField id="otp" label="Verification code" autocomplete="one-time-code" value=vm.otp/>
                        <SubmitButton pending=pending label="Verify" pending_label="Verifying..."/>
                    </form>
                }
                .into_view(),
                ResetStage::NewPassword => view! {
                    <form
                        class="space-y-4"
                        on:submit=move |ev: SubmitEvent| {
                            ev.prevent_default();
                            vm.submit_new_password();
                        }
                    >
                        <TextField
                            id="new-password"
                            label="New password"
                            input_type="password"
                            autocomplete="new-password"
                            value=vm.new_password
                        />
                        <TextField
                            id="confirm-password"
                            label="Confirm password"
                            input_type="password"
                            autocomplete="new-password"
                            value=vm.confirm_password
                        />
                        <SubmitButton pending=pending label="Reset password" pending_label="Saving..."/>
                    </form>
                }
                .into_view(),
                ResetStage::Done => ().into_view(),
            }}
            <p class="text-sm text-center">
                <a href="/login" class="text-link hover:text-link-hover">"Back to login"</a>
            </p>
        </AuthCard>
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::test_support::ssr::render_to_string;

    #[test]
    fn forgot_password_panel_asks_for_email() {
        let html = render_to_string(|| view! { <ForgotPasswordPanel/> });
        assert!(html.contains("Reset Password"));
        assert!(html.contains("verification code"));
        assert!(html.contains("Back to login"));
    }
}
