use super::view_model::use_register_view_model;
use crate::{
    components::{
        forms::{AuthCard, SubmitButton, TextField},
        messages::StatusMessages,
    },
    state::session::RegisterStep,
};
use leptos::{ev::SubmitEvent, *};

#[component]
pub fn RegisterPanel() -> impl IntoView {
    let vm = use_register_view_model();
    let pending = vm.pending();

    view! {
        <AuthCard title="Create Account">
            <StatusMessages error=vm.error() success=vm.success()/>
            {move || match vm.step.get() {
                RegisterStep::Email => view! {
                    <form
                        class="space-y-4"
                        on:submit=move |ev: SubmitEvent| {
                            ev.prevent_default();
                            vm.submit_email();
                        }
                    >
                        <TextField id="email" label="Email" input_type="email" autocomplete="email" value=vm.email/>
                        <SubmitButton pending=pending label="Send code" pending_label="Sending..."/>
                    </form>
                }
                .into_view(),
                RegisterStep::Otp => view! {
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
                RegisterStep::Details => view! {
                    <form
                        class="space-y-4"
                        on:submit=move |ev: SubmitEvent| {
                            ev.prevent_default();
                            vm.submit_details();
                        }
                    >
                        <TextField id="username" label="Username" autocomplete="username" value=vm.username/>
                        <div class="grid grid-cols-2 gap-3">
                            <TextField id="firstname" label="First name" autocomplete="given-name" value=vm.firstname/>
                            <TextField id="lastname" label="Last name" autocomplete="family-name" value=vm.lastname/>
                        </div>
                        <TextField
                            id="password"
                            label="Password"
                            input_type="password"
                            autocomplete="new-password"
                            value=vm.password
                        />
                        <TextField
                            id="confirm-password"
                            label="Confirm password"
                            input_type="password"
                            autocomplete="new-password"
                            value=vm.confirm_password
                        />
                        <SubmitButton pending=pending label="Register" pending_label="Registering..."/>
                    </form>
                }
                .into_view(),
                RegisterStep::Done => view! {
                    <a
                        href="/login"
                        class="block w-full py-2 text-center rounded-lg bg-action-primary-bg text-action-primary-text font-semibold"
                    >
                        "Go to login"
                    </a>
                }
                .into_view(),
            }}
            <p class="text-sm text-center text-fg-muted">
                "Already have an account? "
                <a href="/login" class="text-link hover:text-link-hover">"Login"</a>
            </p>
        </AuthCard>
    }
}
