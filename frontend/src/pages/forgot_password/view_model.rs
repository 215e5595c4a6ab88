use crate::{
    api::ApiError,
    state::{
        auth::{self, use_auth},
        machine::{NewPassword, OtpInput},
        session::Session,
    },
    utils::validation,
};
use leptos::*;

/// Page-local progress through the reset flow. The session only tracks the
/// reset token, so the page advances on each successful action instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetStage {
    Email,
    Otp,
    NewPassword,
    Done,
}

#[derive(Clone, Copy)]
pub struct ForgotPasswordViewModel {
    pub email: RwSignal<String>,
    pub otp: RwSignal<String>,
    pub new_password: RwSignal<String>,
    pub confirm_password: RwSignal<String>,
    pub form_error: RwSignal<Option<String>>,
    pub stage: RwSignal<ResetStage>,
    pub session: ReadSignal<Session>,
    pub request_action: Action<String, Result<(), ApiError>>,
    pub verify_action: Action<OtpInput, Result<(), ApiError>>,
    pub reset_action: Action<NewPassword, Result<(), ApiError>>,
}

fn advance_on_success(
    action: Action<impl Clone + 'static, Result<(), ApiError>>,
    stage: RwSignal<ResetStage>,
    next: ResetStage,
) {
    create_effect(move |_| {
        if let Some(Ok(())) = action.value().get() {
            stage.set(next);
        }
    });
}

pub fn use_forgot_password_view_model() -> ForgotPasswordViewModel {
    let auth = use_auth();
    let stage = create_rw_signal(ResetStage::Email);

    let request_action = auth::use_request_password_reset_otp_action();
    let verify_action = auth::use_verify_password_reset_otp_action();
    let reset_action = auth::use_complete_password_reset_action();
    advance_on_success(request_action, stage, ResetStage::Otp);
    advance_on_success(verify_action, stage, ResetStage::NewPassword);
    advance_on_success(reset_action, stage, ResetStage::Done);

    let machine = auth.machine.clone();
    on_cleanup(move || machine.clear_messages());

    ForgotPasswordViewModel {
        email: create_rw_signal(String::new()),
        otp: create_rw_signal(String::new()),
        new_password: create_rw_signal(String::new()),
        confirm_password: create_rw_signal(String::new()),
        form_error: create_rw_signal(None),
        stage,
        session: auth.session,
        request_action,
        verify_action,
        reset_action,
    }
}

impl ForgotPasswordViewModel {
    pub fn error(&self) -> Signal<Option<String>> {
        let form_error = self.form_error;
        let session = self.session;
        Signal::derive(move || form_error.get().or_else(|| session.get().error))
    }

    pub fn success(&self) -> Signal<Option<String>> {
        let session = self.session;
        Signal::derive(move || session.get().success_message)
    }

    pub fn pending(&self) -> Signal<bool> {
        let session = self.session;
        Signal::derive(move || session.get().loading)
    }

    fn is_busy(&self) -> bool {
        self.session.get_untracked().loading
    }

    pub fn submit_email(&self) {
        if self.is_busy() {
            return;
        }
        match validation::validate_email(&self.email.get_untracked()) {
            Ok(email) => {
                self.form_error.set(None);
                self.request_action.dispatch(email);
            }
            Err(msg) => self.form_error.set(Some(msg)),
        }
    }

    pub fn submit_otp(&self) {
        if self.is_busy() {
            return;
        }
        match validation::normalize_otp(&self.otp.get_untracked()) {
            Ok(otp) => {
                self.form_error.set(None);
                self.verify_action.dispatch(OtpInput {
                    email: self.email.get_untracked().trim().to_string(),
                    otp,
                });
            }
            Err(msg) => self.form_error.set(Some(msg)),
        }
    }

    pub fn submit_new_password(&self) {
        if self.is_busy() {
            return;
        }
        let new_password = self.new_password.get_untracked();
        let confirm_password = self.confirm_password.get_untracked();
        match validation::validate_confirmation(&new_password, &confirm_password) {
            Ok(()) => {
                self.form_error.set(None);
                self.reset_action.dispatch(NewPassword {
                    new_password,
                    confirm_password,
                });
            }
            Err(msg) => self.form_error.set(Some(msg)),
        }
    }
}
