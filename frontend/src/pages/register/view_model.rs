use crate::{
    api::ApiError,
    state::{
        auth::{self, use_auth},
        machine::{OtpInput, RegistrationDetails},
        session::{RegisterStep, Session},
    },
    utils::validation,
};
use leptos::*;

#[derive(Clone, Copy)]
pub struct RegisterViewModel {
    pub email: RwSignal<String>,
    pub otp: RwSignal<String>,
    pub username: RwSignal<String>,
    pub firstname: RwSignal<String>,
    pub lastname: RwSignal<String>,
    pub password: RwSignal<String>,
    pub confirm_password: RwSignal<String>,
    pub form_error: RwSignal<Option<String>>,
    pub session: ReadSignal<Session>,
    pub step: Memo<RegisterStep>,
    pub request_action: Action<String, Result<(), ApiError>>,
    pub verify_action: Action<OtpInput, Result<(), ApiError>>,
    pub complete_action: Action<RegistrationDetails, Result<(), ApiError>>,
}

pub fn use_register_view_model() -> RegisterViewModel {
    let auth = use_auth();
    let session = auth.session;
    let step = create_memo(move |_| session.get().register_step);

    let machine = auth.machine.clone();
    on_cleanup(move || machine.clear_messages());

    RegisterViewModel {
        email: create_rw_signal(String::new()),
        otp: create_rw_signal(String::new()),
        username: create_rw_signal(String::new()),
        firstname: create_rw_signal(String::new()),
        lastname: create_rw_signal(String::new()),
        password: create_rw_signal(String::new()),
        confirm_password: create_rw_signal(String::new()),
        form_error: create_rw_signal(None),
        session,
        step,
        request_action: auth::use_request_register_otp_action(),
        verify_action: auth::use_verify_register_otp_action(),
        complete_action: auth::use_complete_registration_action(),
    }
}

fn required(value: &str, label: &str) -> Result<String, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        Err(format!("{} is required", label))
    } else {
        Ok(trimmed.to_string())
    }
}

impl RegisterViewModel {
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

    pub fn submit_details(&self) {
        if self.is_busy() {
            return;
        }
        match self.collect_details() {
            Ok(details) => {
                self.form_error.set(None);
                self.complete_action.dispatch(details);
            }
            Err(msg) => self.form_error.set(Some(msg)),
        }
    }

    fn collect_details(&self) -> Result<RegistrationDetails, String> {
        let username = required(&self.username.get_untracked(), "Username")?;
        let firstname = required(&self.firstname.get_untracked(), "First name")?;
        let lastname = required(&self.lastname.get_untracked(), "Last name")?;
        let password = self.password.get_untracked();
        validation::validate_confirmation(&password, &self.confirm_password.get_untracked())?;
        Ok(RegistrationDetails {
            username,
            firstname,
            lastname,
            password,
        })
    }
}
