use crate::{
    api::{ApiError, LoginRequest},
    state::{
        auth::{self, use_auth},
        machine::{OtpInput, SessionMachine},
        session::{LoginStep, Session},
    },
    utils::{navigation, validation},
};
use leptos::*;
use std::rc::Rc;

#[derive(Clone, Copy)]
pub struct LoginViewModel {
    pub email: RwSignal<String>,
    pub password: RwSignal<String>,
    pub otp: RwSignal<String>,
    pub form_error: RwSignal<Option<String>>,
    pub session: ReadSignal<Session>,
    pub step: Memo<LoginStep>,
    pub is_signed_in: Memo<bool>,
    pub request_action: Action<LoginRequest, Result<(), ApiError>>,
    pub verify_action: Action<OtpInput, Result<(), ApiError>>,
    machine: StoredValue<Rc<SessionMachine>>,
}

pub fn use_login_view_model() -> LoginViewModel {
    let auth = use_auth();
    let session = auth.session;
    let step = create_memo(move |_| session.get().step);
    let is_signed_in = create_memo(move |_| session.get().is_signed_in());

    create_effect(move |_| {
        if is_signed_in.get() {
            navigation::redirect("/dashboard");
        }
    });

    let machine = auth.machine.clone();
    on_cleanup(move || machine.clear_messages());

    LoginViewModel {
        email: create_rw_signal(String::new()),
        password: create_rw_signal(String::new()),
        otp: create_rw_signal(String::new()),
        form_error: create_rw_signal(None),
        session,
        step,
        is_signed_in,
        request_action: auth::use_request_login_otp_action(),
        verify_action: auth::use_verify_login_otp_action(),
        machine: store_value(auth.machine),
    }
}

impl LoginViewModel {
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

    pub fn submit_credentials(&self) {
        if self.session.get_untracked().loading {
            return;
        }
        let checked = validation::validate_email(&self.email.get_untracked()).and_then(|email| {
            validation::validate_password(&self.password.get_untracked()).map(|_| email)
        });
        match checked {
            Ok(email) => {
                self.form_error.set(None);
                self.request_action.dispatch(LoginRequest {
                    email,
                    password: self.password.get_untracked(),
                });
            }
            Err(msg) => self.form_error.set(Some(msg)),
        }
    }

    pub fn submit_otp(&self) {
        if self.session.get_untracked().loading {
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

    /// Drops the pending OTP challenge and returns to the credentials form.
    pub fn start_over(&self) {
        self.otp.set(String::new());
        self.form_error.set(None);
        self.machine.with_value(|m| m.reset_login_step());
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod host_tests {
    use super::*;
    use crate::state::{
        auth::{create_auth_context, AuthContext},
        machine::RegistrationDetails,
    };
    use crate::test_support::{
        fake::{endpoint, FakeTransport},
        helpers::user_json,
        ssr::with_runtime,
    };
    use crate::utils::storage::{MemoryStore, THEME_KEY};
    use serde_json::json;

    #[test]
    fn login_view_model_defaults_empty() {
        with_runtime(|| {
            let vm = use_login_view_model();
            assert!(vm.error().get().is_none());
            assert!(vm.email.get().is_empty());
            assert_eq!(vm.step.get(), LoginStep::Login);
        });
    }

    #[test]
    fn invalid_email_is_reported_without_dispatching() {
        with_runtime(|| {
            let vm = use_login_view_model();
            vm.email.set("nope".into());
            vm.password.set("pw".into());
            vm.submit_credentials();
            assert_eq!(
                vm.error().get().as_deref(),
                Some("Please enter a valid email address")
            );
            assert_eq!(vm.request_action.version().get(), 0);
        });
    }

    #[tokio::test]
    async fn registered_user_without_tokens_is_not_signed_in() {
        let runtime = create_runtime();
        let transport = Rc::new(FakeTransport::new());
        transport.respond(endpoint::OTP_REQUEST, json!({ "secret": "S1" }));
        transport.respond(endpoint::OTP_VERIFY, json!({ "registrationToken": "R1" }));
        transport.respond(endpoint::REGISTER, user_json("u1"));
        let ctx = create_auth_context(transport, Rc::new(MemoryStore::new()));
        provide_context::<AuthContext>(ctx.clone());

        ctx.machine.request_register_otp("a@b.com".into()).await.unwrap();
        ctx.machine
            .verify_register_otp(OtpInput {
                email: "a@b.com".into(),
                otp: "123456".into(),
            })
            .await
            .unwrap();
        ctx.machine
            .complete_registration(RegistrationDetails {
                username: "ada".into(),
                firstname: "Ada".into(),
                lastname: "Lovelace".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();

        let vm = use_login_view_model();
        assert!(vm.session.get().is_authenticated);
        assert!(!vm.is_signed_in.get());
        assert_eq!(vm.step.get(), LoginStep::Login);
        runtime.dispose();
    }

    #[tokio::test]
    async fn start_over_returns_to_credentials_and_keeps_storage() {
        let runtime = create_runtime();
        let transport = Rc::new(FakeTransport::new());
        transport.respond(endpoint::LOGIN, json!({ "message": "sent", "secret": "S1" }));
        let store = MemoryStore::with_entries([(THEME_KEY, "dark")]);
        let ctx = create_auth_context(transport, Rc::new(store.clone()));
        provide_context::<AuthContext>(ctx.clone());
        ctx.machine
            .request_login_otp(LoginRequest {
                email: "a@b.com".into(),
                password: "pw".into(),
            })
            .await
            .unwrap();

        let vm = use_login_view_model();
        assert_eq!(vm.step.get(), LoginStep::Otp);
        vm.otp.set("123".into());
        vm.start_over();
        assert_eq!(vm.step.get(), LoginStep::Login);
        assert!(vm.session.get().secret.is_none());
        assert!(vm.otp.get().is_empty());
        assert!(store.contains(THEME_KEY));
        runtime.dispose();
    }

    #[test]
    fn malformed_otp_is_reported_without_dispatching() {
        with_runtime(|| {
            let vm = use_login_view_model();
            vm.otp.set("12".into());
            vm.submit_otp();
            assert!(vm.error().get().unwrap().contains("6-digit"));
            assert_eq!(vm.verify_action.version().get(), 0);
        });
    }
}
