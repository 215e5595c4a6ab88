use crate::{
    api::{ApiClient, ApiError, AuthTransport, LoginRequest},
    state::{
        machine::{NewPassword, OtpInput, RegistrationDetails, SessionMachine},
        session::Session,
    },
    utils::storage::{KeyValueStore, MemoryStore},
};
use leptos::*;
use std::{future::Future, rc::Rc};

/// The process-wide session, shared through context by [`AuthProvider`].
#[derive(Clone)]
pub struct AuthContext {
    pub session: ReadSignal<Session>,
    pub machine: Rc<SessionMachine>,
}

pub fn create_auth_context(
    transport: Rc<dyn AuthTransport>,
    store: Rc<dyn KeyValueStore>,
) -> AuthContext {
    let machine = Rc::new(SessionMachine::new(transport, store));
    machine.restore_from_persistent_store();

    let (session, set_session) = create_signal(machine.snapshot());
    machine.subscribe(move |snapshot| {
        let _ = set_session.try_set(snapshot.clone());
    });

    AuthContext { session, machine }
}

#[component]
pub fn AuthProvider(store: Rc<dyn KeyValueStore>, children: Children) -> impl IntoView {
    let ctx = create_auth_context(Rc::new(ApiClient::new()), store);
    provide_context::<AuthContext>(ctx);
    view! { <>{children()}</> }
}

pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| {
        create_auth_context(Rc::new(ApiClient::new()), Rc::new(MemoryStore::new()))
    })
}

fn machine_action<I, F, Fut>(run: F) -> Action<I, Result<(), ApiError>>
where
    I: Clone + 'static,
    F: Fn(Rc<SessionMachine>, I) -> Fut + 'static,
    Fut: Future<Output = Result<(), ApiError>> + 'static,
{
    let auth = use_auth();
    create_action(move |input: &I| run(auth.machine.clone(), input.clone()))
}

pub fn use_request_login_otp_action() -> Action<LoginRequest, Result<(), ApiError>> {
    machine_action(|machine, request: LoginRequest| async move {
        machine.request_login_otp(request).await
    })
}

pub fn use_verify_login_otp_action() -> Action<OtpInput, Result<(), ApiError>> {
    machine_action(|machine, input: OtpInput| async move {
        machine.verify_login_otp(input).await
    })
}

pub fn use_request_register_otp_action() -> Action<String, Result<(), ApiError>> {
    machine_action(|machine, email: String| async move {
        machine.request_register_otp(email).await
    })
}

pub fn use_verify_register_otp_action() -> Action<OtpInput, Result<(), ApiError>> {
    machine_action(|machine, input: OtpInput| async move {
        machine.verify_register_otp(input).await
    })
}

pub fn use_complete_registration_action() -> Action<RegistrationDetails, Result<(), ApiError>> {
    machine_action(|machine, details: RegistrationDetails| async move {
        machine.complete_registration(details).await
    })
}

pub fn use_request_password_reset_otp_action() -> Action<String, Result<(), ApiError>> {
    machine_action(|machine, email: String| async move {
        machine.request_password_reset_otp(email).await
    })
}

pub fn use_verify_password_reset_otp_action() -> Action<OtpInput, Result<(), ApiError>> {
    machine_action(|machine, input: OtpInput| async move {
        machine.verify_password_reset_otp(input).await
    })
}

pub fn use_complete_password_reset_action() -> Action<NewPassword, Result<(), ApiError>> {
    machine_action(|machine, password: NewPassword| async move {
        machine.complete_password_reset(password).await
    })
}
