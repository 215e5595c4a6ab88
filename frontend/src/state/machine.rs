use std::{cell::RefCell, future::Future, rc::Rc};

use crate::{
    api::{
        ApiError, AuthTransport, EmailRequest, LoginRequest, RegisterRequest,
        ResetPasswordRequest, Tokens, User, VerifyOtpRequest,
    },
    state::session::{RequestPhase, Session},
    utils::storage::{KeyValueStore, ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY},
};

pub const MISSING_SECRET: &str = "Your code has expired. Please request a new one.";
pub const MISSING_REGISTRATION_TOKEN: &str = "Please verify your email before registering.";
pub const MISSING_RESET_TOKEN: &str = "Please verify the reset code first.";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match";

type Listener = Rc<dyn Fn(&Session)>;

/// Email plus the code the user typed; the secret comes from the session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OtpInput {
    pub email: String,
    pub otp: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrationDetails {
    pub username: String,
    pub firstname: String,
    pub lastname: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPassword {
    pub new_password: String,
    pub confirm_password: String,
}

/// Owns the [`Session`] and runs every transition against it.
///
/// Duplicate invocations are not suppressed; when two requests race the
/// last one to resolve wins.
pub struct SessionMachine {
    session: RefCell<Session>,
    transport: Rc<dyn AuthTransport>,
    store: Rc<dyn KeyValueStore>,
    listeners: RefCell<Vec<Listener>>,
}

impl SessionMachine {
    pub fn new(transport: Rc<dyn AuthTransport>, store: Rc<dyn KeyValueStore>) -> Self {
        Self {
            session: RefCell::new(Session::default()),
            transport,
            store,
            listeners: RefCell::new(Vec::new()),
        }
    }

    pub fn snapshot(&self) -> Session {
        self.session.borrow().clone()
    }

    /// Registers `listener`; it runs after every state change.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) {
        self.listeners.borrow_mut().push(Rc::new(listener));
    }

    fn update(&self, f: impl FnOnce(&mut Session)) {
        let snapshot = {
            let mut session = self.session.borrow_mut();
            f(&mut session);
            session.clone()
        };
        let listeners: Vec<Listener> = self.listeners.borrow().clone();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    fn reject(&self, transition: &str, message: &str) -> ApiError {
        log::warn!("{} rejected before sending: {}", transition, message);
        self.update(|s| s.on_validation_failed(message));
        ApiError::validation(message)
    }

    async fn run<T, F>(
        &self,
        transition: &str,
        reduce: fn(&mut Session, RequestPhase<T>),
        request: F,
    ) -> Result<T, ApiError>
    where
        T: Clone,
        F: Future<Output = Result<T, ApiError>>,
    {
        self.run_with(transition, reduce, request, |_| {}).await
    }

    /// Like [`Self::run`], with `before_fulfilled` applied to the payload
    /// before listeners learn about the success.
    async fn run_with<T, F>(
        &self,
        transition: &str,
        reduce: fn(&mut Session, RequestPhase<T>),
        request: F,
        before_fulfilled: impl FnOnce(&T),
    ) -> Result<T, ApiError>
    where
        T: Clone,
        F: Future<Output = Result<T, ApiError>>,
    {
        log::debug!("{} started", transition);
        self.update(|s| reduce(s, RequestPhase::Pending));
        match request.await {
            Ok(payload) => {
                log::info!("{} succeeded", transition);
                before_fulfilled(&payload);
                self.update(|s| reduce(s, RequestPhase::Fulfilled(payload.clone())));
                Ok(payload)
            }
            Err(err) => {
                log::warn!("{} failed: {}", transition, err);
                self.update(|s| reduce(s, RequestPhase::Rejected(err.error.clone())));
                Err(err)
            }
        }
    }

    fn current_secret(&self) -> Option<String> {
        self.session.borrow().secret.clone()
    }

    pub async fn request_login_otp(&self, request: LoginRequest) -> Result<(), ApiError> {
        self.run(
            "request_login_otp",
            Session::on_request_login_otp,
            self.transport.login(request),
        )
        .await
        .map(|_| ())
    }

    pub async fn verify_login_otp(&self, input: OtpInput) -> Result<(), ApiError> {
        let Some(secret) = self.current_secret() else {
            return Err(self.reject("verify_login_otp", MISSING_SECRET));
        };
        let request = VerifyOtpRequest {
            email: input.email,
            otp: input.otp,
            secret,
        };
        self.run_with(
            "verify_login_otp",
            Session::on_verify_login_otp,
            self.transport.verify_login(request),
            |response| self.persist_session(&response.tokens, &response.user),
        )
        .await
        .map(|_| ())
    }

    pub async fn request_register_otp(&self, email: String) -> Result<(), ApiError> {
        self.run(
            "request_register_otp",
            Session::on_request_register_otp,
            self.transport.request_register_otp(EmailRequest { email }),
        )
        .await
        .map(|_| ())
    }

    pub async fn verify_register_otp(&self, input: OtpInput) -> Result<(), ApiError> {
        let Some(secret) = self.current_secret() else {
            return Err(self.reject("verify_register_otp", MISSING_SECRET));
        };
        let request = VerifyOtpRequest {
            email: input.email,
            otp: input.otp,
            secret,
        };
        self.run(
            "verify_register_otp",
            Session::on_verify_register_otp,
            self.transport.verify_register_otp(request),
        )
        .await
        .map(|_| ())
    }

    pub async fn complete_registration(
        &self,
        details: RegistrationDetails,
    ) -> Result<(), ApiError> {
        let token = self.session.borrow().registration_token.clone();
        let Some(registration_token) = token else {
            return Err(self.reject("complete_registration", MISSING_REGISTRATION_TOKEN));
        };
        let request = RegisterRequest {
            username: details.username,
            firstname: details.firstname,
            lastname: details.lastname,
            password: details.password,
            registration_token,
        };
        self.run(
            "complete_registration",
            Session::on_complete_registration,
            self.transport.register(request),
        )
        .await
        .map(|_| ())
    }

    pub async fn request_password_reset_otp(&self, email: String) -> Result<(), ApiError> {
        self.run(
            "request_password_reset_otp",
            Session::on_request_password_reset_otp,
            self.transport.request_password_reset(EmailRequest { email }),
        )
        .await
        .map(|_| ())
    }

    pub async fn verify_password_reset_otp(&self, input: OtpInput) -> Result<(), ApiError> {
        let Some(secret) = self.current_secret() else {
            return Err(self.reject("verify_password_reset_otp", MISSING_SECRET));
        };
        let request = VerifyOtpRequest {
            email: input.email,
            otp: input.otp,
            secret,
        };
        self.run(
            "verify_password_reset_otp",
            Session::on_verify_password_reset_otp,
            self.transport.verify_password_reset(request),
        )
        .await
        .map(|_| ())
    }

    pub async fn complete_password_reset(&self, password: NewPassword) -> Result<(), ApiError> {
        let token = self.session.borrow().reset_token.clone();
        let Some(reset_token) = token else {
            return Err(self.reject("complete_password_reset", MISSING_RESET_TOKEN));
        };
        if password.new_password != password.confirm_password {
            return Err(self.reject("complete_password_reset", PASSWORD_MISMATCH));
        }
        let request = ResetPasswordRequest {
            new_password: password.new_password,
            confirm_password: password.confirm_password,
            reset_token,
        };
        self.run(
            "complete_password_reset",
            Session::on_complete_password_reset,
            self.transport.reset_password(request),
        )
        .await
        .map(|_| ())
    }

    pub fn logout(&self) {
        for key in [ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY, USER_KEY] {
            if let Err(err) = self.store.remove(key) {
                log::warn!("failed to remove {} from storage: {}", key, err);
            }
        }
        self.update(Session::logout);
        log::info!("signed out");
    }

    /// Abandons a pending login challenge. Storage and the other flows are
    /// left alone.
    pub fn reset_login_step(&self) {
        self.update(Session::reset_login_step);
    }

    pub fn clear_messages(&self) {
        self.update(Session::clear_messages);
    }

    /// Loads tokens (and the cached user) written by a previous session.
    /// Returns whether a session was restored.
    pub fn restore_from_persistent_store(&self) -> bool {
        let tokens = self.stored_tokens();
        let user = tokens.as_ref().and_then(|_| self.stored_user());
        let restored = tokens.is_some();
        self.update(|s| s.restore(tokens, user));
        if restored {
            log::info!("session restored from storage");
        }
        restored
    }

    fn read(&self, key: &str) -> Option<String> {
        match self.store.get(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("failed to read {} from storage: {}", key, err);
                None
            }
        }
    }

    fn stored_tokens(&self) -> Option<Tokens> {
        Some(Tokens {
            access_token: self.read(ACCESS_TOKEN_KEY)?,
            refresh_token: self.read(REFRESH_TOKEN_KEY)?,
        })
    }

    fn stored_user(&self) -> Option<User> {
        let raw = self.read(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(err) => {
                log::warn!("ignoring unreadable cached user: {}", err);
                None
            }
        }
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(err) = self.store.set(key, value) {
            log::warn!("failed to write {} to storage: {}", key, err);
        }
    }

    fn persist_session(&self, tokens: &Tokens, user: &User) {
        self.write(ACCESS_TOKEN_KEY, &tokens.access_token);
        self.write(REFRESH_TOKEN_KEY, &tokens.refresh_token);
        match serde_json::to_string(user) {
            Ok(raw) => self.write(USER_KEY, &raw),
            Err(err) => log::warn!("failed to serialize user: {}", err),
        }
    }
}
