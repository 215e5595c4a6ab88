//! Session data and the reducers that move it between workflow steps.
//!
//! Every network-backed transition is described by a [`RequestPhase`] and
//! consumed by exactly one `on_*` method. Reducers never perform I/O; the
//! [`SessionMachine`](super::machine::SessionMachine) drives them.

use crate::api::{
    LoginChallengeResponse, LoginResponse, MessageResponse, OtpChallengeResponse,
    RegistrationTokenResponse, ResetTokenResponse, Tokens, User,
};

pub const REGISTER_OTP_SENT: &str = "OTP sent to your email";
pub const REGISTER_OTP_VERIFIED: &str = "OTP verified. Continue with registration.";
pub const REGISTRATION_COMPLETE: &str = "Registration successful. You can now login.";
pub const RESET_OTP_VERIFIED: &str = "OTP verified. Enter new password.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginStep {
    #[default]
    Login,
    Otp,
    Authenticated,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterStep {
    #[default]
    Email,
    Otp,
    Details,
    Done,
}

/// Lifecycle of a single transition's request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestPhase<T> {
    Pending,
    Fulfilled(T),
    Rejected(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub is_authenticated: bool,
    pub user: Option<User>,
    pub tokens: Option<Tokens>,
    pub loading: bool,
    pub error: Option<String>,
    pub success_message: Option<String>,
    /// Binds an OTP request to the verification that follows it.
    pub secret: Option<String>,
    pub step: LoginStep,
    pub register_step: RegisterStep,
    pub registration_token: Option<String>,
    pub reset_token: Option<String>,
    pub hydrated: bool,
}

impl Session {
    fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    fn begin_clearing_success(&mut self) {
        self.begin();
        self.success_message = None;
    }

    fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }

    /// A transition refused before any request was issued.
    pub fn on_validation_failed(&mut self, message: impl Into<String>) {
        self.fail(message.into());
    }

    pub fn on_request_login_otp(&mut self, phase: RequestPhase<LoginChallengeResponse>) {
        match phase {
            RequestPhase::Pending => self.begin(),
            RequestPhase::Fulfilled(res) => {
                self.loading = false;
                self.success_message = Some(res.message);
                self.secret = Some(res.secret);
                self.step = LoginStep::Otp;
            }
            RequestPhase::Rejected(message) => self.fail(message),
        }
    }

    pub fn on_verify_login_otp(&mut self, phase: RequestPhase<LoginResponse>) {
        match phase {
            RequestPhase::Pending => self.begin(),
            RequestPhase::Fulfilled(res) => {
                self.loading = false;
                self.is_authenticated = true;
                self.user = Some(res.user);
                self.tokens = Some(res.tokens);
                self.step = LoginStep::Authenticated;
            }
            RequestPhase::Rejected(message) => self.fail(message),
        }
    }

    pub fn on_request_register_otp(&mut self, phase: RequestPhase<OtpChallengeResponse>) {
        match phase {
            RequestPhase::Pending => self.begin(),
            RequestPhase::Fulfilled(res) => {
                self.loading = false;
                self.secret = Some(res.secret);
                self.register_step = RegisterStep::Otp;
                self.success_message = Some(REGISTER_OTP_SENT.to_string());
            }
            RequestPhase::Rejected(message) => self.fail(message),
        }
    }

    pub fn on_verify_register_otp(&mut self, phase: RequestPhase<RegistrationTokenResponse>) {
        match phase {
            RequestPhase::Pending => self.begin(),
            RequestPhase::Fulfilled(res) => {
                self.loading = false;
                self.registration_token = Some(res.registration_token);
                self.register_step = RegisterStep::Details;
                self.success_message = Some(REGISTER_OTP_VERIFIED.to_string());
            }
            RequestPhase::Rejected(message) => self.fail(message),
        }
    }

    pub fn on_complete_registration(&mut self, phase: RequestPhase<User>) {
        match phase {
            RequestPhase::Pending => self.begin(),
            RequestPhase::Fulfilled(user) => {
                self.loading = false;
                self.is_authenticated = true;
                self.user = Some(user);
                self.register_step = RegisterStep::Done;
                self.success_message = Some(REGISTRATION_COMPLETE.to_string());
            }
            RequestPhase::Rejected(message) => self.fail(message),
        }
    }

    pub fn on_request_password_reset_otp(&mut self, phase: RequestPhase<OtpChallengeResponse>) {
        match phase {
            RequestPhase::Pending => self.begin_clearing_success(),
            RequestPhase::Fulfilled(res) => {
                self.loading = false;
                self.success_message = res.message;
                self.secret = Some(res.secret);
            }
            RequestPhase::Rejected(message) => self.fail(message),
        }
    }

    pub fn on_verify_password_reset_otp(&mut self, phase: RequestPhase<ResetTokenResponse>) {
        match phase {
            RequestPhase::Pending => self.begin_clearing_success(),
            RequestPhase::Fulfilled(res) => {
                self.loading = false;
                self.reset_token = Some(res.reset_token);
                self.success_message = Some(RESET_OTP_VERIFIED.to_string());
            }
            RequestPhase::Rejected(message) => self.fail(message),
        }
    }

    pub fn on_complete_password_reset(&mut self, phase: RequestPhase<MessageResponse>) {
        match phase {
            RequestPhase::Pending => self.begin_clearing_success(),
            RequestPhase::Fulfilled(res) => {
                self.loading = false;
                self.success_message = Some(res.message);
                self.reset_token = None;
                self.secret = None;
            }
            RequestPhase::Rejected(message) => self.fail(message),
        }
    }

    /// Back to the initial shape. Hydration is a property of the process,
    /// not of the signed-in user, so it survives.
    pub fn logout(&mut self) {
        *self = Session {
            hydrated: self.hydrated,
            ..Session::default()
        };
    }

    /// Drops a pending login challenge without touching the rest of the
    /// session.
    pub fn reset_login_step(&mut self) {
        if self.step == LoginStep::Otp {
            self.step = LoginStep::Login;
            self.secret = None;
        }
    }

    /// Authenticated with tokens in hand. Completing registration
    /// authenticates without issuing tokens, so that alone does not count.
    pub fn is_signed_in(&self) -> bool {
        self.is_authenticated && self.tokens.is_some()
    }

    pub fn clear_messages(&mut self) {
        self.error = None;
        self.success_message = None;
    }

    pub fn restore(&mut self, tokens: Option<Tokens>, user: Option<User>) {
        if let Some(tokens) = tokens {
            self.tokens = Some(tokens);
            self.user = user;
            self.is_authenticated = true;
        }
        self.hydrated = true;
    }
}

#[cfg(test)]
pub(crate) fn invariants_hold(s: &Session) -> bool {
    (s.step != LoginStep::Otp || s.secret.is_some())
        && (s.step != LoginStep::Authenticated || (s.is_authenticated && s.tokens.is_some()))
        && (s.register_step != RegisterStep::Details || s.registration_token.is_some())
        && (s.reset_token.is_none() || s.secret.is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::helpers::{sample_tokens, sample_user};

    fn challenge(secret: &str) -> LoginChallengeResponse {
        LoginChallengeResponse {
            message: "sent".into(),
            secret: secret.into(),
        }
    }

    #[test]
    fn initial_session_is_unauthenticated() {
        let s = Session::default();
        assert!(!s.is_authenticated);
        assert_eq!(s.step, LoginStep::Login);
        assert_eq!(s.register_step, RegisterStep::Email);
        assert!(!s.loading);
        assert!(!s.hydrated);
        assert!(invariants_hold(&s));
    }

    #[test]
    fn pending_sets_loading_and_clears_error_only() {
        let mut s = Session {
            error: Some("old".into()),
            success_message: Some("kept".into()),
            ..Session::default()
        };
        s.on_request_login_otp(RequestPhase::Pending);
        assert!(s.loading);
        assert!(s.error.is_none());
        assert_eq!(s.success_message.as_deref(), Some("kept"));
    }

    #[test]
    fn forgot_password_pending_also_clears_success() {
        let mut s = Session {
            success_message: Some("stale".into()),
            ..Session::default()
        };
        s.on_request_password_reset_otp(RequestPhase::Pending);
        assert!(s.loading);
        assert!(s.success_message.is_none());
    }

    #[test]
    fn login_otp_request_moves_to_otp_step() {
        let mut s = Session::default();
        s.on_request_login_otp(RequestPhase::Pending);
        s.on_request_login_otp(RequestPhase::Fulfilled(challenge("S1")));
        assert!(!s.loading);
        assert_eq!(s.step, LoginStep::Otp);
        assert_eq!(s.secret.as_deref(), Some("S1"));
        assert_eq!(s.success_message.as_deref(), Some("sent"));
        assert!(invariants_hold(&s));
    }

    #[test]
    fn login_verification_authenticates() {
        let mut s = Session::default();
        s.on_request_login_otp(RequestPhase::Fulfilled(challenge("S1")));
        s.on_verify_login_otp(RequestPhase::Pending);
        s.on_verify_login_otp(RequestPhase::Fulfilled(LoginResponse {
            user: sample_user(),
            tokens: sample_tokens(),
        }));
        assert!(s.is_authenticated);
        assert_eq!(s.step, LoginStep::Authenticated);
        assert_eq!(s.tokens, Some(sample_tokens()));
        assert!(invariants_hold(&s));
    }

    #[test]
    fn rejection_sets_error_and_keeps_step() {
        let mut s = Session::default();
        s.on_request_register_otp(RequestPhase::Pending);
        s.on_request_register_otp(RequestPhase::Rejected("email taken".into()));
        assert!(!s.loading);
        assert_eq!(s.error.as_deref(), Some("email taken"));
        assert_eq!(s.register_step, RegisterStep::Email);
        assert!(s.secret.is_none());
    }

    #[test]
    fn registration_walks_email_otp_details_done() {
        let mut s = Session::default();
        s.on_request_register_otp(RequestPhase::Fulfilled(OtpChallengeResponse {
            message: None,
            secret: "S1".into(),
            otp: None,
        }));
        assert_eq!(s.register_step, RegisterStep::Otp);
        assert_eq!(s.success_message.as_deref(), Some(REGISTER_OTP_SENT));

        s.on_verify_register_otp(RequestPhase::Fulfilled(RegistrationTokenResponse {
            registration_token: "R1".into(),
        }));
        assert_eq!(s.register_step, RegisterStep::Details);
        assert_eq!(s.registration_token.as_deref(), Some("R1"));
        assert!(invariants_hold(&s));

        s.on_complete_registration(RequestPhase::Fulfilled(sample_user()));
        assert_eq!(s.register_step, RegisterStep::Done);
        assert!(s.is_authenticated);
        assert_eq!(s.success_message.as_deref(), Some(REGISTRATION_COMPLETE));
    }

    #[test]
    fn password_reset_clears_reset_token_and_secret() {
        let mut s = Session::default();
        s.on_request_password_reset_otp(RequestPhase::Fulfilled(OtpChallengeResponse {
            message: Some("code sent".into()),
            secret: "S2".into(),
            otp: None,
        }));
        assert_eq!(s.secret.as_deref(), Some("S2"));
        assert_eq!(s.success_message.as_deref(), Some("code sent"));

        s.on_verify_password_reset_otp(RequestPhase::Fulfilled(ResetTokenResponse {
            reset_token: "X1".into(),
        }));
        assert_eq!(s.reset_token.as_deref(), Some("X1"));
        assert!(invariants_hold(&s));

        s.on_complete_password_reset(RequestPhase::Fulfilled(MessageResponse {
            message: "password updated".into(),
        }));
        assert!(s.reset_token.is_none());
        assert!(s.secret.is_none());
        assert_eq!(s.success_message.as_deref(), Some("password updated"));
        assert!(invariants_hold(&s));
    }

    #[test]
    fn reset_token_without_secret_breaks_invariants() {
        let s = Session {
            reset_token: Some("X1".into()),
            ..Session::default()
        };
        assert!(!invariants_hold(&s));
    }

    #[test]
    fn registration_authenticates_without_signing_in() {
        let mut s = Session::default();
        s.on_complete_registration(RequestPhase::Fulfilled(sample_user()));
        assert!(s.is_authenticated);
        assert!(!s.is_signed_in());

        s.restore(Some(sample_tokens()), None);
        assert!(s.is_signed_in());
    }

    #[test]
    fn reset_login_step_only_drops_the_challenge() {
        let mut s = Session {
            register_step: RegisterStep::Details,
            registration_token: Some("R1".into()),
            success_message: Some("sent".into()),
            ..Session::default()
        };
        s.on_request_login_otp(RequestPhase::Fulfilled(challenge("S1")));
        s.reset_login_step();
        assert_eq!(s.step, LoginStep::Login);
        assert!(s.secret.is_none());
        assert_eq!(s.register_step, RegisterStep::Details);
        assert_eq!(s.registration_token.as_deref(), Some("R1"));
        assert!(invariants_hold(&s));
    }

    #[test]
    fn logout_restores_initial_shape_but_keeps_hydration() {
        let mut s = Session {
            hydrated: true,
            ..Session::default()
        };
        s.on_request_login_otp(RequestPhase::Fulfilled(challenge("S1")));
        s.on_verify_login_otp(RequestPhase::Fulfilled(LoginResponse {
            user: sample_user(),
            tokens: sample_tokens(),
        }));
        s.reset_token = Some("X1".into());
        s.error = Some("e".into());

        s.logout();
        assert_eq!(
            s,
            Session {
                hydrated: true,
                ..Session::default()
            }
        );
    }

    #[test]
    fn clear_messages_clears_both() {
        let mut s = Session {
            error: Some("e".into()),
            success_message: Some("ok".into()),
            ..Session::default()
        };
        s.clear_messages();
        assert!(s.error.is_none());
        assert!(s.success_message.is_none());
    }

    #[test]
    fn restore_without_tokens_only_marks_hydrated() {
        let mut s = Session::default();
        s.restore(None, Some(sample_user()));
        assert!(s.hydrated);
        assert!(!s.is_authenticated);
        assert!(s.user.is_none());

        s.restore(Some(sample_tokens()), Some(sample_user()));
        assert!(s.is_authenticated);
        assert_eq!(s.user, Some(sample_user()));
    }

    #[test]
    fn validation_failure_sets_error_without_loading() {
        let mut s = Session::default();
        s.on_validation_failed("Passwords do not match");
        assert!(!s.loading);
        assert_eq!(s.error.as_deref(), Some("Passwords do not match"));
    }
}
