use crate::api::*;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use std::{
    cell::RefCell,
    collections::{HashMap, VecDeque},
};

pub mod endpoint {
    pub const OTP_REQUEST: &str = "/otp/request";
    pub const OTP_VERIFY: &str = "/otp/verify";
    pub const REGISTER: &str = "/register";
    pub const LOGIN: &str = "/login";
    pub const LOGIN_VERIFY: &str = "/login/verify";
    pub const FORGOT_REQUEST: &str = "/forgot-password/request";
    pub const FORGOT_VERIFY: &str = "/forgot-password/verify";
    pub const FORGOT_RESET: &str = "/forgot-password/reset";
}

/// Scripted [`AuthTransport`]: each endpoint answers from a queue of
/// canned JSON bodies or errors, and every call is recorded.
#[derive(Default)]
pub struct FakeTransport {
    replies: RefCell<HashMap<&'static str, VecDeque<Result<Value, ApiError>>>>,
    calls: RefCell<Vec<(&'static str, Value)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, endpoint: &'static str, body: Value) {
        self.replies
            .borrow_mut()
            .entry(endpoint)
            .or_default()
            .push_back(Ok(body));
    }

    pub fn fail(&self, endpoint: &'static str, message: &str) {
        self.replies
            .borrow_mut()
            .entry(endpoint)
            .or_default()
            .push_back(Err(ApiError::server(message)));
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn last_body(&self, endpoint: &str) -> Option<Value> {
        self.calls
            .borrow()
            .iter()
            .rev()
            .find(|(name, _)| *name == endpoint)
            .map(|(_, body)| body.clone())
    }

    fn reply<B: Serialize, T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        body: &B,
    ) -> Result<T, ApiError> {
        let recorded = serde_json::to_value(body).unwrap_or(Value::Null);
        self.calls.borrow_mut().push((endpoint, recorded));
        let next = self
            .replies
            .borrow_mut()
            .get_mut(endpoint)
            .and_then(|queue| queue.pop_front());
        match next {
            Some(Ok(value)) => serde_json::from_value(value).map_err(|_| ApiError::parse()),
            Some(Err(err)) => Err(err),
            None => Err(ApiError::request_failed(format!(
                "no scripted reply for {}",
                endpoint
            ))),
        }
    }
}

#[async_trait(?Send)]
impl AuthTransport for FakeTransport {
    async fn request_register_otp(
        &self,
        request: EmailRequest,
    ) -> Result<OtpChallengeResponse, ApiError> {
        self.reply(endpoint::OTP_REQUEST, &request)
    }

    async fn verify_register_otp(
        &self,
        request: VerifyOtpRequest,
    ) -> Result<RegistrationTokenResponse, ApiError> {
        self.reply(endpoint::OTP_VERIFY, &request)
    }

    async fn register(&self, request: RegisterRequest) -> Result<User, ApiError> {
        self.reply(endpoint::REGISTER, &request)
    }

    async fn login(&self, request: LoginRequest) -> Result<LoginChallengeResponse, ApiError> {
        self.reply(endpoint::LOGIN, &request)
    }

    async fn verify_login(&self, request: VerifyOtpRequest) -> Result<LoginResponse, ApiError> {
        self.reply(endpoint::LOGIN_VERIFY, &request)
    }

    async fn request_password_reset(
        &self,
        request: EmailRequest,
    ) -> Result<OtpChallengeResponse, ApiError> {
        self.reply(endpoint::FORGOT_REQUEST, &request)
    }

    async fn verify_password_reset(
        &self,
        request: VerifyOtpRequest,
    ) -> Result<ResetTokenResponse, ApiError> {
        self.reply(endpoint::FORGOT_VERIFY, &request)
    }

    async fn reset_password(
        &self,
        request: ResetPasswordRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.reply(endpoint::FORGOT_RESET, &request)
    }
}
