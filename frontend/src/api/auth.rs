use async_trait::async_trait;

use super::{client::ApiClient, types::*};

pub const REQUEST_OTP_FAILED: &str = "Failed to request OTP";
pub const VERIFY_OTP_FAILED: &str = "OTP verification failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";
pub const LOGIN_FAILED: &str = "Login failed";
pub const REQUEST_RESET_FAILED: &str = "Failed to request password reset";
pub const RESET_FAILED: &str = "Password reset failed";

/// The authentication endpoints the session machine talks to.
///
/// Futures are not `Send`: in the browser every request runs on the
/// single-threaded event loop.
#[async_trait(?Send)]
pub trait AuthTransport {
    async fn request_register_otp(
        &self,
        request: EmailRequest,
    ) -> Result<OtpChallengeResponse, ApiError>;

    async fn verify_register_otp(
        &self,
        request: VerifyOtpRequest,
    ) -> Result<RegistrationTokenResponse, ApiError>;

    async fn register(&self, request: RegisterRequest) -> Result<User, ApiError>;

    async fn login(&self, request: LoginRequest) -> Result<LoginChallengeResponse, ApiError>;

    async fn verify_login(&self, request: VerifyOtpRequest) -> Result<LoginResponse, ApiError>;

    async fn request_password_reset(
        &self,
        request: EmailRequest,
    ) -> Result<OtpChallengeResponse, ApiError>;

    async fn verify_password_reset(
        &self,
        request: VerifyOtpRequest,
    ) -> Result<ResetTokenResponse, ApiError>;

    async fn reset_password(
        &self,
        request: ResetPasswordRequest,
    ) -> Result<MessageResponse, ApiError>;
}

#[async_trait(?Send)]
impl AuthTransport for ApiClient {
    async fn request_register_otp(
        &self,
        request: EmailRequest,
    ) -> Result<OtpChallengeResponse, ApiError> {
        self.post_json("/otp/request", &request, REQUEST_OTP_FAILED)
            .await
    }

    async fn verify_register_otp(
        &self,
        request: VerifyOtpRequest,
    ) -> Result<RegistrationTokenResponse, ApiError> {
        self.post_json("/otp/verify", &request, VERIFY_OTP_FAILED)
            .await
    }

    async fn register(&self, request: RegisterRequest) -> Result<User, ApiError> {
        self.post_json("/register", &request, REGISTRATION_FAILED)
            .await
    }

    async fn login(&self, request: LoginRequest) -> Result<LoginChallengeResponse, ApiError> {
        self.post_json("/login", &request, LOGIN_FAILED).await
    }

    async fn verify_login(&self, request: VerifyOtpRequest) -> Result<LoginResponse, ApiError> {
        self.post_json("/login/verify", &request, VERIFY_OTP_FAILED)
            .await
    }

    async fn request_password_reset(
        &self,
        request: EmailRequest,
    ) -> Result<OtpChallengeResponse, ApiError> {
        self.post_json("/forgot-password/request", &request, REQUEST_RESET_FAILED)
            .await
    }

    async fn verify_password_reset(
        &self,
        request: VerifyOtpRequest,
    ) -> Result<ResetTokenResponse, ApiError> {
        self.post_json("/forgot-password/verify", &request, VERIFY_OTP_FAILED)
            .await
    }

    async fn reset_password(
        &self,
        request: ResetPasswordRequest,
    ) -> Result<MessageResponse, ApiError> {
        self.post_json("/forgot-password/reset", &request, RESET_FAILED)
            .await
    }
}
