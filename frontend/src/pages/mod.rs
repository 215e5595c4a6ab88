pub mod dashboard;
pub mod forgot_password;
pub mod login;
pub mod register;

pub use dashboard::DashboardPage;
pub use forgot_password::ForgotPasswordPage;
pub use login::LoginPage;
pub use register::RegisterPage;
