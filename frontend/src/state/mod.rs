pub mod auth;
pub mod machine;
pub mod session;
pub mod theme;
