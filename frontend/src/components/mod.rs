pub mod forms;
pub mod guard;
pub mod layout;
pub mod messages;
pub mod theme;
