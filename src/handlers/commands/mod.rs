//! Command handlers module

pub mod admin;
pub mod start;

pub use admin::handle_admin_menu;
pub use start::{handle_cancel, handle_start};
