//! Command handlers, one module per concern.

pub mod misc;
pub mod notes;
pub mod security;

pub use misc::handle_completions;
pub use notes::{handle_add, handle_edit, handle_list, handle_remove, handle_show};
pub use security::{handle_info, handle_passwd};
