pub mod commands;
pub mod filter_handlers;

pub use commands::{parse_command, HELP};
pub use filter_handlers::{handle_command, Flow};
