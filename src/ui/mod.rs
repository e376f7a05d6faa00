pub mod formatting;
pub mod terminal;

pub use terminal::{Layout, TerminalView};
