pub mod dates;
pub mod interpreter;
pub mod prompt;
pub mod reply;
pub mod scan;

pub use interpreter::{Interpreter, FALLBACK_RESPONSE};
pub use prompt::PromptStyle;
