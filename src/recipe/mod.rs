mod parse;
mod prompts;
mod types;

pub use parse::*;
pub use prompts::*;
pub use types::*;
