mod pipeline;
mod types;

pub use pipeline::*;
pub use types::*;
