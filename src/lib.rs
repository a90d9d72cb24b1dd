pub mod chef;
pub mod config;
pub mod error;
pub mod llm;
pub mod media;
pub mod recipe;
pub mod server;

pub use error::{Error, Result};
