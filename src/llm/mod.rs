mod client;
mod image;
mod types;

pub use client::*;
pub use image::*;
pub use types::ImagePayload;
pub use types::DEFAULT_IMAGE_MIME;
