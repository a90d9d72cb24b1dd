mod images;
mod videos;

pub use images::*;
pub use videos::*;
