mod decoder;
mod handler;
mod types;

pub use decoder::decode;
pub use handler::*;
pub use types::*;
