pub mod config;
pub mod error;
pub mod inference;
pub mod predict;
pub mod response_log;
pub mod server;

pub use error::{Error, Result};
