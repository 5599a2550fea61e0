pub mod client;
pub mod config;
pub mod discriminators;
pub mod error;
pub mod fetch;
pub mod link;
pub mod model;
pub mod preview;
pub mod resolve;

pub use error::{PreviewError, Result};
pub use model::*;
