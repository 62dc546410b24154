pub mod config;
pub mod error;
pub mod types;

pub use config::{ConfigUpdate, UserConfig};
pub use error::Error;
pub use types::Headline;

pub type Result<T> = std::result::Result<T, Error>;
