pub mod error;
pub mod label;
pub mod types;

pub use error::*;
pub use types::*;
