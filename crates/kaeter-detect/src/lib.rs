pub mod checkers;
mod detector;
mod error;
pub mod providers;
pub mod traits;

#[cfg(test)]
pub mod mocks;

pub use detector::{DetectInput, Detector};
pub use error::{BuildGraphQueryError, Checker, DryRunError, OperationError, Result};
