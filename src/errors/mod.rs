//! Error descriptors and their normalization

pub mod catalog;
pub mod codes;
pub mod descriptor;
pub mod normalize;

pub use codes::ErrorCategory;
pub use descriptor::ErrorDescriptor;
pub use normalize::{normalize, normalize_anyhow, normalize_result};
