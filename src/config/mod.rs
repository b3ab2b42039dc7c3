//! Application configuration module
//!
//! Handles environment variables, application-wide constants, and the
//! static resource descriptors served by the API.

mod constants;
pub mod descriptors;
mod settings;

pub use constants::*;
pub use descriptors::{Descriptor, ResourceDescriptors};
pub use settings::Config;
