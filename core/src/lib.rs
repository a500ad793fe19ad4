pub mod types;
pub mod errors;

pub use types::*;
pub use errors::*;

// Re-export commonly used types
pub use serde::{Deserialize, Serialize};
