pub mod error;
pub mod types;

pub use error::DfsError;
pub use types::{BlockLocation, Plan};
