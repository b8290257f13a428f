pub mod analyzers;
pub mod distribution;
pub mod error;
pub mod gradebook;
pub mod input;
pub mod output;
pub mod stats;
pub mod store;
pub mod weights;

pub use error::{GradeError, GradeResult};
pub use gradebook::Gradebook;
