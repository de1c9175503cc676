//! Root of the `student-type-core` library.
//!
//! Everything between a raw request and a rendered answer lives here:
//! - [`normalize`]: untrusted field values into range-checked [`StudentFeatures`]
//! - [`classifier`]: loaded model + label decoder behind `classify`
//! - [`catalog`]: static presentation metadata per student type
//! - [`pipeline`]: the three composed in the order every entry point uses

// Library code reports through `tracing`, never straight to the terminal.
#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod catalog;
pub mod classifier;
pub mod features;
pub mod normalize;
pub mod pipeline;

pub use catalog::StudentTypeInfo;
pub use catalog::describe;
pub use classifier::ClassifierState;
pub use classifier::ClassifyError;
pub use classifier::PredictionResult;
pub use classifier::UNKNOWN_CONFIDENCE;
pub use features::StudentFeatures;
pub use normalize::RawInput;
pub use normalize::RawValue;
pub use normalize::ValidationError;
pub use normalize::normalize;
pub use pipeline::Assessment;
pub use pipeline::PipelineError;
pub use pipeline::assess;
