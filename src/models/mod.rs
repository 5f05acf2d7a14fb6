pub mod feedback;
pub mod fields;
pub mod finding;

pub use feedback::{FeedbackCorrection, LogType, ReportLog, SymptomLog};
pub use fields::{Measurement, StructuredFields};
pub use finding::Finding;
