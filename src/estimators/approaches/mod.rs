pub mod discrete;
pub mod knn;

// Re-exports so users can import infodyn::estimators::approaches::* ergonomically.
pub use discrete::DiscreteEstimator;
pub use discrete::statistics::{OccurrenceStatistics, Pdf, PdfSource};
pub use knn::KsgEstimator;
