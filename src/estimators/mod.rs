pub mod approaches;
pub mod composite;
pub mod estimator;
pub mod traits;

pub use estimator::Estimator;
pub use traits::{AnalysisMode, GlobalValue, InformationEstimator};
