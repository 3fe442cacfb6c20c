// Modules
pub mod constants;
pub mod corrector;
pub mod data;
pub mod detector;
pub mod errors;
pub mod probe;
pub mod report;
pub mod stats;
pub mod utils;

// Individual classes, and functions
pub use corrector::{BiasCorrector, CorrectionMethod};
pub use data::{Matrix, MatrixMut};
pub use detector::BiasDetector;
pub use probe::{FittedProbe, LogisticProbe, Probe, ProbeModel};
pub use report::{BiasEntry, BiasReport, Direction, ReportIO};
