pub const DEFAULT_THRESHOLD: f64 = 10.0;
pub const TARGET_CUTOFF: f64 = 0.5;
pub const DEFAULT_LEARNING_RATE: f64 = 0.3;
pub const DEFAULT_ITERATIONS: usize = 100;
pub const DEFAULT_L2: f64 = 0.0;
