//! Constants used throughout the application

/// Number of landmarks produced by a refined face-mesh provider
pub const NUM_FACE_LANDMARKS: usize = 478;

/// Left eye corner landmark indices (outer, inner)
pub const LEFT_CORNER_OUT: usize = 33;
pub const LEFT_CORNER_IN: usize = 133;

/// Left eyelid landmark indices (top, bottom)
pub const LEFT_LID_TOP: usize = 159;
pub const LEFT_LID_BOTTOM: usize = 145;

/// Right eye corner landmark indices (outer, inner)
pub const RIGHT_CORNER_OUT: usize = 362;
pub const RIGHT_CORNER_IN: usize = 263;

/// Right eyelid landmark indices (top, bottom)
pub const RIGHT_LID_TOP: usize = 386;
pub const RIGHT_LID_BOTTOM: usize = 374;

/// Iris ring landmark indices per eye
pub const LEFT_IRIS_RING: [usize; 4] = [474, 475, 476, 477];
pub const RIGHT_IRIS_RING: [usize; 4] = [469, 470, 471, 472];

/// Default frames per second assumption when the source gives no usable hint
pub const DEFAULT_FPS: f64 = 30.0;

/// Default frame sampling stride
pub const DEFAULT_FRAME_STRIDE: usize = 1;

/// Default hard cap on sampled frames per run
pub const DEFAULT_MAX_SAMPLED_FRAMES: usize = 12000;

/// Default eyelid closure threshold on the openness ratio
pub const DEFAULT_BLINK_CLOSURE_THRESHOLD: f64 = 0.18;

/// Default minimum closed-frame run length for one blink
pub const DEFAULT_BLINK_MIN_HOLD_FRAMES: usize = 2;

/// Default vertical peak-to-peak threshold for the screening rule
pub const DEFAULT_VERTICAL_PTP_THRESHOLD: f64 = 0.06;

/// Percentile bounds for the robust peak-to-peak spread
pub const ROBUST_PTP_LOW_PERCENTILE: f64 = 5.0;
pub const ROBUST_PTP_HIGH_PERCENTILE: f64 = 95.0;

/// Numeric floor guarding divisions by eye geometry distances
pub const GEOMETRY_EPSILON: f64 = 1e-6;
