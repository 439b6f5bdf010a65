//! Data shared between the GTAO kernels and the host-side recorder.

mod constants;
mod passes;

pub use self::constants::*;
pub use self::passes::*;

/// Number of levels in the prefiltered depth pyramid.
pub const DEPTH_MIP_LEVELS: u32 = 5;

/// Thread-group dimensions of the occlusion, denoising and composition
/// kernels.
pub const NUM_THREADS_X: u32 = 8;
pub const NUM_THREADS_Y: u32 = 8;

/// Thread-group dimension of the depth-prefiltering kernel; one workgroup
/// cooperatively reduces a 16x16 tile into all five pyramid levels.
pub const PREFILTER_GROUP_SIZE: u32 = 16;

/// Period of the per-pixel sampling rotation; the noise index wraps after
/// this many frames.
pub const NOISE_FRAME_COUNT: u32 = 64;
