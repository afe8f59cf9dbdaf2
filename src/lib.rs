#![forbid(unsafe_op_in_unsafe_fn)]

/*!

Timed element-wise addition of two large `i32` arrays, implemented once per
backend:
- a sequential CPU loop and a rayon data-parallel loop ([`host_backend`]),
- an OpenCV element-wise add over integer matrices (`opencv_backend`),
- a CUDA kernel (`cuda_backend`),
- an OpenCL kernel compiled from inline source (`ocl_backend`).

Each backend exposes the same shape: a `Backend::new` that performs one-time
setup, an `add` constructor that prepares one benchmark op, and `run`, which
executes exactly one timed iteration. In debug builds `run` checks the output
against [`add_host`].
*/

#[cfg(feature = "cuda")]
pub mod cuda_backend;
pub mod host_backend;
#[cfg(feature = "ocl")]
pub mod ocl_backend;
#[cfg(feature = "opencv")]
pub mod opencv_backend;

/// Elements per input array in the fixed experiment.
pub const LEN: usize = 10_000_000;

/// Timed runs per backend.
pub const ITERATIONS: usize = 30;

/// Fills the two input arrays with the fixed pattern `a[i] = i`,
/// `b[i] = len - i`, so every pairwise sum equals `len`.
pub fn generate_workload(len: usize) -> (Vec<i32>, Vec<i32>) {
    let a = (0..len).map(|i| i as i32).collect();
    let b = (0..len).map(|i| (len - i) as i32).collect();
    (a, b)
}

/// Reference addition. Wrapping, so it agrees with the device kernels on
/// overflow.
pub fn add_host(a: &[i32], b: &[i32], y: &mut [i32]) {
    a.iter()
        .zip(b.iter())
        .zip(y.iter_mut())
        .for_each(|((a, b), y)| {
            *y = a.wrapping_add(*b);
        });
}

/// Errors.
pub mod error {
    /// The platform index is greater than or equal to the number of platforms.
    #[derive(Clone, Copy, Debug, thiserror::Error)]
    #[error("Platform index {index} is out of range 0..{platforms}!")]
    pub struct PlatformIndexOutOfRange {
        pub index: usize,
        pub platforms: usize,
    }

    /// The device index is greater than or equal to the number of devices.
    #[derive(Clone, Copy, Debug, thiserror::Error)]
    #[error("Device index {index} is out of range 0..{devices}!")]
    pub struct DeviceIndexOutOfRange {
        pub index: usize,
        pub devices: usize,
    }
}
