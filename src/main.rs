#[cfg(feature = "cuda")]
use add_benches::cuda_backend::CudaBackend;
use add_benches::host_backend::HostBackend;
#[cfg(feature = "ocl")]
use add_benches::ocl_backend::OclBackend;
#[cfg(feature = "opencv")]
use add_benches::opencv_backend::OpenCvBackend;
use add_benches::{generate_workload, ITERATIONS, LEN};
use anyhow::Result;
#[cfg(any(feature = "cuda", feature = "ocl"))]
use std::str::FromStr;
use std::time::Instant;

fn main() -> Result<()> {
    env_logger::init();

    #[cfg(feature = "cuda")]
    let cuda_device_index = {
        let cuda_device = std::env::var("CUDA_DEVICE");
        log::info!("CUDA_DEVICE = {cuda_device:?}");
        if let Ok(cuda_device) = cuda_device.as_ref() {
            usize::from_str(cuda_device)?
        } else {
            0
        }
    };

    #[cfg(feature = "ocl")]
    let (ocl_platform_index, ocl_device_index) = {
        let ocl_platform = std::env::var("OCL_PLATFORM");
        let ocl_device = std::env::var("OCL_DEVICE");
        log::info!("OCL_PLATFORM = {ocl_platform:?} OCL_DEVICE = {ocl_device:?}");
        let ocl_platform_index = if let Ok(ocl_platform) = ocl_platform.as_ref() {
            usize::from_str(ocl_platform)?
        } else {
            0
        };
        let ocl_device_index = if let Ok(ocl_device) = ocl_device.as_ref() {
            usize::from_str(ocl_device)?
        } else {
            0
        };
        (ocl_platform_index, ocl_device_index)
    };

    let (a, b) = generate_workload(LEN);
    let host = HostBackend::new()?;

    println!("CPU parallel");
    let mut add = host.add_parallel(&a, &b)?;
    time_loop(|| add.run())?;
    print_sample(add.output());

    println!("CPU serial");
    let mut add = host.add_serial(&a, &b)?;
    time_loop(|| add.run())?;
    print_sample(add.output());

    #[cfg(feature = "opencv")]
    {
        println!("CPU OpenCV");
        match OpenCvBackend::new() {
            Ok(opencv) => {
                let mut add = opencv.add(&a, &b)?;
                time_loop(|| add.run())?;
                print_sample(add.output());
            }
            Err(err) => log::warn!("skipping OpenCV backend: {err}"),
        }
    }

    #[cfg(feature = "cuda")]
    {
        println!("GPU CUDA");
        match CudaBackend::new(cuda_device_index) {
            Ok(cuda) => {
                let mut add = cuda.add(&a, &b)?;
                time_loop(|| add.run())?;
                print_sample(add.output());
            }
            Err(err) => log::warn!("skipping CUDA backend: {err}"),
        }
    }

    #[cfg(feature = "ocl")]
    {
        println!("GPU OpenCL");
        match OclBackend::new(ocl_platform_index, ocl_device_index) {
            Ok(ocl) => {
                let mut add = ocl.add(&a, &b)?;
                time_loop(|| add.run())?;
                print_sample(add.output());
            }
            Err(err) => log::warn!("skipping OpenCL backend: {err}"),
        }
    }

    Ok(())
}

fn time_loop(mut run: impl FnMut() -> Result<()>) -> Result<()> {
    for _ in 0..ITERATIONS {
        let start = Instant::now();
        run()?;
        println!("Time: {} ms", start.elapsed().as_millis());
    }
    Ok(())
}

/// First 10 output values, for eyeballing. Debug builds verify inside `run`
/// instead.
#[cfg_attr(debug_assertions, allow(unused_variables))]
fn print_sample(y: &[i32]) {
    #[cfg(not(debug_assertions))]
    for value in y.iter().take(10) {
        println!("{value}");
    }
}
