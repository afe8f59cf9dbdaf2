use add_benches::{add_host, generate_workload, host_backend::HostBackend};

#[test]
fn workload_pattern() {
    let (a, b) = generate_workload(3);
    assert_eq!(a, [0, 1, 2]);
    assert_eq!(b, [3, 2, 1]);
}

#[test]
fn workload_sums_to_len() {
    let len = 1000;
    let (a, b) = generate_workload(len);
    assert_eq!(a.len(), len);
    assert_eq!(b.len(), len);
    for (a, b) in a.iter().zip(b.iter()) {
        assert_eq!(a + b, len as i32);
    }
}

#[test]
fn serial_adds_pairwise() {
    let (a, b) = generate_workload(1000);
    let host = HostBackend::new().unwrap();
    let mut add = host.add_serial(&a, &b).unwrap();
    add.run().unwrap();
    let y = add.output();
    assert_eq!(y.len(), a.len());
    for i in 0..a.len() {
        assert_eq!(y[i], a[i] + b[i]);
    }
}

#[test]
fn parallel_adds_pairwise() {
    // Not a multiple of any likely chunk size.
    let (a, b) = generate_workload(10_007);
    let host = HostBackend::new().unwrap();
    let mut add = host.add_parallel(&a, &b).unwrap();
    add.run().unwrap();
    let y = add.output();
    assert_eq!(y.len(), a.len());
    for i in 0..a.len() {
        assert_eq!(y[i], a[i] + b[i]);
    }
}

#[test]
fn parallel_matches_serial() {
    let (a, b) = generate_workload(4096);
    let host = HostBackend::new().unwrap();
    let mut serial = host.add_serial(&a, &b).unwrap();
    let mut parallel = host.add_parallel(&a, &b).unwrap();
    serial.run().unwrap();
    parallel.run().unwrap();
    assert_eq!(serial.output(), parallel.output());
}

#[test]
fn example_sums_to_three() {
    let a = [0, 1, 2];
    let b = [3, 2, 1];
    let host = HostBackend::new().unwrap();
    let mut serial = host.add_serial(&a, &b).unwrap();
    serial.run().unwrap();
    assert_eq!(serial.output(), [3, 3, 3]);
    let mut parallel = host.add_parallel(&a, &b).unwrap();
    parallel.run().unwrap();
    assert_eq!(parallel.output(), [3, 3, 3]);
}

#[test]
fn rerun_is_deterministic() {
    let (a, b) = generate_workload(1000);
    let host = HostBackend::new().unwrap();
    let mut add = host.add_parallel(&a, &b).unwrap();
    add.run().unwrap();
    let first = add.output().to_vec();
    add.run().unwrap();
    assert_eq!(add.output(), first);
}

#[test]
fn reference_wraps_at_boundary() {
    let a = [i32::MAX, -1];
    let b = [1, i32::MIN];
    let mut y = [0; 2];
    add_host(&a, &b, &mut y);
    assert_eq!(y, [i32::MIN, i32::MAX]);
}

#[test]
#[should_panic]
fn mismatched_lengths_are_rejected() {
    let host = HostBackend::new().unwrap();
    let _ = host.add_serial(&[1, 2, 3], &[1, 2]);
}

#[cfg(feature = "opencv")]
mod opencv {
    use add_benches::{generate_workload, opencv_backend::OpenCvBackend};

    #[test]
    fn opencv_adds_pairwise() {
        let (a, b) = generate_workload(1 << 16);
        let opencv = OpenCvBackend::new().unwrap();
        let mut add = opencv.add(&a, &b).unwrap();
        add.run().unwrap();
        let y = add.output();
        assert_eq!(y.len(), a.len());
        for i in 0..a.len() {
            assert_eq!(y[i], a[i] + b[i]);
        }
    }
}

#[cfg(feature = "cuda")]
mod cuda {
    use add_benches::{cuda_backend::CudaBackend, generate_workload};

    #[test]
    fn cuda_adds_pairwise() {
        let (a, b) = generate_workload(1 << 16);
        let cuda = CudaBackend::new(0).unwrap();
        let mut add = cuda.add(&a, &b).unwrap();
        add.run().unwrap();
        let y = add.output();
        assert_eq!(y.len(), a.len());
        for i in 0..a.len() {
            assert_eq!(y[i], a[i] + b[i]);
        }
    }
}

#[cfg(feature = "ocl")]
mod ocl {
    use add_benches::{generate_workload, ocl_backend::OclBackend};

    #[test]
    fn ocl_adds_pairwise() {
        // Off the work group boundary so the kernel's bounds check matters.
        let (a, b) = generate_workload((1 << 16) + 7);
        let ocl = OclBackend::new(0, 0).unwrap();
        let mut add = ocl.add(&a, &b).unwrap();
        add.run().unwrap();
        let y = add.output();
        assert_eq!(y.len(), a.len());
        for i in 0..a.len() {
            assert_eq!(y[i], a[i] + b[i]);
        }
    }

    #[test]
    fn bad_platform_index_is_an_error() {
        assert!(OclBackend::new(usize::MAX, 0).is_err());
    }
}
