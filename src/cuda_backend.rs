#[cfg(debug_assertions)]
use crate::add_host;
use anyhow::Result;
use cust::{
    context::Context,
    device::Device,
    launch,
    memory::{CopyDestination, DeviceBuffer, DeviceSlice},
    module::Module,
    stream::{Stream, StreamFlags},
};
use std::sync::Arc;

struct Cuda {
    module: Module,
    stream: Stream,
    #[allow(unused)]
    context: Context,
    #[allow(unused)]
    device: Device,
}

impl Cuda {
    fn new(index: usize) -> Result<Self> {
        cust::init(cust::CudaFlags::empty())?;
        let device = Device::get_device(index.try_into()?)?;
        let context = Context::new(device)?;
        let stream = Stream::new(StreamFlags::DEFAULT, None)?;
        let ptx = include_bytes!(concat!(env!("OUT_DIR"), "/kernels.ptx"));
        let ptx = String::from_utf8(ptx.as_ref().to_vec())?;
        let module = Module::from_ptx(ptx, &[])?;
        Ok(Self {
            module,
            stream,
            context,
            device,
        })
    }
    fn sync(&self) -> Result<()> {
        self.stream.synchronize()?;
        Ok(())
    }
}

#[derive(Clone)]
pub struct CudaBackend {
    cuda: Arc<Cuda>,
}

impl CudaBackend {
    pub fn new(index: usize) -> Result<Self> {
        Ok(Self {
            cuda: Arc::new(Cuda::new(index)?),
        })
    }
    pub fn add(&self, a: &[i32], b: &[i32]) -> Result<Add> {
        assert_eq!(a.len(), b.len());
        let a_device = DeviceBuffer::zeroed(a.len())?;
        let b_device = DeviceBuffer::zeroed(b.len())?;
        let y_device = DeviceBuffer::zeroed(a.len())?;
        self.cuda.sync()?;
        #[cfg(debug_assertions)]
        let y_check = {
            let mut y_check = vec![0; a.len()];
            add_host(a, b, &mut y_check);
            y_check
        };
        Ok(Add {
            cuda: self.cuda.clone(),
            a_host: a.to_vec(),
            b_host: b.to_vec(),
            a_device,
            b_device,
            y_device,
            y_host: vec![0; a.len()],
            #[cfg(debug_assertions)]
            y_check,
        })
    }
}

pub struct Add {
    cuda: Arc<Cuda>,
    a_host: Vec<i32>,
    b_host: Vec<i32>,
    a_device: DeviceBuffer<i32>,
    b_device: DeviceBuffer<i32>,
    y_device: DeviceBuffer<i32>,
    y_host: Vec<i32>,
    #[cfg(debug_assertions)]
    y_check: Vec<i32>,
}

impl Add {
    /// One iteration: both inputs host to device, kernel launch, output
    /// device to host, stream sync.
    pub fn run(&mut self) -> Result<()> {
        self.a_device.copy_from(&self.a_host)?;
        self.b_device.copy_from(&self.b_host)?;
        unsafe {
            add(
                &self.cuda,
                &self.a_device,
                &self.b_device,
                &mut self.y_device,
            )?;
        }
        self.y_device.copy_to(&mut self.y_host)?;
        self.cuda.sync()?;
        #[cfg(debug_assertions)]
        {
            assert_eq!(self.y_host, self.y_check);
        }
        Ok(())
    }
    pub fn output(&self) -> &[i32] {
        &self.y_host
    }
}

unsafe fn add(
    cuda: &Cuda,
    a: &DeviceSlice<i32>,
    b: &DeviceSlice<i32>,
    y: &mut DeviceSlice<i32>,
) -> Result<()> {
    let n = a.len() as u32;
    let block = 256;
    let grid = n / block + u32::from(n % block != 0);
    let shared_memory_size = 0;
    let stream = &cuda.stream;
    let function = cuda.module.get_function("add")?;
    launch!(function<<<grid, block, shared_memory_size, stream>>>(
        n,
        a.as_device_ptr(),
        b.as_device_ptr(),
        y.as_device_ptr(),
    ))?;
    Ok(())
}
