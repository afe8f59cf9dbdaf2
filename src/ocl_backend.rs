#[cfg(debug_assertions)]
use crate::add_host;
use crate::error::{DeviceIndexOutOfRange, PlatformIndexOutOfRange};
use anyhow::Result;
use ocl::{flags::MemFlags, Buffer, Device, Platform, ProQue};

#[derive(Clone)]
pub struct OclBackend {
    pro_que: ProQue,
}

impl OclBackend {
    pub fn new(platform_index: usize, device_index: usize) -> Result<Self> {
        let platforms = Platform::list();
        let platform = *platforms
            .get(platform_index)
            .ok_or(PlatformIndexOutOfRange {
                index: platform_index,
                platforms: platforms.len(),
            })?;
        let devices = Device::list_all(&platform)?;
        let device = *devices.get(device_index).ok_or(DeviceIndexOutOfRange {
            index: device_index,
            devices: devices.len(),
        })?;
        let pro_que = ProQue::builder()
            .platform(platform)
            .device(device)
            .src(KERNELS)
            .build()?;
        Ok(Self { pro_que })
    }
    pub fn add(&self, a: &[i32], b: &[i32]) -> Result<Add> {
        assert_eq!(a.len(), b.len());
        let queue = self.pro_que.queue();
        let a_device = Buffer::builder()
            .queue(queue.clone())
            .len(a.len())
            .flags(MemFlags::READ_ONLY)
            .build()?;
        let b_device = Buffer::builder()
            .queue(queue.clone())
            .len(b.len())
            .flags(MemFlags::READ_ONLY)
            .build()?;
        let y_device = Buffer::builder()
            .queue(queue.clone())
            .len(a.len())
            .flags(MemFlags::WRITE_ONLY)
            .build()?;
        #[cfg(debug_assertions)]
        let y_check = {
            let mut y_check = vec![0; a.len()];
            add_host(a, b, &mut y_check);
            y_check
        };
        Ok(Add {
            pro_que: self.pro_que.clone(),
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
    pro_que: ProQue,
    a_host: Vec<i32>,
    b_host: Vec<i32>,
    a_device: Buffer<i32>,
    b_device: Buffer<i32>,
    y_device: Buffer<i32>,
    y_host: Vec<i32>,
    #[cfg(debug_assertions)]
    y_check: Vec<i32>,
}

impl Add {
    /// One iteration: blocking writes of both inputs, kernel enqueue,
    /// blocking read of the output, queue finish.
    pub fn run(&mut self) -> Result<()> {
        self.a_device.write(self.a_host.as_slice()).enq()?;
        self.b_device.write(self.b_host.as_slice()).enq()?;
        let n = self.a_device.len() as u32;
        let lws = 256;
        let wgs = n / lws + u32::from(n % lws != 0);
        let kernel = self
            .pro_que
            .kernel_builder("add")
            .arg(&n)
            .arg(&self.a_device)
            .arg(&self.b_device)
            .arg(&self.y_device)
            .global_work_size(wgs * lws)
            .local_work_size(lws)
            .build()?;
        unsafe {
            kernel.enq()?;
        }
        self.y_device.read(self.y_host.as_mut_slice()).enq()?;
        self.pro_que.finish()?;
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

static KERNELS: &'static str = r#"
kernel void add(uint n, global int* const a, global int* const b, global int* __restrict__ y) {
    uint idx = get_global_id(0);
    if (idx < n) {
        y[idx] = a[idx] + b[idx];
    }
}
"#;
