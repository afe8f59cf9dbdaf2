use crate::add_host;
use anyhow::Result;
use rayon::prelude::*;

/// CPU backends: a plain sequential loop and a rayon data-parallel loop over
/// the same slices. Setup is free, so the backend itself carries no state.
#[derive(Clone)]
pub struct HostBackend;

impl HostBackend {
    pub fn new() -> Result<Self> {
        Ok(Self)
    }
    pub fn add_serial(&self, a: &[i32], b: &[i32]) -> Result<AddSerial> {
        assert_eq!(a.len(), b.len());
        Ok(AddSerial {
            a_host: a.to_vec(),
            b_host: b.to_vec(),
            y_host: vec![0; a.len()],
        })
    }
    pub fn add_parallel(&self, a: &[i32], b: &[i32]) -> Result<AddParallel> {
        assert_eq!(a.len(), b.len());
        Ok(AddParallel {
            a_host: a.to_vec(),
            b_host: b.to_vec(),
            y_host: vec![0; a.len()],
        })
    }
}

pub struct AddSerial {
    a_host: Vec<i32>,
    b_host: Vec<i32>,
    y_host: Vec<i32>,
}

impl AddSerial {
    pub fn run(&mut self) -> Result<()> {
        add_host(&self.a_host, &self.b_host, &mut self.y_host);
        Ok(())
    }
    pub fn output(&self) -> &[i32] {
        &self.y_host
    }
}

pub struct AddParallel {
    a_host: Vec<i32>,
    b_host: Vec<i32>,
    y_host: Vec<i32>,
}

impl AddParallel {
    pub fn run(&mut self) -> Result<()> {
        self.y_host
            .par_iter_mut()
            .zip(self.a_host.par_iter().zip(self.b_host.par_iter()))
            .for_each(|(y, (a, b))| {
                *y = a.wrapping_add(*b);
            });
        #[cfg(debug_assertions)]
        {
            let mut y_host = vec![0; self.a_host.len()];
            add_host(&self.a_host, &self.b_host, &mut y_host);
            assert_eq!(self.y_host, y_host);
        }
        Ok(())
    }
    pub fn output(&self) -> &[i32] {
        &self.y_host
    }
}
