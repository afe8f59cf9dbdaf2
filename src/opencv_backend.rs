#[cfg(debug_assertions)]
use crate::add_host;
use anyhow::Result;
use opencv::{core, prelude::*};

/// OpenCV backend. The inputs are wrapped as `CV_32S` matrices on every run,
/// inside the timed region, matching the library's element-wise add entry
/// point.
#[derive(Clone)]
pub struct OpenCvBackend;

impl OpenCvBackend {
    pub fn new() -> Result<Self> {
        Ok(Self)
    }
    pub fn add(&self, a: &[i32], b: &[i32]) -> Result<Add> {
        assert_eq!(a.len(), b.len());
        #[cfg(debug_assertions)]
        let y_check = {
            let mut y_check = vec![0; a.len()];
            add_host(a, b, &mut y_check);
            y_check
        };
        Ok(Add {
            a_host: a.to_vec(),
            b_host: b.to_vec(),
            y_host: vec![0; a.len()],
            #[cfg(debug_assertions)]
            y_check,
        })
    }
}

pub struct Add {
    a_host: Vec<i32>,
    b_host: Vec<i32>,
    y_host: Vec<i32>,
    #[cfg(debug_assertions)]
    y_check: Vec<i32>,
}

impl Add {
    /// One iteration: wrap both inputs, library add, copy the result out.
    pub fn run(&mut self) -> Result<()> {
        let a_mat = Mat::from_slice(&self.a_host)?;
        let b_mat = Mat::from_slice(&self.b_host)?;
        let mut y_mat = Mat::default();
        core::add(&a_mat, &b_mat, &mut y_mat, &core::no_array(), -1)?;
        self.y_host.copy_from_slice(y_mat.data_typed::<i32>()?);
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
