//! OpenCL two-lane vector types passed by value (`cl_float2`, `cl_double2`).
//!
//! On the Java side these are plain `float[]` / `double[]` arrays.

use std::fmt::Debug;

use crate::types::prm::ClScl;

/// A two-lane OpenCL vector.
///
/// ### Safety
///
/// Implementors must be `#[repr(C)]` with exactly two lanes of `Scalar`.
pub unsafe trait ClVec2: Copy + Default + Debug + PartialEq {
    type Scalar: ClScl;

    fn from_lanes(lanes: [Self::Scalar; 2]) -> Self;
    fn lanes(&self) -> [Self::Scalar; 2];
}

/// cl_float2
#[repr(C)]
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct Float2(pub f32, pub f32);

unsafe impl ClVec2 for Float2 {
    type Scalar = f32;

    fn from_lanes(lanes: [f32; 2]) -> Float2 {
        Float2(lanes[0], lanes[1])
    }

    fn lanes(&self) -> [f32; 2] {
        [self.0, self.1]
    }
}

/// cl_double2
#[repr(C)]
#[derive(PartialEq, Debug, Clone, Copy, Default)]
pub struct Double2(pub f64, pub f64);

unsafe impl ClVec2 for Double2 {
    type Scalar = f64;

    fn from_lanes(lanes: [f64; 2]) -> Double2 {
        Double2(lanes[0], lanes[1])
    }

    fn lanes(&self) -> [f64; 2] {
        [self.0, self.1]
    }
}
