//! Native buffers handed to OpenCL.

use std::fmt::Debug;
use std::mem;
use std::ops::{Deref, DerefMut};
use std::ptr;

use crate::error::{Error, Result};

/// A heap allocated native array owned by a single conversion.
///
/// The storage is freed when the array is dropped, so a `NativeArray` held in
/// an `Option` slot and released with `Option::take` is freed exactly once on
/// every path.
pub struct NativeArray<T> {
    buf: Box<[T]>,
}

impl<T> NativeArray<T>
where
    T: Copy + Default,
{
    /// Allocates `len` default-valued elements.
    ///
    /// Returns `Error::OutOfMemory` instead of aborting if the allocation
    /// cannot be made.
    pub fn alloc(len: usize) -> Result<NativeArray<T>> {
        let mut vec = Vec::new();
        vec.try_reserve_exact(len).map_err(|_| Error::OutOfMemory {
            len,
            size: mem::size_of::<T>(),
        })?;
        vec.resize(len, T::default());

        Ok(NativeArray {
            buf: vec.into_boxed_slice(),
        })
    }

    /// Creates an array holding a copy of `values`.
    pub fn from_slice(values: &[T]) -> Result<NativeArray<T>> {
        let mut array = NativeArray::alloc(values.len())?;
        array.copy_from_slice(values);
        Ok(array)
    }
}

impl<T> NativeArray<T> {
    /// Returns a pointer to the first element.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.buf.as_ptr()
    }

    /// Returns a mutable pointer to the first element.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.buf.as_mut_ptr()
    }

    /// Consumes the array, returning its storage.
    pub fn into_boxed_slice(self) -> Box<[T]> {
        self.buf
    }
}

impl<T> Deref for NativeArray<T> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.buf
    }
}

impl<T> DerefMut for NativeArray<T> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.buf
    }
}

impl<T: Debug> Debug for NativeArray<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_list().entries(self.buf.iter()).finish()
    }
}

/// Types which can be passed to OpenCL as a (possibly null) pointer to an
/// array along with an element count.
///
/// Implemented for `NativeArray<T>` and for `Option<NativeArray<T>>`, which
/// yields a null pointer and a count of zero when absent.
pub unsafe trait NativeArrayPtr<T> {
    /// Returns a pointer to the first element, or null.
    fn as_ptr_or_null(&self) -> *const T;
    /// Returns a mutable pointer to the first element, or null.
    fn as_mut_ptr_or_null(&mut self) -> *mut T;
    /// Returns the number of elements, as OpenCL counts them.
    fn count(&self) -> u32;
}

unsafe impl<T> NativeArrayPtr<T> for NativeArray<T> {
    fn as_ptr_or_null(&self) -> *const T {
        self.as_ptr()
    }

    fn as_mut_ptr_or_null(&mut self) -> *mut T {
        self.as_mut_ptr()
    }

    fn count(&self) -> u32 {
        self.len() as u32
    }
}

unsafe impl<T> NativeArrayPtr<T> for Option<NativeArray<T>> {
    fn as_ptr_or_null(&self) -> *const T {
        match *self {
            Some(ref array) => array.as_ptr(),
            None => ptr::null(),
        }
    }

    fn as_mut_ptr_or_null(&mut self) -> *mut T {
        match *self {
            Some(ref mut array) => array.as_mut_ptr(),
            None => ptr::null_mut(),
        }
    }

    fn count(&self) -> u32 {
        self.as_ref().map_or(0, |array| array.len() as u32)
    }
}
