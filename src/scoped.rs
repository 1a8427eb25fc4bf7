//! Closure-scoped conversions.
//!
//! Native method wrappers typically convert several arguments, call OpenCL,
//! then release everything in reverse. The helpers here tie one acquire and
//! its release to the extent of a closure so that the release cannot be
//! skipped on an early return:
//!
//! ```ignore
//! with_native_handles::<_, Event, _, _>(env, wait_list, Transfer::IN, |env, events| {
//!     with_native_array::<_, cl_int, _, _>(env, values, Transfer::IN_OUT, |_env, values| {
//!         enqueue(events.as_ptr_or_null(), events.count(), values.as_mut_ptr_or_null())
//!     })
//! })
//! ```

use crate::conversions::{
    init_native_array, init_native_handles, release_native_array, release_native_handles,
};
use crate::env::ManagedEnv;
use crate::error::Result;
use crate::native_array::NativeArray;
use crate::types::abs::ClHandle;
use crate::types::prm::ClScl;

bitflags! {
    /// Direction(s) in which data moves across the boundary.
    pub struct Transfer: u32 {
        /// Copy Java data into the native buffer on acquire.
        const FILL = 1 << 0;
        /// Copy native data back into Java on release.
        const WRITE_BACK = 1 << 1;

        const IN = Self::FILL.bits;
        const OUT = Self::WRITE_BACK.bits;
        const IN_OUT = Self::FILL.bits | Self::WRITE_BACK.bits;
    }
}

impl Transfer {
    #[inline]
    pub fn fill(&self) -> bool {
        self.contains(Transfer::FILL)
    }

    #[inline]
    pub fn write_back(&self) -> bool {
        self.contains(Transfer::WRITE_BACK)
    }
}

/// Converts `array`, runs `f` with the native buffer, then releases it.
///
/// Write back happens only if `transfer` includes `WRITE_BACK` and `f`
/// returned `Ok`. An error from `f` takes precedence over a release error.
pub fn with_native_array<E, T, R, F>(
    env: &mut E,
    array: Option<&E::PrimArray<T::Java>>,
    transfer: Transfer,
    f: F,
) -> Result<R>
where
    E: ManagedEnv,
    T: ClScl,
    F: FnOnce(&mut E, &mut Option<NativeArray<T>>) -> Result<R>,
{
    let mut native = init_native_array::<E, T>(env, array, transfer.fill())?;
    let res = f(env, &mut native);
    let write_back = transfer.write_back() && res.is_ok();
    let released = release_native_array(env, &mut native, array, write_back);

    let value = res?;
    released?;
    Ok(value)
}

/// Converts the object array `objects`, runs `f` with the native handles,
/// then releases them.
///
/// Write back happens only if `transfer` includes `WRITE_BACK` and `f`
/// returned `Ok`. An error from `f` takes precedence over a release error.
pub fn with_native_handles<E, H, R, F>(
    env: &mut E,
    objects: Option<&E::ObjArray>,
    transfer: Transfer,
    f: F,
) -> Result<R>
where
    E: ManagedEnv,
    H: ClHandle,
    F: FnOnce(&mut E, &mut Option<NativeArray<H>>) -> Result<R>,
{
    let mut native = init_native_handles::<E, H>(env, objects, transfer.fill())?;
    let res = f(env, &mut native);
    let write_back = transfer.write_back() && res.is_ok();
    let released = release_native_handles(env, &mut native, objects, write_back);

    let value = res?;
    released?;
    Ok(value)
}
