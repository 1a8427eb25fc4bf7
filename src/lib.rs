//! JNI marshaling between Java OpenCL bindings and the native OpenCL API.
//!
//! This crate contains the conversion layer used by the native half of a
//! Java OpenCL binding (`org.jocl`). Every native method wrapper goes through
//! the same motions: turn each Java argument into whatever the OpenCL C API
//! expects, make the call, then turn the results back into Java values.
//! The functions here take care of the first and last of those steps:
//!
//! * Java primitive arrays (`byte[]`, `int[]`, `float[]`, ...) to native
//!   buffers of identical bit width and back ([`init_native_array`],
//!   [`release_native_array`]).
//! * Arrays of Java wrapper objects which carry a native handle (`cl_event[]`,
//!   `cl_command_queue[]`, ...) to native handle arrays and back
//!   ([`init_native_handles`], [`release_native_handles`]).
//! * Single wrapper objects, `cl_float2` / `cl_double2` values, and
//!   construction of new wrapper objects ([`init_native_handle`],
//!   [`init_native_vector`], [`create_mem`], ...).
//!
//! The managed runtime is reached through the [`ManagedEnv`] trait, which is
//! implemented for [`jni::JNIEnv`]. Native buffers are [`NativeArray`]s,
//! which free their storage exactly once when dropped.
//!
//! ## Errors
//!
//! Failures raise the matching Java exception (`OutOfMemoryError`,
//! `NullPointerException`) before returning an [`Error`]. A Java exception
//! which is already pending is never overwritten.
//!
//! ## Logging
//!
//! All logging goes through the [`log`] facade. Enable the
//! `conversion_debug_print` feature to promote per-conversion messages from
//! `trace` to `info`.

#![doc(html_root_url = "https://docs.rs/ocl-jni/0.1.0")]

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate log;

mod conversions;
mod error;
mod native_array;
mod scoped;
pub mod config;
pub mod env;
pub mod ffi;
pub mod jni_env;
pub mod types;
#[cfg(test)]
mod tests;

pub use self::config::BindingConfig;
pub use self::conversions::{
    create_handle_object, create_mem, init_native_array, init_native_handle,
    init_native_handle_ptr, init_native_handles, init_native_vector, release_native_array,
    release_native_handle_ptr, release_native_handles, release_native_vector,
};
pub use self::env::{ManagedEnv, ViewMode};
pub use self::error::{Error, Result};
pub use self::native_array::{NativeArray, NativeArrayPtr};
pub use self::scoped::{with_native_array, with_native_handles, Transfer};
pub use self::types::abs::{
    ClHandle, CommandQueue, Context, DeviceId, Event, Kernel, Mem, PlatformId, Program, Sampler,
};
pub use self::types::prm::{ClScl, JavaPrm};
pub use self::types::vectors::{ClVec2, Double2, Float2};

//=============================================================================
//================================ CONSTANTS ==================================
//=============================================================================

/// Java class raised when a native allocation fails.
pub const OUT_OF_MEMORY_ERROR: &str = "java/lang/OutOfMemoryError";

/// Java class raised when a required array, object, or element is `null`.
pub const NULL_POINTER_EXCEPTION: &str = "java/lang/NullPointerException";

/// JNI type signature of the native handle field (`long`).
pub const NATIVE_POINTER_SIGNATURE: &str = "J";

//=============================================================================
//================================= MACROS ====================================
//=============================================================================

/// Logs a per-conversion message. Promoted to `info` by the
/// `conversion_debug_print` feature.
macro_rules! conv_log {
    ($($arg:tt)+) => {
        if cfg!(feature = "conversion_debug_print") {
            info!($($arg)+);
        } else {
            trace!($($arg)+);
        }
    };
}

pub(crate) use conv_log;
