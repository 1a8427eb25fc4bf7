//! Abstract data type wrappers.
//!
//! ### Reference
//!
//! The following table describes abstract data types supported by OpenCL
//! (from [SDK]):
//!
//! * cl_platform_id: The ID for a platform.
//! * cl_device_id: The ID for a device.
//! * cl_context: A context.
//! * cl_command_queue: A command queue.
//! * cl_mem: A memory object.
//! * cl_program: A program.
//! * cl_kernel: A kernel.
//! * cl_event: An event.
//! * cl_sampler: A sampler.
//!
//! On the Java side each of these is an `org.jocl.<name>` object extending
//! `NativePointerObject`, whose `long nativePointer` field stores the raw
//! pointer. The wrappers here are `#[repr(transparent)]` so that a
//! `NativeArray<Event>` can be handed to OpenCL as a `*const cl_event`.
//!
//! None of these wrappers retain or release the underlying OpenCL object.
//! Reference counting belongs to the Java side of the binding.
//!
//! [SDK]: https://www.khronos.org/registry/cl/sdk/1.2/docs/man/xhtml/abstractDataTypes.html

use std::fmt::Debug;
use std::ptr;

use jni::sys::jlong;

use crate::ffi::{
    cl_command_queue, cl_context, cl_device_id, cl_event, cl_kernel, cl_mem, cl_platform_id,
    cl_program, cl_sampler,
};

//=============================================================================
//================================== TRAITS ===================================
//=============================================================================

/// Types which wrap a single raw OpenCL handle stored by a Java
/// `NativePointerObject`.
///
/// ### Safety
///
/// Implementors must have the exact layout of their raw handle type.
pub unsafe trait ClHandle: Copy + Default + Debug + PartialEq + 'static {
    /// The raw OpenCL handle type (`cl_mem`, `cl_event`, ...).
    type Raw: Copy;

    /// Simple name of the Java wrapper class (`"cl_mem"`).
    const CLASS_NAME: &'static str;

    /// Creates a wrapper from the value of a Java `nativePointer` field.
    fn from_jlong(value: jlong) -> Self;

    /// Returns the value to store in a Java `nativePointer` field.
    fn as_jlong(&self) -> jlong;

    /// Returns the raw handle.
    fn as_raw(&self) -> Self::Raw;

    /// Returns true if this handle is null.
    fn is_null(&self) -> bool;

    /// Returns a null handle, used to initialize slots which OpenCL fills in.
    fn null() -> Self {
        Self::default()
    }
}

//=============================================================================
//=================================== TYPES ===================================
//=============================================================================

macro_rules! cl_handle {
    ($(#[$attr:meta])* pub struct $name:ident($raw:ty) => $class:expr;) => {
        $(#[$attr])*
        #[repr(transparent)]
        #[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
        pub struct $name($raw);

        impl $name {
            /// Creates a new wrapper from a raw pointer.
            ///
            /// ### Safety
            ///
            /// The pointer is not validated. Passing an invalid handle on to
            /// OpenCL is undefined behavior.
            pub unsafe fn from_raw(ptr: $raw) -> $name {
                $name(ptr)
            }

            /// Returns a pointer, do not store it.
            #[inline(always)]
            pub fn as_ptr(&self) -> $raw {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> $name {
                $name(ptr::null_mut())
            }
        }

        unsafe impl ClHandle for $name {
            type Raw = $raw;

            const CLASS_NAME: &'static str = $class;

            #[inline]
            fn from_jlong(value: jlong) -> $name {
                $name(value as usize as $raw)
            }

            #[inline]
            fn as_jlong(&self) -> jlong {
                self.0 as usize as jlong
            }

            #[inline]
            fn as_raw(&self) -> $raw {
                self.0
            }

            #[inline]
            fn is_null(&self) -> bool {
                self.0.is_null()
            }
        }
    };
}

cl_handle! {
    /// cl_platform_id
    pub struct PlatformId(cl_platform_id) => "cl_platform_id";
}

cl_handle! {
    /// cl_device_id
    pub struct DeviceId(cl_device_id) => "cl_device_id";
}

cl_handle! {
    /// cl_context
    pub struct Context(cl_context) => "cl_context";
}

cl_handle! {
    /// cl_command_queue
    pub struct CommandQueue(cl_command_queue) => "cl_command_queue";
}

cl_handle! {
    /// cl_mem
    pub struct Mem(cl_mem) => "cl_mem";
}

cl_handle! {
    /// cl_program
    pub struct Program(cl_program) => "cl_program";
}

cl_handle! {
    /// cl_kernel
    pub struct Kernel(cl_kernel) => "cl_kernel";
}

cl_handle! {
    /// cl_event
    ///
    /// Slots for events created by an `enqueue` call start out null and are
    /// written back to the Java `cl_event` afterwards.
    pub struct Event(cl_event) => "cl_event";
}

cl_handle! {
    /// cl_sampler
    pub struct Sampler(cl_sampler) => "cl_sampler";
}
