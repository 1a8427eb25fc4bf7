//! The managed runtime, as seen from the native side.
//!
//! [`ManagedEnv`] is the complete set of operations the conversion functions
//! need from the JVM. It is implemented for [`jni::JNIEnv`] in
//! [`jni_env`](crate::jni_env); any other implementation (an in-memory heap,
//! for instance) works with every conversion function unchanged.

use jni::sys::jlong;

use crate::error::{Error, Result};
use crate::types::prm::JavaPrm;

/// How a critical array view is released.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ViewMode {
    /// Changes made through the view are discarded (`JNI_ABORT`).
    Discard,
    /// Changes made through the view are committed to the Java array.
    Commit,
}

/// Access to Java arrays, objects, and exceptions.
///
/// Absent (`null`) Java references are represented by `Option::None` in the
/// conversion functions and never reach the methods of this trait, with the
/// exception of [`obj_array_element`](ManagedEnv::obj_array_element), which
/// reports `null` elements as `None`.
pub trait ManagedEnv {
    /// A Java primitive array with element type `J`.
    type PrimArray<J: JavaPrm>: ?Sized;
    /// A reference to a Java object.
    type Object;
    /// A Java object array.
    type ObjArray: ?Sized;

    /// Returns the length of a primitive array.
    fn prim_array_len<J: JavaPrm>(&mut self, array: &Self::PrimArray<J>) -> Result<usize>;

    /// Pins `array`, passes its contents to `f`, then unpins it according to
    /// `mode`. The view is released before this returns, whatever `f` does.
    ///
    /// Returns `Error::ViewUnavailable` if the runtime refuses the view.
    fn with_prim_array_critical<J, R, F>(
        &mut self,
        array: &Self::PrimArray<J>,
        mode: ViewMode,
        f: F,
    ) -> Result<R>
    where
        J: JavaPrm,
        F: FnOnce(&mut [J]) -> R;

    /// Returns the length of an object array.
    fn obj_array_len(&mut self, array: &Self::ObjArray) -> Result<usize>;

    /// Fetches element `index` of an object array, `None` if it is `null`.
    fn obj_array_element(
        &mut self,
        array: &Self::ObjArray,
        index: usize,
    ) -> Result<Option<Self::Object>>;

    /// Releases a reference returned by `obj_array_element` or `construct`.
    fn delete_local(&mut self, _object: Self::Object) {}

    /// Reads the native handle field of a `NativePointerObject`.
    fn native_pointer(&mut self, object: &Self::Object) -> Result<jlong>;

    /// Writes the native handle field of a `NativePointerObject`.
    fn set_native_pointer(&mut self, object: &Self::Object, value: jlong) -> Result<()>;

    /// Creates a new object of `class` (a fully qualified JNI class name)
    /// using its no-argument constructor.
    fn construct(&mut self, class: &str) -> Result<Self::Object>;

    /// Returns true if a Java exception is pending.
    fn exception_pending(&mut self) -> bool;

    /// Throws a new exception of `class` with `message`.
    fn throw_exception(&mut self, class: &str, message: &str) -> Result<()>;

    /// Throws the Java exception matching `err`, if it has one, and returns
    /// `err` for propagation.
    ///
    /// Errors which indicate an already pending exception are passed through
    /// without throwing.
    fn raise(&mut self, err: Error) -> Error {
        if let Some(class) = err.exception_class() {
            if let Err(throw_err) = self.throw_exception(class, &err.to_string()) {
                warn!("ocl_jni: unable to throw '{}' ({}): {}", class, err, throw_err);
            }
        } else if err.is_pending() {
            debug!("ocl_jni: conversion failed, exception pending: {}", err);
        } else {
            debug!("ocl_jni: conversion failed: {}", err);
        }
        err
    }
}
