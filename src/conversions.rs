//! Conversions between Java values and native OpenCL arguments.
//!
//! Functions come in `init_*` / `release_*` pairs. `init_*` runs before the
//! OpenCL call and creates the native value, copying the Java data in when
//! `fill` is set. `release_*` runs afterwards, copying the native data back
//! into Java when `write_back` is set, and frees the native value.
//!
//! On failure the matching Java exception has been thrown (unless one was
//! already pending) and any allocation made by the failing call has been
//! freed. Buffers made by *earlier* calls belong to the caller.

use num_traits::Zero;

use crate::config;
use crate::conv_log;
use crate::env::{ManagedEnv, ViewMode};
use crate::error::{Error, Result};
use crate::native_array::NativeArray;
use crate::types::abs::{ClHandle, Mem};
use crate::types::prm::{copy_bits, ClScl, JavaPrm};
use crate::types::vectors::ClVec2;

const NULL_ELEMENTS: &str = "Array contains 'null' elements";
const NULL_TARGET_ARRAY: &str = "Trying to write to 'null' array";

//=============================================================================
//=========================== PRIMITIVE ARRAYS ================================
//=============================================================================

/// Creates a native array with the length of a Java primitive array.
///
/// If `fill` is set the Java contents are copied in. A `None` array yields
/// `Ok(None)`.
///
/// Throws `OutOfMemoryError` if the native array cannot be allocated.
pub fn init_native_array<E, T>(
    env: &mut E,
    array: Option<&E::PrimArray<T::Java>>,
    fill: bool,
) -> Result<Option<NativeArray<T>>>
where
    E: ManagedEnv,
    T: ClScl,
{
    let array = match array {
        Some(array) => array,
        None => return Ok(None),
    };

    let len = env.prim_array_len(array)?;
    let mut native = NativeArray::<T>::alloc(len).map_err(|err| env.raise(err))?;

    if fill {
        // `native` is dropped (freed) if the view is refused.
        env.with_prim_array_critical(array, ViewMode::Discard, |java: &mut [T::Java]| {
            copy_bits(java, &mut native[..])
        })?;
    }

    conv_log!(
        "ocl_jni: init {}[{}] from {} (fill: {})",
        T::CL_NAME,
        len,
        <T::Java as JavaPrm>::ARRAY_SIGNATURE,
        fill
    );
    Ok(Some(native))
}

/// Frees a native array created by `init_native_array`.
///
/// If `write_back` is set and both sides are present, the native contents
/// are copied into the Java array first. `native` is `None` on return, on
/// every path. Releasing an absent native array is a no-op.
pub fn release_native_array<E, T>(
    env: &mut E,
    native: &mut Option<NativeArray<T>>,
    array: Option<&E::PrimArray<T::Java>>,
    write_back: bool,
) -> Result<()>
where
    E: ManagedEnv,
    T: ClScl,
{
    let native = match native.take() {
        Some(native) => native,
        None => return Ok(()),
    };

    let array = match array {
        Some(array) => array,
        None => return Ok(()),
    };

    if write_back {
        env.with_prim_array_critical(array, ViewMode::Commit, |java: &mut [<T as ClScl>::Java]| {
            copy_bits(&native[..], java)
        })?;
    }

    conv_log!("ocl_jni: release {}[{}] (write back: {})", T::CL_NAME, native.len(), write_back);
    Ok(())
}

//=============================================================================
//============================= HANDLE ARRAYS =================================
//=============================================================================

/// Reads the handle stored by element `index`, failing on `null` elements
/// and on pending exceptions.
fn element_handle<E, H>(env: &mut E, objects: &E::ObjArray, index: usize) -> Result<H>
where
    E: ManagedEnv,
    H: ClHandle,
{
    let object = with_element(env, objects, index)?;
    let value = env.native_pointer(&object);
    env.delete_local(object);
    Ok(H::from_jlong(value?))
}

/// Stores `handle` into element `index`, failing on `null` elements and on
/// pending exceptions.
fn set_element_handle<E, H>(env: &mut E, objects: &E::ObjArray, index: usize, handle: H)
    -> Result<()>
where
    E: ManagedEnv,
    H: ClHandle,
{
    let object = with_element(env, objects, index)?;
    let res = env.set_native_pointer(&object, handle.as_jlong());
    env.delete_local(object);
    res
}

fn with_element<E: ManagedEnv>(env: &mut E, objects: &E::ObjArray, index: usize)
    -> Result<E::Object>
{
    let element = env.obj_array_element(objects, index);

    if env.exception_pending() {
        if let Ok(Some(object)) = element {
            env.delete_local(object);
        }
        return Err(Error::ExceptionPending);
    }

    match element? {
        Some(object) => Ok(object),
        None => Err(env.raise(Error::NullReference(NULL_ELEMENTS))),
    }
}

/// Creates a native handle array with the length of a Java object array.
///
/// If `fill` is set the `nativePointer` of every element is copied in. None
/// of the elements may be `null`. A `None` array yields `Ok(None)`.
///
/// Throws `OutOfMemoryError` if the native array cannot be allocated and
/// `NullPointerException` if a `null` element is found.
pub fn init_native_handles<E, H>(
    env: &mut E,
    objects: Option<&E::ObjArray>,
    fill: bool,
) -> Result<Option<NativeArray<H>>>
where
    E: ManagedEnv,
    H: ClHandle,
{
    let objects = match objects {
        Some(objects) => objects,
        None => return Ok(None),
    };

    let len = env.obj_array_len(objects)?;
    let mut native = NativeArray::<H>::alloc(len).map_err(|err| env.raise(err))?;

    if fill {
        for (idx, slot) in native.iter_mut().enumerate() {
            *slot = element_handle(env, objects, idx)?;
        }
    }

    conv_log!("ocl_jni: init {}[{}] (fill: {})", H::CLASS_NAME, len, fill);
    Ok(Some(native))
}

/// Frees a native handle array created by `init_native_handles`.
///
/// If `write_back` is set each handle is stored into the `nativePointer` of
/// the matching element. `native` is `None` on return, on every path.
///
/// Throws `NullPointerException` if `objects` is `None` while a native array
/// is present, or if a `null` element is found during write back.
pub fn release_native_handles<E, H>(
    env: &mut E,
    native: &mut Option<NativeArray<H>>,
    objects: Option<&E::ObjArray>,
    write_back: bool,
) -> Result<()>
where
    E: ManagedEnv,
    H: ClHandle,
{
    let native = match native.take() {
        Some(native) => native,
        None => return Ok(()),
    };

    let objects = match objects {
        Some(objects) => objects,
        None => return Err(env.raise(Error::NullReference(NULL_TARGET_ARRAY))),
    };

    if write_back {
        let len = env.obj_array_len(objects)?.min(native.len());

        for (idx, &handle) in native[..len].iter().enumerate() {
            set_element_handle(env, objects, idx, handle)?;
        }
    }

    conv_log!("ocl_jni: release {}[{}] (write back: {})", H::CLASS_NAME, native.len(), write_back);
    Ok(())
}

//=============================================================================
//============================= SINGLE OBJECTS ================================
//=============================================================================

/// Returns the handle stored by a single wrapper object (a context, memory
/// object, or command queue passed by value).
///
/// A `None` object, or `fill == false`, yields the null handle.
pub fn init_native_handle<E, H>(env: &mut E, object: Option<&E::Object>, fill: bool) -> Result<H>
where
    E: ManagedEnv,
    H: ClHandle,
{
    match object {
        Some(object) if fill => Ok(H::from_jlong(env.native_pointer(object)?)),
        _ => Ok(H::null()),
    }
}

/// Creates a one-element native handle array for a single wrapper object
/// passed by pointer, such as the `event` out-parameter of an enqueue call.
///
/// A `None` object yields `Ok(None)` (a null pointer for OpenCL).
pub fn init_native_handle_ptr<E, H>(
    env: &mut E,
    object: Option<&E::Object>,
    fill: bool,
) -> Result<Option<NativeArray<H>>>
where
    E: ManagedEnv,
    H: ClHandle,
{
    let object = match object {
        Some(object) => object,
        None => return Ok(None),
    };

    let mut native = NativeArray::<H>::alloc(1).map_err(|err| env.raise(err))?;

    if fill {
        native[0] = H::from_jlong(env.native_pointer(object)?);
    }

    Ok(Some(native))
}

/// Frees a one-element native handle array created by
/// `init_native_handle_ptr`, storing the handle into `object` when
/// `write_back` is set and `object` is present.
pub fn release_native_handle_ptr<E, H>(
    env: &mut E,
    native: &mut Option<NativeArray<H>>,
    object: Option<&E::Object>,
    write_back: bool,
) -> Result<()>
where
    E: ManagedEnv,
    H: ClHandle,
{
    let native = match native.take() {
        Some(native) => native,
        None => return Ok(()),
    };

    match (object, native.first()) {
        (Some(object), Some(handle)) if write_back => {
            env.set_native_pointer(object, handle.as_jlong())
        }
        _ => Ok(()),
    }
}

/// Creates a new Java wrapper object of the type matching `H` holding
/// `handle`.
pub fn create_handle_object<E, H>(env: &mut E, handle: H) -> Result<E::Object>
where
    E: ManagedEnv,
    H: ClHandle,
{
    let class = config::get().class_name(H::CLASS_NAME);
    let object = env.construct(&class)?;

    if let Err(err) = env.set_native_pointer(&object, handle.as_jlong()) {
        env.delete_local(object);
        return Err(err);
    }

    conv_log!("ocl_jni: created {} ({:#x})", class, handle.as_jlong());
    Ok(object)
}

/// Creates a new Java `cl_mem` holding `mem`.
pub fn create_mem<E: ManagedEnv>(env: &mut E, mem: Mem) -> Result<E::Object> {
    create_handle_object(env, mem)
}

//=============================================================================
//================================ VECTORS ====================================
//=============================================================================

/// Creates a two-lane vector (`cl_float2`, `cl_double2`) from a Java array.
///
/// At most `min(2, values.length)` lanes are copied when `fill` is set; the
/// remaining lanes are zero. A `None` array yields a zero vector.
pub fn init_native_vector<E, V>(
    env: &mut E,
    values: Option<&E::PrimArray<<V::Scalar as ClScl>::Java>>,
    fill: bool,
) -> Result<V>
where
    E: ManagedEnv,
    V: ClVec2,
{
    let mut lanes = [<V::Scalar as Zero>::zero(); 2];

    if let (Some(values), true) = (values, fill) {
        env.with_prim_array_critical(values, ViewMode::Discard, |java: &mut [<V::Scalar as ClScl>::Java]| {
            copy_bits(java, &mut lanes[..])
        })?;
    }

    Ok(V::from_lanes(lanes))
}

/// Writes a two-lane vector back into a Java array when `write_back` is set.
///
/// At most `min(2, values.length)` lanes are written.
pub fn release_native_vector<E, V>(
    env: &mut E,
    value: &V,
    values: Option<&E::PrimArray<<V::Scalar as ClScl>::Java>>,
    write_back: bool,
) -> Result<()>
where
    E: ManagedEnv,
    V: ClVec2,
{
    if let (Some(values), true) = (values, write_back) {
        let lanes = value.lanes();
        env.with_prim_array_critical(values, ViewMode::Commit, |java: &mut [<V::Scalar as ClScl>::Java]| {
            copy_bits(&lanes[..], java)
        })?;
    }

    Ok(())
}

