//! Scalar pairings between Java primitives and OpenCL scalars.
//!
//! Every OpenCL scalar (`cl_char` through `cl_double`) is paired with the
//! Java primitive of the same width. Unsigned OpenCL types share the Java
//! array type of their signed counterpart (Java has no unsigned types) and
//! are copied bit-for-bit.

use std::fmt::Debug;
use std::mem;

use jni::objects::TypeArray;
use jni::sys::{jbyte, jdouble, jfloat, jint, jlong, jshort};
use num_traits::Zero;

use crate::ffi::{
    cl_char, cl_double, cl_float, cl_int, cl_long, cl_short, cl_uchar, cl_uint, cl_ulong,
    cl_ushort,
};

//=============================================================================
//================================== TRAITS ===================================
//=============================================================================

/// A Java primitive type which can be the element type of a Java array.
///
/// ### Safety
///
/// Implementors must be plain-old-data with no invalid bit patterns.
pub unsafe trait JavaPrm: TypeArray + Copy + Default + Debug + PartialEq + 'static {
    /// The JNI type signature of an array of this primitive.
    const ARRAY_SIGNATURE: &'static str;
}

/// An OpenCL scalar which has a Java primitive of identical width.
///
/// ### Safety
///
/// `mem::size_of::<Self>()` must equal `mem::size_of::<Self::Java>()` and
/// every bit pattern of one must be a valid value of the other.
pub unsafe trait ClScl: Copy + Default + Debug + PartialEq + Zero + 'static {
    /// The Java element type of the matching Java array.
    type Java: JavaPrm;

    /// The OpenCL C name of this type.
    const CL_NAME: &'static str;
}

//=============================================================================
//============================= IMPLEMENTATIONS ===============================
//=============================================================================

macro_rules! impl_java_prm {
    ($($java:ty => $sig:expr),+ $(,)*) => {
        $(
            unsafe impl JavaPrm for $java {
                const ARRAY_SIGNATURE: &'static str = $sig;
            }
        )+
    };
}

macro_rules! impl_cl_scl {
    ($($cl:ty => $java:ty, $name:expr);+ $(;)*) => {
        $(
            const _: () = assert!(mem::size_of::<$cl>() == mem::size_of::<$java>());

            unsafe impl ClScl for $cl {
                type Java = $java;
                const CL_NAME: &'static str = $name;
            }
        )+
    };
}

impl_java_prm! {
    jbyte => "[B",
    jshort => "[S",
    jint => "[I",
    jlong => "[J",
    jfloat => "[F",
    jdouble => "[D",
}

impl_cl_scl! {
    cl_char => jbyte, "cl_char";
    cl_uchar => jbyte, "cl_uchar";
    cl_short => jshort, "cl_short";
    cl_ushort => jshort, "cl_ushort";
    cl_int => jint, "cl_int";
    cl_uint => jint, "cl_uint";
    cl_long => jlong, "cl_long";
    cl_ulong => jlong, "cl_ulong";
    cl_float => jfloat, "cl_float";
    cl_double => jdouble, "cl_double";
}

//=============================================================================
//=========================== UTILITY FUNCTIONS ===============================
//=============================================================================

/// Copies `min(src.len(), dst.len())` elements from `src` to `dst`,
/// reinterpreting each element's bits. Returns the number of elements copied.
pub(crate) fn copy_bits<S: Copy, D: Copy>(src: &[S], dst: &mut [D]) -> usize {
    debug_assert_eq!(
        mem::size_of::<S>(),
        mem::size_of::<D>(),
        "ocl_jni::copy_bits: element widths differ"
    );
    let count = src.len().min(dst.len());

    // Equal-width primitives share their alignment.
    unsafe {
        std::ptr::copy_nonoverlapping(src.as_ptr() as *const D, dst.as_mut_ptr(), count);
    }
    count
}
