//! Standard error type for ocl-jni.
//!

use crate::{NULL_POINTER_EXCEPTION, OUT_OF_MEMORY_ERROR};

/// Ocl-jni error result type.
pub type Result<T> = ::std::result::Result<T, Error>;

/// An enum one of several error types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    // OutOfMemory: A native allocation could not be made:
    #[error("Out of memory during array creation")]
    OutOfMemory { len: usize, size: usize },
    // NullReference: A required array, object, or array element was `null`:
    #[error("{0}")]
    NullReference(&'static str),
    // ExceptionPending: A Java exception was already thrown by the runtime:
    #[error("A Java exception is pending")]
    ExceptionPending,
    // ViewUnavailable: The runtime refused a critical array view:
    #[error("Unable to obtain a critical view of a Java array")]
    ViewUnavailable,
    // Jni: Any other JNI failure:
    #[error("{0}")]
    Jni(jni::errors::Error),
}

impl Error {
    /// Returns the Java exception class which should be thrown for this
    /// error, or `None` if the runtime has already thrown one (or none
    /// applies).
    pub fn exception_class(&self) -> Option<&'static str> {
        match *self {
            Error::OutOfMemory { .. } => Some(OUT_OF_MEMORY_ERROR),
            Error::NullReference(_) => Some(NULL_POINTER_EXCEPTION),
            _ => None,
        }
    }

    /// Returns true if this error leaves an exception pending in the JVM
    /// which was not raised by this crate.
    pub fn is_pending(&self) -> bool {
        matches!(*self, Error::ExceptionPending | Error::ViewUnavailable)
    }
}

impl From<jni::errors::Error> for Error {
    fn from(err: jni::errors::Error) -> Self {
        match err {
            jni::errors::Error::JavaException => Error::ExceptionPending,
            err => Error::Jni(err),
        }
    }
}
