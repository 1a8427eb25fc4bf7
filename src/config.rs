//! Names of the Java classes and fields used by the conversions.
//!
//! The defaults match the `org.jocl` binding. A different Java package can
//! be targeted by installing a custom configuration before the first
//! conversion runs:
//!
//! ```
//! use ocl_jni::BindingConfig;
//!
//! let config = BindingConfig::new()
//!     .package("com/example/cl")
//!     .native_pointer_field("handle");
//!
//! assert_eq!(config.class_name("cl_mem"), "com/example/cl/cl_mem");
//! ```

use std::sync::OnceLock;

const DEFAULT_PACKAGE: &str = "org/jocl";
const DEFAULT_NATIVE_POINTER_CLASS: &str = "NativePointerObject";
const DEFAULT_NATIVE_POINTER_FIELD: &str = "nativePointer";

static CONFIG: OnceLock<BindingConfig> = OnceLock::new();

/// Java-side names used by the conversion functions.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BindingConfig {
    package: String,
    native_pointer_class: String,
    native_pointer_field: String,
}

impl BindingConfig {
    /// Returns the `org.jocl` configuration.
    pub fn new() -> BindingConfig {
        BindingConfig {
            package: DEFAULT_PACKAGE.to_owned(),
            native_pointer_class: DEFAULT_NATIVE_POINTER_CLASS.to_owned(),
            native_pointer_field: DEFAULT_NATIVE_POINTER_FIELD.to_owned(),
        }
    }

    /// Sets the JNI package path (slash separated) of the wrapper classes.
    pub fn package<S: Into<String>>(mut self, package: S) -> BindingConfig {
        self.package = package.into().trim_end_matches('/').to_owned();
        self
    }

    /// Sets the simple name of the base class holding the handle field.
    pub fn native_pointer_class<S: Into<String>>(mut self, class: S) -> BindingConfig {
        self.native_pointer_class = class.into();
        self
    }

    /// Sets the name of the `long` field holding the native handle.
    pub fn native_pointer_field<S: Into<String>>(mut self, field: S) -> BindingConfig {
        self.native_pointer_field = field.into();
        self
    }

    /// Returns the fully qualified JNI name of a wrapper class.
    pub fn class_name(&self, simple_name: &str) -> String {
        format!("{}/{}", self.package, simple_name)
    }

    /// Returns the fully qualified JNI name of the handle base class.
    pub fn native_pointer_class_name(&self) -> String {
        self.class_name(&self.native_pointer_class)
    }

    /// Returns the name of the native handle field.
    pub fn native_pointer_field_name(&self) -> &str {
        &self.native_pointer_field
    }
}

impl Default for BindingConfig {
    fn default() -> BindingConfig {
        BindingConfig::new()
    }
}

/// Installs the process-wide configuration.
///
/// Returns the rejected configuration if one is already in use. `get` locks
/// in the default, so this must run before the first conversion. `peek`
/// does not.
pub fn install(config: BindingConfig) -> Result<(), BindingConfig> {
    install_in(&CONFIG, config)
}

/// Returns the process-wide configuration, installing the default if none
/// has been installed.
pub fn get() -> &'static BindingConfig {
    CONFIG.get_or_init(BindingConfig::new)
}

/// Returns a copy of the configuration currently in effect without locking
/// it in. Later calls to `install` still succeed.
pub fn peek() -> BindingConfig {
    peek_in(&CONFIG)
}

fn install_in(cell: &OnceLock<BindingConfig>, config: BindingConfig) -> Result<(), BindingConfig> {
    match cell.set(config) {
        Ok(()) => {
            debug!("ocl_jni: installed binding config: {:?}", cell.get());
            Ok(())
        }
        Err(rejected) => {
            warn!("ocl_jni: binding config already in use, ignoring {:?}", rejected);
            Err(rejected)
        }
    }
}

fn peek_in(cell: &OnceLock<BindingConfig>) -> BindingConfig {
    cell.get().cloned().unwrap_or_default()
}
