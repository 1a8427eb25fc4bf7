//! `ManagedEnv` for a live JVM.

use jni::objects::{JObject, JObjectArray, JPrimitiveArray, JValue, ReleaseMode};
use jni::sys::{jlong, jsize};
use jni::JNIEnv;

use crate::config;
use crate::env::{ManagedEnv, ViewMode};
use crate::error::{Error, Result};
use crate::types::prm::JavaPrm;
use crate::NATIVE_POINTER_SIGNATURE;

impl<'local> ManagedEnv for JNIEnv<'local> {
    type PrimArray<J: JavaPrm> = JPrimitiveArray<'local, J>;
    type Object = JObject<'local>;
    type ObjArray = JObjectArray<'local>;

    fn prim_array_len<J: JavaPrm>(&mut self, array: &JPrimitiveArray<'local, J>) -> Result<usize> {
        let len = self.get_array_length(array)?;
        Ok(len as usize)
    }

    fn with_prim_array_critical<J, R, F>(
        &mut self,
        array: &JPrimitiveArray<'local, J>,
        mode: ViewMode,
        f: F,
    ) -> Result<R>
    where
        J: JavaPrm,
        F: FnOnce(&mut [J]) -> R,
    {
        let release_mode = match mode {
            ViewMode::Discard => ReleaseMode::NoCopyBack,
            ViewMode::Commit => ReleaseMode::CopyBack,
        };

        // No other JNI calls are made while the view is held.
        let mut elements = unsafe { self.get_array_elements_critical(array, release_mode) }
            .map_err(|err| {
                debug!("ocl_jni: GetPrimitiveArrayCritical failed: {}", err);
                Error::ViewUnavailable
            })?;

        Ok(f(&mut *elements))
    }

    fn obj_array_len(&mut self, array: &JObjectArray<'local>) -> Result<usize> {
        let len = self.get_array_length(array)?;
        Ok(len as usize)
    }

    fn obj_array_element(
        &mut self,
        array: &JObjectArray<'local>,
        index: usize,
    ) -> Result<Option<JObject<'local>>> {
        let element = self.get_object_array_element(array, index as jsize)?;

        if element.is_null() {
            Ok(None)
        } else {
            Ok(Some(element))
        }
    }

    fn delete_local(&mut self, object: JObject<'local>) {
        if let Err(err) = self.delete_local_ref(object) {
            warn!("ocl_jni: DeleteLocalRef failed: {}", err);
        }
    }

    fn native_pointer(&mut self, object: &JObject<'local>) -> Result<jlong> {
        let field = config::get().native_pointer_field_name();
        let value = self.get_field(object, field, NATIVE_POINTER_SIGNATURE)?;
        Ok(value.j()?)
    }

    fn set_native_pointer(&mut self, object: &JObject<'local>, value: jlong) -> Result<()> {
        let field = config::get().native_pointer_field_name();
        self.set_field(object, field, NATIVE_POINTER_SIGNATURE, JValue::Long(value))?;
        Ok(())
    }

    fn construct(&mut self, class: &str) -> Result<JObject<'local>> {
        Ok(self.new_object(class, "()V", &[])?)
    }

    fn exception_pending(&mut self) -> bool {
        self.exception_check().unwrap_or(true)
    }

    fn throw_exception(&mut self, class: &str, message: &str) -> Result<()> {
        Ok(self.throw_new(class, message)?)
    }
}

#[cfg(feature = "jni_onload")]
mod onload {
    use jni::sys::{jint, JNI_ERR, JNI_VERSION_1_6};
    use jni::JavaVM;
    use libc::c_void;

    use crate::config;

    /// Checks that the handle base class can be resolved by the loading
    /// class loader. The configuration is only peeked at, so host code can
    /// still install its own before the first conversion.
    #[no_mangle]
    pub extern "system" fn JNI_OnLoad(vm: *mut jni::sys::JavaVM, _reserved: *mut c_void) -> jint {
        let vm = match unsafe { JavaVM::from_raw(vm) } {
            Ok(vm) => vm,
            Err(err) => {
                warn!("ocl_jni: JNI_OnLoad received an invalid JavaVM: {}", err);
                return JNI_ERR;
            }
        };
        let mut env = match vm.get_env() {
            Ok(env) => env,
            Err(err) => {
                warn!("ocl_jni: JNI_OnLoad unable to obtain JNIEnv: {}", err);
                return JNI_ERR;
            }
        };

        let class_name = config::peek().native_pointer_class_name();
        match env.find_class(&class_name) {
            Ok(class) => {
                if let Err(err) = env.delete_local_ref(class) {
                    warn!("ocl_jni: unable to delete local reference: {}", err);
                }
                debug!("ocl_jni: loaded, handle base class '{}'", class_name);
                JNI_VERSION_1_6
            }
            Err(err) => {
                warn!("ocl_jni: unable to find class '{}': {}", class_name, err);
                JNI_ERR
            }
        }
    }
}
