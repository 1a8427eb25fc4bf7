//! Conversion tests, run against an in-memory managed heap.
//!
//! `MockEnv` stands in for a `JNIEnv`: it tracks thrown exceptions, open
//! critical views, and outstanding local references so that tests can check
//! that every path cleans up after itself.

#![allow(dead_code)]

mod single_objects;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use jni::sys::jlong;

use crate::env::{ManagedEnv, ViewMode};
use crate::error::{Error, Result};
use crate::types::prm::JavaPrm;

const OUT_OF_BOUNDS: &str = "java/lang/ArrayIndexOutOfBoundsException";

/// Installs a test logger once. Output is captured unless a test fails.
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

//=============================================================================
//================================ MOCK HEAP ==================================
//=============================================================================

/// A Java primitive array.
#[derive(Debug)]
pub struct MockArray<J> {
    data: RefCell<Vec<J>>,
    reported_len: Option<usize>,
}

impl<J: JavaPrm> MockArray<J> {
    pub fn new(values: &[J]) -> MockArray<J> {
        MockArray {
            data: RefCell::new(values.to_vec()),
            reported_len: None,
        }
    }

    /// An array which claims a length of `len` without storing anything.
    /// Only useful for allocation failure tests.
    pub fn claiming_len(len: usize) -> MockArray<J> {
        MockArray {
            data: RefCell::new(Vec::new()),
            reported_len: Some(len),
        }
    }

    pub fn to_vec(&self) -> Vec<J> {
        self.data.borrow().clone()
    }

    pub fn set(&self, values: &[J]) {
        *self.data.borrow_mut() = values.to_vec();
    }
}

/// A Java `NativePointerObject`. Clones refer to the same object.
#[derive(Clone, Debug)]
pub struct MockObject {
    class: String,
    pointer: Rc<Cell<jlong>>,
}

impl MockObject {
    pub fn new(class: &str, pointer: jlong) -> MockObject {
        MockObject {
            class: class.to_owned(),
            pointer: Rc::new(Cell::new(pointer)),
        }
    }

    pub fn pointer(&self) -> jlong {
        self.pointer.get()
    }

    pub fn class(&self) -> &str {
        &self.class
    }
}

/// A Java object array.
#[derive(Debug, Default)]
pub struct MockObjArray {
    elements: Vec<Option<MockObject>>,
    throw_at: Option<usize>,
    reported_len: Option<usize>,
}

impl MockObjArray {
    pub fn new(elements: Vec<Option<MockObject>>) -> MockObjArray {
        MockObjArray {
            elements,
            throw_at: None,
            reported_len: None,
        }
    }

    /// An array which claims a length of `len` without holding any elements.
    pub fn claiming_len(len: usize) -> MockObjArray {
        MockObjArray {
            reported_len: Some(len),
            ..MockObjArray::default()
        }
    }

    /// An array of fresh objects holding `pointers`.
    pub fn of_pointers(class: &str, pointers: &[jlong]) -> MockObjArray {
        MockObjArray::new(pointers.iter().map(|&p| Some(MockObject::new(class, p))).collect())
    }

    /// Makes fetching element `index` throw, as an out of bounds access would.
    pub fn throwing_at(mut self, index: usize) -> MockObjArray {
        self.throw_at = Some(index);
        self
    }

    pub fn pointers(&self) -> Vec<Option<jlong>> {
        self.elements.iter().map(|e| e.as_ref().map(MockObject::pointer)).collect()
    }
}

/// The managed runtime.
#[derive(Debug, Default)]
pub struct MockEnv {
    pending: Option<(String, String)>,
    thrown: Vec<(String, String)>,
    refuse_views: bool,
    views_open: usize,
    views_taken: usize,
    locals: isize,
    constructed: Vec<MockObject>,
}

impl MockEnv {
    pub fn new() -> MockEnv {
        init_logger();
        MockEnv::default()
    }

    /// Makes every subsequent critical view request fail.
    pub fn refuse_views(&mut self) {
        self.refuse_views = true;
    }

    /// Every exception thrown so far, as `(class, message)`.
    pub fn thrown(&self) -> &[(String, String)] {
        &self.thrown
    }

    pub fn pending_class(&self) -> Option<&str> {
        self.pending.as_ref().map(|(class, _)| class.as_str())
    }

    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    pub fn views_taken(&self) -> usize {
        self.views_taken
    }

    /// Panics if a view or a local reference was leaked.
    pub fn assert_clean(&self) {
        assert_eq!(self.views_open, 0, "critical view left open");
        assert_eq!(self.locals, 0, "local references leaked");
    }

    pub fn constructed(&self) -> &[MockObject] {
        &self.constructed
    }
}

impl ManagedEnv for MockEnv {
    type PrimArray<J: JavaPrm> = MockArray<J>;
    type Object = MockObject;
    type ObjArray = MockObjArray;

    fn prim_array_len<J: JavaPrm>(&mut self, array: &MockArray<J>) -> Result<usize> {
        Ok(array.reported_len.unwrap_or_else(|| array.data.borrow().len()))
    }

    fn with_prim_array_critical<J, R, F>(
        &mut self,
        array: &MockArray<J>,
        mode: ViewMode,
        f: F,
    ) -> Result<R>
    where
        J: JavaPrm,
        F: FnOnce(&mut [J]) -> R,
    {
        if self.refuse_views {
            self.pending = Some(("java/lang/OutOfMemoryError".to_owned(), "pinning".to_owned()));
            return Err(Error::ViewUnavailable);
        }

        self.views_open += 1;
        self.views_taken += 1;
        let res = match mode {
            ViewMode::Commit => {
                let mut data = array.data.borrow_mut();
                f(&mut data[..])
            }
            ViewMode::Discard => {
                let mut copy = array.data.borrow().clone();
                f(&mut copy[..])
            }
        };
        self.views_open -= 1;
        Ok(res)
    }

    fn obj_array_len(&mut self, array: &MockObjArray) -> Result<usize> {
        Ok(array.reported_len.unwrap_or(array.elements.len()))
    }

    fn obj_array_element(
        &mut self,
        array: &MockObjArray,
        index: usize,
    ) -> Result<Option<MockObject>> {
        if array.throw_at == Some(index) || index >= array.elements.len() {
            self.pending = Some((OUT_OF_BOUNDS.to_owned(), index.to_string()));
            return Err(Error::ExceptionPending);
        }

        let element = array.elements[index].clone();
        if element.is_some() {
            self.locals += 1;
        }
        Ok(element)
    }

    fn delete_local(&mut self, _object: MockObject) {
        self.locals -= 1;
    }

    fn native_pointer(&mut self, object: &MockObject) -> Result<jlong> {
        Ok(object.pointer.get())
    }

    fn set_native_pointer(&mut self, object: &MockObject, value: jlong) -> Result<()> {
        object.pointer.set(value);
        Ok(())
    }

    fn construct(&mut self, class: &str) -> Result<MockObject> {
        let object = MockObject::new(class, 0);
        self.constructed.push(object.clone());
        self.locals += 1;
        Ok(object)
    }

    fn exception_pending(&mut self) -> bool {
        self.pending.is_some()
    }

    fn throw_exception(&mut self, class: &str, message: &str) -> Result<()> {
        let exception = (class.to_owned(), message.to_owned());
        self.thrown.push(exception.clone());
        self.pending = Some(exception);
        Ok(())
    }
}
