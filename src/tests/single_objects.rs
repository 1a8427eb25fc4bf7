use super::{MockArray, MockEnv, MockObject};
use crate::{
    create_handle_object, create_mem, init_native_handle, init_native_handle_ptr,
    init_native_vector, release_native_handle_ptr, release_native_vector, ClHandle, CommandQueue,
    Context, Double2, Error, Event, Float2, Mem, NativeArray, NativeArrayPtr,
};

#[test]
fn single_handle_by_value() {
    let mut env = MockEnv::new();
    let context = MockObject::new("org/jocl/cl_context", 0x1234);

    let native: Context = init_native_handle(&mut env, Some(&context), true).unwrap();
    assert_eq!(native.as_jlong(), 0x1234);

    let native: Mem = init_native_handle(&mut env, None, true).unwrap();
    assert!(native.is_null());

    let native: CommandQueue = init_native_handle(&mut env, Some(&context), false).unwrap();
    assert!(native.is_null());
}

#[test]
fn event_out_parameter() {
    let mut env = MockEnv::new();
    let event = MockObject::new("org/jocl/cl_event", 0);

    let mut native = init_native_handle_ptr::<_, Event>(&mut env, Some(&event), false).unwrap();
    assert_eq!(native.count(), 1);
    assert!(native.as_ref().unwrap()[0].is_null());

    // What `clEnqueue*` would do with the pointer:
    unsafe {
        *native.as_mut_ptr_or_null() = Event::from_jlong(0xE1);
    }

    release_native_handle_ptr(&mut env, &mut native, Some(&event), true).unwrap();
    assert!(native.is_none());
    assert_eq!(event.pointer(), 0xE1);
}

#[test]
fn queue_pointer_fill_without_write_back() {
    let mut env = MockEnv::new();
    let queue = MockObject::new("org/jocl/cl_command_queue", 0x42);

    let mut native = init_native_handle_ptr::<_, CommandQueue>(&mut env, Some(&queue), true).unwrap();
    assert_eq!(native.as_ref().unwrap()[0].as_jlong(), 0x42);
    native.as_mut().unwrap()[0] = CommandQueue::from_jlong(0x43);

    release_native_handle_ptr(&mut env, &mut native, Some(&queue), false).unwrap();
    assert!(native.is_none());
    assert_eq!(queue.pointer(), 0x42);
}

#[test]
fn absent_single_object_pointer() {
    let mut env = MockEnv::new();

    let mut native = init_native_handle_ptr::<_, Event>(&mut env, None, true).unwrap();
    assert!(native.as_ptr_or_null().is_null());

    release_native_handle_ptr::<_, Event>(&mut env, &mut native, None, true).unwrap();
    release_native_handle_ptr::<_, Event>(&mut env, &mut native, None, true).unwrap();
    assert!(env.thrown().is_empty());
}

#[test]
fn pointer_write_back_to_absent_object() {
    let mut env = MockEnv::new();

    let mut native = Some(NativeArray::from_slice(&[Event::from_jlong(0xE2)]).unwrap());
    release_native_handle_ptr(&mut env, &mut native, None, true).unwrap();

    assert!(native.is_none());
    assert!(env.thrown().is_empty());
    env.assert_clean();
}

#[test]
fn create_mem_object() {
    let mut env = MockEnv::new();

    let object = create_mem(&mut env, Mem::from_jlong(0xBEEF)).unwrap();
    assert_eq!(object.class(), "org/jocl/cl_mem");
    assert_eq!(object.pointer(), 0xBEEF);
    assert_eq!(env.constructed().len(), 1);

    let object = create_handle_object(&mut env, Event::from_jlong(3)).unwrap();
    assert_eq!(object.class(), "org/jocl/cl_event");
}

#[test]
fn float2_round_trip() {
    let mut env = MockEnv::new();
    let values = MockArray::new(&[1.5f32, -2.5]);

    let native: Float2 = init_native_vector(&mut env, Some(&values), true).unwrap();
    assert_eq!(native, Float2(1.5, -2.5));

    release_native_vector(&mut env, &Float2(3.0, 4.0), Some(&values), true).unwrap();
    assert_eq!(values.to_vec(), vec![3.0, 4.0]);
}

#[test]
fn vector_lanes_bounded_by_array() {
    let mut env = MockEnv::new();
    let short = MockArray::new(&[7.0f64]);

    let native: Double2 = init_native_vector(&mut env, Some(&short), true).unwrap();
    assert_eq!(native, Double2(7.0, 0.0));

    release_native_vector(&mut env, &Double2(8.0, 9.0), Some(&short), true).unwrap();
    assert_eq!(short.to_vec(), vec![8.0]);

    let long = MockArray::new(&[1.0f64, 2.0, 3.0]);
    release_native_vector(&mut env, &Double2(5.0, 6.0), Some(&long), true).unwrap();
    assert_eq!(long.to_vec(), vec![5.0, 6.0, 3.0]);
}

#[test]
fn vector_absent_and_no_transfer() {
    let mut env = MockEnv::new();
    let values = MockArray::new(&[1.0f32, 2.0]);

    let native: Float2 = init_native_vector(&mut env, None, true).unwrap();
    assert_eq!(native, Float2::default());

    let native: Float2 = init_native_vector(&mut env, Some(&values), false).unwrap();
    assert_eq!(native, Float2(0.0, 0.0));

    release_native_vector(&mut env, &Float2(9.0, 9.0), Some(&values), false).unwrap();
    release_native_vector::<_, Float2>(&mut env, &Float2(9.0, 9.0), None, true).unwrap();
    assert_eq!(values.to_vec(), vec![1.0, 2.0]);
    assert_eq!(env.views_taken(), 0);
}

#[test]
fn vector_refused_view() {
    let mut env = MockEnv::new();
    let values = MockArray::new(&[1.0f32, 2.0]);
    env.refuse_views();

    let res = init_native_vector::<_, Float2>(&mut env, Some(&values), true);
    assert!(matches!(res, Err(Error::ViewUnavailable)));
}
