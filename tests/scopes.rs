mod common;

use autowire::{DiError, ServiceSpec, Value};
use common::{counted_container, Clock};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

#[test]
fn test_scoped_memoized_until_flush() {
    let (mut c, built) = counted_container();
    c.register_scoped("clock", ServiceSpec::class("Clock")).unwrap();

    let a = c.resolve_as::<Clock>("clock").unwrap();
    let b = c.resolve_as::<Clock>("clock").unwrap();
    assert!(Arc::ptr_eq(&a, &b));

    assert!(c.flush_scoped_instance("clock"));
    assert!(c.has("clock"));

    let after = c.resolve_as::<Clock>("clock").unwrap();
    assert!(!Arc::ptr_eq(&a, &after));
    assert_eq!(after.serial, 1);
    assert_eq!(built.load(Ordering::SeqCst), 2);
}

#[test]
fn test_flush_reinvokes_factory() {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = calls.clone();

    let (mut c, _) = counted_container();
    c.register_scoped(
        "request",
        ServiceSpec::factory(move || Value::object(counter.fetch_add(1, Ordering::SeqCst))),
    )
    .unwrap();

    assert_eq!(*c.resolve_as::<usize>("request").unwrap(), 0);
    assert_eq!(*c.resolve_as::<usize>("request").unwrap(), 0);
    c.flush_scoped_instance("request");
    assert_eq!(*c.resolve_as::<usize>("request").unwrap(), 1);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_flush_keeps_prebuilt_instance() {
    let (mut c, _) = counted_container();
    c.register_scoped("user", ServiceSpec::instance(String::from("alice")))
        .unwrap();

    let before = c.resolve("user").unwrap();
    c.flush_scoped_instance("user");
    let after = c.resolve("user").unwrap();
    assert!(Arc::ptr_eq(&before, &after));
}

#[test]
fn test_flush_does_not_touch_shared() {
    let (mut c, _) = counted_container();
    c.register_shared("clock", ServiceSpec::class("Clock")).unwrap();

    let before = c.resolve("clock").unwrap();
    assert!(!c.flush_scoped_instance("clock"));
    assert!(Arc::ptr_eq(&before, &c.resolve("clock").unwrap()));
}

#[test]
fn test_flush_unknown_is_noop() {
    let (mut c, _) = counted_container();
    assert!(!c.flush_scoped_instance("missing"));
    assert_eq!(c.resolve("missing").unwrap_err(), DiError::NotFound("missing".into()));
}

#[test]
fn test_flush_all_scoped_instances() {
    let (mut c, built) = counted_container();
    c.register_scoped("a", ServiceSpec::class("Clock")).unwrap();
    c.register_scoped("b", ServiceSpec::class("Clock")).unwrap();
    c.register_scoped("unused", ServiceSpec::class("Clock")).unwrap();
    c.register_shared("shared", ServiceSpec::class("Clock")).unwrap();

    let a = c.resolve("a").unwrap();
    c.resolve("b").unwrap();
    let shared = c.resolve("shared").unwrap();

    assert_eq!(c.flush_scoped_instances(), 2);
    assert!(!Arc::ptr_eq(&a, &c.resolve("a").unwrap()));
    assert!(Arc::ptr_eq(&shared, &c.resolve("shared").unwrap()));
    assert_eq!(built.load(Ordering::SeqCst), 4);
}

#[test]
fn test_scoped_dependency_rebuilt_after_flush() {
    let (mut c, _) = counted_container();
    c.register_scoped("Clock", ServiceSpec::class("Clock")).unwrap();

    let first = c.make("Service").unwrap().downcast::<common::Service>().ok().unwrap();
    let same_scope = c.make("Service").unwrap().downcast::<common::Service>().ok().unwrap();
    assert!(Arc::ptr_eq(&first.clock, &same_scope.clock));

    c.flush_scoped_instances();
    let next_scope = c.make("Service").unwrap().downcast::<common::Service>().ok().unwrap();
    assert!(!Arc::ptr_eq(&first.clock, &next_scope.clock));
}
