/// Property-based tests for service resolution
///
/// These tests verify that lifetime semantics hold regardless of how often
/// and in which order services are resolved and flushed.

mod common;

use autowire::{ServiceSpec, TransientSpec, Value};
use common::counted_container;
use proptest::prelude::*;
use std::sync::atomic::Ordering;
use std::sync::Arc;

#[derive(Debug, Clone, Copy)]
enum Step {
    ResolveShared,
    ResolveScoped,
    ResolveTransient,
    Flush,
}

fn step() -> impl Strategy<Value = Step> {
    prop_oneof![
        Just(Step::ResolveShared),
        Just(Step::ResolveScoped),
        Just(Step::ResolveTransient),
        Just(Step::Flush),
    ]
}

proptest! {
    #[test]
    fn lifetimes_hold_under_any_schedule(steps in prop::collection::vec(step(), 1..50)) {
        let (mut c, built) = counted_container();
        c.register_shared("shared", ServiceSpec::class("Clock")).unwrap();
        c.register_scoped("scoped", ServiceSpec::class("Clock")).unwrap();
        c.register_transient("transient", TransientSpec::class("Clock")).unwrap();

        let mut shared = None;
        let mut scoped: Option<autowire::Object> = None;
        let mut last_transient: Option<autowire::Object> = None;
        let mut expected_builds = 0usize;

        for step in steps {
            match step {
                Step::ResolveShared => {
                    let object = c.resolve("shared").unwrap();
                    match &shared {
                        Some(previous) => prop_assert!(Arc::ptr_eq(previous, &object)),
                        None => {
                            expected_builds += 1;
                            shared = Some(object);
                        }
                    }
                }
                Step::ResolveScoped => {
                    let object = c.resolve("scoped").unwrap();
                    match &scoped {
                        Some(previous) => prop_assert!(Arc::ptr_eq(previous, &object)),
                        None => {
                            expected_builds += 1;
                            scoped = Some(object);
                        }
                    }
                }
                Step::ResolveTransient => {
                    let object = c.resolve("transient").unwrap();
                    if let Some(previous) = &last_transient {
                        prop_assert!(!Arc::ptr_eq(previous, &object));
                    }
                    expected_builds += 1;
                    last_transient = Some(object);
                }
                Step::Flush => {
                    let had_instance = scoped.take().is_some();
                    prop_assert_eq!(c.flush_scoped_instance("scoped"), had_instance);
                    prop_assert!(c.has("scoped"));
                }
            }
        }

        prop_assert_eq!(built.load(Ordering::SeqCst), expected_builds);
    }
}

proptest! {
    #[test]
    fn factory_values_pass_through(value in any::<i64>(), as_object in any::<bool>()) {
        let (mut c, _) = counted_container();
        c.register_shared(
            "value",
            ServiceSpec::factory(move || if as_object { Value::object(value) } else { Value::Int(value) }),
        )
        .unwrap();

        let result = c.resolve_as::<i64>("value");
        if as_object {
            prop_assert_eq!(*result.unwrap(), value);
        } else {
            prop_assert!(result.is_err());
            prop_assert!(c.descriptors().iter().all(|d| !d.cached));
        }
    }
}
