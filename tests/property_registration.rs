/// Property-based tests for registration state
///
/// A random sequence of registry operations is applied to a container and to
/// a plain model map; both must agree on which lifetime each identifier has.

mod common;

use autowire::{DiError, Lifetime, ServiceSpec, TransientSpec};
use common::container;
use proptest::prelude::*;
use std::collections::HashMap;

#[derive(Debug, Clone)]
enum Op {
    Transient(u8),
    Shared(u8),
    Scoped(u8),
    Deregister(u8),
    Flush(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..6).prop_map(Op::Transient),
        (0u8..6).prop_map(Op::Shared),
        (0u8..6).prop_map(Op::Scoped),
        (0u8..6).prop_map(Op::Deregister),
        (0u8..6).prop_map(Op::Flush),
    ]
}

fn id(n: u8) -> String {
    format!("svc-{}", n)
}

proptest! {
    #[test]
    fn registration_matches_model(ops in prop::collection::vec(op(), 0..40)) {
        let mut c = container();
        let mut model: HashMap<String, Lifetime> = HashMap::new();

        for op in ops {
            match op {
                Op::Transient(n) | Op::Shared(n) | Op::Scoped(n) => {
                    let lifetime = match op {
                        Op::Transient(_) => Lifetime::Transient,
                        Op::Shared(_) => Lifetime::Shared,
                        _ => Lifetime::Scoped,
                    };
                    let result = match lifetime {
                        Lifetime::Transient => c.register_transient(id(n), TransientSpec::class("Clock")),
                        Lifetime::Shared => c.register_shared(id(n), ServiceSpec::class("Clock")),
                        Lifetime::Scoped => c.register_scoped(id(n), ServiceSpec::class("Clock")),
                    };

                    if model.contains_key(&id(n)) {
                        prop_assert_eq!(result, Err(DiError::AlreadyRegistered(id(n))));
                    } else {
                        prop_assert!(result.is_ok());
                        model.insert(id(n), lifetime);
                    }
                }
                Op::Deregister(n) => {
                    let removed = c.deregister(&id(n));
                    prop_assert_eq!(removed, model.remove(&id(n)).is_some());
                }
                Op::Flush(n) => {
                    c.flush_scoped_instance(&id(n));
                    prop_assert_eq!(c.has(&id(n)), model.contains_key(&id(n)));
                }
            }

            for n in 0u8..6 {
                prop_assert_eq!(c.lifetime_of(&id(n)), model.get(&id(n)).copied());
                prop_assert_eq!(c.has(&id(n)), model.contains_key(&id(n)));
            }
        }

        prop_assert_eq!(c.len(), model.len());
    }
}
