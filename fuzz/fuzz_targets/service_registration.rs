#![no_main]

use autowire::{Container, DiError, Lifetime, ServiceSpec, TransientSpec, TypeCatalog, Value};
use libfuzzer_sys::fuzz_target;
use std::collections::HashMap;

struct Probe;

fuzz_target!(|data: &[u8]| {
    let mut types = TypeCatalog::new();
    types.class("Probe").build(|_| Ok(Probe));
    types.interface("Port");
    let mut container = Container::new(types);

    // Each pair of bytes is one operation: opcode and identifier slot.
    let mut model: HashMap<String, Lifetime> = HashMap::new();
    for chunk in data.chunks_exact(2) {
        let id = format!("svc{}", chunk[1] % 8);
        let value = chunk[1] as i64;

        let outcome = match chunk[0] % 9 {
            0 => Some((Lifetime::Transient, container.register_transient(id.as_str(), TransientSpec::class("Probe")))),
            1 => Some((
                Lifetime::Transient,
                container.register_transient(id.as_str(), TransientSpec::factory(move || Value::object(value))),
            )),
            2 => Some((Lifetime::Shared, container.register_shared(id.as_str(), ServiceSpec::class("Probe")))),
            3 => Some((Lifetime::Shared, container.register_shared(id.as_str(), ServiceSpec::instance(value)))),
            4 => Some((Lifetime::Scoped, container.register_scoped(id.as_str(), ServiceSpec::class("Port")))),
            5 => Some((
                Lifetime::Scoped,
                container.register_scoped(id.as_str(), ServiceSpec::factory(move || Value::Int(value))),
            )),
            6 => {
                assert_eq!(container.deregister(&id), model.remove(&id).is_some());
                None
            }
            7 => {
                container.flush_scoped_instance(&id);
                None
            }
            _ => {
                let _ = container.resolve(&id);
                None
            }
        };

        if let Some((lifetime, result)) = outcome {
            match result {
                Ok(()) => {
                    assert!(model.insert(id.clone(), lifetime).is_none());
                }
                Err(DiError::AlreadyRegistered(_)) => assert!(model.contains_key(&id)),
                Err(other) => panic!("unexpected registration error: {}", other),
            }
        }

        assert_eq!(container.lifetime_of(&id), model.get(&id).copied());
    }

    assert_eq!(container.len(), model.len());
});
