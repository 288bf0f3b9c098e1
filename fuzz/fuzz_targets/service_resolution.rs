#![no_main]

use autowire::{Container, ContainerOptions, DeclaredType, DiError, ServiceSpec, TypeCatalog};
use libfuzzer_sys::fuzz_target;

struct Node;

/// Builds a catalog of up to 8 types whose constructor parameters are picked
/// by the input, so cycles, missing types and builtins all show up.
fn catalog(data: &[u8]) -> TypeCatalog {
    let mut types = TypeCatalog::new();
    for (index, byte) in data.iter().take(8).enumerate() {
        let mut class = types.class(format!("T{}", index));
        if byte & 0x80 != 0 {
            class = class.param("dep", DeclaredType::named(format!("T{}", byte % 10)));
        }
        if byte & 0x40 != 0 {
            class = class.param_with_default("n", DeclaredType::builtin("int"), 1i64);
        }
        if byte & 0x20 != 0 {
            class = class.param("s", DeclaredType::builtin("string"));
        }
        class.build(|_| Ok(Node));
    }
    types.abstract_class("T8");
    types
}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    let options = ContainerOptions::default().with_max_depth(16);
    let mut container = Container::with_options(catalog(data), options);

    for (index, byte) in data.iter().skip(8).take(8).enumerate() {
        let id = format!("T{}", byte % 10);
        let _ = match index % 2 {
            0 => container.register_shared(id, ServiceSpec::class(format!("T{}", byte % 10))),
            _ => container.register_scoped(id, ServiceSpec::class(format!("T{}", byte % 10))),
        };
    }

    for n in 0..10 {
        let name = format!("T{}", n);
        match container.make(&name) {
            Ok(_)
            | Err(DiError::NotFound(_))
            | Err(DiError::NotInstantiable(_))
            | Err(DiError::UnsupportedParameters { .. })
            | Err(DiError::Circular(_))
            | Err(DiError::DepthExceeded(_)) => {}
            Err(other) => panic!("unexpected error making {}: {}", name, other),
        }

        if container.has(&name) {
            let first = container.resolve(&name);
            let second = container.resolve(&name);
            if let (Ok(a), Ok(b)) = (first, second) {
                assert!(std::sync::Arc::ptr_eq(&a, &b));
            }
        }
    }
});
