//! Shared type catalog for integration tests.
#![allow(dead_code)]

use autowire::{Container, DeclaredType, TypeCatalog};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub struct Clock {
    pub serial: usize,
}

pub struct FileLogger;

pub struct Mailer {
    pub logger: Arc<FileLogger>,
}

pub struct Config {
    pub port: i64,
    pub name: String,
}

pub struct Service {
    pub clock: Arc<Clock>,
    pub config: Arc<Config>,
}

pub struct Chicken;
pub struct Egg;

/// Catalog used across tests.
///
/// `Clock` stamps each construction with a serial taken from `built`.
pub fn catalog(built: Arc<AtomicUsize>) -> TypeCatalog {
    let mut types = TypeCatalog::new();

    types.interface("LoggerInterface");
    types.abstract_class("BaseRepository");

    types
        .class("Clock")
        .build(move |_| Ok(Clock { serial: built.fetch_add(1, Ordering::SeqCst) }));
    types.class("FileLogger").build(|_| Ok(FileLogger));
    types
        .class("Mailer")
        .param("logger", DeclaredType::named("LoggerInterface"))
        .build(|args| Ok(Mailer { logger: args.get(0)? }));
    types
        .class("Config")
        .param_with_default("port", DeclaredType::builtin("int"), 8080i64)
        .param_with_default("name", DeclaredType::builtin("string"), "app")
        .build(|args| {
            Ok(Config {
                port: args.int(0)?,
                name: args.str(1)?,
            })
        });
    types
        .class("Service")
        .param("clock", DeclaredType::named("Clock"))
        .param("config", DeclaredType::named("Config"))
        .build(|args| {
            Ok(Service {
                clock: args.get(0)?,
                config: args.get(1)?,
            })
        });
    types
        .class("NeedsPort")
        .param("port", DeclaredType::builtin("int"))
        .build(|args| Ok(args.int(0)?));
    types
        .class("NeedsUnion")
        .param("either", DeclaredType::Union(vec!["Clock".into(), "Config".into()]))
        .build(|_| Ok(()));
    types
        .class("NeedsUnionWithDefault")
        .param_with_default(
            "either",
            DeclaredType::Union(vec!["int".into(), "string".into()]),
            7i64,
        )
        .build(|args| Ok(args.int(0)?));
    types
        .class("NeedsIntersection")
        .param("both", DeclaredType::Intersection(vec!["A".into(), "B".into()]))
        .build(|_| Ok(()));
    types
        .class("NeedsUntyped")
        .param("anything", DeclaredType::Untyped)
        .build(|_| Ok(()));
    types
        .class("NeedsBase")
        .param("repository", DeclaredType::named("BaseRepository"))
        .build(|_| Ok(()));
    types
        .class("NeedsGhost")
        .param("ghost", DeclaredType::named("Ghost"))
        .build(|_| Ok(()));
    types
        .class("Chicken")
        .param("egg", DeclaredType::named("Egg"))
        .build(|_| Ok(Chicken));
    types
        .class("Egg")
        .param("chicken", DeclaredType::named("Chicken"))
        .build(|_| Ok(Egg));

    types
}

pub fn container() -> Container {
    Container::new(catalog(Arc::new(AtomicUsize::new(0))))
}

/// Container plus the counter of `Clock` constructions.
pub fn counted_container() -> (Container, Arc<AtomicUsize>) {
    let built = Arc::new(AtomicUsize::new(0));
    (Container::new(catalog(built.clone())), built)
}
