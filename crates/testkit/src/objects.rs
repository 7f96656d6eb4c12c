//! Sample records for protocol tests.

use safely_typed_core::{Method, Record, Unknown};
use std::sync::Arc;

/// A record whose members named in `methods` are all callables.
pub fn record_with_methods(methods: &[&str]) -> Record {
    methods.iter().fold(Record::new(), |record, name| {
        let label = (*name).to_owned();
        record.with_method(*name, move |_| Unknown::from(label.as_str()))
    })
}

/// A full `Entity` implementor.
pub fn entity() -> Unknown {
    Unknown::from(record_with_methods(&["implementsEntity", "valueOf"]).with_field("id", "user-1"))
}

/// A full `Value` implementor.
pub fn value_object() -> Unknown {
    Unknown::from(record_with_methods(&["implementsValue", "valueOf"]))
}

/// An entity whose members all come from its parent record.
pub fn inherited_entity() -> Unknown {
    let parent = Arc::new(record_with_methods(&["implementsEntity", "valueOf"]));
    Unknown::from(Record::new().with_field("id", "user-2").with_parent(parent))
}

/// A `has` container backed by a fixed key list.
pub fn has_container(keys: &[&str]) -> Unknown {
    let keys: Vec<String> = keys.iter().map(|key| (*key).to_owned()).collect();
    Unknown::from(Record::new().with_method("has", move |args| {
        let found = matches!(args.first(), Some(Unknown::Text(key)) if keys.contains(key));
        Unknown::Bool(found)
    }))
}

/// A record exposing `has` only through a getter that returns a function.
pub fn getter_only_has() -> Unknown {
    let has = Method::new(|_| Unknown::Bool(true));
    Unknown::from(Record::new().with_getter("has", move || Unknown::Function(has.clone())))
}
