//! Dynamic value model for untrusted input.
//!
//! [`Unknown`] is what validators receive before anything is known about the
//! shape of a value. Records carry named members (plain fields, methods, and
//! getters) and may inherit members from a parent record.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

type MethodFn = dyn Fn(&[Unknown]) -> Unknown + Send + Sync;
type GetterFn = dyn Fn() -> Unknown + Send + Sync;

/// A value of unknown shape.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Unknown {
    /// Absent value.
    #[default]
    Null,
    /// Boolean.
    Bool(bool),
    /// Number (always stored as `f64`).
    Number(f64),
    /// Text.
    Text(String),
    /// Ordered list.
    List(Vec<Self>),
    /// Record with named members.
    Record(Arc<Record>),
    /// Free-standing callable.
    Function(Method),
}

impl Unknown {
    /// Short name of the runtime shape, used in error payloads.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::Text(_) => "string",
            Self::List(_) => "array",
            Self::Record(_) => "object",
            Self::Function(_) => "function",
        }
    }

    /// Borrow the value as an object, if it is a record or a list.
    #[must_use]
    pub fn as_object(&self) -> Option<ObjectLike<'_>> {
        match self {
            Self::Record(record) => Some(ObjectLike::Record(record)),
            Self::List(items) => Some(ObjectLike::List(items)),
            _ => None,
        }
    }

    /// Returns true for `Null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for Unknown {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<f64> for Unknown {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Unknown {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<&str> for Unknown {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for Unknown {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Vec<Self>> for Unknown {
    fn from(value: Vec<Self>) -> Self {
        Self::List(value)
    }
}

impl From<Record> for Unknown {
    fn from(value: Record) -> Self {
        Self::Record(Arc::new(value))
    }
}

impl From<Arc<Record>> for Unknown {
    fn from(value: Arc<Record>) -> Self {
        Self::Record(value)
    }
}

impl From<Method> for Unknown {
    fn from(value: Method) -> Self {
        Self::Function(value)
    }
}

impl From<serde_json::Value> for Unknown {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(flag),
            Value::Number(number) => Self::Number(number.as_f64().unwrap_or(f64::NAN)),
            Value::String(text) => Self::Text(text),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            Value::Object(fields) => {
                let record = fields
                    .into_iter()
                    .fold(Record::new(), |record, (name, value)| {
                        record.with_field(name, Self::from(value))
                    });
                Self::from(record)
            },
        }
    }
}

/// Shared callable stored in a record or passed around as a value.
///
/// Two methods are equal only when they share the same allocation.
#[derive(Clone)]
pub struct Method(Arc<MethodFn>);

impl Method {
    /// Wrap a closure.
    pub fn new(body: impl Fn(&[Unknown]) -> Unknown + Send + Sync + 'static) -> Self {
        Self(Arc::new(body))
    }

    /// Invoke the method.
    #[must_use]
    pub fn call(&self, args: &[Unknown]) -> Unknown {
        (self.0)(args)
    }
}

impl fmt::Debug for Method {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Method(..)")
    }
}

impl PartialEq for Method {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// Computed property. Reading it runs the closure; it is never callable.
#[derive(Clone)]
pub struct Getter(Arc<GetterFn>);

impl Getter {
    /// Wrap a closure.
    pub fn new(body: impl Fn() -> Unknown + Send + Sync + 'static) -> Self {
        Self(Arc::new(body))
    }

    /// Evaluate the getter.
    #[must_use]
    pub fn read(&self) -> Unknown {
        (self.0)()
    }
}

impl fmt::Debug for Getter {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("Getter(..)")
    }
}

impl PartialEq for Getter {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

/// A named member of a [`Record`].
#[derive(Debug, Clone, PartialEq)]
pub enum Member {
    /// Plain data property.
    Field(Unknown),
    /// Callable member.
    Method(Method),
    /// Computed property.
    Getter(Getter),
}

impl Member {
    /// Classify the member without evaluating getters.
    #[must_use]
    pub const fn kind(&self) -> MemberKind {
        match self {
            Self::Method(_) | Self::Field(Unknown::Function(_)) => MemberKind::Callable,
            Self::Getter(_) => MemberKind::Getter,
            Self::Field(_) => MemberKind::Data,
        }
    }
}

/// How a member behaves when accessed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    /// A method, or a field holding a function.
    Callable,
    /// A computed property.
    Getter,
    /// Any other field.
    Data,
}

/// Anything whose members can be looked up by name.
///
/// Implement this for statically typed values that should pass protocol
/// checks alongside dynamic records.
pub trait Introspect {
    /// Kind of the member called `name`, or `None` when absent.
    fn member_kind(&self, name: &str) -> Option<MemberKind>;
}

impl<T: Introspect + ?Sized> Introspect for &T {
    fn member_kind(&self, name: &str) -> Option<MemberKind> {
        (**self).member_kind(name)
    }
}

impl<T: Introspect + ?Sized> Introspect for Arc<T> {
    fn member_kind(&self, name: &str) -> Option<MemberKind> {
        (**self).member_kind(name)
    }
}

/// Record with named members and an optional parent to inherit from.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record {
    members: BTreeMap<Box<str>, Member>,
    parent: Option<Arc<Self>>,
}

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a data field.
    #[must_use]
    pub fn with_field(mut self, name: impl Into<Box<str>>, value: impl Into<Unknown>) -> Self {
        self.members.insert(name.into(), Member::Field(value.into()));
        self
    }

    /// Add or replace a method.
    #[must_use]
    pub fn with_method(
        mut self,
        name: impl Into<Box<str>>,
        body: impl Fn(&[Unknown]) -> Unknown + Send + Sync + 'static,
    ) -> Self {
        self.members
            .insert(name.into(), Member::Method(Method::new(body)));
        self
    }

    /// Add or replace a getter.
    #[must_use]
    pub fn with_getter(
        mut self,
        name: impl Into<Box<str>>,
        body: impl Fn() -> Unknown + Send + Sync + 'static,
    ) -> Self {
        self.members
            .insert(name.into(), Member::Getter(Getter::new(body)));
        self
    }

    /// Inherit members from `parent`. Own members shadow inherited ones.
    #[must_use]
    pub fn with_parent(mut self, parent: Arc<Self>) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Parent record, if any.
    #[must_use]
    pub const fn parent(&self) -> Option<&Arc<Self>> {
        self.parent.as_ref()
    }

    /// Member defined directly on this record.
    #[must_use]
    pub fn own_member(&self, name: &str) -> Option<&Member> {
        self.members.get(name)
    }

    /// Names of members defined directly on this record, sorted.
    pub fn own_member_names(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(AsRef::as_ref)
    }

    /// Member defined on this record or inherited through the parent chain.
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&Member> {
        let mut current = Some(self);
        while let Some(record) = current {
            if let Some(member) = record.own_member(name) {
                return Some(member);
            }
            current = record.parent.as_deref();
        }
        None
    }

    /// Read a member as a value. Getters are evaluated.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Unknown> {
        self.member(name).map(|member| match member {
            Member::Field(value) => value.clone(),
            Member::Method(method) => Unknown::Function(method.clone()),
            Member::Getter(getter) => getter.read(),
        })
    }

    /// Call a callable member. Returns `None` when it is absent or not callable.
    #[must_use]
    pub fn call(&self, name: &str, args: &[Unknown]) -> Option<Unknown> {
        match self.member(name)? {
            Member::Method(method) | Member::Field(Unknown::Function(method)) => {
                Some(method.call(args))
            },
            Member::Field(_) | Member::Getter(_) => None,
        }
    }
}

impl Introspect for Record {
    fn member_kind(&self, name: &str) -> Option<MemberKind> {
        self.member(name).map(Member::kind)
    }
}

/// Borrowed view of a value that counts as an object.
///
/// Lists count as objects but expose no named members.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectLike<'a> {
    /// A record.
    Record(&'a Arc<Record>),
    /// A list.
    List(&'a [Unknown]),
}

impl<'a> ObjectLike<'a> {
    /// The record, when this object is one.
    #[must_use]
    pub const fn as_record(self) -> Option<&'a Arc<Record>> {
        match self {
            Self::Record(record) => Some(record),
            Self::List(_) => None,
        }
    }

    /// Clone the object back into an owned [`Unknown`].
    #[must_use]
    pub fn to_unknown(self) -> Unknown {
        match self {
            Self::Record(record) => Unknown::Record(Arc::clone(record)),
            Self::List(items) => Unknown::List(items.to_vec()),
        }
    }
}

impl Introspect for ObjectLike<'_> {
    fn member_kind(&self, name: &str) -> Option<MemberKind> {
        match self {
            Self::Record(record) => record.member_kind(name),
            Self::List(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn type_names_follow_runtime_shape() {
        assert_eq!(Unknown::Null.type_name(), "null");
        assert_eq!(Unknown::from(1).type_name(), "number");
        assert_eq!(Unknown::from("x").type_name(), "string");
        assert_eq!(Unknown::from(Vec::new()).type_name(), "array");
        assert_eq!(Unknown::from(Record::new()).type_name(), "object");
        assert_eq!(
            Unknown::from(Method::new(|_| Unknown::Null)).type_name(),
            "function"
        );
    }

    #[test]
    fn json_objects_become_records() -> Result<(), Box<dyn std::error::Error>> {
        let value = Unknown::from(json!({ "name": "ada", "tags": ["a", 1], "ok": true }));
        let Unknown::Record(record) = value else {
            return Err("expected a record".into());
        };
        assert_eq!(record.get("name"), Some(Unknown::from("ada")));
        assert_eq!(
            record.get("tags"),
            Some(Unknown::List(vec![Unknown::from("a"), Unknown::from(1)]))
        );
        assert_eq!(record.member_kind("ok"), Some(MemberKind::Data));
        assert_eq!(
            record.own_member_names().collect::<Vec<_>>(),
            ["name", "ok", "tags"]
        );
        Ok(())
    }

    #[test]
    fn members_are_inherited_and_shadowed() {
        let parent = Arc::new(
            Record::new()
                .with_method("valueOf", |_| Unknown::from(1))
                .with_field("label", "parent"),
        );
        let child = Record::new()
            .with_field("label", "child")
            .with_parent(parent);

        assert_eq!(child.member_kind("valueOf"), Some(MemberKind::Callable));
        assert_eq!(child.get("label"), Some(Unknown::from("child")));
        assert_eq!(child.call("valueOf", &[]), Some(Unknown::from(1)));
        assert_eq!(child.member("missing"), None);
    }

    #[test]
    fn shared_and_borrowed_records_introspect_like_the_record() {
        fn kind_of(target: &impl Introspect, name: &str) -> Option<MemberKind> {
            target.member_kind(name)
        }

        let shared = Arc::new(Record::new().with_method("close", |_| Unknown::Null));
        assert_eq!(kind_of(&shared, "close"), Some(MemberKind::Callable));
        assert_eq!(kind_of(&Arc::clone(&shared), "open"), None);
        assert_eq!(kind_of(&&*shared, "close"), Some(MemberKind::Callable));
    }

    #[test]
    fn getters_are_never_callable() {
        let hidden = Method::new(|_| Unknown::Null);
        let record = Record::new().with_getter("has", move || Unknown::Function(hidden.clone()));

        assert_eq!(record.member_kind("has"), Some(MemberKind::Getter));
        assert_eq!(record.call("has", &[]), None);
        assert!(matches!(record.get("has"), Some(Unknown::Function(_))));
    }

    #[test]
    fn function_fields_are_callable() {
        let record = Record::new().with_field(
            "has",
            Method::new(|args| Unknown::Bool(!args.is_empty())),
        );
        assert_eq!(record.member_kind("has"), Some(MemberKind::Callable));
        assert_eq!(
            record.call("has", &[Unknown::Null]),
            Some(Unknown::Bool(true))
        );
    }

    #[test]
    fn methods_compare_by_identity() {
        let method = Method::new(|_| Unknown::Null);
        let same = method.clone();
        let other = Method::new(|_| Unknown::Null);
        assert_eq!(method, same);
        assert_ne!(method, other);
    }

    #[test]
    fn lists_are_objects_without_members() -> Result<(), Box<dyn std::error::Error>> {
        let list = Unknown::from(vec![Unknown::from(1)]);
        let Some(object) = list.as_object() else {
            return Err("lists count as objects".into());
        };
        assert_eq!(object.member_kind("len"), None);
        assert!(object.as_record().is_none());
        assert_eq!(object.to_unknown(), list);
        assert!(Unknown::Null.as_object().is_none());
        Ok(())
    }
}
