use crate::handle::ObjectRef;
use crate::names::NameId;

/// A JavaScript value as seen by the binding-resolution core.
///
/// Heap-allocated values are represented as opaque host handles
/// ([`ObjectRef`]); strings are interned names ([`NameId`]) since the only
/// strings this core traffics in are identifier texts.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
  /// The JavaScript `undefined` value.
  Undefined,
  /// The JavaScript `null` value.
  Null,
  /// A JavaScript boolean.
  Bool(bool),
  /// A JavaScript number (IEEE-754 double).
  Number(f64),
  /// An interned string.
  String(NameId),
  /// A host-managed JavaScript object.
  Object(ObjectRef),
}

impl Value {
  /// Whether the value is an object reference.
  #[inline]
  pub fn is_object(self) -> bool {
    matches!(self, Value::Object(_))
  }

  /// Whether the value is `undefined` or `null`.
  #[inline]
  pub fn is_nullish(self) -> bool {
    matches!(self, Value::Undefined | Value::Null)
  }

  /// The object handle, if this value is an object.
  #[inline]
  pub fn as_object(self) -> Option<ObjectRef> {
    match self {
      Value::Object(obj) => Some(obj),
      _ => None,
    }
  }
}

impl From<bool> for Value {
  fn from(value: bool) -> Self {
    Self::Bool(value)
  }
}

impl From<f64> for Value {
  fn from(value: f64) -> Self {
    Self::Number(value)
  }
}

impl From<NameId> for Value {
  fn from(value: NameId) -> Self {
    Self::String(value)
  }
}

impl From<ObjectRef> for Value {
  fn from(value: ObjectRef) -> Self {
    Self::Object(value)
  }
}
