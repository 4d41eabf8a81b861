use crate::value::Value;

/// A data property descriptor.
///
/// This core only ever *creates* data bindings (activation-object slots for
/// eval-introduced and `arguments` bindings), so the accessor form is left to
/// the host object model and never crosses this boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyDescriptor {
  pub value: Value,
  pub writable: bool,
  pub enumerable: bool,
  pub configurable: bool,
}

impl PropertyDescriptor {
  /// The descriptor used for a freshly created mutable binding: `undefined`,
  /// writable and enumerable, configurable iff the binding is deletable.
  pub fn mutable_binding(deletable: bool) -> Self {
    Self {
      value: Value::Undefined,
      writable: true,
      enumerable: true,
      configurable: deletable,
    }
  }
}
