use crate::error::{EngineError, ErrorKind};
use crate::handle::{ContextId, ObjectRef};
use crate::names::NameId;
use crate::property::PropertyDescriptor;
use crate::value::Value;

/// The capability interface onto the host's object model.
///
/// This core never stores property data itself: activation objects,
/// with-overlay objects, arguments objects, error objects and the global
/// object are all owned by the host. The resolution algorithm only needs the
/// operations below.
///
/// `has_property` must report own-or-inherited properties; the overlay probe
/// in the scope-chain walk relies on that.
pub trait ObjectModel {
  /// Whether `obj` has `name` as an own or inherited property.
  fn has_property(&mut self, obj: ObjectRef, name: NameId) -> Result<bool, EngineError>;

  /// `[[Get]]` of `name` on `obj`.
  fn get(&mut self, obj: ObjectRef, name: NameId) -> Result<Value, EngineError>;

  /// `[[Put]]` of `name` on `obj`.
  fn put(&mut self, obj: ObjectRef, name: NameId, value: Value) -> Result<(), EngineError>;

  /// `[[Delete]]` of `name` on `obj`. Returns whether the delete succeeded.
  fn delete(&mut self, obj: ObjectRef, name: NameId) -> Result<bool, EngineError>;

  /// `[[DefineOwnProperty]]` of `name` on `obj` with a data descriptor.
  fn define_own_property(
    &mut self,
    obj: ObjectRef,
    name: NameId,
    desc: PropertyDescriptor,
  ) -> Result<(), EngineError>;

  /// The global object of the running program.
  fn global_object(&mut self) -> ObjectRef;

  /// Coerces a non-nullish primitive receiver to an object (the non-strict
  /// `this` objectification rule).
  fn to_object(&mut self, value: Value) -> Result<ObjectRef, EngineError>;

  /// Allocates a fresh, empty activation object.
  fn create_activation_object(&mut self) -> Result<ObjectRef, EngineError>;

  /// Materializes an Arguments object over the live frame `ctx`.
  ///
  /// `values` is a snapshot of the frame's actual argument values; hosts that
  /// need live aliasing with the frame's formal slots can read back through
  /// the engine's frame accessors using `ctx`.
  fn create_arguments_object(
    &mut self,
    ctx: ContextId,
    values: &[Value],
  ) -> Result<ObjectRef, EngineError>;

  /// Constructs (but does not throw) a typed error value.
  fn new_error(&mut self, kind: ErrorKind, message: &str) -> Result<Value, EngineError>;
}
