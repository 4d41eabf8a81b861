use crate::function::FunctionShape;
use crate::handle::{ContextId, FunctionId, ObjectRef};
use crate::names::NameId;
use crate::value::Value;
use std::rc::Rc;

/// Function identity carried by a call frame.
#[derive(Debug, Clone)]
pub(crate) struct FrameFunction {
  pub(crate) id: FunctionId,
  pub(crate) shape: Rc<FunctionShape>,
  pub(crate) outer: Option<ContextId>,
}

/// Runtime record for one function/global invocation.
///
/// Field lifetimes: `locals` and `arguments` are exclusively owned by the
/// call until `leave`; if the function needs activation the whole frame is
/// retained afterwards and the storage becomes shared with every closure
/// that captured the frame.
#[derive(Debug)]
pub(crate) struct ExecutionContext {
  /// Absent for the global/root context.
  pub(crate) function: Option<FrameFunction>,
  /// The dynamically calling context. Used only to resume the caller after
  /// `leave`; never part of the scope chain.
  pub(crate) caller: Option<ContextId>,
  /// The resolved receiver, objectified per the non-strict coercion rule.
  pub(crate) this_value: Value,
  /// Declared-variable slots, hoisted to `undefined` at entry.
  pub(crate) locals: Box<[Value]>,
  /// Actual argument values (padded to the formal count when required).
  pub(crate) arguments: Vec<Value>,
  /// Dynamic binding container: the global object for the root frame,
  /// lazily created (at most once) for function frames.
  pub(crate) activation: Option<ObjectRef>,
  /// With-scope overlays, innermost last. Empty outside `with` blocks.
  pub(crate) with_stack: Vec<ObjectRef>,
  /// Effective strict-mode flag.
  pub(crate) strict: bool,
}

impl ExecutionContext {
  /// The lexically enclosing context. Derived, not stored: a frame's outer
  /// is fixed at function-definition time.
  #[inline]
  pub(crate) fn outer(&self) -> Option<ContextId> {
    self.function.as_ref().and_then(|function| function.outer)
  }

  #[inline]
  pub(crate) fn needs_activation(&self) -> bool {
    self
      .function
      .as_ref()
      .is_some_and(|function| function.shape.needs_activation())
  }

  /// Slot index of a declared variable in this frame.
  pub(crate) fn var_index(&self, name: NameId) -> Option<usize> {
    self
      .function
      .as_ref()
      .and_then(|function| function.shape.var_index(name))
  }

  /// Slot index of a formal parameter in this frame.
  pub(crate) fn formal_index(&self, name: NameId) -> Option<usize> {
    self
      .function
      .as_ref()
      .and_then(|function| function.shape.formal_index(name))
  }
}
