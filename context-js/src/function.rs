use crate::handle::ContextId;
use crate::names::NameId;
use std::rc::Rc;

/// Compiler-supplied description of a callable.
///
/// A shape is immutable after construction and shared (`Rc`) by every closure
/// instantiated from the same function literal. Name lists and counts never
/// change for the lifetime of any context referencing them.
#[derive(Debug)]
pub struct FunctionShape {
  formals: Box<[NameId]>,
  vars: Box<[NameId]>,
  needs_activation: bool,
  strict: bool,
}

impl FunctionShape {
  pub fn new(
    formals: impl Into<Box<[NameId]>>,
    vars: impl Into<Box<[NameId]>>,
    needs_activation: bool,
    strict: bool,
  ) -> Self {
    Self {
      formals: formals.into(),
      vars: vars.into(),
      needs_activation,
      strict,
    }
  }

  #[inline]
  pub fn formals(&self) -> &[NameId] {
    &self.formals
  }

  #[inline]
  pub fn vars(&self) -> &[NameId] {
    &self.vars
  }

  #[inline]
  pub fn formal_count(&self) -> usize {
    self.formals.len()
  }

  #[inline]
  pub fn var_count(&self) -> usize {
    self.vars.len()
  }

  /// Whether any inner function (or eval/`arguments` use) can observe this
  /// call's bindings after it returns, forcing frame retention.
  #[inline]
  pub fn needs_activation(&self) -> bool {
    self.needs_activation
  }

  #[inline]
  pub fn strict(&self) -> bool {
    self.strict
  }

  /// Slot index of a declared variable, if `name` is one.
  pub(crate) fn var_index(&self, name: NameId) -> Option<usize> {
    self.vars.iter().position(|&var| var == name)
  }

  /// Slot index of a formal parameter, if `name` is one.
  ///
  /// Duplicate parameter names are permitted; the last occurrence wins, so a
  /// later parameter shadows an earlier one of the same name.
  pub(crate) fn formal_index(&self, name: NameId) -> Option<usize> {
    self.formals.iter().rposition(|&formal| formal == name)
  }
}

/// A registered function: its shape plus the lexically enclosing context
/// captured at function-definition time.
///
/// The captured outer context defines the static scope chain. It is fixed for
/// the life of the function, which is what makes the outer-context chain
/// acyclic by construction.
#[derive(Debug, Clone)]
pub struct FunctionMeta {
  pub(crate) shape: Rc<FunctionShape>,
  pub(crate) outer: Option<ContextId>,
}

impl FunctionMeta {
  pub fn new(shape: Rc<FunctionShape>, outer: Option<ContextId>) -> Self {
    Self { shape, outer }
  }

  #[inline]
  pub fn shape(&self) -> &Rc<FunctionShape> {
    &self.shape
  }

  #[inline]
  pub fn outer(&self) -> Option<ContextId> {
    self.outer
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::names::NameTable;

  #[test]
  fn duplicate_formal_names_resolve_to_the_last_slot() {
    let (mut names, _) = NameTable::new();
    let a = names.intern("a");
    let b = names.intern("b");
    let shape = FunctionShape::new(vec![a, b, a], vec![], false, false);
    assert_eq!(shape.formal_index(a), Some(2));
    assert_eq!(shape.formal_index(b), Some(1));
  }

  #[test]
  fn variable_lookup_returns_the_first_slot() {
    let (mut names, _) = NameTable::new();
    let x = names.intern("x");
    let y = names.intern("y");
    let shape = FunctionShape::new(vec![], vec![y, x], false, false);
    assert_eq!(shape.var_index(x), Some(1));
    assert_eq!(shape.var_index(y), Some(0));
    assert_eq!(shape.var_index(names.intern("z")), None);
  }
}
