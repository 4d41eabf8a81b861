use crate::value::Value;

/// Errors produced by the execution-context core.
///
/// Every runtime failure is surfaced to the interpreter; this core performs no
/// local recovery and never catches its own throws.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
  /// A thrown JavaScript error value. This is catchable from script via the
  /// interpreter's try/catch machinery; the payload was constructed by the
  /// host object model.
  #[error("uncaught exception")]
  Throw(Value),

  /// A context or function handle was used after the underlying frame was
  /// freed (or the handle is otherwise malformed). Indicates an interpreter
  /// protocol violation, not a script-level error.
  #[error("invalid handle")]
  InvalidHandle,

  /// A stubbed/unfinished codepath in the host [`crate::ObjectModel`]. The
  /// core never constructs this itself (script-visible gaps go through
  /// [`crate::Engine::throw_unimplemented`]); it propagates the variant
  /// unchanged when the host returns it.
  #[error("unimplemented: {0}")]
  Unimplemented(&'static str),
}

/// The taxonomy of error values the core can originate.
///
/// The host object model decides what a constructed error value looks like;
/// the kind selects the language-level error class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  /// Identifier unresolved on read, or unresolved write under strict mode.
  Reference,
  /// Operation invalid for the receiver's form.
  Type,
  /// Strict-mode delete of a non-configurable binding, or a compile-time
  /// diagnostic carried through to runtime.
  Syntax,
  /// Escape hatch for partially-implemented language features.
  Generic,
}
