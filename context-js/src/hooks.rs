use crate::handle::{ContextId, FunctionId};

/// Debugger/tracing notifications fired synchronously around call entry and
/// exit.
///
/// All methods default to no-ops; hosts install an implementation with
/// [`crate::Engine::set_debug_hooks`] only when they need one, so the common
/// path pays a single `Option` check.
pub trait DebugHooks {
  /// Fired after a frame is fully initialized, before control returns to the
  /// interpreter.
  fn about_to_call(&mut self, function: FunctionId, ctx: ContextId) {
    let _ = (function, ctx);
  }

  /// Fired after a frame has been left (its storage possibly already
  /// released).
  fn just_left(&mut self, ctx: ContextId) {
    let _ = ctx;
  }
}
