use crate::arena::{ContextArena, FunctionTable};
use crate::context::{ExecutionContext, FrameFunction};
use crate::diag::DiagnosticMessage;
use crate::error::{EngineError, ErrorKind};
use crate::function::{FunctionMeta, FunctionShape};
use crate::handle::{ContextId, FunctionId, ObjectRef};
use crate::hooks::DebugHooks;
use crate::host::ObjectModel;
use crate::names::{NameId, NameTable, WellKnownNames};
use crate::property::PropertyDescriptor;
use crate::value::Value;
use std::rc::Rc;

/// The execution-context engine: call-frame lifecycle, binding resolution and
/// the scope-chain walk.
///
/// One engine instance corresponds to one isolated program: it owns the frame
/// arena, the function table, the identifier intern table and the host object
/// model. Exactly one root (global) context exists per engine, created at
/// construction.
///
/// There is no engine-global "current context": the interpreter threads the
/// current context explicitly. [`Engine::enter_call`] takes the caller and
/// [`Engine::leave`] hands it back, so the engine stays re-entrant and
/// testable without global fixtures.
pub struct Engine<M: ObjectModel> {
  objects: M,
  names: NameTable,
  well_known: WellKnownNames,
  contexts: ContextArena,
  functions: FunctionTable,
  hooks: Option<Box<dyn DebugHooks>>,
  root: ContextId,
}

impl<M: ObjectModel> Engine<M> {
  /// Creates an engine over the host object model and enters the root
  /// (global) context: no function, `this` = the global object, non-strict.
  pub fn new(mut objects: M) -> Self {
    let (names, well_known) = NameTable::new();
    let global = objects.global_object();
    let mut contexts = ContextArena::default();
    // The root frame's binding container is the global object itself, so
    // global properties resolve through the ordinary chain walk.
    let root = contexts.alloc(ExecutionContext {
      function: None,
      caller: None,
      this_value: Value::Object(global),
      locals: Box::default(),
      arguments: Vec::new(),
      activation: Some(global),
      with_stack: Vec::new(),
      strict: false,
    });
    Self {
      objects,
      names,
      well_known,
      contexts,
      functions: FunctionTable::default(),
      hooks: None,
      root,
    }
  }

  /// The root (global) execution context.
  #[inline]
  pub fn root(&self) -> ContextId {
    self.root
  }

  /// Installs debugger/tracing hooks.
  pub fn set_debug_hooks(&mut self, hooks: Box<dyn DebugHooks>) {
    self.hooks = Some(hooks);
  }

  /// Borrows the host object model.
  #[inline]
  pub fn objects(&self) -> &M {
    &self.objects
  }

  /// Borrows the host object model mutably.
  #[inline]
  pub fn objects_mut(&mut self) -> &mut M {
    &mut self.objects
  }

  /// Borrows the identifier intern table.
  #[inline]
  pub fn names(&self) -> &NameTable {
    &self.names
  }

  /// Interns an identifier name.
  #[inline]
  pub fn intern(&mut self, text: &str) -> NameId {
    self.names.intern(text)
  }

  /// The pre-interned names with fixed resolution behavior.
  #[inline]
  pub fn well_known_names(&self) -> WellKnownNames {
    self.well_known
  }

  // --- Call-frame lifecycle -------------------------------------------------

  /// Registers a function: its compile-time shape plus the lexically
  /// enclosing context captured at function-definition time.
  pub fn register_function(
    &mut self,
    shape: Rc<FunctionShape>,
    outer: Option<ContextId>,
  ) -> FunctionId {
    self.functions.register(FunctionMeta::new(shape, outer))
  }

  /// Enters a new call frame for `function`.
  ///
  /// Resolves the receiver (non-strict calls objectify a primitive `this` and
  /// substitute the global object for a nullish one), hoists declared
  /// variables to `undefined`, pads missing formals with `undefined`, and
  /// records `caller` so `leave` can resume it. Fires the `about_to_call`
  /// hook before returning.
  pub fn enter_call(
    &mut self,
    caller: ContextId,
    function: FunctionId,
    this: Value,
    args: Vec<Value>,
  ) -> Result<ContextId, EngineError> {
    let meta = self.functions.get(function)?.clone();
    let shape = meta.shape;
    let strict = shape.strict();

    let mut this_value = this;
    if !strict && !this_value.is_object() {
      this_value = if this_value.is_nullish() {
        Value::Object(self.objects.global_object())
      } else {
        Value::Object(self.objects.to_object(this_value)?)
      };
    }

    // The frame owns the supplied argument vector outright, so the only work
    // left is padding missing formal slots. Extra arguments past the formal
    // count stay in place; they are reachable only via the Arguments object.
    let mut arguments = args;
    if arguments.len() < shape.formal_count() {
      arguments.resize(shape.formal_count(), Value::Undefined);
    }

    // Storage-level hoisting: every declared variable starts as undefined.
    let locals = vec![Value::Undefined; shape.var_count()].into_boxed_slice();

    let ctx = self.contexts.alloc(ExecutionContext {
      function: Some(FrameFunction {
        id: function,
        shape,
        outer: meta.outer,
      }),
      caller: Some(caller),
      this_value,
      locals,
      arguments,
      activation: None,
      with_stack: Vec::new(),
      strict,
    });

    if let Some(hooks) = self.hooks.as_mut() {
      hooks.about_to_call(function, ctx);
    }
    Ok(ctx)
  }

  /// Leaves a call frame, returning the caller context to resume.
  ///
  /// If the function does not need activation the frame's storage is freed
  /// immediately (no closure can have captured it) and `ctx` becomes a stale
  /// handle. Otherwise the frame is retained with its `caller` link cleared;
  /// its binding storage is now shared with every closure that captured it.
  ///
  /// Must be called exactly once per `enter_call`, on both normal and
  /// exceptional exits; the interpreter's unwind path performs the
  /// exceptional ones.
  pub fn leave(&mut self, ctx: ContextId) -> Result<Option<ContextId>, EngineError> {
    let record = self.contexts.get_mut(ctx)?;
    let caller = record.caller.take();
    let retain = record.function.is_none() || record.needs_activation();
    if !retain {
      self.contexts.free(ctx)?;
    }
    if let Some(hooks) = self.hooks.as_mut() {
      hooks.just_left(ctx);
    }
    Ok(caller)
  }

  /// Frees a frame that was retained past `leave` for captured closures.
  ///
  /// This is the host GC's hand-back once it proves no closure references the
  /// frame. The root context must never be released.
  pub fn release_context(&mut self, ctx: ContextId) -> Result<(), EngineError> {
    debug_assert!(ctx != self.root, "attempted to release the root context");
    self.contexts.free(ctx)
  }

  // --- Frame accessors ------------------------------------------------------

  /// The frame's resolved receiver.
  pub fn this_value(&self, ctx: ContextId) -> Result<Value, EngineError> {
    Ok(self.contexts.get(ctx)?.this_value)
  }

  /// The frame's effective strict-mode flag.
  pub fn strict(&self, ctx: ContextId) -> Result<bool, EngineError> {
    Ok(self.contexts.get(ctx)?.strict)
  }

  /// The frame's actual argument values (padded to the formal count).
  pub fn arguments(&self, ctx: ContextId) -> Result<&[Value], EngineError> {
    Ok(&self.contexts.get(ctx)?.arguments)
  }

  /// The frame's declared-variable slots.
  pub fn locals(&self, ctx: ContextId) -> Result<&[Value], EngineError> {
    Ok(&self.contexts.get(ctx)?.locals)
  }

  /// The frame's callee, absent for the root context.
  pub fn function(&self, ctx: ContextId) -> Result<Option<FunctionId>, EngineError> {
    Ok(
      self
        .contexts
        .get(ctx)?
        .function
        .as_ref()
        .map(|function| function.id),
    )
  }

  /// The frame's dynamic caller, if it has not been left yet.
  pub fn caller(&self, ctx: ContextId) -> Result<Option<ContextId>, EngineError> {
    Ok(self.contexts.get(ctx)?.caller)
  }

  /// The lexically enclosing context (the next link of the scope chain).
  pub fn outer(&self, ctx: ContextId) -> Result<Option<ContextId>, EngineError> {
    Ok(self.contexts.get(ctx)?.outer())
  }

  // --- Single-context binding operations ------------------------------------

  /// Whether `name` is bound in `ctx` itself (declared variable, formal
  /// parameter, or activation-object property). Does not walk the chain.
  pub fn has_binding(&mut self, ctx: ContextId, name: NameId) -> Result<bool, EngineError> {
    let record = self.contexts.get(ctx)?;
    if record.function.is_none() {
      return Ok(false);
    }
    if record.var_index(name).is_some() || record.formal_index(name).is_some() {
      return Ok(true);
    }
    match record.activation {
      Some(activation) => self.objects.has_property(activation, name),
      None => Ok(false),
    }
  }

  /// Creates a dynamic binding for `name` in `ctx`, allocating the activation
  /// object on first use. A pre-existing binding is left untouched.
  pub fn create_mutable_binding(
    &mut self,
    ctx: ContextId,
    name: NameId,
    deletable: bool,
  ) -> Result<(), EngineError> {
    let existing = self.contexts.get(ctx)?.activation;
    let activation = match existing {
      Some(activation) => activation,
      None => {
        let created = self.objects.create_activation_object()?;
        self.contexts.get_mut(ctx)?.activation = Some(created);
        created
      }
    };
    if self.objects.has_property(activation, name)? {
      return Ok(());
    }
    self
      .objects
      .define_own_property(activation, name, PropertyDescriptor::mutable_binding(deletable))
  }

  /// Writes `value` to an existing binding for `name` in `ctx`.
  ///
  /// Declared variables are checked before formal parameters, so a variable
  /// declaration shadows a same-named parameter. Returns whether a binding
  /// was found and written.
  pub fn set_mutable_binding(
    &mut self,
    ctx: ContextId,
    name: NameId,
    value: Value,
  ) -> Result<bool, EngineError> {
    let record = self.contexts.get_mut(ctx)?;
    if let Some(index) = record.var_index(name) {
      record.locals[index] = value;
      return Ok(true);
    }
    if let Some(index) = record.formal_index(name) {
      record.arguments[index] = value;
      return Ok(true);
    }
    let Some(activation) = record.activation else {
      return Ok(false);
    };
    if self.objects.has_property(activation, name)? {
      self.objects.put(activation, name, value)?;
      return Ok(true);
    }
    Ok(false)
  }

  /// Reads the value of a binding for `name` in `ctx`.
  ///
  /// # Precondition
  ///
  /// The binding must exist: callers confirm existence via
  /// [`Engine::has_binding`] first. An unresolved name here is an interpreter
  /// bug and panics rather than surfacing a recoverable error, which would
  /// only mask the bug.
  pub fn get_binding_value(&mut self, ctx: ContextId, name: NameId) -> Result<Value, EngineError> {
    let record = self.contexts.get(ctx)?;
    debug_assert!(
      record.function.is_some(),
      "get_binding_value on the global context"
    );
    if let Some(index) = record.var_index(name) {
      return Ok(record.locals[index]);
    }
    if let Some(index) = record.formal_index(name) {
      return Ok(record.arguments[index]);
    }
    if let Some(activation) = record.activation {
      if self.objects.has_property(activation, name)? {
        return self.objects.get(activation, name);
      }
    }
    panic!(
      "get_binding_value: `{}` is not bound in this context; callers must check has_binding first",
      self.names.resolve(name)
    );
  }

  /// Deletes a dynamic binding for `name` in `ctx`.
  ///
  /// Declared variables and formals are not deletable. Under strict mode this
  /// throws a TypeError; otherwise it reports `false` (binding not removed,
  /// or removal not observable through this record).
  pub fn delete_binding(&mut self, ctx: ContextId, name: NameId) -> Result<bool, EngineError> {
    let record = self.contexts.get(ctx)?;
    let strict = record.strict;
    if let Some(activation) = record.activation {
      self.objects.delete(activation, name)?;
    }
    if strict {
      return Err(self.throw_type_error());
    }
    Ok(false)
  }

  // --- With-scope stack -----------------------------------------------------

  /// Pushes a with-scope overlay in front of `ctx`'s declared bindings.
  pub fn push_with(&mut self, ctx: ContextId, object: ObjectRef) -> Result<(), EngineError> {
    self.contexts.get_mut(ctx)?.with_stack.push(object);
    Ok(())
  }

  /// Pops the innermost with-scope overlay.
  ///
  /// Pushes and pops are strictly paired by the compiler within the lexical
  /// block that introduced them; popping an empty stack is an interpreter bug
  /// and panics.
  pub fn pop_with(&mut self, ctx: ContextId) -> Result<(), EngineError> {
    let record = self.contexts.get_mut(ctx)?;
    record
      .with_stack
      .pop()
      .expect("pop_with on an empty with-stack; unbalanced push/pop");
    Ok(())
  }

  // --- Scope-chain resolution -----------------------------------------------

  /// Resolves `name` along the scope chain from `ctx` outwards.
  ///
  /// Throws a ReferenceError naming the identifier when no context in the
  /// chain binds it.
  pub fn get_property(&mut self, ctx: ContextId, name: NameId) -> Result<Value, EngineError> {
    match self.resolve_property(ctx, name)? {
      Some(value) => Ok(value),
      None => Err(self.throw_reference_error(name)),
    }
  }

  /// Like [`Engine::get_property`], but resolves an unbound name to
  /// `undefined` instead of throwing.
  ///
  /// For speculative existence probes (typeof-style checks) only; never use
  /// it where a silent `undefined` is dangerous.
  pub fn get_property_no_throw(
    &mut self,
    ctx: ContextId,
    name: NameId,
  ) -> Result<Value, EngineError> {
    Ok(self.resolve_property(ctx, name)?.unwrap_or(Value::Undefined))
  }

  fn resolve_property(
    &mut self,
    ctx: ContextId,
    name: NameId,
  ) -> Result<Option<Value>, EngineError> {
    // `this` resolves to the innermost receiver, never to a declared binding,
    // with-overlay, or activation property.
    if name == self.well_known.this_ {
      return Ok(Some(self.contexts.get(ctx)?.this_value));
    }

    let mut current = Some(ctx);
    while let Some(id) = current {
      // With-overlays take priority over declared bindings in the same
      // context, probed innermost first.
      let overlays = self.contexts.get(id)?.with_stack.clone();
      for overlay in overlays.into_iter().rev() {
        if self.objects.has_property(overlay, name)? {
          return self.objects.get(overlay, name).map(Some);
        }
      }

      let record = self.contexts.get(id)?;
      if let Some(index) = record.var_index(name) {
        return Ok(Some(record.locals[index]));
      }
      if let Some(index) = record.formal_index(name) {
        return Ok(Some(record.arguments[index]));
      }
      let activation = record.activation;
      let is_function_frame = record.function.is_some();
      let next = record.outer();

      if let Some(activation) = activation {
        if self.objects.has_property(activation, name)? {
          return self.objects.get(activation, name).map(Some);
        }
      }

      // Lazy `arguments` materialization, at the function frame the walk
      // reached (not the innermost requesting scope). Binding it into the
      // frame makes materialization idempotent.
      if is_function_frame && name == self.well_known.arguments {
        return self.materialize_arguments(id).map(Some);
      }

      current = next;
    }
    Ok(None)
  }

  fn materialize_arguments(&mut self, ctx: ContextId) -> Result<Value, EngineError> {
    let values = self.contexts.get(ctx)?.arguments.clone();
    let arguments = self.objects.create_arguments_object(ctx, &values)?;
    let name = self.well_known.arguments;
    self.create_mutable_binding(ctx, name, false)?;
    self.set_mutable_binding(ctx, name, Value::Object(arguments))?;
    Ok(Value::Object(arguments))
  }

  /// Writes `value` to `name` along the scope chain from `ctx` outwards.
  ///
  /// An unresolved name creates a new property on the global object, unless
  /// strict mode is active or the name is `this`, in which case a
  /// ReferenceError is thrown.
  pub fn set_property(
    &mut self,
    ctx: ContextId,
    name: NameId,
    value: Value,
  ) -> Result<(), EngineError> {
    let mut current = Some(ctx);
    while let Some(id) = current {
      let overlays = self.contexts.get(id)?.with_stack.clone();
      for overlay in overlays.into_iter().rev() {
        if self.objects.has_property(overlay, name)? {
          return self.objects.put(overlay, name, value);
        }
      }
      if self.set_mutable_binding(id, name, value)? {
        return Ok(());
      }
      current = self.contexts.get(id)?.outer();
    }

    if self.contexts.get(ctx)?.strict || name == self.well_known.this_ {
      return Err(self.throw_reference_error(name));
    }
    let global = self.objects.global_object();
    self.objects.put(global, name, value)
  }

  /// Deletes `name` along the scope chain from `ctx` outwards.
  ///
  /// Only with-overlay properties and activation bindings are deletable;
  /// declared variables and formals are skipped by the walk. An unresolved
  /// delete is a no-op reporting `true`, except under strict mode where it
  /// throws a SyntaxError.
  pub fn delete_property(&mut self, ctx: ContextId, name: NameId) -> Result<bool, EngineError> {
    let mut current = Some(ctx);
    while let Some(id) = current {
      let overlays = self.contexts.get(id)?.with_stack.clone();
      for overlay in overlays.into_iter().rev() {
        if self.objects.has_property(overlay, name)? {
          return self.objects.delete(overlay, name);
        }
      }
      let record = self.contexts.get(id)?;
      let activation = record.activation;
      let next = record.outer();
      if let Some(activation) = activation {
        if self.objects.has_property(activation, name)? {
          return self.objects.delete(activation, name);
        }
      }
      current = next;
    }

    if self.contexts.get(ctx)?.strict {
      return Err(self.throw_syntax_error(None));
    }
    Ok(true)
  }

  /// Read-modify-write of `name`: resolves the current value, applies `op` to
  /// `(lhs, current)` and writes the result back. Used by compound-assignment
  /// forms.
  pub fn apply_to_property<F>(
    &mut self,
    ctx: ContextId,
    name: NameId,
    lhs: Value,
    op: F,
  ) -> Result<(), EngineError>
  where
    F: FnOnce(Value, Value) -> Result<Value, EngineError>,
  {
    let rhs = self.get_property(ctx, name)?;
    let result = op(lhs, rhs)?;
    self.set_property(ctx, name, result)
  }

  // --- Error signaling bridge -----------------------------------------------

  /// The unified throw entry point: wraps an already-constructed error value.
  pub fn throw_value(&mut self, value: Value) -> EngineError {
    EngineError::Throw(value)
  }

  fn construct_throw(&mut self, kind: ErrorKind, message: &str) -> EngineError {
    match self.objects.new_error(kind, message) {
      Ok(value) => EngineError::Throw(value),
      Err(err) => err,
    }
  }

  /// Constructs and throws a generic error carrying `message`.
  pub fn throw_error(&mut self, message: &str) -> EngineError {
    self.construct_throw(ErrorKind::Generic, message)
  }

  /// Constructs and throws a ReferenceError naming the identifier.
  pub fn throw_reference_error(&mut self, name: NameId) -> EngineError {
    let message = format!("{} is not defined", self.names.resolve(name));
    self.construct_throw(ErrorKind::Reference, &message)
  }

  /// Constructs and throws a TypeError.
  pub fn throw_type_error(&mut self) -> EngineError {
    self.construct_throw(ErrorKind::Type, "Type error")
  }

  /// Constructs and throws a SyntaxError, rendering the carried diagnostic
  /// into the message when one is supplied.
  pub fn throw_syntax_error(&mut self, diagnostic: Option<&DiagnosticMessage>) -> EngineError {
    match diagnostic {
      Some(diagnostic) => {
        let message = diagnostic.render();
        self.construct_throw(ErrorKind::Syntax, &message)
      }
      None => self.construct_throw(ErrorKind::Syntax, "Syntax error"),
    }
  }

  /// Constructs and throws the unimplemented-feature diagnostic.
  pub fn throw_unimplemented(&mut self, message: &str) -> EngineError {
    let message = format!("Unimplemented {message}");
    self.construct_throw(ErrorKind::Generic, &message)
  }
}
