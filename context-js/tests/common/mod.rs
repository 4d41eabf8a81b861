#![allow(dead_code)]

use context_js::ContextId;
use context_js::Engine;
use context_js::EngineError;
use context_js::ErrorKind;
use context_js::FunctionId;
use context_js::FunctionShape;
use context_js::NameId;
use context_js::ObjectModel;
use context_js::ObjectRef;
use context_js::PropertyDescriptor;
use context_js::Value;
use std::collections::HashMap;
use std::rc::Rc;

/// What a mock object is standing in for.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ObjectTag {
  Plain,
  Global,
  Activation,
  Arguments(ContextId),
  Error(ErrorKind),
  Wrapper(Value),
}

#[derive(Debug, Clone, Copy)]
struct Prop {
  value: Value,
  configurable: bool,
}

#[derive(Debug)]
struct MockObject {
  tag: ObjectTag,
  props: HashMap<NameId, Prop>,
  prototype: Option<ObjectRef>,
  args_snapshot: Vec<Value>,
}

/// An in-memory object model standing in for the engine's host: a global
/// object, plain property bags, activation/arguments allocation, and error
/// construction that records what was thrown.
#[derive(Debug)]
pub struct MockObjects {
  objects: Vec<MockObject>,
  pub errors: Vec<(ErrorKind, String)>,
  pub coercions: Vec<Value>,
  /// When set, the next `new_error` call fails with this instead of
  /// constructing an error object.
  pub fail_next_error: Option<EngineError>,
}

impl MockObjects {
  pub fn new() -> Self {
    let mut host = Self {
      objects: Vec::new(),
      errors: Vec::new(),
      coercions: Vec::new(),
      fail_next_error: None,
    };
    // Slot 0 is the global object.
    host.alloc(ObjectTag::Global);
    host
  }

  fn alloc(&mut self, tag: ObjectTag) -> ObjectRef {
    let handle = ObjectRef::from_raw(self.objects.len() as u64);
    self.objects.push(MockObject {
      tag,
      props: HashMap::new(),
      prototype: None,
      args_snapshot: Vec::new(),
    });
    handle
  }

  fn object(&self, obj: ObjectRef) -> &MockObject {
    &self.objects[obj.to_raw() as usize]
  }

  fn object_mut(&mut self, obj: ObjectRef) -> &mut MockObject {
    &mut self.objects[obj.to_raw() as usize]
  }

  /// The global object (slot 0).
  pub fn global(&self) -> ObjectRef {
    ObjectRef::from_raw(0)
  }

  pub fn alloc_plain(&mut self) -> ObjectRef {
    self.alloc(ObjectTag::Plain)
  }

  pub fn alloc_with_prototype(&mut self, prototype: ObjectRef) -> ObjectRef {
    let obj = self.alloc(ObjectTag::Plain);
    self.object_mut(obj).prototype = Some(prototype);
    obj
  }

  pub fn set_prop(&mut self, obj: ObjectRef, name: NameId, value: Value) {
    self.object_mut(obj).props.insert(
      name,
      Prop {
        value,
        configurable: true,
      },
    );
  }

  pub fn own_prop(&self, obj: ObjectRef, name: NameId) -> Option<Value> {
    self.object(obj).props.get(&name).map(|prop| prop.value)
  }

  pub fn tag(&self, obj: ObjectRef) -> ObjectTag {
    self.object(obj).tag
  }

  pub fn arguments_snapshot(&self, obj: ObjectRef) -> &[Value] {
    &self.object(obj).args_snapshot
  }

  pub fn error_kind(&self, value: Value) -> Option<ErrorKind> {
    match value.as_object().map(|obj| self.object(obj).tag) {
      Some(ObjectTag::Error(kind)) => Some(kind),
      _ => None,
    }
  }

  pub fn last_error(&self) -> Option<&(ErrorKind, String)> {
    self.errors.last()
  }
}

impl ObjectModel for MockObjects {
  fn has_property(&mut self, obj: ObjectRef, name: NameId) -> Result<bool, EngineError> {
    let mut current = Some(obj);
    while let Some(obj) = current {
      let record = self.object(obj);
      if record.props.contains_key(&name) {
        return Ok(true);
      }
      current = record.prototype;
    }
    Ok(false)
  }

  fn get(&mut self, obj: ObjectRef, name: NameId) -> Result<Value, EngineError> {
    let mut current = Some(obj);
    while let Some(obj) = current {
      let record = self.object(obj);
      if let Some(prop) = record.props.get(&name) {
        return Ok(prop.value);
      }
      current = record.prototype;
    }
    Ok(Value::Undefined)
  }

  fn put(&mut self, obj: ObjectRef, name: NameId, value: Value) -> Result<(), EngineError> {
    self.object_mut(obj).props.insert(
      name,
      Prop {
        value,
        configurable: true,
      },
    );
    Ok(())
  }

  fn delete(&mut self, obj: ObjectRef, name: NameId) -> Result<bool, EngineError> {
    let record = self.object_mut(obj);
    match record.props.get(&name) {
      Some(prop) if !prop.configurable => Ok(false),
      Some(_) => {
        record.props.remove(&name);
        Ok(true)
      }
      None => Ok(true),
    }
  }

  fn define_own_property(
    &mut self,
    obj: ObjectRef,
    name: NameId,
    desc: PropertyDescriptor,
  ) -> Result<(), EngineError> {
    self.object_mut(obj).props.insert(
      name,
      Prop {
        value: desc.value,
        configurable: desc.configurable,
      },
    );
    Ok(())
  }

  fn global_object(&mut self) -> ObjectRef {
    ObjectRef::from_raw(0)
  }

  fn to_object(&mut self, value: Value) -> Result<ObjectRef, EngineError> {
    self.coercions.push(value);
    Ok(self.alloc(ObjectTag::Wrapper(value)))
  }

  fn create_activation_object(&mut self) -> Result<ObjectRef, EngineError> {
    Ok(self.alloc(ObjectTag::Activation))
  }

  fn create_arguments_object(
    &mut self,
    ctx: ContextId,
    values: &[Value],
  ) -> Result<ObjectRef, EngineError> {
    let obj = self.alloc(ObjectTag::Arguments(ctx));
    self.object_mut(obj).args_snapshot = values.to_vec();
    Ok(obj)
  }

  fn new_error(&mut self, kind: ErrorKind, message: &str) -> Result<Value, EngineError> {
    if let Some(err) = self.fail_next_error.take() {
      return Err(err);
    }
    self.errors.push((kind, message.to_string()));
    let obj = self.alloc(ObjectTag::Error(kind));
    Ok(Value::Object(obj))
  }
}

/// Builds an engine over a fresh mock host.
pub fn engine() -> Engine<MockObjects> {
  Engine::new(MockObjects::new())
}

/// Interns the given names and registers a function with them.
pub fn register(
  engine: &mut Engine<MockObjects>,
  formals: &[&str],
  vars: &[&str],
  needs_activation: bool,
  strict: bool,
  outer: Option<ContextId>,
) -> FunctionId {
  let formals: Vec<NameId> = formals.iter().map(|name| engine.intern(name)).collect();
  let vars: Vec<NameId> = vars.iter().map(|name| engine.intern(name)).collect();
  let shape = Rc::new(FunctionShape::new(formals, vars, needs_activation, strict));
  engine.register_function(shape, outer)
}

/// Expects a thrown error and returns its recorded kind and message.
pub fn thrown_error(engine: &Engine<MockObjects>, err: EngineError) -> (ErrorKind, String) {
  let EngineError::Throw(value) = err else {
    panic!("expected a thrown error value, got {err:?}");
  };
  let kind = engine
    .objects()
    .error_kind(value)
    .expect("thrown value should be a host error object");
  let (recorded_kind, message) = engine
    .objects()
    .last_error()
    .expect("host should have recorded the error construction")
    .clone();
  assert_eq!(kind, recorded_kind);
  (kind, message)
}
