use crate::context::ExecutionContext;
use crate::error::EngineError;
use crate::function::FunctionMeta;
use crate::handle::{ContextId, FunctionId};

/// Slot arena for execution contexts.
///
/// Frames are stored in index-addressed slots; handles carry the slot index
/// plus a per-slot generation that is bumped on free, so a stale `ContextId`
/// is detected instead of silently aliasing a reused slot. Frames retained by
/// closures simply keep their slot occupied past `leave`.
#[derive(Debug, Default)]
pub(crate) struct ContextArena {
  slots: Vec<Slot>,
  free_list: Vec<u32>,
}

#[derive(Debug)]
struct Slot {
  record: Option<ExecutionContext>,
  generation: u32,
}

impl ContextArena {
  pub(crate) fn alloc(&mut self, record: ExecutionContext) -> ContextId {
    match self.free_list.pop() {
      Some(index) => {
        let slot = &mut self.slots[index as usize];
        debug_assert!(slot.record.is_none());
        slot.record = Some(record);
        ContextId::from_parts(index, slot.generation)
      }
      None => {
        let index = u32::try_from(self.slots.len()).expect("context arena overflow");
        self.slots.push(Slot {
          record: Some(record),
          generation: 0,
        });
        ContextId::from_parts(index, 0)
      }
    }
  }

  pub(crate) fn get(&self, id: ContextId) -> Result<&ExecutionContext, EngineError> {
    self
      .slots
      .get(id.index() as usize)
      .filter(|slot| slot.generation == id.generation())
      .and_then(|slot| slot.record.as_ref())
      .ok_or(EngineError::InvalidHandle)
  }

  pub(crate) fn get_mut(&mut self, id: ContextId) -> Result<&mut ExecutionContext, EngineError> {
    self
      .slots
      .get_mut(id.index() as usize)
      .filter(|slot| slot.generation == id.generation())
      .and_then(|slot| slot.record.as_mut())
      .ok_or(EngineError::InvalidHandle)
  }

  /// Drops the frame and invalidates every outstanding handle to it.
  pub(crate) fn free(&mut self, id: ContextId) -> Result<(), EngineError> {
    let slot = self
      .slots
      .get_mut(id.index() as usize)
      .filter(|slot| slot.generation == id.generation() && slot.record.is_some())
      .ok_or(EngineError::InvalidHandle)?;
    slot.record = None;
    slot.generation = slot.generation.wrapping_add(1);
    self.free_list.push(id.index());
    Ok(())
  }
}

/// Append-only table of registered function metadata.
///
/// Metadata is immutable once registered and ids are never reused, so a
/// `FunctionId` stays valid for the life of the engine.
#[derive(Debug, Default)]
pub(crate) struct FunctionTable {
  functions: Vec<FunctionMeta>,
}

impl FunctionTable {
  pub(crate) fn register(&mut self, meta: FunctionMeta) -> FunctionId {
    let id = FunctionId(u32::try_from(self.functions.len()).expect("function table overflow"));
    self.functions.push(meta);
    id
  }

  pub(crate) fn get(&self, id: FunctionId) -> Result<&FunctionMeta, EngineError> {
    self
      .functions
      .get(id.0 as usize)
      .ok_or(EngineError::InvalidHandle)
  }
}
