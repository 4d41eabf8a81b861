use core::fmt;

/// A stable identifier for an execution context in the engine's frame arena.
///
/// This is a packed `{ index: u32, generation: u32 }`.
/// - `index` selects a slot in the arena's slot vector.
/// - `generation` is incremented each time that slot is freed.
///
/// A `ContextId` is **only valid** if:
/// - `index` is in-bounds for the current arena,
/// - the slot at `index` is occupied, and
/// - the slot's generation matches this handle's generation.
///
/// Contexts captured by closures keep their slot occupied past `leave`, so the
/// handle held in a closure's function metadata stays valid for as long as the
/// host keeps the frame alive.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ContextId(pub(crate) u64);

impl ContextId {
  pub(crate) fn from_parts(index: u32, generation: u32) -> Self {
    Self((index as u64) | ((generation as u64) << 32))
  }

  /// The slot index within the frame arena.
  #[inline]
  pub fn index(self) -> u32 {
    self.0 as u32
  }

  /// The generation of the slot when this handle was created.
  #[inline]
  pub fn generation(self) -> u32 {
    (self.0 >> 32) as u32
  }
}

impl fmt::Debug for ContextId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("ContextId")
      .field("index", &self.index())
      .field("generation", &self.generation())
      .finish()
  }
}

/// Identifier for a registered function's metadata (shape + captured outer
/// context).
///
/// Function metadata is append-only: ids are never reused, and the metadata is
/// immutable after registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct FunctionId(pub(crate) u32);

impl FunctionId {
  /// The index into the engine's function table.
  #[inline]
  pub fn index(self) -> u32 {
    self.0
  }
}

/// An opaque handle to an object owned by the host object model.
///
/// The numeric representation is chosen entirely by the host; this core only
/// stores and compares handles (equality is object identity). This mirrors how
/// with-overlay, activation, and arguments objects live outside the
/// binding-resolution core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ObjectRef(u64);

impl ObjectRef {
  /// Create an `ObjectRef` from an opaque numeric value.
  #[inline]
  pub const fn from_raw(raw: u64) -> Self {
    Self(raw)
  }

  /// Returns the underlying opaque numeric representation.
  #[inline]
  pub const fn to_raw(self) -> u64 {
    self.0
  }
}
