use ahash::AHashMap;

/// An interned identifier name.
///
/// Binding resolution compares names on every variable access, so names are
/// interned once and compared as integers from then on. Two `NameId`s are
/// equal iff their source text is equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NameId(u32);

impl NameId {
  /// The index into the owning [`NameTable`].
  #[inline]
  pub fn index(self) -> u32 {
    self.0
  }
}

/// Names with fixed meaning to the resolution algorithm.
///
/// `this` never resolves through the scope chain, and `arguments` triggers
/// lazy materialization; both are interned at engine construction so the hot
/// path is an integer compare.
#[derive(Debug, Clone, Copy)]
pub struct WellKnownNames {
  pub this_: NameId,
  pub arguments: NameId,
}

/// Intern table for identifier names.
#[derive(Debug, Default)]
pub struct NameTable {
  names: Vec<Box<str>>,
  by_text: AHashMap<Box<str>, NameId>,
}

impl NameTable {
  pub(crate) fn new() -> (Self, WellKnownNames) {
    let mut table = Self::default();
    let well_known = WellKnownNames {
      this_: table.intern("this"),
      arguments: table.intern("arguments"),
    };
    (table, well_known)
  }

  /// Interns `text`, returning the existing id if it was interned before.
  pub fn intern(&mut self, text: &str) -> NameId {
    if let Some(&id) = self.by_text.get(text) {
      return id;
    }
    let id = NameId(u32::try_from(self.names.len()).expect("name table overflow"));
    self.names.push(text.into());
    self.by_text.insert(text.into(), id);
    id
  }

  /// The source text of an interned name.
  pub fn resolve(&self, id: NameId) -> &str {
    &self.names[id.0 as usize]
  }
}
