use core::fmt;

/// Severity of a carried diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticKind {
  Error,
  Warning,
}

/// A source-position diagnostic attached to a thrown error.
///
/// Compile-time diagnostics (e.g. a deferred strict-mode syntax error) are
/// carried through to runtime and rendered into the thrown error's message.
#[derive(Debug, Clone, PartialEq)]
pub struct DiagnosticMessage {
  pub file_name: String,
  pub offset: u32,
  pub length: u32,
  pub start_line: u32,
  pub start_column: u32,
  pub kind: DiagnosticKind,
  pub message: String,
}

impl DiagnosticMessage {
  pub fn error(message: impl Into<String>) -> Self {
    Self {
      file_name: String::new(),
      offset: 0,
      length: 0,
      start_line: 0,
      start_column: 0,
      kind: DiagnosticKind::Error,
      message: message.into(),
    }
  }

  /// Renders the full `file:line:col: severity: message` form.
  pub fn render(&self) -> String {
    self.to_string()
  }
}

impl fmt::Display for DiagnosticMessage {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if !self.file_name.is_empty() {
      write!(f, "{}:", self.file_name)?;
    }
    write!(f, "{}:{}: ", self.start_line, self.start_column)?;
    let severity = match self.kind {
      DiagnosticKind::Error => "error",
      DiagnosticKind::Warning => "warning",
    };
    write!(f, "{severity}: {}", self.message)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn renders_position_and_severity() {
    let diag = DiagnosticMessage {
      file_name: "app.js".to_string(),
      offset: 10,
      length: 3,
      start_line: 2,
      start_column: 7,
      kind: DiagnosticKind::Error,
      message: "octal literals are not allowed in strict mode".to_string(),
    };
    assert_eq!(
      diag.render(),
      "app.js:2:7: error: octal literals are not allowed in strict mode"
    );
  }

  #[test]
  fn omits_missing_file_name() {
    let diag = DiagnosticMessage::error("bad");
    assert_eq!(diag.render(), "0:0: error: bad");
  }
}
