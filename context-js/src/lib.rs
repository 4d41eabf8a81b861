//! Execution-context and environment-record core for an embedded
//! ECMAScript-like runtime.
//!
//! This crate implements the binding-resolution contract an interpreter
//! drives on every statement: per-call activation state, the scope-chain walk
//! behind every variable read/write, and `with`-scope overlays. It provides:
//!
//! - Per-call frames ([`Engine::enter_call`] / [`Engine::leave`]) with
//!   receiver objectification, storage-level hoisting and argument padding
//! - The four single-context binding operations and the four chain-walking
//!   identifier operations ([`Engine::get_property`] and friends)
//! - Lazily materialized activation and Arguments objects
//! - A typed error bridge that constructs error values through the host and
//!   surfaces them as [`EngineError::Throw`]
//!
//! # Collaborators
//!
//! The interpreter, heap and object model stay outside this crate:
//!
//! - The compiler supplies immutable [`FunctionShape`] metadata and the
//!   interpreter drives frame entry/exit and all resolution calls.
//! - The host object model implements [`ObjectModel`], the capability set
//!   used for activation objects, with-overlays, the global object, Arguments
//!   objects and error construction. Objects are referenced by opaque
//!   [`ObjectRef`] handles.
//! - Optional [`DebugHooks`] fire synchronously around entry/exit.
//!
//! # Handles and frame retention
//!
//! Frames live in a generation-checked slot arena and are addressed by
//! [`ContextId`]. A frame whose function does not need activation is freed at
//! [`Engine::leave`]; one that does is retained (its storage is shared with
//! every closure that captured it) until the host hands it back via
//! [`Engine::release_context`]. Stale handles surface as
//! [`EngineError::InvalidHandle`].
//!
//! One engine is single-threaded and non-reentrant: all operations run to
//! completion, and nested calls are a chain of caller links, not concurrency.

mod arena;
mod context;
mod diag;
mod engine;
mod error;
mod function;
mod handle;
mod hooks;
mod host;
mod names;
mod property;
mod value;

pub use crate::diag::DiagnosticKind;
pub use crate::diag::DiagnosticMessage;
pub use crate::engine::Engine;
pub use crate::error::EngineError;
pub use crate::error::ErrorKind;
pub use crate::function::FunctionMeta;
pub use crate::function::FunctionShape;
pub use crate::handle::ContextId;
pub use crate::handle::FunctionId;
pub use crate::handle::ObjectRef;
pub use crate::hooks::DebugHooks;
pub use crate::host::ObjectModel;
pub use crate::names::NameId;
pub use crate::names::NameTable;
pub use crate::names::WellKnownNames;
pub use crate::property::PropertyDescriptor;
pub use crate::value::Value;
