//! Embedded scripting boundary.
//!
//! Ordinance definitions can name script functions that decide availability
//! (`fn() -> bool`) or compute monthly income (`fn(income) -> number`). The
//! host supplies a stack-based [`ScriptEngine`]; [`call`] implements the calling
//! sequence and always leaves the engine's stack as it found it.
//! [`NativeScriptEngine`] is an in-process engine backed by Rust closures.

pub mod call;
pub mod engine;
pub mod native;

pub use call::{call_number_function, call_predicate};
pub use engine::{ScriptCallError, ScriptEngine, ScriptHost, ScriptType};
pub use native::{NativeFunction, NativeScriptEngine, ScriptValue};
