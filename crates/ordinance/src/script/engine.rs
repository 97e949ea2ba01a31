use bevy::prelude::*;

/// Type of a value on the script stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScriptType {
    None,
    Nil,
    Boolean,
    Number,
    String,
    Function,
    Other,
}

/// A stack-based script interpreter.
///
/// Indices follow the usual convention: positive values count from the bottom
/// (1-based), negative values count down from the top (`-1` is the top).
pub trait ScriptEngine {
    /// Number of values on the stack.
    fn top(&self) -> usize;

    /// Truncates (or pads with nil) the stack to `top` values.
    fn set_top(&mut self, top: usize);

    /// Pushes the global called `name`. Pushes nothing when it does not exist.
    fn get_global(&mut self, name: &str);

    fn value_type(&self, index: i32) -> ScriptType;

    fn push_number(&mut self, value: f64);

    /// Calls the function sitting below `nargs` arguments, replacing function
    /// and arguments with `nresults` results. On error the message is returned
    /// and the stack contents above the function slot are unspecified.
    fn call_protected(&mut self, nargs: usize, nresults: usize) -> Result<(), String>;

    fn is_boolean(&self, index: i32) -> bool {
        self.value_type(index) == ScriptType::Boolean
    }

    fn is_number(&self, index: i32) -> bool {
        self.value_type(index) == ScriptType::Number
    }

    fn to_boolean(&self, index: i32) -> bool;

    fn to_number(&self, index: i32) -> f64;
}

/// Why a scripted rule could not produce a value.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScriptCallError {
    #[error("no script engine is active")]
    NoEngine,
    #[error("the function was not found")]
    NotFound,
    #[error("the function has the wrong type")]
    WrongType,
    #[error("the script engine returned an error when calling the function: {0}")]
    CallFailed(String),
    #[error("the function return value must be a Boolean (true or false)")]
    NotBoolean,
    #[error("the function return value must be a number")]
    NotNumber,
}

/// The scripting context of the active city, if one is attached.
#[derive(Resource, Default)]
pub struct ScriptHost {
    pub engine: Option<Box<dyn ScriptEngine + Send + Sync>>,
}

impl ScriptHost {
    pub fn new(engine: impl ScriptEngine + Send + Sync + 'static) -> Self {
        Self {
            engine: Some(Box::new(engine)),
        }
    }
}
