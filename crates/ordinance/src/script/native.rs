use std::collections::HashMap;
use std::sync::Arc;

use super::engine::{ScriptEngine, ScriptType};

/// A Rust closure callable from the native engine.
pub type NativeFunction = dyn Fn(&[ScriptValue]) -> Result<Vec<ScriptValue>, String> + Send + Sync;

/// A plain value held by the native engine.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptValue {
    Nil,
    Boolean(bool),
    Number(f64),
    String(String),
}

#[derive(Clone)]
enum Slot {
    Value(ScriptValue),
    Function(Arc<NativeFunction>),
}

impl Slot {
    fn script_type(&self) -> ScriptType {
        match self {
            Slot::Value(ScriptValue::Nil) => ScriptType::Nil,
            Slot::Value(ScriptValue::Boolean(_)) => ScriptType::Boolean,
            Slot::Value(ScriptValue::Number(_)) => ScriptType::Number,
            Slot::Value(ScriptValue::String(_)) => ScriptType::String,
            Slot::Function(_) => ScriptType::Function,
        }
    }
}

/// Stack engine whose globals are plain values and Rust closures.
#[derive(Default)]
pub struct NativeScriptEngine {
    globals: HashMap<String, Slot>,
    stack: Vec<Slot>,
}

impl NativeScriptEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_function<F>(&mut self, name: &str, function: F)
    where
        F: Fn(&[ScriptValue]) -> Result<Vec<ScriptValue>, String> + Send + Sync + 'static,
    {
        self.globals
            .insert(name.to_string(), Slot::Function(Arc::new(function)));
    }

    pub fn set_global(&mut self, name: &str, value: ScriptValue) {
        self.globals.insert(name.to_string(), Slot::Value(value));
    }

    fn slot(&self, index: i32) -> Option<&Slot> {
        let len = self.stack.len() as i64;
        let absolute = if index < 0 {
            len + i64::from(index)
        } else {
            i64::from(index) - 1
        };
        if absolute < 0 {
            return None;
        }
        self.stack.get(absolute as usize)
    }
}

impl ScriptEngine for NativeScriptEngine {
    fn top(&self) -> usize {
        self.stack.len()
    }

    fn set_top(&mut self, top: usize) {
        self.stack.resize(top, Slot::Value(ScriptValue::Nil));
    }

    fn get_global(&mut self, name: &str) {
        if let Some(slot) = self.globals.get(name) {
            self.stack.push(slot.clone());
        }
    }

    fn value_type(&self, index: i32) -> ScriptType {
        self.slot(index).map_or(ScriptType::None, Slot::script_type)
    }

    fn push_number(&mut self, value: f64) {
        self.stack.push(Slot::Value(ScriptValue::Number(value)));
    }

    fn call_protected(&mut self, nargs: usize, nresults: usize) -> Result<(), String> {
        if self.stack.len() < nargs + 1 {
            return Err("stack underflow".to_string());
        }
        let args: Vec<ScriptValue> = self
            .stack
            .split_off(self.stack.len() - nargs)
            .into_iter()
            .map(|slot| match slot {
                Slot::Value(value) => value,
                Slot::Function(_) => ScriptValue::Nil,
            })
            .collect();
        let function = match self.stack.pop() {
            Some(Slot::Function(function)) => function,
            _ => return Err("attempt to call a non-function value".to_string()),
        };

        let mut results = (*function)(&args)?;
        results.resize(nresults, ScriptValue::Nil);
        self.stack.extend(results.into_iter().map(Slot::Value));
        Ok(())
    }

    fn to_boolean(&self, index: i32) -> bool {
        !matches!(
            self.slot(index),
            None | Some(Slot::Value(ScriptValue::Nil)) | Some(Slot::Value(ScriptValue::Boolean(false)))
        )
    }

    fn to_number(&self, index: i32) -> f64 {
        match self.slot(index) {
            Some(Slot::Value(ScriptValue::Number(n))) => *n,
            _ => 0.0,
        }
    }
}
