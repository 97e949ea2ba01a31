use super::engine::{ScriptCallError, ScriptEngine, ScriptType};

/// Restores the stack top recorded at construction when dropped.
struct StackGuard<'e> {
    engine: &'e mut dyn ScriptEngine,
    saved_top: usize,
}

impl<'e> StackGuard<'e> {
    fn new(engine: &'e mut dyn ScriptEngine) -> Self {
        let saved_top = engine.top();
        Self { engine, saved_top }
    }
}

impl Drop for StackGuard<'_> {
    fn drop(&mut self) {
        self.engine.set_top(self.saved_top);
    }
}

/// Looks up global `name`, calls it with numeric `args` expecting one result,
/// and hands the engine to `read` while the result is on top of the stack.
fn call_global<T>(
    engine: &mut dyn ScriptEngine,
    name: &str,
    args: &[f64],
    read: impl FnOnce(&dyn ScriptEngine) -> Result<T, ScriptCallError>,
) -> Result<T, ScriptCallError> {
    let guard = StackGuard::new(engine);

    guard.engine.get_global(name);
    if guard.engine.top() == guard.saved_top {
        return Err(ScriptCallError::NotFound);
    }
    if guard.engine.value_type(-1) != ScriptType::Function {
        return Err(ScriptCallError::WrongType);
    }

    for arg in args {
        guard.engine.push_number(*arg);
    }
    guard
        .engine
        .call_protected(args.len(), 1)
        .map_err(ScriptCallError::CallFailed)?;

    read(&*guard.engine)
}

/// Calls `name()` and expects a Boolean.
pub fn call_predicate(engine: &mut dyn ScriptEngine, name: &str) -> Result<bool, ScriptCallError> {
    call_global(engine, name, &[], |engine| {
        if engine.is_boolean(-1) {
            Ok(engine.to_boolean(-1))
        } else {
            Err(ScriptCallError::NotBoolean)
        }
    })
}

/// Calls `name(input)` and expects a number.
pub fn call_number_function(
    engine: &mut dyn ScriptEngine,
    name: &str,
    input: f64,
) -> Result<f64, ScriptCallError> {
    call_global(engine, name, &[input], |engine| {
        if engine.is_number(-1) {
            Ok(engine.to_number(-1))
        } else {
            Err(ScriptCallError::NotNumber)
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::native::{NativeScriptEngine, ScriptValue};

    fn engine() -> NativeScriptEngine {
        let mut engine = NativeScriptEngine::new();
        engine.register_function("always_true", |_| Ok(vec![ScriptValue::Boolean(true)]));
        engine.register_function("double", |args| match args.first() {
            Some(ScriptValue::Number(n)) => Ok(vec![ScriptValue::Number(n * 2.0)]),
            _ => Err("expected a number".to_string()),
        });
        engine.register_function("returns_text", |_| {
            Ok(vec![ScriptValue::String("yes".to_string())])
        });
        engine.register_function("fails", |_| Err("boom".to_string()));
        engine.set_global("not_a_function", ScriptValue::Number(4.0));
        engine
    }

    #[test]
    fn test_predicate_success() {
        let mut engine = engine();
        assert_eq!(call_predicate(&mut engine, "always_true"), Ok(true));
        assert_eq!(engine.top(), 0);
    }

    #[test]
    fn test_number_function_receives_argument() {
        let mut engine = engine();
        assert_eq!(call_number_function(&mut engine, "double", 21.0), Ok(42.0));
        assert_eq!(engine.top(), 0);
    }

    #[test]
    fn test_failures_leave_stack_untouched() {
        let mut engine = engine();
        engine.push_number(7.0);
        engine.push_number(8.0);

        assert_eq!(
            call_predicate(&mut engine, "missing"),
            Err(ScriptCallError::NotFound)
        );
        assert_eq!(engine.top(), 2);

        assert_eq!(
            call_predicate(&mut engine, "not_a_function"),
            Err(ScriptCallError::WrongType)
        );
        assert_eq!(engine.top(), 2);

        assert_eq!(
            call_predicate(&mut engine, "fails"),
            Err(ScriptCallError::CallFailed("boom".to_string()))
        );
        assert_eq!(engine.top(), 2);

        assert_eq!(
            call_predicate(&mut engine, "double"),
            Err(ScriptCallError::CallFailed("expected a number".to_string()))
        );
        assert_eq!(
            call_number_function(&mut engine, "returns_text", 1.0),
            Err(ScriptCallError::NotNumber)
        );
        assert_eq!(
            call_predicate(&mut engine, "returns_text"),
            Err(ScriptCallError::NotBoolean)
        );
        assert_eq!(engine.top(), 2);
        assert_eq!(engine.to_number(-1), 8.0);
    }

    #[test]
    fn test_error_messages_name_the_reason() {
        assert_eq!(
            ScriptCallError::WrongType.to_string(),
            "the function has the wrong type"
        );
        assert!(ScriptCallError::CallFailed("x".into())
            .to_string()
            .ends_with(": x"));
    }
}
