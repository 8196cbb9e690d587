//! Named-argument binding between a test case's `input` object and the
//! entry point's declared parameter list.
//!
//! Binding is strict both ways: every declared name must be supplied and no
//! extra key may appear. A submission that would have blown up on a keyword
//! mismatch instead gets a per-case error naming the offending argument.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::candidate::InvokeError;

/// Validated named arguments for one invocation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    values: Map<String, Value>,
}

impl CallArgs {
    /// Check `input` against the declared parameter names.
    ///
    /// Declared names are checked first, so an input that both misses one
    /// name and adds another reports the missing one.
    pub fn bind(params: &[String], input: &Map<String, Value>) -> Result<CallArgs, InvokeError> {
        for param in params {
            if !input.contains_key(param) {
                return Err(InvokeError::MissingArgument(param.clone()));
            }
        }
        for name in input.keys() {
            if !params.iter().any(|param| param == name) {
                return Err(InvokeError::UnexpectedArgument(name.clone()));
            }
        }
        Ok(CallArgs {
            values: input.clone(),
        })
    }

    /// Deserialize argument `name` into a concrete type. A conversion
    /// failure names the argument so the report points at the bad value.
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T, InvokeError> {
        let value = self
            .value(name)
            .ok_or_else(|| InvokeError::MissingArgument(name.to_string()))?;
        serde_json::from_value(value.clone()).map_err(|err| InvokeError::ArgumentType {
            name: name.to_string(),
            reason: err.to_string(),
        })
    }

    /// Raw access for handlers that want the JSON value untyped.
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }
}
