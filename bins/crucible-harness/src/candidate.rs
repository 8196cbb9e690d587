//! The candidate capability contract and the registry it is loaded through.
//!
//! A submission is linked in as the `solution` module, which registers a
//! constructor for the well-known type name. The engine never assumes the
//! registration happened: a submission that renames or drops the required
//! type leaves the registry empty, and that surfaces as a reportable load
//! failure instead of a crash.

use std::collections::BTreeMap;
use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::args::CallArgs;
use crate::unwind;

/// Canonical type name a candidate unit must register itself under.
pub const SOLUTION_TYPE: &str = "Solution";

/// Failure to produce a usable candidate instance.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Nothing was registered under the required type name.
    #[error("'{0}' not found in the submitted code. Ensure you have not renamed the required type.")]
    TypeMissing(String),
    /// The registration hook or the constructor panicked.
    #[error("Load error: {message}")]
    Init {
        message: String,
        traceback: Option<String>,
    },
}

/// Errors crossing the invocation boundary between engine and candidate.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvokeError {
    #[error("missing required argument '{0}'")]
    MissingArgument(String),
    #[error("unexpected argument '{0}'")]
    UnexpectedArgument(String),
    #[error("argument '{name}': {reason}")]
    ArgumentType { name: String, reason: String },
    #[error("method '{0}' is not defined")]
    NoSuchMethod(String),
    #[error("{0}")]
    Failed(String),
}

impl InvokeError {
    /// Domain failure raised by a handler itself.
    pub fn failed(message: impl Into<String>) -> Self {
        InvokeError::Failed(message.into())
    }
}

/// What the engine needs from a loaded candidate: declared parameter names
/// for binding, and invocation by method name.
pub trait Candidate {
    /// Parameter names of `method`, or `None` if the candidate does not
    /// define it.
    fn signature(&self, method: &str) -> Option<&[String]>;

    /// Invoke `method` with already-bound arguments.
    fn invoke(&self, method: &str, args: &CallArgs) -> Result<Value, InvokeError>;
}

impl fmt::Debug for dyn Candidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("dyn Candidate")
    }
}

type Handler = Box<dyn Fn(&CallArgs) -> Result<Value, InvokeError>>;

struct MethodSpec {
    params: Vec<String>,
    handler: Handler,
}

/// Name-keyed method table, the stock `Candidate` implementation.
///
/// Most submissions are a handful of named closures; this covers that case
/// without forcing every problem to hand-write the trait.
#[derive(Default)]
pub struct MethodTable {
    methods: BTreeMap<String, MethodSpec>,
}

impl MethodTable {
    pub fn new() -> Self {
        MethodTable {
            methods: BTreeMap::new(),
        }
    }

    /// Register `handler` as `name`, taking exactly the given named
    /// parameters. Re-defining a name replaces the earlier entry.
    pub fn define<F>(&mut self, name: &str, params: &[&str], handler: F)
    where
        F: Fn(&CallArgs) -> Result<Value, InvokeError> + 'static,
    {
        self.methods.insert(
            name.to_string(),
            MethodSpec {
                params: params.iter().map(|param| param.to_string()).collect(),
                handler: Box::new(handler),
            },
        );
    }
}

impl Candidate for MethodTable {
    fn signature(&self, method: &str) -> Option<&[String]> {
        self.methods.get(method).map(|spec| spec.params.as_slice())
    }

    fn invoke(&self, method: &str, args: &CallArgs) -> Result<Value, InvokeError> {
        match self.methods.get(method) {
            Some(spec) => (spec.handler)(args),
            None => Err(InvokeError::NoSuchMethod(method.to_string())),
        }
    }
}

type Constructor = Box<dyn Fn() -> Box<dyn Candidate>>;

/// Constructor table the candidate unit registers into at startup.
#[derive(Default)]
pub struct CandidateRegistry {
    constructors: BTreeMap<String, Constructor>,
}

impl CandidateRegistry {
    pub fn new() -> Self {
        CandidateRegistry {
            constructors: BTreeMap::new(),
        }
    }

    /// Register a constructor under `type_name`.
    pub fn register<F>(&mut self, type_name: impl Into<String>, constructor: F)
    where
        F: Fn() -> Box<dyn Candidate> + 'static,
    {
        self.constructors.insert(type_name.into(), Box::new(constructor));
    }

    /// Build a fresh candidate instance. A missing registration and a
    /// panicking constructor are both reportable, never fatal to the
    /// process.
    pub fn construct(&self, type_name: &str) -> Result<Box<dyn Candidate>, LoadError> {
        let constructor = self
            .constructors
            .get(type_name)
            .ok_or_else(|| LoadError::TypeMissing(type_name.to_string()))?;

        unwind::contain(|| constructor()).map_err(|panic| LoadError::Init {
            message: panic.message,
            traceback: panic.traceback,
        })
    }
}

/// An entry point resolved against a constructed candidate: the name was
/// confirmed to exist and its parameter list is pinned for binding.
pub struct BoundMethod<'a> {
    candidate: &'a dyn Candidate,
    name: String,
    params: Vec<String>,
}

impl<'a> BoundMethod<'a> {
    /// Bind `name` for invocation, or `None` if the candidate does not
    /// define it.
    pub fn resolve(candidate: &'a dyn Candidate, name: &str) -> Option<Self> {
        let params = candidate.signature(name)?.to_vec();
        Some(BoundMethod {
            candidate,
            name: name.to_string(),
            params,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Declared parameter names, in declaration order.
    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn call(&self, args: &CallArgs) -> Result<Value, InvokeError> {
        self.candidate.invoke(&self.name, args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Map};

    fn sample_table() -> MethodTable {
        let mut methods = MethodTable::new();
        methods.define("double", &["x"], |args| {
            let x: i64 = args.get("x")?;
            Ok(json!(x * 2))
        });
        methods
    }

    fn args_for(table: &MethodTable, method: &str, input: Value) -> CallArgs {
        let input = match input {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        let params = table.signature(method).expect("method defined");
        CallArgs::bind(params, &input).expect("input matches signature")
    }

    #[test]
    fn test_method_table_signature() {
        let methods = sample_table();
        assert_eq!(methods.signature("double"), Some(&["x".to_string()][..]));
        assert_eq!(methods.signature("nope"), None);
    }

    #[test]
    fn test_method_table_invoke() {
        let methods = sample_table();
        let args = args_for(&methods, "double", json!({"x": 21}));
        assert_eq!(methods.invoke("double", &args).unwrap(), json!(42));
    }

    #[test]
    fn test_method_table_invoke_unknown_method() {
        let methods = sample_table();
        let args = CallArgs::bind(&[], &Map::new()).unwrap();
        let err = methods.invoke("nope", &args).unwrap_err();
        assert_eq!(err, InvokeError::NoSuchMethod("nope".to_string()));
    }

    #[test]
    fn test_registry_constructs_registered_type() {
        let mut registry = CandidateRegistry::new();
        registry.register(SOLUTION_TYPE, || Box::new(sample_table()) as Box<dyn Candidate>);

        let candidate = registry.construct(SOLUTION_TYPE).unwrap();
        assert!(candidate.signature("double").is_some());
    }

    #[test]
    fn test_registry_missing_type() {
        let registry = CandidateRegistry::new();
        let err = registry.construct(SOLUTION_TYPE).unwrap_err();
        assert!(matches!(err, LoadError::TypeMissing(_)));
        assert!(err.to_string().contains("'Solution' not found"));
    }

    #[test]
    fn test_registry_panicking_constructor() {
        let mut registry = CandidateRegistry::new();
        registry.register(SOLUTION_TYPE, || panic!("constructor exploded"));

        let err = registry.construct(SOLUTION_TYPE).unwrap_err();
        match err {
            LoadError::Init { message, traceback } => {
                assert_eq!(message, "constructor exploded");
                assert!(traceback.expect("trace captured").contains("constructor exploded"));
            }
            other => panic!("expected Init, got {other:?}"),
        }
    }

    #[test]
    fn test_bound_method_resolve_and_call() {
        let methods = sample_table();
        let bound = BoundMethod::resolve(&methods, "double").expect("method exists");
        assert_eq!(bound.name(), "double");
        assert_eq!(bound.params(), &["x".to_string()]);

        let args = args_for(&methods, "double", json!({"x": 3}));
        assert_eq!(bound.call(&args).unwrap(), json!(6));
    }

    #[test]
    fn test_bound_method_resolve_missing() {
        let methods = sample_table();
        assert!(BoundMethod::resolve(&methods, "missingMethod").is_none());
    }
}
