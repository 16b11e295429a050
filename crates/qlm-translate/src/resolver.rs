//! Resolution of literal and symbolic gate parameters.

use qlm_ir::CalculatorFloat;
use rustc_hash::FxHashMap;

use crate::error::{ResolveError, TranslateError, TranslateResult};

/// Turns a symbolic parameter expression into a number.
///
/// A translation that is given no resolver accepts literal parameters only.
pub trait ParameterResolver {
    /// Evaluate `expression` to a concrete value.
    fn resolve(&self, expression: &str) -> Result<f64, ResolveError>;
}

/// Resolve one parameter.
///
/// Literal values pass through unchanged. Symbolic values are handed to the
/// resolver and its errors are surfaced as-is.
pub fn resolve_parameter(
    parameter: &CalculatorFloat,
    resolver: Option<&dyn ParameterResolver>,
) -> TranslateResult<f64> {
    match parameter {
        CalculatorFloat::Float(value) => Ok(*value),
        CalculatorFloat::Str(expression) => match resolver {
            Some(resolver) => Ok(resolver.resolve(expression)?),
            None => Err(TranslateError::UnresolvedParameter {
                expression: expression.clone(),
            }),
        },
    }
}

/// A resolver backed by a table of named variables.
///
/// Accepts a bare variable name, a numeric literal, or either of those
/// behind a leading `-`. Anything richer needs an expression evaluator.
#[derive(Debug, Clone, Default)]
pub struct VariableMap {
    values: FxHashMap<String, f64>,
}

impl VariableMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable, returning the map for chaining.
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a variable.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Get a variable.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for VariableMap {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl ParameterResolver for VariableMap {
    fn resolve(&self, expression: &str) -> Result<f64, ResolveError> {
        let expr = expression.trim();
        if let Some(rest) = expr.strip_prefix('-') {
            return self.resolve(rest).map(|v| -v);
        }
        if let Ok(value) = expr.parse::<f64>() {
            return Ok(value);
        }
        if expr.is_empty() {
            return Err(ResolveError::Evaluation {
                expression: expression.to_string(),
                reason: "empty expression".into(),
            });
        }
        self.get(expr)
            .ok_or_else(|| ResolveError::UnknownSymbol(expr.to_string()))
    }
}
