//! Literal-or-symbolic parameter values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A gate parameter: either a literal float or a symbolic expression.
///
/// Symbolic expressions are opaque strings here. They are only turned into
/// numbers at translation time by an external resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CalculatorFloat {
    /// A literal numeric value.
    Float(f64),
    /// A symbolic expression such as `"theta"` or `"2 * phi"`.
    Str(String),
}

impl CalculatorFloat {
    /// Create a symbolic parameter.
    pub fn symbol(expression: impl Into<String>) -> Self {
        CalculatorFloat::Str(expression.into())
    }

    /// Check if this parameter is a literal float.
    #[inline]
    pub fn is_float(&self) -> bool {
        matches!(self, CalculatorFloat::Float(_))
    }

    /// Get the literal value, if any.
    #[inline]
    pub fn float(&self) -> Option<f64> {
        match self {
            CalculatorFloat::Float(v) => Some(*v),
            CalculatorFloat::Str(_) => None,
        }
    }

    /// Get the symbolic expression, if any.
    pub fn expression(&self) -> Option<&str> {
        match self {
            CalculatorFloat::Float(_) => None,
            CalculatorFloat::Str(s) => Some(s),
        }
    }

    fn binary(self, rhs: Self, op: char, fold: fn(f64, f64) -> f64) -> Self {
        match (self, rhs) {
            (CalculatorFloat::Float(a), CalculatorFloat::Float(b)) => {
                CalculatorFloat::Float(fold(a, b))
            }
            (a, b) => CalculatorFloat::Str(format!("({a} {op} {b})")),
        }
    }
}

impl Default for CalculatorFloat {
    fn default() -> Self {
        CalculatorFloat::Float(0.0)
    }
}

impl fmt::Display for CalculatorFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CalculatorFloat::Float(v) => write!(f, "{v}"),
            CalculatorFloat::Str(s) => write!(f, "{s}"),
        }
    }
}

impl From<f64> for CalculatorFloat {
    fn from(value: f64) -> Self {
        CalculatorFloat::Float(value)
    }
}

impl From<i32> for CalculatorFloat {
    fn from(value: i32) -> Self {
        CalculatorFloat::Float(f64::from(value))
    }
}

impl From<&str> for CalculatorFloat {
    fn from(value: &str) -> Self {
        CalculatorFloat::Str(value.to_string())
    }
}

impl From<String> for CalculatorFloat {
    fn from(value: String) -> Self {
        CalculatorFloat::Str(value)
    }
}

impl std::ops::Add for CalculatorFloat {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        self.binary(rhs, '+', |a, b| a + b)
    }
}

impl std::ops::Sub for CalculatorFloat {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self.binary(rhs, '-', |a, b| a - b)
    }
}

impl std::ops::Mul for CalculatorFloat {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        self.binary(rhs, '*', |a, b| a * b)
    }
}

impl std::ops::Div for CalculatorFloat {
    type Output = Self;

    fn div(self, rhs: Self) -> Self::Output {
        self.binary(rhs, '/', |a, b| a / b)
    }
}

impl std::ops::Neg for CalculatorFloat {
    type Output = Self;

    fn neg(self) -> Self::Output {
        match self {
            CalculatorFloat::Float(v) => CalculatorFloat::Float(-v),
            CalculatorFloat::Str(s) => CalculatorFloat::Str(format!("(-{s})")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_literal() {
        let p = CalculatorFloat::from(1.5);
        assert!(p.is_float());
        assert_eq!(p.float(), Some(1.5));
        assert_eq!(p.expression(), None);
    }

    #[test]
    fn test_symbol() {
        let p = CalculatorFloat::symbol("theta");
        assert!(!p.is_float());
        assert_eq!(p.float(), None);
        assert_eq!(p.expression(), Some("theta"));
    }

    #[test]
    fn test_arithmetic_folds_literals() {
        let sum = CalculatorFloat::from(PI) / CalculatorFloat::from(2.0);
        assert_eq!(sum.float(), Some(PI / 2.0));

        let neg = -CalculatorFloat::from(3.0);
        assert_eq!(neg.float(), Some(-3.0));
    }

    #[test]
    fn test_arithmetic_keeps_symbols() {
        let p = CalculatorFloat::symbol("theta") * CalculatorFloat::from(2);
        assert_eq!(p.expression(), Some("(theta * 2)"));

        let n = -CalculatorFloat::symbol("phi");
        assert_eq!(n.expression(), Some("(-phi)"));
    }
}
