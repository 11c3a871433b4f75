//! Configurable dialects.
//!
//! A [`DialectProfile`] is a dialect described by data: the capabilities it
//! supports plus the handful of literal and operator spellings that vary most
//! between engines. Profiles load from JSON:
//!
//! ```json
//! {
//!   "name": "legacy",
//!   "capabilities": ["modulus", "greatest_least"],
//!   "literals": { "true_literal": "(1=1)", "false_literal": "(1=0)" },
//!   "concat": { "function": "CONCAT" }
//! }
//! ```

use crate::dialect::{ansi, Capability, Dialect};
use crate::expression::{ExpressionError, ExpressionResult, Op};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

/// Replacement spellings for the boolean and NULL literals
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralOverrides {
    #[serde(default)]
    pub true_literal: Option<String>,
    #[serde(default)]
    pub false_literal: Option<String>,
    #[serde(default)]
    pub null_literal: Option<String>,
}

/// How string concatenation is spelled
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConcatStyle {
    /// Infix operator, e.g. `a || b`
    Operator(String),
    /// Variadic function, e.g. `CONCAT(a, b)`
    Function(String),
}

impl Default for ConcatStyle {
    fn default() -> Self {
        ConcatStyle::Operator("||".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialectProfile {
    pub name: String,
    #[serde(default)]
    pub capabilities: BTreeSet<Capability>,
    #[serde(default)]
    pub literals: LiteralOverrides,
    #[serde(default)]
    pub concat: ConcatStyle,
}

impl DialectProfile {
    /// A profile with no capabilities: every fallback formula is used
    pub fn minimal(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capabilities: BTreeSet::new(),
            literals: LiteralOverrides::default(),
            concat: ConcatStyle::default(),
        }
    }

    /// The built-in ANSI profile, supporting every capability
    pub fn ansi() -> Self {
        Self {
            capabilities: Capability::ALL.into_iter().collect(),
            ..Self::minimal("ansi")
        }
    }

    pub fn with_capability(mut self, capability: Capability) -> Self {
        self.capabilities.insert(capability);
        self
    }

    pub fn without_capability(mut self, capability: Capability) -> Self {
        self.capabilities.remove(&capability);
        self
    }

    pub fn with_literals(mut self, literals: LiteralOverrides) -> Self {
        self.literals = literals;
        self
    }

    pub fn with_concat(mut self, concat: ConcatStyle) -> Self {
        self.concat = concat;
        self
    }

    pub fn from_json(json: &str) -> ExpressionResult<Self> {
        serde_json::from_str(json).map_err(|e| ExpressionError::Profile {
            message: e.to_string(),
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> ExpressionResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| ExpressionError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let profile = Self::from_json(&json)?;
        log::debug!(
            "loaded dialect profile '{}' from {} ({} capabilities)",
            profile.name,
            path.display(),
            profile.capabilities.len()
        );
        Ok(profile)
    }
}

impl Default for DialectProfile {
    fn default() -> Self {
        Self::ansi()
    }
}

impl Dialect for DialectProfile {
    fn name(&self) -> &str {
        &self.name
    }

    fn supports(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }

    fn true_literal(&self) -> String {
        self.literals
            .true_literal
            .clone()
            .unwrap_or_else(|| "TRUE".to_string())
    }

    fn false_literal(&self) -> String {
        self.literals
            .false_literal
            .clone()
            .unwrap_or_else(|| "FALSE".to_string())
    }

    fn null_literal(&self) -> String {
        self.literals
            .null_literal
            .clone()
            .unwrap_or_else(|| "NULL".to_string())
    }

    fn render_operator(&self, op: &Op, operands: &[String]) -> String {
        match (op, &self.concat) {
            (Op::Concat, ConcatStyle::Function(name)) if !operands.is_empty() => {
                format!("{}({})", name, operands.join(", "))
            }
            (Op::Concat, ConcatStyle::Operator(operator)) if operands.len() > 1 => {
                format!("({})", operands.join(&format!(" {} ", operator)))
            }
            _ => ansi::render_operator(op, operands),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;
    use std::io::Write;

    #[test]
    fn test_ansi_supports_everything() {
        let ansi = DialectProfile::ansi();
        for capability in Capability::ALL {
            assert!(ansi.supports(capability));
        }
        assert_eq!(ansi.name(), "ansi");
    }

    #[test]
    fn test_minimal_supports_nothing() {
        let minimal = DialectProfile::minimal("bare");
        for capability in Capability::ALL {
            assert!(!minimal.supports(capability));
        }
    }

    #[test]
    fn test_builder() {
        let profile = DialectProfile::minimal("x")
            .with_capability(Capability::Xor)
            .with_capability(Capability::Modulus)
            .without_capability(Capability::Modulus);
        assert!(profile.supports(Capability::Xor));
        assert!(!profile.supports(Capability::Modulus));
    }

    #[test]
    fn test_from_json() {
        let profile = DialectProfile::from_json(
            r#"{
                "name": "legacy",
                "capabilities": ["modulus", "greatest_least"],
                "literals": { "true_literal": "(1=1)", "false_literal": "(1=0)" },
                "concat": { "function": "CONCAT" }
            }"#,
        )
        .unwrap();

        assert_eq!(profile.name, "legacy");
        assert!(profile.supports(Capability::Modulus));
        assert!(!profile.supports(Capability::Xor));
        assert_eq!(profile.render_value(&Value::Boolean(true)), "(1=1)");
        assert_eq!(profile.render_value(&Value::Boolean(false)), "(1=0)");
        assert_eq!(profile.render_value(&Value::Null), "NULL");
        assert_eq!(
            profile.render_operator(&Op::Concat, &["a".to_string(), "b".to_string()]),
            "CONCAT(a, b)"
        );
    }

    #[test]
    fn test_from_json_defaults() {
        let profile = DialectProfile::from_json(r#"{ "name": "empty" }"#).unwrap();
        assert_eq!(profile, DialectProfile::minimal("empty"));
    }

    #[test]
    fn test_from_json_rejects_unknown_capability() {
        let result = DialectProfile::from_json(r#"{ "name": "x", "capabilities": ["teleport"] }"#);
        assert!(matches!(result, Err(ExpressionError::Profile { .. })));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "name": "file", "capabilities": ["xor"] }}"#).unwrap();

        let profile = DialectProfile::from_path(file.path()).unwrap();
        assert_eq!(profile.name, "file");
        assert!(profile.supports(Capability::Xor));

        let missing = DialectProfile::from_path("/nonexistent/profile.json");
        assert!(matches!(missing, Err(ExpressionError::Io { .. })));
    }
}
