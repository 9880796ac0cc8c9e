//! Schema Validator — one generic structural validator, parameterized by a
//! static per-agent schema description.
//!
//! Validation is a binary outcome: any parse error, missing field, wrong
//! type, out-of-range number, unknown enum value, or empty required value is
//! a `SchemaViolation`. There is no partial acceptance.

use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SchemaViolation {
    #[error("output is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("output is not a JSON object")]
    NotAnObject,

    #[error("missing required field '{0}'")]
    MissingField(&'static str),

    #[error("field '{field}' has the wrong type (expected {expected})")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("field '{field}' = {value} outside [{min}, {max}]")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("field '{field}' value '{value}' not in allowed set")]
    NotInEnum { field: &'static str, value: String },

    #[error("field '{0}' must not be empty")]
    Empty(&'static str),

    #[error("rejected by agent guard: {0}")]
    Guard(String),
}

/// Semantic type of one required field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    /// Number within a closed interval.
    NumberInRange { min: f64, max: f64 },
    /// String drawn from a fixed set.
    EnumString { allowed: &'static [&'static str] },
    /// Non-empty string after trimming.
    NonEmptyString,
    /// Array of non-empty strings with a minimum length.
    StringArray { min_items: usize },
}

/// One required field of an agent's output contract.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
}

/// Static description of one agent's required output shape.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub agent: &'static str,
    pub fields: &'static [FieldSpec],
}

impl Schema {
    /// Structurally checks a parsed JSON object against this schema.
    pub fn check(&self, value: &Value) -> Result<(), SchemaViolation> {
        let object = value.as_object().ok_or(SchemaViolation::NotAnObject)?;

        for spec in self.fields {
            let field = object
                .get(spec.name)
                .ok_or(SchemaViolation::MissingField(spec.name))?;
            check_field(spec, field)?;
        }
        Ok(())
    }
}

fn check_field(spec: &FieldSpec, value: &Value) -> Result<(), SchemaViolation> {
    match spec.kind {
        FieldKind::NumberInRange { min, max } => {
            let n = value.as_f64().ok_or(SchemaViolation::WrongType {
                field: spec.name,
                expected: "number",
            })?;
            if !(min..=max).contains(&n) {
                return Err(SchemaViolation::OutOfRange {
                    field: spec.name,
                    value: n,
                    min,
                    max,
                });
            }
        }
        FieldKind::EnumString { allowed } => {
            let s = value.as_str().ok_or(SchemaViolation::WrongType {
                field: spec.name,
                expected: "string",
            })?;
            if !allowed.contains(&s) {
                return Err(SchemaViolation::NotInEnum {
                    field: spec.name,
                    value: s.to_string(),
                });
            }
        }
        FieldKind::NonEmptyString => {
            let s = value.as_str().ok_or(SchemaViolation::WrongType {
                field: spec.name,
                expected: "string",
            })?;
            if s.trim().is_empty() {
                return Err(SchemaViolation::Empty(spec.name));
            }
        }
        FieldKind::StringArray { min_items } => {
            let items = value.as_array().ok_or(SchemaViolation::WrongType {
                field: spec.name,
                expected: "array of strings",
            })?;
            if items.len() < min_items {
                return Err(SchemaViolation::Empty(spec.name));
            }
            for item in items {
                let s = item.as_str().ok_or(SchemaViolation::WrongType {
                    field: spec.name,
                    expected: "array of strings",
                })?;
                if s.trim().is_empty() {
                    return Err(SchemaViolation::Empty(spec.name));
                }
            }
        }
    }
    Ok(())
}

/// Parses raw model text, checks it against `schema`, and deserializes the
/// typed output. The typed struct must not require fields the schema does
/// not check.
pub fn validate_as<T: DeserializeOwned>(raw: &str, schema: &Schema) -> Result<T, SchemaViolation> {
    let value: Value = serde_json::from_str(strip_json_fences(raw))?;
    schema.check(&value)?;
    serde_json::from_value(value).map_err(SchemaViolation::Parse)
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    const TEST_SCHEMA: Schema = Schema {
        agent: "test",
        fields: &[
            FieldSpec {
                name: "score",
                kind: FieldKind::NumberInRange { min: 0.0, max: 100.0 },
            },
            FieldSpec {
                name: "confidence",
                kind: FieldKind::EnumString {
                    allowed: &["low", "medium", "high"],
                },
            },
            FieldSpec {
                name: "explanations",
                kind: FieldKind::StringArray { min_items: 1 },
            },
        ],
    };

    #[derive(Debug, Deserialize)]
    struct TestOutput {
        score: f64,
        confidence: String,
        explanations: Vec<String>,
    }

    fn valid_json() -> String {
        json!({
            "score": 82,
            "confidence": "high",
            "explanations": ["matched python", "5 years >= 3 required"]
        })
        .to_string()
    }

    #[test]
    fn test_valid_output_passes() {
        let out: TestOutput = validate_as(&valid_json(), &TEST_SCHEMA).unwrap();
        assert_eq!(out.score, 82.0);
        assert_eq!(out.confidence, "high");
        assert_eq!(out.explanations.len(), 2);
    }

    #[test]
    fn test_fenced_json_passes() {
        let fenced = format!("```json\n{}\n```", valid_json());
        assert!(validate_as::<TestOutput>(&fenced, &TEST_SCHEMA).is_ok());
    }

    #[test]
    fn test_garbage_text_is_parse_error() {
        let err = validate_as::<TestOutput>("HIRE CANDIDATE NOW", &TEST_SCHEMA).unwrap_err();
        assert!(matches!(err, SchemaViolation::Parse(_)));
    }

    #[test]
    fn test_empty_text_is_parse_error() {
        assert!(validate_as::<TestOutput>("", &TEST_SCHEMA).is_err());
    }

    #[test]
    fn test_non_object_is_rejected() {
        let err = validate_as::<TestOutput>("[1, 2]", &TEST_SCHEMA).unwrap_err();
        assert!(matches!(err, SchemaViolation::NotAnObject));
    }

    #[test]
    fn test_missing_field_is_rejected() {
        let raw = json!({"score": 50, "confidence": "low"}).to_string();
        let err = validate_as::<TestOutput>(&raw, &TEST_SCHEMA).unwrap_err();
        assert!(matches!(err, SchemaViolation::MissingField("explanations")));
    }

    #[test]
    fn test_wrong_type_is_rejected() {
        let raw = json!({"score": "eighty", "confidence": "low", "explanations": ["x"]}).to_string();
        let err = validate_as::<TestOutput>(&raw, &TEST_SCHEMA).unwrap_err();
        assert!(matches!(err, SchemaViolation::WrongType { field: "score", .. }));
    }

    #[test]
    fn test_score_above_range_is_rejected() {
        let raw = json!({"score": 101, "confidence": "low", "explanations": ["x"]}).to_string();
        let err = validate_as::<TestOutput>(&raw, &TEST_SCHEMA).unwrap_err();
        assert!(matches!(err, SchemaViolation::OutOfRange { field: "score", .. }));
    }

    #[test]
    fn test_negative_score_is_rejected() {
        let raw = json!({"score": -1, "confidence": "low", "explanations": ["x"]}).to_string();
        assert!(validate_as::<TestOutput>(&raw, &TEST_SCHEMA).is_err());
    }

    #[test]
    fn test_unknown_enum_value_is_rejected() {
        let raw = json!({"score": 10, "confidence": "certain", "explanations": ["x"]}).to_string();
        let err = validate_as::<TestOutput>(&raw, &TEST_SCHEMA).unwrap_err();
        assert!(matches!(err, SchemaViolation::NotInEnum { field: "confidence", .. }));
    }

    #[test]
    fn test_empty_explanations_array_is_rejected() {
        let raw = json!({"score": 10, "confidence": "low", "explanations": []}).to_string();
        let err = validate_as::<TestOutput>(&raw, &TEST_SCHEMA).unwrap_err();
        assert!(matches!(err, SchemaViolation::Empty("explanations")));
    }

    #[test]
    fn test_blank_explanation_string_is_rejected() {
        let raw = json!({"score": 10, "confidence": "low", "explanations": ["  "]}).to_string();
        assert!(validate_as::<TestOutput>(&raw, &TEST_SCHEMA).is_err());
    }

    #[test]
    fn test_extra_fields_are_tolerated() {
        let raw = json!({
            "score": 10,
            "confidence": "low",
            "explanations": ["x"],
            "evidence_spans": ["unrequested"]
        })
        .to_string();
        assert!(validate_as::<TestOutput>(&raw, &TEST_SCHEMA).is_ok());
    }
}
