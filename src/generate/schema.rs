//! Output schema model and value validation
//!
//! Every stage artifact declares the exact shape it is generated into.
//! The schema drives two things: the instruction appended to the prompt
//! (required keys and types) and the validation of the parsed response
//! (required fields, no extras, types, bounds, minimum lengths).

use serde_json::Value;

/// Schema for one structured output type
#[derive(Debug, Clone)]
pub struct OutputSchema {
    /// Type name, used in error messages and logs
    pub name: &'static str,
    pub fields: Vec<FieldSpec>,
}

/// One named field in an output schema
#[derive(Debug, Clone)]
pub struct FieldSpec {
    pub name: &'static str,
    pub ty: FieldType,
}

impl FieldSpec {
    pub fn new(name: &'static str, ty: FieldType) -> Self {
        Self { name, ty }
    }
}

/// Field type with validation constraints
#[derive(Debug, Clone)]
pub enum FieldType {
    String {
        min_len: Option<usize>,
        max_len: Option<usize>,
    },
    Number {
        min: Option<f64>,
        max: Option<f64>,
    },
    Integer {
        min: Option<i64>,
        max: Option<i64>,
    },
    Boolean,
    Array {
        item: Box<FieldType>,
        min_items: Option<usize>,
    },
    Object(Vec<FieldSpec>),
}

impl FieldType {
    /// Unconstrained string
    pub fn string() -> Self {
        FieldType::String {
            min_len: None,
            max_len: None,
        }
    }

    /// String with length bounds
    pub fn string_bounded(min_len: usize, max_len: usize) -> Self {
        FieldType::String {
            min_len: Some(min_len),
            max_len: Some(max_len),
        }
    }

    /// Number within an inclusive range
    pub fn number_range(min: f64, max: f64) -> Self {
        FieldType::Number {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Non-negative integer
    pub fn integer_min(min: i64) -> Self {
        FieldType::Integer {
            min: Some(min),
            max: None,
        }
    }

    /// Array with a minimum element count
    pub fn array_min(item: FieldType, min_items: usize) -> Self {
        FieldType::Array {
            item: Box::new(item),
            min_items: Some(min_items),
        }
    }

    /// Array without a minimum
    pub fn array(item: FieldType) -> Self {
        FieldType::Array {
            item: Box::new(item),
            min_items: None,
        }
    }

    /// Label used in the schema instruction
    fn label(&self) -> &'static str {
        match self {
            FieldType::String { .. } => "string",
            FieldType::Number { .. } => "number",
            FieldType::Integer { .. } => "integer",
            FieldType::Boolean => "boolean",
            FieldType::Array { .. } => "array",
            FieldType::Object(_) => "object",
        }
    }
}

impl OutputSchema {
    /// Build the instruction appended to the prompt
    ///
    /// Describes required keys and types only - the schema itself is not
    /// sent, because models tend to echo it back instead of filling it in.
    pub fn instruction(&self) -> String {
        let keys_desc = self
            .fields
            .iter()
            .map(|f| format!("\"{}\" ({})", f.name, f.ty.label()))
            .collect::<Vec<_>>()
            .join(", ");

        format!(
            "\n\nRespond with exactly one JSON object: real data (your analysis) with these keys only: {}. \
             Do NOT output the schema or a definition - only the filled-in object. \
             No markdown, no code fence, no extra text. \
             Numeric fields must be plain numbers only (no currency symbols, units, or prose; \
             e.g. use 1400 for 1.4 billion, 25 for 25%).",
            keys_desc
        )
    }

    /// Validate a parsed JSON value against this schema
    ///
    /// Checks required fields, rejects extra fields, and enforces types
    /// and constraints recursively. Returns every violation found, not
    /// just the first.
    pub fn validate(&self, value: &Value) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        validate_object(value, &self.fields, self.name, &mut errors);
        if errors.is_empty() { Ok(()) } else { Err(errors) }
    }
}

fn validate_object(value: &Value, fields: &[FieldSpec], path: &str, errors: &mut Vec<String>) {
    let obj = match value.as_object() {
        Some(o) => o,
        None => {
            errors.push(format!("{}: expected an object", path));
            return;
        }
    };

    for field in fields {
        let field_path = format!("{}.{}", path, field.name);
        match obj.get(field.name) {
            Some(v) => validate_field(v, &field.ty, &field_path, errors),
            None => errors.push(format!("{}: missing required field", field_path)),
        }
    }

    for key in obj.keys() {
        if !fields.iter().any(|f| f.name == key) {
            errors.push(format!("{}.{}: unexpected extra field", path, key));
        }
    }
}

fn validate_field(value: &Value, ty: &FieldType, path: &str, errors: &mut Vec<String>) {
    match ty {
        FieldType::String { min_len, max_len } => {
            let s = match value.as_str() {
                Some(s) => s,
                None => {
                    errors.push(format!("{}: expected a string", path));
                    return;
                }
            };
            if let Some(min) = min_len {
                if s.chars().count() < *min {
                    errors.push(format!("{}: shorter than minimum length {}", path, min));
                }
            }
            if let Some(max) = max_len {
                if s.chars().count() > *max {
                    errors.push(format!("{}: longer than maximum length {}", path, max));
                }
            }
        }
        FieldType::Number { min, max } => {
            let n = match value.as_f64() {
                Some(n) => n,
                None => {
                    errors.push(format!("{}: expected a number", path));
                    return;
                }
            };
            if let Some(min) = min {
                if n < *min {
                    errors.push(format!("{}: below minimum {}", path, min));
                }
            }
            if let Some(max) = max {
                if n > *max {
                    errors.push(format!("{}: above maximum {}", path, max));
                }
            }
        }
        FieldType::Integer { min, max } => {
            let n = match value.as_i64() {
                Some(n) => n,
                None => {
                    errors.push(format!("{}: expected an integer", path));
                    return;
                }
            };
            if let Some(min) = min {
                if n < *min {
                    errors.push(format!("{}: below minimum {}", path, min));
                }
            }
            if let Some(max) = max {
                if n > *max {
                    errors.push(format!("{}: above maximum {}", path, max));
                }
            }
        }
        FieldType::Boolean => {
            if !value.is_boolean() {
                errors.push(format!("{}: expected a boolean", path));
            }
        }
        FieldType::Array { item, min_items } => {
            let arr = match value.as_array() {
                Some(a) => a,
                None => {
                    errors.push(format!("{}: expected an array", path));
                    return;
                }
            };
            if let Some(min) = min_items {
                if arr.len() < *min {
                    errors.push(format!("{}: fewer than {} items", path, min));
                }
            }
            for (i, v) in arr.iter().enumerate() {
                validate_field(v, item, &format!("{}[{}]", path, i), errors);
            }
        }
        FieldType::Object(fields) => {
            validate_object(value, fields, path, errors);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report_schema() -> OutputSchema {
        OutputSchema {
            name: "TestReport",
            fields: vec![
                FieldSpec::new("title", FieldType::string_bounded(3, 50)),
                FieldSpec::new("score", FieldType::number_range(0.0, 100.0)),
                FieldSpec::new("tags", FieldType::array_min(FieldType::string(), 2)),
                FieldSpec::new(
                    "author",
                    FieldType::Object(vec![FieldSpec::new("name", FieldType::string())]),
                ),
            ],
        }
    }

    #[test]
    fn test_valid_value_passes() {
        let value = serde_json::json!({
            "title": "Quarterly review",
            "score": 88.5,
            "tags": ["alpha", "beta"],
            "author": { "name": "Pat" }
        });
        assert!(report_schema().validate(&value).is_ok());
    }

    #[test]
    fn test_missing_field_fails() {
        let value = serde_json::json!({
            "title": "Quarterly review",
            "tags": ["alpha", "beta"],
            "author": { "name": "Pat" }
        });
        let errors = report_schema().validate(&value).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("score") && e.contains("missing")));
    }

    #[test]
    fn test_extra_field_fails() {
        let value = serde_json::json!({
            "title": "Quarterly review",
            "score": 50,
            "tags": ["alpha", "beta"],
            "author": { "name": "Pat" },
            "bonus": true
        });
        let errors = report_schema().validate(&value).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("bonus") && e.contains("extra")));
    }

    #[test]
    fn test_out_of_range_number_fails() {
        let value = serde_json::json!({
            "title": "Quarterly review",
            "score": 150.0,
            "tags": ["alpha", "beta"],
            "author": { "name": "Pat" }
        });
        let errors = report_schema().validate(&value).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("score") && e.contains("above maximum")));
    }

    #[test]
    fn test_array_min_items_fails() {
        let value = serde_json::json!({
            "title": "Quarterly review",
            "score": 50,
            "tags": ["alpha"],
            "author": { "name": "Pat" }
        });
        let errors = report_schema().validate(&value).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("tags") && e.contains("fewer than 2")));
    }

    #[test]
    fn test_wrong_element_type_fails() {
        let value = serde_json::json!({
            "title": "Quarterly review",
            "score": 50,
            "tags": ["alpha", 7],
            "author": { "name": "Pat" }
        });
        let errors = report_schema().validate(&value).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("tags[1]")));
    }

    #[test]
    fn test_string_bounds() {
        let value = serde_json::json!({
            "title": "ab",
            "score": 50,
            "tags": ["alpha", "beta"],
            "author": { "name": "Pat" }
        });
        let errors = report_schema().validate(&value).unwrap_err();
        assert!(errors.iter().any(|e| e.contains("title") && e.contains("minimum length")));
    }

    #[test]
    fn test_instruction_lists_keys_and_types() {
        let instruction = report_schema().instruction();
        assert!(instruction.contains("\"title\" (string)"));
        assert!(instruction.contains("\"score\" (number)"));
        assert!(instruction.contains("\"tags\" (array)"));
        assert!(instruction.contains("\"author\" (object)"));
        assert!(instruction.contains("No markdown"));
    }

    #[test]
    fn test_non_object_root_fails() {
        let errors = report_schema().validate(&serde_json::json!([1, 2])).unwrap_err();
        assert!(errors[0].contains("expected an object"));
    }
}
