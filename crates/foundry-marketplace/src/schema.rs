//! Marketplace manifest schema validation.
//!
//! Checks a raw parsed JSON document against the expected marketplace shape
//! before the rest of the engine trusts it. Validation collects every
//! violation in a single pass over the document, so a manifest author can fix
//! everything at once instead of iterating error by error.
//!
//! Required shape: a mapping with a `plugins` sequence; each element a
//! mapping with a non-empty string `name`. Optional descriptive fields are
//! type-checked when present; unknown fields are ignored.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Plugin fields that must be strings when present.
const STRING_FIELDS: &[&str] = &["category", "description", "version", "author"];

/// How a document deviates from the marketplace schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViolationKind {
    MissingRequiredField,
    WrongType,
    DuplicateName,
    EmptyCollection,
}

impl fmt::Display for ViolationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::MissingRequiredField => "missing required field",
            Self::WrongType => "wrong type",
            Self::DuplicateName => "duplicate name",
            Self::EmptyCollection => "empty collection",
        };
        f.write_str(label)
    }
}

/// A single schema violation at a specific location in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// Field path, e.g. `plugins[2].name`. `$` denotes the document root.
    pub path: String,

    pub kind: ViolationKind,

    /// Human-readable description of the problem.
    pub message: String,
}

impl Violation {
    fn new(path: impl Into<String>, kind: ViolationKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Check a raw document against the marketplace schema.
///
/// Returns `Ok(())` when the document conforms, otherwise every violation
/// found, in document traversal order. Purely read-only; never panics on
/// malformed input — malformed input is the normal "invalid" result.
pub fn validate(doc: &Value) -> std::result::Result<(), Vec<Violation>> {
    let mut violations = Vec::new();

    let Some(root) = doc.as_object() else {
        violations.push(Violation::new(
            "$",
            ViolationKind::WrongType,
            format!("manifest root must be an object, found {}", json_type(doc)),
        ));
        return Err(violations);
    };

    match root.get("plugins") {
        None => violations.push(Violation::new(
            "plugins",
            ViolationKind::MissingRequiredField,
            "manifest has no `plugins` array",
        )),
        Some(value) => match value.as_array() {
            None => violations.push(Violation::new(
                "plugins",
                ViolationKind::WrongType,
                format!("`plugins` must be an array, found {}", json_type(value)),
            )),
            Some(entries) if entries.is_empty() => violations.push(Violation::new(
                "plugins",
                ViolationKind::EmptyCollection,
                "manifest declares no plugins",
            )),
            Some(entries) => {
                let mut seen: HashMap<&str, usize> = HashMap::new();
                for (index, entry) in entries.iter().enumerate() {
                    validate_plugin(index, entry, &mut seen, &mut violations);
                }
            }
        },
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

/// Validate one plugin entry, appending violations to `out`.
fn validate_plugin<'doc>(
    index: usize,
    entry: &'doc Value,
    seen: &mut HashMap<&'doc str, usize>,
    out: &mut Vec<Violation>,
) {
    let path = format!("plugins[{index}]");

    let Some(obj) = entry.as_object() else {
        out.push(Violation::new(
            path,
            ViolationKind::WrongType,
            format!("plugin entry must be an object, found {}", json_type(entry)),
        ));
        return;
    };

    match obj.get("name") {
        None => out.push(Violation::new(
            format!("{path}.name"),
            ViolationKind::MissingRequiredField,
            "plugin entry is missing `name`",
        )),
        Some(Value::String(name)) if name.is_empty() => out.push(Violation::new(
            format!("{path}.name"),
            ViolationKind::MissingRequiredField,
            "`name` must be a non-empty string",
        )),
        Some(Value::String(name)) => {
            if let Some(&first) = seen.get(name.as_str()) {
                out.push(Violation::new(
                    format!("{path}.name"),
                    ViolationKind::DuplicateName,
                    format!("plugin name `{name}` already used by entry {first}"),
                ));
            } else {
                seen.insert(name.as_str(), index);
            }
        }
        Some(other) => out.push(Violation::new(
            format!("{path}.name"),
            ViolationKind::WrongType,
            format!("`name` must be a string, found {}", json_type(other)),
        )),
    }

    for field in STRING_FIELDS {
        if let Some(value) = obj.get(*field)
            && !value.is_string()
        {
            out.push(Violation::new(
                format!("{path}.{field}"),
                ViolationKind::WrongType,
                format!("`{field}` must be a string, found {}", json_type(value)),
            ));
        }
    }

    if let Some(value) = obj.get("keywords") {
        match value.as_array() {
            None => out.push(Violation::new(
                format!("{path}.keywords"),
                ViolationKind::WrongType,
                format!("`keywords` must be an array, found {}", json_type(value)),
            )),
            Some(items) => {
                for (kw_index, keyword) in items.iter().enumerate() {
                    if !keyword.is_string() {
                        out.push(Violation::new(
                            format!("{path}.keywords[{kw_index}]"),
                            ViolationKind::WrongType,
                            format!("keyword must be a string, found {}", json_type(keyword)),
                        ));
                    }
                }
            }
        }
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
