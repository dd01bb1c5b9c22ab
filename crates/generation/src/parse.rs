use serde_json::{Map, Value};

use crate::{GenerationError, RawCandidate};

/// Why a single array entry was rejected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateIssue {
    pub index: usize,
    pub field: &'static str,
    pub problem: &'static str,
}

impl std::fmt::Display for CandidateIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "entry {}: `{}` {}", self.index, self.field, self.problem)
    }
}

/// Parses untrusted model output into validated candidates.
///
/// Invalid entries are skipped and logged. The call only fails when the text
/// is not a JSON array, or when a non-empty array yields no valid entry.
pub fn parse_candidates(text: &str) -> Result<Vec<RawCandidate>, GenerationError> {
    let body = strip_code_fence(text);
    let value: Value = serde_json::from_str(body).map_err(|e| GenerationError::Parse {
        reason: e.to_string(),
        raw: text.to_string(),
    })?;

    let Value::Array(entries) = value else {
        return Err(GenerationError::Parse {
            reason: format!("expected an array, found {}", kind_of(&value)),
            raw: text.to_string(),
        });
    };

    let total = entries.len();
    let mut candidates = Vec::with_capacity(total);
    let mut first_issue = None;

    for (index, entry) in entries.into_iter().enumerate() {
        match validate_entry(index, entry) {
            Ok(candidate) => candidates.push(candidate),
            Err(issue) => {
                tracing::warn!(%issue, "dropping malformed generated candidate");
                first_issue.get_or_insert(issue);
            }
        }
    }

    if candidates.is_empty() {
        if let Some(issue) = first_issue {
            return Err(GenerationError::Schema {
                reason: format!("all {total} entries rejected; first: {issue}"),
                raw: text.to_string(),
            });
        }
    }

    Ok(candidates)
}

/// Removes a surrounding Markdown code fence, if the model added one.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line.
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.trim_end()
        .strip_suffix("```")
        .unwrap_or(rest)
        .trim()
}

fn validate_entry(index: usize, entry: Value) -> Result<RawCandidate, CandidateIssue> {
    let issue = |field, problem| CandidateIssue {
        index,
        field,
        problem,
    };

    let Value::Object(mut map) = entry else {
        return Err(issue("entry", "is not an object"));
    };

    let name = match map.remove("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => name.trim().to_string(),
        Some(Value::String(_)) => return Err(issue("name", "is empty")),
        Some(_) => return Err(issue("name", "is not a string")),
        None => return Err(issue("name", "is missing")),
    };

    let price = match map.remove("price") {
        Some(Value::Number(number)) => {
            whole_number(&number).ok_or_else(|| issue("price", "is not a non-negative integer"))?
        }
        Some(_) => return Err(issue("price", "is not a number")),
        None => return Err(issue("price", "is missing")),
    };

    Ok(RawCandidate {
        name,
        price,
        description: optional_text(&mut map, "description").map_err(|p| issue("description", p))?,
        reason: optional_text(&mut map, "reason").map_err(|p| issue("reason", p))?,
        category: optional_text(&mut map, "category").map_err(|p| issue("category", p))?,
    })
}

fn whole_number(number: &serde_json::Number) -> Option<u64> {
    if let Some(value) = number.as_u64() {
        return Some(value);
    }
    let float = number.as_f64()?;
    if float >= 0.0 && float.fract() == 0.0 && float <= u64::MAX as f64 {
        Some(float as u64)
    } else {
        None
    }
}

fn optional_text(map: &mut Map<String, Value>, field: &str) -> Result<String, &'static str> {
    match map.remove(field) {
        None | Some(Value::Null) => Ok(String::new()),
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err("is not a string"),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
