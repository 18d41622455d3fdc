//! YAML script loader.
//!
//! ```yaml
//! - pattern: "?X I want ?Y"
//!   responses:
//!     - "what would it mean if you got ?Y"
//!     - "why do you want ?Y"
//! ```
//!
//! Malformed definitions fail fast with a [`ScriptError`] naming the rule,
//! before any matching runs. A response referencing a variable the pattern
//! never binds is *not* rejected here; at synthesis time it degrades to the
//! visible `MISSING` sentinel instead.

use crate::{Rule, Script, parse_terms};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// A script rule as it appears on disk, before tokenization and validation.
#[derive(Debug, Deserialize)]
struct RawRule {
    pattern: String,
    responses: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read script {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in script: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("rule {index} has an empty pattern")]
    EmptyPattern { index: usize },

    #[error("rule '{rule}' has no responses")]
    NoResponses { rule: String },

    #[error("rule '{rule}' has an empty response (index {index})")]
    EmptyResponse { rule: String, index: usize },

    #[error("rule '{rule}' has an invalid variable token '{token}'")]
    BadVariable { rule: String, token: String },
}

/// Load a script from a YAML file.
pub fn from_path(path: impl AsRef<Path>) -> Result<Script, ScriptError> {
    let path = path.as_ref();
    let text =
        std::fs::read_to_string(path).map_err(|source| ScriptError::Io { path: path.to_path_buf(), source })?;
    from_str(&text)
}

/// Parse and validate a script from YAML text.
pub fn from_str(text: &str) -> Result<Script, ScriptError> {
    let raw: Vec<RawRule> = serde_yaml::from_str(text)?;

    let mut rules = Vec::with_capacity(raw.len());
    for (index, record) in raw.into_iter().enumerate() {
        rules.push(validate_rule(index, record)?);
    }
    Ok(Script::new(rules))
}

fn validate_rule(index: usize, record: RawRule) -> Result<Rule, ScriptError> {
    let pattern = parse_terms(&record.pattern);
    if pattern.is_empty() {
        return Err(ScriptError::EmptyPattern { index });
    }

    let rule_name = record.pattern.split_whitespace().collect::<Vec<_>>().join(" ");
    check_variables(&rule_name, &record.pattern)?;

    if record.responses.is_empty() {
        return Err(ScriptError::NoResponses { rule: rule_name });
    }

    let mut responses = Vec::with_capacity(record.responses.len());
    for (resp_index, response) in record.responses.iter().enumerate() {
        let terms = parse_terms(response);
        if terms.is_empty() {
            return Err(ScriptError::EmptyResponse { rule: rule_name, index: resp_index });
        }
        check_variables(&rule_name, response)?;
        responses.push(terms);
    }

    Ok(Rule::new(pattern, responses))
}

/// Reject sigil-marked tokens that cannot name a variable (a bare `?`,
/// `?2nd`, `?foo-bar`). Plain words pass through untouched.
fn check_variables(rule_name: &str, text: &str) -> Result<(), ScriptError> {
    let var_shape = regex!(r"^\?[A-Za-z][A-Za-z0-9_]*$");
    for token in text.split_whitespace() {
        if token.starts_with('?') && !var_shape.is_match(token) {
            return Err(ScriptError::BadVariable { rule: rule_name.to_string(), token: token.to_string() });
        }
    }
    Ok(())
}
