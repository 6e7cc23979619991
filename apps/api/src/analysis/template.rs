//! Prompt template — a prompt file with a single `{statement_input}`
//! placeholder, loaded once at startup and rendered per request.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::analysis::prompts::{DEFAULT_TEMPLATE, STATEMENT_VARIABLE};

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid template file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unsupported template: {0}")]
    Unsupported(String),

    #[error("template must declare exactly [\"statement_input\"], found {0:?}")]
    UnsupportedVariables(Vec<String>),

    #[error("template text never uses {{statement_input}}")]
    MissingPlaceholder,

    #[error("unknown template variable '{0}'")]
    UnknownVariable(String),

    #[error("unbalanced brace at byte {0}")]
    UnbalancedBrace(usize),
}

/// On-disk prompt file layout.
#[derive(Debug, Deserialize)]
struct PromptFile {
    #[serde(rename = "_type", default)]
    kind: Option<String>,
    input_variables: Vec<String>,
    template: String,
    #[serde(default)]
    template_format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    BuiltIn,
    File(PathBuf),
}

impl fmt::Display for TemplateSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TemplateSource::BuiltIn => f.write_str("built-in"),
            TemplateSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    source: TemplateSource,
}

impl PromptTemplate {
    pub fn builtin() -> Self {
        Self {
            template: DEFAULT_TEMPLATE.to_string(),
            source: TemplateSource::BuiltIn,
        }
    }

    /// Builds a template from raw text, validating its placeholders.
    pub fn from_text(
        template: impl Into<String>,
        source: TemplateSource,
    ) -> Result<Self, TemplateError> {
        let template = template.into();
        let (_, uses) = expand(&template, "")?;
        if uses == 0 {
            return Err(TemplateError::MissingPlaceholder);
        }
        Ok(Self { template, source })
    }

    /// Loads a JSON prompt file:
    /// `{"_type": "prompt", "input_variables": ["statement_input"], "template": "..."}`.
    pub fn load(path: &Path) -> Result<Self, TemplateError> {
        let raw = std::fs::read_to_string(path).map_err(|source| TemplateError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: PromptFile = serde_json::from_str(&raw)?;

        if let Some(kind) = file.kind.as_deref() {
            if kind != "prompt" {
                return Err(TemplateError::Unsupported(format!("_type '{kind}'")));
            }
        }
        if let Some(format) = file.template_format.as_deref() {
            if format != "f-string" {
                return Err(TemplateError::Unsupported(format!(
                    "template_format '{format}'"
                )));
            }
        }
        if file.input_variables != [STATEMENT_VARIABLE] {
            return Err(TemplateError::UnsupportedVariables(file.input_variables));
        }

        Self::from_text(file.template, TemplateSource::File(path.to_path_buf()))
    }

    /// Loads from `path` when given, otherwise the built-in template.
    pub fn load_or_builtin(path: Option<&Path>) -> Result<Self, TemplateError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::builtin()),
        }
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    pub fn render(&self, statement: &str) -> Result<String, TemplateError> {
        expand(&self.template, statement).map(|(text, _)| text)
    }
}

/// Substitutes `{statement_input}` and unescapes `{{` / `}}`.
/// Returns the rendered text and how many placeholders were substituted.
fn expand(template: &str, statement: &str) -> Result<(String, usize), TemplateError> {
    let mut out = String::with_capacity(template.len() + statement.len());
    let mut uses = 0;
    let mut chars = template.char_indices().peekable();

    while let Some((pos, c)) = chars.next() {
        match c {
            '{' if matches!(chars.peek(), Some((_, '{'))) => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut name = String::new();
                loop {
                    match chars.next() {
                        Some((_, '}')) => break,
                        Some((_, '{')) | None => return Err(TemplateError::UnbalancedBrace(pos)),
                        Some((_, ch)) => name.push(ch),
                    }
                }
                let name = name.trim();
                if name != STATEMENT_VARIABLE {
                    return Err(TemplateError::UnknownVariable(name.to_string()));
                }
                out.push_str(statement);
                uses += 1;
            }
            '}' if matches!(chars.peek(), Some((_, '}'))) => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(TemplateError::UnbalancedBrace(pos)),
            _ => out.push(c),
        }
    }

    Ok((out, uses))
}
