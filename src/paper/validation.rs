//! Structural validation of a paper before it is sent for rendering.
//!
//! Every violation is collected, not just the first one, so an editor can
//! highlight all offending fields at once.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use super::model::{AuthorField, PaperDocument, MAX_AUTHORS, MIN_AUTHORS};

/// A single violated rule, addressed by field path (e.g. `authors[1].email`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ValidationError {
    /// The field that failed validation
    pub field: String,
    /// Human-readable error message
    pub message: String,
    /// Suggestion for how to fix the error
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            suggestion: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Create error for empty required field
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{} must not be empty", label))
            .with_suggestion(format!("Please fill in the {}", label.to_lowercase()))
    }

    pub fn author_count(count: usize) -> Self {
        Self::new(
            "authors",
            format!(
                "A paper needs between {} and {} authors, found {}",
                MIN_AUTHORS, MAX_AUTHORS, count
            ),
        )
        .with_suggestion(if count < MIN_AUTHORS {
            "Add at least one author"
        } else {
            "Remove authors until at most six remain"
        })
    }

    pub fn no_sections() -> Self {
        Self::new("sections", "A paper needs at least one section")
            .with_suggestion("Add an introduction section")
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, ". {}", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Ordered collection of violations.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ValidationError> {
        self.errors.iter()
    }

    pub fn as_slice(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Field paths in violation order.
    pub fn fields(&self) -> Vec<&str> {
        self.errors.iter().map(|e| e.field.as_str()).collect()
    }

    /// Multi-line report suitable for showing to the author.
    pub fn to_report(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }

        let mut parts = vec![format!(
            "Validation failed: {} problem(s) found\n",
            self.errors.len()
        )];

        for (i, error) in self.errors.iter().enumerate() {
            parts.push(format!("{}. {}", i + 1, error));
        }

        parts.join("\n")
    }

    /// Ok if no errors, otherwise the collection itself.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        write!(f, "{} violation(s): {}", self.errors.len(), joined)
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a ValidationError;
    type IntoIter = std::slice::Iter<'a, ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

// ============================================================================
// Validation functions
// ============================================================================

/// Validate that a string is not empty after trimming
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

pub fn validate_author_count(count: usize, errors: &mut ValidationErrors) {
    if !(MIN_AUTHORS..=MAX_AUTHORS).contains(&count) {
        errors.add(ValidationError::author_count(count));
    }
}

/// Check every structural rule a document must satisfy before rendering.
pub fn validate_document(document: &PaperDocument) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    validate_required(&document.title, "title", "Title", &mut errors);
    validate_required(&document.abstract_text, "abstract", "Abstract", &mut errors);
    validate_required(&document.keywords, "keywords", "Keywords", &mut errors);

    validate_author_count(document.authors.len(), &mut errors);
    for (index, author) in document.authors.iter().enumerate() {
        for field in AuthorField::ALL.iter().filter(|f| f.is_required()) {
            let path = format!("authors[{}].{}", index, field.key());
            let label = format!("{} of author {}", field.label(), index + 1);
            validate_required(field.get(author), &path, &label, &mut errors);
        }
    }

    if document.sections.is_empty() {
        errors.add(ValidationError::no_sections());
    }

    errors
}
