//! Form payloads and validation state
//!
//! Incoming form bodies are plain deserialize structs; the `*Form` view
//! structs carry the submitted values plus field-keyed errors back into
//! the templates. Every form view initializes an entry for each of its
//! fields so templates can iterate error lists unconditionally.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::Note;

/// Error message for a missing required field
pub const REQUIRED_FIELD: &str = "Обязательное поле.";

/// Field-keyed validation errors plus form-wide (non-field) errors
#[derive(Debug, Clone, Default, Serialize)]
pub struct FormErrors {
    pub fields: BTreeMap<String, Vec<String>>,
    pub non_field: Vec<String>,
}

impl FormErrors {
    /// Create an error container with an empty list per known field
    pub fn for_fields(fields: &[&str]) -> Self {
        Self {
            fields: fields
                .iter()
                .map(|name| (name.to_string(), Vec::new()))
                .collect(),
            non_field: Vec::new(),
        }
    }

    /// Attach a message to a field
    pub fn add(&mut self, field: &str, message: impl Into<String>) {
        self.fields.entry(field.to_string()).or_default().push(message.into());
    }

    /// Attach a form-wide message
    pub fn add_non_field(&mut self, message: impl Into<String>) {
        self.non_field.push(message.into());
    }

    /// Whether any error has been recorded
    pub fn is_empty(&self) -> bool {
        self.non_field.is_empty() && self.fields.values().all(Vec::is_empty)
    }
}

// ---------------------------------------------------------------------------
// Notes
// ---------------------------------------------------------------------------

/// Incoming note form body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NoteFormData {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub text: String,
    /// Optional; derived from the title when blank
    #[serde(default)]
    pub slug: String,
}

/// Note form view rendered back into the template
#[derive(Debug, Clone, Serialize)]
pub struct NoteForm {
    pub title: String,
    pub text: String,
    pub slug: String,
    pub errors: FormErrors,
}

impl NoteForm {
    const FIELDS: &'static [&'static str] = &["title", "text", "slug"];

    /// Blank form for the creation page
    pub fn empty() -> Self {
        Self {
            title: String::new(),
            text: String::new(),
            slug: String::new(),
            errors: FormErrors::for_fields(Self::FIELDS),
        }
    }

    /// Form pre-filled from a submitted body
    pub fn from_data(data: &NoteFormData) -> Self {
        Self {
            title: data.title.clone(),
            text: data.text.clone(),
            slug: data.slug.clone(),
            errors: FormErrors::for_fields(Self::FIELDS),
        }
    }

    /// Form pre-filled from an existing note, for the edit page
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            text: note.text.clone(),
            slug: note.slug.clone(),
            errors: FormErrors::for_fields(Self::FIELDS),
        }
    }

    /// Requiredness validation; slug stays optional
    pub fn validate(&mut self) -> bool {
        if self.title.trim().is_empty() {
            self.errors.add("title", REQUIRED_FIELD);
        }
        if self.text.trim().is_empty() {
            self.errors.add("text", REQUIRED_FIELD);
        }
        self.errors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

/// Incoming comment form body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommentFormData {
    #[serde(default)]
    pub text: String,
}

/// Comment form view rendered back into the template
#[derive(Debug, Clone, Serialize)]
pub struct CommentForm {
    pub text: String,
    pub errors: FormErrors,
}

impl CommentForm {
    const FIELDS: &'static [&'static str] = &["text"];

    pub fn empty() -> Self {
        Self {
            text: String::new(),
            errors: FormErrors::for_fields(Self::FIELDS),
        }
    }

    pub fn from_data(data: &CommentFormData) -> Self {
        Self {
            text: data.text.clone(),
            errors: FormErrors::for_fields(Self::FIELDS),
        }
    }

    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            errors: FormErrors::for_fields(Self::FIELDS),
        }
    }

    pub fn validate(&mut self) -> bool {
        if self.text.trim().is_empty() {
            self.errors.add("text", REQUIRED_FIELD);
        }
        self.errors.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Auth
// ---------------------------------------------------------------------------

/// Incoming login form body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginFormData {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Return path carried through the form as a hidden input
    #[serde(default)]
    pub next: String,
}

/// Login form view (the password is never echoed back)
#[derive(Debug, Clone, Serialize)]
pub struct LoginForm {
    pub username: String,
    pub next: String,
    pub errors: FormErrors,
}

impl LoginForm {
    const FIELDS: &'static [&'static str] = &["username", "password"];

    pub fn empty(next: &str) -> Self {
        Self {
            username: String::new(),
            next: next.to_string(),
            errors: FormErrors::for_fields(Self::FIELDS),
        }
    }

    pub fn from_data(data: &LoginFormData) -> Self {
        Self {
            username: data.username.clone(),
            next: data.next.clone(),
            errors: FormErrors::for_fields(Self::FIELDS),
        }
    }
}

/// Incoming signup form body
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SignupFormData {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Signup form view
#[derive(Debug, Clone, Serialize)]
pub struct SignupForm {
    pub username: String,
    pub errors: FormErrors,
}

impl SignupForm {
    const FIELDS: &'static [&'static str] = &["username", "password"];

    pub fn empty() -> Self {
        Self {
            username: String::new(),
            errors: FormErrors::for_fields(Self::FIELDS),
        }
    }

    pub fn from_data(data: &SignupFormData) -> Self {
        Self {
            username: data.username.clone(),
            errors: FormErrors::for_fields(Self::FIELDS),
        }
    }

    pub fn validate(&mut self, password: &str) -> bool {
        if self.username.trim().is_empty() {
            self.errors.add("username", REQUIRED_FIELD);
        }
        if password.is_empty() {
            self.errors.add("password", REQUIRED_FIELD);
        }
        self.errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_fields_initializes_empty_lists() {
        let errors = FormErrors::for_fields(&["title", "text"]);
        assert!(errors.is_empty());
        assert_eq!(errors.fields.len(), 2);
        assert!(errors.fields["title"].is_empty());
    }

    #[test]
    fn test_add_records_error() {
        let mut errors = FormErrors::for_fields(&["slug"]);
        errors.add("slug", "занято");
        assert!(!errors.is_empty());
        assert_eq!(errors.fields["slug"], vec!["занято".to_string()]);
    }

    #[test]
    fn test_note_form_requires_title_and_text() {
        let mut form = NoteForm::from_data(&NoteFormData {
            title: String::new(),
            text: "Текст".to_string(),
            slug: String::new(),
        });
        assert!(!form.validate());
        assert_eq!(form.errors.fields["title"], vec![REQUIRED_FIELD.to_string()]);
        assert!(form.errors.fields["text"].is_empty());
    }

    #[test]
    fn test_note_form_slug_is_optional() {
        let mut form = NoteForm::from_data(&NoteFormData {
            title: "Заголовок".to_string(),
            text: "Текст".to_string(),
            slug: String::new(),
        });
        assert!(form.validate());
    }

    #[test]
    fn test_comment_form_requires_text() {
        let mut form = CommentForm::from_data(&CommentFormData {
            text: "  ".to_string(),
        });
        assert!(!form.validate());
    }
}
