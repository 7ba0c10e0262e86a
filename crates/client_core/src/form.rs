//! Form state shared by every entity screen.
//!
//! A [`FormState`] wraps a draft and tracks which fields the user has
//! touched. Errors are recomputed on every change but only surface through
//! [`FormState::visible_error`] once the field has been touched, either by a
//! blur or by a submit attempt.

use std::{collections::HashSet, fmt::Debug, hash::Hash};

use once_cell::sync::Lazy;
use regex::Regex;

use crate::reference::ReferenceData;

static EMAIL: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok());

/// A draft editable through a form.
pub trait FormDraft: Clone + Debug + Default + Send + Sync + 'static {
    type Field: Copy + Eq + Hash + Debug + Send + Sync + 'static;

    /// Editable fields in display order.
    const FIELDS: &'static [Self::Field];

    fn label(field: Self::Field) -> &'static str;
    fn value(&self, field: Self::Field) -> String;
    fn set_value(&mut self, field: Self::Field, value: String);
    fn validate(&self, refs: &ReferenceData) -> FieldErrors<Self::Field>;

    /// Hook for dependent fields, run after `field` changes.
    fn on_change(&mut self, _field: Self::Field, _refs: &ReferenceData) {}
}

/// Validation failures keyed by field, at most one message per field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldErrors<F> {
    errors: Vec<(F, String)>,
}

impl<F> Default for FieldErrors<F> {
    fn default() -> Self {
        Self { errors: Vec::new() }
    }
}

impl<F: Copy + Eq> FieldErrors<F> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` unless `field` already has one.
    pub fn insert(&mut self, field: F, message: impl Into<String>) {
        if self.get(field).is_none() {
            self.errors.push((field, message.into()));
        }
    }

    pub fn get(&self, field: F) -> Option<&str> {
        self.errors
            .iter()
            .find(|(f, _)| *f == field)
            .map(|(_, m)| m.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn fields(&self) -> impl Iterator<Item = F> + '_ {
        self.errors.iter().map(|(f, _)| *f)
    }

    pub fn iter(&self) -> impl Iterator<Item = (F, &str)> + '_ {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// `"<Label> is required"` when `value` is empty after trimming.
pub fn require<F: Copy + Eq>(errors: &mut FieldErrors<F>, field: F, label: &str, value: &str) {
    if value.trim().is_empty() {
        errors.insert(field, format!("{label} is required"));
    }
}

/// Required, then `"Invalid email format"`.
pub fn require_email<F: Copy + Eq>(
    errors: &mut FieldErrors<F>,
    field: F,
    label: &str,
    value: &str,
) {
    require(errors, field, label, value);
    if errors.get(field).is_none() && !is_valid_email(value.trim()) {
        errors.insert(field, "Invalid email format");
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL.as_ref().map_or(true, |re| re.is_match(value))
}

#[derive(Debug, Clone)]
pub struct FormState<D: FormDraft> {
    draft: D,
    touched: HashSet<D::Field>,
    errors: FieldErrors<D::Field>,
}

impl<D: FormDraft> Default for FormState<D> {
    fn default() -> Self {
        Self::new(&ReferenceData::default())
    }
}

impl<D: FormDraft> FormState<D> {
    pub fn new(refs: &ReferenceData) -> Self {
        let draft = D::default();
        let errors = draft.validate(refs);
        Self {
            draft,
            touched: HashSet::new(),
            errors,
        }
    }

    pub fn draft(&self) -> &D {
        &self.draft
    }

    pub fn value(&self, field: D::Field) -> String {
        self.draft.value(field)
    }

    pub fn set(&mut self, field: D::Field, value: impl Into<String>, refs: &ReferenceData) {
        self.draft.set_value(field, value.into());
        self.draft.on_change(field, refs);
        self.revalidate(refs);
    }

    pub fn blur(&mut self, field: D::Field) {
        self.touched.insert(field);
    }

    pub fn touch_all(&mut self) {
        self.touched.extend(D::FIELDS.iter().copied());
    }

    pub fn is_touched(&self, field: D::Field) -> bool {
        self.touched.contains(&field)
    }

    pub fn errors(&self) -> &FieldErrors<D::Field> {
        &self.errors
    }

    pub fn error(&self, field: D::Field) -> Option<&str> {
        self.errors.get(field)
    }

    pub fn visible_error(&self, field: D::Field) -> Option<&str> {
        if self.is_touched(field) {
            self.error(field)
        } else {
            None
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn revalidate(&mut self, refs: &ReferenceData) {
        self.errors = self.draft.validate(refs);
    }

    pub fn reset(&mut self, refs: &ReferenceData) {
        *self = Self::new(refs);
    }

    /// Replaces the values with `draft`, e.g. when editing an existing row.
    pub fn load(&mut self, draft: D, refs: &ReferenceData) {
        self.draft = draft;
        self.touched.clear();
        self.revalidate(refs);
    }
}

#[cfg(test)]
#[path = "tests/form_tests.rs"]
mod tests;
