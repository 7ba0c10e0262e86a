use super::*;
use crate::entities::{CandidateField, CompanyField, EmployeeField};
use shared::{
    domain::{Salary, SalaryId},
    protocol::{CandidateDraft, CompanyDraft, EmployeeDraft},
};

#[test]
fn errors_are_hidden_until_touched() {
    let refs = ReferenceData::default();
    let mut form: FormState<CompanyDraft> = FormState::new(&refs);

    assert_eq!(form.error(CompanyField::Name), Some("Name is required"));
    assert_eq!(form.visible_error(CompanyField::Name), None);

    form.blur(CompanyField::Name);
    assert_eq!(
        form.visible_error(CompanyField::Name),
        Some("Name is required")
    );

    form.set(CompanyField::Name, "Acme", &refs);
    assert!(form.is_valid());
    assert_eq!(form.visible_error(CompanyField::Name), None);
}

#[test]
fn whitespace_only_counts_as_empty() {
    let refs = ReferenceData::default();
    let mut form: FormState<CompanyDraft> = FormState::new(&refs);
    form.set(CompanyField::Name, "   ", &refs);
    assert_eq!(form.error(CompanyField::Name), Some("Name is required"));
}

#[test]
fn touch_all_reveals_every_error() {
    let refs = ReferenceData::default();
    let mut form: FormState<CandidateDraft> = FormState::new(&refs);
    form.touch_all();
    let visible: Vec<_> = CandidateDraft::FIELDS
        .iter()
        .filter_map(|&field| form.visible_error(field))
        .collect();
    assert_eq!(
        visible,
        vec![
            "First name is required",
            "Last name is required",
            "Email is required",
            "Phone number is required",
            "Position is required",
            "Company is required",
        ]
    );
}

#[test]
fn email_format_is_checked_after_presence() {
    let refs = ReferenceData::default();
    let mut form: FormState<CandidateDraft> = FormState::new(&refs);
    form.set(CandidateField::Email, "grace.example.com", &refs);
    assert_eq!(
        form.error(CandidateField::Email),
        Some("Invalid email format")
    );
    form.set(CandidateField::Email, "grace@example.com", &refs);
    assert_eq!(form.error(CandidateField::Email), None);
}

#[test]
fn salary_must_resolve_to_positive_amount() {
    let refs = ReferenceData::new(
        Vec::new(),
        Vec::new(),
        vec![
            Salary {
                id: SalaryId::new("zero"),
                amount: 0.0,
            },
            Salary {
                id: SalaryId::new("ok"),
                amount: 500.0,
            },
        ],
    );
    let mut form: FormState<EmployeeDraft> = FormState::new(&refs);
    form.set(EmployeeField::Salary, "zero", &refs);
    assert_eq!(
        form.error(EmployeeField::Salary),
        Some("Salary must be positive")
    );
    form.set(EmployeeField::Salary, "ok", &refs);
    assert_eq!(form.error(EmployeeField::Salary), None);
}

#[test]
fn load_replaces_values_and_clears_touched() {
    let refs = ReferenceData::default();
    let mut form: FormState<CompanyDraft> = FormState::new(&refs);
    form.touch_all();
    form.load(
        CompanyDraft {
            name: "Globex".into(),
        },
        &refs,
    );
    assert_eq!(form.value(CompanyField::Name), "Globex");
    assert!(!form.is_touched(CompanyField::Name));
    assert!(form.is_valid());

    form.reset(&refs);
    assert_eq!(form.value(CompanyField::Name), "");
}

#[test]
fn field_errors_keep_first_message_per_field() {
    let mut errors = FieldErrors::new();
    errors.insert(CompanyField::Name, "first");
    errors.insert(CompanyField::Name, "second");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.get(CompanyField::Name), Some("first"));
}
