//! Add/edit form rendering shared by every screen.

use client_core::{
    form::FormDraft, CandidateField, DepartmentField, EmployeeField, EntityScreen, ReferenceData,
    Resource,
};
use eframe::egui;
use shared::protocol::{CandidateDraft, CompanyDraft, DepartmentDraft, EmployeeDraft};

use crate::ui::theme;

/// Widget used to edit a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldInput {
    Text,
    Company,
    Department,
    Salary,
}

pub trait FormLayout: FormDraft {
    fn input(_field: Self::Field) -> FieldInput {
        FieldInput::Text
    }
}

impl FormLayout for CompanyDraft {}

impl FormLayout for DepartmentDraft {
    fn input(field: DepartmentField) -> FieldInput {
        match field {
            DepartmentField::Company => FieldInput::Company,
            DepartmentField::Name => FieldInput::Text,
        }
    }
}

impl FormLayout for EmployeeDraft {
    fn input(field: EmployeeField) -> FieldInput {
        match field {
            EmployeeField::Name => FieldInput::Text,
            EmployeeField::Company => FieldInput::Company,
            EmployeeField::Department => FieldInput::Department,
            EmployeeField::Salary => FieldInput::Salary,
        }
    }
}

impl FormLayout for CandidateDraft {
    fn input(field: CandidateField) -> FieldInput {
        match field {
            CandidateField::Company => FieldInput::Company,
            _ => FieldInput::Text,
        }
    }
}

/// `(value, label)` pair offered by a select.
pub type Choice = (String, String);

/// Options for a select input. `departments` overrides the department list,
/// e.g. with only the departments of the chosen company.
pub fn choices(input: FieldInput, refs: &ReferenceData, departments: Option<&[Choice]>) -> Vec<Choice> {
    match input {
        FieldInput::Text => Vec::new(),
        FieldInput::Company => refs
            .companies()
            .iter()
            .map(|c| (c.id.0.clone(), c.name.clone()))
            .collect(),
        FieldInput::Department => match departments {
            Some(departments) => departments.to_vec(),
            None => refs
                .departments()
                .iter()
                .map(|d| (d.id.0.clone(), d.name.clone()))
                .collect(),
        },
        FieldInput::Salary => {
            let mut salaries: Vec<_> = refs.salaries().iter().collect();
            salaries.sort_by(|a, b| a.amount.total_cmp(&b.amount));
            salaries
                .into_iter()
                .map(|s| (s.id.0.clone(), s.label()))
                .collect()
        }
    }
}

/// Label shown for the selected value. Ids that no longer resolve show as
/// Unknown.
pub fn selected_label<'a>(value: &str, choices: &'a [Choice]) -> &'a str {
    if value.trim().is_empty() {
        return "Select...";
    }
    choices
        .iter()
        .find(|(v, _)| v == value)
        .map_or(client_core::UNKNOWN, |(_, label)| label.as_str())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    None,
    Submit,
    Cancel,
}

pub fn show_form<R>(
    ui: &mut egui::Ui,
    screen: &mut EntityScreen<R>,
    departments: Option<&[Choice]>,
) -> FormAction
where
    R: Resource,
    R::Draft: FormLayout,
{
    let singular = R::KIND.singular();
    let editing = screen.editing().is_some();
    ui.heading(if editing {
        format!("Edit {singular}")
    } else {
        format!("Add {singular}")
    });

    egui::Grid::new((R::KIND.collection(), "form"))
        .num_columns(2)
        .spacing([12.0, 6.0])
        .show(ui, |ui| {
            for &field in <R::Draft as FormDraft>::FIELDS {
                ui.label(<R::Draft as FormDraft>::label(field));
                ui.vertical(|ui| {
                    match <R::Draft as FormLayout>::input(field) {
                        FieldInput::Text => text_input(ui, screen, field),
                        input => {
                            let options = choices(input, screen.refs(), departments);
                            select_input(ui, screen, field, &options);
                        }
                    }
                    if let Some(error) = screen.form().visible_error(field) {
                        ui.colored_label(theme::ERROR_TEXT, error);
                    }
                });
                ui.end_row();
            }
        });

    let mut action = FormAction::None;
    ui.horizontal(|ui| {
        let label = if editing { "Save" } else { "Add" };
        if ui
            .add_enabled(!screen.is_submitting(), egui::Button::new(label))
            .clicked()
        {
            action = FormAction::Submit;
        }
        if editing && ui.button("Cancel").clicked() {
            action = FormAction::Cancel;
        }
        if screen.is_submitting() {
            ui.spinner();
        }
    });
    action
}

fn text_input<R: Resource>(
    ui: &mut egui::Ui,
    screen: &mut EntityScreen<R>,
    field: <R::Draft as FormDraft>::Field,
) {
    let mut value = screen.form().value(field);
    let response = ui.text_edit_singleline(&mut value);
    if response.changed() {
        screen.set_field(field, value);
    }
    if response.lost_focus() {
        screen.blur(field);
    }
}

fn select_input<R: Resource>(
    ui: &mut egui::Ui,
    screen: &mut EntityScreen<R>,
    field: <R::Draft as FormDraft>::Field,
    options: &[Choice],
) {
    let current = screen.form().value(field);
    let mut picked = None;
    egui::ComboBox::from_id_salt((R::KIND.collection(), format!("{field:?}")))
        .selected_text(selected_label(&current, options))
        .show_ui(ui, |ui| {
            for (value, label) in options {
                if ui.selectable_label(*value == current, label.as_str()).clicked() {
                    picked = Some(value.clone());
                }
            }
        });
    if let Some(value) = picked {
        screen.set_field(field, value);
        screen.blur(field);
    }
}

#[cfg(test)]
#[path = "../tests/forms_tests.rs"]
mod tests;
