use super::*;
use shared::domain::{Company, Department, Salary};

fn refs() -> ReferenceData {
    ReferenceData::new(
        vec![Company {
            id: CompanyId::new("c1"),
            name: "Acme".into(),
        }],
        vec![Department {
            id: DepartmentId::new("d1"),
            name: "Engineering".into(),
            company_id: CompanyId::new("c1"),
        }],
        vec![Salary {
            id: SalaryId::new("s1"),
            amount: 500.0,
        }],
    )
}

#[test]
fn foreign_keys_resolve_by_id_or_display_value() {
    let refs = refs();
    assert_eq!(FieldValue::Company("c1".into()).resolve(&refs), "c1");
    assert_eq!(FieldValue::Company("acme".into()).resolve(&refs), "c1");
    assert_eq!(
        FieldValue::Department("Engineering".into()).resolve(&refs),
        "d1"
    );
    assert_eq!(FieldValue::Salary("$500".into()).resolve(&refs), "s1");
    assert_eq!(FieldValue::Salary("s1".into()).resolve(&refs), "s1");
}

#[test]
fn unresolved_values_pass_through() {
    let refs = refs();
    assert_eq!(FieldValue::Company("Initech".into()).resolve(&refs), "Initech");
    assert_eq!(FieldValue::Salary("750".into()).resolve(&refs), "750");
    assert_eq!(FieldValue::Text(" x ".into()).resolve(&refs), " x ");
}

#[test]
fn only_set_flags_become_assignments() {
    let args = EmployeeArgs {
        name: Some("Bob".into()),
        department: Some("d1".into()),
        ..EmployeeArgs::default()
    };
    assert_eq!(
        args.assignments(),
        vec![
            (EmployeeField::Name, FieldValue::Text("Bob".into())),
            (EmployeeField::Department, FieldValue::Department("d1".into())),
        ]
    );
}

#[test]
fn company_is_assigned_before_department() {
    let args = EmployeeArgs {
        department: Some("d1".into()),
        company: Some("c1".into()),
        ..EmployeeArgs::default()
    };
    let fields: Vec<_> = args.assignments().into_iter().map(|(f, _)| f).collect();
    assert_eq!(fields, vec![EmployeeField::Company, EmployeeField::Department]);
}
