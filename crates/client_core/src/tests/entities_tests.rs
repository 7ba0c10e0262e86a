use super::*;
use crate::list::{ListView, SortDirection};
use chrono::TimeZone;
use shared::domain::Salary;

fn refs() -> ReferenceData {
    ReferenceData::new(
        vec![
            Company {
                id: CompanyId::new("c1"),
                name: "Acme".into(),
            },
            Company {
                id: CompanyId::new("c2"),
                name: "Globex".into(),
            },
        ],
        vec![
            Department {
                id: DepartmentId::new("d1"),
                name: "Engineering".into(),
                company_id: CompanyId::new("c1"),
            },
            Department {
                id: DepartmentId::new("d2"),
                name: "Finance".into(),
                company_id: CompanyId::new("c2"),
            },
        ],
        vec![
            Salary {
                id: SalaryId::new("s500"),
                amount: 500.0,
            },
            Salary {
                id: SalaryId::new("s900"),
                amount: 900.0,
            },
        ],
    )
}

fn employee(id: &str, name: &str, department: &str, salary: &str) -> Employee {
    Employee {
        id: EmployeeId::new(id),
        name: name.into(),
        company_id: CompanyId::new("c1"),
        department_id: DepartmentId::new(department),
        salary_id: SalaryId::new(salary),
    }
}

#[test]
fn sort_fields_parse_from_cli_tokens() {
    assert_eq!(CandidateSort::parse("applied-at"), Some(CandidateSort::AppliedAt));
    assert_eq!(CandidateSort::parse("Last_Name"), Some(CandidateSort::LastName));
    assert_eq!(EmployeeSort::parse("salary"), Some(EmployeeSort::Salary));
    assert_eq!(CompanySort::parse("salary"), None);
}

#[test]
fn employee_cells_resolve_names_and_unknowns() {
    let refs = refs();
    let known = employee("e1", "Bob", "d1", "s500");
    assert_eq!(
        known.cells(&refs),
        vec!["Bob", "Acme", "Engineering", "$500"]
    );

    let dangling = Employee {
        company_id: CompanyId::new("gone"),
        ..employee("e2", "Ann", "gone", "gone")
    };
    assert_eq!(
        dangling.cells(&refs),
        vec!["Ann", "Unknown", "Unknown", "Unknown"]
    );
}

#[test]
fn bob_and_ann_sort_by_name_and_salary() {
    let refs = refs();
    let items = vec![
        employee("e1", "Bob", "d1", "s500"),
        employee("e2", "Ann", "d1", "s900"),
    ];
    let mut view: ListView<EmployeeSort> = ListView::default();

    view.sort_by(EmployeeSort::Name);
    let names: Vec<_> = view
        .apply(&items, &refs)
        .into_iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["Ann", "Bob"]);

    view.sort_by(EmployeeSort::Salary);
    let names: Vec<_> = view
        .apply(&items, &refs)
        .into_iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["Bob", "Ann"]);
}

#[test]
fn unknown_salary_sorts_first_ascending() {
    let refs = refs();
    let items = vec![
        employee("e1", "Bob", "d1", "s900"),
        employee("e2", "Cat", "d1", "missing"),
    ];
    let mut view: ListView<EmployeeSort> = ListView::default();
    view.set_sort(EmployeeSort::Salary, SortDirection::Ascending);
    let names: Vec<_> = view
        .apply(&items, &refs)
        .into_iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["Cat", "Bob"]);
}

#[test]
fn employee_search_matches_department_name() {
    let refs = refs();
    let items = vec![
        employee("e1", "Bob", "d1", "s500"),
        employee("e2", "Ann", "d2", "s900"),
    ];
    let mut view: ListView<EmployeeSort> = ListView::default();
    view.set_search("FINANCE");
    let names: Vec<_> = view
        .apply(&items, &refs)
        .into_iter()
        .map(|e| e.name.as_str())
        .collect();
    assert_eq!(names, vec!["Ann"]);
}

#[test]
fn changing_company_clears_foreign_department() {
    let refs = refs();
    let mut draft = EmployeeDraft {
        name: "Bob".into(),
        company_id: CompanyId::new("c1"),
        department_id: DepartmentId::new("d1"),
        salary_id: SalaryId::new("s500"),
    };

    draft.set_value(EmployeeField::Company, "c1".into());
    draft.on_change(EmployeeField::Company, &refs);
    assert_eq!(draft.department_id, DepartmentId::new("d1"));

    draft.set_value(EmployeeField::Company, "c2".into());
    draft.on_change(EmployeeField::Company, &refs);
    assert!(draft.department_id.is_blank());
}

#[test]
fn candidates_sort_chronologically_and_stamp_on_create() {
    let refs = refs();
    let early = Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).single().expect("date");
    let late = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).single().expect("date");
    let base = Candidate {
        id: CandidateId::new("k1"),
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        email: "grace@example.com".into(),
        phone: "555-0100".into(),
        position: "Engineer".into(),
        company_id: CompanyId::new("c1"),
        applied_at: late,
    };
    let other = Candidate {
        id: CandidateId::new("k2"),
        applied_at: early,
        ..base.clone()
    };
    assert_eq!(
        base.compare(&other, CandidateSort::AppliedAt, &refs),
        Ordering::Greater
    );

    let mut draft = base.draft();
    Candidate::prepare_create(&mut draft);
    assert!(draft.applied_at > late);
}

#[test]
fn candidate_search_covers_name_email_and_position_only() {
    let refs = refs();
    let grace = Candidate {
        id: CandidateId::new("k1"),
        first_name: "Grace".into(),
        last_name: "Hopper".into(),
        email: "grace@example.com".into(),
        phone: "555-0100".into(),
        position: "Engineer".into(),
        company_id: CompanyId::new("c1"),
        applied_at: Utc.with_ymd_and_hms(2024, 1, 5, 9, 0, 0).single().expect("date"),
    };
    let items = vec![grace];
    let mut view: ListView<CandidateSort> = ListView::default();

    for term in ["hopper", "EXAMPLE.COM", "engineer"] {
        view.set_search(term);
        assert_eq!(view.apply(&items, &refs).len(), 1, "{term} should match");
    }
    for term in ["555-0100", "Acme"] {
        view.set_search(term);
        assert!(view.apply(&items, &refs).is_empty(), "{term} is not searchable");
    }
}
