use super::*;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use shared::{
    domain::{Candidate, Company, EntityKind},
    protocol::{CandidateDraft, EmployeeDraft},
};

use crate::{
    api::HrApi,
    entities::{CandidateField, CompanyField, EmployeeField, EmployeeSort},
    fake_api::{Call, FakeApi, Op},
    list::SortDirection,
    reference::UNKNOWN,
    session::{execute, ScreenSession},
};

struct EmployeeFixture {
    api: Arc<FakeApi>,
    acme: Company,
    engineering: Department,
    finance: Department,
    low: shared::domain::Salary,
    high: shared::domain::Salary,
}

fn employee_fixture() -> EmployeeFixture {
    let api = Arc::new(FakeApi::new());
    let acme = api.seed_company("Acme");
    let globex = api.seed_company("Globex");
    let engineering = api.seed_department("Engineering", &acme);
    let finance = api.seed_department("Finance", &globex);
    let low = api.seed_salary(500.0);
    let high = api.seed_salary(900.0);
    EmployeeFixture {
        api,
        acme,
        engineering,
        finance,
        low,
        high,
    }
}

async fn mounted<R: Resource>(api: &Arc<FakeApi>) -> ScreenSession<R> {
    let mut session = ScreenSession::new(api.clone(), true);
    session.mount().await;
    api.clear_calls();
    session
}

fn fill_employee(screen: &mut EntityScreen<Employee>, fx: &EmployeeFixture, name: &str) {
    screen.set_field(EmployeeField::Name, name);
    screen.set_field(EmployeeField::Company, fx.acme.id.as_str());
    screen.set_field(EmployeeField::Department, fx.engineering.id.as_str());
    screen.set_field(EmployeeField::Salary, fx.low.id.as_str());
}

fn names<R: Resource>(screen: &EntityScreen<R>, name: impl Fn(&R) -> String) -> Vec<String> {
    screen.visible().into_iter().map(name).collect()
}

#[tokio::test]
async fn mount_loads_list_and_reference_tables() {
    let fx = employee_fixture();
    fx.api.seed_employee("Bob", &fx.engineering, &fx.low);

    let mut session: ScreenSession<Employee> = ScreenSession::new(fx.api.clone(), true);
    session.mount().await;

    let calls = fx.api.calls();
    assert_eq!(calls.len(), 4);
    for kind in [
        EntityKind::Employee,
        EntityKind::Company,
        EntityKind::Department,
        EntityKind::Salary,
    ] {
        assert!(calls.contains(&Call::List(kind)));
    }

    let screen = session.screen();
    assert!(!screen.is_loading());
    assert_eq!(screen.items().len(), 1);
    assert_eq!(
        screen.cells(&screen.items()[0]),
        vec!["Bob", "Acme", "Engineering", "$500"]
    );
}

#[tokio::test]
async fn each_empty_required_field_blocks_submit_for_that_field_only() {
    let fx = employee_fixture();
    let mut session: ScreenSession<Employee> = mounted(&fx.api).await;

    for &field in EmployeeDraft::FIELDS {
        let screen = session.screen_mut();
        screen.cancel_edit();
        fill_employee(screen, &fx, "Bob");
        screen.set_field(field, "");

        assert!(!session.submit().await);
        let errors: Vec<_> = session.screen().form().errors().fields().collect();
        assert_eq!(errors, vec![field], "only {field:?} should fail");
        assert!(session.screen().form().visible_error(field).is_some());
    }
    assert!(fx.api.calls().is_empty());
}

#[tokio::test]
async fn each_empty_candidate_field_blocks_submit() {
    let api = Arc::new(FakeApi::new());
    let acme = api.seed_company("Acme");
    let mut session: ScreenSession<Candidate> = mounted(&api).await;

    for &field in CandidateDraft::FIELDS {
        let screen = session.screen_mut();
        screen.cancel_edit();
        screen.set_field(CandidateField::FirstName, "Grace");
        screen.set_field(CandidateField::LastName, "Hopper");
        screen.set_field(CandidateField::Email, "grace@example.com");
        screen.set_field(CandidateField::Phone, "555-0100");
        screen.set_field(CandidateField::Position, "Engineer");
        screen.set_field(CandidateField::Company, acme.id.as_str());
        screen.set_field(field, " ");

        assert!(!session.submit().await);
        let errors: Vec<_> = session.screen().form().errors().fields().collect();
        assert_eq!(errors, vec![field]);
    }
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn create_issues_one_request_and_lists_the_record() {
    let api = Arc::new(FakeApi::new());
    let mut session: ScreenSession<Company> = mounted(&api).await;

    session.screen_mut().set_field(CompanyField::Name, "Acme");
    assert!(session.submit().await);

    assert_eq!(api.mutations(), vec![Call::Create(EntityKind::Company)]);
    let screen = session.screen();
    assert_eq!(screen.items().len(), 1);
    assert_eq!(screen.items()[0].name, "Acme");
    assert_eq!(
        screen.notice(),
        Some(&Notice::success("Company \"Acme\" added"))
    );
    assert_eq!(screen.form().value(CompanyField::Name), "");
    assert!(screen.editing().is_none());
    assert!(!screen.is_submitting());
}

#[tokio::test]
async fn submit_while_saving_sends_nothing() {
    let api = Arc::new(FakeApi::new());
    let mut screen: EntityScreen<Company> = EntityScreen::new(true);
    let load = screen.mount();
    screen.apply(execute(&*api, load).await);

    screen.set_field(CompanyField::Name, "Acme");
    let first = screen.submit().expect("create request");
    assert!(screen.is_submitting());
    assert!(screen.submit().is_none());

    screen.apply(execute(&*api, first).await);
    assert!(!screen.is_submitting());
    assert_eq!(api.mutations(), vec![Call::Create(EntityKind::Company)]);
    assert_eq!(screen.items().len(), 1);
}

#[tokio::test]
async fn confirmed_mutation_patches_then_reconciles() {
    let api = Arc::new(FakeApi::new());
    let mut session: ScreenSession<Company> = mounted(&api).await;

    session.screen_mut().set_field(CompanyField::Name, "Acme");
    assert!(session.submit().await);

    assert_eq!(
        api.calls(),
        vec![
            Call::Create(EntityKind::Company),
            Call::List(EntityKind::Company),
        ]
    );
}

#[tokio::test]
async fn edit_and_submit_updates_that_id_only() {
    let fx = employee_fixture();
    let bob = fx.api.seed_employee("Bob", &fx.engineering, &fx.low);
    fx.api.seed_employee("Ann", &fx.engineering, &fx.high);
    let mut session: ScreenSession<Employee> = mounted(&fx.api).await;

    assert!(session.screen_mut().edit_id(&bob.id));
    assert_eq!(session.screen().editing(), Some(&bob.id));
    assert_eq!(session.screen().form().value(EmployeeField::Name), "Bob");

    session.screen_mut().set_field(EmployeeField::Name, "Robert");
    assert!(session.submit().await);

    assert_eq!(
        fx.api.mutations(),
        vec![Call::Update(EntityKind::Employee, bob.id.0.clone())]
    );
    let screen = session.screen();
    assert!(screen.editing().is_none());
    assert_eq!(screen.items().len(), 2);
    let updated = screen
        .items()
        .iter()
        .find(|e| e.id == bob.id)
        .expect("bob still listed");
    assert_eq!(updated.name, "Robert");
    assert_eq!(screen.notice(), Some(&Notice::success("Employee updated")));
}

#[tokio::test]
async fn delete_requires_confirmation_and_removes_exactly_that_id() {
    let api = Arc::new(FakeApi::new());
    let acme = api.seed_company("Acme");
    let globex = api.seed_company("Globex");
    let mut session: ScreenSession<Company> = mounted(&api).await;

    assert!(session.screen_mut().request_delete(acme.id.clone()).is_none());
    assert_eq!(session.screen().pending_delete(), Some(&acme.id));
    assert!(api.calls().is_empty());

    assert!(session.confirm_delete().await);
    assert_eq!(
        api.mutations(),
        vec![Call::Delete(EntityKind::Company, acme.id.0.clone())]
    );
    let ids: Vec<_> = session.screen().items().iter().map(|c| c.id.clone()).collect();
    assert_eq!(ids, vec![globex.id]);
    assert!(session.screen().pending_delete().is_none());
}

#[tokio::test]
async fn cancel_delete_sends_nothing() {
    let api = Arc::new(FakeApi::new());
    let acme = api.seed_company("Acme");
    let mut session: ScreenSession<Company> = mounted(&api).await;

    session.screen_mut().request_delete(acme.id.clone());
    session.screen_mut().cancel_delete();
    assert!(!session.confirm_delete().await);
    assert!(api.calls().is_empty());
    assert_eq!(session.screen().items().len(), 1);
}

#[tokio::test]
async fn deleting_the_edited_record_clears_the_edit_target() {
    let api = Arc::new(FakeApi::new());
    let acme = api.seed_company("Acme");
    let mut session: ScreenSession<Company> = mounted(&api).await;

    assert!(session.screen_mut().edit_id(&acme.id));
    session.delete(acme.id.clone()).await;

    assert!(session.screen().editing().is_none());
    assert_eq!(session.screen().form().value(CompanyField::Name), "");
    assert_eq!(session.screen().notice(), Some(&Notice::success("Company deleted")));
}

#[tokio::test]
async fn unconfirmed_screens_delete_immediately() {
    let api = Arc::new(FakeApi::new());
    let acme = api.seed_company("Acme");
    let mut session: ScreenSession<Company> = ScreenSession::new(api.clone(), false);
    session.mount().await;
    api.clear_calls();

    let request = session.screen_mut().request_delete(acme.id.clone());
    assert!(matches!(request, Some(Request::Delete { .. })));
}

#[tokio::test]
async fn failed_delete_leaves_list_unchanged() {
    let api = Arc::new(FakeApi::new());
    let acme = api.seed_company("Acme");
    let mut session: ScreenSession<Company> = mounted(&api).await;
    api.set_failing(Op::Delete, true);

    session.delete(acme.id.clone()).await;

    assert_eq!(session.screen().items().len(), 1);
    assert_eq!(
        session.screen().notice(),
        Some(&Notice::failure("Failed to delete company"))
    );
}

#[tokio::test]
async fn search_is_case_insensitive_and_clearing_restores() {
    let api = Arc::new(FakeApi::new());
    api.seed_company("Acme");
    api.seed_company("Globex");
    api.seed_company("Acme Labs");
    let mut session: ScreenSession<Company> = mounted(&api).await;
    let screen = session.screen_mut();

    screen.set_search("aCmE");
    assert_eq!(names(screen, |c| c.name.clone()), vec!["Acme", "Acme Labs"]);

    screen.set_search("   ");
    assert_eq!(names(screen, |c| c.name.clone()).len(), 3);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn sorting_same_field_twice_toggles_direction() {
    let fx = employee_fixture();
    fx.api.seed_employee("Bob", &fx.engineering, &fx.low);
    fx.api.seed_employee("Ann", &fx.engineering, &fx.high);
    let mut session: ScreenSession<Employee> = mounted(&fx.api).await;
    let screen = session.screen_mut();

    screen.sort_by(EmployeeSort::Name);
    assert_eq!(
        screen.sort().map(|s| s.direction),
        Some(SortDirection::Ascending)
    );
    assert_eq!(names(screen, |e| e.name.clone()), vec!["Ann", "Bob"]);

    screen.sort_by(EmployeeSort::Name);
    assert_eq!(
        screen.sort().map(|s| s.direction),
        Some(SortDirection::Descending)
    );
    assert_eq!(names(screen, |e| e.name.clone()), vec!["Bob", "Ann"]);

    screen.sort_by(EmployeeSort::Salary);
    assert_eq!(
        screen.sort().map(|s| s.direction),
        Some(SortDirection::Ascending)
    );
    assert_eq!(names(screen, |e| e.name.clone()), vec!["Bob", "Ann"]);
}

#[tokio::test]
async fn failed_load_keeps_previous_state() {
    let api = Arc::new(FakeApi::new());
    api.seed_company("Acme");
    let mut session: ScreenSession<Company> = mounted(&api).await;
    api.seed_company("Globex");
    api.set_failing(Op::List, true);

    session.load_all().await;

    let screen = session.screen();
    assert_eq!(screen.items().len(), 1);
    assert!(!screen.is_loading());
    assert_eq!(
        screen.notice(),
        Some(&Notice::failure("Failed to load companies"))
    );
}

#[tokio::test]
async fn failed_reconcile_keeps_patched_list_and_success_notice() {
    let api = Arc::new(FakeApi::new());
    let mut session: ScreenSession<Company> = mounted(&api).await;
    api.set_failing(Op::List, true);

    session.screen_mut().set_field(CompanyField::Name, "Acme");
    assert!(session.submit().await);

    assert_eq!(session.screen().items().len(), 1);
    assert_eq!(
        session.screen().notice(),
        Some(&Notice::success("Company \"Acme\" added"))
    );
}

#[tokio::test]
async fn failed_create_keeps_form_contents() {
    let api = Arc::new(FakeApi::new());
    let mut session: ScreenSession<Company> = mounted(&api).await;
    api.set_failing(Op::Create, true);

    session.screen_mut().set_field(CompanyField::Name, "Acme");
    assert!(session.submit().await);

    let screen = session.screen();
    assert!(screen.items().is_empty());
    assert_eq!(screen.form().value(CompanyField::Name), "Acme");
    assert_eq!(
        screen.notice(),
        Some(&Notice::failure("Failed to add company"))
    );

    session.screen_mut().dismiss_notice();
    assert!(session.screen().notice().is_none());
}

#[tokio::test]
async fn outcomes_after_unmount_are_ignored() {
    let api = Arc::new(FakeApi::new());
    api.seed_company("Acme");
    let mut screen: EntityScreen<Company> = EntityScreen::new(true);

    let request = screen.mount();
    screen.unmount();
    let outcome = execute(&*api, request).await;

    assert!(screen.apply(outcome).is_none());
    assert!(screen.items().is_empty());
    assert!(!screen.is_mounted());
}

#[tokio::test]
async fn remount_ignores_outcomes_of_the_previous_mount() {
    let api = Arc::new(FakeApi::new());
    api.seed_company("Acme");
    let mut screen: EntityScreen<Company> = EntityScreen::new(true);

    let stale = screen.mount();
    screen.unmount();
    let fresh = screen.mount();
    assert!(fresh.generation() > stale.generation());

    let stale_outcome = execute(&*api, stale).await;
    assert!(screen.apply(stale_outcome).is_none());
    assert!(screen.is_loading());

    let fresh_outcome = execute(&*api, fresh).await;
    screen.apply(fresh_outcome);
    assert_eq!(screen.items().len(), 1);
}

#[tokio::test]
async fn dangling_foreign_keys_render_unknown() {
    let api = Arc::new(FakeApi::new());
    let acme = api.seed_company("Acme");
    let ops = api.seed_department("Ops", &acme);
    api.delete_company(&acme.id).await.expect("delete acme");
    let mut session: ScreenSession<Department> = mounted(&api).await;

    let screen = session.screen_mut();
    let row = screen
        .items()
        .iter()
        .find(|d| d.id == ops.id)
        .cloned()
        .expect("ops listed");
    assert_eq!(screen.cells(&row), vec!["Ops".to_string(), UNKNOWN.to_string()]);
}

#[tokio::test]
async fn employee_department_choices_follow_company() {
    let fx = employee_fixture();
    let mut session: ScreenSession<Employee> = mounted(&fx.api).await;
    let screen = session.screen_mut();

    assert_eq!(screen.department_choices().len(), 2);

    screen.set_field(EmployeeField::Company, fx.acme.id.as_str());
    let choices: Vec<_> = screen
        .department_choices()
        .into_iter()
        .map(|d| d.id.clone())
        .collect();
    assert_eq!(choices, vec![fx.engineering.id.clone()]);

    screen.set_field(EmployeeField::Department, fx.engineering.id.as_str());
    screen.set_field(EmployeeField::Company, fx.finance.company_id.as_str());
    assert_eq!(screen.form().value(EmployeeField::Department), "");
}

#[tokio::test]
async fn candidate_applied_at_is_stamped_on_create_and_kept_on_edit() {
    let api = Arc::new(FakeApi::new());
    let acme = api.seed_company("Acme");
    let applied = Utc
        .with_ymd_and_hms(2023, 6, 1, 12, 0, 0)
        .single()
        .expect("date");
    let grace = api.seed_candidate("Grace", "Hopper", "Engineer", &acme, applied);
    let mut session: ScreenSession<Candidate> = mounted(&api).await;

    assert!(session.screen_mut().edit_id(&grace.id));
    session
        .screen_mut()
        .set_field(CandidateField::Position, "Admiral");
    assert!(session.submit().await);
    let stored = api
        .candidates()
        .into_iter()
        .find(|c| c.id == grace.id)
        .expect("grace");
    assert_eq!(stored.applied_at, applied);
    assert_eq!(stored.position, "Admiral");

    let before = Utc::now();
    let screen = session.screen_mut();
    screen.set_field(CandidateField::FirstName, "Ada");
    screen.set_field(CandidateField::LastName, "Lovelace");
    screen.set_field(CandidateField::Email, "ada@example.com");
    screen.set_field(CandidateField::Phone, "555-0199");
    screen.set_field(CandidateField::Position, "Analyst");
    screen.set_field(CandidateField::Company, acme.id.as_str());
    assert!(session.submit().await);

    let ada = api
        .candidates()
        .into_iter()
        .find(|c| c.first_name == "Ada")
        .expect("ada created");
    assert!(ada.applied_at >= before);
    assert_eq!(
        session.screen().notice(),
        Some(&Notice::success("Candidate \"Ada Lovelace\" added"))
    );
}

#[tokio::test]
async fn employee_create_sends_foreign_keys_only() {
    let fx = employee_fixture();
    let mut session: ScreenSession<Employee> = mounted(&fx.api).await;

    fill_employee(session.screen_mut(), &fx, "Bob");
    assert!(session.submit().await);

    let stored = fx.api.employees();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].company_id, fx.acme.id);
    assert_eq!(stored[0].department_id, fx.engineering.id);
    assert_eq!(stored[0].salary_id, fx.low.id);
    assert_eq!(fx.api.mutations(), vec![Call::Create(EntityKind::Employee)]);
}
