//! The generic list/form screen.
//!
//! [`EntityScreen`] never performs I/O. Operations that need the network
//! hand back a [`Request`]; the caller runs it (see
//! [`crate::session::execute`]) and feeds the resulting [`Outcome`] into
//! [`EntityScreen::apply`]. Every request is stamped with the screen's mount
//! generation, and outcomes from an older generation are dropped.

use shared::domain::{Department, Employee};
use tracing::{debug, error, info, warn};

use crate::{
    error::ClientError,
    form::{FormDraft, FormState},
    list::{ListView, SortState},
    reference::ReferenceData,
    resource::{title_case, Resource},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Failure,
}

/// Transient message shown after an operation finishes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Failure,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub enum Request<R: Resource> {
    Load { generation: u64, reconcile: bool },
    Create { generation: u64, draft: R::Draft },
    Update { generation: u64, id: R::Id, draft: R::Draft },
    Delete { generation: u64, id: R::Id },
}

impl<R: Resource> Request<R> {
    pub fn generation(&self) -> u64 {
        match self {
            Request::Load { generation, .. }
            | Request::Create { generation, .. }
            | Request::Update { generation, .. }
            | Request::Delete { generation, .. } => *generation,
        }
    }
}

pub type Loaded<R> = (Vec<R>, ReferenceData);

#[derive(Debug, Clone)]
pub enum Outcome<R: Resource> {
    Loaded {
        generation: u64,
        reconcile: bool,
        result: Result<Loaded<R>, ClientError>,
    },
    Created {
        generation: u64,
        result: Result<R, ClientError>,
    },
    Updated {
        generation: u64,
        id: R::Id,
        result: Result<R, ClientError>,
    },
    Deleted {
        generation: u64,
        id: R::Id,
        result: Result<(), ClientError>,
    },
}

impl<R: Resource> Outcome<R> {
    pub fn generation(&self) -> u64 {
        match self {
            Outcome::Loaded { generation, .. }
            | Outcome::Created { generation, .. }
            | Outcome::Updated { generation, .. }
            | Outcome::Deleted { generation, .. } => *generation,
        }
    }
}

#[derive(Debug, Clone)]
pub struct EntityScreen<R: Resource> {
    items: Vec<R>,
    refs: ReferenceData,
    form: FormState<R::Draft>,
    editing: Option<R::Id>,
    view: ListView<R::Sort>,
    pending_delete: Option<R::Id>,
    notice: Option<Notice>,
    generation: u64,
    mounted: bool,
    loading: bool,
    submitting: bool,
    confirm_deletes: bool,
}

impl<R: Resource> Default for EntityScreen<R> {
    fn default() -> Self {
        Self::new(true)
    }
}

impl<R: Resource> EntityScreen<R> {
    /// With `confirm_deletes` off, [`EntityScreen::request_delete`] issues
    /// the delete immediately.
    pub fn new(confirm_deletes: bool) -> Self {
        Self {
            items: Vec::new(),
            refs: ReferenceData::default(),
            form: FormState::default(),
            editing: None,
            view: ListView::default(),
            pending_delete: None,
            notice: None,
            generation: 0,
            mounted: false,
            loading: false,
            submitting: false,
            confirm_deletes,
        }
    }

    pub fn mount(&mut self) -> Request<R> {
        self.generation += 1;
        self.mounted = true;
        debug!(entity = R::KIND.collection(), generation = self.generation, "mounted");
        self.load_all()
    }

    /// Invalidates everything in flight; late outcomes are ignored.
    pub fn unmount(&mut self) {
        self.generation += 1;
        self.mounted = false;
        self.loading = false;
        self.submitting = false;
        self.pending_delete = None;
    }

    pub fn load_all(&mut self) -> Request<R> {
        self.loading = true;
        Request::Load {
            generation: self.generation,
            reconcile: false,
        }
    }

    fn reconcile(&self) -> Request<R> {
        Request::Load {
            generation: self.generation,
            reconcile: true,
        }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn items(&self) -> &[R] {
        &self.items
    }

    pub fn refs(&self) -> &ReferenceData {
        &self.refs
    }

    pub fn form(&self) -> &FormState<R::Draft> {
        &self.form
    }

    pub fn editing(&self) -> Option<&R::Id> {
        self.editing.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    pub fn set_field(&mut self, field: <R::Draft as FormDraft>::Field, value: impl Into<String>) {
        self.form.set(field, value, &self.refs);
    }

    pub fn blur(&mut self, field: <R::Draft as FormDraft>::Field) {
        self.form.blur(field);
    }

    /// Validates the form and, when it passes, returns the create or update
    /// request. On failure every field is marked touched and nothing is sent.
    /// Nothing is sent either while an earlier submit is still in flight.
    pub fn submit(&mut self) -> Option<Request<R>> {
        if self.submitting {
            debug!(entity = R::KIND.collection(), "submit ignored; save already in flight");
            return None;
        }
        self.form.revalidate(&self.refs);
        if !self.form.is_valid() {
            self.form.touch_all();
            debug!(
                entity = R::KIND.collection(),
                errors = self.form.errors().len(),
                "submit blocked by validation"
            );
            return None;
        }

        let mut draft = self.form.draft().clone();
        self.submitting = true;
        let generation = self.generation;
        Some(match &self.editing {
            Some(id) => Request::Update {
                generation,
                id: id.clone(),
                draft,
            },
            None => {
                R::prepare_create(&mut draft);
                Request::Create { generation, draft }
            }
        })
    }

    pub fn edit(&mut self, record: &R) {
        self.form.load(record.draft(), &self.refs);
        self.editing = Some(record.id().clone());
    }

    /// Edits the listed record with `id`; false when it is not loaded.
    pub fn edit_id(&mut self, id: &R::Id) -> bool {
        match self.items.iter().find(|item| item.id() == id).cloned() {
            Some(record) => {
                self.edit(&record);
                true
            }
            None => false,
        }
    }

    pub fn cancel_edit(&mut self) {
        self.form.reset(&self.refs);
        self.editing = None;
    }

    pub fn pending_delete(&self) -> Option<&R::Id> {
        self.pending_delete.as_ref()
    }

    pub fn request_delete(&mut self, id: R::Id) -> Option<Request<R>> {
        if self.confirm_deletes {
            self.pending_delete = Some(id);
            None
        } else {
            Some(Request::Delete {
                generation: self.generation,
                id,
            })
        }
    }

    pub fn confirm_delete(&mut self) -> Option<Request<R>> {
        let id = self.pending_delete.take()?;
        Some(Request::Delete {
            generation: self.generation,
            id,
        })
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn search(&self) -> &str {
        self.view.search()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.view.set_search(term);
    }

    pub fn sort(&self) -> Option<SortState<R::Sort>> {
        self.view.sort()
    }

    pub fn sort_by(&mut self, field: R::Sort) {
        self.view.sort_by(field);
    }

    pub fn view_mut(&mut self) -> &mut ListView<R::Sort> {
        &mut self.view
    }

    /// Filtered, sorted rows for display.
    pub fn visible(&self) -> Vec<&R> {
        self.view.apply(&self.items, &self.refs)
    }

    pub fn cells(&self, record: &R) -> Vec<String> {
        record.cells(&self.refs)
    }

    /// Folds a finished request back into the screen. A confirmed mutation
    /// patches the list at once and returns a background reload to
    /// reconcile with the server.
    pub fn apply(&mut self, outcome: Outcome<R>) -> Option<Request<R>> {
        let entity = R::KIND.collection();
        if outcome.generation() != self.generation {
            debug!(
                entity,
                stale = outcome.generation(),
                current = self.generation,
                "discarding outcome from previous mount"
            );
            return None;
        }

        match outcome {
            Outcome::Loaded {
                reconcile, result, ..
            } => {
                self.loading = false;
                match result {
                    Ok((items, refs)) => {
                        info!(entity, count = items.len(), reconcile, "list loaded");
                        self.items = items;
                        self.refs = refs;
                        self.form.revalidate(&self.refs);
                    }
                    Err(err) if reconcile => {
                        warn!(entity, %err, "background refresh failed; keeping local list");
                    }
                    Err(err) => {
                        error!(entity, %err, "failed to load");
                        self.notice = Some(Notice::failure(format!("Failed to load {entity}")));
                    }
                }
                None
            }
            Outcome::Created { result, .. } => {
                self.submitting = false;
                match result {
                    Ok(record) => {
                        info!(entity, id = %record.id(), "created");
                        self.notice = Some(Notice::success(format!(
                            "{} \"{}\" added",
                            title_case(R::KIND.singular()),
                            record.display_name()
                        )));
                        self.upsert(record);
                        if self.editing.is_none() {
                            self.form.reset(&self.refs);
                        }
                        Some(self.reconcile())
                    }
                    Err(err) => {
                        error!(entity, %err, "failed to create");
                        self.notice = Some(Notice::failure(format!(
                            "Failed to add {}",
                            R::KIND.singular()
                        )));
                        None
                    }
                }
            }
            Outcome::Updated { id, result, .. } => {
                self.submitting = false;
                match result {
                    Ok(record) => {
                        info!(entity, %id, "updated");
                        self.upsert(record);
                        if self.editing.as_ref() == Some(&id) {
                            self.cancel_edit();
                        }
                        self.notice = Some(Notice::success(format!(
                            "{} updated",
                            title_case(R::KIND.singular())
                        )));
                        Some(self.reconcile())
                    }
                    Err(err) => {
                        error!(entity, %id, %err, "failed to update");
                        self.notice = Some(Notice::failure(format!(
                            "Failed to update {}",
                            R::KIND.singular()
                        )));
                        None
                    }
                }
            }
            Outcome::Deleted { id, result, .. } => match result {
                Ok(()) => {
                    info!(entity, %id, "deleted");
                    self.items.retain(|item| item.id() != &id);
                    if self.editing.as_ref() == Some(&id) {
                        self.cancel_edit();
                    }
                    if self.pending_delete.as_ref() == Some(&id) {
                        self.pending_delete = None;
                    }
                    self.notice = Some(Notice::success(format!(
                        "{} deleted",
                        title_case(R::KIND.singular())
                    )));
                    Some(self.reconcile())
                }
                Err(err) => {
                    error!(entity, %id, %err, "failed to delete");
                    self.notice = Some(Notice::failure(format!(
                        "Failed to delete {}",
                        R::KIND.singular()
                    )));
                    None
                }
            },
        }
    }

    fn upsert(&mut self, record: R) {
        match self.items.iter_mut().find(|item| item.id() == record.id()) {
            Some(existing) => *existing = record,
            None => self.items.push(record),
        }
    }
}

impl EntityScreen<Employee> {
    /// Departments offered by the form: those of the selected company, or all
    /// of them while no company is chosen.
    pub fn department_choices(&self) -> Vec<&Department> {
        let company = &self.form.draft().company_id;
        if company.is_blank() {
            self.refs.departments().iter().collect()
        } else {
            self.refs.departments_of(company).collect()
        }
    }
}

#[cfg(test)]
#[path = "tests/screen_tests.rs"]
mod tests;
