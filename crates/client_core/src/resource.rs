use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    hash::Hash,
};

use futures::future::BoxFuture;
use shared::domain::EntityKind;

use crate::{api::HrApi, error::ClientError, form::FormDraft, reference::ReferenceData};

/// A column a list can be sorted by.
pub trait SortField: Copy + Eq + Debug + Send + Sync + 'static {
    const ALL: &'static [Self];

    /// Command-line token, e.g. `applied-at`.
    fn name(self) -> &'static str;

    /// Column header.
    fn label(self) -> &'static str;

    fn parse(token: &str) -> Option<Self> {
        let token = token.trim().to_ascii_lowercase().replace('_', "-");
        Self::ALL.iter().copied().find(|field| field.name() == token)
    }
}

/// An entity managed by one screen: its draft, how it renders and sorts, and
/// which REST calls back it.
pub trait Resource: Clone + Debug + Send + Sync + 'static {
    type Id: Clone + Eq + Hash + Debug + Display + Send + Sync + 'static;
    type Draft: FormDraft;
    type Sort: SortField;

    const KIND: EntityKind;

    /// Reference tables loaded alongside the primary list.
    const REFERENCES: &'static [EntityKind];

    /// List column headers, matching [`Resource::cells`].
    const COLUMNS: &'static [&'static str];

    fn id(&self) -> &Self::Id;
    fn draft(&self) -> Self::Draft;

    /// Short name used in notices, e.g. a company's name.
    fn display_name(&self) -> String;

    fn cells(&self, refs: &ReferenceData) -> Vec<String>;

    /// Values matched by the search box, with foreign keys already resolved.
    fn search_values(&self, refs: &ReferenceData) -> Vec<String>;

    fn compare(&self, other: &Self, field: Self::Sort, refs: &ReferenceData) -> Ordering;

    /// Adjusts a draft just before it is sent as a create.
    fn prepare_create(_draft: &mut Self::Draft) {}

    fn fetch_all(api: &dyn HrApi) -> BoxFuture<'_, Result<Vec<Self>, ClientError>>;
    fn create<'a>(
        api: &'a dyn HrApi,
        draft: &'a Self::Draft,
    ) -> BoxFuture<'a, Result<Self, ClientError>>;
    fn update<'a>(
        api: &'a dyn HrApi,
        id: &'a Self::Id,
        draft: &'a Self::Draft,
    ) -> BoxFuture<'a, Result<Self, ClientError>>;
    fn delete<'a>(api: &'a dyn HrApi, id: &'a Self::Id) -> BoxFuture<'a, Result<(), ClientError>>;
}

/// Case-insensitive text ordering used by every text column.
pub fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

/// Missing amounts order before every known amount.
pub fn compare_amount(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// `"company"` -> `"Company"`.
pub fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
