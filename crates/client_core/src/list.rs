use crate::{
    reference::ReferenceData,
    resource::{Resource, SortField},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<K> {
    pub field: K,
    pub direction: SortDirection,
}

/// Client-side search term and sort order over a fetched list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView<K> {
    search: String,
    sort: Option<SortState<K>>,
}

impl<K> Default for ListView<K> {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: None,
        }
    }
}

impl<K: SortField> ListView<K> {
    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn sort(&self) -> Option<SortState<K>> {
        self.sort
    }

    /// Same field again flips the direction; a new field starts ascending.
    pub fn sort_by(&mut self, field: K) {
        self.sort = Some(match self.sort {
            Some(current) if current.field == field => SortState {
                field,
                direction: current.direction.toggled(),
            },
            _ => SortState {
                field,
                direction: SortDirection::Ascending,
            },
        });
    }

    pub fn set_sort(&mut self, field: K, direction: SortDirection) {
        self.sort = Some(SortState { field, direction });
    }

    pub fn clear_sort(&mut self) {
        self.sort = None;
    }

    /// Rows matching the search term, in sort order. Equal rows keep their
    /// server order.
    pub fn apply<'a, R>(&self, items: &'a [R], refs: &ReferenceData) -> Vec<&'a R>
    where
        R: Resource<Sort = K>,
    {
        let term = self.search.trim().to_lowercase();
        let mut rows: Vec<&R> = if term.is_empty() {
            items.iter().collect()
        } else {
            items
                .iter()
                .filter(|item| {
                    item.search_values(refs)
                        .iter()
                        .any(|value| value.to_lowercase().contains(&term))
                })
                .collect()
        };

        if let Some(sort) = self.sort {
            rows.sort_by(|a, b| {
                let ordering = a.compare(b, sort.field, refs);
                match sort.direction {
                    SortDirection::Ascending => ordering,
                    SortDirection::Descending => ordering.reverse(),
                }
            });
        }
        rows
    }
}
