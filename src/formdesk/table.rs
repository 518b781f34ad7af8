//! # Table Controller
//!
//! Presentation-side logic over the committed records: a working list of rows
//! (read once from the mirror when the table opens), an optional sort, a
//! selection set, and the delete operations.
//!
//! Sorting and paging only produce views. The working list keeps arrival
//! order, so switching columns never reshuffles what is stored.
//!
//! Selection is by [`RecordKey`], so it survives any re-sort.
//!
//! ## Deletion scope
//!
//! Every delete filters the working list, rewrites the mirror with what is
//! left, and then touches the [`RecordStore`] according to [`DeleteScope`]:
//!
//! - `Targeted` removes exactly the deleted records from the store.
//! - `ClearStore` empties the whole store after any delete. This is the legacy
//!   form page behavior and stays selectable for compatibility.

use crate::error::{FormError, Result};
use crate::model::{Record, RecordKey};
use crate::store::RecordStore;
use crate::store::backend::StorageBackend;
use crate::store::mirror::Mirror;
use icu_collator::options::{CollatorOptions, Strength};
use icu_collator::{Collator, CollatorBorrowed};
use icu_locale_core::locale;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use tracing::{info, warn};

pub const PAGE_SIZE: usize = 5;

/// Thai collation at tertiary strength: letters order by the alphabet first,
/// then accents, then case.
static COLLATOR: Lazy<Option<CollatorBorrowed<'static>>> = Lazy::new(|| {
    let mut options = CollatorOptions::default();
    options.strength = Some(Strength::Tertiary);
    match Collator::try_new(locale!("th").into(), options) {
        Ok(collator) => Some(collator),
        Err(e) => {
            warn!(error = %e, "collation data unavailable, sorting by code point");
            None
        }
    }
});

/// Locale-aware, case-sensitive string order. Strings the collator ranks
/// equal fall back to code point order so distinct values never tie.
pub fn collate(a: &str, b: &str) -> Ordering {
    match COLLATOR.as_ref() {
        Some(collator) => collator.compare(a, b).then_with(|| a.cmp(b)),
        None => a.cmp(b),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortColumn {
    FirstName,
    LastName,
    Gender,
    Nationality,
}

impl SortColumn {
    pub fn name(self) -> &'static str {
        match self {
            SortColumn::FirstName => "firstName",
            SortColumn::LastName => "lastName",
            SortColumn::Gender => "gender",
            SortColumn::Nationality => "nationality",
        }
    }

    pub fn value(self, record: &Record) -> &str {
        match self {
            SortColumn::FirstName => &record.first_name,
            SortColumn::LastName => &record.last_name,
            SortColumn::Gender => &record.gender,
            SortColumn::Nationality => &record.nationality,
        }
    }

    /// Collated comparison of this column's values.
    pub fn compare(self, a: &Record, b: &Record) -> Ordering {
        collate(self.value(a), self.value(b))
    }
}

impl fmt::Display for SortColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SortColumn {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "firstName" => Ok(SortColumn::FirstName),
            "lastName" => Ok(SortColumn::LastName),
            "gender" => Ok(SortColumn::Gender),
            "nationality" => Ok(SortColumn::Nationality),
            other => Err(FormError::Api(format!("Column is not sortable: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub column: SortColumn,
    pub direction: SortDirection,
}

/// What a delete does to the record store besides removing rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeleteScope {
    #[default]
    Targeted,
    ClearStore,
}

impl fmt::Display for DeleteScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeleteScope::Targeted => write!(f, "targeted"),
            DeleteScope::ClearStore => write!(f, "clear-store"),
        }
    }
}

impl FromStr for DeleteScope {
    type Err = FormError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "targeted" => Ok(DeleteScope::Targeted),
            "clear-store" => Ok(DeleteScope::ClearStore),
            other => Err(FormError::Api(format!(
                "Unknown delete scope: {} (expected targeted or clear-store)",
                other
            ))),
        }
    }
}

#[derive(Debug)]
pub struct DeleteOutcome {
    pub removed: Vec<Record>,
    /// Whether the mirror accepted the rewritten list.
    pub persisted: bool,
}

/// One page of the sorted view.
#[derive(Debug)]
pub struct Page<'a> {
    /// 1-based page number.
    pub number: usize,
    pub total_pages: usize,
    pub total_rows: usize,
    pub rows: Vec<&'a Record>,
}

#[derive(Debug, Default)]
pub struct TableController {
    rows: Vec<Record>,
    selection: HashSet<RecordKey>,
    sort: Option<SortState>,
}

impl TableController {
    pub fn new(rows: Vec<Record>) -> Self {
        Self {
            rows,
            ..Self::default()
        }
    }

    /// Opens the table on whatever the mirror holds. The loaded list goes
    /// through `store` first, so rows with a repeated key are dropped from
    /// both and the table shows exactly what the store keeps.
    pub fn open<B: StorageBackend>(mirror: &Mirror<B>, store: &mut RecordStore) -> Self {
        store.append(mirror.load());
        Self::new(store.records().to_vec())
    }

    /// Working list in arrival order.
    pub fn rows(&self) -> &[Record] {
        &self.rows
    }

    pub fn push(&mut self, record: Record) {
        self.rows.push(record);
    }

    pub fn sort(&self) -> Option<SortState> {
        self.sort
    }

    pub fn sort_by(&mut self, column: SortColumn, direction: SortDirection) {
        self.sort = Some(SortState { column, direction });
    }

    /// Header-click cycle: unsorted, ascending, descending, unsorted.
    /// Clicking a different column starts it at ascending.
    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.sort = match self.sort {
            Some(SortState {
                column: current,
                direction,
            }) if current == column => match direction {
                SortDirection::Ascending => Some(SortState {
                    column,
                    direction: SortDirection::Descending,
                }),
                SortDirection::Descending => None,
            },
            _ => Some(SortState {
                column,
                direction: SortDirection::Ascending,
            }),
        };
    }

    /// Rows ordered by an arbitrary comparator. Ties keep arrival order.
    pub fn sorted_with<F>(&self, mut compare: F) -> Vec<&Record>
    where
        F: FnMut(&Record, &Record) -> Ordering,
    {
        let mut view: Vec<&Record> = self.rows.iter().collect();
        view.sort_by(|a, b| compare(*a, *b));
        view
    }

    /// Rows ordered by the active sort, or in arrival order when unsorted.
    pub fn sorted(&self) -> Vec<&Record> {
        match self.sort {
            None => self.rows.iter().collect(),
            Some(SortState {
                column,
                direction: SortDirection::Ascending,
            }) => self.sorted_with(|a, b| column.compare(a, b)),
            Some(SortState {
                column,
                direction: SortDirection::Descending,
            }) => self.sorted_with(|a, b| column.compare(b, a)),
        }
    }

    pub fn page_count(&self) -> usize {
        self.rows.len().div_ceil(PAGE_SIZE).max(1)
    }

    /// Returns the 1-based `number`th page of the sorted view.
    /// Pages past the end come back empty.
    pub fn page(&self, number: usize) -> Page<'_> {
        let number = number.max(1);
        let rows = self
            .sorted()
            .into_iter()
            .skip((number - 1).saturating_mul(PAGE_SIZE))
            .take(PAGE_SIZE)
            .collect();

        Page {
            number,
            total_pages: self.page_count(),
            total_rows: self.rows.len(),
            rows,
        }
    }

    pub fn selection(&self) -> &HashSet<RecordKey> {
        &self.selection
    }

    pub fn is_selected(&self, key: &RecordKey) -> bool {
        self.selection.contains(key)
    }

    /// Replaces the selection. Keys that are not in the table are dropped.
    pub fn select<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = RecordKey>,
    {
        let present: HashSet<&RecordKey> = self.rows.iter().map(|r| &r.key).collect();
        let selection = keys.into_iter().filter(|k| present.contains(k)).collect();
        self.selection = selection;
    }

    /// Flips one row's checkbox. Returns whether it is now selected.
    pub fn toggle_select(&mut self, key: &RecordKey) -> bool {
        if self.selection.remove(key) {
            return false;
        }
        if self.rows.iter().any(|r| &r.key == key) {
            self.selection.insert(key.clone());
            return true;
        }
        false
    }

    /// Forgets sort and selection, as when the table is entered again.
    pub fn reset_view(&mut self) {
        self.sort = None;
        self.selection.clear();
    }

    /// Deletes the row with `key`.
    pub fn delete_one<B: StorageBackend>(
        &mut self,
        key: &RecordKey,
        store: &mut RecordStore,
        mirror: &Mirror<B>,
        scope: DeleteScope,
    ) -> Result<DeleteOutcome> {
        if !self.rows.iter().any(|r| &r.key == key) {
            return Err(FormError::RecordNotFound(key.clone()));
        }
        let keys = HashSet::from([key.clone()]);
        Ok(self.delete_keys(&keys, store, mirror, scope))
    }

    /// Deletes every selected row and empties the selection.
    pub fn delete_selected<B: StorageBackend>(
        &mut self,
        store: &mut RecordStore,
        mirror: &Mirror<B>,
        scope: DeleteScope,
    ) -> DeleteOutcome {
        let keys = std::mem::take(&mut self.selection);
        self.delete_keys(&keys, store, mirror, scope)
    }

    /// Drops every row, clears the store, and persists the empty list.
    pub fn clear_all<B: StorageBackend>(
        &mut self,
        store: &mut RecordStore,
        mirror: &Mirror<B>,
    ) -> DeleteOutcome {
        let removed = std::mem::take(&mut self.rows);
        self.selection.clear();
        store.clear();
        let persisted = mirror.save(&self.rows);
        info!(count = removed.len(), "cleared all records");
        DeleteOutcome { removed, persisted }
    }

    fn delete_keys<B: StorageBackend>(
        &mut self,
        keys: &HashSet<RecordKey>,
        store: &mut RecordStore,
        mirror: &Mirror<B>,
        scope: DeleteScope,
    ) -> DeleteOutcome {
        let (removed, kept): (Vec<Record>, Vec<Record>) = std::mem::take(&mut self.rows)
            .into_iter()
            .partition(|r| keys.contains(&r.key));
        self.rows = kept;
        self.selection.retain(|k| !keys.contains(k));

        let persisted = mirror.save(&self.rows);

        match scope {
            DeleteScope::Targeted => {
                store.remove(keys);
            }
            DeleteScope::ClearStore => store.clear(),
        }

        info!(count = removed.len(), %scope, "deleted records");
        DeleteOutcome { removed, persisted }
    }
}
