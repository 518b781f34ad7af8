//! # API Facade
//!
//! [`FormApp`] is the single entry point for every formdesk operation,
//! whatever UI drives it. It owns the session state explicitly: the draft,
//! the record store, the table controller and the mirror. Nothing lives in
//! globals.
//!
//! ## Role and Responsibilities
//!
//! The facade:
//! - **Dispatches** to the appropriate command function
//! - **Normalizes inputs** (key prefixes to full record keys)
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! Business rules live in `commands/*.rs` and [`crate::table`]; the facade
//! only wires state into them.
//!
//! ## Generic Over StorageBackend
//!
//! `FormApp<B: StorageBackend>` is generic over where the mirror writes:
//! - Production: `FormApp<FsBackend>`
//! - Testing: `FormApp<MemBackend>`

use crate::commands;
use crate::config::FormdeskConfig;
use crate::error::{FormError, Result};
use crate::field::FieldUpdate;
use crate::model::{Draft, Record, RecordKey};
use crate::store::RecordStore;
use crate::store::backend::StorageBackend;
use crate::store::mirror::Mirror;
use crate::table::{DeleteScope, SortColumn, SortDirection, TableController};
use serde_json::Value;
use std::path::Path;

/// One form-and-table session.
pub struct FormApp<B: StorageBackend> {
    draft: Draft,
    store: RecordStore,
    table: TableController,
    mirror: Mirror<B>,
    delete_scope: DeleteScope,
}

impl<B: StorageBackend> FormApp<B> {
    /// Starts a session. The mirror is read exactly once, here; its records
    /// seed the record store by bulk append and the table from the store.
    pub fn new(backend: B, config: &FormdeskConfig) -> Self {
        let mirror = Mirror::with_key(backend, config.storage_key.clone());
        let mut store = RecordStore::new();
        let table = TableController::open(&mirror, &mut store);

        Self {
            draft: Draft::new(),
            store,
            table,
            mirror,
            delete_scope: config.delete_scope,
        }
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    /// Applies a dynamically typed field edit; see [`Draft::update`].
    pub fn update_field(&mut self, field: &str, value: &Value) -> Result<()> {
        self.draft.update(field, value)
    }

    pub fn apply(&mut self, update: FieldUpdate) {
        self.draft.apply(update);
    }

    pub fn reset_draft(&mut self) {
        self.draft.reset();
    }

    pub fn submit(&mut self) -> Result<commands::CmdResult> {
        commands::submit::run(
            &mut self.draft,
            &mut self.store,
            &mut self.table,
            &self.mirror,
        )
    }

    /// Snapshot of the session's record store.
    pub fn records(&self) -> &[Record] {
        self.store.records()
    }

    pub fn table(&self) -> &TableController {
        &self.table
    }

    pub fn mirror(&self) -> &Mirror<B> {
        &self.mirror
    }

    pub fn delete_scope(&self) -> DeleteScope {
        self.delete_scope
    }

    pub fn set_delete_scope(&mut self, scope: DeleteScope) {
        self.delete_scope = scope;
    }

    pub fn sort_by(&mut self, column: SortColumn, direction: SortDirection) {
        self.table.sort_by(column, direction);
    }

    pub fn toggle_sort(&mut self, column: SortColumn) {
        self.table.toggle_sort(column);
    }

    /// Replaces the selection. Inputs may be full keys or unique key prefixes.
    pub fn select<I: AsRef<str>>(&mut self, keys: &[I]) -> Result<()> {
        let resolved = keys
            .iter()
            .map(|k| self.resolve_key(k.as_ref()))
            .collect::<Result<Vec<_>>>()?;
        self.table.select(resolved);
        Ok(())
    }

    pub fn toggle_select(&mut self, key: &str) -> Result<bool> {
        let key = self.resolve_key(key)?;
        Ok(self.table.toggle_select(&key))
    }

    /// Forgets sort and selection, as when the table view is entered again.
    pub fn reenter_table(&mut self) {
        self.table.reset_view();
    }

    pub fn list(&self, page: usize) -> Result<commands::CmdResult> {
        commands::list::run(&self.table, page)
    }

    pub fn delete_one(&mut self, key: &str) -> Result<commands::CmdResult> {
        let key = self.resolve_key(key)?;
        commands::delete::run(
            &mut self.table,
            &mut self.store,
            &self.mirror,
            &key,
            self.delete_scope,
        )
    }

    pub fn delete_selected(&mut self) -> Result<commands::CmdResult> {
        commands::delete::run_selected(
            &mut self.table,
            &mut self.store,
            &self.mirror,
            self.delete_scope,
        )
    }

    pub fn clear(&mut self) -> Result<commands::CmdResult> {
        commands::clear::run(&mut self.table, &mut self.store, &self.mirror)
    }

    /// Resolves a full key, or a prefix matching exactly one row.
    pub fn resolve_key(&self, input: &str) -> Result<RecordKey> {
        let wanted: RecordKey = input.parse().map_err(FormError::Api)?;
        let rows = self.table.rows();

        if rows.iter().any(|r| r.key == wanted) {
            return Ok(wanted);
        }

        let mut matches = rows
            .iter()
            .filter(|r| r.key.as_str().starts_with(wanted.as_str()));
        match (matches.next(), matches.next()) {
            (Some(record), None) => Ok(record.key.clone()),
            (None, _) => Err(FormError::RecordNotFound(wanted)),
            (Some(_), Some(_)) => Err(FormError::Api(format!(
                "Key prefix {} matches more than one record",
                wanted
            ))),
        }
    }
}

/// Reads or changes the configuration stored in `config_dir`.
pub fn configure(config_dir: &Path, action: ConfigAction) -> Result<commands::CmdResult> {
    commands::config::run(config_dir, action)
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, MessageLevel, PageInfo};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::mem_backend::MemBackend;
    use serde_json::json;

    fn fill(app: &mut FormApp<MemBackend>, first: &str, gender: &[&str]) {
        app.update_field("prefix", &json!("Mr.")).unwrap();
        app.update_field("firstName", &json!(first)).unwrap();
        app.update_field("lastName", &json!("Dee")).unwrap();
        app.update_field("gender", &json!(gender)).unwrap();
        app.update_field("expectedSalary", &json!(30000)).unwrap();
    }

    fn app() -> FormApp<MemBackend> {
        FormApp::new(MemBackend::new(), &FormdeskConfig::default())
    }

    #[test]
    fn submit_then_delete_selected_end_to_end() {
        let mut app = app();

        fill(&mut app, "Somchai", &["male"]);
        app.submit().unwrap();
        assert_eq!(app.records().len(), 1);
        let persisted = app.mirror().load();
        assert_eq!(persisted.len(), 1);
        assert_eq!(persisted[0].gender, "male");
        assert_eq!(persisted[0].first_name, "Somchai");

        fill(&mut app, "Malee", &["female"]);
        app.submit().unwrap();
        let names: Vec<_> = app.records().iter().map(|r| r.first_name.clone()).collect();
        assert_eq!(names, vec!["Somchai", "Malee"]);

        let first_key = app.records()[0].key.to_string();
        app.select(&[first_key]).unwrap();
        app.delete_selected().unwrap();

        assert_eq!(app.records().len(), 1);
        assert_eq!(app.records()[0].first_name, "Malee");
        assert_eq!(app.mirror().load(), app.records());
    }

    #[test]
    fn clear_store_scope_reproduces_legacy_delete() {
        let mut app = app();
        app.set_delete_scope(DeleteScope::ClearStore);
        fill(&mut app, "A", &["male"]);
        app.submit().unwrap();
        fill(&mut app, "B", &["male"]);
        app.submit().unwrap();

        let key = app.records()[0].key.to_string();
        app.delete_one(&key).unwrap();

        assert!(app.records().is_empty());
        assert_eq!(app.table().rows().len(), 1);
        assert_eq!(app.mirror().load().len(), 1);
    }

    #[test]
    fn new_session_reads_previous_mirror() {
        let mut first = app();
        fill(&mut first, "Somchai", &["male"]);
        first.submit().unwrap();
        let raw = first.mirror().backend().raw("formData").unwrap();

        let backend = MemBackend::new();
        backend.set("formData", &raw).unwrap();
        let second = FormApp::new(backend, &FormdeskConfig::default());

        assert_eq!(second.records().len(), 1);
        assert_eq!(second.table().rows().len(), 1);
    }

    #[test]
    fn rejected_update_leaves_draft_alone() {
        let mut app = app();
        app.update_field("firstName", &json!("Somchai")).unwrap();
        assert!(app.update_field("firstName", &json!(12)).is_err());
        assert_eq!(app.draft().first_name, "Somchai");

        app.reset_draft();
        assert!(app.draft().is_empty());
        assert!(app.records().is_empty());
    }

    #[test]
    fn resolves_unique_key_prefixes() {
        let mut app = app();
        fill(&mut app, "A", &[]);
        app.submit().unwrap();
        let key = app.records()[0].key.clone();

        assert_eq!(app.resolve_key(&key.as_str()[..8]).unwrap(), key);
        assert!(matches!(
            app.resolve_key("not-a-key"),
            Err(FormError::RecordNotFound(_))
        ));
        assert!(app.resolve_key("").is_err());
    }

    #[test]
    fn ambiguous_prefix_is_rejected() {
        let backend = MemBackend::new();
        let rows: Vec<Record> = ["ab1", "ab2"]
            .into_iter()
            .map(|k| Record::from_draft(RecordKey::from(k), &Draft::default()))
            .collect();
        backend
            .set("formData", &serde_json::to_string(&rows).unwrap())
            .unwrap();
        let app = FormApp::new(backend, &FormdeskConfig::default());

        assert!(matches!(app.resolve_key("ab"), Err(FormError::Api(_))));
        assert_eq!(app.resolve_key("ab2").unwrap().as_str(), "ab2");
    }

    #[test]
    fn repeated_keys_in_mirror_load_once() {
        let backend = MemBackend::new();
        let rows: Vec<Record> = ["dup", "dup"]
            .into_iter()
            .map(|k| Record::from_draft(RecordKey::from(k), &Draft::default()))
            .collect();
        backend
            .set("formData", &serde_json::to_string(&rows).unwrap())
            .unwrap();
        let mut app = FormApp::new(backend, &FormdeskConfig::default());

        assert_eq!(app.records().len(), 1);
        assert_eq!(app.table().rows(), app.records());

        app.delete_one("dup").unwrap();
        assert!(app.records().is_empty());
        assert!(app.table().rows().is_empty());
    }

    #[test]
    fn selection_and_sort_reset_on_reentry() {
        let mut app = app();
        fill(&mut app, "A", &[]);
        app.submit().unwrap();
        let key = app.records()[0].key.to_string();

        assert!(app.toggle_select(&key).unwrap());
        app.toggle_sort(SortColumn::FirstName);
        app.reenter_table();

        assert!(app.table().selection().is_empty());
        assert_eq!(app.table().sort(), None);
    }
}
