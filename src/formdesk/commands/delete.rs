use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::RecordKey;
use crate::store::RecordStore;
use crate::store::backend::StorageBackend;
use crate::store::mirror::Mirror;
use crate::table::{DeleteOutcome, DeleteScope, TableController};

/// Deletes a single record by key.
pub fn run<B: StorageBackend>(
    table: &mut TableController,
    store: &mut RecordStore,
    mirror: &Mirror<B>,
    key: &RecordKey,
    scope: DeleteScope,
) -> Result<CmdResult> {
    let outcome = table.delete_one(key, store, mirror, scope)?;
    Ok(report(outcome, scope))
}

/// Deletes every selected record.
pub fn run_selected<B: StorageBackend>(
    table: &mut TableController,
    store: &mut RecordStore,
    mirror: &Mirror<B>,
    scope: DeleteScope,
) -> Result<CmdResult> {
    if table.selection().is_empty() {
        let mut result = CmdResult::default();
        result.add_message(CmdMessage::info("No records selected."));
        return Ok(result);
    }
    let outcome = table.delete_selected(store, mirror, scope);
    Ok(report(outcome, scope))
}

fn report(outcome: DeleteOutcome, scope: DeleteScope) -> CmdResult {
    let mut result = CmdResult::default();
    for record in &outcome.removed {
        result.add_message(CmdMessage::success(format!(
            "Record deleted: {} ({})",
            record.full_name(),
            record.key
        )));
    }
    if scope == DeleteScope::ClearStore {
        result.add_message(CmdMessage::info("Session record store cleared."));
    }
    result.warn_unpersisted(outcome.persisted);
    result.with_affected_records(outcome.removed)
}
