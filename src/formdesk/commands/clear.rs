use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::store::RecordStore;
use crate::store::backend::StorageBackend;
use crate::store::mirror::Mirror;
use crate::table::TableController;

/// Removes every record from the table, the store and the mirror.
pub fn run<B: StorageBackend>(
    table: &mut TableController,
    store: &mut RecordStore,
    mirror: &Mirror<B>,
) -> Result<CmdResult> {
    let outcome = table.clear_all(store, mirror);
    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Cleared {} record(s).",
        outcome.removed.len()
    )));
    result.warn_unpersisted(outcome.persisted);
    Ok(result.with_affected_records(outcome.removed))
}
