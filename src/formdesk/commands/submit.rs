use crate::commands::{CmdMessage, CmdResult};
use crate::error::Result;
use crate::model::{Draft, Record, RecordKey};
use crate::store::RecordStore;
use crate::store::backend::StorageBackend;
use crate::store::mirror::Mirror;
use crate::table::TableController;
use tracing::info;

/// Commits the draft as a new record.
///
/// The record gets a fresh key, lands at the end of both the store and the
/// table, and the table's list is mirrored. The draft is reset afterwards.
pub fn run<B: StorageBackend>(
    draft: &mut Draft,
    store: &mut RecordStore,
    table: &mut TableController,
    mirror: &Mirror<B>,
) -> Result<CmdResult> {
    let record = Record::from_draft(RecordKey::generate(), draft);

    store.append(vec![record.clone()]);
    table.push(record.clone());
    let persisted = mirror.save(table.rows());
    draft.reset();

    info!(key = %record.key, "record submitted");

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!(
        "Record submitted: {} ({})",
        record.full_name(),
        record.key
    )));
    result.warn_unpersisted(persisted);
    Ok(result.with_affected_records(vec![record]))
}
