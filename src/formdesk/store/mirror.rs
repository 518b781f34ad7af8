use super::backend::StorageBackend;
use crate::error::{FormError, Result};
use crate::model::Record;
use tracing::{debug, warn};

pub const DEFAULT_STORAGE_KEY: &str = "formData";

/// Best-effort copy of the record list in a key-value backend.
///
/// The whole list is encoded as one JSON array under a single key and is
/// rewritten in full on every save. Neither direction ever fails the caller:
/// a bad read yields an empty list, a bad write is logged and the in-memory
/// state carries on alone.
pub struct Mirror<B: StorageBackend> {
    backend: B,
    key: String,
}

impl<B: StorageBackend> Mirror<B> {
    pub fn new(backend: B) -> Self {
        Self::with_key(backend, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(backend: B, key: impl Into<String>) -> Self {
        Self {
            backend,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Overwrites the stored list. Returns whether the write landed.
    pub fn save(&self, records: &[Record]) -> bool {
        match self.try_save(records) {
            Ok(()) => {
                debug!(key = %self.key, count = records.len(), "mirror saved");
                true
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "mirror write failed, keeping in-memory state only");
                false
            }
        }
    }

    /// Reads the stored list, or an empty one when it is absent or unusable.
    pub fn load(&self) -> Vec<Record> {
        match self.try_load() {
            Ok(Some(records)) => {
                debug!(key = %self.key, count = records.len(), "mirror loaded");
                records
            }
            Ok(None) => {
                debug!(key = %self.key, "mirror empty");
                Vec::new()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "mirror unreadable, starting empty");
                Vec::new()
            }
        }
    }

    fn try_save(&self, records: &[Record]) -> Result<()> {
        let encoded = serde_json::to_string(records).map_err(FormError::Serialization)?;
        self.backend.set(&self.key, &encoded)
    }

    fn try_load(&self) -> Result<Option<Vec<Record>>> {
        let Some(raw) = self.backend.get(&self.key)? else {
            return Ok(None);
        };
        let records = serde_json::from_str(&raw).map_err(FormError::Serialization)?;
        Ok(Some(records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Draft, RecordKey};
    use crate::store::mem_backend::MemBackend;

    fn record(key: &str, first_name: &str) -> Record {
        let draft = Draft {
            first_name: first_name.into(),
            last_name: "Dee".into(),
            gender: "male".into(),
            expected_salary: 30000.0,
            ..Draft::default()
        };
        Record::from_draft(RecordKey::from(key), &draft)
    }

    #[test]
    fn load_without_prior_save_is_empty() {
        let mirror = Mirror::new(MemBackend::new());
        assert!(mirror.load().is_empty());
    }

    #[test]
    fn save_then_load_round_trips() {
        let mirror = Mirror::new(MemBackend::new());
        let records = vec![record("a", "Somchai"), record("b", "Malee")];

        assert!(mirror.save(&records));
        assert_eq!(mirror.load(), records);
    }

    #[test]
    fn save_overwrites_previous_list() {
        let mirror = Mirror::new(MemBackend::new());
        mirror.save(&[record("a", "A"), record("b", "B")]);
        mirror.save(&[record("b", "B")]);

        let loaded = mirror.load();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].key.as_str(), "b");
    }

    #[test]
    fn corrupt_value_loads_as_empty() {
        let backend = MemBackend::new();
        backend.set(DEFAULT_STORAGE_KEY, "{not json").unwrap();
        let mirror = Mirror::new(backend);
        assert!(mirror.load().is_empty());

        mirror.backend().set(DEFAULT_STORAGE_KEY, r#"{"key":"a"}"#).unwrap();
        assert!(mirror.load().is_empty());
    }

    #[test]
    fn read_failure_loads_as_empty() {
        let mirror = Mirror::new(MemBackend::new());
        mirror.save(&[record("a", "A")]);
        mirror.backend().set_simulate_read_error(true);
        assert!(mirror.load().is_empty());
    }

    #[test]
    fn write_failure_is_reported_not_raised() {
        let mirror = Mirror::new(MemBackend::new());
        mirror.save(&[record("a", "A")]);

        mirror.backend().set_simulate_write_error(true);
        assert!(!mirror.save(&[]));

        mirror.backend().set_simulate_write_error(false);
        assert_eq!(mirror.load().len(), 1);
    }

    #[test]
    fn custom_key_is_used_for_storage() {
        let mirror = Mirror::with_key(MemBackend::new(), "records");
        mirror.save(&[record("a", "A")]);
        assert!(mirror.backend().raw("records").is_some());
        assert!(mirror.backend().raw(DEFAULT_STORAGE_KEY).is_none());
    }
}
