use crate::config::FormdeskConfig;
use crate::model::Record;

pub mod clear;
pub mod config;
pub mod delete;
pub mod list;
pub mod submit;

const PERSIST_WARNING: &str =
    "Could not write records to storage; changes are kept for this session only";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

/// Position of a listed page within the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub number: usize,
    pub total_pages: usize,
    pub total_rows: usize,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_records: Vec<Record>,
    pub listed_records: Vec<Record>,
    pub page: Option<PageInfo>,
    pub config: Option<FormdeskConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_records(mut self, records: Vec<Record>) -> Self {
        self.affected_records = records;
        self
    }

    pub fn with_listed_records(mut self, records: Vec<Record>, page: PageInfo) -> Self {
        self.listed_records = records;
        self.page = Some(page);
        self
    }

    pub fn with_config(mut self, config: FormdeskConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Adds the standard warning when a mirror write did not land.
    pub(crate) fn warn_unpersisted(&mut self, persisted: bool) {
        if !persisted {
            self.add_message(CmdMessage::warning(PERSIST_WARNING));
        }
    }
}
