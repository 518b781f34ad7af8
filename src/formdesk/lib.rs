//! # Formdesk Architecture
//!
//! Formdesk is a **UI-agnostic form-and-table library**: a personal-information
//! form whose submissions land in a sortable, selectable, persistent table.
//! The command-line client in `main.rs` is one UI over it; a web or desktop
//! front end would drive the same [`api::FormApp`].
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Parses arguments, prints tables and messages             │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Owns the session: draft, record store, table, mirror     │
//! │  - Normalizes inputs (key prefixes → record keys)           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Logic (field.rs, table.rs, commands/*.rs)                  │
//! │  - Field updates, submit, sort/select/delete, clear         │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore (in-memory list) and Mirror (best effort)    │
//! │  - StorageBackend trait: FsBackend, MemBackend              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Data Flow
//!
//! Field edits mutate the [`model::Draft`]. Submitting turns the draft into a
//! keyed [`model::Record`], appends it to the record store and the table, and
//! rewrites the mirror. The table is read from the mirror once when a session
//! starts and rewritten after every append or delete.
//!
//! ## Failure Model
//!
//! Nothing here is fatal. Bad field input is rejected with a reason and the
//! draft is left as it was. Storage trouble is logged through `tracing`; a
//! failed read starts from an empty table and a failed write keeps going with
//! in-memory state.
//!
//! ## Module Overview
//!
//! - [`api`]: The facade, entry point for all operations
//! - [`commands`]: Submit, list, delete, clear and config logic
//! - [`field`]: Typed field updates and draft validation
//! - [`table`]: Sorting, paging, selection and deletion
//! - [`store`]: Record store, mirror and storage backends
//! - [`model`]: Core data types (`Record`, `Draft`, form vocabularies)
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod field;
pub mod model;
pub mod store;
pub mod table;
