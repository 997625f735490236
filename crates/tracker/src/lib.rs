//! `fieldsync-tracker` — baseline snapshots and minimal partial-update payloads.
//!
//! A [`ChangeTracker`] is opened over a live [`Record`], deep-clones its
//! attributes into an immutable baseline, and later computes a
//! "changed fields only" [`ChangeSet`] by comparing the record's current
//! values against that baseline. The change-set can be packaged as an
//! [`UpdateRequest`] and dispatched to an [`UpdateService`].
//!
//! [`Record`]: fieldsync_core::Record

pub mod changeset;
pub mod service;
pub mod tracker;

pub use changeset::{ChangeSet, UpdateRequest};
pub use service::{InMemoryServiceError, InMemoryUpdateService, UpdateService};
pub use tracker::{ChangeTracker, SubmitError};
