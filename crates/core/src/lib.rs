//! `fieldsync-core` — record/value foundation for change tracking.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! strongly-typed identifiers, the attribute value model (classification, deep
//! cloning, structural equality), and the mutable [`Record`] type trackers
//! observe.

pub mod error;
pub mod id;
pub mod record;
pub mod value;

pub use error::{TrackError, TrackResult};
pub use id::{RecordId, RecordIdentity, RecordKind};
pub use record::Record;
pub use value::{AttributeValue, Money, OptionCode, RecordRef, ValueKind};
