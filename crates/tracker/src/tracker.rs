//! Change tracker: baseline capture, diff, submit.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use thiserror::Error;
use tracing::{debug, trace};

use fieldsync_core::{AttributeValue, Record, RecordIdentity, TrackError, TrackResult};

use crate::changeset::{ChangeSet, UpdateRequest};
use crate::service::UpdateService;

/// Error from [`ChangeTracker::submit`].
#[derive(Debug, Error)]
pub enum SubmitError<E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    /// The diff itself failed (an attribute added after the snapshot holds an
    /// unrecognized value).
    #[error(transparent)]
    Track(#[from] TrackError),

    /// The update service refused or failed the dispatch. Surfaced unchanged;
    /// retry policy belongs to the service, not the engine.
    #[error("update dispatch failed: {0}")]
    Dispatch(E),
}

/// Tracks changes to a live [`Record`] against an immutable baseline.
///
/// Opening a tracker deep-clones every attribute of the record into a
/// baseline snapshot. All later diffs compare the record's **current** values
/// against that same baseline (never against a prior diff's result), so
/// successive diffs report cumulative change relative to the original
/// snapshot, and repeated diffs without intervening mutation are equal.
///
/// The record is shared through `Rc<RefCell<_>>`: the caller keeps mutating
/// it through normal assignment (or in-place payload mutation via
/// [`Record::get_mut`]) while the tracker observes it at diff time.
/// Single-threaded; the baseline and every returned change-set are
/// immutable once produced, and "clone before compare, clone before return"
/// is the only isolation discipline the engine needs.
///
/// Scoped use: [`open`](Self::open) at the start of a unit of work,
/// [`release`](Self::release) (or drop) at the end. Release consumes the
/// tracker, so use-after-release does not compile.
#[derive(Debug)]
pub struct ChangeTracker {
    record: Rc<RefCell<Record>>,
    identity: RecordIdentity,
    baseline: BTreeMap<String, AttributeValue>,
}

impl ChangeTracker {
    /// Open a tracker over a live record, capturing the baseline snapshot.
    ///
    /// Fails with [`TrackError::UnsupportedValue`] if any attribute holds a
    /// value the engine cannot classify. Fail fast: such a value cannot be
    /// safely snapshotted, and no partial tracker is produced.
    pub fn open(record: Rc<RefCell<Record>>) -> TrackResult<Self> {
        let (identity, baseline) = {
            let live = record.borrow();
            let mut baseline = BTreeMap::new();
            for (name, value) in live.attributes() {
                baseline.insert(name.to_string(), value.snapshot(name)?);
            }
            (live.identity().clone(), baseline)
        };

        debug!(record = %identity, fields = baseline.len(), "captured baseline snapshot");
        Ok(Self {
            record,
            identity,
            baseline,
        })
    }

    /// Identity of the tracked record, as captured at open.
    pub fn identity(&self) -> &RecordIdentity {
        &self.identity
    }

    /// The baseline snapshot. Immutable for the tracker's lifetime.
    pub fn baseline(&self) -> &BTreeMap<String, AttributeValue> {
        &self.baseline
    }

    /// Compute the minimal change-set of the live record against the baseline.
    ///
    /// An attribute is included when its name is absent from the baseline
    /// (added after the snapshot) or its current value is not structurally
    /// equal to the baseline value, including an explicit
    /// [`AttributeValue::Null`] where the baseline held something else, which
    /// is reported as a change carrying `Null` (that is what tells the remote
    /// side to clear the field). Included values are deep clones of the
    /// **current** live values, so the returned change-set stays frozen even
    /// if the record is mutated again afterwards.
    ///
    /// Attributes present in the baseline but removed from the live record
    /// are not reported; deletion semantics are out of scope.
    ///
    /// Returns `Ok(None)` when nothing differs. The only error path is an
    /// attribute added after the snapshot whose value is unrecognized (the
    /// baseline itself was fully validated at open).
    pub fn diff(&self) -> TrackResult<Option<ChangeSet>> {
        let live = self.record.borrow();

        let mut fields = BTreeMap::new();
        for (name, value) in live.attributes() {
            match self.baseline.get(name) {
                Some(base) if base == value => {}
                _ => {
                    fields.insert(name.to_string(), value.snapshot(name)?);
                }
            }
        }

        if fields.is_empty() {
            trace!(record = %self.identity, "no changes against baseline");
            return Ok(None);
        }

        debug!(record = %self.identity, changed = fields.len(), "computed change-set");
        Ok(Some(ChangeSet::new(self.identity.clone(), fields)))
    }

    /// Diff, then package identity + changed fields for an update service.
    pub fn build_update_request(&self) -> TrackResult<Option<UpdateRequest>> {
        Ok(self.diff()?.map(ChangeSet::into_update_request))
    }

    /// Diff and dispatch to `service`.
    ///
    /// With no changes the service is never called and `Ok(false)` comes
    /// back. With changes there is exactly one `update` call carrying
    /// identity plus changed fields, then `Ok(true)`. A service failure is
    /// surfaced unchanged as [`SubmitError::Dispatch`].
    pub fn submit<S: UpdateService>(&self, service: &mut S) -> Result<bool, SubmitError<S::Error>> {
        let Some(change_set) = self.diff()? else {
            debug!(record = %self.identity, "no changes; skipping dispatch");
            return Ok(false);
        };

        let request = change_set.into_update_request();
        service.update(&request).map_err(SubmitError::Dispatch)?;
        debug!(record = %self.identity, fields = request.fields().len(), "dispatched partial update");
        Ok(true)
    }

    /// Release the tracker at the end of its unit of work.
    ///
    /// No externally visible action; consuming `self` makes further use a
    /// compile error.
    pub fn release(self) {}
}
