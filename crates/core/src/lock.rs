//! Per-field edit locking for one open editing session.
//!
//! Every field starts locked and displays the confirmed snapshot
//! value. Unlocking starts an edit from the confirmed value; locking a
//! field again discards its draft unconditionally. Lock state is local
//! to the session and never persisted.

use std::collections::{HashMap, HashSet};

use crate::diff::{build_change_set, ChangeSet, DiffOutcome};
use crate::error::CoreError;
use crate::fields::{FieldKind, FieldSchema};
use crate::record::RecordSnapshot;
use crate::value::FieldValue;

/// One record's editing session: confirmed snapshot, per-field lock
/// state, and draft values for the unlocked fields.
///
/// Drafts exist only for unlocked fields, so a snapshot refresh can
/// never clobber an in-progress edit and locked fields can never go
/// stale.
#[derive(Debug)]
pub struct FormSession<S: FieldSchema> {
    snapshot: RecordSnapshot<S>,
    drafts: HashMap<S, FieldValue>,
    unlocked: HashSet<S>,
}

impl<S: FieldSchema> FormSession<S> {
    /// Open a session on a freshly-loaded snapshot. All fields locked.
    pub fn new(snapshot: RecordSnapshot<S>) -> Self {
        Self {
            snapshot,
            drafts: HashMap::new(),
            unlocked: HashSet::new(),
        }
    }

    /// Whether a field currently accepts edits.
    pub fn is_unlocked(&self, field: S) -> bool {
        self.unlocked.contains(&field)
    }

    /// Invert a field's lock state. Returns the new unlocked state.
    ///
    /// Locking discards the field's draft; the input reverts to the
    /// confirmed value. Unlocking seeds the draft from the confirmed
    /// value so editing starts from what the backend last acknowledged.
    pub fn toggle_lock(&mut self, field: S) -> bool {
        if self.unlocked.remove(&field) {
            self.drafts.remove(&field);
            false
        } else {
            self.unlocked.insert(field);
            if let Some(confirmed) = self.snapshot.get(field) {
                self.drafts.insert(field, confirmed.clone());
            }
            true
        }
    }

    /// Set a field's draft value.
    ///
    /// Rejected when the field is locked or the value's shape does not
    /// match the field's kind.
    pub fn edit(&mut self, field: S, value: FieldValue) -> Result<(), CoreError> {
        if !self.is_unlocked(field) {
            return Err(CoreError::Conflict(format!(
                "Field '{}' is locked; unlock it before editing",
                field.ui_name()
            )));
        }
        Self::check_kind(field, &value)?;
        self.drafts.insert(field, value);
        Ok(())
    }

    /// Record a completed document upload.
    ///
    /// Uploads bypass the lock toggle: a successful upload counts as
    /// starting an edit on that field, so the field is unlocked and its
    /// draft becomes the new URL. The URL then participates in the next
    /// diff like any other changed field.
    pub fn record_upload(&mut self, field: S, url: &str) -> Result<(), CoreError> {
        if field.kind() != FieldKind::Document {
            return Err(CoreError::Validation(format!(
                "Field '{}' is not a document field",
                field.ui_name()
            )));
        }
        if url.trim().is_empty() {
            return Err(CoreError::Validation(
                "Uploaded document URL must not be empty".to_string(),
            ));
        }
        self.unlocked.insert(field);
        self.drafts.insert(field, FieldValue::Text(url.to_string()));
        Ok(())
    }

    /// The value the input should display: the draft for unlocked
    /// fields, the confirmed value for locked ones.
    pub fn display_value(&self, field: S) -> Option<&FieldValue> {
        if self.is_unlocked(field) {
            self.drafts.get(&field)
        } else {
            self.snapshot.get(field)
        }
    }

    /// Replace the snapshot with a freshly-fetched one.
    ///
    /// Locked fields immediately display the new confirmed values;
    /// unlocked fields keep their drafts.
    pub fn resync(&mut self, snapshot: RecordSnapshot<S>) {
        self.snapshot = snapshot;
    }

    /// Lock every field, discarding all drafts.
    pub fn lock_all(&mut self) {
        self.unlocked.clear();
        self.drafts.clear();
    }

    /// Fold a direct-apply confirmation into the session: the submitted
    /// values become confirmed and every field re-locks.
    pub fn confirm_applied(&mut self, changes: &ChangeSet<S>) {
        self.snapshot.apply_changes(changes);
        self.lock_all();
    }

    /// Compute the change-set between drafts and the confirmed
    /// snapshot. Locked (untouched) fields never appear.
    pub fn diff(&self) -> DiffOutcome<S> {
        build_change_set(&self.drafts, &self.snapshot)
    }

    /// The confirmed snapshot backing this session.
    pub fn snapshot(&self) -> &RecordSnapshot<S> {
        &self.snapshot
    }

    fn check_kind(field: S, value: &FieldValue) -> Result<(), CoreError> {
        let ok = match field.kind() {
            FieldKind::Text | FieldKind::Choice | FieldKind::Url | FieldKind::Document => {
                matches!(value, FieldValue::Text(_))
            }
            FieldKind::Number => matches!(value, FieldValue::Number(_)),
            FieldKind::List => matches!(value, FieldValue::List(_)),
        };
        if ok {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "Field '{}' cannot hold {value:?}",
                field.ui_name()
            )))
        }
    }
}
