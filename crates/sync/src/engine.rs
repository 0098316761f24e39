//! The edit session: reconciliation of confirmed, draft, and pending
//! field state for one open record.
//!
//! An [`EditSession`] owns a [`FormSession`] (locks + drafts), the
//! derived [`PendingValueIndex`], and a backend handle. It implements
//! the full submit cycle: diff, short-circuit on no changes, and fold
//! the backend's direct-apply or pending-approval outcome back into
//! local state. Backend failures leave locks and drafts untouched so
//! the user can retry without re-entering anything.

use serendib_client::dto::SubmitOutcome;
use serendib_client::error::ApiResult;
use serendib_core::diff::DiffOutcome;
use serendib_core::error::CoreError;
use serendib_core::fields::FieldSchema;
use serendib_core::lock::FormSession;
use serendib_core::pending::{PendingIndicator, PendingValueIndex};
use serendib_core::record::RecordSnapshot;
use serendib_core::session::SessionContext;
use serendib_core::types::RecordId;
use serendib_core::value::FieldValue;

use crate::backend::EditableBackend;

/// Result of a submit cycle.
#[derive(Debug)]
pub enum SubmissionResult {
    /// The form matched the snapshot; no request was made.
    NoChanges,
    /// The backend applied the changes directly; the snapshot now
    /// reflects them and every field is locked again.
    Applied {
        /// UI names of the fields that were changed.
        changed_fields: Vec<String>,
    },
    /// The backend parked the changes as an update request. The
    /// snapshot is unchanged; the named fields now carry pending
    /// indicators.
    PendingApproval {
        message: Option<String>,
        /// UI names of the fields awaiting review.
        changed_fields: Vec<String>,
    },
}

/// One user's editing session over one record.
///
/// Duplicate submission is prevented structurally: `submit` takes
/// `&mut self`, so calls serialize, and a repeat submit after a
/// successful apply diffs to `NoChanges`.
pub struct EditSession<S: FieldSchema, B: EditableBackend<S>> {
    backend: B,
    session: SessionContext,
    record_id: RecordId,
    form: FormSession<S>,
    pending: PendingValueIndex,
}

impl<S: FieldSchema, B: EditableBackend<S>> EditSession<S, B> {
    /// Load the record and its outstanding update requests, opening a
    /// fully-locked session.
    ///
    /// A failure to fetch pending requests is not fatal: the session
    /// opens with no pending indicators and the next refresh retries.
    pub async fn load(
        backend: B,
        session: SessionContext,
        record_id: RecordId,
    ) -> ApiResult<Self> {
        let snapshot = backend.fetch_snapshot(record_id).await?;
        let pending = Self::fetch_pending_degraded(&backend, record_id).await;
        Ok(Self {
            backend,
            session,
            record_id,
            form: FormSession::new(snapshot),
            pending,
        })
    }

    /// The record being edited.
    pub fn record_id(&self) -> RecordId {
        self.record_id
    }

    /// Who is editing.
    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Close the session, releasing the session context for teardown.
    pub fn close(self) -> SessionContext {
        self.session
    }

    // ---- field state (delegated to the form session) ----

    /// Whether a field currently accepts edits.
    pub fn is_unlocked(&self, field: S) -> bool {
        self.form.is_unlocked(field)
    }

    /// Invert a field's lock state; locking discards the draft.
    pub fn toggle_lock(&mut self, field: S) -> bool {
        self.form.toggle_lock(field)
    }

    /// Set a field's draft value. Fails on locked fields.
    pub fn edit(&mut self, field: S, value: FieldValue) -> Result<(), CoreError> {
        self.form.edit(field, value)
    }

    /// The value the field's input should display.
    pub fn display_value(&self, field: S) -> Option<&FieldValue> {
        self.form.display_value(field)
    }

    /// The confirmed snapshot backing the session.
    pub fn snapshot(&self) -> &RecordSnapshot<S> {
        self.form.snapshot()
    }

    // ---- pending indicators ----

    /// The pending proposal to display next to a field, if any.
    pub fn pending_indicator(&self, field: S) -> Option<&PendingIndicator> {
        self.pending.get(field.api_name())
    }

    /// Fields that currently carry a pending proposal.
    pub fn pending_fields(&self) -> Vec<S> {
        self.pending
            .pending_fields()
            .into_iter()
            .filter_map(S::from_api_name)
            .collect()
    }

    // ---- backend cycle ----

    /// Diff the form against the snapshot and submit any changes.
    pub async fn submit(&mut self) -> ApiResult<SubmissionResult> {
        let changes = match self.form.diff() {
            DiffOutcome::NoChanges => {
                tracing::debug!(record_id = %self.record_id, "Submit skipped: no changes");
                return Ok(SubmissionResult::NoChanges);
            }
            DiffOutcome::Changes(changes) => changes,
        };

        tracing::info!(
            record_id = %self.record_id,
            user_id = %self.session.user_id(),
            fields = ?changes.ui_names(),
            "Submitting change-set"
        );

        // A backend error propagates here with locks and drafts intact.
        let outcome = self.backend.submit_changes(self.record_id, &changes).await?;

        match outcome {
            SubmitOutcome::Applied { record } => {
                match record {
                    Some(object) => match RecordSnapshot::from_api_object(self.record_id, &object)
                    {
                        Ok(snapshot) => {
                            self.form.resync(snapshot);
                            self.form.lock_all();
                        }
                        Err(e) => {
                            // The backend applied the change but echoed a
                            // record we cannot decode; fall back to the
                            // values we submitted.
                            tracing::warn!(error = %e, "Ignoring malformed record echo");
                            self.form.confirm_applied(&changes);
                        }
                    },
                    None => self.form.confirm_applied(&changes),
                }
                Ok(SubmissionResult::Applied {
                    changed_fields: changes.ui_names().iter().map(|s| s.to_string()).collect(),
                })
            }
            SubmitOutcome::PendingApproval {
                message,
                changed_fields,
            } => {
                // Confirmed snapshot stays as-is; inputs revert to it.
                self.form.lock_all();
                self.pending =
                    Self::fetch_pending_degraded(&self.backend, self.record_id).await;
                let changed_fields = if changed_fields.is_empty() {
                    changes.ui_names().iter().map(|s| s.to_string()).collect()
                } else {
                    changed_fields
                };
                Ok(SubmissionResult::PendingApproval {
                    message,
                    changed_fields,
                })
            }
        }
    }

    /// Re-fetch the snapshot and pending requests.
    ///
    /// Locked fields pick up fresh confirmed values; unlocked drafts
    /// are preserved. Called by the scheduled refresh task and after
    /// back-office actions.
    pub async fn refresh(&mut self) -> ApiResult<()> {
        let snapshot = self.backend.fetch_snapshot(self.record_id).await?;
        self.form.resync(snapshot);
        self.pending = Self::fetch_pending_degraded(&self.backend, self.record_id).await;
        Ok(())
    }

    /// Upload a document for a field.
    ///
    /// On success the stored URL becomes the field's draft (the field
    /// unlocks if it was locked) and joins the next change-set.
    pub async fn upload(
        &mut self,
        field: S,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<()> {
        let url = self
            .backend
            .upload_document(self.record_id, field.api_name(), file_name, bytes)
            .await?;
        self.form.record_upload(field, &url)?;
        Ok(())
    }

    /// Fetch pending requests, degrading to "none known" on failure.
    async fn fetch_pending_degraded(backend: &B, record_id: RecordId) -> PendingValueIndex {
        match backend.fetch_pending_requests(record_id).await {
            Ok(requests) => PendingValueIndex::build(&requests),
            Err(e) => {
                tracing::warn!(
                    record_id = %record_id,
                    error = %e,
                    "Failed to fetch pending update requests; showing none"
                );
                PendingValueIndex::default()
            }
        }
    }
}
