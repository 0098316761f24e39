//! The seam between the edit session and the backend.
//!
//! [`EditableBackend`] abstracts the handful of calls the
//! reconciliation engine makes, so tests drive the engine with a
//! scripted backend and the portal wires in [`VendorApi`].

use async_trait::async_trait;
use serendib_client::api::VendorApi;
use serendib_client::dto::SubmitOutcome;
use serendib_client::error::ApiResult;
use serendib_core::diff::ChangeSet;
use serendib_core::fields::{FieldSchema, ProfileField, ServiceField};
use serendib_core::record::RecordSnapshot;
use serendib_core::types::RecordId;
use serendib_core::update_request::UpdateRequest;

/// Backend operations needed to edit one record kind.
#[async_trait]
pub trait EditableBackend<S: FieldSchema>: Send + Sync {
    /// Fetch the confirmed snapshot of the record.
    async fn fetch_snapshot(&self, record_id: RecordId) -> ApiResult<RecordSnapshot<S>>;

    /// Submit a change-set for the record.
    async fn submit_changes(
        &self,
        record_id: RecordId,
        changes: &ChangeSet<S>,
    ) -> ApiResult<SubmitOutcome>;

    /// Fetch the record's outstanding (pending) update requests.
    async fn fetch_pending_requests(&self, record_id: RecordId) -> ApiResult<Vec<UpdateRequest>>;

    /// Upload a document for a field and return its stored URL.
    async fn upload_document(
        &self,
        record_id: RecordId,
        field_api_name: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<String>;
}

#[async_trait]
impl EditableBackend<ProfileField> for VendorApi {
    async fn fetch_snapshot(&self, record_id: RecordId) -> ApiResult<RecordSnapshot<ProfileField>> {
        self.fetch_profile(record_id).await
    }

    async fn submit_changes(
        &self,
        record_id: RecordId,
        changes: &ChangeSet<ProfileField>,
    ) -> ApiResult<SubmitOutcome> {
        self.submit_profile_changes(record_id, changes).await
    }

    async fn fetch_pending_requests(&self, record_id: RecordId) -> ApiResult<Vec<UpdateRequest>> {
        VendorApi::fetch_pending_requests(self, record_id).await
    }

    async fn upload_document(
        &self,
        record_id: RecordId,
        field_api_name: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<String> {
        let response = VendorApi::upload_document(self, record_id, field_api_name, file_name, bytes)
            .await?;
        Ok(response.url)
    }
}

#[async_trait]
impl EditableBackend<ServiceField> for VendorApi {
    async fn fetch_snapshot(&self, record_id: RecordId) -> ApiResult<RecordSnapshot<ServiceField>> {
        self.fetch_service(record_id).await
    }

    async fn submit_changes(
        &self,
        record_id: RecordId,
        changes: &ChangeSet<ServiceField>,
    ) -> ApiResult<SubmitOutcome> {
        self.submit_service_changes(record_id, changes).await
    }

    async fn fetch_pending_requests(&self, record_id: RecordId) -> ApiResult<Vec<UpdateRequest>> {
        VendorApi::fetch_pending_requests(self, record_id).await
    }

    async fn upload_document(
        &self,
        record_id: RecordId,
        field_api_name: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<String> {
        let response = VendorApi::upload_document(self, record_id, field_api_name, file_name, bytes)
            .await?;
        Ok(response.url)
    }
}
