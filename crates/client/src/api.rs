//! REST client for the vendor platform backend.
//!
//! Wraps the backend HTTP API (profile and service snapshots,
//! change-set submission, update-request review, document upload,
//! support chat) using [`reqwest`]. The backend owns persistence,
//! authentication, and file storage; this client only speaks its JSON
//! contract.

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serendib_core::chat::{validate_message_body, SupportMessage};
use serendib_core::diff::ChangeSet;
use serendib_core::fields::{FieldSchema, ProfileField, ServiceField};
use serendib_core::record::RecordSnapshot;
use serendib_core::types::{RecordId, RegistrationId, RequestId, ServiceId, VendorId};
use serendib_core::update_request::UpdateRequest;
use serendib_core::wizard::{can_submit_registration, WizardStep, STEP_DATA_KEY_ACCOUNT};
use serendib_core::CoreError;
use validator::Validate;

use crate::dto::{
    AccountDetails, SendMessagePayload, SubmitOutcome, SubmitResponse, UploadResponse,
    VendorSummary,
};
use crate::error::{ApiError, ApiResult};

/// HTTP client for the vendor platform backend.
#[derive(Clone)]
pub struct VendorApi {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl VendorApi {
    /// Create a new API client.
    ///
    /// * `base_url` - Base HTTP URL, e.g. `https://api.example.com/v1`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: None,
        }
    }

    /// Create an API client reusing an existing [`reqwest::Client`]
    /// (useful for connection pooling).
    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: None,
        }
    }

    /// Attach the session's bearer token to every request.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }

    // ---- record snapshots ----

    /// Fetch the confirmed vendor profile snapshot.
    pub async fn fetch_profile(
        &self,
        vendor_id: VendorId,
    ) -> ApiResult<RecordSnapshot<ProfileField>> {
        let object: serde_json::Map<String, serde_json::Value> = self
            .get_json(&format!("/vendors/{vendor_id}/profile"))
            .await?;
        Ok(RecordSnapshot::from_api_object(vendor_id, &object)?)
    }

    /// Fetch the confirmed snapshot of one service listing.
    pub async fn fetch_service(
        &self,
        service_id: ServiceId,
    ) -> ApiResult<RecordSnapshot<ServiceField>> {
        let object: serde_json::Map<String, serde_json::Value> =
            self.get_json(&format!("/services/{service_id}")).await?;
        Ok(RecordSnapshot::from_api_object(service_id, &object)?)
    }

    // ---- change-set submission ----

    /// Submit a profile change-set.
    pub async fn submit_profile_changes(
        &self,
        vendor_id: VendorId,
        changes: &ChangeSet<ProfileField>,
    ) -> ApiResult<SubmitOutcome> {
        self.submit_changes(&format!("/vendors/{vendor_id}/profile"), changes)
            .await
    }

    /// Submit a service-listing change-set.
    pub async fn submit_service_changes(
        &self,
        service_id: ServiceId,
        changes: &ChangeSet<ServiceField>,
    ) -> ApiResult<SubmitOutcome> {
        self.submit_changes(&format!("/services/{service_id}"), changes)
            .await
    }

    async fn submit_changes<S: FieldSchema>(
        &self,
        path: &str,
        changes: &ChangeSet<S>,
    ) -> ApiResult<SubmitOutcome> {
        let body = serde_json::Value::Object(changes.to_api_object());
        let response = self
            .authorize(self.client.patch(self.url(path)))
            .json(&body)
            .send()
            .await?;
        let parsed: SubmitResponse = Self::parse_response(response).await?;
        Ok(parsed.into())
    }

    // ---- update requests ----

    /// Fetch the outstanding (pending) update requests for a record.
    pub async fn fetch_pending_requests(
        &self,
        record_id: RecordId,
    ) -> ApiResult<Vec<UpdateRequest>> {
        let response = self
            .authorize(self.client.get(self.url("/update-requests")))
            .query(&[
                ("record_id", record_id.to_string()),
                ("status", "pending".to_string()),
            ])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Approve an update request (reviewer only; enforced by the
    /// backend, pre-checked by the caller's session context).
    pub async fn approve_request(&self, request_id: RequestId) -> ApiResult<UpdateRequest> {
        let response = self
            .authorize(
                self.client
                    .post(self.url(&format!("/update-requests/{request_id}/approve"))),
            )
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Reject an update request with a reason.
    pub async fn reject_request(
        &self,
        request_id: RequestId,
        reason: &str,
    ) -> ApiResult<UpdateRequest> {
        if reason.trim().is_empty() {
            return Err(CoreError::Validation(
                "A rejection must include a non-empty reason".to_string(),
            )
            .into());
        }
        let response = self
            .authorize(
                self.client
                    .post(self.url(&format!("/update-requests/{request_id}/reject"))),
            )
            .json(&serde_json::json!({ "reason": reason.trim() }))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- uploads ----

    /// Upload a document for a record field and return its stored URL.
    ///
    /// `field` names the backend field the document belongs to, so the
    /// backend can validate file type and size per field. The upload is
    /// an out-of-band side-channel; the returned URL joins the next
    /// change-set like any other edited value.
    pub async fn upload_document(
        &self,
        record_id: RecordId,
        field: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> ApiResult<UploadResponse> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new()
            .text("record_id", record_id.to_string())
            .text("field", field.to_string())
            .part("file", part);

        let response = self
            .authorize(self.client.post(self.url("/uploads")))
            .multipart(form)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- registration wizard ----

    /// Save the account step of an in-progress registration.
    pub async fn save_account_details(
        &self,
        registration_id: RegistrationId,
        details: &AccountDetails,
    ) -> ApiResult<()> {
        details
            .validate()
            .map_err(|e| CoreError::Validation(e.to_string()))?;
        let body = serde_json::json!({ STEP_DATA_KEY_ACCOUNT: details });
        let step = WizardStep::Account.to_number();
        let response = self
            .authorize(
                self.client
                    .put(self.url(&format!("/registrations/{registration_id}/steps/{step}"))),
            )
            .json(&body)
            .send()
            .await?;
        Self::check_status(response).await
    }

    /// Submit a completed registration for review.
    ///
    /// `current_step` is pre-checked so a submission never leaves any
    /// step but Review.
    pub async fn submit_registration(
        &self,
        registration_id: RegistrationId,
        current_step: u8,
    ) -> ApiResult<()> {
        can_submit_registration(current_step)?;
        let response = self
            .authorize(
                self.client
                    .post(self.url(&format!("/registrations/{registration_id}/submit"))),
            )
            .send()
            .await?;
        Self::check_status(response).await
    }

    // ---- back-office ----

    /// List vendors awaiting back-office review.
    pub async fn list_vendors_pending_review(&self) -> ApiResult<Vec<VendorSummary>> {
        let response = self
            .authorize(self.client.get(self.url("/vendors")))
            .query(&[("status", "pending_review")])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    // ---- support chat ----

    /// Send a support message in a vendor's conversation.
    ///
    /// The body is checked against the domain message rules before any
    /// request is made.
    pub async fn send_message(
        &self,
        vendor_id: VendorId,
        payload: &SendMessagePayload,
    ) -> ApiResult<SupportMessage> {
        validate_message_body(&payload.body)?;
        let response = self
            .authorize(
                self.client
                    .post(self.url(&format!("/vendors/{vendor_id}/messages"))),
            )
            .json(payload)
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Fetch support messages, optionally only those after `since`.
    pub async fn fetch_messages(
        &self,
        vendor_id: VendorId,
        since: Option<DateTime<Utc>>,
    ) -> ApiResult<Vec<SupportMessage>> {
        let mut request = self
            .authorize(
                self.client
                    .get(self.url(&format!("/vendors/{vendor_id}/messages"))),
            );
        if let Some(since) = since {
            request = request.query(&[("since", since.to_rfc3339())]);
        }
        let response = request.send().await?;
        Self::parse_response(response).await
    }

    // ---- private helpers ----

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorize(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.bearer_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self
            .authorize(self.client.get(self.url(path)))
            .send()
            .await?;
        Self::parse_response(response).await
    }

    /// Check the status code and decode a JSON body.
    async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> ApiResult<T> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Backend returned an error");
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response.json::<T>().await?)
    }

    /// Check the status code of a response whose body we discard.
    async fn check_status(response: reqwest::Response) -> ApiResult<()> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Backend returned an error");
            return Err(ApiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(())
    }
}
