//! Headless vendor portal: opens an authenticated profile edit session
//! and keeps it fresh with a background refresh loop that also polls
//! the support conversation.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serendib_client::VendorApi;
use serendib_core::chat::latest_timestamp;
use serendib_core::fields::{validate_schema, ProfileField, ServiceField};
use serendib_core::roles::Role;
use serendib_core::session::SessionContext;
use serendib_sync::{run_refresh_loop, EditSession};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;

use config::PortalConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "serendib_portal=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Fail fast on a broken ui/backend field-name mapping.
    validate_schema::<ProfileField>()?;
    validate_schema::<ServiceField>()?;

    let config = PortalConfig::from_env();
    tracing::info!(
        api_base_url = %config.api_base_url,
        vendor_id = %config.vendor_id,
        refresh_secs = config.refresh_interval.as_secs(),
        "Portal starting"
    );

    let mut api = VendorApi::new(config.api_base_url.clone());
    if let Some(token) = &config.api_token {
        api = api.with_bearer_token(token.clone());
    }

    let session_ctx = SessionContext::init(config.user_id, Role::Vendor, Some(config.vendor_id))?;
    let chat_api = api.clone();
    let session: EditSession<ProfileField, VendorApi> =
        EditSession::load(api, session_ctx, config.vendor_id).await?;
    tracing::info!(
        pending_fields = session.pending_fields().len(),
        "Profile session opened"
    );

    let session = Arc::new(tokio::sync::Mutex::new(session));
    let cancel = CancellationToken::new();

    // `since` cursor for the support conversation; advances to the
    // newest message seen on each poll.
    let chat_cursor: Arc<tokio::sync::Mutex<Option<DateTime<Utc>>>> =
        Arc::new(tokio::sync::Mutex::new(None));

    let refresh_task = {
        let session = Arc::clone(&session);
        let cancel = cancel.clone();
        let interval = config.refresh_interval;
        let vendor_id = config.vendor_id;
        let chat_cursor = Arc::clone(&chat_cursor);
        tokio::spawn(async move {
            run_refresh_loop(interval, cancel, move || {
                let session = Arc::clone(&session);
                let chat_api = chat_api.clone();
                let chat_cursor = Arc::clone(&chat_cursor);
                async move {
                    {
                        let mut session = session.lock().await;
                        match session.refresh().await {
                            Ok(()) => tracing::debug!(
                                pending_fields = session.pending_fields().len(),
                                "Session refreshed"
                            ),
                            Err(e) => tracing::warn!(error = %e, "Refresh failed"),
                        }
                    }

                    let mut cursor = chat_cursor.lock().await;
                    match chat_api.fetch_messages(vendor_id, *cursor).await {
                        Ok(messages) => {
                            if !messages.is_empty() {
                                tracing::info!(count = messages.len(), "New support messages");
                            }
                            if let Some(newest) = latest_timestamp(&messages) {
                                *cursor = Some(newest);
                            }
                        }
                        Err(e) => tracing::warn!(error = %e, "Message poll failed"),
                    }
                }
            })
            .await;
        })
    };

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down");
    cancel.cancel();
    refresh_task.await?;

    // Explicit logout: the session context is consumed with the session.
    match Arc::try_unwrap(session) {
        Ok(mutex) => mutex.into_inner().close().teardown(),
        Err(_) => tracing::warn!("Session still referenced at shutdown"),
    }

    Ok(())
}
