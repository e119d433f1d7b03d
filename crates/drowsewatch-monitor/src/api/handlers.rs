//! Axum request handlers for the command API.

use axum::{extract::State, Json};

use drowsewatch_core::PhoneNumber;

use super::dto::*;
use super::error::{ApiError, ApiResult};
use crate::store::MonitorStore;

/// Capability listing: the commands the surface understands.
#[tracing::instrument]
pub async fn capabilities() -> Json<CapabilitiesResponse> {
    Json(CapabilitiesResponse {
        service: "drowsewatch".to_string(),
        version: crate::VERSION.to_string(),
        commands: vec![
            CapabilityDto {
                command: "monitor".to_string(),
                description: "Latest and average readings per sensor channel".to_string(),
            },
            CapabilityDto {
                command: "recipient".to_string(),
                description: "Register the alert recipient phone number".to_string(),
            },
            CapabilityDto {
                command: "shutdown".to_string(),
                description: "Stop all channel workers".to_string(),
            },
        ],
    })
}

/// Latest and average readings per channel from the monitoring snapshot.
#[tracing::instrument(skip(store))]
pub async fn monitor(State(store): State<MonitorStore>) -> Json<MonitorResponse> {
    let snapshot = store.snapshot();

    let channels = snapshot
        .channels
        .iter()
        .map(|(channel, view)| ChannelReport {
            channel: channel.name().to_string(),
            unit: channel.unit().to_string(),
            latest: view.latest,
            average: view.average,
            samples: view.history.len(),
            last_updated: view.last_updated,
        })
        .collect();

    Json(MonitorResponse {
        running: snapshot.running,
        recipient: snapshot.recipient.map(|p| p.to_string()),
        channels,
    })
}

/// Register the alert recipient after validating the number format.
#[tracing::instrument(skip(store))]
pub async fn set_recipient(
    State(store): State<MonitorStore>,
    Json(request): Json<SetRecipientRequest>,
) -> ApiResult<Json<SetRecipientResponse>> {
    let phone = PhoneNumber::parse(&request.phone)
        .map_err(|e| ApiError::validation(e.to_string(), Some("phone".to_string())))?;

    tracing::info!(phone = %phone, "Registered alert recipient");
    store.set_recipient(phone.clone());

    Ok(Json(SetRecipientResponse {
        registered: phone.to_string(),
    }))
}

/// Flip the running flag; workers exit at their next loop boundary.
#[tracing::instrument(skip(store))]
pub async fn shutdown(State(store): State<MonitorStore>) -> Json<ShutdownResponse> {
    tracing::info!("Shutdown requested via command API");
    store.request_shutdown();
    Json(ShutdownResponse { stopping: true })
}
