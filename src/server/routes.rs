use axum::{
    extract::State,
    Json,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use crate::responder::{Action, ActionResponse, Responder, Tracker};
use crate::server::AppState;

/// Body posted by the dialogue framework when it runs a custom action
#[derive(Debug, Deserialize)]
pub struct ActionCall {
    pub next_action: String,
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub tracker: TrackerPayload,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrackerPayload {
    #[serde(default)]
    pub sender_id: Option<String>,
    #[serde(default)]
    pub slots: HashMap<String, Value>,
    #[serde(default)]
    pub latest_message: LatestMessage,
}

#[derive(Debug, Default, Deserialize)]
pub struct LatestMessage {
    #[serde(default)]
    pub entities: Vec<EntityPayload>,
}

#[derive(Debug, Deserialize)]
pub struct EntityPayload {
    pub entity: String,
    #[serde(default)]
    pub value: Value,
}

impl From<&TrackerPayload> for Tracker {
    fn from(payload: &TrackerPayload) -> Self {
        let mut tracker = Tracker::new();
        for entity in &payload.latest_message.entities {
            if let Some(value) = value_text(&entity.value) {
                tracker = tracker.with_entity(entity.entity.clone(), value);
            }
        }
        for (name, value) in &payload.slots {
            if let Some(value) = value_text(value) {
                tracker = tracker.with_slot(name.clone(), value);
            }
        }
        tracker
    }
}

/// Slot and entity values arrive as arbitrary JSON; null means unset
fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[derive(Debug, Serialize)]
pub struct SlotEvent {
    pub event: &'static str,
    pub timestamp: Option<f64>,
    pub name: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
pub struct TextResponse {
    pub text: String,
}

/// Webhook reply: slot events plus the messages to utter, in order
#[derive(Debug, Serialize)]
pub struct ActionReply {
    pub events: Vec<SlotEvent>,
    pub responses: Vec<TextResponse>,
}

impl From<ActionResponse> for ActionReply {
    fn from(response: ActionResponse) -> Self {
        Self {
            events: response
                .events
                .into_iter()
                .map(|slot| SlotEvent {
                    event: "slot",
                    timestamp: None,
                    name: slot.name,
                    value: slot.value,
                })
                .collect(),
            responses: response
                .messages
                .into_iter()
                .map(|text| TextResponse { text })
                .collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action_name: Option<String>,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn internal(error: impl std::fmt::Display) -> ApiError {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse { error: error.to_string(), action_name: None }),
    )
}

pub async fn handle_webhook(
    State(state): State<Arc<AppState>>,
    Json(call): Json<ActionCall>,
) -> Result<Json<ActionReply>, ApiError> {
    let action: Action = call.next_action.parse().map_err(|e: crate::Error| {
        tracing::warn!("{}", e);
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse { error: e.to_string(), action_name: Some(call.next_action.clone()) }),
        )
    })?;

    let sender = call.sender_id.as_deref().or(call.tracker.sender_id.as_deref()).unwrap_or("unknown");
    tracing::debug!("Action {} for sender {}", action, sender);

    let tracker = Tracker::from(&call.tracker);
    let response = tokio::task::spawn_blocking(move || {
        Responder::new(&state.store, &state.university).run(action, &tracker)
    })
    .await
    .map_err(internal)?;

    Ok(Json(ActionReply::from(response)))
}

pub async fn list_actions() -> Json<Vec<&'static str>> {
    Json(Action::all().iter().map(Action::as_str).collect())
}

pub async fn health() -> Json<Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn get_stats(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    let stats = state.store.stats().map_err(internal)?;
    Ok(Json(serde_json::to_value(&stats).map_err(internal)?))
}
