use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    classifier::{classify, Intent},
    delivery::{send_image, send_text},
    error::BridgeError,
    generation::{generate_image, generate_text},
    types::{GenerationResult, InboundMessage, IncomingMessage},
    AppState,
};

pub const IMAGE_FALLBACK: &str = "Lo siento, no pude generar la imagen ahora.";
pub const TEXT_FALLBACK: &str = "Error al generar respuesta.";

pub async fn health() -> &'static str {
    "Bot WhatsApp + Gemini activo ✅"
}

/// Meta's one-time subscription handshake.
pub async fn verify_webhook(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> (StatusCode, String) {
    let mode = params.get("hub.mode").map(String::as_str);
    let token = params.get("hub.verify_token");
    let challenge = params.get("hub.challenge").cloned().unwrap_or_default();

    if mode == Some("subscribe") && token == Some(&state.cfg.verify_token) {
        tracing::info!("Webhook verified!");
        (StatusCode::OK, challenge)
    } else {
        tracing::warn!("Webhook verification rejected (mode={mode:?})");
        (StatusCode::FORBIDDEN, "Forbidden".to_string())
    }
}

// Every delivery is acked with 200 whatever happens inside, otherwise
// the platform keeps retrying the same event.
pub async fn post_webhook(State(state): State<AppState>, body: Bytes) -> Json<Value> {
    if let Err(e) = process_payload(&state, &body).await {
        tracing::error!("Webhook processing error: {e}");
    }
    Json(json!({ "status": "received" }))
}

async fn process_payload(state: &AppState, body: &[u8]) -> Result<(), BridgeError> {
    let payload: Value = serde_json::from_slice(body)?;

    for message in first_messages(&payload) {
        dispatch(state, message).await;
    }
    Ok(())
}

fn as_items<'a>(value: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    value.get(key).and_then(Value::as_array).into_iter().flatten()
}

/// First message of every change; later messages in the same change are dropped.
/// A change that fails to parse is skipped without affecting its siblings.
fn first_messages(payload: &Value) -> Vec<InboundMessage> {
    as_items(payload, "entry")
        .flat_map(|entry| as_items(entry, "changes"))
        .filter_map(|change| change.pointer("/value/messages/0"))
        .filter_map(|raw| {
            let message = match IncomingMessage::deserialize(raw) {
                Ok(message) => message,
                Err(e) => {
                    tracing::error!("Skipping malformed message: {}", BridgeError::from(e));
                    return None;
                }
            };
            match message.from {
                Some(sender_id) => Some(InboundMessage {
                    sender_id,
                    body_text: message.text.map(|t| t.body).unwrap_or_default(),
                }),
                None => {
                    tracing::warn!("Skipping message without sender");
                    None
                }
            }
        })
        .collect()
}

async fn dispatch(state: &AppState, message: InboundMessage) {
    let (http, cfg) = (&state.http, state.cfg.as_ref());
    let InboundMessage {
        sender_id,
        body_text,
    } = message;

    let intent = classify(Some(&body_text));
    tracing::info!(sender = %sender_id, ?intent, "Webhook received message");

    let result = match intent {
        Intent::Image => generate_image(http, cfg, &body_text)
            .await
            .map_or(GenerationResult::Failed, GenerationResult::Image),
        Intent::Text => generate_text(http, cfg, &body_text)
            .await
            .map_or(GenerationResult::Failed, GenerationResult::Text),
    };

    let delivered = match result {
        GenerationResult::Image(url) => send_image(http, cfg, &sender_id, &url).await,
        GenerationResult::Text(reply) => send_text(http, cfg, &sender_id, &reply).await,
        GenerationResult::Failed => {
            let fallback = match intent {
                Intent::Image => IMAGE_FALLBACK,
                Intent::Text => TEXT_FALLBACK,
            };
            send_text(http, cfg, &sender_id, fallback).await
        }
    };
    // the client already logged the failure, nothing is retried
    if let Err(e) = delivered {
        tracing::debug!(sender = %sender_id, "Reply not delivered: {e}");
    }
}
