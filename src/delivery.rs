use reqwest::StatusCode;

use crate::{config::Config, error::BridgeError, types::OutgoingMessage};

/// Send a text reply. A non-2xx answer is logged and returned as `Ok`;
/// only transport failures are errors.
pub async fn send_text(
    http: &reqwest::Client,
    cfg: &Config,
    to: &str,
    message: &str,
) -> Result<StatusCode, BridgeError> {
    post_message(http, cfg, "send_text", &OutgoingMessage::text(to, message)).await
}

pub async fn send_image(
    http: &reqwest::Client,
    cfg: &Config,
    to: &str,
    image_url: &str,
) -> Result<StatusCode, BridgeError> {
    post_message(http, cfg, "send_image", &OutgoingMessage::image(to, image_url)).await
}

async fn post_message(
    http: &reqwest::Client,
    cfg: &Config,
    op: &str,
    body: &OutgoingMessage,
) -> Result<StatusCode, BridgeError> {
    let res = http
        .post(cfg.messages_url())
        .bearer_auth(&cfg.whatsapp_token)
        .json(body)
        .send()
        .await
        .map_err(|e| {
            tracing::error!("{op} request error: {e}");
            BridgeError::Transport(e)
        })?;

    let status = res.status();
    let text = res.text().await.unwrap_or_default();
    if status.is_success() {
        tracing::info!("{op} status={status} body={text}");
    } else {
        tracing::warn!("{op} status={status} body={text}");
    }
    Ok(status)
}
