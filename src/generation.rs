//! Gemini text and image generation.
//!
//! Both calls log their own failures and hand back a typed error, so the
//! caller only has to decide which fallback message to send.

use reqwest::Response;

use crate::{
    config::Config,
    error::BridgeError,
    types::{
        GeminiImagePrompt, GeminiImageRequest, GeminiImageResponse, GeminiTextRequest,
        GeminiTextResponse,
    },
};

pub async fn generate_text(
    http: &reqwest::Client,
    cfg: &Config,
    prompt: &str,
) -> Result<String, BridgeError> {
    let res = request_text(http, cfg, prompt).await;
    if let Err(e) = &res {
        tracing::error!("generate_text error: {e}");
    }
    res
}

pub async fn generate_image(
    http: &reqwest::Client,
    cfg: &Config,
    prompt: &str,
) -> Result<String, BridgeError> {
    let res = request_image(http, cfg, prompt).await;
    if let Err(e) = &res {
        tracing::error!("generate_image error: {e}");
    }
    res
}

async fn request_text(
    http: &reqwest::Client,
    cfg: &Config,
    prompt: &str,
) -> Result<String, BridgeError> {
    let res = http
        .post(&cfg.gemini_text_url)
        .query(&[("key", &cfg.gemini_api_key)])
        .timeout(cfg.text_timeout)
        .json(&GeminiTextRequest::from_prompt(prompt))
        .send()
        .await?;

    error_for_status(res)
        .await?
        .json::<GeminiTextResponse>()
        .await
        .map_err(body_error)?
        .first_text()
        .ok_or_else(|| BridgeError::UnexpectedShape("no candidate text".to_string()))
}

async fn request_image(
    http: &reqwest::Client,
    cfg: &Config,
    prompt: &str,
) -> Result<String, BridgeError> {
    let res = http
        .post(&cfg.gemini_image_url)
        .query(&[("key", &cfg.gemini_api_key)])
        .timeout(cfg.image_timeout)
        .json(&GeminiImageRequest {
            prompt: GeminiImagePrompt {
                text: prompt.to_owned(),
            },
        })
        .send()
        .await?;

    error_for_status(res)
        .await?
        .json::<GeminiImageResponse>()
        .await
        .map_err(body_error)?
        .first_url()
        .ok_or_else(|| BridgeError::UnexpectedShape("no generated image url".to_string()))
}

// A body that arrives but is not the expected JSON is a shape error; a body
// that never finishes arriving (timeout, reset) is a transport error.
fn body_error(e: reqwest::Error) -> BridgeError {
    if e.is_decode() {
        BridgeError::UnexpectedShape(e.to_string())
    } else {
        BridgeError::Transport(e)
    }
}

async fn error_for_status(res: Response) -> Result<Response, BridgeError> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(BridgeError::Upstream { status, body })
}
