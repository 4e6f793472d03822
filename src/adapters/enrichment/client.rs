//! Shared HTTP client for evidence sources.

use std::time::Duration;

use futures::{pin_mut, Stream, StreamExt};
use reqwest::redirect::Policy;
use reqwest::{Client, Response};

use super::target::ensure_public_target;
use crate::ports::EvidenceError;

/// Default per-request timeout for evidence fetches.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_millis(4_000);

/// Default user agent sent with evidence fetches.
pub const DEFAULT_USER_AGENT: &str = concat!("maturity-lens/", env!("CARGO_PKG_VERSION"));

/// Largest body read from any source.
const MAX_BODY_BYTES: usize = 512 * 1024;

const MAX_REDIRECTS: usize = 5;

/// Builds the client every evidence source shares.
///
/// Redirects are followed only toward public hosts.
pub fn build_client(request_timeout: Duration, user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(request_timeout)
        .connect_timeout(request_timeout)
        .user_agent(user_agent)
        .redirect(redirect_policy())
        .build()
}

fn redirect_policy() -> Policy {
    Policy::custom(|attempt| {
        if attempt.previous().len() >= MAX_REDIRECTS {
            return attempt.error("too many redirects");
        }
        match ensure_public_target(attempt.url()) {
            Ok(()) => attempt.follow(),
            Err(error) => {
                tracing::warn!(url = %attempt.url(), error = %error, "Refusing redirect");
                attempt.stop()
            }
        }
    })
}

/// Fails on non-2xx answers.
pub(crate) fn require_success(response: Response) -> Result<Response, EvidenceError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(EvidenceError::Status {
            status: status.as_u16(),
        })
    }
}

/// Reads a text body, keeping at most the leading `MAX_BODY_BYTES`.
///
/// The body is streamed; nothing past the cap is downloaded.
pub(crate) async fn read_text(response: Response) -> Result<String, EvidenceError> {
    let body = read_capped(response.bytes_stream(), MAX_BODY_BYTES).await?;
    Ok(String::from_utf8_lossy(&body).into_owned())
}

/// Collects chunks until the stream ends or `cap` bytes are held.
async fn read_capped<S, B, E>(chunks: S, cap: usize) -> Result<Vec<u8>, E>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
{
    pin_mut!(chunks);
    let mut body = Vec::new();
    while let Some(chunk) = chunks.next().await {
        let chunk = chunk?;
        let bytes = chunk.as_ref();
        let remaining = cap - body.len();
        if bytes.len() >= remaining {
            body.extend_from_slice(&bytes[..remaining]);
            tracing::debug!(cap, "Evidence body truncated");
            break;
        }
        body.extend_from_slice(bytes);
    }
    Ok(body)
}
