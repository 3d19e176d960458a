//! Minimal blocking HTTP/JSON exchange over libcurl.

use anyhow::{Context, Result};
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Method {
    Get,
    Post,
}

#[derive(Debug)]
pub(super) struct HttpResponse {
    pub status: u32,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs one request. `headers` are full `Name: value` lines.
/// Runs in the current thread; call from `spawn_blocking` in async code.
pub(super) fn send(
    method: Method,
    url: &str,
    headers: &[String],
    body: Option<&[u8]>,
) -> Result<HttpResponse> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.connect_timeout(Duration::from_secs(10))?;
    easy.timeout(Duration::from_secs(30))?;
    match method {
        Method::Get => easy.get(true)?,
        Method::Post => {
            easy.post(true)?;
            easy.post_fields_copy(body.unwrap_or_default())?;
        }
    }

    let mut list = curl::easy::List::new();
    for h in headers {
        list.append(h)?;
    }
    easy.http_headers(list)?;

    let mut data = Vec::new();
    {
        let mut transfer = easy.transfer();
        transfer.write_function(|chunk| {
            data.extend_from_slice(chunk);
            Ok(chunk.len())
        })?;
        transfer
            .perform()
            .with_context(|| format!("request to {url} failed"))?;
    }

    let status = easy.response_code().context("no response code")?;
    Ok(HttpResponse { status, body: data })
}
