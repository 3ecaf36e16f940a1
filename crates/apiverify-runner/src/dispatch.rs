//! Single-attempt request dispatch

use std::time::Instant;

use apiverify_core::{RequestOutcome, TRANSPORT_FAILURE_STATUS};
use reqwest::blocking::Client;

use crate::request::PopulatedRequest;

/// Execute one request. Exactly one attempt: no retry, no backoff.
///
/// A transport-level failure (connection refused, timeout) becomes an
/// outcome with the sentinel failure status and the error text as body,
/// so the run can continue with the next row. The timeout lives on the
/// client; neither config nor row is touched.
#[must_use]
pub fn execute(client: &Client, request: &PopulatedRequest) -> RequestOutcome {
    let mut builder = client.request(request.method.clone(), request.url.clone());
    for (name, value) in &request.headers {
        // Values a row made invalid for HTTP never reach the server anyway.
        if reqwest::header::HeaderValue::from_str(value).is_ok() {
            builder = builder.header(name, value);
        }
    }
    if let Some(ref body) = request.body {
        builder = builder.body(body.clone());
    }

    let start = Instant::now();
    match builder.send() {
        Ok(response) => {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            RequestOutcome {
                row_id: request.row_id,
                status,
                body,
                elapsed: start.elapsed(),
            }
        }
        Err(e) => RequestOutcome {
            row_id: request.row_id,
            status: TRANSPORT_FAILURE_STATUS,
            body: e.to_string(),
            elapsed: start.elapsed(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn transport_failure_becomes_sentinel_outcome() {
        // Nothing listens on this port; connection must be refused.
        let client = Client::builder()
            .timeout(Duration::from_millis(500))
            .build()
            .unwrap();
        let request = PopulatedRequest {
            method: reqwest::Method::GET,
            url: reqwest::Url::parse("http://127.0.0.1:1/unreachable").unwrap(),
            path_and_query: "/unreachable".into(),
            headers: vec![],
            body: None,
            row_id: 7,
        };

        let outcome = execute(&client, &request);
        assert_eq!(outcome.status, TRANSPORT_FAILURE_STATUS);
        assert_eq!(outcome.row_id, 7);
        assert!(!outcome.is_success());
        assert!(!outcome.body.is_empty());
    }
}
