//! Per-row request construction

use apiverify_core::{Row, RunConfig, populate};
use reqwest::{Method, Url};

/// One fully substituted request, derived from config + row. No further
/// mutation after construction.
#[derive(Debug, Clone)]
pub struct PopulatedRequest {
    pub method: Method,
    pub url: Url,
    /// Path plus query string, as emitted in the per-row log line.
    pub path_and_query: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub row_id: i64,
}

/// Build the concrete request for one row.
///
/// Path placeholders matching row fields are substituted in place;
/// unmatched placeholders stay literal and go out as-is. Query parameters
/// are resolved through the template engine in configured order, and
/// resolved-empty values are still included. Header values are templated,
/// header names are not. An absent body template means no body.
///
/// # Errors
///
/// Fails when the method or path is missing, the method is not a valid
/// HTTP token, or the resolved URL is not well-formed.
pub fn build_request(config: &RunConfig, row: &Row) -> Result<PopulatedRequest, BuildError> {
    if config.request_method.trim().is_empty() {
        return Err(BuildError::MissingMethod);
    }
    if config.url_path.trim().is_empty() {
        return Err(BuildError::MissingPath);
    }

    let method = Method::from_bytes(config.request_method.as_bytes())
        .map_err(|_| BuildError::InvalidMethod(config.request_method.clone()))?;

    let path = populate(Some(&config.url_path), row);

    let mut path_and_query = path;
    if !config.url_params.is_empty() {
        let query = config
            .url_params
            .iter()
            .map(|p| format!("{}={}", p.name, populate(Some(&p.value), row)))
            .collect::<Vec<_>>()
            .join("&");
        path_and_query.push('?');
        path_and_query.push_str(&query);
    }

    let full = format!("{}{}", config.url_base, path_and_query);
    let url = Url::parse(&full).map_err(|e| BuildError::InvalidUrl(format!("{full}: {e}")))?;

    let headers = config
        .header_params
        .iter()
        .map(|p| (p.name.clone(), populate(Some(&p.value), row)))
        .collect();

    let body = config
        .request_body
        .as_deref()
        .map(|template| populate(Some(template), row));

    Ok(PopulatedRequest {
        method,
        url,
        path_and_query,
        headers,
        body,
        row_id: row.id(),
    })
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing request method")]
    MissingMethod,
    #[error("Missing url path")]
    MissingPath,
    #[error("Invalid HTTP method '{0}'")]
    InvalidMethod(String),
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}
