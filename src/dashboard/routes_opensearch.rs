//! # OpenSearch descriptor (C8, §4.8 / §6)
//!
//! Serves the UTF-8 XML document browsers use to discover this service's
//! search and suggestions URL templates. `{origin}` is derived from the
//! inbound request's `Host` header (falling back to `X-Forwarded-Proto` for
//! the scheme, since the service commonly sits behind a TLS-terminating
//! proxy).

use axum::http::{header, HeaderMap};
use axum::response::IntoResponse;

fn origin_from_headers(headers: &HeaderMap) -> String {
    let scheme = headers
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("https");
    let host = headers
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("localhost");

    // Round-trip through `url::Url` so we serve the canonical ASCII origin
    // (lowercased host, default port stripped) rather than echoing the
    // `Host` header verbatim.
    match url::Url::parse(&format!("{scheme}://{host}")) {
        Ok(parsed) => parsed.origin().ascii_serialization(),
        Err(_) => format!("{scheme}://{host}"),
    }
}

pub async fn handler_opensearch(headers: HeaderMap) -> impl IntoResponse {
    let origin = origin_from_headers(&headers);
    let body = format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<OpenSearchDescription xmlns="http://a9.com/-/spec/opensearch/1.1/" xmlns:moz="http://www.mozilla.org/2006/browser/search/">
  <ShortName>shortbang</ShortName>
  <Description>Bang-style search shortcuts and autocomplete</Description>
  <InputEncoding>UTF-8</InputEncoding>
  <Image width="16" height="16" type="image/x-icon">{origin}/favicon.ico</Image>
  <Url type="text/html" method="get" template="{origin}/search?q={{searchTerms}}"/>
  <Url type="application/x-suggestions+json" method="get" template="{origin}/api/suggest?q={{searchTerms}}"/>
  <moz:SearchForm>{origin}/</moz:SearchForm>
</OpenSearchDescription>
"#
    );

    (
        [
            (header::CONTENT_TYPE, "application/opensearchdescription+xml; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=86400"),
        ],
        body,
    )
}
