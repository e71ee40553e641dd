//! X-Advisor-* response headers.
//!
//! Error responses keep the plain `{"error": ...}` body; the machine-readable
//! kind goes in a header so clients can branch without parsing messages.

/// Error kind code on failed recommendations (lowercase for HTTP/2).
pub const ERROR_KIND_HEADER: &str = "x-advisor-error-kind";
