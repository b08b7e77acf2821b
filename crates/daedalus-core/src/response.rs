//! Response contract.

use crate::{CoreResult, RequestStatus};
use bytes::Bytes;
use http::StatusCode;
use std::fmt;

/// Encoding assumed when a caller does not name one.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// Callback that writes response content into a text sink.
pub type ContentWriter<'a> = &'a mut dyn FnMut(&mut dyn fmt::Write) -> fmt::Result;

/// An outbound response as seen by an application.
///
/// Setters return the response again so calls can be chained:
///
/// ```rust,ignore
/// request
///     .create_response()?
///     .status(StatusCode::OK)
///     .header("Content-Type", "text/plain")
///     .content_text("pong", DEFAULT_ENCODING)
///     .send();
/// ```
pub trait ApplicationResponse {
    /// Sets a header, replacing any previous value.
    fn header(&mut self, name: &str, value: &str) -> &mut dyn ApplicationResponse;

    /// Sets the status code.
    fn status(&mut self, code: StatusCode) -> &mut dyn ApplicationResponse;

    /// Sets a text body written with the given encoding.
    fn content_text(&mut self, text: &str, encoding: &str) -> &mut dyn ApplicationResponse;

    /// Sets a binary body.
    fn content_bytes(&mut self, bytes: Bytes) -> CoreResult<&mut dyn ApplicationResponse>;

    /// Sets the body from whatever `writer` writes.
    fn content_stream(
        &mut self,
        writer: ContentWriter<'_>,
    ) -> CoreResult<&mut dyn ApplicationResponse>;

    /// Finishes the response.
    fn send(&mut self) -> RequestStatus;
}
