use anyhow::Result;
use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;

use super::{HttpHeader, HttpResponse, HttpStatusCode};

/// Buffered response writer handed to request handlers.
///
/// Follows the usual platform write discipline: headers can be set until the
/// status is written, the first body write implies status 200, and anything
/// after the status has been written that would change the header block is
/// silently ignored.
pub struct ResponseWriter {
    response: HttpResponse,
    header_written: bool,
}

impl Default for ResponseWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseWriter {
    pub fn new() -> Self {
        let mut writer = ResponseWriter {
            response: HttpResponse::new(),
            header_written: false,
        };
        writer.set_date(Utc::now());
        writer
    }

    pub fn set_header(&mut self, name: &str, value: &str) {
        if self.header_written {
            debug!("ignoring header {} set after the status was written", name);
            return;
        }

        self.response
            .headers
            .insert(name.to_owned(), HttpHeader::new(name, value));
    }

    pub fn set_date(&mut self, date: DateTime<Utc>) {
        let date = date.format("%a, %d %b %Y %H:%M:%S GMT").to_string();
        self.set_header("Date", &date);
    }

    pub fn write_status(&mut self, status: HttpStatusCode) {
        if self.header_written {
            debug!("ignoring superfluous status write: {}", status);
            return;
        }

        self.response.status = status;
        self.header_written = true;
    }

    pub fn write_body(&mut self, chunk: &[u8]) {
        if !self.header_written {
            self.write_status(HttpStatusCode::OK);
        }

        self.response.body.extend_from_slice(chunk);
    }

    /// Plain-text convenience: content type first, then the status line, then
    /// the body with a single trailing newline.
    pub fn text(&mut self, status: HttpStatusCode, body: &str) {
        self.set_header("Content-Type", "text/plain");
        self.write_status(status);
        self.write_body(format!("{}\n", body).as_bytes());
    }

    pub fn json<T: Serialize>(&mut self, status: HttpStatusCode, body: &T) -> Result<()> {
        let mut body = serde_json::to_vec(body)?;
        body.push(b'\n');

        self.set_header("Content-Type", "application/json");
        self.write_status(status);
        self.write_body(&body);
        Ok(())
    }

    /// Consumes the writer into the finished response. A writer nobody wrote
    /// to finishes as an empty 200. `Content-Length` always reflects the
    /// buffered body.
    pub fn finish(mut self) -> HttpResponse {
        let length = self.response.body.len().to_string();
        self.response.headers.insert(
            "Content-Length".to_owned(),
            HttpHeader::new("Content-Length", &length),
        );

        self.response
    }
}
