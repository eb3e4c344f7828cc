use anyhow::Result;
use serde::Serialize;

use crate::http::{HttpRequest, HttpStatusCode, ResponseWriter};

/// Everything a route callback gets for one request: the parsed request, the
/// substrings its pattern captured from the path, and the response writer,
/// reachable only through forwarding methods so the write discipline stays in
/// one place.
pub struct RequestContext<'a> {
    pub request: &'a HttpRequest,
    pub captures: Vec<String>,
    writer: &'a mut ResponseWriter,
}

impl<'a> RequestContext<'a> {
    pub fn new(
        request: &'a HttpRequest,
        writer: &'a mut ResponseWriter,
        captures: Vec<String>,
    ) -> Self {
        RequestContext {
            request,
            captures,
            writer,
        }
    }

    pub fn capture(&self, index: usize) -> Option<&str> {
        self.captures.get(index).map(String::as_str)
    }

    pub fn set_header(&mut self, name: &str, value: &str) {
        self.writer.set_header(name, value);
    }

    pub fn write_status(&mut self, status: HttpStatusCode) {
        self.writer.write_status(status);
    }

    pub fn write_body(&mut self, chunk: &[u8]) {
        self.writer.write_body(chunk);
    }

    pub fn text(&mut self, status: HttpStatusCode, body: &str) {
        self.writer.text(status, body);
    }

    pub fn json<T: Serialize>(&mut self, status: HttpStatusCode, body: &T) -> Result<()> {
        self.writer.json(status, body)
    }
}
