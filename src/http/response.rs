use std::collections::BTreeMap;

use super::{HttpHeader, HttpStatusCode, HttpVersion};

/// A complete response, ready to serialize. Headers live in a `BTreeMap` so
/// the serialized order is deterministic.
#[derive(Debug)]
pub struct HttpResponse {
    pub version: HttpVersion,
    pub status: HttpStatusCode,
    pub headers: BTreeMap<String, HttpHeader>,
    pub body: Vec<u8>,
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpResponse {
    pub fn new() -> Self {
        HttpResponse {
            version: HttpVersion::HTTP1_1,
            status: HttpStatusCode::OK,
            headers: BTreeMap::new(),
            body: Vec::new(),
        }
    }

    pub fn start_line(&self) -> String {
        format!("{} {}", self.version, self.status)
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        let mut head = format!("{}\r\n", self.start_line());

        for header in self.headers.values() {
            head.push_str(&format!("{}\r\n", header));
        }
        head.push_str("\r\n");

        let mut bytes = head.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}
