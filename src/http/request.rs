use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, net::SocketAddr, net::TcpStream, str::FromStr};

use super::{HttpHeader, HttpMethod, HttpRequestRaw, HttpVersion};

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub resource_path: String,
    pub version: HttpVersion,

    /// Resource path with the query string stripped. Routing matches on this.
    pub url: String,
    pub query: HashMap<String, String>,

    pub headers: HashMap<String, HttpHeader>,
    pub body: Vec<u8>,

    pub peer_addr: SocketAddr,
}

impl HttpRequest {
    pub fn from_raw_request(raw_request: HttpRequestRaw) -> Result<HttpRequest> {
        let (method, resource_path, version) =
            Self::parse_request_line(&raw_request.request_line)?;

        let (url, query) = match resource_path.split_once('?') {
            Some((url, query_line)) => (url.to_owned(), Self::parse_query_line(query_line)?),
            None => (resource_path.clone(), HashMap::new()),
        };

        let headers: HashMap<String, HttpHeader> = raw_request
            .headers
            .into_iter()
            .map(|header| (header.name.to_owned(), header))
            .collect();

        Ok(HttpRequest {
            method,
            resource_path,
            version,
            url,
            query,
            headers,
            body: raw_request.body,
            peer_addr: raw_request.peer_addr,
        })
    }

    pub fn from_tcp(stream: &TcpStream) -> Result<HttpRequest> {
        let raw_request = HttpRequestRaw::from_tcp(stream)?;
        Self::from_raw_request(raw_request)
    }

    pub fn parse_request_line(request_line: &str) -> Result<(HttpMethod, String, HttpVersion)> {
        let mut parts = request_line.split_whitespace();

        let method = parts.next().context("request line should have a verb")?;
        let method = HttpMethod::from_str(method)?;

        let resource_path = parts
            .next()
            .context("request line should have a resource path")?
            .to_owned();

        let version = parts
            .next()
            .context("request line should have an HTTP version")?;
        let version = HttpVersion::from_str(version)?;

        Ok((method, resource_path, version))
    }

    fn parse_query_line(query_line: &str) -> Result<HashMap<String, String>> {
        let mut result = HashMap::new();

        for param in query_line.split('&') {
            let (key, value) = param
                .split_once('=')
                .context("query parameter should be a key=value pair")?;
            result.insert(key.to_owned(), value.to_owned());
        }

        Ok(result)
    }
}
