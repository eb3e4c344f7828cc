use anyhow::{bail, Context, Result};
use std::{
    io::{BufRead, BufReader, Read},
    net::{SocketAddr, TcpStream},
};

use super::HttpHeader;

/// One request as it came off the wire: the request line, the header lines
/// and the body bytes, with no interpretation applied yet.
pub struct HttpRequestRaw {
    pub request_line: String,
    pub headers: Vec<HttpHeader>,
    pub body: Vec<u8>,
    pub peer_addr: SocketAddr,
}

impl HttpRequestRaw {
    pub fn from_tcp(stream: &TcpStream) -> Result<HttpRequestRaw> {
        let peer_addr = stream.peer_addr()?;
        let mut reader = BufReader::new(stream);

        let mut request_line = String::new();
        reader.read_line(&mut request_line)?;
        if request_line.trim().is_empty() {
            bail!("connection closed before a request line was sent");
        }

        let mut headers = Vec::new();
        let mut line = String::new();
        while reader.read_line(&mut line)? > 0 {
            if line.trim().is_empty() {
                break;
            }

            headers.push(HttpHeader::from_line(&line)?);

            line.clear();
        }

        let mut body = Vec::new();
        if let Some(header) = headers
            .iter()
            .find(|header| header.name.eq_ignore_ascii_case("Content-Length"))
        {
            let content_length: usize = header
                .value
                .parse()
                .with_context(|| format!("invalid Content-Length: {}", header.value))?;

            if content_length > 0 {
                body = vec![0; content_length];
                reader.read_exact(&mut body)?;
            }
        }

        Ok(HttpRequestRaw {
            request_line,
            headers,
            body,
            peer_addr,
        })
    }
}
