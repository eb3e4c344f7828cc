use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct HttpHeader {
    pub name: String,
    pub value: String,
}

impl HttpHeader {
    pub fn new(name: &str, value: &str) -> Self {
        HttpHeader {
            name: name.to_owned(),
            value: value.to_owned(),
        }
    }

    /// Parses one `Name: value` wire line, trimming whitespace around both
    /// parts. A line without a colon is a parse error.
    pub fn from_line(line: &str) -> Result<Self> {
        let (name, value) = line
            .split_once(':')
            .with_context(|| format!("malformed header line: {}", line.trim_end()))?;

        Ok(HttpHeader::new(name.trim(), value.trim()))
    }
}

impl Display for HttpHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.value)
    }
}
