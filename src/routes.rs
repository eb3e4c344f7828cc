use anyhow::{Context, Result};

use crate::context::RequestContext;
use crate::http::HttpStatusCode;

pub fn hello_world(context: &mut RequestContext) -> Result<()> {
    context.text(HttpStatusCode::OK, "Hello world");
    Ok(())
}

pub fn hello_name(context: &mut RequestContext) -> Result<()> {
    let name = context
        .capture(0)
        .context("hello route pattern should capture a name")?
        .to_owned();

    context.text(HttpStatusCode::OK, &format!("Hello {}", name));
    Ok(())
}

/// Answers with the parsed request serialized as JSON, handy for checking
/// what the server actually understood.
pub fn mirror(context: &mut RequestContext) -> Result<()> {
    let request = context.request;
    context.json(HttpStatusCode::OK, request)
}
