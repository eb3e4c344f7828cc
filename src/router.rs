use anyhow::{Context, Result};
use log::debug;
use regex::Regex;

use crate::context::RequestContext;
use crate::http::{HttpRequest, HttpStatusCode, ResponseWriter};
use crate::server::Handler;

pub type RouteCallback = fn(&mut RequestContext) -> Result<()>;

#[derive(Debug)]
pub struct Route {
    pub pattern: Regex,
    pub callback: RouteCallback,
}

/// Ordered route table. Patterns are tried in registration order against the
/// request path and the first match wins, so registration order is part of
/// the routing behavior.
#[derive(Debug)]
pub struct Router {
    pub routes: Vec<Route>,
    fallback: RouteCallback,
}

impl Router {
    pub fn new() -> Self {
        Router {
            routes: Vec::new(),
            fallback: default_not_found,
        }
    }

    /// Appends a route. The pattern is a regular expression matched against
    /// the request path (query string excluded); anchor it with `^` and `$`
    /// unless a substring match is what you want.
    pub fn route(mut self, pattern: &str, callback: RouteCallback) -> Result<Self> {
        let pattern = Regex::new(pattern)
            .with_context(|| format!("invalid route pattern: {}", pattern))?;
        self.routes.push(Route { pattern, callback });
        Ok(self)
    }

    /// Replaces the handler used when no route matches. The default one
    /// answers with a plain text 404.
    pub fn fallback(mut self, callback: RouteCallback) -> Self {
        self.fallback = callback;
        self
    }

    pub fn dispatch(&self, request: &HttpRequest, writer: &mut ResponseWriter) -> Result<()> {
        for route in &self.routes {
            if let Some(captures) = route.pattern.captures(&request.url) {
                debug!("{} {} -> {}", request.method, request.url, route.pattern);

                let captures = captures
                    .iter()
                    .skip(1)
                    .map(|group| group.map_or_else(String::new, |m| m.as_str().to_owned()))
                    .collect();

                let mut context = RequestContext::new(request, writer, captures);
                return (route.callback)(&mut context);
            }
        }

        debug!("{} {} -> no route matched", request.method, request.url);

        let mut context = RequestContext::new(request, writer, Vec::new());
        (self.fallback)(&mut context)
    }
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Handler for Router {
    fn handle(&self, request: &HttpRequest, writer: &mut ResponseWriter) -> Result<()> {
        self.dispatch(request, writer)
    }
}

fn default_not_found(context: &mut RequestContext) -> Result<()> {
    context.text(HttpStatusCode::NotFound, "Not found");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::{HttpRequestRaw, HttpResponse};
    use chrono::{DateTime, Utc};

    fn get_request(path: &str) -> HttpRequest {
        HttpRequest::from_raw_request(HttpRequestRaw {
            request_line: format!("GET {} HTTP/1.1", path),
            headers: Vec::new(),
            body: Vec::new(),
            peer_addr: "127.0.0.1:4242".parse().unwrap(),
        })
        .unwrap()
    }

    fn dispatch(router: &Router, path: &str) -> HttpResponse {
        let request = get_request(path);
        let mut writer = ResponseWriter::new();
        router.dispatch(&request, &mut writer).unwrap();
        writer.finish()
    }

    fn hello_world(context: &mut RequestContext) -> Result<()> {
        context.text(HttpStatusCode::OK, "Hello world");
        Ok(())
    }

    fn hello_name(context: &mut RequestContext) -> Result<()> {
        let name = context.capture(0).unwrap_or("").to_owned();
        context.text(HttpStatusCode::OK, &format!("Hello {}", name));
        Ok(())
    }

    fn echo_captures(context: &mut RequestContext) -> Result<()> {
        let body = context.captures.join(",");
        context.text(HttpStatusCode::OK, &body);
        Ok(())
    }

    fn teapot(context: &mut RequestContext) -> Result<()> {
        context.text(HttpStatusCode::ImATeapot, "I'm a teapot");
        Ok(())
    }

    fn hello_router() -> Router {
        Router::new()
            .route(r"^/hello$", hello_world)
            .unwrap()
            .route(r"^/hello/([\w._-]+)$", hello_name)
            .unwrap()
    }

    #[test]
    fn test_exact_route_matches() {
        let response = dispatch(&hello_router(), "/hello");

        assert_eq!(HttpStatusCode::OK, response.status);
        assert_eq!(b"Hello world\n".to_vec(), response.body);
    }

    #[test]
    fn test_capture_group_reaches_the_callback() {
        let response = dispatch(&hello_router(), "/hello/Patrick");

        assert_eq!(HttpStatusCode::OK, response.status);
        assert_eq!(b"Hello Patrick\n".to_vec(), response.body);
    }

    #[test]
    fn test_unmatched_path_falls_back_to_not_found() {
        let response = dispatch(&hello_router(), "/missing");

        assert_eq!(HttpStatusCode::NotFound, response.status);
        assert_eq!(b"Not found\n".to_vec(), response.body);
    }

    #[test]
    fn test_trailing_slash_does_not_match_anchored_routes() {
        let response = dispatch(&hello_router(), "/hello/");

        assert_eq!(HttpStatusCode::NotFound, response.status);
        assert_eq!(b"Not found\n".to_vec(), response.body);
    }

    #[test]
    fn test_first_registered_match_wins() {
        let router = Router::new()
            .route(r"^/hello/([\w._-]+)$", hello_name)
            .unwrap()
            .route(r"^/hello/world$", teapot)
            .unwrap();

        let response = dispatch(&router, "/hello/world");

        assert_eq!(HttpStatusCode::OK, response.status);
        assert_eq!(b"Hello world\n".to_vec(), response.body);
    }

    #[test]
    fn test_captures_keep_pattern_order() {
        let router = Router::new()
            .route(r"^/add/(\d+)/(\d+)$", echo_captures)
            .unwrap();

        let response = dispatch(&router, "/add/3/4");

        assert_eq!(b"3,4\n".to_vec(), response.body);
    }

    #[test]
    fn test_unmatched_optional_group_becomes_empty_string() {
        let router = Router::new()
            .route(r"^/files/(\w+)(?:\.(\w+))?$", echo_captures)
            .unwrap();

        let response = dispatch(&router, "/files/report");

        assert_eq!(b"report,\n".to_vec(), response.body);
    }

    #[test]
    fn test_route_without_groups_yields_no_captures() {
        let router = Router::new().route(r"^/ping$", echo_captures).unwrap();

        let response = dispatch(&router, "/ping");

        assert_eq!(b"\n".to_vec(), response.body);
    }

    #[test]
    fn test_invalid_pattern_is_rejected_at_registration() {
        let result = Router::new().route(r"(/hello", hello_world);

        let err = result.err().unwrap();
        assert!(err.to_string().contains("invalid route pattern"));
    }

    #[test]
    fn test_fallback_can_be_replaced() {
        let router = hello_router().fallback(teapot);

        let response = dispatch(&router, "/missing");

        assert_eq!(HttpStatusCode::ImATeapot, response.status);
        assert_eq!(b"I'm a teapot\n".to_vec(), response.body);
    }

    #[test]
    fn test_empty_router_answers_not_found() {
        let response = dispatch(&Router::new(), "/anything");

        assert_eq!(HttpStatusCode::NotFound, response.status);
    }

    #[test]
    fn test_query_string_is_not_part_of_the_match() {
        let response = dispatch(&hello_router(), "/hello?verbose=true");

        assert_eq!(HttpStatusCode::OK, response.status);
        assert_eq!(b"Hello world\n".to_vec(), response.body);
    }

    #[test]
    fn test_unanchored_patterns_match_anywhere_in_the_path() {
        let router = Router::new()
            .route(r"/hello/([\w._-]+)$", hello_name)
            .unwrap();

        let direct = dispatch(&router, "/hello/Ann");
        assert_eq!(b"Hello Ann\n".to_vec(), direct.body);

        let nested = dispatch(&router, "/v1/hello/Ann");
        assert_eq!(HttpStatusCode::OK, nested.status);
        assert_eq!(b"Hello Ann\n".to_vec(), nested.body);
    }

    #[test]
    fn test_repeated_dispatch_is_byte_identical() {
        let router = hello_router();
        let date: DateTime<Utc> = DateTime::parse_from_rfc2822("Tue, 29 Oct 2024 16:56:32 +0000")
            .unwrap()
            .with_timezone(&Utc);

        let render = || {
            let request = get_request("/hello/Patrick");
            let mut writer = ResponseWriter::new();
            writer.set_date(date);
            router.dispatch(&request, &mut writer).unwrap();
            writer.finish().to_bytes()
        };

        assert_eq!(render(), render());
    }

    #[test]
    fn test_router_dispatches_through_the_handler_trait() {
        let router = hello_router();
        let handler: &dyn Handler = &router;

        let request = get_request("/hello");
        let mut writer = ResponseWriter::new();
        handler.handle(&request, &mut writer).unwrap();

        let response = writer.finish();
        assert_eq!(b"Hello world\n".to_vec(), response.body);
    }
}
