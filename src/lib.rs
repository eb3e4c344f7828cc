//! Hand-rolled HTTP plumbing for small routing experiments: a request and
//! response layer over `TcpListener`, a threaded server, and a regex-based
//! router with ordered first-match dispatch.

pub mod context;
pub mod http;
pub mod router;
pub mod routes;
pub mod server;
pub mod thread_pool;

pub use context::RequestContext;
pub use router::{Route, RouteCallback, Router};
pub use server::{Handler, WebServer};
