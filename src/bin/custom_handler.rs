//! Third step: the accept loop moves into `WebServer` and the application
//! shrinks to a single type implementing `Handler`. No routing yet, every
//! path gets the same greeting.

use anyhow::Result;
use log::error;
use std::process;

use router_sandbox::http::{HttpRequest, HttpStatusCode, ResponseWriter};
use router_sandbox::{Handler, WebServer};

const LISTEN_ADDR: &str = "127.0.0.1:9000";

struct App;

impl Handler for App {
    fn handle(&self, _request: &HttpRequest, writer: &mut ResponseWriter) -> Result<()> {
        writer.text(HttpStatusCode::OK, "Hello world");
        Ok(())
    }
}

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    if let Err(err) = run() {
        error!("could not start server: {:#}", err);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    WebServer::bind(LISTEN_ADDR)?.serve(App)
}
