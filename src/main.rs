use anyhow::Result;
use log::error;
use std::process;

use router_sandbox::{routes, Router, WebServer};

const LISTEN_ADDR: &str = "127.0.0.1:9000";

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    if let Err(err) = run() {
        error!("could not start server: {:#}", err);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let router = Router::new()
        .route(r"^/hello$", routes::hello_world)?
        .route(r"^/hello/([\w._-]+)$", routes::hello_name)?
        .route(r"^/mirror$", routes::mirror)?;

    WebServer::bind(LISTEN_ADDR)?.serve(router)
}
