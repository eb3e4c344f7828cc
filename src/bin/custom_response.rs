//! Second step: same routing table as `serve_mux`, but the three-line
//! header/status/body dance is folded into the writer's `text` helper.

use anyhow::Result;
use log::{debug, error, info};
use std::io::Write;
use std::net::{TcpListener, TcpStream};
use std::process;

use router_sandbox::http::{HttpRequest, HttpStatusCode, ResponseWriter};

const LISTEN_ADDR: &str = "127.0.0.1:9000";

fn main() {
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    if let Err(err) = run() {
        error!("could not start server: {:#}", err);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let listener = TcpListener::bind(LISTEN_ADDR)?;
    info!("server started on {}", LISTEN_ADDR);

    for stream in listener.incoming() {
        let stream = stream?;
        if let Err(err) = handle(stream) {
            debug!("connection error: {:#}", err);
        }
    }

    Ok(())
}

fn handle(mut stream: TcpStream) -> Result<()> {
    let request = match HttpRequest::from_tcp(&stream) {
        Ok(request) => request,
        Err(err) => {
            debug!("dropping malformed request: {:#}", err);
            let mut writer = ResponseWriter::new();
            writer.text(HttpStatusCode::BadRequest, "Bad request");
            let _ = stream.write_all(&writer.finish().to_bytes());
            return Ok(());
        }
    };

    let mut writer = ResponseWriter::new();
    respond(&request, &mut writer);

    stream.write_all(&writer.finish().to_bytes())?;
    Ok(())
}

fn respond(request: &HttpRequest, writer: &mut ResponseWriter) {
    if let Some(name) = request.url.strip_prefix("/hello/") {
        writer.text(HttpStatusCode::OK, &format!("Hello {}", name));
    } else if request.url == "/hello" {
        writer.text(HttpStatusCode::OK, "Hello world");
    } else {
        writer.text(HttpStatusCode::NotFound, "Not found");
    }
}
