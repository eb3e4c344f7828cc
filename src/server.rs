use anyhow::{Context, Result};
use colored::Colorize;
use log::{debug, error, info, trace};
use std::{
    io::Write,
    net::{SocketAddr, TcpListener, TcpStream},
    sync::Arc,
};

use crate::{
    http::{HttpRequest, HttpResponse, HttpStatusCode, ResponseWriter},
    thread_pool::ThreadPool,
};

const WORKER_COUNT: usize = 4;

/// Anything that can answer one HTTP request by driving the response writer.
/// Handlers are shared across worker threads, so they take `&self`.
pub trait Handler: Send + Sync {
    fn handle(&self, request: &HttpRequest, writer: &mut ResponseWriter) -> Result<()>;
}

pub struct WebServer {
    pub addr: String,
    listener: TcpListener,
    pool: ThreadPool,
}

impl WebServer {
    pub fn bind(addr: &str) -> Result<Self> {
        let listener =
            TcpListener::bind(addr).with_context(|| format!("failed to bind {}", addr))?;
        let pool = ThreadPool::new(WORKER_COUNT)?;

        Ok(WebServer {
            addr: addr.to_owned(),
            listener,
            pool,
        })
    }

    /// Address the listener actually bound. Differs from `addr` when the
    /// caller asked for port 0.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    pub fn serve<H: Handler + 'static>(self, handler: H) -> Result<()> {
        let handler = Arc::new(handler);

        info!("server started on {}", self.addr);
        info!("awaiting connections...");

        for stream in self.listener.incoming() {
            trace!("got new tcp connection!");
            let stream = stream?;

            let handler = Arc::clone(&handler);
            self.pool.execute(move || {
                if let Err(err) = handle_connection(handler.as_ref(), stream) {
                    error!("error: {:#}", err);
                }
            });
        }

        Ok(())
    }
}

fn handle_connection<H: Handler>(handler: &H, mut stream: TcpStream) -> Result<()> {
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
    handler.handle(&request, &mut writer)?;

    let response = writer.finish();
    stream.write_all(&response.to_bytes())?;

    log_access(&request, &response);
    Ok(())
}

fn log_access(request: &HttpRequest, response: &HttpResponse) {
    let status = response.status.to_string();
    let status = match response.status.code() {
        200..=299 => status.green(),
        300..=399 => status.cyan(),
        400..=499 => status.yellow(),
        _ => status.red(),
    };

    info!(
        "{} \"{} {}\" -> {}",
        request.peer_addr, request.method, request.resource_path, status
    );
}
