use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::{Arc, Mutex};

use crate::data::store::{Database, Store};
use crate::session::Selection;

pub mod api;
pub mod routes;
pub mod static_files;

/// Shared per-process server state: the loaded database and the current
/// selection. The database is immutable post-load; the selection is the
/// only mutable piece and sits behind a mutex.
pub struct ServerContext {
    pub database: Arc<Database>,
    pub selection: Mutex<Selection>,
}

impl ServerContext {
    pub fn new(database: Arc<Database>) -> Self {
        ServerContext {
            database,
            selection: Mutex::new(Selection::new()),
        }
    }
}

/// Load the store, then serve until killed. Refuses to serve before a
/// successful load so no request ever sees a half-ready database.
pub fn run_server(bind_addr: &str) -> std::io::Result<()> {
    let store = Store::new();
    let runtime = tokio::runtime::Runtime::new()?;
    let database = runtime
        .block_on(store.load())
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::InvalidData, err.to_string()))?;
    println!("{}", database.summary());

    let ctx = ServerContext::new(database);
    let listener = TcpListener::bind(bind_addr)?;
    println!("unitscope server listening on http://{bind_addr}");

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&ctx, &mut stream) {
                    eprintln!("request error: {err}");
                }
            }
            Err(err) => eprintln!("connection failed: {err}"),
        }
    }

    Ok(())
}

fn handle_connection(ctx: &ServerContext, stream: &mut TcpStream) -> std::io::Result<()> {
    let mut buffer = [0_u8; 16_384];
    let bytes_read = stream.read(&mut buffer)?;
    if bytes_read == 0 {
        return Ok(());
    }

    let request = String::from_utf8_lossy(&buffer[..bytes_read]);
    let mut lines = request.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET");
    let path = request_parts.next().unwrap_or("/");

    let body = request
        .split("\r\n\r\n")
        .nth(1)
        .or_else(|| request.split("\n\n").nth(1))
        .unwrap_or("");

    let response = routes::route_request(ctx, method, path, body).to_http_string();
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}
