//! Console logging helpers
//!
//! Human-readable status lines on stdout, warnings and errors on stderr.
//! Output is for people watching a terminal, not for machine parsing.

use chrono::Local;
use hyper::{Method, Uri, Version};
use std::net::SocketAddr;
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn log_startup(addr: &SocketAddr, root: &Path, workers: Option<usize>) {
    println!("======================================");
    println!("corserve development server started");
    println!("Listening on: http://{addr}");
    println!("Serving files from: {}", root.display());
    if let Some(workers) = workers {
        println!("Worker threads: {workers}");
    }
    println!("Press Ctrl+C to stop");
    println!("======================================\n");
}

pub fn log_missing_entry(marker: &Path) {
    eprintln!("[ERROR] Entry file not found: {}", marker.display());
    match std::env::current_dir() {
        Ok(cwd) => eprintln!("        Current directory: {}", cwd.display()),
        Err(e) => eprintln!("        Current directory: <unavailable: {e}>"),
    }
    eprintln!("        Run corserve from the project directory that contains it");
}

pub fn log_port_in_use(addr: &SocketAddr) {
    eprintln!("[ERROR] Port {} is already in use", addr.port());
    eprintln!("        Close the conflicting process or configure another port");
    eprintln!("        (e.g. lsof -ti:{} | xargs kill)", addr.port());
}

pub fn log_browser_opening(url: &str) {
    println!("Opening browser at {url}");
}

pub fn log_browser_warning(url: &str, err: &dyn std::fmt::Display) {
    eprintln!("[WARN] Could not open browser automatically: {err}");
    eprintln!("       Open manually: {url}");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_request(method: &Method, uri: &Uri, version: Version) {
    let now = Local::now().format(TIMESTAMP_FORMAT);
    println!("[{now}] {method} {uri} {version:?}");
}

pub fn log_response(status: u16, size: usize) {
    println!("[Response] {status} ({size} bytes)");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_shutdown(signal: &str) {
    println!("\n{signal} received, shutting down");
    println!("Server stopped");
}
