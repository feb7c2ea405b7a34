//! Server module
//!
//! Binding, the accept loop, per-connection serving and shutdown handling.

mod connection;
mod listener;
mod signal;

use crate::browser;
use crate::config::{AppState, Config};
use crate::logger;
use std::sync::Arc;

/// Bind, launch the browser, and serve until interrupted.
///
/// Prints its own diagnostics on every failure path; the caller only maps
/// the result to an exit code.
pub async fn run(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = match cfg.socket_addr() {
        Ok(addr) => addr,
        Err(e) => {
            logger::log_error(&format!(
                "Invalid server address '{}:{}': {e}",
                cfg.server.host, cfg.server.port
            ));
            return Err(e.into());
        }
    };

    let listener = match listener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            if e.kind() == std::io::ErrorKind::AddrInUse {
                logger::log_port_in_use(&addr);
            } else {
                logger::log_error(&format!("Failed to start server on {addr}: {e}"));
            }
            return Err(e.into());
        }
    };

    let url = cfg.url();
    let auto_open = cfg.browser.auto_open;

    let state = match AppState::new(cfg) {
        Ok(state) => Arc::new(state),
        Err(e) => {
            logger::log_error(&format!("Site root is not accessible: {e}"));
            return Err(e.into());
        }
    };

    logger::log_startup(&addr, &state.root, state.config.server.workers);

    if auto_open {
        browser::open_at(&url);
    }

    let shutdown = signal::shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        connection::accept_connection(stream, peer_addr, &state);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            signal_name = &mut shutdown => {
                logger::log_shutdown(signal_name);
                break;
            }
        }
    }

    // Releases the port before the process reports success
    drop(listener);
    Ok(())
}
