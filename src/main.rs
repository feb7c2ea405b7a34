use std::process::ExitCode;

mod browser;
mod config;
mod handler;
mod http;
mod logger;
mod server;

fn main() -> ExitCode {
    let cfg = match config::Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            logger::log_error(&format!("Failed to load configuration: {e}"));
            return ExitCode::FAILURE;
        }
    };

    // Fail fast before binding anything: running from the wrong directory
    // would silently serve the wrong file tree.
    if let Err(marker) = cfg.check_entry_marker() {
        logger::log_missing_entry(&marker);
        return ExitCode::FAILURE;
    }

    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }

    let runtime = match runtime_builder.build() {
        Ok(rt) => rt,
        Err(e) => {
            logger::log_error(&format!("Failed to start runtime: {e}"));
            return ExitCode::FAILURE;
        }
    };

    // server::run prints its own diagnostics for every failure path.
    if runtime.block_on(server::run(cfg)).is_err() {
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
