//! Static file serving
//!
//! Resolves request paths beneath the site root, with index file and
//! directory listing support.

use crate::config::AppState;
use crate::handler::RequestContext;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Serve whatever the request path resolves to under the site root.
pub async fn serve_path(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let Some(resolved) = resolve_path(&state.root, ctx.path) else {
        return http::build_404_response();
    };

    if resolved.is_dir() {
        // Relative links inside the directory only resolve correctly when
        // the browser's address ends with a slash.
        if !ctx.path.ends_with('/') {
            return http::build_redirect_response(&format!("{}/", ctx.path));
        }
        return serve_directory(ctx, state, &resolved).await;
    }

    serve_file(ctx, &resolved).await
}

/// Map a request path to a filesystem path beneath `root`.
///
/// Percent-decodes the path, drops `.` and `..` segments component-wise,
/// then verifies via canonicalization that the result stays inside the
/// root. Returns `None` for anything that does not exist, cannot be
/// decoded, or escapes the root.
fn resolve_path(root: &Path, request_path: &str) -> Option<PathBuf> {
    let decoded = match urlencoding::decode(request_path) {
        Ok(decoded) => decoded,
        Err(e) => {
            logger::log_warning(&format!("Undecodable request path '{request_path}': {e}"));
            return None;
        }
    };
    if decoded.contains('\0') {
        logger::log_warning(&format!("NUL byte in request path '{request_path}'"));
        return None;
    }

    // Keep only normal segments: "." and ".." are discarded rather than
    // resolved, so "a..b.txt" stays intact while "../" cannot climb.
    let mut candidate = root.to_path_buf();
    for component in Path::new(decoded.trim_start_matches('/')).components() {
        if let Component::Normal(part) = component {
            candidate.push(part);
        }
    }

    // Nonexistent paths fail here; that is the ordinary 404 case.
    let canonical = candidate.canonicalize().ok()?;
    if !canonical.starts_with(root) {
        logger::log_warning(&format!("Path traversal attempt blocked: {request_path}"));
        return None;
    }
    Some(canonical)
}

async fn serve_file(ctx: &RequestContext<'_>, file_path: &Path) -> Response<Full<Bytes>> {
    match load_file(file_path).await {
        Some((content, content_type)) => {
            if ctx.access_log {
                logger::log_response(200, content.len());
            }
            http::build_file_response(content, content_type, ctx.is_head)
        }
        None => http::build_404_response(),
    }
}

/// Serve a directory: first matching index file, otherwise a generated
/// listing (when enabled), otherwise 404.
async fn serve_directory(
    ctx: &RequestContext<'_>,
    state: &AppState,
    dir: &Path,
) -> Response<Full<Bytes>> {
    for index in &state.config.site.index_files {
        let index_path = dir.join(index);
        if index_path.is_file() {
            return serve_file(ctx, &index_path).await;
        }
    }

    if !state.config.site.directory_listing {
        return http::build_404_response();
    }

    match render_listing(dir, ctx.path).await {
        Ok(html) => {
            if ctx.access_log {
                logger::log_response(200, html.len());
            }
            http::build_html_response(html, ctx.is_head)
        }
        Err(e) => {
            logger::log_error(&format!(
                "Failed to list directory '{}': {e}",
                dir.display()
            ));
            http::build_404_response()
        }
    }
}

async fn load_file(path: &Path) -> Option<(Vec<u8>, &'static str)> {
    let content = match fs::read(path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_warning(&format!("Failed to read file '{}': {e}", path.display()));
            return None;
        }
    };
    let content_type = mime::get_content_type(path.extension().and_then(|e| e.to_str()));
    Some((content, content_type))
}

/// Render an HTML index of a directory. Entries are sorted, directories
/// get a trailing slash, labels are HTML-escaped and hrefs URL-encoded.
async fn render_listing(dir: &Path, request_path: &str) -> std::io::Result<String> {
    let mut entries = Vec::new();
    let mut read_dir = fs::read_dir(dir).await?;
    while let Some(entry) = read_dir.next_entry().await? {
        let name = entry.file_name().to_string_lossy().into_owned();
        let is_dir = entry.file_type().await?.is_dir();
        entries.push((name, is_dir));
    }
    entries.sort();

    let title = escape_html(request_path);
    let mut html = format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>Index of {title}</title></head>\n<body>\n<h1>Index of {title}</h1>\n<ul>\n"
    );
    if request_path.trim_matches('/') != "" {
        html.push_str("<li><a href=\"../\">../</a></li>\n");
    }
    for (name, is_dir) in &entries {
        let mut href = urlencoding::encode(name).into_owned();
        let mut label = escape_html(name);
        if *is_dir {
            href.push('/');
            label.push('/');
        }
        html.push_str(&format!("<li><a href=\"{href}\">{label}</a></li>\n"));
    }
    html.push_str("</ul>\n</body>\n</html>\n");
    Ok(html)
}

fn escape_html(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
