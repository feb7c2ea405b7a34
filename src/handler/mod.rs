//! Request handler
//!
//! Entry point for HTTP request processing: method validation, static file
//! dispatch, and CORS injection on the way out.

pub mod static_files;

use crate::config::AppState;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::sync::Arc;

/// Request context encapsulating what static file serving needs
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub is_head: bool,
    pub access_log: bool,
}

/// Main entry point for HTTP request handling
///
/// Generic over the body type; the body is never read.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let method = req.method().clone();
    let access_log = state.config.logging.access_log;

    if access_log {
        logger::log_request(&method, req.uri(), req.version());
    }

    let ctx = RequestContext {
        path: req.uri().path(),
        is_head: method == Method::HEAD,
        access_log,
    };

    let mut response = if method == Method::GET || method == Method::HEAD {
        static_files::serve_path(&ctx, &state).await
    } else if method == Method::OPTIONS {
        http::build_options_response()
    } else {
        logger::log_warning(&format!("Method not allowed: {method}"));
        http::build_405_response()
    };

    // Single exit point: no response leaves without the CORS headers.
    http::apply_cors_headers(&mut response);

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{BrowserConfig, Config, LoggingConfig, ServerConfig, SiteConfig};
    use hyper::header::ACCESS_CONTROL_ALLOW_ORIGIN;
    use std::path::PathBuf;

    fn test_state(root: PathBuf) -> Arc<AppState> {
        let config = Config {
            server: ServerConfig {
                host: "localhost".to_string(),
                port: 8080,
                workers: None,
            },
            site: SiteConfig {
                root,
                entry_file: "index.html".to_string(),
                index_files: vec!["index.html".to_string()],
                directory_listing: true,
            },
            logging: LoggingConfig { access_log: false },
            browser: BrowserConfig { auto_open: false },
        };
        Arc::new(AppState::new(config).expect("test root should canonicalize"))
    }

    fn site_root(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("corserve-handler-{tag}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn request(method: Method, path: &str) -> Request<()> {
        Request::builder()
            .method(method)
            .uri(path)
            .body(())
            .unwrap()
    }

    #[tokio::test]
    async fn test_get_serves_file_with_cors() {
        let root = site_root("get");
        std::fs::write(root.join("index.html"), "<html>hi</html>").unwrap();
        let state = test_state(root);

        let response = handle_request(request(Method::GET, "/index.html"), state)
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_missing_path_is_404_with_cors() {
        let state = test_state(site_root("missing"));
        let response = handle_request(request(Method::GET, "/nope.js"), state)
            .await
            .unwrap();
        assert_eq!(response.status(), 404);
        assert_eq!(
            response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_dir_without_slash_redirects() {
        let root = site_root("redirect");
        std::fs::create_dir_all(root.join("sub")).unwrap();
        std::fs::write(root.join("sub").join("index.html"), "<html></html>").unwrap();
        let state = test_state(root);

        let response = handle_request(request(Method::GET, "/sub"), Arc::clone(&state))
            .await
            .unwrap();
        assert_eq!(response.status(), 301);
        assert_eq!(response.headers().get("Location").unwrap(), "/sub/");
        assert_eq!(
            response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );

        // With the slash, the index file is served in place
        let response = handle_request(request(Method::GET, "/sub/"), state)
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_percent_encoded_path_served() {
        let root = site_root("encoded");
        std::fs::write(root.join("my file.html"), "<html>space</html>").unwrap();
        let state = test_state(root);

        let response = handle_request(request(Method::GET, "/my%20file.html"), state)
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_options_is_preflight_friendly() {
        let state = test_state(site_root("options"));
        let response = handle_request(request(Method::OPTIONS, "/anything"), state)
            .await
            .unwrap();
        assert_eq!(response.status(), 204);
        assert_eq!(
            response
                .headers()
                .get("Access-Control-Allow-Methods")
                .unwrap(),
            "GET, POST, OPTIONS"
        );
    }

    #[tokio::test]
    async fn test_post_is_405_with_cors() {
        let state = test_state(site_root("post"));
        let response = handle_request(request(Method::POST, "/"), state)
            .await
            .unwrap();
        assert_eq!(response.status(), 405);
        assert_eq!(
            response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_head_has_empty_body_same_headers() {
        let root = site_root("head");
        std::fs::write(root.join("data.json"), "{\"k\":1}").unwrap();
        let state = test_state(root);

        let response = handle_request(request(Method::HEAD, "/data.json"), state)
            .await
            .unwrap();
        assert_eq!(response.status(), 200);
        assert_eq!(response.headers().get("Content-Length").unwrap(), "7");
    }
}
