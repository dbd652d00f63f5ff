use std::net::SocketAddr;
use std::path::{Component, Path, PathBuf};

use anyhow::Result;
use axum::{
    Router,
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    http::{StatusCode, Uri, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tokio::sync::broadcast;

pub mod listing;
pub mod notify;

pub use notify::{Notification, Notifier};

const CSS_NOT_FOUND: &str = "/* CSS file not found */";
const HTML_NOT_FOUND: &str = "<h1>404 Not Found</h1>";
const SERVER_ERROR: &str = "<h1>500 Internal Server Error</h1>";

const LIVERELOAD_PATH: &str = "/__livereload";

/// Configuration for the live development server
#[derive(Debug, Clone)]
pub struct LiveServerConfig {
    /// Port to serve on
    pub port: u16,
    /// Root directory to serve (the converter's output directory)
    pub root: PathBuf,
}

impl Default for LiveServerConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            root: PathBuf::from("."),
        }
    }
}

/// Serves the output directory over HTTP and pushes change notifications
/// to connected browsers over WebSocket.
pub struct LiveServer {
    config: LiveServerConfig,
    notify_tx: broadcast::Sender<Notification>,
}

impl LiveServer {
    pub fn new(config: LiveServerConfig) -> Self {
        let (notify_tx, _) = broadcast::channel(100);
        Self { config, notify_tx }
    }

    /// Handle for pushing notifications to connected clients. The watch
    /// loop holds one; the channel itself stays owned by the server.
    pub fn notifier(&self) -> Notifier {
        Notifier::new(self.notify_tx.clone())
    }

    /// Binds, opens the browser, and serves until the process terminates.
    pub async fn run(self) -> Result<()> {
        let state = AppState {
            notify_tx: self.notify_tx.clone(),
            root: self.config.root.clone(),
        };

        let app = Router::new()
            .route("/", get(listing_handler))
            .route(LIVERELOAD_PATH, get(websocket_handler))
            .fallback(file_handler)
            .with_state(state);

        let addr: SocketAddr = format!("127.0.0.1:{}", self.config.port).parse()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        println!("Server is running at http://localhost:{}", self.config.port);

        if let Err(e) = open::that(format!("http://localhost:{}", self.config.port)) {
            eprintln!("Failed to open browser: {}", e);
        }

        axum::serve(listener, app).await?;

        Ok(())
    }
}

#[derive(Clone)]
struct AppState {
    notify_tx: broadcast::Sender<Notification>,
    root: PathBuf,
}

async fn listing_handler(State(state): State<AppState>) -> Response {
    match listing::listing_page(&state.root) {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            eprintln!("Server error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, Html(SERVER_ERROR)).into_response()
        }
    }
}

/// Extension-dispatched static handler: `.css` and `.html` files come from
/// the output root at their mirrored relative paths. Anything else is
/// outside the converter's output surface.
async fn file_handler(State(state): State<AppState>, uri: Uri) -> Response {
    let path = uri.path();
    if path.ends_with(".css") {
        serve_file(&state.root, path, "text/css", CSS_NOT_FOUND)
    } else if path.ends_with(".html") {
        serve_file(&state.root, path, "text/html", HTML_NOT_FOUND)
    } else {
        (StatusCode::NOT_FOUND, "").into_response()
    }
}

fn serve_file(
    root: &Path,
    request_path: &str,
    content_type: &'static str,
    not_found: &'static str,
) -> Response {
    let not_found_response = (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, content_type)],
        not_found,
    );

    let Some(relative) = sanitize(request_path) else {
        return not_found_response.into_response();
    };

    match std::fs::read(root.join(relative)) {
        Ok(data) => {
            (StatusCode::OK, [(header::CONTENT_TYPE, content_type)], data).into_response()
        }
        Err(_) => {
            eprintln!("Error reading file: {}{}", root.display(), request_path);
            not_found_response.into_response()
        }
    }
}

/// Maps a request path onto a relative path under the serve root. Rejects
/// anything that could escape it.
fn sanitize(request_path: &str) -> Option<PathBuf> {
    let path = Path::new(request_path.trim_start_matches('/'));
    if path
        .components()
        .all(|c| matches!(c, Component::Normal(_)))
    {
        Some(path.to_path_buf())
    } else {
        None
    }
}

async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(|socket| websocket_connection(socket, state.notify_tx))
}

async fn websocket_connection(mut socket: WebSocket, notify_tx: broadcast::Sender<Notification>) {
    let mut rx = notify_tx.subscribe();

    // Greeting on connect
    if socket
        .send(Message::Text(Notification::Connected.to_message().into()))
        .await
        .is_err()
    {
        return;
    }

    loop {
        tokio::select! {
            msg = rx.recv() => {
                match msg {
                    Ok(notification) => {
                        if socket
                            .send(Message::Text(notification.to_message().into()))
                            .await
                            .is_err()
                        {
                            break;
                        }
                    }
                    Err(_) => break,
                }
            }
            msg = socket.recv() => {
                if msg.is_none() {
                    break;
                }
            }
        }
    }
}

/// Browser-side reload script substituted into the page template's
/// `{{script}}` token. Reloads on any "File updated:" message and retries
/// a dropped connection every second.
pub fn reload_script(port: u16) -> String {
    format!(
        r#"(function() {{
    function connect() {{
        const socket = new WebSocket("ws://localhost:{port}{path}");
        socket.onmessage = function(event) {{
            if (event.data.includes("File updated:")) {{
                window.location.reload();
            }}
        }};
        socket.onclose = function() {{
            setTimeout(connect, 1000);
        }};
    }}
    connect();
}})();"#,
        port = port,
        path = LIVERELOAD_PATH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reload_script_targets_the_configured_port() {
        let script = reload_script(9000);
        assert!(script.contains("ws://localhost:9000/__livereload"));
        assert!(script.contains("File updated:"));
        assert!(script.contains("setTimeout(connect, 1000)"));
    }

    #[test]
    fn sanitize_maps_onto_the_root() {
        assert_eq!(sanitize("/sub/page.html"), Some(PathBuf::from("sub/page.html")));
        assert_eq!(sanitize("/style.css"), Some(PathBuf::from("style.css")));
    }

    #[test]
    fn sanitize_rejects_escapes() {
        assert_eq!(sanitize("/../etc/passwd"), None);
        assert_eq!(sanitize("/sub/../../out.html"), None);
    }

    async fn body_of(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn serves_existing_files_with_the_right_content_type() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("sub")).unwrap();
        std::fs::write(dir.path().join("sub/page.html"), "<h1>hi</h1>").unwrap();

        let response = serve_file(dir.path(), "/sub/page.html", "text/html", HTML_NOT_FOUND);

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/html"
        );
        assert_eq!(body_of(response).await, "<h1>hi</h1>");
    }

    #[tokio::test]
    async fn missing_html_gets_the_placeholder_body() {
        let dir = tempfile::tempdir().unwrap();

        let response = serve_file(dir.path(), "/gone.html", "text/html", HTML_NOT_FOUND);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_of(response).await, HTML_NOT_FOUND);
    }

    #[tokio::test]
    async fn missing_css_gets_the_placeholder_body() {
        let dir = tempfile::tempdir().unwrap();

        let response = serve_file(dir.path(), "/gone.css", "text/css", CSS_NOT_FOUND);

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css"
        );
        assert_eq!(body_of(response).await, CSS_NOT_FOUND);
    }
}
