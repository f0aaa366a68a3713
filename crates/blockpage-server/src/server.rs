//! Development server implementation.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        Path as UrlPath, State,
    },
    handler::Handler,
    http::{header, StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::sync::broadcast::error::RecvError;
use tokio::sync::RwLock;
use tower_http::services::ServeDir;

use blockpage_blocks::{compose_html, BlockRegistry};
use blockpage_content::{discover_pages, ContentError, SourcePage};
use blockpage_static::page::stylesheet_name;
use blockpage_static::{build_navigation, page_url, AssetPipeline, NavItem, PageRenderer, SiteConfig};

use crate::watcher::{FileWatcher, WatchEvent};
use crate::websocket::{reload_client_script, ReloadHub, ReloadMessage};

/// WebSocket endpoint for reload messages.
const RELOAD_PATH: &str = "/__reload";

/// Configuration for the development server.
#[derive(Debug, Clone)]
pub struct DevServerConfig {
    /// Directory containing page documents
    pub content_dir: PathBuf,

    /// Directory of static files (images, media) served as-is
    pub public_dir: PathBuf,

    /// Port to listen on
    pub port: u16,

    /// Host to bind to
    pub host: String,

    /// Open browser on start
    pub open: bool,

    /// Site settings; the base URL is always `/` when serving locally
    pub site: SiteConfig,
}

impl Default for DevServerConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            public_dir: PathBuf::from("public"),
            port: 7777,
            host: "127.0.0.1".to_string(),
            open: true,
            site: SiteConfig::default(),
        }
    }
}

/// Errors that can occur with the server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("Failed to bind to {0}: {1}")]
    BindError(SocketAddr, String),

    #[error("File watch error: {0}")]
    WatchError(String),

    #[error(transparent)]
    Content(#[from] ContentError),
}

type SharedState = Arc<RwLock<ServerState>>;

/// Shared server state.
struct ServerState {
    config: DevServerConfig,
    hub: ReloadHub,
    renderer: PageRenderer,
    pages: Vec<SourcePage>,
    nav: Vec<NavItem>,
}

impl ServerState {
    fn new(config: DevServerConfig) -> Result<Self, ContentError> {
        let site = SiteConfig {
            base_url: "/".to_string(),
            ..config.site.clone()
        };
        let renderer = PageRenderer::new(Arc::new(BlockRegistry::builtin()), site)
            .with_scripts(vec![reload_client_script(RELOAD_PATH)]);

        let mut state = Self {
            config,
            hub: ReloadHub::new(),
            renderer,
            pages: Vec::new(),
            nav: Vec::new(),
        };
        state.reload()?;

        Ok(state)
    }

    /// Re-read all pages from the content directory.
    ///
    /// On error the previously loaded pages stay in place.
    fn reload(&mut self) -> Result<(), ContentError> {
        let pages = discover_pages(&self.config.content_dir)?;
        self.nav = build_navigation(&pages, "/");
        self.pages = pages;
        Ok(())
    }

    /// Render the page served at a URL path.
    fn render_path(&self, path: &str) -> (StatusCode, String) {
        let slug = path.trim_matches('/');

        let Some(page) = self.pages.iter().find(|p| p.slug() == slug) else {
            tracing::debug!("No page for {}", path);
            return match self.renderer.render_not_found(&self.nav) {
                Ok(html) => (StatusCode::NOT_FOUND, html),
                Err(e) => (StatusCode::NOT_FOUND, e.to_string()),
            };
        };

        match self.renderer.render(&page.doc, slug, &self.nav) {
            Ok(rendered) => (StatusCode::OK, rendered.html),
            Err(e) => {
                tracing::warn!("Failed to render {}: {}", page.relative_path.display(), e);
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
        }
    }

    /// Content update for a changed page document, if it is a known page.
    fn content_update(&self, path: &Path) -> Option<ReloadMessage> {
        let changed = canonical(path);
        let page = self
            .pages
            .iter()
            .find(|p| canonical(&p.source_path) == changed)?;

        Some(ReloadMessage::UpdateContent {
            path: page_url("/", &page.slug()),
            html: compose_html(self.renderer.registry(), &page.doc.blocks),
        })
    }

    /// Source file for a published stylesheet name.
    fn stylesheet_source(&self, name: &str) -> Option<PathBuf> {
        self.config
            .site
            .styles
            .iter()
            .find(|s| stylesheet_name(s) == name)
            .map(PathBuf::from)
    }
}

/// Absolute form of a path, or the path itself if it cannot be resolved.
fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

/// Development server.
pub struct DevServer {
    config: DevServerConfig,
}

impl DevServer {
    /// Create a new development server.
    pub fn new(config: DevServerConfig) -> Self {
        Self { config }
    }

    /// Start the development server.
    pub async fn start(self) -> Result<(), ServerError> {
        let address = format!("{}:{}", self.config.host, self.config.port);
        let addr: SocketAddr = address
            .parse()
            .map_err(|_| ServerError::InvalidAddress(address.clone()))?;

        let state: SharedState = Arc::new(RwLock::new(ServerState::new(self.config.clone())?));

        // Set up file watcher
        let mut watch_paths = vec![self.config.content_dir.clone(), self.config.public_dir.clone()];
        watch_paths.extend(self.config.site.styles.iter().map(PathBuf::from));

        let (watcher, mut rx) =
            FileWatcher::new(&watch_paths).map_err(|e| ServerError::WatchError(e.to_string()))?;

        let state_clone = Arc::clone(&state);
        tokio::spawn(async move {
            while let Some(event) = rx.recv().await {
                handle_watch_event(&state_clone, event).await;
            }
            // Keep watcher alive
            drop(watcher);
        });

        let app = router(state, &self.config.public_dir);

        tracing::info!("Starting dev server at http://{}", addr);

        if self.config.open {
            let url = format!("http://{}", addr);
            if let Err(e) = open::that(&url) {
                tracing::warn!("Failed to open browser: {}", e);
            }
        }

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::BindError(addr, e.to_string()))?;

        Ok(())
    }
}

fn router(state: SharedState, public_dir: &Path) -> Router {
    // Static files first, then pages rendered from content
    let files = ServeDir::new(public_dir).fallback(page_handler.with_state(Arc::clone(&state)));

    Router::new()
        .route(RELOAD_PATH, get(ws_handler))
        .route("/__reload.js", get(reload_script_handler))
        .route("/assets/main.css", get(css_handler))
        .route("/assets/main.js", get(js_handler))
        .route("/assets/{name}", get(stylesheet_handler))
        .with_state(state)
        .fallback_service(files)
}

/// Handle file watch events.
async fn handle_watch_event(state: &SharedState, event: WatchEvent) {
    let mut state = state.write().await;

    if let Err(e) = state.reload() {
        tracing::warn!("Keeping previous content: {}", e);
        return;
    }

    let message = match event {
        WatchEvent::PageModified(path) => {
            tracing::info!("Page modified: {}", path.display());
            state.content_update(&path).unwrap_or(ReloadMessage::Reload)
        }
        WatchEvent::Created(path) | WatchEvent::Deleted(path) => {
            tracing::info!("Content changed: {}", path.display());
            ReloadMessage::Reload
        }
        WatchEvent::Modified(_) => ReloadMessage::Reload,
    };

    state.hub.send(message);
}

/// Handler for pages.
async fn page_handler(State(state): State<SharedState>, uri: Uri) -> impl IntoResponse {
    let state = state.read().await;
    let (status, html) = state.render_path(uri.path());
    (status, Html(html))
}

async fn css_handler() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], AssetPipeline::generate_css())
}

async fn js_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        AssetPipeline::generate_js(),
    )
}

/// Handler for configured site stylesheets.
async fn stylesheet_handler(
    State(state): State<SharedState>,
    UrlPath(name): UrlPath<String>,
) -> Response {
    let source = state.read().await.stylesheet_source(&name);

    let Some(source) = source else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match tokio::fs::read_to_string(&source).await {
        Ok(css) => ([(header::CONTENT_TYPE, "text/css")], css).into_response(),
        Err(e) => {
            tracing::warn!("Stylesheet not found: {}: {}", source.display(), e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

/// Handler for the reload WebSocket endpoint.
async fn ws_handler(ws: WebSocketUpgrade, State(state): State<SharedState>) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_ws(socket, state))
}

/// Handle a WebSocket connection.
async fn handle_ws(mut socket: WebSocket, state: SharedState) {
    let mut rx = {
        let state = state.read().await;
        state.hub.subscribe()
    };

    if !send_message(&mut socket, &ReloadMessage::Connected).await {
        return;
    }

    // Forward reload messages to the client
    while let Some(msg) = forwarded(rx.recv().await) {
        if !send_message(&mut socket, &msg).await {
            break;
        }
    }
}

/// Message to forward for a hub receive result; `None` once the hub closes.
///
/// A lagging client missed updates, so it is told to reload in full.
fn forwarded(received: Result<ReloadMessage, RecvError>) -> Option<ReloadMessage> {
    match received {
        Ok(msg) => Some(msg),
        Err(RecvError::Lagged(skipped)) => {
            tracing::debug!("Reload client lagged by {} messages", skipped);
            Some(ReloadMessage::Reload)
        }
        Err(RecvError::Closed) => None,
    }
}

async fn send_message(socket: &mut WebSocket, msg: &ReloadMessage) -> bool {
    let Ok(json) = serde_json::to_string(msg) else {
        return false;
    };
    socket.send(Message::Text(json.into())).await.is_ok()
}

/// Handler for the reload client script.
async fn reload_script_handler() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/javascript")],
        reload_client_script(RELOAD_PATH),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn state_for(content: &Path) -> ServerState {
        ServerState::new(DevServerConfig {
            content_dir: content.to_path_buf(),
            site: SiteConfig {
                title: "SMA Negeri 1".to_string(),
                base_url: "/sekolah/".to_string(),
                styles: vec!["styles/site.css".to_string()],
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap()
    }

    fn write_site(content: &Path) {
        fs::create_dir_all(content.join("profil")).unwrap();
        fs::write(
            content.join("index.yaml"),
            "title: Beranda\nblocks:\n  - type: quote\n    text: Selamat datang\n",
        )
        .unwrap();
        fs::write(content.join("profil/guru.yaml"), "title: Guru\n").unwrap();
    }

    #[test]
    fn creates_server_with_default_config() {
        let server = DevServer::new(DevServerConfig::default());
        assert_eq!(server.config.port, 7777);
    }

    #[test]
    fn renders_pages_on_request() {
        let temp = tempdir().unwrap();
        write_site(temp.path());
        let state = state_for(temp.path());

        let (status, html) = state.render_path("/");
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("Selamat datang"));
        assert!(html.contains(RELOAD_PATH));

        let (status, html) = state.render_path("/profil/guru/");
        assert_eq!(status, StatusCode::OK);
        assert!(html.contains("<title>Guru - SMA Negeri 1</title>"));
    }

    #[test]
    fn unknown_path_is_not_found() {
        let temp = tempdir().unwrap();
        write_site(temp.path());

        let (status, html) = state_for(temp.path()).render_path("/tidak-ada/");

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(html.contains("page-not-found"));
    }

    #[test]
    fn picks_up_content_changes_on_reload() {
        let temp = tempdir().unwrap();
        write_site(temp.path());
        let mut state = state_for(temp.path());

        fs::write(temp.path().join("kontak.yaml"), "title: Kontak\n").unwrap();
        state.reload().unwrap();

        assert_eq!(state.render_path("/kontak/").0, StatusCode::OK);
    }

    #[test]
    fn builds_content_update_for_known_pages() {
        let temp = tempdir().unwrap();
        write_site(temp.path());
        let state = state_for(temp.path());

        let update = state.content_update(&temp.path().join("index.yaml"));

        match update {
            Some(ReloadMessage::UpdateContent { path, html }) => {
                assert_eq!(path, "/");
                assert!(html.contains("Selamat datang"));
            }
            other => panic!("Expected UpdateContent, got {:?}", other),
        }
        assert!(state.content_update(&temp.path().join("other.yaml")).is_none());
    }

    #[test]
    fn nested_index_update_targets_its_own_page() {
        let temp = tempdir().unwrap();
        fs::create_dir_all(temp.path().join("profil")).unwrap();
        fs::write(
            temp.path().join("index.yaml"),
            "title: Beranda\norder: 1\nblocks:\n  - type: quote\n    text: Beranda\n",
        )
        .unwrap();
        fs::write(
            temp.path().join("profil/index.yaml"),
            "title: Profil\norder: 2\nblocks:\n  - type: quote\n    text: Visi sekolah\n",
        )
        .unwrap();
        let state = state_for(temp.path());

        let update = state.content_update(&temp.path().join("profil/index.yaml"));

        match update {
            Some(ReloadMessage::UpdateContent { path, html }) => {
                assert_eq!(path, "/profil/");
                assert!(html.contains("Visi sekolah"));
            }
            other => panic!("Expected UpdateContent, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn lagging_client_gets_full_reload() {
        let (tx, mut rx) = tokio::sync::broadcast::channel(1);
        tx.send(ReloadMessage::Connected).unwrap();
        tx.send(ReloadMessage::Connected).unwrap();

        assert_eq!(forwarded(rx.recv().await), Some(ReloadMessage::Reload));
        assert_eq!(forwarded(rx.recv().await), Some(ReloadMessage::Connected));

        drop(tx);
        assert_eq!(forwarded(rx.recv().await), None);
    }

    #[test]
    fn resolves_stylesheets_by_name() {
        let temp = tempdir().unwrap();
        write_site(temp.path());
        let state = state_for(temp.path());

        assert_eq!(
            state.stylesheet_source("site.css"),
            Some(PathBuf::from("styles/site.css"))
        );
        assert_eq!(state.stylesheet_source("other.css"), None);
    }

    #[test]
    fn missing_content_dir_is_an_error() {
        let temp = tempdir().unwrap();

        let result = ServerState::new(DevServerConfig {
            content_dir: temp.path().join("nope"),
            ..Default::default()
        });

        assert!(matches!(result, Err(ContentError::DirectoryNotFound(_))));
    }
}
