// Debug HTTP handler - serves one translated EcmaScript2015 asset per request

use crate::asset::Asset;
use crate::error::{TranslationError, VfsError};
use crate::translator::Es2015Translator;
use crate::vfs::VirtualFileSystem;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use thiserror::Error;

const CONTENT_TYPE_JS: &str = "text/javascript; charset=utf-8";

/// Why an asset could not be served
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Vfs(#[from] VfsError),

    #[error("Asset '{path}' is not an EcmaScript2015 asset")]
    NotEs2015 { path: String },

    #[error(transparent)]
    Translation(#[from] TranslationError),

    #[error("Translation task failed: {0}")]
    Task(String),
}

impl HandlerError {
    pub fn status(&self) -> StatusCode {
        match self {
            HandlerError::Vfs(VfsError::NotFound { .. }) | HandlerError::NotEs2015 { .. } => {
                StatusCode::NOT_FOUND
            }
            HandlerError::Vfs(VfsError::OutsideRoot { .. }) => StatusCode::BAD_REQUEST,
            HandlerError::Translation(TranslationError::InvalidArgument { .. }) => {
                StatusCode::BAD_REQUEST
            }
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Serves translated EcmaScript2015 assets during development
///
/// Assets are never treated as static: every request re-reads and
/// re-translates the file.
pub struct DebugAssetHandler {
    translator: Es2015Translator,
    file_system: Arc<dyn VirtualFileSystem>,
}

impl DebugAssetHandler {
    pub fn new(
        mut translator: Es2015Translator,
        file_system: Arc<dyn VirtualFileSystem>,
        debug_mode: bool,
    ) -> Self {
        translator.set_debug_mode(debug_mode);
        Self {
            translator,
            file_system,
        }
    }

    /// Read and translate the asset at `virtual_path`
    ///
    /// Blocks for the whole translation.
    pub fn translate_asset(&self, virtual_path: &str) -> Result<Asset, HandlerError> {
        let mut asset = Asset::new(virtual_path, String::new());
        if !asset.is_es2015() {
            return Err(HandlerError::NotEs2015 {
                path: virtual_path.to_string(),
            });
        }

        asset.content = self.file_system.read_to_string(virtual_path)?;
        self.translator.translate(&mut asset)?;
        Ok(asset)
    }

    /// Router answering `GET /<virtual path>`
    pub fn router(self: Arc<Self>) -> Router {
        Router::new()
            .route("/{*path}", get(serve_asset))
            .with_state(self)
    }
}

async fn serve_asset(
    State(handler): State<Arc<DebugAssetHandler>>,
    Path(path): Path<String>,
) -> Result<Response, HandlerError> {
    let virtual_path = format!("~/{}", path.trim_start_matches('/'));
    tracing::debug!(asset = %virtual_path, "Debug asset request");

    let translated = tokio::task::spawn_blocking(move || handler.translate_asset(&virtual_path))
        .await
        .map_err(|e| HandlerError::Task(e.to_string()))?;

    match translated {
        Ok(asset) => Ok((
            [
                (header::CONTENT_TYPE, CONTENT_TYPE_JS),
                (header::CACHE_CONTROL, "no-cache"),
            ],
            asset.content,
        )
            .into_response()),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to serve debug asset");
            Err(e)
        }
    }
}

/// Run the debug handler until Ctrl-C
pub async fn serve(handler: DebugAssetHandler, bind: &str) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind(bind).await?;
    tracing::info!("Debug asset handler listening on http://{}", listener.local_addr()?);

    axum::serve(listener, Arc::new(handler).router())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            tracing::info!("Shutting down debug asset handler");
        })
        .await?;
    Ok(())
}
