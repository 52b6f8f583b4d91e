//! REST API over a single ledger session.
//!
//! Routes:
//! - `GET /ledger`: current snapshot
//! - `POST /ledger/sell`, `POST /ledger/buy`: apply an operation
//! - `GET /ledger/quote`: preview conversions without touching state
//! - `GET /ledger/history.csv`: transaction history download

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::routing::{get, post};

use crate::session::Session;

pub use types::{BuyRequest, ErrorResponse, QuoteQuery, QuoteResponse, RawAmount, SellRequest};

/// Application state shared across all request handlers.
///
/// The mutex serializes sell/buy requests so each one commits or rejects
/// atomically against the balances the previous one left behind.
pub struct AppState {
    /// The user's ledger session.
    pub session: Mutex<Session>,
    /// File name offered in the CSV `Content-Disposition` header.
    pub export_file_name: String,
}

impl AppState {
    pub fn new(session: Session, export_file_name: impl Into<String>) -> Self {
        Self {
            session: Mutex::new(session),
            export_file_name: export_file_name.into(),
        }
    }
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/ledger", get(handlers::get_ledger))
        .route("/ledger/sell", post(handlers::post_sell))
        .route("/ledger/buy", post(handlers::post_buy))
        .route("/ledger/quote", get(handlers::get_quote))
        .route("/ledger/history.csv", get(handlers::get_history_csv))
        .with_state(state)
}

/// Binds to the given address and serves the API until the process exits.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind or the server fails.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
