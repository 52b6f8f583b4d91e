//! Request handlers for the API endpoints.

use std::sync::{Arc, MutexGuard};

use axum::Json;
use axum::extract::{Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;

use super::AppState;
use super::types::{BuyRequest, ErrorResponse, QuoteQuery, QuoteResponse, SellRequest};
use crate::ledger::input::{parse_kwh, parse_points};
use crate::ledger::{LedgerError, LedgerSnapshot, quote_buy_kwh, quote_sell_points};
use crate::session::Session;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
}

/// Invalid input → 400, insufficient balance → 409.
fn ledger_error(err: &LedgerError) -> ApiError {
    let status = match err {
        LedgerError::InvalidAmount(_) => StatusCode::BAD_REQUEST,
        LedgerError::InsufficientEnergy { .. } | LedgerError::InsufficientCredits { .. } => {
            StatusCode::CONFLICT
        }
    };
    api_error(status, err.to_string())
}

fn lock(state: &AppState) -> Result<MutexGuard<'_, Session>, ApiError> {
    state
        .session
        .lock()
        .map_err(|_| api_error(StatusCode::INTERNAL_SERVER_ERROR, "ledger session unavailable"))
}

/// Returns the current ledger snapshot.
///
/// `GET /ledger` → 200 + `LedgerSnapshot` JSON
pub async fn get_ledger(
    State(state): State<Arc<AppState>>,
) -> Result<Json<LedgerSnapshot>, ApiError> {
    let session = lock(&state)?;
    Ok(Json(session.snapshot()))
}

/// Sells stored energy for points.
///
/// `POST /ledger/sell` `{"amount_kwh": 5}` → 200 + updated snapshot
/// - invalid amount → 400
/// - more than stored → 409
pub async fn post_sell(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SellRequest>,
) -> Result<Json<LedgerSnapshot>, ApiError> {
    let mut session = lock(&state)?;
    session
        .sell_input(&req.amount_kwh.to_text())
        .map_err(|e| ledger_error(&e))?;
    Ok(Json(session.snapshot()))
}

/// Spends points on stored energy.
///
/// `POST /ledger/buy` `{"points": 200}` → 200 + updated snapshot
/// - invalid amount → 400
/// - more than held → 409
pub async fn post_buy(
    State(state): State<Arc<AppState>>,
    Json(req): Json<BuyRequest>,
) -> Result<Json<LedgerSnapshot>, ApiError> {
    let mut session = lock(&state)?;
    session
        .buy_input(&req.points.to_text())
        .map_err(|e| ledger_error(&e))?;
    Ok(Json(session.snapshot()))
}

/// Previews conversions without touching the ledger.
///
/// `GET /ledger/quote?sell_kwh=5&buy_points=200` → `{"sell_points":125,"buy_kwh":8.0}`
pub async fn get_quote(Query(query): Query<QuoteQuery>) -> Result<Json<QuoteResponse>, ApiError> {
    let sell_points = query
        .sell_kwh
        .as_deref()
        .map(|raw| parse_kwh(raw).and_then(quote_sell_points))
        .transpose()
        .map_err(|e| ledger_error(&e))?;
    let buy_kwh = query
        .buy_points
        .as_deref()
        .map(|raw| parse_points(raw).and_then(quote_buy_kwh))
        .transpose()
        .map_err(|e| ledger_error(&e))?;

    Ok(Json(QuoteResponse {
        sell_points,
        buy_kwh,
    }))
}

/// Returns the transaction history as a CSV download.
///
/// `GET /ledger/history.csv` → 200 `text/csv`
pub async fn get_history_csv(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ApiError> {
    let body = lock(&state)?
        .history_csv()
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))?;
    let disposition = format!("attachment; filename=\"{}\"", state.export_file_name);

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
