//! API request, query, and response types.

use serde::{Deserialize, Serialize};

/// A quantity sent by a client, either as a JSON number or as raw text
/// copied from an input field.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    /// Text form handed to boundary parsing (`200.0` renders as `"200"`).
    pub fn to_text(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Text(s) => s.clone(),
        }
    }
}

/// `POST /ledger/sell` body.
#[derive(Debug, Deserialize)]
pub struct SellRequest {
    /// Energy to sell (kWh).
    pub amount_kwh: RawAmount,
}

/// `POST /ledger/buy` body.
#[derive(Debug, Deserialize)]
pub struct BuyRequest {
    /// Whole points to spend.
    pub points: RawAmount,
}

/// Optional preview inputs for `GET /ledger/quote`.
#[derive(Debug, Deserialize)]
pub struct QuoteQuery {
    /// kWh to price as a sell.
    pub sell_kwh: Option<String>,
    /// Points to price as a buy.
    pub buy_points: Option<String>,
}

/// Conversion preview; fields are omitted when not requested.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    /// Points a sell of `sell_kwh` would earn.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sell_points: Option<u64>,
    /// kWh a buy with `buy_points` would yield.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buy_kwh: Option<f64>,
}

/// Error response body for 4xx/5xx errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_amount_accepts_numbers_and_text() {
        let req: SellRequest = serde_json::from_str(r#"{"amount_kwh": 5}"#).expect("number");
        assert_eq!(req.amount_kwh.to_text(), "5");

        let req: SellRequest = serde_json::from_str(r#"{"amount_kwh": " 2.5 "}"#).expect("text");
        assert_eq!(req.amount_kwh.to_text(), " 2.5 ");

        let req: BuyRequest = serde_json::from_str(r#"{"points": 200.0}"#).expect("float");
        assert_eq!(req.points.to_text(), "200");
    }

    #[test]
    fn quote_response_omits_missing_fields() {
        let json = serde_json::to_value(QuoteResponse {
            sell_points: Some(125),
            buy_kwh: None,
        })
        .expect("serializable");
        assert_eq!(json["sell_points"], 125);
        assert!(json.get("buy_kwh").is_none());
    }
}
