//! Checkout and video-token payloads.

use serde::{Deserialize, Serialize};

/// Payment method reported to the checkout endpoint
pub const PAYMENT_METHOD: &str = "Credit Card";

/// Body of `POST /payments/checkout`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub client: String,
    pub counselor: String,
    pub amount: f64,
    pub payment_method: String,
}

impl CheckoutRequest {
    pub fn new(client: impl Into<String>, counselor: impl Into<String>, amount: f64) -> Self {
        Self {
            client: client.into(),
            counselor: counselor.into(),
            amount,
            payment_method: PAYMENT_METHOD.to_string(),
        }
    }
}

/// Hosted checkout session; the browser is redirected to `url`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CheckoutResponse {
    #[serde(default)]
    pub url: String,
}

/// Join token for the video channel
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoToken {
    #[serde(default)]
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checkout_request_wire_shape() {
        let value = serde_json::to_value(CheckoutRequest::new("u1", "c1", 75.0)).unwrap();
        assert_eq!(value["paymentMethod"], "Credit Card");
        assert_eq!(value["amount"], 75.0);
        assert_eq!(value["counselor"], "c1");
    }

    #[test]
    fn test_missing_token_defaults_empty() {
        let token: VideoToken = serde_json::from_str("{}").unwrap();
        assert!(token.token.is_empty());
    }
}
