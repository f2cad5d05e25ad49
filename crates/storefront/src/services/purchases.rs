//! Purchase logging client.
//!
//! Checkout submits a purchase record to an external logging endpoint as form
//! fields. The response body is never consumed; the storefront only cares
//! whether the write was accepted.

use reqwest::Client;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::instrument;

/// Errors that can occur when logging a purchase.
#[derive(Debug, Error)]
pub enum PurchaseLogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
}

/// A completed checkout submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRecord {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Payment total in dollars.
    pub payment: Decimal,
}

impl PurchaseRecord {
    /// Form fields in the logging endpoint's wire format.
    fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("firstName", self.first_name.clone()),
            ("lastName", self.last_name.clone()),
            ("email", self.email.clone()),
            ("payment", self.payment.to_string()),
        ]
    }
}

/// Client for the purchase logging endpoint.
#[derive(Clone)]
pub struct PurchaseLogClient {
    client: Client,
    endpoint: String,
}

impl PurchaseLogClient {
    /// Create a new purchase logging client.
    #[must_use]
    pub fn new(endpoint: &str) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.to_string(),
        }
    }

    /// Submit a purchase record.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the endpoint rejects it.
    #[instrument(skip(self, record), fields(email = %record.email))]
    pub async fn submit(&self, record: &PurchaseRecord) -> Result<(), PurchaseLogError> {
        let response = self
            .client
            .post(&self.endpoint)
            .form(&record.form_fields())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(PurchaseLogError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_fields_wire_names() {
        let record = PurchaseRecord {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            payment: Decimal::new(1197, 2),
        };

        let fields = record.form_fields();
        assert_eq!(
            fields,
            vec![
                ("firstName", "Ada".to_string()),
                ("lastName", "Lovelace".to_string()),
                ("email", "ada@example.com".to_string()),
                ("payment", "11.97".to_string()),
            ]
        );
    }
}
