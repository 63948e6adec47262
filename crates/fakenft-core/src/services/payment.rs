//! Payment currencies and checkout.

use std::sync::Arc;

use tracing::{info, warn};

use crate::error::TransportError;
use crate::model::{Currency, PaymentOutcome};
use crate::request::ApiRequest;
use crate::transport::{Transport, TransportExt};

#[derive(Clone)]
pub struct PaymentService {
    transport: Arc<dyn Transport>,
}

impl PaymentService {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub async fn currencies(&self) -> Result<Vec<Currency>, TransportError> {
        self.transport.fetch(ApiRequest::currencies()).await
    }

    /// Pay for the order with `currency_id`.
    ///
    /// Returns `Ok(true)` only when the server reports success for the same
    /// currency that was selected.
    pub async fn pay(&self, currency_id: &str) -> Result<bool, TransportError> {
        let outcome: PaymentOutcome = self.transport.fetch(ApiRequest::pay_order(currency_id)).await?;
        let paid = outcome.success && outcome.id == currency_id;
        if paid {
            info!(order_id = %outcome.order_id, currency_id, "payment accepted");
        } else {
            warn!(
                success = outcome.success,
                charged = %outcome.id,
                currency_id,
                "payment rejected"
            );
        }
        Ok(paid)
    }
}

impl std::fmt::Debug for PaymentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentService")
            .field("transport", &self.transport.base_url())
            .finish()
    }
}
