//! Payment store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::{
    db::{
        errors::{DbError, Result},
        models::payments::{PaymentCreateDBRequest, PaymentDBResponse, PaymentStatus, PaymentStatusUpdateDBRequest},
    },
    types::PaymentId,
};

/// Access to stored payments.
///
/// Listing methods return payments newest first (by `created_at`, then id). Payments without
/// a `created_at` sort last.
#[async_trait]
pub trait PaymentStore: Send + Sync {
    /// Store a new payment and return it with its assigned id
    async fn create(&self, request: &PaymentCreateDBRequest) -> Result<PaymentDBResponse>;

    /// Store every request, but only while the store holds no payments.
    ///
    /// Concurrent calls are serialized, so at most one of them stores anything. Returns the
    /// number of payments stored, 0 when the store was not empty.
    async fn create_many_if_empty(&self, requests: &[PaymentCreateDBRequest]) -> Result<usize>;

    /// Load already-identified payments as-is, e.g. from an export.
    ///
    /// Existing rows with the same id are replaced. Returns the number of rows loaded.
    async fn import(&self, rows: Vec<PaymentDBResponse>) -> Result<usize>;

    /// Get a payment by ID
    async fn get_by_id(&self, id: PaymentId) -> Result<Option<PaymentDBResponse>>;

    /// Snapshot of every stored payment
    async fn list_all(&self) -> Result<Vec<PaymentDBResponse>>;

    /// Payments currently in the given status
    async fn list_by_status(&self, status: PaymentStatus) -> Result<Vec<PaymentDBResponse>>;

    /// Payments created at or after `since`
    async fn list_created_since(&self, since: DateTime<Utc>) -> Result<Vec<PaymentDBResponse>>;

    /// Move a payment to a new status. Fails with [`DbError::NotFound`] for unknown ids.
    async fn update_status(&self, id: PaymentId, request: &PaymentStatusUpdateDBRequest) -> Result<PaymentDBResponse>;

    /// Number of stored payments
    async fn count(&self) -> Result<usize>;
}

/// [`PaymentStore`] backed by a concurrent map.
#[derive(Debug)]
pub struct InMemoryPayments {
    rows: DashMap<PaymentId, PaymentDBResponse>,
    next_id: AtomicI64,
    bulk_create: Mutex<()>,
}

impl Default for InMemoryPayments {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryPayments {
    pub fn new() -> Self {
        Self {
            rows: DashMap::new(),
            next_id: AtomicI64::new(1),
            bulk_create: Mutex::new(()),
        }
    }

    fn collect_newest_first(&self, predicate: impl Fn(&PaymentDBResponse) -> bool) -> Vec<PaymentDBResponse> {
        let mut payments: Vec<PaymentDBResponse> = self
            .rows
            .iter()
            .filter(|entry| predicate(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        payments.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| b.id.cmp(&a.id)));
        payments
    }
}

#[async_trait]
impl PaymentStore for InMemoryPayments {
    #[instrument(skip(self, request), fields(transaction_id = %request.transaction_id), err)]
    async fn create(&self, request: &PaymentCreateDBRequest) -> Result<PaymentDBResponse> {
        let id = self
            .next_id
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |id| id.checked_add(1))
            .map_err(|_| DbError::Validation {
                message: "Payment id sequence is exhausted".to_string(),
            })?;
        let payment = PaymentDBResponse {
            id,
            transaction_id: request.transaction_id.clone(),
            customer_id: request.customer_id.clone(),
            customer_name: request.customer_name.clone(),
            customer_email: request.customer_email.clone(),
            amount: Some(request.amount),
            currency: request.currency.clone(),
            status: request.status,
            payment_method: request.payment_method,
            created_at: Some(request.created_at),
            updated_at: None,
            description: request.description.clone(),
            error_message: request.error_message.clone(),
            order_id: request.order_id.clone(),
            order_type: request.order_type.clone(),
            ip_address: request.ip_address.clone(),
            country: request.country.clone(),
        };
        self.rows.insert(id, payment.clone());
        debug!(payment_id = id, "Stored payment");
        Ok(payment)
    }

    #[instrument(skip(self, requests), fields(count = requests.len()), err)]
    async fn create_many_if_empty(&self, requests: &[PaymentCreateDBRequest]) -> Result<usize> {
        let _guard = self.bulk_create.lock().await;
        if !self.rows.is_empty() {
            return Ok(0);
        }
        for request in requests {
            self.create(request).await?;
        }
        Ok(requests.len())
    }

    #[instrument(skip(self, rows), fields(count = rows.len()), err)]
    async fn import(&self, rows: Vec<PaymentDBResponse>) -> Result<usize> {
        let count = rows.len();
        for row in rows {
            // Keep the sequence ahead of every imported id
            self.next_id.fetch_max(row.id.saturating_add(1), Ordering::SeqCst);
            self.rows.insert(row.id, row);
        }
        Ok(count)
    }

    async fn get_by_id(&self, id: PaymentId) -> Result<Option<PaymentDBResponse>> {
        Ok(self.rows.get(&id).map(|entry| entry.value().clone()))
    }

    async fn list_all(&self) -> Result<Vec<PaymentDBResponse>> {
        Ok(self.collect_newest_first(|_| true))
    }

    async fn list_by_status(&self, status: PaymentStatus) -> Result<Vec<PaymentDBResponse>> {
        Ok(self.collect_newest_first(|payment| payment.status == status))
    }

    async fn list_created_since(&self, since: DateTime<Utc>) -> Result<Vec<PaymentDBResponse>> {
        Ok(self.collect_newest_first(|payment| payment.created_at.is_some_and(|created_at| created_at >= since)))
    }

    #[instrument(skip(self, request), fields(status = %request.status), err)]
    async fn update_status(&self, id: PaymentId, request: &PaymentStatusUpdateDBRequest) -> Result<PaymentDBResponse> {
        let mut entry = self.rows.get_mut(&id).ok_or(DbError::NotFound)?;
        let payment = entry.value_mut();
        payment.status = request.status;
        payment.updated_at = Some(request.updated_at);
        if let Some(message) = &request.error_message {
            payment.error_message = Some(message.clone());
        }
        Ok(payment.clone())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.rows.len())
    }
}
