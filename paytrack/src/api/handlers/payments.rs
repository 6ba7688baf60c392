use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use tracing::debug;

use crate::{
    AppState,
    analytics::{
        self,
        statistics::{PaymentStatistics, payment_statistics},
    },
    api::models::payments::{PaymentCreate, PaymentResponse, SampleDataResponse, StatusUpdateQuery},
    db::{
        errors::DbError,
        models::payments::{PaymentCreateDBRequest, PaymentStatus, PaymentStatusUpdateDBRequest},
    },
    errors::{Error, Result},
    sample_data::{generate_transaction_id, seed_sample_data},
    types::PaymentId,
};

fn parse_status(token: &str) -> Result<PaymentStatus> {
    token.parse().map_err(|message| Error::BadRequest { message })
}

fn payment_not_found(id: PaymentId) -> Error {
    Error::NotFound {
        resource: "Payment".to_string(),
        id: id.to_string(),
    }
}

#[utoipa::path(
    get,
    path = "/payments",
    tag = "payments",
    summary = "List payments",
    description = "All payments, newest first",
    responses(
        (status = 200, description = "Payments", body = [PaymentResponse]),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_payments(State(state): State<AppState>) -> Result<Json<Vec<PaymentResponse>>> {
    let payments = state.payments.list_all().await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/payments/{id}",
    tag = "payments",
    summary = "Get a payment",
    params(
        ("id" = i64, Path, description = "Payment ID"),
    ),
    responses(
        (status = 200, description = "Payment details", body = PaymentResponse),
        (status = 404, description = "Payment not found"),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_payment(State(state): State<AppState>, Path(id): Path<PaymentId>) -> Result<Json<PaymentResponse>> {
    let payment = state.payments.get_by_id(id).await?.ok_or_else(|| payment_not_found(id))?;
    Ok(Json(payment.into()))
}

#[utoipa::path(
    get,
    path = "/payments/status/{status}",
    tag = "payments",
    summary = "List payments by status",
    params(
        ("status" = String, Path, description = "Status token, e.g. PENDING or pending"),
    ),
    responses(
        (status = 200, description = "Payments in the given status", body = [PaymentResponse]),
        (status = 400, description = "Unknown status"),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_payments_by_status(State(state): State<AppState>, Path(status): Path<String>) -> Result<Json<Vec<PaymentResponse>>> {
    let status = parse_status(&status)?;
    let payments = state.payments.list_by_status(status).await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/payments/recent/{hours}",
    tag = "payments",
    summary = "List recent payments",
    description = "Payments created within the last `hours` hours, newest first",
    params(
        ("hours" = u32, Path, description = "Look-back window in hours"),
    ),
    responses(
        (status = 200, description = "Recent payments", body = [PaymentResponse]),
        (status = 400, description = "Invalid window"),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn list_recent_payments(State(state): State<AppState>, Path(hours): Path<u32>) -> Result<Json<Vec<PaymentResponse>>> {
    let since = Utc::now()
        .checked_sub_signed(Duration::hours(i64::from(hours)))
        .ok_or_else(|| Error::BadRequest {
            message: format!("Look-back window of {hours} hours is out of range"),
        })?;
    let payments = state.payments.list_created_since(since).await?;
    Ok(Json(payments.into_iter().map(Into::into).collect()))
}

#[utoipa::path(
    get,
    path = "/payments/statistics",
    tag = "payments",
    summary = "Payment statistics",
    description = "Counts per status, amounts, success rate and average amount over every stored payment",
    responses(
        (status = 200, description = "Statistics", body = PaymentStatistics),
        (status = 500, description = "Internal server error or incomplete stored payments"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn get_payment_statistics(State(state): State<AppState>) -> Result<Json<PaymentStatistics>> {
    let records = analytics::validate_records(state.payments.list_all().await?)?;
    let statistics = payment_statistics(&records);
    debug!(
        total = statistics.total_payments,
        average = statistics.average_as_f64(),
        "Computed payment statistics"
    );
    Ok(Json(statistics))
}

#[utoipa::path(
    post,
    path = "/payments",
    tag = "payments",
    summary = "Create a payment",
    description = "Store a new payment. The server assigns the transaction ID, creation time and PENDING status.",
    request_body = PaymentCreate,
    responses(
        (status = 201, description = "Payment created", body = PaymentResponse),
        (status = 400, description = "Negative amount"),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_payment(State(state): State<AppState>, Json(data): Json<PaymentCreate>) -> Result<(StatusCode, Json<PaymentResponse>)> {
    if data.amount < Decimal::ZERO {
        return Err(Error::BadRequest {
            message: "Amount must not be negative".to_string(),
        });
    }

    let request = PaymentCreateDBRequest {
        transaction_id: generate_transaction_id(),
        customer_id: data.customer_id,
        customer_name: data.customer_name,
        customer_email: data.customer_email,
        amount: data.amount,
        currency: data.currency.unwrap_or_else(|| "USD".to_string()),
        status: PaymentStatus::Pending,
        payment_method: data.payment_method,
        created_at: Utc::now(),
        description: data.description,
        error_message: None,
        order_id: data.order_id,
        order_type: data.order_type,
        ip_address: data.ip_address,
        country: data.country,
    };

    let payment = state.payments.create(&request).await?;
    Ok((StatusCode::CREATED, Json(payment.into())))
}

#[utoipa::path(
    put,
    path = "/payments/{id}/status",
    tag = "payments",
    summary = "Update a payment's status",
    params(
        ("id" = i64, Path, description = "Payment ID"),
        StatusUpdateQuery,
    ),
    responses(
        (status = 200, description = "Updated payment", body = PaymentResponse),
        (status = 400, description = "Unknown status"),
        (status = 404, description = "Payment not found"),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn update_payment_status(
    State(state): State<AppState>,
    Path(id): Path<PaymentId>,
    Query(query): Query<StatusUpdateQuery>,
) -> Result<Json<PaymentResponse>> {
    let request = PaymentStatusUpdateDBRequest {
        status: parse_status(&query.status)?,
        error_message: query.error_message,
        updated_at: Utc::now(),
    };

    let payment = state.payments.update_status(id, &request).await.map_err(|e| match e {
        DbError::NotFound => payment_not_found(id),
        other => other.into(),
    })?;
    Ok(Json(payment.into()))
}

#[utoipa::path(
    post,
    path = "/payments/generate-sample-data",
    tag = "payments",
    summary = "Generate sample payments",
    description = "Fill an empty store with sample payments. Does nothing if payments already exist.",
    responses(
        (status = 200, description = "Sample data generated", body = SampleDataResponse),
        (status = 500, description = "Internal server error"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn generate_sample_data(State(state): State<AppState>) -> Result<Json<SampleDataResponse>> {
    let created = seed_sample_data(state.payments.as_ref(), &state.config.sample_data, Utc::now()).await?;
    Ok(Json(SampleDataResponse {
        message: "Sample data generated successfully".to_string(),
        created,
    }))
}
