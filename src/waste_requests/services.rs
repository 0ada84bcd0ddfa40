//! Waste request lifecycle.
//!
//! A request starts `pending` and moves exactly once to `approved` or
//! `rejected`. Every path into `approved` goes through [`apply_transition`],
//! which decrements the waste's stock in the same transaction as the status
//! change. Both writes are conditional updates, so two concurrent approvals
//! can neither approve the same request twice nor take the stock below zero.

use super::models::{
    ActiveModel, Column, Entity, Model, RequestStatus, StatusCounts, WasteRequest,
    WasteRequestCreate, WasteRequestUpdate,
};
use crate::common::errors::BusinessResult;
use crate::common::validation::{positive_quantity, require};
use crate::{industries, wastes};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveEnum, ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
    DatabaseTransaction, EntityTrait, LoaderTrait, ModelTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};

const RESOURCE: &str = "Waste request";

pub const RECENT_DEFAULT: u64 = 10;
pub const RECENT_MAX: u64 = 100;

/// Attaches the requesting industry and the targeted waste to each request
pub async fn project_requests<C: ConnectionTrait>(
    conn: &C,
    models: Vec<Model>,
) -> BusinessResult<Vec<WasteRequest>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let industries = models.load_one(industries::models::Entity, conn).await?;
    let wastes = models.load_one(wastes::models::Entity, conn).await?;

    models
        .into_iter()
        .zip(industries)
        .zip(wastes)
        .map(|((model, industry), waste)| -> BusinessResult<WasteRequest> {
            let industry = industry.ok_or_else(|| crate::not_found!("Industry", model.industry_id))?;
            let waste = waste.ok_or_else(|| crate::not_found!("Waste", model.waste_id))?;
            Ok(WasteRequest::from_parts(model, industry, waste))
        })
        .collect()
}

pub async fn find_model<C: ConnectionTrait>(conn: &C, id: i32) -> BusinessResult<Model> {
    Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| crate::not_found!(RESOURCE, id))
}

pub async fn get_one<C: ConnectionTrait>(conn: &C, id: i32) -> BusinessResult<WasteRequest> {
    let model = find_model(conn, id).await?;
    let mut projected = project_requests(conn, vec![model]).await?;
    projected.pop().ok_or_else(|| crate::not_found!(RESOURCE, id))
}

/// Newest first
pub async fn list(
    db: &DatabaseConnection,
    status: Option<RequestStatus>,
) -> BusinessResult<Vec<WasteRequest>> {
    let mut query = Entity::find();
    if let Some(status) = status {
        query = query.filter(Column::Status.eq(status));
    }
    let models = query.order_by_desc(Column::Id).all(db).await?;
    project_requests(db, models).await
}

/// Latest `limit` requests by id
pub async fn recent(db: &DatabaseConnection, limit: u64) -> BusinessResult<Vec<WasteRequest>> {
    let models = Entity::find()
        .order_by_desc(Column::Id)
        .limit(limit)
        .all(db)
        .await?;
    project_requests(db, models).await
}

pub async fn status_counts<C: ConnectionTrait>(conn: &C) -> BusinessResult<StatusCounts> {
    let rows: Vec<(String, i64)> = Entity::find()
        .select_only()
        .column(Column::Status)
        .column_as(Expr::col(Column::Id).count(), "total")
        .group_by(Column::Status)
        .into_tuple()
        .all(conn)
        .await?;

    let mut counts = StatusCounts::default();
    for (status, total) in rows {
        match status.parse::<RequestStatus>() {
            Ok(status) => counts.add(status, u64::try_from(total).unwrap_or_default()),
            Err(_) => tracing::warn!("Ignoring {total} requests with unknown status '{status}'"),
        }
    }
    Ok(counts)
}

pub async fn create(db: &DatabaseConnection, data: WasteRequestCreate) -> BusinessResult<WasteRequest> {
    let missing = "Industry ID and Waste ID are required";
    let industry_id = require("industry_id", data.industry_id, missing)?;
    let waste_id = require("waste_id", data.waste_id, missing)?;
    let quantity_requested = positive_quantity(
        "quantity_requested",
        require(
            "quantity_requested",
            data.quantity_requested,
            "quantity_requested is required",
        )?,
    )?;

    let txn = db.begin().await?;
    industries::services::find_model(&txn, industry_id).await?;
    wastes::services::find_model(&txn, waste_id).await?;

    let request = ActiveModel {
        quantity_requested: Set(quantity_requested),
        status: Set(RequestStatus::Pending),
        details: Set(data.details.unwrap_or_default()),
        industry_id: Set(industry_id),
        waste_id: Set(waste_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(
        "Industry {industry_id} requested {quantity_requested} of waste {waste_id} (request {})",
        request.id
    );

    get_one(db, request.id).await
}

/// Moves a pending request to `target`. On approval the waste stock is
/// decremented by the requested quantity, or the whole call fails when the
/// stock is short.
async fn apply_transition(
    txn: &DatabaseTransaction,
    request: &Model,
    target: RequestStatus,
) -> BusinessResult<()> {
    if request.status.is_terminal() {
        return Err(crate::business_rule_violation!(
            "pending_only",
            format!(
                "Request {} is already {} and can no longer change status",
                request.id, request.status
            )
        ));
    }
    if target == RequestStatus::Pending {
        return Ok(());
    }

    let flipped = Entity::update_many()
        .col_expr(Column::Status, Expr::value(target.to_value()))
        .filter(Column::Id.eq(request.id))
        .filter(Column::Status.eq(RequestStatus::Pending))
        .exec(txn)
        .await?;
    if flipped.rows_affected == 0 {
        return Err(crate::business_rule_violation!(
            "pending_only",
            format!("Request {} is no longer pending", request.id)
        ));
    }

    if target == RequestStatus::Approved {
        let waste = wastes::services::find_model(txn, request.waste_id).await?;
        let decremented = wastes::models::Entity::update_many()
            .col_expr(
                wastes::models::Column::Quantity,
                Expr::col(wastes::models::Column::Quantity).sub(request.quantity_requested),
            )
            .filter(wastes::models::Column::Id.eq(request.waste_id))
            .filter(wastes::models::Column::Quantity.gte(request.quantity_requested))
            .exec(txn)
            .await?;
        if decremented.rows_affected == 0 {
            return Err(crate::business_rule_violation!(
                "sufficient_stock",
                format!(
                    "Insufficient waste quantity in stock: requested {} {}, available {} {}",
                    request.quantity_requested, waste.unit, waste.quantity, waste.unit
                )
            ));
        }
    }

    Ok(())
}

/// Runs `apply_transition` in its own transaction, committing both rows or neither
async fn transition_in_txn(
    db: &DatabaseConnection,
    id: i32,
    target: RequestStatus,
) -> BusinessResult<()> {
    let txn = db.begin().await?;
    let outcome = match find_model(&txn, id).await {
        Ok(request) => apply_transition(&txn, &request, target).await,
        Err(err) => Err(err),
    };

    match outcome {
        Ok(()) => txn.commit().await?,
        Err(err) => {
            txn.rollback().await?;
            return Err(err);
        }
    }
    Ok(())
}

pub async fn approve(db: &DatabaseConnection, id: i32) -> BusinessResult<WasteRequest> {
    transition_in_txn(db, id, RequestStatus::Approved).await?;
    tracing::info!("Approved waste request {id}");
    get_one(db, id).await
}

pub async fn reject(db: &DatabaseConnection, id: i32) -> BusinessResult<WasteRequest> {
    transition_in_txn(db, id, RequestStatus::Rejected).await?;
    tracing::info!("Rejected waste request {id}");
    get_one(db, id).await
}

/// Status-only update; setting the current status again is a no-op
pub async fn set_status(db: &DatabaseConnection, id: i32, status: Option<String>) -> BusinessResult<WasteRequest> {
    let status = require("status", status, "Status is required")?;
    update(
        db,
        id,
        WasteRequestUpdate {
            status: Some(status),
            ..Default::default()
        },
    )
    .await
}

async fn apply_update(
    txn: &DatabaseTransaction,
    id: i32,
    data: WasteRequestUpdate,
    target: Option<RequestStatus>,
) -> BusinessResult<()> {
    let existing = find_model(txn, id).await?;
    let mut request: ActiveModel = existing.clone().into();

    if let Some(quantity) = data.quantity_requested {
        if existing.status.is_terminal()
            && (quantity - existing.quantity_requested).abs() > f64::EPSILON
        {
            return Err(crate::business_rule_violation!(
                "pending_only",
                format!(
                    "quantity_requested of request {id} cannot change once it is {}",
                    existing.status
                )
            ));
        }
        request.quantity_requested = Set(quantity);
    }
    if let Some(details) = data.details {
        request.details = Set(details);
    }

    // Field edits land first so an approval in the same call uses the new quantity
    let current = if request.is_changed() {
        request.update(txn).await?
    } else {
        existing
    };

    if let Some(target) = target.filter(|target| *target != current.status) {
        apply_transition(txn, &current, target).await?;
    }
    Ok(())
}

pub async fn update(
    db: &DatabaseConnection,
    id: i32,
    data: WasteRequestUpdate,
) -> BusinessResult<WasteRequest> {
    if data.is_empty() {
        return Err(crate::validation_error!("body", "No data provided"));
    }
    let target = data
        .status
        .as_deref()
        .map(str::parse::<RequestStatus>)
        .transpose()?;
    if let Some(quantity) = data.quantity_requested {
        positive_quantity("quantity_requested", quantity)?;
    }

    let txn = db.begin().await?;
    match apply_update(&txn, id, data, target).await {
        Ok(()) => txn.commit().await?,
        Err(err) => {
            txn.rollback().await?;
            return Err(err);
        }
    }

    get_one(db, id).await
}

pub async fn delete(db: &DatabaseConnection, id: i32) -> BusinessResult<()> {
    let request = find_model(db, id).await?;
    request.delete(db).await?;
    tracing::info!("Deleted waste request {id}");
    Ok(())
}
