use super::models::{
    ActiveModel, Column, Entity, Model, TotalQuantity, Waste, WasteCreate, WasteUpdate,
};
use crate::common::errors::BusinessResult;
use crate::common::validation::{non_negative_quantity, optional_text, require, require_text};
use crate::{industries, waste_requests};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, LoaderTrait,
    ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, Set,
    TransactionTrait,
};

const RESOURCE: &str = "Waste";

/// Attaches the owning industry and the requests to each waste
pub async fn project_wastes<C: ConnectionTrait>(
    conn: &C,
    models: Vec<Model>,
) -> BusinessResult<Vec<Waste>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let industries = models.load_one(industries::models::Entity, conn).await?;
    let requests = models
        .load_many(waste_requests::models::Entity, conn)
        .await?;

    models
        .into_iter()
        .zip(industries)
        .zip(requests)
        .map(|((model, industry), requests)| -> BusinessResult<Waste> {
            let industry = industry.ok_or_else(|| crate::not_found!("Industry", model.industry_id))?;
            Ok(Waste::from_parts(model, industry, requests))
        })
        .collect()
}

async fn project_query<C: ConnectionTrait>(conn: &C, query: Select<Entity>) -> BusinessResult<Vec<Waste>> {
    let models = query.order_by_asc(Column::Id).all(conn).await?;
    project_wastes(conn, models).await
}

pub async fn find_model<C: ConnectionTrait>(conn: &C, id: i32) -> BusinessResult<Model> {
    Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| crate::not_found!(RESOURCE, id))
}

pub async fn get_one<C: ConnectionTrait>(conn: &C, id: i32) -> BusinessResult<Waste> {
    let model = find_model(conn, id).await?;
    let mut projected = project_wastes(conn, vec![model]).await?;
    projected.pop().ok_or_else(|| crate::not_found!(RESOURCE, id))
}

pub async fn list(db: &DatabaseConnection, industry_id: Option<i32>) -> BusinessResult<Vec<Waste>> {
    let mut query = Entity::find();
    if let Some(industry_id) = industry_id {
        query = query.filter(Column::IndustryId.eq(industry_id));
    }
    project_query(db, query).await
}

pub async fn list_by_type(db: &DatabaseConnection, waste_type: &str) -> BusinessResult<Vec<Waste>> {
    project_query(db, Entity::find().filter(Column::WasteType.eq(waste_type))).await
}

/// Wastes with stock left to claim
pub async fn list_available(db: &DatabaseConnection) -> BusinessResult<Vec<Waste>> {
    project_query(db, Entity::find().filter(Column::Quantity.gt(0.0))).await
}

pub async fn total_quantity(db: &DatabaseConnection) -> BusinessResult<TotalQuantity> {
    let totals: Option<(Option<f64>, i64)> = Entity::find()
        .select_only()
        .column_as(Expr::col(Column::Quantity).sum(), "total_quantity")
        .column_as(Expr::col(Column::WasteType).count_distinct(), "total_types")
        .into_tuple()
        .one(db)
        .await?;

    let (total_quantity, total_types) = totals.unwrap_or((None, 0));
    Ok(TotalQuantity {
        total_quantity: total_quantity.unwrap_or(0.0),
        total_types,
    })
}

pub async fn count(db: &DatabaseConnection) -> BusinessResult<u64> {
    Ok(Entity::find().count(db).await?)
}

async fn ensure_industry_exists<C: ConnectionTrait>(conn: &C, industry_id: i32) -> BusinessResult<()> {
    industries::services::find_model(conn, industry_id).await.map(|_| ())
}

pub async fn create(db: &DatabaseConnection, data: WasteCreate) -> BusinessResult<Waste> {
    let missing = "Name, waste_type, and unit are required";
    let name = require_text("name", data.name, missing)?;
    let waste_type = require_text("waste_type", data.waste_type, missing)?;
    let unit = require_text("unit", data.unit, missing)?;
    let industry_id = require("industry_id", data.industry_id, "industry_id is required")?;
    let quantity = non_negative_quantity("quantity", data.quantity.unwrap_or(0.0))?;

    let txn = db.begin().await?;
    ensure_industry_exists(&txn, industry_id).await?;

    let waste = ActiveModel {
        name: Set(name),
        waste_type: Set(waste_type),
        quantity: Set(quantity),
        unit: Set(unit),
        notes: Set(data.notes),
        industry_id: Set(industry_id),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    txn.commit().await?;

    tracing::info!(
        "Industry {industry_id} listed waste {} ({} {} of {})",
        waste.id,
        waste.quantity,
        waste.unit,
        waste.waste_type
    );

    get_one(db, waste.id).await
}

pub async fn update(db: &DatabaseConnection, id: i32, data: WasteUpdate) -> BusinessResult<Waste> {
    if data.is_empty() {
        return Err(crate::validation_error!("body", "No data provided"));
    }

    let txn = db.begin().await?;
    let mut waste: ActiveModel = find_model(&txn, id).await?.into();

    if let Some(name) = optional_text("name", data.name)? {
        waste.name = Set(name);
    }
    if let Some(waste_type) = optional_text("waste_type", data.waste_type)? {
        waste.waste_type = Set(waste_type);
    }
    if let Some(quantity) = data.quantity {
        waste.quantity = Set(non_negative_quantity("quantity", quantity)?);
    }
    if let Some(unit) = optional_text("unit", data.unit)? {
        waste.unit = Set(unit);
    }
    if let Some(notes) = data.notes {
        waste.notes = Set(notes);
    }
    if let Some(industry_id) = data.industry_id {
        ensure_industry_exists(&txn, industry_id).await?;
        waste.industry_id = Set(industry_id);
    }

    if waste.is_changed() {
        waste.update(&txn).await?;
    }
    txn.commit().await?;

    get_one(db, id).await
}

/// Deletes the waste and the requests made against it
pub async fn delete(db: &DatabaseConnection, id: i32) -> BusinessResult<()> {
    let txn = db.begin().await?;

    let waste = find_model(&txn, id).await?;
    let removed_requests = waste_requests::models::Entity::delete_many()
        .filter(waste_requests::models::Column::WasteId.eq(id))
        .exec(&txn)
        .await?;
    waste.delete(&txn).await?;

    txn.commit().await?;

    tracing::info!(
        "Deleted waste {id} with {} requests",
        removed_requests.rows_affected
    );
    Ok(())
}
