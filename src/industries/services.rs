use super::models::{ActiveModel, Column, Entity, Industry, IndustryCreate, IndustryUpdate, Model};
use crate::common::errors::{BusinessResult, DbErrorExt};
use crate::common::validation::{optional_text, require, require_text};
use crate::{waste_requests, wastes};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait,
    LoaderTrait, ModelTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
    TransactionTrait,
};

const RESOURCE: &str = "Industry";

/// Attaches wastes and requests to each industry, two queries in total
pub async fn project_industries<C: ConnectionTrait>(
    conn: &C,
    models: Vec<Model>,
) -> BusinessResult<Vec<Industry>> {
    if models.is_empty() {
        return Ok(Vec::new());
    }
    let wastes = models.load_many(wastes::models::Entity, conn).await?;
    let requests = models
        .load_many(waste_requests::models::Entity, conn)
        .await?;

    Ok(models
        .into_iter()
        .zip(wastes)
        .zip(requests)
        .map(|((model, wastes), requests)| Industry::from_parts(model, wastes, requests))
        .collect())
}

pub async fn find_model<C: ConnectionTrait>(conn: &C, id: i32) -> BusinessResult<Model> {
    Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| crate::not_found!(RESOURCE, id))
}

pub async fn get_one(db: &DatabaseConnection, id: i32) -> BusinessResult<Industry> {
    let model = find_model(db, id).await?;
    let mut projected = project_industries(db, vec![model]).await?;
    projected.pop().ok_or_else(|| crate::not_found!(RESOURCE, id))
}

pub async fn list(db: &DatabaseConnection) -> BusinessResult<Vec<Industry>> {
    let models = Entity::find().order_by_asc(Column::Id).all(db).await?;
    project_industries(db, models).await
}

/// Case-insensitive substring match on the name; a blank term matches everything.
/// Case folding is Unicode-aware and `%`/`_` in the term are literal.
pub async fn search(db: &DatabaseConnection, term: Option<&str>) -> BusinessResult<Vec<Industry>> {
    let term = term.map(str::trim).unwrap_or_default().to_lowercase();

    let models: Vec<Model> = Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await?
        .into_iter()
        .filter(|model| model.name.to_lowercase().contains(&term))
        .collect();
    project_industries(db, models).await
}

pub async fn count(db: &DatabaseConnection) -> BusinessResult<u64> {
    Ok(Entity::find().count(db).await?)
}

/// Errors when another industry (other than `exclude`) already holds `code`
async fn ensure_code_available<C: ConnectionTrait>(
    conn: &C,
    code: i32,
    exclude: Option<i32>,
) -> BusinessResult<()> {
    let mut condition = Condition::all().add(Column::IndustryCode.eq(code));
    if let Some(id) = exclude {
        condition = condition.add(Column::Id.ne(id));
    }

    let taken = Entity::find()
        .select_only()
        .column(Column::Id)
        .filter(condition)
        .into_tuple::<i32>()
        .one(conn)
        .await?;

    match taken {
        Some(_) => Err(crate::duplicate_resource!(RESOURCE, format!("code {code}"))),
        None => Ok(()),
    }
}

pub async fn create(db: &DatabaseConnection, data: IndustryCreate) -> BusinessResult<Industry> {
    let missing = "Name and industry_code are required";
    let name = require_text("name", data.name, missing)?;
    let industry_code = require("industry_code", data.industry_code, missing)?;

    ensure_code_available(db, industry_code, None).await?;

    let industry = ActiveModel {
        name: Set(name),
        industry_code: Set(industry_code),
        description: Set(data.description),
        ..Default::default()
    }
    .insert(db)
    .await
    .map_err(|err| err.to_business_error(RESOURCE))?;

    tracing::info!(
        "Created industry {} ({}) with code {}",
        industry.id,
        industry.name,
        industry.industry_code
    );

    get_one(db, industry.id).await
}

pub async fn update(db: &DatabaseConnection, id: i32, data: IndustryUpdate) -> BusinessResult<Industry> {
    if data.is_empty() {
        return Err(crate::validation_error!("body", "No data provided"));
    }

    let existing = find_model(db, id).await?;
    let mut industry: ActiveModel = existing.clone().into();

    if let Some(name) = optional_text("name", data.name)? {
        industry.name = Set(name);
    }
    if let Some(code) = data.industry_code {
        if code != existing.industry_code {
            ensure_code_available(db, code, Some(id)).await?;
        }
        industry.industry_code = Set(code);
    }
    if let Some(description) = data.description {
        industry.description = Set(description);
    }

    if industry.is_changed() {
        industry
            .update(db)
            .await
            .map_err(|err| err.to_business_error(RESOURCE))?;
    }

    get_one(db, id).await
}

/// Removes the industry, the wastes it lists and every request touching
/// either, in one transaction.
pub async fn delete(db: &DatabaseConnection, id: i32) -> BusinessResult<()> {
    let txn = db.begin().await?;

    let industry = find_model(&txn, id).await?;

    let waste_ids: Vec<i32> = wastes::models::Entity::find()
        .select_only()
        .column(wastes::models::Column::Id)
        .filter(wastes::models::Column::IndustryId.eq(id))
        .into_tuple()
        .all(&txn)
        .await?;

    let removed_requests = waste_requests::models::Entity::delete_many()
        .filter(
            Condition::any()
                .add(waste_requests::models::Column::IndustryId.eq(id))
                .add(waste_requests::models::Column::WasteId.is_in(waste_ids.clone())),
        )
        .exec(&txn)
        .await?;

    wastes::models::Entity::delete_many()
        .filter(wastes::models::Column::IndustryId.eq(id))
        .exec(&txn)
        .await?;

    industry.delete(&txn).await?;
    txn.commit().await?;

    tracing::info!(
        "Deleted industry {id} with {} wastes and {} requests",
        waste_ids.len(),
        removed_requests.rows_affected
    );

    Ok(())
}
