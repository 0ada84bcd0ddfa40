use super::models::{DashboardStats, Overview, RankBy, TopIndustry};
use crate::common::errors::BusinessResult;
use crate::{industries, waste_requests, wastes};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    DatabaseConnection, EntityTrait, JoinType, Order, PaginatorTrait, QueryOrder, QuerySelect,
    RelationTrait,
};
use std::collections::BTreeMap;

pub const TOP_DEFAULT: u64 = 5;
pub const TOP_MAX: u64 = 100;

pub async fn stats(db: &DatabaseConnection) -> BusinessResult<DashboardStats> {
    let overview = Overview {
        total_industries: industries::models::Entity::find().count(db).await?,
        total_wastes: wastes::models::Entity::find().count(db).await?,
        total_requests: waste_requests::models::Entity::find().count(db).await?,
        total_waste_quantity: wastes::services::total_quantity(db).await?.total_quantity,
    };

    Ok(DashboardStats {
        overview,
        requests_by_status: waste_requests::services::status_counts(db).await?,
        quantity_by_unit: quantity_grouped_by(db, wastes::models::Column::Unit).await?,
        quantity_by_type: quantity_grouped_by(db, wastes::models::Column::WasteType).await?,
    })
}

/// Sums waste quantities per distinct value of `column`
async fn quantity_grouped_by(
    db: &DatabaseConnection,
    column: wastes::models::Column,
) -> BusinessResult<BTreeMap<String, f64>> {
    let rows: Vec<(String, Option<f64>)> = wastes::models::Entity::find()
        .select_only()
        .column(column)
        .column_as(Expr::col(wastes::models::Column::Quantity).sum(), "total")
        .group_by(column)
        .into_tuple()
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(key, total)| (key, total.unwrap_or(0.0)))
        .collect())
}

/// Industries ranked by the wastes they list. Industries without wastes
/// rank with zero; ties go to the lower id.
pub async fn top_industries(
    db: &DatabaseConnection,
    by: RankBy,
    limit: u64,
) -> BusinessResult<Vec<TopIndustry>> {
    let waste_count = Expr::col((wastes::models::Entity, wastes::models::Column::Id)).count();
    let total_quantity = SimpleExpr::from(Func::coalesce([
        Expr::col((wastes::models::Entity, wastes::models::Column::Quantity)).sum(),
        Expr::value(0.0),
    ]));
    let rank = match by {
        RankBy::Count => waste_count.clone(),
        RankBy::Quantity => total_quantity.clone(),
    };

    let ranked = industries::models::Entity::find()
        .select_only()
        .column(industries::models::Column::Id)
        .column(industries::models::Column::Name)
        .column(industries::models::Column::IndustryCode)
        .column_as(waste_count, "waste_count")
        .column_as(total_quantity, "total_quantity")
        .join(JoinType::LeftJoin, industries::models::Relation::Wastes.def())
        .group_by(industries::models::Column::Id)
        .group_by(industries::models::Column::Name)
        .group_by(industries::models::Column::IndustryCode)
        .order_by(rank, Order::Desc)
        .order_by_asc(industries::models::Column::Id)
        .limit(limit)
        .into_model::<TopIndustry>()
        .all(db)
        .await?;

    Ok(ranked)
}
