use crate::waste_requests::models::StatusCounts;
use sea_orm::FromQueryResult;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;

#[derive(ToSchema, Serialize, Deserialize, Debug, Default, PartialEq)]
pub struct Overview {
    pub total_industries: u64,
    pub total_wastes: u64,
    pub total_requests: u64,
    /// Sum over every waste regardless of unit
    pub total_waste_quantity: f64,
}

/// Figures behind the dashboard cards
#[derive(ToSchema, Serialize, Deserialize, Debug, Default)]
pub struct DashboardStats {
    pub overview: Overview,
    pub requests_by_status: StatusCounts,
    pub quantity_by_unit: BTreeMap<String, f64>,
    pub quantity_by_type: BTreeMap<String, f64>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RankBy {
    /// Number of wastes listed
    #[default]
    Count,
    /// Summed quantity of the wastes listed
    Quantity,
}

#[derive(Deserialize, Debug, Default)]
pub struct TopIndustriesParams {
    pub limit: Option<u64>,
    pub by: Option<RankBy>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, FromQueryResult)]
pub struct TopIndustry {
    pub id: i32,
    pub name: String,
    pub industry_code: i32,
    pub waste_count: i64,
    pub total_quantity: f64,
}
