use crate::common::errors::BusinessError;
use crate::industries::models::IndustrySummary;
use crate::wastes::models::WasteSummary;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Lifecycle of a request: `pending` moves once to `approved` or `rejected`
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, ToSchema, Serialize, Deserialize,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

impl RequestStatus {
    pub const ALL: [RequestStatus; 3] = [
        RequestStatus::Pending,
        RequestStatus::Approved,
        RequestStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Approved => "approved",
            RequestStatus::Rejected => "rejected",
        }
    }

    pub fn is_terminal(self) -> bool {
        self != RequestStatus::Pending
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Case-insensitive, surrounding whitespace ignored
impl FromStr for RequestStatus {
    type Err = BusinessError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        RequestStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                crate::validation_error!(
                    "status",
                    format!("Invalid status '{value}'. Must be one of: pending, approved, rejected")
                )
            })
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "waste_requests")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Double")]
    pub quantity_requested: f64,
    pub status: RequestStatus,
    #[sea_orm(column_type = "Text")]
    pub details: String,
    pub industry_id: i32,
    pub waste_id: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::industries::models::Entity",
        from = "Column::IndustryId",
        to = "crate::industries::models::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Industries,
    #[sea_orm(
        belongs_to = "crate::wastes::models::Entity",
        from = "Column::WasteId",
        to = "crate::wastes::models::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Wastes,
}

impl Related<crate::industries::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Industries.def()
    }
}

impl Related<crate::wastes::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wastes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WasteRequestSummary {
    pub id: i32,
    pub quantity_requested: f64,
    pub status: RequestStatus,
    pub details: String,
    pub industry_id: i32,
    pub waste_id: i32,
    pub created_at: DateTime<Utc>,
}

impl From<Model> for WasteRequestSummary {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            quantity_requested: model.quantity_requested,
            status: model.status,
            details: model.details,
            industry_id: model.industry_id,
            waste_id: model.waste_id,
            created_at: model.created_at,
        }
    }
}

/// Request with the requesting industry and the targeted waste
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
pub struct WasteRequest {
    pub id: i32,
    pub quantity_requested: f64,
    pub status: RequestStatus,
    pub details: String,
    pub industry_id: i32,
    pub waste_id: i32,
    pub created_at: DateTime<Utc>,
    pub industry: IndustrySummary,
    pub waste: WasteSummary,
}

impl WasteRequest {
    pub fn from_parts(
        model: Model,
        industry: crate::industries::models::Model,
        waste: crate::wastes::models::Model,
    ) -> Self {
        Self {
            id: model.id,
            quantity_requested: model.quantity_requested,
            status: model.status,
            details: model.details,
            industry_id: model.industry_id,
            waste_id: model.waste_id,
            created_at: model.created_at,
            industry: industry.into(),
            waste: waste.into(),
        }
    }
}

#[derive(ToSchema, Deserialize, Debug, Default)]
pub struct WasteRequestCreate {
    pub industry_id: Option<i32>,
    pub waste_id: Option<i32>,
    pub quantity_requested: Option<f64>,
    pub details: Option<String>,
}

/// Generic update. `status` is kept as text so an unknown value is reported
/// as a validation error rather than a body decoding failure.
#[derive(ToSchema, Deserialize, Debug, Default)]
pub struct WasteRequestUpdate {
    pub status: Option<String>,
    pub details: Option<String>,
    pub quantity_requested: Option<f64>,
}

impl WasteRequestUpdate {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.details.is_none() && self.quantity_requested.is_none()
    }
}

#[derive(ToSchema, Deserialize, Debug, Default)]
pub struct StatusUpdate {
    pub status: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct RequestFilter {
    pub status: Option<String>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub pending: u64,
    pub approved: u64,
    pub rejected: u64,
}

impl StatusCounts {
    pub fn add(&mut self, status: RequestStatus, count: u64) {
        match status {
            RequestStatus::Pending => self.pending += count,
            RequestStatus::Approved => self.approved += count,
            RequestStatus::Rejected => self.rejected += count,
        }
    }

    pub fn total(&self) -> u64 {
        self.pending + self.approved + self.rejected
    }
}
