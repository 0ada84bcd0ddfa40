use crate::industries::models::IndustrySummary;
use crate::waste_requests::models::WasteRequestSummary;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "wastes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub waste_type: String,
    #[sea_orm(column_type = "Double")]
    pub quantity: f64,
    #[sea_orm(column_type = "Text")]
    pub unit: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub industry_id: i32,
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
    #[sea_orm(has_many = "crate::waste_requests::models::Entity")]
    WasteRequests,
}

impl Related<crate::industries::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Industries.def()
    }
}

impl Related<crate::waste_requests::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WasteRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WasteSummary {
    pub id: i32,
    pub name: String,
    pub waste_type: String,
    pub quantity: f64,
    pub unit: String,
    pub notes: Option<String>,
    pub industry_id: i32,
}

impl From<Model> for WasteSummary {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            waste_type: model.waste_type,
            quantity: model.quantity,
            unit: model.unit,
            notes: model.notes,
            industry_id: model.industry_id,
        }
    }
}

/// Waste with its owning industry and the requests made against it
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
pub struct Waste {
    pub id: i32,
    pub name: String,
    pub waste_type: String,
    pub quantity: f64,
    pub unit: String,
    pub notes: Option<String>,
    pub industry_id: i32,
    pub industry: IndustrySummary,
    pub waste_requests: Vec<WasteRequestSummary>,
}

impl Waste {
    pub fn from_parts(
        model: Model,
        industry: crate::industries::models::Model,
        waste_requests: Vec<crate::waste_requests::models::Model>,
    ) -> Self {
        Self {
            id: model.id,
            name: model.name,
            waste_type: model.waste_type,
            quantity: model.quantity,
            unit: model.unit,
            notes: model.notes,
            industry_id: model.industry_id,
            industry: industry.into(),
            waste_requests: waste_requests.into_iter().map(Into::into).collect(),
        }
    }
}

// Older clients sent `wasteType`, `Quantity` and `Unit`; those spellings are
// still read but responses always use snake_case.

#[derive(ToSchema, Deserialize, Debug, Default)]
pub struct WasteCreate {
    pub name: Option<String>,
    #[serde(alias = "wasteType")]
    pub waste_type: Option<String>,
    #[serde(alias = "Quantity")]
    pub quantity: Option<f64>,
    #[serde(alias = "Unit")]
    pub unit: Option<String>,
    pub notes: Option<String>,
    pub industry_id: Option<i32>,
}

#[derive(ToSchema, Deserialize, Debug, Default)]
pub struct WasteUpdate {
    pub name: Option<String>,
    #[serde(alias = "wasteType")]
    pub waste_type: Option<String>,
    #[serde(alias = "Quantity")]
    pub quantity: Option<f64>,
    #[serde(alias = "Unit")]
    pub unit: Option<String>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub notes: Option<Option<String>>,
    pub industry_id: Option<i32>,
}

impl WasteUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.waste_type.is_none()
            && self.quantity.is_none()
            && self.unit.is_none()
            && self.notes.is_none()
            && self.industry_id.is_none()
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct WasteFilter {
    pub industry_id: Option<i32>,
}

#[derive(ToSchema, Serialize, Deserialize, Debug)]
pub struct TotalQuantity {
    pub total_quantity: f64,
    /// Number of distinct waste types
    pub total_types: i64,
}
