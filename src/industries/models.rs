use crate::waste_requests::models::WasteRequestSummary;
use crate::wastes::models::WasteSummary;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "industries")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_type = "Text")]
    pub name: String,
    #[sea_orm(unique)]
    pub industry_code: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "crate::wastes::models::Entity")]
    Wastes,
    #[sea_orm(has_many = "crate::waste_requests::models::Entity")]
    WasteRequests,
}

impl Related<crate::wastes::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Wastes.def()
    }
}

impl Related<crate::waste_requests::models::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::WasteRequests.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

/// Industry without its relations, embedded in waste and request payloads
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct IndustrySummary {
    pub id: i32,
    pub name: String,
    pub industry_code: i32,
    pub description: Option<String>,
}

impl From<Model> for IndustrySummary {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            industry_code: model.industry_code,
            description: model.description,
        }
    }
}

/// Industry with the wastes it lists and the requests it submitted
#[derive(ToSchema, Serialize, Deserialize, Debug, Clone)]
pub struct Industry {
    pub id: i32,
    pub name: String,
    pub industry_code: i32,
    pub description: Option<String>,
    pub wastes: Vec<WasteSummary>,
    pub waste_requests: Vec<WasteRequestSummary>,
}

impl Industry {
    pub fn from_parts(
        model: Model,
        wastes: Vec<crate::wastes::models::Model>,
        waste_requests: Vec<crate::waste_requests::models::Model>,
    ) -> Self {
        Self {
            id: model.id,
            name: model.name,
            industry_code: model.industry_code,
            description: model.description,
            wastes: wastes.into_iter().map(Into::into).collect(),
            waste_requests: waste_requests.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(ToSchema, Deserialize, Debug, Default)]
pub struct IndustryCreate {
    pub name: Option<String>,
    pub industry_code: Option<i32>,
    pub description: Option<String>,
}

/// Partial update; a `description` of `null` clears it
#[derive(ToSchema, Deserialize, Debug, Default)]
pub struct IndustryUpdate {
    pub name: Option<String>,
    pub industry_code: Option<i32>,
    #[serde(default, with = "::serde_with::rust::double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

impl IndustryUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.industry_code.is_none() && self.description.is_none()
    }
}

#[derive(Deserialize, Debug, Default)]
pub struct SearchParams {
    pub q: Option<String>,
}
