use super::parse_stored;
use kernel::model::{
    id::ResourceId,
    resource::{Resource, ResourceStatus},
};
use shared::error::{AppError, AppResult};
use sqlx::types::Json;
use std::collections::BTreeMap;
use uuid::Uuid;

#[derive(sqlx::FromRow)]
pub struct ResourceRow {
    pub resource_id: ResourceId,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub status: String,
    pub stock: i32,
    pub damage_notes: Option<String>,
    pub category_name: Option<String>,
    pub attributes: Json<BTreeMap<String, String>>,
    pub notes: Option<String>,
    pub related_accessories: Vec<Uuid>,
    pub is_accessory: bool,
    pub compatible_with: Vec<Uuid>,
}

impl TryFrom<ResourceRow> for Resource {
    type Error = AppError;

    fn try_from(value: ResourceRow) -> Result<Self, Self::Error> {
        let ResourceRow {
            resource_id,
            name,
            brand,
            model,
            status,
            stock,
            damage_notes,
            category_name,
            attributes,
            notes,
            related_accessories,
            is_accessory,
            compatible_with,
        } = value;
        Ok(Resource {
            id: resource_id,
            name,
            brand,
            model,
            status: parse_stored(&status)?,
            stock,
            damage_notes,
            category: category_name,
            attributes: attributes.0,
            notes,
            related_accessories: related_accessories.into_iter().map(ResourceId::from).collect(),
            is_accessory,
            compatible_with: compatible_with.into_iter().map(ResourceId::from).collect(),
        })
    }
}

/// The columns loan workflows lock and inspect before touching a resource.
#[derive(sqlx::FromRow)]
pub struct ResourceStateRow {
    pub resource_id: ResourceId,
    pub name: String,
    pub brand: Option<String>,
    pub status: String,
}

impl ResourceStateRow {
    pub fn status(&self) -> AppResult<ResourceStatus> {
        parse_stored(&self.status)
    }
}
