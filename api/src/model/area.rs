use kernel::model::{
    area::{Area, UpdateArea},
    id::AreaId,
};
use serde::{Deserialize, Serialize};
use strum::VariantNames;

#[derive(Debug, Serialize)]
pub struct AreaResponse {
    pub id: AreaId,
    pub name: String,
}

impl From<Area> for AreaResponse {
    fn from(value: Area) -> Self {
        let Area { id, name } = value;
        Self { id, name }
    }
}

#[derive(Debug, Deserialize, VariantNames)]
#[serde(tag = "action", rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum AreaAction {
    AddMultiple(AddAreasRequest),
}

#[derive(Debug, Deserialize)]
pub struct AddAreasRequest {
    pub names: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAreaRequest {
    pub area_id: AreaId,
    pub name: String,
}

impl From<UpdateAreaRequest> for UpdateArea {
    fn from(value: UpdateAreaRequest) -> Self {
        let UpdateAreaRequest { area_id, name } = value;
        Self {
            area_id,
            name: name.trim().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAreaQuery {
    pub area_id: AreaId,
}
