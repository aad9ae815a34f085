use kernel::model::{
    id::PedagogicalHourId,
    pedagogical_hour::{PedagogicalHour, UpdatePedagogicalHour},
};
use serde::{Deserialize, Serialize};
use strum::VariantNames;

#[derive(Debug, Serialize)]
pub struct PedagogicalHourResponse {
    pub id: PedagogicalHourId,
    pub name: String,
}

impl From<PedagogicalHour> for PedagogicalHourResponse {
    fn from(value: PedagogicalHour) -> Self {
        let PedagogicalHour { id, name } = value;
        Self { id, name }
    }
}

#[derive(Debug, Deserialize, VariantNames)]
#[serde(tag = "action", rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum PedagogicalHourAction {
    Add(AddPedagogicalHourRequest),
}

#[derive(Debug, Deserialize)]
pub struct AddPedagogicalHourRequest {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePedagogicalHourRequest {
    pub pedagogical_hour_id: PedagogicalHourId,
    pub name: String,
}

impl From<UpdatePedagogicalHourRequest> for UpdatePedagogicalHour {
    fn from(value: UpdatePedagogicalHourRequest) -> Self {
        let UpdatePedagogicalHourRequest {
            pedagogical_hour_id,
            name,
        } = value;
        Self {
            pedagogical_hour_id,
            name: name.trim().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletePedagogicalHourQuery {
    pub pedagogical_hour_id: PedagogicalHourId,
}
