use crate::model::id::AreaId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Area {
    pub id: AreaId,
    pub name: String,
}

#[derive(Debug)]
pub struct UpdateArea {
    pub area_id: AreaId,
    pub name: String,
}
