use kernel::model::{area::Area, id::AreaId};

#[derive(sqlx::FromRow)]
pub struct AreaRow {
    pub area_id: AreaId,
    pub name: String,
}

impl From<AreaRow> for Area {
    fn from(value: AreaRow) -> Self {
        Area {
            id: value.area_id,
            name: value.name,
        }
    }
}
