use kernel::model::{id::PedagogicalHourId, pedagogical_hour::PedagogicalHour};

#[derive(sqlx::FromRow)]
pub struct PedagogicalHourRow {
    pub pedagogical_hour_id: PedagogicalHourId,
    pub name: String,
}

impl From<PedagogicalHourRow> for PedagogicalHour {
    fn from(value: PedagogicalHourRow) -> Self {
        PedagogicalHour {
            id: value.pedagogical_hour_id,
            name: value.name,
        }
    }
}
