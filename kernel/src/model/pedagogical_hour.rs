use crate::model::id::PedagogicalHourId;

/// A named teaching period such as "1ra Hora".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PedagogicalHour {
    pub id: PedagogicalHourId,
    pub name: String,
}

#[derive(Debug)]
pub struct UpdatePedagogicalHour {
    pub pedagogical_hour_id: PedagogicalHourId,
    pub name: String,
}
