use crate::model::id::ResourceId;
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use std::collections::BTreeMap;
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub mod event;

pub const UNCATEGORIZED: &str = "Sin categoría";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    EnumString,
    AsRefStr,
    Display,
    EnumIter,
    Serialize,
    Deserialize,
)]
pub enum ResourceStatus {
    #[default]
    #[strum(serialize = "disponible")]
    #[serde(rename = "disponible")]
    Available,
    #[strum(serialize = "prestado")]
    #[serde(rename = "prestado")]
    Loaned,
    #[strum(serialize = "mantenimiento")]
    #[serde(rename = "mantenimiento")]
    Maintenance,
    #[strum(serialize = "dañado")]
    #[serde(rename = "dañado")]
    Damaged,
}

impl ResourceStatus {
    pub fn is_available(self) -> bool {
        self == ResourceStatus::Available
    }

    /// How the damage notes column changes when a resource moves to this status.
    pub fn damage_notes_change(self, notes: Option<String>) -> DamageNotesChange {
        match self {
            ResourceStatus::Maintenance | ResourceStatus::Damaged => DamageNotesChange::Set(notes),
            ResourceStatus::Available => DamageNotesChange::Set(None),
            ResourceStatus::Loaned => DamageNotesChange::Keep,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DamageNotesChange {
    Keep,
    Set(Option<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub id: ResourceId,
    pub name: String,
    pub brand: Option<String>,
    pub model: Option<String>,
    pub status: ResourceStatus,
    pub stock: i32,
    pub damage_notes: Option<String>,
    pub category: Option<String>,
    pub attributes: BTreeMap<String, String>,
    pub notes: Option<String>,
    pub related_accessories: Vec<ResourceId>,
    pub is_accessory: bool,
    pub compatible_with: Vec<ResourceId>,
}

impl Resource {
    pub fn category_name(&self) -> &str {
        self.category.as_deref().unwrap_or(UNCATEGORIZED)
    }
}

/// Singular label used to number new resources: "Laptops" -> "Laptop".
pub fn singular_label(category: &str) -> String {
    let category = category.trim();
    match category.strip_suffix('s') {
        Some(singular) if !singular.is_empty() => singular.to_string(),
        _ if category.is_empty() => "Recurso".to_string(),
        _ => category.to_string(),
    }
}

/// Highest trailing number among existing resource names, or 0.
pub fn last_resource_number<'a>(names: impl IntoIterator<Item = &'a str>) -> u32 {
    names
        .into_iter()
        .filter_map(|name| {
            let digits_at = name
                .char_indices()
                .rev()
                .find(|(_, c)| !c.is_ascii_digit())
                .map(|(i, c)| i + c.len_utf8())
                .unwrap_or(0);
            name[digits_at..].parse::<u32>().ok()
        })
        .max()
        .unwrap_or(0)
}

/// Upper bound for one `add` batch.
pub const MAX_BATCH_QUANTITY: u32 = 100;

pub fn ensure_batch_quantity(quantity: u32) -> AppResult<()> {
    if !(1..=MAX_BATCH_QUANTITY).contains(&quantity) {
        return Err(AppError::BadRequest(format!(
            "La cantidad debe estar entre 1 y {MAX_BATCH_QUANTITY}"
        )));
    }
    Ok(())
}

/// Names for `quantity` new resources continuing after `last`.
pub fn numbered_names(category: &str, last: u32, quantity: u32) -> AppResult<Vec<String>> {
    ensure_batch_quantity(quantity)?;
    let label = singular_label(category);
    (1..=quantity)
        .map(|offset| {
            last.checked_add(offset)
                .map(|n| format!("{label} {n}"))
                .ok_or_else(|| {
                    AppError::BadRequest("La numeración de recursos está agotada".into())
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("Laptops", "Laptop")]
    #[case("Proyectores", "Proyectore")]
    #[case("Audio", "Audio")]
    #[case("  Tablets ", "Tablet")]
    #[case("", "Recurso")]
    #[case("s", "s")]
    fn singular_label_drops_a_trailing_s(#[case] category: &str, #[case] expected: &str) {
        assert_eq!(singular_label(category), expected);
    }

    #[test]
    fn last_number_ignores_names_without_a_suffix() {
        let names = ["Laptop 3", "Laptop 12", "Laptop", "Cámara Fotográfica", "Laptop 7"];
        assert_eq!(last_resource_number(names), 12);
        assert_eq!(last_resource_number(Vec::<&str>::new()), 0);
    }

    #[test]
    fn new_names_continue_the_sequence() {
        assert_eq!(
            numbered_names("Tablets", 4, 3).unwrap(),
            vec!["Tablet 5", "Tablet 6", "Tablet 7"]
        );
    }

    #[rstest]
    #[case(u32::MAX - 1, 2)]
    #[case(0, 0)]
    #[case(0, MAX_BATCH_QUANTITY + 1)]
    #[case(0, u32::MAX)]
    fn numbering_rejects_batches_it_cannot_name(#[case] last: u32, #[case] quantity: u32) {
        assert!(matches!(
            numbered_names("Laptops", last, quantity),
            Err(AppError::BadRequest(_))
        ));
    }

    #[rstest]
    #[case(ResourceStatus::Damaged, Some("pantalla rota"), DamageNotesChange::Set(Some("pantalla rota".into())))]
    #[case(ResourceStatus::Maintenance, None, DamageNotesChange::Set(None))]
    #[case(ResourceStatus::Available, Some("ignored"), DamageNotesChange::Set(None))]
    #[case(ResourceStatus::Loaned, Some("ignored"), DamageNotesChange::Keep)]
    fn damage_notes_follow_the_status(
        #[case] status: ResourceStatus,
        #[case] notes: Option<&str>,
        #[case] expected: DamageNotesChange,
    ) {
        assert_eq!(status.damage_notes_change(notes.map(String::from)), expected);
    }

    #[test]
    fn statuses_use_the_stored_spanish_names() {
        assert_eq!(ResourceStatus::Damaged.as_ref(), "dañado");
        assert_eq!(
            ResourceStatus::from_str("prestado").unwrap(),
            ResourceStatus::Loaned
        );
    }
}
