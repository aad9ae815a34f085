use serde::{Deserialize, Serialize};

pub mod area;
pub mod auth;
pub mod category;
pub mod grade;
pub mod loan;
pub mod meeting;
pub mod pedagogical_hour;
pub mod reservation;
pub mod resource;
pub mod settings;
pub mod user;

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// `?action=` selector used by the GET side of action-dispatch routes.
#[derive(Debug, Default, Deserialize)]
pub struct ActionQuery {
    pub action: Option<String>,
}

/// Trims every name and rejects the list when one of them ends up empty.
pub(crate) fn clean_names(names: Vec<String>) -> shared::error::AppResult<Vec<String>> {
    let names: Vec<String> = names.into_iter().map(|n| n.trim().to_string()).collect();
    if names.is_empty() || names.iter().any(String::is_empty) {
        return Err(shared::error::AppError::BadRequest(
            "Los nombres no pueden estar vacíos".into(),
        ));
    }
    Ok(names)
}

pub(crate) fn clean_name(name: String) -> shared::error::AppResult<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(shared::error::AppError::BadRequest(
            "El nombre no puede estar vacío".into(),
        ));
    }
    Ok(name.to_string())
}
