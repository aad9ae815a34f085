use crate::model::{id::UserId, role::Role};
use chrono::{DateTime, Utc};

pub mod event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: Option<String>,
    pub role: Role,
    pub dni: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    pub fn summary(&self) -> UserSummary {
        UserSummary {
            id: self.id,
            name: self.name.clone(),
            role: self.role,
            dni: self.dni.clone(),
            email: self.email.clone(),
        }
    }
}

/// The borrower / booker attached to loans and reservations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub id: UserId,
    pub name: String,
    pub role: Role,
    pub dni: Option<String>,
    pub email: Option<String>,
}

impl UserSummary {
    pub const UNKNOWN_NAME: &'static str = "Usuario Desconocido";

    /// Placeholder for rows whose user no longer exists.
    pub fn unknown(id: UserId) -> Self {
        Self {
            id,
            name: Self::UNKNOWN_NAME.into(),
            role: Role::Docente,
            dni: None,
            email: None,
        }
    }
}

/// Normalises an email address the way it is stored and compared.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails_are_trimmed_and_lowercased() {
        assert_eq!(normalize_email("  Ana.Perez@Colegio.EDU "), "ana.perez@colegio.edu");
    }

    #[test]
    fn unknown_user_is_a_docente() {
        let id = UserId::new();
        let unknown = UserSummary::unknown(id);
        assert_eq!(unknown.id, id);
        assert_eq!(unknown.name, "Usuario Desconocido");
        assert_eq!(unknown.role, Role::Docente);
    }
}
