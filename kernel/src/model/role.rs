use strum::{AsRefStr, Display, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr, Display, EnumIter)]
pub enum Role {
    Admin,
    #[default]
    Docente,
    Auxiliar,
}

impl Role {
    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }
}
