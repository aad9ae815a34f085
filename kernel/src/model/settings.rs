#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    pub app_name: String,
    pub school_name: String,
    pub logo_url: String,
    pub primary_color: String,
    pub is_public_registration_enabled: bool,
    pub background_image_url: String,
}

#[derive(Debug, Default)]
pub struct UpdateAppSettings {
    pub app_name: Option<String>,
    pub school_name: Option<String>,
    pub logo_url: Option<String>,
    pub primary_color: Option<String>,
    pub is_public_registration_enabled: Option<bool>,
    pub background_image_url: Option<String>,
}

impl UpdateAppSettings {
    pub fn is_empty(&self) -> bool {
        self.app_name.is_none()
            && self.school_name.is_none()
            && self.logo_url.is_none()
            && self.primary_color.is_none()
            && self.is_public_registration_enabled.is_none()
            && self.background_image_url.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn an_update_without_fields_is_empty() {
        assert!(UpdateAppSettings::default().is_empty());
        let update = UpdateAppSettings {
            is_public_registration_enabled: Some(false),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
