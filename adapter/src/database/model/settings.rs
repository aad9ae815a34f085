use kernel::model::settings::AppSettings;

#[derive(sqlx::FromRow)]
pub struct AppSettingsRow {
    pub app_name: String,
    pub school_name: String,
    pub logo_url: Option<String>,
    pub primary_color: String,
    pub is_public_registration_enabled: bool,
    pub background_image_url: Option<String>,
}

impl From<AppSettingsRow> for AppSettings {
    fn from(value: AppSettingsRow) -> Self {
        let AppSettingsRow {
            app_name,
            school_name,
            logo_url,
            primary_color,
            is_public_registration_enabled,
            background_image_url,
        } = value;
        AppSettings {
            app_name,
            school_name,
            logo_url: logo_url.unwrap_or_default(),
            primary_color,
            is_public_registration_enabled,
            background_image_url: background_image_url.unwrap_or_default(),
        }
    }
}
