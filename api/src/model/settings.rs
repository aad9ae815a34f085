use kernel::model::settings::{AppSettings, UpdateAppSettings};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub app_name: String,
    pub school_name: String,
    pub logo_url: String,
    pub primary_color: String,
    pub is_public_registration_enabled: bool,
    pub background_image_url: String,
}

impl From<AppSettings> for SettingsResponse {
    fn from(value: AppSettings) -> Self {
        let AppSettings {
            app_name,
            school_name,
            logo_url,
            primary_color,
            is_public_registration_enabled,
            background_image_url,
        } = value;
        Self {
            app_name,
            school_name,
            logo_url,
            primary_color,
            is_public_registration_enabled,
            background_image_url,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSettingsRequest {
    #[serde(default)]
    pub app_name: Option<String>,
    #[serde(default)]
    pub school_name: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub primary_color: Option<String>,
    #[serde(default)]
    pub is_public_registration_enabled: Option<bool>,
    #[serde(default)]
    pub background_image_url: Option<String>,
}

impl From<UpdateSettingsRequest> for UpdateAppSettings {
    fn from(value: UpdateSettingsRequest) -> Self {
        let UpdateSettingsRequest {
            app_name,
            school_name,
            logo_url,
            primary_color,
            is_public_registration_enabled,
            background_image_url,
        } = value;
        Self {
            app_name,
            school_name,
            logo_url,
            primary_color,
            is_public_registration_enabled,
            background_image_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn an_empty_body_is_an_empty_update() {
        let req: UpdateSettingsRequest = serde_json::from_value(serde_json::json!({})).unwrap();
        assert!(UpdateAppSettings::from(req).is_empty());

        let req: UpdateSettingsRequest =
            serde_json::from_value(serde_json::json!({ "isPublicRegistrationEnabled": true }))
                .unwrap();
        assert_eq!(
            UpdateAppSettings::from(req).is_public_registration_enabled,
            Some(true)
        );
    }
}
