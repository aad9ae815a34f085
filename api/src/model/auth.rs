use super::user::UserResponse;
use garde::Validate;
use kernel::model::{auth::AccessToken, id::UserId, user::normalize_email};
use serde::{Deserialize, Serialize};
use strum::VariantNames;

#[derive(Debug, Deserialize, VariantNames)]
#[serde(tag = "action", rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum AuthAction {
    SignIn(SignInRequest),
    SignOut,
    RefreshSession,
}

#[derive(Debug, Deserialize, Validate)]
pub struct SignInRequest {
    #[garde(pattern(r"^[^\s@]+@[^\s@]+\.[^\s@]+$"))]
    pub email: String,
    #[garde(length(min = 6))]
    pub password: String,
}

impl SignInRequest {
    /// Trims and lowercases the email before it is validated and looked up.
    pub fn normalized(self) -> Self {
        Self {
            email: normalize_email(&self.email),
            ..self
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessTokenResponse {
    pub access_token: String,
    pub user_id: UserId,
    pub expires_in: u64,
}

impl AccessTokenResponse {
    pub fn new(access_token: AccessToken, user_id: UserId, expires_in: u64) -> Self {
        Self {
            access_token: access_token.0,
            user_id,
            expires_in,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub access_token: String,
    pub user: UserResponse,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sign_in(email: &str, password: &str) -> SignInRequest {
        SignInRequest {
            email: email.into(),
            password: password.into(),
        }
        .normalized()
    }

    #[rstest]
    #[case("docente@colegio.edu.pe", true)]
    #[case("  Docente@Colegio.edu ", true)]
    #[case("a@b.c", true)]
    #[case("a@b.c.", true)]
    #[case("sin-arroba.com", false)]
    #[case("dos@@colegio.edu", false)]
    #[case("con espacio@colegio.edu", false)]
    #[case("falta@dominio", false)]
    #[case("@colegio.edu", false)]
    #[case("punto@.edu", false)]
    #[case("punto@colegio.", false)]
    #[case("", false)]
    fn sign_in_checks_the_email_shape(#[case] email: &str, #[case] valid: bool) {
        assert_eq!(sign_in(email, "secreto").validate(&()).is_ok(), valid);
    }

    #[test]
    fn sign_in_normalizes_the_email_and_needs_six_characters() {
        assert_eq!(
            sign_in("  Docente@Colegio.edu ", "secreto").email,
            "docente@colegio.edu"
        );
        assert!(sign_in("docente@colegio.edu", "12345").validate(&()).is_err());
    }

    #[test]
    fn actions_without_payload_deserialize() {
        let action: AuthAction =
            serde_json::from_value(serde_json::json!({ "action": "signOut" })).unwrap();
        assert!(matches!(action, AuthAction::SignOut));
        assert!(AuthAction::VARIANTS.contains(&"refreshSession"));
    }
}
