use super::{parse_stored, user::JoinedUser};
use chrono::{DateTime, Utc};
use kernel::model::{
    id::{LoanId, UserId},
    loan::{
        DamageReports, Loan, LoanedResource, MissingResourceReport, PurposeDetails,
        SuggestionReports,
    },
};
use shared::error::AppError;
use sqlx::types::Json;

#[derive(sqlx::FromRow)]
pub struct LoanRow {
    pub loan_id: LoanId,
    pub user_id: UserId,
    pub user_name: Option<String>,
    pub user_role: Option<String>,
    pub user_dni: Option<String>,
    pub user_email: Option<String>,
    pub purpose: String,
    pub purpose_details: Option<Json<PurposeDetails>>,
    pub loan_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: String,
    pub resources: Json<Vec<LoanedResource>>,
    pub damage_reports: Json<DamageReports>,
    pub suggestion_reports: Json<SuggestionReports>,
    pub missing_resources: Json<Vec<MissingResourceReport>>,
}

impl TryFrom<LoanRow> for Loan {
    type Error = AppError;

    fn try_from(value: LoanRow) -> Result<Self, Self::Error> {
        let LoanRow {
            loan_id,
            user_id,
            user_name,
            user_role,
            user_dni,
            user_email,
            purpose,
            purpose_details,
            loan_date,
            return_date,
            status,
            resources,
            damage_reports,
            suggestion_reports,
            missing_resources,
        } = value;
        let user = JoinedUser {
            user_id,
            name: user_name,
            role: user_role,
            dni: user_dni,
            email: user_email,
        }
        .into_summary()?;
        Ok(Loan {
            id: loan_id,
            user,
            purpose: parse_stored(&purpose)?,
            purpose_details: purpose_details.map(|d| d.0).unwrap_or_default(),
            loan_date,
            return_date,
            status: parse_stored(&status)?,
            resources: resources.0,
            damage_reports: damage_reports.0,
            suggestion_reports: suggestion_reports.0,
            missing_resources: missing_resources.0,
        })
    }
}
