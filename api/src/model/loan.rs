use super::{resource::ResourceResponse, user::UserSummaryResponse};
use chrono::{DateTime, Utc};
use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::{LoanId, ResourceId, UserId},
    loan::{
        event::{CreateLoan, ProcessReturn},
        DamageReports, Loan, LoanFilter, LoanStatus, LoanSummary, LoanedResource,
        MissingResourceReport, Purpose, PurposeDetails, SuggestionReports,
    },
    resource::Resource,
    role::Role,
};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use std::str::FromStr;
use strum::VariantNames;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanResponse {
    pub id: LoanId,
    pub user: UserSummaryResponse,
    pub purpose: Purpose,
    pub purpose_details: PurposeDetails,
    pub loan_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: LoanStatus,
    pub resources: Vec<LoanedResource>,
    pub damage_reports: DamageReports,
    pub suggestion_reports: SuggestionReports,
    pub missing_resources: Vec<MissingResourceReport>,
}

impl From<Loan> for LoanResponse {
    fn from(value: Loan) -> Self {
        let Loan {
            id,
            user,
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
        Self {
            id,
            user: user.into(),
            purpose,
            purpose_details,
            loan_date,
            return_date,
            status,
            resources,
            damage_reports,
            suggestion_reports,
            missing_resources,
        }
    }
}

/// Result of a status change: the loan and, when they moved, its resources.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanTransitionResponse {
    pub updated_loan: LoanResponse,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_resources: Option<Vec<ResourceResponse>>,
}

impl From<(Loan, Vec<Resource>)> for LoanTransitionResponse {
    fn from((loan, resources): (Loan, Vec<Resource>)) -> Self {
        Self {
            updated_loan: loan.into(),
            updated_resources: Some(resources.into_iter().map(ResourceResponse::from).collect()),
        }
    }
}

impl From<Loan> for LoanTransitionResponse {
    fn from(loan: Loan) -> Self {
        Self {
            updated_loan: loan.into(),
            updated_resources: None,
        }
    }
}

#[derive(Debug, Deserialize, VariantNames)]
#[serde(tag = "action", rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum LoanAction {
    Add(CreateLoanRequest),
    Approve(LoanIdRequest),
    Reject(LoanIdRequest),
    ProcessReturn(ProcessReturnRequest),
}

#[derive(Debug, Deserialize)]
pub struct UserRef {
    pub id: UserId,
}

#[derive(Debug, Deserialize)]
pub struct ResourceRef {
    pub id: ResourceId,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateLoanRequest {
    #[garde(skip)]
    pub user: UserRef,
    #[garde(skip)]
    pub purpose: Purpose,
    #[garde(skip)]
    #[serde(default)]
    pub purpose_details: Option<PurposeDetails>,
    #[garde(length(min = 1))]
    pub resources: Vec<ResourceRef>,
}

/// A loan request paired with the role of whoever is creating it.
#[derive(new)]
pub struct CreateLoanRequestWithCreator(CreateLoanRequest, Role);

impl From<CreateLoanRequestWithCreator> for CreateLoan {
    fn from(value: CreateLoanRequestWithCreator) -> Self {
        let CreateLoanRequestWithCreator(
            CreateLoanRequest {
                user,
                purpose,
                purpose_details,
                resources,
            },
            creator_role,
        ) = value;
        // A resource listed twice is still lent once.
        let mut resource_ids = Vec::with_capacity(resources.len());
        for id in resources.into_iter().map(|r| r.id) {
            if !resource_ids.contains(&id) {
                resource_ids.push(id);
            }
        }
        CreateLoan::new(
            user.id,
            purpose,
            purpose_details.unwrap_or_default(),
            resource_ids,
            creator_role,
        )
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanIdRequest {
    pub loan_id: LoanId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessReturnRequest {
    pub loan_id: LoanId,
    #[serde(default)]
    pub damage_reports: DamageReports,
    #[serde(default)]
    pub suggestion_reports: SuggestionReports,
    #[serde(default)]
    pub missing_resources: Vec<MissingResourceReport>,
}

impl From<ProcessReturnRequest> for ProcessReturn {
    fn from(value: ProcessReturnRequest) -> Self {
        let ProcessReturnRequest {
            loan_id,
            damage_reports,
            suggestion_reports,
            missing_resources,
        } = value;
        ProcessReturn::new(loan_id, damage_reports, suggestion_reports, missing_resources)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLoanRequest {
    pub loan_id: LoanId,
    pub status: LoanStatus,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoanSummaryQuery {
    pub filter: Option<String>,
}

impl LoanSummaryQuery {
    pub fn filter(&self) -> AppResult<LoanFilter> {
        match self.filter.as_deref() {
            None | Some("") => Ok(LoanFilter::All),
            Some(filter) => LoanFilter::from_str(filter)
                .map_err(|_| AppError::BadRequest(format!("Filtro desconocido: {filter}"))),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoanSummaryResponse {
    pub total: usize,
    pub active: usize,
    pub overdue: usize,
    pub pending: usize,
    pub returned: usize,
    pub rejected: usize,
    pub institutional: usize,
    pub learning: usize,
}

impl From<LoanSummary> for LoanSummaryResponse {
    fn from(value: LoanSummary) -> Self {
        let LoanSummary {
            total,
            active,
            overdue,
            pending,
            returned,
            rejected,
            institutional,
            learning,
        } = value;
        Self {
            total,
            active,
            overdue,
            pending,
            returned,
            rejected,
            institutional,
            learning,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creator_role_comes_from_the_caller() {
        let action: LoanAction = serde_json::from_value(serde_json::json!({
            "action": "add",
            "user": { "id": UserId::new(), "name": "Ana" },
            "purpose": "aprendizaje",
            "resources": [{ "id": ResourceId::new(), "name": "Laptop 1" }],
            "creatorRole": "Admin"
        }))
        .unwrap();
        let LoanAction::Add(req) = action else {
            panic!("expected an add action");
        };
        assert!(req.validate(&()).is_ok());

        let event = CreateLoan::from(CreateLoanRequestWithCreator::new(req, Role::Docente));
        assert!(!event.is_direct_approval());
        assert!(event.purpose_details.is_empty());
        assert_eq!(event.resource_ids.len(), 1);
    }

    #[test]
    fn repeated_resources_are_lent_once() {
        let (laptop, projector) = (ResourceId::new(), ResourceId::new());
        let req: CreateLoanRequest = serde_json::from_value(serde_json::json!({
            "user": { "id": UserId::new() },
            "purpose": "aprendizaje",
            "resources": [{ "id": laptop }, { "id": projector }, { "id": laptop }]
        }))
        .unwrap();

        let event = CreateLoan::from(CreateLoanRequestWithCreator::new(req, Role::Admin));
        assert_eq!(event.resource_ids, vec![laptop, projector]);
    }

    #[test]
    fn a_loan_needs_resources() {
        let req: CreateLoanRequest = serde_json::from_value(serde_json::json!({
            "user": { "id": UserId::new() },
            "purpose": "institucional",
            "resources": []
        }))
        .unwrap();
        assert!(req.validate(&()).is_err());
    }

    #[test]
    fn summary_filter_parses_known_names() {
        let query = |f: Option<&str>| LoanSummaryQuery {
            filter: f.map(String::from),
        };
        assert_eq!(query(None).filter().unwrap(), LoanFilter::All);
        assert_eq!(query(Some("overdue")).filter().unwrap(), LoanFilter::Overdue);
        assert!(matches!(
            query(Some("late")).filter(),
            Err(AppError::BadRequest(_))
        ));
    }
}
