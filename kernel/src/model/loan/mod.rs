use crate::model::{
    id::{LoanId, ResourceId},
    resource::ResourceStatus,
    user::UserSummary,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::error::{AppError, AppResult};
use std::collections::BTreeMap;
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub mod event;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    Pending,
    Active,
    Rejected,
    Returned,
}

impl LoanStatus {
    /// pending -> active | rejected, then active -> returned.
    pub fn can_transition_to(self, next: LoanStatus) -> bool {
        matches!(
            (self, next),
            (LoanStatus::Pending, LoanStatus::Active)
                | (LoanStatus::Pending, LoanStatus::Rejected)
                | (LoanStatus::Active, LoanStatus::Returned)
        )
    }

    pub fn ensure_transition(self, next: LoanStatus) -> AppResult<()> {
        if self.can_transition_to(next) {
            Ok(())
        } else {
            Err(AppError::UnprocessableEntity(format!(
                "Un préstamo en estado '{self}' no puede pasar a '{next}'"
            )))
        }
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr, Display, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Aprendizaje,
    Institucional,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurposeDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activity_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_slot: Option<String>,
}

impl PurposeDetails {
    pub fn is_empty(&self) -> bool {
        self == &PurposeDetails::default()
    }
}

/// Snapshot of a resource taken when the loan was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanedResource {
    pub id: ResourceId,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DamageReport {
    #[serde(default)]
    pub common_problems: Vec<String>,
    #[serde(default)]
    pub other_notes: String,
}

impl DamageReport {
    pub fn has_damage(&self) -> bool {
        !self.common_problems.is_empty() || !self.other_notes.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionReport {
    #[serde(default)]
    pub common_suggestions: Vec<String>,
    #[serde(default)]
    pub other_notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MissingResourceReport {
    pub resource_id: ResourceId,
    pub resource_name: String,
    #[serde(default)]
    pub resource_brand: Option<String>,
    pub report_date: DateTime<Utc>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Damage reports keyed by resource id.
pub type DamageReports = BTreeMap<String, DamageReport>;
/// Suggestion reports keyed by resource id.
pub type SuggestionReports = BTreeMap<String, SuggestionReport>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    pub id: LoanId,
    pub user: UserSummary,
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

impl Loan {
    pub fn resource_ids(&self) -> Vec<ResourceId> {
        self.resources.iter().map(|r| r.id).collect()
    }

    /// Active loan that left on an earlier day than `now` and is still out.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status == LoanStatus::Active && self.loan_date.date_naive() < now.date_naive()
    }
}

/// The state a loaned resource is left in once the loan comes back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnedResourceState {
    pub resource_id: ResourceId,
    pub status: ResourceStatus,
    pub damage_notes: Option<String>,
}

/// One pass over the loan's resources: a resource with a damage report that
/// lists a problem or carries notes comes back damaged, the rest available.
pub fn returned_resource_states(
    resources: &[LoanedResource],
    damage_reports: &DamageReports,
) -> Vec<ReturnedResourceState> {
    resources
        .iter()
        .map(|resource| {
            match damage_reports
                .get(&resource.id.to_string())
                .filter(|report| report.has_damage())
            {
                Some(report) => ReturnedResourceState {
                    resource_id: resource.id,
                    status: ResourceStatus::Damaged,
                    damage_notes: Some(report.other_notes.clone()),
                },
                None => ReturnedResourceState {
                    resource_id: resource.id,
                    status: ResourceStatus::Available,
                    damage_notes: None,
                },
            }
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum LoanFilter {
    #[default]
    All,
    Active,
    Overdue,
    Pending,
    Returned,
}

impl LoanFilter {
    pub fn matches(self, loan: &Loan, now: DateTime<Utc>) -> bool {
        match self {
            LoanFilter::All => true,
            LoanFilter::Active => loan.status == LoanStatus::Active,
            LoanFilter::Overdue => loan.is_overdue(now),
            LoanFilter::Pending => loan.status == LoanStatus::Pending,
            LoanFilter::Returned => loan.status == LoanStatus::Returned,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoanSummary {
    pub total: usize,
    pub active: usize,
    pub overdue: usize,
    pub pending: usize,
    pub returned: usize,
    pub rejected: usize,
    pub institutional: usize,
    pub learning: usize,
}

impl LoanSummary {
    pub fn from_loans(loans: &[Loan], filter: LoanFilter, now: DateTime<Utc>) -> Self {
        loans
            .iter()
            .filter(|loan| filter.matches(loan, now))
            .fold(Self::default(), |mut summary, loan| {
                summary.total += 1;
                match loan.status {
                    LoanStatus::Active => summary.active += 1,
                    LoanStatus::Pending => summary.pending += 1,
                    LoanStatus::Returned => summary.returned += 1,
                    LoanStatus::Rejected => summary.rejected += 1,
                }
                if loan.is_overdue(now) {
                    summary.overdue += 1;
                }
                match loan.purpose {
                    Purpose::Institucional => summary.institutional += 1,
                    Purpose::Aprendizaje => summary.learning += 1,
                }
                summary
            })
    }
}
