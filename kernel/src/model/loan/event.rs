use crate::model::{
    id::{LoanId, ResourceId, UserId},
    loan::{DamageReports, MissingResourceReport, Purpose, PurposeDetails, SuggestionReports},
    role::Role,
};
use derive_new::new;

#[derive(Debug, Clone, new)]
pub struct CreateLoan {
    pub user_id: UserId,
    pub purpose: Purpose,
    pub purpose_details: PurposeDetails,
    pub resource_ids: Vec<ResourceId>,
    pub creator_role: Role,
}

impl CreateLoan {
    /// Loans created by an administrator skip the approval step.
    pub fn is_direct_approval(&self) -> bool {
        self.creator_role.is_admin()
    }
}

#[derive(Debug, Clone, new)]
pub struct ProcessReturn {
    pub loan_id: LoanId,
    pub damage_reports: DamageReports,
    pub suggestion_reports: SuggestionReports,
    pub missing_resources: Vec<MissingResourceReport>,
}

impl ProcessReturn {
    pub fn without_reports(loan_id: LoanId) -> Self {
        Self::new(
            loan_id,
            DamageReports::new(),
            SuggestionReports::new(),
            Vec::new(),
        )
    }
}
