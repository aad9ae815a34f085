use crate::model::{
    id::{LoanId, UserId},
    loan::{
        event::{CreateLoan, ProcessReturn},
        Loan,
    },
    resource::Resource,
};
use async_trait::async_trait;
use shared::error::AppResult;

#[mockall::automock]
#[async_trait]
pub trait LoanRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Loan>>;
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Loan>>;
    async fn find_by_id(&self, loan_id: LoanId) -> AppResult<Option<Loan>>;
    async fn create(&self, event: CreateLoan) -> AppResult<Loan>;
    /// pending -> active. Returns the loan and the resources it took out.
    async fn approve(&self, loan_id: LoanId) -> AppResult<(Loan, Vec<Resource>)>;
    async fn reject(&self, loan_id: LoanId) -> AppResult<Loan>;
    /// active -> returned. Returns the loan and the resources it gave back.
    async fn process_return(&self, event: ProcessReturn) -> AppResult<(Loan, Vec<Resource>)>;
}
