use crate::{
    extractor::{ActionJson, AppJson, AppQuery, AuthorizedUser},
    model::loan::{
        CreateLoanRequestWithCreator, LoanAction, LoanResponse, LoanSummaryQuery,
        LoanSummaryResponse, LoanTransitionResponse, UpdateLoanRequest,
    },
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use garde::Validate;
use kernel::model::{
    id::LoanId,
    loan::{event::ProcessReturn, Loan, LoanStatus, LoanSummary},
    role::Role,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

/// Admins see every loan, everyone else only their own.
async fn visible_loans(user: &AuthorizedUser, registry: &AppRegistry) -> AppResult<Vec<Loan>> {
    if user.is_admin() {
        registry.loan_repository().find_all().await
    } else {
        registry.loan_repository().find_by_user_id(user.id()).await
    }
}

pub async fn list_loans(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<LoanResponse>>> {
    visible_loans(&user, &registry)
        .await
        .map(|loans| loans.into_iter().map(LoanResponse::from).collect())
        .map(Json)
}

pub async fn loan_summary(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppQuery(query): AppQuery<LoanSummaryQuery>,
) -> AppResult<Json<LoanSummaryResponse>> {
    let filter = query.filter()?;
    let loans = visible_loans(&user, &registry).await?;
    Ok(Json(
        LoanSummary::from_loans(&loans, filter, Utc::now()).into(),
    ))
}

pub async fn loan_action(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    ActionJson(action): ActionJson<LoanAction>,
) -> AppResult<Response> {
    match action {
        LoanAction::Add(req) => {
            req.validate(&())?;
            if user.role() == Role::Docente && req.user.id != user.id() {
                return Err(AppError::ForbiddenOperation);
            }

            let loan = registry
                .loan_repository()
                .create(CreateLoanRequestWithCreator::new(req, user.role()).into())
                .await?;
            tracing::info!(loan_id = %loan.id, status = %loan.status, "loan created");
            Ok((StatusCode::CREATED, Json(LoanResponse::from(loan))).into_response())
        }
        LoanAction::Approve(req) => {
            user.require_admin()?;
            transition(&registry, req.loan_id, LoanStatus::Active)
                .await
                .map(|res| Json(res).into_response())
        }
        LoanAction::Reject(req) => {
            user.require_admin()?;
            transition(&registry, req.loan_id, LoanStatus::Rejected)
                .await
                .map(|res| Json(res).into_response())
        }
        LoanAction::ProcessReturn(req) => {
            user.require_admin()?;
            registry
                .loan_repository()
                .process_return(req.into())
                .await
                .map(|res| Json(LoanTransitionResponse::from(res)).into_response())
        }
    }
}

pub async fn update_loan(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<UpdateLoanRequest>,
) -> AppResult<Json<LoanTransitionResponse>> {
    user.require_admin()?;
    transition(&registry, req.loan_id, req.status).await.map(Json)
}

/// Moves a loan to `next` through the matching repository operation.
async fn transition(
    registry: &AppRegistry,
    loan_id: LoanId,
    next: LoanStatus,
) -> AppResult<LoanTransitionResponse> {
    let repo = registry.loan_repository();
    match next {
        LoanStatus::Active => repo.approve(loan_id).await.map(Into::into),
        LoanStatus::Rejected => repo.reject(loan_id).await.map(Into::into),
        LoanStatus::Returned => repo
            .process_return(ProcessReturn::without_reports(loan_id))
            .await
            .map(Into::into),
        LoanStatus::Pending => {
            let loan = repo.find_by_id(loan_id).await?.ok_or_else(|| {
                AppError::EntityNotFound(format!("Préstamo ({loan_id}) no encontrado"))
            })?;
            loan.status.ensure_transition(next)?;
            Ok(loan.into())
        }
    }
}
