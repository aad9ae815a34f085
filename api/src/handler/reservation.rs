use crate::{
    extractor::{ActionJson, AppQuery, AuthorizedUser},
    model::{
        reservation::{DeleteReservationQuery, ReservationAction, ReservationResponse},
        SuccessResponse,
    },
};
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use kernel::model::{
    id::ReservationId,
    reservation::{
        event::{DeleteReservation, UpdateReservationStatus},
        recent_window_start, Reservation, LIST_LIMIT,
    },
    role::Role,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

pub async fn list_reservations(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<ReservationResponse>>> {
    registry
        .reservation_repository()
        .find_since(recent_window_start(Utc::now()), LIST_LIMIT)
        .await
        .map(|items| items.into_iter().map(ReservationResponse::from).collect())
        .map(Json)
}

pub async fn reservation_action(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    ActionJson(action): ActionJson<ReservationAction>,
) -> AppResult<Response> {
    match action {
        ReservationAction::Add(req) => {
            let booker_id = req.booker_id()?;
            if user.role() == Role::Docente && booker_id != user.id() {
                return Err(AppError::ForbiddenOperation);
            }

            let created = registry
                .reservation_repository()
                .create(req.into_event()?)
                .await?;
            Ok((StatusCode::CREATED, Json(ReservationResponse::from(created))).into_response())
        }
        ReservationAction::UpdateStatus(req) => {
            let reservation = find_owned(&user, &registry, req.reservation_id).await?;
            registry
                .reservation_repository()
                .update_status(UpdateReservationStatus {
                    reservation_id: reservation.id,
                    status: req.status,
                })
                .await
                .map(|updated| Json(ReservationResponse::from(updated)).into_response())
        }
    }
}

pub async fn delete_reservation(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppQuery(query): AppQuery<DeleteReservationQuery>,
) -> AppResult<Json<SuccessResponse>> {
    let reservation = find_owned(&user, &registry, query.reservation_id).await?;
    registry
        .reservation_repository()
        .delete(DeleteReservation {
            reservation_id: reservation.id,
        })
        .await?;
    Ok(Json(SuccessResponse::ok()))
}

/// The reservation, provided the caller booked it or is an admin.
async fn find_owned(
    user: &AuthorizedUser,
    registry: &AppRegistry,
    reservation_id: ReservationId,
) -> AppResult<Reservation> {
    let reservation = registry
        .reservation_repository()
        .find_by_id(reservation_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("Reserva ({reservation_id}) no encontrada"))
        })?;
    user.require_self_or_admin(reservation.user_id)?;
    Ok(reservation)
}
