use crate::{
    extractor::{ActionJson, AppJson, AppQuery, AuthorizedUser},
    model::{
        clean_name,
        grade::{
            DeleteGradeQuery, GradeAction, GradeDeletion, GradeOrSectionResponse, GradeResponse,
            GradeUpdate, SectionResponse, UpdateGradeRequest,
        },
        SuccessResponse,
    },
};
use axum::{extract::State, http::StatusCode, Json};
use kernel::model::grade::event::CreateSection;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn list_grades(
    _user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<GradeResponse>>> {
    registry
        .grade_repository()
        .find_all()
        .await
        .map(|grades| grades.into_iter().map(GradeResponse::from).collect())
        .map(Json)
}

pub async fn grade_action(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    ActionJson(action): ActionJson<GradeAction>,
) -> AppResult<(StatusCode, Json<GradeOrSectionResponse>)> {
    user.require_admin()?;

    let created = match action {
        GradeAction::AddGrade(req) => registry
            .grade_repository()
            .create_grade(clean_name(req.name)?)
            .await
            .map(|grade| GradeOrSectionResponse::Grade(grade.into()))?,
        GradeAction::AddSection(req) => {
            let CreateSection { grade_id, name } = req.into();
            registry
                .grade_repository()
                .create_section(CreateSection {
                    grade_id,
                    name: clean_name(name)?,
                })
                .await
                .map(|section| GradeOrSectionResponse::Section(section.into()))?
        }
    };
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_grade(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppJson(req): AppJson<UpdateGradeRequest>,
) -> AppResult<Json<GradeOrSectionResponse>> {
    user.require_admin()?;

    let updated = match GradeUpdate::try_from(req)? {
        GradeUpdate::Grade(mut event) => {
            event.name = clean_name(event.name)?;
            GradeOrSectionResponse::Grade(GradeResponse::from(
                registry.grade_repository().update_grade(event).await?,
            ))
        }
        GradeUpdate::Section(mut event) => {
            event.name = event.name.map(clean_name).transpose()?;
            GradeOrSectionResponse::Section(SectionResponse::from(
                registry.grade_repository().update_section(event).await?,
            ))
        }
    };
    Ok(Json(updated))
}

pub async fn delete_grade(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    AppQuery(query): AppQuery<DeleteGradeQuery>,
) -> AppResult<Json<SuccessResponse>> {
    user.require_admin()?;

    match GradeDeletion::try_from(query)? {
        GradeDeletion::Grade(grade_id) => registry.grade_repository().delete_grade(grade_id).await?,
        GradeDeletion::Section(section_id) => {
            registry.grade_repository().delete_section(section_id).await?
        }
    }
    Ok(Json(SuccessResponse::ok()))
}

#[cfg(test)]
mod tests {
    use crate::testing::{request, send, user_with_role, Mocks, TOKEN};
    use axum::http::{Method, StatusCode};
    use kernel::model::{id::GradeId, role::Role};

    #[tokio::test]
    async fn deleting_needs_type_and_id() {
        let admin = user_with_role(Role::Admin);

        let (status, _) = send(
            Mocks::signed_in(&admin).into_registry(),
            request(
                Method::DELETE,
                &format!("/api/grades?id={}", GradeId::new()),
                Some(TOKEN),
                None,
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
