use actix_multipart::form::bytes::Bytes;
use actix_multipart::form::text::Text;
use actix_multipart::form::MultipartForm;
use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::media::ImageUpload;
use crate::domain::user::{ProfilePatch, User};
use crate::errors::AppError;
use crate::handlers::extractors::AuthUser;
use crate::handlers::response::{ok, ok_empty, EnvelopeSchema};
use crate::handlers::validation;
use crate::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct ProfileResponse {
    pub name: String,
    pub email: String,
    pub profile_image: String,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            email: user.email,
            profile_image: user.profile_image,
        }
    }
}

#[derive(Debug, MultipartForm)]
pub struct ProfileForm {
    pub name: Option<Text<String>>,
    #[multipart(limit = "10MB")]
    pub image_file: Option<Bytes>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DeleteProfileRequest {
    pub password: String,
}

/// Turn an optional multipart file part into a storable image.
pub(crate) fn image_upload(part: Bytes) -> Result<ImageUpload, AppError> {
    if part.data.is_empty() {
        return Err(AppError::bad_request("image_file: cannot be empty"));
    }
    Ok(ImageUpload::new(part.file_name.as_deref(), part.data.to_vec())?)
}

#[utoipa::path(
    get,
    path = "/profile",
    responses(
        (status = 200, description = "Profile of the signed-in user", body = EnvelopeSchema),
        (status = 401, description = "Missing or invalid token", body = EnvelopeSchema),
    ),
    security(("bearer" = [])),
    tag = "profile"
)]
pub async fn get_profile(
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, AppError> {
    let profile = web::block(move || state.profile.get_profile(user.0)).await??;
    Ok(ok(ProfileResponse::from(profile)))
}

/// PUT /profile
///
/// Multipart form with optional `name` and `image_file` parts.
#[utoipa::path(
    put,
    path = "/profile",
    responses(
        (status = 200, description = "Profile updated", body = EnvelopeSchema),
        (status = 400, description = "Nothing to update or invalid input", body = EnvelopeSchema),
    ),
    security(("bearer" = [])),
    tag = "profile"
)]
pub async fn update_profile(
    state: web::Data<AppState>,
    user: AuthUser,
    MultipartForm(form): MultipartForm<ProfileForm>,
) -> Result<HttpResponse, AppError> {
    let name = form.name.map(Text::into_inner);
    if let Some(name) = &name {
        validation::name(name)?;
    }
    let image = form.image_file.map(image_upload).transpose()?;

    web::block(move || {
        state
            .profile
            .update_profile(user.0, ProfilePatch { name }, image)
    })
    .await??;
    Ok(ok_empty())
}

#[utoipa::path(
    delete,
    path = "/profile",
    request_body = DeleteProfileRequest,
    responses(
        (status = 200, description = "Account and its orders deleted", body = EnvelopeSchema),
        (status = 403, description = "Wrong password", body = EnvelopeSchema),
    ),
    security(("bearer" = [])),
    tag = "profile"
)]
pub async fn delete_profile(
    state: web::Data<AppState>,
    user: AuthUser,
    body: web::Json<DeleteProfileRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    validation::password(&body.password)?;

    web::block(move || state.profile.delete_profile(user.0, &body.password)).await??;
    Ok(ok_empty())
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::json;

    use crate::domain::errors::DomainError;
    use crate::handlers::routes;
    use crate::handlers::test_support::{bearer, Mocks};

    #[actix_web::test]
    async fn missing_profile_is_not_found() {
        let mut mocks = Mocks::default();
        mocks.users.expect_get().returning(|_| Err(DomainError::NoRows));
        let app = test::init_service(App::new().app_data(mocks.into_state()).configure(routes)).await;

        let req = test::TestRequest::get()
            .uri("/profile")
            .insert_header(("Authorization", bearer(4)))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn delete_requires_password() {
        let mut mocks = Mocks::default();
        mocks.users.expect_credentials_by_id().never();
        let app = test::init_service(App::new().app_data(mocks.into_state()).configure(routes)).await;

        let req = test::TestRequest::delete()
            .uri("/profile")
            .insert_header(("Authorization", bearer(4)))
            .set_json(json!({"password": ""}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }
}
