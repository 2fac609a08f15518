use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::errors::AppError;
use crate::handlers::response::{created, ok, ok_empty, EnvelopeSchema, TokenResponse};
use crate::handlers::validation;
use crate::AppState;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignUpRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConfirmEmailRequest {
    /// Token from the confirmation link.
    pub token: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SignInRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordRecoveryRequest {
    pub email: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct PasswordUpdateRequest {
    /// Token from the recovery link.
    pub token: String,
    pub password: String,
}

/// POST /auth/sign-up
///
/// Mails a confirmation link; the account exists only after
/// `/auth/confirm-email`.
#[utoipa::path(
    post,
    path = "/auth/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 200, description = "Confirmation mail sent", body = EnvelopeSchema),
        (status = 400, description = "Invalid input or email taken", body = EnvelopeSchema),
    ),
    tag = "auth"
)]
pub async fn sign_up(
    state: web::Data<AppState>,
    body: web::Json<SignUpRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    validation::name(&body.name)?;
    validation::email(&body.email)?;

    web::block(move || state.auth.sign_up(body.name.trim(), &body.email)).await??;
    Ok(ok_empty())
}

#[utoipa::path(
    post,
    path = "/auth/confirm-email",
    request_body = ConfirmEmailRequest,
    responses(
        (status = 201, description = "User created", body = EnvelopeSchema),
        (status = 400, description = "Invalid input or email taken", body = EnvelopeSchema),
        (status = 401, description = "Invalid or expired token", body = EnvelopeSchema),
    ),
    tag = "auth"
)]
pub async fn confirm_email(
    state: web::Data<AppState>,
    body: web::Json<ConfirmEmailRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    validation::token(&body.token)?;
    validation::password(&body.password)?;

    let id = web::block(move || state.auth.confirm_email(&body.token, &body.password)).await??;
    Ok(created(id))
}

#[utoipa::path(
    post,
    path = "/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Access token issued", body = EnvelopeSchema),
        (status = 401, description = "Wrong credentials", body = EnvelopeSchema),
    ),
    tag = "auth"
)]
pub async fn sign_in(
    state: web::Data<AppState>,
    body: web::Json<SignInRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    validation::email(&body.email)?;
    validation::password(&body.password)?;

    let token = web::block(move || state.auth.sign_in(&body.email, &body.password)).await??;
    Ok(ok(TokenResponse { token }))
}

#[utoipa::path(
    post,
    path = "/auth/password-recovery",
    request_body = PasswordRecoveryRequest,
    responses(
        (status = 200, description = "Recovery mail sent", body = EnvelopeSchema),
        (status = 404, description = "No user with this email", body = EnvelopeSchema),
    ),
    tag = "auth"
)]
pub async fn password_recovery(
    state: web::Data<AppState>,
    body: web::Json<PasswordRecoveryRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    validation::email(&body.email)?;

    web::block(move || state.auth.recover_password(&body.email)).await??;
    Ok(ok_empty())
}

#[utoipa::path(
    put,
    path = "/auth/password-update",
    request_body = PasswordUpdateRequest,
    responses(
        (status = 200, description = "Password changed", body = EnvelopeSchema),
        (status = 401, description = "Invalid or expired token", body = EnvelopeSchema),
    ),
    tag = "auth"
)]
pub async fn password_update(
    state: web::Data<AppState>,
    body: web::Json<PasswordUpdateRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    validation::token(&body.token)?;
    validation::password(&body.password)?;

    web::block(move || state.auth.update_password(&body.token, &body.password)).await??;
    Ok(ok_empty())
}
