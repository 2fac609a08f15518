use actix_web::HttpResponse;
use serde::Serialize;
use utoipa::ToSchema;

/// Body shared by every response: `{success, message?, data?}`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> Envelope<T> {
    pub fn data(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }
}

/// Documentation shape of [`Envelope`].
#[derive(Debug, Serialize, ToSchema)]
pub struct EnvelopeSchema {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IdResponse {
    pub id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub token: String,
}

pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    HttpResponse::Ok().json(Envelope::data(data))
}

pub fn ok_empty() -> HttpResponse {
    HttpResponse::Ok().json(Envelope::<()> {
        success: true,
        message: None,
        data: None,
    })
}

pub fn created(id: i32) -> HttpResponse {
    HttpResponse::Created().json(Envelope::data(IdResponse { id }))
}
