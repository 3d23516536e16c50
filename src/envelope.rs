use actix_web::body::BoxBody;
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, Responder};
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseState {
    #[serde(rename = "success")]
    Success,
    #[serde(rename = "notfound")]
    NotFound,
    #[serde(rename = "failed")]
    Failed,
}

impl ResponseState {
    pub fn status_code(self) -> StatusCode {
        match self {
            ResponseState::Success => StatusCode::OK,
            ResponseState::NotFound => StatusCode::NOT_FOUND,
            ResponseState::Failed => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ErrorDetail {
    pub message: String,
}

/// Uniform body of every comment endpoint.
///
/// The HTTP status is derived from the state, so the two never disagree.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    status: u16,
    state: ResponseState,
    message: String,
    body: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    err: Option<ErrorDetail>,
}

impl ResponseEnvelope {
    fn new(state: ResponseState, message: impl Into<String>) -> Self {
        Self {
            status: state.status_code().as_u16(),
            state,
            message: message.into(),
            body: None,
            err: None,
        }
    }

    pub fn success(message: impl Into<String>, body: Option<Value>) -> Self {
        Self {
            body,
            ..Self::new(ResponseState::Success, message)
        }
    }

    pub fn not_found(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ResponseState::NotFound, message).with_detail(detail)
    }

    pub fn failed(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::new(ResponseState::Failed, message).with_detail(detail)
    }

    fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.err = Some(ErrorDetail {
            message: detail.into(),
        });
        self
    }

    pub fn status_code(&self) -> StatusCode {
        self.state.status_code()
    }

    pub fn state(&self) -> ResponseState {
        self.state
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    pub fn error_detail(&self) -> Option<&ErrorDetail> {
        self.err.as_ref()
    }

    pub fn into_http_response(self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

impl Responder for ResponseEnvelope {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        self.into_http_response()
    }
}
