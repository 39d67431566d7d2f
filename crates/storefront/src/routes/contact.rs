//! Contact page route handlers.
//!
//! The form is a plain POST rendering the full page again, with the
//! visitor's input kept on validation errors and cleared after a successful
//! submission.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use tracing::instrument;

use crate::filters;
use crate::models::CartCount;
use crate::services::forms::SUCCESS_MESSAGE;
use crate::services::{ContactSubmission, FieldErrors, FormsError};
use crate::state::AppState;

/// Outcome banner shown above a lead form.
#[derive(Clone)]
pub struct FormStatus {
    pub success: bool,
    pub message: String,
}

impl FormStatus {
    pub(crate) fn success() -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub(crate) fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

/// Status code for a failed hand-off to the form backend.
pub(crate) const fn forms_error_status(error: &FormsError) -> StatusCode {
    match error {
        FormsError::Rejected { .. } | FormsError::Http(_) => StatusCode::BAD_GATEWAY,
        FormsError::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Log a failed hand-off to the form backend.
///
/// A missing endpoint is only logged at debug level; startup already warned
/// about it.
pub(crate) fn log_forms_error(form: &'static str, email: &str, error: &FormsError) {
    if error.is_backend_failure() {
        tracing::error!(form, email, error = %error, "Failed to submit lead form");
    } else {
        tracing::debug!(form, email, error = %error, "Lead form backend not configured");
    }
}

/// Message for a form that did not pass validation.
pub(crate) const INVALID_FORM_MESSAGE: &str = "Revisá los campos marcados.";

/// Contact page template.
#[derive(Template, WebTemplate)]
#[template(path = "contact.html")]
pub struct ContactTemplate {
    pub form: ContactSubmission,
    pub errors: FieldErrors,
    pub status: Option<FormStatus>,
    pub cart_count: u32,
}

/// Display the contact page.
#[instrument]
pub async fn show(CartCount(cart_count): CartCount) -> impl IntoResponse {
    ContactTemplate {
        form: ContactSubmission::default(),
        errors: FieldErrors::default(),
        status: None,
        cart_count,
    }
}

/// Submit the contact form to the form backend.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    CartCount(cart_count): CartCount,
    Form(form): Form<ContactSubmission>,
) -> Response {
    let submission = match form.validate() {
        Ok(submission) => submission,
        Err(errors) => {
            tracing::debug!(fields = errors.len(), "Contact form rejected");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                ContactTemplate {
                    form,
                    errors,
                    status: Some(FormStatus::failure(INVALID_FORM_MESSAGE)),
                    cart_count,
                },
            )
                .into_response();
        }
    };

    match state.forms().submit_contact(&submission).await {
        Ok(()) => {
            tracing::info!(email = %submission.email, "Contact form submitted");
            ContactTemplate {
                form: ContactSubmission::default(),
                errors: FieldErrors::default(),
                status: Some(FormStatus::success()),
                cart_count,
            }
            .into_response()
        }
        Err(e) => {
            log_forms_error("contact", &submission.email, &e);
            (
                forms_error_status(&e),
                ContactTemplate {
                    form,
                    errors: FieldErrors::default(),
                    status: Some(FormStatus::failure(e.user_message())),
                    cart_count,
                },
            )
                .into_response()
        }
    }
}

/// Redirect to a WhatsApp chat with the general inquiry text.
#[instrument(skip(state))]
pub async fn whatsapp(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.whatsapp().general_inquiry())
}
