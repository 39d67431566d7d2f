//! Wholesale page route handlers.

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
use crate::routes::contact::{
    FormStatus, INVALID_FORM_MESSAGE, forms_error_status, log_forms_error,
};
use crate::services::{FieldErrors, WholesaleSubmission};
use crate::state::AppState;

/// Benefits listed next to the lead form.
const BENEFITS: [&str; 5] = [
    "Precios especiales para compras al por mayor",
    "Envíos a todo el país",
    "Atención personalizada",
    "Servicio de personalización",
    "Asesoramiento técnico",
];

/// Wholesale page template.
#[derive(Template, WebTemplate)]
#[template(path = "wholesale.html")]
pub struct WholesaleTemplate {
    pub form: WholesaleSubmission,
    pub errors: FieldErrors,
    pub status: Option<FormStatus>,
    pub benefits: &'static [&'static str],
    pub cart_count: u32,
}

impl WholesaleTemplate {
    fn new(
        form: WholesaleSubmission,
        errors: FieldErrors,
        status: Option<FormStatus>,
        cart_count: u32,
    ) -> Self {
        Self {
            form,
            errors,
            status,
            benefits: &BENEFITS,
            cart_count,
        }
    }
}

/// Display the wholesale page.
#[instrument]
pub async fn show(CartCount(cart_count): CartCount) -> impl IntoResponse {
    WholesaleTemplate::new(
        WholesaleSubmission::default(),
        FieldErrors::default(),
        None,
        cart_count,
    )
}

/// Submit a wholesale lead to the form backend.
#[instrument(skip(state, form))]
pub async fn submit(
    State(state): State<AppState>,
    CartCount(cart_count): CartCount,
    Form(form): Form<WholesaleSubmission>,
) -> Response {
    let submission = match form.validate() {
        Ok(submission) => submission,
        Err(errors) => {
            tracing::debug!(fields = errors.len(), "Wholesale form rejected");
            return (
                StatusCode::UNPROCESSABLE_ENTITY,
                WholesaleTemplate::new(
                    form,
                    errors,
                    Some(FormStatus::failure(INVALID_FORM_MESSAGE)),
                    cart_count,
                ),
            )
                .into_response();
        }
    };

    match state.forms().submit_wholesale(&submission).await {
        Ok(()) => {
            tracing::info!(
                email = %submission.email,
                company = %submission.company,
                "Wholesale lead submitted"
            );
            WholesaleTemplate::new(
                WholesaleSubmission::default(),
                FieldErrors::default(),
                Some(FormStatus::success()),
                cart_count,
            )
            .into_response()
        }
        Err(e) => {
            log_forms_error("wholesale", &submission.email, &e);
            let status = FormStatus::failure(e.user_message());
            (
                forms_error_status(&e),
                WholesaleTemplate::new(form, FieldErrors::default(), Some(status), cart_count),
            )
                .into_response()
        }
    }
}

/// Redirect to a WhatsApp chat with the wholesale inquiry text.
#[instrument(skip(state))]
pub async fn whatsapp(State(state): State<AppState>) -> Redirect {
    Redirect::to(&state.whatsapp().wholesale_inquiry())
}
