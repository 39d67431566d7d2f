//! Lead form submissions to a Formspree-compatible backend.
//!
//! Contact and wholesale forms are validated here, then posted as JSON to the
//! configured endpoint. The backend answers 2xx on success; otherwise its
//! body carries an `error` string and/or an `errors[].message` list.

use std::time::Duration;

use jacobo_core::{Email, EmailError, Phone};
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Message shown when the backend gives no reason.
pub const GENERIC_ERROR: &str = "Hubo un error al enviar el formulario";

/// Shown after a successful submission.
pub const SUCCESS_MESSAGE: &str = "¡Gracias por contactarnos! Te responderemos a la brevedad.";

const NOT_CONFIGURED_MESSAGE: &str =
    "El formulario no está disponible en este momento. Escribinos por WhatsApp.";

const MAX_MESSAGE_CHARS: usize = 5000;

/// Errors that can occur when submitting a form.
#[derive(Debug, Error)]
pub enum FormsError {
    /// The backend answered with a non-success status.
    #[error("form backend rejected submission: {status} - {message}")]
    Rejected { status: u16, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("no form endpoint configured")]
    NotConfigured,
}

impl FormsError {
    /// Text safe to show to the visitor.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Rejected { message, .. } => message,
            Self::Http(_) => GENERIC_ERROR,
            Self::NotConfigured => NOT_CONFIGURED_MESSAGE,
        }
    }

    /// Whether the backend itself failed, as opposed to no backend being
    /// configured at all.
    #[must_use]
    pub const fn is_backend_failure(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::Http(_))
    }
}

// =============================================================================
// Validation
// =============================================================================

/// A single invalid field and the reason, in Spanish.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Every field error found in a submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    fn push(&mut self, field: &'static str, message: &'static str) {
        self.0.push(FieldError { field, message });
    }

    /// The message for `field`, if it is invalid.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    fn into_result<T>(self, value: T) -> Result<T, Self> {
        if self.is_empty() { Ok(value) } else { Err(self) }
    }
}

fn check_required(errors: &mut FieldErrors, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(field, "Este campo es obligatorio");
    }
}

fn check_email(errors: &mut FieldErrors, value: &str) -> Option<Email> {
    match Email::parse(value) {
        Ok(email) => Some(email),
        Err(EmailError::Empty) => {
            errors.push("email", "Este campo es obligatorio");
            None
        }
        Err(_) => {
            errors.push("email", "Ingresá un correo electrónico válido");
            None
        }
    }
}

fn check_phone(errors: &mut FieldErrors, value: &str) -> Option<Phone> {
    if value.trim().is_empty() {
        errors.push("phone", "Este campo es obligatorio");
        return None;
    }
    Phone::parse(value)
        .map_err(|_| errors.push("phone", "Ingresá un teléfono válido"))
        .ok()
}

fn check_message(errors: &mut FieldErrors, value: &str) {
    check_required(errors, "message", value);
    if value.chars().count() > MAX_MESSAGE_CHARS {
        errors.push("message", "El mensaje es demasiado largo");
    }
}

/// Contact page form, as posted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactSubmission {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

impl ContactSubmission {
    /// Check every field and return a trimmed, normalised copy.
    ///
    /// # Errors
    ///
    /// Returns all invalid fields at once.
    pub fn validate(&self) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        check_required(&mut errors, "name", &self.name);
        let email = check_email(&mut errors, &self.email);
        let phone = check_phone(&mut errors, &self.phone);
        check_message(&mut errors, &self.message);

        errors.into_result(Self {
            name: self.name.trim().to_string(),
            email: email.map(Email::into_inner).unwrap_or_default(),
            phone: phone.map(|p| p.digits().to_string()).unwrap_or_default(),
            message: self.message.trim().to_string(),
        })
    }
}

/// Wholesale lead form, as posted by the browser.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WholesaleSubmission {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

impl WholesaleSubmission {
    /// Subject line that tells wholesale leads apart in the inbox.
    pub const SUBJECT: &'static str = "Consulta mayorista";

    /// Check every field and return a trimmed, normalised copy.
    ///
    /// # Errors
    ///
    /// Returns all invalid fields at once.
    pub fn validate(&self) -> Result<Self, FieldErrors> {
        let mut errors = FieldErrors::default();
        check_required(&mut errors, "company", &self.company);
        check_required(&mut errors, "name", &self.name);
        let email = check_email(&mut errors, &self.email);
        let phone = check_phone(&mut errors, &self.phone);
        check_message(&mut errors, &self.message);

        errors.into_result(Self {
            company: self.company.trim().to_string(),
            name: self.name.trim().to_string(),
            email: email.map(Email::into_inner).unwrap_or_default(),
            phone: phone.map(|p| p.digits().to_string()).unwrap_or_default(),
            message: self.message.trim().to_string(),
        })
    }

    /// JSON body including the `_subject` field.
    #[must_use]
    pub fn payload(&self) -> serde_json::Value {
        serde_json::json!({
            "_subject": Self::SUBJECT,
            "company": self.company,
            "name": self.name,
            "email": self.email,
            "phone": self.phone,
            "message": self.message,
        })
    }
}

// =============================================================================
// Client
// =============================================================================

#[derive(Debug, Deserialize)]
struct BackendError {
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    errors: Vec<BackendFieldError>,
}

#[derive(Debug, Deserialize)]
struct BackendFieldError {
    message: String,
}

/// Extract the visitor-facing reason from an error response body.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<BackendError>(body)
        .ok()
        .and_then(|parsed| {
            parsed
                .error
                .or_else(|| parsed.errors.into_iter().next().map(|e| e.message))
        })
        .map(|message| message.trim().to_string())
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| GENERIC_ERROR.to_string())
}

/// HTTP client for the form backend.
#[derive(Debug, Clone)]
pub struct FormsClient {
    client: reqwest::Client,
    endpoint: Option<Url>,
}

impl FormsClient {
    /// Create a new client. `None` makes every submission fail with
    /// [`FormsError::NotConfigured`].
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(endpoint: Option<Url>) -> Result<Self, FormsError> {
        let mut headers = HeaderMap::new();
        // Formspree answers with a redirect page unless JSON is requested.
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { client, endpoint })
    }

    #[must_use]
    pub const fn is_configured(&self) -> bool {
        self.endpoint.is_some()
    }

    /// Post a JSON payload to the backend.
    ///
    /// # Errors
    ///
    /// Returns [`FormsError::NotConfigured`] without an endpoint,
    /// [`FormsError::Http`] on network failure and [`FormsError::Rejected`]
    /// on a non-success status.
    pub async fn submit(&self, payload: &impl Serialize) -> Result<(), FormsError> {
        let endpoint = self.endpoint.as_ref().ok_or(FormsError::NotConfigured)?;

        let response = self
            .client
            .post(endpoint.clone())
            .json(payload)
            .send()
            .await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FormsError::Rejected {
                status: status.as_u16(),
                message: rejection_message(&body),
            });
        }

        Ok(())
    }

    /// Submit a validated contact form.
    ///
    /// # Errors
    ///
    /// See [`FormsClient::submit`].
    pub async fn submit_contact(&self, form: &ContactSubmission) -> Result<(), FormsError> {
        self.submit(form).await
    }

    /// Submit a validated wholesale lead.
    ///
    /// # Errors
    ///
    /// See [`FormsClient::submit`].
    pub async fn submit_wholesale(&self, form: &WholesaleSubmission) -> Result<(), FormsError> {
        self.submit(&form.payload()).await
    }
}
