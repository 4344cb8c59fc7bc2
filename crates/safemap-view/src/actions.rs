//! Auxiliary user actions: sharing, dialing, directions and the emergency
//! protocol.
//!
//! Device integrations (geolocation, native share sheet, clipboard prompt) are
//! reached through the [`Geolocator`] and [`Sharer`] traits so hosts can plug
//! in whatever their platform offers.

use std::time::Duration;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use safemap_core::Coordinates;
use thiserror::Error;

/// Upper bound on acquiring a position fix.
pub const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(10);

pub const SUPPORT_EMAIL: &str = "suporte@segurancafeminina.com.br";

pub const EMERGENCY_PROTOCOL: [&str; 5] = [
    "Mantenha a calma e avalie a situação",
    "Ligue para o número de emergência local (190)",
    "Compartilhe sua localização com contatos de confiança",
    "Se possível, vá para um local público e movimentado",
    "Use seu aplicativo de segurança, se disponível",
];

/// Characters left unescaped by JavaScript's `encodeURIComponent`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("geolocation permission denied")]
    PermissionDenied,
    #[error("geolocation unavailable: {0}")]
    Unavailable(String),
    #[error("timed out acquiring position")]
    Timeout,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShareError {
    /// The platform has no native share; callers fall back to a copy prompt.
    #[error("native share is not supported on this platform")]
    Unsupported,
    #[error("share failed: {0}")]
    Failed(String),
}

#[derive(Debug, Error)]
pub enum ActionError {
    #[error(transparent)]
    Geolocation(#[from] GeolocationError),
    #[error(transparent)]
    Share(#[from] ShareError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharePayload {
    pub title: String,
    pub text: String,
    pub url: Option<String>,
}

/// How a share request was finally delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    Shared,
    CopyPrompted,
}

// Implementations are driven from the page's own task; no `Send` bound.
#[allow(async_fn_in_trait)]
pub trait Geolocator {
    /// Acquires the device position.
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

#[allow(async_fn_in_trait)]
pub trait Sharer {
    /// Hands the payload to the platform share sheet.
    async fn share(&self, payload: &SharePayload) -> Result<(), ShareError>;

    /// Shows `text` in a prompt so the user can copy it manually.
    fn prompt_copy(&self, label: &str, text: &str);
}

/// `https://www.google.com/maps?q=<lat>,<lng>`
#[must_use]
pub fn location_url(position: Coordinates) -> String {
    format!(
        "https://www.google.com/maps?q={},{}",
        position.lat, position.lng
    )
}

/// Route from the user's position to `destination`.
#[must_use]
pub fn directions_url(destination: Coordinates) -> String {
    format!(
        "https://www.google.com/maps/dir/?api=1&destination={},{}",
        destination.lat, destination.lng
    )
}

/// Digits-only form of a phone number, or `None` when nothing is dialable.
#[must_use]
pub fn dial_number(number: &str) -> Option<String> {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    (!digits.is_empty()).then_some(digits)
}

/// `mailto:` link that opens a pre-filled error report.
#[must_use]
pub fn report_error_mailto() -> String {
    let subject = "Reportar erro no mapa";
    let body = "Descreva o erro encontrado:\n\nLocal afetado:\nProblema encontrado:\n";
    format!(
        "mailto:{SUPPORT_EMAIL}?subject={}&body={}",
        utf8_percent_encode(subject, URI_COMPONENT),
        utf8_percent_encode(body, URI_COMPONENT),
    )
}

async fn deliver<S: Sharer>(
    sharer: &S,
    payload: &SharePayload,
    prompt_label: &str,
    prompt_text: &str,
) -> Result<ShareOutcome, ShareError> {
    match sharer.share(payload).await {
        Ok(()) => Ok(ShareOutcome::Shared),
        Err(ShareError::Unsupported) => {
            tracing::debug!("native share unsupported, falling back to copy prompt");
            sharer.prompt_copy(prompt_label, prompt_text);
            Ok(ShareOutcome::CopyPrompted)
        }
        Err(e) => Err(e),
    }
}

/// Acquires the current position and shares a map link to it.
///
/// # Errors
///
/// - [`ActionError::Geolocation`] when no fix is obtained within
///   [`GEOLOCATION_TIMEOUT`] or the locator fails.
/// - [`ActionError::Share`] when the platform share fails for a reason other
///   than being unsupported.
pub async fn share_location<G: Geolocator, S: Sharer>(
    locator: &G,
    sharer: &S,
) -> Result<ShareOutcome, ActionError> {
    let position = tokio::time::timeout(GEOLOCATION_TIMEOUT, locator.current_position())
        .await
        .map_err(|_| GeolocationError::Timeout)?
        .inspect_err(|e| tracing::warn!(error = %e, "could not acquire position"))?;

    let url = location_url(position);
    let payload = SharePayload {
        title: "Minha Localização".to_string(),
        text: "Estou compartilhando minha localização por segurança".to_string(),
        url: Some(url.clone()),
    };
    Ok(deliver(
        sharer,
        &payload,
        "Copie para compartilhar sua localização:",
        &url,
    )
    .await?)
}

/// Shares a piece of safety information (a contact or a tip).
///
/// # Errors
///
/// Returns [`ShareError::Failed`] when the platform share fails.
pub async fn share_content<S: Sharer>(sharer: &S, text: &str) -> Result<ShareOutcome, ShareError> {
    let payload = SharePayload {
        title: "Informação de Segurança".to_string(),
        text: text.to_string(),
        url: None,
    };
    deliver(sharer, &payload, "Copie para compartilhar:", text).await
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;

    use super::*;

    struct FixedLocator(Result<Coordinates, GeolocationError>);

    impl Geolocator for FixedLocator {
        async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
            self.0.clone()
        }
    }

    struct NeverLocator;

    impl Geolocator for NeverLocator {
        async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
            std::future::pending().await
        }
    }

    #[derive(Default)]
    struct RecordingSharer {
        supported: bool,
        shared: RefCell<Vec<SharePayload>>,
        prompts: RefCell<Vec<String>>,
    }

    impl Sharer for RecordingSharer {
        async fn share(&self, payload: &SharePayload) -> Result<(), ShareError> {
            if !self.supported {
                return Err(ShareError::Unsupported);
            }
            self.shared.borrow_mut().push(payload.clone());
            Ok(())
        }

        fn prompt_copy(&self, _label: &str, text: &str) {
            self.prompts.borrow_mut().push(text.to_string());
        }
    }

    const SP: Coordinates = Coordinates {
        lat: -23.55,
        lng: -46.63,
    };

    #[tokio::test]
    async fn share_location_uses_native_share_when_available() {
        let sharer = RecordingSharer {
            supported: true,
            ..Default::default()
        };
        let outcome = share_location(&FixedLocator(Ok(SP)), &sharer)
            .await
            .expect("share");
        assert_eq!(outcome, ShareOutcome::Shared);
        let shared = sharer.shared.borrow();
        assert_eq!(
            shared[0].url.as_deref(),
            Some("https://www.google.com/maps?q=-23.55,-46.63")
        );
    }

    #[tokio::test]
    async fn share_location_falls_back_to_prompt() {
        let sharer = RecordingSharer::default();
        let outcome = share_location(&FixedLocator(Ok(SP)), &sharer)
            .await
            .expect("share");
        assert_eq!(outcome, ShareOutcome::CopyPrompted);
        assert_eq!(
            sharer.prompts.borrow().as_slice(),
            ["https://www.google.com/maps?q=-23.55,-46.63"]
        );
    }

    #[tokio::test]
    async fn share_location_reports_denied_permission() {
        let sharer = RecordingSharer::default();
        let err = share_location(
            &FixedLocator(Err(GeolocationError::PermissionDenied)),
            &sharer,
        )
        .await
        .unwrap_err();
        assert!(matches!(
            err,
            ActionError::Geolocation(GeolocationError::PermissionDenied)
        ));
        assert!(sharer.prompts.borrow().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn share_location_times_out() {
        let sharer = RecordingSharer::default();
        let err = share_location(&NeverLocator, &sharer).await.unwrap_err();
        assert!(matches!(
            err,
            ActionError::Geolocation(GeolocationError::Timeout)
        ));
    }

    #[tokio::test]
    async fn share_content_prompts_with_text() {
        let sharer = RecordingSharer::default();
        let outcome = share_content(&sharer, "Disque 180").await.expect("share");
        assert_eq!(outcome, ShareOutcome::CopyPrompted);
        assert_eq!(sharer.prompts.borrow().as_slice(), ["Disque 180"]);
    }

    #[test]
    fn dial_number_strips_formatting() {
        assert_eq!(dial_number("(11) 3333-4444").as_deref(), Some("1133334444"));
        assert_eq!(dial_number("180").as_deref(), Some("180"));
        assert_eq!(dial_number(" - "), None);
    }

    #[test]
    fn directions_url_targets_destination() {
        assert_eq!(
            directions_url(SP),
            "https://www.google.com/maps/dir/?api=1&destination=-23.55,-46.63"
        );
    }

    #[test]
    fn report_mailto_encodes_subject_and_body() {
        let link = report_error_mailto();
        assert!(link.starts_with("mailto:suporte@segurancafeminina.com.br?subject="));
        assert!(link.contains("subject=Reportar%20erro%20no%20mapa"));
        assert!(link.contains("body=Descreva%20o%20erro%20encontrado%3A%0A%0A"));
    }
}
