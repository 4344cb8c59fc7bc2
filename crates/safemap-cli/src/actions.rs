//! Commands that need no dataset: sharing, dialing, directions, protocol.

use std::path::Path;

use anyhow::Context;
use safemap_core::Coordinates;
use safemap_view::actions::{
    self, GeolocationError, Geolocator, ShareError, ShareOutcome, SharePayload, Sharer,
    EMERGENCY_PROTOCOL,
};
use safemap_view::markup;

use crate::document::{self, Section};

/// A terminal has no position sensor; the fix is whatever the user passed.
pub(crate) struct FixedPosition(pub Coordinates);

impl Geolocator for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

/// Terminal share target: no native share sheet, so every share falls back
/// to printing the text for the user to copy.
pub(crate) struct ConsoleSharer;

impl Sharer for ConsoleSharer {
    async fn share(&self, _payload: &SharePayload) -> Result<(), ShareError> {
        Err(ShareError::Unsupported)
    }

    fn prompt_copy(&self, label: &str, text: &str) {
        println!("{label}");
        println!("{text}");
    }
}

pub(crate) fn coordinates(lat: f64, lng: f64) -> anyhow::Result<Coordinates> {
    Coordinates::new(lat, lng)
        .with_context(|| format!("invalid coordinates: lat={lat}, lng={lng}"))
}

pub(crate) async fn run_share_location(lat: f64, lng: f64) -> anyhow::Result<()> {
    let position = coordinates(lat, lng)?;
    let outcome = actions::share_location(&FixedPosition(position), &ConsoleSharer).await?;
    tracing::debug!(?outcome, "location shared");
    if outcome == ShareOutcome::Shared {
        println!("Localização compartilhada");
    }
    Ok(())
}

pub(crate) fn run_directions(lat: f64, lng: f64) -> anyhow::Result<()> {
    println!("{}", actions::directions_url(coordinates(lat, lng)?));
    Ok(())
}

/// Prints `tel:<digits>`; input with no digits is ignored.
pub(crate) fn run_dial(number: &str) {
    match actions::dial_number(number) {
        Some(digits) => println!("tel:{digits}"),
        None => tracing::warn!(number, "nothing to dial"),
    }
}

pub(crate) fn run_report_error() {
    println!("{}", actions::report_error_mailto());
}

pub(crate) fn run_protocol(output: Option<&Path>) -> anyhow::Result<()> {
    for (step, text) in EMERGENCY_PROTOCOL.iter().enumerate() {
        println!("{}. {text}", step + 1);
    }
    if let Some(path) = output {
        let sections = [Section {
            id: "protocolo-emergencia",
            html: markup::protocol_modal(&EMERGENCY_PROTOCOL),
        }];
        document::write(
            path,
            &document::render("Protocolo de Emergência", &sections, None),
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        assert!(coordinates(91.0, 0.0).is_err());
        assert!(coordinates(-23.5, -46.6).is_ok());
    }

    #[tokio::test]
    async fn console_share_falls_back_to_prompt() {
        let outcome = actions::share_location(
            &FixedPosition(coordinates(-23.5, -46.6).expect("coords")),
            &ConsoleSharer,
        )
        .await
        .expect("share");
        assert_eq!(outcome, ShareOutcome::CopyPrompted);
    }

    #[test]
    fn protocol_document_lists_every_step() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("protocolo.html");
        run_protocol(Some(&path)).expect("protocol");
        let html = std::fs::read_to_string(path).expect("read");
        assert_eq!(html.matches("<li>").count(), EMERGENCY_PROTOCOL.len());
    }
}
