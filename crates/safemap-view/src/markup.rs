//! Markup fragments for every view state.
//!
//! All payload-derived text is passed through [`escape_html`]; constant
//! strings defined here are trusted.

use safemap_core::{ContactRecord, LocationRecord, TipRecord};

use crate::actions::directions_url;
use crate::escape::escape_html;

/// Placeholder for absent optional fields.
pub const PLACEHOLDER: &str = "N/A";

/// Class of the block shown while a request is in flight.
pub const LOADING_CLASS: &str = "loading-spinner";
/// Class of the block shown when a request failed.
pub const ERROR_CLASS: &str = "error-message";
/// Class of the block shown when a location query matched nothing.
pub const EMPTY_CLASS: &str = "empty-state";
/// Class of the block shown when a contact or tip list is empty.
pub const NO_DATA_CLASS: &str = "sem-dados";

#[must_use]
pub fn loading() -> String {
    format!(
        r#"<div class="{LOADING_CLASS}"><i class="fas fa-spinner fa-spin"></i> Carregando...</div>"#
    )
}

/// Error block with a retry control bound to `operation`.
#[must_use]
pub fn error_block(message: &str, operation: &str) -> String {
    format!(
        r#"<div class="{ERROR_CLASS}"><i class="fas fa-exclamation-triangle"></i> {message} <button class="btn-retry" data-action="retry" data-operation="{operation}">Tentar novamente</button></div>"#,
        message = escape_html(message),
        operation = escape_html(operation),
    )
}

#[must_use]
pub fn empty_locations() -> String {
    format!(
        r#"<div class="{EMPTY_CLASS}"><i class="fas fa-info-circle"></i><p>Nenhum local encontrado</p></div>"#
    )
}

#[must_use]
pub fn empty_list(message: &str) -> String {
    format!(
        r#"<div class="{NO_DATA_CLASS}"><i class="fas fa-info-circle"></i><p>{}</p></div>"#,
        escape_html(message)
    )
}

fn or_placeholder(value: Option<&str>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), escape_html)
}

/// One entry of the location list.
#[must_use]
pub fn location_card(record: &LocationRecord) -> String {
    let lat = record.coordinates.lat;
    let lng = record.coordinates.lng;
    let city = record
        .city
        .as_deref()
        .map(|c| format!(r#"<span class="city">{}</span>"#, escape_html(c)))
        .unwrap_or_default();

    format!(
        concat!(
            r#"<div class="card {category}">"#,
            "<h3>{name}</h3>",
            r#"<p><i class="fas fa-map-marker-alt"></i> {address}</p>{city}"#,
            r#"<div class="location-meta">"#,
            r#"<span><i class="fas fa-phone"></i> {phone}</span>"#,
            r#"<span><i class="fas fa-clock"></i> {hours}</span>"#,
            "</div>",
            r#"<button class="btn-direction" data-lat="{lat}" data-lng="{lng}" data-url="{url}">"#,
            r#"<i class="fas fa-directions"></i> Como chegar</button>"#,
            "</div>",
        ),
        category = escape_html(record.category.as_str()),
        name = escape_html(&record.name),
        address = escape_html(&record.address),
        city = city,
        phone = or_placeholder(record.phone.as_deref()),
        hours = or_placeholder(record.hours.as_deref()),
        lat = lat,
        lng = lng,
        url = escape_html(&directions_url(record.coordinates)),
    )
}

/// Popup shown when a marker is selected.
#[must_use]
pub fn location_popup(record: &LocationRecord) -> String {
    format!(
        concat!(
            r#"<div class="map-popup">"#,
            "<h4>{name}</h4>",
            r#"<p><i class="fas fa-map-marker-alt"></i> {address}</p>"#,
            r#"<p><i class="fas fa-phone"></i> {phone}</p>"#,
            r#"<p><i class="fas fa-clock"></i> {hours}</p>"#,
            r#"<button class="btn-popup-direction" data-lat="{lat}" data-lng="{lng}">"#,
            r#"<i class="fas fa-directions"></i> Rotas</button>"#,
            "</div>",
        ),
        name = escape_html(&record.name),
        address = escape_html(&record.address),
        phone = or_placeholder(record.phone.as_deref()),
        hours = or_placeholder(record.hours.as_deref()),
        lat = record.coordinates.lat,
        lng = record.coordinates.lng,
    )
}

#[must_use]
pub fn contact_item(contact: &ContactRecord) -> String {
    format!(
        concat!(
            r#"<div class="contato-item">"#,
            r#"<div class="contato-header"><i class="fas fa-phone-alt"></i><h3>{name}</h3></div>"#,
            r#"<div class="contato-body">"#,
            "<p><strong>Telefone:</strong> {phone}</p>",
            "<p>{description}</p>",
            r#"<div class="contato-actions">"#,
            r#"<button class="btn-ligar" data-numero="{phone}"><i class="fas fa-phone"></i> Ligar</button>"#,
            r#"<button class="btn-compartilhar" data-texto="{share}"><i class="fas fa-share-alt"></i> Compartilhar</button>"#,
            "</div></div></div>",
        ),
        name = escape_html(&contact.name),
        phone = escape_html(&contact.phone),
        description = escape_html(&contact.description),
        share = escape_html(&contact.share_text()),
    )
}

#[must_use]
pub fn tip_item(tip: &TipRecord) -> String {
    let text = escape_html(tip.text());
    format!(
        concat!(
            r#"<li class="dica-item"><i class="fas fa-check-circle"></i>"#,
            "<span>{text}</span>",
            r#"<button class="btn-compartilhar" data-texto="{text}"><i class="fas fa-share-alt"></i></button>"#,
            "</li>",
        ),
        text = text,
    )
}

/// Modal body listing the emergency protocol steps.
#[must_use]
pub fn protocol_modal(steps: &[&str]) -> String {
    let items: String = steps
        .iter()
        .map(|step| format!("<li>{}</li>", escape_html(step)))
        .collect();
    format!(
        concat!(
            r#"<div class="modal-overlay"><div class="modal">"#,
            r#"<div class="modal-header"><h2>Protocolo de Emergência</h2>"#,
            r#"<button class="btn-fechar-modal">&times;</button></div>"#,
            r#"<div class="modal-body"><div class="modal-content">"#,
            r#"<h3><i class="fas fa-first-aid"></i> Protocolo de Emergência</h3>"#,
            "<ol>{items}</ol>",
            r#"<button class="btn-fechar-modal">Fechar</button>"#,
            "</div></div></div></div>",
        ),
        items = items,
    )
}
