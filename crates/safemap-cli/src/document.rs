//! Standalone HTML documents for `--output`.

use std::path::Path;

use anyhow::Context;
use safemap_view::{escape_html, MarkerLayer};

/// A named section of the written page.
pub(crate) struct Section<'a> {
    pub id: &'a str,
    pub html: String,
}

pub(crate) fn render(title: &str, sections: &[Section<'_>], footer: Option<&str>) -> String {
    let body: String = sections
        .iter()
        .map(|s| format!(r#"<section id="{}">{}</section>"#, escape_html(s.id), s.html))
        .collect();
    let footer = footer
        .map(|text| format!("<footer>{}</footer>", escape_html(text)))
        .unwrap_or_default();
    format!(
        concat!(
            "<!DOCTYPE html>\n",
            r#"<html lang="pt-BR"><head><meta charset="utf-8"><title>{title}</title></head>"#,
            "<body>{body}{footer}</body></html>\n",
        ),
        title = escape_html(title),
        body = body,
        footer = footer,
    )
}

/// Marker layer as an inline JSON block for a map script to pick up.
pub(crate) fn markers_block(layer: &MarkerLayer) -> anyhow::Result<String> {
    let json = serde_json::to_string(layer).context("failed to serialise markers")?;
    Ok(format!(
        r#"<script type="application/json" id="markers">{json}</script>"#
    ))
}

pub(crate) fn write(path: &Path, html: &str) -> anyhow::Result<()> {
    std::fs::write(path, html).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), bytes = html.len(), "wrote document");
    Ok(())
}
