//! Commands that load datasets through the cache-backed client.

use std::path::Path;
use std::time::Duration;

use safemap_client::{Contacts, DataStore, FileStore, SystemClock, Tips};
use safemap_core::{AppConfig, CategoryFilter};
use safemap_view::{
    Action, HtmlPanel, ListSection, LoadOutcome, LocationsPage, MarkerLayer, SafetyPanel, Trigger,
};

use crate::document::{self, Section};

pub(crate) fn build_store(config: &AppConfig) -> anyhow::Result<DataStore> {
    let store = DataStore::new(
        &config.api_base_url,
        config.request_timeout_secs,
        &config.user_agent,
        FileStore::new(&config.cache_dir),
        SystemClock,
    )?
    .with_ttl(Duration::from_millis(config.cache_ttl_ms));
    Ok(store)
}

/// Turns a load outcome into the command's result.
fn finish(outcome: LoadOutcome, what: &str) -> anyhow::Result<()> {
    match outcome {
        LoadOutcome::Loaded { .. } => Ok(()),
        LoadOutcome::Failed(e) => Err(anyhow::Error::new(e).context(format!("failed to load {what}"))),
        LoadOutcome::Rejected(r) => Err(r.into()),
        LoadOutcome::Superseded => anyhow::bail!("{what} load was superseded"),
    }
}

pub(crate) async fn run_locations(
    config: &AppConfig,
    query: &str,
    filter: CategoryFilter,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let store = build_store(config)?;
    let mut page = LocationsPage::new(MarkerLayer::new(), HtmlPanel::new());

    // The query and filter are applied as actions so the first render already
    // shows the requested subset.
    page.dispatch(Action::Search(query.to_string()));
    page.dispatch(Action::SelectFilter(filter));
    let outcome = page.load(&store, Trigger::Startup).await;

    let label = page
        .last_updated_label()
        .map(|at| format!("Atualizado em: {at}"));

    if let Some(path) = output {
        let sections = [
            Section {
                id: "mapa",
                html: document::markers_block(page.views().map())?,
            },
            Section {
                id: "lista-locais",
                html: page.views().list().html(),
            },
        ];
        let html = document::render("Mapa de Segurança", &sections, label.as_deref());
        document::write(path, &html)?;
    }

    if outcome.is_loaded() {
        let visible = page.visible();
        if visible.is_empty() {
            println!("Nenhum local encontrado");
        }
        for record in &visible {
            println!(
                "{:<40}{:<12}{:<20}{}",
                record.name,
                record.category.as_str(),
                record.city.as_deref().unwrap_or("-"),
                record.address
            );
        }
        println!(
            "{} de {} locais",
            visible.len(),
            page.state().records.len()
        );
        if let Some(label) = &label {
            println!("{label}");
        }
    }

    finish(outcome, "locations")
}

pub(crate) async fn run_contacts(config: &AppConfig, output: Option<&Path>) -> anyhow::Result<()> {
    let store = build_store(config)?;
    let mut contacts = ListSection::<Contacts, _>::new(HtmlPanel::new());
    let outcome = contacts.load(&store, Trigger::Startup).await;

    if let Some(path) = output {
        let sections = [Section {
            id: "contatos-emergencia",
            html: contacts.list().html(),
        }];
        document::write(path, &document::render("Contatos de Emergência", &sections, None))?;
    }
    for contact in contacts.records() {
        println!("{:<20}{:<8}{}", contact.name, contact.phone, contact.description);
    }
    finish(outcome, "contacts")
}

pub(crate) async fn run_tips(config: &AppConfig, output: Option<&Path>) -> anyhow::Result<()> {
    let store = build_store(config)?;
    let mut tips = ListSection::<Tips, _>::new(HtmlPanel::new());
    let outcome = tips.load(&store, Trigger::Startup).await;

    if let Some(path) = output {
        let sections = [Section {
            id: "dicas-seguranca",
            html: format!("<ul>{}</ul>", tips.list().html()),
        }];
        document::write(path, &document::render("Dicas de Segurança", &sections, None))?;
    }
    for tip in tips.records() {
        println!("- {}", tip.text());
    }
    finish(outcome, "tips")
}

/// Loads contacts and tips concurrently; either may fail without hiding the
/// other.
pub(crate) async fn run_panel(config: &AppConfig, output: Option<&Path>) -> anyhow::Result<()> {
    let store = build_store(config)?;
    let mut panel = SafetyPanel::new(HtmlPanel::new(), HtmlPanel::new());
    let (contacts, tips) = panel.load_all(&store, Trigger::Startup).await;

    if let Some(path) = output {
        let sections = [
            Section {
                id: "contatos-emergencia",
                html: panel.contacts.list().html(),
            },
            Section {
                id: "dicas-seguranca",
                html: format!("<ul>{}</ul>", panel.tips.list().html()),
            },
        ];
        document::write(path, &document::render("Painel de Segurança", &sections, None))?;
    }

    println!("Contatos de emergência");
    for contact in panel.contacts.records() {
        println!("  {:<20}{:<8}{}", contact.name, contact.phone, contact.description);
    }
    println!("Dicas de segurança");
    for tip in panel.tips.records() {
        println!("  - {}", tip.text());
    }

    let contacts = finish(contacts, "contacts");
    let tips = finish(tips, "tips");
    contacts.and(tips)
}

pub(crate) fn run_cache_clear(config: &AppConfig) -> anyhow::Result<()> {
    let store = build_store(config)?;
    store.invalidate_all();
    println!("cache cleared: {}", config.cache_dir.display());
    Ok(())
}
