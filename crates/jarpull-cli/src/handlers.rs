//! Command handlers.
//!
//! Each handler takes what it needs from the composition root and prints
//! directly to stdout. The install handler renders the orchestrator's run
//! slot with an indicatif bar until a terminal phase is reached.

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use indicatif::{ProgressBar, ProgressStyle};

use jarpull_core::{
    InstallPhase, InstallRequest, InstallerConfig, InstallerPort, NoopInstallEmitter,
    PanelClientPort, SoftwareCatalog,
};
use jarpull_install::{InstallerDeps, build_installer, format_bytes};
use jarpull_panel::{DefaultPanelClient, PanelConfig};

/// Build the panel client from the global CLI options.
pub fn panel_client(
    panel_url: Option<&str>,
    api_key: Option<&str>,
) -> Result<Arc<DefaultPanelClient>> {
    let base_url =
        panel_url.context("panel URL missing: pass --panel-url or set JARPULL_PANEL_URL")?;
    let api_key = api_key.context("API key missing: pass --api-key or set JARPULL_API_KEY")?;

    let config = PanelConfig::new(base_url).with_api_key(api_key);
    let client = DefaultPanelClient::new(&config).context("invalid panel URL")?;
    Ok(Arc::new(client))
}

/// `jarpull login` - verify the API key with a panel round-trip.
pub async fn handle_login(client: Arc<DefaultPanelClient>) -> Result<()> {
    client
        .verify_credentials()
        .await
        .context("credential check failed")?;
    println!("Credentials accepted.");
    Ok(())
}

/// `jarpull servers` - list (and optionally filter) the account's servers.
pub async fn handle_servers(client: Arc<DefaultPanelClient>, search: Option<&str>) -> Result<()> {
    let mut servers = client
        .list_servers()
        .await
        .context("failed to list servers")?;

    if let Some(term) = search {
        let term = term.to_lowercase();
        servers.retain(|s| {
            s.name.to_lowercase().contains(&term) || s.identifier.to_lowercase().contains(&term)
        });
    }

    if servers.is_empty() {
        println!("No servers found.");
        return Ok(());
    }

    let width = servers
        .iter()
        .map(|s| s.identifier.len())
        .max()
        .unwrap_or(0)
        .max("IDENTIFIER".len());
    println!("{:<width$}  NAME", "IDENTIFIER");
    for server in &servers {
        println!("{:<width$}  {}", server.identifier, server.name);
    }
    Ok(())
}

/// `jarpull catalog` - show the software table or one software's versions.
pub fn handle_catalog(software: Option<&str>) -> Result<()> {
    let catalog = SoftwareCatalog::builtin();

    let Some(id) = software else {
        let width = catalog
            .softwares()
            .iter()
            .map(|s| s.id.len())
            .max()
            .unwrap_or(0)
            .max("ID".len());
        println!("{:<width$}  {:<9}  {:<8}  DESCRIPTION", "ID", "CATEGORY", "KIND");
        for entry in catalog.softwares() {
            println!(
                "{:<width$}  {:<9}  {:<8}  {}",
                entry.id,
                entry.category.as_str(),
                entry.kind().as_str(),
                entry.description
            );
        }
        return Ok(());
    };

    let Some(entry) = catalog.get(id) else {
        bail!("unknown software '{id}' (run `jarpull catalog` for the list)");
    };

    println!("{} ({}) - {}", entry.name, entry.category, entry.description);
    println!("artifact kind: {}", entry.kind());
    println!("approx. size:  {}", format_bytes(entry.approx_size));
    println!("versions:");
    for (index, version) in entry.versions.iter().enumerate() {
        if index == 0 {
            println!("  {version}  (latest)");
        } else {
            println!("  {version}");
        }
    }
    Ok(())
}

/// `jarpull install` - run one installation and render it until terminal.
pub async fn handle_install(
    client: Arc<DefaultPanelClient>,
    server: &str,
    software: &str,
    version: &str,
) -> Result<()> {
    let installer = build_installer(InstallerDeps {
        panel: client,
        event_emitter: Arc::new(NoopInstallEmitter::new()),
        catalog: SoftwareCatalog::builtin(),
        config: InstallerConfig::default(),
    });

    let mut rx = installer.subscribe();
    Arc::clone(&installer)
        .start_install(InstallRequest::new(server, software, version))
        .await;

    let bar = ProgressBar::new(100);
    bar.set_style(
        ProgressStyle::with_template("{msg:40} [{bar:40.cyan/blue}] {pos:>3}%")
            .context("invalid progress template")?
            .progress_chars("=> "),
    );

    loop {
        rx.changed().await.context("installer stopped publishing")?;
        let run = rx.borrow_and_update().clone();

        match run.phase {
            InstallPhase::Idle => {}
            InstallPhase::Requesting | InstallPhase::Extracting => {
                bar.set_message(run.message.clone().unwrap_or_default());
            }
            InstallPhase::Downloading => {
                if let Some(progress) = &run.progress {
                    bar.set_position(u64::from(progress.percent));
                    bar.set_message(format!(
                        "downloading {} / {} at {}",
                        format_bytes(progress.downloaded_estimate),
                        format_bytes(progress.total_estimate),
                        progress.speed_label
                    ));
                }
            }
            InstallPhase::Succeeded => {
                bar.finish_and_clear();
                println!(
                    "{}",
                    run.message
                        .unwrap_or_else(|| "installed successfully".to_string())
                );
                return Ok(());
            }
            InstallPhase::Failed => {
                bar.finish_and_clear();
                bail!(
                    run.message
                        .unwrap_or_else(|| "installation failed".to_string())
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_client_requires_url_and_key() {
        let err = panel_client(None, Some("key")).unwrap_err();
        assert!(err.to_string().contains("panel URL missing"));

        let err = panel_client(Some("https://p.example"), None).unwrap_err();
        assert!(err.to_string().contains("API key missing"));

        assert!(panel_client(Some("https://p.example"), Some("key")).is_ok());
    }

    #[test]
    fn test_panel_client_rejects_bad_url() {
        let err = panel_client(Some("not a url"), Some("key")).unwrap_err();
        assert!(err.to_string().contains("invalid panel URL"));
    }

    #[test]
    fn test_catalog_listing_and_detail() {
        assert!(handle_catalog(None).is_ok());
        assert!(handle_catalog(Some("paper")).is_ok());

        let err = handle_catalog(Some("bedrock")).unwrap_err();
        assert!(err.to_string().contains("unknown software"));
    }
}
