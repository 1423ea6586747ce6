//! Drop-off discovery command handlers for the CLI.
//!
//! `dropoffs` opens one discovery session, renders the ranked list with the
//! banner and map preview link, and optionally hands a facility off to the
//! platform's browser for driving directions.

use std::num::NonZeroUsize;
use std::process::{Command, Stdio};

use anyhow::Context;
use ecosort_core::{AppConfig, Coordinate};
use ecosort_dropoff::{
    directions_url, map_embed_url, DeniedPositionProvider, DiscoveryEngine, FixedPositionProvider,
    GeoLocator, OverpassClient, PositionProvider, RankedFacility, SessionController,
};
use tokio::sync::watch;

/// Arguments of the `dropoffs` subcommand after parsing.
#[derive(Debug)]
pub(crate) struct DropoffsRequest {
    pub center: Option<Coordinate>,
    pub filter: Option<String>,
    pub radius_m: Option<u32>,
    pub json: bool,
    pub navigate: Option<NonZeroUsize>,
}

/// Run one discovery session and print the result.
///
/// Without a center the location request is treated as denied, so the
/// fallback catalog is shown. Ctrl-C closes the session; nothing is printed
/// for a closed session.
///
/// # Errors
///
/// Returns an error if the filter rules file cannot be loaded, the HTTP
/// client cannot be built, the radius is zero, or `navigate` is out of range.
/// Discovery failures are not errors; they surface as a degraded session.
pub(crate) async fn run_dropoffs(
    config: &AppConfig,
    request: &DropoffsRequest,
) -> anyhow::Result<()> {
    let rules = config.filter_rules()?;
    let filter = request.filter.as_deref();
    if filter.is_some() && rules.substring_for(filter).is_none() {
        tracing::warn!(
            filter = filter.unwrap_or_default(),
            available = ?rules.names().collect::<Vec<_>>(),
            "unknown filter; showing all facilities"
        );
    }

    let radius_m = request.radius_m.unwrap_or(config.search_radius_m);
    anyhow::ensure!(radius_m > 0, "--radius must be greater than 0");

    let client = OverpassClient::from_config(config)?;
    let (close_tx, close_rx) = watch::channel(false);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("received ctrl-c, closing discovery session");
            close_tx.send_replace(true);
        }
    });

    let controller = match request.center {
        Some(center) => {
            discover(FixedPositionProvider::new(center), client, config, radius_m, close_rx).await
        }
        None => {
            tracing::info!("no coordinate supplied; treating location as unavailable");
            discover(DeniedPositionProvider, client, config, radius_m, close_rx).await
        }
    };

    if controller.is_closed() {
        println!("discovery session closed");
        return Ok(());
    }

    let ranked = controller.ranked(&rules, filter);
    if request.json {
        print_json(&controller, &ranked)?;
    } else {
        print_table(&controller, &ranked);
    }

    if let Some(rank) = request.navigate {
        let chosen = ranked.get(rank.get() - 1).with_context(|| {
            format!("--navigate {rank} is out of range; {} facilities listed", ranked.len())
        })?;
        let url = directions_url(chosen.facility);
        println!("opening directions to {}: {url}", chosen.facility.name);
        if let Err(err) = open_external(url.as_str()) {
            tracing::warn!(error = %err, %url, "failed to launch navigation app");
        }
    }

    Ok(())
}

/// Print the configured filter names and their category substrings.
///
/// # Errors
///
/// Returns an error if the filter rules file cannot be loaded.
pub(crate) fn run_filters(config: &AppConfig) -> anyhow::Result<()> {
    let rules = config.filter_rules()?;
    println!("{:<16}CATEGORY CONTAINS", "FILTER");
    for rule in &rules.filters {
        println!("{:<16}{}", rule.name, rule.category_contains);
    }
    Ok(())
}

async fn discover<P: PositionProvider>(
    provider: P,
    client: OverpassClient,
    config: &AppConfig,
    radius_m: u32,
    close: watch::Receiver<bool>,
) -> SessionController {
    DiscoveryEngine::from_config(GeoLocator::new(provider), client, config)
        .with_radius(radius_m)
        .run(close)
        .await
}

fn print_json(
    controller: &SessionController,
    ranked: &[RankedFacility<'_>],
) -> anyhow::Result<()> {
    let session = controller.session();
    let output = serde_json::json!({
        "session_id": session.session_id,
        "status": session.status,
        "source": session.source,
        "user_coordinate": session.user_coordinate,
        "last_error": session.last_error,
        "banner": session.banner(),
        "map_url": session.user_coordinate.map(|c| map_embed_url(c).to_string()),
        "facilities": ranked,
    });
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn print_table(controller: &SessionController, ranked: &[RankedFacility<'_>]) {
    let session = controller.session();
    if let Some(banner) = session.banner() {
        println!("! {banner}");
        println!();
    }

    println!("{:<6}{:<10}{:<26}{:<22}NAME", "RANK", "DISTANCE", "CATEGORY", "HOURS");
    for (index, entry) in ranked.iter().enumerate() {
        let facility = entry.facility;
        let marker = if entry.recommended { "*" } else { "" };
        println!(
            "{:<6}{:<10}{:<26}{:<22}{} ({})",
            format!("{}{marker}", index + 1),
            facility.display_distance(),
            truncate(&facility.category, 24),
            truncate(&facility.opening_hours, 20),
            facility.name,
            facility.address,
        );
        println!(
            "{:<42}accepts: {}; phone: {}",
            "",
            facility.accepted_materials.join(", "),
            facility.phone
        );
    }

    if ranked.iter().any(|r| r.recommended) {
        println!();
        println!("* recommended for the selected filter");
    }
    if let Some(center) = session.user_coordinate {
        println!();
        println!("map: {}", map_embed_url(center));
    }
}

fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() > max_chars {
        format!(
            "{}...",
            value.chars().take(max_chars.saturating_sub(3)).collect::<String>()
        )
    } else {
        value.to_string()
    }
}

/// Launch the platform URL opener without waiting for it.
fn open_external(url: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    let mut command = {
        let mut c = Command::new("open");
        c.arg(url);
        c
    };
    #[cfg(target_os = "windows")]
    let mut command = {
        let mut c = Command::new("cmd");
        c.args(["/C", "start", "", url]);
        c
    };
    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    let mut command = {
        let mut c = Command::new("xdg-open");
        c.arg(url);
        c
    };

    command
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map(drop)
}
