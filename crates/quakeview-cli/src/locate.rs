//! Location commands driving `LocationService` end to end.

use std::sync::Arc;
use std::time::Duration;

use quakeview_core::{AppConfig, Formatter};
use quakeview_geo::{FixedPosition, GeocodeClient, LocationService, Position, PositionProvider};

fn build_service(
    config: &AppConfig,
    positions: Arc<dyn PositionProvider>,
) -> anyhow::Result<LocationService> {
    let client = GeocodeClient::with_base_url(
        config.geocode_timeout_secs,
        &config.user_agent,
        &config.geocode_url,
    )?;
    Ok(LocationService::with_options(
        Arc::new(client),
        positions,
        Formatter::default(),
        Duration::from_millis(config.flicker_timeout_ms),
    ))
}

/// Print the outcome of the most recent request, failing on a reported error.
fn report(service: &LocationService) -> anyhow::Result<()> {
    if let Some(location) = service.location().get() {
        println!("{}", location.address);
        println!("latitude:  {}", location.latitude);
        println!("longitude: {}", location.longitude);
        return Ok(());
    }
    match service.error().get() {
        Some(error) => anyhow::bail!("{error}"),
        None => anyhow::bail!("no location resolved"),
    }
}

pub(crate) async fn run_geocode(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    let service = build_service(config, Arc::new(quakeview_geo::NoPositionSupport))?;
    tracing::info!(%query, url = %config.geocode_url, "geocoding");

    let Some(handle) = service.geocode(Some(query)) else {
        anyhow::bail!("empty query");
    };
    handle.await?;
    report(&service)
}

pub(crate) async fn run_locate(
    config: &AppConfig,
    latitude: f64,
    longitude: f64,
    accuracy: f64,
) -> anyhow::Result<()> {
    let provider = FixedPosition(Position::new(latitude, longitude, accuracy));
    let service = build_service(config, Arc::new(provider))?;

    let Some(handle) = service.geolocate() else {
        return report(&service);
    };
    handle.await?;
    report(&service)
}
