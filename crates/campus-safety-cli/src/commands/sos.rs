//! Dashboard SOS command.

use clap::Args;
use campus_safety_core::sos::{GeoPoint, LocationProvider, StaticLocation};
use campus_safety_core::{Config, Database, DispatchReport, SosDispatcher};

use crate::adapters::{ConsoleNotifier, ConsoleSms};

#[derive(Args)]
pub struct SosArgs {
    /// Send immediately without asking for a location fix
    #[arg(long)]
    no_location: bool,
    /// Location fix to report, as LAT,LON (requests location even if
    /// sos.include_location is false)
    #[arg(
        long,
        value_parser = parse_point,
        conflicts_with_all = ["deny_location", "no_location"]
    )]
    at: Option<GeoPoint>,
    /// Behave as if location permission was refused
    #[arg(long, conflicts_with = "no_location")]
    deny_location: bool,
}

fn parse_point(raw: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = raw
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got '{raw}'"))?;
    let latitude = lat
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad latitude '{lat}': {e}"))?;
    let longitude = lon
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("bad longitude '{lon}': {e}"))?;
    Ok(GeoPoint::new(latitude, longitude))
}

impl SosArgs {
    /// An explicit `--at` or `--deny-location` always makes the request.
    fn include_location(&self, config: &Config) -> bool {
        if self.no_location {
            return false;
        }
        let forced = self.at.is_some() || self.deny_location;
        if forced && !config.sos.include_location {
            tracing::debug!("Location flag given; requesting location despite sos.include_location = false");
        }
        forced || config.sos.include_location
    }

    /// The terminal has no GPS: without `--at` the request yields no fix.
    fn provider(&self) -> StaticLocation {
        if self.deny_location {
            StaticLocation::denied()
        } else if let Some(point) = self.at {
            StaticLocation::at(point)
        } else {
            StaticLocation::no_fix()
        }
    }
}

/// Run one dispatch on a fresh current-thread runtime.
pub fn dispatch(
    db: &Database,
    config: &Config,
    provider: &dyn LocationProvider,
    include_location: bool,
) -> Result<DispatchReport, Box<dyn std::error::Error>> {
    let notifier = ConsoleNotifier::new(config.notifications.enabled);
    let sms = ConsoleSms;
    let dispatcher = SosDispatcher::new(db, &sms, provider, &notifier)
        .with_config(config.location.clone());

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;
    let report = runtime.block_on(dispatcher.send_sos(include_location))?;
    Ok(report)
}

pub fn run(args: SosArgs) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let db = Database::open()?;
    let include_location = args.include_location(&config);

    let report = dispatch(&db, &config, &args.provider(), include_location)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(no_location: bool, at: Option<GeoPoint>, deny_location: bool) -> SosArgs {
        SosArgs {
            no_location,
            at,
            deny_location,
        }
    }

    #[test]
    fn explicit_location_flags_override_config() {
        let mut config = Config::default();
        config.sos.include_location = false;

        assert!(!args(false, None, false).include_location(&config));
        assert!(args(false, Some(GeoPoint::new(1.0, 2.0)), false).include_location(&config));
        assert!(args(false, None, true).include_location(&config));

        config.sos.include_location = true;
        assert!(args(false, None, false).include_location(&config));
        assert!(!args(true, None, false).include_location(&config));
    }

    #[test]
    fn parses_lat_lon_pairs() {
        assert_eq!(parse_point("12.9,77.5").unwrap(), GeoPoint::new(12.9, 77.5));
        assert_eq!(parse_point(" -1.5 , 2 ").unwrap(), GeoPoint::new(-1.5, 2.0));
        assert!(parse_point("12.9").is_err());
        assert!(parse_point("north,77").is_err());
    }
}
