use super::location::GeoPoint;

const PREFIX: &str = "EMERGENCY SOS! I need help.";

/// `https://maps.google.com/?q=<lat>,<lon>`
pub fn maps_link(point: GeoPoint) -> String {
    format!(
        "https://maps.google.com/?q={},{}",
        point.latitude, point.longitude
    )
}

/// Body of the SOS text. Without a fix the message says so and carries no link.
pub fn compose_message(location: Option<GeoPoint>) -> String {
    match location {
        Some(point) => format!("{PREFIX} My approximate location is: {}", maps_link(point)),
        None => format!("{PREFIX} My location is unknown."),
    }
}
