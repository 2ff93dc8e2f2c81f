mod dispatcher;
mod location;
mod message;
mod report;
mod sms;

pub use dispatcher::SosDispatcher;
pub use location::{
    fetch_once, GeoPoint, LocationError, LocationProvider, LocationRequest, LocationStatus,
    StaticLocation,
};
pub use message::{compose_message, maps_link};
pub use report::{DeliveryResult, DeliveryStatus, DispatchOutcome, DispatchReport};
pub use sms::{OutboxSender, OutgoingSms, SmsError, SmsSender};
