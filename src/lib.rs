// Client library for a parcel carrier's XML shipping API

pub mod client;
pub mod config;
pub mod entity;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;
pub mod xml;

// Re-export key types for convenience
pub use client::{ShippingApi, ShippingClient};
pub use config::{AccessCredentials, ShippingConfig};
pub use error::{Result, ShippingError, ValidationError};
pub use request::{
    LabelRecoveryOptions, LabelRecoveryTarget, RequestBuilder, RequestOption, VoidShipment,
};
pub use response::{
    check_response, LabelRecoveryResponse, ResponseDocument, ShipmentAcceptResponse,
    ShipmentConfirmResponse, VoidShipmentResponse,
};
pub use transport::{HttpTransport, Transport, TransportResponse};
pub use xml::{FromNode, ToNode, XmlNode};
