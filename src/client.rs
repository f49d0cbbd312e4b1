use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::config::{
    ShippingConfig, LABEL_RECOVERY_ENDPOINT, SHIP_ACCEPT_ENDPOINT, SHIP_CONFIRM_ENDPOINT,
    VOID_ENDPOINT,
};
use crate::entity::{LabelSpecification, ReceiptSpecification, Shipment};
use crate::error::Result;
use crate::request::{
    LabelRecoveryOptions, LabelRecoveryTarget, RequestBuilder, RequestOption, VoidShipment,
};
use crate::response::{check_response, ResponseDocument};
use crate::transport::{HttpTransport, Transport};
use crate::xml::XmlNode;

// The four vendor operations
#[async_trait]
pub trait ShippingApi: Send + Sync {
    // Price and validate a shipment, returns the digest to accept
    async fn confirm(
        &self,
        shipment: &Shipment,
        option: RequestOption,
        label: Option<&LabelSpecification>,
        receipt: Option<&ReceiptSpecification>,
    ) -> Result<ResponseDocument>;

    // Book a confirmed shipment and fetch its labels
    async fn accept(&self, digest: &str) -> Result<ResponseDocument>;

    async fn void(&self, target: &VoidShipment) -> Result<ResponseDocument>;

    async fn recover_label(
        &self,
        target: &LabelRecoveryTarget,
        options: &LabelRecoveryOptions,
    ) -> Result<ResponseDocument>;
}

pub struct ShippingClient {
    config: ShippingConfig,
    builder: RequestBuilder,
    transport: Arc<dyn Transport>,
}

impl ShippingClient {
    pub fn new(config: ShippingConfig) -> Result<Self> {
        config.validate()?;
        let transport = HttpTransport::new(config.timeout_ms)?;
        Ok(Self::build(config, Arc::new(transport)))
    }

    pub fn with_transport(config: ShippingConfig, transport: Arc<dyn Transport>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, transport))
    }

    fn build(config: ShippingConfig, transport: Arc<dyn Transport>) -> Self {
        let builder = RequestBuilder::new(config.customer_context.clone());
        Self {
            config,
            builder,
            transport,
        }
    }

    pub fn config(&self) -> &ShippingConfig {
        &self.config
    }

    async fn send(&self, endpoint: &str, request: XmlNode) -> Result<ResponseDocument> {
        let access = self.builder.access(&self.config.credentials).to_xml_string()?;
        let payload = request.to_xml_string()?;
        let url = self.config.endpoint_url(endpoint);
        debug!(
            request = request.name(),
            url = %url,
            payload_len = payload.len(),
            "sending vendor request"
        );

        let response = self.transport.request(&access, &payload, &url).await?;
        check_response(response).map_err(|e| {
            warn!(request = request.name(), error = %e, "vendor request failed");
            e
        })
    }
}

#[async_trait]
impl ShippingApi for ShippingClient {
    async fn confirm(
        &self,
        shipment: &Shipment,
        option: RequestOption,
        label: Option<&LabelSpecification>,
        receipt: Option<&ReceiptSpecification>,
    ) -> Result<ResponseDocument> {
        let request = self.builder.confirm(shipment, option, label, receipt)?;
        self.send(SHIP_CONFIRM_ENDPOINT, request).await
    }

    async fn accept(&self, digest: &str) -> Result<ResponseDocument> {
        let request = self.builder.accept(digest)?;
        self.send(SHIP_ACCEPT_ENDPOINT, request).await
    }

    async fn void(&self, target: &VoidShipment) -> Result<ResponseDocument> {
        let request = self.builder.void(target)?;
        self.send(VOID_ENDPOINT, request).await
    }

    async fn recover_label(
        &self,
        target: &LabelRecoveryTarget,
        options: &LabelRecoveryOptions,
    ) -> Result<ResponseDocument> {
        let request = self.builder.recover_label(target, options)?;
        self.send(LABEL_RECOVERY_ENDPOINT, request).await
    }
}

impl fmt::Debug for ShippingClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShippingClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AccessCredentials;
    use crate::entity::{Package, Service, ShipTo, Shipper};
    use crate::error::ShippingError;
    use crate::response::ShipmentAcceptResponse;
    use crate::transport::TransportResponse;
    use std::sync::Mutex;

    const ACCEPT_OK: &str = r#"<?xml version="1.0"?>
<ShipmentAcceptResponse>
  <Response><ResponseStatusCode>1</ResponseStatusCode></Response>
  <ShipmentResults>
    <ShipmentIdentificationNumber>1Z12345E0291980793</ShipmentIdentificationNumber>
    <PackageResults><TrackingNumber>1Z12345E0291980793</TrackingNumber></PackageResults>
  </ShipmentResults>
</ShipmentAcceptResponse>"#;

    #[derive(Debug, Clone)]
    struct Call {
        access: String,
        payload: String,
        url: String,
    }

    struct RecordingTransport {
        reply: Option<&'static str>,
        calls: Mutex<Vec<Call>>,
    }

    impl RecordingTransport {
        fn replying(reply: &'static str) -> Arc<Self> {
            Arc::new(Self {
                reply: Some(reply),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn request(&self, access: &str, payload: &str, endpoint_url: &str) -> Result<TransportResponse> {
            self.calls.lock().unwrap().push(Call {
                access: access.to_string(),
                payload: payload.to_string(),
                url: endpoint_url.to_string(),
            });
            match self.reply {
                Some(reply) => Ok(TransportResponse::from_body(reply.as_bytes())),
                None => Ok(TransportResponse {
                    text: String::new(),
                    document: None,
                }),
            }
        }
    }

    fn config() -> ShippingConfig {
        ShippingConfig::new(AccessCredentials::new("KEY", "user", "secret"))
            .with_integration(true)
            .with_customer_context("order-42")
    }

    fn client(transport: Arc<RecordingTransport>) -> ShippingClient {
        ShippingClient::with_transport(config(), transport).unwrap()
    }

    #[tokio::test]
    async fn test_accept_sends_access_and_request() {
        let transport = RecordingTransport::replying(ACCEPT_OK);
        let client = client(transport.clone());

        let doc = client.accept("DIGEST==").await.unwrap();
        let typed: ShipmentAcceptResponse = doc.deserialize().unwrap();
        assert_eq!(
            typed.shipment_results.shipment_identification_number,
            "1Z12345E0291980793"
        );

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].url, "https://wwwcie.ups.com/ups.app/xml/ShipAccept");

        let access = XmlNode::parse(&calls[0].access).unwrap();
        assert_eq!(access.name(), "AccessRequest");
        assert_eq!(access.child_text("AccessLicenseNumber"), Some("KEY"));

        let payload = XmlNode::parse(&calls[0].payload).unwrap();
        assert_eq!(payload.name(), "ShipmentAcceptRequest");
        assert_eq!(
            payload.find_text("Request/TransactionReference/CustomerContext"),
            Some("order-42")
        );
    }

    #[tokio::test]
    async fn test_invalid_arguments_never_reach_transport() {
        let transport = RecordingTransport::replying(ACCEPT_OK);
        let client = client(transport.clone());

        let shipment = Shipment::new(
            Shipper::new("ACME Corp", "A1B2C3").unwrap(),
            ShipTo::new("Receiver Inc").unwrap(),
            Service::new(Service::GROUND),
        );
        let err = client
            .confirm(&shipment, RequestOption::NonValidate, None, None)
            .await
            .unwrap_err();
        assert!(matches!(err, ShippingError::InvalidArgument(_)));

        let err = client
            .void(&VoidShipment::Expanded {
                shipment_id: None,
                tracking_numbers: vec!["1Z1".to_string()],
            })
            .await
            .unwrap_err();
        assert!(matches!(err, ShippingError::InvalidArgument(_)));

        let err = client
            .recover_label(
                &LabelRecoveryTarget::Reference {
                    value: Some("ORDER-9".to_string()),
                    shipper_number: None,
                },
                &LabelRecoveryOptions::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ShippingError::InvalidArgument(_)));

        assert!(transport.calls().is_empty());
    }

    #[tokio::test]
    async fn test_confirm_hits_confirm_endpoint() {
        let transport = RecordingTransport::replying(
            "<ShipmentConfirmResponse><Response><ResponseStatusCode>1</ResponseStatusCode></Response></ShipmentConfirmResponse>",
        );
        let client = client(transport.clone());
        let shipment = Shipment::new(
            Shipper::new("ACME Corp", "A1B2C3").unwrap(),
            ShipTo::new("Receiver Inc").unwrap(),
            Service::new(Service::GROUND),
        )
        .with_package(Package::new());

        let doc = client
            .confirm(&shipment, RequestOption::Validate, None, None)
            .await
            .unwrap();
        assert_eq!(doc.status_code(), Some(1));

        let calls = transport.calls();
        assert!(calls[0].url.ends_with("/ShipConfirm"));
        let payload = XmlNode::parse(&calls[0].payload).unwrap();
        assert_eq!(payload.child_names(), vec!["Request", "Shipment"]);
    }

    #[tokio::test]
    async fn test_vendor_failure_is_reported() {
        let transport = RecordingTransport::replying(
            r#"<VoidShipmentResponse><Response>
                <ResponseStatusCode>0</ResponseStatusCode>
                <Error>
                  <ErrorSeverity>Hard</ErrorSeverity>
                  <ErrorCode>190117</ErrorCode>
                  <ErrorDescription>Void period has expired</ErrorDescription>
                </Error>
              </Response></VoidShipmentResponse>"#,
        );
        let err = client(transport)
            .void(&VoidShipment::shipment("1Z12345E0291980793"))
            .await
            .unwrap_err();
        assert_eq!(err.code(), 190117);
        assert_eq!(err.to_string(), "Failure (Hard): Void period has expired");
    }

    #[tokio::test]
    async fn test_unparseable_reply_is_unknown_failure() {
        let transport = Arc::new(RecordingTransport {
            reply: None,
            calls: Mutex::new(Vec::new()),
        });
        let err = client(transport)
            .recover_label(
                &LabelRecoveryTarget::tracking_number("1Z12345E8791315509"),
                &LabelRecoveryOptions::default(),
            )
            .await
            .unwrap_err();
        assert!(matches!(err, ShippingError::Unknown));
    }

    #[test]
    fn test_new_rejects_missing_credentials() {
        let result = ShippingClient::new(ShippingConfig::default());
        assert!(matches!(result, Err(ShippingError::Config(_))));
    }

    #[test]
    fn test_debug_hides_password() {
        let transport = RecordingTransport::replying(ACCEPT_OK);
        let debug = format!("{:?}", client(transport));
        assert!(!debug.contains("secret"));
    }
}
