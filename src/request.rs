// Request document builders. Each builder checks its arguments up front and
// returns the root node of one vendor request document.

use crate::config::AccessCredentials;
use crate::entity::{
    LabelDelivery, LabelRecoverySpecification, LabelSpecification, ReceiptSpecification, Shipment,
    Translate,
};
use crate::error::{Result, ShippingError};
use crate::xml::XmlNode;

pub const CONFIRM_ACTION: &str = "ShipConfirm";
pub const ACCEPT_ACTION: &str = "ShipAccept";
pub const VOID_ACTION: &str = "1";
pub const LABEL_RECOVERY_ACTION: &str = "LabelRecovery";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RequestOption {
    /// Ask the vendor to validate the ship-to address.
    Validate,
    #[default]
    NonValidate,
}

impl RequestOption {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestOption::Validate => "validate",
            RequestOption::NonValidate => "nonvalidate",
        }
    }
}

/// What to void: a whole shipment, or selected packages of a shipment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoidShipment {
    ShipmentId(String),
    Expanded {
        shipment_id: Option<String>,
        tracking_numbers: Vec<String>,
    },
}

impl VoidShipment {
    pub fn shipment(id: impl Into<String>) -> Self {
        VoidShipment::ShipmentId(id.into())
    }

    pub fn packages<I, S>(shipment_id: impl Into<String>, tracking_numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        VoidShipment::Expanded {
            shipment_id: Some(shipment_id.into()),
            tracking_numbers: tracking_numbers.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelRecoveryTarget {
    TrackingNumber(String),
    Reference {
        value: Option<String>,
        shipper_number: Option<String>,
    },
}

impl LabelRecoveryTarget {
    pub fn tracking_number(number: impl Into<String>) -> Self {
        LabelRecoveryTarget::TrackingNumber(number.into())
    }

    pub fn reference(value: impl Into<String>, shipper_number: impl Into<String>) -> Self {
        LabelRecoveryTarget::Reference {
            value: Some(value.into()),
            shipper_number: Some(shipper_number.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LabelRecoveryOptions {
    pub label_specification: Option<LabelRecoverySpecification>,
    pub label_delivery: Option<LabelDelivery>,
    pub translate: Option<Translate>,
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct RequestBuilder {
    customer_context: Option<String>,
}

impl RequestBuilder {
    pub fn new(customer_context: Option<String>) -> Self {
        Self { customer_context }
    }

    pub fn access(&self, credentials: &AccessCredentials) -> XmlNode {
        let mut node = XmlNode::new("AccessRequest").with_attribute("xml:lang", "en-US");
        node.push_text("AccessLicenseNumber", credentials.access_key.as_str())
            .push_text("UserId", credentials.user_id.as_str())
            .push_text("Password", credentials.password.as_str());
        node
    }

    pub fn confirm(
        &self,
        shipment: &Shipment,
        option: RequestOption,
        label: Option<&LabelSpecification>,
        receipt: Option<&ReceiptSpecification>,
    ) -> Result<XmlNode> {
        if shipment.packages().is_empty() {
            return Err(ShippingError::InvalidArgument(
                "shipment must contain at least one package".to_string(),
            ));
        }
        if shipment.service().code().trim().is_empty() {
            return Err(ShippingError::InvalidArgument(
                "shipment service code is required".to_string(),
            ));
        }

        let mut node = XmlNode::new("ShipmentConfirmRequest");
        node.push(self.request_header(CONFIRM_ACTION, Some(option.as_str())))
            .push_node(shipment)
            .push_opt(label)
            .push_opt(receipt);
        Ok(node)
    }

    pub fn accept(&self, digest: &str) -> Result<XmlNode> {
        if digest.trim().is_empty() {
            return Err(ShippingError::InvalidArgument(
                "shipment digest is required".to_string(),
            ));
        }

        let mut node = XmlNode::new("ShipmentAcceptRequest");
        node.push(self.request_header(ACCEPT_ACTION, None))
            .push_text("ShipmentDigest", digest);
        Ok(node)
    }

    pub fn void(&self, target: &VoidShipment) -> Result<XmlNode> {
        let mut node = XmlNode::new("VoidShipmentRequest");
        node.push(self.request_header(VOID_ACTION, None));

        match target {
            VoidShipment::ShipmentId(id) => {
                let id = non_empty(Some(id.as_str())).ok_or_else(|| {
                    ShippingError::InvalidArgument("shipment identification number is required".to_string())
                })?;
                node.push_text("ShipmentIdentificationNumber", id.to_uppercase());
            }
            VoidShipment::Expanded {
                shipment_id,
                tracking_numbers,
            } => {
                let id = non_empty(shipment_id.as_deref()).ok_or_else(|| {
                    ShippingError::InvalidArgument(
                        "expanded void requires a shipment identification number".to_string(),
                    )
                })?;
                let mut expanded = XmlNode::new("ExpandedVoidShipment");
                expanded.push_text("ShipmentIdentificationNumber", id.to_uppercase());
                for number in tracking_numbers {
                    let number = non_empty(Some(number.as_str())).ok_or_else(|| {
                        ShippingError::InvalidArgument(
                            "expanded void tracking numbers must not be empty".to_string(),
                        )
                    })?;
                    expanded.push_text("TrackingNumber", number.to_uppercase());
                }
                node.push(expanded);
            }
        }
        Ok(node)
    }

    pub fn recover_label(
        &self,
        target: &LabelRecoveryTarget,
        options: &LabelRecoveryOptions,
    ) -> Result<XmlNode> {
        let mut node = XmlNode::new("LabelRecoveryRequest");
        node.push(self.request_header(LABEL_RECOVERY_ACTION, None));

        if let Some(spec) = options.label_specification.as_ref().filter(|s| !s.is_empty()) {
            node.push_node(spec);
        }
        node.push_opt(options.label_delivery.as_ref())
            .push_opt(options.translate.as_ref());

        match target {
            LabelRecoveryTarget::TrackingNumber(number) => {
                let number = non_empty(Some(number.as_str())).ok_or_else(|| {
                    ShippingError::InvalidArgument("tracking number is required".to_string())
                })?;
                node.push_text("TrackingNumber", number.to_uppercase());
            }
            LabelRecoveryTarget::Reference {
                value,
                shipper_number,
            } => {
                let (value, shipper_number) = match (
                    non_empty(value.as_deref()),
                    non_empty(shipper_number.as_deref()),
                ) {
                    (Some(value), Some(shipper_number)) => (value, shipper_number),
                    _ => {
                        return Err(ShippingError::InvalidArgument(
                            "label recovery by reference requires value and shipper_number"
                                .to_string(),
                        ))
                    }
                };
                let mut reference = XmlNode::new("ReferenceNumber");
                reference.push_text("Value", value);
                node.push(reference).push_text("ShipperNumber", shipper_number);
            }
        }
        Ok(node)
    }

    fn request_header(&self, action: &str, option: Option<&str>) -> XmlNode {
        let mut reference = XmlNode::new("TransactionReference");
        reference.push_opt_text("CustomerContext", self.customer_context.as_deref());

        let mut header = XmlNode::new("Request");
        header
            .push(reference)
            .push_text("RequestAction", action)
            .push_opt_text("RequestOption", option);
        header
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ImageFormat, LabelPrintMethod, Package, Service, ShipTo, Shipper};
    use test_case::test_case;

    fn minimal_shipment() -> Shipment {
        Shipment::new(
            Shipper::new("ACME Corp", "A1B2C3").unwrap(),
            ShipTo::new("Receiver Inc").unwrap(),
            Service::new(Service::GROUND),
        )
        .with_package(Package::new())
    }

    fn shape(node: &XmlNode) -> Vec<String> {
        node.children().iter().map(|c| c.name().to_string()).collect()
    }

    #[test]
    fn test_minimal_confirm_tree_shape() {
        let builder = RequestBuilder::default();
        let root = builder
            .confirm(&minimal_shipment(), RequestOption::NonValidate, None, None)
            .unwrap();

        assert_eq!(root.name(), "ShipmentConfirmRequest");
        assert_eq!(shape(&root), vec!["Request", "Shipment"]);
        assert_eq!(
            root.find("Request").map(shape).unwrap(),
            vec!["TransactionReference", "RequestAction", "RequestOption"]
        );
        assert_eq!(root.find_text("Request/RequestAction"), Some("ShipConfirm"));
        assert_eq!(root.find_text("Request/RequestOption"), Some("nonvalidate"));
        assert_eq!(
            root.find("Shipment").map(shape).unwrap(),
            vec!["Shipper", "ShipTo", "Service", "Package"]
        );
        assert_eq!(root.find_text("Shipment/Shipper/Name"), Some("ACME Corp"));
        assert_eq!(root.find_text("Shipment/Shipper/ShipperNumber"), Some("A1B2C3"));
        assert_eq!(root.find_text("Shipment/ShipTo/CompanyName"), Some("Receiver Inc"));
        assert_eq!(root.find_text("Shipment/Service/Code"), Some("03"));
    }

    #[test]
    fn test_confirm_with_label_and_receipt() {
        let builder = RequestBuilder::new(Some("order-42".to_string()));
        let label = LabelSpecification::new(LabelPrintMethod::Gif);
        let receipt = ReceiptSpecification::new(ImageFormat::Html);
        let root = builder
            .confirm(&minimal_shipment(), RequestOption::Validate, Some(&label), Some(&receipt))
            .unwrap();

        assert_eq!(
            shape(&root),
            vec!["Request", "Shipment", "LabelSpecification", "ReceiptSpecification"]
        );
        assert_eq!(
            root.find_text("Request/TransactionReference/CustomerContext"),
            Some("order-42")
        );
        assert_eq!(root.find_text("Request/RequestOption"), Some("validate"));
    }

    #[test]
    fn test_confirm_requires_package() {
        let shipment = Shipment::new(
            Shipper::new("ACME Corp", "A1B2C3").unwrap(),
            ShipTo::new("Receiver Inc").unwrap(),
            Service::new(Service::GROUND),
        );
        let err = RequestBuilder::default()
            .confirm(&shipment, RequestOption::NonValidate, None, None)
            .unwrap_err();
        assert!(matches!(err, ShippingError::InvalidArgument(_)));
    }

    #[test]
    fn test_confirm_requires_service_code() {
        let shipment = Shipment::new(
            Shipper::new("ACME Corp", "A1B2C3").unwrap(),
            ShipTo::new("Receiver Inc").unwrap(),
            Service::new(" "),
        )
        .with_package(Package::new());
        let err = RequestBuilder::default()
            .confirm(&shipment, RequestOption::NonValidate, None, None)
            .unwrap_err();
        assert!(matches!(err, ShippingError::InvalidArgument(_)));
    }

    #[test]
    fn test_accept() {
        let root = RequestBuilder::default().accept("DIGEST==").unwrap();
        assert_eq!(shape(&root), vec!["Request", "ShipmentDigest"]);
        assert_eq!(root.find_text("Request/RequestAction"), Some("ShipAccept"));
        assert!(root.find("Request/RequestOption").is_none());
        assert_eq!(root.child_text("ShipmentDigest"), Some("DIGEST=="));

        assert!(matches!(
            RequestBuilder::default().accept("  "),
            Err(ShippingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_void_plain_id_is_uppercased() {
        let root = RequestBuilder::default()
            .void(&VoidShipment::shipment("1z12345e0291980793"))
            .unwrap();
        assert_eq!(root.find_text("Request/RequestAction"), Some("1"));
        assert_eq!(
            root.child_text("ShipmentIdentificationNumber"),
            Some("1Z12345E0291980793")
        );
    }

    #[test]
    fn test_void_expanded() {
        let root = RequestBuilder::default()
            .void(&VoidShipment::packages(
                "1z2220060290602143",
                ["1z2220060294314162", "1z2220060291994175"],
            ))
            .unwrap();
        let expanded = root.child("ExpandedVoidShipment").unwrap();
        assert_eq!(
            shape(expanded),
            vec!["ShipmentIdentificationNumber", "TrackingNumber", "TrackingNumber"]
        );
        assert_eq!(
            expanded.child_text("ShipmentIdentificationNumber"),
            Some("1Z2220060290602143")
        );
    }

    #[test_case(VoidShipment::ShipmentId(String::new()) ; "empty plain id")]
    #[test_case(VoidShipment::Expanded { shipment_id: None, tracking_numbers: vec!["1Z1".into()] } ; "absent expanded id")]
    #[test_case(VoidShipment::Expanded { shipment_id: Some(String::new()), tracking_numbers: vec![] } ; "empty expanded id")]
    #[test_case(VoidShipment::Expanded { shipment_id: Some("1Z1".into()), tracking_numbers: vec![String::new()] } ; "empty tracking number")]
    #[test_case(VoidShipment::Expanded { shipment_id: Some("1Z1".into()), tracking_numbers: vec!["1Z2".into(), "  ".into()] } ; "blank tracking number")]
    fn test_void_with_missing_ids_fails(target: VoidShipment) {
        assert!(matches!(
            RequestBuilder::default().void(&target),
            Err(ShippingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_recover_by_tracking_number() {
        let root = RequestBuilder::default()
            .recover_label(
                &LabelRecoveryTarget::tracking_number("1Z12345E8791315509"),
                &LabelRecoveryOptions::default(),
            )
            .unwrap();
        assert_eq!(shape(&root), vec!["Request", "TrackingNumber"]);
        assert_eq!(root.find_text("Request/RequestAction"), Some("LabelRecovery"));

        let root = RequestBuilder::default()
            .recover_label(
                &LabelRecoveryTarget::tracking_number(" 1z12345e8791315509 "),
                &LabelRecoveryOptions::default(),
            )
            .unwrap();
        assert_eq!(root.child_text("TrackingNumber"), Some("1Z12345E8791315509"));
    }

    #[test]
    fn test_recover_by_reference_with_options() {
        let options = LabelRecoveryOptions {
            label_specification: Some(LabelRecoverySpecification {
                http_user_agent: None,
                image_format: Some(ImageFormat::Gif),
            }),
            label_delivery: Some(LabelDelivery { label_link: true }),
            translate: Some(Translate::default()),
        };
        let root = RequestBuilder::default()
            .recover_label(&LabelRecoveryTarget::reference("ORDER-9", "a1b2c3"), &options)
            .unwrap();
        assert_eq!(
            shape(&root),
            vec![
                "Request",
                "LabelSpecification",
                "LabelDelivery",
                "Translate",
                "ReferenceNumber",
                "ShipperNumber"
            ]
        );
        assert_eq!(root.find_text("ReferenceNumber/Value"), Some("ORDER-9"));
        assert_eq!(root.find_text("Translate/LanguageCode"), Some("eng"));
    }

    #[test]
    fn test_recover_skips_empty_label_specification() {
        let options = LabelRecoveryOptions {
            label_specification: Some(LabelRecoverySpecification::default()),
            ..Default::default()
        };
        let root = RequestBuilder::default()
            .recover_label(&LabelRecoveryTarget::tracking_number("1Z1"), &options)
            .unwrap();
        assert_eq!(shape(&root), vec!["Request", "TrackingNumber"]);
    }

    #[test_case(None, Some("A1B2C3") ; "missing value")]
    #[test_case(Some("ORDER-9"), None ; "missing shipper number")]
    #[test_case(Some(""), Some("A1B2C3") ; "empty value")]
    fn test_recover_reference_requires_both(value: Option<&str>, shipper_number: Option<&str>) {
        let target = LabelRecoveryTarget::Reference {
            value: value.map(str::to_string),
            shipper_number: shipper_number.map(str::to_string),
        };
        assert!(matches!(
            RequestBuilder::default().recover_label(&target, &LabelRecoveryOptions::default()),
            Err(ShippingError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_access_document() {
        let credentials = AccessCredentials::new("KEY", "user", "secret");
        let root = RequestBuilder::default().access(&credentials);
        assert_eq!(root.name(), "AccessRequest");
        assert_eq!(root.attribute("xml:lang"), Some("en-US"));
        assert_eq!(shape(&root), vec!["AccessLicenseNumber", "UserId", "Password"]);
        assert_eq!(root.child_text("Password"), Some("secret"));
    }
}
