use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::error::{Result, ShippingError};
use crate::transport::TransportResponse;
use crate::xml::{FromNode, XmlNode};

const STATUS_PATH: &str = "Response/ResponseStatusCode";

/// A successful vendor reply, kept both as a node tree and as raw text.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseDocument {
    root: XmlNode,
    raw: String,
}

impl ResponseDocument {
    pub fn new(root: XmlNode, raw: impl Into<String>) -> Self {
        Self {
            root,
            raw: raw.into(),
        }
    }

    pub fn root(&self) -> &XmlNode {
        &self.root
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    // Paths are relative to the root element, e.g. "ShipmentResults/PackageResults"
    pub fn get(&self, path: &str) -> Option<&XmlNode> {
        self.root.find(path)
    }

    pub fn text(&self, path: &str) -> Option<&str> {
        self.root.find_text(path)
    }

    // Reads the element at `path` into an entity, `None` when the element is absent
    pub fn read<T: FromNode>(&self, path: &str) -> Result<Option<T>> {
        self.get(path).map(T::from_node).transpose()
    }

    pub fn status_code(&self) -> Option<i64> {
        status_code(&self.root)
    }

    pub fn errors(&self) -> Vec<ResponseError> {
        response_errors(&self.root)
    }

    pub fn to_value(&self) -> Value {
        self.root.to_value()
    }

    pub fn deserialize<T: DeserializeOwned>(&self) -> Result<T> {
        quick_xml::de::from_str(&self.raw).map_err(|e| ShippingError::Xml(e.to_string()))
    }
}

fn status_code(root: &XmlNode) -> Option<i64> {
    root.find_text(STATUS_PATH)?.trim().parse().ok()
}

fn response_errors(root: &XmlNode) -> Vec<ResponseError> {
    let response = match root.child("Response") {
        Some(response) => response,
        None => return Vec::new(),
    };
    response
        .children_named("Error")
        .map(|error| ResponseError {
            error_severity: error.child_text("ErrorSeverity").unwrap_or_default().to_string(),
            error_code: error.child_text("ErrorCode").unwrap_or_default().to_string(),
            error_description: error
                .child_text("ErrorDescription")
                .unwrap_or_default()
                .to_string(),
        })
        .collect()
}

/// Turns a transport reply into a document, or into the failure it reports.
///
/// A reply that could not be parsed fails with [`ShippingError::Unknown`]. A missing,
/// unparsable or zero `ResponseStatusCode` fails with [`ShippingError::Vendor`] built
/// from the first `Response/Error` element.
pub fn check_response(response: TransportResponse) -> Result<ResponseDocument> {
    let root = match response.document {
        Some(root) => root,
        None => return Err(ShippingError::Unknown),
    };

    match status_code(&root) {
        Some(code) if code != 0 => Ok(ResponseDocument::new(root, response.text)),
        _ => {
            let error = response_errors(&root).into_iter().next().unwrap_or_default();
            let code: i64 = error.error_code.trim().parse().unwrap_or(0);
            warn!(code, severity = %error.error_severity, "vendor reported a failure");
            Err(ShippingError::Vendor {
                code,
                severity: non_blank(error.error_severity, "Unknown"),
                description: non_blank(error.error_description, "Unknown error"),
            })
        }
    }
}

fn non_blank(value: String, fallback: &str) -> String {
    if value.trim().is_empty() {
        fallback.to_string()
    } else {
        value
    }
}

// Typed reply models
#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct TransactionReference {
    pub customer_context: String,
    #[serde(rename = "XpciVersion")]
    pub xpci_version: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ResponseError {
    pub error_severity: String,
    pub error_code: String,
    pub error_description: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ResponseStatus {
    pub transaction_reference: TransactionReference,
    pub response_status_code: String,
    pub response_status_description: String,
    #[serde(rename = "Error")]
    pub errors: Vec<ResponseError>,
}

impl ResponseStatus {
    pub fn is_success(&self) -> bool {
        matches!(self.response_status_code.trim().parse::<i64>(), Ok(code) if code != 0)
    }
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct CodeDescription {
    pub code: String,
    pub description: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct XmlCharges {
    pub currency_code: String,
    pub monetary_value: String,
}

impl XmlCharges {
    pub fn amount(&self) -> Option<f64> {
        self.monetary_value.trim().parse().ok()
    }
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ShipmentCharges {
    pub transportation_charges: XmlCharges,
    pub service_options_charges: XmlCharges,
    pub total_charges: XmlCharges,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct BillingWeight {
    pub unit_of_measurement: CodeDescription,
    pub weight: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LabelImage {
    pub label_image_format: CodeDescription,
    pub graphic_image: String,
    #[serde(rename = "HTMLImage")]
    pub html_image: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
#[serde(rename = "ShipmentConfirmResponse")]
pub struct ShipmentConfirmResponse {
    pub response: ResponseStatus,
    pub shipment_charges: ShipmentCharges,
    pub billing_weight: BillingWeight,
    pub shipment_identification_number: String,
    pub shipment_digest: String,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PackageResults {
    pub tracking_number: String,
    pub service_options_charges: XmlCharges,
    pub label_image: LabelImage,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ShipmentResults {
    pub shipment_charges: ShipmentCharges,
    pub billing_weight: BillingWeight,
    pub shipment_identification_number: String,
    #[serde(rename = "PackageResults")]
    pub package_results: Vec<PackageResults>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
#[serde(rename = "ShipmentAcceptResponse")]
pub struct ShipmentAcceptResponse {
    pub response: ResponseStatus,
    pub shipment_results: ShipmentResults,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct VoidStatus {
    pub status_type: CodeDescription,
    pub status_code: CodeDescription,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct PackageLevelResults {
    pub tracking_number: String,
    pub status_code: CodeDescription,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
#[serde(rename = "VoidShipmentResponse")]
pub struct VoidShipmentResponse {
    pub response: ResponseStatus,
    pub status: VoidStatus,
    #[serde(rename = "PackageLevelResults")]
    pub package_level_results: Vec<PackageLevelResults>,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct LabelResults {
    pub tracking_number: String,
    pub label_image: LabelImage,
}

#[derive(Debug, PartialEq, Default, Deserialize, Clone, Serialize)]
#[serde(default, rename_all = "PascalCase")]
#[serde(rename = "LabelRecoveryResponse")]
pub struct LabelRecoveryResponse {
    pub response: ResponseStatus,
    pub shipment_identification_number: String,
    #[serde(rename = "LabelResults")]
    pub label_results: Vec<LabelResults>,
}
