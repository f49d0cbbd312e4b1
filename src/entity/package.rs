use crate::entity::{bounded, positive, Charges, ReferenceNumber};
use crate::error::{Result, ShippingError, ValidationError};
use crate::xml::{FromNode, ToNode, XmlNode};

type Checked<T> = std::result::Result<T, ValidationError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitOfMeasurement {
    code: String,
    description: Option<String>,
}

impl UnitOfMeasurement {
    pub const LBS: &'static str = "LBS";
    pub const KGS: &'static str = "KGS";
    pub const IN: &'static str = "IN";
    pub const CM: &'static str = "CM";

    pub fn new(code: &str) -> Self {
        Self {
            code: code.trim().to_ascii_uppercase(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl ToNode for UnitOfMeasurement {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("UnitOfMeasurement");
        node.push_text("Code", self.code.as_str())
            .push_opt_text("Description", self.description.as_deref());
        node
    }
}

impl FromNode for UnitOfMeasurement {
    fn from_node(node: &XmlNode) -> Result<Self> {
        let code = node
            .child_text("Code")
            .ok_or_else(|| ShippingError::Xml("<UnitOfMeasurement> has no Code".to_string()))?;
        Ok(Self {
            code: code.to_string(),
            description: node.child_text("Description").map(str::to_string),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackagingType {
    code: String,
    description: Option<String>,
}

impl PackagingType {
    pub const LETTER: &'static str = "01";
    pub const CUSTOMER_SUPPLIED: &'static str = "02";
    pub const TUBE: &'static str = "03";
    pub const PAK: &'static str = "04";
    pub const EXPRESS_BOX: &'static str = "21";

    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl ToNode for PackagingType {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("PackagingType");
        node.push_text("Code", self.code.as_str())
            .push_opt_text("Description", self.description.as_deref());
        node
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dimensions {
    unit: UnitOfMeasurement,
    length: f64,
    width: f64,
    height: f64,
}

impl Dimensions {
    pub fn new(unit: UnitOfMeasurement, length: f64, width: f64, height: f64) -> Checked<Self> {
        Ok(Self {
            unit,
            length: positive("Length", length, 2)?,
            width: positive("Width", width, 2)?,
            height: positive("Height", height, 2)?,
        })
    }
}

impl ToNode for Dimensions {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("Dimensions");
        node.push_node(&self.unit)
            .push_text("Length", self.length.to_string())
            .push_text("Width", self.width.to_string())
            .push_text("Height", self.height.to_string());
        node
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageWeight {
    unit: UnitOfMeasurement,
    weight: f64,
}

impl PackageWeight {
    pub fn new(unit: UnitOfMeasurement, weight: f64) -> Checked<Self> {
        Ok(Self {
            unit,
            weight: positive("Weight", weight, 1)?,
        })
    }

    pub fn unit(&self) -> &UnitOfMeasurement {
        &self.unit
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl ToNode for PackageWeight {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("PackageWeight");
        node.push_node(&self.unit)
            .push_text("Weight", self.weight.to_string());
        node
    }
}

// Also reads BillingWeight, which has the same shape
impl FromNode for PackageWeight {
    fn from_node(node: &XmlNode) -> Result<Self> {
        let unit = node.child("UnitOfMeasurement").ok_or_else(|| {
            ShippingError::Xml(format!("<{}> has no UnitOfMeasurement", node.name()))
        })?;
        let weight = node
            .child_text("Weight")
            .and_then(|w| w.trim().parse::<f64>().ok())
            .ok_or_else(|| ShippingError::Xml(format!("<{}> has no valid Weight", node.name())))?;
        Ok(Self {
            unit: UnitOfMeasurement::from_node(unit)?,
            weight,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeliveryConfirmation {
    dcis_type: String,
}

impl DeliveryConfirmation {
    pub const SIGNATURE_REQUIRED: &'static str = "1";
    pub const ADULT_SIGNATURE_REQUIRED: &'static str = "2";

    pub fn new(dcis_type: impl Into<String>) -> Self {
        Self {
            dcis_type: dcis_type.into(),
        }
    }
}

impl ToNode for DeliveryConfirmation {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("DeliveryConfirmation");
        node.push_text("DCISType", self.dcis_type.as_str());
        node
    }
}

// Collect on delivery
#[derive(Debug, Clone, PartialEq)]
pub struct Cod {
    funds_code: String,
    amount: Charges,
}

impl Cod {
    pub const CASH: &'static str = "0";
    pub const CHECK: &'static str = "8";

    pub fn new(funds_code: impl Into<String>, amount: Charges) -> Self {
        Self {
            funds_code: funds_code.into(),
            amount,
        }
    }
}

impl ToNode for Cod {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("COD");
        node.push_text("CODFundsCode", self.funds_code.as_str())
            .push(self.amount.to_named_node("CODAmount"));
        node
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PackageServiceOptions {
    pub delivery_confirmation: Option<DeliveryConfirmation>,
    pub insured_value: Option<Charges>,
    pub cod: Option<Cod>,
}

impl ToNode for PackageServiceOptions {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("PackageServiceOptions");
        node.push_opt(self.delivery_confirmation.as_ref());
        if let Some(insured_value) = &self.insured_value {
            node.push(insured_value.to_named_node("InsuredValue"));
        }
        node.push_opt(self.cod.as_ref());
        node
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Package {
    description: Option<String>,
    packaging_type: Option<PackagingType>,
    dimensions: Option<Dimensions>,
    package_weight: Option<PackageWeight>,
    large_package: bool,
    reference_numbers: Vec<ReferenceNumber>,
    additional_handling: bool,
    service_options: Option<PackageServiceOptions>,
}

impl Package {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Checked<Self> {
        self.description = Some(bounded("Description", description, 35)?);
        Ok(self)
    }

    pub fn with_packaging_type(mut self, packaging_type: PackagingType) -> Self {
        self.packaging_type = Some(packaging_type);
        self
    }

    pub fn with_dimensions(mut self, dimensions: Dimensions) -> Self {
        self.dimensions = Some(dimensions);
        self
    }

    pub fn with_weight(mut self, weight: PackageWeight) -> Self {
        self.package_weight = Some(weight);
        self
    }

    pub fn large_package(mut self, large: bool) -> Self {
        self.large_package = large;
        self
    }

    pub fn additional_handling(mut self, additional: bool) -> Self {
        self.additional_handling = additional;
        self
    }

    // At most two references per package
    pub fn with_reference_number(mut self, reference: ReferenceNumber) -> Checked<Self> {
        if self.reference_numbers.len() == 2 {
            return Err(ValidationError::Invalid {
                field: "ReferenceNumber",
                reason: "a package takes at most two reference numbers".to_string(),
            });
        }
        self.reference_numbers.push(reference);
        Ok(self)
    }

    pub fn with_service_options(mut self, options: PackageServiceOptions) -> Self {
        self.service_options = Some(options);
        self
    }

    pub fn weight(&self) -> Option<&PackageWeight> {
        self.package_weight.as_ref()
    }
}

impl ToNode for Package {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("Package");
        node.push_opt_text("Description", self.description.as_deref())
            .push_opt(self.packaging_type.as_ref())
            .push_opt(self.dimensions.as_ref())
            .push_opt(self.package_weight.as_ref())
            .push_flag("LargePackageIndicator", self.large_package)
            .push_all(&self.reference_numbers)
            .push_flag("AdditionalHandling", self.additional_handling)
            .push_opt(self.service_options.as_ref());
        node
    }
}
