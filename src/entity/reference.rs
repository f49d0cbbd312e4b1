use crate::entity::bounded;
use crate::error::ValidationError;
use crate::xml::{ToNode, XmlNode};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceNumber {
    barcode: bool,
    code: Option<String>,
    value: String,
}

impl ReferenceNumber {
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self {
            barcode: false,
            code: None,
            value: bounded("ReferenceNumber", value, 35)?,
        })
    }

    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    // Print the value as a barcode on the label
    pub fn with_barcode(mut self, barcode: bool) -> Self {
        self.barcode = barcode;
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }
}

impl ToNode for ReferenceNumber {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("ReferenceNumber");
        node.push_flag("BarCodeIndicator", self.barcode)
            .push_opt_text("Code", self.code.as_deref())
            .push_text("Value", self.value.as_str());
        node
    }
}
