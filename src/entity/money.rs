use std::fmt;
use std::str::FromStr;

use crate::entity::{alpha_code, round_decimal};
use crate::error::{Result, ShippingError, ValidationError};
use crate::xml::{FromNode, ToNode, XmlNode};

pub const MAX_MONETARY_LENGTH: usize = 15;

/// Amount rounded to two decimal places whose rendered form fits the
/// vendor's 15 character limit.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct MonetaryValue(f64);

impl MonetaryValue {
    pub fn new(value: f64) -> std::result::Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::Invalid {
                field: "MonetaryValue",
                reason: format!("{} is not a finite number", value),
            });
        }

        let mut rounded = round_decimal(value, 2);
        if rounded == 0.0 {
            // drops the sign of -0.0
            rounded = 0.0;
        }

        let len = rounded.to_string().len();
        if len > MAX_MONETARY_LENGTH {
            return Err(ValidationError::TooLong {
                field: "MonetaryValue",
                len,
                max: MAX_MONETARY_LENGTH,
            });
        }
        Ok(Self(rounded))
    }

    pub fn value(&self) -> f64 {
        self.0
    }
}

impl fmt::Display for MonetaryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MonetaryValue {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let value: f64 = s.trim().parse().map_err(|_| ValidationError::Invalid {
            field: "MonetaryValue",
            reason: format!("{:?} is not a number", s),
        })?;
        Self::new(value)
    }
}

impl TryFrom<f64> for MonetaryValue {
    type Error = ValidationError;

    fn try_from(value: f64) -> std::result::Result<Self, Self::Error> {
        Self::new(value)
    }
}

fn monetary_from_node(node: &XmlNode) -> Result<MonetaryValue> {
    let text = node.child_text("MonetaryValue").ok_or_else(|| {
        ShippingError::Xml(format!("<{}> has no MonetaryValue", node.name()))
    })?;
    Ok(text.parse()?)
}

// Freight charges declared on international forms
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FreightCharges {
    monetary_value: MonetaryValue,
}

impl FreightCharges {
    pub fn new(value: f64) -> std::result::Result<Self, ValidationError> {
        Ok(Self {
            monetary_value: MonetaryValue::new(value)?,
        })
    }

    pub fn monetary_value(&self) -> MonetaryValue {
        self.monetary_value
    }

    pub fn set_monetary_value(&mut self, value: f64) -> std::result::Result<&mut Self, ValidationError> {
        self.monetary_value = MonetaryValue::new(value)?;
        Ok(self)
    }
}

impl ToNode for FreightCharges {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("FreightCharges");
        node.push_text("MonetaryValue", self.monetary_value.to_string());
        node
    }
}

impl FromNode for FreightCharges {
    fn from_node(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            monetary_value: monetary_from_node(node)?,
        })
    }
}

/// Currency and amount pair. The element name depends on where it is used
/// (InsuredValue, CODAmount, TransportationCharges, ...).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Charges {
    currency_code: Option<String>,
    monetary_value: MonetaryValue,
}

impl Charges {
    pub fn new(currency_code: &str, value: f64) -> std::result::Result<Self, ValidationError> {
        Ok(Self {
            currency_code: Some(alpha_code("CurrencyCode", currency_code, 3)?),
            monetary_value: MonetaryValue::new(value)?,
        })
    }

    pub fn without_currency(value: f64) -> std::result::Result<Self, ValidationError> {
        Ok(Self {
            currency_code: None,
            monetary_value: MonetaryValue::new(value)?,
        })
    }

    pub fn currency_code(&self) -> Option<&str> {
        self.currency_code.as_deref()
    }

    pub fn monetary_value(&self) -> MonetaryValue {
        self.monetary_value
    }

    pub fn to_named_node(&self, name: &str) -> XmlNode {
        let mut node = XmlNode::new(name);
        node.push_opt_text("CurrencyCode", self.currency_code.as_deref())
            .push_text("MonetaryValue", self.monetary_value.to_string());
        node
    }
}

impl FromNode for Charges {
    fn from_node(node: &XmlNode) -> Result<Self> {
        Ok(Self {
            currency_code: node.child_text("CurrencyCode").map(str::to_string),
            monetary_value: monetary_from_node(node)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLineTotal(pub Charges);

impl InvoiceLineTotal {
    pub fn new(currency_code: &str, value: f64) -> std::result::Result<Self, ValidationError> {
        Ok(Self(Charges::new(currency_code, value)?))
    }
}

impl ToNode for InvoiceLineTotal {
    fn to_node(&self) -> XmlNode {
        self.0.to_named_node("InvoiceLineTotal")
    }
}
