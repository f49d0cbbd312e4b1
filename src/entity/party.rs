use crate::entity::{bounded, Address};
use crate::error::ValidationError;
use crate::xml::{ToNode, XmlNode};

type Checked<T> = std::result::Result<T, ValidationError>;

fn shipper_number(value: &str) -> Checked<String> {
    let number = value.trim().to_ascii_uppercase();
    if number.len() != 6 || !number.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::Invalid {
            field: "ShipperNumber",
            reason: format!("expected 6 alphanumeric characters, got {:?}", value),
        });
    }
    Ok(number)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shipper {
    name: String,
    attention_name: Option<String>,
    company_displayable_name: Option<String>,
    shipper_number: String,
    tax_identification_number: Option<String>,
    phone_number: Option<String>,
    fax_number: Option<String>,
    email_address: Option<String>,
    address: Option<Address>,
}

impl Shipper {
    pub fn new(name: impl Into<String>, number: &str) -> Checked<Self> {
        Ok(Self {
            name: bounded("Name", name, 35)?,
            attention_name: None,
            company_displayable_name: None,
            shipper_number: shipper_number(number)?,
            tax_identification_number: None,
            phone_number: None,
            fax_number: None,
            email_address: None,
            address: None,
        })
    }

    pub fn with_attention_name(mut self, name: impl Into<String>) -> Checked<Self> {
        self.attention_name = Some(bounded("AttentionName", name, 35)?);
        Ok(self)
    }

    pub fn with_company_displayable_name(mut self, name: impl Into<String>) -> Checked<Self> {
        self.company_displayable_name = Some(bounded("CompanyDisplayableName", name, 35)?);
        Ok(self)
    }

    pub fn with_tax_identification_number(mut self, number: impl Into<String>) -> Checked<Self> {
        self.tax_identification_number = Some(bounded("TaxIdentificationNumber", number, 15)?);
        Ok(self)
    }

    pub fn with_phone_number(mut self, number: impl Into<String>) -> Checked<Self> {
        self.phone_number = Some(bounded("PhoneNumber", number, 15)?);
        Ok(self)
    }

    pub fn with_fax_number(mut self, number: impl Into<String>) -> Checked<Self> {
        self.fax_number = Some(bounded("FaxNumber", number, 15)?);
        Ok(self)
    }

    pub fn with_email_address(mut self, email: impl Into<String>) -> Checked<Self> {
        self.email_address = Some(bounded("EMailAddress", email, 50)?);
        Ok(self)
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn shipper_number(&self) -> &str {
        &self.shipper_number
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }
}

impl ToNode for Shipper {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("Shipper");
        node.push_text("Name", self.name.as_str())
            .push_opt_text("AttentionName", self.attention_name.as_deref())
            .push_opt_text("CompanyDisplayableName", self.company_displayable_name.as_deref())
            .push_text("ShipperNumber", self.shipper_number.as_str())
            .push_opt_text("TaxIdentificationNumber", self.tax_identification_number.as_deref())
            .push_opt_text("PhoneNumber", self.phone_number.as_deref())
            .push_opt_text("FaxNumber", self.fax_number.as_deref())
            .push_opt_text("EMailAddress", self.email_address.as_deref())
            .push_opt(self.address.as_ref());
        node
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShipTo {
    company_name: String,
    attention_name: Option<String>,
    phone_number: Option<String>,
    fax_number: Option<String>,
    email_address: Option<String>,
    address: Option<Address>,
    location_id: Option<String>,
}

impl ShipTo {
    pub fn new(company_name: impl Into<String>) -> Checked<Self> {
        Ok(Self {
            company_name: bounded("CompanyName", company_name, 35)?,
            attention_name: None,
            phone_number: None,
            fax_number: None,
            email_address: None,
            address: None,
            location_id: None,
        })
    }

    pub fn with_attention_name(mut self, name: impl Into<String>) -> Checked<Self> {
        self.attention_name = Some(bounded("AttentionName", name, 35)?);
        Ok(self)
    }

    pub fn with_phone_number(mut self, number: impl Into<String>) -> Checked<Self> {
        self.phone_number = Some(bounded("PhoneNumber", number, 15)?);
        Ok(self)
    }

    pub fn with_fax_number(mut self, number: impl Into<String>) -> Checked<Self> {
        self.fax_number = Some(bounded("FaxNumber", number, 15)?);
        Ok(self)
    }

    pub fn with_email_address(mut self, email: impl Into<String>) -> Checked<Self> {
        self.email_address = Some(bounded("EMailAddress", email, 50)?);
        Ok(self)
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }

    // Access point location the package is delivered to
    pub fn with_location_id(mut self, id: impl Into<String>) -> Checked<Self> {
        self.location_id = Some(bounded("LocationID", id, 10)?);
        Ok(self)
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }
}

impl ToNode for ShipTo {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("ShipTo");
        node.push_text("CompanyName", self.company_name.as_str())
            .push_opt_text("AttentionName", self.attention_name.as_deref())
            .push_opt_text("PhoneNumber", self.phone_number.as_deref())
            .push_opt_text("FaxNumber", self.fax_number.as_deref())
            .push_opt_text("EMailAddress", self.email_address.as_deref());
        if let Some(address) = &self.address {
            node.push(address.to_ship_to_node());
        }
        node.push_opt_text("LocationID", self.location_id.as_deref());
        node
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ShipFrom {
    company_name: String,
    attention_name: Option<String>,
    phone_number: Option<String>,
    fax_number: Option<String>,
    tax_identification_number: Option<String>,
    address: Option<Address>,
}

impl ShipFrom {
    pub fn new(company_name: impl Into<String>) -> Checked<Self> {
        Ok(Self {
            company_name: bounded("CompanyName", company_name, 35)?,
            attention_name: None,
            phone_number: None,
            fax_number: None,
            tax_identification_number: None,
            address: None,
        })
    }

    pub fn with_attention_name(mut self, name: impl Into<String>) -> Checked<Self> {
        self.attention_name = Some(bounded("AttentionName", name, 35)?);
        Ok(self)
    }

    pub fn with_phone_number(mut self, number: impl Into<String>) -> Checked<Self> {
        self.phone_number = Some(bounded("PhoneNumber", number, 15)?);
        Ok(self)
    }

    pub fn with_fax_number(mut self, number: impl Into<String>) -> Checked<Self> {
        self.fax_number = Some(bounded("FaxNumber", number, 15)?);
        Ok(self)
    }

    pub fn with_tax_identification_number(mut self, number: impl Into<String>) -> Checked<Self> {
        self.tax_identification_number = Some(bounded("TaxIdentificationNumber", number, 15)?);
        Ok(self)
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }
}

impl ToNode for ShipFrom {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("ShipFrom");
        node.push_text("CompanyName", self.company_name.as_str())
            .push_opt_text("AttentionName", self.attention_name.as_deref())
            .push_opt_text("PhoneNumber", self.phone_number.as_deref())
            .push_opt_text("FaxNumber", self.fax_number.as_deref())
            .push_opt_text("TaxIdentificationNumber", self.tax_identification_number.as_deref())
            .push_opt(self.address.as_ref());
        node
    }
}

// Buyer of the goods, used on international invoices
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SoldTo {
    option: Option<String>,
    company_name: Option<String>,
    attention_name: Option<String>,
    phone_number: Option<String>,
    fax_number: Option<String>,
    address: Option<Address>,
}

impl SoldTo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_option(mut self, option: impl Into<String>) -> Self {
        self.option = Some(option.into());
        self
    }

    pub fn with_company_name(mut self, name: impl Into<String>) -> Checked<Self> {
        self.company_name = Some(bounded("CompanyName", name, 35)?);
        Ok(self)
    }

    pub fn with_attention_name(mut self, name: impl Into<String>) -> Checked<Self> {
        self.attention_name = Some(bounded("AttentionName", name, 35)?);
        Ok(self)
    }

    pub fn with_phone_number(mut self, number: impl Into<String>) -> Checked<Self> {
        self.phone_number = Some(bounded("PhoneNumber", number, 15)?);
        Ok(self)
    }

    pub fn with_fax_number(mut self, number: impl Into<String>) -> Checked<Self> {
        self.fax_number = Some(bounded("FaxNumber", number, 15)?);
        Ok(self)
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }
}

impl ToNode for SoldTo {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("SoldTo");
        node.push_opt_text("Option", self.option.as_deref())
            .push_opt_text("CompanyName", self.company_name.as_deref())
            .push_opt_text("AttentionName", self.attention_name.as_deref())
            .push_opt_text("PhoneNumber", self.phone_number.as_deref())
            .push_opt_text("FaxNumber", self.fax_number.as_deref())
            .push_opt(self.address.as_ref());
        node
    }
}
