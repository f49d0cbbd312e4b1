use crate::entity::{alpha_code, bounded};
use crate::error::{Result, ValidationError};
use crate::xml::{FromNode, ToNode, XmlNode};

const MAX_ADDRESS_LINES: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Address {
    address_lines: Vec<String>,
    city: Option<String>,
    state_province_code: Option<String>,
    postal_code: Option<String>,
    country_code: Option<String>,
    residential: bool,
}

impl Address {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_address_line(mut self, line: impl Into<String>) -> std::result::Result<Self, ValidationError> {
        if self.address_lines.len() == MAX_ADDRESS_LINES {
            return Err(ValidationError::Invalid {
                field: "AddressLine",
                reason: format!("at most {} address lines allowed", MAX_ADDRESS_LINES),
            });
        }
        self.address_lines.push(bounded("AddressLine", line, 35)?);
        Ok(self)
    }

    pub fn with_city(mut self, city: impl Into<String>) -> std::result::Result<Self, ValidationError> {
        self.city = Some(bounded("City", city, 30)?);
        Ok(self)
    }

    pub fn with_state_province_code(mut self, code: &str) -> std::result::Result<Self, ValidationError> {
        self.state_province_code = Some(bounded("StateProvinceCode", code.trim().to_ascii_uppercase(), 5)?);
        Ok(self)
    }

    pub fn with_postal_code(mut self, code: impl Into<String>) -> std::result::Result<Self, ValidationError> {
        self.postal_code = Some(bounded("PostalCode", code, 9)?);
        Ok(self)
    }

    pub fn with_country_code(mut self, code: &str) -> std::result::Result<Self, ValidationError> {
        self.country_code = Some(alpha_code("CountryCode", code, 2)?);
        Ok(self)
    }

    pub fn residential(mut self, residential: bool) -> Self {
        self.residential = residential;
        self
    }

    pub fn address_lines(&self) -> &[String] {
        &self.address_lines
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn state_province_code(&self) -> Option<&str> {
        self.state_province_code.as_deref()
    }

    pub fn postal_code(&self) -> Option<&str> {
        self.postal_code.as_deref()
    }

    pub fn country_code(&self) -> Option<&str> {
        self.country_code.as_deref()
    }

    pub fn is_residential(&self) -> bool {
        self.residential
    }
}

impl Address {
    // Only ShipTo carries the residential indicator
    pub(crate) fn to_ship_to_node(&self) -> XmlNode {
        let mut node = self.to_node();
        node.push_flag("ResidentialAddress", self.residential);
        node
    }
}

impl ToNode for Address {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("Address");
        for (index, line) in self.address_lines.iter().enumerate() {
            node.push_text(&format!("AddressLine{}", index + 1), line.as_str());
        }
        node.push_opt_text("City", self.city.as_deref())
            .push_opt_text("StateProvinceCode", self.state_province_code.as_deref())
            .push_opt_text("PostalCode", self.postal_code.as_deref())
            .push_opt_text("CountryCode", self.country_code.as_deref());
        node
    }
}

impl FromNode for Address {
    fn from_node(node: &XmlNode) -> Result<Self> {
        let text = |name: &str| node.child_text(name).map(str::to_string);
        Ok(Self {
            address_lines: (1..=MAX_ADDRESS_LINES)
                .filter_map(|i| text(&format!("AddressLine{}", i)))
                .collect(),
            city: text("City"),
            state_province_code: text("StateProvinceCode"),
            postal_code: text("PostalCode"),
            country_code: text("CountryCode"),
            residential: node.child("ResidentialAddress").is_some()
                || node.child("ResidentialAddressIndicator").is_some(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Address {
        Address::new()
            .with_address_line("1 Main Street")
            .unwrap()
            .with_address_line("Suite 200")
            .unwrap()
            .with_city("Atlanta")
            .unwrap()
            .with_state_province_code("ga")
            .unwrap()
            .with_postal_code("30301")
            .unwrap()
            .with_country_code("us")
            .unwrap()
    }

    #[test]
    fn test_address_node_order() {
        let node = sample().residential(true).to_ship_to_node();
        assert_eq!(
            node.child_names(),
            vec![
                "AddressLine1",
                "AddressLine2",
                "City",
                "StateProvinceCode",
                "PostalCode",
                "CountryCode",
                "ResidentialAddress"
            ]
        );
        assert_eq!(node.child_text("StateProvinceCode"), Some("GA"));
        assert_eq!(node.child_text("CountryCode"), Some("US"));
    }

    #[test]
    fn test_plain_address_omits_residential_flag() {
        let node = sample().residential(true).to_node();
        assert!(node.child("ResidentialAddress").is_none());
        assert_eq!(node.child_names().last(), Some(&"CountryCode"));
    }

    #[test]
    fn test_empty_address_has_no_children() {
        assert!(Address::new().to_node().children().is_empty());
    }

    #[test]
    fn test_address_line_limits() {
        let long_line = "x".repeat(36);
        assert!(Address::new().with_address_line(long_line).is_err());

        let full = sample().with_address_line("Floor 3").unwrap();
        assert!(full.with_address_line("Too many").is_err());
    }

    #[test]
    fn test_address_from_response() {
        let node = sample().residential(true).to_ship_to_node();
        let parsed = Address::from_node(&node).unwrap();
        assert_eq!(parsed, sample().residential(true));
    }
}
