use chrono::NaiveDate;

use crate::entity::{alpha_code, bounded, FreightCharges, MonetaryValue, UnitOfMeasurement};
use crate::error::ValidationError;
use crate::xml::{ToNode, XmlNode};

type Checked<T> = std::result::Result<T, ValidationError>;

#[derive(Debug, Clone, PartialEq)]
pub struct ProductUnit {
    pub number: u32,
    pub value: MonetaryValue,
    pub unit_of_measurement: UnitOfMeasurement,
}

impl ToNode for ProductUnit {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("Unit");
        node.push_text("Number", self.number.to_string())
            .push_text("Value", self.value.to_string())
            .push_node(&self.unit_of_measurement);
        node
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    descriptions: Vec<String>,
    unit: ProductUnit,
    commodity_code: Option<String>,
    origin_country_code: Option<String>,
}

impl Product {
    pub fn new(description: impl Into<String>, unit: ProductUnit) -> Checked<Self> {
        Ok(Self {
            descriptions: vec![bounded("Description", description, 35)?],
            unit,
            commodity_code: None,
            origin_country_code: None,
        })
    }

    // The vendor accepts up to three description lines
    pub fn with_description_line(mut self, description: impl Into<String>) -> Checked<Self> {
        if self.descriptions.len() == 3 {
            return Err(ValidationError::Invalid {
                field: "Description",
                reason: "a product takes at most three description lines".to_string(),
            });
        }
        self.descriptions.push(bounded("Description", description, 35)?);
        Ok(self)
    }

    pub fn with_commodity_code(mut self, code: impl Into<String>) -> Self {
        self.commodity_code = Some(code.into());
        self
    }

    pub fn with_origin_country_code(mut self, code: &str) -> Checked<Self> {
        self.origin_country_code = Some(alpha_code("OriginCountryCode", code, 2)?);
        Ok(self)
    }
}

impl ToNode for Product {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("Product");
        for description in &self.descriptions {
            node.push_text("Description", description.as_str());
        }
        node.push_node(&self.unit)
            .push_opt_text("CommodityCode", self.commodity_code.as_deref())
            .push_opt_text("OriginCountryCode", self.origin_country_code.as_deref());
        node
    }
}

/// Customs paperwork attached to international shipments.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InternationalForms {
    pub form_types: Vec<String>,
    pub products: Vec<Product>,
    pub invoice_number: Option<String>,
    pub invoice_date: Option<NaiveDate>,
    pub purchase_order_number: Option<String>,
    pub terms_of_shipment: Option<String>,
    pub reason_for_export: Option<String>,
    pub comments: Option<String>,
    pub declaration_statement: Option<String>,
    pub discount: Option<MonetaryValue>,
    pub freight_charges: Option<FreightCharges>,
    pub insurance_charges: Option<MonetaryValue>,
    currency_code: Option<String>,
}

impl InternationalForms {
    pub const INVOICE: &'static str = "01";
    pub const CERTIFICATE_OF_ORIGIN: &'static str = "03";
    pub const PARTIAL_INVOICE: &'static str = "09";

    pub fn new(form_type: impl Into<String>) -> Self {
        Self {
            form_types: vec![form_type.into()],
            ..Default::default()
        }
    }

    pub fn with_currency_code(mut self, code: &str) -> Checked<Self> {
        self.currency_code = Some(alpha_code("CurrencyCode", code, 3)?);
        Ok(self)
    }

    pub fn currency_code(&self) -> Option<&str> {
        self.currency_code.as_deref()
    }
}

fn monetary_node(name: &str, value: &MonetaryValue) -> XmlNode {
    let mut node = XmlNode::new(name);
    node.push_text("MonetaryValue", value.to_string());
    node
}

impl ToNode for InternationalForms {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("InternationalForms");
        for form_type in &self.form_types {
            node.push_text("FormType", form_type.as_str());
        }
        node.push_all(&self.products)
            .push_opt_text("InvoiceNumber", self.invoice_number.as_deref())
            .push_opt_text(
                "InvoiceDate",
                self.invoice_date.map(|d| d.format("%Y%m%d").to_string()),
            )
            .push_opt_text("PurchaseOrderNumber", self.purchase_order_number.as_deref())
            .push_opt_text("TermsOfShipment", self.terms_of_shipment.as_deref())
            .push_opt_text("ReasonForExport", self.reason_for_export.as_deref())
            .push_opt_text("Comments", self.comments.as_deref())
            .push_opt_text("DeclarationStatement", self.declaration_statement.as_deref());
        if let Some(discount) = &self.discount {
            node.push(monetary_node("Discount", discount));
        }
        node.push_opt(self.freight_charges.as_ref());
        if let Some(insurance) = &self.insurance_charges {
            node.push(monetary_node("InsuranceCharges", insurance));
        }
        node.push_opt_text("CurrencyCode", self.currency_code.as_deref());
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Product {
        Product::new(
            "Paperback books",
            ProductUnit {
                number: 3,
                value: MonetaryValue::new(12.0).unwrap(),
                unit_of_measurement: UnitOfMeasurement::new("pcs"),
            },
        )
        .unwrap()
    }

    #[test]
    fn test_minimal_forms() {
        let node = InternationalForms::new(InternationalForms::INVOICE).to_node();
        assert_eq!(node.child_names(), vec!["FormType"]);
        assert_eq!(node.child_text("FormType"), Some("01"));
    }

    #[test]
    fn test_forms_order_and_formatting() {
        let mut forms = InternationalForms::new(InternationalForms::INVOICE)
            .with_currency_code("usd")
            .unwrap();
        forms.products.push(product().with_origin_country_code("us").unwrap());
        forms.invoice_number = Some("INV-7".to_string());
        forms.invoice_date = NaiveDate::from_ymd_opt(2024, 3, 9);
        forms.reason_for_export = Some("SALE".to_string());
        forms.freight_charges = Some(FreightCharges::new(15.0).unwrap());
        forms.discount = Some(MonetaryValue::new(2.5).unwrap());

        let node = forms.to_node();
        assert_eq!(
            node.child_names(),
            vec![
                "FormType",
                "Product",
                "InvoiceNumber",
                "InvoiceDate",
                "ReasonForExport",
                "Discount",
                "FreightCharges",
                "CurrencyCode"
            ]
        );
        assert_eq!(node.child_text("InvoiceDate"), Some("20240309"));
        assert_eq!(node.find_text("FreightCharges/MonetaryValue"), Some("15"));
        assert_eq!(node.find_text("Product/Unit/UnitOfMeasurement/Code"), Some("PCS"));
        assert_eq!(node.find_text("Product/OriginCountryCode"), Some("US"));
    }

    #[test]
    fn test_product_description_lines() {
        let product = product()
            .with_description_line("Second line")
            .unwrap()
            .with_description_line("Third line")
            .unwrap();
        assert_eq!(product.to_node().children_named("Description").count(), 3);
        assert!(product.with_description_line("Fourth").is_err());
    }
}
