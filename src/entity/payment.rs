use std::fmt;

use crate::entity::{alpha_code, Address};
use crate::error::ValidationError;
use crate::xml::{ToNode, XmlNode};

type Checked<T> = std::result::Result<T, ValidationError>;

#[derive(Clone, PartialEq, Eq)]
pub struct CreditCard {
    card_type: String,
    number: String,
    expiration_date: String,
    security_code: Option<String>,
    address: Option<Address>,
}

impl CreditCard {
    pub const AMERICAN_EXPRESS: &'static str = "01";
    pub const DISCOVER: &'static str = "03";
    pub const MASTERCARD: &'static str = "04";
    pub const VISA: &'static str = "06";

    /// `expiration_date` is `MMYYYY`.
    pub fn new(card_type: impl Into<String>, number: &str, expiration_date: &str) -> Checked<Self> {
        let number: String = number.chars().filter(|c| !c.is_whitespace()).collect();
        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ValidationError::Invalid {
                field: "Number",
                reason: "card number must contain only digits".to_string(),
            });
        }
        let month = expiration_date.get(..2).and_then(|m| m.parse::<u8>().ok());
        if expiration_date.len() != 6
            || !expiration_date.chars().all(|c| c.is_ascii_digit())
            || !matches!(month, Some(1..=12))
        {
            return Err(ValidationError::Invalid {
                field: "ExpirationDate",
                reason: format!("expected MMYYYY, got {:?}", expiration_date),
            });
        }
        Ok(Self {
            card_type: card_type.into(),
            number,
            expiration_date: expiration_date.to_string(),
            security_code: None,
            address: None,
        })
    }

    pub fn with_security_code(mut self, code: impl Into<String>) -> Self {
        self.security_code = Some(code.into());
        self
    }

    pub fn with_address(mut self, address: Address) -> Self {
        self.address = Some(address);
        self
    }
}

// Card numbers never end up in logs
impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last_four = &self.number[self.number.len().saturating_sub(4)..];
        f.debug_struct("CreditCard")
            .field("card_type", &self.card_type)
            .field("number", &format!("****{}", last_four))
            .field("expiration_date", &self.expiration_date)
            .field("address", &self.address)
            .finish()
    }
}

impl ToNode for CreditCard {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("CreditCard");
        node.push_text("Type", self.card_type.as_str())
            .push_text("Number", self.number.as_str())
            .push_text("ExpirationDate", self.expiration_date.as_str())
            .push_opt_text("SecurityCode", self.security_code.as_deref())
            .push_opt(self.address.as_ref());
        node
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillShipper {
    AccountNumber(String),
    CreditCard(CreditCard),
}

impl ToNode for BillShipper {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("BillShipper");
        match self {
            BillShipper::AccountNumber(account) => {
                node.push_text("AccountNumber", account.as_str());
            }
            BillShipper::CreditCard(card) => {
                node.push_node(card);
            }
        }
        node
    }
}

fn third_party_node(name: &str, account_number: &str, postal_code: Option<&str>, country_code: &str) -> XmlNode {
    let mut address = XmlNode::new("Address");
    address
        .push_opt_text("PostalCode", postal_code)
        .push_text("CountryCode", country_code);
    let mut third_party = XmlNode::new("ThirdParty");
    third_party.push(address);

    let mut shipper = XmlNode::new("BillThirdPartyShipper");
    shipper
        .push_text("AccountNumber", account_number)
        .push(third_party);
    let mut node = XmlNode::new(name);
    node.push(shipper);
    node
}

fn bill_receiver_node(account_number: &str, postal_code: Option<&str>) -> XmlNode {
    let mut node = XmlNode::new("BillReceiver");
    node.push_text("AccountNumber", account_number);
    if let Some(postal_code) = postal_code {
        let mut address = XmlNode::new("Address");
        address.push_text("PostalCode", postal_code);
        node.push(address);
    }
    node
}

/// Who pays for the shipment. Each variant carries the fields that payment
/// method requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentInformation {
    Prepaid(BillShipper),
    BillThirdParty {
        account_number: String,
        postal_code: Option<String>,
        country_code: String,
    },
    FreightCollect {
        account_number: String,
        postal_code: Option<String>,
    },
    ConsigneeBilled,
}

impl PaymentInformation {
    pub fn prepaid_account(account_number: impl Into<String>) -> Self {
        PaymentInformation::Prepaid(BillShipper::AccountNumber(account_number.into()))
    }

    pub fn prepaid_card(card: CreditCard) -> Self {
        PaymentInformation::Prepaid(BillShipper::CreditCard(card))
    }

    pub fn bill_third_party(
        account_number: impl Into<String>,
        postal_code: Option<String>,
        country_code: &str,
    ) -> Checked<Self> {
        Ok(PaymentInformation::BillThirdParty {
            account_number: account_number.into(),
            postal_code,
            country_code: alpha_code("CountryCode", country_code, 2)?,
        })
    }

    pub fn freight_collect(account_number: impl Into<String>, postal_code: Option<String>) -> Self {
        PaymentInformation::FreightCollect {
            account_number: account_number.into(),
            postal_code,
        }
    }
}

impl ToNode for PaymentInformation {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("PaymentInformation");
        match self {
            PaymentInformation::Prepaid(bill_shipper) => {
                let mut prepaid = XmlNode::new("Prepaid");
                prepaid.push_node(bill_shipper);
                node.push(prepaid);
            }
            PaymentInformation::BillThirdParty {
                account_number,
                postal_code,
                country_code,
            } => {
                node.push(third_party_node(
                    "BillThirdParty",
                    account_number,
                    postal_code.as_deref(),
                    country_code,
                ));
            }
            PaymentInformation::FreightCollect {
                account_number,
                postal_code,
            } => {
                let mut collect = XmlNode::new("FreightCollect");
                collect.push(bill_receiver_node(account_number, postal_code.as_deref()));
                node.push(collect);
            }
            PaymentInformation::ConsigneeBilled => {
                node.push(XmlNode::new("ConsigneeBilled"));
            }
        }
        node
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShipmentChargeType {
    Transportation,
    DutiesAndTaxes,
}

impl ShipmentChargeType {
    pub fn code(&self) -> &'static str {
        match self {
            ShipmentChargeType::Transportation => "01",
            ShipmentChargeType::DutiesAndTaxes => "02",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChargePayer {
    BillShipper(BillShipper),
    BillReceiver {
        account_number: String,
        postal_code: Option<String>,
    },
    BillThirdParty {
        account_number: String,
        postal_code: Option<String>,
        country_code: String,
    },
    ConsigneeBilled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentCharge {
    pub charge_type: ShipmentChargeType,
    pub payer: ChargePayer,
}

impl ShipmentCharge {
    pub fn new(charge_type: ShipmentChargeType, payer: ChargePayer) -> Self {
        Self { charge_type, payer }
    }
}

impl ToNode for ShipmentCharge {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("ShipmentCharge");
        node.push_text("Type", self.charge_type.code());
        match &self.payer {
            ChargePayer::BillShipper(bill_shipper) => {
                node.push_node(bill_shipper);
            }
            ChargePayer::BillReceiver {
                account_number,
                postal_code,
            } => {
                node.push(bill_receiver_node(account_number, postal_code.as_deref()));
            }
            ChargePayer::BillThirdParty {
                account_number,
                postal_code,
                country_code,
            } => {
                node.push(third_party_node(
                    "BillThirdParty",
                    account_number,
                    postal_code.as_deref(),
                    country_code,
                ));
            }
            ChargePayer::ConsigneeBilled => {
                node.push(XmlNode::new("ConsigneeBilled"));
            }
        }
        node
    }
}

// Splits transportation and duty charges between payers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemizedPaymentInformation {
    pub charges: Vec<ShipmentCharge>,
    pub split_duty_vat: bool,
}

impl ItemizedPaymentInformation {
    pub fn new(charges: Vec<ShipmentCharge>) -> Self {
        Self {
            charges,
            split_duty_vat: false,
        }
    }
}

impl ToNode for ItemizedPaymentInformation {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("ItemizedPaymentInformation");
        node.push_all(&self.charges)
            .push_flag("SplitDutyVATIndicator", self.split_duty_vat);
        node
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payment {
    Information(PaymentInformation),
    Itemized(ItemizedPaymentInformation),
}

impl From<PaymentInformation> for Payment {
    fn from(info: PaymentInformation) -> Self {
        Payment::Information(info)
    }
}

impl From<ItemizedPaymentInformation> for Payment {
    fn from(info: ItemizedPaymentInformation) -> Self {
        Payment::Itemized(info)
    }
}

impl ToNode for Payment {
    fn to_node(&self) -> XmlNode {
        match self {
            Payment::Information(info) => info.to_node(),
            Payment::Itemized(info) => info.to_node(),
        }
    }
}
