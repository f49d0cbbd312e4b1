use crate::entity::{
    bounded, Address, Cod, DeliveryConfirmation, InternationalForms, InvoiceLineTotal, Package,
    Payment, ReferenceNumber, ReturnService, Service, ShipFrom, ShipTo, Shipper, SoldTo,
};
use crate::error::ValidationError;
use crate::xml::{ToNode, XmlNode};

type Checked<T> = std::result::Result<T, ValidationError>;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Notification {
    pub code: String,
    pub email_addresses: Vec<String>,
    pub undeliverable_email_address: Option<String>,
    pub from_email_address: Option<String>,
    pub from_name: Option<String>,
    pub memo: Option<String>,
}

impl Notification {
    pub const QV_SHIP: &'static str = "6";
    pub const QV_EXCEPTION: &'static str = "7";
    pub const QV_DELIVERY: &'static str = "8";

    pub fn new(code: impl Into<String>, email_address: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            email_addresses: vec![email_address.into()],
            ..Default::default()
        }
    }
}

impl ToNode for Notification {
    fn to_node(&self) -> XmlNode {
        let mut message = XmlNode::new("EMailMessage");
        for address in &self.email_addresses {
            message.push_text("EMailAddress", address.as_str());
        }
        message
            .push_opt_text("UndeliverableEMailAddress", self.undeliverable_email_address.as_deref())
            .push_opt_text("FromEMailAddress", self.from_email_address.as_deref())
            .push_opt_text("FromName", self.from_name.as_deref())
            .push_opt_text("Memo", self.memo.as_deref());

        let mut node = XmlNode::new("Notification");
        node.push_text("NotificationCode", self.code.as_str())
            .push(message);
        node
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipmentServiceOptions {
    pub saturday_pickup: bool,
    pub saturday_delivery: bool,
    pub cod: Option<Cod>,
    pub notifications: Vec<Notification>,
    pub delivery_confirmation: Option<DeliveryConfirmation>,
    pub international_forms: Option<InternationalForms>,
}

impl ToNode for ShipmentServiceOptions {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("ShipmentServiceOptions");
        node.push_flag("SaturdayPickupIndicator", self.saturday_pickup)
            .push_flag("SaturdayDeliveryIndicator", self.saturday_delivery)
            .push_opt(self.cod.as_ref())
            .push_all(&self.notifications)
            .push_opt(self.delivery_confirmation.as_ref())
            .push_opt(self.international_forms.as_ref());
        node
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShipmentIndicationType {
    pub code: String,
    pub description: Option<String>,
}

impl ShipmentIndicationType {
    pub const HOLD_FOR_PICKUP: &'static str = "01";
    pub const ACCESS_POINT_DELIVERY: &'static str = "02";

    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            description: None,
        }
    }
}

impl ToNode for ShipmentIndicationType {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("ShipmentIndicationType");
        node.push_text("Code", self.code.as_str())
            .push_opt_text("Description", self.description.as_deref());
        node
    }
}

// Access point address used with ShipmentIndicationType 01/02
#[derive(Debug, Clone, PartialEq)]
pub struct AlternateDeliveryAddress {
    name: String,
    attention_name: Option<String>,
    address: Address,
}

impl AlternateDeliveryAddress {
    pub fn new(name: impl Into<String>, address: Address) -> Checked<Self> {
        Ok(Self {
            name: bounded("Name", name, 35)?,
            attention_name: None,
            address,
        })
    }

    pub fn with_attention_name(mut self, name: impl Into<String>) -> Checked<Self> {
        self.attention_name = Some(bounded("AttentionName", name, 35)?);
        Ok(self)
    }
}

impl ToNode for AlternateDeliveryAddress {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("AlternateDeliveryAddress");
        node.push_text("Name", self.name.as_str())
            .push_opt_text("AttentionName", self.attention_name.as_deref())
            .push_node(&self.address);
        node
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RateInformation {
    pub negotiated_rates: bool,
}

impl ToNode for RateInformation {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("RateInformation");
        node.push_flag("NegotiatedRatesIndicator", self.negotiated_rates);
        node
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shipment {
    description: Option<String>,
    return_service: Option<ReturnService>,
    documents_only: bool,
    shipper: Shipper,
    ship_to: ShipTo,
    ship_from: Option<ShipFrom>,
    sold_to: Option<SoldTo>,
    alternate_delivery_address: Option<AlternateDeliveryAddress>,
    shipment_indication_type: Option<ShipmentIndicationType>,
    payment: Option<Payment>,
    goods_not_in_free_circulation: bool,
    movement_reference_number: Option<String>,
    service: Service,
    invoice_line_total: Option<InvoiceLineTotal>,
    num_of_pieces: Option<u32>,
    rate_information: Option<RateInformation>,
    packages: Vec<Package>,
    service_options: Option<ShipmentServiceOptions>,
    reference_numbers: Vec<ReferenceNumber>,
}

impl Shipment {
    pub fn new(shipper: Shipper, ship_to: ShipTo, service: Service) -> Self {
        Self {
            description: None,
            return_service: None,
            documents_only: false,
            shipper,
            ship_to,
            ship_from: None,
            sold_to: None,
            alternate_delivery_address: None,
            shipment_indication_type: None,
            payment: None,
            goods_not_in_free_circulation: false,
            movement_reference_number: None,
            service,
            invoice_line_total: None,
            num_of_pieces: None,
            rate_information: None,
            packages: Vec::new(),
            service_options: None,
            reference_numbers: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Checked<Self> {
        self.description = Some(bounded("Description", description, 50)?);
        Ok(self)
    }

    pub fn with_return_service(mut self, return_service: ReturnService) -> Self {
        self.return_service = Some(return_service);
        self
    }

    pub fn documents_only(mut self, documents_only: bool) -> Self {
        self.documents_only = documents_only;
        self
    }

    pub fn with_ship_from(mut self, ship_from: ShipFrom) -> Self {
        self.ship_from = Some(ship_from);
        self
    }

    pub fn with_sold_to(mut self, sold_to: SoldTo) -> Self {
        self.sold_to = Some(sold_to);
        self
    }

    pub fn with_alternate_delivery_address(mut self, address: AlternateDeliveryAddress) -> Self {
        self.alternate_delivery_address = Some(address);
        self
    }

    pub fn with_shipment_indication_type(mut self, indication: ShipmentIndicationType) -> Self {
        self.shipment_indication_type = Some(indication);
        self
    }

    pub fn with_payment(mut self, payment: impl Into<Payment>) -> Self {
        self.payment = Some(payment.into());
        self
    }

    pub fn goods_not_in_free_circulation(mut self, flag: bool) -> Self {
        self.goods_not_in_free_circulation = flag;
        self
    }

    pub fn with_movement_reference_number(mut self, number: impl Into<String>) -> Self {
        self.movement_reference_number = Some(number.into());
        self
    }

    pub fn with_invoice_line_total(mut self, total: InvoiceLineTotal) -> Self {
        self.invoice_line_total = Some(total);
        self
    }

    pub fn with_num_of_pieces(mut self, pieces: u32) -> Self {
        self.num_of_pieces = Some(pieces);
        self
    }

    pub fn with_rate_information(mut self, rate_information: RateInformation) -> Self {
        self.rate_information = Some(rate_information);
        self
    }

    pub fn with_package(mut self, package: Package) -> Self {
        self.packages.push(package);
        self
    }

    pub fn with_service_options(mut self, options: ShipmentServiceOptions) -> Self {
        self.service_options = Some(options);
        self
    }

    pub fn with_reference_number(mut self, reference: ReferenceNumber) -> Checked<Self> {
        if self.reference_numbers.len() == 2 {
            return Err(ValidationError::Invalid {
                field: "ReferenceNumber",
                reason: "a shipment takes at most two reference numbers".to_string(),
            });
        }
        self.reference_numbers.push(reference);
        Ok(self)
    }

    pub fn shipper(&self) -> &Shipper {
        &self.shipper
    }

    pub fn ship_to(&self) -> &ShipTo {
        &self.ship_to
    }

    pub fn service(&self) -> &Service {
        &self.service
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn payment(&self) -> Option<&Payment> {
        self.payment.as_ref()
    }
}

impl ToNode for Shipment {
    fn to_node(&self) -> XmlNode {
        let mut node = XmlNode::new("Shipment");
        node.push_opt_text("Description", self.description.as_deref())
            .push_opt(self.return_service.as_ref())
            .push_flag("DocumentsOnly", self.documents_only)
            .push_node(&self.shipper)
            .push_node(&self.ship_to)
            .push_opt(self.ship_from.as_ref())
            .push_opt(self.sold_to.as_ref())
            .push_opt(self.alternate_delivery_address.as_ref())
            .push_opt(self.shipment_indication_type.as_ref())
            .push_opt(self.payment.as_ref())
            .push_flag("GoodsNotInFreeCirculationIndicator", self.goods_not_in_free_circulation)
            .push_opt_text("MovementReferenceNumber", self.movement_reference_number.as_deref())
            .push_node(&self.service)
            .push_opt(self.invoice_line_total.as_ref())
            .push_opt_text("NumOfPiecesInShipment", self.num_of_pieces.map(|n| n.to_string()))
            .push_opt(self.rate_information.as_ref())
            .push_all(&self.packages)
            .push_opt(self.service_options.as_ref())
            .push_all(&self.reference_numbers);
        node
    }
}
