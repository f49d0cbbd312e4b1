// Typed request entities. Each one renders itself as a vendor element via `ToNode`,
// with children in the vendor's order and unset optional children left out.
pub mod address;
pub mod international;
pub mod label;
pub mod money;
pub mod package;
pub mod party;
pub mod payment;
pub mod reference;
pub mod service;
pub mod shipment;

pub use address::Address;
pub use international::{InternationalForms, Product, ProductUnit};
pub use label::{
    ImageFormat, LabelDelivery, LabelPrintMethod, LabelRecoverySpecification, LabelSpecification,
    LabelStockSize, ReceiptSpecification, Translate,
};
pub use money::{Charges, FreightCharges, InvoiceLineTotal, MonetaryValue};
pub use package::{
    Cod, DeliveryConfirmation, Dimensions, Package, PackageServiceOptions, PackageWeight,
    PackagingType, UnitOfMeasurement,
};
pub use party::{ShipFrom, ShipTo, Shipper, SoldTo};
pub use payment::{
    BillShipper, ChargePayer, CreditCard, ItemizedPaymentInformation, Payment,
    PaymentInformation, ShipmentCharge, ShipmentChargeType,
};
pub use reference::ReferenceNumber;
pub use service::{ReturnService, Service};
pub use shipment::{
    AlternateDeliveryAddress, Notification, RateInformation, Shipment, ShipmentIndicationType,
    ShipmentServiceOptions,
};

use crate::error::ValidationError;

pub(crate) fn bounded(
    field: &'static str,
    value: impl Into<String>,
    max: usize,
) -> Result<String, ValidationError> {
    let value = value.into();
    let len = value.chars().count();
    if len > max {
        return Err(ValidationError::TooLong { field, len, max });
    }
    Ok(value)
}

// Fixed-length alphabetic codes (country, currency), uppercased
pub(crate) fn alpha_code(
    field: &'static str,
    value: &str,
    len: usize,
) -> Result<String, ValidationError> {
    let code = value.trim().to_ascii_uppercase();
    if code.len() != len || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(ValidationError::Invalid {
            field,
            reason: format!("expected {} letters, got {:?}", len, value),
        });
    }
    Ok(code)
}

// Half away from zero on the shortest decimal form of `value`, so 1.005 becomes 1.01
pub(crate) fn round_decimal(value: f64, decimals: u32) -> f64 {
    let repr = value.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let places = decimals as usize;
    if frac_part.len() <= places {
        return value;
    }

    let kept = format!("{}{}", int_part, &frac_part[..places]);
    let mut scaled: u128 = match kept.parse() {
        Ok(scaled) => scaled,
        Err(_) => return value,
    };
    if frac_part.as_bytes()[places] >= b'5' {
        scaled += 1;
    }
    let rounded = scaled as f64 / 10f64.powi(decimals as i32);
    if value.is_sign_negative() {
        -rounded
    } else {
        rounded
    }
}

pub(crate) fn positive(field: &'static str, value: f64, decimals: u32) -> Result<f64, ValidationError> {
    let rounded = if value.is_finite() {
        round_decimal(value, decimals)
    } else {
        value
    };
    if !rounded.is_finite() || rounded <= 0.0 {
        return Err(ValidationError::Invalid {
            field,
            reason: format!("expected a positive number, got {}", value),
        });
    }
    Ok(rounded)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_bounded_counts_characters() {
        assert_eq!(bounded("Name", "Zoë", 3).unwrap(), "Zoë");
        assert_eq!(
            bounded("Name", "abcd", 3),
            Err(ValidationError::TooLong {
                field: "Name",
                len: 4,
                max: 3
            })
        );
    }

    #[test_case("us", 2, Some("US"); "#1 lowercase country")]
    #[test_case(" gb ", 2, Some("GB"); "#2 padded country")]
    #[test_case("usd", 3, Some("USD"); "#3 currency")]
    #[test_case("U1", 2, None; "#4 digit")]
    #[test_case("USA", 2, None; "#5 too long")]
    fn test_alpha_code(input: &str, len: usize, expected: Option<&str>) {
        let result = alpha_code("Code", input, len);
        assert_eq!(result.ok().as_deref(), expected);
    }

    #[test]
    fn test_positive_rounds() {
        assert_eq!(positive("Weight", 2.345, 1).unwrap(), 2.3);
        assert_eq!(positive("Weight", 2.35, 1).unwrap(), 2.4);
        assert!(positive("Weight", 0.0, 1).is_err());
        assert!(positive("Weight", f64::NAN, 1).is_err());
    }

    #[test_case(0.04, 1; "#1 weight rounding to zero")]
    #[test_case(0.004, 2; "#2 dimension rounding to zero")]
    #[test_case(-1.0, 2; "#3 negative")]
    fn test_positive_rejects_values_rounding_to_zero(value: f64, decimals: u32) {
        assert!(positive("Weight", value, decimals).is_err());
    }

    #[test_case(1.005, 1.01; "#1 half up")]
    #[test_case(1.015, 1.02; "#2 half up neighbour")]
    #[test_case(2.675, 2.68; "#3 binary below half")]
    #[test_case(0.125, 0.13; "#4 exact half")]
    #[test_case(-1.005, -1.01; "#5 negative away from zero")]
    #[test_case(1.004, 1.0; "#6 down")]
    #[test_case(12.5, 12.5; "#7 already short")]
    fn test_round_decimal_half_away_from_zero(value: f64, expected: f64) {
        assert_eq!(round_decimal(value, 2), expected);
    }
}
