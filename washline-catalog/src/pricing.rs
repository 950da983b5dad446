use crate::garment::ClothQuantity;
use crate::service::Service;

#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    #[error("service {service} has no price for garment kind {garment}")]
    UnpricedGarment { service: String, garment: String },

    #[error("quote for service {service} exceeds the representable total")]
    QuoteOverflow { service: String },
}

/// Quote the total cost of an order: sum of quantity times unit price over
/// all garment kinds. Called once at order creation; the result is copied
/// into the order and never recomputed.
///
/// A kind with a non-zero quantity but no catalog price is an error, never
/// priced at zero. Quantities come straight off the wire, so the sum is
/// accumulated in `i64` with checked arithmetic and a total that does not
/// fit the order's `i32` cost field is an error rather than a wrapped value.
pub fn quote(service: &Service, clothes: &ClothQuantity) -> Result<i32, PricingError> {
    let overflow = || PricingError::QuoteOverflow { service: service.name.clone() };

    let mut total = 0i64;
    for (kind, qty) in clothes.iter() {
        if qty == 0 {
            continue;
        }
        let unit = service
            .price_of(kind)
            .ok_or_else(|| PricingError::UnpricedGarment {
                service: service.name.clone(),
                garment: kind.label().to_string(),
            })?;
        let line = i64::from(unit).checked_mul(i64::from(qty)).ok_or_else(overflow)?;
        total = total.checked_add(line).ok_or_else(overflow)?;
    }
    i32::try_from(total).map_err(|_| overflow())
}
