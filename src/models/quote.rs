// Quote models: priced delivery options and the final selection

use serde::{Deserialize, Serialize};

use crate::models::{Eta, PharmacyOffer, Price};

/// One delivery option returned by the pricing service.
///
/// A pharmacy may yield several options (courier tiers), each priced and
/// estimated independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryOption {
    pub price: Price,

    /// Estimated delivery time in minutes
    pub eta: Eta,
}

impl DeliveryOption {
    /// Creates a new delivery option
    pub fn new(price: Price, eta: Eta) -> Self {
        Self { price, eta }
    }
}

/// A pharmacy offer combined with one delivery option
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub offer: PharmacyOffer,

    pub delivery_option: DeliveryOption,

    /// Basket total plus delivery price
    pub total_price: Price,
}

impl Quote {
    /// Combines an offer with one of its delivery options
    pub fn new(offer: PharmacyOffer, delivery_option: DeliveryOption) -> Self {
        let total_price = offer.total_sum + delivery_option.price;
        Self {
            offer,
            delivery_option,
            total_price,
        }
    }

    /// Estimated delivery time of this quote in minutes
    pub fn eta(&self) -> Eta {
        self.delivery_option.eta
    }
}

/// Final outcome of one resolution.
///
/// All four slots may be empty; that is the reportable "no viable
/// option" outcome, not an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionResult {
    pub cheapest_open: Option<Quote>,

    /// A closed pharmacy admitted under the discount margin, or an open
    /// stable fallback when the cheapest pick closes soon
    pub alternative_cheapest: Option<Quote>,

    pub fastest_open: Option<Quote>,

    pub alternative_fastest: Option<Quote>,
}

impl SelectionResult {
    /// Checks whether no viable option was found on either axis
    pub fn is_empty(&self) -> bool {
        self.cheapest_open.is_none()
            && self.alternative_cheapest.is_none()
            && self.fastest_open.is_none()
            && self.alternative_fastest.is_none()
    }
}
