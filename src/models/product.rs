// Product models: raw stock entries from the inventory search and the
// resolved line items built from them

use serde::{Deserialize, Serialize};

use crate::models::Price;

/// A product as reported by the inventory search for one pharmacy,
/// possibly carrying substitute products (analogs) for the same SKU.
///
/// Analogs are considered one level deep only; an analog's own `analogs`
/// list is never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockProduct {
    pub sku: String,

    #[serde(default)]
    pub name: String,

    pub base_price: Price,

    /// Units the pharmacy has in stock
    pub quantity: u32,

    #[serde(default)]
    pub analogs: Vec<StockProduct>,
}

impl StockProduct {
    /// Creates a product without analogs
    pub fn new<S: Into<String>>(sku: S, name: S, base_price: Price, quantity: u32) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            base_price,
            quantity,
            analogs: Vec::new(),
        }
    }

    /// Attaches substitute products
    pub fn with_analogs(mut self, analogs: Vec<StockProduct>) -> Self {
        self.analogs = analogs;
        self
    }

    /// Checks whether own stock covers the desired count
    pub fn covers(&self, count_desired: u32) -> bool {
        self.quantity >= count_desired
    }

    /// Cheapest analog whose stock covers the desired count.
    ///
    /// Ties on price keep the first analog in input order; analogs with
    /// insufficient stock are never considered, however cheap.
    pub fn cheapest_sufficient_analog(&self, count_desired: u32) -> Option<&StockProduct> {
        let mut best: Option<&StockProduct> = None;

        for analog in &self.analogs {
            if analog.quantity < count_desired {
                continue;
            }
            match best {
                Some(current) if analog.base_price >= current.base_price => {}
                _ => best = Some(analog),
            }
        }

        best
    }
}

/// Where a resolved line came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineSource {
    /// The requested product itself
    Original,

    /// A substitute chosen because the original stock was insufficient
    Substitute { original_sku: String },
}

/// One request line resolved against a single pharmacy's stock
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    /// SKU that will actually be purchased (the substitute's when replaced)
    pub sku: String,

    pub name: String,

    pub unit_price: Price,

    /// Stock the pharmacy reported for the chosen product
    pub stock: u32,

    /// Units the customer asked for on this line
    pub quantity_desired: u32,

    pub source: LineSource,
}

impl LineItem {
    /// Resolves a line with the requested product itself
    pub fn original(product: &StockProduct, quantity_desired: u32) -> Self {
        Self {
            sku: product.sku.clone(),
            name: product.name.clone(),
            unit_price: product.base_price,
            stock: product.quantity,
            quantity_desired,
            source: LineSource::Original,
        }
    }

    /// Resolves a line with a substitute for the given original SKU
    pub fn substitute(analog: &StockProduct, original_sku: &str, quantity_desired: u32) -> Self {
        Self {
            sku: analog.sku.clone(),
            name: analog.name.clone(),
            unit_price: analog.base_price,
            stock: analog.quantity,
            quantity_desired,
            source: LineSource::Substitute {
                original_sku: original_sku.to_string(),
            },
        }
    }

    /// Price of this line at the desired count
    pub fn line_total(&self) -> Price {
        self.unit_price * f64::from(self.quantity_desired)
    }

    /// Checks whether this line was resolved through a substitute
    pub fn is_substitute(&self) -> bool {
        matches!(self.source, LineSource::Substitute { .. })
    }
}
