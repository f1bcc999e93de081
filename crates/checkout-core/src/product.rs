//! # Product Catalog Types
//!
//! Catalog types for checkout-session-rs.
//! Products are loaded from `config/products.toml` at process start and
//! never mutated by the session engine.

use crate::error::{CheckoutError, CheckoutResult};
use serde::{Deserialize, Serialize};

/// Supported currencies (ISO 4217)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Currency {
    USD,
    EUR,
    GBP,
    JPY,
    CAD,
    AUD,
}

impl Currency {
    /// Returns the lowercase ISO 4217 currency code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::USD => "usd",
            Currency::EUR => "eur",
            Currency::GBP => "gbp",
            Currency::JPY => "jpy",
            Currency::CAD => "cad",
            Currency::AUD => "aud",
        }
    }

    /// Returns the number of decimal places for this currency
    /// (JPY has 0 decimals, the rest have 2)
    pub fn decimal_places(&self) -> u8 {
        match self {
            Currency::JPY => 0,
            _ => 2,
        }
    }
}

impl std::fmt::Display for Currency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str().to_uppercase())
    }
}

/// A product in the catalog.
///
/// Prices are stored in minor currency units (cents for USD).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique product identifier (e.g., "rose-bouquet")
    pub id: String,

    /// Display name
    pub name: String,

    /// Short description
    pub description: String,

    /// Unit price in minor currency units (non-negative)
    pub price: i64,

    /// Currency the product is priced in
    pub currency: Currency,

    /// Whether the product can currently be purchased
    #[serde(default = "default_true")]
    pub in_stock: bool,

    /// Optional image URL
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Create a new in-stock product
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        price: i64,
        currency: Currency,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            currency,
            in_stock: true,
            image_url: None,
        }
    }

    /// Builder: set description
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = desc.into();
        self
    }

    /// Builder: set image URL
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Builder: mark out of stock
    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }
}

/// Product catalog (loaded from config)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCatalog {
    pub products: Vec<Product>,
}

impl ProductCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self {
            products: Vec::new(),
        }
    }

    /// Add a product to the catalog
    pub fn add(&mut self, product: Product) {
        self.products.push(product);
    }

    /// Find a product by ID
    pub fn get(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Get all purchasable products
    pub fn in_stock_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.in_stock)
    }

    /// Load catalog from TOML string
    pub fn from_toml(toml_str: &str) -> CheckoutResult<Self> {
        toml::from_str(toml_str).map_err(|e| CheckoutError::Catalog(e.to_string()))
    }

    /// Seeded demo catalog, used when no `config/products.toml` is found
    pub fn demo() -> Self {
        Self {
            products: vec![
                Product::new("rose-bouquet", "Rose Bouquet", 2999, Currency::USD)
                    .with_description("A dozen fresh red roses")
                    .with_image("https://cdn.example.com/img/rose-bouquet.jpg"),
                Product::new("tulip-bundle", "Tulip Bundle", 1899, Currency::USD)
                    .with_description("Ten seasonal tulips, mixed colors")
                    .with_image("https://cdn.example.com/img/tulip-bundle.jpg"),
                Product::new("orchid-pot", "Potted Orchid", 4599, Currency::USD)
                    .with_description("Phalaenopsis orchid in a ceramic pot"),
                Product::new("succulent-trio", "Succulent Trio", 2499, Currency::USD)
                    .with_description("Three assorted succulents")
                    .out_of_stock(),
                Product::new("lavender-sachet", "Lavender Sachet", 899, Currency::EUR)
                    .with_description("Dried Provence lavender sachet"),
            ],
        }
    }
}
