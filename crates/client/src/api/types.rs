//! Typed records for the StyleHub API boundary.
//!
//! The API is a MongoDB-backed JSON service: field names are camelCase,
//! entity ids live under `_id`, and references arrive either as bare id
//! strings or as populated objects depending on the endpoint. These types
//! pin that shape down at the boundary so the rest of the client never
//! touches raw JSON.
//!
//! Unknown fields on the user record are preserved through a flattened map:
//! the record is persisted to the session file and sent back to the API, so
//! it must round-trip without loss even when the API grows new fields.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use stylehub_core::{Email, Price, ProductId, UserId};

// =============================================================================
// User Types
// =============================================================================

/// The profile record the API returns at login/registration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserRecord {
    /// User id.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: Email,
    /// Shop name. Present for sellers only.
    #[serde(rename = "shopName", default, skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    /// Server-side cart snapshot embedded in the record. Present for
    /// customers; the cart endpoints are the authoritative way to read it.
    #[serde(
        rename = "cartDetails",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub cart_details: Option<Vec<CartLine>>,
    /// Any further fields the API owns. Preserved verbatim so the record
    /// survives persist-and-resend cycles.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A user reference: a bare id on writes, a populated summary on some reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserRef {
    /// Just the id.
    Id(UserId),
    /// A populated profile summary.
    Profile(UserSummary),
}

/// The subset of a user profile the API embeds into other records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    /// User id.
    #[serde(rename = "_id")]
    pub id: UserId,
    /// Display name, when populated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Shop name, when the reference is a seller.
    #[serde(rename = "shopName", default, skip_serializing_if = "Option::is_none")]
    pub shop_name: Option<String>,
    /// Remaining populated fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl UserRef {
    /// The referenced user id.
    #[must_use]
    pub const fn id(&self) -> &UserId {
        match self {
            Self::Id(id) => id,
            Self::Profile(summary) => &summary.id,
        }
    }

    /// A human-readable name, when the reference is populated.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        match self {
            Self::Id(_) => None,
            Self::Profile(summary) => summary
                .shop_name
                .as_deref()
                .or(summary.name.as_deref()),
        }
    }
}

// =============================================================================
// Product Types
// =============================================================================

/// A customer review embedded in a product record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// Review id, when the API assigns one.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Star rating.
    pub rating: u8,
    /// Free-text comment.
    pub comment: String,
    /// The reviewing customer.
    pub reviewer: UserRef,
    /// When the review was left.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

/// A product listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product id.
    #[serde(rename = "_id")]
    pub id: ProductId,
    /// Listing title.
    #[serde(rename = "productName")]
    pub product_name: String,
    /// Image URL.
    #[serde(rename = "productImage")]
    pub product_image: String,
    /// Top-level category.
    pub category: String,
    /// Second-level category.
    #[serde(default)]
    pub subcategory: String,
    /// Listing description.
    #[serde(default)]
    pub description: String,
    /// Units in stock.
    #[serde(default)]
    pub quantity: i64,
    /// List and selling price.
    pub price: Price,
    /// The seller who listed the product.
    pub seller: UserRef,
    /// Reviews, populated on the detail endpoint.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reviews: Vec<Review>,
    /// Average rating, computed server-side on the detail endpoint.
    #[serde(
        rename = "averageRating",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub average_rating: Option<f64>,
}

/// Input for creating a product listing.
#[derive(Debug, Clone, Serialize)]
pub struct NewProduct {
    /// Listing title.
    #[serde(rename = "productName")]
    pub product_name: String,
    /// Image URL.
    #[serde(rename = "productImage")]
    pub product_image: String,
    /// Top-level category.
    pub category: String,
    /// Second-level category.
    pub subcategory: String,
    /// Listing description.
    pub description: String,
    /// Units in stock.
    pub quantity: i64,
    /// List and selling price.
    pub price: Price,
}

/// Input for submitting a review.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewInput {
    /// Star rating.
    pub rating: u8,
    /// Free-text comment.
    pub comment: String,
    /// The reviewing customer's id.
    pub reviewer: UserId,
}

// =============================================================================
// Cart Types
// =============================================================================

/// A line item in the cart.
///
/// The API denormalizes product display fields into the line; writes only
/// need the product reference and quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    /// The referenced product.
    #[serde(rename = "productId", alias = "_id")]
    pub product: ProductId,
    /// Units of the product. Always at least 1.
    #[serde(deserialize_with = "quantity_at_least_one")]
    pub quantity: u32,
    /// Unit price at the time the line was added.
    #[serde(default)]
    pub price: Price,
    /// Denormalized listing title.
    #[serde(
        rename = "productName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub product_name: Option<String>,
    /// Denormalized image URL.
    #[serde(
        rename = "productImage",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub product_image: Option<String>,
    /// Denormalized category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Denormalized seller reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seller: Option<UserRef>,
}

impl CartLine {
    /// Create a minimal line for an add-to-cart write.
    #[must_use]
    pub fn new(product: ProductId, quantity: u32) -> Self {
        Self {
            product,
            quantity: quantity.max(1),
            price: Price::default(),
            product_name: None,
            product_image: None,
            category: None,
            seller: None,
        }
    }

    /// Create a line denormalized from a product listing.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product: product.id.clone(),
            quantity: quantity.max(1),
            price: product.price,
            product_name: Some(product.product_name.clone()),
            product_image: Some(product.product_image.clone()),
            category: Some(product.category.clone()),
            seller: Some(UserRef::Id(product.seller.id().clone())),
        }
    }

    /// Change the quantity, clamping to the minimum of 1.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity.max(1);
    }

    /// Selling price for the whole line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price.line_total(self.quantity)
    }
}

/// Sum of line totals across a cart snapshot.
#[must_use]
pub fn cart_total(lines: &[CartLine]) -> Decimal {
    lines.iter().map(CartLine::line_total).sum()
}

fn quantity_at_least_one<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = u32::deserialize(deserializer)?;
    Ok(raw.max(1))
}

// =============================================================================
// Order Types
// =============================================================================

/// Shipping details collected at checkout. All fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingData {
    /// Recipient name.
    #[serde(rename = "fullName")]
    pub full_name: String,
    /// Contact phone number.
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    /// Postal code.
    pub pincode: String,
    /// Street address.
    pub address: String,
}

/// An order record, as returned by order placement.
///
/// Placement success is detected by the presence of the order id; a response
/// without one fails to decode and surfaces as a failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order id.
    #[serde(rename = "_id")]
    pub id: stylehub_core::OrderId,
    /// The ordering customer.
    pub buyer: UserRef,
    /// Shipping details.
    #[serde(rename = "shippingData")]
    pub shipping_data: ShippingData,
    /// Line items captured into the order, when the API echoes them.
    #[serde(
        rename = "orderedProducts",
        default,
        skip_serializing_if = "Vec::is_empty"
    )]
    pub ordered_products: Vec<CartLine>,
    /// When the order was created.
    #[serde(rename = "createdAt", default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_user_record_preserves_unknown_fields() {
        let raw = json!({
            "_id": "u1",
            "name": "Priya",
            "email": "priya@example.com",
            "loyaltyTier": "gold",
        });

        let user: UserRecord = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(user.extra.get("loyaltyTier").unwrap(), "gold");

        let round_tripped = serde_json::to_value(&user).unwrap();
        assert_eq!(round_tripped, raw);
    }

    #[test]
    fn test_user_ref_accepts_bare_id() {
        let user_ref: UserRef = serde_json::from_value(json!("u42")).unwrap();
        assert_eq!(user_ref.id(), &UserId::new("u42"));
        assert_eq!(user_ref.display_name(), None);
    }

    #[test]
    fn test_user_ref_accepts_populated_profile() {
        let user_ref: UserRef =
            serde_json::from_value(json!({"_id": "s7", "shopName": "Trendy Threads"})).unwrap();
        assert_eq!(user_ref.id(), &UserId::new("s7"));
        assert_eq!(user_ref.display_name(), Some("Trendy Threads"));
    }

    #[test]
    fn test_product_parses_detail_shape() {
        let raw = json!({
            "_id": "p1",
            "productName": "Linen Shirt",
            "productImage": "https://img.example/p1.jpg",
            "category": "Men",
            "subcategory": "Shirts",
            "description": "Breathable summer shirt",
            "quantity": 12,
            "price": {"mrp": 2499.0, "cost": 1799.0},
            "seller": {"_id": "s1", "shopName": "Trendy Threads"},
            "reviews": [
                {"rating": 4, "comment": "Fits well", "reviewer": {"_id": "u9", "name": "Dev"}}
            ],
            "averageRating": 4.0,
        });

        let product: Product = serde_json::from_value(raw).unwrap();
        assert_eq!(product.id, ProductId::new("p1"));
        assert_eq!(product.seller.display_name(), Some("Trendy Threads"));
        assert_eq!(product.reviews.len(), 1);
        assert_eq!(product.reviews.first().unwrap().rating, 4);
    }

    #[test]
    fn test_cart_line_quantity_clamped_on_parse() {
        let line: CartLine =
            serde_json::from_value(json!({"productId": "p1", "quantity": 0})).unwrap();
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_cart_line_accepts_denormalized_id_key() {
        // Some cart payloads key the product under `_id` instead of `productId`.
        let line: CartLine = serde_json::from_value(json!({
            "_id": "p3",
            "quantity": 2,
            "price": {"mrp": 100.0, "cost": 80.0},
            "productName": "Socks",
        }))
        .unwrap();
        assert_eq!(line.product, ProductId::new("p3"));
        assert_eq!(line.line_total(), "160".parse().unwrap());
    }

    #[test]
    fn test_cart_line_set_quantity_clamps() {
        let mut line = CartLine::new(ProductId::new("p1"), 3);
        line.set_quantity(0);
        assert_eq!(line.quantity, 1);
    }

    #[test]
    fn test_cart_total_sums_line_totals() {
        let product = Product {
            id: ProductId::new("p1"),
            product_name: "Linen Shirt".into(),
            product_image: String::new(),
            category: "Men".into(),
            subcategory: String::new(),
            description: String::new(),
            quantity: 5,
            price: Price::new("2000".parse().unwrap(), "1500".parse().unwrap()),
            seller: UserRef::Id(UserId::new("s1")),
            reviews: vec![],
            average_rating: None,
        };

        let lines = vec![
            CartLine::from_product(&product, 2),
            CartLine::from_product(&product, 1),
        ];
        assert_eq!(cart_total(&lines), "4500".parse().unwrap());
    }

    #[test]
    fn test_order_requires_id() {
        // The API signals placement failure by omitting the id.
        let raw = json!({"message": "out of stock"});
        assert!(serde_json::from_value::<Order>(raw).is_err());
    }
}
