//! Seed accounts and products for the mock API.

use secrecy::SecretString;
use serde_json::{Value, json};

use stylehub_client::api::Credentials;
use stylehub_core::Email;

use crate::MockUser;

/// Seeded customer account.
pub const CUSTOMER_ID: &str = "u-priya";
pub const CUSTOMER_EMAIL: &str = "priya@example.com";

/// Seeded seller account.
pub const SELLER_ID: &str = "s-arjun";
pub const SELLER_EMAIL: &str = "arjun@example.com";
pub const SELLER_SHOP: &str = "Trendy Threads";

/// Password shared by all seeded accounts.
pub const PASSWORD: &str = "secret123";

/// Seeded product ids.
pub const SHIRT_ID: &str = "p-shirt";
pub const KURTA_ID: &str = "p-kurta";

pub(crate) fn users() -> Vec<MockUser> {
    vec![
        MockUser {
            id: CUSTOMER_ID.to_owned(),
            name: "Priya".to_owned(),
            email: CUSTOMER_EMAIL.to_owned(),
            password: PASSWORD.to_owned(),
            seller: false,
            shop_name: None,
        },
        MockUser {
            id: SELLER_ID.to_owned(),
            name: "Arjun".to_owned(),
            email: SELLER_EMAIL.to_owned(),
            password: PASSWORD.to_owned(),
            seller: true,
            shop_name: Some(SELLER_SHOP.to_owned()),
        },
    ]
}

pub(crate) fn products() -> Vec<Value> {
    vec![
        json!({
            "_id": SHIRT_ID,
            "productName": "Linen Shirt",
            "productImage": "https://img.stylehub.example/shirt.jpg",
            "category": "Men",
            "subcategory": "Shirts",
            "description": "Breathable summer shirt",
            "quantity": 12,
            "price": {"mrp": 2499.0, "cost": 1799.0},
            "seller": {"_id": SELLER_ID, "shopName": SELLER_SHOP},
            "reviews": [],
        }),
        json!({
            "_id": KURTA_ID,
            "productName": "Block Print Kurta",
            "productImage": "https://img.stylehub.example/kurta.jpg",
            "category": "Women",
            "subcategory": "Kurtas",
            "description": "Hand-blocked cotton kurta",
            "quantity": 5,
            "price": {"mrp": 1999.0, "cost": 1999.0},
            "seller": {"_id": SELLER_ID, "shopName": SELLER_SHOP},
            "reviews": [],
        }),
    ]
}

/// Credentials for the seeded customer.
///
/// # Panics
///
/// Panics if the seeded email constant is malformed.
#[must_use]
pub fn customer_credentials() -> Credentials {
    Credentials {
        email: Email::parse(CUSTOMER_EMAIL).expect("Seed email is valid"),
        password: SecretString::from(PASSWORD),
    }
}

/// Credentials for the seeded seller.
///
/// # Panics
///
/// Panics if the seeded email constant is malformed.
#[must_use]
pub fn seller_credentials() -> Credentials {
    Credentials {
        email: Email::parse(SELLER_EMAIL).expect("Seed email is valid"),
        password: SecretString::from(PASSWORD),
    }
}
