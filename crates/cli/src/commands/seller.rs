//! Seller dashboard views: listing, creating, and deleting products.

use rust_decimal::Decimal;

use stylehub_core::{Price, ProductId};

use stylehub_client::api::types::NewProduct;
use stylehub_client::guard::ViewAccess;

use super::CliError;
use crate::context::AppContext;

/// Input for `seller create`.
pub struct CreateArgs {
    pub name: String,
    pub image: String,
    pub category: String,
    pub subcategory: String,
    pub description: String,
    pub quantity: i64,
    pub mrp: Decimal,
    pub cost: Decimal,
}

/// List the signed-in seller's products.
pub async fn products(ctx: &AppContext) -> Result<(), CliError> {
    let Some(auth) = ctx.require(ViewAccess::Seller) else {
        return Ok(());
    };

    let products = ctx.client.seller_products(&auth.user.id).await?;

    if products.is_empty() {
        println!("You have no listings yet");
        return Ok(());
    }

    for product in &products {
        println!(
            "{}  {}  ₹{}  stock: {}",
            product.id, product.product_name, product.price.cost, product.quantity
        );
    }
    Ok(())
}

/// Create a new product listing.
pub async fn create(ctx: &AppContext, args: CreateArgs) -> Result<(), CliError> {
    let Some(auth) = ctx.require(ViewAccess::Seller) else {
        return Ok(());
    };

    if args.cost > args.mrp {
        return Err(CliError::Input(
            "Selling price cannot exceed the list price".to_owned(),
        ));
    }

    let input = NewProduct {
        product_name: args.name,
        product_image: args.image,
        category: args.category,
        subcategory: args.subcategory,
        description: args.description,
        quantity: args.quantity,
        price: Price::new(args.mrp, args.cost),
    };

    let created = ctx.client.create_product(&auth.user.id, &input).await?;
    println!("Created {} [{}]", created.product_name, created.id);
    Ok(())
}

/// Delete a product listing.
pub async fn delete(ctx: &AppContext, product: &ProductId) -> Result<(), CliError> {
    if ctx.require(ViewAccess::Seller).is_none() {
        return Ok(());
    }

    ctx.client.delete_product(product).await?;
    println!("Deleted {product}");
    Ok(())
}
