//! Cart and checkout views. All of these require a customer session.
//!
//! The cart mirror lives only for the duration of one command: each command
//! refetches the snapshot, edits it locally, and pushes the whole line list
//! back. When the push fails the edited list is discarded with the command -
//! nothing local outlives the attempt, so the pre-update state stays intact.

use stylehub_core::ProductId;

use stylehub_client::api::types::{CartLine, ShippingData, cart_total};
use stylehub_client::guard::ViewAccess;

use super::CliError;
use crate::context::AppContext;

/// Render the current cart snapshot.
pub async fn show(ctx: &AppContext) -> Result<(), CliError> {
    let Some(auth) = ctx.require(ViewAccess::Customer) else {
        return Ok(());
    };

    let lines = ctx.client.cart(&auth.user.id).await?;
    render(&lines);
    Ok(())
}

/// Add a product to the cart, merging with an existing line for the same
/// product.
pub async fn add(ctx: &AppContext, product: &ProductId, quantity: u32) -> Result<(), CliError> {
    let Some(auth) = ctx.require(ViewAccess::Customer) else {
        return Ok(());
    };

    let mut lines = ctx.client.cart(&auth.user.id).await?;

    if let Some(line) = lines.iter_mut().find(|line| &line.product == product) {
        let merged = line.quantity.saturating_add(quantity);
        line.set_quantity(merged);
    } else {
        let detail = ctx.client.product_detail(product).await?;
        lines.push(CartLine::from_product(&detail, quantity));
    }

    let updated = ctx.client.replace_cart(&auth.user.id, &lines).await?;
    println!("Added to cart");
    render(&updated);
    Ok(())
}

/// Set the quantity of an existing cart line. Quantities below 1 are clamped;
/// removing a line is its own command.
pub async fn set(ctx: &AppContext, product: &ProductId, quantity: u32) -> Result<(), CliError> {
    let Some(auth) = ctx.require(ViewAccess::Customer) else {
        return Ok(());
    };

    let mut lines = ctx.client.cart(&auth.user.id).await?;

    let Some(line) = lines.iter_mut().find(|line| &line.product == product) else {
        println!("Product {product} is not in your cart");
        return Ok(());
    };
    line.set_quantity(quantity);

    let updated = ctx.client.replace_cart(&auth.user.id, &lines).await?;
    render(&updated);
    Ok(())
}

/// Remove a product's line from the cart.
pub async fn remove(ctx: &AppContext, product: &ProductId) -> Result<(), CliError> {
    let Some(auth) = ctx.require(ViewAccess::Customer) else {
        return Ok(());
    };

    let mut lines = ctx.client.cart(&auth.user.id).await?;

    let before = lines.len();
    lines.retain(|line| &line.product != product);
    if lines.len() == before {
        println!("Product {product} is not in your cart");
        return Ok(());
    }

    let updated = ctx.client.replace_cart(&auth.user.id, &lines).await?;
    println!("Removed from cart");
    render(&updated);
    Ok(())
}

/// Place an order for the server-side cart.
pub async fn checkout(
    ctx: &AppContext,
    full_name: String,
    phone_number: String,
    pincode: String,
    address: String,
) -> Result<(), CliError> {
    let Some(auth) = ctx.require(ViewAccess::Customer) else {
        return Ok(());
    };

    let shipping = ShippingData {
        full_name,
        phone_number,
        pincode,
        address,
    };
    if [
        &shipping.full_name,
        &shipping.phone_number,
        &shipping.pincode,
        &shipping.address,
    ]
    .iter()
    .any(|field| field.trim().is_empty())
    {
        return Err(CliError::Input(
            "All shipping fields are required".to_owned(),
        ));
    }

    let order = ctx.client.place_order(&auth.user.id, &shipping).await?;

    println!("Order placed! Order id: {}", order.id);
    if !order.ordered_products.is_empty() {
        render(&order.ordered_products);
    }
    Ok(())
}

/// Render cart lines with per-line and total amounts.
fn render(lines: &[CartLine]) {
    if lines.is_empty() {
        println!("Your cart is empty");
        return;
    }

    for line in lines {
        let name = line.product_name.as_deref().unwrap_or(line.product.as_str());
        println!(
            "{}  x{}  ₹{} each  ₹{}",
            name,
            line.quantity,
            line.price.cost,
            line.line_total()
        );
    }
    println!("Total: ₹{}", cart_total(lines));
}
