//! Catalog views: product listing, product detail, review submission.

use stylehub_core::ProductId;

use stylehub_client::api::types::{Product, ReviewInput};
use stylehub_client::api::average_rating;
use stylehub_client::guard::ViewAccess;

use super::CliError;
use crate::context::AppContext;

/// Render the product catalog. Public view.
pub async fn products(ctx: &AppContext) -> Result<(), CliError> {
    let products = ctx.client.products().await?;

    if products.is_empty() {
        println!("No products yet");
        return Ok(());
    }

    for product in &products {
        println!("{}", listing_line(product));
    }
    Ok(())
}

/// Render a single product with its reviews. Public view.
pub async fn product(ctx: &AppContext, id: &ProductId) -> Result<(), CliError> {
    let product = ctx.client.product_detail(id).await?;

    println!("{} [{}]", product.product_name, product.id);
    println!(
        "{} / {} - sold by {}",
        product.category,
        product.subcategory,
        seller_name(&product)
    );
    println!("{}", price_tag(&product));
    println!("In stock: {}", product.quantity);
    if !product.description.is_empty() {
        println!("\n{}", product.description);
    }

    let rating = product
        .average_rating
        .or_else(|| average_rating(&product.reviews));
    if let Some(rating) = rating {
        println!("\nRating: {rating:.1}/5 ({} reviews)", product.reviews.len());
    }
    for review in &product.reviews {
        let reviewer = review.reviewer.display_name().unwrap_or("anonymous");
        println!("  [{}/5] {} - {}", review.rating, review.comment, reviewer);
    }
    Ok(())
}

/// Submit a review. Customer view.
pub async fn review(
    ctx: &AppContext,
    product: &ProductId,
    rating: u8,
    comment: String,
) -> Result<(), CliError> {
    let Some(auth) = ctx.require(ViewAccess::Customer) else {
        return Ok(());
    };

    let updated = ctx
        .client
        .submit_review(
            product,
            &ReviewInput {
                rating,
                comment,
                reviewer: auth.user.id,
            },
        )
        .await?;

    println!("Review added to {}", updated.product_name);
    if let Some(rating) = updated
        .average_rating
        .or_else(|| average_rating(&updated.reviews))
    {
        println!("New rating: {rating:.1}/5");
    }
    Ok(())
}

/// One-line catalog entry: id, name, price, and seller.
fn listing_line(product: &Product) -> String {
    format!(
        "{}  {} - {} ({})",
        product.id,
        product.product_name,
        price_tag(product),
        seller_name(product)
    )
}

fn price_tag(product: &Product) -> String {
    if product.price.is_discounted() {
        format!(
            "₹{} (₹{}, {}% off)",
            product.price.cost,
            product.price.mrp,
            product.price.discount_percent()
        )
    } else {
        format!("₹{}", product.price.cost)
    }
}

fn seller_name(product: &Product) -> String {
    product
        .seller
        .display_name()
        .unwrap_or("unknown seller")
        .to_owned()
}
