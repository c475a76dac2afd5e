//! StyleHub CLI - Terminal frontend for the StyleHub marketplace.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog (no login needed)
//! stylehub products
//! stylehub product 665f1c2e9b3a7d0012345678
//!
//! # Sign in as a customer and shop
//! stylehub login -r customer -e priya@example.com -p secret
//! stylehub cart add 665f1c2e9b3a7d0012345678 --quantity 2
//! stylehub checkout --full-name "Priya Sharma" --phone-number 9876543210 \
//!     --pincode 560001 --address "12 MG Road, Bengaluru"
//!
//! # Sign in as a seller and manage listings
//! stylehub login -r seller -e arjun@example.com -p secret
//! stylehub seller products
//! ```
//!
//! # Commands
//!
//! - `login` / `register` / `logout` / `whoami` - session management
//! - `products` / `product` / `review` - catalog views
//! - `cart` / `checkout` - customer views (login required)
//! - `seller` - seller dashboard views (login required)
//!
//! Each role-restricted command evaluates the route guard before rendering;
//! a denied command prints the sign-in redirect instead.
//!
//! # Environment Variables
//!
//! - `STYLEHUB_API_BASE_URL` - Base URL of the StyleHub API (required)
//! - `STYLEHUB_SESSION_FILE` - Path of the durable session file
//! - `RUST_LOG` - Log filter (default: `stylehub=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]
// The views in this binary render to the terminal directly.
#![allow(clippy::print_stdout, clippy::print_stderr)]

use clap::{Parser, Subcommand, ValueEnum};
use secrecy::SecretString;

use stylehub_core::{AccountRole, Email};

mod commands;
mod context;

use context::AppContext;

#[derive(Parser)]
#[command(name = "stylehub")]
#[command(author, version, about = "StyleHub marketplace terminal client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Account role selector for login.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum RoleArg {
    /// Shop as a customer
    Customer,
    /// Manage listings as a seller
    Seller,
}

impl From<RoleArg> for AccountRole {
    fn from(role: RoleArg) -> Self {
        match role {
            RoleArg::Customer => Self::Customer,
            RoleArg::Seller => Self::Seller,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and establish a durable session
    Login {
        /// Account role to sign in as
        #[arg(short, long, value_enum)]
        role: RoleArg,

        /// Account email
        #[arg(short, long)]
        email: Email,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Create a new account and sign in
    Register {
        #[command(subcommand)]
        account: RegisterAccount,
    },
    /// Sign out and erase the durable session
    Logout,
    /// Show who is currently signed in
    Whoami,
    /// Browse the product catalog
    Products,
    /// Show a single product with its reviews
    Product {
        /// Product id
        id: String,
    },
    /// Manage the shopping cart (customers only)
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Place an order for the current cart (customers only)
    Checkout {
        /// Recipient name
        #[arg(long)]
        full_name: String,

        /// Contact phone number
        #[arg(long)]
        phone_number: String,

        /// Postal code
        #[arg(long)]
        pincode: String,

        /// Street address
        #[arg(long)]
        address: String,
    },
    /// Seller dashboard (sellers only)
    Seller {
        #[command(subcommand)]
        action: SellerAction,
    },
    /// Review a product (customers only)
    Review {
        /// Product id
        product: String,

        /// Star rating, 1 to 5
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,

        /// Review text
        #[arg(short, long)]
        comment: String,
    },
}

#[derive(Subcommand)]
enum RegisterAccount {
    /// Register a customer account
    Customer {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: Email,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Register a seller account
    Seller {
        /// Display name
        #[arg(short, long)]
        name: String,

        /// Account email
        #[arg(short, long)]
        email: Email,

        /// Account password
        #[arg(short, long)]
        password: String,

        /// Public shop name shown on listings
        #[arg(short = 's', long)]
        shop_name: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Show the current cart
    Show,
    /// Add a product to the cart
    Add {
        /// Product id
        product: String,

        /// Units to add
        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Set the quantity of a cart line
    Set {
        /// Product id
        product: String,

        /// New quantity (minimum 1)
        quantity: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product id
        product: String,
    },
}

#[derive(Subcommand)]
enum SellerAction {
    /// List your products
    Products,
    /// Create a product listing
    Create {
        /// Listing title
        #[arg(long)]
        name: String,

        /// Image URL
        #[arg(long)]
        image: String,

        /// Top-level category
        #[arg(long)]
        category: String,

        /// Second-level category
        #[arg(long)]
        subcategory: String,

        /// Listing description
        #[arg(long)]
        description: String,

        /// Units in stock
        #[arg(long)]
        quantity: i64,

        /// List price
        #[arg(long)]
        mrp: rust_decimal::Decimal,

        /// Selling price
        #[arg(long)]
        cost: rust_decimal::Decimal,
    },
    /// Delete a product listing
    Delete {
        /// Product id
        product: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Initialize tracing with EnvFilter.
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "stylehub=info".into());

    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::debug!(error = ?e, "Command failed");
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CliError> {
    let ctx = AppContext::from_env()?;

    match cli.command {
        Commands::Login {
            role,
            email,
            password,
        } => {
            commands::auth::login(&ctx, role.into(), email, SecretString::from(password)).await?;
        }
        Commands::Register { account } => match account {
            RegisterAccount::Customer {
                name,
                email,
                password,
            } => {
                commands::auth::register_customer(&ctx, name, email, SecretString::from(password))
                    .await?;
            }
            RegisterAccount::Seller {
                name,
                email,
                password,
                shop_name,
            } => {
                commands::auth::register_seller(
                    &ctx,
                    name,
                    email,
                    SecretString::from(password),
                    shop_name,
                )
                .await?;
            }
        },
        Commands::Logout => commands::auth::logout(&ctx)?,
        Commands::Whoami => commands::auth::whoami(&ctx),
        Commands::Products => commands::catalog::products(&ctx).await?,
        Commands::Product { id } => commands::catalog::product(&ctx, &id.into()).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&ctx).await?,
            CartAction::Add { product, quantity } => {
                commands::cart::add(&ctx, &product.into(), quantity).await?;
            }
            CartAction::Set { product, quantity } => {
                commands::cart::set(&ctx, &product.into(), quantity).await?;
            }
            CartAction::Remove { product } => {
                commands::cart::remove(&ctx, &product.into()).await?;
            }
        },
        Commands::Checkout {
            full_name,
            phone_number,
            pincode,
            address,
        } => {
            commands::cart::checkout(&ctx, full_name, phone_number, pincode, address).await?;
        }
        Commands::Seller { action } => match action {
            SellerAction::Products => commands::seller::products(&ctx).await?,
            SellerAction::Create {
                name,
                image,
                category,
                subcategory,
                description,
                quantity,
                mrp,
                cost,
            } => {
                commands::seller::create(
                    &ctx,
                    commands::seller::CreateArgs {
                        name,
                        image,
                        category,
                        subcategory,
                        description,
                        quantity,
                        mrp,
                        cost,
                    },
                )
                .await?;
            }
            SellerAction::Delete { product } => {
                commands::seller::delete(&ctx, &product.into()).await?;
            }
        },
        Commands::Review {
            product,
            rating,
            comment,
        } => {
            commands::catalog::review(&ctx, &product.into(), rating, comment).await?;
        }
    }
    Ok(())
}
