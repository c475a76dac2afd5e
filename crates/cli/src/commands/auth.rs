//! Session commands: login, registration, logout, whoami.

use secrecy::SecretString;

use stylehub_core::{AccountRole, Email};

use stylehub_client::api::{Credentials, Registration};
use stylehub_client::session::Identity;

use super::CliError;
use crate::context::AppContext;

/// Sign in as `role` and persist the session.
pub async fn login(
    ctx: &AppContext,
    role: AccountRole,
    email: Email,
    password: SecretString,
) -> Result<(), CliError> {
    let auth = ctx
        .client
        .login(role, &Credentials { email, password })
        .await?;

    let name = auth.user.name.clone();
    ctx.session.login(auth.user, auth.token, auth.role)?;

    println!("Signed in as {name} ({role})");
    Ok(())
}

/// Register a customer account and sign in.
pub async fn register_customer(
    ctx: &AppContext,
    name: String,
    email: Email,
    password: SecretString,
) -> Result<(), CliError> {
    register(
        ctx,
        Registration::Customer {
            name,
            email,
            password,
        },
    )
    .await
}

/// Register a seller account and sign in.
pub async fn register_seller(
    ctx: &AppContext,
    name: String,
    email: Email,
    password: SecretString,
    shop_name: String,
) -> Result<(), CliError> {
    register(
        ctx,
        Registration::Seller {
            name,
            email,
            password,
            shop_name,
        },
    )
    .await
}

async fn register(ctx: &AppContext, registration: Registration) -> Result<(), CliError> {
    let auth = ctx.client.register(&registration).await?;

    let name = auth.user.name.clone();
    let role = auth.role;
    ctx.session.login(auth.user, auth.token, auth.role)?;

    println!("Welcome to StyleHub, {name}! Signed in as {role}");
    Ok(())
}

/// Sign out, clearing the in-memory identity and the durable session file.
pub fn logout(ctx: &AppContext) -> Result<(), CliError> {
    ctx.session.logout()?;
    println!("Signed out");
    Ok(())
}

/// Print the current identity.
pub fn whoami(ctx: &AppContext) {
    match ctx.session.current_identity() {
        Identity::Anonymous => println!("Not signed in"),
        Identity::Authenticated(auth) => {
            println!("{} <{}> ({})", auth.user.name, auth.user.email, auth.role);
            if let Some(shop) = &auth.user.shop_name {
                println!("Shop: {shop}");
            }
        }
    }
}
