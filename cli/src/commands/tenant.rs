//! Club domain commands, served by the endpoint resolver

use crate::context::Context;
use checkin_client::{DomainRegistration, ResolverError};

/// Resolve a domain and store its endpoint
pub async fn resolve(ctx: &Context, domain: &str, passcode: &str) -> Result<(), ResolverError> {
    let resolution = ctx.resolver()?.resolve(domain, passcode).await?;

    match resolution.club_name {
        Some(club) => println!("Connected to {club} ({})", resolution.endpoint),
        None => println!("Connected to {}", resolution.endpoint),
    }
    Ok(())
}

/// Ask the resolver for a new domain
pub async fn register_domain(
    ctx: &Context,
    club_name: String,
    domain: String,
    passcode: String,
) -> Result<(), ResolverError> {
    let registration = DomainRegistration {
        club_name,
        domain,
        passcode,
    };
    let message = ctx.resolver()?.register_domain(&registration).await?;

    println!(
        "{}",
        message.unwrap_or_else(|| format!("Registered {}", registration.domain))
    );
    Ok(())
}

/// Remove a domain; the local session is cleared on success
pub async fn delete_domain(ctx: &Context, domain: &str) -> Result<(), ResolverError> {
    let message = ctx.resolver()?.delete_domain(domain).await?;

    println!("{}", message.unwrap_or_else(|| format!("Deleted {domain}")));
    Ok(())
}
