//! Staff account commands

use crate::context::{CliError, Context};
use crate::render;
use checkin_client::{LoginRequest, RegisterRequest};

/// Sign in and persist the token
pub async fn login(ctx: &Context, email: String, password: String) -> Result<(), CliError> {
    let request = LoginRequest { email, password };
    ctx.api()?
        .login(&request)
        .await
        .map_err(|e| CliError::Refused(e.user_message("login failed")))?;

    println!("Signed in as {}", request.email);
    Ok(())
}

/// Sign out; the club is forgotten too
pub async fn logout(ctx: &Context) -> Result<(), CliError> {
    ctx.api()?
        .logout()
        .await
        .map_err(|e| CliError::Refused(e.user_message("logout failed")))?;

    println!("Signed out");
    Ok(())
}

/// Create a staff account
pub async fn register(ctx: &Context, request: &RegisterRequest) -> Result<(), CliError> {
    let response = ctx
        .api()?
        .register(request)
        .await
        .map_err(|e| CliError::Refused(e.user_message("registration failed")))?;

    println!(
        "{}",
        response
            .message
            .unwrap_or_else(|| format!("Registered {}", request.email))
    );
    Ok(())
}

/// Delete the signed-in account
pub async fn delete_account(ctx: &Context, confirmed: bool) -> Result<(), CliError> {
    ctx.require_sign_in().await?;
    if !confirmed {
        return Err(CliError::Unconfirmed("delete the account"));
    }

    let response = ctx
        .api()?
        .delete_account()
        .await
        .map_err(|e| CliError::Refused(e.user_message("could not delete account")))?;

    println!(
        "{}",
        response.message.unwrap_or_else(|| "Account deleted".to_string())
    );
    Ok(())
}

/// Print the stored club and sign-in state
pub async fn status(ctx: &Context) {
    let snapshot = ctx.session.snapshot().await;
    let base_url = match ctx.api() {
        Ok(api) => api.base_url().await,
        Err(_) => ctx.config.api_url.clone(),
    };

    print!("{}", render::status(&snapshot, &base_url));
}
