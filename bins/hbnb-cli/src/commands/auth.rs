//! Login, logout, and profile commands

use anyhow::Result;
use hbnb_api_client::HbnbClient;
use owo_colors::OwoColorize;

/// Log in with email and password and persist the session
pub async fn login(client: &HbnbClient, email: &str, password: &str, format: &str) -> Result<()> {
    let response = client.auth().login(email, password).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    let name = response
        .user
        .full_name
        .clone()
        .unwrap_or_else(|| response.user.first_name.clone());
    println!("{} {}", "✓ Logged in as".green(), name.bold());
    println!("  role: {}", response.user.role.dimmed());
    Ok(())
}

/// Request a one-time code
pub async fn request_otp(client: &HbnbClient, email: &str, format: &str) -> Result<()> {
    let response = client.auth().request_otp(email).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{} {email}", "✓ Code sent to".green());
    if let Some(expires_in) = response.expires_in {
        println!("  expires in {} minutes", expires_in / 60);
    }
    Ok(())
}

/// Verify a one-time code and persist the session
pub async fn verify_otp(client: &HbnbClient, email: &str, code: &str, format: &str) -> Result<()> {
    let response = client.auth().verify_otp(email, code).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!("{}", "✓ Logged in".green());
    if response.is_new_user == Some(true) {
        println!("  {}", "Welcome to HBnB — account created".bold());
    }
    Ok(())
}

/// Drop the stored session
pub fn logout(client: &HbnbClient) -> Result<()> {
    client.auth().logout()?;
    println!("{}", "✓ Logged out".green());
    Ok(())
}

/// Show the authenticated user's profile
pub async fn whoami(client: &HbnbClient, format: &str) -> Result<()> {
    let profile = client.auth().me().await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&profile)?);
        return Ok(());
    }

    let name = profile
        .full_name
        .clone()
        .unwrap_or_else(|| format!("{} {}", profile.first_name, profile.last_name));
    println!("{}", name.bold());
    if let Some(email) = &profile.email {
        println!("  email: {email}");
    }
    println!("  role: {}", profile.role);
    if profile.is_verified {
        println!("  {}", "verified".green());
    }
    Ok(())
}
