//! Back-office commands

use anyhow::Result;
use hbnb_api_client::HbnbClient;
use owo_colors::OwoColorize;

/// Show platform-wide counters
pub async fn dashboard(client: &HbnbClient, format: &str) -> Result<()> {
    let stats = client.admin().dashboard().await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "HBnB dashboard".bold());
    println!("  users:            {}", stats.users);
    println!("  places:           {}", stats.places);
    println!("  bookings:         {}", stats.bookings);
    println!("  active bookings:  {}", stats.active_bookings);
    println!("  pending bookings: {}", stats.pending_bookings);
    println!("  reviews:          {}", stats.reviews);
    println!("  revenue:          {}", stats.total_revenue);
    Ok(())
}

/// List users with optional filters
pub async fn users(
    client: &HbnbClient,
    search: Option<&str>,
    role: Option<&str>,
    page: u32,
    format: &str,
) -> Result<()> {
    let response = client.admin().list_users(search, role, page).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!(
        "{} ({} total, page {}/{})",
        "Users".bold(),
        response.total,
        response.page,
        response.pages.max(1)
    );
    for user in &response.users {
        let email = user.email.as_deref().unwrap_or("-");
        println!(
            "  {}  {} {}  {}  [{}]",
            user.id.dimmed(),
            user.first_name,
            user.last_name,
            email,
            user.role
        );
    }
    Ok(())
}
