//! Booking commands

use anyhow::Result;
use hbnb_api_client::HbnbClient;
use owo_colors::OwoColorize;

/// List the authenticated guest's bookings
pub async fn list(client: &HbnbClient, format: &str) -> Result<()> {
    let response = client.bookings().list().await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    if response.bookings.is_empty() {
        println!("No bookings yet");
        return Ok(());
    }

    println!("{}", "Your bookings".bold());
    for booking in &response.bookings {
        let title = booking
            .place
            .as_ref()
            .map_or(booking.place_id.as_str(), |p| p.title.as_str());
        println!(
            "  {}  {}  {} → {}  [{}]",
            booking.id.dimmed(),
            title.bold(),
            booking.check_in,
            booking.check_out,
            status_colored(&booking.status)
        );
    }
    Ok(())
}

/// Quote price and availability for a date range
pub async fn quote(
    client: &HbnbClient,
    place_id: &str,
    check_in: &str,
    check_out: &str,
    format: &str,
) -> Result<()> {
    let quote = client
        .bookings()
        .check_availability(place_id, check_in, check_out)
        .await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&quote)?);
        return Ok(());
    }

    if quote.available {
        println!("{}", "✓ Available".green().bold());
    } else {
        println!("{}", "✗ Not available for these dates".red().bold());
    }
    println!(
        "  {} nights × {} {} = {}",
        quote.nights, quote.price_per_night, quote.currency, quote.subtotal
    );
    if quote.discount > 0.0 {
        println!("  {} discount: -{}", quote.booking_type, quote.discount);
    }
    println!("  service fee: {}", quote.service_fee);
    println!("  {} {} {}", "total:".bold(), quote.total, quote.currency);
    Ok(())
}

/// Cancel a booking
pub async fn cancel(client: &HbnbClient, id: &str) -> Result<()> {
    let response = client.bookings().cancel(id).await?;
    println!(
        "{} {}",
        "✓ Cancelled:".green(),
        response.message.unwrap_or_else(|| id.to_string())
    );
    Ok(())
}

fn status_colored(status: &str) -> String {
    match status {
        "confirmed" | "checked_in" => status.green().to_string(),
        "pending" => status.yellow().to_string(),
        "cancelled" => status.red().to_string(),
        other => other.to_string(),
    }
}
