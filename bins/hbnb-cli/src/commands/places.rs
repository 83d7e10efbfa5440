//! Place browsing commands

use anyhow::Result;
use hbnb_api_client::HbnbClient;
use hbnb_api_client::endpoints::places::{PlaceCard, PlaceFilters};
use owo_colors::OwoColorize;

/// Search places with filters
#[allow(clippy::too_many_arguments)]
pub async fn list(
    client: &HbnbClient,
    city: Option<&str>,
    query: Option<&str>,
    guests: Option<u32>,
    max_price: Option<f64>,
    sort: Option<&str>,
    page: u32,
    format: &str,
) -> Result<()> {
    let mut filters = PlaceFilters::new().with_page(page, 20);
    if let Some(city) = city {
        filters = filters.with_city(city);
    }
    if let Some(query) = query {
        filters = filters.with_search(query);
    }
    if let Some(guests) = guests {
        filters = filters.with_guests(guests);
    }
    if let Some(max_price) = max_price {
        filters.max_price = Some(max_price);
    }
    if let Some(sort) = sort {
        filters = filters.with_sort(sort);
    }

    let response = client.places().list(&filters).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&response)?);
        return Ok(());
    }

    println!(
        "{} ({} total, page {}/{})",
        "Places".bold(),
        response.total,
        response.current_page,
        response.pages.max(1)
    );
    for place in &response.places {
        print_card(place);
    }
    Ok(())
}

/// Show the featured rail
pub async fn featured(client: &HbnbClient, format: &str) -> Result<()> {
    let rail = client.places().featured().await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&rail)?);
        return Ok(());
    }

    println!("{}", "Featured places".bold());
    for place in &rail.places {
        print_card(place);
    }
    Ok(())
}

/// Show one place in full
pub async fn get(client: &HbnbClient, id: &str, format: &str) -> Result<()> {
    let place = client.places().get(id).await?;

    if format == "json" {
        println!("{}", serde_json::to_string_pretty(&place)?);
        return Ok(());
    }

    println!("{}", place.title.bold());
    println!(
        "  {} {}/night",
        place.price_per_night,
        place.currency.dimmed()
    );
    if let Some(rating) = place.average_rating {
        println!("  ★ {rating:.1} ({} reviews)", place.review_count);
    }
    if let Some(description) = &place.description {
        println!("\n{description}");
    }
    if !place.amenities.is_empty() {
        let names: Vec<&str> = place.amenities.iter().map(|a| a.name.as_str()).collect();
        println!("\n  amenities: {}", names.join("، "));
    }
    Ok(())
}

/// Toggle the favorite state of a place
pub async fn favorite(client: &HbnbClient, place_id: &str, favorited: bool) -> Result<()> {
    client.places().set_favorite(place_id, favorited).await?;
    if favorited {
        println!("{} {place_id}", "✓ Added to favorites:".green());
    } else {
        println!("{} {place_id}", "✓ Removed from favorites:".green());
    }
    Ok(())
}

fn print_card(place: &PlaceCard) {
    let rating = place
        .average_rating
        .map_or_else(|| "new".to_string(), |r| format!("★ {r:.1}"));
    println!(
        "  {}  {}  {} {}/night  {}",
        place.id.dimmed(),
        place.title.bold(),
        place.price_per_night,
        place.currency,
        rating
    );
}
