//! Event listing filters over the bundled six-event listing.
//!
//! Run with: `cargo test --test listing_filter_test`

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use eventhive::fixtures::event_listing;
use eventhive::listing::{Category, EventFilter, EventListing, PriceBand};

fn listing() -> EventListing {
    event_listing().expect("bundled listing parses")
}

fn ids(listing: &EventListing, filter: &EventFilter) -> Vec<String> {
    listing
        .filter(filter)
        .into_iter()
        .map(|event| event.id.to_string())
        .collect()
}

#[test]
fn empty_filter_keeps_listing_order() {
    let listing = listing();
    assert_eq!(ids(&listing, &EventFilter::new()), ["1", "2", "3", "4", "5", "6"]);
}

#[test]
fn query_matches_title_or_description_case_insensitively() {
    let listing = listing();

    assert_eq!(ids(&listing, &EventFilter::new().with_query("MUSIC")), ["1", "5"]);
    // "SEO" only appears in the masterclass description
    assert_eq!(ids(&listing, &EventFilter::new().with_query("seo")), ["4"]);
    assert!(ids(&listing, &EventFilter::new().with_query("opera")).is_empty());
}

#[test]
fn category_filter() {
    let listing = listing();
    assert_eq!(
        ids(&listing, &EventFilter::new().with_category(Category::Workshop)),
        ["2", "4"]
    );
    assert!(ids(&listing, &EventFilter::new().with_category(Category::Business)).is_empty());
}

#[test]
fn location_filter_is_a_substring_match() {
    let listing = listing();
    assert_eq!(
        ids(&listing, &EventFilter::new().with_location("Maharashtra")),
        ["1", "4"]
    );
    assert_eq!(ids(&listing, &EventFilter::new().with_location("Goa")), ["5"]);
    assert_eq!(ids(&listing, &EventFilter::new().with_location("")).len(), 6);
}

#[test]
fn price_bands_partition_the_listing() {
    let listing = listing();
    let in_band = |band| ids(&listing, &EventFilter::new().with_price_band(band));

    assert_eq!(in_band(PriceBand::Free), ["3"]);
    assert_eq!(in_band(PriceBand::Under500), ["6"]);
    assert_eq!(in_band(PriceBand::From500To1000), ["2", "4"]);
    assert_eq!(in_band(PriceBand::From1000To2000), ["5"]);
    assert_eq!(in_band(PriceBand::Above2000), ["1"]);

    let total: usize = PriceBand::ALL.iter().map(|b| in_band(*b).len()).sum();
    assert_eq!(total, listing.len());
}

#[test]
fn criteria_combine() {
    let listing = listing();
    let filter = EventFilter::new()
        .with_category(Category::Music)
        .with_price_band(PriceBand::From1000To2000)
        .with_query("indie");

    assert_eq!(ids(&listing, &filter), ["5"]);
}

#[test]
fn badges_and_capacity() {
    let listing = listing();

    let trending: Vec<&str> = listing.trending().map(|e| e.id.as_str()).collect();
    let featured: Vec<&str> = listing.featured().map(|e| e.id.as_str()).collect();
    assert_eq!(trending, ["1", "2"]);
    assert_eq!(featured, ["1", "3"]);

    let workshop = listing.get("2").expect("event 2 is listed");
    assert_eq!(workshop.spots_left(), 15);
    assert!((workshop.fill_ratio() - 0.85).abs() < f64::EPSILON);
    assert!(listing.get("3").is_some_and(|e| e.is_free()));
}

#[test]
fn filters_parse_from_form_values() {
    let category: Category = " music ".parse().expect("category parses");
    let band: PriceBand = "500-1000".parse().expect("band parses");

    assert_eq!(category, Category::Music);
    assert_eq!(band, PriceBand::From500To1000);
    assert!("Opera".parse::<Category>().is_err());
}
