//! EventHive marketplace demo
//!
//! Walks through a visitor session and an organizer session against the
//! bundled data:
//! - browses the listing with a few filters
//! - picks tickets on the festival page, including out-of-range requests
//! - checks out through the logging gateway
//! - fills in and publishes an event draft
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin eventhive-demo
//!
//! # Use your own tier file
//! EVENTHIVE_CATALOG_PATH=./tiers.json cargo run --bin eventhive-demo
//! ```

use anyhow::Context;
use chrono::NaiveDate;
use eventhive::booking::AttendeeDetails;
use eventhive::draft::{EventDetails, TicketTypePatch};
use eventhive::fixtures::FESTIVAL_EVENT_ID;
use eventhive::listing::{Category, EventFilter, PriceBand};
use eventhive::{Config, DraftAction, Marketplace, Money, SelectionAction, SelectionStore, Services};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_new(&config.log_filter)
                .unwrap_or_else(|_| eventhive::config::DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        catalog = ?config.catalog_path,
        events = ?config.events_path,
        max_feedback_depth = config.max_feedback_depth,
        "Configuration loaded"
    );

    let app = Marketplace::new(config, Services::logging()).context("initializing marketplace")?;
    let symbol = app.config().currency_symbol.clone();

    browse(&app, &symbol);

    let mut store = app.open_event(FESTIVAL_EVENT_ID)?;
    pick_tickets(&mut store, &symbol)?;
    checkout(&mut store, &symbol)?;

    publish_draft(&app)?;

    println!("\n=== Demo complete ===");
    Ok(())
}

fn browse(app: &Marketplace, symbol: &str) {
    println!("=== Browse events ===");

    let filters = [
        ("all", EventFilter::new()),
        ("music", EventFilter::new().with_category(Category::Music)),
        ("free", EventFilter::new().with_price_band(PriceBand::Free)),
        (
            "workshops 500-1000",
            EventFilter::new()
                .with_category(Category::Workshop)
                .with_price_band(PriceBand::From500To1000),
        ),
        ("in Maharashtra", EventFilter::new().with_location("Maharashtra")),
        ("search 'tournament'", EventFilter::new().with_query("tournament")),
    ];

    for (label, filter) in &filters {
        let events = app.browse(filter);
        println!("\n{label}: {} event(s)", events.len());
        for event in events {
            println!(
                "  [{}] {} - {} - {} ({} spots left)",
                event.id,
                event.title,
                event.location,
                event.price.display_with(symbol),
                event.spots_left()
            );
        }
    }
}

fn print_totals(store: &SelectionStore, symbol: &str) {
    let totals = store.state(eventhive::TicketSelection::totals);
    println!(
        "  tickets: {}, total: {}, checkout enabled: {}",
        totals.ticket_count,
        totals.price.display_with(symbol),
        totals.can_checkout
    );
}

fn pick_tickets(store: &mut SelectionStore, symbol: &str) -> anyhow::Result<()> {
    println!("\n=== Pick tickets ===");
    store.state(|s| {
        for tier in &s.catalog {
            println!(
                "  {} ({}): {} each, {} available",
                tier.name,
                tier.id,
                tier.unit_price.display_with(symbol),
                tier.available
            );
        }
    });
    print_totals(store, symbol);

    let steps: [(&str, i64); 5] = [
        ("vip", 2),
        ("early-bird", 999),
        ("vip", -5),
        ("nonexistent", 3),
        ("vip", 2),
    ];
    for (tier, requested) in steps {
        println!("\n>>> set {tier} to {requested}");
        store.send(SelectionAction::set_quantity(tier, requested))?;
        let stored = store.state(|s| s.quantity_of(tier));
        println!("  {tier} is now {stored}");
        print_totals(store, symbol);
    }

    Ok(())
}

fn checkout(store: &mut SelectionStore, symbol: &str) -> anyhow::Result<()> {
    println!("\n=== Checkout ===");
    for line in store.state(eventhive::TicketSelection::summary) {
        println!(
            "  {} x{} = {}",
            line.name,
            line.quantity,
            line.subtotal.display_with(symbol)
        );
    }

    let attendee = AttendeeDetails::new("Asha Rao", "asha@example.com", "+91 98765 43210")?;
    let report = store.send(SelectionAction::Checkout { attendee })?;
    println!(
        "  processed {} action(s), ran {} task(s)",
        report.actions_processed, report.tasks_executed
    );

    store.state(|s| match (&s.last_receipt, &s.last_error) {
        (Some(receipt), _) => println!(
            "  booked {} ticket(s) for {}, reference {}",
            receipt.ticket_count,
            receipt.total.display_with(symbol),
            receipt.reference
        ),
        (None, Some(error)) => println!("  booking failed: {error}"),
        (None, None) => println!("  nothing to book"),
    });

    let remaining = store.state(|s| s.total_price());
    println!("  selection after checkout: {}", remaining.display_with(symbol));
    debug_assert_eq!(remaining, Money::ZERO);
    Ok(())
}

fn publish_draft(app: &Marketplace) -> anyhow::Result<()> {
    println!("\n=== Create event ===");
    let mut draft = app.new_draft();

    // Submitting an empty form only records what is missing
    draft.send(DraftAction::Submit { publish: true })?;
    if let Some(error) = draft.state(|s| s.last_error.clone()) {
        println!("  first attempt: {error}");
    }

    let details = EventDetails {
        title: "Jazz Night Under the Stars".to_string(),
        description: "An evening of live jazz in the garden.".to_string(),
        category: Some(Category::Music),
        date: NaiveDate::from_ymd_opt(2024, 11, 2),
        time: "7:30 PM".to_string(),
        venue: "Blue Frog".to_string(),
        city: "Mumbai".to_string(),
        state: "Maharashtra".to_string(),
        max_attendees: Some(250),
        ..EventDetails::new()
    };
    draft.send(DraftAction::UpdateDetails(Box::new(details)))?;
    draft.send(DraftAction::AddTicketType)?;

    let added = draft.state(|s| s.ticket_types.last().map(|t| t.id.clone()));
    if let Some(id) = added {
        draft.send(DraftAction::UpdateTicketType {
            id,
            patch: TicketTypePatch {
                name: Some("Front Row".to_string()),
                price: Some(Money::new(1500)),
                quantity: Some(40),
                ..TicketTypePatch::default()
            },
        })?;
    }
    for tag in ["jazz", "live music", " jazz "] {
        draft.send(DraftAction::AddTag { tag: tag.to_string() })?;
    }

    draft.send(DraftAction::Submit { publish: true })?;
    draft.state(|s| {
        println!("  ticket types: {}", s.ticket_types.len());
        println!("  tags: {}", s.tags.join(", "));
        match &s.last_receipt {
            Some(receipt) => println!(
                "  {:?} '{}' as {}",
                receipt.status, receipt.title, receipt.reference
            ),
            None => println!("  not submitted"),
        }
    });

    Ok(())
}
