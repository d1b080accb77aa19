//! Order Calculator Benchmarks
//!
//! - Totals over the bundled festival catalog
//! - Totals over a wide catalog with every tier selected
//! - Quantity changes through the selection store
//!
//! Run with: `cargo bench -p eventhive`

#![allow(missing_docs)] // Benchmarks don't need extensive docs
#![allow(clippy::expect_used)]

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use eventhive::catalog::{Catalog, TicketTier};
use eventhive::fixtures::{festival_catalog, festival_event_id};
use eventhive::gateway::LoggingGateway;
use eventhive::order::{self, OrderTotals};
use eventhive::reducers::SelectionEnvironment;
use eventhive::selection::SelectionState;
use eventhive::{SelectionAction, SelectionReducer, TicketSelection};
use eventhive_core::environment::SystemClock;
use eventhive_runtime::Store;
use std::sync::Arc;

fn wide_catalog(tiers: u32) -> Catalog {
    Catalog::new(
        (0..tiers)
            .map(|i| TicketTier::new(format!("tier-{i}"), format!("Tier {i}"), u64::from(i) * 100, 1_000))
            .collect(),
    )
    .expect("generated ids are unique")
}

fn select_all(catalog: &Catalog) -> SelectionState {
    let mut selection = SelectionState::new();
    for (i, tier) in catalog.iter().enumerate() {
        let _ = selection.set_quantity(catalog, tier.id.as_str(), i64::try_from(i % 7 + 1).unwrap_or(1));
    }
    selection
}

fn bench_totals(c: &mut Criterion) {
    let mut group = c.benchmark_group("order_totals");

    let festival = festival_catalog().expect("bundled catalog parses");
    let selection = select_all(&festival);
    group.bench_function("festival", |b| {
        b.iter(|| OrderTotals::compute(black_box(&festival), black_box(&selection)));
    });

    for tiers in [10u32, 100, 1_000] {
        let catalog = wide_catalog(tiers);
        let selection = select_all(&catalog);
        group.throughput(Throughput::Elements(u64::from(tiers)));
        group.bench_with_input(BenchmarkId::new("total_price", tiers), &tiers, |b, _| {
            b.iter(|| order::total_price(black_box(&catalog), black_box(&selection)));
        });
        group.bench_with_input(BenchmarkId::new("booking_summary", tiers), &tiers, |b, _| {
            b.iter(|| order::booking_summary(black_box(&catalog), black_box(&selection)));
        });
    }

    group.finish();
}

fn bench_store_quantity_changes(c: &mut Criterion) {
    let mut group = c.benchmark_group("selection_store");
    group.throughput(Throughput::Elements(1));

    let catalog = festival_catalog().expect("bundled catalog parses");
    let mut store = Store::new(
        TicketSelection::new(festival_event_id(), catalog),
        SelectionReducer::new(),
        SelectionEnvironment::new(Arc::new(SystemClock), LoggingGateway::shared_booking()),
    );

    let mut requested = 0i64;
    group.bench_function("set_quantity", |b| {
        b.iter(|| {
            requested = (requested + 37) % 300;
            store
                .send(black_box(SelectionAction::set_quantity("vip", requested)))
                .expect("quantity changes never feed back")
        });
    });

    group.finish();
}

criterion_group!(benches, bench_totals, bench_store_quantity_changes);
criterion_main!(benches);
