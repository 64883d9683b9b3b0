//! Throughput benchmarks for the lock-free book

use std::sync::Arc;
use std::thread;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use matching_engine::{Market, MarketConfig, NoopListener, OrderBook};
use types::ids::InstrumentId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

fn order(i: u64) -> Order {
    let side = if i % 2 == 0 { Side::BUY } else { Side::SELL };
    let price = 990 + (i * 7) % 21;
    Order::new(side, InstrumentId::new(0), Quantity::new(1 + i % 50), Price::new(price))
}

fn bench_add_and_match(c: &mut Criterion) {
    c.bench_function("add_then_match_1k", |b| {
        b.iter(|| {
            let book = OrderBook::new(InstrumentId::new(0));
            for i in 0..1_000 {
                book.add_order(order(i));
                black_box(book.match_orders());
            }
        })
    });
}

fn bench_contended_routing(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_routing");

    for threads in [1u64, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(threads), &threads, |b, &threads| {
            b.iter(|| {
                let market = Arc::new(
                    Market::with_listener(MarketConfig::with_instruments(1), Arc::new(NoopListener))
                        .unwrap(),
                );
                let handles: Vec<_> = (0..threads)
                    .map(|t| {
                        let market = Arc::clone(&market);
                        thread::spawn(move || {
                            for i in 0..250 {
                                let o = order(t * 1_000 + i);
                                let _ = market.route(o.side, o.instrument, o.quantity, o.price);
                            }
                        })
                    })
                    .collect();
                for handle in handles {
                    let _ = handle.join();
                }
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_add_and_match, bench_contended_routing);
criterion_main!(benches);
