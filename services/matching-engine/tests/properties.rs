//! Property-based tests for the book invariants
//!
//! Arbitrary single-threaded order flows must always leave the book sorted,
//! uncrossed after matching, and quantity-conserving.

use matching_engine::matching::Fill;
use matching_engine::OrderBook;
use proptest::prelude::*;
use types::ids::InstrumentId;
use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

fn arb_order() -> impl Strategy<Value = Order> {
    (any::<bool>(), 1u64..=100, 1u64..=50).prop_map(|(buy, qty, price)| {
        let side = if buy { Side::BUY } else { Side::SELL };
        Order::new(side, InstrumentId::new(0), Quantity::new(qty), Price::new(price))
    })
}

proptest! {
    #[test]
    fn prop_adds_keep_sides_sorted(orders in prop::collection::vec(arb_order(), 0..200)) {
        let book = OrderBook::new(InstrumentId::new(0));
        for order in &orders {
            book.add_order(*order);
        }

        let snapshot = book.snapshot();
        let bids: Vec<u64> = snapshot.bids().iter().map(|o| o.price.as_u64()).collect();
        let asks: Vec<u64> = snapshot.asks().iter().map(|o| o.price.as_u64()).collect();
        prop_assert!(bids.windows(2).all(|w| w[0] >= w[1]));
        prop_assert!(asks.windows(2).all(|w| w[0] <= w[1]));
        prop_assert_eq!(snapshot.bids().len() + snapshot.asks().len(), orders.len());
    }

    #[test]
    fn prop_match_leaves_book_uncrossed(orders in prop::collection::vec(arb_order(), 0..200)) {
        let book = OrderBook::new(InstrumentId::new(0));
        for order in &orders {
            book.add_order(*order);
        }
        book.match_orders();

        let snapshot = book.snapshot();
        if let (Some(bid), Some(ask)) = (snapshot.best_bid(), snapshot.best_ask()) {
            prop_assert!(bid.price < ask.price);
        }
        prop_assert!(snapshot.bids().iter().all(|o| !o.quantity.is_zero()));
        prop_assert!(snapshot.asks().iter().all(|o| !o.quantity.is_zero()));
    }

    #[test]
    fn prop_routing_flow_conserves_quantity(orders in prop::collection::vec(arb_order(), 0..200)) {
        let book = OrderBook::new(InstrumentId::new(0));
        let mut input = 0u64;
        let mut matched = 0u64;

        for order in &orders {
            input += order.quantity.as_u64();
            book.add_order(*order);
            matched += book
                .match_orders()
                .iter()
                .map(|t| t.matched_quantity.as_u64())
                .sum::<u64>();
        }

        prop_assert_eq!(book.resting_quantity().as_u64(), input - 2 * matched);
    }

    #[test]
    fn prop_second_match_is_noop(orders in prop::collection::vec(arb_order(), 0..100)) {
        let book = OrderBook::new(InstrumentId::new(0));
        for order in &orders {
            book.add_order(*order);
        }
        book.match_orders();
        let settled = book.snapshot();

        prop_assert!(book.match_orders().is_empty());
        prop_assert_eq!(book.snapshot(), settled);
    }

    #[test]
    fn prop_single_step_quantities(
        buy_qty in 1u64..=1000,
        sell_qty in 1u64..=1000,
        spread in 0u64..=10,
    ) {
        let book = OrderBook::new(InstrumentId::new(0));
        let buy = Order::new(Side::BUY, InstrumentId::new(0), Quantity::new(buy_qty), Price::new(100 + spread));
        let sell = Order::new(Side::SELL, InstrumentId::new(0), Quantity::new(sell_qty), Price::new(100));
        book.add_order(buy);
        book.add_order(sell);

        let trades = book.match_orders();
        prop_assert_eq!(trades.len(), 1);

        let expected = Fill::between(buy, sell).map(|f| f.quantity);
        prop_assert_eq!(Some(trades[0].matched_quantity), expected);
        prop_assert_eq!(trades[0].matched_quantity.as_u64(), buy_qty.min(sell_qty));

        let snapshot = book.snapshot();
        let bid_left = snapshot.best_bid().map(|o| o.quantity.as_u64());
        let ask_left = snapshot.best_ask().map(|o| o.quantity.as_u64());
        if buy_qty > sell_qty {
            prop_assert_eq!(bid_left, Some(buy_qty - sell_qty));
            prop_assert_eq!(ask_left, None);
        } else if sell_qty > buy_qty {
            prop_assert_eq!(bid_left, None);
            prop_assert_eq!(ask_left, Some(sell_qty - buy_qty));
        } else {
            prop_assert!(snapshot.is_empty());
        }
    }
}
