//! Immutable, priority-ordered order sequences
//!
//! A `SideOrders` is one side of a published book snapshot. It is never
//! mutated in place: every change returns a new sequence and the old one
//! stays valid for any reader still holding it. The backing vector is shared
//! through an `Arc`, so cloning a side is cheap and a book update only pays
//! for copying the side it actually touches.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use types::numeric::{Price, Quantity};
use types::order::{Order, Side};

/// Price ordering for one side of the book
pub trait SidePriority {
    /// Side whose orders this ordering holds
    const SIDE: Side;

    /// True if an order at `price` rests strictly ahead of one at `other`
    fn outranks(price: Price, other: Price) -> bool;
}

/// Priority-ordered, copy-on-write sequence of resting orders
///
/// Orders are kept sorted by `P`, with equal prices ordered by ascending
/// arrival sequence. Every resting order has a positive quantity.
pub struct SideOrders<P> {
    orders: Arc<Vec<Order>>,
    _priority: PhantomData<fn() -> P>,
}

impl<P: SidePriority> SideOrders<P> {
    /// Create an empty side
    pub fn new() -> Self {
        Self {
            orders: Arc::new(Vec::new()),
            _priority: PhantomData,
        }
    }

    /// True if `resting` stays ahead of a newly arriving `incoming` order
    fn rests_ahead(resting: &Order, incoming: &Order) -> bool {
        P::outranks(resting.price, incoming.price)
            || (resting.price == incoming.price && resting.sequence <= incoming.sequence)
    }

    /// Return a new side with `order` inserted at its priority position
    pub fn insert(&self, order: Order) -> Self {
        debug_assert_eq!(order.side, P::SIDE, "order inserted on the wrong side");

        let position = self
            .orders
            .partition_point(|resting| Self::rests_ahead(resting, &order));

        let mut orders = Vec::with_capacity(self.orders.len() + 1);
        orders.extend_from_slice(&self.orders[..position]);
        orders.push(order);
        orders.extend_from_slice(&self.orders[position..]);

        Self {
            orders: Arc::new(orders),
            _priority: PhantomData,
        }
    }

    /// Return a new side whose best order has `remaining` shares left
    ///
    /// The best order is removed once nothing remains; otherwise it is
    /// replaced by a copy holding the reduced quantity.
    pub fn with_best_remaining(&self, remaining: Quantity) -> Self {
        let mut orders = Vec::clone(&self.orders);

        if let Some(best) = orders.first().copied() {
            if remaining.is_zero() {
                orders.remove(0);
            } else {
                orders[0] = best.with_quantity(remaining);
            }
        }

        Self {
            orders: Arc::new(orders),
            _priority: PhantomData,
        }
    }

    /// Best resting order (head of the sequence)
    pub fn best(&self) -> Option<&Order> {
        self.orders.first()
    }

    pub fn best_price(&self) -> Option<Price> {
        self.best().map(|order| order.price)
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Order> {
        self.orders.iter()
    }

    /// Sum of resting shares on this side
    pub fn total_quantity(&self) -> Quantity {
        self.orders.iter().map(|order| order.quantity).sum()
    }

    /// Aggregated (price, quantity) for the best `levels` distinct prices
    pub fn depth(&self, levels: usize) -> Vec<(Price, Quantity)> {
        let mut depth: Vec<(Price, Quantity)> = Vec::new();

        for order in self.orders.iter() {
            match depth.last_mut() {
                Some((price, quantity)) if *price == order.price => {
                    *quantity = *quantity + order.quantity;
                }
                _ => {
                    if depth.len() == levels {
                        break;
                    }
                    depth.push((order.price, order.quantity));
                }
            }
        }

        depth
    }

    /// Check the ordering and positive-quantity invariants
    pub fn is_well_formed(&self) -> bool {
        let ordered = self.orders.windows(2).all(|pair| {
            let (ahead, behind) = (&pair[0], &pair[1]);
            P::outranks(ahead.price, behind.price)
                || (ahead.price == behind.price && ahead.sequence <= behind.sequence)
        });

        ordered
            && self
                .orders
                .iter()
                .all(|order| !order.quantity.is_zero() && order.side == P::SIDE)
    }
}

impl<P: SidePriority> Default for SideOrders<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> Clone for SideOrders<P> {
    fn clone(&self) -> Self {
        Self {
            orders: Arc::clone(&self.orders),
            _priority: PhantomData,
        }
    }
}

impl<P> fmt::Debug for SideOrders<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.orders.iter()).finish()
    }
}

impl<P> PartialEq for SideOrders<P> {
    fn eq(&self, other: &Self) -> bool {
        self.orders == other.orders
    }
}
