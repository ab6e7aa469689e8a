//! Price slider arithmetic: step, marks, and thumb separation.

use serde::Serialize;

use crate::price::{PriceBounds, PriceRange};

/// Largest gap the two thumbs are kept apart by.
pub const MIN_DISTANCE_BETWEEN_THUMBS: u64 = 1_000;

/// Renders a price for display. Implemented by currency formatters.
pub trait FormatPrice {
    fn format_price(&self, amount: u64) -> String;
}

impl<F> FormatPrice for F
where
    F: Fn(u64) -> String,
{
    fn format_price(&self, amount: u64) -> String {
        self(amount)
    }
}

/// Slider step, coarser for wider catalogs.
pub fn price_step(bounds: &PriceBounds) -> u64 {
    match bounds.span() {
        0..=1_000 => 10,
        1_001..=10_000 => 100,
        10_001..=100_000 => 500,
        _ => 1_000,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SliderMark {
    pub value: u64,
    pub label: String,
}

/// Marks at both ends, plus the midpoint on wide ranges.
pub fn slider_marks(bounds: &PriceBounds, format: &impl FormatPrice) -> Vec<SliderMark> {
    let mark = |value| SliderMark {
        value,
        label: format.format_price(value),
    };

    let mut marks = vec![mark(bounds.min_price())];
    if bounds.span() > 2_000 {
        marks.push(mark(bounds.min_price() + bounds.span() / 2));
    }
    if bounds.max_price() != bounds.min_price() {
        marks.push(mark(bounds.max_price()));
    }
    marks
}

/// Which thumb the shopper dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Thumb {
    Lower,
    Upper,
}

/// Clamp a dragged slider value into the bounds and keep the thumbs apart.
///
/// The separation is the smaller of [`MIN_DISTANCE_BETWEEN_THUMBS`] and a
/// hundredth of the span, so narrow catalogs stay usable. The dragged thumb
/// is held back when the gap would close; the other thumb never moves.
pub fn adjust_thumbs(bounds: &PriceBounds, value: [u64; 2], active: Thumb) -> PriceRange {
    let (min, max) = (bounds.min_price(), bounds.max_price());
    let clamp = |v: u64| v.clamp(min, max);
    let [mut lo, mut hi] = value.map(clamp);
    if lo > hi {
        std::mem::swap(&mut lo, &mut hi);
    }

    let distance = MIN_DISTANCE_BETWEEN_THUMBS.min(bounds.span() / 100);
    match active {
        Thumb::Lower => lo = lo.min(hi.saturating_sub(distance)).max(min),
        Thumb::Upper => hi = hi.max(lo.saturating_add(distance)).min(max),
    }
    PriceRange::new(lo, hi)
}
