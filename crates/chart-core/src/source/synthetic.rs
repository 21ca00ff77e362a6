// File: crates/chart-core/src/source/synthetic.rs
// Summary: Seeded synthetic tick generator (additive random walk with Gaussian steps).

use chrono::{Duration, Local, NaiveDateTime};
use futures_util::stream::{self, BoxStream, StreamExt};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::TickSource;
use crate::types::Tick;

#[derive(Clone, Debug)]
pub struct SyntheticTickSource {
    seed: u64,
    start_price: f64,
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl SyntheticTickSource {
    pub fn new(seed: u64, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { seed, start_price: 1000.0, start, end }
    }

    /// One year of ticks ending now (local time).
    pub fn last_year(seed: u64) -> Self {
        let end = Local::now().naive_local();
        Self::new(seed, end - Duration::days(365), end)
    }

    pub fn with_start_price(mut self, price: f64) -> Self {
        self.start_price = price;
        self
    }
}

impl TickSource for SyntheticTickSource {
    fn ticks(&self) -> BoxStream<'_, Tick> {
        stream::iter(RandomWalk {
            rng: StdRng::seed_from_u64(self.seed),
            time: self.start,
            end: self.end,
            price: self.start_price,
        })
        .boxed()
    }
}

struct RandomWalk {
    rng: StdRng,
    time: NaiveDateTime,
    end: NaiveDateTime,
    price: f64,
}

impl Iterator for RandomWalk {
    type Item = Tick;

    fn next(&mut self) -> Option<Tick> {
        if self.time >= self.end {
            return None;
        }
        let volume = next_gaussian(&mut self.rng, 100.0, 10_000.0).round().clamp(1.0, 100.0) as i32;
        let tick = Tick::new(self.time, self.price, volume);

        let seconds = next_gaussian(&mut self.rng, 500.0, 5_000.0).round().clamp(1.0, 1_000.0) as i64;
        self.time += Duration::seconds(seconds);
        self.price += next_gaussian(&mut self.rng, 0.0, 0.05);
        Some(tick)
    }
}

/// Normal deviate via the polar Box-Muller method.
pub fn next_gaussian<R: Rng + ?Sized>(rng: &mut R, mu: f64, sigma: f64) -> f64 {
    loop {
        let v1 = 2.0 * rng.random::<f64>() - 1.0;
        let v2 = 2.0 * rng.random::<f64>() - 1.0;
        let r2 = v1 * v1 + v2 * v2;
        if r2 < 1.0 && r2 != 0.0 {
            let polar = (-2.0 * r2.ln() / r2).sqrt();
            return v1 * polar * sigma + mu;
        }
    }
}
