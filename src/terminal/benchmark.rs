//! Concurrent search load test
//!
//! A fixed queue of searches drained by a small pool of scoped worker threads.

use chrono::{Days, NaiveDate};
use log::{info, warn};
use std::collections::VecDeque;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

use crate::client::FlightApi;
use crate::query::QuerySpec;

pub const BENCHMARK_REQUESTS: u64 = 40;
pub const BENCHMARK_WORKERS: usize = 6;
const BENCHMARK_FROM: &str = "KLR";
const BENCHMARK_TO: &str = "ARN";

/// One-way searches on consecutive days starting tomorrow
pub fn benchmark_queries(today: NaiveDate) -> Vec<QuerySpec> {
    (1..=BENCHMARK_REQUESTS)
        .filter_map(|offset| today.checked_add_days(Days::new(offset)))
        .map(|date| QuerySpec::one_way(BENCHMARK_FROM, BENCHMARK_TO, date))
        .collect()
}

/// Run every query with at most `workers` in flight. Returns the total elapsed time.
pub fn run_benchmark<C, W>(
    client: &C,
    queries: Vec<QuerySpec>,
    workers: usize,
    out: &mut W,
) -> io::Result<Duration>
where
    C: FlightApi,
    W: Write + Send,
{
    info!(
        "Benchmark: {} searches on {} workers",
        queries.len(),
        workers
    );

    let queue = Mutex::new(VecDeque::from(queries));
    let console = Mutex::new(out);
    let started = Instant::now();

    thread::scope(|scope| {
        for _ in 0..workers.max(1) {
            scope.spawn(|| {
                loop {
                    let next = queue
                        .lock()
                        .unwrap_or_else(PoisonError::into_inner)
                        .pop_front();
                    let Some(query) = next else { break };

                    let timer = Instant::now();
                    let line = match client.search(&query) {
                        Ok(result) => format!(
                            "Got {} in {:.2}",
                            result.outbound_flights.len(),
                            timer.elapsed().as_secs_f64()
                        ),
                        Err(e) => format!(
                            "Failed {} after {:.2}: {}",
                            query,
                            timer.elapsed().as_secs_f64(),
                            e
                        ),
                    };

                    let mut console = console.lock().unwrap_or_else(PoisonError::into_inner);
                    if let Err(e) = writeln!(console, "{}", line) {
                        warn!("Benchmark output failed: {}", e);
                    }
                }
            });
        }
    });

    let elapsed = started.elapsed();
    let out = console.into_inner().unwrap_or_else(PoisonError::into_inner);
    writeln!(out, "{:.2}", elapsed.as_secs_f64())?;
    Ok(elapsed)
}
