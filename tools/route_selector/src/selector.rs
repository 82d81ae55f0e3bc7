//! Dual-route selection.
//!
//! Every quote request races the bridge pool against the external
//! aggregator and keeps whichever pays more, with ties going to the pool
//! (no aggregator fee surface, one less hop). Requests are debounced and
//! carry a generation number so a slow round trip can never overwrite the
//! result of a newer request.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::aggregator::AggregatorApi;
use crate::pool::{unix_now, Direction, PoolSource};
use crate::simulate::RouteSimulator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteSource {
    Pool,
    Aggregator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    /// Best executable route for the request.
    Route {
        source: RouteSource,
        out_amount: u64,
    },
    /// Neither side can serve the trade right now.
    NoRoute,
    /// A newer request started while this one was in flight; the result
    /// must be discarded, not rendered.
    Superseded,
}

/// Pure decision rule, separated out so it can be tested without any I/O.
/// Ties go to the pool.
pub fn pick_route(pool_out: Option<u64>, aggregator_out: Option<u64>) -> Selection {
    match (pool_out, aggregator_out) {
        (None, None) => Selection::NoRoute,
        (Some(out), None) => Selection::Route {
            source: RouteSource::Pool,
            out_amount: out,
        },
        (None, Some(out)) => Selection::Route {
            source: RouteSource::Aggregator,
            out_amount: out,
        },
        (Some(pool), Some(agg)) => {
            if agg > pool {
                Selection::Route {
                    source: RouteSource::Aggregator,
                    out_amount: agg,
                }
            } else {
                Selection::Route {
                    source: RouteSource::Pool,
                    out_amount: pool,
                }
            }
        }
    }
}

pub struct QuoteRequest {
    pub direction: Direction,
    pub amount_in: u64,
    /// Mint addresses as the aggregator expects them.
    pub input_mint: String,
    pub output_mint: String,
    /// Account the aggregator swap would execute as.
    pub user: String,
}

pub struct QuoteEngine<P, A, S> {
    pool: P,
    aggregator: A,
    simulator: S,
    debounce: Duration,
    aggregator_timeout: Duration,
    generation: AtomicU64,
}

impl<P, A, S> QuoteEngine<P, A, S>
where
    P: PoolSource,
    A: AggregatorApi,
    S: RouteSimulator,
{
    pub fn new(
        pool: P,
        aggregator: A,
        simulator: S,
        debounce: Duration,
        aggregator_timeout: Duration,
    ) -> Self {
        Self {
            pool,
            aggregator,
            simulator,
            debounce,
            aggregator_timeout,
            generation: AtomicU64::new(0),
        }
    }

    /// Quote both routes and pick the better one. Safe to call
    /// concurrently; only the most recent caller gets a non-Superseded
    /// answer.
    pub async fn quote(&self, request: &QuoteRequest) -> Result<Selection> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        // Debounce: absorb bursts of keystroke-speed requests before doing
        // any network work.
        tokio::time::sleep(self.debounce).await;
        if self.is_superseded(generation) {
            return Ok(Selection::Superseded);
        }

        let (pool_result, aggregator_result) = tokio::join!(
            self.pool_quote(request),
            self.aggregator_quote(request),
        );
        if self.is_superseded(generation) {
            debug!(generation, "dropping stale quote result");
            return Ok(Selection::Superseded);
        }

        let pool_out = pool_result?;
        let aggregator_out = aggregator_result?;
        let selection = pick_route(pool_out, aggregator_out);
        info!(?selection, pool_out, aggregator_out, "route selected");
        Ok(selection)
    }

    fn is_superseded(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) != generation
    }

    async fn pool_quote(&self, request: &QuoteRequest) -> Result<Option<u64>> {
        let snapshot = match self.pool.snapshot().await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                debug!(%err, "pool snapshot failed, treating as no route");
                return Ok(None);
            }
        };
        Ok(snapshot.preview(request.direction, request.amount_in, unix_now()))
    }

    /// Aggregator leg: quote, fetch the swap transaction, simulate it. Any
    /// failure or timeout along the way degrades to None.
    async fn aggregator_quote(&self, request: &QuoteRequest) -> Result<Option<u64>> {
        let leg = async {
            let quote = match self
                .aggregator
                .quote(&request.input_mint, &request.output_mint, request.amount_in)
                .await?
            {
                Some(quote) => quote,
                None => return Ok::<Option<u64>, anyhow::Error>(None),
            };
            let tx = self.aggregator.swap_transaction(&quote, &request.user).await?;
            let outcome = self.simulator.simulate(&tx).await?;
            if outcome.is_success() {
                Ok(Some(quote.out_amount))
            } else {
                debug!(?outcome, "aggregator route failed simulation");
                Ok(None)
            }
        };
        match tokio::time::timeout(self.aggregator_timeout, leg).await {
            Ok(result) => result.or(Ok(None)),
            Err(_) => {
                debug!("aggregator leg timed out");
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aggregator_wins_only_when_strictly_better() {
        assert_eq!(
            pick_route(Some(100), Some(101)),
            Selection::Route {
                source: RouteSource::Aggregator,
                out_amount: 101
            }
        );
        assert_eq!(
            pick_route(Some(100), Some(99)),
            Selection::Route {
                source: RouteSource::Pool,
                out_amount: 100
            }
        );
    }

    #[test]
    fn tie_goes_to_pool() {
        assert_eq!(
            pick_route(Some(100), Some(100)),
            Selection::Route {
                source: RouteSource::Pool,
                out_amount: 100
            }
        );
    }

    #[test]
    fn one_sided_quotes_win_by_default() {
        assert_eq!(
            pick_route(Some(42), None),
            Selection::Route {
                source: RouteSource::Pool,
                out_amount: 42
            }
        );
        assert_eq!(
            pick_route(None, Some(42)),
            Selection::Route {
                source: RouteSource::Aggregator,
                out_amount: 42
            }
        );
    }

    #[test]
    fn no_quotes_means_no_route() {
        assert_eq!(pick_route(None, None), Selection::NoRoute);
    }
}
