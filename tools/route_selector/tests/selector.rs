use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;

use route_selector::aggregator::{AggregatorApi, AggregatorQuote};
use route_selector::pool::{unix_now, Direction, PoolSnapshot, PoolSource};
use route_selector::selector::{QuoteEngine, QuoteRequest, RouteSource, Selection};
use route_selector::simulate::{RouteSimulator, SimOutcome};

const USDC: u64 = 1_000_000;
const WXMR: u64 = 1_000_000_000_000;

struct StaticPool(PoolSnapshot);

#[async_trait]
impl PoolSource for StaticPool {
    async fn snapshot(&self) -> Result<PoolSnapshot> {
        Ok(self.0.clone())
    }
}

fn fresh_pool() -> StaticPool {
    StaticPool(PoolSnapshot {
        buy_price: 150 * USDC,
        sell_price: 148 * USDC,
        last_price_update: unix_now(),
        enabled: true,
        wxmr_reserve: 100 * WXMR,
        usdc_reserve: 10_000 * USDC,
    })
}

struct MockAggregator {
    out_amount: Option<u64>,
    delay: Duration,
}

#[async_trait]
impl AggregatorApi for MockAggregator {
    async fn quote(&self, _: &str, _: &str, _: u64) -> Result<Option<AggregatorQuote>> {
        tokio::time::sleep(self.delay).await;
        Ok(self.out_amount.map(|out_amount| AggregatorQuote {
            out_amount,
            route_label: "Mock".to_string(),
            raw: serde_json::Value::Null,
        }))
    }

    async fn swap_transaction(&self, _: &AggregatorQuote, _: &str) -> Result<String> {
        Ok("mock-tx".to_string())
    }
}

struct MockSimulator(SimOutcome);

#[async_trait]
impl RouteSimulator for MockSimulator {
    async fn simulate(&self, _: &str) -> Result<SimOutcome> {
        Ok(self.0.clone())
    }
}

fn buy_request() -> QuoteRequest {
    QuoteRequest {
        direction: Direction::Buy,
        amount_in: 300 * USDC,
        input_mint: "usdc".to_string(),
        output_mint: "wxmr".to_string(),
        user: "user".to_string(),
    }
}

fn engine(
    aggregator: MockAggregator,
    simulator: MockSimulator,
) -> QuoteEngine<StaticPool, MockAggregator, MockSimulator> {
    QuoteEngine::new(
        fresh_pool(),
        aggregator,
        simulator,
        Duration::from_millis(0),
        Duration::from_millis(200),
    )
}

#[tokio::test]
async fn pool_wins_on_equal_output() {
    // 300 USDC at the 150 buy price is exactly 2 wXMR on both routes.
    let engine = engine(
        MockAggregator {
            out_amount: Some(2 * WXMR),
            delay: Duration::from_millis(0),
        },
        MockSimulator(SimOutcome::Success),
    );
    let selection = engine.quote(&buy_request()).await.unwrap();
    assert_eq!(
        selection,
        Selection::Route {
            source: RouteSource::Pool,
            out_amount: 2 * WXMR,
        }
    );
}

#[tokio::test]
async fn aggregator_wins_when_strictly_better() {
    let engine = engine(
        MockAggregator {
            out_amount: Some(2 * WXMR + 1),
            delay: Duration::from_millis(0),
        },
        MockSimulator(SimOutcome::Success),
    );
    let selection = engine.quote(&buy_request()).await.unwrap();
    assert_eq!(
        selection,
        Selection::Route {
            source: RouteSource::Aggregator,
            out_amount: 2 * WXMR + 1,
        }
    );
}

#[tokio::test]
async fn failed_simulation_falls_back_to_pool() {
    let engine = engine(
        MockAggregator {
            out_amount: Some(3 * WXMR),
            delay: Duration::from_millis(0),
        },
        MockSimulator(SimOutcome::Failure {
            reason: "insufficient funds".to_string(),
        }),
    );
    let selection = engine.quote(&buy_request()).await.unwrap();
    assert_eq!(
        selection,
        Selection::Route {
            source: RouteSource::Pool,
            out_amount: 2 * WXMR,
        }
    );
}

#[tokio::test]
async fn slow_aggregator_times_out_to_pool() {
    let engine = engine(
        MockAggregator {
            out_amount: Some(3 * WXMR),
            delay: Duration::from_millis(500),
        },
        MockSimulator(SimOutcome::Success),
    );
    let selection = engine.quote(&buy_request()).await.unwrap();
    assert_eq!(
        selection,
        Selection::Route {
            source: RouteSource::Pool,
            out_amount: 2 * WXMR,
        }
    );
}

#[tokio::test]
async fn disabled_pool_and_no_aggregator_is_no_route() {
    let mut pool = fresh_pool();
    pool.0.enabled = false;
    let engine = QuoteEngine::new(
        pool,
        MockAggregator {
            out_amount: None,
            delay: Duration::from_millis(0),
        },
        MockSimulator(SimOutcome::Success),
        Duration::from_millis(0),
        Duration::from_millis(200),
    );
    let selection = engine.quote(&buy_request()).await.unwrap();
    assert_eq!(selection, Selection::NoRoute);
}

#[tokio::test]
async fn newer_request_supersedes_older_one() {
    let engine = Arc::new(engine(
        MockAggregator {
            out_amount: Some(2 * WXMR),
            delay: Duration::from_millis(100),
        },
        MockSimulator(SimOutcome::Success),
    ));

    let first = {
        let engine = Arc::clone(&engine);
        tokio::spawn(async move { engine.quote(&buy_request()).await })
    };
    // Let the first request get past its debounce and into the slow leg.
    tokio::time::sleep(Duration::from_millis(20)).await;
    let second = engine.quote(&buy_request()).await.unwrap();

    assert_eq!(first.await.unwrap().unwrap(), Selection::Superseded);
    assert_eq!(
        second,
        Selection::Route {
            source: RouteSource::Pool,
            out_amount: 2 * WXMR,
        }
    );
}
