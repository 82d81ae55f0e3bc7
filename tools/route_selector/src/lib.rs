pub mod aggregator;
pub mod pool;
pub mod selector;
pub mod simulate;
