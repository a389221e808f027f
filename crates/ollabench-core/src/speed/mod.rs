//! Token-throughput benchmark across models.

pub mod benchmark;
pub mod host;

pub use benchmark::{measure_run, summarize, tokens_per_second, Benchmark, SpeedSummary};
pub use host::{collect_computer_info, hostname};
