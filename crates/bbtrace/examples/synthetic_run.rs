//! Drives a tracing session with synthetic discovered blocks and several
//! worker threads standing in for target threads, then prints the profile to
//! stderr.
//!
//! Run with: `cargo run --example synthetic_run`

use bbtrace::{SessionConfig, TraceSession};
use tracing_subscriber::EnvFilter;

fn main() -> bbtrace::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("bbtrace=info".parse().unwrap()),
        )
        .with_target(false)
        .init();

    bbtrace::metrics::init();

    let session = TraceSession::new(SessionConfig::new())?;

    let hot = session.register_block(0x0040_1020);
    let warm = session.register_block(0x0040_1080);
    let cold = session.register_block(0x0040_10f4);

    std::thread::scope(|s| {
        for _ in 0..4 {
            let hot = hot.clone();
            let warm = warm.clone();
            s.spawn(move || {
                for i in 0..100_000_u32 {
                    hot.hit();
                    if i % 64 == 0 {
                        warm.hit();
                    }
                }
            });
        }
    });
    cold.hit();

    session.finish()
}
