//! # Example: watch_stdin
//!
//! Keeps doing "work" until a line containing `exit` is typed on stdin.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► PollingTask::console(cfg).run()   (background, returns immediately)
//!   └─► work loop: tick every 300ms until the watch is finished
//!         └─► watch.wait() → report
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example watch_stdin
//! ```

use std::time::Duration;

use exitwatch::{PollingTask, WatchConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = WatchConfig {
        interval: Duration::from_millis(200),
        ..WatchConfig::default()
    };

    println!("type a line containing '{}' to stop", cfg.exit_token);
    let watch = PollingTask::console(&cfg).run();

    let mut ticks = 0u64;
    while !watch.is_finished() {
        ticks += 1;
        tokio::time::sleep(Duration::from_millis(300)).await;
    }

    let report = watch.wait().await?;
    println!(
        "stopped: reason={:?} polls={} work_ticks={ticks}",
        report.reason, report.polls
    );
    Ok(())
}
