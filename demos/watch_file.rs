//! # Example: watch_file
//!
//! Watches a sentinel file with the built-in [`LogWriter`] attached. A helper
//! task plays the operator and writes `exit` into the file after two seconds.
//! A parent token shows how the watch joins an application-wide shutdown.
//!
//! ## Flow
//! ```text
//! main()
//!   ├─► PollingTask::builder()
//!   │     .with_reader(SentinelFileReader)    (creates file with "Running")
//!   │     .with_subscribers([LogWriter])
//!   │     .with_cancellation(&root)
//!   │     .build()?.run()
//!   ├─► operator task: sleep 2s ─► write "exit"
//!   └─► watch.await
//!         ├─► ExitObserved
//!         ├─► CleanupFinished (file deleted)
//!         └─► WatchStopped
//! ```
//!
//! ## Run
//! ```bash
//! cargo run --example watch_file --features logging
//! ```

use std::{sync::Arc, time::Duration};

use exitwatch::{LogWriter, PollingTask, SentinelFileReader, Subscribe, WatchConfig};
use tokio_util::sync::CancellationToken;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let path = std::env::temp_dir().join("exitwatch-demo.state");
    let cfg = WatchConfig {
        interval: Duration::from_millis(500),
        ..WatchConfig::default()
    };

    let root = CancellationToken::new();
    let subs: Vec<Arc<dyn Subscribe>> = vec![Arc::new(LogWriter::new())];

    let watch = PollingTask::builder()
        .with_reader(Arc::new(SentinelFileReader::new(&path, cfg.match_options())))
        .with_config(&cfg)
        .with_subscribers(subs)
        .with_cancellation(&root)
        .build()?
        .run();

    let operator_path = path.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_secs(2)).await;
        println!("[operator] writing exit into {}", operator_path.display());
        let _ = tokio::fs::write(&operator_path, "exit").await;
    });

    let report = watch.await?;
    println!(
        "[main] done: reason={:?} polls={} file_exists={}",
        report.reason,
        report.polls,
        path.exists()
    );
    Ok(())
}
