use mtime::{CounterConfig, MeanTimeCounter, Pacer, ScopedTimer, Unit, msleep, usleep};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Optional JSON counter configuration, e.g. `MTIME_CONFIG='{"target_repeats":5,"unit":"us"}'`
const CONFIG_ENV: &str = "MTIME_CONFIG";

fn load_config() -> CounterConfig {
    match std::env::var(CONFIG_ENV) {
        Ok(json) => CounterConfig::from_json(&json).unwrap_or_else(|err| {
            tracing::warn!(%err, "ignoring {}", CONFIG_ENV);
            CounterConfig::new().target_repeats(10)
        }),
        Err(_) => CounterConfig::new().target_repeats(10),
    }
}

fn main() {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();

    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set tracing subscriber: {}", err);
    }

    let config = load_config();
    tracing::info!(?config, "starting mtime demo");

    let _total = ScopedTimer::with_head("main", "demo loop");
    let counter = MeanTimeCounter::from_config(&config);

    for frame in 0..30u64 {
        let _pace = Pacer::new(20, Unit::Millis);

        {
            let _g = counter.guard("capture");
            msleep(2);
        }

        counter.add_start("process");
        usleep(500 + (frame % 5) as i64 * 300);
        counter.add_end("process");

        counter.report_all_with_head("main", config.unit);
    }
}
