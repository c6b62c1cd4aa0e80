use common::{init_structured_logging, LoggingConfig, OperationTimer, Timer};
use std::time::Duration;
use tracing::Level;

#[test]
fn test_logging_initialises_once() {
    let config = LoggingConfig {
        level: Level::DEBUG,
        color_output: false,
        ..LoggingConfig::default()
    };

    assert!(init_structured_logging(config.clone()).is_ok());
    // Второй глобальный subscriber установить нельзя
    assert!(init_structured_logging(config).is_err());

    tracing::info!(items_count = 4u64, "logging is live");
}

#[test]
fn test_operation_timer_measures_wrapped_work() {
    let timer = OperationTimer::new("sleep").with_items(1);
    std::thread::sleep(Duration::from_millis(3));
    let elapsed = timer.finish();

    assert!(elapsed >= Duration::from_millis(3));
    assert!(elapsed.as_secs_f64().is_finite());
}

#[test]
fn test_timer_pairs() {
    let start = Timer::now();
    let end = Timer::now();
    assert!(Timer::elapsed(start, end) >= Duration::ZERO);
    assert_eq!(Timer::elapsed(end, start), Duration::ZERO);
}
