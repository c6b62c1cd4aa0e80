use std::io;
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, EnvFilter, Registry};

use crate::timer::{Timer, Timestamp};

/// @component: {"k":"C","id":"structured_logging","t":"stderr structured logging","m":{"cur":100,"tgt":100,"u":"%"},"f":["logging","tracing"]}
/// Конфигурация для structured logging
///
/// Logs always go to stderr: stdout is reserved for the benchmark report.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Минимальный уровень логирования (если `RUST_LOG` не задан)
    pub level: Level,
    /// Включить цветной вывод
    pub color_output: bool,
    /// Включить номера строк
    pub include_line_numbers: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::WARN,
            color_output: true,
            include_line_numbers: cfg!(debug_assertions),
        }
    }
}

/// Инициализировать structured logging
///
/// `RUST_LOG` wins over `config.level` when set.
pub fn init_structured_logging(config: LoggingConfig) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.level.to_string()));

    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_line_number(config.include_line_numbers)
        .with_ansi(config.color_output)
        .with_span_events(FmtSpan::CLOSE);

    let subscriber = Registry::default().with(env_filter).with(fmt_layer);

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

/// Вспомогательная структура для измерения времени операций
///
/// The clock starts in [`OperationTimer::new`] and stops at the top of
/// [`OperationTimer::finish`], before anything is logged.
pub struct OperationTimer {
    start: Timestamp,
    operation_name: String,
    items_count: Option<u64>,
}

impl OperationTimer {
    pub fn new(operation_name: impl Into<String>) -> Self {
        // Имя строится до старта часов: аллокация не попадает в замер
        let operation_name = operation_name.into();
        Self {
            start: Timer::now(),
            operation_name,
            items_count: None,
        }
    }

    /// Number of elements processed, used to derive throughput.
    pub fn with_items(mut self, items: u64) -> Self {
        self.items_count = Some(items);
        self
    }

    pub fn operation_name(&self) -> &str {
        &self.operation_name
    }

    pub fn finish(self) -> Duration {
        let elapsed = Timer::elapsed(self.start, Timer::now());
        let duration_us = elapsed.as_micros() as u64;

        match self.items_count {
            Some(items) => {
                let throughput = throughput_per_sec(items, elapsed);
                tracing::info!(
                    operation = %self.operation_name,
                    duration_us = duration_us,
                    items_count = items,
                    throughput = throughput,
                    success = true,
                    "Operation completed"
                );
            }
            None => {
                tracing::info!(
                    operation = %self.operation_name,
                    duration_us = duration_us,
                    success = true,
                    "Operation completed"
                );
            }
        }

        elapsed
    }
}

/// Items per second; zero when the duration is too small to measure.
fn throughput_per_sec(items: u64, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        items as f64 / secs
    } else {
        0.0
    }
}
