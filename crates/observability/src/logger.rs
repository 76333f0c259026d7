//! Per-service logger handles and the registry that hands them out.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{Dispatch, Level};
use tracing_subscriber::filter::Targets;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;

use crate::config::LogConfig;
use crate::format::{CRITICAL_TARGET, ServiceLineFormat};
use crate::level::LogLevel;

/// Handle to one service's configured output sink.
///
/// Cheap to clone; every clone writes through the same sink.
#[derive(Debug, Clone)]
pub struct Logger {
    inner: Arc<LoggerInner>,
}

#[derive(Debug)]
struct LoggerInner {
    service_name: String,
    level: LogLevel,
    dispatch: Dispatch,
}

impl Logger {
    fn build(config: &LogConfig, writer: BoxMakeWriter) -> Self {
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(config.level().as_level_filter())
            .with_ansi(false)
            .with_writer(writer)
            .event_format(ServiceLineFormat::new(config.service_name()))
            .finish();

        // Plain error events share tracing's ERROR level with critical ones;
        // only the critical target may pass a CRITICAL sink.
        let dispatch = match config.level() {
            LogLevel::Critical => Dispatch::new(
                subscriber.with(Targets::new().with_target(CRITICAL_TARGET, Level::ERROR)),
            ),
            _ => Dispatch::new(subscriber),
        };

        Self {
            inner: Arc::new(LoggerInner {
                service_name: config.service_name().to_owned(),
                level: config.level(),
                dispatch,
            }),
        }
    }

    pub fn service_name(&self) -> &str {
        &self.inner.service_name
    }

    pub fn level(&self) -> LogLevel {
        self.inner.level
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.inner.level
    }

    /// Whether two handles share the same sink.
    pub fn ptr_eq(a: &Logger, b: &Logger) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    /// Make this sink the process-wide `tracing` default.
    ///
    /// Returns `false` when a global default already exists.
    pub fn install_global(&self) -> bool {
        crate::tracing::install_global(&self.inner.dispatch)
    }

    /// Run `f` with this service's sink as the current `tracing` default, so
    /// structured `tracing` macros inside it land in this service's output.
    pub fn in_scope<T>(&self, f: impl FnOnce() -> T) -> T {
        tracing::dispatcher::with_default(&self.inner.dispatch, f)
    }

    pub fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        self.in_scope(|| match level {
            LogLevel::Debug => tracing::debug!("{message}"),
            LogLevel::Info => tracing::info!("{message}"),
            LogLevel::Warn => tracing::warn!("{message}"),
            LogLevel::Error => tracing::error!("{message}"),
            LogLevel::Critical => tracing::error!(target: CRITICAL_TARGET, "{message}"),
        });
    }

    pub fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    pub fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    pub fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    pub fn critical(&self, message: &str) {
        self.log(LogLevel::Critical, message);
    }
}

type WriterFactory = Arc<dyn Fn() -> BoxMakeWriter + Send + Sync>;

/// One logger per service name, created at most once.
///
/// The first `get_or_init` for a name builds its sink; every later call for the
/// same name returns that handle, whatever level it asks for.
pub struct LoggerRegistry {
    loggers: Mutex<HashMap<String, Logger>>,
    make_writer: WriterFactory,
}

impl LoggerRegistry {
    /// Registry whose loggers write to standard output.
    pub fn stdout() -> Self {
        Self::with_writer(std::io::stdout)
    }

    /// Registry whose loggers write through `make_writer`.
    pub fn with_writer<M>(make_writer: M) -> Self
    where
        M: for<'a> MakeWriter<'a> + Clone + Send + Sync + 'static,
    {
        Self {
            loggers: Mutex::new(HashMap::new()),
            make_writer: Arc::new(move || BoxMakeWriter::new(make_writer.clone())),
        }
    }

    pub fn get_or_init(&self, config: LogConfig) -> Logger {
        // A panic while holding the lock cannot leave the map half-written.
        let mut loggers = self.loggers.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(existing) = loggers.get(config.service_name()) {
            return existing.clone();
        }

        let logger = Logger::build(&config, (self.make_writer)());
        loggers.insert(config.service_name().to_owned(), logger.clone());
        logger
    }

    pub fn get(&self, service_name: &str) -> Option<Logger> {
        self.loggers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(service_name)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.loggers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl core::fmt::Debug for LoggerRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LoggerRegistry")
            .field("services", &self.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::thread;

    use chrono::NaiveDateTime;

    /// In-memory sink shared between the registry and the test.
    #[derive(Clone, Default)]
    struct Capture(Arc<Mutex<Vec<u8>>>);

    impl Capture {
        fn lines(&self) -> Vec<String> {
            let bytes = self.0.lock().unwrap();
            String::from_utf8(bytes.clone())
                .unwrap()
                .lines()
                .map(str::to_owned)
                .collect()
        }
    }

    impl io::Write for Capture {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn registry() -> (LoggerRegistry, Capture) {
        let capture = Capture::default();
        let sink = capture.clone();
        (LoggerRegistry::with_writer(move || sink.clone()), capture)
    }

    fn config(name: &str, level: LogLevel) -> LogConfig {
        LogConfig::new(name, level).unwrap()
    }

    /// Splits a line into its four ` - ` separated parts.
    fn parts(line: &str) -> (String, String, String, String) {
        let mut it = line.splitn(4, " - ");
        let ts = it.next().unwrap().to_owned();
        let service = it.next().unwrap().to_owned();
        let level = it.next().unwrap().to_owned();
        let message = it.next().unwrap().to_owned();
        (ts, service, level, message)
    }

    #[test]
    fn writes_the_service_line_format() {
        let (registry, capture) = registry();
        let logger = registry.get_or_init(config("customer-service", LogLevel::Info));

        logger.info("customer created");

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        let (ts, service, level, message) = parts(&lines[0]);
        assert_eq!(service, "customer-service");
        assert_eq!(level, "INFO");
        assert_eq!(message, "customer created");

        let (seconds, millis) = ts.split_once(',').unwrap();
        assert!(NaiveDateTime::parse_from_str(seconds, "%Y-%m-%d %H:%M:%S").is_ok());
        assert_eq!(millis.len(), 3);
        assert!(millis.chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn records_below_the_configured_level_are_dropped() {
        let (registry, capture) = registry();
        let logger = registry.get_or_init(config("product-service", LogLevel::Warn));

        logger.debug("hidden");
        logger.info("hidden");
        logger.warn("low stock");
        logger.error("db down");

        let levels: Vec<String> = capture.lines().iter().map(|l| parts(l).2).collect();
        assert_eq!(levels, vec!["WARN", "ERROR"]);
    }

    #[test]
    fn critical_is_labelled_and_filtered_above_error() {
        let (registry, capture) = registry();
        let logger = registry.get_or_init(config("product-service", LogLevel::Critical));

        logger.error("hidden");
        logger.in_scope(|| tracing::error!("plain error"));
        logger.critical("out of disk");

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        let (_, _, level, message) = parts(&lines[0]);
        assert_eq!(level, "CRITICAL");
        assert_eq!(message, "out of disk");
    }

    #[test]
    fn critical_sink_drops_plain_tracing_errors() {
        let (registry, capture) = registry();
        let logger = registry.get_or_init(config("product-service", LogLevel::Critical));

        logger.in_scope(|| {
            tracing::error!("plain error below critical");
            tracing::warn!("warning below critical");
        });
        assert!(capture.lines().is_empty());

        logger.critical("disk full");
        assert_eq!(capture.lines().len(), 1);
    }

    #[test]
    fn error_sink_still_accepts_plain_tracing_errors() {
        let (registry, capture) = registry();
        let logger = registry.get_or_init(config("product-service", LogLevel::Error));

        logger.in_scope(|| tracing::error!("db down"));
        logger.critical("disk full");

        let levels: Vec<String> = capture.lines().iter().map(|l| parts(l).2).collect();
        assert_eq!(levels, vec!["ERROR", "CRITICAL"]);
    }

    #[test]
    fn structured_tracing_events_use_the_same_format() {
        let (registry, capture) = registry();
        let logger = registry.get_or_init(config("product-service", LogLevel::Info));

        logger.in_scope(|| {
            tracing::info!(product_id = 7, "stock adjusted");
            tracing::debug!("hidden");
        });

        let lines = capture.lines();
        assert_eq!(lines.len(), 1);
        let (_, service, level, message) = parts(&lines[0]);
        assert_eq!(service, "product-service");
        assert_eq!(level, "INFO");
        assert_eq!(message, "stock adjusted product_id=7");
    }

    #[test]
    fn repeated_init_reuses_the_sink_without_duplicate_lines() {
        let (registry, capture) = registry();
        assert!(registry.is_empty());
        let first = registry.get_or_init(config("customer-service", LogLevel::Debug));
        let second = registry.get_or_init(config("customer-service", LogLevel::Error));

        assert!(Logger::ptr_eq(&first, &second));
        assert_eq!(second.level(), LogLevel::Debug);
        assert_eq!(registry.len(), 1);
        assert!(!registry.is_empty());

        second.info("once");
        assert_eq!(capture.lines().len(), 1);
    }

    #[test]
    fn loggers_for_different_services_are_independent() {
        let (registry, capture) = registry();
        let customers = registry.get_or_init(config("customer-service", LogLevel::Debug));
        let products = registry.get_or_init(config("product-service", LogLevel::Error));

        customers.debug("a");
        products.info("b");
        products.error("c");

        let services: Vec<String> = capture.lines().iter().map(|l| parts(l).1).collect();
        assert_eq!(services, vec!["customer-service", "product-service"]);
        assert!(registry.get("customer-service").is_some());
        assert!(registry.get("order-service").is_none());
    }

    #[test]
    fn concurrent_first_use_installs_exactly_one_sink() {
        let (registry, capture) = registry();
        let registry = Arc::new(registry);

        let handles: Vec<Logger> = (0..8)
            .map(|_| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    registry.get_or_init(config("customer-service", LogLevel::Info))
                })
            })
            .collect::<Vec<_>>()
            .into_iter()
            .map(|h| h.join().unwrap())
            .collect();

        assert!(handles.windows(2).all(|w| Logger::ptr_eq(&w[0], &w[1])));
        assert_eq!(registry.len(), 1);

        handles[0].info("ready");
        assert_eq!(capture.lines().len(), 1);
    }
}
