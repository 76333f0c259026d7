//! Line format for service logs.
//!
//! `<timestamp> - <service_name> - <LEVEL> - <message>[ key=value...]`
//!
//! Log-scraping tooling parses this, so keep it stable.

use std::fmt;

use chrono::Local;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;

use crate::level::LogLevel;

/// Target carried by critical records so the formatter can tell them apart
/// from plain errors.
pub const CRITICAL_TARGET: &str = "storefront::critical";

/// Local time with millisecond precision, e.g. `2026-10-19 18:03:11,123`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Event formatter that stamps every line with one service's name.
#[derive(Debug, Clone)]
pub struct ServiceLineFormat {
    service_name: String,
}

impl ServiceLineFormat {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self {
            service_name: service_name.into(),
        }
    }
}

impl<S, N> FormatEvent<S, N> for ServiceLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let metadata = event.metadata();
        let level = if metadata.target() == CRITICAL_TARGET {
            LogLevel::Critical
        } else {
            LogLevel::from_tracing(metadata.level())
        };

        write!(
            writer,
            "{} - {} - {} - ",
            Local::now().format(TIMESTAMP_FORMAT),
            self.service_name,
            level
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}
