// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 formstarter contributors

//! Tracing subscriber setup.

use anyhow::{Context, Result};
use tracing::Subscriber;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, fmt};

use crate::config::LogFormat;

/// Filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "info";

/// Build a subscriber writing `format` lines to `writer`.
pub fn build<W>(
    format: LogFormat,
    filter: EnvFilter,
    writer: W,
) -> Box<dyn Subscriber + Send + Sync>
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Json => Box::new(registry.with(fmt::layer().json().with_writer(writer))),
        LogFormat::Plain => Box::new(registry.with(fmt::layer().with_writer(writer))),
    }
}

/// Install the global subscriber on stderr. Call once, before the UI starts.
pub fn init(format: LogFormat) -> Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    tracing::subscriber::set_global_default(build(format, filter, std::io::stderr))
        .context("a global tracing subscriber is already installed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    struct BufferWriter(Arc<Mutex<Vec<u8>>>);

    impl<'a> MakeWriter<'a> for SharedBuffer {
        type Writer = BufferWriter;

        fn make_writer(&'a self) -> Self::Writer {
            BufferWriter(Arc::clone(&self.0))
        }
    }

    impl io::Write for BufferWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn json_lines_carry_structured_fields() {
        let sink = SharedBuffer::default();
        let subscriber = build(LogFormat::Json, EnvFilter::new("info"), sink.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(field = "publicId", visibility = "public", "post submitted");
            tracing::debug!("filtered out");
        });

        let text = sink.text();
        let lines: Vec<_> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        assert_eq!(lines.len(), 1);
        let parsed: serde_json::Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(parsed["level"], "INFO");
        assert_eq!(parsed["fields"]["field"], "publicId");
        assert_eq!(parsed["fields"]["message"], "post submitted");
    }

    #[test]
    fn plain_lines_are_human_readable() {
        let sink = SharedBuffer::default();
        let subscriber = build(LogFormat::Plain, EnvFilter::new("debug"), sink.clone());

        tracing::subscriber::with_default(subscriber, || {
            tracing::debug!(key = "nav.home", "missing translation");
        });

        let text = sink.text();
        assert!(text.contains("DEBUG"));
        assert!(text.contains("missing translation"));
        assert!(text.contains("nav.home"));
    }
}
