//! SDK exporter adapters.
//!
//! Each exporter maps its batch with the matching mapper and hands the items
//! to a [`TelemetrySink`]. The HTTP ingestion transport is not part of this
//! crate; [`NdjsonSink`] writes the request bodies it would send.
mod logs;
mod metrics;
mod trace;

pub use logs::AzureMonitorLogExporter;
pub use metrics::AzureMonitorMetricExporter;
pub use trace::AzureMonitorSpanExporter;

use crate::config::ExporterConfig;
use crate::error::Error;
use crate::models::TelemetryItem;
use crate::serializer::{to_ndjson, LINE_SEPARATOR};
use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex};

/// Destination of mapped items.
pub trait TelemetrySink: Send + Sync + fmt::Debug {
    /// Delivers one exported batch.
    fn send(&self, items: Vec<TelemetryItem>) -> Result<(), Error>;

    /// Flushes anything buffered.
    fn flush(&self) -> Result<(), Error> {
        Ok(())
    }
}

/// Writes each batch as NDJSON, followed by a line separator.
pub struct NdjsonSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl NdjsonSink {
    pub fn new<W: Write + Send + 'static>(writer: W) -> Self {
        NdjsonSink {
            writer: Mutex::new(Box::new(writer)),
        }
    }
}

impl Default for NdjsonSink {
    fn default() -> Self {
        NdjsonSink::new(io::stdout())
    }
}

impl fmt::Debug for NdjsonSink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NdjsonSink")
    }
}

impl TelemetrySink for NdjsonSink {
    fn send(&self, items: Vec<TelemetryItem>) -> Result<(), Error> {
        if items.is_empty() {
            return Ok(());
        }
        let body = to_ndjson(&items)?;
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| Error::Other("writer lock poisoned".into()))?;
        writer.write_all(&body)?;
        writer.write_all(LINE_SEPARATOR)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), Error> {
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| Error::Other("writer lock poisoned".into()))?;
        writer.flush()?;
        Ok(())
    }
}

/// Keeps every item in memory. Clones share the same storage.
#[derive(Clone, Debug, Default)]
pub struct InMemorySink {
    items: Arc<Mutex<Vec<TelemetryItem>>>,
}

impl InMemorySink {
    pub fn new() -> Self {
        InMemorySink::default()
    }

    /// Items received so far, in export order.
    pub fn get_finished_items(&self) -> Result<Vec<TelemetryItem>, Error> {
        self.items
            .lock()
            .map(|items| items.clone())
            .map_err(|_| Error::Other("in-memory sink lock poisoned".into()))
    }

    pub fn reset(&self) {
        if let Ok(mut items) = self.items.lock() {
            items.clear();
        }
    }
}

impl TelemetrySink for InMemorySink {
    fn send(&self, items: Vec<TelemetryItem>) -> Result<(), Error> {
        self.items
            .lock()
            .map(|mut stored| stored.extend(items))
            .map_err(|_| Error::Other("in-memory sink lock poisoned".into()))
    }
}

/// Create a new Azure Monitor exporter builder.
pub fn new_exporter() -> AzureMonitorExporterBuilder {
    AzureMonitorExporterBuilder::default()
}

/// Builder for the span, log and metric exporters. All exporters built from
/// clones of one builder share its sink.
#[derive(Clone, Debug, Default)]
pub struct AzureMonitorExporterBuilder {
    config: Option<ExporterConfig>,
    sink: Option<Arc<dyn TelemetrySink>>,
}

impl AzureMonitorExporterBuilder {
    /// Assign the configuration. Without one the configuration is read from
    /// the environment when building.
    pub fn with_config(mut self, config: ExporterConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Assign the sink items are delivered to. Defaults to NDJSON on stdout.
    pub fn with_sink<T: TelemetrySink + 'static>(mut self, sink: T) -> Self {
        self.sink = Some(Arc::new(sink));
        self
    }

    /// Write NDJSON batches to `writer`.
    pub fn with_writer<W: Write + Send + 'static>(self, writer: W) -> Self {
        self.with_sink(NdjsonSink::new(writer))
    }

    fn parts(self) -> Result<(ExporterConfig, Arc<dyn TelemetrySink>), Error> {
        let config = match self.config {
            Some(config) => config,
            None => ExporterConfig::from_env()?,
        };
        let sink = self
            .sink
            .unwrap_or_else(|| Arc::new(NdjsonSink::default()));
        Ok((config, sink))
    }

    pub fn build_span_exporter(self) -> Result<AzureMonitorSpanExporter, Error> {
        let (config, sink) = self.parts()?;
        Ok(AzureMonitorSpanExporter::new(&config, sink))
    }

    pub fn build_log_exporter(self) -> Result<AzureMonitorLogExporter, Error> {
        let (config, sink) = self.parts()?;
        Ok(AzureMonitorLogExporter::new(&config, sink))
    }

    pub fn build_metric_exporter(self) -> Result<AzureMonitorMetricExporter, Error> {
        let (config, sink) = self.parts()?;
        Ok(AzureMonitorMetricExporter::new(&config, sink))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::TelemetryBuilder;
    use crate::models::MessageData;

    #[derive(Clone, Debug, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn message(text: &str) -> TelemetryItem {
        TelemetryBuilder::new().build(MessageData {
            message: text.to_owned(),
            ..Default::default()
        })
    }

    #[test]
    fn ndjson_sink_separates_batches() {
        let buf = SharedBuf::default();
        let sink = NdjsonSink::new(buf.clone());
        sink.send(vec![message("a"), message("b")]).unwrap();
        sink.send(vec![]).unwrap();
        sink.send(vec![message("c")]).unwrap();
        sink.flush().unwrap();

        let text = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[2].contains("\"message\":\"c\""));
    }

    #[test]
    fn in_memory_sink_clones_share_storage() {
        let sink = InMemorySink::new();
        let clone = sink.clone();
        clone.send(vec![message("a")]).unwrap();
        assert_eq!(sink.get_finished_items().unwrap().len(), 1);
        sink.reset();
        assert!(clone.get_finished_items().unwrap().is_empty());
    }

    #[test]
    fn builder_with_explicit_config_ignores_env() {
        temp_env::with_var(
            "APPLICATIONINSIGHTS_CONNECTION_STRING",
            Some("not a connection string"),
            || {
                assert!(new_exporter().build_span_exporter().is_err());
                assert!(new_exporter()
                    .with_config(ExporterConfig::new())
                    .with_sink(InMemorySink::new())
                    .build_span_exporter()
                    .is_ok());
            },
        );
    }
}
