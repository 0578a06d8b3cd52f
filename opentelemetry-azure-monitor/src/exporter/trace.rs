use super::TelemetrySink;
use crate::config::ExporterConfig;
use crate::error::Error;
use crate::models::TelemetryItem;
use crate::span_mapper::SpanDataMapper;
use core::fmt;
use opentelemetry::otel_debug;
use opentelemetry_sdk::error::OTelSdkResult;
use opentelemetry_sdk::trace::SpanData;
use opentelemetry_sdk::Resource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Maps finished spans, and their events, to Azure Monitor items.
pub struct AzureMonitorSpanExporter {
    mapper: SpanDataMapper,
    sink: Arc<dyn TelemetrySink>,
    resource: Resource,
    is_shutdown: AtomicBool,
}

impl AzureMonitorSpanExporter {
    pub fn new(config: &ExporterConfig, sink: Arc<dyn TelemetrySink>) -> Self {
        AzureMonitorSpanExporter {
            mapper: SpanDataMapper::from_config(config),
            sink,
            resource: Resource::builder_empty().build(),
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn map_batch(&self, batch: &[SpanData]) -> Result<Vec<TelemetryItem>, Error> {
        let mut items = Vec::with_capacity(batch.len());
        for span in batch {
            items.extend(self.mapper.map_with_events(span, &self.resource)?);
        }
        Ok(items)
    }
}

impl fmt::Debug for AzureMonitorSpanExporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AzureMonitorSpanExporter")
    }
}

impl opentelemetry_sdk::trace::SpanExporter for AzureMonitorSpanExporter {
    #[allow(clippy::manual_async_fn)]
    fn export(
        &self,
        batch: Vec<SpanData>,
    ) -> impl std::future::Future<Output = OTelSdkResult> + Send {
        async move {
            if self.is_shutdown.load(Ordering::SeqCst) {
                return Err(Error::AlreadyShutdown.into());
            }
            let items = self.map_batch(&batch)?;
            otel_debug!(
                name: "AzureMonitor.SpanExporter.Export",
                spans = batch.len(),
                items = items.len(),
            );
            self.sink.send(items)?;
            Ok(())
        }
    }

    fn shutdown_with_timeout(&mut self, _timeout: Duration) -> OTelSdkResult {
        if self.is_shutdown.swap(true, Ordering::SeqCst) {
            return Err(Error::AlreadyShutdown.into());
        }
        self.sink.flush()?;
        Ok(())
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider};
    use opentelemetry_sdk::error::OTelSdkError;
    use opentelemetry_sdk::trace::{SdkTracerProvider, SpanExporter};
    use std::sync::atomic::AtomicUsize;

    #[derive(Debug, Default)]
    struct CountingSink {
        items: AtomicUsize,
        flushes: AtomicUsize,
    }

    impl TelemetrySink for CountingSink {
        fn send(&self, items: Vec<TelemetryItem>) -> Result<(), Error> {
            self.items.fetch_add(items.len(), Ordering::SeqCst);
            Ok(())
        }

        fn flush(&self) -> Result<(), Error> {
            self.flushes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn shutdown_with_timeout_flushes_and_stops_exports() {
        let sink = Arc::new(CountingSink::default());
        let mut exporter = AzureMonitorSpanExporter::new(&ExporterConfig::new(), sink.clone());

        exporter
            .shutdown_with_timeout(Duration::from_secs(1))
            .unwrap();
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 1);
        assert!(matches!(
            futures_executor::block_on(exporter.export(vec![])),
            Err(OTelSdkError::AlreadyShutdown)
        ));
        assert!(matches!(
            exporter.shutdown(),
            Err(OTelSdkError::AlreadyShutdown)
        ));
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn provider_shutdown_reaches_exporter() {
        let sink = Arc::new(CountingSink::default());
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(AzureMonitorSpanExporter::new(
                &ExporterConfig::new(),
                sink.clone(),
            ))
            .build();
        provider.tracer("test").in_span("nightly job", |_| {});

        provider.shutdown().unwrap();
        assert_eq!(sink.items.load(Ordering::SeqCst), 1);
        assert_eq!(sink.flushes.load(Ordering::SeqCst), 1);
    }
}
