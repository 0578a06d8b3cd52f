use super::TelemetrySink;
use crate::config::ExporterConfig;
use crate::error::Error;
use crate::metric_mapper::MetricDataMapper;
use core::fmt;
use opentelemetry::otel_debug;
use opentelemetry_sdk::error::OTelSdkResult;
use opentelemetry_sdk::metrics::data::ResourceMetrics;
use opentelemetry_sdk::metrics::exporter::PushMetricExporter;
use opentelemetry_sdk::metrics::Temporality;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Maps collected metrics to Azure Monitor metric items.
///
/// Requests delta temporality: every item carries the aggregate of one
/// collection interval.
pub struct AzureMonitorMetricExporter {
    mapper: MetricDataMapper,
    sink: Arc<dyn TelemetrySink>,
    is_shutdown: AtomicBool,
}

impl AzureMonitorMetricExporter {
    pub fn new(config: &ExporterConfig, sink: Arc<dyn TelemetrySink>) -> Self {
        AzureMonitorMetricExporter {
            mapper: MetricDataMapper::from_config(config),
            sink,
            is_shutdown: AtomicBool::new(false),
        }
    }
}

impl fmt::Debug for AzureMonitorMetricExporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AzureMonitorMetricExporter")
    }
}

impl PushMetricExporter for AzureMonitorMetricExporter {
    #[allow(clippy::manual_async_fn)]
    fn export(
        &self,
        metrics: &ResourceMetrics,
    ) -> impl std::future::Future<Output = OTelSdkResult> + Send {
        async move {
            if self.is_shutdown.load(Ordering::SeqCst) {
                return Err(Error::AlreadyShutdown.into());
            }
            let items = self.mapper.map(metrics).map_err(Error::from)?;
            otel_debug!(
                name: "AzureMonitor.MetricExporter.Export",
                items = items.len(),
            );
            self.sink.send(items)?;
            Ok(())
        }
    }

    fn force_flush(&self) -> OTelSdkResult {
        self.sink.flush()?;
        Ok(())
    }

    fn shutdown_with_timeout(&self, _timeout: Duration) -> OTelSdkResult {
        if self.is_shutdown.swap(true, Ordering::SeqCst) {
            return Err(Error::AlreadyShutdown.into());
        }
        self.sink.flush()?;
        Ok(())
    }

    fn temporality(&self) -> Temporality {
        Temporality::Delta
    }
}
