use super::TelemetrySink;
use crate::config::ExporterConfig;
use crate::error::Error;
use crate::log_mapper::LogDataMapper;
use crate::models::TelemetryItem;
use core::fmt;
use opentelemetry::otel_debug;
use opentelemetry_sdk::error::OTelSdkResult;
use opentelemetry_sdk::logs::LogBatch;
use opentelemetry_sdk::Resource;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Maps log records to Azure Monitor message and exception items.
pub struct AzureMonitorLogExporter {
    mapper: LogDataMapper,
    sink: Arc<dyn TelemetrySink>,
    resource: Resource,
    is_shutdown: AtomicBool,
}

impl AzureMonitorLogExporter {
    pub fn new(config: &ExporterConfig, sink: Arc<dyn TelemetrySink>) -> Self {
        AzureMonitorLogExporter {
            mapper: LogDataMapper::from_config(config),
            sink,
            resource: Resource::builder_empty().build(),
            is_shutdown: AtomicBool::new(false),
        }
    }

    fn map_batch(&self, batch: &LogBatch<'_>) -> Result<Vec<TelemetryItem>, Error> {
        batch
            .iter()
            .map(|(record, scope)| {
                self.mapper
                    .map(record, scope, &self.resource)
                    .map_err(Error::from)
            })
            .collect()
    }
}

impl fmt::Debug for AzureMonitorLogExporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AzureMonitorLogExporter")
    }
}

impl opentelemetry_sdk::logs::LogExporter for AzureMonitorLogExporter {
    #[allow(clippy::manual_async_fn)]
    fn export(
        &self,
        batch: LogBatch<'_>,
    ) -> impl std::future::Future<Output = OTelSdkResult> + Send {
        async move {
            if self.is_shutdown.load(Ordering::SeqCst) {
                return Err(Error::AlreadyShutdown.into());
            }
            let items = self.map_batch(&batch)?;
            otel_debug!(
                name: "AzureMonitor.LogExporter.Export",
                items = items.len(),
            );
            self.sink.send(items)?;
            Ok(())
        }
    }

    fn shutdown_with_timeout(&self, _timeout: Duration) -> OTelSdkResult {
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
