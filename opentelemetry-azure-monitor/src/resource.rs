use crate::builder::TelemetryBuilder;
use crate::connection_string::ConnectionString;
use crate::context_tags;
use crate::semconv;
use opentelemetry_sdk::Resource;
use std::sync::Arc;

/// Reported as `ai.internal.sdkVersion`.
pub const SDK_VERSION: &str = concat!("rust:otel", env!("CARGO_PKG_VERSION"));

const UNKNOWN_SERVICE_PREFIX: &str = "unknown_service";

/// Callback run on every item before record-specific mapping, used to stamp
/// process-wide state such as the connection string and role name.
pub type TelemetryInitializer = Arc<dyn Fn(&mut TelemetryBuilder, &Resource) + Send + Sync>;

/// Initializer applying the connection string, SDK version and the
/// resource-derived tags.
pub fn resource_initializer(
    connection_string: Option<Arc<ConnectionString>>,
    website_site_name: Option<String>,
) -> TelemetryInitializer {
    Arc::new(move |builder, resource| {
        if let Some(connection_string) = &connection_string {
            builder.set_connection_string(Arc::clone(connection_string));
        }
        builder.add_tag(context_tags::AI_INTERNAL_SDK_VERSION, SDK_VERSION);
        apply_resource(builder, resource, website_site_name.as_deref());
    })
}

/// Derives role name, role instance and application version from the
/// resource. Tags that are already set are left alone.
pub fn apply_resource(
    builder: &mut TelemetryBuilder,
    resource: &Resource,
    website_site_name: Option<&str>,
) {
    let role_name = resource_str(resource, semconv::SERVICE_NAME)
        .filter(|name| !name.starts_with(UNKNOWN_SERVICE_PREFIX))
        .or_else(|| website_site_name.map(str::to_owned));
    if let Some(role_name) = role_name {
        let role_name = match resource_str(resource, semconv::SERVICE_NAMESPACE) {
            Some(namespace) => format!("[{namespace}]/{role_name}"),
            None => role_name,
        };
        builder.add_tag_if_absent(context_tags::AI_CLOUD_ROLE, role_name);
    }

    let role_instance = resource_str(resource, semconv::SERVICE_INSTANCE_ID)
        .or_else(|| resource_str(resource, semconv::HOST_NAME));
    if let Some(role_instance) = role_instance {
        builder.add_tag_if_absent(context_tags::AI_CLOUD_ROLE_INSTANCE, role_instance);
    }

    if let Some(version) = resource_str(resource, semconv::SERVICE_VERSION) {
        builder.add_tag_if_absent(context_tags::AI_APPLICATION_VER, version);
    }
}

fn resource_str(resource: &Resource, key: &str) -> Option<String> {
    resource
        .iter()
        .find(|(k, _)| k.as_str() == key)
        .map(|(_, value)| value.as_str().into_owned())
        .filter(|value| !value.is_empty())
}
