//! Attribute routing table.
//!
//! Every attribute of a record is routed, in order, to an exact-key handler,
//! the handler of the longest registered key prefix, or the generic
//! conversion into a custom property.
mod trie;

use crate::attributes::{AttributeValue, Attributes};
use crate::builder::TelemetryBuilder;
use crate::connection_string::ConnectionString;
use crate::context_tags;
use crate::error::MappingError;
use crate::log_once::WarnOnce;
use crate::semconv;
use opentelemetry::otel_warn;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use trie::PrefixTrie;

/// Handler for a single exact attribute key.
pub type ExactMapping = Box<
    dyn Fn(&mut TelemetryBuilder, AttributeValue<'_>) -> Result<(), MappingError> + Send + Sync,
>;

/// Handler for every key under a prefix. Receives the full key.
pub type PrefixMapping = Box<
    dyn Fn(&mut TelemetryBuilder, &str, AttributeValue<'_>) -> Result<(), MappingError>
        + Send
        + Sync,
>;

/// Immutable routing table built by [`MappingsBuilder`].
pub struct Mappings {
    exact: HashMap<String, ExactMapping>,
    prefixes: PrefixTrie<PrefixMapping>,
    unexpected_types: WarnOnce,
}

impl fmt::Debug for Mappings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mappings")
            .field("exact", &self.exact.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl Mappings {
    pub fn builder() -> MappingsBuilder {
        MappingsBuilder::default()
    }

    /// Routes every attribute into `builder`. The first handler error aborts.
    pub fn map(
        &self,
        attributes: &Attributes<'_>,
        builder: &mut TelemetryBuilder,
    ) -> Result<(), MappingError> {
        for (key, value) in attributes.iter() {
            if let Some(mapping) = self.exact.get(key) {
                mapping(builder, value)?;
            } else if let Some(mapping) = self.prefixes.longest_match(key) {
                mapping(builder, key, value)?;
            } else if let Some(value) = self.convert_to_string(value) {
                builder.add_property(key, value);
            }
        }
        Ok(())
    }

    /// Generic property conversion. Unsupported types are warned about once
    /// per type and yield `None`.
    pub fn convert_to_string(&self, value: AttributeValue<'_>) -> Option<String> {
        match value.to_property_string() {
            Ok(value) => Some(value),
            Err(type_name) => {
                if self.unexpected_types.first(type_name) {
                    otel_warn!(
                        name: "AzureMonitor.Mappings.UnexpectedAttributeType",
                        message = "attribute dropped, its type has no property representation",
                        attribute_type = type_name,
                    );
                }
                None
            }
        }
    }
}

/// Turns the sampler's item count into a sampling percentage. A count of
/// one, or a non-positive count, leaves the sample rate unset.
pub(crate) fn apply_item_count(builder: &mut TelemetryBuilder, attributes: &Attributes<'_>) {
    if let Some(count) = attributes.get_i64(semconv::ITEM_COUNT) {
        if count > 1 {
            builder.set_sample_rate(100.0 / count as f32);
        }
    }
}

/// Collects handlers for a [`Mappings`] table.
#[derive(Default)]
pub struct MappingsBuilder {
    exact: HashMap<String, ExactMapping>,
    prefixes: PrefixTrie<PrefixMapping>,
}

impl fmt::Debug for MappingsBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MappingsBuilder")
            .field("exact", &self.exact.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl MappingsBuilder {
    /// Drops the attribute with exactly this key.
    pub fn ignore_exact(self, key: &str) -> Self {
        self.exact(key, |_, _| Ok(()))
    }

    /// Drops every attribute whose key starts with `prefix`.
    pub fn ignore_prefix(self, prefix: &str) -> Self {
        self.prefix(prefix, |_, _, _| Ok(()))
    }

    pub fn exact<F>(mut self, key: &str, mapping: F) -> Self
    where
        F: Fn(&mut TelemetryBuilder, AttributeValue<'_>) -> Result<(), MappingError>
            + Send
            + Sync
            + 'static,
    {
        self.exact.insert(key.to_owned(), Box::new(mapping));
        self
    }

    pub fn prefix<F>(mut self, prefix: &str, mapping: F) -> Self
    where
        F: Fn(&mut TelemetryBuilder, &str, AttributeValue<'_>) -> Result<(), MappingError>
            + Send
            + Sync
            + 'static,
    {
        self.prefixes.insert(prefix, Box::new(mapping));
        self
    }

    /// Copies a string attribute into the named property. Other types are dropped.
    pub fn exact_string(self, key: &str, property: &'static str) -> Self {
        self.exact(key, move |builder, value| {
            if let Some(value) = value.as_str() {
                builder.add_property(property, value);
            }
            Ok(())
        })
    }

    /// Copies an integer attribute into the named property. Other types are dropped.
    pub fn exact_long(self, key: &str, property: &'static str) -> Self {
        self.exact(key, move |builder, value| {
            if let Some(value) = value.as_i64() {
                builder.add_property(property, value.to_string());
            }
            Ok(())
        })
    }

    /// Copies a string attribute into the named context tag.
    pub fn exact_tag(self, key: &str, tag: &'static str) -> Self {
        self.exact(key, move |builder, value| {
            if let Some(value) = value.as_str() {
                builder.add_tag(tag, value);
            }
            Ok(())
        })
    }

    /// Handlers every mapper shares: pass-through overrides, deprecated
    /// override keys and the internal key namespace.
    pub fn common(self, deprecated: Arc<WarnOnce>) -> Self {
        let mut builder = self
            .ignore_prefix(semconv::INTERNAL_PREFIX)
            .exact_tag(semconv::ENDUSER_ID, context_tags::AI_USER_AUTH_USER_ID)
            .exact_tag(
                semconv::APPLICATION_VERSION,
                context_tags::AI_APPLICATION_VER,
            )
            .exact_tag(semconv::ROLE_NAME, context_tags::AI_CLOUD_ROLE)
            .exact_tag(semconv::ROLE_INSTANCE, context_tags::AI_CLOUD_ROLE_INSTANCE)
            .exact(semconv::CONNECTION_STRING, |builder, value| {
                if let Some(value) = value.as_str() {
                    builder.set_connection_string(Arc::new(ConnectionString::parse(value)?));
                }
                Ok(())
            })
            .exact(semconv::INSTRUMENTATION_KEY, |builder, value| {
                if let Some(value) = value.as_str() {
                    let connection_string =
                        ConnectionString::parse(&format!("InstrumentationKey={value}"))?;
                    builder.set_connection_string(Arc::new(connection_string));
                }
                Ok(())
            });

        for (key, replacement) in [
            (
                semconv::DEPRECATED_CONNECTION_STRING,
                semconv::CONNECTION_STRING,
            ),
            (
                semconv::DEPRECATED_INSTRUMENTATION_KEY,
                semconv::INSTRUMENTATION_KEY,
            ),
            (semconv::DEPRECATED_ROLE_NAME, semconv::ROLE_NAME),
            (semconv::DEPRECATED_ROLE_INSTANCE, semconv::ROLE_INSTANCE),
            (
                semconv::DEPRECATED_APPLICATION_VERSION,
                semconv::APPLICATION_VERSION,
            ),
        ] {
            let deprecated = Arc::clone(&deprecated);
            builder = builder.exact(key, move |_, _| {
                if deprecated.first(key) {
                    otel_warn!(
                        name: "AzureMonitor.Mappings.DeprecatedAttribute",
                        message = "deprecated attribute ignored",
                        attribute = key,
                        replacement = replacement,
                    );
                }
                Ok(())
            });
        }
        builder
    }

    pub fn build(self) -> Mappings {
        Mappings {
            exact: self.exact,
            prefixes: self.prefixes,
            unexpected_types: WarnOnce::new(),
        }
    }
}
