//! Azure Monitor context tag keys.
//!
//! Tags live on the envelope rather than on the payload and are what the
//! portal uses for correlation (`ai.operation.*`) and for the application map
//! (`ai.cloud.*`).

/// Operation id, the trace id of the distributed trace.
pub const AI_OPERATION_ID: &str = "ai.operation.id";
/// Id of the parent span.
pub const AI_OPERATION_PARENT_ID: &str = "ai.operation.parentId";
/// Name of the operation the item belongs to.
pub const AI_OPERATION_NAME: &str = "ai.operation.name";
/// Source of synthetic traffic.
pub const AI_OPERATION_SYNTHETIC_SOURCE: &str = "ai.operation.syntheticSource";
/// Legacy root id.
pub const AI_LEGACY_ROOT_ID: &str = "ai_legacyRootID";
/// Cloud role name.
pub const AI_CLOUD_ROLE: &str = "ai.cloud.role";
/// Cloud role instance.
pub const AI_CLOUD_ROLE_INSTANCE: &str = "ai.cloud.roleInstance";
/// Application version.
pub const AI_APPLICATION_VER: &str = "ai.application.ver";
/// Authenticated user id.
pub const AI_USER_AUTH_USER_ID: &str = "ai.user.authUserId";
/// User agent of the client.
pub const AI_USER_AGENT: &str = "ai.user.userAgent";
/// Client IP address.
pub const AI_LOCATION_IP: &str = "ai.location.ip";
/// Session id.
pub const AI_SESSION_ID: &str = "ai.session.id";
/// Device operating system.
pub const AI_DEVICE_OS: &str = "ai.device.os";
/// Device operating system version.
pub const AI_DEVICE_OS_VERSION: &str = "ai.device.osVersion";
/// Version of the SDK that produced the item.
pub const AI_INTERNAL_SDK_VERSION: &str = "ai.internal.sdkVersion";
