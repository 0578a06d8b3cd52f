use crate::enums::{LeaseDurationType, LeaseStateType, LeaseStatusType, PublicAccessType};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobContainerProperties {
    last_modified: Option<DateTime<Utc>>,
    e_tag: Option<String>,
    lease_status: Option<LeaseStatusType>,
    lease_state: Option<LeaseStateType>,
    lease_duration: Option<LeaseDurationType>,
    public_access: Option<PublicAccessType>,
    has_immutability_policy: Option<bool>,
    has_legal_hold: Option<bool>,
    default_encryption_scope: Option<String>,
    encryption_scope_override_prevented: Option<bool>,
    deleted_time: Option<DateTime<Utc>>,
    remaining_retention_days: Option<u32>,
    metadata: Option<BTreeMap<String, String>>,
}

impl BlobContainerProperties {
    pub fn new() -> Self {
        BlobContainerProperties::default()
    }
}

accessors!(BlobContainerProperties {
    last_modified / set_last_modified: copy DateTime<Utc>,
    e_tag / set_e_tag: str String,
    lease_status / set_lease_status: copy LeaseStatusType,
    lease_state / set_lease_state: copy LeaseStateType,
    lease_duration / set_lease_duration: copy LeaseDurationType,
    /// `None` means the container is private.
    public_access / set_public_access: copy PublicAccessType,
    has_immutability_policy / set_has_immutability_policy: copy bool,
    has_legal_hold / set_has_legal_hold: copy bool,
    default_encryption_scope / set_default_encryption_scope: str String,
    encryption_scope_override_prevented / set_encryption_scope_override_prevented: copy bool,
    deleted_time / set_deleted_time: copy DateTime<Utc>,
    remaining_retention_days / set_remaining_retention_days: copy u32,
    metadata / set_metadata: borrow BTreeMap<String, String>,
});

/// One entry of a List Containers page.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlobContainerItem {
    name: String,
    deleted: Option<bool>,
    version: Option<String>,
    properties: Option<BlobContainerProperties>,
    metadata: Option<BTreeMap<String, String>>,
}

impl BlobContainerItem {
    pub fn new(name: impl Into<String>) -> Self {
        BlobContainerItem {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        self
    }
}

accessors!(BlobContainerItem {
    deleted / set_deleted: copy bool,
    /// Version of a soft-deleted container, used to restore it.
    version / set_version: str String,
    properties / set_properties: borrow BlobContainerProperties,
    metadata / set_metadata: borrow BTreeMap<String, String>,
});

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn container_properties_round_trip() {
        let modified = Utc.with_ymd_and_hms(2023, 11, 20, 6, 45, 0).unwrap();
        let deleted = Utc.with_ymd_and_hms(2023, 12, 1, 0, 0, 0).unwrap();
        let metadata = BTreeMap::from([("team".to_owned(), "payments".to_owned())]);
        let mut properties = BlobContainerProperties::new();
        properties
            .set_last_modified(modified)
            .set_e_tag("\"0x1\"")
            .set_lease_status(LeaseStatusType::Unlocked)
            .set_lease_state(LeaseStateType::Broken)
            .set_lease_duration(LeaseDurationType::Infinite)
            .set_public_access(PublicAccessType::Blob)
            .set_has_immutability_policy(false)
            .set_has_legal_hold(true)
            .set_default_encryption_scope("$account-encryption-key")
            .set_encryption_scope_override_prevented(true)
            .set_deleted_time(deleted)
            .set_remaining_retention_days(14)
            .set_metadata(metadata.clone());

        assert_eq!(properties.last_modified(), Some(modified));
        assert_eq!(properties.e_tag(), Some("\"0x1\""));
        assert_eq!(properties.lease_status(), Some(LeaseStatusType::Unlocked));
        assert_eq!(properties.lease_state(), Some(LeaseStateType::Broken));
        assert_eq!(
            properties.lease_duration(),
            Some(LeaseDurationType::Infinite)
        );
        assert_eq!(properties.public_access(), Some(PublicAccessType::Blob));
        assert_eq!(properties.has_immutability_policy(), Some(false));
        assert_eq!(properties.has_legal_hold(), Some(true));
        assert_eq!(
            properties.default_encryption_scope(),
            Some("$account-encryption-key")
        );
        assert_eq!(properties.encryption_scope_override_prevented(), Some(true));
        assert_eq!(properties.deleted_time(), Some(deleted));
        assert_eq!(properties.remaining_retention_days(), Some(14));
        assert_eq!(properties.metadata(), Some(&metadata));
    }

    #[test]
    fn container_item_round_trip() {
        let mut properties = BlobContainerProperties::new();
        properties.set_public_access(PublicAccessType::Container);

        let mut item = BlobContainerItem::new("invoices");
        item.set_deleted(true)
            .set_version("01D60F8BB59A4652")
            .set_properties(properties.clone())
            .set_metadata(BTreeMap::new());

        assert_eq!(item.name(), "invoices");
        assert_eq!(item.deleted(), Some(true));
        assert_eq!(item.version(), Some("01D60F8BB59A4652"));
        assert_eq!(item.properties(), Some(&properties));
        assert_eq!(item.metadata(), Some(&BTreeMap::new()));
        assert_eq!(BlobContainerItem::new("x").properties(), None);
    }
}
