//! Closed string enums of the Blob service.

wire_enum! {
    /// Kind of blob.
    BlobType {
        BlockBlob => "BlockBlob",
        PageBlob => "PageBlob",
        AppendBlob => "AppendBlob",
    }
}

wire_enum! {
    /// Storage tier. `P*` tiers apply to premium page blobs only.
    AccessTier {
        P4 => "P4",
        P6 => "P6",
        P10 => "P10",
        P15 => "P15",
        P20 => "P20",
        P30 => "P30",
        P40 => "P40",
        P50 => "P50",
        P60 => "P60",
        P70 => "P70",
        P80 => "P80",
        Hot => "Hot",
        Cool => "Cool",
        Cold => "Cold",
        Archive => "Archive",
        Premium => "Premium",
    }
}

wire_enum! {
    /// Rehydration in progress for an archived blob.
    ArchiveStatus {
        RehydratePendingToHot => "rehydrate-pending-to-hot",
        RehydratePendingToCool => "rehydrate-pending-to-cool",
        RehydratePendingToCold => "rehydrate-pending-to-cold",
    }
}

wire_enum! {
    CopyStatusType {
        Pending => "pending",
        Success => "success",
        Aborted => "aborted",
        Failed => "failed",
    }
}

wire_enum! {
    LeaseStatusType {
        Locked => "locked",
        Unlocked => "unlocked",
    }
}

wire_enum! {
    LeaseStateType {
        Available => "available",
        Leased => "leased",
        Expired => "expired",
        Breaking => "breaking",
        Broken => "broken",
    }
}

wire_enum! {
    LeaseDurationType {
        Infinite => "infinite",
        Fixed => "fixed",
    }
}

wire_enum! {
    /// Anonymous read access of a container.
    PublicAccessType {
        /// Container and blob data can be listed and read.
        Container => "container",
        /// Blob data can be read, the container cannot be listed.
        Blob => "blob",
    }
}

wire_enum! {
    RehydratePriority {
        High => "High",
        Standard => "Standard",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BlobModelError;
    use rstest::rstest;

    #[rstest]
    #[case("BlockBlob", BlobType::BlockBlob)]
    #[case("AppendBlob", BlobType::AppendBlob)]
    fn blob_type_parses(#[case] wire: &str, #[case] expected: BlobType) {
        assert_eq!(wire.parse::<BlobType>(), Ok(expected));
    }

    #[test]
    fn every_variant_round_trips_through_display() {
        for tier in AccessTier::ALL {
            assert_eq!(tier.to_string().parse::<AccessTier>(), Ok(*tier));
        }
        for status in ArchiveStatus::ALL {
            assert_eq!(status.to_string().parse::<ArchiveStatus>(), Ok(*status));
        }
        for state in LeaseStateType::ALL {
            assert_eq!(state.as_str().parse::<LeaseStateType>(), Ok(*state));
        }
    }

    #[test]
    fn unknown_values_are_rejected() {
        assert_eq!(
            "hot".parse::<AccessTier>(),
            Err(BlobModelError::UnknownValue {
                kind: "AccessTier",
                value: "hot".to_owned(),
            })
        );
        assert!("".parse::<LeaseStatusType>().is_err());
        assert!("Blob".parse::<PublicAccessType>().is_err());
    }

    #[test]
    fn serde_uses_wire_form() {
        let json = serde_json::to_string(&ArchiveStatus::RehydratePendingToCool).unwrap();
        assert_eq!(json, "\"rehydrate-pending-to-cool\"");
        let status: CopyStatusType = serde_json::from_str("\"aborted\"").unwrap();
        assert_eq!(status, CopyStatusType::Aborted);
        assert!(serde_json::from_str::<RehydratePriority>("\"Low\"").is_err());
    }
}
