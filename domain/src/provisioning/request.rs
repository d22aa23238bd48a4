//! Provisioning request value objects

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Raw, possibly blank, user answers from the deploy wizard or CLI flags.
///
/// Every field is free text; a blank field means "use the default" where
/// one exists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningInput {
    pub instance_type: String,
    /// 1-based position in the region menu
    pub region_choice: String,
    pub image_id: String,
    pub storage_gb: String,
    pub key_name: String,
    pub security_group_id: String,
}

/// A fully resolved EC2 launch request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProvisioningRequest {
    pub instance_type: String,
    pub region: String,
    pub image_id: String,
    pub storage_gb: u32,
    pub key_name: String,
    pub security_group_id: String,
}

impl ProvisioningRequest {
    /// Names of the fields that make this request unusable
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        let text_fields = [
            ("instance_type", &self.instance_type),
            ("region", &self.region),
            ("image_id", &self.image_id),
            ("key_name", &self.key_name),
            ("security_group_id", &self.security_group_id),
        ];
        for (name, value) in text_fields {
            if value.trim().is_empty() {
                missing.push(name);
            }
        }
        if self.storage_gb == 0 {
            missing.push("storage_gb");
        }
        missing
    }

    /// Check the request can be sent to the provider
    pub fn validate(&self) -> Result<(), DomainError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DomainError::InvalidProvisioningRequest { missing })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> ProvisioningRequest {
        ProvisioningRequest {
            instance_type: "t2.micro".to_string(),
            region: "us-east-1".to_string(),
            image_id: "ami-0fc5d935ebf8bc3bc".to_string(),
            storage_gb: 8,
            key_name: "deploy-key".to_string(),
            security_group_id: "sg-0123456789abcdef0".to_string(),
        }
    }

    #[test]
    fn test_complete_request_is_valid() {
        assert!(complete().missing_fields().is_empty());
        assert!(complete().validate().is_ok());
    }

    #[test]
    fn test_blank_fields_are_reported() {
        let request = ProvisioningRequest {
            key_name: "  ".to_string(),
            security_group_id: String::new(),
            ..complete()
        };
        assert_eq!(
            request.missing_fields(),
            vec!["key_name", "security_group_id"]
        );
    }

    #[test]
    fn test_zero_storage_is_invalid() {
        let request = ProvisioningRequest {
            storage_gb: 0,
            ..complete()
        };
        let err = request.validate().unwrap_err();
        assert_eq!(
            err,
            DomainError::InvalidProvisioningRequest {
                missing: vec!["storage_gb"]
            }
        );
    }
}
