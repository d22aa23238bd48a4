//! Provisioning parameter resolution
//!
//! Merges raw user answers with [`ProvisioningDefaults`]. Resolution never
//! fails: a field that cannot be filled is left empty (or zero) and the
//! resulting request reports it through [`ProvisioningRequest::validate`].

use crate::provisioning::{
    defaults::ProvisioningDefaults,
    request::{ProvisioningInput, ProvisioningRequest},
};

/// Resolve user input into a launch request.
///
/// - region: 1-based menu index; blank, non-numeric or out of range selects
///   `defaults.default_region`
/// - image: blank selects the region's default image (empty if none)
/// - instance type / storage: blank selects the fixed defaults; storage that
///   is not a positive integer resolves to 0
/// - key name / security group: no default
pub fn resolve(input: &ProvisioningInput, defaults: &ProvisioningDefaults) -> ProvisioningRequest {
    let region = input
        .region_choice
        .trim()
        .parse::<usize>()
        .ok()
        .and_then(|choice| defaults.region_at(choice))
        .unwrap_or(defaults.default_region.as_str())
        .to_string();

    let image_id = non_blank(&input.image_id)
        .or_else(|| defaults.image_for(&region))
        .unwrap_or_default()
        .to_string();

    let instance_type = non_blank(&input.instance_type)
        .unwrap_or(defaults.instance_type.as_str())
        .to_string();

    let storage_gb = match non_blank(&input.storage_gb) {
        None => defaults.storage_gb,
        Some(raw) => raw.parse::<u32>().unwrap_or(0),
    };

    ProvisioningRequest {
        instance_type,
        region,
        image_id,
        storage_gb,
        key_name: input.key_name.trim().to_string(),
        security_group_id: input.security_group_id.trim().to_string(),
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}
