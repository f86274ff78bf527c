use serde::{Deserialize, Serialize};

// ============ Hosted Zones ============

/// A hosted zone as seen by the provider.
///
/// `id` never carries the `/hostedzone/` resource prefix and `name` never carries
/// the trailing root dot, so both can be compared and persisted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedZone {
    /// Zone identifier (e.g. `Z0123456789ABC`).
    pub id: String,
    /// Zone apex domain (e.g. `example.com`).
    pub name: String,
}

/// Request to publish an NS record set into a zone.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NsRecordRequest {
    /// Zone that receives the record set.
    pub zone_id: String,
    /// Fully-qualified record name (the delegated subdomain).
    pub record_name: String,
    /// Nameserver host names.
    pub nameservers: Vec<String>,
    /// TTL in seconds.
    pub ttl: i64,
    /// Change batch comment.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

// ============ Roles ============

/// Request to create a role with an assume-role (trust) policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateRoleRequest {
    /// Role name.
    pub role_name: String,
    /// Trust policy document (JSON).
    pub trust_policy_document: String,
    /// Human-readable description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// A role as read back from the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleInfo {
    /// Role name.
    pub name: String,
    /// Role ARN.
    pub arn: String,
    /// Trust policy document exactly as returned by the API.
    ///
    /// IAM returns this percent-encoded; callers decode it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trust_policy_document: Option<String>,
}
