//! AWS `CloudProvider` trait 实现

use async_trait::async_trait;
use aws_sdk_route53::types::{
    Change, ChangeAction, ChangeBatch, ResourceRecord, ResourceRecordSet, RrType,
};

use crate::error::{ProviderError, Result};
use crate::traits::{CloudProvider, ErrorContext, ProviderErrorMapper};
use crate::types::{CreateRoleRequest, HostedZone, NsRecordRequest, RoleInfo};
use crate::utils::log_sanitizer::sanitize_for_log;

use super::{AwsProvider, clean_zone_id, trim_fqdn};

impl AwsProvider {
    /// Every record set of a zone, following Route 53's name/type pagination.
    async fn list_record_sets(&self, zone_id: &str) -> Result<Vec<ResourceRecordSet>> {
        let mut sets = Vec::new();
        let mut next: Option<(String, RrType)> = None;

        loop {
            let mut req = self
                .route53
                .list_resource_record_sets()
                .hosted_zone_id(zone_id);
            if let Some((name, rr_type)) = next.take() {
                req = req.start_record_name(name).start_record_type(rr_type);
            }
            let resp = req
                .send()
                .await
                .map_err(|e| self.map_sdk_error(e, ErrorContext::zone(zone_id)))?;

            sets.extend(resp.resource_record_sets().iter().cloned());

            if !resp.is_truncated() {
                break;
            }
            match (resp.next_record_name(), resp.next_record_type()) {
                (Some(name), Some(rr_type)) => next = Some((name.to_string(), rr_type.clone())),
                _ => break,
            }
        }

        Ok(sets)
    }

    async fn submit_changes(
        &self,
        zone_id: &str,
        changes: Vec<Change>,
        comment: Option<&str>,
    ) -> Result<()> {
        let batch = ChangeBatch::builder()
            .set_changes(Some(changes))
            .set_comment(comment.map(ToString::to_string))
            .build()
            .map_err(|e| self.parse_error(e))?;

        self.route53
            .change_resource_record_sets()
            .hosted_zone_id(zone_id)
            .change_batch(batch)
            .send()
            .await
            .map_err(|e| self.map_sdk_error(e, ErrorContext::zone(zone_id)))?;
        Ok(())
    }

    fn delete_change(&self, set: ResourceRecordSet) -> Result<Change> {
        Change::builder()
            .action(ChangeAction::Delete)
            .resource_record_set(set)
            .build()
            .map_err(|e| self.parse_error(e))
    }
}

/// Apex NS and SOA are created by Route 53 and cannot be deleted.
fn is_default_record(set: &ResourceRecordSet, zone_name: &str) -> bool {
    trim_fqdn(set.name()) == zone_name && matches!(set.r#type(), RrType::Ns | RrType::Soa)
}

#[async_trait]
impl CloudProvider for AwsProvider {
    fn id(&self) -> &'static str {
        "aws"
    }

    fn profile(&self) -> &str {
        &self.profile
    }

    fn region(&self) -> &str {
        &self.region
    }

    async fn caller_account_id(&self) -> Result<String> {
        let resp = self
            .sts
            .get_caller_identity()
            .send()
            .await
            .map_err(|e| self.map_sdk_error(e, ErrorContext::default()))?;

        resp.account()
            .map(ToString::to_string)
            .ok_or_else(|| self.parse_error("GetCallerIdentity returned no account"))
    }

    async fn create_hosted_zone(
        &self,
        domain: &str,
        caller_reference: &str,
        comment: &str,
    ) -> Result<HostedZone> {
        let zone_config = aws_sdk_route53::types::HostedZoneConfig::builder()
            .comment(comment)
            .private_zone(false)
            .build();

        let resp = self
            .route53
            .create_hosted_zone()
            .name(domain)
            .caller_reference(caller_reference)
            .hosted_zone_config(zone_config)
            .send()
            .await
            .map_err(|e| self.map_sdk_error(e, ErrorContext::domain(domain)))?;

        let zone = resp
            .hosted_zone()
            .ok_or_else(|| self.parse_error("CreateHostedZone returned no zone"))?;

        log::info!("[aws] created hosted zone {} for {domain}", zone.id());
        Ok(HostedZone {
            id: clean_zone_id(zone.id()),
            name: trim_fqdn(zone.name()),
        })
    }

    async fn find_hosted_zone_by_name(&self, domain: &str) -> Result<Option<HostedZone>> {
        let resp = self
            .route53
            .list_hosted_zones_by_name()
            .dns_name(domain)
            .max_items(1)
            .send()
            .await
            .map_err(|e| self.map_sdk_error(e, ErrorContext::domain(domain)))?;

        let wanted = domain.trim_end_matches('.');
        Ok(resp
            .hosted_zones()
            .iter()
            .find(|z| z.name().trim_end_matches('.') == wanted)
            .map(|z| HostedZone {
                id: clean_zone_id(z.id()),
                name: trim_fqdn(z.name()),
            }))
    }

    async fn get_hosted_zone(&self, zone_id: &str) -> Result<HostedZone> {
        let resp = self
            .route53
            .get_hosted_zone()
            .id(zone_id)
            .send()
            .await
            .map_err(|e| self.map_sdk_error(e, ErrorContext::zone(zone_id)))?;

        let zone = resp
            .hosted_zone()
            .ok_or_else(|| self.parse_error("GetHostedZone returned no zone"))?;
        Ok(HostedZone {
            id: clean_zone_id(zone.id()),
            name: trim_fqdn(zone.name()),
        })
    }

    async fn list_zone_nameservers(&self, zone_id: &str) -> Result<Vec<String>> {
        let sets = self.list_record_sets(zone_id).await?;
        let nameservers = sets
            .iter()
            .find(|s| *s.r#type() == RrType::Ns)
            .map(|s| {
                s.resource_records()
                    .iter()
                    .map(|r| trim_fqdn(r.value()))
                    .collect()
            })
            .unwrap_or_default();
        Ok(nameservers)
    }

    async fn delete_hosted_zone(&self, zone_id: &str) -> Result<()> {
        let zone = self.get_hosted_zone(zone_id).await?;
        let sets = self.list_record_sets(zone_id).await?;

        let changes = sets
            .into_iter()
            .filter(|s| !is_default_record(s, &zone.name))
            .map(|s| self.delete_change(s))
            .collect::<Result<Vec<_>>>()?;

        if !changes.is_empty() {
            log::info!(
                "[aws] deleting {} record sets from zone {zone_id}",
                changes.len()
            );
            self.submit_changes(zone_id, changes, None).await?;
        }

        self.route53
            .delete_hosted_zone()
            .id(zone_id)
            .send()
            .await
            .map_err(|e| self.map_sdk_error(e, ErrorContext::zone(zone_id)))?;
        log::info!("[aws] deleted hosted zone {zone_id}");
        Ok(())
    }

    async fn upsert_ns_records(&self, req: &NsRecordRequest) -> Result<()> {
        let records = req
            .nameservers
            .iter()
            .map(|ns| {
                ResourceRecord::builder()
                    .value(ns)
                    .build()
                    .map_err(|e| self.parse_error(e))
            })
            .collect::<Result<Vec<_>>>()?;

        let set = ResourceRecordSet::builder()
            .name(&req.record_name)
            .r#type(RrType::Ns)
            .ttl(req.ttl)
            .set_resource_records(Some(records))
            .build()
            .map_err(|e| self.parse_error(e))?;

        let change = Change::builder()
            .action(ChangeAction::Upsert)
            .resource_record_set(set)
            .build()
            .map_err(|e| self.parse_error(e))?;

        self.submit_changes(&req.zone_id, vec![change], req.comment.as_deref())
            .await?;
        log::info!(
            "[aws] upserted NS for {} in zone {}",
            req.record_name,
            req.zone_id
        );
        Ok(())
    }

    async fn delete_ns_records(&self, zone_id: &str, record_name: &str) -> Result<()> {
        let wanted = record_name.trim_end_matches('.');
        let sets = self.list_record_sets(zone_id).await?;

        let Some(set) = sets
            .into_iter()
            .find(|s| *s.r#type() == RrType::Ns && s.name().trim_end_matches('.') == wanted)
        else {
            log::warn!("[aws] no NS record set for {record_name} in zone {zone_id}");
            return Ok(());
        };

        let change = self.delete_change(set)?;
        self.submit_changes(zone_id, vec![change], None).await?;
        log::info!("[aws] deleted NS for {record_name} in zone {zone_id}");
        Ok(())
    }

    async fn create_role(&self, req: &CreateRoleRequest) -> Result<RoleInfo> {
        log::debug!(
            "[aws] creating role {} with trust policy {}",
            req.role_name,
            sanitize_for_log(&req.trust_policy_document)
        );

        let resp = self
            .iam
            .create_role()
            .role_name(&req.role_name)
            .assume_role_policy_document(&req.trust_policy_document)
            .set_description(req.description.clone())
            .send()
            .await
            .map_err(|e| self.map_sdk_error(e, ErrorContext::role(&req.role_name)))?;

        let role = resp
            .role()
            .ok_or_else(|| self.parse_error("CreateRole returned no role"))?;
        Ok(RoleInfo {
            name: role.role_name().to_string(),
            arn: role.arn().to_string(),
            trust_policy_document: role.assume_role_policy_document().map(ToString::to_string),
        })
    }

    async fn get_role(&self, role_name: &str) -> Result<RoleInfo> {
        let resp = self
            .iam
            .get_role()
            .role_name(role_name)
            .send()
            .await
            .map_err(|e| self.map_sdk_error(e, ErrorContext::role(role_name)))?;

        let role = resp.role().ok_or_else(|| ProviderError::RoleNotFound {
            provider: self.provider_name().to_string(),
            role_name: role_name.to_string(),
            raw_message: None,
        })?;
        Ok(RoleInfo {
            name: role.role_name().to_string(),
            arn: role.arn().to_string(),
            trust_policy_document: role.assume_role_policy_document().map(ToString::to_string),
        })
    }

    async fn update_assume_role_policy(&self, role_name: &str, document: &str) -> Result<()> {
        log::debug!(
            "[aws] updating trust policy of {role_name}: {}",
            sanitize_for_log(document)
        );
        self.iam
            .update_assume_role_policy()
            .role_name(role_name)
            .policy_document(document)
            .send()
            .await
            .map_err(|e| self.map_sdk_error(e, ErrorContext::role(role_name)))?;
        Ok(())
    }

    async fn attach_role_policy(&self, role_name: &str, policy_arn: &str) -> Result<()> {
        self.iam
            .attach_role_policy()
            .role_name(role_name)
            .policy_arn(policy_arn)
            .send()
            .await
            .map_err(|e| self.map_sdk_error(e, ErrorContext::role(role_name)))?;
        Ok(())
    }
}
