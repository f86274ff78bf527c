//! 测试辅助模块
//!
//! 提供 mock 实现和便捷的测试工厂方法。

use std::collections::{BTreeMap, HashMap};
use std::net::IpAddr;
use std::sync::Arc;

use async_trait::async_trait;
use dns_delegation_provider::{
    CloudProvider, CreateRoleRequest, HostedZone, NsRecordRequest, ProviderError, RoleInfo,
};
use dns_delegation_toolbox::{
    NameserverLookup, NsAnswer, PropagationVerifier, ToolboxError, ToolboxResult, Transport,
    VerifierOptions,
};
use tokio::sync::RwLock;

use crate::error::{CoreError, CoreResult};
use crate::services::ServiceContext;
use crate::traits::{ConfigStore, CredentialResolver, EnvironmentStore, ResumeTokenStore};
use crate::types::{
    DelegationConfig, Environment, EnvironmentDomainUpdate, NewRootEnvironment, ResumeToken,
};

pub const ROOT_PROFILE: &str = "root";
pub const ROOT_ACCOUNT: &str = "999999999999";
pub const DEV_ACCOUNT: &str = "111111111111";
pub const STAGING_ACCOUNT: &str = "222222222222";

/// Nameservers every mock zone reports, deliberately unsorted and unnormalized.
pub const MOCK_NAMESERVERS: [&str; 4] = [
    "ns-2048.awsdns-64.com.",
    "NS-1.AWSDNS-01.ORG",
    "ns-512.awsdns-00.net",
    "ns-1024.awsdns-00.co.uk",
];

// ===== MockCloudProvider =====

#[derive(Default)]
struct MockCloudState {
    zones: HashMap<String, String>,
    next_zone: u32,
    records: HashMap<(String, String), NsRecordRequest>,
    role_document: Option<String>,
    attached: Vec<String>,
    fail_roles: bool,
    fail_attach: bool,
    fail_zones: bool,
    last_zone_request: Option<(String, String)>,
}

pub struct MockCloudProvider {
    profile: String,
    account_id: String,
    region: String,
    state: RwLock<MockCloudState>,
}

impl MockCloudProvider {
    pub fn new(profile: &str, account_id: &str, region: &str) -> Self {
        Self {
            profile: profile.to_string(),
            account_id: account_id.to_string(),
            region: region.to_string(),
            state: RwLock::new(MockCloudState::default()),
        }
    }

    fn role_arn(&self) -> String {
        format!("arn:aws:iam::{}:role/dns-delegation-role", self.account_id)
    }

    fn error(&self, detail: &str) -> ProviderError {
        ProviderError::PermissionDenied {
            provider: "mock".to_string(),
            raw_message: Some(detail.to_string()),
        }
    }

    fn zone_not_found(zone_id: &str) -> ProviderError {
        ProviderError::ZoneNotFound {
            provider: "mock".to_string(),
            zone: zone_id.to_string(),
            raw_message: None,
        }
    }

    fn role_not_found() -> ProviderError {
        ProviderError::RoleNotFound {
            provider: "mock".to_string(),
            role_name: "dns-delegation-role".to_string(),
            raw_message: None,
        }
    }

    pub async fn add_zone(&self, name: &str) -> String {
        let mut state = self.state.write().await;
        state.next_zone += 1;
        let id = format!("Z{}{}", self.profile.to_uppercase(), state.next_zone);
        state.zones.insert(id.clone(), name.to_string());
        id
    }

    pub async fn has_zone(&self, zone_id: &str) -> bool {
        self.state.read().await.zones.contains_key(zone_id)
    }

    pub async fn ns_record(&self, zone_id: &str, name: &str) -> Option<NsRecordRequest> {
        self.state
            .read()
            .await
            .records
            .get(&(zone_id.to_string(), name.to_string()))
            .cloned()
    }

    /// Install a role whose trust policy is `document` (raw JSON).
    pub async fn set_role_document(&self, document: &str) {
        self.state.write().await.role_document = Some(document.to_string());
    }

    pub async fn attached_policies(&self) -> Vec<String> {
        self.state.read().await.attached.clone()
    }

    pub async fn fail_roles(&self, fail: bool) {
        self.state.write().await.fail_roles = fail;
    }

    /// Fail `attach_role_policy` only; role creation still succeeds.
    pub async fn fail_attach(&self, fail: bool) {
        self.state.write().await.fail_attach = fail;
    }

    pub async fn fail_zones(&self, fail: bool) {
        self.state.write().await.fail_zones = fail;
    }

    /// `(caller_reference, comment)` of the last create request.
    pub async fn last_zone_request(&self) -> Option<(String, String)> {
        self.state.read().await.last_zone_request.clone()
    }
}

#[async_trait]
impl CloudProvider for MockCloudProvider {
    fn id(&self) -> &'static str {
        "mock"
    }

    fn profile(&self) -> &str {
        &self.profile
    }

    fn region(&self) -> &str {
        &self.region
    }

    async fn caller_account_id(&self) -> dns_delegation_provider::Result<String> {
        Ok(self.account_id.clone())
    }

    async fn create_hosted_zone(
        &self,
        domain: &str,
        caller_reference: &str,
        comment: &str,
    ) -> dns_delegation_provider::Result<HostedZone> {
        {
            let mut state = self.state.write().await;
            state.last_zone_request = Some((caller_reference.to_string(), comment.to_string()));
            if state.fail_zones {
                return Err(self.error("zone creation denied"));
            }
            if state.zones.values().any(|name| name == domain) {
                return Err(ProviderError::ZoneAlreadyExists {
                    provider: "mock".to_string(),
                    domain: domain.to_string(),
                    raw_message: None,
                });
            }
        }
        let id = self.add_zone(domain).await;
        Ok(HostedZone {
            id,
            name: domain.to_string(),
        })
    }

    async fn find_hosted_zone_by_name(
        &self,
        domain: &str,
    ) -> dns_delegation_provider::Result<Option<HostedZone>> {
        Ok(self
            .state
            .read()
            .await
            .zones
            .iter()
            .find(|(_, name)| name.as_str() == domain)
            .map(|(id, name)| HostedZone {
                id: id.clone(),
                name: name.clone(),
            }))
    }

    async fn get_hosted_zone(&self, zone_id: &str) -> dns_delegation_provider::Result<HostedZone> {
        self.state
            .read()
            .await
            .zones
            .get(zone_id)
            .map(|name| HostedZone {
                id: zone_id.to_string(),
                name: name.clone(),
            })
            .ok_or_else(|| Self::zone_not_found(zone_id))
    }

    async fn list_zone_nameservers(
        &self,
        zone_id: &str,
    ) -> dns_delegation_provider::Result<Vec<String>> {
        if self.has_zone(zone_id).await {
            Ok(MOCK_NAMESERVERS.iter().map(ToString::to_string).collect())
        } else {
            Err(Self::zone_not_found(zone_id))
        }
    }

    async fn delete_hosted_zone(&self, zone_id: &str) -> dns_delegation_provider::Result<()> {
        self.state
            .write()
            .await
            .zones
            .remove(zone_id)
            .map(|_| ())
            .ok_or_else(|| Self::zone_not_found(zone_id))
    }

    async fn upsert_ns_records(&self, req: &NsRecordRequest) -> dns_delegation_provider::Result<()> {
        if !self.has_zone(&req.zone_id).await {
            return Err(Self::zone_not_found(&req.zone_id));
        }
        self.state
            .write()
            .await
            .records
            .insert((req.zone_id.clone(), req.record_name.clone()), req.clone());
        Ok(())
    }

    async fn delete_ns_records(
        &self,
        zone_id: &str,
        record_name: &str,
    ) -> dns_delegation_provider::Result<()> {
        self.state
            .write()
            .await
            .records
            .remove(&(zone_id.to_string(), record_name.to_string()));
        Ok(())
    }

    async fn create_role(&self, req: &CreateRoleRequest) -> dns_delegation_provider::Result<RoleInfo> {
        let mut state = self.state.write().await;
        if state.fail_roles {
            return Err(self.error("iam:CreateRole denied"));
        }
        if state.role_document.is_some() {
            return Err(ProviderError::RoleAlreadyExists {
                provider: "mock".to_string(),
                role_name: req.role_name.clone(),
                raw_message: None,
            });
        }
        state.role_document = Some(req.trust_policy_document.clone());
        Ok(RoleInfo {
            name: req.role_name.clone(),
            arn: self.role_arn(),
            trust_policy_document: None,
        })
    }

    async fn get_role(&self, role_name: &str) -> dns_delegation_provider::Result<RoleInfo> {
        let state = self.state.read().await;
        if state.fail_roles {
            return Err(self.error("iam:GetRole denied"));
        }
        let document = state.role_document.as_ref().ok_or_else(Self::role_not_found)?;
        Ok(RoleInfo {
            name: role_name.to_string(),
            arn: self.role_arn(),
            // IAM returns trust documents percent-encoded.
            trust_policy_document: Some(urlencoding::encode(document).into_owned()),
        })
    }

    async fn update_assume_role_policy(
        &self,
        _role_name: &str,
        document: &str,
    ) -> dns_delegation_provider::Result<()> {
        let mut state = self.state.write().await;
        if state.fail_roles {
            return Err(self.error("iam:UpdateAssumeRolePolicy denied"));
        }
        if state.role_document.is_none() {
            return Err(Self::role_not_found());
        }
        state.role_document = Some(document.to_string());
        Ok(())
    }

    async fn attach_role_policy(
        &self,
        _role_name: &str,
        policy_arn: &str,
    ) -> dns_delegation_provider::Result<()> {
        let mut state = self.state.write().await;
        if state.fail_attach {
            return Err(self.error("iam:AttachRolePolicy denied"));
        }
        // AttachRolePolicy is idempotent.
        if !state.attached.iter().any(|p| p == policy_arn) {
            state.attached.push(policy_arn.to_string());
        }
        Ok(())
    }
}

// ===== MockCredentialResolver =====

pub struct MockCredentialResolver {
    providers: RwLock<BTreeMap<String, Arc<MockCloudProvider>>>,
}

impl MockCredentialResolver {
    pub fn new(providers: &[&Arc<MockCloudProvider>]) -> Self {
        let providers = providers
            .iter()
            .map(|p| (p.profile().to_string(), Arc::clone(p)))
            .collect();
        Self {
            providers: RwLock::new(providers),
        }
    }
}

#[async_trait]
impl CredentialResolver for MockCredentialResolver {
    async fn list_profiles(&self) -> CoreResult<Vec<String>> {
        Ok(self.providers.read().await.keys().cloned().collect())
    }

    async fn provider(&self, profile: &str) -> CoreResult<Arc<dyn CloudProvider>> {
        self.providers
            .read()
            .await
            .get(profile)
            .cloned()
            .map(|p| p as Arc<dyn CloudProvider>)
            .ok_or_else(|| {
                CoreError::Provider(ProviderError::ProfileNotFound {
                    provider: "mock".to_string(),
                    profile: profile.to_string(),
                })
            })
    }
}

// ===== MockConfigStore =====

pub struct MockConfigStore {
    config: RwLock<Option<DelegationConfig>>,
}

impl MockConfigStore {
    pub fn new() -> Self {
        Self {
            config: RwLock::new(None),
        }
    }

    pub async fn get(&self) -> Option<DelegationConfig> {
        self.config.read().await.clone()
    }

    pub async fn set(&self, config: DelegationConfig) {
        *self.config.write().await = Some(config);
    }
}

#[async_trait]
impl ConfigStore for MockConfigStore {
    async fn load(&self) -> CoreResult<Option<DelegationConfig>> {
        Ok(self.get().await)
    }

    async fn save(&self, config: &DelegationConfig) -> CoreResult<()> {
        self.set(config.clone()).await;
        Ok(())
    }
}

// ===== MockEnvironmentStore =====

pub struct MockEnvironmentStore {
    environments: RwLock<HashMap<String, Environment>>,
    domains: RwLock<HashMap<String, EnvironmentDomainUpdate>>,
    roots: RwLock<HashMap<String, NewRootEnvironment>>,
    /// 如果为 true，update_domain 返回错误
    fail_updates: RwLock<bool>,
}

impl MockEnvironmentStore {
    pub fn new() -> Self {
        Self {
            environments: RwLock::new(HashMap::new()),
            domains: RwLock::new(HashMap::new()),
            roots: RwLock::new(HashMap::new()),
            fail_updates: RwLock::new(false),
        }
    }

    pub async fn insert(&self, env: Environment) {
        self.environments
            .write()
            .await
            .insert(env.name.clone(), env);
    }

    pub async fn domain_update(&self, name: &str) -> Option<EnvironmentDomainUpdate> {
        self.domains.read().await.get(name).cloned()
    }

    pub async fn created_root(&self, name: &str) -> Option<NewRootEnvironment> {
        self.roots.read().await.get(name).cloned()
    }

    pub async fn fail_updates(&self, fail: bool) {
        *self.fail_updates.write().await = fail;
    }
}

#[async_trait]
impl EnvironmentStore for MockEnvironmentStore {
    async fn load(&self, name: &str) -> CoreResult<Option<Environment>> {
        Ok(self.environments.read().await.get(name).cloned())
    }

    async fn create_root(&self, name: &str, env: &NewRootEnvironment) -> CoreResult<()> {
        self.roots
            .write()
            .await
            .insert(name.to_string(), env.clone());
        self.insert(Environment {
            name: name.to_string(),
            credential_profile: Some(env.aws_profile.clone()),
            account_id: Some(env.account_id.clone()),
            region: Some(env.region.clone()),
        })
        .await;
        Ok(())
    }

    async fn update_domain(&self, name: &str, update: &EnvironmentDomainUpdate) -> CoreResult<()> {
        if *self.fail_updates.read().await {
            return Err(CoreError::StorageError(format!("{name}.yaml is read-only")));
        }
        self.domains
            .write()
            .await
            .insert(name.to_string(), update.clone());
        Ok(())
    }
}

// ===== MockResumeTokenStore =====

pub struct MockResumeTokenStore {
    token: RwLock<Option<ResumeToken>>,
}

impl MockResumeTokenStore {
    pub fn new() -> Self {
        Self {
            token: RwLock::new(None),
        }
    }
}

#[async_trait]
impl ResumeTokenStore for MockResumeTokenStore {
    async fn save(&self, token: &ResumeToken) -> CoreResult<()> {
        *self.token.write().await = Some(token.clone());
        Ok(())
    }

    async fn take(&self) -> CoreResult<Option<ResumeToken>> {
        Ok(self.token.write().await.take())
    }
}

// ===== StaticLookup =====

/// DNS answers keyed by name, served over the DoH path only.
#[derive(Default)]
pub struct StaticLookup {
    answers: HashMap<String, Vec<String>>,
}

impl StaticLookup {
    pub fn with(mut self, name: &str, nameservers: &[&str]) -> Self {
        self.answers.insert(
            name.to_string(),
            nameservers.iter().map(ToString::to_string).collect(),
        );
        self
    }

    pub fn into_verifier(self) -> PropagationVerifier {
        PropagationVerifier::with_lookup(VerifierOptions::default(), Arc::new(self))
    }
}

#[async_trait]
impl NameserverLookup for StaticLookup {
    async fn doh(&self, domain: &str) -> ToolboxResult<Vec<String>> {
        self.answers
            .get(domain)
            .cloned()
            .ok_or_else(|| ToolboxError::NoAnswer(domain.to_string()))
    }

    async fn resolver(
        &self,
        _server: IpAddr,
        _transport: Transport,
        domain: &str,
    ) -> ToolboxResult<NsAnswer> {
        Err(ToolboxError::NoAnswer(domain.to_string()))
    }

    async fn authoritative(&self, _parent: &str, domain: &str) -> ToolboxResult<Vec<String>> {
        Err(ToolboxError::NoAnswer(domain.to_string()))
    }
}

// ===== 工厂方法 =====

pub struct TestContext {
    pub ctx: Arc<ServiceContext>,
    pub root: Arc<MockCloudProvider>,
    pub dev: Arc<MockCloudProvider>,
    pub config_store: Arc<MockConfigStore>,
    pub environments: Arc<MockEnvironmentStore>,
}

/// 创建测试用 `ServiceContext`
///
/// Profiles `root`, `dev` and `staging` map to [`ROOT_ACCOUNT`], [`DEV_ACCOUNT`] and
/// [`STAGING_ACCOUNT`].
pub fn create_test_context() -> TestContext {
    let root = Arc::new(MockCloudProvider::new(ROOT_PROFILE, ROOT_ACCOUNT, "eu-west-1"));
    let dev = Arc::new(MockCloudProvider::new("dev", DEV_ACCOUNT, "eu-west-1"));
    let staging = Arc::new(MockCloudProvider::new("staging", STAGING_ACCOUNT, "eu-west-1"));

    let credentials = MockCredentialResolver::new(&[&root, &dev, &staging]);

    let config_store = Arc::new(MockConfigStore::new());
    let environments = Arc::new(MockEnvironmentStore::new());
    let ctx = Arc::new(ServiceContext::new(
        config_store.clone(),
        environments.clone(),
        Arc::new(MockResumeTokenStore::new()),
        Arc::new(credentials),
    ));

    TestContext {
        ctx,
        root,
        dev,
        config_store,
        environments,
    }
}

pub fn env(name: &str, account_id: Option<&str>, profile: Option<&str>) -> Environment {
    Environment {
        name: name.to_string(),
        credential_profile: profile.map(str::to_string),
        account_id: account_id.map(str::to_string),
        region: None,
    }
}
