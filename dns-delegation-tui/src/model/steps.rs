//! Root setup progress checklist

/// 检查 AWS profile
pub const STEP_PROFILE: usize = 0;
/// 创建 prod.yaml
pub const STEP_ENV_FILE: usize = 1;
/// 创建 DNS 区域
pub const STEP_ZONE: usize = 2;
/// 设置 IAM 角色
pub const STEP_ROLE: usize = 3;
/// 保存配置
pub const STEP_SAVE: usize = 4;

const STEP_LABELS: [&str; 5] = [
    "Checking AWS profile",
    "Creating prod.yaml",
    "Creating DNS zone",
    "Setting up IAM role",
    "Saving configuration",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepStatus {
    Pending,
    Running,
    Done,
    /// Nothing to do (e.g. the file already existed).
    Skipped,
    /// Finished, but with a problem the user should see.
    Warning,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupStep {
    pub label: &'static str,
    pub status: StepStatus,
    pub detail: Option<String>,
}

/// The five setup steps shown while the root account is prepared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetupSteps {
    steps: Vec<SetupStep>,
}

impl Default for SetupSteps {
    fn default() -> Self {
        Self {
            steps: STEP_LABELS
                .iter()
                .map(|label| SetupStep {
                    label,
                    status: StepStatus::Pending,
                    detail: None,
                })
                .collect(),
        }
    }
}

impl SetupSteps {
    pub fn start(&mut self, index: usize) {
        if let Some(step) = self.steps.get_mut(index) {
            step.status = StepStatus::Running;
            step.detail = None;
        }
    }

    pub fn finish(&mut self, index: usize, status: StepStatus, detail: Option<String>) {
        if let Some(step) = self.steps.get_mut(index) {
            step.status = status;
            step.detail = detail;
        }
    }

    /// Mark whichever step is running as failed.
    pub fn fail_running(&mut self, detail: &str) {
        for step in &mut self.steps {
            if step.status == StepStatus::Running {
                step.status = StepStatus::Failed;
                step.detail = Some(detail.to_string());
            }
        }
    }

    pub fn status(&self, index: usize) -> Option<StepStatus> {
        self.steps.get(index).map(|s| s.status)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SetupStep> {
        self.steps.iter()
    }
}
