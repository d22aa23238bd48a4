//! EC2 launcher backed by `aws ec2 run-instances`

use async_trait::async_trait;
use cloudcorp_application::{CommandInvocation, CommandRunner, InstanceLauncher, LaunchError};
use cloudcorp_domain::ProvisioningRequest;
use std::sync::Arc;
use tracing::debug;

/// Build the `run-instances` argv for a resolved request.
///
/// Every value is a separate argument; nothing goes through a shell.
pub fn run_instances_invocation(program: &str, request: &ProvisioningRequest) -> CommandInvocation {
    CommandInvocation::new(program)
        .args(["ec2", "run-instances"])
        .args(["--image-id", request.image_id.as_str()])
        .args(["--count", "1"])
        .args(["--instance-type", request.instance_type.as_str()])
        .args(["--key-name", request.key_name.as_str()])
        .args(["--security-group-ids", request.security_group_id.as_str()])
        .arg("--block-device-mappings")
        .arg(format!(
            "DeviceName=/dev/sda1,Ebs={{VolumeSize={}}}",
            request.storage_gb
        ))
        .args(["--region", request.region.as_str()])
}

/// Launches one instance per call through the AWS CLI
pub struct AwsCliInstanceLauncher {
    runner: Arc<dyn CommandRunner>,
    program: String,
}

impl AwsCliInstanceLauncher {
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            runner,
            program: "aws".to_string(),
        }
    }

    /// Use a different `aws` executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}

#[async_trait]
impl InstanceLauncher for AwsCliInstanceLauncher {
    async fn launch(&self, request: &ProvisioningRequest) -> Result<String, LaunchError> {
        let invocation = run_instances_invocation(&self.program, request);
        debug!("Launch command: {}", invocation.command_line());

        let output = self.runner.run(&invocation).await?;
        if output.success() {
            Ok(output.stdout)
        } else {
            Err(LaunchError::NonZeroExit {
                code: output.exit_code,
                stderr: output.stderr.trim().to_string(),
            })
        }
    }
}
