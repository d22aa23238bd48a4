//! Instance launcher adapters

mod aws_ec2;

pub use aws_ec2::{AwsCliInstanceLauncher, run_instances_invocation};
