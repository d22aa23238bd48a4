//! External process execution
//!
//! Provides [`ProcessCommandRunner`], the [`CommandRunner`](cloudcorp_application::CommandRunner)
//! adapter used by the `aws` and `gcloud` backed sources and by the EC2 launcher.

mod runner;

pub use runner::ProcessCommandRunner;
