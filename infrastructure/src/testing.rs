//! Port fakes shared by adapter tests

use async_trait::async_trait;
use cloudcorp_application::{
    CommandError, CommandInvocation, CommandOutput, CommandRunner, JsonFetcher, SourceError,
};
use std::sync::Mutex;

/// Returns a canned result and records every invocation
pub struct FakeRunner {
    result: Result<CommandOutput, CommandError>,
    pub calls: Mutex<Vec<CommandInvocation>>,
}

impl FakeRunner {
    pub fn exits(code: i32, stdout: &str, stderr: &str) -> Self {
        Self {
            result: Ok(CommandOutput {
                exit_code: Some(code),
                stdout: stdout.to_string(),
                stderr: stderr.to_string(),
            }),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn fails(error: CommandError) -> Self {
        Self {
            result: Err(error),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn last_call(&self) -> Option<CommandInvocation> {
        self.calls.lock().unwrap().last().cloned()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl CommandRunner for FakeRunner {
    async fn run(&self, invocation: &CommandInvocation) -> Result<CommandOutput, CommandError> {
        self.calls.lock().unwrap().push(invocation.clone());
        self.result.clone()
    }
}

/// Returns a canned JSON body and records the requested URL and query
pub struct FakeFetcher {
    result: Result<serde_json::Value, SourceError>,
    pub requests: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl FakeFetcher {
    pub fn returning(result: Result<serde_json::Value, SourceError>) -> Self {
        Self {
            result,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl JsonFetcher for FakeFetcher {
    async fn get_json(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<serde_json::Value, SourceError> {
        let query = query
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.requests.lock().unwrap().push((url.to_string(), query));
        self.result.clone()
    }
}
