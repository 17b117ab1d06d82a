//! Step outputs for the CI runner.
use log::*;
use std::{
    env,
    fs::OpenOptions,
    io::Write,
    path::{Path, PathBuf},
};

use crate::Result;

const DELIMITER: &str = "GH_RELEASER_EOF";

/// Ordered output key/value pairs produced by a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Outputs(Vec<(String, String)>);

impl Outputs {
    pub fn set(&mut self, key: &str, value: impl ToString) {
        self.0.push((key.to_string(), value.to_string()));
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn keys(&self) -> Vec<&str> {
        self.0.iter().map(|(k, _)| k.as_str()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, String)> {
        self.0.iter()
    }
}

/// Writes outputs to the file named by `GITHUB_OUTPUT`, or to the log when
/// no output file is configured.
pub struct OutputWriter {
    path: Option<PathBuf>,
}

impl OutputWriter {
    pub fn new(path: Option<PathBuf>) -> Self {
        Self { path }
    }

    pub fn from_env() -> Self {
        Self::new(env::var_os("GITHUB_OUTPUT").map(PathBuf::from))
    }

    pub fn write(&self, outputs: &Outputs) -> Result<()> {
        match &self.path {
            Some(path) => write_output_file(path, outputs),
            None => {
                for (key, value) in outputs.iter() {
                    info!("output {key}:\n{value}");
                }
                Ok(())
            }
        }
    }
}

fn write_output_file(path: &Path, outputs: &Outputs) -> Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;

    for (key, value) in outputs.iter() {
        let mut delimiter = DELIMITER.to_string();
        while value.contains(&delimiter) {
            delimiter.push('_');
        }
        write!(file, "{key}<<{delimiter}\n{value}\n{delimiter}\n")?;
        debug!("set output {key}");
    }

    Ok(())
}

/// Workflow command marking the step as failed with `message`.
pub fn error_annotation(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{escaped}")
}
