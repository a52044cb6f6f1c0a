use std::path::Path;

use serde::{Deserialize, Serialize};
use subroute::error::{with_err_context, ErrorContext};
use subroute::{BundleResult, BundleRouter, Port, Result, RouterConfig};

/// How a job picks its bundle router.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Choose from the port orientations.
    #[default]
    Auto,
    Direct,
    Indirect,
}

/// A bundle routing job, as read from a TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub config: RouterConfig,
    #[serde(default)]
    pub mode: Mode,
    pub ports1: Vec<Port>,
    pub ports2: Vec<Port>,
}

impl Job {
    pub fn from_toml(input: &str) -> Result<Self> {
        let value = toml::from_str(input)?;
        Ok(value)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let ctx = || ErrorContext::ReadFile(path.to_path_buf());
        let input = with_err_context(std::fs::read_to_string(path), ctx)?;
        with_err_context(Self::from_toml(&input), ctx)
    }

    /// Routes the job's bundle.
    pub fn run(&self, mode: Option<Mode>) -> Result<BundleResult> {
        let router = BundleRouter::with_config(self.config);
        let request = router.request(self.ports1.clone(), self.ports2.clone());
        match mode.unwrap_or(self.mode) {
            Mode::Auto => router.route_bundle(&request),
            Mode::Direct => router.route_direct(&request),
            Mode::Indirect => router.route_indirect(&request, request.extension_length),
        }
    }
}

/// Routes the job in `input`, writing the routes as JSON to `output` or standard output.
pub fn route_file(input: impl AsRef<Path>, output: Option<&Path>, mode: Option<Mode>) -> Result<()> {
    let job = Job::from_toml_file(input)?;
    log::info!(
        "routing {} port pairs with bend radius {}",
        job.ports1.len(),
        job.config.bend_radius
    );
    let json = job.run(mode)?.to_json()?;
    match output {
        Some(path) => with_err_context(std::fs::write(path, json), || {
            ErrorContext::Task(subroute::PortId::from(format!("writing {}", path.display())))
        })?,
        None => println!("{json}"),
    }
    Ok(())
}
