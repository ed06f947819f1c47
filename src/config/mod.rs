use serde::Deserialize;
use std::path::PathBuf;

use crate::chart::{ChartParams, DEFAULT_INNER_RADIUS, DEFAULT_OUTER_RADIUS};
use crate::geometry::DEFAULT_ARC_POINTS;
use crate::table::DEFAULT_SITE_LABEL;

pub const DEFAULT_INPUT: &str = "input.csv";
pub const DEFAULT_OUTPUT: &str = "nested_pie_chart.geojson";

fn default_inner_radius() -> f64 {
    DEFAULT_INNER_RADIUS
}
fn default_outer_radius() -> f64 {
    DEFAULT_OUTER_RADIUS
}
fn default_arc_points() -> usize {
    DEFAULT_ARC_POINTS
}

/// Settings read from `riskpie.toml`; every field is optional
#[derive(Debug, Deserialize, Default, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub input: Option<PathBuf>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub inner_radius: Option<f64>,
    #[serde(default)]
    pub outer_radius: Option<f64>,
    #[serde(default)]
    pub arc_points: Option<usize>,
    #[serde(default)]
    pub site_label: Option<String>,
    #[serde(default)]
    pub lenient: bool,
    #[serde(default)]
    pub pretty: bool,
    #[serde(default)]
    pub verbose: bool,
}

impl FileConfig {
    /// Load the first parseable config file from the standard search paths
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("riskpie.toml"));
    paths.push(PathBuf::from(".riskpie.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("riskpie").join("config.toml"));
        paths.push(config_dir.join("riskpie.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".riskpie.toml"));
    }

    paths
}

/// Command-line values; `None` means the flag was not given
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub inner_radius: Option<f64>,
    pub outer_radius: Option<f64>,
    pub arc_points: Option<usize>,
    pub site_label: Option<String>,
    pub lenient: bool,
    pub pretty: bool,
    pub verbose: bool,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub input: PathBuf,
    pub output: PathBuf,
    pub params: ChartParams,
    pub site_label: String,
    /// Skip the load-time tier completeness check
    pub lenient: bool,
    pub pretty: bool,
    pub verbose: bool,
}

impl RunConfig {
    /// Merge CLI flags over file settings over built-in defaults
    pub fn resolve(cli: CliOverrides, file: Option<&FileConfig>) -> Self {
        let file = file.cloned().unwrap_or_default();

        let params = ChartParams {
            inner_radius: cli
                .inner_radius
                .or(file.inner_radius)
                .unwrap_or_else(default_inner_radius),
            outer_radius: cli
                .outer_radius
                .or(file.outer_radius)
                .unwrap_or_else(default_outer_radius),
            arc_points: cli
                .arc_points
                .or(file.arc_points)
                .unwrap_or_else(default_arc_points),
        };

        Self {
            input: cli
                .input
                .or(file.input)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_INPUT)),
            output: cli
                .output
                .or(file.output)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            params,
            site_label: cli
                .site_label
                .or(file.site_label)
                .unwrap_or_else(|| DEFAULT_SITE_LABEL.to_string()),
            lenient: cli.lenient || file.lenient,
            pretty: cli.pretty || file.pretty,
            verbose: cli.verbose || file.verbose,
        }
    }
}
