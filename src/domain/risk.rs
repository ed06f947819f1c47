use std::collections::HashMap;

use super::Tier;
use crate::error::{ChartError, Result};

/// Site origin as (lon, lat) in WGS84
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Center {
    pub lon: f64,
    pub lat: f64,
}

impl Center {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }
}

/// Risk labels per (tier, direction), with directions kept in table order
#[derive(Debug, Clone, Default)]
pub struct RiskTable {
    directions: Vec<String>,
    risks: HashMap<(Tier, String), String>,
}

impl RiskTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a risk label. A direction seen for the first time is appended to the
    /// direction order; a repeated (tier, direction) pair replaces the earlier label.
    pub fn insert(&mut self, tier: Tier, direction: &str, risk: &str) {
        if !self.directions.iter().any(|d| d == direction) {
            self.directions.push(direction.to_string());
        }
        self.risks
            .insert((tier, direction.to_string()), risk.to_string());
    }

    pub fn directions(&self) -> &[String] {
        &self.directions
    }

    /// Look up the risk label for a direction in one tier
    pub fn risk(&self, tier: Tier, direction: &str) -> Result<&str> {
        self.risks
            .get(&(tier, direction.to_string()))
            .map(String::as_str)
            .ok_or_else(|| ChartError::MissingRisk {
                direction: direction.to_string(),
                tier,
            })
    }

    /// Fail on the first direction that lacks a label in either tier
    pub fn ensure_complete(&self) -> Result<()> {
        for direction in &self.directions {
            for tier in Tier::ALL {
                self.risk(tier, direction)?;
            }
        }
        Ok(())
    }
}
