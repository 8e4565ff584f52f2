use crate::search::alphabeta::SearchParams;
use crate::search::eval::EvalWeights;
use crate::search::tiebreak::TieBreak;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub depth: u32,
    pub movetime_ms: Option<u64>,
    pub max_nodes: Option<u64>,
    pub use_tt: bool,
    pub hash_mb: usize,
    pub order_moves: bool,
    pub take_corners: bool,
    pub tie_break: TieBreak,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: 6,
            movetime_ms: Some(2_000),
            max_nodes: None,
            use_tt: true,
            hash_mb: 16,
            order_moves: true,
            take_corners: false,
            tie_break: TieBreak::Canonical,
        }
    }
}

impl SearchConfig {
    pub fn to_params(&self) -> SearchParams {
        SearchParams {
            depth: self.depth,
            use_tt: self.use_tt,
            max_nodes: self.max_nodes,
            movetime: self.movetime_ms.map(Duration::from_millis),
            order_moves: self.order_moves,
            take_corners: self.take_corners,
            tie_break: self.tie_break,
        }
    }
}

/// Everything tunable about the engine; missing JSON fields take defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub eval: EvalWeights,
}

impl EngineConfig {
    /// Parses and validates; weights that let estimates reach the win range
    /// are rejected.
    pub fn from_json(text: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(text).context("parsing engine config")?;
        cfg.eval.validate().context("checking evaluation weights")?;
        Ok(cfg)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("in {}", path.display()))
    }
}
