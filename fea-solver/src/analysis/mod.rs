//! Analysis options

use serde::{Deserialize, Serialize};

/// Options for linear static analysis
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Check for model stability before accepting a solution
    pub check_stability: bool,
    /// Smallest acceptable LU pivot of the diagonally scaled free stiffness
    pub pivot_tolerance: f64,
    /// Load combinations to analyze (None = all)
    pub combos: Option<Vec<String>>,
    /// Log per-combination progress at info level
    pub log: bool,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            check_stability: true,
            pivot_tolerance: 1e-10,
            combos: None,
            log: false,
        }
    }
}

impl AnalysisOptions {
    /// Create options for linear analysis
    pub fn linear() -> Self {
        Self::default()
    }

    /// Enable logging
    pub fn with_logging(mut self) -> Self {
        self.log = true;
        self
    }

    /// Skip the pivot-based stability check
    pub fn without_stability_check(mut self) -> Self {
        self.check_stability = false;
        self
    }

    /// Set the relative pivot tolerance used by the stability check
    pub fn with_pivot_tolerance(mut self, tol: f64) -> Self {
        self.pivot_tolerance = tol;
        self
    }

    /// Restrict analysis to the named combinations
    pub fn with_combos(mut self, combos: Vec<String>) -> Self {
        self.combos = Some(combos);
        self
    }

    /// Whether a combination is selected by these options
    pub fn includes(&self, combo: &str) -> bool {
        match &self.combos {
            Some(names) => names.iter().any(|n| n == combo),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combo_filter() {
        let all = AnalysisOptions::linear();
        assert!(all.includes("Dead"));

        let some = AnalysisOptions::linear().with_combos(vec!["Live".to_string()]);
        assert!(some.includes("Live"));
        assert!(!some.includes("Dead"));
    }
}
