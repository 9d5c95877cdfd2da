use crate::models::{ErrorBarKind, Statistic};
use serde::{Deserialize, Serialize};

/// Fallback when the log-base field does not hold a usable number.
pub const DEFAULT_LOG_BASE: f64 = 10.0;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    Logarithmic,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

/// Current form selections, passed by reference to chart building. Held in
/// memory only; nothing is written to disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotConfig {
    pub statistic: Statistic,
    pub error_bar: ErrorBarKind,
    pub y_scale: AxisScale,
    /// Raw text as typed into the form; parsed on demand.
    pub log_base: String,
    pub theme: Theme,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            statistic: Statistic::Mean,
            error_bar: ErrorBarKind::StandardError,
            y_scale: AxisScale::Linear,
            log_base: "10".to_string(),
            theme: Theme::Light,
        }
    }
}

impl PlotConfig {
    /// The log base to plot with, if the field holds a valid one.
    /// A base must be positive, finite and not 1.
    pub fn parsed_log_base(&self) -> Option<f64> {
        self.log_base
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|b| b.is_finite() && *b > 0.0 && (*b - 1.0).abs() > f64::EPSILON)
    }

    /// Resolved base plus whether the fallback kicked in. Malformed input
    /// falls back to [`DEFAULT_LOG_BASE`] rather than failing the render;
    /// the raw text is left for the user to correct.
    pub fn effective_log_base(&self) -> (f64, bool) {
        match self.parsed_log_base() {
            Some(base) => (base, false),
            None => (DEFAULT_LOG_BASE, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_log_base_parses() {
        let config = PlotConfig::default();
        assert_eq!(config.parsed_log_base(), Some(10.0));
        assert_eq!(config.effective_log_base(), (10.0, false));
    }

    #[test]
    fn malformed_log_base_falls_back() {
        let mut config = PlotConfig::default();
        for bad in ["", "abc", "0", "-2", "1", "inf"] {
            config.log_base = bad.to_string();
            assert_eq!(config.parsed_log_base(), None, "input {:?}", bad);
            assert_eq!(config.effective_log_base(), (DEFAULT_LOG_BASE, true));
        }
    }

    #[test]
    fn custom_log_base_is_used() {
        let mut config = PlotConfig::default();
        config.log_base = " 2 ".to_string();
        assert_eq!(config.effective_log_base(), (2.0, false));
    }
}
