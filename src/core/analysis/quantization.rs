// src/core/analysis/quantization.rs
//
// JPEG quantization table statistics. Aggressive or repeatedly applied
// compression drives the table values up; near-uniform tables at elevated
// levels are typical of automated re-encoding pipelines.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::config::Thresholds;

/// Summary of all quantization table values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantizationSignal {
    pub average: f64,
    pub variance: f64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantizationVerdict {
    HighQuantization,
    UniformQuantization,
}

#[derive(Debug, Clone, PartialEq)]
pub struct QuantizationAnalysis {
    pub signal: Option<QuantizationSignal>,
    pub verdict: Option<QuantizationVerdict>,
}

impl QuantizationAnalysis {
    fn absent() -> Self {
        Self {
            signal: None,
            verdict: None,
        }
    }
}

/// Inspect quantization tables when present; absent tables simply omit the
/// signal.
pub fn inspect(
    tables: Option<&BTreeMap<u8, Vec<u16>>>,
    thresholds: &Thresholds,
) -> QuantizationAnalysis {
    let Some(tables) = tables else {
        return QuantizationAnalysis::absent();
    };

    let values: Vec<f64> = tables
        .values()
        .flat_map(|t| t.iter().map(|&v| v as f64))
        .collect();
    if values.is_empty() {
        return QuantizationAnalysis::absent();
    }

    let average = values.iter().sum::<f64>() / values.len() as f64;
    let variance = values
        .iter()
        .map(|&v| (v - average) * (v - average))
        .sum::<f64>()
        / values.len() as f64;

    let verdict = if average > thresholds.quantization_high_mean {
        Some(QuantizationVerdict::HighQuantization)
    } else if variance < thresholds.quantization_uniform_variance
        && average > thresholds.quantization_uniform_mean
    {
        Some(QuantizationVerdict::UniformQuantization)
    } else {
        None
    };

    let signal = verdict.map(|v| {
        let label = match v {
            QuantizationVerdict::HighQuantization => format!(
                "heavy quantization (avg={average:.1}, var={variance:.1}), suggests aggressive or repeated recompression"
            ),
            QuantizationVerdict::UniformQuantization => format!(
                "uniform quantization tables (avg={average:.1}, var={variance:.1}), typical of automated re-encoding"
            ),
        };
        QuantizationSignal {
            average,
            variance,
            label,
        }
    });

    QuantizationAnalysis { signal, verdict }
}
