// src/detection/mod.rs
//
// Detection result types

mod result;

pub use result::{
    ContributingFactor, IndicatorTag, RiskLevel, RiskScore, Severity, ValidationIssue,
};
