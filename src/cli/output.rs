//! Terminal output formatting for analysis reports

use colorful::Colorful;

use crate::core::CorroborationReport;
use crate::detection::RiskLevel;

/// Print one report in the standard terminal format.
pub fn print_report(source: &str, report: &CorroborationReport, verbose: bool) {
    println!("Analyzing: {}", source.to_string().cyan());

    let level = report.risk.risk_level;
    let headline = format!(
        "  Risk: {:.1}/100 ({}) confidence {:.0}%",
        report.risk.overall_score,
        level.description(),
        report.risk.confidence * 100.0
    );
    match level {
        RiskLevel::Low => println!("{}", headline.green()),
        RiskLevel::Medium => println!("{}", headline.yellow()),
        RiskLevel::High | RiskLevel::Critical => println!("{}", headline.red()),
    }

    if report.is_tampered {
        println!(
            "  Status: {} (confidence {:.0}%)",
            "✗ TAMPERING INDICATORS".red(),
            report.tampering_confidence * 100.0
        );
    } else if report.is_authentic {
        println!("  Status: {}", "✓ NO TAMPERING DETECTED".green());
    } else {
        println!("  Status: {}", "? AUTHENTICITY UNCERTAIN".yellow());
    }

    for issue in report
        .forensic_findings
        .iter()
        .chain(report.metadata_issues.iter())
    {
        println!(
            "    {} {}",
            issue.severity.symbol(),
            issue.description.clone().yellow()
        );
    }

    if let Some(note) = &report.risk.normalization_note {
        println!("    {note}");
    }

    for rec in &report.risk.recommendations {
        println!("    → {rec}");
    }

    if verbose {
        let f = &report.findings;
        println!("\n  Probe Details:");
        println!("    ELA Variance: {:.1}", f.ela_variance);
        println!("    Clone Matches: {}", f.clone_matches);
        println!("    Resampled: {}", f.is_resampled);
        println!("    Median Filtered: {}", f.is_median_filtered);
        println!("    Channel Correlation: {:.3}", f.color_correlation);
        println!("    Noise Ratio: {:.2}", f.noise_ratio);
        println!("    Edge Consistency Issue: {}", f.edge_consistency_issue);
        if let Some(q) = &f.quantization_signal {
            println!("    Quantization: avg {:.1}, var {:.1}", q.average, q.variance);
        }
        for m in &report.profile_matches {
            println!(
                "    Profile: {} ({:?}, size match: {})",
                m.label, m.confidence, m.size_match
            );
        }
        if !report.risk.contributing_factors.is_empty() {
            println!("  Contributing Factors:");
            for factor in &report.risk.contributing_factors {
                println!(
                    "    [{}] {} (+{:.1})",
                    factor.component, factor.factor, factor.impact
                );
            }
        }
        for note in &f.diagnostics {
            println!("    note: {note}");
        }
    }

    println!();
}

/// Print a closing summary for a batch run.
pub fn print_summary(results: &[(String, CorroborationReport)], failures: usize) {
    if results.len() + failures <= 1 {
        return;
    }

    let count_level = |level: RiskLevel| {
        results
            .iter()
            .filter(|(_, r)| r.risk.risk_level == level)
            .count()
    };

    println!("Summary: {} file(s) analyzed", results.len());
    let low = count_level(RiskLevel::Low);
    let medium = count_level(RiskLevel::Medium);
    let high = count_level(RiskLevel::High);
    let critical = count_level(RiskLevel::Critical);
    if low > 0 {
        println!("{}", format!("  ✓ {low} low risk").green());
    }
    if medium > 0 {
        println!("{}", format!("  ? {medium} medium risk").yellow());
    }
    if high > 0 {
        println!("{}", format!("  ⚠ {high} high risk").red());
    }
    if critical > 0 {
        println!("{}", format!("  ✗ {critical} critical risk").red());
    }
    if failures > 0 {
        println!("{}", format!("  — {failures} failed to analyze").red());
    }
}
