//! Plain-text rendering of study results
//!
//! Pure formatting over the structured results in [`crate::study`] and
//! [`crate::distribution`]. Bands from [`crate::bands`] are attached here and
//! nowhere else.

use crate::agreement::{MatchRate, PairAgreement, Statistic};
use crate::bands::KappaBand;
use crate::distribution::{CrossCorpusReport, PairwiseComparison};
use crate::study::{AgreementSummary, CodingSetReport, ComparisonRow, MethodAgreement, Source, StudyReport};
use std::fmt::{self, Write};

/// Rendering switches
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Print the per-unit label table
    pub units: bool,
    /// Category differences listed per corpus pair
    pub top_differences: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            units: false,
            top_differences: 5,
        }
    }
}

/// Kappa with its Landis & Koch band, or `undefined`.
pub fn kappa_cell(kappa: &Statistic) -> String {
    match kappa.value() {
        Some(k) => format!("{:.3} ({})", k, KappaBand::from_kappa(k)),
        None => "undefined".to_string(),
    }
}

fn rate_cell(rate: &MatchRate) -> String {
    rate.proportion.to_string()
}

pub fn render_study(report: &StudyReport, options: RenderOptions) -> String {
    let mut out = String::new();
    for summary in &report.corpora {
        out.push_str(&render_summary(summary, options));
        out.push('\n');
    }
    for coding in &report.codings {
        out.push_str(&render_codings(coding));
        out.push('\n');
    }
    if let Some(cross) = &report.cross_corpus {
        out.push_str(&render_cross_corpus(cross, options));
    }
    out
}

/// Agreement summary of one corpus.
pub fn render_summary(summary: &AgreementSummary, options: RenderOptions) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail
    let _ = write_summary(&mut out, summary, options);
    out
}

fn write_summary(out: &mut String, summary: &AgreementSummary, options: RenderOptions) -> fmt::Result {
    let resolution = &summary.table.resolution;
    writeln!(out, "=== {} ===", summary.corpus)?;
    writeln!(
        out,
        "{} units joined, {} skipped ({} unresolvable, {} without method output)",
        resolution.joined,
        resolution.skipped(),
        resolution.unresolvable.len(),
        resolution.unmatched.len()
    )?;
    if !resolution.unknown_text.is_empty() {
        writeln!(out, "{} rows name no known text", resolution.unknown_text.len())?;
    }
    writeln!(out, "identifier: {} -> {}", resolution.strategy, resolution.method_key)?;
    writeln!(out)?;

    writeln!(out, "Human baseline (H1 vs H2)")?;
    write_pair(out, "exact", &summary.human_baseline.exact)?;
    write_pair(out, "base", &summary.human_baseline.base)?;

    for method in &summary.methods {
        writeln!(out)?;
        write_method(out, method)?;
    }

    if !summary.disagreements.is_empty() {
        writeln!(out)?;
        writeln!(out, "Annotator disagreements on primary label")?;
        for d in &summary.disagreements {
            let shared: Vec<&str> = d.overlap.shared.iter().map(String::as_str).collect();
            writeln!(
                out,
                "  {:>5}  {} / {}  base {}  shared [{}]",
                d.unit_label(),
                d.human1.as_deref().unwrap_or("-"),
                d.human2.as_deref().unwrap_or("-"),
                if d.overlap.primary_base { "agrees" } else { "differs" },
                shared.join(", ")
            )?;
        }
    }

    if options.units {
        writeln!(out)?;
        write_units(out, summary)?;
    }
    Ok(())
}

fn write_pair(out: &mut String, name: &str, pair: &PairAgreement) -> fmt::Result {
    writeln!(
        out,
        "  {:<6} {:<20} kappa {}",
        name,
        rate_cell(&pair.rate),
        kappa_cell(&pair.kappa)
    )
}

fn write_method(out: &mut String, method: &MethodAgreement) -> fmt::Result {
    writeln!(out, "{} ({} units with both humans and method)", method.method, method.valid)?;
    writeln!(out, "  {:<14} {:<24} {:<24}", "", "exact", "base")?;
    let rows: [(&str, String, String); 7] = [
        ("vs H1", rate_cell(&method.exact.vs_human1), rate_cell(&method.base.vs_human1)),
        ("vs H2", rate_cell(&method.exact.vs_human2), rate_cell(&method.base.vs_human2)),
        ("vs either", rate_cell(&method.exact.vs_either), rate_cell(&method.base.vs_either)),
        ("kappa H1", kappa_cell(&method.exact.kappa_human1), kappa_cell(&method.base.kappa_human1)),
        ("kappa H2", kappa_cell(&method.exact.kappa_human2), kappa_cell(&method.base.kappa_human2)),
        ("mean kappa", kappa_cell(&method.exact.mean_kappa), kappa_cell(&method.base.mean_kappa)),
        (
            "of human",
            share_cell(&method.exact.human_reliability_share),
            share_cell(&method.base.human_reliability_share),
        ),
    ];
    for (name, exact, base) in rows {
        writeln!(out, "  {:<14} {:<24} {:<24}", name, exact, base)?;
    }
    Ok(())
}

fn share_cell(share: &Statistic) -> String {
    match share.value() {
        Some(v) => format!("{:.1}%", v * 100.0),
        None => "undefined".to_string(),
    }
}

fn match_mark(row: &ComparisonRow, source: Source) -> &'static str {
    match row.label(source) {
        None => "-",
        Some(label) => {
            let hit = [Source::Human1, Source::Human2]
                .into_iter()
                .any(|human| row.label(human) == Some(label));
            if hit {
                "yes"
            } else {
                "no"
            }
        }
    }
}

fn write_units(out: &mut String, summary: &AgreementSummary) -> fmt::Result {
    writeln!(
        out,
        "{:>5} | {:<22} | {:<22} | {:<22} | {:<22} | {:<4} | {:<4}",
        "Unit", "H1", "H2", "Embedding", "Lexicon", "Emb?", "Lex?"
    )?;
    writeln!(out, "{}", "-".repeat(122))?;
    for row in &summary.table.rows {
        writeln!(
            out,
            "{:>5} | {:<22} | {:<22} | {:<22} | {:<22} | {:<4} | {:<4}",
            row.unit_label(),
            row.label(Source::Human1).unwrap_or("-"),
            row.label(Source::Human2).unwrap_or("-"),
            row.label(Source::Embedding).unwrap_or("-"),
            row.label(Source::Lexicon).unwrap_or("-"),
            match_mark(row, Source::Embedding),
            match_mark(row, Source::Lexicon)
        )?;
    }
    Ok(())
}

/// Equivalence rates and pattern kappas of one coding set.
pub fn render_codings(report: &CodingSetReport) -> String {
    let mut out = String::new();
    let _ = write_codings(&mut out, report);
    out
}

fn write_codings(out: &mut String, report: &CodingSetReport) -> fmt::Result {
    writeln!(out, "=== {} ===", report.name)?;
    for (name, rate) in &report.rates {
        writeln!(out, "  {:<32} equivalent {}", name, rate)?;
    }
    for pk in &report.pattern_kappas {
        writeln!(
            out,
            "  pattern kappa {} vs {}: {}",
            pk.left,
            pk.right,
            kappa_cell(&pk.kappa)
        )?;
    }
    Ok(())
}

/// Rankings, pairwise statistics and matrices across corpora.
pub fn render_cross_corpus(report: &CrossCorpusReport, options: RenderOptions) -> String {
    let mut out = String::new();
    let _ = write_cross_corpus(&mut out, report, options);
    out
}

fn write_cross_corpus(
    out: &mut String,
    report: &CrossCorpusReport,
    options: RenderOptions,
) -> fmt::Result {
    writeln!(out, "=== Cross-corpus comparison ===")?;
    writeln!(out, "Rankings (1 = highest)")?;
    write!(out, "  {:<16}", "")?;
    for corpus in &report.corpora {
        write!(out, " {:>12}", corpus)?;
    }
    writeln!(out)?;
    for (c, category) in report.categories.iter().enumerate() {
        write!(out, "  {:<16}", category)?;
        for ranks in &report.rankings {
            write!(out, " {:>12}", ranks[c])?;
        }
        writeln!(out)?;
    }

    writeln!(out)?;
    writeln!(out, "Pairwise")?;
    for pair in &report.comparisons {
        write_pair_comparison(out, pair, options.top_differences)?;
    }

    writeln!(out)?;
    writeln!(out, "Spearman rho")?;
    write_matrix(out, &report.corpora, |i, j| match report.spearman_matrix[i][j].value() {
        Some(v) => format!("{:.3}", v),
        None => "-".to_string(),
    })?;
    writeln!(out)?;
    writeln!(out, "Jensen-Shannon distance")?;
    write_matrix(out, &report.corpora, |i, j| format!("{:.4}", report.jsd_matrix[i][j]))
}

fn write_pair_comparison(out: &mut String, pair: &PairwiseComparison, top: usize) -> fmt::Result {
    let rho = match (pair.spearman.rho.value(), pair.strength()) {
        (Some(r), Some(strength)) => format!("{:.3} ({})", r, strength),
        _ => "undefined".to_string(),
    };
    let p = match (pair.spearman.p_value.value(), pair.significance()) {
        (Some(p), Some(sig)) => format!("{:.4} {}", p, sig.marker()),
        _ => "undefined".to_string(),
    };
    writeln!(out, "  {} vs {}", pair.left, pair.right)?;
    writeln!(out, "    rho {}  p {}", rho, p)?;
    writeln!(
        out,
        "    JSD {:.4} ({})  similarity {:.1}%",
        pair.jensen_shannon.distance,
        pair.divergence_band(),
        pair.jensen_shannon.similarity() * 100.0
    )?;
    for diff in pair.differences.iter().take(top) {
        writeln!(
            out,
            "    {:<16} {:>8.4} -> {:>8.4} ({:+.4})",
            diff.category, diff.left, diff.right, diff.difference
        )?;
    }
    Ok(())
}

fn write_matrix(
    out: &mut String,
    names: &[String],
    cell: impl Fn(usize, usize) -> String,
) -> fmt::Result {
    write!(out, "  {:<14}", "")?;
    for name in names {
        write!(out, " {:>12}", name)?;
    }
    writeln!(out)?;
    for (i, name) in names.iter().enumerate() {
        write!(out, "  {:<14}", name)?;
        for j in 0..names.len() {
            write!(out, " {:>12}", cell(i, j))?;
        }
        writeln!(out)?;
    }
    Ok(())
}
