//! Loan Approval – Bias Audit and Correction
//! =========================================
//! Synthesize a loan-approval dataset in which some features leak the
//! decision, audit every feature with the Chi-squared independence test,
//! then correct the flagged columns adversarially and compare the group
//! mean gap before and after.
//!
//! ```bash
//! cargo run --release --example audit
//! ```

use debias::corrector::CorrectionMethod;
use debias::report::ReportIO;
use debias::{BiasCorrector, BiasDetector, Matrix, MatrixMut};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::error::Error;

const FEATURE_NAMES: [&str; 4] = ["credit_score", "applicant_age", "zip_risk_score", "job_tenure"];

/// Difference between the positive-group and negative-group means.
fn group_gap(values: &[f64], target: &[f64]) -> f64 {
    let (mut pos_sum, mut pos_n, mut neg_sum, mut neg_n) = (0.0, 0.0, 0.0, 0.0);
    for (&value, &y) in values.iter().zip(target) {
        if y >= 0.5 {
            pos_sum += value;
            pos_n += 1.0;
        } else {
            neg_sum += value;
            neg_n += 1.0;
        }
    }
    pos_sum / pos_n - neg_sum / neg_n
}

fn main() -> Result<(), Box<dyn Error>> {
    // ------------------------------------------------------------------
    // 1. Synthesize
    //    credit_score and zip_risk_score leak the approval decision,
    //    job_tenure leaks it inversely, applicant_age is pure noise.
    // ------------------------------------------------------------------
    let mut rng = StdRng::seed_from_u64(42);
    let n_rows = 1000;
    let n_features = FEATURE_NAMES.len();

    let target: Vec<f64> = (0..n_rows).map(|_| if rng.gen_bool(0.5) { 1.0 } else { 0.0 }).collect();

    let mut columns: Vec<Vec<f64>> = vec![Vec::with_capacity(n_rows); n_features];
    for &y in &target {
        columns[0].push(5.0 + 2.0 * y + rng.gen_range(-1.5..1.5));
        columns[1].push(rng.gen_range(1.8..6.5));
        columns[2].push(0.8 * y + rng.gen_range(0.0..0.2));
        columns[3].push(10.0 - 6.0 * y + rng.gen_range(0.0..2.0));
    }

    let mut flat: Vec<f64> = columns.into_iter().flatten().collect();
    println!("Synthesized {n_rows} applications, {n_features} features.");

    // ------------------------------------------------------------------
    // 2. Audit
    // ------------------------------------------------------------------
    let detector = BiasDetector::default();
    let matrix = Matrix::new(&flat, n_rows, n_features);

    let stats = detector.feature_statistics(&matrix, &target, true)?;
    println!("\nChi-squared statistic per feature:");
    for (idx, name) in FEATURE_NAMES.iter().enumerate() {
        println!("  {:<16} {:>8.1}", name, stats[&idx]);
    }

    let report = detector.detect(&matrix, &target, true)?;
    println!("\nFlagged features (threshold {}):", detector.threshold);
    for entry in &report.entries {
        println!("  {:<16} {:?}", FEATURE_NAMES[entry.feature], entry.direction);
    }
    println!("\nReport as JSON:\n{}", report.json_dump()?);

    let gaps_before: Vec<f64> = (0..n_features).map(|j| group_gap(matrix.get_col(j), &target)).collect();

    // ------------------------------------------------------------------
    // 3. Correct
    // ------------------------------------------------------------------
    let corrector = BiasCorrector::default();
    let mut matrix = MatrixMut::new(&mut flat, n_rows, n_features);
    corrector.correct(&mut matrix, &target, &report, CorrectionMethod::Adversarial)?;
    println!("\nApplied adversarial correction to {} features.", report.len());

    // ------------------------------------------------------------------
    // 4. Compare group mean gaps
    // ------------------------------------------------------------------
    println!("\nApproved-vs-rejected mean gap:");
    println!("  {:<16} {:>10} {:>10}", "feature", "before", "after");
    for entry in &report.entries {
        let after = group_gap(matrix.get_col(entry.feature), &target);
        println!(
            "  {:<16} {:>10.4} {:>10.4}",
            FEATURE_NAMES[entry.feature], gaps_before[entry.feature], after
        );
    }

    // ------------------------------------------------------------------
    // 5. Re-audit
    //    The correction narrows the group gaps but does not erase the
    //    rank ordering, so strong leaks can stay flagged.
    // ------------------------------------------------------------------
    let corrected = matrix.view();
    let report_after = detector.detect(&corrected, &target, true)?;
    println!("\nStill flagged after correction:");
    if report_after.is_empty() {
        println!("  none");
    }
    for entry in &report_after.entries {
        println!("  {:<16} {:?}", FEATURE_NAMES[entry.feature], entry.direction);
    }

    Ok(())
}
