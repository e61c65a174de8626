use fbl_level1::Level1Error;
use serde::{Deserialize, Serialize};

pub const SINGLE_ABS_TOLERANCE: f64 = 1e-4;
pub const DOUBLE_ABS_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Precision {
    Single,
    Double,
}

impl Precision {
    #[must_use]
    pub fn abs_tolerance(self) -> f64 {
        match self {
            Self::Single => SINGLE_ABS_TOLERANCE,
            Self::Double => DOUBLE_ABS_TOLERANCE,
        }
    }

    fn decimal_places(self) -> usize {
        match self {
            Self::Single => 4,
            Self::Double => 6,
        }
    }
}

/// Per-case tally record carried from the child process back to the runner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaseOutcome {
    pub case: String,
    pub passed: usize,
    pub failed: usize,
}

/// Accumulates check results for a single case and prints one trace line
/// per check. Cases mutate the recorder handed to them instead of any
/// process-wide counters, so the runner owns all aggregation.
#[derive(Debug)]
pub struct CaseRecorder {
    case: &'static str,
    passed: usize,
    failed: usize,
}

impl CaseRecorder {
    #[must_use]
    pub fn new(case: &'static str) -> Self {
        Self {
            case,
            passed: 0,
            failed: 0,
        }
    }

    #[must_use]
    pub fn case(&self) -> &'static str {
        self.case
    }

    #[must_use]
    pub fn passed(&self) -> usize {
        self.passed
    }

    #[must_use]
    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn check_f32(&mut self, name: &str, expected: f32, observed: f32) {
        self.record(name, f64::from(expected), f64::from(observed), Precision::Single);
    }

    pub fn check_f64(&mut self, name: &str, expected: f64, observed: f64) {
        self.record(name, expected, observed, Precision::Double);
    }

    /// Folds a provider rejection into a single failed check instead of
    /// aborting the case.
    pub fn check_f32_result(
        &mut self,
        name: &str,
        expected: f32,
        observed: Result<f32, Level1Error>,
    ) {
        match observed {
            Ok(value) => self.check_f32(name, expected, value),
            Err(err) => self.fail_contract(name, &err),
        }
    }

    pub fn check_f64_result(
        &mut self,
        name: &str,
        expected: f64,
        observed: Result<f64, Level1Error>,
    ) {
        match observed {
            Ok(value) => self.check_f64(name, expected, value),
            Err(err) => self.fail_contract(name, &err),
        }
    }

    pub fn fail_contract(&mut self, name: &str, err: &Level1Error) {
        println!("[FAIL] {name}: provider rejected call: {err}");
        self.failed += 1;
    }

    #[must_use]
    pub fn into_outcome(self) -> CaseOutcome {
        CaseOutcome {
            case: self.case.to_string(),
            passed: self.passed,
            failed: self.failed,
        }
    }

    fn record(&mut self, name: &str, expected: f64, observed: f64, precision: Precision) {
        // NaN/Infinity on either side fails unconditionally; tolerance
        // arithmetic on non-finite values is meaningless.
        let within = expected.is_finite()
            && observed.is_finite()
            && (expected - observed).abs() < precision.abs_tolerance();
        if within {
            println!("[PASS] {name}");
            self.passed += 1;
        } else {
            let prec = precision.decimal_places();
            println!("[FAIL] {name}: expected {expected:.prec$} observed {observed:.prec$}");
            self.failed += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CaseRecorder, DOUBLE_ABS_TOLERANCE, Precision, SINGLE_ABS_TOLERANCE};
    use fbl_level1::Level1Error;

    #[test]
    fn tolerances_are_looser_for_single_precision() {
        assert_eq!(Precision::Single.abs_tolerance(), SINGLE_ABS_TOLERANCE);
        assert_eq!(Precision::Double.abs_tolerance(), DOUBLE_ABS_TOLERANCE);
        assert!(SINGLE_ABS_TOLERANCE > DOUBLE_ABS_TOLERANCE);
    }

    #[test]
    fn pass_increments_only_the_pass_tally() {
        let mut rec = CaseRecorder::new("unit");
        rec.check_f64("exact", 5.0, 5.0);
        rec.check_f64("inside_tolerance", 5.0, 5.0 + 1e-10);
        assert_eq!(rec.passed(), 2);
        assert_eq!(rec.failed(), 0);
    }

    #[test]
    fn mismatch_increments_only_the_fail_tally() {
        let mut rec = CaseRecorder::new("unit");
        rec.check_f64("outside_tolerance", 5.0, 5.0 + 1e-8);
        assert_eq!(rec.passed(), 0);
        assert_eq!(rec.failed(), 1);
    }

    #[test]
    fn single_precision_absorbs_rounding_noise() {
        let mut rec = CaseRecorder::new("unit");
        rec.check_f32("rounded", 0.6, 0.600_05);
        rec.check_f32("too_far", 0.6, 0.601);
        assert_eq!(rec.passed(), 1);
        assert_eq!(rec.failed(), 1);
    }

    #[test]
    fn non_finite_values_always_fail() {
        let mut rec = CaseRecorder::new("unit");
        rec.check_f64("nan_observed", 1.0, f64::NAN);
        rec.check_f64("nan_expected", f64::NAN, 1.0);
        rec.check_f64("nan_both", f64::NAN, f64::NAN);
        rec.check_f64("inf_observed", 1.0, f64::INFINITY);
        assert_eq!(rec.passed(), 0);
        assert_eq!(rec.failed(), 4);
    }

    #[test]
    fn provider_rejection_counts_as_one_failed_check() {
        let mut rec = CaseRecorder::new("unit");
        rec.check_f64_result(
            "rejected",
            1.0,
            Err(Level1Error::StrideContractViolation("x stride must be non-zero")),
        );
        rec.check_f32_result("accepted", 2.0, Ok(2.0));
        assert_eq!(rec.passed(), 1);
        assert_eq!(rec.failed(), 1);
    }

    #[test]
    fn outcome_carries_the_final_tallies() {
        let mut rec = CaseRecorder::new("unit");
        rec.check_f64("ok", 1.0, 1.0);
        rec.check_f64("bad", 1.0, 2.0);
        let outcome = rec.into_outcome();
        assert_eq!(outcome.case, "unit");
        assert_eq!(outcome.passed, 1);
        assert_eq!(outcome.failed, 1);
    }

    #[test]
    fn outcome_round_trips_through_json() {
        let outcome = super::CaseOutcome {
            case: "sdot".to_string(),
            passed: 2,
            failed: 0,
        };
        let payload = serde_json::to_string(&outcome).expect("serialize outcome");
        let decoded: super::CaseOutcome =
            serde_json::from_str(&payload).expect("deserialize outcome");
        assert_eq!(decoded, outcome);
    }
}
