use crate::model::deviation::DeviationResult;
use crate::model::site::AntigenSite;

/// Decimal places kept in reported values.
pub const DECIMALS: usize = 3;

/// Rounds to [`DECIMALS`] places.
///
/// Rounding is decided on the exact binary value, so `0.1125` (stored just
/// above the tie) becomes `0.113`. Exact ties go to the even neighbour.
pub fn round_value(value: f64) -> f64 {
    format!("{value:.DECIMALS$}").parse().unwrap_or(value)
}

/// Keeps a raw deviation only when it strictly exceeds `threshold`.
///
/// The comparison uses the unrounded value; rounding applies to what is
/// stored. NaN never passes.
pub fn collect(
    file: &str,
    site: AntigenSite,
    raw_value: f64,
    threshold: f64,
) -> Option<DeviationResult> {
    (raw_value > threshold).then(|| DeviationResult {
        source_file: file.to_string(),
        site,
        value: round_value(raw_value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_values_strictly_above_threshold() {
        assert!(collect("a.pdb", AntigenSite::Sa, 0.1, 0.1).is_none());
        assert!(collect("a.pdb", AntigenSite::Sa, 0.05, 0.1).is_none());

        let kept = collect("a.pdb", AntigenSite::Sb, 0.25, 0.1).expect("above threshold");
        assert_eq!(
            kept,
            DeviationResult {
                source_file: "a.pdb".into(),
                site: AntigenSite::Sb,
                value: 0.25,
            }
        );
    }

    #[test]
    fn nan_is_never_kept() {
        assert!(collect("a.pdb", AntigenSite::Cb, f64::NAN, 0.1).is_none());
    }

    #[test]
    fn threshold_applies_before_rounding() {
        let kept = collect("a.pdb", AntigenSite::Ca1, 0.1004, 0.1).expect("raw value is above");
        assert_eq!(kept.value, 0.1);
    }

    #[test]
    fn rounds_to_three_places() {
        assert_eq!(round_value(0.12345), 0.123);
        assert_eq!(round_value(1.23456), 1.235);
        assert_eq!(round_value(2.0), 2.0);
    }

    #[test]
    fn rounds_the_stored_binary_value() {
        assert_eq!(round_value(0.1125), 0.113);
        assert_eq!(round_value(0.0025), 0.003);
        assert_eq!(round_value(1.0005), 1.0);
    }

    #[test]
    fn exact_ties_round_to_even() {
        assert_eq!(round_value(0.0625), 0.062);
        assert_eq!(round_value(0.1875), 0.188);
    }

    #[test]
    fn every_kept_value_exceeds_threshold() {
        let thresholds = [0.0, 0.1, 0.5, 1.0, 2.5];
        let raws = [0.0, 0.05, 0.1, 0.1000001, 0.49, 0.5, 0.75, 1.0, 2.5, 3.9];
        for &t in &thresholds {
            for &raw in &raws {
                if let Some(result) = collect("x.pdb", AntigenSite::Sa, raw, t) {
                    assert!(raw > t, "raw {raw} kept at threshold {t}");
                    assert!((result.value - raw).abs() <= 5e-4);
                } else {
                    assert!(raw <= t);
                }
            }
        }
    }
}
