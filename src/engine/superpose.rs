//! Rigid-body least-squares superposition.
//!
//! [`kabsch`] computes the rotation and translation that minimise the RMSD
//! between two paired point sets. [`fit`] wraps it with iterative outlier
//! rejection.

use nalgebra::{Matrix3, Vector3};
use tracing::debug;

use super::config::AlignConfig;
use super::error::ProcessingCause;

/// Fewest pairs that determine a rigid-body fit.
pub const MIN_FIT_PAIRS: usize = 3;

const SVD_EPSILON: f64 = 1e-12;
const SVD_MAX_ITERATIONS: usize = 1000;
const RMSD_FLOOR: f64 = 1e-9;

/// Transform mapping mobile coordinates onto the target frame:
/// `x' = rotation * x + translation`.
#[derive(Debug, Clone, PartialEq)]
pub struct Superposition {
    pub rotation: Matrix3<f64>,
    pub translation: Vector3<f64>,
    /// RMSD over the pairs kept in the final cycle.
    pub rmsd: f64,
    pub pairs_used: usize,
    pub pairs_rejected: usize,
}

/// Optimal proper rotation and translation taking `mobile` onto `target`.
///
/// Returns `None` when fewer than [`MIN_FIT_PAIRS`] points are given or the
/// SVD does not converge.
pub fn kabsch(
    mobile: &[Vector3<f64>],
    target: &[Vector3<f64>],
) -> Option<(Matrix3<f64>, Vector3<f64>)> {
    debug_assert_eq!(mobile.len(), target.len());
    if mobile.len() < MIN_FIT_PAIRS || mobile.len() != target.len() {
        return None;
    }

    let mobile_center = centroid(mobile);
    let target_center = centroid(target);

    let mut covariance = Matrix3::zeros();
    for (m, t) in mobile.iter().zip(target) {
        covariance += (m - mobile_center) * (t - target_center).transpose();
    }

    let svd = covariance.try_svd(true, true, SVD_EPSILON, SVD_MAX_ITERATIONS)?;
    let u = svd.u?;
    let v = svd.v_t?.transpose();

    // Flip the axis of the smallest singular value if the best orthogonal
    // matrix is a reflection.
    let d = (v * u.transpose()).determinant().signum();
    let correction = Matrix3::from_diagonal(&Vector3::new(1.0, 1.0, d));
    let rotation = v * correction * u.transpose();
    let translation = target_center - rotation * mobile_center;

    Some((rotation, translation))
}

/// Superposes `mobile` onto `target`, refining with outlier rejection.
///
/// Each cycle drops pairs whose post-fit deviation exceeds
/// `config.cutoff × RMSD` and refits on the remainder. Refinement stops when
/// nothing is dropped, the RMSD vanishes, or fewer than [`MIN_FIT_PAIRS`]
/// pairs would remain.
pub fn fit(
    mobile: &[Vector3<f64>],
    target: &[Vector3<f64>],
    config: &AlignConfig,
) -> Result<Superposition, ProcessingCause> {
    if mobile.len() < MIN_FIT_PAIRS {
        return Err(ProcessingCause::TooFewPairs {
            found: mobile.len(),
        });
    }

    let mut active: Vec<usize> = (0..mobile.len()).collect();
    let (mut rotation, mut translation) =
        kabsch(mobile, target).ok_or(ProcessingCause::DegenerateFit)?;

    for cycle in 0..config.cycles {
        let deviations: Vec<f64> = active
            .iter()
            .map(|&i| (rotation * mobile[i] + translation - target[i]).norm())
            .collect();
        let current = root_mean_square(&deviations);
        if current < RMSD_FLOOR {
            break;
        }

        let limit = config.cutoff * current;
        let kept: Vec<usize> = active
            .iter()
            .zip(&deviations)
            .filter(|&(_, &dev)| dev <= limit)
            .map(|(&i, _)| i)
            .collect();

        if kept.len() == active.len() || kept.len() < MIN_FIT_PAIRS {
            break;
        }

        debug!(
            cycle = cycle + 1,
            rmsd = current,
            rejected = active.len() - kept.len(),
            "rejecting outliers"
        );

        active = kept;
        let m: Vec<_> = active.iter().map(|&i| mobile[i]).collect();
        let t: Vec<_> = active.iter().map(|&i| target[i]).collect();
        (rotation, translation) = kabsch(&m, &t).ok_or(ProcessingCause::DegenerateFit)?;
    }

    let deviations: Vec<f64> = active
        .iter()
        .map(|&i| (rotation * mobile[i] + translation - target[i]).norm())
        .collect();

    Ok(Superposition {
        rotation,
        translation,
        rmsd: root_mean_square(&deviations),
        pairs_used: active.len(),
        pairs_rejected: mobile.len() - active.len(),
    })
}

/// RMSD between paired points in their current frames, without fitting.
pub fn rmsd_in_place<'a, I>(pairs: I) -> f64
where
    I: IntoIterator<Item = (&'a Vector3<f64>, &'a Vector3<f64>)>,
{
    let (sum, n) = pairs
        .into_iter()
        .fold((0.0, 0usize), |(sum, n), (a, b)| {
            (sum + (a - b).norm_squared(), n + 1)
        });
    if n == 0 {
        return 0.0;
    }
    (sum / n as f64).sqrt()
}

fn centroid(points: &[Vector3<f64>]) -> Vector3<f64> {
    points.iter().sum::<Vector3<f64>>() / points.len() as f64
}

fn root_mean_square(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    (values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64).sqrt()
}
