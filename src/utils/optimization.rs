//! Derivative-free parameter search for smoothing models.

/// Minimize `objective` over a box-bounded domain with the Nelder-Mead
/// simplex method, returning the best point found.
///
/// `bounds` must supply one `(min, max)` pair per dimension of `initial`;
/// candidate points are clamped into the box after every simplex move.
///
/// # Example
/// ```
/// use cubecast::utils::nelder_mead;
///
/// let best = nelder_mead(
///     |x| (x[0] - 2.0).powi(2) + (x[1] - 3.0).powi(2),
///     &[0.5, 0.5],
///     &[(0.0, 10.0), (0.0, 10.0)],
///     500,
///     1e-8,
/// );
/// assert!((best[0] - 2.0).abs() < 1e-3);
/// assert!((best[1] - 3.0).abs() < 1e-3);
/// ```
pub fn nelder_mead<F>(
    objective: F,
    initial: &[f64],
    bounds: &[(f64, f64)],
    max_iter: usize,
    tolerance: f64,
) -> Vec<f64>
where
    F: Fn(&[f64]) -> f64,
{
    let n = initial.len();
    if n == 0 {
        return Vec::new();
    }

    // Standard coefficients: reflection, expansion, contraction, shrink.
    let (alpha, gamma, rho, sigma) = (1.0, 2.0, 0.5, 0.5);

    let clamp = |point: &mut [f64]| {
        for (x, &(lo, hi)) in point.iter_mut().zip(bounds) {
            *x = x.clamp(lo, hi);
        }
    };

    // Initial simplex: the start point plus one perturbed vertex per axis.
    let mut simplex: Vec<Vec<f64>> = Vec::with_capacity(n + 1);
    simplex.push(initial.to_vec());
    for i in 0..n {
        let mut vertex = initial.to_vec();
        let step = if vertex[i].abs() > 1e-10 {
            0.05 * vertex[i].abs()
        } else {
            0.05
        };
        vertex[i] += step;
        clamp(&mut vertex);
        simplex.push(vertex);
    }
    let mut scores: Vec<f64> = simplex.iter().map(|v| objective(v)).collect();

    for _ in 0..max_iter {
        // Order vertices best-first.
        let mut order: Vec<usize> = (0..=n).collect();
        order.sort_by(|&a, &b| {
            scores[a]
                .partial_cmp(&scores[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        let best = order[0];
        let worst = order[n];
        let second_worst = order[n - 1];

        if scores[worst] - scores[best] < tolerance {
            break;
        }

        // Centroid of all vertices except the worst.
        let mut centroid = vec![0.0; n];
        for (i, vertex) in simplex.iter().enumerate() {
            if i == worst {
                continue;
            }
            for (c, &x) in centroid.iter_mut().zip(vertex) {
                *c += x;
            }
        }
        for c in &mut centroid {
            *c /= n as f64;
        }

        let move_from_centroid = |coeff: f64, target: &[f64]| -> Vec<f64> {
            let mut point: Vec<f64> = centroid
                .iter()
                .zip(target)
                .map(|(c, t)| c + coeff * (t - c))
                .collect();
            clamp(&mut point);
            point
        };

        let reflected = move_from_centroid(-alpha, &simplex[worst]);
        let reflected_score = objective(&reflected);

        if reflected_score < scores[best] {
            // Expand further along the reflected direction.
            let expanded = move_from_centroid(gamma, &reflected);
            let expanded_score = objective(&expanded);
            if expanded_score < reflected_score {
                simplex[worst] = expanded;
                scores[worst] = expanded_score;
            } else {
                simplex[worst] = reflected;
                scores[worst] = reflected_score;
            }
        } else if reflected_score < scores[second_worst] {
            simplex[worst] = reflected;
            scores[worst] = reflected_score;
        } else {
            // Contract towards the better of worst/reflected.
            let target = if reflected_score < scores[worst] {
                reflected.clone()
            } else {
                simplex[worst].clone()
            };
            let contracted = move_from_centroid(rho, &target);
            let contracted_score = objective(&contracted);
            if contracted_score < scores[worst].min(reflected_score) {
                simplex[worst] = contracted;
                scores[worst] = contracted_score;
            } else {
                // Shrink every vertex towards the best.
                let anchor = simplex[best].clone();
                for i in 0..=n {
                    if i == best {
                        continue;
                    }
                    for (x, &a) in simplex[i].iter_mut().zip(&anchor) {
                        *x = a + sigma * (*x - a);
                    }
                    clamp(&mut simplex[i]);
                    scores[i] = objective(&simplex[i]);
                }
            }
        }
    }

    let best = scores
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
        .map(|(i, _)| i)
        .unwrap_or(0);
    simplex.swap_remove(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn converges_on_quadratic() {
        let best = nelder_mead(
            |x| (x[0] - 2.0).powi(2) + (x[1] - 3.0).powi(2),
            &[0.0, 0.0],
            &[(-10.0, 10.0), (-10.0, 10.0)],
            1000,
            1e-10,
        );
        assert_relative_eq!(best[0], 2.0, epsilon = 1e-3);
        assert_relative_eq!(best[1], 3.0, epsilon = 1e-3);
    }

    #[test]
    fn respects_bounds() {
        // Unconstrained optimum at 5, box ends at 3.
        let best = nelder_mead(|x| (x[0] - 5.0).powi(2), &[1.0], &[(0.0, 3.0)], 1000, 1e-10);
        assert_relative_eq!(best[0], 3.0, epsilon = 1e-3);
    }

    #[test]
    fn finds_smoothing_weight_inside_unit_interval() {
        let data = [10.0, 12.0, 11.0, 13.0, 14.0, 13.0, 15.0, 16.0];
        let sse = |params: &[f64]| {
            let alpha = params[0];
            let mut level = data[0];
            let mut total = 0.0;
            for &y in &data[1..] {
                let err = y - level;
                total += err * err;
                level = alpha * y + (1.0 - alpha) * level;
            }
            total
        };
        let best = nelder_mead(sse, &[0.5], &[(0.01, 0.99)], 1000, 1e-10);
        assert!(best[0] > 0.01 && best[0] < 0.99);
    }

    #[test]
    fn empty_input_returns_empty() {
        let best = nelder_mead(|_| 0.0, &[], &[], 100, 1e-8);
        assert!(best.is_empty());
    }
}
