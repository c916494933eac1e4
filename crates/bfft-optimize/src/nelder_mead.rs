//! A generic derivative-free Nelder-Mead simplex minimiser.

use std::cmp::Ordering;

/// Reflection/expansion/contraction/shrink coefficients and stopping
/// criteria.
#[derive(Clone, Copy, Debug)]
pub struct NelderMeadConfig {
    /// Reflection coefficient.
    pub alpha: f64,
    /// Expansion coefficient.
    pub gamma: f64,
    /// Contraction coefficient.
    pub rho: f64,
    /// Shrink coefficient.
    pub omega: f64,
    /// Stop once `|f(best) - f(worst)| < f_threshold`.
    pub f_threshold: f64,
    /// Stop once the largest pairwise vertex distance falls below this.
    pub dist_threshold: f64,
    /// Hard cap on the number of iterations.
    pub max_iterations: usize,
    /// Hard cap on the number of consecutive shrink operations.
    pub max_shrinks: usize,
}

impl Default for NelderMeadConfig {
    fn default() -> Self {
        Self {
            alpha: 1.0,
            gamma: 2.0,
            rho: 0.5,
            omega: 0.5,
            f_threshold: 1e-4,
            dist_threshold: 0.01,
            max_iterations: 100,
            max_shrinks: 10,
        }
    }
}

#[derive(Clone, Debug)]
struct Vertex {
    args: Vec<f64>,
    value: f64,
}

fn cmp_vertices(a: &Vertex, b: &Vertex) -> Ordering {
    a.value.total_cmp(&b.value).then_with(|| {
        for (x, y) in a.args.iter().zip(&b.args) {
            let c = x.total_cmp(y);
            if c != Ordering::Equal {
                return c;
            }
        }
        Ordering::Equal
    })
}

fn add_scaled(base: &[f64], dir: &[f64], scale: f64) -> Vec<f64> {
    base.iter().zip(dir).map(|(b, d)| b + scale * d).collect()
}

fn sub(a: &[f64], b: &[f64]) -> Vec<f64> {
    a.iter().zip(b).map(|(x, y)| x - y).collect()
}

fn centroid(vertices: &[Vertex], skip: usize) -> Vec<f64> {
    let k = vertices[0].args.len();
    let mut sum = vec![0.0; k];
    let mut count = 0usize;
    for (i, v) in vertices.iter().enumerate() {
        if i == skip {
            continue;
        }
        for (s, a) in sum.iter_mut().zip(&v.args) {
            *s += a;
        }
        count += 1;
    }
    for s in &mut sum {
        *s /= count as f64;
    }
    sum
}

fn max_pairwise_distance(vertices: &[Vertex]) -> f64 {
    let mut max_dist = 0.0_f64;
    for i in 0..vertices.len() {
        for j in (i + 1)..vertices.len() {
            let d: f64 = vertices[i]
                .args
                .iter()
                .zip(&vertices[j].args)
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f64>()
                .sqrt();
            if d > max_dist {
                max_dist = d;
            }
        }
    }
    max_dist
}

/// Build the `k + 1` starting points `{p, p + s*e_0, p + s*e_1, ...}` for a
/// `k`-dimensional seed `p`.
#[must_use]
pub fn get_starting_points(seed: &[f64], step: f64) -> Vec<Vec<f64>> {
    let mut points = Vec::with_capacity(seed.len() + 1);
    points.push(seed.to_vec());
    for i in 0..seed.len() {
        let mut p = seed.to_vec();
        p[i] += step;
        points.push(p);
    }
    points
}

/// Minimise `objective` starting from `starting_points` (exactly `k + 1` of
/// them, for a `k`-dimensional objective). Returns the best point found and
/// its value.
#[must_use]
pub fn find_min<F>(objective: F, starting_points: Vec<Vec<f64>>, config: &NelderMeadConfig) -> (Vec<f64>, f64)
where
    F: Fn(&[f64]) -> f64,
{
    debug_assert!(starting_points.len() >= 2, "Nelder-Mead needs at least two vertices");
    let mut vertices: Vec<Vertex> = starting_points
        .into_iter()
        .map(|args| {
            let value = objective(&args);
            Vertex { args, value }
        })
        .collect();
    vertices.sort_by(cmp_vertices);

    let mut shrinks = 0usize;
    for _ in 0..config.max_iterations {
        let best = &vertices[0];
        let worst = &vertices[vertices.len() - 1];
        if (best.value - worst.value).abs() < config.f_threshold
            || max_pairwise_distance(&vertices) < config.dist_threshold
            || shrinks >= config.max_shrinks
        {
            break;
        }

        let last = vertices.len() - 1;
        let second_worst_value = vertices[last - 1].value;
        let best_value = vertices[0].value;
        let worst_value = vertices[last].value;

        let c = centroid(&vertices, last);
        let reflected_args = add_scaled(&c, &sub(&c, &vertices[last].args), config.alpha);
        let reflected_value = objective(&reflected_args);

        let mut replaced = false;
        if best_value <= reflected_value && reflected_value < second_worst_value {
            vertices[last] = Vertex { args: reflected_args, value: reflected_value };
            replaced = true;
        } else if reflected_value < best_value {
            let expanded_args = add_scaled(&c, &sub(&reflected_args, &c), config.gamma);
            let expanded_value = objective(&expanded_args);
            vertices[last] = if expanded_value < reflected_value {
                Vertex { args: expanded_args, value: expanded_value }
            } else {
                Vertex { args: reflected_args, value: reflected_value }
            };
            replaced = true;
        } else if reflected_value < worst_value {
            let outside_args = add_scaled(&c, &sub(&reflected_args, &c), config.rho);
            let outside_value = objective(&outside_args);
            if outside_value < reflected_value {
                vertices[last] = Vertex { args: outside_args, value: outside_value };
                replaced = true;
            }
        } else {
            let inside_args = add_scaled(&c, &sub(&vertices[last].args, &c), config.rho);
            let inside_value = objective(&inside_args);
            if inside_value < worst_value {
                vertices[last] = Vertex { args: inside_args, value: inside_value };
                replaced = true;
            }
        }

        if replaced {
            shrinks = 0;
        } else {
            let best_args = vertices[0].args.clone();
            for v in vertices.iter_mut().skip(1) {
                v.args = add_scaled(&best_args, &sub(&v.args, &best_args), config.omega);
                v.value = objective(&v.args);
            }
            shrinks += 1;
        }

        vertices.sort_by(cmp_vertices);
    }

    let best = &vertices[0];
    (best.args.clone(), best.value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimises_a_quadratic_bowl() {
        let objective = |args: &[f64]| (args[0] - 1.0).powi(2) + (args[1] + 2.0).powi(2);
        let starting = get_starting_points(&[0.0, 0.0], 0.5);
        let (point, value) = find_min(objective, starting, &NelderMeadConfig::default());
        assert!((point[0] - 1.0).abs() < 0.05, "{point:?}");
        assert!((point[1] + 2.0).abs() < 0.05, "{point:?}");
        assert!(value < 1e-3);
    }

    #[test]
    fn starting_points_perturb_one_axis_each() {
        let points = get_starting_points(&[1.0, 2.0, 3.0], 0.1);
        assert_eq!(points.len(), 4);
        assert_eq!(points[0], vec![1.0, 2.0, 3.0]);
        assert_eq!(points[1], vec![1.1, 2.0, 3.0]);
        assert_eq!(points[3], vec![1.0, 2.0, 3.1]);
    }

    #[test]
    fn terminates_within_max_iterations_on_a_flat_objective() {
        let objective = |_: &[f64]| 0.0;
        let starting = get_starting_points(&[0.0, 0.0], 1.0);
        let config = NelderMeadConfig { max_iterations: 5, ..NelderMeadConfig::default() };
        let (_, value) = find_min(objective, starting, &config);
        assert_eq!(value, 0.0);
    }
}
