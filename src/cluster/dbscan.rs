use std::collections::VecDeque;

/// Density-based clustering of 2D points.
///
/// Neighborhoods are closed Euclidean balls of radius `eps` that include
/// the point itself; a point is a core point when its neighborhood holds at
/// least `min_samples` points. Returns one label per input point, `None`
/// for noise. Labels are numbered in order of first appearance.
pub fn dbscan(points: &[(f32, f32)], eps: f32, min_samples: usize) -> Vec<Option<usize>> {
    let n = points.len();
    let mut labels: Vec<Option<usize>> = vec![None; n];
    let mut visited = vec![false; n];
    let mut next_label = 0;

    let neighbors = |i: usize| -> Vec<usize> {
        let (xi, yi) = points[i];
        (0..n)
            .filter(|&j| {
                let (xj, yj) = points[j];
                ((xi - xj).powi(2) + (yi - yj).powi(2)).sqrt() <= eps
            })
            .collect()
    };

    for i in 0..n {
        if visited[i] {
            continue;
        }
        visited[i] = true;

        let seeds = neighbors(i);
        if seeds.len() < min_samples {
            continue;
        }

        let label = next_label;
        next_label += 1;
        labels[i] = Some(label);

        let mut queue: VecDeque<usize> = seeds.into();
        while let Some(j) = queue.pop_front() {
            if labels[j].is_none() {
                labels[j] = Some(label);
            }
            if visited[j] {
                continue;
            }
            visited[j] = true;

            let reach = neighbors(j);
            if reach.len() >= min_samples {
                queue.extend(reach.into_iter().filter(|&k| !visited[k] || labels[k].is_none()));
            }
        }
    }

    labels
}
