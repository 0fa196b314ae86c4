//! Agglomerative hierarchical clustering for heatmap row/column ordering
//!
//! Average linkage over Euclidean distance. Only the dendrogram leaf order
//! is needed here; the clustered heatmap reorders its axes by it so that
//! similar pathways and genes end up adjacent.

/// Leaf order of an average-linkage dendrogram over the rows of `matrix`.
/// Returns a permutation of 0..n. Rows of length zero or a single row come
/// back in input order.
pub fn leaf_order(matrix: &[Vec<f64>]) -> Vec<usize> {
    let n = matrix.len();
    if n <= 1 {
        return (0..n).collect();
    }

    // Pairwise Euclidean distances between rows
    let mut distances = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let dist: f64 = matrix[i]
                .iter()
                .zip(&matrix[j])
                .map(|(a, b)| (a - b) * (a - b))
                .sum::<f64>()
                .sqrt();
            distances[i][j] = dist;
            distances[j][i] = dist;
        }
    }

    // Each cluster keeps its member leaves in merge order; merging two
    // clusters concatenates their leaf lists, so the surviving single
    // cluster yields the display order.
    let mut clusters: Vec<Vec<usize>> = (0..n).map(|i| vec![i]).collect();
    let mut active: Vec<bool> = vec![true; n];

    loop {
        let active_idx: Vec<usize> = (0..n).filter(|&i| active[i]).collect();
        if active_idx.len() <= 1 {
            break;
        }

        // Closest pair of active clusters by average linkage
        let mut min_dist = f64::INFINITY;
        let mut merge = (active_idx[0], active_idx[1]);
        for (a, &i) in active_idx.iter().enumerate() {
            for &j in &active_idx[a + 1..] {
                let mut total = 0.0;
                for &li in &clusters[i] {
                    for &lj in &clusters[j] {
                        total += distances[li][lj];
                    }
                }
                let avg = total / (clusters[i].len() * clusters[j].len()) as f64;
                if avg < min_dist {
                    min_dist = avg;
                    merge = (i, j);
                }
            }
        }

        let (i, j) = merge;
        let absorbed = std::mem::take(&mut clusters[j]);
        clusters[i].extend(absorbed);
        active[j] = false;
    }

    clusters
        .into_iter()
        .zip(active)
        .find(|(_, alive)| *alive)
        .map(|(leaves, _)| leaves)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leaf_order_is_permutation() {
        let matrix = vec![
            vec![0.0, 1.0],
            vec![5.0, 5.0],
            vec![0.1, 1.1],
            vec![4.9, 5.2],
        ];
        let mut order = leaf_order(&matrix);
        assert_eq!(order.len(), 4);
        order.sort_unstable();
        assert_eq!(order, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_similar_rows_end_up_adjacent() {
        let matrix = vec![
            vec![0.0, 0.0],
            vec![10.0, 10.0],
            vec![0.2, 0.1],
            vec![10.1, 9.9],
        ];
        let order = leaf_order(&matrix);
        let pos = |x: usize| order.iter().position(|&i| i == x).unwrap();
        // 0 and 2 are near-identical, as are 1 and 3
        assert_eq!(pos(0).abs_diff(pos(2)), 1);
        assert_eq!(pos(1).abs_diff(pos(3)), 1);
    }

    #[test]
    fn test_trivial_inputs() {
        assert!(leaf_order(&[]).is_empty());
        assert_eq!(leaf_order(&[vec![1.0, 2.0]]), vec![0]);
    }
}
