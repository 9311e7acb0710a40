//! One-dimensional clustering shared by edge snapping and line grouping.

/// Group `values` into chained clusters.
///
/// Values are visited in ascending order; a value joins the current cluster
/// when it is within `tolerance` of the previous value, otherwise it starts a
/// new one. Returns clusters of indices into `values`, clusters ascending.
pub(crate) fn cluster_indices(values: &[f64], tolerance: f64) -> Vec<Vec<usize>> {
    let mut order: Vec<usize> = (0..values.len()).collect();
    order.sort_by(|&a, &b| values[a].total_cmp(&values[b]));

    let mut clusters: Vec<Vec<usize>> = Vec::new();
    let mut last: Option<f64> = None;
    for idx in order {
        let v = values[idx];
        match (last, clusters.last_mut()) {
            (Some(prev), Some(current)) if v <= prev + tolerance => current.push(idx),
            _ => clusters.push(vec![idx]),
        }
        last = Some(v);
    }
    clusters
}
