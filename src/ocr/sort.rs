use crate::core::model::Fragment;

/// Sorts into reading order by the first vertex: top-to-bottom, then
/// left-to-right. The sort is stable, so exact ties keep input order.
pub fn sort_reading_order(fragments: &mut [Fragment]) {
    fragments.sort_by(|a, b| {
        let a = a.bbox.top_left();
        let b = b.bbox.top_left();
        a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x))
    });
}

/// Drops the whole-image annotation text detectors put first.
pub fn strip_full_image(mut fragments: Vec<Fragment>) -> Vec<Fragment> {
    if !fragments.is_empty() {
        fragments.remove(0);
    }
    fragments
}
