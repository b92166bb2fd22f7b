pub mod normalize;
pub mod response;
pub mod sort;

pub use normalize::{normalize, normalize_all};
pub use response::{parse_response, RawAnnotation, RawPolygon, RawVertex};
pub use sort::{sort_reading_order, strip_full_image};

use crate::config::NormalizeConfig;
use crate::core::model::Fragment;

/// Normalizes, sorts into reading order and, when configured, drops the
/// whole-image annotation. The result is the seed pool for merging.
pub fn prepare_fragments(raw: &[RawAnnotation], config: &NormalizeConfig) -> Vec<Fragment> {
    let mut fragments = normalize_all(raw, config);
    sort_reading_order(&mut fragments);
    if config.drop_first {
        strip_full_image(fragments)
    } else {
        fragments
    }
}
