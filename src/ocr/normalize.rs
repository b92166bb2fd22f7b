use unicode_normalization::UnicodeNormalization;

use crate::config::NormalizeConfig;
use crate::core::geometry::{BoundingQuad, Vertex};
use crate::core::model::Fragment;
use crate::ocr::response::RawAnnotation;

/// Converts a raw annotation into a [`Fragment`].
///
/// Missing coordinates and missing vertices read as `0`, extra vertices past
/// the fourth are ignored. A polygon with no `y` values therefore gets font
/// size `0`. Nothing here fails.
pub fn normalize(raw: &RawAnnotation, config: &NormalizeConfig) -> Fragment {
    let mut vertices = [Vertex::default(); 4];
    for (slot, raw_vertex) in vertices.iter_mut().zip(&raw.bounding_poly.vertices) {
        *slot = Vertex::new(raw_vertex.x.unwrap_or(0.0), raw_vertex.y.unwrap_or(0.0));
    }

    let description = raw.description.as_deref().unwrap_or_default();
    let text = if config.trim {
        description.trim()
    } else {
        description
    };
    let text: String = if config.nfc {
        text.nfc().collect()
    } else {
        text.to_string()
    };

    Fragment::new(text, BoundingQuad::new(vertices))
}

pub fn normalize_all(raw: &[RawAnnotation], config: &NormalizeConfig) -> Vec<Fragment> {
    raw.iter().map(|annotation| normalize(annotation, config)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ocr::response::{RawPolygon, RawVertex};
    use pretty_assertions::assert_eq;

    #[test]
    fn missing_coordinates_default_to_zero() {
        let raw = RawAnnotation {
            description: Some("字".to_string()),
            bounding_poly: RawPolygon {
                vertices: vec![
                    RawVertex { x: None, y: Some(5.0) },
                    RawVertex { x: Some(20.0), y: None },
                    RawVertex::new(20.0, 30.0),
                    RawVertex { x: None, y: Some(30.0) },
                ],
            },
        };

        let fragment = normalize(&raw, &NormalizeConfig::default());
        assert_eq!(
            fragment.bbox.vertices,
            [
                Vertex::new(0.0, 5.0),
                Vertex::new(20.0, 0.0),
                Vertex::new(20.0, 30.0),
                Vertex::new(0.0, 30.0),
            ]
        );
        assert_eq!(fragment.font_size, 30);
    }

    #[test]
    fn polygon_without_y_has_zero_font_size() {
        let raw = RawAnnotation::new(
            "x",
            vec![
                RawVertex { x: Some(1.0), y: None },
                RawVertex { x: Some(9.0), y: None },
            ],
        );
        let fragment = normalize(&raw, &NormalizeConfig::default());
        assert_eq!(fragment.font_size, 0);
    }

    #[test]
    fn empty_annotation_degrades_to_zero_fragment() {
        let fragment = normalize(&RawAnnotation::default(), &NormalizeConfig::default());
        assert_eq!(fragment.text, "");
        assert_eq!(fragment.bbox, BoundingQuad::default());
        assert_eq!(fragment.font_size, 0);
    }

    #[test]
    fn nfc_composes_voiced_kana() {
        let raw = RawAnnotation::new("か\u{3099}", vec![]);
        let config = NormalizeConfig {
            nfc: true,
            ..NormalizeConfig::default()
        };
        assert_eq!(normalize(&raw, &config).text, "が");
        assert_eq!(normalize(&raw, &NormalizeConfig::default()).char_len(), 2);
    }
}
