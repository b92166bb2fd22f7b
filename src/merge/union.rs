use crate::core::model::Fragment;

/// Joins `target` onto the end of `basis`.
///
/// Text is concatenated basis-first, the quad is the axis-aligned extent of
/// all eight vertices, and the font size is the truncated mean.
pub fn union(basis: &Fragment, target: &Fragment) -> Fragment {
    let mut text = String::with_capacity(basis.text.len() + target.text.len());
    text.push_str(&basis.text);
    text.push_str(&target.text);

    let font_size = ((u64::from(basis.font_size) + u64::from(target.font_size)) / 2) as u32;
    Fragment::with_font_size(text, basis.bbox.union(&target.bbox), font_size)
}
