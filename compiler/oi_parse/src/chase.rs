use crate::ParserOptions;

/// Whether a pointer or reference at `depth` is followed into the graph.
///
/// Depth 1 is the type a parse was started on; the caller asked for it, so
/// it is always followed. Deeper pointers are followed only when
/// `chase_raw_pointers` is set and otherwise become `StubbedPointer`
/// primitives.
#[inline]
pub fn should_chase(depth: u32, options: &ParserOptions) -> bool {
    depth == 1 || options.chase_raw_pointers
}
