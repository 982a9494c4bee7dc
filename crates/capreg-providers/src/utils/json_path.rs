//! Segment-by-segment traversal of JSON trees

use capreg_domain::value_objects::Value;

/// Walk `segments` through nested objects (and arrays, by index)
///
/// Returns the first segment that could not be followed on failure.
pub fn walk<'v, 's>(root: &'v Value, segments: &'s [String]) -> Result<&'v Value, &'s str> {
    segments.iter().try_fold(root, |current, segment| {
        let next = match current {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment
                .parse::<usize>()
                .ok()
                .and_then(|index| items.get(index)),
            _ => None,
        };
        next.ok_or(segment.as_str())
    })
}
