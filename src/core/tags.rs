/// Elements of `a` that also appear in `b`, in `a`'s order, without repeats
pub fn overlap(a: &[String], b: &[String]) -> Vec<String> {
    let mut common: Vec<String> = Vec::new();
    for item in a {
        if b.contains(item) && !common.contains(item) {
            common.push(item.clone());
        }
    }
    common
}

/// Share of common elements as a rounded percentage (0-100)
///
/// The denominator is `max(|a|, |b|, 1)`, not the size of the union, so a
/// short list fully contained in a longer one does not reach 100.
pub fn coverage(a: &[String], b: &[String]) -> u8 {
    let common = overlap(a, b).len();
    let denominator = distinct_len(a).max(distinct_len(b)).max(1);

    // round half up
    let percent = (common * 100 + denominator / 2) / denominator;
    percent.min(100) as u8
}

/// True when every element of `filter` appears in `values`
///
/// An empty filter imposes no constraint.
#[inline]
pub fn is_superset(filter: &[String], values: &[String]) -> bool {
    filter.iter().all(|item| values.contains(item))
}

fn distinct_len(items: &[String]) -> usize {
    items
        .iter()
        .enumerate()
        .filter(|(i, item)| !items[..*i].contains(item))
        .count()
}
