use serde::Serialize;
use std::collections::HashMap;
use std::hash::Hash;

/// Returns the most frequent value, or `None` for empty input.
///
/// Ties go to the value that was seen first.
pub fn mode<T, I>(values: I) -> Option<T>
where
    T: Eq + Hash,
    I: IntoIterator<Item = T>,
{
    let mut counts: HashMap<T, (usize, usize)> = HashMap::new();

    for (i, v) in values.into_iter().enumerate() {
        counts.entry(v).or_insert((0, i)).0 += 1;
    }

    counts
        .into_iter()
        .max_by(|(_, (ca, fa)), (_, (cb, fb))| ca.cmp(cb).then(fb.cmp(fa)))
        .map(|(v, _)| v)
}

/// Number of occurrences of one distinct value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValueCount {
    pub value: String,
    pub count: usize,
}

/// Counts distinct values, most frequent first. Equal counts keep the order in
/// which the values were first seen.
pub fn value_counts<'a, I>(values: I) -> Vec<ValueCount>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut counts: Vec<ValueCount> = Vec::new();

    for v in values {
        match index.get(v) {
            Some(&i) => counts[i].count += 1,
            None => {
                index.insert(v, counts.len());
                counts.push(ValueCount {
                    value: v.to_string(),
                    count: 1,
                });
            }
        }
    }

    // Stable sort keeps first-seen order among ties.
    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

/// Computes the arithmetic mean of a slice of values. Returns `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_empty() {
        assert_eq!(mode(Vec::<u32>::new()), None);
    }

    #[test]
    fn test_mode_dominant_value() {
        assert_eq!(mode(vec![3, 7, 7, 1, 7, 3]), Some(7));
        assert_eq!(mode(vec!["Monday"; 4]), Some("Monday"));
    }

    #[test]
    fn test_mode_tie_goes_to_first_seen() {
        assert_eq!(mode(vec![9, 2, 2, 9]), Some(9));
        assert_eq!(mode(vec!["b", "a", "a", "b", "c"]), Some("b"));
    }

    #[test]
    fn test_value_counts_order() {
        let counts = value_counts([
            "Customer",
            "Subscriber",
            "Subscriber",
            "Dependent",
            "Customer",
            "Subscriber",
        ]);

        let pairs: Vec<_> = counts.iter().map(|c| (c.value.as_str(), c.count)).collect();
        assert_eq!(
            pairs,
            vec![("Subscriber", 3), ("Customer", 2), ("Dependent", 1)]
        );
    }

    #[test]
    fn test_value_counts_ties_stay_in_first_seen_order() {
        let counts = value_counts(["Male", "Female", "Female", "Male"]);

        assert_eq!(counts[0].value, "Male");
        assert_eq!(counts[1].value, "Female");
    }

    #[test]
    fn test_mean() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, 2.0, 6.0]), Some(3.0));
    }
}
