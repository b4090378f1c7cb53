//! Lexical similarity between normalized texts.

/// Token-sort ratio in `[0, 1]`.
///
/// Tokens of each text are sorted and re-joined with single spaces, then the
/// Indel similarity `1 - indel_distance / (len_a + len_b)` is computed over
/// characters, where `indel_distance = len_a + len_b - 2 * lcs`. Word order
/// therefore does not matter: "trump wins 2028" and "2028 trump wins" score 1.
///
/// Two empty texts are identical and score 1.
#[must_use]
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    let a = sorted_chars(a);
    let b = sorted_chars(b);

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    let lcs = lcs_len(&a, &b);
    let distance = total - 2 * lcs;

    1.0 - distance as f64 / total as f64
}

fn sorted_chars(text: &str) -> Vec<char> {
    let mut tokens: Vec<&str> = text.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ").chars().collect()
}

/// Length of the longest common subsequence, two-row dynamic programming.
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_texts_score_one() {
        assert_eq!(token_sort_ratio("fed cut rates", "fed cut rates"), 1.0);
    }

    #[test]
    fn word_order_is_ignored() {
        assert_eq!(token_sort_ratio("trump wins 2028", "2028 trump wins"), 1.0);
    }

    #[test]
    fn both_empty_score_one() {
        assert_eq!(token_sort_ratio("", ""), 1.0);
    }

    #[test]
    fn one_empty_scores_zero() {
        assert_eq!(token_sort_ratio("bitcoin", ""), 0.0);
    }

    #[test]
    fn disjoint_alphabets_score_zero() {
        assert_eq!(token_sort_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn partial_overlap_matches_indel_formula() {
        // sorted: "abcd" vs "abce" -> lcs 3, total 8, distance 2
        assert!((token_sort_ratio("abcd", "abce") - 0.75).abs() < 1e-12);
    }

    #[test]
    fn is_symmetric() {
        let pairs = [
            ("bitcoin above 100k 2025", "btc 100k end 2025"),
            ("trump win election", "harris win election"),
            ("", "fed"),
        ];
        for (a, b) in pairs {
            assert_eq!(token_sort_ratio(a, b), token_sort_ratio(b, a));
        }
    }

    #[test]
    fn stays_in_unit_interval() {
        let score = token_sort_ratio("fed cut rates march", "ecb hike rates june");
        assert!((0.0..=1.0).contains(&score));
    }
}
