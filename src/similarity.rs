//! Fast string similarity calculation
//!
//! Indel-based ratio used to compare spoken client names with registry names.

/// Calculate the similarity ratio between two strings (0.0-1.0)
///
/// `2 * LCS / (len_a + len_b)` over characters, i.e. one minus the normalized
/// insertion/deletion distance. Two empty strings are identical.
pub fn similarity_ratio(s1: &str, s2: &str) -> f64 {
    if s1.is_empty() && s2.is_empty() {
        return 1.0;
    }
    if s1.is_empty() || s2.is_empty() {
        return 0.0;
    }

    let lcs_len = longest_common_subsequence(s1, s2);
    let total_len = s1.chars().count() + s2.chars().count();

    (2.0 * lcs_len as f64) / total_len as f64
}

/// Case-insensitive variant of [`similarity_ratio`]
pub fn normalized_similarity(s1: &str, s2: &str) -> f64 {
    similarity_ratio(&s1.to_lowercase(), &s2.to_lowercase())
}

/// Calculate length of longest common subsequence (LCS)
fn longest_common_subsequence(s1: &str, s2: &str) -> usize {
    let s1_chars: Vec<char> = s1.chars().collect();
    let s2_chars: Vec<char> = s2.chars().collect();

    let n = s2_chars.len();

    // Two rolling rows instead of the full table
    let mut prev = vec![0; n + 1];
    let mut curr = vec![0; n + 1];

    for &c1 in &s1_chars {
        for j in 1..=n {
            if c1 == s2_chars[j - 1] {
                curr[j] = prev[j - 1] + 1;
            } else {
                curr[j] = prev[j].max(curr[j - 1]);
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}
