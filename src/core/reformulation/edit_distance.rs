//! Levenshtein edit distance.

/// Minimum number of single-character insertions, deletions or substitutions
/// needed to turn `a` into `b`.
///
/// Works on Unicode scalar values, so `"é"` and `"e"` are one edit apart.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    // Full (len(a)+1) x (len(b)+1) table, row 0 and column 0 hold their index
    let width = b_chars.len() + 1;
    let mut table = vec![0usize; (a_chars.len() + 1) * width];
    for i in 0..=a_chars.len() {
        table[i * width] = i;
    }
    for j in 0..=b_chars.len() {
        table[j] = j;
    }

    for i in 1..=a_chars.len() {
        for j in 1..=b_chars.len() {
            let cost = if a_chars[i - 1] == b_chars[j - 1] { 0 } else { 1 };
            table[i * width + j] = (table[(i - 1) * width + j] + 1) // deletion
                .min(table[i * width + j - 1] + 1) // insertion
                .min(table[(i - 1) * width + j - 1] + cost); // substitution
        }
    }

    table[a_chars.len() * width + b_chars.len()]
}
