//! Text normalisation and edit distance for text rules.

/// Largest edit distance accepted by fuzzy matching.
pub const FUZZY_MAX_EDIT_DISTANCE: usize = 1;

/// Trim and collapse runs of whitespace into single spaces.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace-normalised, lower-cased form used by every text rule.
pub fn normalize_text(s: &str) -> String {
    normalize_whitespace(s).to_lowercase()
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix.
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Exact match, or at most [`FUZZY_MAX_EDIT_DISTANCE`] edits apart. Inputs are
/// expected to be normalised already.
pub fn fuzzy_equals(answer: &str, reference: &str) -> bool {
    if answer == reference {
        return true;
    }
    // Lengths differing by more than the limit can never be close enough.
    if answer.chars().count().abs_diff(reference.chars().count()) > FUZZY_MAX_EDIT_DISTANCE {
        return false;
    }
    levenshtein_distance(answer, reference) <= FUZZY_MAX_EDIT_DISTANCE
}
