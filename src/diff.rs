//! Character-level diff between an expected line and a typed answer.

/// How a segment relates the expected text to the answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffTag {
    /// Present in both.
    Unchanged,
    /// Present only in the answer.
    Added,
    /// Present only in the expected text.
    Removed,
}

/// A run of consecutive characters sharing one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffSegment {
    pub text: String,
    pub tag: DiffTag,
}

/// Align `expected` and `actual` character by character.
///
/// Keeping `Unchanged` + `Removed` segments in order reconstructs
/// `expected`; keeping `Unchanged` + `Added` reconstructs `actual`. Inside
/// a substitution cluster removed text comes before added text.
pub fn char_diff(expected: &str, actual: &str) -> Vec<DiffSegment> {
    let a: Vec<char> = expected.chars().collect();
    let b: Vec<char> = actual.chars().collect();
    let (m, n) = (a.len(), b.len());

    let mut lcs = vec![vec![0usize; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            lcs[i][j] = if a[i - 1] == b[j - 1] {
                lcs[i - 1][j - 1] + 1
            } else {
                lcs[i - 1][j].max(lcs[i][j - 1])
            };
        }
    }

    // Backtrack from the full alignment, then reverse. Ties take the answer
    // side so that, after the reversal, removals precede additions.
    let mut ops: Vec<(char, DiffTag)> = Vec::with_capacity(m + n);
    let (mut i, mut j) = (m, n);
    while i > 0 || j > 0 {
        if i > 0 && j > 0 && a[i - 1] == b[j - 1] {
            ops.push((a[i - 1], DiffTag::Unchanged));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || lcs[i][j - 1] >= lcs[i - 1][j]) {
            ops.push((b[j - 1], DiffTag::Added));
            j -= 1;
        } else {
            ops.push((a[i - 1], DiffTag::Removed));
            i -= 1;
        }
    }
    ops.reverse();

    let mut segments: Vec<DiffSegment> = Vec::new();
    for (ch, tag) in ops {
        match segments.last_mut() {
            Some(seg) if seg.tag == tag => seg.text.push(ch),
            _ => segments.push(DiffSegment {
                text: ch.into(),
                tag,
            }),
        }
    }
    segments
}
