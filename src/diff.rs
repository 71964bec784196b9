//! Character-level change magnitude
//!
//! The magnitude of a change between two texts is the number of characters
//! inserted plus the number removed in a shortest edit script between them.
//! A shortest edit script keeps a longest common subsequence, so this equals
//! `len(a) + len(b) - 2 * lcs(a, b)`. Moving a block of text counts as a
//! removal plus an insertion.
//!
//! The edit distance is found with Myers' greedy O((N+M)D) search, which is
//! cheap for the small edits produced while typing. The bounded variant stops
//! as soon as the distance is known to exceed a limit.

/// Sum of inserted and removed character spans between `a` and `b`
pub fn change_magnitude(a: &str, b: &str) -> usize {
    let (a, b) = trimmed_chars(a, b);
    let limit = a.len() + b.len();
    shortest_edit(&a, &b, limit).unwrap_or(limit)
}

/// Whether `change_magnitude(a, b) > threshold`
///
/// Gives the same answer as comparing the full magnitude, but gives up
/// once the search passes `threshold` edits.
pub fn exceeds_threshold(a: &str, b: &str, threshold: usize) -> bool {
    let (a, b) = trimmed_chars(a, b);
    if a.len().abs_diff(b.len()) > threshold {
        return true;
    }
    shortest_edit(&a, &b, threshold).is_none()
}

/// Collect chars with the common prefix and suffix removed
fn trimmed_chars(a: &str, b: &str) -> (Vec<char>, Vec<char>) {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let prefix = a.iter().zip(&b).take_while(|(x, y)| x == y).count();
    let suffix = a[prefix..]
        .iter()
        .rev()
        .zip(b[prefix..].iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    (
        a[prefix..a.len() - suffix].to_vec(),
        b[prefix..b.len() - suffix].to_vec(),
    )
}

/// Length of the shortest edit script, or `None` if it is longer than `limit`
fn shortest_edit(a: &[char], b: &[char], limit: usize) -> Option<usize> {
    let n = a.len() as isize;
    let m = b.len() as isize;
    let max = (a.len() + b.len()).min(limit);
    let offset = max as isize + 1;

    // v[k + offset] = furthest x reached on diagonal k
    let mut v = vec![0isize; 2 * max + 3];

    for d in 0..=max as isize {
        let mut k = -d;
        while k <= d {
            let idx = (k + offset) as usize;
            let mut x = if k == -d || (k != d && v[idx - 1] < v[idx + 1]) {
                v[idx + 1]
            } else {
                v[idx - 1] + 1
            };
            let mut y = x - k;

            while x < n && y < m && a[x as usize] == b[y as usize] {
                x += 1;
                y += 1;
            }
            v[idx] = x;

            if x >= n && y >= m {
                return Some(d as usize);
            }
            k += 2;
        }
    }

    None
}

#[cfg(test)]
#[path = "diff_tests.rs"]
mod diff_tests;
