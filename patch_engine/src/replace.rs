//! Pattern search for patches without an offset

/// Start of every non-overlapping occurrence of `pattern`, scanning left to right.
///
/// After a match the scan resumes behind it, so `aaaa` contains `aa` twice, not three
/// times. An empty pattern never matches.
pub fn find_all(haystack: &[u8], pattern: &[u8]) -> Vec<usize> {
    let mut found = Vec::new();
    if pattern.is_empty() {
        return found;
    }

    let mut position = 0;
    while let Some(index) = find_first(&haystack[position..], pattern) {
        found.push(position + index);
        position += index + pattern.len();
    }
    found
}

/// Start of the first occurrence of `pattern`
pub fn find_first(haystack: &[u8], pattern: &[u8]) -> Option<usize> {
    if pattern.is_empty() {
        return None;
    }
    haystack
        .windows(pattern.len())
        .position(|window| window == pattern)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_all_non_overlapping() {
        assert_eq!(find_all(b"aaaa", b"aa"), vec![0, 2]);
        assert_eq!(find_all(b"aaa", b"aa"), vec![0]);
        assert_eq!(find_all(b"xabxxabab", b"ab"), vec![1, 5, 7]);
    }

    #[test]
    fn test_find_all_edges() {
        assert_eq!(find_all(b"abc", b""), Vec::<usize>::new());
        assert_eq!(find_all(b"ab", b"abc"), Vec::<usize>::new());
        assert_eq!(find_all(b"abc", b"abc"), vec![0]);
        assert_eq!(find_all(b"", b"a"), Vec::<usize>::new());
    }

    #[test]
    fn test_find_first() {
        assert_eq!(find_first(b"ec.cfg\0osc.cfg", b".cfg"), Some(2));
        assert_eq!(find_first(b"ec.cfg", b"osc"), None);
    }
}
