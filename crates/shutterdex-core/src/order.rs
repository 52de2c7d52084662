//! Numeric-aware, case-insensitive ordering for scan results.

use std::cmp::Ordering;
use std::path::Path;

/// Compare two strings case-insensitively, treating runs of ASCII digits
/// as numbers, so `img2` sorts before `img10`.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut ai = a.chars().peekable();
    let mut bi = b.chars().peekable();

    loop {
        match (ai.peek().copied(), bi.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) => {
                if ca.is_ascii_digit() && cb.is_ascii_digit() {
                    let na = take_digits(&mut ai);
                    let nb = take_digits(&mut bi);
                    let ord = cmp_digit_runs(&na, &nb);
                    if ord != Ordering::Equal {
                        return ord;
                    }
                } else {
                    let ord = ca
                        .to_ascii_lowercase()
                        .cmp(&cb.to_ascii_lowercase())
                        .then_with(|| ca.cmp(&cb));
                    if ord != Ordering::Equal {
                        return ord;
                    }
                    ai.next();
                    bi.next();
                }
            }
        }
    }
}

/// Compare two paths with [`natural_cmp`] over their string forms.
pub fn natural_path_cmp(a: &Path, b: &Path) -> Ordering {
    natural_cmp(&a.to_string_lossy(), &b.to_string_lossy())
}

/// Consume a run of ASCII digits from the iterator.
fn take_digits(iter: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(c) = iter.peek().copied() {
        if c.is_ascii_digit() {
            run.push(c);
            iter.next();
        } else {
            break;
        }
    }
    run
}

/// Compare two digit runs numerically without parsing: strip leading
/// zeros, compare by length then lexically, with the shorter raw run
/// winning ties (so `01` sorts before `001` deterministically).
fn cmp_digit_runs(a: &str, b: &str) -> Ordering {
    let sa = a.trim_start_matches('0');
    let sb = b.trim_start_matches('0');
    sa.len()
        .cmp(&sb.len())
        .then_with(|| sa.cmp(sb))
        .then_with(|| a.len().cmp(&b.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_numeric_runs() {
        assert_eq!(natural_cmp("img2.jpg", "img10.jpg"), Ordering::Less);
        assert_eq!(natural_cmp("img10.jpg", "img2.jpg"), Ordering::Greater);
        assert_eq!(natural_cmp("img2.jpg", "img2.jpg"), Ordering::Equal);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(natural_cmp("Beach.png", "aurora.png"), Ordering::Greater);
        assert_eq!(natural_cmp("ALBUM", "album"), Ordering::Less);
    }

    #[test]
    fn test_leading_zeros() {
        assert_eq!(natural_cmp("img007.jpg", "img8.jpg"), Ordering::Less);
        assert_eq!(natural_cmp("img01.jpg", "img001.jpg"), Ordering::Less);
    }

    #[test]
    fn test_mixed_segments() {
        assert_eq!(natural_cmp("a1b2", "a1b10"), Ordering::Less);
        assert_eq!(natural_cmp("a12", "a1b"), Ordering::Greater);
    }

    #[test]
    fn test_path_cmp() {
        assert_eq!(
            natural_path_cmp(Path::new("/lib/album/img2.jpg"), Path::new("/lib/album/img10.jpg")),
            Ordering::Less
        );
    }

    #[test]
    fn test_sort_stability_example() {
        let mut names = vec!["img10.jpg", "img2.jpg", "img1.jpg", "cover.png"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(names, vec!["cover.png", "img1.jpg", "img2.jpg", "img10.jpg"]);
    }
}
