use std::cmp::Ordering;

/// Compare two strings in "natural" order.
///
/// Runs of ASCII digits that line up in both strings are compared as numbers: leading zeros
/// are skipped, a shorter run sorts first, and equal-length runs compare digit by digit.
/// Everything else compares by ASCII-lowercased byte value. Strings that differ only in
/// leading zeros or letter case compare [`Ordering::Equal`].
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let a = a.as_bytes();
    let b = b.as_bytes();
    let (mut i, mut j) = (0usize, 0usize);

    while i < a.len() && j < b.len() {
        if a[i].is_ascii_digit() && b[j].is_ascii_digit() {
            while i < a.len() && a[i] == b'0' {
                i += 1;
            }
            while j < b.len() && b[j] == b'0' {
                j += 1;
            }
            let run_a = digit_run(&a[i..]);
            let run_b = digit_run(&b[j..]);

            let ord = run_a
                .len()
                .cmp(&run_b.len())
                .then_with(|| run_a.cmp(run_b));
            if ord != Ordering::Equal {
                return ord;
            }
            i += run_a.len();
            j += run_b.len();
            continue;
        }

        let ord = a[i].to_ascii_lowercase().cmp(&b[j].to_ascii_lowercase());
        if ord != Ordering::Equal {
            return ord;
        }
        i += 1;
        j += 1;
    }

    (a.len() - i).cmp(&(b.len() - j))
}

fn digit_run(s: &[u8]) -> &[u8] {
    let end = s.iter().position(|c| !c.is_ascii_digit()).unwrap_or(s.len());
    &s[..end]
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/natural.rs"]
mod tests;
