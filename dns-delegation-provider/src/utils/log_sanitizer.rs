//! Log sanitization utilities
//!
//! Keeps account IDs and full policy documents out of debug/error logs.

/// Maximum number of bytes of a policy document included in log output.
const TRUNCATE_LIMIT: usize = 256;

/// Length of an AWS account ID.
const ACCOUNT_ID_LEN: usize = 12;

fn floor_char_boundary(s: &str, index: usize) -> usize {
    if index >= s.len() {
        s.len()
    } else {
        let mut i = index;
        while i > 0 && !s.is_char_boundary(i) {
            i -= 1;
        }
        i
    }
}

/// Mask every run of exactly twelve ASCII digits, keeping the first and last four.
///
/// `arn:aws:iam::123456789012:root` becomes `arn:aws:iam::1234****9012:root`.
pub fn mask_account_ids(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut digits = String::new();

    let flush = |digits: &mut String, out: &mut String| {
        if digits.len() == ACCOUNT_ID_LEN {
            out.push_str(&digits[..4]);
            out.push_str("****");
            out.push_str(&digits[ACCOUNT_ID_LEN - 4..]);
        } else {
            out.push_str(digits);
        }
        digits.clear();
    };

    for c in s.chars() {
        if c.is_ascii_digit() {
            digits.push(c);
        } else {
            flush(&mut digits, &mut out);
            out.push(c);
        }
    }
    flush(&mut digits, &mut out);
    out
}

/// Mask account IDs and truncate for safe logging.
pub fn sanitize_for_log(s: &str) -> String {
    let masked = mask_account_ids(s);
    if masked.len() <= TRUNCATE_LIMIT {
        masked
    } else {
        format!(
            "{}... [truncated, total {} bytes]",
            &masked[..floor_char_boundary(&masked, TRUNCATE_LIMIT)],
            masked.len()
        )
    }
}
