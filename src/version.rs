// src/version.rs

//! RPM version comparison
//!
//! Implements the rpmvercmp ordering over (epoch, version, release)
//! triples as used by RPM-based distributions:
//!
//! 1. Compare epochs numerically; a higher epoch wins regardless of
//!    version and release.
//! 2. Compare version strings segment-wise: alternating runs of digits
//!    and letters, with non-alphanumeric characters acting as
//!    separators. Numeric runs compare by value (leading zeros
//!    ignored), alphabetic runs compare lexically, and a numeric run
//!    beats an alphabetic run. A tilde sorts lower than everything,
//!    including end-of-string, so "1.0~rc1" < "1.0".
//! 3. If versions are equal, repeat on the release strings.

use std::cmp::Ordering;

/// An (epoch, version, release) triple ready for RPM-rule comparison
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evr {
    pub epoch: i64,
    pub version: String,
    pub release: String,
}

impl Evr {
    /// Build a triple; a missing epoch defaults to 0
    pub fn new(epoch: Option<i64>, version: impl Into<String>, release: impl Into<String>) -> Self {
        Self {
            epoch: epoch.unwrap_or(0),
            version: version.into(),
            release: release.into(),
        }
    }
}

impl PartialOrd for Evr {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Evr {
    fn cmp(&self, other: &Self) -> Ordering {
        match self.epoch.cmp(&other.epoch) {
            Ordering::Equal => {}
            ord => return ord,
        }

        match rpmvercmp(&self.version, &other.version) {
            Ordering::Equal => {}
            ord => return ord,
        }

        rpmvercmp(&self.release, &other.release)
    }
}

/// Compare two version (or release) strings using the rpmvercmp
/// segment algorithm
pub fn rpmvercmp(a: &str, b: &str) -> Ordering {
    let mut a_chars = a.chars().peekable();
    let mut b_chars = b.chars().peekable();

    loop {
        // Separator characters (anything non-alphanumeric except tilde)
        // are skipped on both sides
        while a_chars
            .peek()
            .is_some_and(|c| !c.is_alphanumeric() && *c != '~')
        {
            a_chars.next();
        }
        while b_chars
            .peek()
            .is_some_and(|c| !c.is_alphanumeric() && *c != '~')
        {
            b_chars.next();
        }

        // Tilde sorts before everything, even end-of-string
        let a_tilde = a_chars.peek() == Some(&'~');
        let b_tilde = b_chars.peek() == Some(&'~');
        if a_tilde && b_tilde {
            a_chars.next();
            b_chars.next();
            continue;
        }
        if a_tilde {
            return Ordering::Less;
        }
        if b_tilde {
            return Ordering::Greater;
        }

        // A string that runs out first is the older one
        match (a_chars.peek().is_none(), b_chars.peek().is_none()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }

        let a_digit = a_chars.peek().is_some_and(|c| c.is_ascii_digit());
        let b_digit = b_chars.peek().is_some_and(|c| c.is_ascii_digit());

        // A numeric segment always beats an alphabetic one
        if a_digit && !b_digit {
            return Ordering::Greater;
        }
        if !a_digit && b_digit {
            return Ordering::Less;
        }

        let a_seg = take_segment(&mut a_chars, a_digit);
        let b_seg = take_segment(&mut b_chars, b_digit);

        let ord = if a_digit {
            compare_numeric(&a_seg, &b_seg)
        } else {
            a_seg.cmp(&b_seg)
        };

        match ord {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
}

/// Consume one maximal run of digits (or of letters, when `digits` is
/// false) from the iterator
fn take_segment(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, digits: bool) -> String {
    let mut seg = String::new();
    while let Some(&c) = chars.peek() {
        let matches = if digits {
            c.is_ascii_digit()
        } else {
            c.is_alphanumeric() && !c.is_ascii_digit()
        };
        if !matches {
            break;
        }
        seg.push(c);
        chars.next();
    }
    seg
}

/// Compare two digit runs by numeric value, ignoring leading zeros.
/// Length comparison after zero-stripping avoids overflow on runs
/// longer than any fixed-width integer.
fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    match a.len().cmp(&b.len()) {
        Ordering::Equal => a.cmp(b),
        ord => ord,
    }
}
