//! Compact alias generation for reference names.

const LETTERS: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Iterator over `a..z`, `A..Z`, `aa`, `ab`, ... `ZZ`, `aaa`, ...
///
/// Yields one alias per `u64` index, then ends.
#[derive(Debug, Clone)]
pub struct ShortNames {
    next: Option<u64>,
}

impl Default for ShortNames {
    fn default() -> Self {
        Self { next: Some(0) }
    }
}

impl ShortNames {
    pub fn new() -> Self {
        Self::default()
    }

    /// The alias at position `index`.
    pub fn nth_name(index: u64) -> String {
        // Bijective base-52: every length is exhausted before the next starts.
        let mut k = u128::from(index) + 1;
        let mut out = Vec::new();
        while k > 0 {
            k -= 1;
            out.push(LETTERS[(k % 52) as usize]);
            k /= 52;
        }
        out.reverse();
        out.into_iter().map(char::from).collect()
    }
}

impl Iterator for ShortNames {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let index = self.next?;
        self.next = index.checked_add(1);
        Some(Self::nth_name(index))
    }
}
