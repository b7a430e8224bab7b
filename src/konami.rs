/// Matches a fixed key sequence against a stream of key presses.
///
/// A wrong key does not always reset progress to zero: the matcher falls back
/// to the longest prefix of the sequence that is still a suffix of what was
/// typed, so `Up Up Up Down ...` still completes.
#[derive(Clone, Debug)]
pub struct SequenceMatcher {
    sequence: Vec<String>,
    fallback: Vec<usize>,
    matched: usize,
}

impl SequenceMatcher {
    pub fn new<S: AsRef<str>>(sequence: &[S]) -> Self {
        let sequence: Vec<String> = sequence.iter().map(|s| s.as_ref().to_owned()).collect();
        let fallback = failure_table(&sequence);
        Self {
            sequence,
            fallback,
            matched: 0,
        }
    }

    /// Feeds one key. Returns true when it completes the sequence; progress
    /// then starts over.
    pub fn push(&mut self, key: &str) -> bool {
        if self.sequence.is_empty() {
            return false;
        }
        while self.matched > 0 && !key_eq(&self.sequence[self.matched], key) {
            self.matched = self.fallback[self.matched - 1];
        }
        if key_eq(&self.sequence[self.matched], key) {
            self.matched += 1;
        }
        if self.matched == self.sequence.len() {
            self.matched = 0;
            return true;
        }
        false
    }

    pub fn progress(&self) -> usize {
        self.matched
    }

    pub fn reset(&mut self) {
        self.matched = 0;
    }
}

#[inline]
fn key_eq(expected: &str, key: &str) -> bool {
    expected.eq_ignore_ascii_case(key)
}

fn failure_table(sequence: &[String]) -> Vec<usize> {
    let mut table = vec![0; sequence.len()];
    let mut k = 0;
    for i in 1..sequence.len() {
        while k > 0 && !key_eq(&sequence[i], &sequence[k]) {
            k = table[k - 1];
        }
        if key_eq(&sequence[i], &sequence[k]) {
            k += 1;
        }
        table[i] = k;
    }
    table
}
