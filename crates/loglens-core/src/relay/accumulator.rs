//! Reply accumulation buffer.

/// Collects streamed fragments into the full assistant reply.
#[derive(Debug, Default)]
pub struct ReplyAccumulator {
    buffer: String,
    fragments: usize,
}

impl ReplyAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, fragment: &str) {
        self.buffer.push_str(fragment);
        self.fragments += 1;
    }

    /// Number of fragments pushed so far.
    pub fn fragments(&self) -> usize {
        self.fragments
    }

    /// Consume the buffer, yielding the concatenated reply.
    pub fn finish(self) -> String {
        self.buffer
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accumulates_in_order() {
        let mut acc = ReplyAccumulator::new();
        for fragment in ["It ", "looks ", "like ", "an error."] {
            acc.push(fragment);
        }
        assert_eq!(acc.fragments(), 4);
        assert_eq!(acc.finish(), "It looks like an error.");
    }

    #[test]
    fn test_new_accumulator_finishes_empty() {
        let acc = ReplyAccumulator::new();
        assert_eq!(acc.fragments(), 0);
        assert_eq!(acc.finish(), "");
    }
}
