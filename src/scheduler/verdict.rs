/// What the controller wants done after inspecting one result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict<I> {
    /// Keep going, appending these inputs to the tail of the queue.
    Continue(Vec<I>),
    /// Stop dispatching immediately; outstanding work is drained and
    /// discarded.
    Halt,
}

impl<I> Verdict<I> {
    /// Continue without adding work.
    pub fn done() -> Self {
        Verdict::Continue(Vec::new())
    }

    pub fn expand<It: IntoIterator<Item = I>>(inputs: It) -> Self {
        Verdict::Continue(inputs.into_iter().collect())
    }

    pub fn is_halt(&self) -> bool {
        matches!(self, Verdict::Halt)
    }
}

impl<I> Default for Verdict<I> {
    fn default() -> Self {
        Self::done()
    }
}

/// `(inputs, keep_going)`; inputs are dropped when `keep_going` is false.
impl<I> From<(Vec<I>, bool)> for Verdict<I> {
    fn from((inputs, keep_going): (Vec<I>, bool)) -> Self {
        if keep_going {
            Verdict::Continue(inputs)
        } else {
            Verdict::Halt
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_pair() {
        assert_eq!(Verdict::from((vec![1, 2], true)), Verdict::Continue(vec![1, 2]));
        assert!(Verdict::from((vec![1, 2], false)).is_halt());
    }

    #[test]
    fn test_helpers() {
        assert_eq!(Verdict::<u8>::done(), Verdict::Continue(vec![]));
        assert_eq!(Verdict::<u8>::default(), Verdict::done());
        assert_eq!(Verdict::expand(1..=3), Verdict::Continue(vec![1, 2, 3]));
        assert!(!Verdict::expand(Some(4)).is_halt());
    }
}
