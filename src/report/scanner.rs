/// Stateless view over the lines of a report.
///
/// Lines are split on `\n` and kept untrimmed; every query is a single
/// forward pass.
#[derive(Debug, Clone)]
pub struct ReportScanner<'a> {
    text: &'a str,
    lines: Vec<&'a str>,
}

impl<'a> ReportScanner<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            lines: text.split('\n').collect(),
        }
    }

    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Whole-text substring search.
    pub fn contains(&self, marker: &str) -> bool {
        self.text.contains(marker)
    }

    /// First line satisfying `predicate`.
    pub fn find_line<P>(&self, predicate: P) -> Option<&'a str>
    where
        P: Fn(&str) -> bool,
    {
        self.lines().iter().copied().find(|line| predicate(line))
    }

    /// Every line satisfying `predicate`, in source order.
    pub fn lines_matching<'s, P>(&'s self, predicate: P) -> impl Iterator<Item = &'a str> + 's
    where
        P: Fn(&str) -> bool + 's,
    {
        self.lines
            .iter()
            .copied()
            .filter(move |line| predicate(line))
    }
}
