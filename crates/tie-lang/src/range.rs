use miette::SourceSpan;
use nom_locate::LocatedSpan;

pub type Span<'a> = LocatedSpan<&'a str>;

/// Byte offsets of a token in the source text, `end` exclusive.
#[derive(PartialEq, Eq, PartialOrd, Ord, Debug, Clone, Copy, Default, Hash)]
pub struct Range {
    pub start: usize,
    pub end: usize,
}

impl Range {
    pub fn new(start: usize, end: usize) -> Self {
        Range { start, end }
    }

    /// An empty range at `offset`, used for the end of input.
    pub fn empty(offset: usize) -> Self {
        Range::new(offset, offset)
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'a> From<Span<'a>> for Range {
    fn from(span: Span<'a>) -> Self {
        let start = span.location_offset();
        Range {
            start,
            end: start + span.fragment().len(),
        }
    }
}

impl From<Range> for SourceSpan {
    fn from(range: Range) -> Self {
        SourceSpan::new(range.start.into(), range.len())
    }
}
