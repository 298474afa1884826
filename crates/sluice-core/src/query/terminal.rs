/// The reduction applied to a query's result set.
///
/// Determines the shape of the SELECT list and any implicit row limit.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalKind {
    /// Every matching row
    #[default]
    Sequence,

    /// Number of matching rows
    Count,

    /// Number of matching rows, as a 64-bit count
    LongCount,

    /// The first matching row; an error if there is none
    First,

    /// The first matching row, if any
    FirstOrDefault,

    /// The only matching row; an error if there is none or more than one
    Single,

    /// The only matching row, if any; an error if there is more than one
    SingleOrDefault,

    /// The last matching row; an error if there is none
    Last,

    /// The last matching row, if any
    LastOrDefault,

    /// Whether any row matches
    Any,
}

impl TerminalKind {
    pub fn is_sequence(self) -> bool {
        matches!(self, Self::Sequence)
    }

    pub fn is_count(self) -> bool {
        matches!(self, Self::Count | Self::LongCount)
    }

    /// Terminals reading from the end of the ordered sequence
    pub fn is_last(self) -> bool {
        matches!(self, Self::Last | Self::LastOrDefault)
    }

    /// Row limit implied by the terminal when the query sets none.
    ///
    /// `Single` reads two rows so the caller can tell "exactly one" from
    /// "more than one".
    pub fn implicit_take(self) -> Option<u64> {
        match self {
            Self::First | Self::FirstOrDefault | Self::Last | Self::LastOrDefault | Self::Any => {
                Some(1)
            }
            Self::Single | Self::SingleOrDefault => Some(2),
            Self::Sequence | Self::Count | Self::LongCount => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Sequence => "Sequence",
            Self::Count => "Count",
            Self::LongCount => "LongCount",
            Self::First => "First",
            Self::FirstOrDefault => "FirstOrDefault",
            Self::Single => "Single",
            Self::SingleOrDefault => "SingleOrDefault",
            Self::Last => "Last",
            Self::LastOrDefault => "LastOrDefault",
            Self::Any => "Any",
        }
    }
}
