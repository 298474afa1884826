use crate::schema::ColumnType;

use std::{fmt, ops::RangeInclusive};

/// The methods a query expression may call.
///
/// The first argument of every call is the receiver, so `name.Contains("x")`
/// is `Func::Contains` applied to `[name, "x"]`. `Now` and `UtcNow` take no
/// arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Func {
    // Text
    Contains,
    StartsWith,
    StartsWithIgnoreCase,
    EndsWith,
    EndsWithIgnoreCase,
    Replace,
    ToLower,
    ToUpper,
    Trim,
    TrimStart,
    TrimEnd,
    Substring,
    IndexOf,
    Length,
    IsNullOrEmpty,
    IsNullOrWhiteSpace,
    Concat,

    // Numbers
    Abs,
    Round,
    Floor,
    Ceiling,
    Max,
    Min,
    Pow,
    Sqrt,
    Log,
    Log10,

    /// Explicit conversion to another column type
    ConvertTo(ColumnType),

    // Dates
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Date,
    DayOfWeek,
    AddYears,
    AddMonths,
    AddDays,
    AddHours,
    AddMinutes,
    AddSeconds,
    Now,
    UtcNow,
}

impl Func {
    pub fn name(self) -> &'static str {
        use Func::*;

        match self {
            Contains => "Contains",
            StartsWith => "StartsWith",
            StartsWithIgnoreCase => "StartsWithIgnoreCase",
            EndsWith => "EndsWith",
            EndsWithIgnoreCase => "EndsWithIgnoreCase",
            Replace => "Replace",
            ToLower => "ToLower",
            ToUpper => "ToUpper",
            Trim => "Trim",
            TrimStart => "TrimStart",
            TrimEnd => "TrimEnd",
            Substring => "Substring",
            IndexOf => "IndexOf",
            Length => "Length",
            IsNullOrEmpty => "IsNullOrEmpty",
            IsNullOrWhiteSpace => "IsNullOrWhiteSpace",
            Concat => "Concat",
            Abs => "Abs",
            Round => "Round",
            Floor => "Floor",
            Ceiling => "Ceiling",
            Max => "Max",
            Min => "Min",
            Pow => "Pow",
            Sqrt => "Sqrt",
            Log => "Log",
            Log10 => "Log10",
            ConvertTo(_) => "ConvertTo",
            Year => "Year",
            Month => "Month",
            Day => "Day",
            Hour => "Hour",
            Minute => "Minute",
            Second => "Second",
            Date => "Date",
            DayOfWeek => "DayOfWeek",
            AddYears => "AddYears",
            AddMonths => "AddMonths",
            AddDays => "AddDays",
            AddHours => "AddHours",
            AddMinutes => "AddMinutes",
            AddSeconds => "AddSeconds",
            Now => "Now",
            UtcNow => "UtcNow",
        }
    }

    /// Number of arguments accepted, receiver included.
    pub fn arity(self) -> RangeInclusive<usize> {
        use Func::*;

        match self {
            Now | UtcNow => 0..=0,
            ToLower | ToUpper | Trim | TrimStart | TrimEnd | Length | IsNullOrEmpty
            | IsNullOrWhiteSpace | Abs | Floor | Ceiling | Sqrt | Log | Log10 | ConvertTo(_)
            | Year | Month | Day | Hour | Minute | Second | Date | DayOfWeek => 1..=1,
            Contains | StartsWith | StartsWithIgnoreCase | EndsWith | EndsWithIgnoreCase
            | IndexOf | Concat | Max | Min | Pow | AddYears | AddMonths | AddDays | AddHours
            | AddMinutes | AddSeconds => 2..=2,
            Round => 1..=2,
            Substring => 2..=3,
            Replace => 3..=3,
        }
    }

    /// Returns `true` if the call yields a boolean.
    pub fn is_predicate(self) -> bool {
        use Func::*;

        matches!(
            self,
            Contains
                | StartsWith
                | StartsWithIgnoreCase
                | EndsWith
                | EndsWithIgnoreCase
                | IsNullOrEmpty
                | IsNullOrWhiteSpace
        )
    }

    /// Returns `true` if a call with constant arguments can be evaluated on
    /// the client.
    pub fn is_foldable(self) -> bool {
        use Func::*;

        matches!(
            self,
            ToLower | ToUpper | Trim | TrimStart | TrimEnd | Length | Concat
        )
    }

    /// Result type of the call, given the type of the receiver.
    pub fn result_ty(self, receiver: Option<ColumnType>) -> Option<ColumnType> {
        use Func::*;

        match self {
            _ if self.is_predicate() => Some(ColumnType::Bool),
            Replace | ToLower | ToUpper | Trim | TrimStart | TrimEnd | Substring | Concat => {
                Some(ColumnType::Text)
            }
            IndexOf | Length | Year | Month | Day | Hour | Minute | Second | DayOfWeek => {
                Some(ColumnType::Int)
            }
            Sqrt | Log | Log10 | Pow => Some(ColumnType::Float),
            Abs | Round | Floor | Ceiling | Max | Min => receiver,
            ConvertTo(ty) => Some(ty),
            Date | AddYears | AddMonths | AddDays | AddHours | AddMinutes | AddSeconds | Now
            | UtcNow => Some(ColumnType::DateTime),
            _ => None,
        }
    }
}

impl fmt::Display for Func {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Func::ConvertTo(ty) => write!(f, "ConvertTo({ty})"),
            func => f.write_str(func.name()),
        }
    }
}
