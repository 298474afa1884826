use std::fmt;

#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Logical negation (`not p`)
    Not,

    /// Arithmetic negation (`-x`)
    Neg,

    /// Bitwise complement (`~x`)
    BitNot,
}

impl UnaryOp {
    pub fn name(self) -> &'static str {
        match self {
            UnaryOp::Not => "Not",
            UnaryOp::Neg => "Negate",
            UnaryOp::BitNot => "BitwiseNot",
        }
    }
}

impl fmt::Display for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnaryOp::Not => "not".fmt(f),
            UnaryOp::Neg => "-".fmt(f),
            UnaryOp::BitNot => "~".fmt(f),
        }
    }
}

impl fmt::Debug for UnaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}
