use std::fmt;

use serde::Serialize;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;
use time::{OffsetDateTime, UtcOffset};

/// Literal first token of every instruction message.
pub const HEADER: &str = "InstructionMessage";

/// Number of space-separated tokens in a message, header included.
pub const TOKEN_COUNT: usize = 6;

/// `yyyy-MM-ddTHH:mm:ss.sssZ`, millisecond precision, literal `T` and `Z`.
pub const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z");

/// Priority class of an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InstructionType {
    A,
    B,
    C,
    D,
}

impl InstructionType {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "A" => Some(InstructionType::A),
            "B" => Some(InstructionType::B),
            "C" => Some(InstructionType::C),
            "D" => Some(InstructionType::D),
            _ => None,
        }
    }

    #[inline]
    pub const fn code(self) -> &'static str {
        match self {
            InstructionType::A => "A",
            InstructionType::B => "B",
            InstructionType::C => "C",
            InstructionType::D => "D",
        }
    }

    /// Dequeue precedence; higher drains first. C and D share a rank.
    #[inline]
    pub const fn priority(self) -> u8 {
        match self {
            InstructionType::A => 3,
            InstructionType::B => 2,
            InstructionType::C | InstructionType::D => 1,
        }
    }
}

impl fmt::Display for InstructionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A single decoded instruction message.
///
/// Fields hold exactly what the wire carried; nothing here guarantees the
/// business rules hold. See [`crate::validator::Validator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Instruction {
    #[serde(rename = "type")]
    type_code: String,
    product_code: String,
    quantity: i32,
    uom: i32,
    #[serde(with = "time::serde::rfc3339")]
    timestamp: OffsetDateTime,
}

impl Instruction {
    /// Builds an instruction. The timestamp is normalised to UTC.
    pub fn new(
        type_code: impl Into<String>,
        product_code: impl Into<String>,
        quantity: i32,
        uom: i32,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            type_code: type_code.into(),
            product_code: product_code.into(),
            quantity,
            uom,
            timestamp: timestamp.to_offset(UtcOffset::UTC),
        }
    }

    pub fn type_code(&self) -> &str {
        &self.type_code
    }

    /// `None` when the type code is outside {A, B, C, D}.
    pub fn instruction_type(&self) -> Option<InstructionType> {
        InstructionType::from_code(&self.type_code)
    }

    pub fn product_code(&self) -> &str {
        &self.product_code
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn uom(&self) -> i32 {
        self.uom
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }
}

/// Renders the wire line for this instruction.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let timestamp = self
            .timestamp
            .format(TIMESTAMP_FORMAT)
            .map_err(|_| fmt::Error)?;
        write!(
            f,
            "{HEADER} {} {} {} {} {timestamp}",
            self.type_code, self.product_code, self.quantity, self.uom
        )
    }
}
