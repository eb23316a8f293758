use std::fmt;

use time::OffsetDateTime;

use crate::clock::{Clock, SystemClock};
use crate::instruction::Instruction;

/// UOM values must lie in `[0, UOM_LIMIT)`.
pub const UOM_LIMIT: i32 = 256;

/// A single broken business rule.
///
/// Variants are declared in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Violation {
    MissingInstruction,
    InstructionType,
    ProductCode,
    Quantity,
    Uom,
    Timestamp,
}

impl Violation {
    pub const fn message(self) -> &'static str {
        match self {
            Violation::MissingInstruction => "Instruction message is null",
            Violation::InstructionType => "Instruction type is not valid",
            Violation::ProductCode => "Product code is not valid",
            Violation::Quantity => "Quantity is not valid",
            Violation::Uom => "UOM is not valid",
            Violation::Timestamp => "Timestamp is not valid",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Every rule an instruction broke. Displays as the newline-joined messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn contains(&self, violation: Violation) -> bool {
        self.violations.contains(&violation)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            f.write_str(violation.message())?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Checks field-level business rules.
///
/// All rules run on every call; the error lists each one that failed.
#[derive(Debug, Clone, Default)]
pub struct Validator<C = SystemClock> {
    clock: C,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<C: Clock> Validator<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// Validates `instruction`, treating `None` as a missing message.
    pub fn validate(&self, instruction: Option<&Instruction>) -> Result<(), ValidationError> {
        let violations = match instruction {
            None => vec![Violation::MissingInstruction],
            Some(instruction) => self.violations(instruction),
        };
        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError { violations })
        }
    }

    pub fn check(&self, instruction: &Instruction) -> Result<(), ValidationError> {
        self.validate(Some(instruction))
    }

    /// Lists broken rules without raising. Empty means valid.
    pub fn violations(&self, instruction: &Instruction) -> Vec<Violation> {
        let mut violations = Vec::new();
        if instruction.instruction_type().is_none() {
            violations.push(Violation::InstructionType);
        }
        if !is_valid_product_code(instruction.product_code()) {
            violations.push(Violation::ProductCode);
        }
        if instruction.quantity() <= 0 {
            violations.push(Violation::Quantity);
        }
        if !(0..UOM_LIMIT).contains(&instruction.uom()) {
            violations.push(Violation::Uom);
        }
        if !self.is_valid_timestamp(instruction.timestamp()) {
            violations.push(Violation::Timestamp);
        }
        violations
    }

    fn is_valid_timestamp(&self, timestamp: OffsetDateTime) -> bool {
        timestamp > OffsetDateTime::UNIX_EPOCH && timestamp <= self.clock.now()
    }
}

/// Two ASCII uppercase letters followed by two ASCII digits.
pub fn is_valid_product_code(code: &str) -> bool {
    matches!(
        code.as_bytes(),
        [a, b, c, d]
            if a.is_ascii_uppercase()
                && b.is_ascii_uppercase()
                && c.is_ascii_digit()
                && d.is_ascii_digit()
    )
}
