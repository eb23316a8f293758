use time::{OffsetDateTime, PrimitiveDateTime};

use crate::error::{ParseError, Result};
use crate::instruction::{Instruction, HEADER, TIMESTAMP_FORMAT, TOKEN_COUNT};

/// Decodes one wire line into an [`Instruction`].
///
/// The line is split on single spaces. Trailing empty tokens are dropped, so
/// a trailing delimiter is tolerated, but repeated interior spaces produce
/// empty tokens that count toward the total. No business rules are checked.
///
/// Numeric and timestamp tokens that fail to convert surface as
/// [`crate::Error::Number`] / [`crate::Error::Timestamp`].
pub fn parse(raw: &str) -> Result<Instruction> {
    if raw.is_empty() {
        return Err(ParseError::Empty.into());
    }

    let mut tokens: Vec<&str> = raw.split(' ').collect();
    while tokens.last().is_some_and(|token| token.is_empty()) {
        tokens.pop();
    }

    let [header, type_code, product_code, quantity, uom, timestamp] = tokens.as_slice() else {
        return Err(ParseError::ArgumentCount {
            expected: TOKEN_COUNT,
            found: tokens.len(),
        }
        .into());
    };
    if *header != HEADER {
        return Err(ParseError::BadHeader.into());
    }

    let quantity = quantity.parse::<i32>()?;
    let uom = uom.parse::<i32>()?;
    let timestamp = parse_timestamp(timestamp)?;

    Ok(Instruction::new(
        *type_code,
        *product_code,
        quantity,
        uom,
        timestamp,
    ))
}

/// Parses a `yyyy-MM-ddTHH:mm:ss.sssZ` token as a UTC instant.
pub fn parse_timestamp(token: &str) -> Result<OffsetDateTime> {
    let local = PrimitiveDateTime::parse(token, TIMESTAMP_FORMAT)?;
    Ok(local.assume_utc())
}
