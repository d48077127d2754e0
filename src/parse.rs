use std::num::{IntErrorKind, ParseIntError};

use crate::error::LineFault;

/// Splits one line of a workload into its `(number, value)` pair.
///
/// A line holds either two integers, or a label followed by two integers.
/// The label is dropped no matter what it looks like, so `-5 10` is a pair
/// and `1 5 -3` is the pair `(5, -3)`. A blank line has no fields and is
/// rejected like any other wrong field count.
pub fn parse_line(text: &str) -> Result<(i64, i64), LineFault> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let (number, value) = match tokens[..] {
        [number, value] | [_, number, value] => (number, value),
        _ => return Err(LineFault::Arity(tokens.len())),
    };
    Ok((parse_int(number)?, parse_int(value)?))
}

fn parse_int(token: &str) -> Result<i64, LineFault> {
    token.parse().map_err(|e: ParseIntError| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            LineFault::OutOfRange(token.to_owned())
        }
        _ => LineFault::NotInteger(token.to_owned()),
    })
}
