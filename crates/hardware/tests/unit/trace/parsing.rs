//! Trace Record Parsing Tests.
//!
//! Covers the line classifier (instruction, data, blank) and every
//! rejection reason of the data-record parser.

use cachesim_core::common::{Operation, ParseError};
use cachesim_core::trace::{parse_line, DataRecord, TraceRecord};
use pretty_assertions::assert_eq;
use rstest::rstest;

// ══════════════════════════════════════════════════════════
// 1. Accepted records
// ══════════════════════════════════════════════════════════

#[rstest]
#[case(" L 10,1", Operation::Load, 0x10, 1)]
#[case(" S 7ff0005d0,4", Operation::Store, 0x7_ff00_05d0, 4)]
#[case(" M 0421c7f0,4", Operation::Modify, 0x0421_c7f0, 4)]
#[case("L 0x20,8", Operation::Load, 0x20, 8)]
#[case("\tS  ABCDEF , 2 ", Operation::Store, 0xab_cdef, 2)]
#[case(" L ffffffffffffffff,8", Operation::Load, u64::MAX, 8)]
#[case(" L 10,1\r\n", Operation::Load, 0x10, 1)]
fn parses_data_records(
    #[case] line: &str,
    #[case] op: Operation,
    #[case] address: u64,
    #[case] size: u32,
) {
    assert_eq!(
        parse_line(line),
        Ok(Some(TraceRecord::Data(DataRecord::new(op, address, size))))
    );
}

#[rstest]
#[case("I 0400d7d4,8")]
#[case("I  04ead900,3")]
#[case(" I whatever")]
fn instruction_lines_are_not_parsed(#[case] line: &str) {
    assert_eq!(parse_line(line), Ok(Some(TraceRecord::Instruction)));
}

#[rstest]
#[case("")]
#[case("   ")]
#[case("\n")]
fn blank_lines_yield_nothing(#[case] line: &str) {
    assert_eq!(parse_line(line), Ok(None));
}

#[test]
fn display_renders_trace_syntax() {
    let rec = DataRecord::new(Operation::Modify, 0x421c7f0, 4);
    assert_eq!(rec.to_string(), " M 421c7f0,4");
    assert_eq!(rec.to_string().parse::<DataRecord>(), Ok(rec));
}

// ══════════════════════════════════════════════════════════
// 2. Rejected records
// ══════════════════════════════════════════════════════════

#[rstest]
#[case("X 10,1", ParseError::UnknownOperation("X".into()))]
#[case("LS 10,1", ParseError::UnknownOperation("LS".into()))]
#[case("l 10,1", ParseError::UnknownOperation("l".into()))]
#[case("L", ParseError::MissingAddress)]
#[case("L zz,1", ParseError::InvalidAddress("zz".into()))]
#[case("L ,1", ParseError::InvalidAddress(String::new()))]
#[case("L 10", ParseError::MissingSize)]
#[case("L 10,", ParseError::MissingSize)]
#[case("L 10,abc", ParseError::InvalidSize("abc".into()))]
#[case("L 10,-1", ParseError::InvalidSize("-1".into()))]
#[case("L 10,1 extra", ParseError::TrailingInput("extra".into()))]
fn rejects_malformed_records(#[case] line: &str, #[case] expected: ParseError) {
    assert_eq!(parse_line(line), Err(expected));
}

#[test]
fn empty_record_has_no_operation() {
    assert_eq!("".parse::<DataRecord>(), Err(ParseError::MissingOperation));
}

#[test]
fn oversized_address_is_rejected() {
    assert_eq!(
        parse_line("L 10000000000000000,1"),
        Err(ParseError::InvalidAddress("10000000000000000".into()))
    );
}
