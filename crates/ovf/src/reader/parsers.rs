//! Library of parser functions

// nom parser combinators
use nom::bytes::complete::{tag, tag_no_case, take_till, take_while};
use nom::character::complete::{char, space0};
use nom::combinator::rest;
use nom::number::complete::double;
use nom::sequence::{separated_pair, tuple};
use nom::IResult;

/// Exact text of the marker line that closes the header
pub const DATA_SENTINEL: &str = "# Begin: Data";

/// Start of the marker line that closes the data block
pub const DATA_END: &str = "# End: Data";

// ! Boolean checks

/// Check for the `# End: Data` line that ends the data block
pub fn is_data_end(i: &str) -> bool {
    i.trim().starts_with(DATA_END)
}

// ! Parser combinators

/// Parse the data sentinel, returning the representation tag if any
///
/// OVF2 writers append the data representation to the sentinel, e.g.
/// `# Begin: Data Text` or `# Begin: Data Binary 4`. A bare sentinel has no
/// tag. Any line starting with `# Begin: Data` is a sentinel, so text run on
/// to the keyword (`# Begin: DataText`) is taken as the tag too.
pub fn data_sentinel(i: &str) -> IResult<&str, Option<&str>> {
    let (i, _) = tag(DATA_SENTINEL)(i.trim())?;
    let (i, representation) = rest(i)?;
    let representation = representation.trim();
    Ok((i, (!representation.is_empty()).then_some(representation)))
}

/// Split a header line into a trimmed `(key, value)` pair on the first `:`
///
/// Any leading `#` comment markers are stripped first. Fails if there is no
/// `:` in the line.
pub fn header_entry(i: &str) -> IResult<&str, (&str, &str)> {
    let (i, _) = take_while(|c: char| c == '#')(i.trim())?;
    let (i, (key, value)) = separated_pair(take_till(|c: char| c == ':'), char(':'), rest)(i)?;
    Ok((i, (key.trim(), value.trim())))
}

/// Simulation time from a mumax3 style description value
///
/// e.g. `Total simulation time:  1e-09  s`
pub fn simulation_time(i: &str) -> IResult<&str, f64> {
    let (i, _) = tuple((
        space0,
        tag_no_case("total simulation time"),
        space0,
        char(':'),
        space0,
    ))(i)?;
    double(i)
}
