//! Data block reading

// standard library
use std::io::BufRead;

// crate modules
use crate::error::{Error, Result};
use crate::reader::lines::LineReader;
use crate::reader::parsers;
use crate::warning::{Parsed, Warning};

// external crates
use log::{debug, trace};

/// Upper limit on the up-front allocation, headers can lie about size
const MAX_PREALLOCATED: usize = 1 << 20;

/// Read up to `n_cells` magnetisation vectors following the header
///
/// Lines with fewer than three whitespace separated tokens are noise and
/// skipped without counting. Extra tokens after the third are ignored.
/// Reading stops once `n_cells` vectors are collected, the stream ends, or an
/// `# End: Data` marker is found.
///
/// A short read is a [Warning::VectorCountMismatch], while a token that is
/// not a finite real number (including `NaN` and `inf`) is a fatal
/// [Error::MalformedVectorLine].
pub(crate) fn read_vectors<R: BufRead>(
    lines: &mut LineReader<R>,
    n_cells: usize,
) -> Result<Parsed<Vec<[f64; 3]>>> {
    let mut m: Vec<[f64; 3]> = Vec::with_capacity(n_cells.min(MAX_PREALLOCATED));
    let mut skipped = 0;

    while m.len() < n_cells {
        if !lines.advance()? {
            break;
        }
        let line = lines.line();

        if parsers::is_data_end(line) {
            debug!("End of data marker on line {}", lines.line_number());
            break;
        }

        let mut tokens = line.split_whitespace();
        let (Some(x), Some(y), Some(z)) = (tokens.next(), tokens.next(), tokens.next()) else {
            trace!("Skipping line {} ({:?})", lines.line_number(), line);
            skipped += 1;
            continue;
        };

        match [x, y, z].map(parse_component) {
            [Some(x), Some(y), Some(z)] => m.push([x, y, z]),
            _ => {
                return Err(Error::MalformedVectorLine {
                    line: lines.line_number(),
                    content: line.to_string(),
                })
            }
        }
    }

    debug!("Vectors read = {}/{n_cells}", m.len());
    if skipped > 0 {
        debug!("Lines skipped = {skipped}");
    }

    let found = m.len();
    let mut parsed = Parsed::new(m);
    if found < n_cells {
        parsed.warn(Warning::VectorCountMismatch {
            expected: n_cells,
            found,
        });
    }

    Ok(parsed)
}

/// A single finite vector component
fn parse_component(token: &str) -> Option<f64> {
    token.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn vectors(text: &str, n_cells: usize) -> Result<Parsed<Vec<[f64; 3]>>> {
        read_vectors(&mut LineReader::new(Cursor::new(text)), n_cells)
    }

    #[test]
    fn reads_exact_count() {
        let parsed = vectors("1 0 0\n0 1 0\n0 0 1\n", 3).unwrap();
        assert!(parsed.is_clean());
        assert_eq!(
            parsed.value,
            vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]
        );
    }

    #[test]
    fn short_lines_are_skipped() {
        let text = "\n1 2\n   \n0.5 -0.5 1e-3\n7\n-1 -2 -3 extra tokens\n";
        let parsed = vectors(text, 2).unwrap();
        assert!(parsed.is_clean());
        assert_eq!(parsed.value, vec![[0.5, -0.5, 1e-3], [-1.0, -2.0, -3.0]]);
    }

    #[test]
    fn stops_at_n_cells() {
        // the malformed line is never reached
        let parsed = vectors("1 1 1\n2 2 2\nnot a vector\n", 2).unwrap();
        assert_eq!(parsed.value.len(), 2);
        assert!(parsed.is_clean());
    }

    #[test]
    fn short_read_warns() {
        let parsed = vectors("1 1 1\n2 2 2\n\n", 4).unwrap();
        assert_eq!(parsed.value.len(), 2);
        assert_eq!(
            parsed.warnings,
            vec![Warning::VectorCountMismatch {
                expected: 4,
                found: 2
            }]
        );
    }

    #[test]
    fn end_marker_stops_reading() {
        let text = "1 1 1\n# End: Data Text\n# End: Segment\n";
        let parsed = vectors(text, 3).unwrap();
        assert_eq!(parsed.value, vec![[1.0; 3]]);
        assert_eq!(parsed.warnings.len(), 1);
    }

    #[test]
    fn malformed_line_is_fatal() {
        let result = vectors("1 1 1\n1 x 1\n", 2);
        match result {
            Err(Error::MalformedVectorLine { line, content }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "1 x 1");
            }
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[test]
    fn non_finite_is_fatal() {
        for text in ["NaN 0 1\n0 0 1\n", "0 0 1\n0 inf 1\n", "0 0 1\n-infinity 0 0\n"] {
            assert!(matches!(
                vectors(text, 2),
                Err(Error::MalformedVectorLine { .. })
            ));
        }
    }

    #[test]
    fn zero_cells_reads_nothing() {
        let parsed = vectors("1 1 1\n", 0).unwrap();
        assert!(parsed.value.is_empty());
        assert!(parsed.is_clean());
    }
}
