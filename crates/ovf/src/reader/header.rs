//! Header parsing and geometry extraction

// standard library
use std::collections::HashMap;
use std::io::BufRead;

// crate modules
use crate::error::{Error, Result};
use crate::geometry::Geometry;
use crate::reader::lines::LineReader;
use crate::reader::parsers;

// external crates
use log::{debug, trace};

/// Metadata read from the header of an OVF file
///
/// Every `key: value` line before the data sentinel is kept, with the key
/// lowercased. Later duplicate keys overwrite earlier ones, which is why the
/// repeatable `Desc` lines are also collected separately, in order.
///
/// Extraction is strict only about the mesh topology. Cell counts must be
/// present (or defaulted) and valid, while cell sizes quietly fall back to
/// `1.0` when missing or unparsable.
///
/// ```rust
/// # use mmtools_ovf::Header;
/// let header = Header::from_entries([("xnodes", "4"), ("ynodes", "2")]);
///
/// let geometry = header.geometry().unwrap();
/// assert_eq!(geometry.nodes(), [4, 2, 1]);
/// assert_eq!(geometry.steps(), [1.0, 1.0, 1.0]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Header {
    /// Every key/value pair, keys lowercased
    pub entries: HashMap<String, String>,
    /// All `Desc` values, in file order
    pub descriptions: Vec<String>,
    /// Representation tag on the data sentinel e.g. `Text`, `Binary 4`
    pub representation: Option<String>,
}

impl Header {
    /// Build a header directly from key/value pairs
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut header = Header::default();
        for (key, value) in entries {
            header.insert(key.as_ref(), value.as_ref());
        }
        header
    }

    /// Record a single entry, lowercasing the key
    pub fn insert(&mut self, key: &str, value: &str) {
        let key = key.to_lowercase();
        if key == "desc" {
            self.descriptions.push(value.to_string());
        }
        self.entries.insert(key, value.to_string());
    }

    /// Value for `key`, ignoring case
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(&key.to_lowercase()).map(String::as_str)
    }

    /// Mesh geometry from the `xnodes`, `xstepsize`, etc... entries
    ///
    /// `xnodes` and `ynodes` are required, `znodes` defaults to 1. Counts
    /// must be positive integers with a representable product. Step sizes
    /// default to `1.0` if absent or not a finite real number.
    pub fn geometry(&self) -> Result<Geometry> {
        let nodes = [
            self.nodes("xnodes", None)?,
            self.nodes("ynodes", None)?,
            self.nodes("znodes", Some(1))?,
        ];

        let steps = [
            self.step("xstepsize"),
            self.step("ystepsize"),
            self.step("zstepsize"),
        ];

        Geometry::new(nodes, steps)
    }

    /// Simulation time from a `Desc: Total simulation time: <t> s` line
    pub fn simulation_time(&self) -> Option<f64> {
        self.descriptions
            .iter()
            .find_map(|desc| parsers::simulation_time(desc).ok())
            .map(|(_, time)| time)
            .filter(|time| time.is_finite())
    }

    /// True if the data block is declared as binary
    ///
    /// Checks both the representation on the data sentinel and any
    /// `datatype` header entry.
    pub fn is_binary(&self) -> bool {
        let is_binary = |s: &str| s.to_lowercase().contains("binary");
        self.representation.as_deref().is_some_and(is_binary)
            || self.get("datatype").is_some_and(is_binary)
    }

    /// Fail fast on anything other than text data
    pub fn ensure_text(&self) -> Result<()> {
        if self.is_binary() {
            let declared = self
                .representation
                .as_deref()
                .or(self.get("datatype"))
                .unwrap_or("binary");
            return Err(Error::UnsupportedFormat(declared.to_string()));
        }
        Ok(())
    }

    /// Parse a strictly positive cell count, with an optional default
    fn nodes(&self, key: &str, default: Option<usize>) -> Result<usize> {
        let value = match (self.get(key), default) {
            (Some(value), _) => value,
            (None, Some(n)) => return Ok(n),
            (None, None) => return Err(Error::MissingHeaderKey(key.to_string())),
        };

        match value.parse::<usize>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(Error::InvalidHeaderValue {
                key: key.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Parse a cell size, defaulting to 1.0
    fn step(&self, key: &str) -> f64 {
        self.get(key)
            .and_then(|value| value.parse::<f64>().ok())
            .filter(|step| step.is_finite())
            .unwrap_or(1.0)
    }
}

/// Read header lines up to and including the data sentinel
///
/// Lines without a `:` are ignored. Reaching the end of the stream before the
/// sentinel is fatal.
pub(crate) fn read_header<R: BufRead>(lines: &mut LineReader<R>) -> Result<Header> {
    let mut header = Header::default();

    loop {
        if !lines.advance()? {
            return Err(Error::UnexpectedEndOfFile);
        }
        let line = lines.line();

        if let Ok((_, representation)) = parsers::data_sentinel(line) {
            header.representation = representation.map(str::to_string);
            debug!("Data sentinel on line {}", lines.line_number());
            break;
        }

        match parsers::header_entry(line) {
            Ok((_, (key, value))) => header.insert(key, value),
            Err(_) => trace!("Ignoring header line {:?}", line),
        }
    }

    debug!("Header entries = {}", header.entries.len());
    debug!("Representation = {:?}", header.representation);
    Ok(header)
}
