//! Common utilities for integration tests

use std::fmt::Write;
use std::path::PathBuf;

/// Build OVF2 text in the layout written by mumax3/OOMMF
///
/// Data are written `x` fastest, then `y`, then `z`.
pub fn ovf_text(nodes: [usize; 3], steps: [f64; 3], time: f64, m: &[[f64; 3]]) -> String {
    let mut text = String::from("# OOMMF OVF 2.0\n# Segment count: 1\n# Begin: Segment\n");
    text.push_str("# Begin: Header\n# Title: m\n# meshtype: rectangular\n# meshunit: m\n");
    text.push_str("# xmin: 0\n# ymin: 0\n# zmin: 0\n");
    text.push_str("# valuedim: 3\n# valuelabels: m_x m_y m_z\n# valueunits: 1 1 1\n");
    let _ = writeln!(text, "# Desc: Total simulation time:  {time:e}  s");
    text.push_str("# xbase: 0\n# ybase: 0\n# zbase: 0\n");
    for (axis, (n, d)) in ["x", "y", "z"].iter().zip(nodes.iter().zip(steps)) {
        let _ = writeln!(text, "# {axis}nodes: {n}");
        let _ = writeln!(text, "# {axis}stepsize: {d:e}");
    }
    text.push_str("# End: Header\n# Begin: Data Text\n");
    for [x, y, z] in m {
        let _ = writeln!(text, "{x} {y} {z}");
    }
    text.push_str("# End: Data Text\n# End: Segment\n");
    text
}

/// Field where every vector is its own `(x, y, z)` cell coordinate
pub fn coordinate_field(nodes: [usize; 3]) -> Vec<[f64; 3]> {
    let [nx, ny, nz] = nodes;
    let mut m = Vec::with_capacity(nx * ny * nz);
    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                m.push([x as f64, y as f64, z as f64]);
            }
        }
    }
    m
}

/// Write `text` to a uniquely named file in the temp directory
pub fn temp_file(name: &str, text: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mmtools-ovf-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    std::fs::write(&path, text).unwrap();
    path
}
