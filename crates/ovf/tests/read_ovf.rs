//! Integration tests for reading OVF2 text files

mod common;

use common::{coordinate_field, ovf_text, temp_file};
use mmtools_ovf::{
    read_ovf, read_ovf_series, write_json, Error, Grid, JsonArchive, OvfReader, Parsed,
    Simulation, Warning,
};
use rstest::{fixture, rstest};
use std::io::Cursor;

const STEPS: [f64; 3] = [5e-9, 5e-9, 3e-9];

fn parse(text: &str) -> mmtools_ovf::Result<Parsed<Simulation>> {
    OvfReader::new().parse_reader(Cursor::new(text))
}

#[fixture]
fn uniform() -> String {
    ovf_text([2, 2, 1], STEPS, 2.5e-10, &[[0.0, 0.0, 1.0]; 4])
}

#[rstest]
fn uniform_field(uniform: String) {
    let parsed = parse(&uniform).unwrap();
    assert!(parsed.is_clean());

    let simulation = parsed.value;
    let geometry = simulation.geometry.unwrap();
    assert_eq!(geometry.nodes(), [2, 2, 1]);
    assert_eq!(geometry.steps(), STEPS);

    let field = &simulation.fields[0];
    assert_eq!(field.index, 0);
    assert_eq!(field.time, 2.5e-10);
    assert_eq!(field.n_cells, 4);
    assert_eq!(field.mz_slice, Some(vec![vec![1.0, 1.0], vec![1.0, 1.0]]));
    assert_eq!(field.m_average, Some([0.0, 0.0, 1.0]));
}

#[rstest]
#[case([1, 1, 1])] // case 1
#[case([4, 1, 1])] // case 2
#[case([3, 2, 1])] // case 3
#[case([2, 3, 4])] // case 4
#[case([5, 4, 3])] // case 5
fn cell_count_is_product(#[case] nodes: [usize; 3]) {
    let m = coordinate_field(nodes);
    let parsed = parse(&ovf_text(nodes, STEPS, 0.0, &m)).unwrap();
    assert!(parsed.is_clean());

    let field = &parsed.value.fields[0];
    assert_eq!(field.n_cells, nodes.iter().product::<usize>());
    assert_eq!(field.m.len(), field.n_cells);
}

#[rstest]
#[case([2, 3, 4])] // case 1
#[case([7, 1, 2])] // case 2
#[case([1, 5, 3])] // case 3
fn grid_places_cell_coordinates(#[case] nodes: [usize; 3]) {
    let parsed = parse(&ovf_text(nodes, STEPS, 0.0, &coordinate_field(nodes))).unwrap();
    let simulation = parsed.value;
    let geometry = simulation.geometry.as_ref().unwrap();
    let field = &simulation.fields[0];

    let grid = Grid::new(&field.m, geometry).unwrap();
    let [nx, ny, nz] = nodes;
    assert_eq!(grid.shape(), [nz, ny, nx, 3]);
    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                assert_eq!(grid[(z, y, x)], [x as f64, y as f64, z as f64]);
            }
        }
    }

    // slice rows are y, columns are x
    let slice = field.mz_slice.as_ref().unwrap();
    assert_eq!(slice.len(), ny);
    assert!(slice.iter().all(|row| row.len() == nx));
    assert!(slice.iter().flatten().all(|mz| *mz == 0.0));
}

#[rstest]
#[case("xnodes")] // case 1
#[case("ynodes")] // case 2
fn missing_required_nodes(uniform: String, #[case] key: &str) {
    let text: String = uniform
        .lines()
        .filter(|line| !line.contains(key))
        .map(|line| format!("{line}\n"))
        .collect();

    match parse(&text) {
        Err(Error::MissingHeaderKey(missing)) => assert_eq!(missing, key),
        other => panic!("unexpected result {other:?}"),
    }
}

#[rstest]
fn missing_znodes_defaults_to_one(uniform: String) {
    let text = uniform.replace("# znodes: 1\n", "");
    let simulation = parse(&text).unwrap().value;
    assert_eq!(simulation.geometry.unwrap().nz(), 1);
}

#[test]
fn short_data_block() {
    let m = coordinate_field([2, 2, 2]);
    let text = ovf_text([2, 2, 2], STEPS, 0.0, &m[..5]);

    let parsed = parse(&text).unwrap();
    assert_eq!(
        parsed.warnings,
        vec![
            Warning::VectorCountMismatch {
                expected: 8,
                found: 5
            },
            Warning::ShapeMismatch {
                expected: 8,
                found: 5
            },
        ]
    );

    let field = &parsed.value.fields[0];
    assert_eq!(field.m, m[..5].to_vec());
    assert_eq!(field.mz_slice, None);
    assert_eq!(field.m_average, None);
}

#[test]
fn noise_lines_are_skipped() {
    let text = "# xnodes: 2\n# ynodes: 1\n# Begin: Data\n\n0.1 0.2\n1 0 0\n   \n0 1 0\n";
    let parsed = parse(text).unwrap();
    assert!(parsed.is_clean());
    assert_eq!(parsed.value.fields[0].m, vec![[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
}

#[test]
fn malformed_vector_is_fatal() {
    let text = "# xnodes: 2\n# ynodes: 1\n# Begin: Data\n1 0 0\n0 one 0\n";
    match parse(text) {
        Err(Error::MalformedVectorLine { line, content }) => {
            assert_eq!(line, 5);
            assert_eq!(content, "0 one 0");
        }
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn binary_data_is_rejected() {
    let text = "# xnodes: 1\n# ynodes: 1\n# Begin: Data Binary 4\n";
    assert!(matches!(parse(text), Err(Error::UnsupportedFormat(_))));
}

#[test]
fn reader_options() {
    let text = ovf_text([2, 1, 1], STEPS, 1e-9, &[[1.0, 0.0, 0.0]; 2]);

    let mut reader = OvfReader::new();
    reader.set_index(7);
    reader.set_time(4e-9);
    reader.set_external_field([0.0, 0.0, 0.05]);
    reader.skip_derived();

    let parsed = reader.parse_reader(Cursor::new(text)).unwrap();
    let field = &parsed.value.fields[0];
    assert_eq!(field.index, 7);
    assert_eq!(field.time, 4e-9);
    assert_eq!(field.external_field, [0.0, 0.0, 0.05]);
    assert!(!field.is_derived());
}

#[rstest]
fn normalise_is_idempotent(uniform: String) {
    let mut simulation = parse(&uniform).unwrap().value;
    let before = simulation.clone();

    assert!(simulation.normalise().is_empty());
    assert_eq!(simulation, before);
}

#[rstest]
fn file_errors_name_the_file() {
    let path = temp_file("missing_sentinel.ovf", "# xnodes: 1\n# ynodes: 1\n");

    let error = read_ovf(&path).unwrap_err();
    match &error {
        Error::File { path: p, .. } => assert_eq!(p, &path),
        other => panic!("unexpected error {other:?}"),
    }
    assert!(matches!(error.root(), Error::UnexpectedEndOfFile));

    let error = read_ovf(path.with_file_name("does_not_exist.ovf")).unwrap_err();
    assert!(matches!(error.root(), Error::IOError(_)));
}

#[rstest]
fn series_of_files() {
    let nodes = [3, 2, 1];
    let paths: Vec<_> = (0..3)
        .map(|i| {
            let m = vec![[0.0, 0.0, i as f64]; 6];
            let text = ovf_text(nodes, STEPS, i as f64, &m);
            temp_file(&format!("series_{i}.ovf"), &text)
        })
        .collect();

    let parsed = read_ovf_series(&paths).unwrap();
    assert!(parsed.is_clean());

    let simulation = parsed.value;
    assert_eq!(simulation.geometry.unwrap().nodes(), nodes);
    assert_eq!(simulation.n_fields(), 3);
    for (i, field) in simulation.fields.iter().enumerate() {
        assert_eq!(field.index, i);
        assert_eq!(field.time, i as f64);
        assert_eq!(field.m_average, Some([0.0, 0.0, i as f64]));
    }
}

#[rstest]
fn series_geometry_must_match() {
    let first = temp_file(
        "mismatch_0.ovf",
        &ovf_text([2, 1, 1], STEPS, 0.0, &[[1.0, 0.0, 0.0]; 2]),
    );
    let second = temp_file(
        "mismatch_1.ovf",
        &ovf_text([1, 2, 1], STEPS, 0.0, &[[1.0, 0.0, 0.0]; 2]),
    );

    let error = read_ovf_series([&first, &second]).unwrap_err();
    match error.root() {
        Error::InconsistentGeometry { expected, found } => {
            assert_eq!(*expected, [2, 1, 1]);
            assert_eq!(*found, [1, 2, 1]);
        }
        other => panic!("unexpected error {other:?}"),
    }
}

#[rstest]
fn json_archive_round_trip() {
    let nodes = [2, 2, 2];
    let text = ovf_text(nodes, STEPS, 0.0, &coordinate_field(nodes));
    let simulation = parse(&text).unwrap().value;

    let path = temp_file("archive.ovf", &text).with_extension("json");
    write_json(&simulation, &path).unwrap();

    let json = std::fs::read_to_string(&path).unwrap();
    let archived: Simulation = serde_json::from_str(&json).unwrap();
    assert_eq!(archived.geometry.unwrap().nodes(), nodes);
    assert_eq!(archived.fields[0].m, simulation.fields[0].m);
    assert_eq!(archived.fields[0].mz_slice, simulation.fields[0].mz_slice);
}

#[rstest]
#[case("NaN 0 1\n0 0 1\n", 4)] // case 1
#[case("0 0 1\ninf 0 1\n", 5)] // case 2
#[case("0 0 1\n0 0 -inf\n", 5)] // case 3
fn non_finite_vectors_are_fatal(#[case] data: &str, #[case] expected_line: usize) {
    let text = format!("# xnodes: 2\n# ynodes: 1\n# Begin: Data\n{data}");
    match parse(&text) {
        Err(Error::MalformedVectorLine { line, .. }) => assert_eq!(line, expected_line),
        other => panic!("unexpected result {other:?}"),
    }
}

#[test]
fn archived_record_reads_back() {
    let text = "# xnodes: 2\n# ynodes: 1\n# Begin: Data\n0.5 0 1\n0 0.25 1\n";
    let simulation = parse(text).unwrap().value;

    let mut archive = JsonArchive::new(Vec::new());
    simulation.archive(&mut archive).unwrap();
    let restored: Simulation = serde_json::from_slice(&archive.into_inner()).unwrap();
    assert_eq!(restored, simulation);
}

#[rstest]
#[case(r#"{"nx":18446744073709551615,"ny":2,"nz":1,"dx":1.0,"dy":1.0,"dz":1.0}"#)] // case 1
#[case(r#"{"nx":2,"ny":0,"nz":1,"dx":1.0,"dy":1.0,"dz":1.0}"#)] // case 2
fn invalid_archived_geometry_is_rejected(#[case] geometry: &str) {
    let json = format!(r#"{{"geometry":{geometry},"fields":[]}}"#);
    assert!(serde_json::from_str::<Simulation>(&json).is_err());
}

#[rstest]
fn series_warnings_carry_snapshot_index() {
    let nodes = [2, 2, 1];
    let full = temp_file(
        "tagged_0.ovf",
        &ovf_text(nodes, STEPS, 0.0, &[[0.0, 0.0, 1.0]; 4]),
    );
    let short = temp_file(
        "tagged_1.ovf",
        &ovf_text(nodes, STEPS, 1.0, &[[0.0, 0.0, 1.0]; 3]),
    );

    let parsed = read_ovf_series([&full, &full, &short]).unwrap();
    assert_eq!(parsed.warnings.len(), 2);
    assert!(parsed.warnings.iter().all(|w| w.snapshot() == Some(2)));
    assert_eq!(
        parsed.warnings[0].root(),
        &Warning::VectorCountMismatch {
            expected: 4,
            found: 3
        }
    );
    assert!(parsed.value.fields[2].mz_slice.is_none());
}
