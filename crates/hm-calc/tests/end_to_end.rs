//! Whole-pipeline scenarios driven through parsed tables.

use hm_calc::{CalcError, HydrometerCalc, Method, derived_column_names};
use hm_config::ConfigError;
use hm_core::{DataTable, SampleTime};

const MU: f64 = 0.01;
const RHO_L: f64 = 1.0;
const RHO_S: f64 = 2.65;
const G: f64 = 980.0;
const L0: f64 = 16.3;
const K: f64 = 0.164;
const C: f64 = 50.0;

fn params_table(skip: Option<&str>) -> DataTable {
    let rows: Vec<Vec<String>> = [
        ("mu", MU),
        ("rho_l", RHO_L),
        ("rho_s", RHO_S),
        ("g", G),
        ("L0", L0),
        ("k", K),
    ]
    .iter()
    .filter(|(name, _)| Some(*name) != skip)
    .map(|(name, value)| vec![name.to_string(), value.to_string()])
    .collect();
    DataTable::new(vec!["Parameter".into(), "Value".into()], rows).unwrap()
}

/// Lab-sheet column names for each standardized token.
fn colnames_table() -> DataTable {
    let mut rows = Vec::new();
    for t in SampleTime::ALL {
        rows.push(vec![format!("T{t}_temp"), format!("Temp {t}s")]);
        rows.push(vec![format!("R_{t}"), format!("Reading {t}s")]);
        rows.push(vec![format!("R_b_{t}"), format!("Blank {t}s")]);
    }
    rows.push(vec!["C".into(), "Dry mass".into()]);
    rows.push(vec!["sample".into(), "Sample".into()]);
    DataTable::new(vec!["Variable".into(), "col_name_in_data".into()], rows).unwrap()
}

fn calcset_table(handling: &str) -> DataTable {
    DataTable::from_str_rows(
        &["Setting", "Value"],
        &[&["extrapolation_handling", handling]],
    )
    .unwrap()
}

fn headers() -> Vec<String> {
    let mut headers = vec!["Sample".to_string()];
    for t in SampleTime::ALL {
        headers.push(format!("Temp {t}s"));
        headers.push(format!("Reading {t}s"));
        headers.push(format!("Blank {t}s"));
    }
    headers.push("Dry mass".into());
    headers
}

/// Raw readings that reproduce the given diameters and percent finer at
/// 20 degrees (zero temperature correction).
fn synthetic_row(name: &str, diameters: [f64; 4], finer: [f64; 4]) -> Vec<String> {
    let mut row = vec![name.to_string()];
    for (i, t) in SampleTime::ALL.iter().enumerate() {
        let depth = diameters[i].powi(2) * G * (RHO_S - RHO_L) * t.seconds() / (18.0 * MU);
        let reading = (L0 - depth) / K;
        let blank = reading - finer[i] * C / 100.0;
        row.push("20".into());
        row.push(reading.to_string());
        row.push(blank.to_string());
    }
    row.push(C.to_string());
    row
}

/// A plausible loam sample from a 40 g hydrometer run.
fn lab_row(name: &str) -> Vec<String> {
    [
        name, "22.5", "27", "5", "22.5", "25", "5", "23", "15", "4.5", "21", "10", "4", "40",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

#[test]
fn bracketed_between_first_two_samples() {
    let data = DataTable::new(
        headers(),
        vec![synthetic_row(
            "S1",
            [0.0001, 0.0003, 0.004, 0.01],
            [95.0, 80.0, 40.0, 10.0],
        )],
    )
    .unwrap();

    let calc = HydrometerCalc::from_tables(
        &data,
        &params_table(None),
        &colnames_table(),
        &calcset_table("truncate"),
    )
    .unwrap();
    let out = calc.calculate().unwrap();
    let sample = &out.samples[0];

    let x30 = sample.derived[SampleTime::S30].diameter;
    assert!((x30 - 0.0001).abs() < 1e-12, "{x30}");
    let p60 = sample.derived[SampleTime::S60].percent_finer;
    assert!((p60 - 80.0).abs() < 1e-9, "{p60}");

    let clay = &sample.finer_2um;
    assert!(clay.value > 80.0 && clay.value < 95.0, "{}", clay.value);
    assert_eq!(
        clay.method,
        Method::Bracketed {
            lower: SampleTime::S30,
            upper: SampleTime::S60
        }
    );
    assert!(!clay.warning.is_empty());
    assert!(clay.warning.contains("30") && clay.warning.contains("60"));

    let expected = 95.0 + (80.0 - 95.0) * (2.0_f64.ln() / 3.0_f64.ln());
    assert!((clay.value - expected).abs() < 1e-6, "{} vs {expected}", clay.value);

    assert!((sample.fractions.total() - 100.0).abs() < 1e-9);
}

#[test]
fn truncate_and_extrapolate_below_range() {
    let diameters = [0.0004, 0.0003, 0.00025, 0.00021];
    let finer = [70.0, 60.0, 50.0, 45.0];
    let data = DataTable::new(headers(), vec![synthetic_row("S2", diameters, finer)]).unwrap();

    let truncated = HydrometerCalc::from_tables(
        &data,
        &params_table(None),
        &colnames_table(),
        &calcset_table("truncate"),
    )
    .unwrap()
    .calculate()
    .unwrap();
    let t = &truncated.samples[0].finer_2um;
    let smallest = truncated.samples[0].derived[SampleTime::S86400].percent_finer;
    assert_eq!(t.value, smallest);
    assert!(t.warning.contains("smaller"));

    let extrapolated = HydrometerCalc::from_tables(
        &data,
        &params_table(None),
        &colnames_table(),
        &calcset_table("extrapolate"),
    )
    .unwrap()
    .calculate()
    .unwrap();
    let e = &extrapolated.samples[0].finer_2um;
    assert!(e.value < 45.0, "{}", e.value);
    assert_eq!(
        e.method,
        Method::Extrapolated {
            first: SampleTime::S86400,
            second: SampleTime::S5400
        }
    );
    assert!(e.warning.contains("86400") && e.warning.contains("5400"));
}

#[test]
fn lab_rows_produce_a_complete_result_table() {
    let data = DataTable::new(headers(), vec![lab_row("A"), lab_row("B")]).unwrap();
    let calc = HydrometerCalc::from_tables(
        &data,
        &params_table(None),
        &colnames_table(),
        &calcset_table("truncate"),
    )
    .unwrap();
    let out = calc.calculate().unwrap();

    for sample in &out.samples {
        let f = sample.fractions;
        assert!((f.sand + f.silt + f.clay - 100.0).abs() < 1e-9);
        for (_, d) in sample.derived.iter() {
            assert!(d.diameter > 0.0);
        }
    }

    let table = out.to_table(&data).unwrap();
    assert_eq!(table.n_rows(), 2);
    assert_eq!(&table.headers()[..data.n_cols()], data.headers());
    assert_eq!(&table.headers()[data.n_cols()..], derived_column_names().as_slice());
    assert_eq!(table.cell(1, 0), Some("B"));

    let clay = table.column("P_clay").unwrap();
    assert_eq!(clay.real(0), Some(out.samples[0].fractions.clay));
    let warning = table.column("Warning_50um").unwrap();
    assert!(!warning.get(0).unwrap().is_empty());
}

#[test]
fn missing_k_fails_before_any_row() {
    let mut bad = lab_row("A");
    bad[2] = "not a number".into();
    let data = DataTable::new(headers(), vec![bad]).unwrap();

    let err = HydrometerCalc::from_tables(
        &data,
        &params_table(Some("k")),
        &colnames_table(),
        &calcset_table("truncate"),
    )
    .unwrap_err();

    match err {
        CalcError::Config(ConfigError::MissingParameters { names }) => {
            assert_eq!(names, vec!["k".to_string()]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_numeric_reading_names_row_and_time() {
    let mut bad = lab_row("B");
    bad[5] = "".into();
    let data = DataTable::new(headers(), vec![lab_row("A"), bad]).unwrap();
    let calc = HydrometerCalc::from_tables(
        &data,
        &params_table(None),
        &colnames_table(),
        &calcset_table("truncate"),
    )
    .unwrap();

    match calc.calculate().unwrap_err() {
        CalcError::Calculation { row, time, .. } => {
            assert_eq!(row, 1);
            assert_eq!(time, Some(SampleTime::S60));
        }
        other => panic!("unexpected error: {other}"),
    }
}
