//! End-to-end properties of the cross-section-to-length pipeline, exercised
//! through the public API with the bundled v2r4 table (no network).

use photodis_core::bath::PhotonBath;
use photodis_core::length::{LengthCalculator, SWEEP_POINTS};
use photodis_core::sweep::{
    read_length_table, write_difference_percentage_table, write_length_table,
};
use photodis_core::xsection::tendl::{TendlClient, parse_table};
use photodis_core::xsection::v2r4::{PLATEAU_START_MEV, V2r4Table, evaluate_at};
use photodis_core::xsection::{Channel, CrossSection, XsModel};
use photodis_core::{Error, Nuclide};
use tempfile::TempDir;

fn calculator() -> LengthCalculator {
    LengthCalculator::with_parts(
        PhotonBath::cmb(),
        V2r4Table::bundled().expect("bundled table"),
        TendlClient::without_cache().expect("client"),
    )
}

#[test]
fn fit_curve_matches_the_analytic_gaussian_below_the_plateau() {
    let table = V2r4Table::bundled().expect("bundled table");
    let nuclide = Nuclide::new(56, 26);
    let parameters = table
        .parameters(nuclide, Channel::Nucleon)
        .expect("iron row");
    let curve = table.evaluate(nuclide, Channel::Nucleon).expect("curve");

    for (&energy, &sigma) in curve.energy_mev.iter().zip(&curve.sigma_mb) {
        if energy <= parameters.threshold || energy >= PLATEAU_START_MEV {
            continue;
        }
        let offset = energy - parameters.centroid;
        let expected = parameters.height * (-offset * offset / parameters.width_sq).exp();
        assert!(
            (sigma - expected).abs() <= 1.0e-12 * expected.max(1.0),
            "at {energy} MeV: {sigma} vs {expected}"
        );
        assert_eq!(sigma, evaluate_at(&parameters, energy));
    }
}

#[test]
fn positive_filtering_preserves_order_and_drops_only_nonpositive_bins() {
    let curve = CrossSection::new(
        vec![1.0, 5.0, 10.0, 20.0, 40.0],
        vec![0.0, 3.0, -1.0, 7.0, 0.0],
    );
    let filtered = curve.filter_positive();
    assert_eq!(filtered.energy_mev, vec![5.0, 20.0]);
    assert_eq!(filtered.sigma_mb, vec![3.0, 7.0]);
    assert!(filtered.sigma_mb.iter().all(|&sigma| sigma > 0.0));
}

#[test]
fn repeated_length_evaluations_are_bitwise_identical() {
    let calc = calculator();
    let nuclide = Nuclide::new(28, 14);
    let gamma = 8.0e10 / 28.0;
    let first = calc
        .interaction_length(nuclide, gamma, XsModel::V2r4)
        .expect("length");
    let second = calc
        .interaction_length(nuclide, gamma, XsModel::V2r4)
        .expect("length");
    assert_eq!(first.to_bits(), second.to_bits());
}

#[test]
fn sweep_tables_survive_the_disk_round_trip() {
    let calc = calculator();
    let nuclide = Nuclide::new(16, 8);
    let table = calc.sweep(nuclide, XsModel::V2r4).expect("sweep");
    assert_eq!(table.len(), SWEEP_POINTS);

    let temp = TempDir::new().expect("tempdir");
    let path =
        write_length_table(temp.path(), nuclide, XsModel::V2r4, &table).expect("write table");
    let read_back = read_length_table(&path).expect("read table");

    assert_eq!(read_back.len(), table.len());
    for i in 0..table.len() {
        let energy_diff = (read_back.energy_ev[i] - table.energy_ev[i]).abs();
        assert!(energy_diff <= 1.0e-14 * table.energy_ev[i]);
        if table.length_mpc[i].is_finite() {
            let length_diff = (read_back.length_mpc[i] - table.length_mpc[i]).abs();
            assert!(length_diff <= 1.0e-14 * table.length_mpc[i].abs());
        }
    }
}

#[test]
fn difference_percentages_compare_sweeps_of_the_same_nuclide() {
    let calc = calculator();
    let nuclide = Nuclide::new(14, 7);
    let table = calc.sweep(nuclide, XsModel::V2r4).expect("sweep");

    // Stand in a second model with the same grid so no network is needed.
    let temp = TempDir::new().expect("tempdir");
    write_length_table(temp.path(), nuclide, XsModel::V2r4, &table).expect("v2r4 table");
    write_length_table(temp.path(), nuclide, XsModel::Tendl2023, &table).expect("stand-in table");

    let path = write_difference_percentage_table(temp.path(), nuclide).expect("differences");
    let differences = read_length_table(&path).expect("read differences");
    assert_eq!(differences.len(), table.len());
    for (&reference, &percent) in table.length_mpc.iter().zip(&differences.length_mpc) {
        if reference.is_finite() && reference > 0.0 {
            assert!(percent.abs() <= 1.0e-10, "identical sweeps must differ by 0%");
        } else {
            assert!(percent.is_nan());
        }
    }
}

#[test]
fn unknown_model_names_are_reported_verbatim() {
    let error = "TENDL-2021".parse::<XsModel>().expect_err("unknown model");
    match error {
        Error::UnknownModel(name) => assert_eq!(name, "TENDL-2021"),
        other => panic!("unexpected error {other:?}"),
    }
    // Model names are case-sensitive.
    assert!("V2R4".parse::<XsModel>().is_err());
}

#[test]
fn tendl_tables_parse_energy_and_sigma_pairs() {
    let source = "# gamma nonelastic\n# E sigma\n 1.2000e+01 4.5000e+00\n 1.3000e+01 9.2500e+00\nbroken line\n";
    let curve = parse_table(source);
    assert_eq!(curve.energy_mev, vec![12.0, 13.0]);
    assert_eq!(curve.sigma_mb, vec![4.5, 9.25]);
}

#[test]
fn absent_nuclides_are_rejected_with_their_numbers() {
    let table = V2r4Table::bundled().expect("bundled table");
    for (a, z) in [(3, 2), (238, 92)] {
        let error = table
            .channel_sum(Nuclide::new(a, z))
            .expect_err("absent nuclide");
        match error {
            Error::NoParameters { a: got_a, z: got_z } => {
                assert_eq!((got_a, got_z), (a, z));
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(
            error_message(a, z),
            format!("no data found for A = {a} and Z = {z}")
        );
    }
}

fn error_message(a: u32, z: u32) -> String {
    Error::NoParameters { a, z }.to_string()
}
