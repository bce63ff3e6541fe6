// pwscfrs/tests/job_config_test.rs

use pwscfrs::cli::{generate_deck, normalize_deck, DeckSummary};
use pwscfrs::{FortranValue, JobConfig, Pwscf, WriteOptions};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn in_fixtures(pseudo: &str, _: Option<&str>) -> Option<PathBuf> {
    Some(fixture("pseudo").join(pseudo)).filter(|p| p.is_file())
}

#[test]
fn test_job_applies_overrides_on_template() {
    let config = JobConfig::try_from(&fixture("silicon.yml")).unwrap();
    let deck = config.build_deck().unwrap();

    let control = &deck.schema().control;
    assert_eq!(control.get("calculation").unwrap().as_str(), Some("relax"));
    assert_eq!(control.get("prefix").unwrap().as_str(), Some("silicon"));
    assert_eq!(
        deck.namelist("ions").unwrap().get("ion_dynamics").unwrap(),
        &FortranValue::character("bfgs")
    );
    assert_eq!(
        deck.schema().k_points.body().as_deref(),
        Some("6 6 6 1 1 1")
    );

    let text = deck
        .write_with_locator(config.structure(), &WriteOptions::default(), &in_fixtures)
        .unwrap();
    assert!(text.contains("    ibrav = 0\n"));
    assert!(!text.contains("celldm"));
    assert!(text.ends_with("ATOMIC_SPECIES\nSi 28.085 Si.pz-vbc.UPF\n"));

    let mut reread = Pwscf::new();
    reread.read_str(&text, true).unwrap();
    assert_eq!(
        reread.schema().system.get("nat").unwrap(),
        &FortranValue::Integer(2)
    );
    assert!(reread.sections().extension_cards().contains_key("cell_parameters"));
}

#[test]
fn test_generate_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    fs_err::create_dir(dir.path().join("pseudo")).unwrap();
    fs_err::write(dir.path().join("pseudo").join("H.pbe.UPF"), "<UPF/>").unwrap();
    let job = dir.path().join("h2.yml");
    fs_err::write(
        &job,
        format!(
            "pseudo_dir: {}\nspecies:\n  H: H.pbe.UPF\noutput: h2.in\nstructure:\n  cell: [[10.0, 0.0, 0.0], [0.0, 10.0, 0.0], [0.0, 0.0, 10.0]]\n  atoms:\n    - {{kind: H, position: [0.0, 0.0, 0.0]}}\n    - {{kind: H, position: [0.74, 0.0, 0.0]}}\n",
            dir.path().join("pseudo").display()
        ),
    )
    .unwrap();

    generate_deck(&job, None).unwrap();

    let written = fs_err::read_to_string(dir.path().join("h2.in")).unwrap();
    assert!(written.contains("    nat = 2\n"));
    assert!(written.contains("ATOMIC_SPECIES\nH 1.008 H.pbe.UPF\n"));
}

#[test]
fn test_generate_missing_specie_fails() {
    let dir = tempfile::tempdir().unwrap();
    let job = dir.path().join("fe.yml");
    fs_err::write(
        &job,
        "structure:\n  cell: [[2.8, 0.0, 0.0], [0.0, 2.8, 0.0], [0.0, 0.0, 2.8]]\n  atoms:\n    - {kind: Fe, position: [0.0, 0.0, 0.0]}\n",
    )
    .unwrap();
    let output = dir.path().join("fe.in");

    let err = generate_deck(&job, Some(&output)).unwrap_err();
    assert!(format!("{:#}", err).contains("No specie defined for Fe"));
    assert!(!output.exists());
}

#[test]
fn test_normalize_keeps_file_species() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("si.in");
    normalize_deck(&fixture("si.scf.in"), Some(&output)).unwrap();

    let text = fs_err::read_to_string(&output).unwrap();
    assert!(text.starts_with("&CONTROL\n"));
    assert!(text.contains("ATOMIC_SPECIES\n Si  28.086  Si.pz-vbc.UPF\n"));
    assert!(text.contains("ATOMIC_POSITIONS alat\n"));

    let original = Pwscf::from_path(fixture("si.scf.in")).unwrap();
    let normalized = Pwscf::from_path(&output).unwrap();
    assert_eq!(
        original.sections().effective_namelists(),
        normalized.sections().effective_namelists()
    );
}

#[test]
fn test_summary_of_fixture() {
    let deck = Pwscf::from_path(fixture("si.scf.in")).unwrap();
    let summary = DeckSummary::new(&fixture("si.scf.in"), &deck).unwrap();
    let cards: Vec<_> = summary
        .cards
        .iter()
        .map(|c| (c.name.as_str(), c.extension))
        .collect();
    assert_eq!(
        cards,
        vec![
            ("k_points", false),
            ("atomic_positions", true),
            ("occupations", true),
        ]
    );
}
