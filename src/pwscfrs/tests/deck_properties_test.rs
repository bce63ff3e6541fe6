// pwscfrs/tests/deck_properties_test.rs

use pwscfrs::registry::merge_cards;
use pwscfrs::{DeckError, Pwscf, Registration, Schema, Specie, Structure, WriteOptions};
use std::path::{Path, PathBuf};

fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn always_found(pseudo: &str, _: Option<&str>) -> Option<PathBuf> {
    Some(PathBuf::from(pseudo))
}

fn cubic(kinds: &[&str]) -> Structure {
    let mut structure = Structure::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
        .with_scale(5.0);
    for (i, kind) in kinds.iter().enumerate() {
        structure.add_atom(*kind, [0.1 * i as f64, 0.0, 0.0]);
    }
    structure
}

fn assert_same_sections(a: &Pwscf, b: &Pwscf) {
    assert_eq!(
        a.sections().effective_namelists(),
        b.sections().effective_namelists()
    );
    let cards_a = a.sections().effective_cards().unwrap();
    let cards_b = b.sections().effective_cards().unwrap();
    assert_eq!(cards_a.len(), cards_b.len());
    for (x, y) in cards_a.iter().zip(&cards_b) {
        assert!(x.same_content(y), "{:?} != {:?}", x, y);
    }
}

#[test]
fn test_round_trip() {
    let original = Pwscf::from_path(fixture("si.scf.in")).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("si.scf.in");
    original
        .write_to_path(&path, None, &WriteOptions::default())
        .unwrap();
    let reread = Pwscf::from_path(&path).unwrap();

    assert_same_sections(&original, &reread);
}

#[test]
fn test_round_trip_after_edits() {
    let mut deck = Pwscf::new();
    deck.schema_mut().control.set("calculation", "bands").unwrap();
    deck.schema_mut().control.set("title", "it's a test / with slash").unwrap();
    deck.schema_mut().system.set("starting_magnetization(1)", 0.5).unwrap();
    deck.schema_mut().electrons.set("conv_thr", 1e-10).unwrap();
    deck.add_namelist("cell", [("press", 1.5)]).unwrap();
    deck.add_card("constraints", Some("1\n'distance' 1 2 2.0"), None)
        .unwrap();
    deck.add_card("kpoints", Some("0.0 0.0 0.0 1.0"), Some("tpiba"))
        .unwrap();

    let text = deck.write(None, &WriteOptions::default()).unwrap();
    let mut reread = Pwscf::new();
    reread.read_str(&text, true).unwrap();

    assert_same_sections(&deck, &reread);
}

#[test]
fn test_write_is_idempotent() {
    let mut deck = Pwscf::from_path(fixture("si.scf.in")).unwrap();
    deck.add_specie("Si", "Si.pz-vbc.UPF");
    let structure = cubic(&["Si", "Si"]);
    let options = WriteOptions::default();

    let first = deck
        .write_with_locator(Some(&structure), &options, &always_found)
        .unwrap();
    let second = deck
        .write_with_locator(Some(&structure), &options, &always_found)
        .unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_schema_priority() {
    let deck = Pwscf::from_path(fixture("si.scf.in")).unwrap();
    let raw = pwnmlrs::read(fixture("si.scf.in")).unwrap();

    for name in ["control", "system", "electrons"] {
        let record = raw.namelist(name).unwrap();
        let field = deck.schema().namelist(name).unwrap();
        for (key, value) in &record.entries {
            assert_eq!(field.get(key).unwrap(), value, "{}.{}", name, key);
        }
        assert_eq!(field.len(), record.entries.len());
        assert!(!deck.sections().extension_namelists().contains_key(name));
    }
    assert_eq!(deck.schema().k_points.subtitle.as_deref(), Some("automatic"));
    assert!(!deck.sections().extension_cards().contains_key("k_points"));
    assert!(deck.sections().extension_namelists().contains_key("ions"));
}

#[test]
fn test_round_trip_of_every_extension_card() {
    let mut deck = Pwscf::new();
    deck.add_card("k_points", Some("4 4 4 0 0 0"), Some("automatic"))
        .unwrap();
    deck.add_card("hubbard", Some("U Fe-3d 5.0"), Some("ortho-atomic"))
        .unwrap();
    deck.add_card("additional_k_points", Some("2\n0.0 0.0 0.0\n0.5 0.5 0.5"), Some("tpiba_b"))
        .unwrap();
    deck.add_card("solvents", Some("H2O 1.0 H2O.MOL"), Some("1/cell"))
        .unwrap();

    let text = deck.write(None, &WriteOptions::default()).unwrap();
    let mut reread = Pwscf::new();
    reread.read_str(&text, true).unwrap();

    assert_same_sections(&deck, &reread);
    assert_eq!(
        reread.schema().k_points.body().as_deref(),
        Some("4 4 4 0 0 0")
    );
    let names: Vec<_> = reread.sections().extension_cards().keys().cloned().collect();
    assert_eq!(names, vec!["hubbard", "additional_k_points", "solvents"]);
}

#[test]
fn test_unreadable_card_names_are_refused() {
    let mut deck = Pwscf::new();
    deck.add_card("k_points", Some("4 4 4 0 0 0"), Some("automatic"))
        .unwrap();
    assert!(matches!(
        deck.add_card("my_block", Some("1 2 3"), None),
        Err(DeckError::UnknownCard(ref name)) if name == "my_block"
    ));

    let text = deck.write(None, &WriteOptions::default()).unwrap();
    assert!(!text.contains("MY_BLOCK"));
    assert!(deck.sections().extension_cards().is_empty());
}

#[test]
fn test_duplicate_cards_are_rejected() {
    let mut from_file = Pwscf::from_path(fixture("si.scf.in")).unwrap();
    let mut edited = Pwscf::new();
    edited.add_card("occupations", Some("1.0 1.0"), None).unwrap();

    let file_cards = from_file.sections().effective_cards().unwrap();
    let edited_cards = edited.sections().extension_cards().values().cloned();
    assert!(matches!(
        merge_cards(file_cards.into_iter().chain(edited_cards)),
        Err(DeckError::DuplicateCard(ref name)) if name == "occupations"
    ));

    // neither source loses its card
    assert!(from_file.card("occupations").is_ok());
    assert_eq!(
        edited.card("occupations").unwrap().body().as_deref(),
        Some("1.0 1.0")
    );

    // registering again replaces instead of duplicating
    from_file.add_card("OCCUPATIONS", Some("2.0 2.0"), None).unwrap();
    let cards = from_file.sections().effective_cards().unwrap();
    assert_eq!(cards.iter().filter(|c| c.name() == "occupations").count(), 1);
}

#[test]
fn test_namelist_card_collisions() {
    let mut deck = Pwscf::new();
    deck.add_card("occupations", Some("2.0"), None).unwrap();
    assert!(matches!(
        deck.add_namelist("occupations", [("x", 1)]),
        Err(DeckError::NameCollision { .. })
    ));
    assert!(matches!(
        deck.add_card("control", Some("x"), None),
        Err(DeckError::NameCollision { .. })
    ));
    assert_eq!(deck.card("occupations").unwrap().body().as_deref(), Some("2.0"));
}

#[test]
fn test_reserved_card_is_discarded_on_read() {
    let deck = Pwscf::from_path(fixture("si.scf.in")).unwrap();
    assert!(!deck.sections().extension_cards().contains_key("atomic_species"));
    assert!(deck.card("atomic_species").is_err());
    let names: Vec<_> = deck.sections().extension_cards().keys().cloned().collect();
    assert_eq!(names, vec!["atomic_positions", "occupations"]);

    let mut deck = Pwscf::new();
    assert_eq!(
        deck.add_card("atomic_species", Some("Si 28.0 Si.upf"), None)
            .unwrap(),
        Registration::Ignored
    );
}

#[test]
fn test_species_in_first_seen_order() {
    let mut deck = Pwscf::new();
    deck.add_specie("Si", "pseudoA");
    deck.add_specie("O", "pseudoB");
    let text = deck
        .write_with_locator(
            Some(&cubic(&["Si", "O", "Si"])),
            &WriteOptions::default(),
            &always_found,
        )
        .unwrap();

    let species: Vec<&str> = text
        .lines()
        .skip_while(|l| *l != "ATOMIC_SPECIES")
        .skip(1)
        .collect();
    assert_eq!(species, vec!["Si 28.085 pseudoA", "O 15.999 pseudoB"]);
}

#[test]
fn test_missing_specie_produces_no_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fe.in");
    let deck = Pwscf::new();

    let err = deck
        .write_to_path_with_locator(
            &path,
            Some(&cubic(&["Fe"])),
            &WriteOptions::default(),
            &always_found,
        )
        .unwrap_err();
    assert!(matches!(err, DeckError::MissingSpecies(ref label) if label == "Fe"));
    assert!(err.to_string().contains("Fe"));
    assert!(!path.exists());
}

#[test]
fn test_missing_pseudopotential_on_disk() {
    let mut deck = Pwscf::new();
    deck.schema_mut()
        .control
        .set("pseudo_dir", fixture("pseudo").to_string_lossy().to_string())
        .unwrap();
    deck.add_specie("Si", "Si.pz-vbc.UPF");
    deck.add_specie("O", Specie::new("O.pz-mt.UPF").with_mass(16.0));

    let ok = deck.write(Some(&cubic(&["Si"])), &WriteOptions::default());
    assert!(ok.unwrap().contains("Si 28.085 Si.pz-vbc.UPF"));

    let err = deck
        .write(Some(&cubic(&["Si", "O"])), &WriteOptions::default())
        .unwrap_err();
    assert!(matches!(
        err,
        DeckError::MissingPseudopotential { ref specie, .. } if specie == "O"
    ));
}

#[test]
fn test_clear_on_empty_file() {
    let dir = tempfile::tempdir().unwrap();
    let empty = dir.path().join("empty.in");
    fs_err::write(&empty, "").unwrap();

    let mut deck = Pwscf::from_path(fixture("si.scf.in")).unwrap();
    deck.read(&empty, true).unwrap();

    for field in pwscfrs::PwscfSchema::fields() {
        let section = deck.sections().resolve(field.name).unwrap();
        match (section.as_namelist(), section.as_card()) {
            (Some(namelist), None) => assert!(namelist.is_empty(), "{}", field.name),
            (None, Some(card)) => assert!(card.is_empty(), "{}", field.name),
            _ => panic!("{} resolved to neither a namelist nor a card", field.name),
        }
    }
    assert!(deck.sections().extension_namelists().is_empty());
    assert!(deck.sections().extension_cards().is_empty());
}
