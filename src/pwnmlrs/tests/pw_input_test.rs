// pwnmlrs/tests/pw_input_test.rs

//! Integration test against a complete variable-cell relaxation input.

use pwnmlrs::{read, reads, writes, FortranValue, WriteOptions};

const FIXTURE: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/sio2_relax.in");

#[test]
fn test_parse_relax_input() {
    let deck = read(FIXTURE).expect("Failed to parse sio2_relax.in");

    let names: Vec<_> = deck.namelists.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["control", "system", "electrons", "ions", "cell"]);

    let control = deck.namelist("control").unwrap();
    assert_eq!(control.get("calculation"), Some(&FortranValue::character("vc-relax")));
    assert_eq!(control.get("etot_conv_thr"), Some(&FortranValue::Real(1.0e-5)));
    assert_eq!(control.get("tprnfor"), Some(&FortranValue::Logical(true)));
    assert_eq!(control.get("pseudo_dir"), Some(&FortranValue::character("$HOME/pseudo")));

    let system = deck.namelist("system").unwrap();
    assert_eq!(system.get("celldm(3)"), Some(&FortranValue::Real(1.1004)));
    assert_eq!(system.get("ecutrho"), Some(&FortranValue::Real(360.0)));
    assert_eq!(system.get("nat"), Some(&FortranValue::Integer(9)));

    let cards: Vec<_> = deck.cards.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(cards, vec!["atomic_species", "atomic_positions", "k_points"]);

    let positions = deck.card("atomic_positions").unwrap();
    assert_eq!(positions.subtitle.as_deref(), Some("crystal"));
    assert_eq!(positions.body.as_ref().unwrap().lines().count(), 9);

    let species = deck.card("atomic_species").unwrap();
    assert_eq!(species.body.as_ref().unwrap().lines().count(), 2);
}

#[test]
fn test_rewrite_is_stable() {
    let deck = read(FIXTURE).unwrap();
    let options = WriteOptions::default();

    let first = writes(&deck, &options);
    let second = writes(&reads(&first).unwrap(), &options);
    assert_eq!(first, second);

    let reread = reads(&first).unwrap();
    for (a, b) in deck.namelists.iter().zip(&reread.namelists) {
        assert_eq!(a.name, b.name);
        assert_eq!(a.entries, b.entries);
    }
    for (a, b) in deck.cards.iter().zip(&reread.cards) {
        assert_eq!((&a.name, &a.subtitle, &a.body), (&b.name, &b.subtitle, &b.body));
    }
}
