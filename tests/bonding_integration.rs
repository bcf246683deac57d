//! Bonding engine integration tests
//!
//! End-to-end scenarios through the public engine surface: catalog in,
//! placements in, molecules and stat changes out.

use hexbond::board::{Board, HexCoord};
use hexbond::bonding::{BondEngine, BondEventType, BondingState, Unit};
use hexbond::catalog::{BondType, Recipe, RecipeCatalog, Requirement};
use hexbond::core::types::{PlayerId, Stats, UnitId};
use hexbond::core::BondConfig;

fn req(species: &str, count: u32) -> Requirement {
    Requirement {
        species: species.into(),
        count,
    }
}

fn catalog() -> RecipeCatalog {
    RecipeCatalog::new(vec![
        Recipe {
            name: "Water".into(),
            core: "O".into(),
            requires: vec![req("H", 2)],
            bond_type: BondType::Covalent,
            hp_multiplier: 1.5,
            damage_multiplier: 1.2,
        },
        Recipe {
            name: "Salt".into(),
            core: "Na".into(),
            requires: vec![req("Cl", 1)],
            bond_type: BondType::Ionic,
            hp_multiplier: 1.0,
            damage_multiplier: 1.0,
        },
        Recipe {
            name: "Steel".into(),
            core: "Fe".into(),
            requires: vec![req("C", 2)],
            bond_type: BondType::Metallic,
            hp_multiplier: 1.0,
            damage_multiplier: 1.0,
        },
        Recipe {
            name: "Methane".into(),
            core: "C".into(),
            requires: vec![req("H", 4)],
            bond_type: BondType::Covalent,
            hp_multiplier: 2.0,
            damage_multiplier: 1.5,
        },
    ])
}

fn setup() -> (Board, PlayerId, BondEngine) {
    let mut board = Board::new(7, 4);
    let player = PlayerId(0);
    board.add_player(player);
    (board, player, BondEngine::new(catalog(), BondConfig::default()))
}

fn place(board: &mut Board, player: PlayerId, species: &str, q: i32, r: i32) -> UnitId {
    place_with(board, player, species, q, r, Stats::new(100.0, 10.0, 1))
}

fn place_with(
    board: &mut Board,
    player: PlayerId,
    species: &str,
    q: i32,
    r: i32,
    stats: Stats,
) -> UnitId {
    let id = board.spawn_unit(Unit::new(species, player, stats)).unwrap();
    board.place_unit(id, HexCoord::new(q, r)).unwrap();
    id
}

#[test]
fn water_scenario() {
    let (mut board, player, mut engine) = setup();
    let o = place(&mut board, player, "O", 0, 0);
    let h1 = place(&mut board, player, "H", 1, 0);
    let h2 = place(&mut board, player, "H", 0, 1);

    let events = engine.match_all(&mut board);

    assert_eq!(events.formed().len(), 1);
    let partition = engine.partition();
    assert_eq!(partition.len(), 1);
    let (recipe, core, components) = &partition[0];
    assert_eq!(recipe, "Water");
    assert_eq!(*core, o);
    assert_eq!(*components, vec![h1, h2]);

    // Both H bonded, nobody double-counted
    for h in [h1, h2] {
        assert!(matches!(
            board.unit(h).unwrap().bonding,
            BondingState::Bonded(_)
        ));
    }
}

#[test]
fn incomplete_methane_scenario() {
    let (mut board, player, mut engine) = setup();
    let c = place(&mut board, player, "C", 1, 1);
    place(&mut board, player, "H", 2, 1);
    place(&mut board, player, "H", 1, 2);
    place(&mut board, player, "H", 0, 1);

    let events = engine.match_all(&mut board);

    // 3 of 4 hydrogens: no molecule, partial buff at ratio 0.75
    assert!(!events
        .formed()
        .iter()
        .any(|id| engine.molecule(*id).map(|m| m.recipe.name == "Methane") == Some(true)));
    let core = board.unit(c).unwrap();
    assert!(core.bonding.is_free());
    // hp: 1 + (2.0 - 1) * 0.75 * 0.5 = 1.375; damage: 1 + 0.5 * 0.375 = 1.1875
    assert!((core.max_hp - 137.5).abs() < 1e-3);
    assert!((core.damage - 11.875).abs() < 1e-3);
}

#[test]
fn metallic_pool_scenario() {
    let (mut board, player, mut engine) = setup();
    let fe = place(&mut board, player, "Fe", 1, 1);
    let c1 = place(&mut board, player, "C", 2, 1);
    let c2 = place(&mut board, player, "C", 1, 2);

    engine.match_all(&mut board);
    let id = engine.molecule_of(fe).unwrap();
    assert_eq!(engine.molecule(id).unwrap().pool, Some(300.0));

    engine.apply_damage(&mut board, c2, 150.0);
    assert_eq!(engine.molecule(id).unwrap().pool, Some(150.0));
    for unit in [fe, c1, c2] {
        assert_eq!(board.unit(unit).unwrap().hp, 50.0);
    }
}

#[test]
fn covalent_break_on_core_death() {
    let (mut board, player, mut engine) = setup();
    let o = place(&mut board, player, "O", 0, 0);
    let h1 = place_with(&mut board, player, "H", 1, 0, Stats::new(40.0, 4.0, 1));
    let h2 = place_with(&mut board, player, "H", 0, 1, Stats::new(40.0, 4.0, 1));

    engine.match_all(&mut board);
    assert!(!board.unit(h1).unwrap().active); // merged away

    // Kill the core; death notification fires inside apply_damage
    let merged_hp = board.unit(o).unwrap().hp;
    let report = engine.apply_damage(&mut board, o, merged_hp + 1.0);
    assert!(report.killed);

    assert_eq!(engine.molecule_count(), 0);
    for h in [h1, h2] {
        let unit = board.unit(h).unwrap();
        assert!(unit.active, "components reactivate on break");
        assert!(unit.bonding.is_free());
        assert_eq!(unit.max_hp, 40.0, "pre-bond base stats restored");
        assert_eq!(unit.damage, 4.0);
    }
}

#[test]
fn break_all_frees_everything() {
    let (mut board, player, mut engine) = setup();
    place(&mut board, player, "O", 0, 0);
    place(&mut board, player, "H", 1, 0);
    place(&mut board, player, "H", 0, 1);
    let na = place(&mut board, player, "Na", 4, 2);
    place(&mut board, player, "Cl", 5, 2);

    engine.match_all(&mut board);
    assert_eq!(engine.molecule_count(), 2);

    let events = engine.break_all(&mut board);
    assert_eq!(events.broken().len(), 2);
    assert_eq!(engine.molecule_count(), 0);
    assert!(board.unit(na).unwrap().damage_reduction.abs() < 1e-6);
    for player in board.players() {
        for id in board.units_in_scan_order(player) {
            assert!(board.unit(id).unwrap().bonding.is_free());
        }
    }
}

#[test]
fn two_sides_bond_independently() {
    let (mut board, player, mut engine) = setup();
    let enemy = PlayerId(1);
    board.add_player(enemy);

    place(&mut board, player, "O", 0, 0);
    place(&mut board, player, "H", 1, 0);
    // Enemy H at the mirrored cell must not complete the friendly recipe
    let eh = board
        .spawn_unit(Unit::new("H", enemy, Stats::default()))
        .unwrap();
    board.place_unit(eh, HexCoord::new(0, 1)).unwrap();

    let events = engine.match_all(&mut board);
    assert!(events.formed().is_empty());
}

#[test]
fn incremental_placement_flow() {
    let (mut board, player, mut engine) = setup();
    let o = place(&mut board, player, "O", 1, 1);
    let h1 = place(&mut board, player, "H", 2, 1);

    let events = engine.match_for_unit(&mut board, h1);
    assert!(events.formed().is_empty());

    let h2 = place(&mut board, player, "H", 1, 2);
    let events = engine.match_for_unit(&mut board, h2);
    assert_eq!(events.formed().len(), 1);
    assert_eq!(engine.molecule_of(o), engine.molecule_of(h2));

    // A later full recompute reproduces the same grouping
    let events = engine.match_all(&mut board);
    assert_eq!(events.formed().len(), 1);
    assert_eq!(engine.partition()[0].1, o);
}

#[test]
fn partial_buffs_compound_on_repeated_incremental_triggers() {
    let (mut board, player, mut engine) = setup();
    let c = place(&mut board, player, "C", 1, 1);
    let h = place(&mut board, player, "H", 2, 1);

    let before = board.unit(c).unwrap().max_hp;
    engine.match_for_unit(&mut board, h);
    let once = board.unit(c).unwrap().max_hp;
    engine.match_for_unit(&mut board, h);
    let twice = board.unit(c).unwrap().max_hp;

    let factor = once / before;
    assert!(factor > 1.0);
    assert!((twice / once - factor).abs() < 1e-4, "uncapped compounding");
}

#[test]
fn unit_death_events_reported() {
    let (mut board, player, mut engine) = setup();
    let h = place(&mut board, player, "H", 0, 0);
    let report = engine.apply_damage(&mut board, h, 500.0);
    assert!(report.killed);
    assert!(report
        .events
        .events
        .iter()
        .any(|e| matches!(e.event_type, BondEventType::UnitDied { unit_id } if unit_id == h)));
}
