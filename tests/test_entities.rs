use sky_barrage::entities::*;
use sky_barrage::geometry::Rect;

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-5
}

// ── Facing ────────────────────────────────────────────────────────────────────

#[test]
fn facing_from_signs_all_eight() {
    assert_eq!(Facing::from_signs(1, 0), Some(Facing::East));
    assert_eq!(Facing::from_signs(1, -1), Some(Facing::NorthEast));
    assert_eq!(Facing::from_signs(0, -1), Some(Facing::North));
    assert_eq!(Facing::from_signs(-1, -1), Some(Facing::NorthWest));
    assert_eq!(Facing::from_signs(-1, 0), Some(Facing::West));
    assert_eq!(Facing::from_signs(-1, 1), Some(Facing::SouthWest));
    assert_eq!(Facing::from_signs(0, 1), Some(Facing::South));
    assert_eq!(Facing::from_signs(1, 1), Some(Facing::SouthEast));
}

#[test]
fn facing_from_signs_zero_is_none() {
    assert_eq!(Facing::from_signs(0, 0), None);
}

#[test]
fn facing_from_signs_snaps_magnitudes() {
    // Only the signs matter
    assert_eq!(Facing::from_signs(3, 0), Some(Facing::East));
    assert_eq!(Facing::from_signs(-2, 5), Some(Facing::SouthWest));
}

#[test]
fn facing_unit_vectors_are_unit_length() {
    for f in Facing::ALL {
        assert!(approx(f.unit().len(), 1.0), "{f:?} is not unit length");
    }
}

#[test]
fn facing_angle_agrees_with_unit_vector() {
    // angle is math-convention (y-up); unit() is in screen coordinates,
    // so vy carries the opposite sign of sin
    for f in Facing::ALL {
        let rad = f.angle_deg().to_radians();
        let unit = f.unit();
        assert!(approx(unit.x, rad.cos()), "{f:?} x mismatch");
        assert!(approx(unit.y, -rad.sin()), "{f:?} y mismatch");
    }
}

#[test]
fn facing_angles_cover_45_degree_steps() {
    let mut angles: Vec<f32> = Facing::ALL.iter().map(|f| f.angle_deg()).collect();
    angles.sort_by(|a, b| a.partial_cmp(b).unwrap());
    for (i, a) in angles.iter().enumerate() {
        assert!(approx(*a, 45.0 * i as f32));
    }
}

// ── Master state ──────────────────────────────────────────────────────────────

#[test]
fn game_state_clone_is_independent() {
    let original = GameState {
        player: Player {
            rect: Rect::new(50.0, 15.0, 1.0, 1.0),
            facing: Facing::East,
            base_speed: 0.8,
            look: Look::Directional,
        },
        enemies: Vec::new(),
        bombs: Vec::new(),
        beams: Vec::new(),
        explosions: Vec::new(),
        area_effect: None,
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        width: 100,
        height: 30,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.rect.cx = 99.0;
    cloned.score = 999;
    cloned.enemies.push(Enemy {
        rect: Rect::new(5.0, 0.0, 3.0, 1.0),
        vy: 0.2,
        bound: 5.0,
        state: DescentState::Descending,
        interval: 60,
    });
    cloned.area_effect = Some(AreaEffect { life: 400 });

    assert!(approx(original.player.rect.cx, 50.0));
    assert_eq!(original.score, 0);
    assert!(original.enemies.is_empty());
    assert!(original.area_effect.is_none());
}

#[test]
fn entity_enum_equality() {
    assert_eq!(DescentState::Descending, DescentState::Descending);
    assert_ne!(DescentState::Descending, DescentState::Stopped);
    assert_eq!(Look::Happy, Look::Happy);
    assert_ne!(Look::Happy, Look::Sad);
    assert_eq!(GameStatus::Playing, GameStatus::Playing);
    assert_ne!(GameStatus::Playing, GameStatus::GameOver);
    assert_eq!(BombColor::ALL.len(), 6);
}
