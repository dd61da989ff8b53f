use space_invaders::entities::*;

fn make_player() -> Player {
    // 3 energy, 100 charge, 30 cells/s
    Player::new(10.0, 20.0, 3, 100, 30.0)
}

// ── Tags ──────────────────────────────────────────────────────────────────────

#[test]
fn tag_enums_compare() {
    assert_eq!(EnemyKind::Spacecraft, EnemyKind::Spacecraft);
    assert_ne!(EnemyKind::Spacecraft, EnemyKind::Octopus);
    assert_ne!(Owner::Player, Owner::Enemy);
    assert_ne!(Level::Easy, Level::Hard);
}

#[test]
fn level_from_index_clamps() {
    assert_eq!(Level::from_index(0), Level::Easy);
    assert_eq!(Level::from_index(1), Level::Medium);
    assert_eq!(Level::from_index(2), Level::Hard);
    assert_eq!(Level::from_index(99), Level::Hard);
}

#[test]
fn level_labels() {
    let labels: Vec<_> = Level::ALL.iter().map(|l| l.label()).collect();
    assert_eq!(labels, vec!["Easy", "Medium", "Hard"]);
}

// ── Bounds ────────────────────────────────────────────────────────────────────

#[test]
fn bounds_edges_and_center() {
    let b = Bounds::new(2.0, 4.0, 3.0, 2.0);
    assert_eq!(b.left(), 2.0);
    assert_eq!(b.right(), 5.0);
    assert_eq!(b.top(), 4.0);
    assert_eq!(b.bottom(), 6.0);
    assert_eq!(b.center(), (3.5, 5.0));
}

#[test]
fn bounds_centered_round_trips_center() {
    let b = Bounds::centered(10.0, 10.0, 4.0, 2.0);
    assert_eq!(b.x, 8.0);
    assert_eq!(b.y, 9.0);
    assert_eq!(b.center(), (10.0, 10.0));
}

#[test]
fn bounds_overlap_intersects() {
    let a = Bounds::new(0.0, 0.0, 3.0, 2.0);
    let b = Bounds::new(2.0, 1.0, 3.0, 2.0);
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
}

#[test]
fn bounds_touching_edges_do_not_intersect() {
    let a = Bounds::new(0.0, 0.0, 3.0, 2.0);
    let right = Bounds::new(3.0, 0.0, 1.0, 1.0);
    let below = Bounds::new(0.0, 2.0, 1.0, 1.0);
    assert!(!a.intersects(&right));
    assert!(!a.intersects(&below));
}

#[test]
fn bounds_translated_keeps_size() {
    let b = Bounds::new(1.0, 1.0, 3.0, 2.0).translated(2.0, -1.0);
    assert_eq!(b, Bounds::new(3.0, 0.0, 3.0, 2.0));
}

#[test]
fn bounds_union_covers_both() {
    let a = Bounds::new(2.0, 5.0, 1.0, 1.0);
    let b = Bounds::new(4.0, 1.0, 2.0, 1.0);
    assert_eq!(a.union(&b), Bounds::new(2.0, 1.0, 4.0, 5.0));
    assert_eq!(a.union(&a), a);
}

// ── Player ────────────────────────────────────────────────────────────────────

#[test]
fn player_starts_full() {
    let p = make_player();
    assert!(p.alive);
    assert_eq!(p.energy, 3);
    assert_eq!(p.max_energy, 3);
    assert_eq!(p.charge, 100);
    assert_eq!(p.bounds.w, PLAYER_W);
    assert_eq!(p.bounds.h, PLAYER_H);
}

#[test]
fn player_moves_with_direction() {
    let mut p = make_player();
    p.update(0.1, 1, 60.0);
    assert_eq!(p.bounds.x, 13.0);
    p.update(0.1, -1, 60.0);
    assert_eq!(p.bounds.x, 10.0);
    p.update(0.1, 0, 60.0);
    assert_eq!(p.bounds.x, 10.0);
}

#[test]
fn player_clamps_at_left_edge() {
    let mut p = make_player();
    p.bounds.x = 1.0;
    p.update(1.0, -1, 60.0);
    assert_eq!(p.bounds.x, 0.0);
}

#[test]
fn player_clamps_at_right_edge() {
    let mut p = make_player();
    p.bounds.x = 55.0;
    p.update(1.0, 1, 60.0);
    assert_eq!(p.bounds.x, 57.0); // width - PLAYER_W, never wrapped
}

#[test]
fn player_update_regenerates_charge_up_to_max() {
    let mut p = make_player();
    p.charge = 98;
    p.update(0.1, 0, 60.0);
    assert_eq!(p.charge, 99);
    p.update(0.1, 0, 60.0);
    p.update(0.1, 0, 60.0);
    assert_eq!(p.charge, 100);
}

#[test]
fn player_update_ticks_cooldown_to_zero() {
    let mut p = make_player();
    p.fire_cooldown = 0.15;
    p.update(0.1, 0, 60.0);
    assert!(p.fire_cooldown > 0.0);
    p.update(0.1, 0, 60.0);
    assert_eq!(p.fire_cooldown, 0.0);
}

#[test]
fn dead_player_does_not_move() {
    let mut p = make_player();
    p.alive = false;
    p.update(1.0, 1, 60.0);
    assert_eq!(p.bounds.x, 10.0);
}

#[test]
fn take_damage_reduces_energy() {
    let mut p = make_player();
    p.take_damage(1);
    assert_eq!(p.energy, 2);
    assert!(p.alive);
}

#[test]
fn take_damage_saturates_and_kills() {
    let mut p = make_player();
    p.take_damage(10);
    assert_eq!(p.energy, 0);
    assert!(!p.alive);
}

#[test]
fn can_fire_needs_charge_and_cooldown() {
    let mut p = make_player();
    assert!(p.can_fire(15));
    assert!(!p.can_fire(101));
    p.fire_cooldown = 0.1;
    assert!(!p.can_fire(15));
    p.fire_cooldown = 0.0;
    p.alive = false;
    assert!(!p.can_fire(15));
}

#[test]
fn muzzle_is_above_the_nose() {
    let p = make_player();
    assert_eq!(p.muzzle(), (11.5, 19.0));
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[test]
fn enemy_update_only_ticks_cooldown() {
    let mut e = Enemy::new(5.0, 5.0, EnemyKind::Octopus, (0, 2));
    e.fire_cooldown = 1.0;
    e.update(0.25);
    assert_eq!(e.fire_cooldown, 0.75);
    assert_eq!(e.bounds.x, 5.0);
    assert_eq!(e.bounds.y, 5.0);
    assert_eq!(e.slot, (0, 2));
}

// ── Projectile ────────────────────────────────────────────────────────────────

#[test]
fn projectile_is_centred_on_muzzle() {
    let p = Projectile::new(11.5, 19.0, (0.0, -30.0), Owner::Player, 1);
    assert_eq!(p.bounds.x, 11.0);
    assert_eq!(p.bounds.y, 19.0);
    assert_eq!(p.bounds.w, PROJECTILE_W);
}

#[test]
fn projectile_moves_linearly() {
    let mut p = Projectile::new(10.5, 10.0, (0.0, 10.0), Owner::Enemy, 1);
    p.update(0.5, 60.0, 24.0);
    assert_eq!(p.bounds.y, 15.0);
    p.update(0.5, 60.0, 24.0);
    assert_eq!(p.bounds.y, 20.0);
    assert!(p.alive);
}

#[test]
fn projectile_swept_covers_the_last_step() {
    let mut p = Projectile::new(10.5, 10.0, (0.0, 10.0), Owner::Enemy, 1);
    assert_eq!(p.swept, p.bounds);
    p.update(0.5, 60.0, 24.0);
    assert_eq!(p.swept, Bounds::new(10.0, 10.0, 1.0, 6.0));
}

#[test]
fn projectile_dies_leaving_the_top() {
    let mut p = Projectile::new(10.5, 0.0, (0.0, -30.0), Owner::Player, 1);
    p.update(0.5, 60.0, 24.0);
    assert!(!p.alive);
}

#[test]
fn projectile_dies_leaving_the_bottom() {
    let mut p = Projectile::new(10.5, 23.0, (0.0, 15.0), Owner::Enemy, 1);
    p.update(0.05, 60.0, 24.0);
    assert!(p.alive); // still partly inside
    p.update(0.05, 60.0, 24.0);
    assert!(!p.alive);
}

// ── Explosion ─────────────────────────────────────────────────────────────────

#[test]
fn explosion_counts_down_then_dies() {
    let mut e = Explosion::new(10.0, 10.0, 2);
    assert!(e.alive);
    e.update();
    assert!(e.alive);
    e.update();
    assert!(!e.alive);
    e.update();
    assert_eq!(e.frames_left, 0);
}

#[test]
fn zero_frame_explosion_is_born_dead() {
    let e = Explosion::new(10.0, 10.0, 0);
    assert!(!e.alive);
}

#[test]
fn explosion_is_centred() {
    let e = Explosion::new(10.0, 10.0, 4);
    assert_eq!(e.bounds.center(), (10.0, 10.0));
}
