use space_invaders::compute::*;
use space_invaders::entities::*;

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn make_player() -> Player {
    spawn_player(60.0, 24.0, 3, &params_for(Level::Medium))
}

fn player_shot(x: f32, y: f32) -> Projectile {
    Projectile::new(x, y, (0.0, -30.0), Owner::Player, 1)
}

// ── params_for ────────────────────────────────────────────────────────────────

#[test]
fn harder_levels_are_harsher() {
    let easy = params_for(Level::Easy);
    let medium = params_for(Level::Medium);
    let hard = params_for(Level::Hard);

    assert!(easy.enemy_base_speed < medium.enemy_base_speed);
    assert!(medium.enemy_base_speed < hard.enemy_base_speed);
    assert!(easy.enemy_fire_chance < hard.enemy_fire_chance);
    assert!(easy.max_charge > hard.max_charge);
    assert!(easy.shot_cost < hard.shot_cost);
    assert_eq!(hard.enemy_damage, 2);
}

#[test]
fn shared_params_do_not_depend_on_level() {
    for level in Level::ALL {
        let p = params_for(level);
        assert_eq!(p.max_player_shots, 3);
        assert_eq!(p.projectile_damage, 1);
        assert_eq!(p.enemy_max_speed, 30.0);
        assert!(p.enemy_fire_chance > 0.0 && p.enemy_fire_chance < 1.0);
    }
}

// ── wave_speed ────────────────────────────────────────────────────────────────

#[test]
fn wave_one_uses_base_speed() {
    let p = params_for(Level::Medium);
    assert_eq!(wave_speed(&p, 1), p.enemy_base_speed);
}

#[test]
fn later_waves_are_faster() {
    let p = params_for(Level::Easy);
    assert!(wave_speed(&p, 2) > wave_speed(&p, 1));
    assert!(wave_speed(&p, 3) > wave_speed(&p, 2));
}

#[test]
fn wave_speed_is_capped() {
    let p = params_for(Level::Hard);
    assert_eq!(wave_speed(&p, 1000), p.enemy_max_speed);
}

// ── score_for ─────────────────────────────────────────────────────────────────

#[test]
fn octopus_is_worth_more() {
    assert_eq!(score_for(EnemyKind::Spacecraft), 100);
    assert_eq!(score_for(EnemyKind::Octopus), 150);
}

// ── spawn_formation ───────────────────────────────────────────────────────────

#[test]
fn formation_has_rows_times_cols() {
    let enemies = spawn_formation(4, 8, 60.0);
    assert_eq!(enemies.len(), 32);
    assert!(enemies.iter().all(|e| e.alive));
}

#[test]
fn formation_is_centred() {
    let enemies = spawn_formation(4, 8, 60.0);
    // 7 gaps of 5 cells plus one 3-cell enemy = 38 wide → left edge at 11
    assert_eq!(enemies[0].bounds.x, 11.0);
    assert_eq!(enemies[7].bounds.x, 46.0);
    let left = enemies[0].bounds.left();
    let right = 60.0 - enemies[7].bounds.right();
    assert!((left - right).abs() <= 1.0);
}

#[test]
fn formation_rows_are_spaced() {
    let enemies = spawn_formation(2, 3, 60.0);
    assert_eq!(enemies[0].bounds.y, FORMATION_TOP);
    assert_eq!(enemies[3].bounds.y, FORMATION_TOP + ENEMY_SPACING_Y);
    assert_eq!(enemies[3].slot, (1, 0));
    assert_eq!(enemies[5].slot, (1, 2));
}

#[test]
fn formation_top_row_is_octopus() {
    let enemies = spawn_formation(3, 4, 60.0);
    for e in &enemies {
        let expected = if e.slot.0 == 0 {
            EnemyKind::Octopus
        } else {
            EnemyKind::Spacecraft
        };
        assert_eq!(e.kind, expected);
    }
}

#[test]
fn empty_formation() {
    assert!(spawn_formation(0, 8, 60.0).is_empty());
    assert!(spawn_formation(4, 0, 60.0).is_empty());
}

// ── spawn_player ──────────────────────────────────────────────────────────────

#[test]
fn player_spawns_bottom_centre() {
    let p = make_player();
    assert_eq!(p.bounds.x, 28.0); // floor((60 - 3) / 2)
    assert_eq!(p.bounds.y, 22.0); // height - PLAYER_H
    assert_eq!(p.energy, 3);
    assert_eq!(p.max_charge, params_for(Level::Medium).max_charge);
    assert_eq!(p.charge, p.max_charge);
}

// ── player_fire ───────────────────────────────────────────────────────────────

#[test]
fn player_fire_spawns_upward_shot() {
    let params = params_for(Level::Medium);
    let mut p = make_player();
    let shot = player_fire(&mut p, &[], &params).expect("should fire");

    assert_eq!(shot.owner, Owner::Player);
    assert!(shot.velocity.1 < 0.0);
    assert_eq!(shot.bounds.bottom(), p.bounds.top());
    assert_eq!(shot.bounds.center().0, p.bounds.center().0);
}

#[test]
fn player_fire_spends_charge_and_starts_cooldown() {
    let params = params_for(Level::Medium);
    let mut p = make_player();
    let before = p.charge;
    player_fire(&mut p, &[], &params).expect("should fire");

    assert_eq!(p.charge, before - params.shot_cost);
    assert_eq!(p.fire_cooldown, params.player_cooldown);
}

#[test]
fn player_fire_blocked_by_cooldown() {
    let params = params_for(Level::Medium);
    let mut p = make_player();
    p.fire_cooldown = 0.05;
    assert!(player_fire(&mut p, &[], &params).is_none());
}

#[test]
fn player_fire_blocked_without_charge() {
    let params = params_for(Level::Medium);
    let mut p = make_player();
    p.charge = params.shot_cost - 1;
    assert!(player_fire(&mut p, &[], &params).is_none());
    assert_eq!(p.charge, params.shot_cost - 1);
}

#[test]
fn player_fire_capped_by_live_shots() {
    let params = params_for(Level::Medium);
    let mut p = make_player();
    let live: Vec<Projectile> = (0..3).map(|i| player_shot(5.0 + i as f32, 5.0)).collect();
    assert!(player_fire(&mut p, &live, &params).is_none());
}

#[test]
fn player_fire_ignores_dead_and_enemy_shots_for_cap() {
    let params = params_for(Level::Medium);
    let mut p = make_player();
    let mut shots = vec![player_shot(5.0, 5.0), player_shot(6.0, 5.0), player_shot(7.0, 5.0)];
    shots[0].alive = false;
    shots.push(Projectile::new(8.0, 5.0, (0.0, 15.0), Owner::Enemy, 1));
    assert!(player_fire(&mut p, &shots, &params).is_some());
}

// ── front_row ─────────────────────────────────────────────────────────────────

#[test]
fn front_row_is_bottom_of_each_column() {
    let enemies = spawn_formation(3, 4, 60.0);
    let front = front_row(&enemies);
    assert_eq!(front, vec![8, 9, 10, 11]);
}

#[test]
fn front_row_skips_dead_enemies() {
    let mut enemies = spawn_formation(3, 2, 60.0);
    enemies[4].alive = false; // row 2, col 0
    enemies[2].alive = false; // row 1, col 0
    let front = front_row(&enemies);
    assert_eq!(front, vec![0, 5]);
}

#[test]
fn front_row_of_cleared_formation_is_empty() {
    let mut enemies = spawn_formation(2, 2, 60.0);
    for e in &mut enemies {
        e.alive = false;
    }
    assert!(front_row(&enemies).is_empty());
}

// ── enemy_fire ────────────────────────────────────────────────────────────────

#[test]
fn enemy_fire_certain_chance_fires_every_column() {
    let mut params = params_for(Level::Easy);
    params.enemy_fire_chance = 1.0;
    let mut enemies = spawn_formation(2, 4, 60.0);
    let mut rng = seeded_rng();

    let shots = enemy_fire(&mut enemies, &params, &mut rng);
    assert_eq!(shots.len(), 4);
    for shot in &shots {
        assert_eq!(shot.owner, Owner::Enemy);
        assert!(shot.velocity.1 > 0.0);
        assert_eq!(shot.damage, params.enemy_damage);
        assert_eq!(shot.bounds.top(), enemies[4].bounds.bottom());
    }
    assert!(enemies[4..].iter().all(|e| e.fire_cooldown == params.enemy_fire_cooldown));
    assert!(enemies[..4].iter().all(|e| e.fire_cooldown == 0.0));
}

#[test]
fn enemy_fire_zero_chance_never_fires() {
    let mut params = params_for(Level::Hard);
    params.enemy_fire_chance = 0.0;
    let mut enemies = spawn_formation(4, 8, 60.0);
    let mut rng = seeded_rng();
    for _ in 0..100 {
        assert!(enemy_fire(&mut enemies, &params, &mut rng).is_empty());
    }
}

#[test]
fn enemy_fire_respects_cooldown() {
    let mut params = params_for(Level::Easy);
    params.enemy_fire_chance = 1.0;
    let mut enemies = spawn_formation(1, 3, 60.0);
    let mut rng = seeded_rng();

    assert_eq!(enemy_fire(&mut enemies, &params, &mut rng).len(), 3);
    assert!(enemy_fire(&mut enemies, &params, &mut rng).is_empty());
}

#[test]
fn enemy_fire_is_deterministic_for_a_seed() {
    let params = params_for(Level::Hard);
    let run = || {
        let mut enemies = spawn_formation(4, 8, 60.0);
        let mut rng = seeded_rng();
        let mut fired = Vec::new();
        for tick in 0..300 {
            for e in &mut enemies {
                e.update(1.0 / 30.0);
            }
            for shot in enemy_fire(&mut enemies, &params, &mut rng) {
                fired.push((tick, shot.bounds.x));
            }
        }
        fired
    };
    assert_eq!(run(), run());
}
