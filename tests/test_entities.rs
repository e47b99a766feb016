use scramble::entities::*;
use scramble::geometry::{BoundingBox, Position};

// ── Bounding boxes ────────────────────────────────────────────────────────────

#[test]
fn boxes_with_positive_overlap_collide() {
    let a = BoundingBox::new(0, 0, 10, 10);
    let b = BoundingBox::new(5, 5, 10, 10);
    assert!(a.intersects(&b));
    assert!(b.intersects(&a));
}

#[test]
fn edge_touching_boxes_collide() {
    // Non-strict intersection: sharing an edge counts.
    let a = BoundingBox::new(0, 0, 10, 10);
    let right = BoundingBox::new(10, 0, 10, 10);
    let below = BoundingBox::new(0, 10, 10, 10);
    assert!(a.intersects(&right));
    assert!(a.intersects(&below));
}

#[test]
fn separated_boxes_do_not_collide() {
    let a = BoundingBox::new(0, 0, 10, 10);
    let b = BoundingBox::new(21, 0, 10, 10);
    let c = BoundingBox::new(0, 40, 10, 10);
    assert!(!a.intersects(&b));
    assert!(!a.intersects(&c));
}

#[test]
fn box_dimensions_never_change_after_construction() {
    let mut b = BoundingBox::new(0, 0, 12, 7);
    b.move_to(Position::new(100, -3));
    assert_eq!((b.x, b.y), (100, -3));
    assert_eq!((b.width, b.height), (12, 7));
}

// ── Ship movement ─────────────────────────────────────────────────────────────

#[test]
fn ship_without_intent_does_not_move() {
    let mut ship = Ship::new(100, 100);
    ship.advance();
    assert_eq!(ship.position(), Position::new(100, 100));
}

#[test]
fn ship_moves_left_at_spaceship_speed() {
    let mut ship = Ship::new(100, 100);
    ship.left = true;
    ship.advance();
    assert_eq!(ship.position(), Position::new(100 - SPACESHIP_SPEED, 100));
}

#[test]
fn conflicting_flags_cancel() {
    let mut ship = Ship::new(100, 100);
    ship.left = true;
    ship.right = true;
    ship.advance();
    assert_eq!(ship.x_speed(), 0);
    assert_eq!(ship.position(), Position::new(100, 100));
}

#[test]
fn conflicting_horizontal_flags_still_allow_vertical_motion() {
    let mut ship = Ship::new(100, 100);
    ship.left = true;
    ship.right = true;
    ship.up = true;
    ship.advance();
    assert_eq!(ship.x_speed(), 0);
    assert_eq!(ship.position(), Position::new(100, 100 - SPACESHIP_SPEED));
}

#[test]
fn diagonal_movement_damps_both_axes() {
    let mut ship = Ship::new(100, 100);
    ship.right = true;
    ship.down = true;
    ship.advance();
    let expected = (f64::from(SPACESHIP_SPEED) * DIAGONAL_DAMPING).round() as i32;
    assert_eq!(ship.position(), Position::new(100 + expected, 100 + expected));
    assert!(ship.x_speed().abs() < SPACESHIP_SPEED);
    assert_eq!(ship.x_speed(), ship.y_speed());
}

#[test]
fn ship_clone_is_independent() {
    let mut original = Ship::new(100, 100);
    let mut copy = original.clone();
    copy.left = true;
    copy.advance();
    original.right = true;
    original.advance();
    assert_eq!(copy.position(), Position::new(100 - SPACESHIP_SPEED, 100));
    assert_eq!(original.position(), Position::new(100 + SPACESHIP_SPEED, 100));
}

// ── Ship collision ────────────────────────────────────────────────────────────

#[test]
fn ship_dies_on_terrain_contact() {
    let mut ship = Ship::new(100, 100);
    let terrain = [BoundingBox::new(100, 100, 16, 640)];
    assert!(ship.check_ground_collision(&terrain));
    assert!(ship.is_hit());
}

#[test]
fn ship_passes_clear_terrain() {
    let mut ship = Ship::new(100, 100);
    let terrain = [BoundingBox::new(400, 0, 16, 48)];
    assert!(!ship.check_ground_collision(&terrain));
    assert!(!ship.is_hit());
}

#[test]
fn ship_dies_on_rocket_contact() {
    let mut ship = Ship::new(100, 100);
    let rockets = [Rocket::new(110, 105)];
    assert!(ship.check_enemy_collision(&rockets));
    assert!(ship.is_hit());
}

// ── Bullet movement ───────────────────────────────────────────────────────────

#[test]
fn horizontal_bullet_moves_straight() {
    let mut bullet = Bullet::new(50, 80, BulletKind::Horizontal);
    bullet.advance();
    assert_eq!(bullet.position(), Position::new(50 + HORIZONTAL_BULLET_SPEED, 80));
    bullet.advance();
    assert_eq!(bullet.position(), Position::new(50 + 2 * HORIZONTAL_BULLET_SPEED, 80));
}

#[test]
fn bomb_arcs_forward_and_down() {
    let mut bomb = Bullet::new(50, 80, BulletKind::Bomb);
    bomb.advance();
    assert_eq!(bomb.position(), Position::new(50 + BOMB_SPEED_X, 80 + BOMB_SPEED_Y));
}

#[test]
fn hit_bullet_drifts_with_landscape() {
    let mut bomb = Bullet::new(50, 80, BulletKind::Bomb);
    bomb.set_hit(true);
    bomb.advance();
    // Explosion sub-state: horizontal drift only, no more falling.
    assert_eq!(bomb.position(), Position::new(50 - SCROLL_SPEED, 80));
}

#[test]
fn bullet_ground_collision_is_idempotent() {
    let mut bullet = Bullet::new(0, 0, BulletKind::Horizontal);
    let terrain = [BoundingBox::new(0, 0, 16, 16)];
    assert!(bullet.check_ground_collision(&terrain));
    assert!(bullet.is_hit());
    // Re-checking an already-hit bullet reports the overlap again and
    // leaves the flag set.
    assert!(bullet.check_ground_collision(&terrain));
    assert!(bullet.is_hit());
}

#[test]
fn bullet_explosion_finishes_after_duration() {
    let mut bullet = Bullet::new(0, 0, BulletKind::Bomb);
    bullet.set_hit(true);
    for _ in 0..EXPLOSION_DURATION - 1 {
        bullet.advance();
        assert!(!bullet.explosion_finished());
    }
    bullet.advance();
    assert!(bullet.explosion_finished());
}

// ── Rocket ────────────────────────────────────────────────────────────────────

#[test]
fn rocket_climbs_while_alive() {
    let mut rocket = Rocket::new(100, 100);
    rocket.advance();
    assert_eq!(
        rocket.position(),
        Position::new(100 - SCROLL_SPEED, 100 - ROCKET_CLIMB_SPEED)
    );
}

#[test]
fn hit_rocket_freezes_vertically_but_keeps_scrolling() {
    let mut rocket = Rocket::new(100, 100);
    rocket.set_hit(true);
    rocket.advance();
    rocket.advance();
    rocket.advance();
    // Only x changes, by exactly the world-scroll speed per step.
    assert_eq!(rocket.position(), Position::new(100 - 3 * SCROLL_SPEED, 100));
    assert_eq!(rocket.speed_y(), 0);
}

#[test]
fn rocket_dies_to_overlapping_bullet() {
    let mut rocket = Rocket::new(100, 100);
    let bullets = [Bullet::new(102, 104, BulletKind::Bomb)];
    assert!(rocket.check_bullet_collision(&bullets));
    assert!(rocket.is_hit());
}

#[test]
fn rocket_survives_distant_bullet() {
    let mut rocket = Rocket::new(100, 100);
    let bullets = [Bullet::new(300, 104, BulletKind::Horizontal)];
    assert!(!rocket.check_bullet_collision(&bullets));
    assert!(!rocket.is_hit());
}

#[test]
fn rocket_explosion_finishes_after_duration() {
    let mut rocket = Rocket::new(100, 100);
    rocket.set_hit(true);
    for _ in 0..EXPLOSION_DURATION - 1 {
        assert!(!rocket.tick_explosion());
    }
    assert!(rocket.tick_explosion());
}

// ── Fuel tank ─────────────────────────────────────────────────────────────────

#[test]
fn fuel_tank_scrolls_without_vertical_motion() {
    let mut tank = FuelTank::new(200, 544);
    tank.advance();
    tank.advance();
    assert_eq!(tank.position(), Position::new(200 - 2 * SCROLL_SPEED, 544));
}

#[test]
fn fuel_tank_explodes_after_exact_duration() {
    let mut tank = FuelTank::new(200, 544);
    tank.set_hit(true);
    for _ in 0..EXPLOSION_DURATION - 1 {
        tank.increment_counter_for_explosion();
        assert!(!tank.is_exploded());
    }
    tank.increment_counter_for_explosion();
    assert!(tank.is_exploded());
}

#[test]
fn fuel_tank_counter_caps_at_duration() {
    let mut tank = FuelTank::new(200, 544);
    tank.set_hit(true);
    for _ in 0..EXPLOSION_DURATION + 10 {
        tank.increment_counter_for_explosion();
    }
    assert_eq!(tank.counter_for_explosion(), EXPLOSION_DURATION);
}

// ── Shared lifecycle pieces ───────────────────────────────────────────────────

#[test]
fn hittable_is_shared_across_variants() {
    fn flag<H: Hittable>(entity: &mut H) -> bool {
        entity.set_hit(true);
        entity.is_hit()
    }
    assert!(flag(&mut Ship::new(0, 0)));
    assert!(flag(&mut Bullet::new(0, 0, BulletKind::Horizontal)));
    assert!(flag(&mut Rocket::new(0, 0)));
    assert!(flag(&mut FuelTank::new(0, 0)));
}

#[test]
fn explosion_timer_counts_and_finishes() {
    let mut timer = ExplosionTimer::new(3);
    assert!(!timer.finished());
    assert_eq!(timer.increment(), 1);
    assert_eq!(timer.increment(), 2);
    assert!(!timer.finished());
    assert_eq!(timer.increment(), 3);
    assert!(timer.finished());
    // Capped: further increments are no-ops.
    assert_eq!(timer.increment(), 3);
}

#[test]
fn explosion_timer_cycles_frames() {
    let mut timer = ExplosionTimer::new(10);
    assert_eq!(timer.frame(4), 0);
    timer.increment();
    assert_eq!(timer.frame(4), 1);
    for _ in 0..4 {
        timer.increment();
    }
    assert_eq!(timer.frame(4), 1); // 5 % 4
}

#[test]
fn bullet_explosion_sprite_keeps_its_kind() {
    let mut shot = Bullet::new(0, 0, BulletKind::Horizontal);
    shot.set_hit(true);
    assert!(matches!(shot.sprite(0), Sprite::BulletExplosion(_)));

    let mut bomb = Bullet::new(0, 0, BulletKind::Bomb);
    bomb.set_hit(true);
    assert!(matches!(bomb.sprite(0), Sprite::BombExplosion(_)));
}

#[test]
fn sprites_follow_hit_state() {
    let mut rocket = Rocket::new(0, 0);
    assert!(matches!(rocket.sprite(0), Sprite::Rocket(_)));
    rocket.set_hit(true);
    assert!(matches!(rocket.sprite(0), Sprite::RocketExplosion(_)));

    let mut tank = FuelTank::new(0, 0);
    assert!(matches!(tank.sprite(3), Sprite::FuelTank(_)));
    tank.set_hit(true);
    assert!(matches!(tank.sprite(3), Sprite::FuelTankExplosion(_)));
}
