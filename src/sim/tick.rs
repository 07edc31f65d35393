//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically.

use super::collision::bounce_off_walls;
use super::state::{ArenaSimulation, Body, Direction, GameEvent};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Direction pressed since the previous tick, if any
    pub direction: Option<Direction>,
}

/// Advance the simulation by one step
///
/// Does nothing once the round is over. Otherwise moves the player, reflects
/// it off the walls, does the same for the enemy, then ends the round if the
/// two squares overlap.
pub fn tick(state: &mut ArenaSimulation, input: &TickInput) {
    if state.over {
        return;
    }

    if let Some(direction) = input.direction {
        state.set_player_velocity(direction);
    }

    let arena = state.arena;

    state.player.integrate();
    for wall in bounce_off_walls(&mut state.player, &arena) {
        state.events.push(GameEvent::WallBounce {
            body: Body::Player,
            wall,
        });
    }

    state.enemy.integrate();
    for wall in bounce_off_walls(&mut state.enemy, &arena) {
        state.events.push(GameEvent::WallBounce {
            body: Body::Enemy,
            wall,
        });
    }

    state.time_ticks += 1;

    if state.player.aabb().overlaps(&state.enemy.aabb()) {
        state.over = true;
        state.events.push(GameEvent::RoundOver);
        log::info!(
            "Round over after {} ticks (player {:?}, enemy {:?})",
            state.time_ticks,
            state.player.pos,
            state.enemy.pos
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::collision::Wall;
    use crate::sim::state::{Arena, Entity};
    use glam::Vec2;
    use proptest::prelude::*;

    fn arena_300() -> ArenaSimulation {
        ArenaSimulation::new(Arena::new(0.0, 0.0, 300.0, 300.0))
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    #[test]
    fn test_enemy_bounces_off_right_wall() {
        let mut state = arena_300();

        for _ in 0..14 {
            tick(&mut state, &idle());
        }
        assert_eq!(state.enemy().pos.x, 256.0);
        assert_eq!(state.enemy().vel.x, 4.0);

        tick(&mut state, &idle());
        assert_eq!(state.enemy().pos.x, 260.0);
        assert_eq!(state.enemy().vel.x, -4.0);

        // Moving away on the next tick, no second flip
        tick(&mut state, &idle());
        assert_eq!(state.enemy().pos.x, 256.0);
        assert_eq!(state.enemy().vel.x, -4.0);
    }

    #[test]
    fn test_player_moves_left_into_wall() {
        let mut state = arena_300();
        state.set_player_velocity(Direction::Left);
        assert_eq!(state.player().vel, Vec2::new(-5.0, 0.0));

        for _ in 0..9 {
            tick(&mut state, &idle());
        }
        assert_eq!(state.player().pos, Vec2::new(5.0, 50.0));
        assert_eq!(state.player().vel.x, -5.0);

        tick(&mut state, &idle());
        assert_eq!(state.player().pos, Vec2::new(0.0, 50.0));
        assert_eq!(state.player().vel, Vec2::new(5.0, 0.0));
        assert!(!state.is_over());

        let events: Vec<_> = state.drain_events().collect();
        assert_eq!(
            events,
            vec![GameEvent::WallBounce {
                body: Body::Player,
                wall: Wall::Left,
            }]
        );
    }

    #[test]
    fn test_sliding_along_wall_queues_no_bounces() {
        let mut state = arena_300();
        state.player = Entity::new(Vec2::new(0.0, 50.0), Vec2::ZERO);
        let up = TickInput {
            direction: Some(Direction::Up),
        };
        tick(&mut state, &up);
        for _ in 0..4 {
            tick(&mut state, &idle());
        }
        assert_eq!(state.player().pos, Vec2::new(0.0, 75.0));
        assert!(
            state
                .drain_events()
                .all(|e| !matches!(e, GameEvent::WallBounce { body: Body::Player, .. }))
        );
    }

    #[test]
    fn test_tick_input_sets_direction() {
        let mut state = arena_300();
        let input = TickInput {
            direction: Some(Direction::Up),
        };
        tick(&mut state, &input);
        assert_eq!(state.player().pos, Vec2::new(50.0, 55.0));
        assert_eq!(state.player().vel, Vec2::new(0.0, 5.0));
    }

    #[test]
    fn test_coinciding_squares_end_round() {
        let mut state = arena_300();
        state.player = Entity::new(Vec2::new(100.0, 100.0), Vec2::ZERO);
        state.enemy = Entity::new(Vec2::new(96.0, 96.0), Vec2::new(4.0, 4.0));

        tick(&mut state, &idle());
        assert!(state.is_over());
        assert_eq!(state.enemy().pos, state.player().pos);
        assert_eq!(state.drain_events().collect::<Vec<_>>(), vec![GameEvent::RoundOver]);

        // Frozen from here on
        let player = *state.player();
        let enemy = *state.enemy();
        let ticks = state.time_ticks();
        for _ in 0..30 {
            tick(
                &mut state,
                &TickInput {
                    direction: Some(Direction::Right),
                },
            );
        }
        assert!(state.is_over());
        assert_eq!(*state.player(), player);
        assert_eq!(*state.enemy(), enemy);
        assert_eq!(state.time_ticks(), ticks);
        assert_eq!(state.drain_events().count(), 0);
    }

    #[test]
    fn test_edge_touch_is_not_collision() {
        let mut state = arena_300();
        state.player = Entity::new(Vec2::new(100.0, 100.0), Vec2::ZERO);
        // Enemy ends this tick with its left edge on the player's right edge
        state.enemy = Entity::new(Vec2::new(136.0, 100.0), Vec2::new(4.0, 0.0));

        tick(&mut state, &idle());
        assert_eq!(state.enemy().pos.x, 140.0);
        assert!(!state.is_over());

        // Corner to corner
        state.enemy = Entity::new(Vec2::new(136.0, 136.0), Vec2::new(4.0, 4.0));
        tick(&mut state, &idle());
        assert_eq!(state.enemy().pos, Vec2::new(140.0, 140.0));
        assert!(!state.is_over());
    }

    #[test]
    fn test_enemy_eventually_catches_idle_player() {
        let mut state = arena_300();
        let mut round_over_events = 0;
        for _ in 0..1000 {
            tick(&mut state, &idle());
            round_over_events += state
                .drain_events()
                .filter(|e| *e == GameEvent::RoundOver)
                .count();
        }
        assert!(state.is_over());
        assert_eq!(round_over_events, 1);
    }

    #[test]
    fn test_reset_after_round_over() {
        let mut state = arena_300();
        while !state.is_over() {
            tick(&mut state, &idle());
        }
        state.reset_round();
        assert!(!state.is_over());
        assert_eq!(state.player().pos, Vec2::new(50.0, 50.0));
        assert_eq!(state.player().vel, Vec2::ZERO);
        assert_eq!(state.enemy().pos, Vec2::new(200.0, 200.0));
        assert_eq!(state.enemy().vel, Vec2::new(4.0, 4.0));

        tick(&mut state, &idle());
        assert_eq!(state.enemy().pos, Vec2::new(204.0, 204.0));
    }

    #[test]
    fn test_shrunk_arena_pulls_squares_inside() {
        let mut state = arena_300();
        state.resize_arena(Arena::new(0.0, 0.0, 150.0, 150.0));
        tick(&mut state, &idle());
        let arena = *state.arena();
        assert!(arena.contains_square(state.enemy().pos, state.enemy().size));
        assert_eq!(state.enemy().pos, Vec2::new(110.0, 110.0));
        assert_eq!(state.enemy().vel, Vec2::new(-4.0, -4.0));
    }

    fn direction() -> impl Strategy<Value = Option<Direction>> {
        prop_oneof![
            4 => Just(None),
            1 => Just(Some(Direction::Left)),
            1 => Just(Some(Direction::Right)),
            1 => Just(Some(Direction::Up)),
            1 => Just(Some(Direction::Down)),
        ]
    }

    proptest! {
        #[test]
        fn prop_squares_stay_inside(
            x in -200i32..200,
            y in -200i32..200,
            w in 40u16..600,
            h in 40u16..600,
            inputs in proptest::collection::vec(direction(), 1..400),
        ) {
            let arena = Arena::new(x as f32, y as f32, w as f32, h as f32);
            let mut state = ArenaSimulation::new(arena);
            for direction in inputs {
                tick(&mut state, &TickInput { direction });
                prop_assert!(arena.contains_square(state.player().pos, state.player().size));
                prop_assert!(arena.contains_square(state.enemy().pos, state.enemy().size));
            }
        }

        #[test]
        fn prop_bounce_flips_only_perpendicular_component(
            px in 0i32..=260,
            py in 0i32..=260,
            vx in -8i32..=8,
            vy in -8i32..=8,
        ) {
            let arena = Arena::new(0.0, 0.0, 300.0, 300.0);
            let vel = Vec2::new(vx as f32, vy as f32);
            let mut e = Entity::new(Vec2::new(px as f32, py as f32), vel);
            e.integrate();
            let hits = bounce_off_walls(&mut e, &arena);

            let x_hits = hits.iter().filter(|w| matches!(w, Wall::Left | Wall::Right)).count();
            let y_hits = hits.iter().filter(|w| matches!(w, Wall::Bottom | Wall::Top)).count();
            prop_assert!(x_hits <= 1);
            prop_assert!(y_hits <= 1);

            let expected_vx = if x_hits == 1 { -vel.x } else { vel.x };
            let expected_vy = if y_hits == 1 { -vel.y } else { vel.y };
            prop_assert_eq!(e.vel.x, expected_vx);
            prop_assert_eq!(e.vel.y, expected_vy);
            prop_assert!(arena.contains_square(e.pos, e.size));
        }
    }
}
