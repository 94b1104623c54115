use bullet_hell::compute::*;
use bullet_hell::config::GameConfig;
use bullet_hell::entities::*;
use bullet_hell::game::{start_session, step};
use bullet_hell::geometry::{intersects, Rect};
use bullet_hell::input::TickInput;

use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn make_state() -> GameState {
    start_session(&init_state(GameConfig::default()), 0)
}

fn rect_strategy() -> impl Strategy<Value = Rect> {
    (-100i32..900, -100i32..700, 0i32..120, 0i32..120).prop_map(|(x, y, w, h)| Rect::new(x, y, w, h))
}

fn input_strategy() -> impl Strategy<Value = TickInput> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(up, down, left, right, fire)| TickInput {
            up,
            down,
            left,
            right,
            fire,
            clicks: Vec::new(),
        },
    )
}

proptest! {
    #[test]
    fn intersects_is_symmetric(a in rect_strategy(), b in rect_strategy()) {
        prop_assert_eq!(intersects(&a, &b), intersects(&b, &a));
    }

    #[test]
    fn non_degenerate_rect_intersects_itself(
        x in -100i32..900, y in -100i32..700, w in 1i32..120, h in 1i32..120
    ) {
        let r = Rect::new(x, y, w, h);
        prop_assert!(intersects(&r, &r));
    }

    #[test]
    fn edge_adjacent_rects_do_not_intersect(a in rect_strategy()) {
        let right = Rect::new(a.right(), a.y, a.w, a.h);
        let below = Rect::new(a.x, a.bottom(), a.w, a.h);
        prop_assert!(!intersects(&a, &right));
        prop_assert!(!intersects(&a, &below));
    }

    #[test]
    fn player_stays_inside_field(
        start_x in 0i32..=750,
        start_y in 0i32..=550,
        moves in prop::collection::vec(input_strategy(), 0..200)
    ) {
        let mut s = make_state();
        s.session.player.rect.x = start_x;
        s.session.player.rect.y = start_y;
        for input in &moves {
            s = move_player(&s, input);
            let r = s.session.player.rect;
            prop_assert!((0..=750).contains(&r.x));
            prop_assert!((0..=550).contains(&r.y));
        }
    }

    #[test]
    fn fire_gate_opens_exactly_at_interval(interval in 100u64..=300, t in 0u64..1_000_000) {
        let mut s = make_state();
        s.session.player.shot_interval_ms = interval;
        let first = player_shoot(&s, t);

        let early = player_shoot(&first, t + interval - 1);
        prop_assert_eq!(early.session.bullets.len(), 1);

        let on_time = player_shoot(&first, t + interval);
        prop_assert_eq!(on_time.session.bullets.len(), 2);
    }

    #[test]
    fn progression_is_monotonic_and_bounded(kills in 1u32..200) {
        let config = GameConfig::default();
        let mut player = make_state().session.player;
        for kill in 1..=kills {
            let next = register_kill(&player, kill, &config);
            prop_assert!(next.extra_bullet_pairs >= player.extra_bullet_pairs);
            prop_assert!(next.extra_bullet_pairs <= 2);
            prop_assert!(next.shot_interval_ms <= player.shot_interval_ms);
            prop_assert!(next.shot_interval_ms >= 100);
            prop_assert_eq!(next.extra_bullet_pairs, (kill / 20).min(2));
            player = next;
        }
    }

    #[test]
    fn spawn_interval_never_rises_or_breaks_floor(
        gaps in prop::collection::vec(0u64..4000, 1..100),
        seed in any::<u64>()
    ) {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(seed);
        let mut session = make_state().session;
        let mut now = 0;
        for gap in gaps {
            now += gap;
            let next = spawn_enemy(&session, &config, now, &mut rng);
            prop_assert!(next.enemy_spawn_interval_ms <= session.enemy_spawn_interval_ms);
            prop_assert!(next.enemy_spawn_interval_ms >= 200);
            for e in &next.enemies {
                prop_assert!((0..=750).contains(&e.rect.x));
                prop_assert!((1000..3000).contains(&e.fire_interval_ms));
            }
            session = next;
        }
    }

    #[test]
    fn out_of_lives_means_game_over(
        seed in any::<u64>(),
        inputs in prop::collection::vec(input_strategy(), 1..400)
    ) {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut s = make_state();
        let mut now = 0;
        for input in &inputs {
            now += 16 * 8; // fast-forward so enemies pile up
            let was_over = s.status == GameStatus::GameOver;
            let before = s.session.clone();
            s = step(&s, input, now, &mut rng);

            prop_assert!(s.session.player.lives <= 3);
            if s.session.player.lives <= 0 {
                prop_assert_eq!(s.status, GameStatus::GameOver);
            }
            if was_over {
                prop_assert_eq!(s.status, GameStatus::GameOver);
                prop_assert_eq!(&s.session, &before);
            }
        }
    }
}
