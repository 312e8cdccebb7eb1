//! Unit tests for ta-engine.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use ta_behavior::{Applicability, BehaviorError, BehaviorModule, HookDefinition, VerbDecl};
use ta_core::{ActionContext, EntityId, EventResult, GameConfig, HookId, Tier, Turn};
use ta_registry::ModuleSource;
use ta_world::{EntitySpec, WorldBuilder};

use crate::{
    Engine, EngineBuilder, EngineState, NoopObserver, PhaseOutcome, Resolution, TurnObserver,
    TurnReport,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

#[derive(Default, Debug, PartialEq)]
struct Fuel(u32);

/// A `take` handler that claims items only, counting its invocations.
fn take_module(id: &str, claims: &'static str, calls: Arc<AtomicUsize>) -> BehaviorModule {
    let id_owned = id.to_owned();
    BehaviorModule::builder(id)
        .command(VerbDecl::new("take", "cmd_take").synonym("get"), move |ctx, world| {
            calls.fetch_add(1, Ordering::SeqCst);
            match ctx.target {
                Some(obj) if world.entities.is_kind(obj, claims) => {
                    Ok(Applicability::success(format!("{id_owned}: taken")))
                }
                _ => Ok(Applicability::NotApplicable),
            }
        })
        .build()
        .unwrap()
}

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

/// hall ⊃ {player, lamp (item), statue (fixture)}.
fn specs() -> Vec<EntitySpec> {
    specs_with_lamp(&[])
}

fn specs_with_lamp(lamp_behaviors: &[&str]) -> Vec<EntitySpec> {
    let lamp = lamp_behaviors
        .iter()
        .fold(EntitySpec::new("lamp", "item").at("hall"), |spec, m| spec.behavior(*m));
    vec![
        EntitySpec::new("hall", "room"),
        EntitySpec::new("player", "actor").at("hall"),
        lamp,
        EntitySpec::new("statue", "fixture").at("hall"),
    ]
}

fn id(engine: &Engine, name: &str) -> EntityId {
    engine.world.entities.find(name).unwrap()
}

fn take(engine: &Engine, object: &str) -> ActionContext {
    ActionContext::new("take", id(engine, "player")).with_object(id(engine, object))
}

fn wait() -> ActionContext {
    ActionContext::new("wait", EntityId(0))
}

/// Tier-3 source holding one item-claiming `take`.
fn core_take(calls: Arc<AtomicUsize>) -> ModuleSource {
    ModuleSource::new("core", Tier::CORE).module(take_module("core/take", "item", calls))
}

/// Records every observer callback.
#[derive(Default)]
struct Recorder {
    transitions: Vec<(EngineState, EngineState)>,
    phases:      Vec<PhaseOutcome>,
    resolutions: Vec<Resolution>,
    reports:     Vec<TurnReport>,
}

impl TurnObserver for Recorder {
    fn on_transition(&mut self, from: EngineState, to: EngineState) {
        self.transitions.push((from, to));
    }
    fn on_command(&mut self, _turn: Turn, resolution: &Resolution) {
        self.resolutions.push(resolution.clone());
    }
    fn on_phase(&mut self, _turn: Turn, outcome: &PhaseOutcome) {
        self.phases.push(outcome.clone());
    }
    fn on_turn_end(&mut self, report: &TurnReport) {
        self.reports.push(report.clone());
    }
}

// ── Dispatch ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod dispatch {
    use super::*;

    #[test]
    fn tier_one_supersedes_tier_three() {
        let (game_calls, core_calls) = (counter(), counter());
        let mut engine = EngineBuilder::new(GameConfig::default())
            .source(core_take(core_calls.clone()))
            .source(
                ModuleSource::new("game", Tier::GAME)
                    .module(take_module("game/take", "item", game_calls.clone())),
            )
            .entities(specs())
            .build()
            .unwrap();

        let action = take(&engine, "lamp");
        let result = engine.dispatch(&action).unwrap();
        assert!(result.success);
        assert_eq!(result.message, "game/take: taken");
        assert_eq!(game_calls.load(Ordering::SeqCst), 1);
        assert_eq!(core_calls.load(Ordering::SeqCst), 0, "tier-3 handler must never run");
    }

    #[test]
    fn not_applicable_falls_through_to_lower_tiers() {
        let (fixture_calls, shared_calls, core_calls) = (counter(), counter(), counter());
        let mut engine = EngineBuilder::new(GameConfig::default())
            .source(
                ModuleSource::new("game", Tier::GAME)
                    .module(take_module("game/fixtures", "fixture", fixture_calls.clone())),
            )
            .source(
                ModuleSource::new("shared", Tier::SHARED)
                    .module(take_module("shared/take", "nothing", shared_calls.clone())),
            )
            .source(core_take(core_calls.clone()))
            .entities(specs())
            .build()
            .unwrap();

        let action = take(&engine, "lamp");
        let mut rec = Recorder::default();
        engine.submit(&action, &mut rec).unwrap();
        let resolution = &rec.resolutions[0];

        assert_eq!(resolution.result.message, "core/take: taken");
        assert_eq!(resolution.claimed_by.as_ref().unwrap().as_str(), "core/take");
        let declined: Vec<&str> = resolution.declined.iter().map(|m| m.as_str()).collect();
        assert_eq!(declined, vec!["game/fixtures", "shared/take"]);
        assert_eq!(fixture_calls.load(Ordering::SeqCst), 1);
        assert_eq!(shared_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn unknown_verb_is_a_definitive_failure() {
        let config = GameConfig {
            no_action_message: "Nothing happens.".to_owned(),
            ..GameConfig::default()
        };
        let mut engine = EngineBuilder::new(config)
            .source(core_take(counter()))
            .entities(specs())
            .build()
            .unwrap();

        let action = ActionContext::new("xyzzy", id(&engine, "player"));
        let result = engine.dispatch(&action).unwrap();
        assert!(!result.success);
        assert_eq!(result.message, "Nothing happens.");
    }

    #[test]
    fn every_candidate_declining_is_a_definitive_failure() {
        let mut engine = EngineBuilder::new(GameConfig::default())
            .source(core_take(counter()))
            .entities(specs())
            .build()
            .unwrap();
        let action = take(&engine, "statue");
        let result = engine.dispatch(&action).unwrap();
        assert!(!result.success);
        assert_eq!(result.message, ta_core::config::DEFAULT_NO_ACTION_MESSAGE);
    }

    #[test]
    fn synonyms_dispatch_to_the_same_handler() {
        let mut engine = EngineBuilder::new(GameConfig::default())
            .source(core_take(counter()))
            .entities(specs())
            .build()
            .unwrap();
        let action =
            ActionContext::new("get", id(&engine, "player")).with_object(id(&engine, "lamp"));
        assert!(engine.dispatch(&action).unwrap().success);
    }

    #[test]
    fn handler_error_propagates_with_provenance() {
        let broken = BehaviorModule::builder("game/broken")
            .command(VerbDecl::new("take", "cmd_take"), |_ctx, _world| {
                Err(BehaviorError::Handler("inventory corrupted".to_owned()))
            })
            .build()
            .unwrap();
        let fallback_calls = counter();
        let mut engine = EngineBuilder::new(GameConfig::default())
            .source(ModuleSource::new("game", Tier::GAME).module(broken))
            .source(core_take(fallback_calls.clone()))
            .entities(specs())
            .build()
            .unwrap();

        let action = take(&engine, "lamp");
        let err = engine.submit(&action, &mut NoopObserver).unwrap_err();
        match &err {
            crate::EngineError::Handler { module, event, .. } => {
                assert_eq!(module.as_str(), "game/broken");
                assert_eq!(event, "cmd_take");
            }
            other => panic!("unexpected error {other}"),
        }
        assert!(err.to_string().contains("inventory corrupted"));
        assert_eq!(fallback_calls.load(Ordering::SeqCst), 0, "errors must not fall through");
        assert_eq!(engine.state(), EngineState::Idle);
        assert_eq!(engine.turn(), Turn::ZERO);
    }
}

// ── Entity events ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod entity_events {
    use super::*;

    fn speaking_module(id: &str, allow: bool, feedback: &'static str) -> BehaviorModule {
        let hook = format!("entity_examine_{}", id.replace('/', "_"));
        BehaviorModule::builder(id)
            .hook(HookDefinition::entity(hook.clone()))
            .event("on_examine", hook, move |_ctx, _world| {
                Ok(EventResult { allow, feedback: Some(feedback.to_owned()) })
            })
            .build()
            .unwrap()
    }

    fn engine_with(lamp_modules: Vec<BehaviorModule>) -> Engine {
        EngineBuilder::new(GameConfig::default())
            .source(ModuleSource::new("game", Tier::GAME).modules(lamp_modules))
            .entities(specs_with_lamp(&["game/lamp", "core/light"]))
            .build()
            .unwrap()
    }

    #[test]
    fn fan_in_aggregates_allow_and_feedback() {
        let mut engine = engine_with(vec![
            speaking_module("game/lamp", true, "A flickers"),
            speaking_module("core/light", true, "B hums"),
        ]);
        let lamp = id(&engine, "lamp");
        let action = ActionContext::new("examine", id(&engine, "player")).with_object(lamp);
        let r = engine.invoke(Some(lamp), "on_examine", &action).unwrap();
        assert_eq!(r, EventResult { allow: true, feedback: Some("A flickers; B hums".to_owned()) });
    }

    #[test]
    fn one_denial_denies_but_every_handler_runs() {
        let mut engine = engine_with(vec![
            speaking_module("game/lamp", false, "Too hot"),
            speaking_module("core/light", true, "It glows"),
        ]);
        let lamp = id(&engine, "lamp");
        let action = ActionContext::new("examine", id(&engine, "player"));
        let r = engine.invoke(Some(lamp), "on_examine", &action).unwrap();
        assert!(!r.allow);
        assert_eq!(r.feedback.as_deref(), Some("Too hot; It glows"));
    }

    #[test]
    fn entity_without_matching_module_is_neutral() {
        let mut engine = engine_with(vec![
            speaking_module("game/lamp", false, "Too hot"),
            speaking_module("core/light", true, "It glows"),
        ]);
        let statue = id(&engine, "statue");
        let action = ActionContext::new("examine", id(&engine, "player"));
        let r = engine.invoke(Some(statue), "on_examine", &action).unwrap();
        assert_eq!(r, EventResult::neutral());

        let lamp = id(&engine, "lamp");
        assert_eq!(engine.invoke(Some(lamp), "on_sniff", &action).unwrap(), EventResult::neutral());
    }

    #[test]
    fn unknown_entity_is_neutral() {
        let mut engine = engine_with(vec![
            speaking_module("game/lamp", false, "x"),
            speaking_module("core/light", true, "y"),
        ]);
        let action = ActionContext::new("examine", EntityId(0));
        let r = engine.invoke(Some(EntityId(999)), "on_examine", &action).unwrap();
        assert_eq!(r, EventResult::neutral());
    }

    #[test]
    fn modules_outside_the_entity_list_are_not_asked() {
        let mut engine = engine_with(vec![
            speaking_module("game/lamp", true, "A flickers"),
            speaking_module("core/light", true, "B hums"),
            speaking_module("game/other", false, "never"),
        ]);
        let lamp = id(&engine, "lamp");
        let action = ActionContext::new("examine", id(&engine, "player"));
        let r = engine.invoke(Some(lamp), "on_examine", &action).unwrap();
        assert!(r.allow);
        assert_eq!(r.feedback.as_deref(), Some("A flickers; B hums"));
    }
}

// ── Turn loop ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod turn_loop {
    use super::*;

    /// Turn phases: burn (drains lamp fuel), npc (after burn), spare (no bindings).
    fn clockwork() -> Vec<BehaviorModule> {
        let burn = BehaviorModule::builder("game/burn")
            .hook(HookDefinition::turn_phase("turn_burn"))
            .event("on_burn", "turn_burn", |_ctx, world| {
                let missing = |what: &str| BehaviorError::Handler(format!("no {what}"));
                let lamp = world.entities.find("lamp").ok_or_else(|| missing("lamp"))?;
                let fuel = world.entities.get_mut::<Fuel>(lamp).ok_or_else(|| missing("fuel"))?;
                fuel.0 = fuel.0.saturating_sub(1);
                Ok(EventResult::allow(format!("fuel {}", fuel.0)))
            })
            .build()
            .unwrap();
        let npc = BehaviorModule::builder("game/npc")
            .hook(HookDefinition::turn_phase("turn_npc").after("turn_burn"))
            .hook(HookDefinition::turn_phase("turn_spare").after("turn_npc"))
            .event("on_npc", "turn_npc", |ctx, _world| {
                assert!(ctx.target.is_none());
                Ok(EventResult::allow(format!("npc moves on {}", ctx.turn)))
            })
            .build()
            .unwrap();
        let wait = BehaviorModule::builder("core/wait")
            .command(VerbDecl::new("wait", "cmd_wait"), |_ctx, _world| {
                Ok(Applicability::success("Time passes."))
            })
            .build()
            .unwrap();
        vec![npc, burn, wait]
    }

    fn fuelled_engine() -> Engine {
        let mut world = WorldBuilder::new(3)
            .register_component::<Fuel>()
            .entities(vec![
                EntitySpec::new("hall", "room"),
                EntitySpec::new("lamp", "item").at("hall"),
            ])
            .build()
            .unwrap();
        let lamp = world.entities.find("lamp").unwrap();
        *world.entities.get_mut::<Fuel>(lamp).unwrap() = Fuel(10);

        EngineBuilder::new(GameConfig::default())
            .source(ModuleSource::new("game", Tier::GAME).modules(clockwork()))
            .world(world)
            .build()
            .unwrap()
    }

    #[test]
    fn successful_command_advances_and_runs_phases_in_order() {
        let mut engine = fuelled_engine();
        let action = ActionContext::new("wait", EntityId(0));
        let report = engine.submit(&action, &mut NoopObserver).unwrap();

        assert!(report.advanced);
        assert_eq!(report.turn, Turn(1));
        assert_eq!(report.claimed_by.as_ref().map(|m| m.as_str()), Some("core/wait"));
        let hooks: Vec<&str> = report.phases.iter().map(|p| p.hook.as_str()).collect();
        assert_eq!(hooks, vec!["turn_burn", "turn_npc", "turn_spare"]);
        assert_eq!(report.phases[0].result.feedback.as_deref(), Some("fuel 9"));
        assert_eq!(report.phases[1].result.feedback.as_deref(), Some("npc moves on T1"));
        assert_eq!(report.combined().feedback.as_deref(), Some("fuel 9; npc moves on T1"));
    }

    #[test]
    fn unbound_hook_is_a_silent_pass_through() {
        let mut engine = fuelled_engine();
        let report = engine.submit(&wait(), &mut NoopObserver).unwrap();
        let spare = &report.phases[2];
        assert_eq!(spare.hook.as_str(), "turn_spare");
        assert_eq!(spare.handlers, 0);
        assert_eq!(spare.result, EventResult::neutral());
    }

    #[test]
    fn failed_command_does_not_advance_turn() {
        let mut engine = fuelled_engine();
        let dance = ActionContext::new("dance", EntityId(0));
        let report = engine.submit(&dance, &mut NoopObserver).unwrap();
        assert!(!report.advanced);
        assert!(!report.command.success);
        assert!(report.phases.is_empty());
        assert_eq!(engine.turn(), Turn::ZERO);
        let lamp = engine.world.entities.find("lamp").unwrap();
        assert_eq!(engine.world.entities.get::<Fuel>(lamp), Some(&Fuel(10)));
    }

    #[test]
    fn world_state_accumulates_across_turns() {
        let mut engine = fuelled_engine();
        for _ in 0..3 {
            engine.submit(&wait(), &mut NoopObserver).unwrap();
        }
        let lamp = engine.world.entities.find("lamp").unwrap();
        assert_eq!(engine.world.entities.get::<Fuel>(lamp), Some(&Fuel(7)));
        assert_eq!(engine.turn(), Turn(3));
        assert_eq!(engine.clock.elapsed(), 3);
    }

    #[test]
    fn observer_sees_full_state_sequence() {
        use EngineState::*;
        let mut engine = fuelled_engine();
        let mut rec = Recorder::default();
        engine.submit(&ActionContext::new("wait", EntityId(0)), &mut rec).unwrap();
        assert_eq!(
            rec.transitions,
            vec![
                (Idle, Resolving),
                (Resolving, Applied),
                (Applied, TurnAdvancing),
                (TurnAdvancing, PhaseExecuting),
                (PhaseExecuting, PhaseExecuting),
                (PhaseExecuting, PhaseExecuting),
                (PhaseExecuting, Idle),
            ]
        );
        assert_eq!(rec.phases.len(), 3);
        assert_eq!(rec.resolutions.len(), 1);
        assert_eq!(rec.reports.len(), 1);

        let mut rec = Recorder::default();
        engine.submit(&ActionContext::new("dance", EntityId(0)), &mut rec).unwrap();
        assert_eq!(
            rec.transitions,
            vec![(Idle, Resolving), (Resolving, Rejected), (Rejected, Idle)]
        );
        assert!(rec.phases.is_empty());
        assert_eq!(engine.state(), Idle);
    }

    #[test]
    fn execution_order_identical_across_loads() {
        let orders: Vec<Vec<HookId>> = (0..5)
            .map(|_| fuelled_engine().registry().execution_order().hooks().to_vec())
            .collect();
        assert!(orders.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(orders[0][0].as_str(), "turn_burn");
    }

    #[test]
    fn global_invoke_runs_a_single_hook() {
        let mut engine = fuelled_engine();
        let action = ActionContext::new("wait", EntityId(0));
        let r = engine.invoke(None, "turn_burn", &action).unwrap();
        assert_eq!(r.feedback.as_deref(), Some("fuel 9"));
        assert_eq!(engine.turn(), Turn::ZERO);
    }

    #[test]
    fn standalone_run_turn_runs_the_whole_order() {
        let mut world = WorldBuilder::new(3)
            .register_component::<Fuel>()
            .entities(vec![EntitySpec::new("lamp", "item")])
            .build()
            .unwrap();
        let registry = ta_registry::Loader::new()
            .source(ModuleSource::new("game", Tier::GAME).modules(clockwork()))
            .load(&world.entities)
            .unwrap();
        let action = ActionContext::new("wait", EntityId(0));
        let ctx = ta_behavior::HandlerContext::new(Turn(1), &action, None);

        let phases = crate::run_turn(&registry, &ctx, &mut world).unwrap();
        let hooks: Vec<&str> = phases.iter().map(|p| p.hook.as_str()).collect();
        assert_eq!(hooks, vec!["turn_burn", "turn_npc", "turn_spare"]);
        assert_eq!(phases[0].result.feedback.as_deref(), Some("fuel 0"));
        assert!(phases.iter().all(|p| p.result.allow));
    }
}

// ── Seeded randomness ─────────────────────────────────────────────────────────

#[cfg(test)]
mod seeded_randomness {
    use super::*;

    /// A weather phase drawing from the shared stream and a lamp phase drawing
    /// from the lamp's own stream.
    fn weather_engine(seed: u64) -> Engine {
        let weather = BehaviorModule::builder("game/weather")
            .hook(HookDefinition::turn_phase("turn_weather"))
            .hook(HookDefinition::turn_phase("turn_flicker").after("turn_weather"))
            .event("on_weather", "turn_weather", |_ctx, world| {
                Ok(if world.rng.percent(50) {
                    EventResult::allow("Rain patters.")
                } else {
                    EventResult::neutral()
                })
            })
            .event("on_flicker", "turn_flicker", |ctx, world| {
                let Some(lamp) = world.entities.find("lamp") else {
                    return Ok(EventResult::neutral());
                };
                let mut stream = world.rng.for_entity(lamp);
                for _ in 0..ctx.turn.0 {
                    stream.below(6);
                }
                Ok(EventResult::allow(format!("flicker {}", stream.roll(1, 6))))
            })
            .command(VerbDecl::new("wait", "cmd_wait"), |_ctx, _world| {
                Ok(Applicability::success("Time passes."))
            })
            .build()
            .unwrap();
        let config = GameConfig { seed, ..GameConfig::default() };
        EngineBuilder::new(config)
            .source(ModuleSource::new("game", Tier::GAME).module(weather))
            .entities(specs())
            .build()
            .unwrap()
    }

    fn play(engine: &mut Engine, turns: usize) -> Vec<TurnReport> {
        (0..turns)
            .map(|_| engine.submit(&wait(), &mut NoopObserver).unwrap())
            .collect()
    }

    #[test]
    fn same_seed_gives_identical_reports() {
        let mut first = weather_engine(11);
        let mut second = weather_engine(11);
        assert_eq!(play(&mut first, 12), play(&mut second, 12));
        assert_eq!(first.world.rng.seed(), 11);
        assert_eq!(first.world.rng.draws(), 12);
    }

    #[test]
    fn rejected_commands_draw_nothing() {
        let mut engine = weather_engine(4);
        let dance = ActionContext::new("dance", EntityId(0));
        engine.submit(&dance, &mut NoopObserver).unwrap();
        assert_eq!(engine.world.rng.draws(), 0);
    }
}

// ── Builder + config ──────────────────────────────────────────────────────────

#[cfg(test)]
mod setup {
    use super::*;
    use crate::{EngineError, load_config, parse_config};

    #[test]
    fn load_errors_surface_from_build() {
        let bad = BehaviorModule::builder("m")
            .hook(HookDefinition::turn_phase("turn_a").after("turn_b"))
            .hook(HookDefinition::turn_phase("turn_b").after("turn_a"))
            .build()
            .unwrap();
        let err = EngineBuilder::new(GameConfig::default())
            .source(ModuleSource::new("s", Tier::GAME).module(bad))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, EngineError::Load(_)));
    }

    #[test]
    fn module_listed_twice_on_an_entity_fails_the_build() {
        let err = EngineBuilder::new(GameConfig::default())
            .source(core_take(counter()))
            .entities(specs_with_lamp(&["core/take", "core/take"]))
            .build()
            .err()
            .unwrap();
        assert!(err.to_string().contains("more than once"), "{err}");
    }

    #[test]
    fn world_and_entity_specs_are_exclusive() {
        let world = WorldBuilder::new(0).build().unwrap();
        let err = EngineBuilder::new(GameConfig::default())
            .world(world)
            .entity(EntitySpec::new("x", "room"))
            .build()
            .err()
            .unwrap();
        assert!(matches!(err, EngineError::Builder(_)));
    }

    #[test]
    fn start_turn_from_config() {
        let config = GameConfig { start_turn: Turn(40), ..GameConfig::default() };
        let engine = EngineBuilder::new(config).build().unwrap();
        assert_eq!(engine.turn(), Turn(40));
        assert_eq!(engine.state(), EngineState::Idle);
    }

    #[test]
    fn parse_config_with_defaults() {
        let cfg = parse_config("seed = 9\n").unwrap();
        assert_eq!(cfg.seed, 9);
        assert_eq!(cfg.start_turn, Turn::ZERO);
        assert_eq!(cfg.no_action_message, ta_core::config::DEFAULT_NO_ACTION_MESSAGE);
    }

    #[test]
    fn parse_config_rejects_blank_message() {
        let err = parse_config("no_action_message = \"  \"\n").unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }

    #[test]
    fn parse_config_rejects_bad_toml() {
        assert!(matches!(parse_config("seed = \"many\"").unwrap_err(), EngineError::Toml(_)));
    }

    #[test]
    fn load_config_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.toml");
        std::fs::write(&path, "seed = 5\nstart_turn = 2\nno_action_message = \"Hm.\"\n").unwrap();
        let cfg = load_config(&path).unwrap();
        assert_eq!(cfg.start_turn, Turn(2));
        assert_eq!(cfg.no_action_message, "Hm.");

        let missing = load_config(&dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(missing, EngineError::Io(_)));
    }
}
