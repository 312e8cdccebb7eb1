//! `lantern` — a scripted walk through a one-room adventure.
//!
//! Two module sources:
//!
//! | Source | Tier | Modules                                             |
//! |--------|------|-----------------------------------------------------|
//! | game   | 1    | `game/lantern` (light verb + burn phase), `game/lantern_look` |
//! | core   | 3    | `core/describe`, `core/take`, `core/wait`, `core/clock` |
//!
//! `turn_lamp_burn` (game) is ordered after `turn_clock_tick` (core), a hook
//! from a source loaded later.
//!
//! ```text
//! RUST_LOG=ta_engine=debug cargo run -p lantern
//! ```

use std::io::Cursor;

use anyhow::{Context, bail};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ta_behavior::{
    Applicability, BehaviorError, BehaviorModule, HookDefinition, Manifest, VerbDecl,
};
use ta_core::{ActionContext, EntityId, EventResult, HandlerResult, Tier, Turn};
use ta_engine::{Engine, EngineBuilder, PhaseOutcome, TurnObserver, TurnReport, parse_config};
use ta_registry::ModuleSource;
use ta_world::{WorldBuilder, load_entities_reader};

// ── Game data ─────────────────────────────────────────────────────────────────

const CONFIG: &str = r#"
seed              = 7
no_action_message = "Nothing obvious happens."
"#;

const ENTITIES: &str = "\
name,kind,location,behaviors
cellar,room,,
player,actor,cellar,
lantern,item,cellar,game/lantern_look core/describe
crate,container,cellar,core/describe
";

const LANTERN_MANIFEST: &str = r#"
[[hook_definitions]]
hook_id         = "turn_lamp_burn"
invocation_kind = "turn_phase"
after           = ["turn_clock_tick"]
description     = "Lit lamps burn one unit of fuel."

[[events]]
event = "on_lamp_burn"
hook  = "turn_lamp_burn"

[[verbs]]
word            = "light"
event           = "cmd_light"
synonyms        = ["ignite"]
object_required = true
"#;

const SCRIPT: &[&str] = &[
    "look",
    "examine lantern",
    "take",
    "take lantern",
    "light crate",
    "ignite lantern",
    "examine lantern",
    "wait",
    "wait",
    "xyzzy",
    "examine lantern",
];

/// Lamp state.  Entities that never had any read as dark and empty.
#[derive(Default, Debug)]
struct Lamp {
    fuel: u32,
    lit:  bool,
}

// ── Modules ───────────────────────────────────────────────────────────────────

fn game_source() -> anyhow::Result<ModuleSource> {
    let lantern = BehaviorModule::builder("game/lantern")
        .manifest(Manifest::from_toml_str(LANTERN_MANIFEST)?)
        .on_command("cmd_light", |ctx, world| {
            let Some(obj) = ctx.target else { return Ok(Applicability::NotApplicable) };
            let Some(lamp) = world.entities.get_mut::<Lamp>(obj) else {
                return Ok(Applicability::NotApplicable);
            };
            if lamp.fuel == 0 {
                return Ok(Applicability::NotApplicable);
            }
            if lamp.lit {
                return Ok(Applicability::failure("It is already lit."));
            }
            lamp.lit = true;
            Ok(Applicability::success("The lantern flares to life."))
        })
        .on_event("on_lamp_burn", |_ctx, world| {
            let lantern = world
                .entities
                .find("lantern")
                .ok_or_else(|| BehaviorError::Handler("the lantern is missing".to_owned()))?;
            let Some(lamp) = world.entities.get_mut::<Lamp>(lantern) else {
                return Ok(EventResult::neutral());
            };
            if !lamp.lit {
                return Ok(EventResult::neutral());
            }
            lamp.fuel = lamp.fuel.saturating_sub(1);
            let fuel = lamp.fuel;
            if fuel == 0 {
                lamp.lit = false;
            }
            Ok(match fuel {
                0 => EventResult::allow("The lantern gutters out."),
                1 => EventResult::allow("The lantern flickers."),
                _ if world.rng.percent(40) => EventResult::allow("Shadows sway in the lamplight."),
                _ => EventResult::neutral(),
            })
        })
        .build()?;

    let lantern_look = BehaviorModule::builder("game/lantern_look")
        .event("on_examine", "entity_examine", |ctx, world| {
            let lit = ctx
                .target
                .and_then(|e| world.entities.get::<Lamp>(e))
                .is_some_and(|l| l.lit);
            Ok(EventResult::allow(if lit { "It glows warmly" } else { "It is dark and cold" }))
        })
        .build()?;

    Ok(ModuleSource::new("game", Tier::GAME).module(lantern).module(lantern_look))
}

fn core_source() -> anyhow::Result<ModuleSource> {
    let describe = BehaviorModule::builder("core/describe")
        .hook(HookDefinition::entity("entity_examine").describe("Something is looked at."))
        .command(VerbDecl::new("examine", "cmd_examine").synonym("x"), |ctx, world| {
            Ok(match ctx.target.and_then(|e| world.entities.name(e)) {
                Some(name) => Applicability::success(format!("You look at the {name}.")),
                None => Applicability::failure("Examine what?"),
            })
        })
        .event("on_examine", "entity_examine", |ctx, world| {
            let kind = ctx.target.and_then(|e| world.entities.kind(e)).unwrap_or("thing");
            Ok(EventResult::allow(format!("It is an ordinary {kind}")))
        })
        .build()?;

    let take = BehaviorModule::builder("core/take")
        .command(VerbDecl::new("take", "cmd_take").synonym("get").requires_object(), |ctx, world| {
            let Some(obj) = ctx.target else { return Ok(Applicability::failure("Take what?")) };
            if !world.entities.is_kind(obj, "item") {
                return Ok(Applicability::failure("That is not something you can carry."));
            }
            world.entities.move_to(obj, ctx.action.actor_id);
            let item = world.entities.name(obj).unwrap_or_default();
            Ok(Applicability::Applicable(HandlerResult::success("Taken.").with_data("item", item)))
        })
        .build()?;

    let wait = BehaviorModule::builder("core/wait")
        .command(VerbDecl::new("wait", "cmd_wait").synonym("z"), |_ctx, _world| {
            Ok(Applicability::success("Time passes."))
        })
        .build()?;

    let clock = BehaviorModule::builder("core/clock")
        .hook(HookDefinition::turn_phase("turn_clock_tick").describe("Ambient time effects."))
        .event("on_clock_tick", "turn_clock_tick", |ctx, _world| {
            Ok(if ctx.turn.0 % 3 == 0 {
                EventResult::allow("A distant bell tolls.")
            } else {
                EventResult::neutral()
            })
        })
        .build()?;

    Ok(ModuleSource::new("core", Tier::CORE).modules([describe, take, wait, clock]))
}

// ── Transcript ────────────────────────────────────────────────────────────────

struct Transcript;

impl TurnObserver for Transcript {
    fn on_phase(&mut self, turn: Turn, outcome: &PhaseOutcome) {
        if let Some(text) = &outcome.result.feedback {
            println!("    [{turn} {}] {text}", outcome.hook);
        }
    }

    fn on_turn_end(&mut self, report: &TurnReport) {
        let by = report.claimed_by.as_ref().map_or("-".to_owned(), ToString::to_string);
        println!("  {} ({by}, {})", report.command.message, report.turn);
    }
}

/// Split `line` into a verb and an optional object name, check the object
/// requirement against the registry, and build the action.
fn parse(engine: &Engine, player: EntityId, line: &str) -> Result<ActionContext, String> {
    let mut words = line.split_whitespace();
    let verb = words.next().unwrap_or_default();
    let object = words.next();

    let mut action = ActionContext::new(verb, player).with_field("raw", line);
    if let Some(info) = engine.registry().verb(verb)
        && info.object_required
        && object.is_none()
    {
        return Err(format!("What do you want to {}?", info.word));
    }
    if let Some(name) = object {
        let Some(obj) = engine.world.entities.find(name) else {
            return Err(format!("You see no {name} here."));
        };
        action = action.with_object(obj);
    }
    Ok(action)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lantern=info,ta_engine=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = parse_config(CONFIG).context("parsing game config")?;
    let specs = load_entities_reader(Cursor::new(ENTITIES)).context("loading entities")?;

    let mut world = WorldBuilder::new(config.seed)
        .register_component::<Lamp>()
        .entities(specs)
        .build()?;
    let Some(lantern) = world.entities.find("lantern") else { bail!("no lantern entity") };
    if let Some(lamp) = world.entities.get_mut::<Lamp>(lantern) {
        lamp.fuel = 3;
    }

    let mut engine = EngineBuilder::new(config)
        .source(game_source()?)
        .source(core_source()?)
        .world(world)
        .build()
        .context("loading behavior modules")?;

    let order: Vec<String> =
        engine.registry().execution_order().iter().map(ToString::to_string).collect();
    tracing::info!(order = %order.join(" -> "), "turn phases");

    let Some(player) = engine.world.entities.find("player") else { bail!("no player entity") };
    let mut transcript = Transcript;

    for line in SCRIPT {
        println!("> {line}");
        let action = match parse(&engine, player, line) {
            Ok(action) => action,
            Err(reply) => {
                println!("  {reply}");
                continue;
            }
        };

        let report = engine.submit(&action, &mut transcript)?;

        let examined = engine.registry().verb(&action.verb).is_some_and(|v| v.word == "examine");
        if report.command.success
            && examined
            && let Some(obj) = action.object_ref
        {
            let seen = engine.invoke(Some(obj), "on_examine", &action)?;
            if let Some(text) = seen.feedback {
                println!("  {text}.");
            }
        }
    }

    tracing::info!(clock = %engine.clock, draws = engine.world.rng.draws(), "script finished");
    Ok(())
}
