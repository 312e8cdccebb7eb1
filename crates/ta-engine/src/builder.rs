//! Fluent builder for constructing an [`Engine`].

use ta_core::GameConfig;
use ta_registry::{Loader, ModuleSource};
use ta_world::{EntitySpec, World, WorldBuilder};

use crate::{Engine, EngineError, EngineResult};

/// Fluent builder for [`Engine`].
///
/// # Inputs
///
/// | Method                    | Default                                   |
/// |---------------------------|-------------------------------------------|
/// | `EngineBuilder::new(cfg)` | required                                  |
/// | `.source(s)`              | no modules (every verb is unclaimed)      |
/// | `.entity(spec)`           | no entities                               |
/// | `.world(w)`               | built from the entity specs, seeded from `cfg.seed` |
///
/// Supply either a prebuilt world (when it needs typed components) or
/// entity specs, not both.
///
/// # Example
///
/// ```rust,ignore
/// let mut engine = EngineBuilder::new(config)
///     .source(ModuleSource::new("game", Tier::GAME).module(lamp))
///     .entities(load_entities_csv(path)?)
///     .build()?;
/// let report = engine.submit(&action, &mut NoopObserver)?;
/// ```
pub struct EngineBuilder {
    config:   GameConfig,
    sources:  Vec<ModuleSource>,
    entities: Vec<EntitySpec>,
    world:    Option<World>,
}

impl EngineBuilder {
    pub fn new(config: GameConfig) -> Self {
        Self {
            config,
            sources:  Vec::new(),
            entities: Vec::new(),
            world:    None,
        }
    }

    /// Append a module source.  Supply order is load order.
    pub fn source(mut self, source: ModuleSource) -> Self {
        self.sources.push(source);
        self
    }

    pub fn entity(mut self, spec: EntitySpec) -> Self {
        self.entities.push(spec);
        self
    }

    pub fn entities(mut self, specs: impl IntoIterator<Item = EntitySpec>) -> Self {
        self.entities.extend(specs);
        self
    }

    /// Use a world built elsewhere.
    pub fn world(mut self, world: World) -> Self {
        self.world = Some(world);
        self
    }

    /// Validate the config, build the world, load and validate every module,
    /// and return an idle engine at `config.start_turn`.
    pub fn build(self) -> EngineResult<Engine> {
        self.config.validate()?;

        let world = match self.world {
            Some(_) if !self.entities.is_empty() => {
                return Err(EngineError::Builder(
                    "supply either a prebuilt world or entity specs, not both".to_owned(),
                ));
            }
            Some(w) => w,
            None => WorldBuilder::new(self.config.seed).entities(self.entities).build()?,
        };

        let registry = Loader::new().sources(self.sources).load(&world.entities)?;

        tracing::info!(
            entities = world.entities.len(),
            modules = registry.modules().len(),
            start = %self.config.start_turn,
            "engine ready"
        );
        Ok(Engine::new(self.config, world, registry))
    }
}
