//! A running combat session: state, validated content, oracles, and the
//! tracing mirror of the core's event sink.

use ashfall_core::clock::Millis;
use ashfall_core::effects::{AbilityOutcome, ConsumableOutcome};
use ashfall_core::engine::CombatEngine;
use ashfall_core::env::{BalanceTable, Env};
use ashfall_core::error::EngineError;
use ashfall_core::events::GameEvent;
use ashfall_core::ids::{AbilityId, BuffId, ConsumableId, ItemId, SoundId};
use ashfall_core::registry::{ContentRegistry, RegistryError};
use ashfall_core::state::{
    Combatant, CombatantId, Direction, GameState, ItemInventory, NpcHandle, NpcSpec, PlayerState,
    Position, Size, SlotTransition, VisualEffect, WorldEntity,
};
use ashfall_core::stats::{ResourceMeter, StatBaseline};

use crate::arena::ArenaWorld;

/// Initial player parameters.
#[derive(Clone, Debug)]
pub struct PlayerSpec {
    pub position: Position,
    pub size: Size,
    pub speed: u32,
    pub max_health: u32,
    pub health_regen: i32,
    pub max_mana: u32,
    pub mana_regen: i32,
    pub baseline: StatBaseline,
}

impl Default for PlayerSpec {
    fn default() -> Self {
        Self {
            position: Position::new(400, 400),
            size: Size::new(30, 30),
            speed: 100,
            max_health: 100,
            health_regen: 0,
            max_mana: 60,
            mana_regen: 1,
            baseline: StatBaseline::none(),
        }
    }
}

/// Everything needed to start a session.
pub struct SessionConfig {
    pub seed: u64,
    pub balance: BalanceTable,
    pub arena: ArenaWorld,
    pub player: PlayerSpec,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            seed: 0,
            balance: BalanceTable::default(),
            arena: ArenaWorld::open(1600, 1200),
            player: PlayerSpec::default(),
        }
    }
}

/// Presentation data produced since the last drain.
#[derive(Debug, Default)]
pub struct FrameOutput {
    pub visuals: Vec<VisualEffect>,
    pub sounds: Vec<SoundId>,
    pub events: Vec<GameEvent>,
}

/// An owned, running simulation.
pub struct Session {
    pub state: GameState,
    registry: ContentRegistry,
    balance: BalanceTable,
    arena: ArenaWorld,
}

impl Session {
    /// Builds the full content registry (validating completeness) and an
    /// initial state with just the player in the arena.
    pub fn new(config: SessionConfig) -> Result<Self, RegistryError> {
        let registry = ashfall_content::register_all()?;
        let spec = config.player;
        let entity = WorldEntity::new(spec.position, spec.size, Direction::Down, spec.speed);
        let mut health = ResourceMeter::new(spec.max_health, 0);
        health.regen_per_second = spec.health_regen;
        let mut mana = ResourceMeter::new(spec.max_mana, 0);
        mana.regen_per_second = spec.mana_regen;
        let combatant = Combatant::new(health, Some(mana), spec.baseline);
        let state = GameState::new(
            config.seed,
            PlayerState::new(entity, combatant),
            ItemInventory::standard(),
        );
        Ok(Self {
            state,
            registry,
            balance: config.balance,
            arena: config.arena,
        })
    }

    /// Runs a closure with the state and a borrowed environment. The
    /// escape hatch for tests and tools that drive core functions
    /// directly.
    pub fn with_env<R>(&mut self, f: impl FnOnce(&mut GameState, &Env<'_>) -> R) -> R {
        let env = Env::new(&self.arena, &self.arena, &self.registry, &self.balance);
        f(&mut self.state, &env)
    }

    /// Advances the simulation by one frame's elapsed time.
    pub fn advance(&mut self, elapsed: Millis) -> Result<(), EngineError> {
        self.with_env(|state, env| CombatEngine::new(state).advance(env, elapsed))
    }

    pub fn activate_ability(&mut self, id: AbilityId) -> Result<AbilityOutcome, EngineError> {
        let outcome =
            self.with_env(|state, env| CombatEngine::new(state).activate_ability(env, id))?;
        match outcome {
            AbilityOutcome::Succeeded { refund } => {
                tracing::debug!(ability = ?id, refund, "ability cast");
            }
            AbilityOutcome::Failed { reason } => {
                tracing::debug!(ability = ?id, reason, "ability failed");
            }
        }
        Ok(outcome)
    }

    pub fn use_consumable(&mut self, slot: usize) -> Result<ConsumableOutcome, EngineError> {
        self.with_env(|state, env| CombatEngine::new(state).use_consumable(env, slot))
    }

    pub fn give_item(&mut self, id: ItemId) -> Result<Option<SlotTransition>, EngineError> {
        self.with_env(|state, env| CombatEngine::new(state).give_item(env, id))
    }

    pub fn give_consumable(&mut self, id: ConsumableId) -> bool {
        let mut engine = CombatEngine::new(&mut self.state);
        engine.give_consumable(id)
    }

    pub fn on_item_equipped(&mut self, id: ItemId) -> Result<(), EngineError> {
        self.with_env(|state, env| CombatEngine::new(state).on_item_equipped(env, id))
    }

    pub fn on_item_unequipped(&mut self, id: ItemId) {
        CombatEngine::new(&mut self.state).on_item_unequipped(id);
    }

    pub fn switch_item_slots(&mut self, a: usize, b: usize) -> Result<(), EngineError> {
        self.with_env(|state, env| CombatEngine::new(state).switch_item_slots(env, a, b))
    }

    pub fn spawn_npc(&mut self, spec: &NpcSpec, position: Position) -> Result<NpcHandle, EngineError> {
        let handle =
            self.with_env(|state, env| CombatEngine::new(state).spawn_npc(env, spec, position))?;
        tracing::debug!(npc = handle.0, behavior = ?spec.behavior, "spawned NPC");
        Ok(handle)
    }

    pub fn start_buff(
        &mut self,
        target: CombatantId,
        buff: BuffId,
        duration: Millis,
    ) -> Result<(), EngineError> {
        self.with_env(|state, env| {
            CombatEngine::new(state).start_buff(env, target, buff, duration)
        })
    }

    /// Drains the presentation sinks, mirroring combat events into
    /// `tracing` on the way out.
    pub fn drain_frame(&mut self) -> FrameOutput {
        let world = &mut self.state.world;
        let output = FrameOutput {
            visuals: std::mem::take(&mut world.visuals),
            sounds: std::mem::take(&mut world.sounds),
            events: std::mem::take(&mut world.event_log),
        };
        for event in &output.events {
            log_event(event);
        }
        output
    }
}

fn log_event(event: &GameEvent) {
    match event {
        GameEvent::EnemyDied { npc } => {
            tracing::info!(npc = npc.0, "enemy died");
        }
        GameEvent::PlayerDied => {
            tracing::info!("player died");
        }
        GameEvent::PlayerLostHealth { amount } => {
            tracing::debug!(amount, "player lost health");
        }
        GameEvent::PlayerHealed { amount } => {
            tracing::debug!(amount, "player healed");
        }
        GameEvent::PlayerDealtDamage {
            npc,
            amount,
            source,
        } => {
            tracing::debug!(npc = npc.0, amount, ?source, "player dealt damage");
        }
        GameEvent::PlayerBlocked { attacker } => {
            tracing::debug!(attacker = attacker.map(|npc| npc.0), "attack blocked");
        }
        GameEvent::PlayerDodged { attacker } => {
            tracing::debug!(attacker = attacker.map(|npc| npc.0), "attack dodged");
        }
    }
}
