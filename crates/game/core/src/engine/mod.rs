//! The engine facade: every mutation of [`GameState`] flows through here.
//!
//! [`CombatEngine`] is the authoritative reducer. The excluded game loop
//! calls [`CombatEngine::advance`] once per frame; the excluded input and
//! inventory layers call the ability, consumable, and equip entry points
//! synchronously. Cancellation is all-or-nothing at the outcome level:
//! a `Failed` outcome guarantees no mutation, and applied mutations are
//! never rolled back.

mod tick;

use crate::buffs;
use crate::clock::{Millis, PeriodicTimer};
use crate::effects::{AbilityOutcome, ConsumableOutcome};
use crate::env::Env;
use crate::error::EngineError;
use crate::events;
use crate::ids::{AbilityId, BuffId, ConsumableId, ItemId, ProjectileId, SoundId};
use crate::state::{
    ActiveItem, Combatant, CombatantId, GameState, MeleeProfile, Npc, NpcHandle, NpcSpec,
    Position, Projectile, SlotTransition, StoredItem, World, WorldEntity,
};
use crate::stats::{ResourceMeter, StatBaseline};

/// Authoritative reducer over the game state.
pub struct CombatEngine<'a> {
    state: &'a mut GameState,
}

impl<'a> CombatEngine<'a> {
    pub fn new(state: &'a mut GameState) -> Self {
        Self { state }
    }

    /// Advances the simulation by one elapsed-time slice.
    ///
    /// Fan-out order within the tick: resource regeneration, buff aging
    /// and expiry, projectiles, melee contact, NPC minds, movement
    /// integration, then tick-boundary cleanup (dead NPCs and expired
    /// projectiles are removed only here, never mid-tick).
    pub fn advance(&mut self, env: &Env, elapsed: Millis) -> Result<(), EngineError> {
        tick::advance(self.state, env, elapsed)
    }

    /// Activates an ability.
    ///
    /// Resource cost and cooldown gating are the caller's responsibility
    /// and happen before this; stun and death gating live here because
    /// they are combat state.
    pub fn activate_ability(
        &mut self,
        env: &Env,
        id: AbilityId,
    ) -> Result<AbilityOutcome, EngineError> {
        if !self.state.world.player.alive {
            return Ok(AbilityOutcome::failed("Dead"));
        }
        if self.state.world.player.combatant.stun.is_stunned() {
            return Ok(AbilityOutcome::failed("Stunned"));
        }
        let entry = env.registry.ability(id)?;
        let outcome = entry.effect.cast(self.state, env)?;
        if outcome.is_success() {
            if let Some(sound) = entry.data.sound {
                self.state.world.push_sound(sound);
            }
        }
        Ok(outcome)
    }

    /// Uses the consumable in a belt slot.
    pub fn use_consumable(
        &mut self,
        env: &Env,
        slot: usize,
    ) -> Result<ConsumableOutcome, EngineError> {
        if !self.state.world.player.alive {
            return Ok(ConsumableOutcome::Failed { reason: "Dead" });
        }
        if self.state.world.player.combatant.stun.is_stunned() {
            return Ok(ConsumableOutcome::Failed { reason: "Stunned" });
        }
        let Some(&Some(id)) = self.state.world.player.consumables.get(slot) else {
            return Ok(ConsumableOutcome::Failed {
                reason: "Nothing in that slot",
            });
        };
        let outcome = env.registry.consumable(id)?.consume(self.state, env)?;
        if outcome == ConsumableOutcome::Consumed {
            self.state.world.player.consumables[slot] = None;
            self.state.world.push_sound(SoundId::PotionConsumed);
        }
        Ok(outcome)
    }

    /// Inventory hook: the item now occupies an active slot.
    ///
    /// Idempotent: repeated calls while already applied are no-ops, so an
    /// out-of-order UI cannot double-apply stat modifiers.
    pub fn on_item_equipped(&mut self, env: &Env, id: ItemId) -> Result<(), EngineError> {
        if self.state.gear.is_applied(id) {
            return Ok(());
        }
        let effect = env.registry.item_effect(id)?;
        self.state
            .world
            .apply_stat_modifiers(CombatantId::Player, effect.modifiers(), false);
        self.state.gear.applied.insert(id);
        self.state.gear.active.push(ActiveItem { id, effect });
        Ok(())
    }

    /// Inventory hook: the item left its active slot.
    ///
    /// Idempotent: deactivating an item that is not applied is a no-op.
    pub fn on_item_unequipped(&mut self, id: ItemId) {
        if !self.state.gear.applied.remove(&id) {
            return;
        }
        if let Some(index) = self.state.gear.active.iter().position(|item| item.id == id) {
            let item = self.state.gear.active.remove(index);
            self.state
                .world
                .apply_stat_modifiers(CombatantId::Player, item.effect.modifiers(), true);
        }
    }

    /// Adds an item to the first compatible inventory slot, forwarding the
    /// activation transition through the equip hook.
    ///
    /// Returns the transition, or `None` when the inventory is full.
    pub fn give_item(
        &mut self,
        env: &Env,
        id: ItemId,
    ) -> Result<Option<SlotTransition>, EngineError> {
        let category = env.registry.item_category(id)?;
        let transition = self.state.gear.inventory.try_add(StoredItem { id, category });
        if let Some(SlotTransition::Activated(id)) = transition {
            self.on_item_equipped(env, id)?;
        }
        Ok(transition)
    }

    /// Swaps two inventory slots, forwarding any activation transitions
    /// through the equip hooks.
    pub fn switch_item_slots(&mut self, env: &Env, a: usize, b: usize) -> Result<(), EngineError> {
        let transitions = self.state.gear.inventory.switch_slots(a, b)?;
        for transition in transitions {
            match transition {
                SlotTransition::Activated(id) => self.on_item_equipped(env, id)?,
                SlotTransition::Deactivated(id) => self.on_item_unequipped(id),
                SlotTransition::Unchanged(_) => {}
            }
        }
        Ok(())
    }

    /// Puts a consumable into the first empty belt slot. False if full.
    pub fn give_consumable(&mut self, id: ConsumableId) -> bool {
        if let Some(slot) = self.state.world.player.first_empty_consumable_slot() {
            self.state.world.player.consumables[slot] = Some(id);
            return true;
        }
        false
    }

    /// Spawns an NPC from a spec, wiring up its decision mind.
    pub fn spawn_npc(
        &mut self,
        env: &Env,
        spec: &NpcSpec,
        position: Position,
    ) -> Result<NpcHandle, EngineError> {
        let mind = env.registry.mind(spec.behavior)?;
        let handle = self.state.world.allocate_npc_handle();
        let entity = WorldEntity::new(position, spec.size, crate::state::Direction::Down, spec.speed);
        let combatant = Combatant::new(
            ResourceMeter::new(spec.max_health, 0),
            None,
            StatBaseline::none(),
        );
        self.state.world.npcs.push(Npc {
            handle,
            behavior: spec.behavior,
            entity,
            combatant,
            melee: spec
                .melee
                .map(|(damage, cooldown)| MeleeProfile {
                    damage,
                    timer: PeriodicTimer::new(cooldown),
                }),
            mind: Some(mind),
            alive: true,
        });
        Ok(handle)
    }

    /// Starts (or refreshes) a buff, applying any reactions it raises.
    pub fn start_buff(
        &mut self,
        env: &Env,
        target: CombatantId,
        buff: BuffId,
        duration: Millis,
    ) -> Result<(), EngineError> {
        start_buff_now(self.state, env, target, buff, duration)
    }

    pub fn state(&self) -> &GameState {
        self.state
    }
}

/// Starts (or refreshes) a buff from the top of the call stack, draining
/// the reactions its start effect raises.
///
/// Content code running at engine level (abilities, consumables,
/// projectile controllers, minds) uses this; stored effects request
/// [`events::Reaction::StartBuff`] instead.
pub fn start_buff_now(
    state: &mut GameState,
    env: &Env,
    target: CombatantId,
    buff: BuffId,
    duration: Millis,
) -> Result<(), EngineError> {
    let mut out = Vec::new();
    {
        let GameState { world, buffs, .. } = state;
        buffs::start_buff(world, buffs, env, target, buff, duration, &mut out)?;
    }
    events::apply_reactions(state, env, out, 0)
}

/// Spawns a projectile with a fresh controller from the registry.
pub fn spawn_projectile(
    world: &mut World,
    env: &Env,
    kind: ProjectileId,
    entity: WorldEntity,
) -> Result<(), EngineError> {
    let controller = env.registry.projectile_controller(kind)?;
    world.projectiles.push(Projectile::new(kind, entity, controller));
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::combat::{self, DamageSource, DamageType};
    use crate::effects::{BuffEffect, ItemEffect, StatModifyingItem};
    use crate::env::BalanceTable;
    use crate::events::{GameEvent, Reaction, Reactions};
    use crate::registry::{ContentRegistry, RegistryBuilder};
    use crate::state::EquipCategory;
    use crate::stats::{StatKind, StatModifier};
    use crate::test_support::{OpenArena, small_world};

    struct CountingBuff {
        starts: Rc<Cell<u32>>,
        ends: Rc<Cell<u32>>,
    }

    impl BuffEffect for CountingBuff {
        fn on_start(
            &mut self,
            _target: CombatantId,
            _world: &mut World,
            _env: &Env,
            _out: &mut Reactions,
        ) {
            self.starts.set(self.starts.get() + 1);
        }

        fn on_end(
            &mut self,
            _target: CombatantId,
            _world: &mut World,
            _env: &Env,
            _out: &mut Reactions,
        ) {
            self.ends.set(self.ends.get() + 1);
        }
    }

    fn counting_registry(starts: &Rc<Cell<u32>>, ends: &Rc<Cell<u32>>) -> ContentRegistry {
        let starts = Rc::clone(starts);
        let ends = Rc::clone(ends);
        RegistryBuilder::new()
            .buff(BuffId::Swiftness, move || {
                Box::new(CountingBuff {
                    starts: Rc::clone(&starts),
                    ends: Rc::clone(&ends),
                })
            })
            .build_unvalidated()
    }

    #[test]
    fn refresh_resets_duration_without_rerunning_start() {
        let starts = Rc::new(Cell::new(0));
        let ends = Rc::new(Cell::new(0));
        let registry = counting_registry(&starts, &ends);
        let balance = BalanceTable::default();
        let oracle = OpenArena;
        let env = Env::new(&oracle, &oracle, &registry, &balance);

        let mut state = small_world(3);
        let mut engine = CombatEngine::new(&mut state);
        engine
            .start_buff(&env, CombatantId::Player, BuffId::Swiftness, Millis(3000))
            .unwrap();
        engine.advance(&env, Millis(1000)).unwrap();
        assert_eq!(
            engine.state().buffs.player.remaining(BuffId::Swiftness),
            Some(Millis(2000))
        );

        engine
            .start_buff(&env, CombatantId::Player, BuffId::Swiftness, Millis(3000))
            .unwrap();
        assert_eq!(starts.get(), 1, "start effect must not re-run on refresh");
        assert_eq!(
            engine.state().buffs.player.remaining(BuffId::Swiftness),
            Some(Millis(3000))
        );
    }

    #[test]
    fn buff_expires_on_the_exact_tick_and_ends_once() {
        let starts = Rc::new(Cell::new(0));
        let ends = Rc::new(Cell::new(0));
        let registry = counting_registry(&starts, &ends);
        let balance = BalanceTable::default();
        let oracle = OpenArena;
        let env = Env::new(&oracle, &oracle, &registry, &balance);

        let mut state = small_world(3);
        let mut engine = CombatEngine::new(&mut state);
        engine
            .start_buff(&env, CombatantId::Player, BuffId::Swiftness, Millis(3000))
            .unwrap();
        engine.advance(&env, Millis(1000)).unwrap();
        engine.advance(&env, Millis(1000)).unwrap();
        assert!(engine.state().buffs.player.has(BuffId::Swiftness));
        engine.advance(&env, Millis(1000)).unwrap();
        assert!(!engine.state().buffs.player.has(BuffId::Swiftness));
        assert_eq!(ends.get(), 1);

        engine.advance(&env, Millis(1000)).unwrap();
        assert_eq!(ends.get(), 1, "end effect must run at most once");
    }

    struct StunningBuff;

    impl BuffEffect for StunningBuff {
        fn on_start(
            &mut self,
            target: CombatantId,
            world: &mut World,
            _env: &Env,
            _out: &mut Reactions,
        ) {
            if let Some(combatant) = world.combatant_mut(target) {
                combatant.stun.add_one();
            }
        }

        fn on_end(
            &mut self,
            target: CombatantId,
            world: &mut World,
            _env: &Env,
            _out: &mut Reactions,
        ) {
            if let Some(combatant) = world.combatant_mut(target) {
                combatant.stun.remove_one();
            }
        }
    }

    #[test]
    fn stunned_player_cannot_act() {
        let registry = RegistryBuilder::new()
            .buff(BuffId::StunnedByStomp, || Box::new(StunningBuff))
            .build_unvalidated();
        let balance = BalanceTable::default();
        let oracle = OpenArena;
        let env = Env::new(&oracle, &oracle, &registry, &balance);

        let mut state = small_world(3);
        let mut engine = CombatEngine::new(&mut state);
        engine
            .start_buff(&env, CombatantId::Player, BuffId::StunnedByStomp, Millis(500))
            .unwrap();
        assert_eq!(
            engine.activate_ability(&env, AbilityId::Firebolt).unwrap(),
            AbilityOutcome::failed("Stunned")
        );
        assert_eq!(
            engine.use_consumable(&env, 0).unwrap(),
            ConsumableOutcome::Failed { reason: "Stunned" }
        );

        engine.advance(&env, Millis(500)).unwrap();
        assert!(!engine.state().world.player.combatant.stun.is_stunned());
    }

    #[test]
    fn item_modifiers_apply_and_remove_exactly_once() {
        let registry = RegistryBuilder::new()
            .item(ItemId::SigilRing, EquipCategory::Ring, || {
                Box::new(StatModifyingItem::new(vec![StatModifier::flat(
                    StatKind::Armor,
                    3,
                )]))
            })
            .build_unvalidated();
        let balance = BalanceTable::default();
        let oracle = OpenArena;
        let env = Env::new(&oracle, &oracle, &registry, &balance);

        let mut state = small_world(3);
        let mut engine = CombatEngine::new(&mut state);
        let transition = engine.give_item(&env, ItemId::SigilRing).unwrap();
        assert_eq!(transition, Some(SlotTransition::Activated(ItemId::SigilRing)));
        assert_eq!(
            engine.state().world.player.combatant.sheet.value(StatKind::Armor),
            3
        );

        // Ring slot is 5 in the standard layout; 6 is storage.
        engine.switch_item_slots(&env, 5, 6).unwrap();
        assert_eq!(
            engine.state().world.player.combatant.sheet.value(StatKind::Armor),
            0
        );

        // Deactivating again while already inactive is a no-op.
        engine.on_item_unequipped(ItemId::SigilRing);
        assert_eq!(
            engine.state().world.player.combatant.sheet.value(StatKind::Armor),
            0
        );
    }

    /// An item that answers every damage event with more damage: the
    /// worst-case reactive loop the depth cap exists for.
    struct ChainItem;

    impl ItemEffect for ChainItem {
        fn is_reactive(&self) -> bool {
            true
        }

        fn handle_event(&mut self, event: &GameEvent, _world: &mut World, out: &mut Reactions) {
            if let GameEvent::PlayerDealtDamage { npc, .. } = event {
                out.push(Reaction::DealDamage {
                    attacker: Some(CombatantId::Player),
                    defender: CombatantId::Npc(*npc),
                    amount: 1,
                    damage_type: DamageType::Magic,
                    source: DamageSource::Melee,
                });
            }
        }
    }

    #[test]
    fn reactive_chains_are_depth_capped() {
        let registry = RegistryBuilder::new()
            .item(ItemId::SigilRing, EquipCategory::Ring, || Box::new(ChainItem))
            .build_unvalidated();
        let balance = BalanceTable::default();
        let oracle = OpenArena;
        let env = Env::new(&oracle, &oracle, &registry, &balance);

        let mut state = small_world(3);
        CombatEngine::new(&mut state)
            .give_item(&env, ItemId::SigilRing)
            .unwrap();

        let npc = state.world.npcs[0].handle;
        combat::apply_combat_damage(
            &mut state,
            &env,
            Some(CombatantId::Player),
            CombatantId::Npc(npc),
            1,
            DamageType::Magic,
            DamageSource::Melee,
            0,
        )
        .unwrap();

        // One hit per depth 0..=limit+1, then the chain is cut.
        let limit = balance.reactive_depth_limit;
        let expected_hits = limit + 2;
        assert_eq!(
            state.world.npc(npc).unwrap().combatant.health.value(),
            40 - expected_hits
        );
        let dealt_events = state
            .world
            .event_log
            .iter()
            .filter(|event| matches!(event, GameEvent::PlayerDealtDamage { .. }))
            .count();
        assert_eq!(dealt_events as u32, limit + 1);
    }
}
