//! NPC decision minds: timer-driven state machines issuing movement and
//! attack intent.
//!
//! Minds re-evaluate only when their decision interval elapses; the
//! engine integrates actual movement every tick. Every mind treats an
//! invisible player as "target lost" and degrades to random wandering.

mod brute;
mod skirmisher;
mod wanderer;
mod warlock;

pub use brute::BruteMind;
pub use skirmisher::SkirmisherMind;
pub use wanderer::WandererMind;
pub use warlock::WarlockMind;

use ashfall_core::ids::MindId;
use ashfall_core::registry::RegistryBuilder;

pub(crate) fn register(builder: RegistryBuilder) -> RegistryBuilder {
    builder
        .mind(MindId::Brute, || Box::new(BruteMind::new()))
        .mind(MindId::Skirmisher, || Box::new(SkirmisherMind::new()))
        .mind(MindId::Warlock, || Box::new(WarlockMind::new()))
        .mind(MindId::Wanderer, || Box::new(WandererMind::new()))
}
