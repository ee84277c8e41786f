//! Argument structs shared between CLI commands.

mod effect;

pub use effect::EffectArgs;
