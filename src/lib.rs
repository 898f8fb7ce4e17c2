//! Decoder for iCade-protocol game controllers.
//!
//! An iCade controller pretends to be a keyboard: every control sends one
//! character when pressed and a different one when released. [`ICadeReader`]
//! turns that character stream back into button edges and keeps a mask of
//! the controls currently held.

pub mod config;
pub mod icade;

pub use config::{ActivationPolicy, ConfigError, ReaderConfig};
pub use icade::{
    select_table, ButtonId, ButtonSet, CharacterTable, ICadeDelegate, ICadeEvent, ICadeReader,
    InputHost, Locale, NoopHost,
};
