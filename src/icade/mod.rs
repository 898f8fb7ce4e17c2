mod icade_reader;
mod icade_state;
mod icade_table;

pub use icade_reader::{ICadeDelegate, ICadeEvent, ICadeReader, InputHost, NoopHost};
pub use icade_state::{ButtonId, ButtonSet, BUTTON_COUNT};
pub use icade_table::{select_table, CharacterTable, Locale, TABLE_DE, TABLE_EN, TABLE_FR};
