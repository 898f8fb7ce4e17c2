//! Character pairs sent by the controller for each control.
//!
//! ```text
//!                 EN      FR      DE
//!  UP ON,OFF  =   w,e     z,e     w,e
//!  RT ON,OFF  =   d,c     d,c     d,c
//!  DN ON,OFF  =   x,z     x,w     x,y
//!  LT ON,OFF  =   a,q     q,a     a,q
//!  A  ON,OFF  =   y,t     y,t     z,t
//!  B  ON,OFF  =   h,r     h,r     h,r
//!  C  ON,OFF  =   u,f     u,f     u,f
//!  D  ON,OFF  =   j,n     j,n     j,n
//!  E  ON,OFF  =   i,m     i,,     i,m
//!  F  ON,OFF  =   k,p     k,p     k,p
//!  G  ON,OFF  =   o,g     o,g     o,g
//!  H  ON,OFF  =   l,v     l,v     l,v
//!  I  ON,OFF  =   [,]     [,]     [,]   left trigger
//!  J  ON,OFF  =   1,2     1,2     1,2   right trigger
//! ```

use super::icade_state::{ButtonId, BUTTON_COUNT};

/// Keyboard layout the controller's characters are interpreted under.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Fr,
    De,
}

impl Locale {
    /// Pick a layout from a locale identifier such as `de_DE` or `fr-CA`.
    /// Anything unrecognised, including no identifier at all, is English.
    pub fn from_identifier(identifier: Option<&str>) -> Self {
        match identifier {
            Some(id) if id.starts_with("de") => Locale::De,
            Some(id) if id.starts_with("fr") => Locale::Fr,
            _ => Locale::En,
        }
    }
}

/// ON and OFF characters for every control of one layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterTable {
    pub locale: Locale,
    pub on: [char; BUTTON_COUNT],
    pub off: [char; BUTTON_COUNT],
}

pub static TABLE_EN: CharacterTable = CharacterTable {
    locale: Locale::En,
    on: ['w', 'd', 'x', 'a', 'y', 'h', 'u', 'j', 'i', 'k', 'o', 'l', '[', '1'],
    off: ['e', 'c', 'z', 'q', 't', 'r', 'f', 'n', 'm', 'p', 'g', 'v', ']', '2'],
};

pub static TABLE_FR: CharacterTable = CharacterTable {
    locale: Locale::Fr,
    on: ['z', 'd', 'x', 'q', 'y', 'h', 'u', 'j', 'i', 'k', 'o', 'l', '[', '1'],
    off: ['e', 'c', 'w', 'a', 't', 'r', 'f', 'n', ',', 'p', 'g', 'v', ']', '2'],
};

pub static TABLE_DE: CharacterTable = CharacterTable {
    locale: Locale::De,
    on: ['w', 'd', 'x', 'a', 'z', 'h', 'u', 'j', 'i', 'k', 'o', 'l', '[', '1'],
    off: ['e', 'c', 'y', 'q', 't', 'r', 'f', 'n', 'm', 'p', 'g', 'v', ']', '2'],
};

/// Table for a locale identifier, falling back to English.
pub fn select_table(locale: Option<&str>) -> &'static CharacterTable {
    CharacterTable::for_locale(Locale::from_identifier(locale))
}

impl CharacterTable {
    pub fn for_locale(locale: Locale) -> &'static CharacterTable {
        match locale {
            Locale::En => &TABLE_EN,
            Locale::Fr => &TABLE_FR,
            Locale::De => &TABLE_DE,
        }
    }

    /// Control pressed by `ch`, if it is an ON character.
    pub fn button_on(&self, ch: char) -> Option<ButtonId> {
        self.on
            .iter()
            .position(|&c| c == ch)
            .and_then(ButtonId::from_index)
    }

    /// Control released by `ch`, if it is an OFF character.
    pub fn button_off(&self, ch: char) -> Option<ButtonId> {
        self.off
            .iter()
            .position(|&c| c == ch)
            .and_then(ButtonId::from_index)
    }

    pub fn on_char(&self, button: ButtonId) -> char {
        self.on[button.index()]
    }

    pub fn off_char(&self, button: ButtonId) -> char {
        self.off[button.index()]
    }

    /// Every character the controller can send, ON characters first.
    /// Hosts register one key binding per entry.
    pub fn key_inputs(&self) -> impl Iterator<Item = char> + '_ {
        self.on.iter().chain(self.off.iter()).copied()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::{select_table, CharacterTable, Locale, TABLE_DE, TABLE_EN, TABLE_FR};
    use crate::icade::icade_state::ButtonId;

    #[test]
    fn selects_table_by_prefix() {
        assert_eq!(select_table(Some("de_DE")).locale, Locale::De);
        assert_eq!(select_table(Some("de")).locale, Locale::De);
        assert_eq!(select_table(Some("fr_CA")).locale, Locale::Fr);
        assert_eq!(select_table(Some("en_US")).locale, Locale::En);
        assert_eq!(select_table(Some("")).locale, Locale::En);
        assert_eq!(select_table(Some("ja_JP")).locale, Locale::En);
        assert_eq!(select_table(None).locale, Locale::En);
    }

    #[test]
    fn tables_have_no_repeated_characters() {
        for table in [&TABLE_EN, &TABLE_FR, &TABLE_DE] {
            let unique: HashSet<char> = table.key_inputs().collect();
            assert_eq!(unique.len(), 28, "{:?} repeats a character", table.locale);
        }
    }

    #[test]
    fn english_wire_pairs() {
        let table = CharacterTable::for_locale(Locale::En);
        let pairs = [
            (ButtonId::Up, 'w', 'e'),
            (ButtonId::Right, 'd', 'c'),
            (ButtonId::Down, 'x', 'z'),
            (ButtonId::Left, 'a', 'q'),
            (ButtonId::A, 'y', 't'),
            (ButtonId::B, 'h', 'r'),
            (ButtonId::C, 'u', 'f'),
            (ButtonId::D, 'j', 'n'),
            (ButtonId::E, 'i', 'm'),
            (ButtonId::F, 'k', 'p'),
            (ButtonId::G, 'o', 'g'),
            (ButtonId::H, 'l', 'v'),
            (ButtonId::I, '[', ']'),
            (ButtonId::J, '1', '2'),
        ];
        for (button, on, off) in pairs {
            assert_eq!(table.on_char(button), on);
            assert_eq!(table.off_char(button), off);
            assert_eq!(table.button_on(on), Some(button));
            assert_eq!(table.button_off(off), Some(button));
            assert_eq!(table.button_off(on), None);
            assert_eq!(table.button_on(off), None);
        }
    }

    #[test]
    fn layouts_swap_characters() {
        assert_eq!(TABLE_FR.button_on('z'), Some(ButtonId::Up));
        assert_eq!(TABLE_FR.button_off('w'), Some(ButtonId::Down));
        assert_eq!(TABLE_FR.button_off(','), Some(ButtonId::E));
        assert_eq!(TABLE_DE.button_on('z'), Some(ButtonId::A));
        assert_eq!(TABLE_DE.button_off('y'), Some(ButtonId::Down));
        assert!(!TABLE_EN.key_inputs().any(|c| c == ','));
    }
}
