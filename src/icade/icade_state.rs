use serde::Serialize;

/// Number of logical controls an iCade controller reports.
pub const BUTTON_COUNT: usize = 14;

/// Logical control, in protocol bit order.
///
/// `I` and `J` are the trigger extensions sent by Mocute-style pads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ButtonId {
    Up,
    Right,
    Down,
    Left,
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
}

impl ButtonId {
    pub const ALL: [ButtonId; BUTTON_COUNT] = [
        ButtonId::Up,
        ButtonId::Right,
        ButtonId::Down,
        ButtonId::Left,
        ButtonId::A,
        ButtonId::B,
        ButtonId::C,
        ButtonId::D,
        ButtonId::E,
        ButtonId::F,
        ButtonId::G,
        ButtonId::H,
        ButtonId::I,
        ButtonId::J,
    ];

    /// Bit position of this control inside a [`ButtonSet`].
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Single-bit mask for this control.
    pub fn mask(self) -> ButtonSet {
        ButtonSet::from_bits_truncate(1 << self.index())
    }
}

bitflags::bitflags! {
    /// Controls currently held down. Bit `i` belongs to `ButtonId::ALL[i]`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
    pub struct ButtonSet: u16 {
        const UP = 1 << 0;
        const RIGHT = 1 << 1;
        const DOWN = 1 << 2;
        const LEFT = 1 << 3;
        const A = 1 << 4;
        const B = 1 << 5;
        const C = 1 << 6;
        const D = 1 << 7;
        const E = 1 << 8;
        const F = 1 << 9;
        const G = 1 << 10;
        const H = 1 << 11;
        const I = 1 << 12;
        const J = 1 << 13;
    }
}

impl ButtonSet {
    pub fn is_pressed(&self, button: ButtonId) -> bool {
        self.contains(button.mask())
    }

    /// Mark `button` as held. Returns `true` if it was not held before.
    pub fn press(&mut self, button: ButtonId) -> bool {
        let changed = !self.is_pressed(button);
        self.insert(button.mask());
        changed
    }

    /// Mark `button` as released. Returns `true` if it was held before.
    pub fn release(&mut self, button: ButtonId) -> bool {
        let changed = self.is_pressed(button);
        self.remove(button.mask());
        changed
    }

    /// Held controls in bit order.
    pub fn pressed(&self) -> impl Iterator<Item = ButtonId> + '_ {
        ButtonId::ALL
            .into_iter()
            .filter(move |button| self.is_pressed(*button))
    }
}
