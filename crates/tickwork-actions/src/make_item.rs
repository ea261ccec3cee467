//! The "make item" amount selector.
//!
//! Production interfaces offer fixed amounts plus "X" (typed by the player)
//! and "All". A selection resolves to a fixed iteration count once the
//! actor's available inputs are known.

use std::num::NonZeroU32;

use tickwork_types::ButtonId;

/// How many products the player asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MakeAmount {
    /// One product.
    One,
    /// Five products.
    Five,
    /// Ten products.
    Ten,
    /// A typed amount.
    X(u32),
    /// As many as the inputs allow.
    All,
}

impl MakeAmount {
    /// The amount behind an interface button. `x` is the typed amount, used
    /// only by the X button.
    pub fn from_button(button: ButtonId, x: Option<u32>) -> Option<Self> {
        match button.0 {
            8893 => Some(Self::One),
            8892 => Some(Self::Five),
            8891 => Some(Self::Ten),
            8890 => x.map(Self::X),
            8889 => Some(Self::All),
            _ => None,
        }
    }

    /// Cap the request at what `available` inputs allow. `None` when
    /// nothing can be made.
    pub fn resolve(self, available: u32) -> Option<NonZeroU32> {
        let requested = match self {
            Self::One => 1,
            Self::Five => 5,
            Self::Ten => 10,
            Self::X(amount) => amount,
            Self::All => available,
        };
        NonZeroU32::new(requested.min(available))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_are_capped_by_inputs() {
        assert_eq!(MakeAmount::Ten.resolve(4).map(NonZeroU32::get), Some(4));
        assert_eq!(MakeAmount::Five.resolve(28).map(NonZeroU32::get), Some(5));
        assert_eq!(MakeAmount::All.resolve(13).map(NonZeroU32::get), Some(13));
        assert_eq!(MakeAmount::X(0).resolve(13), None);
        assert_eq!(MakeAmount::One.resolve(0), None);
    }

    #[test]
    fn buttons_map_to_amounts() {
        assert_eq!(MakeAmount::from_button(ButtonId(8893), None), Some(MakeAmount::One));
        assert_eq!(
            MakeAmount::from_button(ButtonId(8890), Some(17)),
            Some(MakeAmount::X(17))
        );
        assert_eq!(MakeAmount::from_button(ButtonId(8890), None), None);
        assert_eq!(MakeAmount::from_button(ButtonId(1), None), None);
    }
}
