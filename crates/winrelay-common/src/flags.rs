//! Window launch flags carried on the native window command line.
//!
//! Flags are independent bits. Any combination is accepted; how conflicting
//! combinations (e.g. fullscreen + frameless) behave is up to the toolkit.

use serde::{Deserialize, Serialize};

/// Bit set of window launch options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LaunchFlags(u32);

impl LaunchFlags {
    pub const NO_RESIZE: Self = Self(0x1);
    pub const FULLSCREEN: Self = Self(0x2);
    pub const HIDDEN: Self = Self(0x4);
    pub const FRAMELESS: Self = Self(0x8);
    pub const MINIMIZED: Self = Self(0x10);
    pub const ON_TOP: Self = Self(0x20);
    pub const CONFIRM_CLOSE: Self = Self(0x40);
    pub const TEXT_SELECT: Self = Self(0x80);
    pub const EASY_DRAG: Self = Self(0x100);
    pub const TRANSPARENT: Self = Self(0x200);

    const NAMED: &'static [(Self, &'static str)] = &[
        (Self::NO_RESIZE, "no_resize"),
        (Self::FULLSCREEN, "fullscreen"),
        (Self::HIDDEN, "hidden"),
        (Self::FRAMELESS, "frameless"),
        (Self::MINIMIZED, "minimized"),
        (Self::ON_TOP, "on_top"),
        (Self::CONFIRM_CLOSE, "confirm_close"),
        (Self::TEXT_SELECT, "text_select"),
        (Self::EASY_DRAG, "easy_drag"),
        (Self::TRANSPARENT, "transparent"),
    ];

    /// Wrap raw bits. Unknown bits are kept but have no effect.
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// True if every bit in `other` is set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Names of the known flags that are set, in bit order.
    pub fn names(self) -> Vec<&'static str> {
        Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect()
    }
}

impl std::ops::BitOr for LaunchFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for LaunchFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<u32> for LaunchFlags {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_bits_match_wire_values() {
        assert_eq!(LaunchFlags::NO_RESIZE.bits(), 0x1);
        assert_eq!(LaunchFlags::ON_TOP.bits(), 0x20);
        assert_eq!(LaunchFlags::TRANSPARENT.bits(), 0x200);
    }

    #[test]
    fn contains_checks_each_bit_independently() {
        let flags = LaunchFlags::FULLSCREEN | LaunchFlags::FRAMELESS;
        assert!(flags.contains(LaunchFlags::FULLSCREEN));
        assert!(flags.contains(LaunchFlags::FRAMELESS));
        assert!(!flags.contains(LaunchFlags::HIDDEN));
        assert!(flags.contains(LaunchFlags::empty()));
    }

    #[test]
    fn names_lists_set_flags_in_order() {
        let flags = LaunchFlags::from_bits(0x1 | 0x40 | 0x200);
        assert_eq!(flags.names(), vec!["no_resize", "confirm_close", "transparent"]);
    }

    #[test]
    fn unknown_bits_are_preserved() {
        let flags = LaunchFlags::from_bits(0x8000 | 0x2);
        assert_eq!(flags.bits(), 0x8002);
        assert_eq!(flags.names(), vec!["fullscreen"]);
    }

    #[test]
    fn serde_is_a_plain_integer() {
        let flags: LaunchFlags = serde_json::from_str("12").unwrap();
        assert_eq!(flags, LaunchFlags::HIDDEN | LaunchFlags::FRAMELESS);
        assert_eq!(serde_json::to_string(&flags).unwrap(), "12");
    }
}
