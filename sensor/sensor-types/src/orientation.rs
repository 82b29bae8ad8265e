//! Device and interface orientation enums.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical attitude of the device, ignoring any software orientation lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DeviceOrientation {
    /// No reading has been classified yet.
    #[default]
    Unknown,
    /// Upright, top edge up.
    Portrait,
    /// Upside down, top edge down.
    PortraitUpsideDown,
    /// On its side, right edge down.
    LandscapeLeft,
    /// On its side, left edge down.
    LandscapeRight,
    /// Flat, screen facing up.
    FaceUp,
    /// Flat, screen facing down.
    FaceDown,
}

impl DeviceOrientation {
    /// Every variant, in declaration order.
    pub const ALL: [Self; 7] = [
        Self::Unknown,
        Self::Portrait,
        Self::PortraitUpsideDown,
        Self::LandscapeLeft,
        Self::LandscapeRight,
        Self::FaceUp,
        Self::FaceDown,
    ];

    /// Returns `true` for either portrait orientation.
    #[must_use]
    pub const fn is_portrait(self) -> bool {
        matches!(self, Self::Portrait | Self::PortraitUpsideDown)
    }

    /// Returns `true` for either landscape orientation.
    #[must_use]
    pub const fn is_landscape(self) -> bool {
        matches!(self, Self::LandscapeLeft | Self::LandscapeRight)
    }

    /// Returns `true` when the device lies flat (face up or face down).
    #[must_use]
    pub const fn is_flat(self) -> bool {
        matches!(self, Self::FaceUp | Self::FaceDown)
    }

    /// Returns `true` if this orientation determines an interface orientation.
    #[must_use]
    pub const fn is_valid_interface_orientation(self) -> bool {
        self.is_portrait() || self.is_landscape()
    }
}

impl std::fmt::Display for DeviceOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Portrait => write!(f, "portrait"),
            Self::PortraitUpsideDown => write!(f, "portrait upside down"),
            Self::LandscapeLeft => write!(f, "landscape left"),
            Self::LandscapeRight => write!(f, "landscape right"),
            Self::FaceUp => write!(f, "face up"),
            Self::FaceDown => write!(f, "face down"),
        }
    }
}

/// Orientation that on-screen content should be drawn in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum InterfaceOrientation {
    /// No portrait or landscape reading has been seen yet.
    #[default]
    Unknown,
    /// Content upright.
    Portrait,
    /// Content upside down.
    PortraitUpsideDown,
    /// Content rotated for a device turned right edge up.
    LandscapeLeft,
    /// Content rotated for a device turned left edge up.
    LandscapeRight,
}

impl InterfaceOrientation {
    /// Maps a device orientation to the interface orientation it implies.
    ///
    /// Landscape is inverted: turning the device to the left rotates the
    /// content to the right, so `DeviceOrientation::LandscapeLeft` maps to
    /// `InterfaceOrientation::LandscapeRight` and vice versa.
    ///
    /// Returns `None` for `Unknown`, `FaceUp` and `FaceDown`; those readings
    /// say nothing about how content should be drawn.
    ///
    /// # Example
    ///
    /// ```
    /// use sensor_types::{DeviceOrientation, InterfaceOrientation};
    ///
    /// assert_eq!(
    ///     InterfaceOrientation::from_device(DeviceOrientation::LandscapeLeft),
    ///     Some(InterfaceOrientation::LandscapeRight)
    /// );
    /// assert_eq!(InterfaceOrientation::from_device(DeviceOrientation::FaceUp), None);
    /// ```
    #[must_use]
    pub const fn from_device(device: DeviceOrientation) -> Option<Self> {
        match device {
            DeviceOrientation::Portrait => Some(Self::Portrait),
            DeviceOrientation::PortraitUpsideDown => Some(Self::PortraitUpsideDown),
            DeviceOrientation::LandscapeLeft => Some(Self::LandscapeRight),
            DeviceOrientation::LandscapeRight => Some(Self::LandscapeLeft),
            DeviceOrientation::Unknown | DeviceOrientation::FaceUp | DeviceOrientation::FaceDown => {
                None
            }
        }
    }

    /// Returns `true` for either portrait orientation.
    #[must_use]
    pub const fn is_portrait(self) -> bool {
        matches!(self, Self::Portrait | Self::PortraitUpsideDown)
    }

    /// Returns `true` for either landscape orientation.
    #[must_use]
    pub const fn is_landscape(self) -> bool {
        matches!(self, Self::LandscapeLeft | Self::LandscapeRight)
    }
}

impl std::fmt::Display for InterfaceOrientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown"),
            Self::Portrait => write!(f, "portrait"),
            Self::PortraitUpsideDown => write!(f, "portrait upside down"),
            Self::LandscapeLeft => write!(f, "landscape left"),
            Self::LandscapeRight => write!(f, "landscape right"),
        }
    }
}
