use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    // Deep space
    SpaceBackground,
    Fog,
    VoidBlack,

    // Stars
    StarWhite,
    StarBlue,
    StarWarm,
    WarpStreak,

    // Black hole
    EventHorizon,
    PhotonRing,
    AccretionHot,
    AccretionCool,

    // Planet
    PlanetSurface,
    PlanetGrid,
    Atmosphere,
    AtmosphereOuter,
    PlanetRing,
    RingGlow,
    Moon,

    // Content panels
    Primary,
    Accent,
    TextPrimary,
    TextMuted,
    PanelGlass,
    PanelBorder,
    TagBackground,
    Available,

    // Progress indicator
    IndicatorTrack,
    IndicatorFill,
    IndicatorPast,
}
