use std::fmt;

use anyhow::Result;
use clap::ValueEnum;
use palette::Srgb;

use crate::color::{generate_palette, named};
use crate::data::model::{Metric, Round};

// ---------------------------------------------------------------------------
// Marker shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerShape {
    Circle,
    Square,
    Diamond,
    Triangle,
}

// ---------------------------------------------------------------------------
// Preset – a named presentation mode
// ---------------------------------------------------------------------------

/// The two presentation modes of the depth summary chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Preset {
    /// Rounds 1-3; round 3 is fanned out and drawn hollow.
    #[default]
    ThreeRound,
    /// Rounds 1-2; no jitter.
    TwoRound,
}

impl Preset {
    /// Rounds drawn by this preset, in plotting order.
    pub fn rounds(self) -> &'static [Round] {
        match self {
            Preset::ThreeRound => &[Round::One, Round::Two, Round::Three],
            Preset::TwoRound => &[Round::One, Round::Two],
        }
    }

    /// Whether the series of `round` gets the jitter expansion.
    pub fn jitter_applies(self, round: Round) -> bool {
        match self {
            Preset::ThreeRound => Some(&round) == self.rounds().last(),
            Preset::TwoRound => false,
        }
    }

    pub fn marker_for(self, round: Round) -> MarkerShape {
        match (self, round) {
            (_, Round::One) => MarkerShape::Circle,
            (Preset::ThreeRound, Round::Two) => MarkerShape::Square,
            (Preset::ThreeRound, Round::Three) => MarkerShape::Diamond,
            (Preset::TwoRound, _) => MarkerShape::Triangle,
        }
    }

    /// Jittered rounds are drawn with hollow markers.
    pub fn filled_for(self, round: Round) -> bool {
        !self.jitter_applies(round)
    }

    /// One colour per metric, indexed in [`Metric::ALL`] order.
    pub fn metric_colors(self) -> Result<Vec<Srgb<u8>>> {
        match self {
            Preset::ThreeRound => ["blue", "green", "orange", "red"]
                .into_iter()
                .map(named)
                .collect(),
            Preset::TwoRound => Ok(generate_palette(Metric::ALL.len())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::ThreeRound => f.write_str("three-round"),
            Preset::TwoRound => f.write_str("two-round"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_round_jitters_only_the_last_round() {
        let p = Preset::ThreeRound;
        assert!(!p.jitter_applies(Round::One));
        assert!(!p.jitter_applies(Round::Two));
        assert!(p.jitter_applies(Round::Three));
        assert!(!p.filled_for(Round::Three));
        assert!(p.filled_for(Round::One));
    }

    #[test]
    fn two_round_never_jitters() {
        let p = Preset::TwoRound;
        assert_eq!(p.rounds(), &[Round::One, Round::Two]);
        assert!(p.rounds().iter().all(|&r| !p.jitter_applies(r)));
        assert!(!p.jitter_applies(Round::Three));
    }

    #[test]
    fn markers_follow_round_tables() {
        let p = Preset::ThreeRound;
        let shapes: Vec<_> = p.rounds().iter().map(|&r| p.marker_for(r)).collect();
        assert_eq!(
            shapes,
            vec![MarkerShape::Circle, MarkerShape::Square, MarkerShape::Diamond]
        );
        assert_eq!(Preset::TwoRound.marker_for(Round::Two), MarkerShape::Triangle);
    }

    #[test]
    fn every_preset_colours_every_metric() {
        for p in [Preset::ThreeRound, Preset::TwoRound] {
            assert_eq!(p.metric_colors().unwrap().len(), Metric::ALL.len());
        }
        assert_eq!(
            Preset::ThreeRound.metric_colors().unwrap()[0],
            Srgb::new(0, 0, 255)
        );
    }
}
