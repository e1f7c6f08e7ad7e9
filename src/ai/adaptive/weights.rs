use std::collections::BTreeMap;
use std::fmt;
use std::ops::{Index, IndexMut};

/// Named heuristic features whose coefficients the adaptive agent learns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    // Offensive patterns
    Three,
    Two,
    TwoOpen,
    OnePotential,
    // Defensive patterns
    OppThree,
    OppTwo,
    OppTwoOpen,
    // Positional
    Center,
    CenterAdjacent,
    BottomRow,
    HeightPenalty,
    // Structural
    DoubleThreat,
    BlockedThree,
    TrapSetup,
    // Tempo and mobility
    Mobility,
    ThreatCount,
    OppThreatCount,
    // Edges
    EdgePenalty,
}

impl Feature {
    pub const COUNT: usize = 18;

    pub const ALL: [Feature; Feature::COUNT] = [
        Feature::Three,
        Feature::Two,
        Feature::TwoOpen,
        Feature::OnePotential,
        Feature::OppThree,
        Feature::OppTwo,
        Feature::OppTwoOpen,
        Feature::Center,
        Feature::CenterAdjacent,
        Feature::BottomRow,
        Feature::HeightPenalty,
        Feature::DoubleThreat,
        Feature::BlockedThree,
        Feature::TrapSetup,
        Feature::Mobility,
        Feature::ThreatCount,
        Feature::OppThreatCount,
        Feature::EdgePenalty,
    ];

    /// Key used in the persisted weight file.
    pub fn name(self) -> &'static str {
        match self {
            Feature::Three => "three",
            Feature::Two => "two",
            Feature::TwoOpen => "two_open",
            Feature::OnePotential => "one_potential",
            Feature::OppThree => "opp_three",
            Feature::OppTwo => "opp_two",
            Feature::OppTwoOpen => "opp_two_open",
            Feature::Center => "center",
            Feature::CenterAdjacent => "center_adjacent",
            Feature::BottomRow => "bottom_row",
            Feature::HeightPenalty => "height_penalty",
            Feature::DoubleThreat => "double_threat",
            Feature::BlockedThree => "blocked_three",
            Feature::TrapSetup => "trap_setup",
            Feature::Mobility => "mobility",
            Feature::ThreatCount => "threat_count",
            Feature::OppThreatCount => "opp_threat_count",
            Feature::EdgePenalty => "edge_penalty",
        }
    }

    pub fn from_name(name: &str) -> Option<Feature> {
        Feature::ALL.into_iter().find(|f| f.name() == name)
    }

    /// Built-in prior. Defensive and penalty features are negative.
    pub fn default_value(self) -> f64 {
        match self {
            Feature::Three => 100.0,
            Feature::Two => 15.0,
            Feature::TwoOpen => 25.0,
            Feature::OnePotential => 3.0,
            Feature::OppThree => -120.0,
            Feature::OppTwo => -20.0,
            Feature::OppTwoOpen => -35.0,
            Feature::Center => 5.0,
            Feature::CenterAdjacent => 3.0,
            Feature::BottomRow => 4.0,
            Feature::HeightPenalty => -2.0,
            Feature::DoubleThreat => 80.0,
            Feature::BlockedThree => -10.0,
            Feature::TrapSetup => 40.0,
            Feature::Mobility => 2.0,
            Feature::ThreatCount => 15.0,
            Feature::OppThreatCount => -20.0,
            Feature::EdgePenalty => -1.0,
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Coefficient per [`Feature`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Weights {
    values: [f64; Feature::COUNT],
}

impl Weights {
    /// The built-in default weights.
    pub fn defaults() -> Self {
        Weights {
            values: Feature::ALL.map(Feature::default_value),
        }
    }

    /// Merge a persisted mapping over the defaults. Missing keys keep their
    /// default; keys that name no known feature are ignored.
    pub fn from_map(map: &BTreeMap<String, f64>) -> Self {
        let mut weights = Self::defaults();
        for feature in Feature::ALL {
            if let Some(&value) = map.get(feature.name()) {
                if value.is_finite() {
                    weights[feature] = value;
                }
            }
        }
        weights
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        Feature::ALL
            .into_iter()
            .map(|f| (f.name().to_string(), self[f]))
            .collect()
    }

    /// Look up a weight by its persisted name.
    pub fn get(&self, name: &str) -> Option<f64> {
        Feature::from_name(name).map(|f| self[f])
    }

    /// Multiply one weight by `factor`.
    pub fn scale(&mut self, feature: Feature, factor: f64) {
        self[feature] *= factor;
    }

    /// Pull every weight `decay` of the way back toward its default.
    pub fn decay_toward_defaults(&mut self, decay: f64) {
        for feature in Feature::ALL {
            self[feature] = self[feature] * (1.0 - decay) + feature.default_value() * decay;
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Feature, f64)> + '_ {
        Feature::ALL.into_iter().map(move |f| (f, self[f]))
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Index<Feature> for Weights {
    type Output = f64;

    fn index(&self, feature: Feature) -> &f64 {
        &self.values[feature.index()]
    }
}

impl IndexMut<Feature> for Weights {
    fn index_mut(&mut self, feature: Feature) -> &mut f64 {
        &mut self.values[feature.index()]
    }
}
