//! Outcome-conditioned weight nudging.
//!
//! This is a hand-tuned rule, not a gradient step. Each branch scales a few
//! weights by `1 + k * learning_rate` depending on which statistics the game
//! produced. Losses react faster than wins relax.

use super::stats::{GameResult, GameStats};
use super::weights::{Feature, Weights};

/// Apply the outcome-specific multipliers. Decay toward the defaults is a
/// separate step, see [`Weights::decay_toward_defaults`].
pub fn adjust_weights(weights: &mut Weights, result: GameResult, stats: &GameStats, lr: f64) {
    let boost = |k: f64| 1.0 + lr * k;

    match result {
        GameResult::Win => {
            if stats.my_threes > stats.opp_threes {
                weights.scale(Feature::Three, boost(1.0));
            }
            if stats.my_twos > stats.opp_twos {
                weights.scale(Feature::Two, boost(0.7));
            }
            if stats.my_open_twos > 0 {
                weights.scale(Feature::TwoOpen, boost(1.0));
            }
            if stats.my_double_threats > 0 {
                weights.scale(Feature::DoubleThreat, boost(1.0));
                weights.scale(Feature::TrapSetup, boost(0.5));
            }
            if stats.center_control > 0 {
                weights.scale(Feature::Center, boost(0.5));
                weights.scale(Feature::CenterAdjacent, boost(0.3));
            }
            if stats.bottom_control > 0 {
                weights.scale(Feature::BottomRow, boost(0.3));
            }

            // Relax defense a little after a win.
            weights.scale(Feature::OppThree, boost(-0.2));
            weights.scale(Feature::OppTwo, boost(-0.2));
        }
        GameResult::Loss => {
            weights.scale(Feature::OppThree, boost(1.2));
            weights.scale(Feature::OppTwo, boost(0.8));
            if stats.opp_open_twos > stats.my_open_twos {
                weights.scale(Feature::OppTwoOpen, boost(1.0));
            }
            if stats.opp_double_threats > stats.my_double_threats {
                weights.scale(Feature::DoubleThreat, boost(0.5));
            }

            if stats.my_threes < stats.opp_threes {
                weights.scale(Feature::Three, boost(0.5));
            }
            if stats.center_control < 0 {
                weights.scale(Feature::Center, boost(0.7));
                weights.scale(Feature::CenterAdjacent, boost(0.5));
            }

            if stats.edge_pieces > 3 {
                weights.scale(Feature::EdgePenalty, boost(0.5));
            }
            if stats.high_pieces > 3 {
                weights.scale(Feature::HeightPenalty, boost(0.3));
            }

            weights.scale(Feature::Mobility, boost(0.3));
        }
        GameResult::Draw => {
            weights.scale(Feature::Three, boost(0.2));
            weights.scale(Feature::ThreatCount, boost(0.1));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LR: f64 = 0.03;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn win_boosts_only_gated_features() {
        let mut w = Weights::defaults();
        let stats = GameStats {
            my_threes: 3,
            opp_threes: 1,
            my_open_twos: 1,
            center_control: 2,
            ..Default::default()
        };
        adjust_weights(&mut w, GameResult::Win, &stats, LR);

        assert!(close(w[Feature::Three], 103.0));
        assert!(close(w[Feature::TwoOpen], 25.75));
        assert!(close(w[Feature::Center], 5.075));
        assert!(close(w[Feature::CenterAdjacent], 3.027));
        // Gates not met
        assert_eq!(w[Feature::Two], 15.0);
        assert_eq!(w[Feature::DoubleThreat], 80.0);
        assert_eq!(w[Feature::BottomRow], 4.0);
        // Defense relaxes: -120 * (1 - 0.006)
        assert!(close(w[Feature::OppThree], -119.28));
        assert!(close(w[Feature::OppTwo], -19.88));
    }

    #[test]
    fn loss_strengthens_defense_unconditionally() {
        let mut w = Weights::defaults();
        adjust_weights(&mut w, GameResult::Loss, &GameStats::default(), LR);

        assert!(close(w[Feature::OppThree], -124.32));
        assert!(close(w[Feature::OppTwo], -20.48));
        assert!(close(w[Feature::Mobility], 2.018));
        assert_eq!(w[Feature::Three], 100.0);
        assert_eq!(w[Feature::OppTwoOpen], -35.0);
        assert_eq!(w[Feature::EdgePenalty], -1.0);
    }

    #[test]
    fn loss_gated_features() {
        let mut w = Weights::defaults();
        let stats = GameStats {
            my_threes: 1,
            opp_threes: 4,
            opp_open_twos: 2,
            opp_double_threats: 1,
            center_control: -3,
            edge_pieces: 4,
            high_pieces: 5,
            ..Default::default()
        };
        adjust_weights(&mut w, GameResult::Loss, &stats, LR);

        assert!(close(w[Feature::Three], 101.5));
        assert!(close(w[Feature::OppTwoOpen], -36.05));
        assert!(close(w[Feature::DoubleThreat], 81.2));
        assert!(close(w[Feature::Center], 5.105));
        assert!(close(w[Feature::CenterAdjacent], 3.045));
        assert!(close(w[Feature::EdgePenalty], -1.015));
        assert!(close(w[Feature::HeightPenalty], -2.018));
    }

    #[test]
    fn draw_nudges_aggression() {
        let mut w = Weights::defaults();
        adjust_weights(&mut w, GameResult::Draw, &GameStats::default(), LR);
        assert!(close(w[Feature::Three], 100.6));
        assert!(close(w[Feature::ThreatCount], 15.045));
        assert_eq!(w[Feature::OppThree], -120.0);
    }
}
