//! Score and risk heuristics.
//!
//! Neither number predicts a battle outcome. They rank candidate lineups
//! for one target. Score is higher-is-better, risk lower-is-better, and
//! both are clamped to `[0, 100]`.

use crate::analysis::DefenderAnalysis;
use crate::catalog::UnitCatalog;
use crate::lineup::{army_size, lineup_cost, LineupUnit};
use crate::math::{clamp_rating, Fixed, RATING_MAX, RATING_MIN};
use crate::target::{Objective, TargetType};

/// Starting point for both ratings.
pub const BASE_RATING: i32 = 50;

/// Score bonus per cheap lineup entry under the repair objectives.
pub const CHEAP_UNIT_BONUS: i32 = 10;
/// Loot objective: total cost is divided by this...
pub const LOOT_COST_DIVISOR: i32 = 10;
/// ...and capped at this.
pub const LOOT_BONUS_CAP: i32 = 30;
/// Win objective: total cost is divided by this...
pub const WIN_COST_DIVISOR: i32 = 8;
/// ...and capped at this.
pub const WIN_BONUS_CAP: i32 = 40;

/// Damage multiplier (percent) a unit must exceed to count as a counter.
pub const COUNTER_THRESHOLD_PERCENT: u16 = 120;
/// Score bonus per countering entry and threat.
pub const COUNTER_BONUS: i32 = 5;

/// Risk added per weighted defender.
pub const RISK_PER_DEFENDER: i64 = 2;
/// Risk removed per deployed unit.
pub const RISK_PER_ATTACKER: i64 = 2;
/// Risk added for base targets.
pub const BASE_TARGET_RISK: i64 = 20;
/// Risk removed for camp targets.
pub const CAMP_TARGET_RISK: i64 = 10;

/// Rate how well a lineup suits an objective against a defense.
#[must_use]
pub fn calculate_score(
    catalog: &UnitCatalog,
    lineup: &[LineupUnit],
    objective: Objective,
    analysis: &DefenderAnalysis,
) -> Fixed {
    let mut score = Fixed::from_num(BASE_RATING);
    let total_cost = Fixed::from_num(lineup_cost(catalog, lineup));

    score += match objective {
        Objective::MinRepairTime | Objective::MinPowerCost => {
            let cheap = lineup
                .iter()
                .filter(|u| catalog.get(&u.unit_key).is_some_and(|s| s.is_cheap()))
                .count();
            Fixed::from_num(cheap) * Fixed::from_num(CHEAP_UNIT_BONUS)
        }
        Objective::MaxLootPerMinute => {
            (total_cost / Fixed::from_num(LOOT_COST_DIVISOR)).min(Fixed::from_num(LOOT_BONUS_CAP))
        }
        Objective::MaxWinChance => {
            (total_cost / Fixed::from_num(WIN_COST_DIVISOR)).min(Fixed::from_num(WIN_BONUS_CAP))
        }
    };

    // Score only grows from here, so stop counting once it is already capped.
    for unit in lineup {
        if score >= Fixed::from_num(RATING_MAX) {
            break;
        }
        let Some(stats) = catalog.get(&unit.unit_key) else {
            continue;
        };
        for threat in analysis.dominant_threats() {
            if stats
                .damage_against(threat)
                .is_some_and(|m| m > COUNTER_THRESHOLD_PERCENT)
            {
                score += Fixed::from_num(COUNTER_BONUS);
            }
        }
    }

    clamp_rating(score)
}

/// Rate how likely a lineup is to fail against a target.
#[must_use]
pub fn calculate_risk(
    lineup: &[LineupUnit],
    analysis: &DefenderAnalysis,
    target_type: TargetType,
) -> u32 {
    let mut risk = i64::from(BASE_RATING);
    risk += RISK_PER_DEFENDER * i64::from(analysis.total_strength);
    risk -= RISK_PER_ATTACKER * i64::from(army_size(lineup));

    match target_type {
        TargetType::Base => risk += BASE_TARGET_RISK,
        TargetType::Camp => risk -= CAMP_TARGET_RISK,
        TargetType::Outpost => {}
    }

    let clamped = risk.clamp(i64::from(RATING_MIN), i64::from(RATING_MAX));
    u32::try_from(clamped).unwrap_or(0)
}
