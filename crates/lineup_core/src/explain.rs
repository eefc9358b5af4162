//! Human-readable rationale for a recommendation.

use crate::analysis::DefenderAnalysis;
use crate::data::DoctrineData;
use crate::target::Objective;

/// Closing sentence for an objective.
#[must_use]
pub const fn objective_sentence(objective: Objective) -> &'static str {
    match objective {
        Objective::MinRepairTime => "Prioritizing cheap units to minimize repair time.",
        Objective::MinPowerCost => "Optimizing for low power repair costs.",
        Objective::MaxLootPerMinute => "Fast attack composition for maximum loot efficiency.",
        Objective::MaxWinChance => "Maximum firepower for highest win probability.",
    }
}

/// Explain the doctrine choice and objective in a few sentences.
///
/// Order: doctrine, then defender profile, then objective.
#[must_use]
pub fn generate_explanation(
    doctrine: &DoctrineData,
    analysis: &DefenderAnalysis,
    objective: Objective,
) -> String {
    let mut parts = vec![format!("Using {} doctrine.", doctrine.name)];

    if analysis.infantry_heavy {
        parts.push("Enemy has many infantry units - using anti-infantry counters.".to_string());
    }
    if analysis.vehicle_heavy {
        parts.push("Enemy has heavy vehicles - deploying anti-vehicle units.".to_string());
    }

    parts.push(objective_sentence(objective).to_string());
    parts.join(" ")
}
