use anyhow::{Result, ensure};
use regex::Regex;

use crate::bot::BotStrategy;
use crate::simulation::{SimulationPlan, SimulationSummary};

/// Named plan the logic tester can run.
#[derive(Debug, Clone)]
pub struct TestScenario {
    pub name: String,
    pub plan: SimulationPlan,
}

impl TestScenario {
    #[must_use]
    pub fn simulation(name: impl Into<String>, plan: SimulationPlan) -> Self {
        Self {
            name: name.into(),
            plan,
        }
    }
}

fn smoke_expectation(summary: &SimulationSummary) -> Result<()> {
    ensure!(!summary.plates.is_empty(), "No plates were drawn");
    ensure!(summary.words_accepted > 0, "No word was accepted");
    ensure!(summary.final_points > 0, "No points were banked");
    ensure!(summary.points_monotonic, "Point total went down during play");
    Ok(())
}

const PLATE_PATTERN: &str = r"^[0-9]{4}-[BCDFGHJKLMNPQRSTVWXYZ]{3}$";

fn plate_shape_expectation(summary: &SimulationSummary) -> Result<()> {
    let plate_regex = Regex::new(PLATE_PATTERN)?;
    for plate in &summary.plates {
        ensure!(
            plate_regex.is_match(plate),
            "Plate '{plate}' doesn't match expected format"
        );
    }
    let sixes = summary
        .plates
        .iter()
        .filter(|p| p.starts_with("6666-"))
        .count();
    ensure!(
        u32::try_from(sixes).unwrap_or(u32::MAX) == summary.special_plates,
        "Special plate count {} does not match {sixes} plates numbered 6666",
        summary.special_plates
    );
    ensure!(
        summary.words_accepted == u32::try_from(summary.plates.len()).unwrap_or(u32::MAX),
        "Every plate should end with one accepted word"
    );
    Ok(())
}

fn tour_expectation(summary: &SimulationSummary) -> Result<()> {
    ensure!(summary.tour_completed, "Tour was not completed");
    ensure!(
        summary.levels_reached == (2..=10).collect::<Vec<u8>>(),
        "Levels reached out of order: {:?}",
        summary.levels_reached
    );
    ensure!(summary.final_level == 1, "Tour completion should return to level 1");
    ensure!(
        summary.visited_countries.len() == 8,
        "Expected 8 visited countries, saw {}",
        summary.visited_countries.len()
    );
    ensure!(
        summary.unlocked_vehicles.iter().any(|v| v == "rocket_car"),
        "Top vehicle should stay unlocked after the tour"
    );
    Ok(())
}

fn drive_expectation(summary: &SimulationSummary) -> Result<()> {
    ensure!(summary.drives_started > 0, "No drive was started");
    ensure!(
        summary.drives_arrived == summary.drives_started,
        "{} of {} drives missed the destination",
        summary.drives_started - summary.drives_arrived,
        summary.drives_started
    );
    Ok(())
}

fn sloppy_expectation(summary: &SimulationSummary) -> Result<()> {
    smoke_expectation(summary)?;
    ensure!(summary.words_rejected > 0, "Sloppy bot should miss sometimes");
    Ok(())
}

fn persistence_expectation(summary: &SimulationSummary) -> Result<()> {
    ensure!(
        summary.reload_matches == Some(true),
        "Reloaded progress differs from the finished run"
    );
    Ok(())
}

pub fn get_scenario(name: &str) -> Option<TestScenario> {
    let scenario = match name.to_lowercase().as_str() {
        "smoke" => TestScenario::simulation(
            "Smoke Test",
            SimulationPlan::new(BotStrategy::Eager)
                .with_max_plates(50)
                .with_expectation(smoke_expectation),
        ),
        "plates" | "plate-shape" => TestScenario::simulation(
            "Plate Shape",
            SimulationPlan::new(BotStrategy::Eager)
                .with_max_plates(500)
                .with_expectation(plate_shape_expectation),
        ),
        "tour" | "world-tour" => TestScenario::simulation(
            "World Tour",
            SimulationPlan::new(BotStrategy::Greedy)
                .with_max_plates(2_000)
                .with_age("7")
                .completing_tour()
                .with_expectation(tour_expectation),
        ),
        "drive" | "drive-routes" => TestScenario::simulation(
            "Drive Routes",
            SimulationPlan::new(BotStrategy::Eager)
                .with_max_plates(300)
                .driving_routes()
                .with_expectation(drive_expectation),
        ),
        "sloppy" => TestScenario::simulation(
            "Sloppy Typist",
            SimulationPlan::new(BotStrategy::Sloppy)
                .with_max_plates(100)
                .with_expectation(sloppy_expectation),
        ),
        "persistence" | "reload" => TestScenario::simulation(
            "Persistence Reload",
            SimulationPlan::new(BotStrategy::Eager)
                .with_max_plates(80)
                .with_age("9")
                .persisted()
                .with_expectation(persistence_expectation),
        ),
        _ => return None,
    };
    Some(scenario)
}

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    vec![
        ("smoke", "Smoke Test"),
        ("plates", "Plate Shape"),
        ("tour", "World Tour"),
        ("drive", "Drive Routes"),
        ("sloppy", "Sloppy Typist"),
        ("persistence", "Persistence Reload"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_listed_scenario_resolves() {
        for (key, name) in list_scenarios() {
            let scenario = get_scenario(key).unwrap();
            assert_eq!(scenario.name, name);
            assert!(!scenario.plan.expectations.is_empty());
        }
        assert!(get_scenario("nope").is_none());
    }

    #[test]
    fn smoke_expectation_flags_empty_runs() {
        let empty = SimulationSummary::default();
        assert!(smoke_expectation(&empty).is_err());
    }

    #[test]
    fn plate_shape_rejects_vowels_and_short_numbers() {
        let mut summary = SimulationSummary {
            plates: vec!["0427-BZT".to_string(), "6666-GWK".to_string()],
            special_plates: 1,
            words_accepted: 2,
            ..SimulationSummary::default()
        };
        assert!(plate_shape_expectation(&summary).is_ok());

        summary.plates[0] = "0427-BAT".to_string();
        assert!(plate_shape_expectation(&summary).is_err());
        summary.plates[0] = "427-BZT".to_string();
        assert!(plate_shape_expectation(&summary).is_err());
        summary.plates[0] = "0427-bzt".to_string();
        assert!(plate_shape_expectation(&summary).is_err());
    }
}
