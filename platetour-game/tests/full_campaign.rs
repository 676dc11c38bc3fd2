use platetour_game::{
    BundledData, GameEngine, MemoryStore, Plate, ProgressEvent, Requirement, SubmitOutcome,
    VisitOutcome,
};

const WORDS: [&str; 12] = [
    "CASA", "PERRO", "GATO", "JIRAFA", "BALLENA", "ZAPATO", "QUESO", "VOLCAN", "KIWI", "XILOFONO",
    "MUNDO", "FLOR",
];

fn pick_word(plate: &Plate) -> String {
    WORDS
        .iter()
        .find(|w| plate.consonants().iter().any(|c| w.contains(*c)))
        .map_or_else(|| format!("A{}A", plate.consonants()[0]), |w| (*w).to_string())
}

#[test]
fn full_tour_wraps_and_keeps_unlocks() {
    let engine = GameEngine::new(BundledData);
    let mut session = engine.start_session(MemoryStore::new(), 0x00C0_FFEE).unwrap();
    session.set_age("9").unwrap();

    let mut reached = Vec::new();
    let mut tour_event = None;
    for _ in 0..2_000 {
        let plate = session.new_plate().clone();
        let word = pick_word(&plate);
        let SubmitOutcome::Accepted { events, .. } = session.submit(&word) else {
            panic!("{word} should be valid for {plate}");
        };
        for event in events {
            let ProgressEvent::LevelUp(up) = event else {
                continue;
            };
            reached.push(up.level);
            match &up.requirement {
                Requirement::VisitCountry(id) => {
                    assert!(up.level < 10);
                    assert_eq!(session.confirm_country_visit(id), VisitOutcome::Cleared);
                }
                Requirement::CompleteTour => {
                    assert_eq!(up.level, 10);
                    tour_event = Some(up);
                }
                Requirement::Acknowledge => panic!("bundled catalog covers every level"),
            }
        }
        if tour_event.is_some() {
            break;
        }
    }

    assert_eq!(reached, (2..=10).collect::<Vec<u8>>());
    assert!(tour_event.is_some(), "tour should finish within 2000 plates");
    let progress = session.progression().progress();
    assert_eq!(progress.level(), 10);
    assert_eq!(progress.visited_countries().len(), 8);
    let vehicles_before = progress.unlocked_vehicles().clone();
    let games_before = progress.games_played();

    let done = session.complete_tour().unwrap();
    assert_eq!(done, ProgressEvent::TourCompleted { tours_completed: 1 });
    let progress = session.progression().progress();
    assert_eq!(progress.total_points(), 0);
    assert_eq!(progress.level(), 1);
    assert_eq!(progress.unlocked_vehicles(), &vehicles_before);
    assert_eq!(progress.games_played(), games_before);
    assert!(session.progression().is_vehicle_unlocked("rocket_car"));

    let reloaded = engine.start_session(session.store().clone(), 1).unwrap();
    assert_eq!(reloaded.progression().progress(), session.progression().progress());
    assert_eq!(reloaded.profile().age, Some(9));
}

#[test]
fn points_never_decrease_during_play() {
    let engine = GameEngine::new(BundledData);
    let mut session = engine.start_session(MemoryStore::new(), 42).unwrap();
    let mut last_points = 0;
    let mut last_level = 1;
    for _ in 0..300 {
        let plate = session.new_plate().clone();
        session.submit(&pick_word(&plate));
        session.submit("ZZ");
        let progress = session.progression().progress();
        assert!(progress.total_points() >= last_points);
        assert!(progress.level() >= last_level);
        last_points = progress.total_points();
        last_level = progress.level();
    }
}
