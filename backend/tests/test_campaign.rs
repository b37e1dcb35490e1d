//! Campaign loop integration tests
//!
//! Hiring from applicant sources, assignment, one full event and the hand-off
//! to the next day.

use stadium_security_core_rs::staffing::record::RecordFeed;
use stadium_security_core_rs::{
    ApplicantSource, Campaign, CampaignError, FallbackApplicantSource, GameConfig, GamePhase,
    LocalApplicantGenerator, RngManager,
};

fn harmless_config(num_gates: usize) -> GameConfig {
    let mut config = GameConfig::default();
    config.num_gates = num_gates;
    config.engine.arrivals.fake_id_probability = 0.0;
    config.engine.arrivals.fake_ticket_probability = 0.0;
    config.engine.arrivals.mte_probability = 0.0;
    config.engine.queue_penalty.penalty = 0.0;
    config
}

#[test]
fn test_full_day_then_next_day() {
    let mut campaign = Campaign::new(harmless_config(3)).unwrap();
    let mut applicants = LocalApplicantGenerator::new(RngManager::new(8));

    for staff in applicants.applicants(4).unwrap() {
        campaign.hire(staff).unwrap();
    }
    campaign.finish_hiring().unwrap();
    assert_eq!(campaign.auto_assign().unwrap(), 3);
    assert!(campaign.gates().iter().all(|g| g.is_staffed()));
    campaign.finish_assignment().unwrap();

    let mut event = campaign.start_event(99).unwrap();
    assert_eq!(campaign.phase(), GamePhase::Event);
    event.set_all_gates(true).unwrap();
    let report = event.run_to_completion().unwrap();

    assert!(!report.ended_early);
    assert!(report.guests_processed > 0);
    assert_eq!(campaign.complete_event(report.clone()).unwrap(), GamePhase::PostEvent);
    assert_eq!(campaign.budget(), 7500);
    assert_eq!(campaign.reputation(), report.final_reputation);
    assert_eq!(campaign.last_report(), Some(&report));

    campaign.next_event().unwrap();
    assert_eq!(campaign.day(), 2);
    assert_eq!(campaign.phase(), GamePhase::Hiring);
    assert_eq!(campaign.roster().len(), 4);
    assert!(campaign.gates().iter().all(|g| !g.is_staffed()));
}

#[test]
fn test_event_cannot_start_before_briefing() {
    let mut campaign = Campaign::new(harmless_config(2)).unwrap();
    assert!(matches!(
        campaign.start_event(1),
        Err(CampaignError::WrongPhase {
            expected: GamePhase::EventBriefing,
            actual: GamePhase::Hiring
        })
    ));
}

#[test]
fn test_bad_records_fall_back_to_local_applicants() {
    let json = r#"[
        {"firstName": "Ana", "lastName": "Silva", "age": 80, "gender": "Female",
         "physicalStrength": 14, "communication": 6, "observation": 9,
         "reliability": 90, "focusSustainability": 70, "quitRisk": 3},
        {"firstName": "Bad", "lastName": "Record", "age": 30, "gender": "Robot",
         "physicalStrength": 5, "communication": 5, "observation": 5,
         "reliability": 70, "focusSustainability": 70, "quitRisk": 5},
        {"not": "an applicant"}
    ]"#;
    let feed = RecordFeed::from_json_str(json, RngManager::new(3)).unwrap();
    let local = LocalApplicantGenerator::new(RngManager::new(4));
    let mut source = FallbackApplicantSource::new(feed, local);

    let hired = source.applicants(5).unwrap();

    assert_eq!(hired.len(), 5);
    assert_eq!(hired[0].full_name(), "Ana Silva");
    assert_eq!(hired[0].age(), 65);
    assert_eq!(hired[0].stats().physical_strength(), 10);
    // one rejected gender, one malformed record, two after the feed ran dry
    assert_eq!(source.fallbacks_used(), 4);

    let mut campaign = Campaign::new(harmless_config(2)).unwrap();
    for staff in hired {
        campaign.hire(staff).unwrap();
    }
    assert_eq!(campaign.roster().len(), 5);
}
