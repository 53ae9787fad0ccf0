//! Property tests: classification and routing are pure functions of their input

use lawbook_domain::{Collection, LawDomain};
use lawbook_gatekeeper::{DomainClassifier, GatekeeperConfig, RecordRouter};
use proptest::prelude::*;

fn legal_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("劳动合同".to_string()),
            Just("原告".to_string()),
            Just("被告".to_string()),
            Just("专利".to_string()),
            Just("犯罪".to_string()),
            Just("诉".to_string()),
            Just("案".to_string()),
            Just("\n第一条".to_string()),
            "[\u{4e00}-\u{4e5f}]{1,8}",
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    /// Property: repeated classification never changes the result
    #[test]
    fn test_classifier_idempotent(title in legal_text(), content in legal_text()) {
        let classifier = DomainClassifier::default();
        let first = classifier.classify(&title, &content);
        for _ in 0..3 {
            prop_assert_eq!(classifier.classify(&title, &content), first);
        }
    }

    /// Property: repeated routing never changes the result
    #[test]
    fn test_router_idempotent(title in legal_text(), content in legal_text()) {
        let router = RecordRouter::new(&GatekeeperConfig::default()).unwrap();
        let first = router.decide(&title, &content);
        for _ in 0..3 {
            prop_assert_eq!(router.decide(&title, &content), first);
        }
    }

    /// Property: a regulation-shaped title always routes to statutes
    #[test]
    fn test_regulation_title_wins(stem in "[\u{4e00}-\u{4e5f}]{1,10}", content in legal_text()) {
        let router = RecordRouter::new(&GatekeeperConfig::default()).unwrap();
        let title = format!("中华人民共和国{}法", stem);
        prop_assert_eq!(router.route(&title, &content), Collection::Statute);
    }

    /// Property: the winning domain has the highest score
    #[test]
    fn test_winner_has_top_score(title in legal_text(), content in legal_text()) {
        let classifier = DomainClassifier::default();
        let scores = classifier.scores(&title, &content);
        let winner = classifier.classify(&title, &content);
        let top = scores.iter().map(|(_, s)| *s).max().unwrap_or(0);
        if top == 0 {
            prop_assert_eq!(winner, LawDomain::DEFAULT);
        } else {
            let winner_score = scores.iter().find(|(d, _)| *d == winner).map(|(_, s)| *s);
            prop_assert_eq!(winner_score, Some(top));
        }
    }
}
