//! End-to-end guessing and learning scenarios against the seed catalog.

use car_rules::{Entity, Prefix};
use guess_core::{
    resolve, Error, KnowledgeBase, Learner, NewEntity, Outcome, Prompt, Resolver, RuleUse,
    ScriptedInformant, Session, SnapshotFile, SnapshotGateway, TieBreakTier,
};

const CENTRE_SEAT: &str = "¿El coche tiene un asiento central en el habitáculo?";

fn prefix(bits: &str) -> Prefix {
    bits.parse().unwrap()
}

#[test]
fn ambiguity_resolved_by_rule() {
    let mut kb = KnowledgeBase::new();
    kb.entities.add(Entity::parse("Pagani Zonda", "1-1-0-0-1-0").unwrap());
    kb.entities.add(Entity::parse("McLaren F1", "1-1-0-0-1-1").unwrap());
    kb.rules.set(prefix("1-1-0-0-1"), CENTRE_SEAT);

    let mut resolver = Resolver::new(&kb);
    for yes in [true, true, false, false, true] {
        resolver.answer(yes).unwrap();
    }
    assert_eq!(
        resolver.prompt(),
        Some(Prompt::Special {
            question: CENTRE_SEAT
        })
    );

    resolver.answer(true).unwrap();
    let resolution = resolver.into_resolution().unwrap();
    match resolution.outcome {
        Outcome::Unique(car) => assert_eq!(car.code.to_string(), "1-1-0-0-1-1"),
        other => panic!("expected a unique match, got {:?}", other),
    }
}

#[test]
fn special_answer_narrows_to_subset() {
    let kb = KnowledgeBase::seeded();
    let entry: Vec<_> = kb.entities.matching_prefix(prefix("0-1-0-0-1"));

    for special in [true, false] {
        let resolution = resolve(&kb, [false, true, false, false, true, special], 6).unwrap();
        let chosen = match resolution.outcome {
            Outcome::Unique(car) => vec![car],
            Outcome::Ambiguous(cars) => cars,
            Outcome::NoMatch(_) => panic!("special question can never end without a match"),
        };
        assert!(chosen.iter().all(|c| entry.contains(c)));
    }
}

#[test]
fn no_match_suggests_six_nearest() {
    let kb = KnowledgeBase::seeded();
    let query = prefix("0-1-1-1-1");
    assert!(kb.entities.matching_prefix(query).is_empty());

    let resolution = resolve(&kb, query.answers(), 6).unwrap();
    let suggestions = match resolution.outcome {
        Outcome::NoMatch(suggestions) => suggestions,
        other => panic!("expected no match, got {:?}", other),
    };

    assert_eq!(suggestions.len(), 6);
    for pair in suggestions.windows(2) {
        assert!(pair[0].distance <= pair[1].distance);
    }
    for s in &suggestions {
        assert_eq!(s.distance, query.hamming(&s.entity.prefix()));
    }
    // Porsche 959 is the first car in the catalog one answer away.
    assert_eq!(suggestions[0].entity.name, "Porsche 959");
    assert_eq!(suggestions[0].distance, 1);
}

#[test]
fn no_match_with_small_base() {
    let mut kb = KnowledgeBase::new();
    kb.entities.add(Entity::parse("Only", "1-1-1-1-1").unwrap());
    let resolution = resolve(&kb, [false; 5], 6).unwrap();
    assert!(matches!(resolution.outcome, Outcome::NoMatch(ref s) if s.len() == 1));
}

#[test]
fn learning_creates_rule_and_extends_collision() {
    let mut kb = KnowledgeBase::seeded();
    let key = prefix("1-0-1-0-1");
    assert_eq!(kb.entities.matching_prefix(key).len(), 1);
    assert!(kb.rules.get(key).is_none());

    let mut informant = ScriptedInformant::new()
        .with_question("¿El coche tiene motor V10?")
        .with_answer("Lamborghini Gallardo", true)
        .with_answer("Audi R8", false);
    let new = NewEntity::parse("Lamborghini Gallardo", "1-0-1-0-1", None).unwrap();
    let learned = Learner::new(&mut kb).add_entity(new, &mut informant).unwrap();

    assert_eq!(learned.rule, RuleUse::Created);
    assert_eq!(learned.extended, ["Audi R8"]);
    assert_eq!(kb.rules.get(key).unwrap().question, "¿El coche tiene motor V10?");
    let group = kb.entities.matching_prefix(key);
    assert_eq!(group.len(), 2);
    assert!(group.iter().all(|c| c.code.len() == 6));

    // Both are now told apart by the new question.
    let resolution = resolve(&kb, [true, false, true, false, true, false], 6).unwrap();
    assert!(matches!(resolution.outcome, Outcome::Unique(c) if c.name == "Audi R8"));
    assert_eq!(resolution.tie_break.unwrap().tier, TieBreakTier::Disambiguated);
}

#[test]
fn learning_rejects_empty_name() {
    let mut kb = KnowledgeBase::seeded();
    let before = kb.entities.len();

    let parsed = NewEntity::parse("", "1-1-1-1-1", None);
    assert!(parsed.is_err());

    let raw = NewEntity {
        name: String::new(),
        prefix: prefix("1-1-1-1-1"),
        image: None,
    };
    let result = Learner::new(&mut kb).add_entity(raw, &mut ScriptedInformant::new());
    assert!(matches!(result, Err(Error::Validation(_))));
    assert_eq!(kb.entities.len(), before);
}

#[test]
fn learned_car_survives_restart() {
    let tmp = tempfile::tempdir().unwrap();
    let path = tmp.path().join("knowledge.json");

    {
        let mut session = Session::open(SnapshotFile::new(&path));
        let new = NewEntity::parse("Lancia Stratos", "1-0-0-0-0", Some("stratos.png".into()))
            .unwrap();
        let mut informant = ScriptedInformant::new()
            .with_question("¿Ganó el Mundial de Rallyes?")
            .with_answer("Lancia Stratos", true)
            .with_answer("Alfa Romeo 8C Competizione", false);
        session.learn(new, &mut informant).unwrap();
    }

    let session = Session::open(SnapshotFile::new(&path));
    let kb = session.knowledge();
    assert_eq!(kb.entities.len(), 33);
    assert_eq!(kb, &SnapshotFile::new(&path).load().unwrap());

    let resolution = resolve(kb, [true, false, false, false, false, true], 6).unwrap();
    match resolution.outcome {
        Outcome::Unique(car) => {
            assert_eq!(car.name, "Lancia Stratos");
            assert_eq!(car.image.as_deref(), Some("stratos.png"));
        }
        other => panic!("expected a unique match, got {:?}", other),
    }
}

#[test]
fn lookups_are_idempotent() {
    let kb = KnowledgeBase::seeded();
    let p = prefix("1-1-0-0-1");
    assert_eq!(kb.entities.matching_prefix(p), kb.entities.matching_prefix(p));
    assert_eq!(kb.entities.nearest(p, 6), kb.entities.nearest(p, 6));
}
