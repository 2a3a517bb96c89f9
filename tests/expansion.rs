// tests/expansion.rs
use lsys_render::{Grammar, LSystem, LsysError, preprocess};

const BRANCHING: &str = "\
# branching test grammar
90          # rotation angle, degrees
3           # generations, axiom included
F
F F[+F]F
";

#[test]
fn parse_reads_header_and_rules() {
    let system = LSystem::parse_str(BRANCHING).unwrap();
    let grammar = system.grammar();

    assert_eq!(grammar.angle_degrees, 90.0);
    assert_eq!(grammar.target_generations, 3);
    assert_eq!(grammar.axiom(), "F");
    assert_eq!(grammar.rules[&'F'], "F[+F]F");
    assert_eq!(system.generation_count(), 3);
}

#[test]
fn generations_are_successive_rewrites() {
    let system = LSystem::parse_str(BRANCHING).unwrap();

    assert_eq!(system.generation(0), Some("F"));
    assert_eq!(system.generation(1), Some("F[+F]F"));
    assert_eq!(system.generation(2), Some("F[+F]F[+F[+F]F]F[+F]F"));
    assert_eq!(system.generation(3), None);
}

#[test]
fn zero_target_still_expands_the_axiom() {
    let system = LSystem::parse_str("90\n0\nF+F\n").unwrap();
    assert_eq!(system.generation_count(), 1);
    assert_eq!(system.generation(0), Some("F+F"));
    // Axiom geometry exists even though no iterations were requested.
    assert_eq!(system.record(0).map(|r| r.count), Some(4));
}

#[test]
fn triadic_rule_follows_length_recurrence() {
    // F -> F+F-F triples the F count per generation; every F adds four
    // characters, so the length obeys len(n) = 2 * 3^n - 1.
    let system = LSystem::parse_str("60\n5\nF\nF F+F-F\n").unwrap();
    assert_eq!(system.generation_count(), 5);

    for (n, generation) in system.grammar().generations().iter().enumerate() {
        let f_count = generation.chars().filter(|&c| c == 'F').count();
        assert_eq!(f_count, 3usize.pow(n as u32), "F count at generation {n}");
        assert_eq!(
            generation.chars().count(),
            2 * 3usize.pow(n as u32) - 1,
            "length at generation {n}"
        );
    }
}

#[test]
fn source_round_trips_through_serialization() {
    let first = Grammar::parse(&preprocess(BRANCHING)).unwrap();
    let second = Grammar::parse(&first.to_source()).unwrap();

    assert_eq!(second.angle_degrees, first.angle_degrees);
    assert_eq!(second.target_generations, first.target_generations);
    assert_eq!(second.axiom(), first.axiom());
    assert_eq!(second.rules, first.rules);
}

#[test]
fn invalid_angle_is_a_parse_error() {
    let err = LSystem::parse_str("ninety\n2\nF\n").unwrap_err();
    assert!(matches!(err, LsysError::InvalidAngle(_)));
}

#[test]
fn negative_generation_count_is_a_parse_error() {
    let err = LSystem::parse_str("90\n-1\nF\n").unwrap_err();
    assert!(matches!(err, LsysError::InvalidGenerationCount(_)));
}

#[test]
fn missing_axiom_is_a_parse_error() {
    let err = LSystem::parse_str("90\n2\n# only comments follow\n").unwrap_err();
    assert!(matches!(err, LsysError::MissingAxiom));
}

#[test]
fn rule_without_replacement_is_a_parse_error() {
    let err = LSystem::parse_str("90\n2\nF\nF\n").unwrap_err();
    assert!(matches!(err, LsysError::MalformedRule { .. }));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = LSystem::parse_file("does/not/exist.lsys").unwrap_err();
    assert!(matches!(err, LsysError::Io(_)));
}
