#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::time::Duration;

    use itertools::Itertools;
    use num_complex::Complex64;
    use rstest::rstest;
    use strum::VariantArray;

    use crate::analytic::{AnalyticConfig, AnalyticSolver};
    use crate::bank::{Difficulty, PuzzleBank};
    use crate::canonical::{canonicalize, is_nice_representative, nice_representative, NiceProgress, Stage};
    use crate::configuration::{Configuration, Vertex};
    use crate::group::{CayleyGraph, GROUP_ORDER};
    use crate::moves::{apply_all, format_sequence, invert_sequence, parse_sequence, script_of, Letter, Move, Sign};
    use crate::search::{find_path, PathSearch, SearchLimits, Stop};
    use crate::{Engine, Error, Goal};

    fn key(s: &str) -> Configuration {
        s.parse().unwrap()
    }

    fn mv(s: &str) -> Move {
        s.parse().unwrap()
    }

    fn order_two() -> Configuration {
        key("3,0|0,0|0,0|0,0|0,0")
    }

    fn samples() -> Vec<Configuration> {
        vec![
            Configuration::ZERO,
            Configuration::from_reals([1; 5]),
            Configuration::from_pairs([(4, 2), (-3, 1), (5, 0), (0, 2), (-1, 0)]),
            Configuration::from_pairs([(-7, 3), (2, -2), (0, 9), (11, -4), (1, 1)]),
            Configuration::from_pairs([(0, -1), (0, 0), (-2, 0), (0, 5), (3, 3)]),
        ]
    }

    #[test]
    fn single_move_deltas() {
        assert_eq!(mv("A0").apply(&Configuration::ZERO), key("1,1|0,-1|0,0|0,0|0,-1"));
        assert_eq!(mv("B2").apply(&Configuration::ZERO), key("0,0|1,0|-1,1|1,0|0,0"));
        assert_eq!(mv("C4").apply(&Configuration::ZERO), key("0,1|0,0|0,0|0,1|-1,-1"));
        assert_eq!(mv("D1").apply(&Configuration::ZERO), key("-1,0|1,-1|-1,0|0,0|0,0"));
    }

    #[test]
    fn letters_are_units_times_a() {
        for letter in [Letter::A, Letter::B, Letter::C, Letter::D] {
            assert_eq!(letter.self_delta(), letter.unit() * Letter::A.self_delta());
            assert_eq!(letter.neighbor_delta(), letter.unit() * Letter::A.neighbor_delta());
        }
    }

    #[test]
    fn moves_are_invertible() {
        for configuration in samples() {
            for m in Move::all() {
                assert_eq!(m.inverse().apply(&m.apply(&configuration)), configuration, "{m} on {configuration}");
            }
            for vertex in Vertex::ALL {
                let a = Move::new(vertex, Letter::A).apply(&configuration);
                assert_eq!(Move::new(vertex, Letter::C).apply(&a), configuration);
                let b = Move::new(vertex, Letter::B).apply(&configuration);
                assert_eq!(Move::new(vertex, Letter::D).apply(&b), configuration);
            }
        }
    }

    #[test]
    fn moves_commute() {
        let configuration = samples()[3];
        for (first, second) in Move::all().tuple_combinations() {
            assert_eq!(
                second.apply(&first.apply(&configuration)),
                first.apply(&second.apply(&configuration)),
                "{first} and {second}",
            );
        }
    }

    #[test]
    fn sequences_depend_only_on_their_script() {
        let moves = parse_sequence("A0 B3 D3 C1 A4 A4 B0").unwrap();
        let shuffled = parse_sequence("A4 B0 C1 A0 A4 D3 B3").unwrap();
        assert_eq!(script_of(&moves), script_of(&shuffled));
        assert_eq!(apply_all(&Configuration::ZERO, &moves), apply_all(&Configuration::ZERO, &shuffled));

        let start = samples()[2];
        let there = apply_all(&start, &moves);
        assert_eq!(apply_all(&there, &invert_sequence(&moves)), start);
    }

    #[test]
    fn all_moves_in_tie_break_order() {
        let all = Move::all().collect_vec();
        assert_eq!(all.len(), 20);
        assert_eq!(format_sequence(&all[..6]), "A0 B0 C0 D0 A1 B1");
        assert_eq!(all[19], mv("D4"));
    }

    #[test]
    fn generator_and_sign_view() {
        assert_eq!(Letter::C.generator_and_sign(), (Letter::A, Sign::Minus));
        assert_eq!(Letter::B.generator_and_sign(), (Letter::B, Sign::Plus));
        assert_eq!(Move::signed(Vertex::new(3).unwrap(), Letter::B, Sign::Minus), mv("D3"));
        for letter in [Letter::A, Letter::B, Letter::C, Letter::D] {
            let (generator, sign) = letter.generator_and_sign();
            assert_eq!(Letter::from_generator(generator, sign), letter);
        }
    }

    #[rstest]
    #[case("E1")]
    #[case("a0")]
    fn unknown_letters_are_rejected(#[case] input: &str) {
        assert!(matches!(input.parse::<Move>(), Err(Error::UnknownLetter(_))));
    }

    #[test]
    fn letters_parse_from_symbols() {
        assert_eq!(Letter::from_symbol("C").unwrap(), Letter::C);
        assert!(matches!(Letter::from_symbol("c"), Err(Error::UnknownLetter(letter)) if letter == "c"));
        assert!(matches!(Letter::from_symbol("AB"), Err(Error::UnknownLetter(_))));
        assert!(matches!("é1".parse::<Move>(), Err(Error::UnknownLetter(letter)) if letter == "é"));
        assert!(matches!("D12".parse::<Move>(), Err(Error::InvalidVertex(12))));
    }

    #[rstest]
    #[case("")]
    #[case("A")]
    #[case("Ax")]
    #[case("A-1")]
    fn malformed_moves_are_rejected(#[case] input: &str) {
        assert!(matches!(input.parse::<Move>(), Err(Error::ParseMove(_))));
    }

    #[test]
    fn vertices_are_never_wrapped() {
        assert!(matches!(Vertex::new(5), Err(Error::InvalidVertex(5))));
        assert!(matches!("B7".parse::<Move>(), Err(Error::InvalidVertex(7))));
        assert_eq!(Vertex::new(4).unwrap().neighbors(), [Vertex::new(3).unwrap(), Vertex::new(0).unwrap()]);
        assert!(Vertex::new(0).unwrap().is_adjacent_to(Vertex::new(4).unwrap()));
        assert!(!Vertex::new(0).unwrap().is_adjacent_to(Vertex::new(2).unwrap()));
    }

    #[test]
    fn key_round_trip() {
        let text = "1,-2|0,0|3,1|0,0|-1,0";
        let configuration = key(text);
        assert_eq!(configuration[Vertex::new(2).unwrap()], num_complex::Complex::new(3, 1));
        assert_eq!(configuration.to_string(), text);
        assert_eq!(serde_json::to_string(&configuration).unwrap(), format!("\"{text}\""));
    }

    #[rstest]
    #[case("0,0|0,0|0,0|0,0")]
    #[case("0,0|0,0|0,0|0,0|0,0|0,0")]
    #[case("0,0|0,0|0,0|0,0|0")]
    #[case("+1,0|0,0|0,0|0,0|0,0")]
    #[case(" 1,0|0,0|0,0|0,0|0,0")]
    #[case("1.5,0|0,0|0,0|0,0|0,0")]
    #[case("1,0|0,0|0,0|0,0|0,x")]
    #[case("2147483647,0|0,0|0,0|0,0|0,0")]
    #[case("0,0|0,-1000000001|0,0|0,0|0,0")]
    #[case("0,0|0,0|-2147483648,0|0,0|0,0")]
    #[case("0,0|0,0|0,0|0,0|0,99999999999")]
    fn malformed_keys_are_rejected(#[case] input: &str) {
        assert!(matches!(input.parse::<Configuration>(), Err(Error::ParseConfiguration { .. })));
    }

    #[test]
    fn keys_at_the_component_bound_are_playable() {
        let edge = key("1000000000,0|0,-1000000000|0,0|0,0|0,0");
        assert_eq!(edge.max_component(), Configuration::MAX_COMPONENT);
        let moved = mv("B1").apply(&edge);
        assert_eq!(moved.to_string(), "1000000001,0|-1,-999999999|1,0|0,0|0,0");
        assert_eq!(mv("D1").apply(&moved), edge);
        assert_eq!(nice_representative(&moved, Vertex::DISTINGUISHED), nice_representative(&edge, Vertex::DISTINGUISHED));
    }

    #[test]
    fn canonicalization_never_overflows() {
        let opposite = Configuration::from_pairs([(0, 1_500_000_000), (0, -1_500_000_000), (0, 0), (0, 0), (0, 0)]);
        let canonical = canonicalize(&opposite, Vertex::DISTINGUISHED);
        assert_eq!(canonical.representative, Configuration::ZERO);
        assert_eq!(canonical.steps.len(), Stage::VARIANTS.len());
        // 3e9 real chips on vertex 0 after compensation do not fit the trace
        assert_eq!(canonical.steps[1].after[Vertex::DISTINGUISHED].re, i32::MAX);

        // six chips on one vertex are in the identity's class
        let largest = Configuration::from_reals([i32::MAX, 0, 0, 0, 0]);
        let expected = nice_representative(&Configuration::from_reals([i32::MAX % 6, 0, 0, 0, 0]), Vertex::DISTINGUISHED);
        assert_eq!(nice_representative(&largest, Vertex::DISTINGUISHED), expected);
        assert_eq!(expected, key("3,0|2,0|2,0|2,0|2,0"));

        let smallest = Configuration::from_pairs([(i32::MIN, i32::MIN); 5]);
        assert!(is_nice_representative(&nice_representative(&smallest, Vertex::new(2).unwrap()), Vertex::new(2).unwrap()));
    }

    #[test]
    fn search_start_already_at_goal() {
        let outcome = find_path(&Configuration::ZERO, &Goal::exact(Configuration::ZERO), SearchLimits::default());
        assert!(outcome.found);
        assert!(outcome.moves.is_empty());
        assert_eq!(outcome.nodes_explored, 0);
        assert_eq!(outcome.stop, Stop::Reached);
    }

    #[test]
    fn search_single_move() {
        let goal = mv("A0").apply(&Configuration::ZERO);
        let outcome = find_path(&Configuration::ZERO, &Goal::exact(goal), SearchLimits::hint().with_max_depth(3));
        assert!(outcome.found);
        assert_eq!(outcome.moves, vec![mv("A0")]);
    }

    #[test]
    fn search_reaches_a_nice_representative() {
        let start = key("1,1|0,-1|0,0|0,0|0,-1");
        let outcome = find_path(&start, &Goal::NiceRepresentative { distinguished: Vertex::DISTINGUISHED }, SearchLimits::hint());
        assert_eq!(outcome.moves, vec![mv("C0")]);
    }

    #[test]
    fn search_prefers_earlier_moves_among_equals() {
        // A0 A1 and A1 A0 both work; vertex order decides
        let goal = apply_all(&Configuration::ZERO, &[mv("A1"), mv("A0")]);
        let outcome = find_path(&Configuration::ZERO, &Goal::exact(goal), SearchLimits::hint());
        assert_eq!(outcome.moves, vec![mv("A0"), mv("A1")]);
    }

    #[test]
    fn search_exhausts_without_partial_moves() {
        // five ones is not in the class of zero, so no depth is enough
        let goal = Goal::exact(Configuration::from_reals([1; 5]));
        let outcome = find_path(&Configuration::ZERO, &goal, SearchLimits::hint().with_max_depth(1));
        assert!(!outcome.found);
        assert!(outcome.moves.is_empty());
        assert_eq!(outcome.stop, Stop::Exhausted);
        assert!(!outcome.timed_out());
        assert_eq!(outcome.nodes_explored, 21);
        assert_eq!(outcome.unique_states, 21);
    }

    #[test]
    fn search_times_out() {
        let limits = SearchLimits::full_solution().with_time_budget(Duration::ZERO);
        let outcome = find_path(&samples()[3], &Goal::AllZeros, limits);
        assert!(!outcome.found);
        assert!(outcome.timed_out());
        assert!(outcome.moves.is_empty());
        assert_eq!(outcome.nodes_explored, 0);
    }

    #[rstest]
    #[case(1500.0, Duration::from_millis(1500))]
    #[case(0.0, Duration::ZERO)]
    #[case(-5.0, Duration::ZERO)]
    #[case(f64::NAN, Duration::ZERO)]
    #[case(f64::INFINITY, Duration::MAX)]
    #[case(1e300, Duration::MAX)]
    fn host_time_budgets_never_panic(#[case] milliseconds: f64, #[case] expected: Duration) {
        assert_eq!(SearchLimits::hint().with_time_budget_ms(milliseconds).time_budget, expected);
        assert_eq!(SearchLimits::hint().with_time_budget_secs(milliseconds / 1000.0).time_budget, expected);
    }

    #[test]
    fn unbounded_time_budget_still_exhausts() {
        let goal = Goal::exact(Configuration::from_reals([1; 5]));
        let outcome = find_path(&Configuration::ZERO, &goal, SearchLimits::hint().with_max_depth(1).with_time_budget_ms(f64::INFINITY));
        assert_eq!(outcome.stop, Stop::Exhausted);
    }

    #[cfg(feature = "wasm")]
    #[test]
    fn wasm_find_path_accepts_any_budget() {
        let engine = crate::wasm::PentagonEngine::new();
        let start = mv("A0").apply(&Configuration::ZERO).to_string();
        for budget in [f64::INFINITY, 1e300, f64::NAN, 250.0] {
            let json = engine.find_path(&start, r#"{"type":"all-zeros"}"#, 3, budget).ok().unwrap();
            let outcome: serde_json::Value = serde_json::from_str(&json).unwrap();
            if budget.is_nan() {
                assert_eq!(outcome["found"], false);
            } else {
                assert_eq!(outcome["moves"], serde_json::json!(["C0"]), "{budget}");
            }
        }
        assert_eq!(engine.apply_move(&Configuration::ZERO.to_string(), 0, "A").ok().unwrap(), start);
    }

    #[test]
    fn search_respects_coefficient_bound() {
        let start = key("0,0|0,0|0,0|0,0|0,0");
        let goal = Goal::exact(mv("A0").apply(&start));
        let outcome = find_path(&start, &goal, SearchLimits::hint().with_coefficient_bound(Some(0)));
        assert!(!outcome.found);
        assert_eq!(outcome.unique_states, 1);
    }

    #[test]
    fn search_yields_to_the_host() {
        let goal = Goal::exact(Configuration::from_reals([1; 5]));
        let calls = Cell::new(0);
        let outcome = PathSearch::new(SearchLimits::hint().with_max_depth(1))
            .with_yield(5, |explored| {
                assert_eq!(explored % 5, 0);
                calls.set(calls.get() + 1);
            })
            .run(&Configuration::ZERO, &goal);
        assert_eq!(outcome.nodes_explored, 21);
        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn group_size_and_shape() {
        let group = CayleyGraph::build();
        assert_eq!(group.size(), GROUP_ORDER);
        assert_eq!(group.edge_count(), GROUP_ORDER * 20);
        assert_eq!(group.generation_sizes(), vec![1, 20, 80, 61]);
        assert_eq!(group.diameter(), 3);
        assert!(group.elements().all(|element| is_nice_representative(&element.representative, Vertex::DISTINGUISHED)));
    }

    #[test]
    fn group_paths_lead_to_their_elements() {
        let group = CayleyGraph::build();
        for element in group.elements() {
            let path = group.path_to(&element.representative).unwrap();
            assert_eq!(path.len(), element.generation);
            assert_eq!(group.walk(&Configuration::ZERO, &path).unwrap(), element.representative);
            assert_eq!(nice_representative(&script_of(&path), Vertex::DISTINGUISHED), element.representative);
        }
    }

    #[test]
    fn group_lookups_need_members() {
        let group = CayleyGraph::build();
        let five_ones = Configuration::from_reals([1; 5]);
        assert!(!group.contains(&five_ones));
        assert!(matches!(group.distance_of(&five_ones), Err(Error::NotMember(_))));
        assert!(matches!(group.path_to(&five_ones), Err(Error::NotMember(_))));
        assert_eq!(group.distance_of_class(&five_ones), 3);
        assert_eq!(group.path_to_class(&Configuration::from_reals([0, 1, 0, 0, 0])), vec![mv("A1")]);
    }

    #[test]
    fn five_ones_is_the_element_of_order_two() {
        let group = CayleyGraph::build();
        let five_ones = Configuration::from_reals([1; 5]);
        assert_eq!(group.element_of(&five_ones), order_two());

        let of_order_two = group.elements()
            .filter(|element| group.order_of(&element.representative).unwrap() == 2)
            .map(|element| element.representative)
            .collect_vec();
        assert_eq!(of_order_two, vec![order_two()]);

        let path = group.path_to_class(&five_ones);
        assert_eq!(path, vec![mv("A0"); 3]);
        let twice = path.iter().chain(&path).copied().collect_vec();
        assert_eq!(group.walk(&Configuration::ZERO, &twice).unwrap(), Configuration::ZERO);
        assert_eq!(group.multiple(&order_two(), 2).unwrap(), Configuration::ZERO);
    }

    #[test]
    fn group_distances_are_translation_invariant() {
        let group = CayleyGraph::build();
        let members = group.elements().step_by(17).map(|element| element.representative).collect_vec();
        for (a, b) in members.iter().tuple_combinations() {
            assert_eq!(group.distance_between(a, b).unwrap(), group.distance_between(b, a).unwrap());
            assert_eq!(group.distance_between(a, b).unwrap(), group.distance_of_class(&(*b - *a)));

            let path = group.path_between(a, b).unwrap();
            assert_eq!(path.len(), group.distance_between(a, b).unwrap());
            assert_eq!(group.walk(a, &path).unwrap(), *b, "{a} to {b}");
        }
        assert_eq!(group.distance_between(&order_two(), &order_two()).unwrap(), 0);
        assert_eq!(group.step(&Configuration::ZERO, mv("A1")).unwrap(), key("0,0|1,0|0,0|0,0|0,0"));
    }

    #[test]
    fn group_distances_between_need_members() {
        let group = CayleyGraph::build();
        let scrambled = samples()[2];
        assert!(matches!(group.distance_between(&Configuration::ZERO, &scrambled), Err(Error::NotMember(_))));
        assert!(matches!(group.distance_between(&scrambled, &Configuration::ZERO), Err(Error::NotMember(_))));
        assert!(matches!(group.path_between(&scrambled, &order_two()), Err(Error::NotMember(_))));
    }

    #[test]
    fn group_multiples_reduce_large_factors() {
        let group = CayleyGraph::build();
        let element = key("0,0|1,0|2,0|0,0|1,0");
        assert_eq!(group.multiple(&element, i32::MAX).unwrap(), group.multiple(&element, i32::MAX % GROUP_ORDER as i32).unwrap());
        assert_eq!(group.multiple(&order_two(), i32::MIN).unwrap(), Configuration::ZERO);
    }

    #[test]
    fn search_matches_group_distances() {
        let group = CayleyGraph::build();
        for element in group.elements() {
            let path = group.path_to(&element.representative).unwrap();
            let target = apply_all(&Configuration::ZERO, &path);
            let outcome = find_path(&Configuration::ZERO, &Goal::exact(target), SearchLimits::full_solution());
            assert!(outcome.found, "{}", element.representative);
            assert_eq!(outcome.moves.len(), path.len(), "{}", element.representative);
        }
    }

    #[rstest]
    #[case("A0 B2 D4", "B2 C1 C1", 4)]
    #[case("D3", "B3", 2)]
    #[case("A1 A1 A1", "", 3)]
    #[case("B0 C2", "A4 D1 B0", 3)]
    fn search_is_shortest_between_scrambles(#[case] first: &str, #[case] second: &str, #[case] expected: usize) {
        let solver = AnalyticSolver::default();
        let start = apply_all(&samples()[2], &parse_sequence(first).unwrap());
        let goal = apply_all(&samples()[2], &parse_sequence(second).unwrap());

        // the firing script between two positions is unique, so its length is a lower bound
        let script = solver.exact_script(&start, &goal).unwrap();
        assert_eq!(script.len(), expected);

        let outcome = find_path(&start, &Goal::exact(goal), SearchLimits::full_solution());
        assert!(outcome.found);
        assert_eq!(outcome.moves.len(), expected);
        assert_eq!(apply_all(&start, &outcome.moves), goal);
        assert_eq!(script_of(&outcome.moves), script_of(&script));
    }

    #[test]
    fn canonicalizes_the_worked_example() {
        let configuration = Configuration::from_pairs([(4, 2), (-3, 1), (5, 0), (0, 2), (-1, 0)]);
        let canonical = canonicalize(&configuration, Vertex::DISTINGUISHED);
        assert_eq!(canonical.representative, key("0,0|0,0|0,0|0,0|2,0"));
        assert_eq!(canonical.steps.len(), Stage::VARIANTS.len());
        assert_eq!(canonical.steps[0].before, configuration);
        assert_eq!(canonical.steps.last().unwrap().after, canonical.representative);
        assert!(canonical.steps.iter().map(|step| step.stage).eq(Stage::VARIANTS.iter().copied()));
        assert_eq!(nice_representative(&canonical.representative, Vertex::DISTINGUISHED), canonical.representative);

        assert_eq!(nice_representative(&configuration, Vertex::new(4).unwrap()), key("1,0|1,0|1,0|1,0|0,0"));
    }

    #[rstest]
    fn canonical_form_is_nice_and_idempotent(#[values(0, 1, 2, 3, 4)] distinguished: usize) {
        let distinguished = Vertex::new(distinguished).unwrap();
        for configuration in samples() {
            let representative = nice_representative(&configuration, distinguished);
            assert!(representative.is_real());
            for (vertex, value) in representative.iter() {
                if vertex == distinguished {
                    assert!(matches!(value.re, 0 | 3), "{representative}");
                } else {
                    assert!((0..=2).contains(&value.re), "{representative}");
                }
            }
            assert_eq!(nice_representative(&representative, distinguished), representative);
        }
    }

    #[test]
    fn canonical_form_ignores_moves() {
        for configuration in samples() {
            let representative = nice_representative(&configuration, Vertex::DISTINGUISHED);
            for m in Move::all() {
                assert_eq!(nice_representative(&m.apply(&configuration), Vertex::DISTINGUISHED), representative);
            }
        }
    }

    #[test]
    fn canonical_form_stays_in_class() {
        let solver = AnalyticSolver::default();
        for configuration in samples() {
            let representative = nice_representative(&configuration, Vertex::DISTINGUISHED);
            let script = solver.exact_script(&configuration, &representative).unwrap();
            assert_eq!(apply_all(&configuration, &script), representative);
        }
    }

    #[test]
    fn nice_progress_names_the_broken_rules() {
        let progress = NiceProgress::of(&key("1,1|0,-1|0,0|5,0|0,-1"), Vertex::DISTINGUISHED);
        assert!(!progress.is_nice());
        assert_eq!(progress.imaginary, vec![Vertex::new(0).unwrap(), Vertex::new(1).unwrap(), Vertex::new(4).unwrap()]);
        assert!(!progress.distinguished_ok);
        assert_eq!(progress.out_of_range, vec![Vertex::new(3).unwrap()]);
        assert_eq!(progress.issues().len(), 3);

        assert!(NiceProgress::of(&order_two(), Vertex::DISTINGUISHED).issues().is_empty());
    }

    #[test]
    fn analytic_inverse_is_an_inverse() {
        let solver = AnalyticSolver::default();
        let product = solver.operator() * solver.inverse();
        for (row, col) in (0..5).cartesian_product(0..5) {
            let expected = if row == col { 1.0 } else { 0.0 };
            let value = product[(row, col)];
            assert!((value - Complex64::new(expected, 0.0)).norm() < 1e-9, "{row},{col}: {value}");
        }

        for value in solver.inverse().iter().map(|value| *value * 6.0) {
            assert!((value.re - value.re.round()).abs() < 1e-9 && (value.im - value.im.round()).abs() < 1e-9);
        }
        let first_row = solver.inverse().row(0).iter().map(|value| *value * 6.0).collect_vec();
        let expected = [(3.0, -1.0), (1.0, 1.0), (-1.0, 1.0), (-1.0, 1.0), (1.0, 1.0)];
        for (value, (re, im)) in first_row.iter().zip(expected) {
            assert!((*value - Complex64::new(re, im)).norm() < 1e-9);
        }
    }

    #[test]
    fn analytic_suggests_the_undoing_move() {
        let solver = AnalyticSolver::default();
        let current = mv("A0").apply(&Configuration::ZERO);
        let suggestion = solver.suggest_move(&current, &Configuration::ZERO).unwrap();
        assert_eq!(suggestion.mv, mv("C0"));
        assert_eq!((suggestion.generator, suggestion.sign), (Letter::A, Sign::Minus));
        assert!(suggestion.distance_after.abs() < 1e-9);

        assert!(solver.suggest_move(&Configuration::ZERO, &Configuration::ZERO).is_none());
    }

    #[test]
    fn analytic_sequence_always_improves() {
        let solver = AnalyticSolver::new(AnalyticConfig { max_moves: 8, ..AnalyticConfig::default() });
        let goal = Configuration::ZERO;
        let mut position = apply_all(&goal, &parse_sequence("A0 B2 B2 D4 C1").unwrap());
        let suggestions = solver.suggest_sequence(&position, &goal);
        assert!(suggestions.len() <= 8);
        for suggestion in suggestions {
            let before = position.distance_to(&goal);
            position = suggestion.mv.apply(&position);
            assert!(before - position.distance_to(&goal) > solver.config().epsilon);
            assert!((position.distance_to(&goal) - suggestion.distance_after).abs() < 1e-9);
        }
    }

    #[rstest]
    #[case("A0")]
    #[case("A0 B2 B2 D4 C1")]
    #[case("D3 D3 D3 A1 C2 B4 B0 A3")]
    fn analytic_exact_script_solves_scrambles(#[case] scramble: &str) {
        let solver = AnalyticSolver::default();
        let start = apply_all(&samples()[2], &parse_sequence(scramble).unwrap());
        let script = solver.exact_script(&start, &samples()[2]).unwrap();
        assert_eq!(apply_all(&start, &script), samples()[2]);
        assert_eq!(script_of(&script), -script_of(&parse_sequence(scramble).unwrap()));
    }

    #[test]
    fn analytic_exact_script_needs_the_same_class() {
        let solver = AnalyticSolver::default();
        assert!(solver.exact_script(&Configuration::from_reals([0, 1, 0, 0, 0]), &Configuration::ZERO).is_none());
    }

    const BANK: &str = r#"{
        "puzzles": [
            { "id": "easy_1", "difficulty": "easy", "start": "1,1|0,-1|0,0|0,0|0,-1", "solution": ["C0"] },
            { "id": "easy_2", "difficulty": "easy", "start": "0,0|1,0|-1,1|1,0|0,0", "solution": ["D2"] }
        ]
    }"#;

    #[test]
    fn bank_loads_and_hints() {
        let bank = PuzzleBank::from_json(BANK).unwrap();
        assert_eq!(bank.len(), 2);
        assert_eq!(bank.hint_for(&key("0,0|1,0|-1,1|1,0|0,0")), Some(mv("D2")));
        assert_eq!(bank.hint_for(&Configuration::ZERO), None);
        assert_eq!(bank.by_difficulty(Difficulty::Easy).count(), 2);
        assert_eq!(bank.by_difficulty(Difficulty::Hard).count(), 0);

        let reloaded = PuzzleBank::from_json(&bank.to_json().unwrap()).unwrap();
        assert_eq!(reloaded.puzzles(), bank.puzzles());
    }

    #[test]
    fn bank_rejects_wrong_solutions() {
        let wrong = BANK.replace(r#"["C0"]"#, r#"["A0"]"#);
        assert!(matches!(PuzzleBank::from_json(&wrong), Err(Error::InvalidPuzzle { id, .. }) if id == "easy_1"));

        let duplicate = BANK.replace("easy_2", "easy_1");
        assert!(matches!(PuzzleBank::from_json(&duplicate), Err(Error::InvalidPuzzle { .. })));

        let unknown = BANK.replace(r#"["C0"]"#, r#"["E0"]"#);
        assert!(matches!(PuzzleBank::from_json(&unknown), Err(Error::Json(_))));
    }

    #[rstest]
    #[case(0, Difficulty::Easy)]
    #[case(5, Difficulty::Easy)]
    #[case(6, Difficulty::Medium)]
    #[case(8, Difficulty::Medium)]
    #[case(12, Difficulty::Hard)]
    fn difficulty_tiers(#[case] moves: usize, #[case] expected: Difficulty) {
        assert_eq!(Difficulty::for_distance(moves), expected);
        assert!(Difficulty::for_distance(expected.scramble_length()) == expected);
    }

    #[test]
    fn engine_group_needs_initialization() {
        let engine = Engine::default();
        assert!(matches!(engine.distance_from_identity(&order_two()), Err(Error::GroupNotInitialized)));
        assert!(matches!(engine.path_from_identity(&order_two()), Err(Error::GroupNotInitialized)));

        let first = engine.initialize_group() as *const CayleyGraph;
        let second = engine.initialize_group() as *const CayleyGraph;
        assert_eq!(first, second);

        assert_eq!(engine.distance_from_identity(&order_two()).unwrap(), 3);
        assert_eq!(engine.path_from_identity(&order_two()).unwrap(), vec![mv("A0"); 3]);
        assert!(matches!(engine.distance_from_identity(&Configuration::from_reals([1; 5])), Err(Error::NotMember(_))));
    }

    #[test]
    fn engine_initializes_once_across_threads() {
        let engine = Engine::default();
        std::thread::scope(|scope| {
            for _ in 0..4 {
                scope.spawn(|| assert_eq!(engine.initialize_group().size(), GROUP_ORDER));
            }
        });
        assert_eq!(engine.group().unwrap().size(), GROUP_ORDER);
    }

    #[test]
    fn engine_sessions_are_independent() {
        let prepared = Engine::with_group(CayleyGraph::build());
        let fresh = Engine::default();
        assert!(prepared.group().is_ok());
        assert!(fresh.group().is_err());
    }

    #[test]
    fn engine_operations() {
        let engine = Engine::default();
        let three = Vertex::new(3).unwrap();
        let moved = engine.apply_move(&Configuration::ZERO, three, Letter::B);
        assert_eq!(moved, key("0,0|0,0|1,0|-1,1|1,0"));

        let outcome = engine.find_path(&moved, &Goal::AllZeros, SearchLimits::hint());
        assert_eq!(outcome.moves, vec![Move::new(three, Letter::D)]);

        assert_eq!(engine.suggest_next_move(&moved, &Configuration::ZERO).unwrap().mv, Move::new(three, Letter::D));
        assert_eq!(engine.canonicalize(&moved, Vertex::DISTINGUISHED).representative, Configuration::ZERO);
    }
}
