mod common;

use std::collections::HashSet;

use bubblerun_lib::{
    calc_distances, calc_shortest_route, calc_shortest_route_brute_force,
    calc_shortest_route_heuristic, distance, find_longest_jump, permute, plan_bubble_run,
    remove_reverse_routes, total_distance, BruteForceOptions, Error, GeneticSolver, RouteMethod,
    RunRequest, StarSystem,
};
use common::{assert_close, kunti_triangle, system};

const ANTAI_ARUN: f64 = 9.0;
const ARUN_WUY_JUGUN: f64 = 14.809895604375475;

#[test]
fn shortest_route_from_antai_goes_through_arun() {
    let systems = kunti_triangle();
    let best = calc_shortest_route(&systems[0], &systems);

    assert_eq!(best.names(), vec!["Antai", "Arun", "Wuy jugun"]);
    assert_close(best.distance, ANTAI_ARUN + ARUN_WUY_JUGUN);
    assert_eq!(format!("{:.2}", best.distance), "23.81");
    assert_close(
        best.distance,
        distance(&systems[0].coords, &systems[2].coords)
            + distance(&systems[2].coords, &systems[1].coords),
    );
}

#[test]
fn exhaustive_search_keeps_earliest_head_on_ties() {
    let systems = kunti_triangle();
    let best = calc_shortest_route_brute_force(&systems, &BruteForceOptions::default())
        .expect("route");

    // Starting from Wuy jugun gives the exact reverse at the same length.
    assert_eq!(best.names(), vec!["Antai", "Arun", "Wuy jugun"]);
    assert_close(best.distance, ANTAI_ARUN + ARUN_WUY_JUGUN);
}

#[test]
fn single_worker_matches_parallel_search() {
    let systems = kunti_triangle();
    let parallel = calc_shortest_route_brute_force(&systems, &BruteForceOptions::default())
        .expect("parallel");
    let serial = calc_shortest_route_brute_force(
        &systems,
        &BruteForceOptions {
            workers: Some(1),
            ..BruteForceOptions::default()
        },
    )
    .expect("serial");
    assert_eq!(parallel, serial);
}

#[test]
fn large_sets_need_opt_in() {
    let systems: Vec<StarSystem> = (0..11)
        .map(|i| system(&format!("S{i}"), f64::from(i), 0.0, 0.0))
        .collect();
    let err = calc_shortest_route_brute_force(&systems, &BruteForceOptions::default())
        .expect_err("too large");
    assert!(matches!(err, Error::WorkingSetTooLarge { count: 11, limit: 10 }));
    assert!(err.to_string().contains("genetic"));
}

#[test]
fn distance_listing_covers_every_directed_pair() {
    let systems = kunti_triangle();
    let pairs = calc_distances(&systems);

    let indices: Vec<(usize, usize)> = pairs.iter().map(|&(i, j, _)| (i, j)).collect();
    assert_eq!(
        indices,
        vec![(0, 1), (0, 2), (1, 0), (1, 2), (2, 0), (2, 1)]
    );
    for &(i, j, d) in &pairs {
        let reverse = pairs
            .iter()
            .find(|&&(a, b, _)| a == j && b == i)
            .expect("reverse pair");
        assert_eq!(d, reverse.2);
    }
}

#[test]
fn genetic_search_finds_the_triangle_optimum() {
    let systems = kunti_triangle();
    let route =
        calc_shortest_route_heuristic(&systems, &GeneticSolver::default()).expect("route");
    assert_close(route.distance, ANTAI_ARUN + ARUN_WUY_JUGUN);
    assert_eq!(route.names()[1], "Arun");
}

#[test]
fn permutations_are_complete_and_distinct() {
    let items = [1, 2, 3, 4, 5];
    let candidates: Vec<Vec<i32>> = permute(&3, &items).collect();

    assert_eq!(candidates.len(), 24);
    let unique: HashSet<&Vec<i32>> = candidates.iter().collect();
    assert_eq!(unique.len(), 24);
    for candidate in &candidates {
        assert_eq!(candidate[0], 3);
        assert_eq!(candidate.iter().filter(|&&x| x == 3).count(), 1);
        let mut sorted = candidate.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, items);
    }
}

#[test]
fn pruning_leaves_one_of_each_reverse_pair() {
    let systems = vec![
        system("a", 0.0, 0.0, 0.0),
        system("b", 1.0, 0.0, 0.0),
        system("c", 2.0, 0.0, 0.0),
        system("d", 3.0, 0.0, 0.0),
    ];
    let all: Vec<Vec<StarSystem>> = systems
        .iter()
        .flat_map(|head| permute(head, &systems).collect::<Vec<_>>())
        .collect();
    assert_eq!(all.len(), 24);

    let kept = remove_reverse_routes(all.clone());
    assert_eq!(kept.len(), 12);
    for route in &kept {
        let reversed: Vec<StarSystem> = route.iter().rev().cloned().collect();
        assert!(!kept.contains(&reversed));
        assert_close(total_distance(route), total_distance(&reversed));
    }
    for route in &all {
        let reversed: Vec<StarSystem> = route.iter().rev().cloned().collect();
        assert!(kept.contains(route) || kept.contains(&reversed));
    }
}

#[test]
fn planning_attaches_longest_jump() {
    let systems = kunti_triangle();
    for method in [RouteMethod::BruteForce, RouteMethod::Genetic] {
        let run = plan_bubble_run(&systems, &RunRequest::new(method)).expect("plan");
        assert_eq!(run.method, method);
        assert_eq!(run.route.hop_count(), 2);

        let jump = run.longest_jump.expect("jump");
        assert_close(jump.distance, ARUN_WUY_JUGUN);
        let mut ends = [jump.from.name.as_str(), jump.to.name.as_str()];
        ends.sort_unstable();
        assert_eq!(ends, ["Arun", "Wuy jugun"]);
        assert_eq!(find_longest_jump(&run.route.systems).map(|j| j.distance), Some(jump.distance));
    }
}

#[test]
fn planning_an_empty_set_fails() {
    for method in [RouteMethod::BruteForce, RouteMethod::Genetic] {
        let err = plan_bubble_run(&[], &RunRequest::new(method)).expect_err("empty");
        assert!(matches!(err, Error::EmptyWorkingSet));
    }
}

#[test]
fn route_methods_parse_from_cli_spelling() {
    assert_eq!("brute-force".parse::<RouteMethod>(), Ok(RouteMethod::BruteForce));
    assert_eq!("Genetic".parse::<RouteMethod>(), Ok(RouteMethod::Genetic));
    assert!("annealing".parse::<RouteMethod>().is_err());
    assert_eq!(RouteMethod::BruteForce.to_string(), "brute-force");
}
