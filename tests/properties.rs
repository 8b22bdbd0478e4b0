//! Property tests for path parsing and endpoint grouping.

use std::collections::HashSet;

use proptest::prelude::*;
use switch_route::routing::{parse_path, Endpoint, RouteError, Segment, VariableMap};

const METHODS: &[&str] = &["GET", "POST", "PUT", "PATCH", "DELETE", "HEAD", "OPTIONS", "SAVE"];

#[derive(Debug, Clone)]
enum Part {
    Literal(String),
    Colon(String),
    Brace(String),
}

fn part() -> impl Strategy<Value = Part> {
    prop_oneof![
        "[a-z0-9_.-]{1,8}".prop_map(Part::Literal),
        "[a-z_][a-z0-9_]{0,6}".prop_map(Part::Colon),
        "[a-z_][a-z0-9_]{0,6}".prop_map(Part::Brace),
    ]
}

/// Registrations on distinct methods, each with a small handler and var map.
fn registrations() -> impl Strategy<Value = Vec<(&'static str, u8, Option<usize>)>> {
    proptest::sample::subsequence(METHODS.to_vec(), 0..=METHODS.len())
        .prop_flat_map(|methods| {
            let n = methods.len();
            (
                Just(methods),
                proptest::collection::vec(0u8..3, n),
                proptest::collection::vec(proptest::option::of(0usize..2), n),
            )
        })
        .prop_map(|(methods, handlers, vars)| {
            methods
                .into_iter()
                .zip(handlers)
                .zip(vars)
                .map(|((m, h), v)| (m, h, v))
                .collect()
        })
}

fn var_map(index: Option<usize>) -> VariableMap {
    index.into_iter().map(|i| ("id".to_string(), i)).collect()
}

proptest! {
    #[test]
    fn parse_then_template_round_trips(parts in proptest::collection::vec(part(), 1..6)) {
        let mut seen = HashSet::new();
        let parts: Vec<Part> = parts
            .into_iter()
            .filter(|p| match p {
                Part::Colon(n) | Part::Brace(n) => seen.insert(n.clone()),
                Part::Literal(_) => true,
            })
            .collect();
        prop_assume!(!parts.is_empty());

        let raw: Vec<String> = parts.iter().map(|p| match p {
            Part::Literal(s) => s.clone(),
            Part::Colon(n) => format!(":{}", n),
            Part::Brace(n) => format!("{{{}}}", n),
        }).collect();
        let canonical: Vec<String> = parts.iter().map(|p| match p {
            Part::Literal(s) => s.clone(),
            Part::Colon(n) | Part::Brace(n) => format!("{{{}}}", n),
        }).collect();

        let parsed = parse_path(&format!("/{}", raw.join("/"))).unwrap();

        prop_assert_eq!(parsed.segments.len(), parts.len());
        prop_assert_eq!(parsed.template(), format!("/{}", canonical.join("/")));

        for (index, segment) in parsed.segments.iter().enumerate() {
            let is_var = !matches!(parts[index], Part::Literal(_));
            prop_assert_eq!(*segment == Segment::Wildcard, is_var);
            if is_var {
                prop_assert!(parsed.vars.values().any(|&i| i == index));
            }
        }
    }

    #[test]
    fn unique_routes_partition_methods(regs in registrations()) {
        let mut endpoint = Endpoint::new("/p");
        for (method, handler, vars) in &regs {
            endpoint = endpoint.with_route(method, *handler, var_map(*vars)).unwrap();
        }

        let groups = endpoint.unique_routes();
        let mut covered = Vec::new();

        for group in &groups {
            prop_assert!(!group.methods.is_empty());
            for method in &group.methods {
                prop_assert_eq!(endpoint.route(method), Some(group.handler));
                prop_assert_eq!(endpoint.vars(method).unwrap(), group.vars);
                covered.push(method.clone());
            }
        }

        // disjoint and complete
        let registered: Vec<String> = endpoint.routes().keys().cloned().collect();
        let unique: HashSet<&String> = covered.iter().collect();
        prop_assert_eq!(unique.len(), covered.len());
        let mut sorted_covered = covered.clone();
        sorted_covered.sort();
        let mut sorted_registered = registered.clone();
        sorted_registered.sort();
        prop_assert_eq!(sorted_covered, sorted_registered);

        // groups with equal behavior would have been merged
        for (i, a) in groups.iter().enumerate() {
            for b in &groups[i + 1..] {
                prop_assert!(a.handler != b.handler || a.vars != b.vars);
            }
        }
    }

    #[test]
    fn with_route_leaves_original_untouched(regs in registrations(), extra in 0u8..3) {
        prop_assume!(regs.len() < METHODS.len());

        let mut endpoint = Endpoint::new("/p");
        for (method, handler, vars) in &regs {
            endpoint = endpoint.with_route(method, *handler, var_map(*vars)).unwrap();
        }
        let before = endpoint.clone();

        let unused = METHODS
            .iter()
            .find(|m| !endpoint.routes().contains_key(**m))
            .unwrap();
        let after = endpoint.with_route(unused, extra, VariableMap::new()).unwrap();

        prop_assert_eq!(&endpoint, &before);
        prop_assert_eq!(after.len(), endpoint.len() + 1);
        prop_assert!(endpoint.route(unused).is_none());
    }

    #[test]
    fn duplicate_method_any_case(method in proptest::sample::select(METHODS.to_vec()), mask in any::<u16>()) {
        let mixed: String = method
            .chars()
            .enumerate()
            .map(|(i, c)| if mask & (1 << i) != 0 { c.to_ascii_lowercase() } else { c })
            .collect();

        let endpoint = Endpoint::new("/x").with_route(method, 1, VariableMap::new()).unwrap();
        let err = endpoint.with_route(&mixed, 2, VariableMap::new()).unwrap_err();

        prop_assert_eq!(
            err,
            RouteError::DuplicateRoute { method: method.to_string(), path: "/x".to_string() }
        );
    }
}
