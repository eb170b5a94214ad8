//! Integration tests for resolving requests to controller actions.

use routebank::config::sources::parse_table_str;
use routebank::dispatch::{ControllerCatalog, DispatchError, Dispatcher, StaticCatalog};
use routebank::error::RouteBankError;
use routebank::route::{Bank, HttpMethod, Request};

fn fixture_bank() -> Bank {
    let content = std::fs::read_to_string("tests/fixtures/routes.json").unwrap();
    let table = parse_table_str("json", &content, "routes.json").unwrap();
    table.to_routes().into_iter().collect()
}

fn full_catalog() -> StaticCatalog {
    StaticCatalog::new()
        .with_controller("App\\Controller\\Home", ["index"])
        .with_controller("App\\Controller\\Stuff", ["view", "remove"])
        .with_controller("App\\Controller\\Search", ["run"])
        .with_controller("App\\Controller\\Catalog", ["price"])
        .with_controller("Audit\\Log", ["stuffDelete"])
}

#[test]
fn catalog_normalizes_class_names() {
    let catalog = StaticCatalog::new().with_controller("/Audit/Log", ["stuffDelete"]);
    assert!(catalog.has_controller("::Audit::Log"));
    assert!(catalog.has_method("::Audit::Log", "stuffDelete"));
    assert!(!catalog.has_method("::Audit::Log", "other"));
}

#[test]
fn every_fixture_route_dispatches() {
    let bank = fixture_bank();
    let catalog = full_catalog();
    let dispatcher = Dispatcher::new(&bank, &catalog);

    for (method, uri, expected) in [
        (HttpMethod::Get, "/", "Home"),
        (HttpMethod::Get, "/stuff/5/", "Stuff View"),
        (HttpMethod::Delete, "/stuff/5/", "Stuff Delete"),
        (HttpMethod::Get, "/search/rust/", "Search"),
        (HttpMethod::Get, "/price/19.99/eur/", "Price"),
    ] {
        let dispatch = dispatcher.resolve(&Request::new(method, uri)).unwrap();
        assert_eq!(dispatch.route().name(), expected, "{method} {uri}");
    }
}

#[test]
fn execute_runs_every_action_with_the_arguments() {
    let bank = fixture_bank();
    let catalog = full_catalog();
    let dispatch = Dispatcher::new(&bank, &catalog)
        .resolve(&Request::from_parts("DELETE", "/stuff/77/?confirm=yes"))
        .unwrap();

    let mut log = Vec::new();
    dispatch.execute(|action, args| {
        log.push(format!("{action}({})", args.join(",")));
    });

    assert_eq!(
        log,
        [
            "::App::Controller::Stuff:remove(77)",
            "::Audit::Log:stuffDelete(77)"
        ]
    );
}

#[test]
fn not_found_and_not_executable_are_distinct() {
    let bank = fixture_bank();

    let catalog = full_catalog();
    let missing = Dispatcher::new(&bank, &catalog)
        .resolve(&Request::new(HttpMethod::Get, "/stuff/0/"))
        .unwrap_err();
    assert!(matches!(missing, DispatchError::RouteNotFound { .. }));

    let without_audit =
        StaticCatalog::new().with_controller("App\\Controller\\Stuff", ["view", "remove"]);
    let broken = Dispatcher::new(&bank, &without_audit)
        .resolve(&Request::new(HttpMethod::Delete, "/stuff/1/"))
        .unwrap_err();
    assert_eq!(
        broken,
        DispatchError::ActionNotFound {
            route: "Stuff Delete".into(),
            action: "::Audit::Log:stuffDelete".into(),
        }
    );

    let err: RouteBankError = broken.into();
    assert_eq!(
        err.to_string(),
        "route 'Stuff Delete' has an action that cannot be executed: '::Audit::Log:stuffDelete'"
    );
}
