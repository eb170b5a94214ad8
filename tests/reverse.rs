//! Integration tests for reverse URL building.

use routebank::route::{check, decode_argument, HttpMethod, MaxParams, Request, Route};

/// Reverse `args` through `route`, match the URL against the same route and
/// decode what comes back.
fn round_trip(route: &Route, args: &[&str]) -> Vec<String> {
    let mut reverse = route.reverse();
    reverse.add_args(args);
    let url = reverse.output();

    check(&Request::new(route.method(), &url), route)
        .into_arguments()
        .unwrap_or_else(|| panic!("{url} did not match {}", route.pattern()))
        .iter()
        .map(|a| decode_argument(a))
        .collect()
}

#[test]
fn round_trip_reproduces_arguments() {
    let route = Route::new("Cool Route").with_match("/view/:int/stuff/:str/other/");
    assert_eq!(round_trip(&route, &["123", "How dy"]), ["123", "How dy"]);
    assert_eq!(
        round_trip(&route, &["7", "a/b?c&d", "tack to end"]),
        ["7", "a/b?c&d", "tack to end"]
    );
}

#[test]
fn round_trip_with_unicode_and_plus_signs() {
    let route = Route::new("search")
        .with_match("/search/:str/")
        .with_method(HttpMethod::Post);
    assert_eq!(round_trip(&route, &["caf\u{e9} 1+1"]), ["caf\u{e9} 1+1"]);
}

#[test]
fn round_trip_respects_max_params() {
    let route = Route::new("capped")
        .with_match("/view/:int/")
        .with_max_params(MaxParams::at_most(1));
    assert_eq!(round_trip(&route, &["1", "two", "three"]), ["1", "two"]);
}

#[test]
fn unfilled_placeholders_stay_in_the_url() {
    let route = Route::new("two slots").with_match("/a/:int/b/:str[2-4]/");
    let mut reverse = route.reverse();
    reverse.add_arg(5);
    assert_eq!(reverse.output(), "/a/5/b/:str[2-4]/");
}

#[test]
fn add_get_overwrites_existing_keys() {
    let route = Route::new("list").with_match("/list/");
    let mut reverse = route.reverse();
    reverse
        .add_get("page", 1)
        .add_get("sort", "name")
        .add_get("page", 3);
    assert_eq!(reverse.output(), "/list/?page=3&sort=name");

    reverse.clear_get_args().add_arg("x");
    assert_eq!(reverse.output(), "/list/x/");
}

#[test]
fn builder_is_reusable() {
    let route = Route::new("view").with_match("/view/:int/");
    let mut reverse = route.reverse();
    reverse.add_arg(1).add_get("q", "a b");

    let first = reverse.output();
    assert_eq!(first, reverse.output());
    assert_eq!(first, "/view/1/?q=a+b");

    reverse.clear_args().add_arg(2);
    assert_eq!(reverse.output(), "/view/2/?q=a+b");
}

#[test]
fn decode_argument_leaves_invalid_escapes_alone() {
    assert_eq!(decode_argument("How+dy"), "How dy");
    assert_eq!(decode_argument("a%2Fb"), "a/b");
    assert_eq!(decode_argument("%FF%FE"), "%FF%FE");
    assert_eq!(decode_argument("plain"), "plain");
}
