//! End-to-end routing: route file → router → dispatcher → registered handlers

use segrouter::config::RouteFile;
use segrouter::dispatcher::{DispatchError, Dispatcher};
use segrouter::registry::{HandlerModule, HandlerRegistry, HandlerType};
use segrouter::router::RouterError;
use segrouter::runtime_config::DispatcherConfig;
use serde_json::{json, Value};

mod common;
use common::SHOP_ROUTES;

struct Products {
    currency: String,
}

struct Archive;

fn shop_registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry
        .register_module(
            "productsController.rs",
            HandlerModule::new().with_type(
                HandlerType::new("productsController", |ctx: &Value| Products {
                    currency: ctx["currency"].as_str().unwrap_or("EUR").to_string(),
                })
                .method("show", |p, args| {
                    json!({
                        "id": args.iter().find(|(k, _)| &**k == ":id").map(|(_, v)| v.clone()),
                        "currency": p.currency,
                    })
                })
                .method("list", |p, _args| json!({ "items": [], "currency": p.currency })),
            ),
        )
        .register_module(
            "archiveController.rs",
            HandlerModule::new().with_type(
                HandlerType::new("archiveController", |_ctx: &Value| Archive).method(
                    "range",
                    |_a, args| {
                        Value::Array(args.iter().map(|(_, v)| json!(v)).collect())
                    },
                ),
            ),
        );
    registry
}

fn shop() -> (segrouter::router::Router, Dispatcher<HandlerRegistry>) {
    let file = RouteFile::from_toml_str(SHOP_ROUTES).unwrap();
    let config = file.dispatcher_config(DispatcherConfig::default());
    (
        file.build_router(),
        Dispatcher::from_config(shop_registry(), &config),
    )
}

#[test]
fn test_configured_route_dispatch() {
    let (router, dispatcher) = shop();
    let found = router.lookup("/products/42?ref=home").unwrap();
    assert_eq!(found.name, "product");

    let result = dispatcher
        .dispatch(&found, &json!({ "currency": "USD" }))
        .unwrap();
    assert_eq!(result, json!({ "id": "42", "currency": "USD" }));
}

#[test]
fn test_regex_guard_falls_through_to_catch_all() {
    let (router, dispatcher) = shop();
    // ":id" rejects "list", so the two-segment catch-all wins
    let found = router.lookup("/products/list").unwrap();
    assert_eq!(found.name, "catch_all");
    assert_eq!(found.map_class(), Some("products"));
    assert_eq!(found.map_method(), Some("list"));

    let result = dispatcher.dispatch(&found, &Value::Null).unwrap();
    assert_eq!(result, json!({ "items": [], "currency": "EUR" }));
}

#[test]
fn test_arguments_keep_pattern_order() {
    let (router, dispatcher) = shop();
    let found = router.lookup("/archive/2009/2010").unwrap();
    let result = dispatcher.dispatch(&found, &Value::Null).unwrap();
    assert_eq!(result, json!(["2009", "2010"]));
}

#[test]
fn test_find_route_commits_bindings() {
    let (mut router, dispatcher) = shop();
    let route = router.find_route("/archive/2001/2002").unwrap();
    assert_eq!(route.get_argument(":yearStart"), Some("2001"));
    let result = dispatcher.dispatch(route, &Value::Null).unwrap();
    assert_eq!(result, json!(["2001", "2002"]));

    // a later match replaces the committed arguments
    let route = router.find_route("/archive/1999/2000").unwrap();
    assert_eq!(route.get_argument(":yearStart"), Some("1999"));
}

#[test]
fn test_unknown_class_from_path() {
    let (router, dispatcher) = shop();
    let found = router.lookup("/orders/list").unwrap();
    let err = dispatcher.dispatch(&found, &Value::Null).unwrap_err();
    assert_eq!(
        err,
        DispatchError::HandlerSourceNotFound {
            source: "ordersController.rs".to_string()
        }
    );
}

#[test]
fn test_hostile_class_from_path() {
    let (router, dispatcher) = shop();
    let found = router.lookup("/..%2Fetc/passwd").unwrap();
    let err = dispatcher.dispatch(&found, &Value::Null).unwrap_err();
    assert!(matches!(err, DispatchError::InvalidClassName { .. }));
}

#[test]
fn test_no_route() {
    let (router, _dispatcher) = shop();
    let err = router.lookup("/a/b/c/d").unwrap_err();
    assert_eq!(
        err,
        RouterError::RouteNotFound {
            path: "/a/b/c/d".to_string()
        }
    );
}

#[test]
fn test_reverse_urls_match_again() {
    let (router, _dispatcher) = shop();
    let url = router
        .build_url("archive", [(":yearStart", "1990"), (":yearEnd", "1995")])
        .unwrap();
    assert_eq!(url, "/archive/1990/1995");
    assert_eq!(router.lookup(&url).unwrap().name, "archive");

    assert_eq!(router.build_url("home", Vec::<(&str, &str)>::new()).unwrap(), "/");
}

#[test]
fn test_placeholder_candidate_never_matches() {
    let (router, _dispatcher) = shop();
    assert!(router.lookup("/products/:id").is_err());
    assert!(router.lookup("/:class/:method").is_err());
}
