use criterion::{criterion_group, criterion_main, Criterion};
use segrouter::config::RouteFile;
use segrouter::router::Router;
use std::hint::black_box;

fn example_routes() -> &'static str {
    r#"
[[routes]]
name = "root"
path = "/"
class = "home"
method = "index"

[[routes]]
name = "animals"
path = "/zoo/animals"
class = "animals"
method = "list"

[[routes]]
name = "animal"
path = "/zoo/animals/:id"
class = "animals"
method = "show"
[routes.elements]
":id" = '^\d+$'

[[routes]]
name = "animal_toy"
path = "/zoo/animals/:id/toys/:toy_id"
class = "toys"
method = "show"
[routes.elements]
":id" = '^\d+$'
":toy_id" = '^\d+$'

[[routes]]
name = "habitat_section"
path = "/zoo/:category/animals/:id/habitats/:habitat_id/sections/:section_id"
class = "habitats"
method = "section"
[routes.elements]
":category" = ":category"
":id" = '^\d+$'
":habitat_id" = '^\d+$'
":section_id" = '^\d+$'

[[routes]]
name = "complex_many_params"
path = "/complex/:a/:b/:c/:d/:e/:f/:g/:h/:i"
class = "complex"
method = "many"
[routes.elements]
":a" = ":a"
":b" = ":b"
":c" = ":c"
":d" = ":d"
":e" = ":e"
":f" = ":f"
":g" = ":g"
":h" = ":h"
":i" = ":i"

[[routes]]
name = "catch_all"
path = "/:class/:method"
[routes.elements]
":class" = ":class"
":method" = ":method"
"#
}

fn build_router() -> Router {
    RouteFile::from_toml_str(example_routes())
        .expect("failed to parse route file")
        .build_router()
}

const TEST_PATHS: [&str; 6] = [
    "/zoo/animals/123",
    "/zoo/animals/123/toys/456",
    "/zoo/cats/animals/123/habitats/88/sections/5",
    "/complex/1/2/3/4/5/6/7/8/9",
    "/users/list?page=2",
    "/zoo/animals/abc",
];

fn bench_lookup(c: &mut Criterion) {
    let router = build_router();
    c.bench_function("route_lookup", |b| {
        b.iter(|| {
            for path in TEST_PATHS.iter() {
                let res = router.lookup(black_box(path));
                black_box(&res);
            }
        })
    });
}

fn bench_find_route(c: &mut Criterion) {
    let mut router = build_router();
    c.bench_function("route_find_commit", |b| {
        b.iter(|| {
            for path in TEST_PATHS.iter() {
                let res = router.find_route(black_box(path)).is_ok();
                black_box(res);
            }
        })
    });
}

fn bench_build_url(c: &mut Criterion) {
    let router = build_router();
    c.bench_function("build_url", |b| {
        b.iter(|| {
            let url = router.build_url(
                black_box("animal_toy"),
                [(":id", "123"), (":toy_id", "456")],
            );
            black_box(url)
        })
    });
}

criterion_group!(benches, bench_lookup, bench_find_route, bench_build_url);
criterion_main!(benches);
