// Integration tests for route-addressed reconciliation.
// Covers path walking with scaffolding, namespace resolution, route-index
// fallback, best-effort reparenting, and teardown semantics.

use canopy_core::{
    Kind, MemoryRuntime, Reconciler, RouteKey, Runtime, VirtualNode, CONTAINER_KIND,
};

fn part(name: &str) -> VirtualNode {
    VirtualNode::new(Kind::named("Part"), name)
}

fn segments(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// Runtime with one declared top-level namespace, the usual fixture
fn runtime_with_workspace() -> MemoryRuntime {
    let mut rt = MemoryRuntime::new();
    rt.declare_namespace("Workspace", "Workspace");
    rt
}

#[test]
fn test_walk_scaffolds_intermediate_containers() {
    let mut rt = runtime_with_workspace();
    let root = rt.root();
    let mut rec = Reconciler::new();

    let id = rec
        .reconcile_route(
            &mut rt,
            root,
            &segments(&["Workspace", "Models", "Thing"]),
            &part("Thing"),
            &RouteKey::new("src/thing"),
        )
        .unwrap()
        .unwrap();

    // First segment resolved through the namespace table
    let workspace = rt.find_child(root, "Workspace").unwrap().unwrap();
    assert_eq!(rt.kind_of(workspace).unwrap(), Kind::named("Workspace"));

    // Intermediate segment materialized as a generic container
    let models = rt.find_child(workspace, "Models").unwrap().unwrap();
    assert_eq!(rt.kind_of(models).unwrap(), Kind::named(CONTAINER_KIND));

    // The reconciled object landed under the last resolved container
    assert_eq!(rt.parent_of(id).unwrap(), Some(models));
    assert_eq!(rt.name_of(id).unwrap(), "Thing");
}

#[test]
fn test_unknown_first_segment_scaffolds_container() {
    let mut rt = MemoryRuntime::new();
    let root = rt.root();
    let mut rec = Reconciler::new();

    rec.reconcile_route(
        &mut rt,
        root,
        &segments(&["Stuff", "Thing"]),
        &part("Thing"),
        &RouteKey::new("src/thing"),
    )
    .unwrap()
    .unwrap();

    // Namespace resolution failed cleanly; the walk fell through to
    // ordinary scaffolding
    let stuff = rt.find_child(root, "Stuff").unwrap().unwrap();
    assert_eq!(rt.kind_of(stuff).unwrap(), Kind::named(CONTAINER_KIND));
}

#[test]
fn test_second_pass_updates_in_place() {
    let mut rt = runtime_with_workspace();
    let root = rt.root();
    let mut rec = Reconciler::new();
    let path = segments(&["Workspace", "Models", "Thing"]);
    let route = RouteKey::new("src/thing");

    let first = rec
        .reconcile_route(&mut rt, root, &path, &part("Thing"), &route)
        .unwrap()
        .unwrap();
    let second = rec
        .reconcile_route(&mut rt, root, &path, &part("Thing"), &route)
        .unwrap()
        .unwrap();

    // Same object both times, and no duplicate siblings appeared
    assert_eq!(first, second);
    let workspace = rt.find_child(root, "Workspace").unwrap().unwrap();
    let models = rt.find_child(workspace, "Models").unwrap().unwrap();
    assert_eq!(rt.children_of(models).unwrap(), vec![first]);
}

#[test]
fn test_route_fallback_recovers_unreachable_object() {
    let mut rt = runtime_with_workspace();
    let root = rt.root();
    let mut rec = Reconciler::new();
    let route = RouteKey::new("src/thing");

    // The object exists and is registered, but lives nowhere the literal
    // path can see
    let node = part("Thing").with_route(route.clone());
    let orphan = rec.reconcile(&mut rt, None, Some(&node)).unwrap().unwrap();

    let recovered = rec
        .reconcile_route(
            &mut rt,
            root,
            &segments(&["Workspace", "Stash", "Thing"]),
            &node,
            &route,
        )
        .unwrap()
        .unwrap();

    // Identity preserved: the walk failed but the route index found it,
    // and no duplicate was created
    assert_eq!(recovered, orphan);
    let workspace = rt.find_child(root, "Workspace").unwrap().unwrap();
    let stash = rt.find_child(workspace, "Stash").unwrap().unwrap();
    assert_eq!(rt.parent_of(orphan).unwrap(), Some(stash));
    assert_eq!(rt.children_of(stash).unwrap(), vec![orphan]);
}

#[test]
fn test_unresolved_terminal_without_route_creates_fresh_object() {
    let mut rt = runtime_with_workspace();
    let root = rt.root();
    let mut rec = Reconciler::new();

    let id = rec
        .reconcile_route(
            &mut rt,
            root,
            &segments(&["Workspace", "Thing"]),
            &part("Thing"),
            &RouteKey::new("src/never-registered"),
        )
        .unwrap()
        .unwrap();

    let workspace = rt.find_child(root, "Workspace").unwrap().unwrap();
    assert_eq!(rt.parent_of(id).unwrap(), Some(workspace));
}

#[test]
fn test_empty_path_is_rejected_at_entry() {
    let mut rt = MemoryRuntime::new();
    let root = rt.root();
    let mut rec = Reconciler::new();

    let err = rec
        .reconcile_route(&mut rt, root, &[], &part("Thing"), &RouteKey::new("src/x"))
        .unwrap_err();

    assert_eq!(err.code(), "ERR_EMPTY_PATH");
}

#[test]
fn test_refused_reparent_is_absorbed() {
    let mut rt = runtime_with_workspace();
    let root = rt.root();
    let mut rec = Reconciler::new();
    let route = RouteKey::new("src/guard");

    // A registered object that the runtime refuses to move
    let node = part("Guard").with_route(route.clone());
    let guard = rec.reconcile(&mut rt, None, Some(&node)).unwrap().unwrap();
    rt.set_parent(guard, Some(root)).unwrap();
    rt.protect(guard);

    let result = rec
        .reconcile_route(
            &mut rt,
            root,
            &segments(&["Workspace", "Guard"]),
            &node,
            &route,
        )
        .unwrap()
        .unwrap();

    // The pass succeeded and found the right object; the refused reparent
    // left it exactly where it was
    assert_eq!(result, guard);
    assert_eq!(rt.parent_of(guard).unwrap(), Some(root));
}

#[test]
fn test_teardown_releases_bookkeeping_only() {
    let mut rt = runtime_with_workspace();
    let root = rt.root();
    let mut rec = Reconciler::new();
    let route = RouteKey::new("src/thing");

    let id = rec
        .reconcile_route(
            &mut rt,
            root,
            &segments(&["Workspace", "Thing"]),
            &part("Thing").with_route(route.clone()),
            &route,
        )
        .unwrap()
        .unwrap();
    assert!(!rec.routes().is_empty());

    rec.teardown();

    // The index is gone; the live tree is untouched
    assert!(rec.routes().is_empty());
    assert!(rt.exists(id));
    assert_eq!(rec.routes().get(&route), None);
}
