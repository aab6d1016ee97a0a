//! Tree reconciliation engine
//!
//! Drives the live tree toward the shape a [`VirtualNode`] tree describes:
//! matches children, creates and destroys live objects, writes properties,
//! walks textual paths into the live tree, and keeps the route index
//! consistent with object lifecycle. Single-threaded and synchronous;
//! recursion depth equals tree depth.

mod matching;

use std::time::Instant;

use canopy_core_types::{LiveId, RouteKey};
use tracing::debug;

use crate::errors::{ReconcileError, Result};
use crate::model::{VirtualNode, CONTAINER_KIND};
use crate::routemap::RouteMap;
use crate::runtime::Runtime;
use crate::{log_op_end, log_op_error, log_op_start};

use matching::{next_child_pair, MatchCandidate, MatchKey, VisitedSet};

/// Reconciles virtual trees onto a live tree
///
/// Holds only the route index between passes; the live tree itself belongs
/// to the host runtime. Callers serialize passes - there is no internal
/// locking and no suspension point inside a pass.
#[derive(Debug, Default)]
pub struct Reconciler {
    routes: RouteMap,
}

impl Reconciler {
    /// Create a reconciler with an empty route index
    pub fn new() -> Self {
        Self {
            routes: RouteMap::new(),
        }
    }

    /// Inspect the route index
    pub fn routes(&self) -> &RouteMap {
        &self.routes
    }

    /// Reconcile one live object against one virtual description
    ///
    /// Exactly one of four transitions applies:
    ///
    /// | live    | node    | action                                   |
    /// |---------|---------|------------------------------------------|
    /// | present | absent  | deregister route, destroy                |
    /// | absent  | present | reify a new subtree                      |
    /// | present | present, incompatible kind | destroy, then reify   |
    /// | present | present, compatible kind   | update in place       |
    ///
    /// Returns the surviving live object, or `None` after a deletion. Both
    /// inputs absent is legal only at the top level and yields `None`.
    pub fn reconcile(
        &mut self,
        rt: &mut dyn Runtime,
        live: Option<LiveId>,
        node: Option<&VirtualNode>,
    ) -> Result<Option<LiveId>> {
        let started = Instant::now();
        log_op_start!("reconcile");

        let result = self.reconcile_node(rt, live, node);

        let elapsed = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => log_op_end!("reconcile", duration_ms = elapsed),
            Err(err) => log_op_error!("reconcile", err, duration_ms = elapsed),
        }
        result
    }

    /// Reconcile a virtual description at a path into the live tree
    ///
    /// Walks `path` from `root` segment by segment: looks up a same-named
    /// child, trying the root's well-known namespaces for the first segment;
    /// creates generic containers for unresolved intermediate segments; and
    /// for an unresolved final segment falls back to the route index under
    /// `route`. The result of the single-object reconcile is reparented
    /// (best-effort) under the last resolved container.
    pub fn reconcile_route(
        &mut self,
        rt: &mut dyn Runtime,
        root: LiveId,
        path: &[String],
        node: &VirtualNode,
        route: &RouteKey,
    ) -> Result<Option<LiveId>> {
        let started = Instant::now();
        log_op_start!("reconcile_route", route = route.as_str(), path_len = path.len());

        let result = self.reconcile_route_inner(rt, root, path, node, route);

        let elapsed = started.elapsed().as_millis() as u64;
        match &result {
            Ok(_) => log_op_end!("reconcile_route", duration_ms = elapsed),
            Err(err) => log_op_error!("reconcile_route", err, duration_ms = elapsed),
        }
        result
    }

    /// Release the route index's bookkeeping
    ///
    /// Does not destroy live objects: ownership of already-materialized
    /// objects stays with the host runtime.
    pub fn teardown(&mut self) {
        log_op_start!("teardown", route_count = self.routes.len());
        self.routes.clear();
        log_op_end!("teardown", duration_ms = 0u64);
    }

    fn reconcile_route_inner(
        &mut self,
        rt: &mut dyn Runtime,
        root: LiveId,
        path: &[String],
        node: &VirtualNode,
        route: &RouteKey,
    ) -> Result<Option<LiveId>> {
        if path.is_empty() {
            return Err(ReconcileError::EmptyPath);
        }

        let mut parent = root;
        let mut target: Option<LiveId> = None;
        for (index, segment) in path.iter().enumerate() {
            let is_last = index + 1 == path.len();

            let mut found = rt.find_child(parent, segment)?;
            if found.is_none() && index == 0 {
                // The first segment may name a well-known top-level
                // namespace; resolution failure is not an error here
                found = rt.resolve_namespace(root, segment).ok();
            }

            match found {
                Some(existing) if is_last => target = Some(existing),
                Some(existing) => parent = existing,
                None if is_last => {
                    // The target position is decided by reconciliation, not
                    // by scaffolding; recover through the route index when
                    // the literal walk comes up empty
                    target = self.routes.get(route);
                }
                None => {
                    let scaffold = rt.create(CONTAINER_KIND)?;
                    rt.set_name(scaffold, segment)?;
                    reparent(rt, scaffold, parent);
                    parent = scaffold;
                }
            }
        }

        let result = self.reconcile_node(rt, target, Some(node))?;
        if let Some(id) = result {
            reparent(rt, id, parent);
        }
        Ok(result)
    }

    /// The four-transition state machine behind [`Reconciler::reconcile`]
    fn reconcile_node(
        &mut self,
        rt: &mut dyn Runtime,
        live: Option<LiveId>,
        node: Option<&VirtualNode>,
    ) -> Result<Option<LiveId>> {
        match (live, node) {
            (None, None) => Ok(None),

            (Some(live), None) => {
                self.destroy(rt, live);
                Ok(None)
            }

            (None, Some(node)) => Ok(Some(self.reify(rt, node)?)),

            (Some(live), Some(node)) => {
                let live_kind = rt.kind_of(live)?;
                if !live_kind.is_compatible(&node.kind) {
                    // Destructive type change: the whole subtree is rebuilt
                    // and nested route registrations re-established by the
                    // rebuild
                    debug!(live_id = %live, from = %live_kind, to = %node.kind, "kind changed, rebuilding subtree");
                    self.destroy(rt, live);
                    return Ok(Some(self.reify(rt, node)?));
                }

                if let Some(route) = &node.route {
                    self.routes.insert(route.clone(), live);
                }
                if rt.name_of(live)? != node.name {
                    rt.set_name(live, &node.name)?;
                }
                apply_properties(rt, live, node)?;
                self.reconcile_children(rt, live, node)?;
                Ok(Some(live))
            }
        }
    }

    /// Deregister and destroy, in one logical step
    ///
    /// Destruction releases the whole subtree, so route entries for every
    /// descendant are dropped with it; no route entry outlives its object.
    /// The destroy itself is best-effort since the runtime may have released
    /// or protected the object on its own.
    fn destroy(&mut self, rt: &mut dyn Runtime, live: LiveId) {
        self.deregister_subtree(rt, live);
        let _ = rt.destroy(live);
    }

    fn deregister_subtree(&mut self, rt: &mut dyn Runtime, live: LiveId) {
        self.routes.remove_by_object(live);
        if let Ok(children) = rt.children_of(live) {
            for child in children {
                self.deregister_subtree(rt, child);
            }
        }
    }

    /// Materialize a virtual subtree with no live counterpart
    ///
    /// Returns the fully constructed, still unparented object; the caller
    /// attaches it where it belongs.
    fn reify(&mut self, rt: &mut dyn Runtime, node: &VirtualNode) -> Result<LiveId> {
        let kind = node.kind.concrete();
        let id = rt.create(kind)?;
        rt.set_name(id, &node.name)?;
        apply_properties(rt, id, node)?;

        for child in &node.children {
            let child_id = self.reify(rt, child)?;
            reparent(rt, child_id, id);
        }

        if let Some(route) = &node.route {
            self.routes.insert(route.clone(), id);
        }
        debug!(live_id = %id, kind, name = %node.name, "reified virtual node");
        Ok(id)
    }

    /// Align a live object's children with its virtual description
    ///
    /// Two passes over the matching heuristic share one visited set. The
    /// forward pass (virtual children as primary) creates and updates; the
    /// reverse pass (live children captured before the forward pass mutated
    /// parentage) surfaces live children with no virtual counterpart, which
    /// the state machine then destroys.
    fn reconcile_children(
        &mut self,
        rt: &mut dyn Runtime,
        live: LiveId,
        node: &VirtualNode,
    ) -> Result<()> {
        let live_children = rt.children_of(live)?;

        let virtuals: Vec<MatchCandidate> = node
            .children
            .iter()
            .enumerate()
            .map(|(index, child)| MatchCandidate {
                key: MatchKey::Virtual(index),
                kind: child.kind.clone(),
                name: child.name.clone(),
            })
            .collect();
        let mut lives = Vec::with_capacity(live_children.len());
        for child in &live_children {
            lives.push(MatchCandidate {
                key: MatchKey::Live(*child),
                kind: rt.kind_of(*child)?,
                name: rt.name_of(*child)?,
            });
        }

        let mut visited = VisitedSet::default();

        while let Some((primary, matched)) = next_child_pair(&virtuals, &lives, &mut visited) {
            let MatchKey::Virtual(index) = primary.key else {
                continue;
            };
            let child_node = &node.children[index];
            let matched_live = matched.and_then(|candidate| match candidate.key {
                MatchKey::Live(id) => Some(id),
                MatchKey::Virtual(_) => None,
            });
            if let Some(result) = self.reconcile_node(rt, matched_live, Some(child_node))? {
                reparent(rt, result, live);
            }
        }

        while let Some((primary, matched)) = next_child_pair(&lives, &virtuals, &mut visited) {
            let MatchKey::Live(live_child) = primary.key else {
                continue;
            };
            let matched_node = matched.and_then(|candidate| match candidate.key {
                MatchKey::Virtual(index) => Some(&node.children[index]),
                MatchKey::Live(_) => None,
            });
            self.reconcile_node(rt, Some(live_child), matched_node)?;
        }

        Ok(())
    }
}

/// Write every declared property slot verbatim onto the live object
fn apply_properties(rt: &mut dyn Runtime, live: LiveId, node: &VirtualNode) -> Result<()> {
    for (name, property) in &node.properties {
        rt.set_property(live, name, &property.value)?;
    }
    Ok(())
}

/// Best-effort parent assignment
///
/// Skips the write when the parent already matches; otherwise attempts it
/// and discards failure. A refused reparent leaves the object where it was
/// and is an expected steady-state outcome, not an error.
fn reparent(rt: &mut dyn Runtime, live: LiveId, parent: LiveId) {
    if matches!(rt.parent_of(live), Ok(Some(current)) if current == parent) {
        return;
    }
    let _ = rt.set_parent(live, Some(parent));
}
