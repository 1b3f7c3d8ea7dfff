// Copyright 2025 the Sapling Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The persistent view-context graph.
//!
//! ## Reconciliation
//!
//! [`ViewGraph::update`] takes a new root view and brings the mounted
//! contexts in line with it:
//!
//! 1. Every existing context, parents before children, re-walks its
//!    [`GraphPath`] in the new root and checks that the value found there has
//!    the type it was mounted with.
//! 2. A context that still matches copies the fresh value in and refreshes
//!    its behavior and environment. Its [`ContextId`] and everything hanging
//!    off it survive.
//! 3. A context that no longer matches is torn down along with its subtree.
//!    Ids handed out for those contexts stop being alive, so gesture
//!    recognizers targeting them become invalid and are pruned the next time
//!    input is dispatched.
//! 4. Values that have no context yet are mounted, with a behavior built by
//!    the value's own [`View::make_behavior`].
//!
//! ## Layout
//!
//! Layout runs through each context's [`ViewBehavior`]. Sizes are negotiated
//! bottom-up through [`Subviews`]; placement commits a frame, in window
//! coordinates, for every context it reaches.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::TypeId;

use kurbo::{Point, Rect, Size};
use sapling_gesture::{GestureCandidate, GestureConfig, GestureTargets};
use sapling_layout::{
    LayoutProperties, ProposedViewSize, Subviews, UnitPoint, ViewDimensions, ViewSpacing,
    sanitize_size,
};
use smallvec::SmallVec;
use tracing::{debug, trace};

use crate::behavior::{NodeContext, ViewBehavior};
use crate::view::visit_path;
use crate::{Canvas, ContextId, EnvironmentValues, GraphError, GraphPath, KeyboardEvent, View};

struct Node {
    path: GraphPath,
    view: Box<dyn View>,
    type_id: TypeId,
    behavior: Option<Box<dyn ViewBehavior>>,
    parent: Option<ContextId>,
    /// One entry per child of `view`; `None` only between teardown and
    /// remount within an update.
    children: Vec<Option<ContextId>>,
    frame: Rect,
    environment: EnvironmentValues,
    parent_properties: LayoutProperties,
}

#[derive(Default)]
struct Slot {
    generation: u32,
    node: Option<Node>,
}

/// What one [`ViewGraph::update`] changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    /// Paths of contexts mounted, parents before children.
    pub created: Vec<GraphPath>,
    /// Paths of contexts torn down, children before parents.
    pub destroyed: Vec<GraphPath>,
    /// Number of contexts that kept their identity and took a new value.
    pub updated: usize,
}

impl ReconcileReport {
    /// Returns `true` if no context was mounted or torn down.
    #[must_use]
    pub fn is_unchanged(&self) -> bool {
        self.created.is_empty() && self.destroyed.is_empty()
    }
}

/// Mounted view contexts, stored in a generational arena.
///
/// ```
/// use kurbo::Size;
/// use sapling_graph::{Color, HStack, ViewExt, ViewGraph};
///
/// let mut graph = ViewGraph::new();
/// let report = graph.update(&HStack::new((Color::RED.frame(20.0, 10.0), Color::BLUE)));
/// assert_eq!(report.created.len(), 4);
///
/// graph.layout(Size::new(100.0, 50.0));
/// let root = graph.root().unwrap();
/// assert_eq!(graph.frame(root).unwrap().width(), 100.0);
///
/// // Same shape again: nothing is remounted.
/// let report = graph.update(&HStack::new((Color::GREEN.frame(20.0, 10.0), Color::BLUE)));
/// assert!(report.is_unchanged());
/// ```
#[derive(Default)]
pub struct ViewGraph {
    slots: Vec<Slot>,
    free_list: Vec<u32>,
    root: Option<ContextId>,
    focus: Option<ContextId>,
}

impl core::fmt::Debug for ViewGraph {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ViewGraph")
            .field("len", &self.len())
            .field("root", &self.root)
            .field("focus", &self.focus)
            .finish_non_exhaustive()
    }
}

impl ViewGraph {
    /// Creates an empty graph.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The root context, once something is mounted.
    #[must_use]
    pub fn root(&self) -> Option<ContextId> {
        self.root
    }

    /// Number of mounted contexts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.node.is_some()).count()
    }

    /// Returns `true` if nothing is mounted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns `true` if `id` refers to a mounted context.
    #[must_use]
    pub fn is_alive(&self, id: ContextId) -> bool {
        self.node(id).is_some()
    }

    fn node(&self, id: ContextId) -> Option<&Node> {
        self.slots
            .get(id.idx())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_ref())
    }

    fn node_mut(&mut self, id: ContextId) -> Option<&mut Node> {
        self.slots
            .get_mut(id.idx())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.as_mut())
    }

    /// The current value shown by `id`.
    #[must_use]
    pub fn view(&self, id: ContextId) -> Option<&dyn View> {
        self.node(id).map(|node| &*node.view)
    }

    /// The current value shown by `id`, as a `V`.
    pub fn try_view<V: View>(&self, id: ContextId) -> Result<&V, GraphError> {
        let node = self.node(id).ok_or(GraphError::StaleContext(id))?;
        node.view
            .as_any()
            .downcast_ref::<V>()
            .ok_or_else(|| GraphError::TypeMismatch {
                expected: core::any::type_name::<V>(),
                found: node.view.view_type_name(),
            })
    }

    /// The path `id` was mounted at.
    #[must_use]
    pub fn path(&self, id: ContextId) -> Option<&GraphPath> {
        self.node(id).map(|node| &node.path)
    }

    /// The frame committed for `id` by the last layout, in window
    /// coordinates.
    #[must_use]
    pub fn frame(&self, id: ContextId) -> Option<Rect> {
        self.node(id).map(|node| node.frame)
    }

    /// The enclosing context.
    #[must_use]
    pub fn parent(&self, id: ContextId) -> Option<ContextId> {
        self.node(id).and_then(|node| node.parent)
    }

    /// The child contexts of `id`, in view order.
    pub fn children(&self, id: ContextId) -> impl Iterator<Item = ContextId> + '_ {
        self.node(id)
            .into_iter()
            .flat_map(|node| node.children.iter().flatten().copied())
    }

    /// The environment `id` and its descendants see.
    #[must_use]
    pub fn environment(&self, id: ContextId) -> Option<&EnvironmentValues> {
        self.node(id).map(|node| &node.environment)
    }

    /// The context mounted at `path`.
    #[must_use]
    pub fn context_at(&self, path: &GraphPath) -> Option<ContextId> {
        let mut id = self.root?;
        for &index in path.indices() {
            id = (*self.node(id)?.children.get(index as usize)?)?;
        }
        Some(id)
    }

    /// Every mounted context, parents before children.
    #[must_use]
    pub fn contexts(&self) -> Vec<ContextId> {
        let mut out = Vec::new();
        let mut stack: Vec<ContextId> = self.root.into_iter().collect();
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            out.push(id);
            stack.extend(node.children.iter().rev().flatten().copied());
        }
        out
    }

    /// Reconciles the mounted contexts against a new root value.
    pub fn update(&mut self, root: &dyn View) -> ReconcileReport {
        let mut report = ReconcileReport::default();
        for id in self.contexts() {
            // Descendants of a context torn down earlier in this pass.
            if !self.is_alive(id) {
                continue;
            }
            if self.validate_path(id, root) {
                self.update_content(id, root);
                report.updated += 1;
            } else {
                self.teardown(id, &mut report);
            }
        }
        match self.root {
            Some(id) => self.fill_children(id, root, &mut report),
            None => {
                let id = self.mount(None, GraphPath::root(), root, &mut report);
                self.root = Some(id);
            }
        }
        debug!(
            created = report.created.len(),
            destroyed = report.destroyed.len(),
            updated = report.updated,
            "reconciled view graph"
        );
        report
    }

    /// Returns `true` if `root` still holds a value of `id`'s type at `id`'s
    /// path.
    #[must_use]
    pub fn validate_path(&self, id: ContextId, root: &dyn View) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        visit_path(root, node.path.indices(), |view| {
            view.view_type_id() == node.type_id
        })
        .unwrap_or(false)
    }

    /// Copies the value at `id`'s path into the context.
    ///
    /// # Panics
    ///
    /// If the path does not resolve to a value of the mounted type. Call
    /// [`ViewGraph::validate_path`] first.
    pub fn update_content(&mut self, id: ContextId, root: &dyn View) {
        let Some(node) = self.node(id) else {
            return;
        };
        let type_id = node.type_id;
        let parent = node.parent;
        let Some(view) = visit_path(root, node.path.indices(), |view| {
            (view.view_type_id() == type_id).then(|| view.clone_view())
        })
        .flatten() else {
            panic!(
                "context {id} at {} no longer resolves to a `{}`",
                node.path,
                node.view.view_type_name()
            );
        };
        let (mut environment, parent_properties) = self.inherited(parent);
        let Some(node) = self.node_mut(id) else {
            return;
        };
        node.view = view;
        if let Some(behavior) = node.behavior.as_mut() {
            behavior.update(&*node.view);
            behavior.modify_environment(&mut environment);
        }
        node.environment = environment;
        node.parent_properties = parent_properties;
    }

    /// The environment and layout properties a child of `parent` starts from.
    fn inherited(&self, parent: Option<ContextId>) -> (EnvironmentValues, LayoutProperties) {
        match parent.and_then(|parent| self.node(parent)) {
            Some(node) => (
                node.environment.clone(),
                node.behavior
                    .as_ref()
                    .map(|behavior| behavior.layout_properties())
                    .unwrap_or_default(),
            ),
            None => (EnvironmentValues::default(), LayoutProperties::default()),
        }
    }

    fn alloc(&mut self, node: Node) -> ContextId {
        if let Some(idx) = self.free_list.pop() {
            let slot = &mut self.slots[idx as usize];
            slot.generation = slot.generation.wrapping_add(1);
            slot.node = Some(node);
            return ContextId::new(idx, slot.generation);
        }
        let idx = u32::try_from(self.slots.len()).unwrap_or_else(|_| {
            panic!("view graph exceeded {} contexts", u32::MAX);
        });
        self.slots.push(Slot {
            generation: 0,
            node: Some(node),
        });
        ContextId::new(idx, 0)
    }

    fn mount(
        &mut self,
        parent: Option<ContextId>,
        path: GraphPath,
        view: &dyn View,
        report: &mut ReconcileReport,
    ) -> ContextId {
        let (mut environment, parent_properties) = self.inherited(parent);
        let behavior = view.make_behavior();
        behavior.modify_environment(&mut environment);
        let id = self.alloc(Node {
            path: path.clone(),
            view: view.clone_view(),
            type_id: view.view_type_id(),
            behavior: Some(behavior),
            parent,
            children: Vec::new(),
            frame: Rect::ZERO,
            environment,
            parent_properties,
        });
        trace!(%id, %path, view = view.view_type_name(), "mounted context");
        report.created.push(path.clone());

        let count = view.child_count();
        let mut children = Vec::with_capacity(count);
        for index in 0..count {
            let child = view
                .child(index)
                .map(|child| self.mount(Some(id), path.child(index), &*child, report));
            children.push(child);
        }
        if let Some(node) = self.node_mut(id) {
            node.children = children;
        }
        id
    }

    /// Mounts the children `view` has and `id` lacks, recursively.
    fn fill_children(&mut self, id: ContextId, view: &dyn View, report: &mut ReconcileReport) {
        let count = view.child_count();
        let Some(node) = self.node_mut(id) else {
            return;
        };
        let path = node.path.clone();
        let extra: SmallVec<[ContextId; 4]> = node
            .children
            .iter()
            .skip(count)
            .flatten()
            .copied()
            .collect();
        for child in extra {
            self.teardown(child, report);
        }
        let Some(node) = self.node_mut(id) else {
            return;
        };
        let mut changed = node.children.len() != count;
        node.children.resize(count, None);

        for index in 0..count {
            let Some(child_view) = view.child(index) else {
                continue;
            };
            let existing = self
                .node(id)
                .and_then(|node| node.children.get(index).copied().flatten());
            match existing {
                Some(child) => self.fill_children(child, &*child_view, report),
                None => {
                    let child = self.mount(Some(id), path.child(index), &*child_view, report);
                    if let Some(node) = self.node_mut(id) {
                        node.children[index] = Some(child);
                    }
                    changed = true;
                }
            }
        }
        if changed
            && let Some(behavior) = self.node_mut(id).and_then(|node| node.behavior.as_mut())
        {
            behavior.children_changed();
        }
    }

    /// Tears down `id` and its subtree and detaches it from its parent.
    fn teardown(&mut self, id: ContextId, report: &mut ReconcileReport) {
        let parent = self.parent(id);
        self.remove_subtree(id, report);
        if self.root == Some(id) {
            self.root = None;
        }
        if let Some(node) = parent.and_then(|parent| self.node_mut(parent)) {
            for slot in &mut node.children {
                if *slot == Some(id) {
                    *slot = None;
                }
            }
            if let Some(behavior) = node.behavior.as_mut() {
                behavior.children_changed();
            }
        }
    }

    fn remove_subtree(&mut self, id: ContextId, report: &mut ReconcileReport) {
        let Some(node) = self
            .slots
            .get_mut(id.idx())
            .filter(|slot| slot.generation == id.generation())
            .and_then(|slot| slot.node.take())
        else {
            return;
        };
        for child in node.children.iter().flatten() {
            self.remove_subtree(*child, report);
        }
        self.free_list.push(id.0);
        if self.focus == Some(id) {
            self.focus = None;
        }
        trace!(%id, path = %node.path, view = node.view.view_type_name(), "tore down context");
        report.destroyed.push(node.path);
    }

    /// Runs `f` with `id`'s behavior and an accessor over its children.
    ///
    /// The behavior is moved out of the node for the duration of the call.
    fn with_behavior<R: Default>(
        &mut self,
        id: ContextId,
        f: impl FnOnce(&mut dyn ViewBehavior, &NodeContext<'_>, &mut NodeSubviews<'_>) -> R,
    ) -> R {
        let Some(node) = self.node_mut(id) else {
            return R::default();
        };
        let Some(mut behavior) = node.behavior.take() else {
            return R::default();
        };
        let environment = node.environment.clone();
        let parent_properties = node.parent_properties;
        let children = node.children.iter().flatten().copied().collect();
        let cx = NodeContext {
            id,
            parent_properties,
            environment: &environment,
        };
        let mut subviews = NodeSubviews {
            graph: self,
            children,
        };
        let result = f(&mut *behavior, &cx, &mut subviews);
        if let Some(node) = self.node_mut(id) {
            node.behavior = Some(behavior);
        }
        result
    }

    /// Size of `id` under `proposal`.
    pub fn size_that_fits(&mut self, id: ContextId, proposal: ProposedViewSize) -> Size {
        let size = self.with_behavior(id, |behavior, cx, children| {
            behavior.size_that_fits(cx, proposal, children)
        });
        sanitize_size(size)
    }

    /// Size and alignment guides of `id` under `proposal`.
    pub fn dimensions(&mut self, id: ContextId, proposal: ProposedViewSize) -> ViewDimensions {
        self.with_behavior(id, |behavior, cx, children| {
            behavior.dimensions(cx, proposal, children)
        })
    }

    /// Spacing preferences of `id`.
    pub fn spacing(&mut self, id: ContextId) -> ViewSpacing {
        self.with_behavior(id, |behavior, _, children| behavior.spacing(children))
    }

    /// Layout priority of `id`.
    pub fn layout_priority(&mut self, id: ContextId) -> f64 {
        self.with_behavior(id, |behavior, _, children| {
            behavior.layout_priority(children)
        })
    }

    /// Commits `id` so that its `anchor` lands on `position`, then places its
    /// subtree.
    pub fn place(
        &mut self,
        id: ContextId,
        position: Point,
        anchor: UnitPoint,
        proposal: ProposedViewSize,
    ) {
        let size = self.size_that_fits(id, proposal);
        let frame = Rect::from_origin_size(anchor.origin_for(position, size), size);
        let Some(node) = self.node_mut(id) else {
            return;
        };
        node.frame = frame;
        self.with_behavior(id, |behavior, cx, children| {
            behavior.place_children(cx, frame, proposal, children);
        });
    }

    /// Lays out the whole graph in a window of `size`, centering the root.
    pub fn layout(&mut self, size: Size) {
        let Some(root) = self.root else {
            return;
        };
        let window = Rect::from_origin_size(Point::ZERO, size);
        self.place(
            root,
            window.center(),
            UnitPoint::CENTER,
            ProposedViewSize::from_size(size),
        );
    }

    /// Draws every context, parents before children, into `canvas`.
    pub fn draw(&self, canvas: &mut dyn Canvas) {
        if let Some(root) = self.root {
            self.draw_context(root, canvas);
        }
    }

    fn draw_context(&self, id: ContextId, canvas: &mut dyn Canvas) {
        let Some(node) = self.node(id) else {
            return;
        };
        if let Some(behavior) = node.behavior.as_ref() {
            let cx = NodeContext {
                id,
                parent_properties: node.parent_properties,
                environment: &node.environment,
            };
            behavior.draw(&cx, node.frame, canvas);
        }
        for child in node.children.iter().flatten() {
            self.draw_context(*child, canvas);
        }
    }

    /// The contexts under `point`, from the root down to the deepest.
    ///
    /// At each level the front-most (last placed) child containing the point
    /// wins.
    #[must_use]
    pub fn hit_test(&self, point: Point) -> Vec<ContextId> {
        let mut hits = Vec::new();
        let Some(mut id) = self.root.filter(|root| {
            self.frame(*root)
                .is_some_and(|frame| frame.contains(point))
        }) else {
            return hits;
        };
        loop {
            hits.push(id);
            let next = self.node(id).and_then(|node| {
                node.children.iter().rev().flatten().copied().find(|child| {
                    self.frame(*child)
                        .is_some_and(|frame| frame.contains(point))
                })
            });
            match next {
                Some(child) => id = child,
                None => return hits,
            }
        }
    }

    /// Fresh gesture handlers for every gesture attached along the hit path
    /// at `point`, deepest context first.
    #[must_use]
    pub fn gesture_candidates(
        &self,
        point: Point,
        config: &GestureConfig,
    ) -> Vec<GestureCandidate<ContextId>> {
        let mut candidates = Vec::new();
        for id in self.hit_test(point).into_iter().rev() {
            let Some(behavior) = self.node(id).and_then(|node| node.behavior.as_ref()) else {
                continue;
            };
            for attached in behavior.gestures() {
                candidates.push(GestureCandidate::new(
                    attached.priority,
                    attached.gesture.make_handler(id, config),
                ));
            }
        }
        trace!(count = candidates.len(), "collected gesture candidates");
        candidates
    }

    /// The context receiving keyboard input.
    #[must_use]
    pub fn focus(&self) -> Option<ContextId> {
        self.focus.filter(|id| self.is_alive(*id))
    }

    /// Moves keyboard focus. Returns `false` if `id` is not alive.
    pub fn set_focus(&mut self, id: Option<ContextId>) -> bool {
        match id {
            Some(id) if !self.is_alive(id) => false,
            _ => {
                self.focus = id;
                true
            }
        }
    }

    /// Offers `event` to the focused context, then to each of its ancestors,
    /// until one consumes it.
    pub fn handle_key(&mut self, event: &KeyboardEvent) -> bool {
        let mut next = self.focus();
        while let Some(id) = next {
            let consumed = self
                .node_mut(id)
                .and_then(|node| node.behavior.as_mut())
                .is_some_and(|behavior| behavior.handle_key(event));
            if consumed {
                return true;
            }
            next = self.parent(id);
        }
        false
    }
}

impl GestureTargets<ContextId> for ViewGraph {
    fn is_alive(&self, target: ContextId) -> bool {
        Self::is_alive(self, target)
    }

    fn local_point(&self, target: ContextId, point: Point) -> Option<Point> {
        let frame = self.frame(target)?;
        Some(point - frame.origin().to_vec2())
    }

    fn bounds(&self, target: ContextId) -> Option<Rect> {
        let frame = self.frame(target)?;
        Some(Rect::from_origin_size(Point::ZERO, frame.size()))
    }
}

/// [`Subviews`] over the children of one context.
struct NodeSubviews<'g> {
    graph: &'g mut ViewGraph,
    children: SmallVec<[ContextId; 8]>,
}

impl Subviews for NodeSubviews<'_> {
    fn len(&self) -> usize {
        self.children.len()
    }

    fn size_that_fits(&mut self, index: usize, proposal: ProposedViewSize) -> Size {
        self.graph.size_that_fits(self.children[index], proposal)
    }

    fn dimensions(&mut self, index: usize, proposal: ProposedViewSize) -> ViewDimensions {
        self.graph.dimensions(self.children[index], proposal)
    }

    fn spacing(&mut self, index: usize) -> ViewSpacing {
        self.graph.spacing(self.children[index])
    }

    fn priority(&mut self, index: usize) -> f64 {
        self.graph.layout_priority(self.children[index])
    }

    fn place(
        &mut self,
        index: usize,
        position: Point,
        anchor: UnitPoint,
        proposal: ProposedViewSize,
    ) {
        self.graph
            .place(self.children[index], position, anchor, proposal);
    }
}
