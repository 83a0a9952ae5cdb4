use super::{Lazy, NodeId, SceneGraph};
use log::{debug, warn};
use parking_lot::Mutex;
use sg_math::{Mat4, Quat, Vec3};

/// The spatial attribute of a scene node: local position, rotation and
/// scale, plus a lazily recomputed cache of the world-space model matrix.
///
/// Every field sits behind its own mutex so render-thread reads and
/// logic-thread writes of independent fields never contend. Composite
/// operations acquire and release those locks one at a time and are not
/// atomic as a whole: a reader racing a multi-field update may observe a
/// mix of old and new fields. That race is accepted; per-field ordering is
/// the only guarantee.
///
/// Navigation to the parent chain and the child list goes through the
/// owner's [`NodeId`] handle and the [`SceneGraph`] passed into each
/// operation, never through an owning reference.
pub struct Transform {
    owner: NodeId,
    position: Mutex<Vec3>,
    rotation: Mutex<Quat>,
    scale: Mutex<Vec3>,
    model_matrix: Mutex<Lazy<Mat4>>,
}

impl Transform {
    pub(crate) fn new(owner: NodeId) -> Self {
        Self {
            owner,
            position: Mutex::new(Vec3::ZERO),
            rotation: Mutex::new(Quat::IDENTITY),
            scale: Mutex::new(Vec3::ONE),
            model_matrix: Mutex::new(Lazy::new(Mat4::identity())),
        }
    }

    pub fn owner(&self) -> NodeId {
        self.owner
    }

    pub fn position(&self) -> Vec3 {
        *self.position.lock()
    }

    pub fn set_position(&self, graph: &SceneGraph, position: Vec3) {
        *self.position.lock() = position;
        self.invalidate(graph, false);
    }

    pub fn position_x(&self) -> f32 {
        self.position.lock().x
    }

    pub fn position_y(&self) -> f32 {
        self.position.lock().y
    }

    pub fn position_z(&self) -> f32 {
        self.position.lock().z
    }

    // single-component writes stay inside the one field lock, so writers to
    // different components never lose each other's update
    pub fn set_position_x(&self, graph: &SceneGraph, x: f32) {
        self.position.lock().x = x;
        self.invalidate(graph, false);
    }

    pub fn set_position_y(&self, graph: &SceneGraph, y: f32) {
        self.position.lock().y = y;
        self.invalidate(graph, false);
    }

    pub fn set_position_z(&self, graph: &SceneGraph, z: f32) {
        self.position.lock().z = z;
        self.invalidate(graph, false);
    }

    pub fn rotation(&self) -> Quat {
        *self.rotation.lock()
    }

    pub fn set_rotation(&self, graph: &SceneGraph, rotation: Quat) {
        *self.rotation.lock() = rotation;
        self.invalidate(graph, true);
    }

    pub fn rotation_w(&self) -> f32 {
        self.rotation.lock().w
    }

    pub fn rotation_x(&self) -> f32 {
        self.rotation.lock().x
    }

    pub fn rotation_y(&self) -> f32 {
        self.rotation.lock().y
    }

    pub fn rotation_z(&self) -> f32 {
        self.rotation.lock().z
    }

    pub fn scale(&self) -> Vec3 {
        *self.scale.lock()
    }

    pub fn set_scale(&self, graph: &SceneGraph, scale: Vec3) {
        *self.scale.lock() = scale;
        self.invalidate(graph, false);
    }

    pub fn scale_x(&self) -> f32 {
        self.scale.lock().x
    }

    pub fn scale_y(&self) -> f32 {
        self.scale.lock().y
    }

    pub fn scale_z(&self) -> f32 {
        self.scale.lock().z
    }

    pub fn set_scale_x(&self, graph: &SceneGraph, x: f32) {
        self.scale.lock().x = x;
        self.invalidate(graph, false);
    }

    pub fn set_scale_y(&self, graph: &SceneGraph, y: f32) {
        self.scale.lock().y = y;
        self.invalidate(graph, false);
    }

    pub fn set_scale_z(&self, graph: &SceneGraph, z: f32) {
        self.scale.lock().z = z;
        self.invalidate(graph, false);
    }

    pub fn rotation_pitch(&self) -> f32 {
        self.rotation().pitch()
    }

    pub fn rotation_yaw(&self) -> f32 {
        self.rotation().yaw()
    }

    pub fn rotation_roll(&self) -> f32 {
        self.rotation().roll()
    }

    pub fn translate(&self, graph: &SceneGraph, delta: Vec3) {
        *self.position.lock() += delta;
        self.invalidate(graph, false);
    }

    /// Replaces the rotation with `angle` radians around `axis`.
    pub fn set_rotation_by_axis(&self, graph: &SceneGraph, angle: f32, axis: Vec3) {
        *self.rotation.lock() = Quat::from_axis_angle(axis, angle);
        self.invalidate(graph, true);
    }

    /// Applies `rotation` in the parent's space, before the existing local
    /// rotation.
    pub fn rotate(&self, graph: &SceneGraph, rotation: Quat) {
        {
            let mut current = self.rotation.lock();
            *current = rotation * *current;
        }
        self.invalidate(graph, true);
    }

    pub fn rotate_by_axis(&self, graph: &SceneGraph, angle: f32, axis: Vec3) {
        self.rotate(graph, Quat::from_axis_angle(axis, angle));
    }

    /// Rotates around a pivot point given in the parent's space: the
    /// rotation is pre-multiplied as in [`rotate`](Self::rotate) and the
    /// position is swung around the pivot.
    pub fn rotate_with_pivot(&self, graph: &SceneGraph, rotation: Quat, pivot: Vec3) {
        {
            let mut current = self.rotation.lock();
            *current = rotation * *current;
        }
        {
            let mut position = self.position.lock();
            *position = pivot + rotation.rotate(*position - pivot);
        }
        self.invalidate(graph, true);
    }

    pub fn rotate_by_axis_with_pivot(
        &self,
        graph: &SceneGraph,
        angle: f32,
        axis: Vec3,
        pivot: Vec3,
    ) {
        self.rotate_with_pivot(graph, Quat::from_axis_angle(axis, angle), pivot);
    }

    /// Overwrites position, rotation and scale with the decomposition of
    /// the given affine matrix. Reflections end up as negative scale
    /// components, never in the rotation. A singular matrix decomposes into
    /// non-finite fields; it is the caller's job to not pass one.
    pub fn set_model_matrix(&self, graph: &SceneGraph, matrix: Mat4) {
        let (position, rotation, scale) = matrix.split();

        if scale.x == 0.0 || scale.y == 0.0 || scale.z == 0.0 {
            warn!(
                "decomposed a singular model matrix for {:?}; transform fields are degenerate",
                self.owner
            );
        }

        *self.position.lock() = position;
        *self.scale.lock() = scale;
        *self.rotation.lock() = rotation;

        self.invalidate(graph, true);
    }

    /// Returns the world-space model matrix, recomputing it bottom-up when
    /// the cache is invalid or `force_recalculate` is set. The result
    /// reflects this transform and all ancestors as of the moment the
    /// recursion resolved; an ancestor mutated mid-computation may
    /// contribute a transiently stale matrix that is re-invalidated right
    /// after.
    pub fn model_matrix(&self, graph: &SceneGraph, force_recalculate: bool) -> Mat4 {
        if !self.is_model_matrix_valid() || force_recalculate {
            let local = self.local_model_matrix();
            let parent_world = graph
                .node(self.owner)
                .and_then(|owner| owner.parent())
                .and_then(|parent_id| graph.node(parent_id))
                .and_then(|parent| {
                    parent
                        .transform()
                        .map(|transform| transform.model_matrix(graph, false))
                });

            let world = match parent_world {
                Some(parent_world) => parent_world * local,
                None => local,
            };

            self.model_matrix.lock().validate(world);
        }

        *self.model_matrix.lock().element()
    }

    /// Recomputes `Translation * Rotation * Scale` from the current fields.
    /// This never includes the parent chain and never touches the cache.
    pub fn local_model_matrix(&self) -> Mat4 {
        let position = *self.position.lock();
        let rotation = *self.rotation.lock();
        let scale = *self.scale.lock();

        Mat4::trs(position, rotation, scale)
    }

    pub fn is_model_matrix_valid(&self) -> bool {
        self.model_matrix.lock().is_valid()
    }

    /// Marks the owner dirty and invalidates the cached world matrix of
    /// this transform and every descendant. An already-invalid cache stops
    /// the recursion: the subtree below it is assumed to have been
    /// propagated when it was first invalidated, which holds as long as no
    /// caller invalidates a cache without going through this method.
    ///
    /// `rotation_updated` additionally applies the quaternion overflow
    /// clamp, rescaling all components once any of them grows past
    /// `sqrt(f32::MAX) / 2`. The rescale keeps the orientation but does not
    /// restore unit length.
    pub fn invalidate(&self, graph: &SceneGraph, rotation_updated: bool) {
        let owner = graph.node(self.owner);

        if let Some(owner) = &owner {
            owner.set_transform_dirty();
            owner.dirty_hierarchical_bounding_volume();
        }

        if self.is_model_matrix_valid() {
            self.model_matrix.lock().invalidate();

            if let Some(owner) = &owner {
                // snapshot copy; children attached after this point start
                // life with an invalid cache anyway
                for child_id in owner.children() {
                    if let Some(child) = graph.node(child_id) {
                        if let Some(transform) = child.transform() {
                            transform.invalidate(graph, false);
                        }
                    }
                }
            }
        }

        if rotation_updated {
            let threshold = f32::MAX.sqrt() / 2.0;
            let rescale = 0.5 / f32::MAX.sqrt();

            let mut rotation = self.rotation.lock();
            if rotation.w.abs() > threshold
                || rotation.x.abs() > threshold
                || rotation.y.abs() > threshold
                || rotation.z.abs() > threshold
            {
                debug!("rescaling rotation of {:?} to avoid overflow", self.owner);
                rotation.w *= rescale;
                rotation.x *= rescale;
                rotation.y *= rescale;
                rotation.z *= rescale;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{f32::consts::FRAC_PI_2, sync::Arc, thread};

    fn equals_float(a: f32, b: f32) -> bool {
        (a - b).abs() <= 1e-4
    }

    fn equals_vec3(a: Vec3, b: Vec3) -> bool {
        equals_float(a.x, b.x) && equals_float(a.y, b.y) && equals_float(a.z, b.z)
    }

    fn equals_mat4(a: &Mat4, b: &Mat4) -> bool {
        for i in 0..16 {
            if !equals_float(a.elements[i], b.elements[i]) {
                return false;
            }
        }

        true
    }

    fn translation_of(matrix: &Mat4) -> Vec3 {
        Vec3::new(matrix.elements[12], matrix.elements[13], matrix.elements[14])
    }

    fn chain(graph: &SceneGraph, depth: usize) -> Vec<NodeId> {
        let mut ids = Vec::with_capacity(depth);
        for i in 0..depth {
            let id = graph.create_node();
            if i > 0 {
                graph.set_parent(id, Some(ids[i - 1])).unwrap();
            }
            ids.push(id);
        }
        ids
    }

    fn node_of(graph: &SceneGraph, id: NodeId) -> Arc<crate::scene::Node> {
        graph.node(id).unwrap()
    }

    #[test]
    fn test_cache_starts_invalid() {
        let graph = SceneGraph::new();
        let node = graph.node(graph.create_node()).unwrap();
        assert_eq!(node.transform().unwrap().is_model_matrix_valid(), false);
    }

    #[test]
    fn test_child_world_matrix_includes_root_translation() {
        let graph = SceneGraph::new();
        let ids = chain(&graph, 2);
        let root = node_of(&graph, ids[0]);
        let child = node_of(&graph, ids[1]);

        child
            .transform()
            .unwrap()
            .set_position(&graph, Vec3::new(1.0, 0.0, 0.0));
        root.transform()
            .unwrap()
            .translate(&graph, Vec3::new(0.0, 5.0, 0.0));

        let world = child.transform().unwrap().model_matrix(&graph, false);
        assert!(equals_vec3(translation_of(&world), Vec3::new(1.0, 5.0, 0.0)));
    }

    #[test]
    fn test_local_model_matrix_ignores_parent_and_cache() {
        let graph = SceneGraph::new();
        let ids = chain(&graph, 2);
        let root = node_of(&graph, ids[0]);
        let child = node_of(&graph, ids[1]);

        child
            .transform()
            .unwrap()
            .set_position(&graph, Vec3::new(1.0, 0.0, 0.0));
        root.transform()
            .unwrap()
            .translate(&graph, Vec3::new(0.0, 5.0, 0.0));

        let local = child.transform().unwrap().local_model_matrix();
        assert!(equals_vec3(translation_of(&local), Vec3::new(1.0, 0.0, 0.0)));
        // the cache must not have been touched
        assert_eq!(child.transform().unwrap().is_model_matrix_valid(), false);
    }

    #[test]
    fn test_invalidation_propagates_and_read_revalidates() {
        let graph = SceneGraph::new();
        let ids = chain(&graph, 3);
        let root = node_of(&graph, ids[0]);
        let child = node_of(&graph, ids[1]);
        let leaf = node_of(&graph, ids[2]);

        leaf.transform().unwrap().model_matrix(&graph, false);
        assert!(root.transform().unwrap().is_model_matrix_valid());
        assert!(child.transform().unwrap().is_model_matrix_valid());
        assert!(leaf.transform().unwrap().is_model_matrix_valid());

        root.transform()
            .unwrap()
            .set_position(&graph, Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(root.transform().unwrap().is_model_matrix_valid(), false);
        assert_eq!(child.transform().unwrap().is_model_matrix_valid(), false);
        assert_eq!(leaf.transform().unwrap().is_model_matrix_valid(), false);

        let first = leaf.transform().unwrap().model_matrix(&graph, false);
        assert!(root.transform().unwrap().is_model_matrix_valid());
        assert!(child.transform().unwrap().is_model_matrix_valid());
        assert!(leaf.transform().unwrap().is_model_matrix_valid());

        // a second read is a pure cache hit
        let second = leaf.transform().unwrap().model_matrix(&graph, false);
        assert!(equals_mat4(&first, &second));
        assert!(equals_mat4(
            &first,
            &leaf.transform().unwrap().model_matrix(&graph, true)
        ));
    }

    #[test]
    fn test_partial_read_leaves_descendants_invalid() {
        let graph = SceneGraph::new();
        let ids = chain(&graph, 3);
        let child = node_of(&graph, ids[1]);
        let leaf = node_of(&graph, ids[2]);

        // reading the middle node validates root and child but not the leaf
        child.transform().unwrap().model_matrix(&graph, false);
        assert!(child.transform().unwrap().is_model_matrix_valid());
        assert_eq!(leaf.transform().unwrap().is_model_matrix_valid(), false);
    }

    #[test]
    fn test_invalidate_twice_is_idempotent() {
        let graph = SceneGraph::new();
        let ids = chain(&graph, 2);
        let root = node_of(&graph, ids[0]);
        let child = node_of(&graph, ids[1]);

        child.transform().unwrap().model_matrix(&graph, false);
        root.transform().unwrap().invalidate(&graph, false);
        root.transform().unwrap().invalidate(&graph, false);

        assert_eq!(root.transform().unwrap().is_model_matrix_valid(), false);
        assert_eq!(child.transform().unwrap().is_model_matrix_valid(), false);
    }

    #[test]
    fn test_mutators_mark_owner_dirty() {
        let graph = SceneGraph::new();
        let node = graph.node(graph.create_node()).unwrap();

        assert_eq!(node.transform().unwrap().owner(), node.id());
        assert!(node.take_transform_dirty());
        assert!(node.take_bounding_volume_dirty());

        node.transform()
            .unwrap()
            .translate(&graph, Vec3::new(1.0, 0.0, 0.0));

        assert!(node.is_transform_dirty());
        assert!(node.is_bounding_volume_dirty());
    }

    #[test]
    fn test_single_component_accessors() {
        let graph = SceneGraph::new();
        let node = graph.node(graph.create_node()).unwrap();
        let transform = node.transform().unwrap();

        transform.set_position(&graph, Vec3::new(1.0, 2.0, 3.0));
        transform.set_position_y(&graph, 9.0);
        assert!(equals_vec3(transform.position(), Vec3::new(1.0, 9.0, 3.0)));
        assert_eq!(transform.position_z(), 3.0);

        transform.set_scale(&graph, Vec3::new(2.0, 2.0, 2.0));
        transform.set_scale_x(&graph, 4.0);
        assert!(equals_vec3(transform.scale(), Vec3::new(4.0, 2.0, 2.0)));
        assert_eq!(transform.scale_y(), 2.0);

        let rotation = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2);
        transform.set_rotation(&graph, rotation);
        assert!(equals_float(transform.rotation_w(), rotation.w));
        assert!(equals_float(transform.rotation_z(), rotation.z));
        assert!(equals_float(transform.rotation_x(), 0.0));
        assert!(equals_float(transform.rotation_y(), 0.0));

        // a single-component write invalidates like any other mutation
        transform.model_matrix(&graph, false);
        transform.set_position_x(&graph, 0.0);
        assert_eq!(transform.is_model_matrix_valid(), false);
    }

    #[test]
    fn test_transform_less_parent_contributes_nothing() {
        let graph = SceneGraph::new();
        let empty_root = graph.create_node_without_transform();
        let child_id = graph.create_node();
        graph.set_parent(child_id, Some(empty_root)).unwrap();

        let child = graph.node(child_id).unwrap();
        child
            .transform()
            .unwrap()
            .set_position(&graph, Vec3::new(3.0, 0.0, 0.0));

        let world = child.transform().unwrap().model_matrix(&graph, false);
        assert!(equals_vec3(translation_of(&world), Vec3::new(3.0, 0.0, 0.0)));
        assert!(child.transform().unwrap().is_model_matrix_valid());
    }

    #[test]
    fn test_reparenting_invalidates_subtree() {
        let graph = SceneGraph::new();
        let ids = chain(&graph, 2);
        let other_root = graph.create_node();
        let child = node_of(&graph, ids[1]);

        graph
            .node(other_root)
            .unwrap()
            .transform()
            .unwrap()
            .set_position(&graph, Vec3::new(0.0, 0.0, 7.0));

        child.transform().unwrap().model_matrix(&graph, false);
        assert!(child.transform().unwrap().is_model_matrix_valid());

        graph.set_parent(ids[1], Some(other_root)).unwrap();
        assert_eq!(child.transform().unwrap().is_model_matrix_valid(), false);

        let world = child.transform().unwrap().model_matrix(&graph, false);
        assert!(equals_vec3(translation_of(&world), Vec3::new(0.0, 0.0, 7.0)));
    }

    #[test]
    fn test_pivot_rotation_preserves_pivot_point() {
        let graph = SceneGraph::new();
        let node = graph.node(graph.create_node()).unwrap();
        let transform = node.transform().unwrap();

        transform.set_position(&graph, Vec3::new(2.0, 1.0, 0.0));

        let pivot = Vec3::new(5.0, 0.0, 0.0);
        // with identity rotation and unit scale this local point lands
        // exactly on the pivot
        let pivot_local = Vec3::new(3.0, -1.0, 0.0);

        let old_world = transform.model_matrix(&graph, false);
        assert!(equals_vec3(old_world.transform_point(pivot_local), pivot));

        let rotation = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2);
        transform.rotate_with_pivot(&graph, rotation, pivot);

        let new_world = transform.model_matrix(&graph, false);
        assert!(equals_vec3(new_world.transform_point(pivot_local), pivot));
        assert!(equals_vec3(transform.position(), Vec3::new(4.0, -3.0, 0.0)));
    }

    #[test]
    fn test_rotate_by_axis_with_pivot_matches_quaternion_form() {
        let graph = SceneGraph::new();
        let left = graph.node(graph.create_node()).unwrap();
        let right = graph.node(graph.create_node()).unwrap();
        let pivot = Vec3::new(1.0, 2.0, 3.0);
        let axis = Vec3::new(0.0, 1.0, 0.0);

        for node in [&left, &right] {
            node.transform()
                .unwrap()
                .set_position(&graph, Vec3::new(-1.0, 0.5, 2.0));
        }

        left.transform()
            .unwrap()
            .rotate_by_axis_with_pivot(&graph, 0.4, axis, pivot);
        right
            .transform()
            .unwrap()
            .rotate_with_pivot(&graph, Quat::from_axis_angle(axis, 0.4), pivot);

        assert!(equals_mat4(
            &left.transform().unwrap().model_matrix(&graph, false),
            &right.transform().unwrap().model_matrix(&graph, false),
        ));
    }

    #[test]
    fn test_set_model_matrix_round_trip() {
        let graph = SceneGraph::new();
        let node = graph.node(graph.create_node()).unwrap();
        let transform = node.transform().unwrap();

        let position = Vec3::new(4.0, -1.0, 0.5);
        let rotation = Quat::from_axis_angle(Vec3::new(0.2, -1.0, 0.4).normalized(), 0.9);
        let scale = Vec3::new(2.0, 3.0, 0.5);
        let matrix = Mat4::trs(position, rotation, scale);

        transform.set_model_matrix(&graph, matrix);

        assert!(equals_vec3(transform.position(), position));
        assert!(equals_vec3(transform.scale(), scale));
        assert!(equals_float(
            Quat::dot(transform.rotation(), rotation).abs(),
            1.0
        ));
        assert!(equals_mat4(&transform.model_matrix(&graph, false), &matrix));
    }

    #[test]
    fn test_set_model_matrix_extracts_reflection() {
        let graph = SceneGraph::new();
        let node = graph.node(graph.create_node()).unwrap();
        let transform = node.transform().unwrap();

        let mirrored = Mat4::scale(Vec3::new(-1.0, 1.0, 1.0));
        transform.set_model_matrix(&graph, mirrored);

        assert!(transform.scale().x < 0.0);
        assert!(equals_mat4(&transform.model_matrix(&graph, false), &mirrored));
    }

    #[test]
    fn test_rotation_rescale_avoids_overflow() {
        let graph = SceneGraph::new();
        let node = graph.node(graph.create_node()).unwrap();
        let transform = node.transform().unwrap();

        // a deliberately non-unit step so the quaternion norm grows until
        // the clamp has to fire
        let unit = Quat::from_axis_angle(Vec3::new(0.0, 0.0, 1.0), 1e-3);
        let step = Quat::new(unit.w * 1.01, unit.x * 1.01, unit.y * 1.01, unit.z * 1.01);

        for _ in 0..10_000 {
            transform.rotate(&graph, step);
        }

        let rotation = transform.rotation();
        assert!(rotation.w.is_finite());
        assert!(rotation.x.is_finite());
        assert!(rotation.y.is_finite());
        assert!(rotation.z.is_finite());
        assert!(rotation.norm().is_finite());
        assert!(0.0 < rotation.norm());

        // the orientation must still be a rotation about the z axis
        let normalized = rotation.normalized();
        assert!(equals_float(normalized.x, 0.0));
        assert!(equals_float(normalized.y, 0.0));
        assert!(equals_float(
            normalized.w * normalized.w + normalized.z * normalized.z,
            1.0
        ));

        let world = transform.model_matrix(&graph, false);
        for element in world.elements {
            assert!(element.is_finite());
        }
    }

    #[test]
    fn test_rotation_euler_accessors() {
        let graph = SceneGraph::new();
        let node = graph.node(graph.create_node()).unwrap();
        let transform = node.transform().unwrap();

        transform.set_rotation_by_axis(&graph, 0.5, Vec3::new(0.0, 0.0, 1.0));
        assert!(equals_float(transform.rotation_roll(), 0.5));
        assert!(equals_float(transform.rotation_pitch(), 0.0));
        assert!(equals_float(transform.rotation_yaw(), 0.0));
    }

    #[test]
    fn test_concurrent_mutation_and_reads() {
        let graph = Arc::new(SceneGraph::new());
        let ids = chain(&graph, 2);
        let root = graph.node(ids[0]).unwrap();
        let child = graph.node(ids[1]).unwrap();

        child
            .transform()
            .unwrap()
            .set_position(&graph, Vec3::new(1.0, 0.0, 0.0));

        thread::scope(|scope| {
            let writer_graph = &graph;
            let writer_root = &root;
            scope.spawn(move || {
                for _ in 0..1_000 {
                    writer_root
                        .transform()
                        .unwrap()
                        .translate(writer_graph, Vec3::new(0.0, 0.5, 0.0));
                }
            });

            let reader_graph = &graph;
            let reader_child = &child;
            scope.spawn(move || {
                for _ in 0..1_000 {
                    let world = reader_child
                        .transform()
                        .unwrap()
                        .model_matrix(reader_graph, false);
                    for element in world.elements {
                        assert!(element.is_finite());
                    }
                }
            });
        });

        let world = child.transform().unwrap().model_matrix(&graph, false);
        assert!(equals_vec3(
            translation_of(&world),
            Vec3::new(1.0, 0.5 * 1_000.0, 0.0)
        ));
    }
}
