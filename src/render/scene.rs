use indexmap::IndexMap;

use crate::core::Region;
use crate::render::Color;

/// Stable handle to one retained primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PrimitiveId(u64);

/// Geometry of one retained primitive in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SceneShape {
    Point { x: f64, y: f64 },
    Segment { x1: f64, y1: f64, x2: f64, y2: f64 },
}

impl SceneShape {
    /// Linear interpolation toward `target` at progress `t` in [0, 1].
    ///
    /// Shapes of different kinds cannot interpolate; the target wins.
    #[must_use]
    pub fn lerp(self, target: SceneShape, t: f64) -> SceneShape {
        match (self, target) {
            (SceneShape::Point { x, y }, SceneShape::Point { x: tx, y: ty }) => SceneShape::Point {
                x: lerp(x, tx, t),
                y: lerp(y, ty, t),
            },
            (
                SceneShape::Segment { x1, y1, x2, y2 },
                SceneShape::Segment {
                    x1: tx1,
                    y1: ty1,
                    x2: tx2,
                    y2: ty2,
                },
            ) => SceneShape::Segment {
                x1: lerp(x1, tx1, t),
                y1: lerp(y1, ty1, t),
                x2: lerp(x2, tx2, t),
                y2: lerp(y2, ty2, t),
            },
            (_, target) => target,
        }
    }
}

fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}

/// One retained primitive: geometry, paint state, and ownership.
///
/// Points remember their source year so hover resolution can read the full
/// record back out of the series registry instead of the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenePrimitive {
    pub region: Region,
    pub color: Color,
    pub opacity: f64,
    pub shape: SceneShape,
    pub source_year: Option<i32>,
}

/// Retained store of every on-screen series primitive.
///
/// The registry stays the single source of truth for data; the scene only
/// holds where that data currently sits on screen.
#[derive(Debug, Default)]
pub struct SceneStore {
    primitives: IndexMap<PrimitiveId, ScenePrimitive>,
    next_id: u64,
}

impl SceneStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, primitive: ScenePrimitive) -> PrimitiveId {
        let id = PrimitiveId(self.next_id);
        self.next_id += 1;
        self.primitives.insert(id, primitive);
        id
    }

    #[must_use]
    pub fn get(&self, id: PrimitiveId) -> Option<&ScenePrimitive> {
        self.primitives.get(&id)
    }

    pub fn get_mut(&mut self, id: PrimitiveId) -> Option<&mut ScenePrimitive> {
        self.primitives.get_mut(&id)
    }

    pub fn remove(&mut self, id: PrimitiveId) -> Option<ScenePrimitive> {
        self.primitives.shift_remove(&id)
    }

    #[must_use]
    pub fn ids_for_region(&self, region: Region) -> Vec<PrimitiveId> {
        self.primitives
            .iter()
            .filter(|(_, primitive)| primitive.region == region)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PrimitiveId, &ScenePrimitive)> {
        self.primitives.iter().map(|(id, primitive)| (*id, primitive))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.primitives.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.primitives.is_empty()
    }
}
