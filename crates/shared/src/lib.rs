use serde::{Deserialize, Serialize};

mod snapshot;

pub use snapshot::{InstanceParent, InstanceRecord, SessionSnapshot, SurfaceRecord};

/// Уникальный идентификатор объекта (шаблона)
pub type ObjectId = String;

/// Уникальный идентификатор якоря, выданный трекингом
pub type AnchorId = String;

/// Уникальный идентификатор размещённого экземпляра
pub type InstanceId = String;

/// Тип примитива (размеры в метрах)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Primitive {
    Cube {
        width: f64,
        height: f64,
        depth: f64,
    },
    Cylinder {
        radius: f64,
        height: f64,
    },
    Sphere {
        radius: f64,
    },
    Cone {
        radius: f64,
        height: f64,
    },
}

impl Primitive {
    /// Высота примитива по оси Y
    pub fn height(&self) -> f64 {
        match self {
            Primitive::Cube { height, .. } => *height,
            Primitive::Cylinder { height, .. } => *height,
            Primitive::Sphere { radius } => radius * 2.0,
            Primitive::Cone { height, .. } => *height,
        }
    }

    /// Габариты (ширина, высота, глубина)
    pub fn size(&self) -> [f64; 3] {
        match self {
            Primitive::Cube {
                width,
                height,
                depth,
            } => [*width, *height, *depth],
            Primitive::Cylinder { radius, height } | Primitive::Cone { radius, height } => {
                [radius * 2.0, *height, radius * 2.0]
            }
            Primitive::Sphere { radius } => [radius * 2.0; 3],
        }
    }
}

/// Трансформация объекта (поворот: углы Эйлера XYZ в радианах)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: [f64; 3],
    pub rotation: [f64; 3],
    pub scale: [f64; 3],
}

impl Transform {
    pub fn new() -> Self {
        Self {
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            scale: [1.0, 1.0, 1.0],
        }
    }

    /// Трансформация с одним только смещением
    pub fn at(position: [f64; 3]) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}

/// Шаблон 3D-объекта, выбранный пользователем.
/// Неизменяем: каждое размещение создаёт свою копию.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateObject {
    pub id: ObjectId,
    pub name: String,
    pub primitive: Primitive,
}

impl TemplateObject {
    pub fn new(id: impl Into<ObjectId>, name: impl Into<String>, primitive: Primitive) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            primitive,
        }
    }

    /// Высота объекта (используется для подъёма над поверхностью)
    pub fn height(&self) -> f64 {
        self.primitive.height()
    }
}

/// Режим размещения объектов
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlacementMode {
    /// Свободное размещение перед камерой
    #[default]
    Freeform,
    /// Размещение на найденных поверхностях
    SurfaceConstrained,
    /// Размещение на распознанных изображениях
    ImageAnchored,
}

impl PlacementMode {
    /// Все режимы в порядке сегментов переключателя
    pub fn all() -> &'static [PlacementMode] {
        &[
            PlacementMode::Freeform,
            PlacementMode::SurfaceConstrained,
            PlacementMode::ImageAnchored,
        ]
    }

    /// Индекс сегмента в переключателе режимов
    pub fn segment_index(self) -> usize {
        match self {
            PlacementMode::Freeform => 0,
            PlacementMode::SurfaceConstrained => 1,
            PlacementMode::ImageAnchored => 2,
        }
    }

    /// Режим по индексу сегмента (неизвестный индекс даёт None)
    pub fn from_segment(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }
}

/// Якорь, найденный трекингом: плоскость или изображение
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Anchor {
    /// Горизонтальная плоскость. Центр и размеры заданы в системе узла якоря,
    /// размеры по осям X и Z.
    Plane {
        id: AnchorId,
        center: [f64; 3],
        extent: [f64; 2],
    },
    /// Распознанное изображение из набора
    Image { id: AnchorId, name: String },
}

impl Anchor {
    /// Получить ID якоря
    pub fn id(&self) -> &AnchorId {
        match self {
            Anchor::Plane { id, .. } => id,
            Anchor::Image { id, .. } => id,
        }
    }
}

/// Узел сцены, который трекинг привязывает к якорю
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AnchorNode {
    /// Мировая трансформация узла
    #[serde(default)]
    pub transform: Transform,
}

impl AnchorNode {
    pub fn at(position: [f64; 3]) -> Self {
        Self {
            transform: Transform::at(position),
        }
    }
}

/// Событие от трекинга
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AnchorEvent {
    /// Якорь впервые найден
    Added { anchor: Anchor, node: AnchorNode },
    /// Якорь уточнён (например, плоскость расширилась)
    Updated { anchor: Anchor, node: AnchorNode },
}

impl AnchorEvent {
    pub fn anchor(&self) -> &Anchor {
        match self {
            AnchorEvent::Added { anchor, .. } | AnchorEvent::Updated { anchor, .. } => anchor,
        }
    }

    pub fn node(&self) -> &AnchorNode {
        match self {
            AnchorEvent::Added { node, .. } | AnchorEvent::Updated { node, .. } => node,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roundtrip<T: Serialize + for<'de> Deserialize<'de> + PartialEq + std::fmt::Debug>(val: &T) {
        let json = serde_json::to_string(val).expect("serialize");
        let back: T = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(*val, back);
    }

    #[test]
    fn test_primitive_height() {
        assert_eq!(Primitive::Cube { width: 1.0, height: 0.2, depth: 1.0 }.height(), 0.2);
        assert_eq!(Primitive::Sphere { radius: 0.05 }.height(), 0.1);
        assert_eq!(Primitive::Cone { radius: 0.1, height: 0.3 }.height(), 0.3);
    }

    #[test]
    fn test_primitive_size() {
        let size = Primitive::Cylinder { radius: 0.5, height: 2.0 }.size();
        assert_eq!(size, [1.0, 2.0, 1.0]);
    }

    #[test]
    fn test_primitive_cube_serde() {
        let p = Primitive::Cube { width: 2.0, height: 3.0, depth: 1.5 };
        roundtrip(&p);
        let json = serde_json::to_string(&p).unwrap();
        assert!(json.contains(r#""type":"cube""#));
    }

    #[test]
    fn test_transform_default_has_unit_scale() {
        let t = Transform::default();
        assert_eq!(t.scale, [1.0, 1.0, 1.0]);
        assert_eq!(Transform::at([1.0, 2.0, 3.0]).position, [1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_placement_mode_serde() {
        let json = serde_json::to_string(&PlacementMode::SurfaceConstrained).unwrap();
        assert_eq!(json, r#""surface_constrained""#);
        let mode: PlacementMode = serde_json::from_str(r#""image_anchored""#).unwrap();
        assert_eq!(mode, PlacementMode::ImageAnchored);
    }

    #[test]
    fn test_placement_mode_segments() {
        for mode in PlacementMode::all() {
            assert_eq!(PlacementMode::from_segment(mode.segment_index()), Some(*mode));
        }
        assert_eq!(PlacementMode::from_segment(3), None);
    }

    #[test]
    fn test_anchor_event_serde() {
        let json = r#"{
            "event": "added",
            "anchor": {"type": "plane", "id": "p1", "center": [0, 0, 0], "extent": [1, 2]},
            "node": {"transform": {"position": [0, -1, 0], "rotation": [0, 0, 0], "scale": [1, 1, 1]}}
        }"#;
        let event: AnchorEvent = serde_json::from_str(json).unwrap();
        assert!(matches!(event, AnchorEvent::Added { .. }));
        assert_eq!(event.anchor().id(), "p1");
        assert_eq!(event.node().transform.position, [0.0, -1.0, 0.0]);
        roundtrip(&event);
    }

    #[test]
    fn test_anchor_node_defaults_to_identity() {
        let event: AnchorEvent = serde_json::from_str(
            r#"{"event": "updated", "anchor": {"type": "image", "id": "i1", "name": "poster"}, "node": {}}"#,
        )
        .unwrap();
        assert_eq!(event.node().transform, Transform::new());
    }
}
