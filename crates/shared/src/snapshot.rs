use serde::{Deserialize, Serialize};

use crate::{AnchorId, InstanceId, ObjectId, PlacementMode, TemplateObject, Transform};

/// Родитель размещённого экземпляра
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InstanceParent {
    /// Корневой узел сцены
    Root,
    /// Узел якоря изображения
    Anchor { anchor_id: AnchorId },
}

/// Запись о размещённом экземпляре
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceRecord {
    pub id: InstanceId,
    /// Порядковый номер вставки (монотонно растёт в пределах сессии)
    pub index: u64,
    pub template_id: ObjectId,
    pub name: String,
    pub parent: InstanceParent,
    /// Мировая трансформация
    pub transform: Transform,
    pub visible: bool,
}

/// Запись о визуализации найденной плоскости
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurfaceRecord {
    pub anchor_id: AnchorId,
    pub center: [f64; 3],
    pub extent: [f64; 2],
    pub hidden: bool,
}

/// Снимок состояния сессии (только в памяти, между сессиями не сохраняется)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SessionSnapshot {
    pub mode: PlacementMode,
    pub overlay_visible: bool,
    pub can_undo: bool,
    pub can_redo: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_template: Option<TemplateObject>,
    pub instances: Vec<InstanceRecord>,
    /// Индексы скрытых экземпляров в порядке скрытия
    pub redo_stack: Vec<usize>,
    pub surfaces: Vec<SurfaceRecord>,
}

impl SessionSnapshot {
    /// Количество видимых экземпляров
    pub fn visible_count(&self) -> usize {
        self.instances.iter().filter(|i| i.visible).count()
    }
}
