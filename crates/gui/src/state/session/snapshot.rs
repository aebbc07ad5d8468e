use shared::{InstanceRecord, SessionSnapshot, SurfaceRecord};

use super::{ArSession, PlacedInstance, SurfaceNode};
use crate::anchor::ArBackend;
use crate::helpers::{from_extent, from_vec3, mat4_to_transform};

impl From<&PlacedInstance> for InstanceRecord {
    fn from(instance: &PlacedInstance) -> Self {
        Self {
            id: instance.id.clone(),
            index: instance.index,
            template_id: instance.template.id.clone(),
            name: instance.template.name.clone(),
            parent: instance.parent.clone(),
            transform: mat4_to_transform(&instance.transform),
            visible: instance.visible,
        }
    }
}

impl From<&SurfaceNode> for SurfaceRecord {
    fn from(surface: &SurfaceNode) -> Self {
        Self {
            anchor_id: surface.anchor_id.clone(),
            center: from_vec3(surface.node.transform_point3(surface.center)),
            extent: from_extent(surface.extent),
            hidden: surface.hidden,
        }
    }
}

impl<B: ArBackend> ArSession<B> {
    /// Serializable view of the whole session
    pub fn snapshot(&self) -> SessionSnapshot {
        let signals = self.affordances();
        SessionSnapshot {
            mode: self.mode(),
            overlay_visible: self.overlay_visible(),
            can_undo: signals.can_undo,
            can_redo: signals.can_redo,
            selected_template: self.selected_template().cloned(),
            instances: self.history().entries().iter().map(InstanceRecord::from).collect(),
            redo_stack: self.history().redo_stack().to_vec(),
            surfaces: self.surfaces().iter().map(SurfaceRecord::from).collect(),
        }
    }
}
