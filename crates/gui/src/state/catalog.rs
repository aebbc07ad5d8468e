//! Built-in templates offered in the options panel

use shared::{Primitive, TemplateObject};

/// 10 cm cube, selected on startup
pub fn small_cube() -> TemplateObject {
    TemplateObject::new(
        "small_cube",
        "Cube",
        Primitive::Cube {
            width: 0.1,
            height: 0.1,
            depth: 0.1,
        },
    )
}

/// Every built-in template, in menu order
pub fn builtin_templates() -> Vec<TemplateObject> {
    vec![
        small_cube(),
        TemplateObject::new(
            "cylinder",
            "Cylinder",
            Primitive::Cylinder {
                radius: 0.04,
                height: 0.12,
            },
        ),
        TemplateObject::new("sphere", "Sphere", Primitive::Sphere { radius: 0.05 }),
        TemplateObject::new(
            "cone",
            "Cone",
            Primitive::Cone {
                radius: 0.05,
                height: 0.1,
            },
        ),
    ]
}

/// Look a template up by id
pub fn find(templates: &[TemplateObject], id: &str) -> Option<TemplateObject> {
    templates.iter().find(|t| t.id == id).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_ids_unique() {
        let templates = builtin_templates();
        let mut ids: Vec<&str> = templates.iter().map(|t| t.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), templates.len());
    }

    #[test]
    fn test_find() {
        let templates = builtin_templates();
        assert_eq!(find(&templates, "sphere").map(|t| t.height()), Some(0.1));
        assert!(find(&templates, "teapot").is_none());
    }
}
