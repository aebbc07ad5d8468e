use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Lang {
    Ru,
    En,
}

static CURRENT_LANG: AtomicU8 = AtomicU8::new(0); // 0=Ru (default)

pub fn lang() -> Lang {
    match CURRENT_LANG.load(Ordering::Relaxed) {
        1 => Lang::En,
        _ => Lang::Ru,
    }
}

pub fn set_lang(l: Lang) {
    CURRENT_LANG.store(
        match l {
            Lang::Ru => 0,
            Lang::En => 1,
        },
        Ordering::Relaxed,
    );
}

/// Translate a key to the current language.
pub fn t(key: &str) -> &'static str {
    let ru = lang() == Lang::Ru;
    match key {
        // ── Main menus ──────────────────────────────────────
        "menu.scene" => if ru { "Сцена" } else { "Scene" },
        "menu.reset_scene" => if ru { "Сбросить сцену" } else { "Reset scene" },
        "menu.quit" => if ru { "Выход" } else { "Quit" },

        "menu.edit" => if ru { "Правка" } else { "Edit" },
        "menu.undo" => if ru { "Отменить  Ctrl+Z" } else { "Undo  Ctrl+Z" },
        "menu.redo" => if ru { "Повторить  Ctrl+Shift+Z" } else { "Redo  Ctrl+Shift+Z" },

        "menu.view" => if ru { "Вид" } else { "View" },
        "menu.overlay" => if ru { "Показывать поверхности" } else { "Show surfaces" },
        "menu.history" => if ru { "История размещений" } else { "Placement history" },
        "menu.status_bar" => if ru { "Строка состояния" } else { "Status bar" },
        "menu.reset_camera" => if ru { "Сбросить камеру" } else { "Reset camera" },
        "menu.language" => if ru { "Язык" } else { "Language" },

        "menu.settings" => if ru { "Настройки" } else { "Settings" },
        "menu.preferences" => if ru { "Параметры..." } else { "Preferences..." },

        // ── Modes ───────────────────────────────────────────
        "mode.freeform" => if ru { "Свободно" } else { "Freeform" },
        "mode.surface" => if ru { "Поверхность" } else { "Surface" },
        "mode.image" => if ru { "Изображение" } else { "Image" },

        // ── Toolbar ─────────────────────────────────────────
        "tb.undo" => if ru { "↶ Отменить" } else { "↶ Undo" },
        "tb.redo" => if ru { "↷ Повторить" } else { "↷ Redo" },
        "tb.options" => if ru { "⚙ Опции" } else { "⚙ Options" },
        "tip.undo" => if ru { "Скрыть последний объект (Ctrl+Z)" } else { "Hide the last object (Ctrl+Z)" },
        "tip.redo" => if ru { "Вернуть скрытый объект (Ctrl+Shift+Z)" } else { "Bring back a hidden object (Ctrl+Shift+Z)" },
        "tip.freeform" => if ru { "Касание ставит объект перед камерой" } else { "Tap places an object in front of the camera" },
        "tip.surface" => if ru { "Касание и перетаскивание ставят объекты на поверхности" } else { "Tap and drag place objects on surfaces" },
        "tip.image" => if ru { "Объект появляется на распознанном изображении" } else { "An object appears on each recognized image" },

        // ── Options panel ───────────────────────────────────
        "opt.title" => if ru { "Опции" } else { "Options" },
        "opt.template" => if ru { "Объект" } else { "Object" },
        "opt.none" => if ru { "Не выбран" } else { "None" },
        "opt.overlay" => if ru { "Показывать поверхности" } else { "Show surfaces" },
        "opt.reset" => if ru { "Сбросить сцену" } else { "Reset scene" },

        // ── Templates ───────────────────────────────────────
        "tpl.small_cube" => if ru { "Куб" } else { "Cube" },
        "tpl.cylinder" => if ru { "Цилиндр" } else { "Cylinder" },
        "tpl.sphere" => if ru { "Сфера" } else { "Sphere" },
        "tpl.cone" => if ru { "Конус" } else { "Cone" },

        // ── History panel ───────────────────────────────────
        "hist.title" => if ru { "История" } else { "History" },
        "hist.empty" => if ru { "Объекты ещё не размещены" } else { "Nothing placed yet" },
        "hist.hidden" => if ru { "скрыт" } else { "hidden" },
        "hist.on_anchor" => if ru { "на изображении" } else { "on image" },
        "hist.redo_depth" => if ru { "Можно вернуть" } else { "Redoable" },

        // ── Status bar ──────────────────────────────────────
        "status.mode" => if ru { "Режим" } else { "Mode" },
        "status.objects" => if ru { "Объектов" } else { "Objects" },
        "status.surfaces" => if ru { "Поверхностей" } else { "Surfaces" },
        "status.no_template" => if ru { "Выберите объект в опциях" } else { "Pick an object in Options" },
        "status.paused" => if ru { "Трекинг остановлен" } else { "Tracking paused" },
        "hint.freeform" => if ru { "ЛКМ: поставить объект" } else { "LMB: place object" },
        "hint.surface" => if ru { "ЛКМ/перетаскивание: ставить на поверхность" } else { "LMB/drag: place on surface" },
        "hint.image" => if ru { "Наведите камеру на изображение" } else { "Point the camera at an image" },
        "hint.camera" => if ru { "ПКМ: поворот, WASD/QE: ходьба" } else { "RMB: look, WASD/QE: walk" },

        // ── Settings window ─────────────────────────────────
        "settings.title" => if ru { "Настройки" } else { "Settings" },
        "settings.placement" => if ru { "Размещение" } else { "Placement" },
        "settings.forward_offset" => if ru { "Расстояние перед камерой" } else { "Distance in front of camera" },
        "settings.distance_threshold" => if ru { "Мин. шаг при перетаскивании" } else { "Min. drag spacing" },
        "settings.surface_epsilon" => if ru { "Зазор над поверхностью" } else { "Gap above surface" },
        "settings.unit_scale" => if ru { "Масштаб объектов" } else { "Object scale" },

        "settings.overlay" => if ru { "Поверхности" } else { "Surfaces" },
        "settings.overlay_color" => if ru { "Цвет" } else { "Color" },
        "settings.overlay_opacity" => if ru { "Прозрачность" } else { "Opacity" },

        "settings.camera" => if ru { "Камера" } else { "Camera" },
        "settings.fov" => if ru { "Угол обзора" } else { "Field of view" },
        "settings.walk_speed" => if ru { "Скорость ходьбы" } else { "Walk speed" },
        "settings.rotate_sensitivity" => if ru { "Чувствительность поворота" } else { "Look sensitivity" },

        "settings.viewport" => if ru { "Вьюпорт" } else { "Viewport" },
        "settings.bg_color" => if ru { "Цвет фона" } else { "Background color" },
        "settings.grid_visible" => if ru { "Показывать сетку" } else { "Show grid" },
        "settings.grid_size" => if ru { "Размер ячейки" } else { "Cell size" },
        "settings.grid_range" => if ru { "Количество линий" } else { "Grid lines" },

        "settings.ui" => if ru { "Интерфейс" } else { "Interface" },
        "settings.font_size" => if ru { "Размер шрифта" } else { "Font size" },

        "settings.apply" => if ru { "Применить" } else { "Apply" },
        "settings.reset" => if ru { "Сбросить" } else { "Reset" },
        "settings.close" => if ru { "Закрыть" } else { "Close" },

        // ── Fallback ────────────────────────────────────────
        _ => "???",
    }
}

/// Localized name of a catalog template, falling back to its own name
pub fn template_name(template: &shared::TemplateObject) -> String {
    match t(&format!("tpl.{}", template.id)) {
        "???" => template.name.clone(),
        name => name.to_string(),
    }
}
