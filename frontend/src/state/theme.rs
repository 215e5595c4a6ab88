use crate::utils::storage::{KeyValueStore, MemoryStore, THEME_KEY};
use leptos::*;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Stored preference, or `Light` when missing or unreadable.
    pub fn load(store: &dyn KeyValueStore) -> Self {
        match store.get(THEME_KEY) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_default(),
            Ok(None) => Theme::default(),
            Err(err) => {
                log::warn!("failed to read theme preference: {}", err);
                Theme::default()
            }
        }
    }
}

#[derive(Clone)]
pub struct ThemeState {
    pub theme: RwSignal<Theme>,
    store: Rc<dyn KeyValueStore>,
}

impl ThemeState {
    pub fn new(store: Rc<dyn KeyValueStore>) -> Self {
        let theme = create_rw_signal(Theme::load(store.as_ref()));
        Self { theme, store }
    }

    pub fn set_theme(&self, theme: Theme) {
        self.theme.set(theme);
        if let Err(err) = self.store.set(THEME_KEY, theme.as_str()) {
            log::warn!("failed to persist theme: {}", err);
        }
        apply_to_dom(theme);
    }

    pub fn toggle(&self) {
        self.set_theme(self.theme.get_untracked().toggled());
    }

    pub fn current(&self) -> ReadSignal<Theme> {
        self.theme.read_only()
    }
}

#[cfg(target_arch = "wasm32")]
fn apply_to_dom(theme: Theme) {
    let Some(html) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
    else {
        return;
    };
    let list = html.class_list();
    let _ = match theme {
        Theme::Dark => list.add_1("dark"),
        Theme::Light => list.remove_1("dark"),
    };
}

#[cfg(not(target_arch = "wasm32"))]
fn apply_to_dom(_theme: Theme) {}

pub fn use_theme() -> ThemeState {
    use_context::<ThemeState>().unwrap_or_else(|| ThemeState::new(Rc::new(MemoryStore::new())))
}

pub fn provide_theme(store: Rc<dyn KeyValueStore>) -> ThemeState {
    let state = ThemeState::new(store);
    provide_context(state.clone());
    apply_to_dom(state.theme.get_untracked());
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use leptos::create_runtime;

    fn with_runtime<T>(test: impl FnOnce() -> T) -> T {
        let runtime = create_runtime();
        let result = test();
        runtime.dispose();
        result
    }

    #[test]
    fn parse_accepts_only_known_modes() {
        assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
        assert_eq!(Theme::parse("light"), Some(Theme::Light));
        assert_eq!(Theme::parse("contrast"), None);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
    }

    #[test]
    fn load_falls_back_to_light_for_unknown_values() {
        let store = MemoryStore::with_entries([(THEME_KEY, "sepia")]);
        assert_eq!(Theme::load(&store), Theme::Light);
        let store = MemoryStore::with_entries([(THEME_KEY, "dark")]);
        assert_eq!(Theme::load(&store), Theme::Dark);
    }

    #[test]
    fn toggle_persists_every_change() {
        with_runtime(|| {
            let store = MemoryStore::new();
            let state = ThemeState::new(Rc::new(store.clone()));
            assert_eq!(state.current().get(), Theme::Light);

            state.toggle();
            assert_eq!(state.current().get(), Theme::Dark);
            assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("dark"));

            state.set_theme(Theme::Light);
            assert_eq!(store.get(THEME_KEY).unwrap().as_deref(), Some("light"));
        });
    }

    #[test]
    fn provide_theme_reads_stored_preference() {
        with_runtime(|| {
            let store = MemoryStore::with_entries([(THEME_KEY, "dark")]);
            provide_theme(Rc::new(store));
            assert_eq!(use_theme().current().get(), Theme::Dark);
        });
    }
}
