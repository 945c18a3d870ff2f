use crate::store::lesson::Lesson;

const DETAIL_SEGMENT: &str = "lesson";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Route {
    #[default]
    List,
    Detail(String),
}

impl Route {
    /// `/lesson/<id>` (optionally `#`-prefixed) is a detail route, anything
    /// else is the list.
    pub fn from_path(path: &str) -> Self {
        let path = path.trim().trim_start_matches('#');
        let mut segments = path.split('/').filter(|s| !s.is_empty());

        match (segments.next(), segments.next(), segments.next()) {
            (Some(DETAIL_SEGMENT), Some(id), None) => Route::Detail(id.to_string()),
            _ => Route::List,
        }
    }

    pub fn to_path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Detail(id) => format!("/{DETAIL_SEGMENT}/{id}"),
        }
    }
}

/// A route resolved against the current collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page<'a> {
    List(&'a [Lesson]),
    Detail(&'a Lesson),
    NotFound(String),
}

impl<'a> Page<'a> {
    pub fn resolve(route: &Route, all: &'a [Lesson], visible: &'a [Lesson]) -> Self {
        match route {
            Route::List => Page::List(visible),
            Route::Detail(id) => all
                .iter()
                .find(|l| &l.id == id)
                .map_or_else(|| Page::NotFound(id.clone()), Page::Detail),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::lesson::{Level, Script};

    #[test]
    fn parses_detail_paths() {
        assert_eq!(
            Route::from_path("/lesson/numbers-1-10"),
            Route::Detail("numbers-1-10".into())
        );
        assert_eq!(Route::from_path("#/lesson/abc"), Route::Detail("abc".into()));
        assert_eq!(Route::from_path("lesson/abc/"), Route::Detail("abc".into()));
    }

    #[test]
    fn everything_else_is_the_list() {
        for path in ["", "/", "#", "/lesson", "/lesson/", "/lessons/a", "/lesson/a/b"] {
            assert_eq!(Route::from_path(path), Route::List, "path: {path:?}");
        }
    }

    #[test]
    fn paths_round_trip() {
        let route = Route::Detail("greetings-basic".into());
        assert_eq!(Route::from_path(&route.to_path()), route);
        assert_eq!(Route::from_path(&Route::List.to_path()), Route::List);
    }

    #[test]
    fn missing_lesson_resolves_to_not_found() {
        let all = vec![Lesson::new("a", "A", Script::Latin, Level::Advanced)];
        let page = Page::resolve(&Route::Detail("b".into()), &all, &all);
        assert_eq!(page, Page::NotFound("b".into()));

        let page = Page::resolve(&Route::Detail("a".into()), &all, &[]);
        assert_eq!(page, Page::Detail(&all[0]));
    }
}
