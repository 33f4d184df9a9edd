//! Sort-and-render routines, one per entity kind.
//!
//! Each routine is a pure function from an unordered slice to an ordered row
//! sequence: the input is never reordered (sorting happens on a vector of
//! references), ordering is ascending byte-wise lexicographic on the entity's
//! display key, and `slice::sort_by` is stable so equal keys keep their input
//! order. An empty slice yields an empty row list.

use sitescope_model::{ContentTypeInfo, FieldInfo, ListInfo, SubWeb};

/// One display row: up to four named text fields. Absent source members are
/// carried as empty strings, never as an error.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListRow {
    pub primary: String,
    pub secondary: String,
    pub tertiary: String,
    pub meta: String,
}

fn sorted_refs<'a, T>(items: &'a [T], key: fn(&T) -> &str) -> Vec<&'a T> {
    let mut refs: Vec<&T> = items.iter().collect();
    refs.sort_by(|a, b| key(a).cmp(key(b)));
    refs
}

/// Rows for the Sub Webs tab: title, description, server-relative URL.
pub fn sub_web_rows(webs: &[SubWeb]) -> Vec<ListRow> {
    sorted_refs(webs, SubWeb::sort_key)
        .into_iter()
        .map(|web| ListRow {
            primary: web.title.clone(),
            secondary: web.description.clone(),
            meta: web.server_relative_url.clone(),
            ..ListRow::default()
        })
        .collect()
}

/// Rows for the Content Types tab: name, description.
pub fn content_type_rows(content_types: &[ContentTypeInfo]) -> Vec<ListRow> {
    sorted_refs(content_types, ContentTypeInfo::sort_key)
        .into_iter()
        .map(|ct| ListRow {
            primary: ct.name.clone(),
            secondary: ct.description.clone(),
            ..ListRow::default()
        })
        .collect()
}

/// Rows for the Fields tab: title, description, type, internal name.
pub fn field_rows(fields: &[FieldInfo]) -> Vec<ListRow> {
    sorted_refs(fields, FieldInfo::sort_key)
        .into_iter()
        .map(|field| ListRow {
            primary: field.title.clone(),
            secondary: field.description.clone(),
            tertiary: field.type_as_string.clone(),
            meta: field.internal_name.clone(),
        })
        .collect()
}

/// Rows for the Lists tab: title, description, base template as text.
pub fn list_rows(lists: &[ListInfo]) -> Vec<ListRow> {
    sorted_refs(lists, ListInfo::sort_key)
        .into_iter()
        .map(|list| ListRow {
            primary: list.title.clone(),
            secondary: list.description.clone(),
            meta: list.base_template.to_string(),
            ..ListRow::default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn web(title: &str) -> SubWeb {
        SubWeb {
            title: title.to_string(),
            ..SubWeb::default()
        }
    }

    #[test]
    fn sub_webs_sort_ascending_by_title() {
        let webs = [web("Zeta"), web("Alpha"), web("Mike")];
        let rows = sub_web_rows(&webs);
        let titles: Vec<&str> =
            rows.iter().map(|r| r.primary.as_str()).collect();
        assert_eq!(titles, ["Alpha", "Mike", "Zeta"]);
    }

    #[test]
    fn input_order_is_preserved() {
        let webs = [web("Zeta"), web("Alpha")];
        let _ = sub_web_rows(&webs);
        assert_eq!(webs[0].title, "Zeta");
        assert_eq!(webs[1].title, "Alpha");
    }

    #[test]
    fn output_length_equals_input_length() {
        let fields: Vec<FieldInfo> = ["b", "a", "c", "a"]
            .iter()
            .map(|t| FieldInfo {
                title: t.to_string(),
                ..FieldInfo::default()
            })
            .collect();
        assert_eq!(field_rows(&fields).len(), fields.len());
    }

    #[test]
    fn sorting_is_idempotent() {
        let webs = [web("Alpha"), web("Mike"), web("Zeta")];
        let once = sub_web_rows(&webs);
        let resorted: Vec<SubWeb> = once
            .iter()
            .map(|r| web(r.primary.as_str()))
            .collect();
        let twice = sub_web_rows(&resorted);
        assert_eq!(once, twice);
    }

    #[test]
    fn comparison_is_case_sensitive_byte_wise() {
        // Uppercase sorts before lowercase under byte-wise comparison.
        let webs = [web("alpha"), web("Zeta")];
        let rows = sub_web_rows(&webs);
        assert_eq!(rows[0].primary, "Zeta");
        assert_eq!(rows[1].primary, "alpha");
    }

    #[test]
    fn equal_keys_keep_relative_order() {
        let lists = [
            ListInfo {
                title: "Shared".into(),
                description: "first".into(),
                base_template: 100,
            },
            ListInfo {
                title: "Shared".into(),
                description: "second".into(),
                base_template: 101,
            },
        ];
        let rows = list_rows(&lists);
        assert_eq!(rows[0].secondary, "first");
        assert_eq!(rows[1].secondary, "second");
    }

    #[test]
    fn empty_input_renders_empty_list() {
        assert!(sub_web_rows(&[]).is_empty());
        assert!(content_type_rows(&[]).is_empty());
        assert!(field_rows(&[]).is_empty());
        assert!(list_rows(&[]).is_empty());
    }

    #[test]
    fn missing_description_renders_as_empty_secondary() {
        let fields = [FieldInfo {
            title: "Created".into(),
            type_as_string: "DateTime".into(),
            internal_name: "Created".into(),
            ..FieldInfo::default()
        }];
        let rows = field_rows(&fields);
        assert_eq!(rows[0].secondary, "");
        assert_eq!(rows[0].tertiary, "DateTime");
        assert_eq!(rows[0].meta, "Created");
    }

    #[test]
    fn list_base_template_renders_as_text() {
        let lists = [ListInfo {
            title: "Documents".into(),
            description: String::new(),
            base_template: 101,
        }];
        assert_eq!(list_rows(&lists)[0].meta, "101");
    }
}
