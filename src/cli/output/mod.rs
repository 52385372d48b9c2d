pub mod info;

use ansi_term::Style;

use crate::build::{format_path, BuildNode, RefView};

/// Renders a build as a tree. Every child line carries its dotted index
/// path, which is what the `--at` arguments address.
///
/// ```text
/// D: cutting week 1 -> 2017-06-05
/// ├── M: breakfast -> 08:00  [0]
/// │   └── I: Oats, rolled, dry  [0.0]
/// │       └── Q: 1.5 cup  [0.0.0]
/// └── M: dinner -> 19:30  [1]
/// ```
pub fn render_tree(root: &BuildNode, view: RefView<'_>) -> String {
    let mut out = String::new();
    out.push_str(&root.label(view));
    out.push('\n');
    let mut path = Vec::new();
    render_children(&mut out, root, view, "", &mut path);
    out
}

fn render_children(
    out: &mut String,
    node: &BuildNode,
    view: RefView<'_>,
    prefix: &str,
    path: &mut Vec<usize>,
) {
    let count = node.children.len();
    for (index, child) in node.children.iter().enumerate() {
        let is_last = index + 1 == count;
        path.push(index);
        let branch = if is_last { "└── " } else { "├── " };
        let location = Style::new()
            .dimmed()
            .paint(format!("[{}]", format_path(path)));
        out.push_str(prefix);
        out.push_str(branch);
        out.push_str(&child.label(view));
        out.push_str("  ");
        out.push_str(&location.to_string());
        out.push('\n');

        let continuation = if is_last { "    " } else { "│   " };
        let child_prefix = format!("{prefix}{continuation}");
        render_children(out, child, view, &child_prefix, path);
        path.pop();
    }
}

pub fn heading(text: &str) -> String {
    Style::new().bold().paint(text).to_string()
}

/// Sorts inventory rows `(item ID, description)` the way the user's
/// settings ask: by numeric item ID or by description, ascending or
/// descending.
pub fn sort_items(mut items: Vec<(String, String)>, by_id: bool, ascending: bool) -> Vec<(String, String)> {
    if by_id {
        items.sort_by_key(|(id, _)| (id.parse::<u64>().ok(), id.clone()));
    } else {
        items.sort_by_key(|(_, description)| description.to_lowercase());
    }
    if !ascending {
        items.reverse();
    }
    items
}

#[cfg(test)]
mod tests {
    use crate::build::BuildNode;
    use crate::reference::{ExerciseDetail, FoodDetail, NutrientContent};
    use std::collections::BTreeMap;

    use super::*;

    #[test]
    fn tree_lines_carry_paths() {
        let foods: BTreeMap<String, FoodDetail> = BTreeMap::new();
        let nutrients: BTreeMap<String, NutrientContent> = BTreeMap::new();
        let exercises: BTreeMap<String, ExerciseDetail> = BTreeMap::new();
        let view = RefView {
            foods: &foods,
            food_nutrients: &nutrients,
            exercises: &exercises,
        };

        let mut diet = BuildNode::diet();
        let mut meal = BuildNode::meal();
        let mut ingredient = BuildNode::ingredient("200001");
        ingredient
            .attach(BuildNode::quantity("200001", 1.0, "cup"))
            .unwrap();
        meal.attach(ingredient).unwrap();
        diet.attach(meal).unwrap();
        diet.attach(BuildNode::meal()).unwrap();

        let rendered = render_tree(&diet, view);
        assert!(rendered.starts_with("D: (unnamed) -> (undated)\n"));
        assert!(rendered.contains("├── M:"));
        assert!(rendered.contains("└── M:"));
        assert!(rendered.contains("Q: 1 cup"));
        assert!(rendered.contains("[0.0.0]"));
        assert_eq!(rendered.lines().count(), 5);
    }

    #[test]
    fn item_sorting_follows_settings() {
        let items = vec![
            ("10002".to_string(), "Bench".to_string()),
            ("10001".to_string(), "squat".to_string()),
            ("10010".to_string(), "Curl".to_string()),
        ];
        let by_id = sort_items(items.clone(), true, true);
        assert_eq!(by_id[0].0, "10001");
        assert_eq!(by_id[2].0, "10010");

        let by_description = sort_items(items.clone(), false, true);
        assert_eq!(by_description[0].1, "Bench");
        assert_eq!(by_description[2].1, "squat");

        let descending = sort_items(items, true, false);
        assert_eq!(descending[0].0, "10010");
    }
}
