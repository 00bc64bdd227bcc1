//! Sidebar item ordering: section order, then position, then label.

use std::cmp::Ordering;

use crate::collation::compare_labels;
use crate::nav::NavItem;

/// Anything that can be placed in the sidebar order.
pub trait SidebarSortable {
    fn section_order(&self) -> Option<f64>;
    fn position(&self) -> Option<f64>;
    fn label(&self) -> &str;
}

impl SidebarSortable for NavItem {
    fn section_order(&self) -> Option<f64> {
        self.section_order
    }

    fn position(&self) -> Option<f64> {
        self.position
    }

    fn label(&self) -> &str {
        &self.label
    }
}

impl<T: SidebarSortable> SidebarSortable for &T {
    fn section_order(&self) -> Option<f64> {
        (**self).section_order()
    }

    fn position(&self) -> Option<f64> {
        (**self).position()
    }

    fn label(&self) -> &str {
        (**self).label()
    }
}

/// Missing and NaN values sort after every real number.
fn compare_optional(a: Option<f64>, b: Option<f64>) -> Ordering {
    let a = a.filter(|v| !v.is_nan());
    let b = b.filter(|v| !v.is_nan());
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Total order used everywhere items are listed.
pub fn compare_sidebar_items<T: SidebarSortable>(a: &T, b: &T) -> Ordering {
    compare_optional(a.section_order(), b.section_order())
        .then_with(|| compare_optional(a.position(), b.position()))
        .then_with(|| compare_labels(a.label(), b.label()))
}

/// Sorted copy of `items`. Stable, so equal items keep their input order.
pub fn sort_sidebar_items<T: SidebarSortable + Clone>(items: &[T]) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(compare_sidebar_items);
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(items: &[NavItem]) -> Vec<&str> {
        items.iter().map(|i| i.key.as_str()).collect()
    }

    #[test]
    fn test_section_order_dominates_position() {
        let items = vec![
            NavItem::new("late", "A").with_section_order(2.0).with_position(1.0),
            NavItem::new("early", "Z").with_section_order(1.0).with_position(9.0),
        ];
        assert_eq!(keys(&sort_sidebar_items(&items)), vec!["early", "late"]);
    }

    #[test]
    fn test_missing_values_sort_last() {
        let items = vec![
            NavItem::new("bare", "A"),
            NavItem::new("positioned", "B").with_position(5.0),
            NavItem::new("sectioned", "C").with_section_order(10.0),
        ];
        assert_eq!(keys(&sort_sidebar_items(&items)), vec!["sectioned", "positioned", "bare"]);
    }

    #[test]
    fn test_nan_treated_as_missing() {
        let items = vec![
            NavItem::new("nan", "A").with_position(f64::NAN),
            NavItem::new("one", "B").with_position(1.0),
        ];
        assert_eq!(keys(&sort_sidebar_items(&items)), vec!["one", "nan"]);
    }

    #[test]
    fn test_input_untouched() {
        let items = vec![NavItem::new("b", "Б"), NavItem::new("a", "А")];
        let sorted = sort_sidebar_items(&items);
        assert_eq!(keys(&items), vec!["b", "a"]);
        assert_eq!(keys(&sorted), vec!["a", "b"]);
    }

    #[test]
    fn test_sorts_references() {
        let items = vec![NavItem::new("b", "B").with_position(2.0), NavItem::new("a", "A").with_position(1.0)];
        let refs: Vec<&NavItem> = items.iter().collect();
        let sorted = sort_sidebar_items(&refs);
        assert_eq!(sorted[0].key, "a");
    }
}
