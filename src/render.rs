//! Accordion rendering of a bucket tree.
//!
//! Rendering happens in two steps so the open/closed and counting rules can be
//! tested without parsing HTML:
//!
//! 1. [`render_groups`] walks a [`BucketTree`] and produces [`Group`] records
//!    (level, label, recursive count, open flag, children or item fragments).
//! 2. [`accordion`] turns groups into nested `div.time-group` markup.
//!
//! ## Open/closed rule
//!
//! Unless `force_collapsed` is set, a group starts open when either
//!
//! - it lies on the newest-first spine: it is the first sibling and every
//!   ancestor was the first sibling too, or
//! - it is the only child of its parent.
//!
//! With `force_collapsed`, every group starts closed. The index pages use this
//! for their full listings.

use crate::bucket::{Bucket, BucketTree, Contents, Level};
use crate::label::{item_count_label, period_label};
use crate::locale::Locale;
use maud::{Markup, html};

/// One rendered accordion group.
#[derive(Debug)]
pub struct Group {
    pub level: Level,
    pub label: String,
    /// Items anywhere below this group.
    pub count: usize,
    pub open: bool,
    pub body: GroupBody,
}

#[derive(Debug)]
pub enum GroupBody {
    Groups(Vec<Group>),
    Items(Vec<Markup>),
}

impl Group {
    /// Child groups, empty at month level.
    pub fn children(&self) -> &[Group] {
        match &self.body {
            GroupBody::Groups(children) => children,
            GroupBody::Items(_) => &[],
        }
    }
}

/// Build group records for a whole tree.
///
/// `render_item` formats one leaf item; it is called once per placed item, in
/// tree order.
pub fn render_groups<T, F>(
    tree: &BucketTree<'_, T>,
    render_item: F,
    locale: &Locale,
    force_collapsed: bool,
) -> Vec<Group>
where
    F: Fn(&T, &Locale) -> Markup,
{
    render_level(tree.centuries(), &render_item, locale, force_collapsed, true)
}

fn render_level<T, F>(
    buckets: &[Bucket<'_, T>],
    render_item: &F,
    locale: &Locale,
    force_collapsed: bool,
    parent_on_spine: bool,
) -> Vec<Group>
where
    F: Fn(&T, &Locale) -> Markup,
{
    let single_child = buckets.len() == 1;
    buckets
        .iter()
        .enumerate()
        .map(|(idx, bucket)| {
            let on_spine = parent_on_spine && idx == 0;
            let body = match &bucket.contents {
                Contents::Periods(children) => GroupBody::Groups(render_level(
                    children,
                    render_item,
                    locale,
                    force_collapsed,
                    on_spine,
                )),
                Contents::Items(items) => GroupBody::Items(
                    items.iter().map(|&item| render_item(item, locale)).collect(),
                ),
            };
            Group {
                level: bucket.level(),
                label: period_label(&bucket.key, locale),
                count: bucket.len(),
                open: !force_collapsed && (on_spine || single_child),
                body,
            }
        })
        .collect()
}

/// Nested accordion markup. An empty slice renders nothing.
pub fn accordion(groups: &[Group], locale: &Locale) -> Markup {
    html! {
        @for group in groups {
            div.time-group.open[group.open] data-level=(group.level.name()) {
                button.time-heading type="button" {
                    (group.label) " "
                    span.time-count { (item_count_label(group.count, locale)) }
                }
                div.time-body {
                    @match &group.body {
                        GroupBody::Groups(children) => {
                            (accordion(children, locale))
                        }
                        GroupBody::Items(items) => {
                            @for item in items {
                                (item)
                            }
                        }
                    }
                }
            }
        }
    }
}
