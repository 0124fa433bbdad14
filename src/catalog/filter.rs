//! View eligibility and list filtering over catalog items.

use std::collections::HashSet;

use fuzzy_matcher::skim::SkimMatcherV2;

use crate::catalog::Catalog;
use crate::state::{AppItem, View};

/// What: Decide whether an item is eligible for a view.
///
/// Inputs:
/// - `item`: Catalog record
/// - `view`: Filter tab
///
/// Output:
/// - `true` when the item belongs on that tab.
///
/// Details:
/// - `All` admits everything; `Updates` requires `can_update`, which only
///   installed items carry.
#[must_use]
pub fn eligible_for(item: &AppItem, view: View) -> bool {
    match view {
        View::All => true,
        View::Installed => item.installed,
        View::NotInstalled => !item.installed,
        View::Updates => item.can_update,
    }
}

/// What: Apply view, category and search filters to an item list.
///
/// Inputs:
/// - `items`: Records in display order
/// - `view`: Filter tab
/// - `category`: Category label, `None` (or `Some("all")`) for no filter
/// - `search`: Query text; empty means no search filter
///
/// Output:
/// - References to matching items, display order preserved.
///
/// Details:
/// - Search fuzzy-matches the item name, then the description, reusing one
///   matcher instance across the list.
#[must_use]
pub fn visible_items<'a>(
    items: &'a [AppItem],
    view: View,
    category: Option<&str>,
    search: &str,
) -> Vec<&'a AppItem> {
    let matcher = SkimMatcherV2::default();
    let query = search.trim();
    items
        .iter()
        .filter(|it| eligible_for(it, view))
        .filter(|it| match category {
            None => true,
            Some(c) => c.eq_ignore_ascii_case("all") || it.category.eq_ignore_ascii_case(c),
        })
        .filter(|it| query.is_empty() || matches_query(it, query, &matcher))
        .collect()
}

/// Whether the query fuzzy-matches the item's name or description.
fn matches_query(item: &AppItem, query: &str, matcher: &SkimMatcherV2) -> bool {
    use fuzzy_matcher::FuzzyMatcher;

    matcher.fuzzy_match(&item.name, query).is_some()
        || matcher.fuzzy_match(&item.description, query).is_some()
}

/// What: Derive the ordered target list for a batch from the current
/// selection.
///
/// Inputs:
/// - `catalog`: Item directory (provides ordering and eligibility data)
/// - `selected`: The selection snapshot for the view launching the batch
/// - `view`: The view the batch was launched from
///
/// Output:
/// - Identifiers in catalog display order, restricted to selected ids that
///   are still eligible for the view.
///
/// Details:
/// - Selection sets may hold stale or unknown identifiers; filtering through
///   the directory here is what reconciles them before a batch starts.
#[must_use]
pub fn batch_targets(catalog: &Catalog, selected: &HashSet<String>, view: View) -> Vec<String> {
    catalog
        .items()
        .iter()
        .filter(|it| selected.contains(&it.id) && eligible_for(it, view))
        .map(|it| it.id.clone())
        .collect()
}
