// src/services/catalog_views.rs
//
// Read-only shaping of a catalog snapshot for the pages
//
// Pure functions: no I/O, no store access. Callers pass the snapshot they got
// from ContentStore.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use std::sync::Arc;

use crate::domain::content::{Content, ContentType};
use crate::domain::DomainError;

const ROW_LENGTH: usize = 5;
const SUGGESTION_COUNT: usize = 10;

pub const TRENDING_TITLE: &str = "Trending Now";
pub const NEW_RELEASES_TITLE: &str = "New Releases";
pub const MOVIES_TITLE: &str = "Movies";
pub const SHOWS_TITLE: &str = "TV Shows";
pub const MY_LIST_TITLE: &str = "My List";

// ============================================================================
// BROWSE
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrowseCategory {
    /// Genre rows plus movies and shows
    #[default]
    All,
    Movies,
    Series,
    MyList,
}

impl BrowseCategory {
    /// Category from an optional query parameter; unknown values browse everything
    pub fn from_param(param: Option<&str>) -> Self {
        param
            .and_then(|p| p.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for BrowseCategory {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(BrowseCategory::All),
            "movies" => Ok(BrowseCategory::Movies),
            "series" => Ok(BrowseCategory::Series),
            "mylist" => Ok(BrowseCategory::MyList),
            other => Err(DomainError::InvariantViolation(format!(
                "Unknown browse category: {}",
                other
            ))),
        }
    }
}

/// One titled row of the browse page
#[derive(Debug, Clone, PartialEq)]
pub struct BrowseSection {
    pub title: String,
    pub contents: Vec<Arc<Content>>,
}

/// Rows of the browse page, in display order.
///
/// A later row with an already used title replaces the earlier one in place.
pub fn browse_sections(contents: &[Arc<Content>], category: BrowseCategory) -> Vec<BrowseSection> {
    let mut sections = Vec::new();
    if contents.is_empty() {
        return sections;
    }

    let trending: Vec<Arc<Content>> = contents.iter().take(ROW_LENGTH).cloned().collect();
    let movies = of_kind(contents, ContentType::Movie);
    let shows = of_kind(contents, ContentType::Series);

    put_section(&mut sections, TRENDING_TITLE, trending.clone());
    put_section(&mut sections, NEW_RELEASES_TITLE, new_releases(contents));

    match category {
        BrowseCategory::Movies => put_section(&mut sections, MOVIES_TITLE, movies),
        BrowseCategory::Series => put_section(&mut sections, SHOWS_TITLE, shows),
        // Saved lists are not stored yet; trending stands in
        BrowseCategory::MyList => put_section(&mut sections, MY_LIST_TITLE, trending),
        BrowseCategory::All => {
            for genre in distinct_genres(contents) {
                let rows = by_genre(contents, &genre);
                if !rows.is_empty() {
                    put_section(&mut sections, &genre, rows);
                }
            }
            put_section(&mut sections, MOVIES_TITLE, movies);
            put_section(&mut sections, SHOWS_TITLE, shows);
        }
    }

    sections
}

fn put_section(sections: &mut Vec<BrowseSection>, title: &str, contents: Vec<Arc<Content>>) {
    match sections.iter_mut().find(|s| s.title == title) {
        Some(existing) => existing.contents = contents,
        None => sections.push(BrowseSection {
            title: title.to_string(),
            contents,
        }),
    }
}

/// Highest release year first; ties keep snapshot order
fn new_releases(contents: &[Arc<Content>]) -> Vec<Arc<Content>> {
    let mut sorted = contents.to_vec();
    sorted.sort_by(|a, b| b.release_year.cmp(&a.release_year));
    sorted.truncate(ROW_LENGTH);
    sorted
}

fn of_kind(contents: &[Arc<Content>], kind: ContentType) -> Vec<Arc<Content>> {
    contents.iter().filter(|c| c.kind == kind).cloned().collect()
}

fn by_genre(contents: &[Arc<Content>], genre: &str) -> Vec<Arc<Content>> {
    contents.iter().filter(|c| c.has_genre(genre)).cloned().collect()
}

/// Genre names in order of first appearance
pub fn distinct_genres(contents: &[Arc<Content>]) -> Vec<String> {
    let mut seen = HashSet::new();
    contents
        .iter()
        .flat_map(|c| c.genre.iter())
        .filter(|g| seen.insert(*g))
        .cloned()
        .collect()
}

// ============================================================================
// SEARCH
// ============================================================================

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchFilter {
    #[default]
    All,
    Movies,
    Series,
}

impl FromStr for SearchFilter {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(SearchFilter::All),
            "movies" => Ok(SearchFilter::Movies),
            "series" => Ok(SearchFilter::Series),
            other => Err(DomainError::InvariantViolation(format!(
                "Unknown search filter: {}",
                other
            ))),
        }
    }
}

impl SearchFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchFilter::All => "all",
            SearchFilter::Movies => "movies",
            SearchFilter::Series => "series",
        }
    }

    pub fn matches(&self, content: &Content) -> bool {
        match self {
            SearchFilter::All => true,
            SearchFilter::Movies => content.kind == ContentType::Movie,
            SearchFilter::Series => content.kind == ContentType::Series,
        }
    }
}

pub fn filter_search_results(results: Vec<Content>, filter: SearchFilter) -> Vec<Content> {
    results.into_iter().filter(|c| filter.matches(c)).collect()
}

/// Shown instead of results while the query is empty
pub fn search_suggestions(contents: &[Arc<Content>]) -> Vec<Arc<Content>> {
    contents.iter().take(SUGGESTION_COUNT).cloned().collect()
}

// ============================================================================
// TITLE DETAIL
// ============================================================================

/// Entries sharing the first genre of `content`, without `content` itself
pub fn more_like_this(contents: &[Arc<Content>], content: &Content) -> Vec<Arc<Content>> {
    match content.genre.first() {
        Some(genre) => contents
            .iter()
            .filter(|c| c.id != content.id && c.has_genre(genre))
            .cloned()
            .collect(),
        None => Vec::new(),
    }
}

// ============================================================================
// ADMIN TABLE
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ContentPage {
    pub items: Vec<Arc<Content>>,
    /// 1-based, clamped to the available pages
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

/// Case-insensitive substring match on title, any genre, or type
pub fn filter_admin_contents(contents: &[Arc<Content>], query: &str) -> Vec<Arc<Content>> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return contents.to_vec();
    }

    contents
        .iter()
        .filter(|c| {
            c.title.to_lowercase().contains(&needle)
                || c.genre.iter().any(|g| g.to_lowercase().contains(&needle))
                || c.kind.to_string().contains(&needle)
        })
        .cloned()
        .collect()
}

pub fn paginate(items: Vec<Arc<Content>>, page: usize, per_page: usize) -> ContentPage {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));

    let items = items
        .into_iter()
        .skip((page - 1) * per_page)
        .take(per_page)
        .collect();

    ContentPage {
        items,
        page,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{movie, series};

    fn shared(contents: Vec<Content>) -> Vec<Arc<Content>> {
        contents.into_iter().map(Arc::new).collect()
    }

    fn titles(contents: &[Arc<Content>]) -> Vec<&str> {
        contents.iter().map(|c| c.title.as_str()).collect()
    }

    fn section_titles(sections: &[BrowseSection]) -> Vec<&str> {
        sections.iter().map(|s| s.title.as_str()).collect()
    }

    #[test]
    fn test_empty_snapshot_has_no_sections() {
        assert!(browse_sections(&[], BrowseCategory::All).is_empty());
    }

    #[test]
    fn test_default_browse_rows() {
        let contents = shared(vec![
            movie("a", &["Drama", "Crime"], 3),
            series("b", &["Comedy"], 2, 1, 1),
            movie("c", &["drama"], 1),
        ]);

        let sections = browse_sections(&contents, BrowseCategory::All);

        assert_eq!(
            section_titles(&sections),
            vec!["Trending Now", "New Releases", "Drama", "Crime", "Comedy", "drama", "Movies", "TV Shows"]
        );
        assert_eq!(titles(&sections[2].contents), vec!["a", "c"]);
        assert_eq!(titles(&sections[6].contents), vec!["a", "c"]);
        assert_eq!(titles(&sections[7].contents), vec!["b"]);
    }

    #[test]
    fn test_category_rows() {
        let contents = shared(vec![movie("a", &["Drama"], 2), series("b", &["Drama"], 1, 0, 0)]);

        let movies = browse_sections(&contents, BrowseCategory::Movies);
        assert_eq!(section_titles(&movies), vec!["Trending Now", "New Releases", "Movies"]);

        let shows = browse_sections(&contents, BrowseCategory::Series);
        assert_eq!(titles(&shows[2].contents), vec!["b"]);

        let my_list = browse_sections(&contents, BrowseCategory::MyList);
        assert_eq!(my_list[2].title, "My List");
        assert_eq!(my_list[2].contents, my_list[0].contents);
    }

    #[test]
    fn test_same_title_replaces_in_place() {
        let contents = shared(vec![movie("a", &["Movies"], 1), series("b", &["Crime"], 2, 0, 0)]);

        let sections = browse_sections(&contents, BrowseCategory::All);

        assert_eq!(
            section_titles(&sections),
            vec!["Trending Now", "New Releases", "Movies", "Crime", "TV Shows"]
        );
    }

    #[test]
    fn test_trending_and_new_releases_hold_five() {
        let mut all = Vec::new();
        for day in 0..7 {
            all.push(movie(&format!("m{}", day), &[], day));
        }
        let contents = shared(all);

        let sections = browse_sections(&contents, BrowseCategory::Movies);
        assert_eq!(titles(&sections[0].contents), vec!["m0", "m1", "m2", "m3", "m4"]);
        assert_eq!(titles(&sections[1].contents), vec!["m6", "m5", "m4", "m3", "m2"]);
        assert_eq!(sections[2].contents.len(), 7);
    }

    #[test]
    fn test_category_param() {
        assert_eq!(BrowseCategory::from_param(None), BrowseCategory::All);
        assert_eq!(BrowseCategory::from_param(Some("series")), BrowseCategory::Series);
        assert_eq!(BrowseCategory::from_param(Some("MyList")), BrowseCategory::MyList);
        assert_eq!(BrowseCategory::from_param(Some("cartoons")), BrowseCategory::All);
    }

    #[test]
    fn test_search_filter() {
        let results = vec![movie("a", &[], 1), series("b", &[], 2, 0, 0)];

        let movies = filter_search_results(results.clone(), SearchFilter::Movies);
        assert_eq!(movies.len(), 1);
        assert_eq!(movies[0].title, "a");
        assert_eq!(filter_search_results(results, "all".parse().unwrap()).len(), 2);
        assert!("tv".parse::<SearchFilter>().is_err());
    }

    #[test]
    fn test_more_like_this_excludes_the_title() {
        let contents = shared(vec![
            movie("a", &["Drama", "Crime"], 1),
            movie("b", &["drama"], 2),
            movie("c", &["Crime"], 3),
        ]);

        let similar = more_like_this(&contents, &contents[0]);
        assert_eq!(titles(&similar), vec!["b"]);

        let untagged = movie("d", &[], 4);
        assert!(more_like_this(&contents, &untagged).is_empty());
    }

    #[test]
    fn test_admin_filter_matches_title_genre_and_type() {
        let contents = shared(vec![
            movie("The Crown Affair", &["Thriller"], 1),
            series("Night Shift", &["Comedy"], 2, 0, 0),
        ]);

        assert_eq!(titles(&filter_admin_contents(&contents, "CROWN")), vec!["The Crown Affair"]);
        assert_eq!(titles(&filter_admin_contents(&contents, "comed")), vec!["Night Shift"]);
        assert_eq!(titles(&filter_admin_contents(&contents, "series")), vec!["Night Shift"]);
        assert_eq!(filter_admin_contents(&contents, "  ").len(), 2);
    }

    #[test]
    fn test_pagination() {
        let contents = shared((0..23).map(|day| movie(&format!("m{}", day), &[], day)).collect());

        let first = paginate(contents.clone(), 1, 10);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total_items, 23);
        assert_eq!(first.items.len(), 10);

        let last = paginate(contents.clone(), 3, 10);
        assert_eq!(last.items.len(), 3);
        assert_eq!(last.items[0].title, "m20");

        let clamped = paginate(contents, 9, 10);
        assert_eq!(clamped.page, 3);

        let empty = paginate(Vec::new(), 2, 10);
        assert_eq!(empty.page, 1);
        assert_eq!(empty.total_pages, 0);
        assert!(empty.items.is_empty());
    }
}
