//! Two-level page hierarchy
//!
//! Converts a flat, deduplicated URL list into top-level sections with their
//! sub-pages. The first path segment of a URL is its group key; paths deeper
//! than two levels collapse onto the second level. That trades hierarchical
//! fidelity for a predictable, small tree suitable for a selection UI.

use crate::scrape::ContentRecord;
use crate::url::{humanize_slug, path_segments, relative_path};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Slugs that mark a section as a blog
const BLOG_SLUGS: &[&str] = &["blog", "news", "articles", "posts", "stories"];

/// Slugs that mark a section as a contact page
const CONTACT_SLUGS: &[&str] = &["contact", "contact-us", "get-in-touch"];

/// The inferred kind of a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageType {
    Homepage,
    Content,
    Blog,
    Contact,
}

/// One node in the discovered page tree
///
/// Top-level nodes carry their sub-pages in `children`; the homepage node is
/// the root path `/` and never has children. `content` is filled in during
/// the scraping phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageNode {
    /// Unique within a discovery run; see [`build_hierarchy`] for assignment
    pub id: u64,
    /// Path relative to the base URL, `/` for the homepage
    pub url: String,
    pub title: String,
    #[serde(rename = "type")]
    pub page_type: PageType,
    pub is_parent: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<PageNode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<ContentRecord>,
}

impl PageNode {
    fn new(url: String, title: String, page_type: PageType, is_parent: bool) -> Self {
        Self {
            // Assigned in a final pass once the tree shape is fixed
            id: 0,
            url,
            title,
            page_type,
            is_parent,
            children: Vec::new(),
            content: None,
        }
    }
}

/// Counts all nodes in the tree, children included
pub fn count_pages(nodes: &[PageNode]) -> usize {
    nodes.iter().map(|n| 1 + n.children.len()).sum()
}

/// Builds the two-level page tree from a flat URL list
///
/// URLs are normalized to base-relative paths (trailing slash stripped, bare
/// root becomes `/`) and deduplicated, keeping first-seen order. The root
/// path becomes the homepage node; every other path is grouped by its first
/// segment, creating the group's top-level node lazily on first sight.
/// Paths with more than one segment become children of their group.
///
/// # Id assignment
///
/// Top-level nodes get small sequential ids in first-seen order; children
/// are then numbered continuing the same counter, walking parents in order.
/// Ids are unique across the whole tree with no arithmetic encoding, so a
/// parent can hold any number of children, and rebuilding the tree from its
/// own URLs reproduces the same ids.
pub fn build_hierarchy(urls: &[String], base_url: &str) -> Vec<PageNode> {
    let mut nodes: Vec<PageNode> = Vec::new();
    // Explicit insertion-ordered lookup: group key -> position in `nodes`
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut seen_paths: HashSet<String> = HashSet::new();

    for url in urls {
        let path = relative_path(base_url, url);
        if !seen_paths.insert(path.clone()) {
            continue;
        }

        let segments = path_segments(&path);

        if segments.is_empty() {
            // The homepage keys on the root path itself, which can never
            // collide with a group key (those are non-empty segments).
            if !group_index.contains_key("/") {
                group_index.insert("/".to_string(), nodes.len());
                nodes.push(PageNode::new(
                    "/".to_string(),
                    "Home".to_string(),
                    PageType::Homepage,
                    true,
                ));
            }
            continue;
        }

        let group_key = segments[0];
        let position = match group_index.get(group_key) {
            Some(&pos) => pos,
            None => {
                let pos = nodes.len();
                group_index.insert(group_key.to_string(), pos);
                nodes.push(PageNode::new(
                    format!("/{}", group_key),
                    humanize_slug(group_key),
                    detect_type(group_key),
                    true,
                ));
                pos
            }
        };

        if segments.len() > 1 {
            let parent = &mut nodes[position];
            // Skip if a child with the identical full path already exists
            if !parent.children.iter().any(|c| c.url == path) {
                let last_segment = segments[segments.len() - 1];
                parent.children.push(PageNode::new(
                    path.clone(),
                    humanize_slug(last_segment),
                    detect_type(group_key),
                    false,
                ));
            }
        }
    }

    assign_ids(&mut nodes);
    nodes
}

/// Assigns ids: parents first in order, then children in tree-walk order
fn assign_ids(nodes: &mut [PageNode]) {
    let mut next = 1u64;
    for node in nodes.iter_mut() {
        node.id = next;
        next += 1;
    }
    for node in nodes.iter_mut() {
        for child in &mut node.children {
            child.id = next;
            next += 1;
        }
    }
}

/// Infers a page type from a section slug
fn detect_type(slug: &str) -> PageType {
    let lower = slug.to_lowercase();
    if BLOG_SLUGS.contains(&lower.as_str()) {
        PageType::Blog
    } else if CONTACT_SLUGS.contains(&lower.as_str()) {
        PageType::Contact
    } else {
        PageType::Content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://example.com";

    fn urls(paths: &[&str]) -> Vec<String> {
        paths.iter().map(|p| format!("{}{}", BASE, p)).collect()
    }

    #[test]
    fn test_homepage_node_from_root_path() {
        let tree = build_hierarchy(&urls(&["/"]), BASE);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].url, "/");
        assert_eq!(tree[0].title, "Home");
        assert_eq!(tree[0].page_type, PageType::Homepage);
        assert!(tree[0].is_parent);
        assert!(tree[0].children.is_empty());
    }

    #[test]
    fn test_no_homepage_without_root_path() {
        let tree = build_hierarchy(&urls(&["/about"]), BASE);
        assert!(tree.iter().all(|n| n.page_type != PageType::Homepage));
    }

    #[test]
    fn test_exactly_one_homepage_for_duplicate_roots() {
        let input = vec![
            format!("{}/", BASE),
            BASE.to_string(),
            format!("{}//", BASE),
        ];
        let tree = build_hierarchy(&input, BASE);
        let homepages = tree
            .iter()
            .filter(|n| n.page_type == PageType::Homepage)
            .count();
        assert_eq!(homepages, 1);
    }

    #[test]
    fn test_groups_by_first_segment() {
        let tree = build_hierarchy(
            &urls(&["/blog/post-1", "/blog/post-2", "/about"]),
            BASE,
        );
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].url, "/blog");
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].url, "/blog/post-1");
        assert_eq!(tree[0].children[1].url, "/blog/post-2");
        assert_eq!(tree[1].url, "/about");
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn test_top_level_order_is_first_seen() {
        let tree = build_hierarchy(
            &urls(&["/services/web", "/about", "/services/seo", "/blog"]),
            BASE,
        );
        let order: Vec<&str> = tree.iter().map(|n| n.url.as_str()).collect();
        assert_eq!(order, vec!["/services", "/about", "/blog"]);
    }

    #[test]
    fn test_parent_ids_sequential_then_children() {
        let tree = build_hierarchy(
            &urls(&["/blog/post-1", "/about", "/blog/post-2"]),
            BASE,
        );
        assert_eq!(tree[0].id, 1); // /blog
        assert_eq!(tree[1].id, 2); // /about
        assert_eq!(tree[0].children[0].id, 3);
        assert_eq!(tree[0].children[1].id, 4);
    }

    #[test]
    fn test_ids_unique_across_many_children() {
        // The old parentId*100 encoding collided past 99 children; the
        // counter scheme must not.
        let paths: Vec<String> = (0..150)
            .map(|i| format!("{}/blog/post-{}", BASE, i))
            .collect();
        let tree = build_hierarchy(&paths, BASE);
        assert_eq!(tree[0].children.len(), 150);

        let mut ids: Vec<u64> = tree[0].children.iter().map(|c| c.id).collect();
        ids.push(tree[0].id);
        let unique: HashSet<u64> = ids.iter().copied().collect();
        assert_eq!(unique.len(), ids.len());
    }

    #[test]
    fn test_deep_paths_collapse_to_second_level() {
        let tree = build_hierarchy(&urls(&["/docs/guide/getting-started"]), BASE);
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].url, "/docs");
        assert_eq!(tree[0].children.len(), 1);
        assert_eq!(tree[0].children[0].url, "/docs/guide/getting-started");
        assert_eq!(tree[0].children[0].title, "Getting Started");
    }

    #[test]
    fn test_duplicate_urls_deduplicated() {
        let tree = build_hierarchy(
            &urls(&["/blog/post-1", "/blog/post-1/", "/blog/post-1"]),
            BASE,
        );
        assert_eq!(tree[0].children.len(), 1);
    }

    #[test]
    fn test_type_detection() {
        let tree = build_hierarchy(
            &urls(&["/blog", "/news", "/contact", "/get-in-touch", "/about"]),
            BASE,
        );
        let types: Vec<PageType> = tree.iter().map(|n| n.page_type).collect();
        assert_eq!(
            types,
            vec![
                PageType::Blog,
                PageType::Blog,
                PageType::Contact,
                PageType::Contact,
                PageType::Content
            ]
        );
    }

    #[test]
    fn test_children_inherit_group_type() {
        let tree = build_hierarchy(&urls(&["/blog/some-post"]), BASE);
        assert_eq!(tree[0].children[0].page_type, PageType::Blog);
    }

    #[test]
    fn test_title_humanization() {
        let tree = build_hierarchy(&urls(&["/our-services/web_design"]), BASE);
        assert_eq!(tree[0].title, "Our Services");
        assert_eq!(tree[0].children[0].title, "Web Design");
    }

    #[test]
    fn test_rebuild_from_own_urls_is_idempotent() {
        let tree = build_hierarchy(
            &urls(&["/blog/post-1", "/about", "/blog/post-2", "/", "/about/team"]),
            BASE,
        );

        // Collect the tree's own URLs: each parent followed by its children
        let mut round_trip = Vec::new();
        for node in &tree {
            round_trip.push(format!("{}{}", BASE, node.url));
            for child in &node.children {
                round_trip.push(format!("{}{}", BASE, child.url));
            }
        }

        let rebuilt = build_hierarchy(&round_trip, BASE);
        assert_eq!(tree, rebuilt);
    }

    #[test]
    fn test_count_pages() {
        let tree = build_hierarchy(
            &urls(&["/", "/blog/post-1", "/blog/post-2", "/about"]),
            BASE,
        );
        assert_eq!(count_pages(&tree), 5);
    }

    #[test]
    fn test_serialization_shape() {
        let tree = build_hierarchy(&urls(&["/blog/post-1"]), BASE);
        let json = serde_json::to_value(&tree).unwrap();
        assert_eq!(json[0]["type"], "blog");
        assert_eq!(json[0]["isParent"], true);
        assert_eq!(json[0]["children"][0]["url"], "/blog/post-1");
        // Unscraped nodes serialize without a content field
        assert!(json[0].get("content").is_none());
    }
}
