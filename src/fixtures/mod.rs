//! Schema snapshot fixtures for tests.
//!
//! Fixtures are loaded at compile time using `include_str!`.
//!
//! ## Available Fixtures
//!
//! - [`BLOG`] - articles, comments, users, categories plus an excluded and a broken relation
//! - [`PAGES`] - page builder with two levels of many-to-any blocks
//! - [`TAGGED_PAGES`] - the page builder with a third many-to-any level under images

use crate::schema::SchemaSnapshot;

/// Blog schema.
///
/// Contains:
/// - `articles` with o2m `comments` (sorted by `sort`), m2o `category`,
///   m2o `created_by` to the excluded `directus_users`, and m2o `legacy`
///   whose relation has no join schema
/// - `comments` with m2o `article_id` and m2o `author` to `users`
/// - `users` with o2m `comments` back through `comments.author`
/// - `categories` with o2m `articles`
pub const BLOG: &str = include_str!("blog.json");

/// Page builder schema.
///
/// Contains:
/// - `pages.blocks`: m2a through `pages_blocks` over `block_text`, `block_hero`,
///   `directus_files` (excluded) and `pages` (the root)
/// - `block_hero.gallery` m2o to `galleries`
/// - `galleries.items`: m2a through `galleries_items` over `images` and `videos`
/// - `images.credit` m2o to `photographers`
pub const PAGES: &str = include_str!("pages.json");

/// Page builder schema with tagged images.
///
/// Same as [`PAGES`] plus `images.tags`: m2a through `images_tags` over
/// `labels`, whose m2o `owner` points at `photographers`.
pub const TAGGED_PAGES: &str = include_str!("tagged_pages.json");

pub fn blog() -> SchemaSnapshot {
    SchemaSnapshot::from_json(BLOG).expect("blog fixture should parse")
}

pub fn pages() -> SchemaSnapshot {
    SchemaSnapshot::from_json(PAGES).expect("pages fixture should parse")
}

pub fn tagged_pages() -> SchemaSnapshot {
    SchemaSnapshot::from_json(TAGGED_PAGES).expect("tagged pages fixture should parse")
}
