// Blog feed module.

pub mod wordpress;

pub use wordpress::{
    Category, Post, PostCard, WordPressClient, excerpt, filter_by_category, unique_categories,
};
