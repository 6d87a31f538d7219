//! Lazy column expressions.
//!
//! Expressions are built with [`expr::col`] and [`expr::lit`] and the
//! namespaces on [`expr::Expr`], then evaluated by an [`engine::Engine`].
pub mod arrays;
pub mod config;
pub mod engine;
pub mod expr;
pub mod functions;
pub mod infer;
