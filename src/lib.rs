//! # yamlens
//!
//! A tool for inspecting how YAML is represented internally and externally.
//!
//! The library walks a generic document tree (produced by an external
//! decoder) and projects it four ways: a structural event stream, a
//! finer-grained token stream, a re-serialized document (normalized or
//! style/comment-preserving), and a generic JSON encoding. See the
//! [stream](yamlens::stream) module for the per-mode entry points.

pub mod yamlens;
