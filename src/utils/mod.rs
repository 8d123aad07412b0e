pub mod normalization;
pub mod pattern;
