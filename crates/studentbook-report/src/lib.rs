//! studentbook-report: HTML rendering of class reports.

pub mod html;

pub use html::{generate_html, write_html_report};
