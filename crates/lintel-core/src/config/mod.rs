//! Configuration types for lintel
//!
//! A lint pass is driven by a [`LintConfig`]: a `rules` map from rule id to
//! rule configuration, plus free-form settings that are handed through to
//! every pass unchanged.
//!
//! ## Rule configuration values
//!
//! A rule configuration is either a bare severity or an array whose first
//! element is the severity and whose remaining elements are rule options:
//!
//! ```jsonc
//! {
//!   "extends": "lintel:recommended",
//!   "rules": {
//!     "no-debugger": "error",
//!     "semi": [2, "always"],
//!     "semi-spacing": ["warn", { "before": false, "after": true }]
//!   }
//! }
//! ```
//!
//! Severities may be written as numbers (`0`, `1`, `2`) or names
//! (`"off"`, `"warn"`, `"error"`).

mod lint_config;

pub use lint_config::{
    LintConfig, RuleSeverity, RulesConfig, is_error_severity, normalize_to_strings, rule_options,
};
