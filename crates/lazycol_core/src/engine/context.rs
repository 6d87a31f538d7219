use hashbrown::HashMap;
use lazycol_error::{LcError, Result};
use regex::Regex;

use crate::config::eval::EvalConfig;

/// State for a single evaluation.
///
/// Lives only as long as one `evaluate` call, so nothing cached here leaks
/// between evaluations.
#[derive(Debug)]
pub struct EvalContext<'a> {
    config: &'a EvalConfig,
    regexes: HashMap<String, Regex>,
}

impl<'a> EvalContext<'a> {
    pub fn new(config: &'a EvalConfig) -> Self {
        EvalContext {
            config,
            regexes: HashMap::new(),
        }
    }

    pub fn config(&self) -> &EvalConfig {
        self.config
    }

    /// Get a compiled regex for a pattern, compiling it on first use.
    pub fn regex(&mut self, pattern: &str) -> Result<&Regex> {
        if !self.regexes.contains_key(pattern) {
            let regex = Regex::new(pattern).map_err(|e| {
                LcError::compute("Failed to build regexp pattern")
                    .with_field("pattern", pattern)
                    .with_source(e)
            })?;
            self.regexes.insert(pattern.to_string(), regex);
        }

        self.regexes
            .get(pattern)
            .ok_or_else(|| LcError::new("Missing cached regex"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn regex_cached() {
        let config = EvalConfig::default();
        let mut ctx = EvalContext::new(&config);

        assert!(ctx.regex("a+").unwrap().is_match("caat"));
        assert!(ctx.regex("a+").unwrap().is_match("a"));
        assert_eq!(1, ctx.regexes.len());

        let err = ctx.regex("(").unwrap_err();
        assert!(err.is_compute());
    }
}
