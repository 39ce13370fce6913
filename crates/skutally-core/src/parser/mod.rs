//! Recognition of SKU lines in extracted label text.

pub mod patterns;

use tracing::{debug, trace};

use crate::models::sku::SkuLine;
use patterns::SKU_LINE;

/// Recognizes `<sku>;*<quantity>;` items in label text.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineParser;

impl LineParser {
    /// Create a new line parser.
    pub fn new() -> Self {
        Self
    }

    /// Parse one line of text.
    ///
    /// The first `<sku>;*<digits>;` occurrence in the line is used. Lines
    /// without it, or whose quantity does not fit in a `u32`, yield `None`.
    pub fn parse(&self, line: &str) -> Option<SkuLine> {
        trace!("Processing line: {}", line);

        let caps = SKU_LINE.captures(line)?;
        let sku_code = &caps[1];
        let quantity: u32 = match caps[2].parse() {
            Ok(q) => q,
            Err(e) => {
                debug!("Ignoring {} with unreadable quantity {}: {}", sku_code, &caps[2], e);
                return None;
            }
        };

        if quantity == 0 {
            debug!("Zero quantity for SKU {}", sku_code);
        }
        debug!("Found SKU code: {}, quantity: {}", sku_code, quantity);

        Some(SkuLine::new(sku_code, quantity))
    }

    /// Parse every line of a page text.
    pub fn parse_text(&self, text: &str) -> Vec<SkuLine> {
        text.lines().filter_map(|line| self.parse(line)).collect()
    }
}

/// Parse one line with the default parser.
pub fn parse_line(line: &str) -> Option<SkuLine> {
    LineParser::new().parse(line)
}
