//! Regex patterns for shipping-label text.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // SKU line: "yudu01;*1;" -> code, quantity
    pub static ref SKU_LINE: Regex = Regex::new(
        r"([A-Za-z0-9-]+);\*([0-9]+);"
    ).unwrap();
}
