pub mod config;
pub mod count;
pub mod det;

use clap::builder::RangedU64ValueParser;

/// Parser for counts that must be at least 1
pub(crate) fn positive_usize() -> RangedU64ValueParser<usize> {
    RangedU64ValueParser::<usize>::new().range(1..)
}
