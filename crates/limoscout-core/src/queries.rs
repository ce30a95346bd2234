//! Query generation: turns a [`RegionDefinition`] plus command-line options
//! into the ordered list of Text Search strings for one run.

use crate::regions::{Language, QueryBlock, RegionDefinition};

/// A single free-text search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    pub text: String,
    pub lang: Language,
}

/// Filters applied when generating queries.
///
/// Conflicting subset flags are not rejected: `major_cities_only` wins over
/// `rural_only`.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub no_province_wide: bool,
    pub major_cities_only: bool,
    pub rural_only: bool,
    pub english_only: bool,
}

/// Which city groups a set of options selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coverage {
    MajorOnly,
    RuralOnly,
    Comprehensive,
}

impl QueryOptions {
    #[must_use]
    pub fn coverage(&self) -> Coverage {
        if self.major_cities_only {
            Coverage::MajorOnly
        } else if self.rural_only {
            Coverage::RuralOnly
        } else {
            Coverage::Comprehensive
        }
    }
}

/// Generate the ordered query list for `region`.
///
/// Province-wide queries (unless disabled) come first, followed by the
/// selected city groups in definition order. With `english_only`, queries in
/// any other language are dropped from every group.
#[must_use]
pub fn generate_queries(region: &RegionDefinition, options: &QueryOptions) -> Vec<Query> {
    let groups: Vec<&[QueryBlock]> = match options.coverage() {
        Coverage::MajorOnly => vec![region.major.as_slice()],
        Coverage::RuralOnly => vec![region.rural.as_slice()],
        Coverage::Comprehensive => vec![
            region.major.as_slice(),
            region.medium.as_slice(),
            region.rural.as_slice(),
        ],
    };

    let mut queries = Vec::new();
    if !options.no_province_wide {
        push_blocks(&mut queries, &region.province_wide, options.english_only);
    }
    for blocks in groups {
        push_blocks(&mut queries, blocks, options.english_only);
    }
    queries
}

fn push_blocks(out: &mut Vec<Query>, blocks: &[QueryBlock], english_only: bool) {
    for block in blocks {
        if english_only && block.lang != Language::En {
            continue;
        }
        out.extend(block.queries.iter().map(|text| Query {
            text: text.clone(),
            lang: block.lang,
        }));
    }
}
