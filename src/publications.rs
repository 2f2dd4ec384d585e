//! Publication records built from the publications directory.

use std::cmp::Ordering;

use chrono::NaiveDate;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::content::ContentFile;
use crate::normalize::{normalize, strip_html_tags};

// chrono alone accepts unpadded fields, signs and leading whitespace.
static RE_ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

/// One normalized publication entry.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PublicationRecord {
    /// Publication title.
    pub title: String,
    /// Venue, or the journal when no venue is given.
    pub venue: String,
    /// Raw date string as written in the front matter.
    pub date: String,
    /// Short summary shown under the title.
    pub excerpt: String,
    /// Entire body text, normalized.
    pub description: String,
}

impl PublicationRecord {
    /// Builds a record from a publication file.
    ///
    /// Returns `None` when the file has no complete front matter block; such files are not
    /// publications.
    pub fn from_file(file: &ContentFile) -> Option<Self> {
        if !file.has_front_matter() {
            debug!(
                "Skipping {}: no front matter block",
                file.path().display()
            );
            return None;
        }

        let meta = file.metadata();
        let title = if meta.has("title") {
            meta.get_str("title").unwrap_or_default()
        } else {
            file.stem().replace('-', " ")
        };
        let venue = if meta.has("venue") {
            meta.get_str("venue")
        } else {
            meta.get_str("journal")
        }
        .unwrap_or_default();
        let excerpt = meta.get_str("excerpt").unwrap_or_default();
        let description = file.body().join("\n");

        Some(Self {
            title: normalize(&title),
            venue: normalize(&venue),
            date: meta.get_str("date").unwrap_or_default(),
            excerpt: normalize(&strip_html_tags(&excerpt)),
            description: normalize(description.trim()),
        })
    }

    /// Parses the date as an ISO-8601 calendar date (`YYYY-MM-DD`, zero padded).
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        if !RE_ISO_DATE.is_match(&self.date) {
            return None;
        }
        NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").ok()
    }
}

/// Orders records newest first; records without a valid date sort last.
fn newest_first(a: &PublicationRecord, b: &PublicationRecord) -> Ordering {
    // `None` orders below every date, standing in for the minimum date.
    b.parsed_date().cmp(&a.parsed_date())
}

/// Builds, sorts and optionally truncates the publication list.
///
/// Files without front matter are skipped. The sort is stable, so records with equal dates keep
/// the order of `files`. A `limit` of `Some(0)` keeps every record.
pub fn build_publications(files: &[ContentFile], limit: Option<usize>) -> Vec<PublicationRecord> {
    let mut records: Vec<_> = files.iter().filter_map(PublicationRecord::from_file).collect();
    records.sort_by(newest_first);

    if let Some(limit) = limit.filter(|limit| *limit > 0) {
        records.truncate(limit);
    }
    records
}
