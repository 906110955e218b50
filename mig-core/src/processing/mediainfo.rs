//! Parser for mediainfo's default text report.
//!
//! mediainfo prints one block per track: a bare section name line
//! (`General`, `Video`, `Audio #1`, ...) followed by `key : value` lines,
//! with blank lines between blocks. This module turns that report into a
//! [`MediainfoRecord`] keyed by section name.

use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::BTreeMap;

use crate::utils::decode_text;

/// Attributes of one section, `key -> value`.
pub type SectionData = BTreeMap<String, String>;

/// The data stored under one section name.
///
/// A name seen once holds its data directly. When the same name appears
/// again the entry becomes a list holding every occurrence in the order they
/// appeared in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SectionEntry {
    Single(SectionData),
    Repeated(Vec<SectionData>),
}

impl SectionEntry {
    /// The first occurrence of the section.
    #[must_use]
    pub fn first(&self) -> Option<&SectionData> {
        match self {
            SectionEntry::Single(data) => Some(data),
            SectionEntry::Repeated(all) => all.first(),
        }
    }

    /// Every occurrence of the section, in report order.
    #[must_use]
    pub fn all(&self) -> Vec<&SectionData> {
        match self {
            SectionEntry::Single(data) => vec![data],
            SectionEntry::Repeated(all) => all.iter().collect(),
        }
    }

    /// Number of occurrences stored.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            SectionEntry::Single(_) => 1,
            SectionEntry::Repeated(all) => all.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn push(&mut self, data: SectionData) {
        match self {
            SectionEntry::Single(existing) => {
                let first = std::mem::take(existing);
                *self = SectionEntry::Repeated(vec![first, data]);
            }
            SectionEntry::Repeated(all) => all.push(data),
        }
    }
}

impl Serialize for SectionEntry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SectionEntry::Single(data) => data.serialize(serializer),
            SectionEntry::Repeated(all) => all.serialize(serializer),
        }
    }
}

/// Parsed mediainfo report.
///
/// Sections keep the order in which their names first appeared. A section
/// that had no name line (attributes before the first header, or an empty
/// report) is stored under the empty name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediainfoRecord {
    output: String,
    sections: Vec<(String, SectionEntry)>,
    section_type_counts: BTreeMap<String, u32>,
}

impl MediainfoRecord {
    fn new(output: String) -> Self {
        let mut section_type_counts = BTreeMap::new();
        section_type_counts.insert("audio".to_string(), 0);
        section_type_counts.insert("video".to_string(), 0);
        Self {
            output,
            sections: Vec::new(),
            section_type_counts,
        }
    }

    /// The raw report the record was parsed from.
    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Occurrence counts per section type (`audio`, `video`, `general`, ...).
    #[must_use]
    pub fn section_type_counts(&self) -> &BTreeMap<String, u32> {
        &self.section_type_counts
    }

    #[must_use]
    pub fn section_type_count(&self, section_type: &str) -> Option<u32> {
        self.section_type_counts.get(section_type).copied()
    }

    /// Section names in the order they first appeared.
    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn entry(&self, name: &str) -> Option<&SectionEntry> {
        self.sections
            .iter()
            .find(|(section_name, _)| section_name == name)
            .map(|(_, entry)| entry)
    }

    /// First section stored under `name`.
    #[must_use]
    pub fn section(&self, name: &str) -> Option<&SectionData> {
        self.entry(name).and_then(SectionEntry::first)
    }

    /// First section whose type matches, e.g. `video` finds `Video` or `Video #1`.
    #[must_use]
    pub fn first_section_of_type(&self, section_type: &str) -> Option<&SectionData> {
        self.sections
            .iter()
            .find(|(name, _)| section_type_of(name) == section_type)
            .and_then(|(_, entry)| entry.first())
    }

    /// Looks up `key` in the first section named `section`.
    #[must_use]
    pub fn field(&self, section: &str, key: &str) -> Option<&str> {
        self.section(section)
            .and_then(|data| data.get(key))
            .map(String::as_str)
    }

    fn append_section(&mut self, name: String, data: SectionData) {
        let section_type = section_type_of(&name);

        match self
            .sections
            .iter_mut()
            .find(|(section_name, _)| *section_name == name)
        {
            Some((_, entry)) => entry.push(data),
            None => self.sections.push((name, SectionEntry::Single(data))),
        }

        *self.section_type_counts.entry(section_type).or_insert(0) += 1;
    }
}

/// Keys the record itself writes; sections with these names are left out
/// of the serialized map and stay reachable through [`MediainfoRecord::entry`].
const RESERVED_KEYS: [&str; 2] = ["output", "section_type_counts"];

impl Serialize for MediainfoRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let sections: Vec<_> = self
            .sections
            .iter()
            .filter(|(name, _)| !RESERVED_KEYS.contains(&name.as_str()))
            .collect();

        let mut map = serializer.serialize_map(Some(sections.len() + 2))?;
        map.serialize_entry("output", &self.output)?;
        map.serialize_entry("section_type_counts", &self.section_type_counts)?;
        for (name, entry) in sections {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

/// Section type is the lowercased first word of the name (`Audio #1` -> `audio`).
fn section_type_of(name: &str) -> String {
    name.split_whitespace()
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Parses raw mediainfo output, re-decoding it first when it is not UTF-8.
#[must_use]
pub fn parse_mediainfo_bytes(bytes: Vec<u8>) -> MediainfoRecord {
    parse_mediainfo_output(decode_text(bytes))
}

/// Parses a mediainfo text report.
#[must_use]
pub fn parse_mediainfo_output(output: String) -> MediainfoRecord {
    let mut parsed: Vec<(String, SectionData)> = Vec::new();
    let mut section_name: Option<String> = None;
    let mut section_data = SectionData::new();

    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let parts: Vec<&str> = line.split(':').collect();
        match parts.as_slice() {
            [name] => {
                if section_name.is_some() || !section_data.is_empty() {
                    parsed.push((
                        section_name.take().unwrap_or_default(),
                        std::mem::take(&mut section_data),
                    ));
                }
                section_name = Some(name.trim().to_string());
            }
            [key, value] => {
                section_data.insert(key.trim().to_string(), value.trim().to_string());
            }
            [key, rest @ ..] => {
                let value = rest.iter().map(|part| part.trim()).collect::<Vec<_>>().join(":");
                section_data.insert(key.trim().to_string(), value);
            }
            [] => {}
        }
    }
    parsed.push((section_name.unwrap_or_default(), section_data));

    let mut record = MediainfoRecord::new(output);
    for (name, data) in parsed {
        record.append_section(name, data);
    }

    log::debug!(
        "Parsed mediainfo output into {} section(s): {:?}",
        record.sections.len(),
        record.section_type_counts
    );
    record
}
