//! Station autocomplete
//!
//! Suggestions are plain case-insensitive substring matches over the cached
//! station list, kept in catalogue order. Only rail terminals are offered.

use crate::model::{Port, TRANSPORT_RAIL};

pub const MAX_SUGGESTIONS: usize = 8;

/// Rail stations matching `query` by name, city, country or code
///
/// `exclude_code` is the code already chosen for the opposite endpoint.
pub fn suggest<'a>(query: &str, stations: &'a [Port], exclude_code: Option<&str>) -> Vec<&'a Port> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }

    stations
        .iter()
        .filter(|port| port.supports(TRANSPORT_RAIL))
        .filter(|port| exclude_code != Some(port.code.as_str()))
        .filter(|port| {
            [&port.name, &port.city, &port.country, &port.code]
                .iter()
                .any(|field| field.to_lowercase().contains(&needle))
        })
        .take(MAX_SUGGESTIONS)
        .collect()
}

/// Maps free text to a station: exact name/city/code first, then a
/// name or city containing the text
pub fn resolve<'a>(input: &str, stations: &'a [Port]) -> Option<&'a Port> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    stations
        .iter()
        .find(|port| {
            port.code.to_lowercase() == needle
                || port.name.to_lowercase() == needle
                || port.city.to_lowercase() == needle
        })
        .or_else(|| {
            stations.iter().find(|port| {
                port.name.to_lowercase().contains(&needle)
                    || port.city.to_lowercase().contains(&needle)
            })
        })
}

/// One endpoint input of the search form
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationField {
    text: String,
    selected_code: Option<String>,
}

impl StationField {
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Typing replaces the text and drops any earlier selection
    pub fn input(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.selected_code = None;
    }

    /// Picking a suggestion stores the station code as the field value
    pub fn select(&mut self, port: &Port) {
        self.text = port.code.clone();
        self.selected_code = Some(port.code.clone());
    }

    pub fn selected_code(&self) -> Option<&str> {
        self.selected_code.as_deref()
    }

    /// Code sent to the API: the selected station, or whatever the text
    /// resolves to
    pub fn submitted_code(&self, stations: &[Port]) -> Option<String> {
        match &self.selected_code {
            Some(code) => Some(code.clone()),
            None => resolve(&self.text, stations).map(|port| port.code.clone()),
        }
    }

    pub fn suggestions<'a>(&self, stations: &'a [Port], opposite: &StationField) -> Vec<&'a Port> {
        let exclude = opposite.text().trim();
        let exclude = (!exclude.is_empty()).then_some(exclude);
        suggest(&self.text, stations, exclude)
    }
}
