//! Declarative selector probes and the shared "first non-empty match wins" routine.
//!
//! Extractors describe where each field may live as an ordered slice of
//! [`Probe`]s. The helpers here walk that slice and stop at the first probe
//! that yields something.

use crate::normalize::non_empty;
use log::debug;
use scraper::{ElementRef, Html, Selector};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe {
    /// Text of every element matching a CSS selector.
    Css(&'static str),
    /// An attribute of every element matching a CSS selector.
    Attr(&'static str, &'static str),
    /// Items of the first `list` element that follows a `heading` element whose
    /// text contains `keyword` (case-insensitive).
    AfterHeading {
        heading: &'static str,
        keyword: &'static str,
        list: &'static str,
    },
}

/// Joined text content of an element, as-is.
pub fn element_text(element: ElementRef) -> String {
    element.text().collect::<Vec<_>>().join(" ")
}

/// Everything one probe yields, normalized, empties removed.
pub fn collect(document: &Html, probe: &Probe) -> Vec<String> {
    match *probe {
        Probe::Css(selector) => select(document, selector)
            .into_iter()
            .filter_map(|el| non_empty(&element_text(el)))
            .collect(),
        Probe::Attr(selector, attr) => select(document, selector)
            .into_iter()
            .filter_map(|el| el.value().attr(attr))
            .filter_map(non_empty)
            .collect(),
        Probe::AfterHeading {
            heading,
            keyword,
            list,
        } => after_heading(document, heading, keyword, list),
    }
}

/// First value of the first probe that yields anything.
pub fn first_text(document: &Html, probes: &[Probe]) -> Option<String> {
    probes.iter().find_map(|probe| {
        let value = collect(document, probe).into_iter().next();
        if value.is_some() {
            debug!("Probe {:?} matched", probe);
        }
        value
    })
}

/// All values of the first probe that yields at least one value accepted by `keep`.
pub fn first_list<F>(document: &Html, probes: &[Probe], keep: F) -> Vec<String>
where
    F: Fn(&str) -> bool,
{
    for probe in probes {
        let items: Vec<String> = collect(document, probe)
            .into_iter()
            .filter(|item| keep(item))
            .collect();
        if !items.is_empty() {
            debug!("Probe {:?} matched {} items", probe, items.len());
            return items;
        }
    }
    Vec::new()
}

/// Elements matching `selector`; an unparsable selector matches nothing.
pub fn select<'a>(document: &'a Html, selector: &str) -> Vec<ElementRef<'a>> {
    match Selector::parse(selector) {
        Ok(selector) => document.select(&selector).collect(),
        Err(e) => {
            debug!("Skipping invalid selector {:?}: {:?}", selector, e);
            Vec::new()
        }
    }
}

fn after_heading(document: &Html, heading: &str, keyword: &str, list: &str) -> Vec<String> {
    let Ok(item_selector) = Selector::parse("li") else {
        return Vec::new();
    };
    let keyword = keyword.to_lowercase();

    for header in select(document, heading) {
        if !element_text(header).to_lowercase().contains(&keyword) {
            continue;
        }

        let following = header
            .next_siblings()
            .filter_map(ElementRef::wrap)
            .take_while(|el| el.value().name() != header.value().name())
            .find(|el| el.value().name() == list);

        if let Some(list_el) = following {
            let items: Vec<String> = list_el
                .select(&item_selector)
                .filter_map(|li| non_empty(&element_text(li)))
                .collect();
            if !items.is_empty() {
                return items;
            }
        }
    }

    Vec::new()
}
