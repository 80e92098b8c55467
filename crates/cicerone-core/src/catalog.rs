use crate::constants::ALL_CATEGORIES;
use crate::error::Result;
use crate::poi::{Poi, PoiId};
use std::collections::BTreeSet;

/// Identifies one catalog load request. Issued by [`PoiCatalog::begin_load`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LoadTicket(u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadOutcome {
    Replaced { count: usize },
    /// A newer load already landed; this reply was discarded.
    Stale,
}

/// The POI dataset plus the category list derived from it.
#[derive(Clone, Debug)]
pub struct PoiCatalog {
    pois: Vec<Poi>,
    categories: Vec<String>,
    issued: u64,
    applied: u64,
}

impl Default for PoiCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl PoiCatalog {
    pub fn new() -> Self {
        Self {
            pois: Vec::new(),
            categories: vec![ALL_CATEGORIES.to_string()],
            issued: 0,
            applied: 0,
        }
    }

    pub fn pois(&self) -> &[Poi] {
        &self.pois
    }

    /// Sorted distinct category names, prefixed with [`ALL_CATEGORIES`].
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.pois.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pois.is_empty()
    }

    pub fn find(&self, id: PoiId) -> Option<&Poi> {
        self.pois.iter().find(|p| p.id == id)
    }

    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        LoadTicket(self.issued)
    }

    /// Apply the reply of the load identified by `ticket`.
    ///
    /// Replies older than the last applied one are discarded whether they
    /// succeeded or not. A failed reply leaves the held catalog untouched and
    /// hands the error back to the caller.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        reply: Result<Vec<Poi>>,
    ) -> Result<LoadOutcome> {
        if ticket.0 < self.applied {
            log::debug!(
                "[catalog] discarding stale reply #{} (applied #{})",
                ticket.0,
                self.applied
            );
            return Ok(LoadOutcome::Stale);
        }
        let pois =
            reply.inspect_err(|e| log::warn!("[catalog] load #{} failed: {}", ticket.0, e))?;
        self.applied = ticket.0;
        let count = pois.len();
        self.replace(pois);
        log::info!("[catalog] load #{} replaced catalog with {} pois", ticket.0, count);
        Ok(LoadOutcome::Replaced { count })
    }

    /// Swap in a new dataset. Categories are derived before either field
    /// changes so readers never see a mixed state.
    pub fn replace(&mut self, pois: Vec<Poi>) {
        let categories = derive_categories(&pois);
        self.pois = pois;
        self.categories = categories;
    }
}

pub fn derive_categories(pois: &[Poi]) -> Vec<String> {
    let distinct: BTreeSet<&str> = pois
        .iter()
        .map(|p| p.category.as_str())
        .filter(|c| *c != ALL_CATEGORIES)
        .collect();
    std::iter::once(ALL_CATEGORIES)
        .chain(distinct)
        .map(str::to_string)
        .collect()
}
