// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Read-only view over the fetched chain list, plus search/filter/sort

use std::cmp::Ordering;

use super::types::Chain;

/// Chain list fetched once from the registry
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    chains: Vec<Chain>,
}

impl Catalog {
    pub fn new(chains: Vec<Chain>) -> Self {
        Self { chains }
    }

    pub fn chains(&self) -> &[Chain] {
        &self.chains
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }

    /// Look up by chain name or chain id
    pub fn get(&self, name_or_id: &str) -> Option<&Chain> {
        self.chains
            .iter()
            .find(|c| c.chain_name == name_or_id || c.chain_id == name_or_id)
    }

    /// The chain selected when nothing else is requested
    pub fn default_chain(&self) -> Option<&Chain> {
        self.chains.first()
    }

    /// Distinct network types in order of first appearance
    pub fn network_types(&self) -> Vec<String> {
        let mut types: Vec<String> = Vec::new();
        for chain in &self.chains {
            if !types.contains(&chain.network_type) {
                types.push(chain.network_type.clone());
            }
        }
        types
    }
}

/// Client-side search and network-type filter over the chain list
#[derive(Debug, Clone, Default)]
pub struct ChainFilter {
    pub search: Option<String>,
    /// `None` or `"all"` disables the filter
    pub network_type: Option<String>,
}

impl ChainFilter {
    pub fn new(search: Option<String>, network_type: Option<String>) -> Self {
        Self {
            search,
            network_type,
        }
    }

    pub fn matches(&self, chain: &Chain) -> bool {
        if let Some(query) = self.search.as_deref().filter(|q| !q.is_empty()) {
            let query = query.to_lowercase();
            let hit = chain.chain_name.to_lowercase().contains(&query)
                || chain.chain_id.to_lowercase().contains(&query)
                || chain.pretty_name.to_lowercase().contains(&query);
            if !hit {
                return false;
            }
        }

        match self.network_type.as_deref() {
            None | Some("all") | Some("") => true,
            Some(kind) => chain.network_type == kind,
        }
    }

    /// Filter then sort: Initia chains first, then by display name
    pub fn apply<'a>(&self, chains: &'a [Chain]) -> Vec<&'a Chain> {
        let mut filtered: Vec<&Chain> = chains.iter().filter(|c| self.matches(c)).collect();
        filtered.sort_by(|a, b| compare_chains(a, b));
        filtered
    }
}

fn is_initia(chain: &Chain) -> bool {
    chain.chain_id.to_lowercase().contains("initia")
}

fn compare_chains(a: &Chain, b: &Chain) -> Ordering {
    match (is_initia(a), is_initia(b)) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => {
            let (name_a, name_b) = (a.display_name(), b.display_name());
            name_a
                .to_lowercase()
                .cmp(&name_b.to_lowercase())
                .then_with(|| name_a.cmp(name_b))
        }
    }
}
