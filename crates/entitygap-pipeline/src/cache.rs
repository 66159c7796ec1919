//! Explicit memoization cache for search and extraction results
//!
//! The cache is an inspectable component rather than a transparent
//! decorator: hit and miss counters are exposed so tests can assert cache
//! behavior directly, and only successful results are ever stored - an
//! upstream error is never masked by a cached failure. Eviction is FIFO at
//! a fixed capacity.

use entitygap_domain::EntityRecord;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Key identifying one memoizable upstream call.
///
/// Search results are keyed by the exact input tuple; extraction results by
/// URL and by whether a credential was present (not by the credential value
/// itself, which never enters the cache).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// One search-provider call
    Search {
        /// Query text
        query: String,
        /// Locale/TLD selector
        locale: String,
        /// Requested result count
        count: usize,
    },
    /// One extraction call
    Extraction {
        /// Analyzed URL
        url: String,
        /// Whether a credential was supplied
        with_credential: bool,
    },
}

#[derive(Debug, Clone)]
enum CacheValue {
    Urls(Vec<String>),
    Records(Vec<EntityRecord>),
}

#[derive(Debug, Default)]
struct CacheState {
    map: HashMap<CacheKey, CacheValue>,
    insertion_order: VecDeque<CacheKey>,
    hits: usize,
    misses: usize,
}

/// FIFO-bounded memoization cache shared by one pipeline instance
#[derive(Debug)]
pub struct AnalysisCache {
    state: Mutex<CacheState>,
    capacity: usize,
}

impl AnalysisCache {
    /// Create a cache holding at most `capacity` entries
    pub fn new(capacity: usize) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            capacity,
        }
    }

    /// Look up a cached URL list
    pub fn get_urls(&self, key: &CacheKey) -> Option<Vec<String>> {
        let mut state = self.state.lock().unwrap();
        let found = match state.map.get(key) {
            Some(CacheValue::Urls(urls)) => Some(urls.clone()),
            _ => None,
        };
        match found {
            Some(urls) => {
                state.hits += 1;
                Some(urls)
            }
            None => {
                state.misses += 1;
                None
            }
        }
    }

    /// Look up a cached record list
    pub fn get_records(&self, key: &CacheKey) -> Option<Vec<EntityRecord>> {
        let mut state = self.state.lock().unwrap();
        let found = match state.map.get(key) {
            Some(CacheValue::Records(records)) => Some(records.clone()),
            _ => None,
        };
        match found {
            Some(records) => {
                state.hits += 1;
                Some(records)
            }
            None => {
                state.misses += 1;
                None
            }
        }
    }

    /// Store a successful search result
    pub fn put_urls(&self, key: CacheKey, urls: Vec<String>) {
        self.put(key, CacheValue::Urls(urls));
    }

    /// Store a successful extraction result
    pub fn put_records(&self, key: CacheKey, records: Vec<EntityRecord>) {
        self.put(key, CacheValue::Records(records));
    }

    fn put(&self, key: CacheKey, value: CacheValue) {
        let mut state = self.state.lock().unwrap();
        if !state.map.contains_key(&key) {
            while state.insertion_order.len() >= self.capacity {
                if let Some(oldest) = state.insertion_order.pop_front() {
                    state.map.remove(&oldest);
                }
            }
            state.insertion_order.push_back(key.clone());
        }
        state.map.insert(key, value);
    }

    /// Total lookup hits since creation (or the last `clear`)
    pub fn hits(&self) -> usize {
        self.state.lock().unwrap().hits
    }

    /// Total lookup misses since creation (or the last `clear`)
    pub fn misses(&self) -> usize {
        self.state.lock().unwrap().misses
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.state.lock().unwrap().map.len()
    }

    /// True if no entries are held
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every entry and reset the counters
    pub fn clear(&self) {
        let mut state = self.state.lock().unwrap();
        *state = CacheState::default();
    }
}
