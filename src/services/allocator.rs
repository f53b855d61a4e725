//! Short code allocation
//!
//! Picks the code for a new link: either the caller's own code after format
//! and availability checks, or a random one that the store does not know yet.

use tracing::{debug, warn};

use crate::errors::{LinkdashError, Result};
use crate::storage::LinkStore;
use crate::utils::{generate_random_code, is_valid_short_code};

pub const DEFAULT_MAX_ATTEMPTS: usize = 10;
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Outcome of [`CodeAllocator::allocate`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub code: String,
    /// `true` when the code was synthesized rather than requested
    pub generated: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct CodeAllocator {
    max_attempts: usize,
    code_length: usize,
}

impl Default for CodeAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ATTEMPTS, DEFAULT_CODE_LENGTH)
    }
}

impl CodeAllocator {
    pub fn new(max_attempts: usize, code_length: usize) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            code_length,
        }
    }

    pub fn max_attempts(&self) -> usize {
        self.max_attempts
    }

    /// Validate `requested` or synthesize a free code.
    ///
    /// Nothing is reserved: the caller must insert promptly, and the insert
    /// itself is what guarantees uniqueness. An empty `requested` counts as
    /// absent.
    pub async fn allocate(
        &self,
        store: &dyn LinkStore,
        requested: Option<&str>,
    ) -> Result<Allocation> {
        match requested.filter(|c| !c.is_empty()) {
            Some(code) => self.check_requested(store, code).await,
            None => self.generate(store).await,
        }
    }

    async fn check_requested(&self, store: &dyn LinkStore, code: &str) -> Result<Allocation> {
        if !is_valid_short_code(code) {
            return Err(LinkdashError::invalid_format(
                "Code must be 6-8 alphanumeric characters",
            ));
        }

        if store.exists(code).await? {
            return Err(LinkdashError::conflict(format!(
                "Code '{}' already exists",
                code
            )));
        }

        Ok(Allocation {
            code: code.to_string(),
            generated: false,
        })
    }

    async fn generate(&self, store: &dyn LinkStore) -> Result<Allocation> {
        for attempt in 1..=self.max_attempts {
            let code = generate_random_code(self.code_length);
            if !store.exists(&code).await? {
                return Ok(Allocation {
                    code,
                    generated: true,
                });
            }
            debug!("Generated code '{}' is taken (attempt {})", code, attempt);
        }

        warn!(
            "Failed to generate a unique code after {} attempts",
            self.max_attempts
        );
        Err(LinkdashError::allocation_exhausted(
            "Failed to generate unique code",
        ))
    }
}
